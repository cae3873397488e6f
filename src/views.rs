//! Live views over the keys, values and entries of a `QuadMap`.
//!
//! A view holds the table mutably for as long as it lives. Removing or
//! clearing through a view acts on the table itself; adding through a view is
//! not supported.

use std::hash::{BuildHasher, Hash};

use crate::{
    cursor::{EntryCursor, KeyCursor, ValueCursor},
    error::TableError,
    quad_map::{DefaultState, Iter, Keys, QuadMap, Values},
};

/// Collection-like operations shared by the three views
pub trait MapView {
    /// Element type seen through the view
    type Item;

    /// Number of entries in the underlying table
    fn len(&self) -> usize;

    /// Returns true if the underlying table holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `item` is visible through the view
    fn contains(&self, item: &Self::Item) -> bool;

    /// Removes the entry behind `item` from the table; returns true if one was removed
    fn remove(&mut self, item: &Self::Item) -> bool;

    /// Removes every entry from the table
    fn clear(&mut self);

    /// Views never accept new elements.
    ///
    /// # Errors
    ///
    /// Always returns [`TableError::UnsupportedOperation`].
    fn add(&mut self, _item: Self::Item) -> Result<bool, TableError> {
        Err(TableError::UnsupportedOperation("add"))
    }

    /// Views never accept new elements, in bulk either.
    ///
    /// # Errors
    ///
    /// Always returns [`TableError::UnsupportedOperation`].
    fn add_all<I>(&mut self, _items: I) -> Result<bool, TableError>
    where
        I: IntoIterator<Item = Self::Item>,
        Self: Sized,
    {
        Err(TableError::UnsupportedOperation("add_all"))
    }
}

/// Live set of the keys of a table
#[derive(Debug)]
pub struct KeyView<'a, K, V, S = DefaultState> {
    /// Table seen through the view
    map: &'a mut QuadMap<K, V, S>,
}

impl<K, V, S> KeyView<'_, K, V, S> {
    /// Iterates over the keys in cell order
    #[must_use]
    pub fn iter(&self) -> Keys<'_, K, V> {
        self.map.keys()
    }

    /// Fail-fast cursor over the keys, detached from this view
    #[must_use]
    pub fn cursor(&self) -> KeyCursor<K, V, S> {
        KeyCursor::new(self.map)
    }
}

impl<K, V, S> MapView for KeyView<'_, K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Item = K;

    fn len(&self) -> usize {
        self.map.len()
    }

    fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    fn remove(&mut self, key: &K) -> bool {
        self.map.remove(key).is_some()
    }

    fn clear(&mut self) {
        self.map.clear();
    }
}

/// Live collection of the values of a table; duplicates are possible
#[derive(Debug)]
pub struct ValueView<'a, K, V, S = DefaultState> {
    /// Table seen through the view
    map: &'a mut QuadMap<K, V, S>,
}

impl<K, V, S> ValueView<'_, K, V, S> {
    /// Iterates over the values in cell order
    #[must_use]
    pub fn iter(&self) -> Values<'_, K, V> {
        self.map.values()
    }

    /// Fail-fast cursor over the values, detached from this view
    #[must_use]
    pub fn cursor(&self) -> ValueCursor<K, V, S> {
        ValueCursor::new(self.map)
    }
}

impl<K, V: PartialEq, S> MapView for ValueView<'_, K, V, S> {
    type Item = V;

    fn len(&self) -> usize {
        self.map.len()
    }

    fn contains(&self, value: &V) -> bool {
        self.map.contains_value(value)
    }

    /// Removes the first entry, in cell order, holding `value`
    fn remove(&mut self, value: &V) -> bool {
        let found = (0..self.map.capacity())
            .find(|&index| self.map.pair_at(index).is_some_and(|(_, stored)| stored == value));
        found.and_then(|index| self.map.bury_at(index)).is_some()
    }

    fn clear(&mut self) {
        self.map.clear();
    }
}

/// Live set of the key-value pairs of a table
#[derive(Debug)]
pub struct EntryView<'a, K, V, S = DefaultState> {
    /// Table seen through the view
    map: &'a mut QuadMap<K, V, S>,
}

impl<K, V, S> EntryView<'_, K, V, S> {
    /// Iterates over the entries in cell order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.map.iter()
    }

    /// Fail-fast cursor over the entries, detached from this view
    #[must_use]
    pub fn cursor(&self) -> EntryCursor<K, V, S> {
        EntryCursor::new(self.map)
    }
}

impl<K, V, S> MapView for EntryView<'_, K, V, S>
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    type Item = (K, V);

    fn len(&self) -> usize {
        self.map.len()
    }

    /// Matches on both key and value, found through the key's probe sequence
    fn contains(&self, (key, value): &(K, V)) -> bool {
        self.map.get(key) == Some(value)
    }

    fn remove(&mut self, entry: &(K, V)) -> bool {
        self.contains(entry) && self.map.remove(&entry.0).is_some()
    }

    fn clear(&mut self) {
        self.map.clear();
    }
}

impl<K, V, S> QuadMap<K, V, S> {
    /// Live view of the keys
    pub fn key_view(&mut self) -> KeyView<'_, K, V, S> {
        KeyView { map: self }
    }

    /// Live view of the values
    pub fn value_view(&mut self) -> ValueView<'_, K, V, S> {
        ValueView { map: self }
    }

    /// Live view of the entries
    pub fn entry_view(&mut self) -> EntryView<'_, K, V, S> {
        EntryView { map: self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> QuadMap<String, i32> {
        [("a", 1), ("b", 2), ("c", 2)].into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn test_key_view_is_live() {
        let mut map = sample();
        let mut keys = map.key_view();
        assert_eq!(keys.len(), 3);
        assert!(keys.contains(&"a".to_string()));
        assert!(keys.remove(&"a".to_string()));
        assert!(!keys.remove(&"a".to_string()));
        assert_eq!(keys.iter().count(), 2);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), None);
    }

    #[test]
    fn test_value_view_removes_single_occurrence() {
        let mut map = sample();
        let mut values = map.value_view();
        assert!(values.contains(&2));
        assert!(values.remove(&2));
        assert_eq!(values.len(), 2);
        assert!(values.contains(&2));
        assert!(values.remove(&2));
        assert!(!values.contains(&2));
        assert!(!values.remove(&7));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a"), Some(&1));
    }

    #[test]
    fn test_entry_view_matches_key_and_value() {
        let mut map = sample();
        let mut entries = map.entry_view();
        assert!(entries.contains(&("b".to_string(), 2)));
        assert!(!entries.contains(&("b".to_string(), 3)));
        assert!(!entries.remove(&("b".to_string(), 3)));
        assert!(entries.remove(&("b".to_string(), 2)));
        assert_eq!(entries.iter().count(), 2);
        assert_eq!(map.get("b"), None);
    }

    #[test]
    fn test_clear_through_view() {
        let mut map = sample();
        map.value_view().clear();
        assert!(map.is_empty());
        assert!(map.entry_view().is_empty());
    }

    #[test]
    fn test_add_is_unsupported() {
        let unsupported = Err(TableError::UnsupportedOperation("add"));
        let mut map = sample();
        assert_eq!(map.key_view().add("z".to_string()), unsupported);
        assert_eq!(map.value_view().add(9), unsupported);
        assert_eq!(map.entry_view().add(("z".to_string(), 9)), unsupported);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_add_all_is_unsupported() {
        let unsupported = Err(TableError::UnsupportedOperation("add_all"));
        let mut map = sample();
        assert_eq!(map.key_view().add_all(vec!["y".to_string(), "z".to_string()]), unsupported);
        assert_eq!(map.value_view().add_all([7, 8]), unsupported);
        assert_eq!(map.entry_view().add_all(Some(("z".to_string(), 9))), unsupported);
        assert_eq!(map.entry_view().add_all(Vec::new()), unsupported);
        assert_eq!(map.len(), 3);
        assert_eq!(map.get("z"), None);
    }
}
