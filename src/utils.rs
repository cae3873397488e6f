//! Utility functions and traits for `QuadMap`

use std::hash::Hash;

use crate::QuadMap;

/// Extension trait for map implementations that provides owned snapshots
pub trait MapExtensions<K, V> {
    /// Returns the keys of the map as a Vec, in cell order
    fn keys_vec(&self) -> Vec<K>;

    /// Returns the values of the map as a Vec, in cell order
    fn values_vec(&self) -> Vec<V>;

    /// Returns the keys of the map sorted ascending
    fn sorted_keys(&self) -> Vec<K>
    where
        K: Ord,
    {
        let mut keys = self.keys_vec();
        keys.sort_unstable();
        keys
    }
}

impl<K, V, S> MapExtensions<K, V> for QuadMap<K, V, S>
where
    K: Clone,
    V: Clone,
{
    fn keys_vec(&self) -> Vec<K> {
        self.keys().cloned().collect()
    }

    fn values_vec(&self) -> Vec<V> {
        self.values().cloned().collect()
    }
}

/// Creates a `QuadMap` with default settings from an iterator of key-value pairs
#[must_use]
pub fn from_iter<K, V, I>(iter: I) -> QuadMap<K, V>
where
    K: Eq + Hash,
    I: IntoIterator<Item = (K, V)>,
{
    let mut map = QuadMap::new();
    map.put_all(iter);
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_iter() {
        let data = vec![("a".to_string(), 1), ("b".to_string(), 2), ("c".to_string(), 3)];

        let map = from_iter(data);

        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.get("b"), Some(&2));
        assert_eq!(map.get("c"), Some(&3));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_keys_and_values() {
        let mut map = QuadMap::new();
        map.put("b".to_string(), 2);
        map.put("c".to_string(), 3);
        map.put("a".to_string(), 1);

        let mut values = map.values_vec();
        values.sort_unstable();

        assert_eq!(map.sorted_keys(), vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_eq!(map.keys_vec().len(), 3);
        assert_eq!(values, vec![1, 2, 3]);
    }
}
