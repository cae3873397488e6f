use std::{
    borrow::Borrow,
    fmt,
    hash::{BuildHasher, BuildHasherDefault, DefaultHasher, Hash, Hasher},
    iter::FusedIterator,
    mem,
};

use log::{debug, trace};

use crate::{
    config::TableConfig,
    dynamic_array::DynamicArray,
    probe::{QuadraticProbe, grown_capacity, home_slot},
    slot::{Slot, SlotState},
};

/// Hasher builder used when none is supplied. Deterministic across runs.
pub type DefaultState = BuildHasherDefault<DefaultHasher>;

/// Outcome of walking the probe path of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lookup {
    /// The key lives at this index
    Found(usize),
    /// The key is absent; this is the first open cell on its path
    Vacant(usize),
    /// Every candidate was visited without reaching an open cell
    Exhausted,
}

/// Returns true where a lookup for `key` stops: an open cell or the cell holding `key`
fn ends_lookup<K, V, Q>(slot: &Slot<K, V>, key: &Q) -> bool
where
    K: Borrow<Q>,
    Q: Eq + ?Sized,
{
    match slot {
        Slot::Open => true,
        Slot::Closed { key: stored, .. } => stored.borrow() == key,
        Slot::Tombstone => false,
    }
}

/// Allocates a table of `capacity` open cells
fn open_slots<K, V>(capacity: usize) -> DynamicArray<Slot<K, V>> {
    let mut slots = DynamicArray::with_capacity(capacity);
    for _ in 0..capacity {
        slots.push(Slot::Open);
    }
    slots
}

/// A hash table using open addressing with quadratic probing.
///
/// Every entry lives directly in a prime-sized array of cells. Collisions are
/// resolved by visiting `home + j²` for `j = 0, 1, 2, …`; removal leaves a
/// tombstone so that other keys' probe paths stay intact. Before a new key is
/// placed the table grows to the first prime at or above 1.5 times its size
/// whenever the insertion would bring `len / capacity` up to the load factor.
///
/// The table keeps a generation counter bumped by every structural change
/// (new key, removal, rebuild, clear). Cursors obtained from the views compare
/// it to fail fast when the table changed under them. Replacing the value of
/// an existing key is not structural.
///
/// Note: This implementation is not thread-safe.
#[derive(Clone)]
pub struct QuadMap<K, V, S = DefaultState> {
    /// Cells of the table; every index below the capacity holds a slot
    slots: DynamicArray<Slot<K, V>>,
    /// Capacity restored by `clear`
    initial_capacity: usize,
    /// Number of closed cells
    count: usize,
    /// Number of tombstoned cells
    tombstones: usize,
    /// Maximum ratio of live entries to cells
    load_factor: f64,
    /// Bumped on every structural change
    generation: u64,
    /// Produces the digest of each key
    hash_builder: S,
}

impl<K, V> QuadMap<K, V> {
    /// Creates an empty table with 11 cells and a load factor of 0.5
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TableConfig::default())
    }

    /// Creates an empty table with at least `capacity` cells (rounded up to a prime)
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_config(TableConfig::default().with_initial_capacity(capacity))
    }

    /// Creates an empty table from a configuration
    #[must_use]
    pub fn with_config(config: TableConfig) -> Self {
        Self::with_config_and_hasher(config, DefaultState::default())
    }
}

impl<K, V, S: Default> Default for QuadMap<K, V, S> {
    fn default() -> Self {
        Self::with_config_and_hasher(TableConfig::default(), S::default())
    }
}

impl<K, V, S> QuadMap<K, V, S> {
    /// Creates an empty table with default sizing that digests keys with `hash_builder`
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_config_and_hasher(TableConfig::default(), hash_builder)
    }

    /// Creates an empty table from a configuration and a hasher builder
    pub fn with_config_and_hasher(config: TableConfig, hash_builder: S) -> Self {
        let config = config.normalized();
        Self {
            slots: open_slots(config.initial_capacity),
            initial_capacity: config.initial_capacity,
            count: 0,
            tombstones: 0,
            load_factor: config.load_factor,
            generation: 0,
            hash_builder,
        }
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the table holds no entry
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns the number of cells, always a prime
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the configured load factor
    #[must_use]
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Returns the current ratio of entries to cells
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_level(&self) -> f64 {
        self.count as f64 / self.capacity() as f64
    }

    /// Returns the structural modification counter
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the number of tombstoned cells awaiting the next rebuild
    #[must_use]
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Returns the lifecycle state of the cell at `index`
    #[must_use]
    pub fn slot_state(&self, index: usize) -> Option<SlotState> {
        self.slot(index).map(Slot::state)
    }

    /// Returns the hasher builder
    #[must_use]
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Returns an iterator over the entries, in cell order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { slots: &self.slots, index: 0, remaining: self.count }
    }

    /// Returns an iterator over the keys, in cell order
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values, in cell order
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator yielding mutable references to the values
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&K, &mut V)> {
        self.slots.iter_mut().filter_map(Slot::pair_mut)
    }

    /// Returns true if some entry holds a value equal to `value` (linear scan)
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|stored| stored == value)
    }

    /// Drops every entry and goes back to the initial capacity, all cells open
    pub fn clear(&mut self) {
        self.slots = open_slots(self.initial_capacity);
        self.count = 0;
        self.tombstones = 0;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Borrows the cell at `index`
    fn slot(&self, index: usize) -> Option<&Slot<K, V>> {
        self.slots.get(index).ok()
    }

    /// Index of the first closed cell at or after `start`
    pub(crate) fn next_closed_from(&self, start: usize) -> Option<usize> {
        (start..self.capacity()).find(|&index| self.slot(index).is_some_and(Slot::is_closed))
    }

    /// Borrows the entry stored at `index`
    pub(crate) fn pair_at(&self, index: usize) -> Option<(&K, &V)> {
        self.slot(index).and_then(Slot::pair)
    }

    /// Mutably borrows the value stored at `index`
    pub(crate) fn value_at_mut(&mut self, index: usize) -> Option<&mut V> {
        self.slots.get_mut(index).ok().and_then(Slot::pair_mut).map(|(_, value)| value)
    }

    /// Tombstones the entry at `index` and returns it; a structural change
    pub(crate) fn bury_at(&mut self, index: usize) -> Option<(K, V)> {
        let pair = self.slots.get_mut(index).ok().and_then(Slot::bury)?;
        self.count = self.count.saturating_sub(1);
        self.tombstones = self.tombstones.saturating_add(1);
        self.generation = self.generation.wrapping_add(1);
        Some(pair)
    }

    /// Replaces the value at `index`; not a structural change
    fn replace_value(&mut self, index: usize, value: V) -> Option<V> {
        self.value_at_mut(index).map(|stored| mem::replace(stored, value))
    }

    /// Stores a new entry in the open cell at `index`
    fn fill(&mut self, index: usize, key: K, value: V) {
        if let Ok(slot) = self.slots.get_mut(index) {
            *slot = Slot::Closed { key, value };
        }
    }

    /// Returns true once `occupied` cells would reach the load factor
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    fn at_load(&self, occupied: usize) -> bool {
        occupied as f64 / self.capacity() as f64 >= self.load_factor
    }

    /// Moves every live entry out, leaving an empty placeholder array behind
    fn take_pairs(&mut self) -> Vec<(K, V)> {
        mem::take(&mut self.slots).into_iter().filter_map(Slot::into_pair).collect()
    }
}

impl<K, V, S> QuadMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Walks the probe path of `key` until `stop` accepts a cell.
    ///
    /// Lookup, insertion-site search and probe statistics all go through
    /// here so that they agree on the path.
    fn walk<Q>(&self, key: &Q, mut stop: impl FnMut(&Slot<K, V>) -> bool) -> Option<usize>
    where
        Q: Hash + ?Sized,
    {
        let capacity = self.capacity();
        let home = home_slot(self.hash_builder.hash_one(key), capacity);
        QuadraticProbe::new(home, capacity).find(|&index| self.slot(index).is_some_and(&mut stop))
    }

    /// Locates `key`, passing through tombstones and stopping at the first open cell
    fn lookup<Q>(&self, key: &Q) -> Lookup
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.walk(key, |slot| ends_lookup(slot, key)) {
            Some(index) if self.slot(index).is_some_and(Slot::is_closed) => Lookup::Found(index),
            Some(index) => Lookup::Vacant(index),
            None => Lookup::Exhausted,
        }
    }

    /// First open cell on the probe path of `key`
    fn first_open<Q>(&self, key: &Q) -> Option<usize>
    where
        Q: Hash + ?Sized,
    {
        self.walk(key, |slot| matches!(slot, Slot::Open))
    }

    /// Retrieves the value for a key
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Retrieves the stored key and value for a key
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.lookup(key) {
            Lookup::Found(index) => self.pair_at(index),
            Lookup::Vacant(_) | Lookup::Exhausted => None,
        }
    }

    /// Retrieves a mutable reference to the value for a key.
    ///
    /// Mutating a value in place is not a structural change.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.lookup(key) {
            Lookup::Found(index) => self.value_at_mut(index),
            Lookup::Vacant(_) | Lookup::Exhausted => None,
        }
    }

    /// Returns true if the table contains the key
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        matches!(self.lookup(key), Lookup::Found(_))
    }

    /// Inserts a key-value pair, returning the value it replaced.
    ///
    /// Replacing the value of an existing key leaves the length and the
    /// generation untouched. A new key may first grow the table, then takes
    /// the first open cell on its probe path.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Lookup::Found(index) = self.lookup(&key) {
            return self.replace_value(index, value);
        }

        self.reserve_one();
        loop {
            if let Some(index) = self.first_open(&key) {
                self.fill(index, key, value);
                self.count = self.count.saturating_add(1);
                self.generation = self.generation.wrapping_add(1);
                return None;
            }
            // only reached if every candidate on the path is occupied
            self.rebuild(grown_capacity(self.capacity()));
        }
    }

    /// Inserts every pair of `source`, in its iteration order
    pub fn put_all<I>(&mut self, source: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in source {
            self.put(key, value);
        }
    }

    /// Removes a key, returning its value. The cell becomes a tombstone.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key, returning the stored key and value
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.lookup(key) {
            Lookup::Found(index) => self.bury_at(index),
            Lookup::Vacant(_) | Lookup::Exhausted => None,
        }
    }

    /// Number of cells visited before a lookup for `key` resolves
    pub fn probe_len<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut visited: usize = 0;
        self.walk(key, |slot| {
            visited = visited.saturating_add(1);
            ends_lookup(slot, key)
        });
        visited
    }

    /// Grows the table one step, dropping every tombstone
    pub fn rehash(&mut self) {
        self.rebuild(grown_capacity(self.capacity()));
    }

    /// Makes room for one more key.
    ///
    /// Grows while the new key would bring the load up to the load factor.
    /// Tombstones sit on probe paths just like live entries, so if they push
    /// the occupancy over the same bound the table is rebuilt in place.
    fn reserve_one(&mut self) {
        while self.at_load(self.count.saturating_add(1)) {
            self.rebuild(grown_capacity(self.capacity()));
        }
        if self.at_load(self.count.saturating_add(self.tombstones).saturating_add(1)) {
            debug!(
                "purging {} tombstones at capacity {}",
                self.tombstones,
                self.capacity()
            );
            self.rebuild(self.capacity());
        }
    }

    /// Rebuilds the table with `capacity` open cells and reinserts every entry.
    ///
    /// Tombstones are dropped and the generation is bumped once.
    fn rebuild(&mut self, capacity: usize) {
        debug!(
            "rebuilding table: {} -> {} cells, {} entries, {} tombstones dropped",
            self.capacity(),
            capacity,
            self.count,
            self.tombstones
        );
        let mut pending = self.take_pairs();
        let mut capacity = capacity;
        loop {
            self.slots = open_slots(capacity);
            self.tombstones = 0;

            let mut stranded = Vec::new();
            for (key, value) in pending {
                match self.first_open(&key) {
                    Some(index) => {
                        trace!("rebuild placed entry at {index}");
                        self.fill(index, key, value);
                    }
                    None => stranded.push((key, value)),
                }
            }
            if stranded.is_empty() {
                break;
            }
            pending = self.take_pairs();
            pending.append(&mut stranded);
            capacity = grown_capacity(capacity);
        }
        self.generation = self.generation.wrapping_add(1);
    }
}

impl<K, V, S> Extend<(K, V)> for QuadMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.put_all(iter);
    }
}

impl<K, V, S> FromIterator<(K, V)> for QuadMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::default();
        map.put_all(iter);
        map
    }
}

impl<K, V, S> PartialEq for QuadMap<K, V, S>
where
    K: Eq + Hash,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K, V, S> Eq for QuadMap<K, V, S>
where
    K: Eq + Hash,
    V: Eq,
    S: BuildHasher,
{
}

/// Sums a fixed-key digest of every entry, so equal tables hash alike
/// whatever their layout or hasher builder.
impl<K, V, S> Hash for QuadMap<K, V, S>
where
    K: Eq + Hash,
    V: Hash,
    S: BuildHasher,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        let sum = self.iter().fold(0_u64, |sum, entry| {
            let mut hasher = DefaultHasher::new();
            entry.hash(&mut hasher);
            sum.wrapping_add(hasher.finish())
        });
        state.write_usize(self.count);
        state.write_u64(sum);
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for QuadMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: fmt::Display, V: fmt::Display, S> fmt::Display for QuadMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (position, (key, value)) in self.iter().enumerate() {
            if position > 0 {
                f.write_str(" ")?;
            }
            write!(f, "({key}, {value})")?;
        }
        f.write_str("]")
    }
}

impl<'a, K, V, S> IntoIterator for &'a QuadMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the key-value pairs of the table
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// Cells of the table being walked
    slots: &'a DynamicArray<Slot<K, V>>,
    /// Next cell to inspect
    index: usize,
    /// Entries not yet yielded
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.slots.len() {
            let slot = self.slots.get(self.index).ok();
            self.index = self.index.saturating_add(1);
            if let Some(pair) = slot.and_then(Slot::pair) {
                self.remaining = self.remaining.saturating_sub(1);
                return Some(pair);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over the keys of the table
#[derive(Debug, Clone)]
pub struct Keys<'a, K, V> {
    /// Underlying entry iterator
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// Iterator over the values of the table
#[derive(Debug, Clone)]
pub struct Values<'a, K, V> {
    /// Underlying entry iterator
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Collider, IdentityState, collider};

    fn colliding_map() -> QuadMap<Collider, u32, IdentityState> {
        QuadMap::with_hasher(IdentityState::default())
    }

    #[test]
    fn test_put_and_get() {
        let mut map = QuadMap::new();
        assert_eq!(map.put("key1".to_string(), 1), None);
        assert_eq!(map.put("key2".to_string(), 2), None);
        assert_eq!(map.put("key3".to_string(), 3), None);

        assert_eq!(map.get("key1"), Some(&1));
        assert_eq!(map.get("key2"), Some(&2));
        assert_eq!(map.get("key3"), Some(&3));
        assert_eq!(map.get("key4"), None);
    }

    #[test]
    fn test_overwrite_keeps_len_and_generation() {
        let mut map = QuadMap::new();
        assert_eq!(map.put("key1".to_string(), 1), None);
        let generation = map.generation();

        assert_eq!(map.put("key1".to_string(), 10), Some(1));
        assert_eq!(map.get("key1"), Some(&10));
        assert_eq!(map.len(), 1);
        assert_eq!(map.generation(), generation);
    }

    #[test]
    fn test_remove_leaves_tombstone() {
        let mut map = QuadMap::new();
        map.put("key1".to_string(), 1);
        map.put("key2".to_string(), 2);
        let generation = map.generation();

        assert_eq!(map.remove("key1"), Some(1));
        assert_eq!(map.get("key1"), None);
        assert!(!map.contains_key("key1"));
        assert_eq!(map.get("key2"), Some(&2));
        assert_eq!(map.len(), 1);
        assert_eq!(map.tombstones(), 1);
        assert_eq!(map.generation(), generation + 1);

        assert_eq!(map.remove("key1"), None);
        assert_eq!(map.generation(), generation + 1);
    }

    #[test]
    fn test_colliding_keys_follow_quadratic_offsets() {
        let mut map = colliding_map();
        for id in 0..5 {
            map.put(collider(id, 3), id);
        }

        assert_eq!(map.len(), 5);
        assert_eq!(map.capacity(), 11);
        let closed: Vec<usize> =
            (0..11).filter(|&i| map.slot_state(i) == Some(SlotState::Closed)).collect();
        assert_eq!(closed, vec![1, 3, 4, 7, 8]);
        for id in 0..5 {
            assert_eq!(map.get(&collider(id, 3)), Some(&id));
        }
    }

    #[test]
    fn test_sixth_key_grows_to_seventeen() {
        let mut map = colliding_map();
        for id in 0..5 {
            map.put(collider(id, 3), id);
        }
        let generation = map.generation();

        map.put(collider(5, 3), 5);
        assert_eq!(map.capacity(), 17);
        assert_eq!(map.len(), 6);
        // one bump for the rebuild, one for the new key
        assert_eq!(map.generation(), generation + 2);
        for id in 0..6 {
            assert_eq!(map.get(&collider(id, 3)), Some(&id));
        }
    }

    #[test]
    fn test_growth_from_odd_capacity_rounds_up() {
        let mut map = QuadMap::with_capacity(29);
        for i in 0..14 {
            map.put(i, i);
        }
        assert_eq!(map.capacity(), 29);

        map.put(14, 14);
        assert_eq!(map.capacity(), 47);
        assert!((0..15).all(|i| map.get(&i) == Some(&i)));
    }

    #[test]
    fn test_probe_passes_through_tombstone() {
        let mut map = colliding_map();
        let a = collider(1, 3);
        let b = collider(2, 3);
        let c = collider(3, 3);
        map.put(a.clone(), 1);
        map.put(b.clone(), 2);

        assert_eq!(map.remove(&a), Some(1));
        assert_eq!(map.slot_state(3), Some(SlotState::Tombstone));

        map.put(c.clone(), 3);
        assert_eq!(map.get(&b), Some(&2));
        assert_eq!(map.get(&c), Some(&3));
        // tombstones are never reused in place
        assert_eq!(map.slot_state(3), Some(SlotState::Tombstone));
        assert_eq!(map.slot_state(7), Some(SlotState::Closed));
    }

    #[test]
    fn test_load_factor_invariant_holds_after_every_put() {
        let mut map = QuadMap::new();
        for i in 0..500 {
            map.put(i, i * 2);
            assert!(map.load_level() < map.load_factor(), "after {i} puts");
        }
        for i in 0..500 {
            assert_eq!(map.get(&i), Some(&(i * 2)));
        }
    }

    #[test]
    fn test_tombstone_churn_terminates() {
        let mut map = QuadMap::with_capacity(11);
        for i in 0..10_000 {
            map.put(i, i);
            assert_eq!(map.remove(&i), Some(i));
        }
        assert!(map.is_empty());
        assert_eq!(map.capacity(), 11);
        assert!(map.tombstones() < map.capacity());
    }

    #[test]
    fn test_clear_restores_initial_capacity() {
        let mut map = QuadMap::with_capacity(5);
        for i in 0..100 {
            map.put(i, i);
        }
        assert!(map.capacity() > 5);
        let generation = map.generation();

        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.capacity(), 5);
        assert_eq!(map.generation(), generation + 1);
        assert!((0..5).all(|i| map.slot_state(i) == Some(SlotState::Open)));
        assert_eq!(map.get(&1), None);
    }

    #[test]
    fn test_rehash_keeps_entries_and_drops_tombstones() {
        let mut map = QuadMap::new();
        for i in 0..4 {
            map.put(i, i);
        }
        map.remove(&0);
        assert_eq!(map.tombstones(), 1);

        map.rehash();
        assert_eq!(map.capacity(), 17);
        assert_eq!(map.tombstones(), 0);
        assert_eq!(map.len(), 3);
        assert!((1..4).all(|i| map.get(&i) == Some(&i)));
    }

    #[test]
    fn test_contains_value_and_put_all() {
        let mut map = QuadMap::new();
        map.put_all(vec![("a", 1), ("b", 2), ("a", 3)]);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&3));
        assert!(map.contains_value(&2));
        assert!(!map.contains_value(&1));
    }

    #[test]
    fn test_get_mut_is_not_structural() {
        let mut map = QuadMap::new();
        map.put("key1".to_string(), 1);
        let generation = map.generation();

        if let Some(value) = map.get_mut("key1") {
            *value += 10;
        }
        assert_eq!(map.get("key1"), Some(&11));
        assert_eq!(map.generation(), generation);
    }

    #[test]
    fn test_iterators() {
        let map: QuadMap<&str, i32> = [("x", 1), ("y", 2), ("z", 3)].into_iter().collect();

        assert_eq!(map.iter().len(), 3);
        let mut keys: Vec<&str> = map.keys().copied().collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["x", "y", "z"]);
        assert_eq!(map.values().sum::<i32>(), 6);
        assert_eq!((&map).into_iter().count(), 3);
    }

    #[test]
    fn test_iter_mut() {
        let mut map: QuadMap<u8, u32> = (0..10).map(|i| (i, u32::from(i))).collect();
        for (_, value) in map.iter_mut() {
            *value *= 2;
        }
        assert_eq!(map.get(&9), Some(&18));
    }

    #[test]
    fn test_equality_ignores_layout() {
        let mut left = QuadMap::with_capacity(3);
        let mut right = QuadMap::with_capacity(101);
        for i in 0..20 {
            left.put(i, i.to_string());
            right.put(19 - i, (19 - i).to_string());
        }
        assert_eq!(left, right);

        right.put(0, "zero".to_string());
        assert_ne!(left, right);
        right.remove(&0);
        assert_ne!(left, right);
    }

    fn digest_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_hash_agrees_with_equality() {
        let mut left = QuadMap::with_capacity(3);
        let mut right = QuadMap::with_capacity(101);
        for i in 0..20 {
            left.put(i, i * 3);
            right.put(19 - i, (19 - i) * 3);
        }
        right.put(100, 0);
        right.remove(&100);
        assert_eq!(left, right);
        assert_eq!(digest_of(&left), digest_of(&right));

        right.put(0, 1);
        assert_ne!(digest_of(&left), digest_of(&right));
        assert_ne!(digest_of(&QuadMap::<u8, u8>::new()), digest_of(&left));
    }

    #[test]
    fn test_tables_as_set_members() {
        let first: QuadMap<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
        let second: QuadMap<&str, i32> = [("b", 2), ("a", 1)].into_iter().collect();
        let set: std::collections::HashSet<QuadMap<&str, i32>> =
            [first, second].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = QuadMap::new();
        original.put("a", 1);
        let mut copy = original.clone();
        copy.put("b", 2);

        assert_eq!(original.len(), 1);
        assert_eq!(copy.len(), 2);
    }

    #[test]
    fn test_display_and_debug() {
        let mut map = colliding_map();
        map.put(collider(0, 1), 10);
        map.put(collider(1, 2), 20);

        assert_eq!(map.to_string(), "[(#0, 10) (#1, 20)]");
        assert_eq!(format!("{map:?}"), "{#0: 10, #1: 20}");
        assert_eq!(QuadMap::<u8, u8>::new().to_string(), "[]");
    }

    #[test]
    fn test_probe_len() {
        let mut map = colliding_map();
        for id in 0..4 {
            map.put(collider(id, 3), id);
        }
        assert_eq!(map.probe_len(&collider(0, 3)), 1);
        assert_eq!(map.probe_len(&collider(3, 3)), 4);
        // miss walks the four occupied cells and stops at the open one
        assert_eq!(map.probe_len(&collider(9, 3)), 5);
    }

    #[test]
    fn test_tiny_load_factor_keeps_growth_bounded() {
        let config = TableConfig::default().with_load_factor(1e-12);
        let mut map = QuadMap::with_config(config);
        for i in 0..20 {
            map.put(i, i);
        }
        assert!((map.load_factor() - 0.01).abs() < f64::EPSILON);
        assert!(map.load_level() < 0.01);
        assert!(map.capacity() < 5_000, "capacity {}", map.capacity());
        assert!((0..20).all(|i| map.get(&i) == Some(&i)));
    }

    #[test]
    fn test_config_is_normalized() {
        let config = TableConfig::default().with_initial_capacity(12).with_load_factor(0.9);
        let map: QuadMap<u8, u8> = QuadMap::with_config(config);
        assert_eq!(map.capacity(), 13);
        assert!((map.load_factor() - 0.5).abs() < f64::EPSILON);
    }
}
