//! Fail-fast cursors over the keys, values and entries of a `QuadMap`.
//!
//! A cursor does not borrow the table. It remembers a position and the
//! table's generation at the time it was created, and every call takes the
//! table as an argument. Any structural change made to the table by other
//! means is detected on the next `next` or `remove`, which then fail with
//! [`TableError::ConcurrentModification`]. Removing through the cursor itself
//! keeps it valid.

use std::{marker::PhantomData, mem};

use crate::{
    error::TableError,
    quad_map::{DefaultState, QuadMap},
};

/// Position logic shared by the three cursor flavours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RawCursor {
    /// First cell the next call to `advance` may return
    next_index: usize,
    /// Cell returned by the last successful `advance`; armed for removal
    last: Option<usize>,
    /// Table generation this cursor is in sync with
    expected_generation: u64,
}

impl RawCursor {
    /// Starts before the first cell of `map`
    fn new<K, V, S>(map: &QuadMap<K, V, S>) -> Self {
        Self { next_index: 0, last: None, expected_generation: map.generation() }
    }

    /// Fails if `map` changed structurally behind this cursor
    fn check<K, V, S>(&self, map: &QuadMap<K, V, S>) -> Result<(), TableError> {
        if map.generation() == self.expected_generation {
            Ok(())
        } else {
            Err(TableError::ConcurrentModification)
        }
    }

    /// Returns true if a closed cell remains ahead; does not move
    fn has_next<K, V, S>(&self, map: &QuadMap<K, V, S>) -> bool {
        map.next_closed_from(self.next_index).is_some()
    }

    /// Moves to the next closed cell and arms removal
    fn advance<K, V, S>(&mut self, map: &QuadMap<K, V, S>) -> Result<usize, TableError> {
        self.check(map)?;
        self.last = None;
        let index = map.next_closed_from(self.next_index).ok_or(TableError::NoSuchElement)?;
        self.last = Some(index);
        self.next_index = index.saturating_add(1);
        Ok(index)
    }

    /// Index of the cell returned by the last `advance`
    fn current<K, V, S>(&self, map: &QuadMap<K, V, S>) -> Result<usize, TableError> {
        self.check(map)?;
        self.last.ok_or(TableError::IllegalState)
    }

    /// Tombstones the last returned cell and resynchronizes with the table
    fn remove<K, V, S>(&mut self, map: &mut QuadMap<K, V, S>) -> Result<(K, V), TableError> {
        let index = self.current(map)?;
        self.last = None;
        let pair = map.bury_at(index).ok_or(TableError::IllegalState)?;
        self.expected_generation = map.generation();
        Ok(pair)
    }
}

/// Fail-fast cursor over the keys of a table, obtained from a [`KeyView`](crate::KeyView)
#[derive(Debug)]
pub struct KeyCursor<K, V, S = DefaultState> {
    /// Shared position logic
    raw: RawCursor,
    /// Ties the cursor to the table type it walks
    _marker: PhantomData<fn() -> (K, V, S)>,
}

impl<K, V, S> KeyCursor<K, V, S> {
    /// Creates a cursor in sync with `map`
    pub(crate) fn new(map: &QuadMap<K, V, S>) -> Self {
        Self { raw: RawCursor::new(map), _marker: PhantomData }
    }

    /// Returns true if another key remains
    #[must_use]
    pub fn has_next(&self, map: &QuadMap<K, V, S>) -> bool {
        self.raw.has_next(map)
    }

    /// Advances to the next key
    ///
    /// # Errors
    ///
    /// [`TableError::ConcurrentModification`] if the table changed structurally
    /// since the cursor was created, [`TableError::NoSuchElement`] when exhausted.
    pub fn next<'m>(&mut self, map: &'m QuadMap<K, V, S>) -> Result<&'m K, TableError> {
        let index = self.raw.advance(map)?;
        map.pair_at(index).map(|(key, _)| key).ok_or(TableError::NoSuchElement)
    }

    /// Removes the entry whose key was returned by the last `next`
    ///
    /// # Errors
    ///
    /// [`TableError::ConcurrentModification`] if the table changed behind the
    /// cursor, [`TableError::IllegalState`] unless the previous call was a
    /// successful `next`.
    pub fn remove(&mut self, map: &mut QuadMap<K, V, S>) -> Result<K, TableError> {
        self.raw.remove(map).map(|(key, _)| key)
    }
}

/// Fail-fast cursor over the values of a table, obtained from a [`ValueView`](crate::ValueView)
#[derive(Debug)]
pub struct ValueCursor<K, V, S = DefaultState> {
    /// Shared position logic
    raw: RawCursor,
    /// Ties the cursor to the table type it walks
    _marker: PhantomData<fn() -> (K, V, S)>,
}

impl<K, V, S> ValueCursor<K, V, S> {
    /// Creates a cursor in sync with `map`
    pub(crate) fn new(map: &QuadMap<K, V, S>) -> Self {
        Self { raw: RawCursor::new(map), _marker: PhantomData }
    }

    /// Returns true if another value remains
    #[must_use]
    pub fn has_next(&self, map: &QuadMap<K, V, S>) -> bool {
        self.raw.has_next(map)
    }

    /// Advances to the next value
    ///
    /// # Errors
    ///
    /// [`TableError::ConcurrentModification`] if the table changed structurally
    /// since the cursor was created, [`TableError::NoSuchElement`] when exhausted.
    pub fn next<'m>(&mut self, map: &'m QuadMap<K, V, S>) -> Result<&'m V, TableError> {
        let index = self.raw.advance(map)?;
        map.pair_at(index).map(|(_, value)| value).ok_or(TableError::NoSuchElement)
    }

    /// Removes the entry whose value was returned by the last `next`
    ///
    /// # Errors
    ///
    /// [`TableError::ConcurrentModification`] if the table changed behind the
    /// cursor, [`TableError::IllegalState`] unless the previous call was a
    /// successful `next`.
    pub fn remove(&mut self, map: &mut QuadMap<K, V, S>) -> Result<V, TableError> {
        self.raw.remove(map).map(|(_, value)| value)
    }
}

/// Fail-fast cursor over the entries of a table, obtained from an [`EntryView`](crate::EntryView)
#[derive(Debug)]
pub struct EntryCursor<K, V, S = DefaultState> {
    /// Shared position logic
    raw: RawCursor,
    /// Ties the cursor to the table type it walks
    _marker: PhantomData<fn() -> (K, V, S)>,
}

impl<K, V, S> EntryCursor<K, V, S> {
    /// Creates a cursor in sync with `map`
    pub(crate) fn new(map: &QuadMap<K, V, S>) -> Self {
        Self { raw: RawCursor::new(map), _marker: PhantomData }
    }

    /// Returns true if another entry remains
    #[must_use]
    pub fn has_next(&self, map: &QuadMap<K, V, S>) -> bool {
        self.raw.has_next(map)
    }

    /// Advances to the next entry
    ///
    /// # Errors
    ///
    /// [`TableError::ConcurrentModification`] if the table changed structurally
    /// since the cursor was created, [`TableError::NoSuchElement`] when exhausted.
    pub fn next<'m>(&mut self, map: &'m QuadMap<K, V, S>) -> Result<(&'m K, &'m V), TableError> {
        let index = self.raw.advance(map)?;
        map.pair_at(index).ok_or(TableError::NoSuchElement)
    }

    /// Removes the entry returned by the last `next`
    ///
    /// # Errors
    ///
    /// [`TableError::ConcurrentModification`] if the table changed behind the
    /// cursor, [`TableError::IllegalState`] unless the previous call was a
    /// successful `next`.
    pub fn remove(&mut self, map: &mut QuadMap<K, V, S>) -> Result<(K, V), TableError> {
        self.raw.remove(map)
    }

    /// Replaces the value of the entry returned by the last `next`.
    ///
    /// Not a structural change: neither this cursor nor any other is invalidated.
    ///
    /// # Errors
    ///
    /// [`TableError::ConcurrentModification`] if the table changed behind the
    /// cursor, [`TableError::IllegalState`] if the cursor is not on an entry.
    pub fn set_value(&self, map: &mut QuadMap<K, V, S>, value: V) -> Result<V, TableError> {
        let index = self.raw.current(map)?;
        map.value_at_mut(index)
            .map(|stored| mem::replace(stored, value))
            .ok_or(TableError::IllegalState)
    }
}
