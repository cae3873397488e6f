//! Growable, indexable storage used as the backing array of `QuadMap`

use std::{fmt, iter, mem};

use crate::error::TableError;

/// Capacity used when none (or zero) is requested
const DEFAULT_CAPACITY: usize = 10;

/// A growable array that manages its own backing slice.
///
/// The logical length (`len`) and the backing length (`capacity`) are tracked
/// separately: cells past `len` are allocated but hold nothing. Growth on
/// `push` goes to `(len + 1) * 2`, removal shrinks the backing slice to half
/// once fewer than half of its cells are in use, and `clear` returns to the
/// capacity the array was created with.
#[derive(Debug, Clone)]
pub struct DynamicArray<T> {
    /// Backing storage; only the first `len` cells are populated
    items: Box<[Option<T>]>,
    /// Number of elements actually stored
    len: usize,
    /// Capacity the array was created with, restored by `clear`
    initial_capacity: usize,
}

/// Allocates `capacity` empty cells
fn empty_backing<T>(capacity: usize) -> Box<[Option<T>]> {
    iter::repeat_with(|| None).take(capacity).collect()
}

/// Builds the error reported for an index outside `[0, len)`
const fn out_of_range(index: usize, len: usize) -> TableError {
    TableError::IndexOutOfRange { index, len }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DynamicArray<T> {
    /// Creates an empty array with the default backing capacity of 10
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty array with the given backing capacity (0 falls back to 10)
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = if capacity == 0 { DEFAULT_CAPACITY } else { capacity };
        Self { items: empty_backing(capacity), len: 0, initial_capacity: capacity }
    }

    /// Number of stored elements
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if no element is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Length of the backing slice
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    /// Appends an item, growing the backing slice to `(len + 1) * 2` when full
    pub fn push(&mut self, item: T) {
        if self.len >= self.items.len() {
            self.ensure_capacity(self.len.saturating_add(1).saturating_mul(2));
        }
        if let Some(cell) = self.items.get_mut(self.len) {
            *cell = Some(item);
            self.len = self.len.saturating_add(1);
        }
    }

    /// Returns the element at `index`
    ///
    /// # Errors
    ///
    /// [`TableError::IndexOutOfRange`] unless `index < len`.
    pub fn get(&self, index: usize) -> Result<&T, TableError> {
        if index >= self.len {
            return Err(out_of_range(index, self.len));
        }
        self.items.get(index).and_then(Option::as_ref).ok_or(out_of_range(index, self.len))
    }

    /// Returns a mutable reference to the element at `index`
    ///
    /// # Errors
    ///
    /// [`TableError::IndexOutOfRange`] unless `index < len`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, TableError> {
        let len = self.len;
        if index >= len {
            return Err(out_of_range(index, len));
        }
        self.items.get_mut(index).and_then(Option::as_mut).ok_or(out_of_range(index, len))
    }

    /// Replaces the element at `index`, returning the previous one
    ///
    /// # Errors
    ///
    /// [`TableError::IndexOutOfRange`] unless `index < len`.
    pub fn set(&mut self, index: usize, item: T) -> Result<T, TableError> {
        let cell = self.get_mut(index)?;
        Ok(mem::replace(cell, item))
    }

    /// Inserts an item at `index`, shifting the tail one cell to the right
    ///
    /// # Errors
    ///
    /// [`TableError::IndexOutOfRange`] if `index > len`.
    pub fn insert(&mut self, index: usize, item: T) -> Result<(), TableError> {
        let end = self.len;
        if index > end {
            return Err(out_of_range(index, end));
        }
        if end == self.items.len() {
            self.ensure_capacity(self.items.len().saturating_mul(2).max(1));
        }
        if let Some(cell) = self.items.get_mut(end) {
            *cell = Some(item);
        }
        if let Some(tail) = self.items.get_mut(index..=end) {
            tail.rotate_right(1);
        }
        self.len = end.saturating_add(1);
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting the tail left.
    ///
    /// The backing slice shrinks to half its length once fewer than half of
    /// its cells remain in use.
    ///
    /// # Errors
    ///
    /// [`TableError::IndexOutOfRange`] unless `index < len`.
    pub fn remove(&mut self, index: usize) -> Result<T, TableError> {
        let len = self.len;
        if index >= len {
            return Err(out_of_range(index, len));
        }
        let removed =
            self.items.get_mut(index).and_then(Option::take).ok_or(out_of_range(index, len))?;
        if let Some(tail) = self.items.get_mut(index..len) {
            tail.rotate_left(1);
        }
        self.len = len.saturating_sub(1);

        let half = self.items.len() / 2;
        if self.len < half {
            self.ensure_capacity(half);
        }
        Ok(removed)
    }

    /// Reallocates the backing slice to exactly `min_capacity` cells.
    ///
    /// Does nothing when `min_capacity` already equals the capacity or is
    /// smaller than the number of stored elements.
    pub fn ensure_capacity(&mut self, min_capacity: usize) {
        if min_capacity == self.items.len() || min_capacity < self.len {
            return;
        }
        let mut backing = empty_backing(min_capacity);
        for (dst, src) in backing.iter_mut().zip(self.items.iter_mut().take(self.len)) {
            *dst = src.take();
        }
        self.items = backing;
    }

    /// Shrinks the backing slice to the number of stored elements
    pub fn trim_to_size(&mut self) {
        self.ensure_capacity(self.len);
    }

    /// Drops every element and restores the initial backing capacity
    pub fn clear(&mut self) {
        self.items = empty_backing(self.initial_capacity);
        self.len = 0;
    }

    /// Returns true if an equal element is stored
    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|stored| stored == item)
    }

    /// Iterates over the stored elements in index order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter().take(self.len).filter_map(Option::as_ref)
    }

    /// Iterates mutably over the stored elements in index order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.items.iter_mut().take(self.len).filter_map(Option::as_mut)
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = iter::Flatten<iter::Take<std::vec::IntoIter<Option<T>>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_vec().into_iter().take(self.len).flatten()
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut array = Self::with_capacity(iter.size_hint().0);
        for item in iter {
            array.push(item);
        }
        array
    }
}

impl<T: fmt::Display> fmt::Display for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (position, item) in self.iter().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str("}")
    }
}
