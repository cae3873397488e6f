//! Table cells and their lifecycle

use std::mem;

/// Lifecycle marker of a table cell, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotState {
    /// Never used since the last clear or rebuild; terminates a probe walk
    Open,
    /// Holds a live key-value pair
    Closed,
    /// Formerly occupied; probe walks continue past it
    Tombstone,
}

/// One cell of the table.
///
/// The key and value exist exactly when the cell is `Closed`. Cells move
/// `Open -> Closed -> Tombstone` and only return to `Open` when the whole
/// table is cleared or rebuilt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) enum Slot<K, V> {
    /// Free cell
    #[default]
    Open,
    /// Occupied cell
    Closed {
        /// The stored key
        key: K,
        /// The value associated with the key
        value: V,
    },
    /// Removed cell kept to preserve probe chains
    Tombstone,
}

impl<K, V> Slot<K, V> {
    /// Payload-free marker of this cell
    pub(crate) const fn state(&self) -> SlotState {
        match self {
            Self::Open => SlotState::Open,
            Self::Closed { .. } => SlotState::Closed,
            Self::Tombstone => SlotState::Tombstone,
        }
    }

    /// Returns true for a live cell
    pub(crate) const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed { .. })
    }

    /// Borrows the pair of a live cell
    pub(crate) const fn pair(&self) -> Option<(&K, &V)> {
        match self {
            Self::Closed { key, value } => Some((key, value)),
            Self::Open | Self::Tombstone => None,
        }
    }

    /// Borrows the key and mutably borrows the value of a live cell
    pub(crate) fn pair_mut(&mut self) -> Option<(&K, &mut V)> {
        match self {
            Self::Closed { key, value } => Some((&*key, value)),
            Self::Open | Self::Tombstone => None,
        }
    }

    /// Turns a live cell into a tombstone, handing back its pair.
    ///
    /// Open cells and tombstones are left untouched.
    pub(crate) fn bury(&mut self) -> Option<(K, V)> {
        if !self.is_closed() {
            return None;
        }
        match mem::replace(self, Self::Tombstone) {
            Self::Closed { key, value } => Some((key, value)),
            Self::Open | Self::Tombstone => None,
        }
    }

    /// Consumes the cell, yielding its pair if it was live
    pub(crate) fn into_pair(self) -> Option<(K, V)> {
        match self {
            Self::Closed { key, value } => Some((key, value)),
            Self::Open | Self::Tombstone => None,
        }
    }
}
