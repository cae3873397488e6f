//! # Quadmap
//!
//! A Rust implementation of an open-addressing hash table with quadratic probing.
//!
//! `QuadMap` stores its entries directly in a prime-sized array of cells. A key
//! is placed at the first open cell of the sequence `(h + j²) mod capacity`;
//! removed entries leave tombstones so that later lookups can walk past them.
//! The table keeps its load at or below a configurable factor (0.5 by default)
//! and grows to the first prime at or above 1.5 times its capacity, which
//! guarantees that an insertion always finds an open cell.
//!
//! The crate also provides:
//!
//! - `DynamicArray`: the growable, index-checked array backing the table
//! - Live key, value and entry views with fail-fast cursors
//! - `GenreStats` and `Dataset`: a small ratings aggregator built on the table
//!
//! ## Basic Usage
//!
//! ```rust
//! use quadmap::QuadMap;
//!
//! // Create a new hash map
//! let mut map = QuadMap::new();
//!
//! // Insert values
//! map.put("apple".to_string(), 1);
//! map.put("banana".to_string(), 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values
//! assert_eq!(map.put("apple".to_string(), 10), Some(1));
//! assert_eq!(map.get("apple"), Some(&10));
//!
//! // Remove values
//! assert_eq!(map.remove("apple"), Some(10));
//! assert_eq!(map.get("apple"), None);
//! ```
//!
//! ## Views and Cursors
//!
//! ```rust
//! use quadmap::{MapView, QuadMap, TableError};
//!
//! let mut map: QuadMap<String, i32> = QuadMap::new();
//! map.put("cherry".to_string(), 3);
//! map.put("date".to_string(), 4);
//!
//! // Removing through a view removes from the table
//! let mut keys = map.key_view();
//! assert!(keys.remove(&"date".to_string()));
//! assert_eq!(map.len(), 1);
//!
//! // Cursors fail fast once the table changes under them
//! let mut cursor = map.key_view().cursor();
//! map.put("elder".to_string(), 5);
//! assert_eq!(cursor.next(&map), Err(TableError::ConcurrentModification));
//! ```

/// Module implementing the construction parameters of the table
mod config;
/// Module implementing fail-fast cursors
mod cursor;
/// Module implementing the CSV series loader
mod dataset;
/// Module implementing the growable array backing the table
mod dynamic_array;
/// Module defining the error types
mod error;
/// Module installing the process logger
mod logger;
/// Module implementing the quadratic probe sequence and prime arithmetic
mod probe;
/// Module implementing the open-addressing hash table
mod quad_map;
/// Module implementing table cells
mod slot;
/// Module implementing per-genre statistics
mod stats;
/// Utility functions and traits for the hash map
mod utils;
/// Module implementing live views over the table
mod views;

/// Test-only keys with chosen digests
#[cfg(test)]
mod test_support;

pub use config::{DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR, MIN_LOAD_FACTOR, TableConfig};
pub use cursor::{EntryCursor, KeyCursor, ValueCursor};
pub use dataset::{Dataset, parse as parse_dataset};
pub use dynamic_array::DynamicArray;
pub use error::{DatasetError, TableError};
pub use logger::initialize_logger;
pub use quad_map::{DefaultState, Iter, Keys, QuadMap, Values};
pub use slot::SlotState;
pub use stats::{GenreStats, GenreSummary};
pub use utils::{MapExtensions, from_iter};
pub use views::{EntryView, KeyView, MapView, ValueView};
