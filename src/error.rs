//! Error types surfaced by the table, its storage and its collaborators

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the hash table, its backing array, views and cursors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// Indexed access outside `[0, len)` of a `DynamicArray`
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// The offending index
        index: usize,
        /// Logical length of the array at the time of access
        len: usize,
    },
    /// The table changed structurally since the cursor was created
    #[error("table was structurally modified during iteration")]
    ConcurrentModification,
    /// The cursor has no further occupied slot
    #[error("no next element")]
    NoSuchElement,
    /// `remove` or `set_value` called on a cursor not positioned by `next`
    #[error("cursor is not positioned on an element; call next() first")]
    IllegalState,
    /// Insertion attempted through a view
    #[error("{0} is not supported by this view")]
    UnsupportedOperation(&'static str),
}

/// Failures raised while loading a dataset file
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The file could not be opened or read
    #[error("failed to read dataset {}: {source}", path.display())]
    Io {
        /// Path of the dataset
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// Reading from an already opened source failed part way
    #[error("failed to read dataset line {line}: {source}")]
    Read {
        /// One-based line number that failed
        line: usize,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
