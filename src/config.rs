//! Construction parameters for `QuadMap`

use log::warn;

use crate::probe::{is_prime, next_prime};

/// Initial capacity used by `QuadMap::new`
pub const DEFAULT_INITIAL_CAPACITY: usize = 11;
/// Load factor used by `QuadMap::new`; also the upper bound accepted
pub const DEFAULT_LOAD_FACTOR: f64 = 0.5;
/// Smallest load factor kept; positive values below it are raised to it
pub const MIN_LOAD_FACTOR: f64 = 0.01;

/// Initial capacity and load factor of a table.
///
/// Values are normalized when the table is built: a zero capacity becomes
/// 11, a non-prime capacity is raised to the next prime, and a load factor
/// outside `(0, 0.5]` falls back to 0.5. A positive load factor below 0.01 is
/// raised to 0.01, which bounds the table at one hundred cells per entry.
///
/// ```rust
/// use quadmap::{QuadMap, TableConfig};
///
/// let config = TableConfig::default().with_initial_capacity(20).with_load_factor(0.4);
/// let map: QuadMap<String, u32> = QuadMap::with_config(config);
/// assert_eq!(map.capacity(), 23);
/// assert!((map.load_factor() - 0.4).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    /// Requested number of cells at creation and after `clear`
    pub initial_capacity: usize,
    /// Maximum ratio of live entries to cells
    pub load_factor: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { initial_capacity: DEFAULT_INITIAL_CAPACITY, load_factor: DEFAULT_LOAD_FACTOR }
    }
}

impl TableConfig {
    /// Sets the initial capacity
    #[must_use]
    pub const fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the load factor
    #[must_use]
    pub const fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Returns the configuration the table will actually use
    #[must_use]
    pub fn normalized(self) -> Self {
        let initial_capacity = match self.initial_capacity {
            0 => {
                warn!("initial capacity 0 replaced by {DEFAULT_INITIAL_CAPACITY}");
                DEFAULT_INITIAL_CAPACITY
            }
            n if is_prime(n) => n,
            n => {
                let prime = next_prime(n);
                warn!("initial capacity {n} raised to prime {prime}");
                prime
            }
        };

        let load_factor = match self.load_factor {
            lf if (MIN_LOAD_FACTOR..=DEFAULT_LOAD_FACTOR).contains(&lf) => lf,
            lf if lf > 0.0 && lf < MIN_LOAD_FACTOR => {
                warn!("load factor {lf} raised to {MIN_LOAD_FACTOR}");
                MIN_LOAD_FACTOR
            }
            lf => {
                warn!("load factor {lf} outside (0, 0.5]; using 0.5");
                DEFAULT_LOAD_FACTOR
            }
        };

        Self { initial_capacity, load_factor }
    }
}
