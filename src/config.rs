//! Sizing knobs for `ChainedHashMap`.
//!
//! Only the initial bucket count and the load factor are tunable. Growth
//! always doubles the bucket array.

use crate::error::ConfigError;

/// Bucket count used by `ChainedHashMap::new`.
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// Fraction of the bucket count that may be occupied before growing.
pub const DEFAULT_LOAD_FACTOR: f32 = 0.75;

/// Initial capacity and load factor for a table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    pub initial_capacity: usize,
    /// Must lie in `(0, 1]`. Tiny values are legal but make every early
    /// insertion double the table; values so small that no reachable
    /// capacity admits an element are rejected by `validate`.
    pub load_factor: f32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl TableConfig {
    pub fn new(initial_capacity: usize, load_factor: f32) -> Self {
        Self {
            initial_capacity,
            load_factor,
        }
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_load_factor(mut self, load_factor: f32) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Reject zero buckets and load factors outside of `(0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        // Written as a positive range test so NaN falls through to the error.
        if !(self.load_factor > 0.0 && self.load_factor <= 1.0) {
            return Err(ConfigError::LoadFactorOutOfRange {
                load_factor: self.load_factor,
            });
        }
        // A zero threshold at the largest doubling target would grow forever.
        if self.threshold_for(usize::MAX >> 1) == 0 {
            return Err(ConfigError::LoadFactorOutOfRange {
                load_factor: self.load_factor,
            });
        }
        Ok(())
    }

    /// Element count above which a table with `capacity` buckets grows.
    pub fn threshold_for(&self, capacity: usize) -> usize {
        threshold(self.load_factor, capacity)
    }
}

/// `floor(load_factor * capacity)`.
///
/// The product stays in single precision: rounding it lands decimal load
/// factors such as 0.7 on whole products (`0.7 * 10 == 7.0`), where widening
/// to `f64` first would keep the representation error and floor to 6.
/// From about 2^23 buckets on, the product carries single-precision error.
pub(crate) fn threshold(load_factor: f32, capacity: usize) -> usize {
    (load_factor * capacity as f32) as usize
}
