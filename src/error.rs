//! Errors surfaced when building a table.

use thiserror::Error;

/// Rejected table configuration.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// A table needs at least one bucket to index into.
    #[error("initial capacity must be positive")]
    ZeroCapacity,

    /// Load factor outside of `(0, 1]`, including NaN.
    #[error("load factor {load_factor} is outside of (0, 1]")]
    LoadFactorOutOfRange {
        /// The rejected value
        load_factor: f32,
    },
}
