//! Typed error surfaces for configuration and chain-lifecycle failures.

use thiserror::Error;

/// Raised when construction inputs are invalid (§6, §7 `ConfigError` kind).
///
/// Surfaced directly to the caller at construction time; a `Chain` or
/// `DualDriver` is never built from a config that fails [`Config::validate`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// `N < 2`.
    #[error("lattice size must be >= 2, got {0}")]
    SizeTooSmall(usize),
    /// A weight was zero or negative.
    #[error("weight for {vertex} must be positive, got {value}")]
    NonPositiveWeight {
        /// Name of the offending vertex type.
        vertex: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// A weight was NaN or infinite.
    #[error("weight for {vertex} must be finite, got {value}")]
    NonFiniteWeight {
        /// Name of the offending vertex type.
        vertex: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// `steps_per_batch == 0`.
    #[error("steps_per_batch must be >= 1")]
    ZeroBatch,
}

/// Raised when a running `Chain` detects state it cannot recover from
/// (§7 `InvariantViolation` kind). Fatal to the chain that raised it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// An accepted flip left the lattice in a state violating the ice rule.
    /// Indicates a bug in the flip engine, not a user error.
    #[error("ice rule violated at ({row}, {col}) after a supposedly valid flip")]
    InvariantViolation {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        col: usize,
    },
}

/// Wraps a [`ChainError`] with the label of the chain that raised it, for
/// use by [`crate::driver::DualDriver`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("chain '{label}' failed: {source}")]
pub struct DriverError {
    /// Which of the two managed chains failed (`"a"` or `"b"`).
    pub label: &'static str,
    /// The underlying chain error.
    #[source]
    pub source: ChainError,
}
