//! Top-level error type shared across crates.

use thiserror::Error;

/// Common error type for parsing and validating stakepoll primitives.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StakepollError {
    #[error("invalid voter address: {0:?}")]
    InvalidAddress(String),

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid length: expected {expected} hex chars, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid ballot: {0}")]
    InvalidBallot(String),
}
