//! Domain error types

use thiserror::Error;

/// Errors that can occur anywhere in the QAM signal chain
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QamError {
    /// Empty sequence, non-positive rate/frequency, unrecognized unit
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Modulation was called on inputs of different length
    #[error("Length mismatch: first signal has {first} samples, second has {second}")]
    LengthMismatch { first: usize, second: usize },

    /// Normalized low-pass cutoff falls outside (0, 1)
    #[error("Unstable filter: normalized cutoff {cutoff} is outside (0, 1)")]
    UnstableFilter { cutoff: f64 },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for QAM operations
pub type QamResult<T> = Result<T, QamError>;
