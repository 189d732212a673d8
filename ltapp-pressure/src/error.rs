//! Pressure generator errors

use thiserror::Error;

/// Errors raised when starting a generator
#[derive(Debug, Error)]
pub enum PressureError {
    #[error("Invalid CPU thread count {requested}: must be between 1 and {max}")]
    InvalidThreadCount { requested: usize, max: usize },

    #[error("Failed to spawn pressure worker: {0}")]
    SpawnFailed(#[from] std::io::Error),
}

/// Result type for pressure operations
pub type PressureResult<T> = Result<T, PressureError>;
