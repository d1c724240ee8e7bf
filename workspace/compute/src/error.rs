use thiserror::Error;
use tracing::error;

/// Error types for the compute crate
#[derive(Error, Debug)]
pub enum ComputeError {
    /// Bad or missing source data; blocks the whole request
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Too few observations for an estimator or a band; callers omit
    /// the affected artifact and keep the rest
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Unsupported region, column, or dataset selection
    #[error("Configuration error: {0}")]
    Configuration(String),
}

// Failures while reading source files are malformed input: the data the
// request depends on is not usable.
impl From<csv::Error> for ComputeError {
    fn from(error: csv::Error) -> Self {
        let err = ComputeError::MalformedInput(format!("CSV error: {}", error));
        error!(?err, "CSV read failure");
        err
    }
}

impl From<std::io::Error> for ComputeError {
    fn from(error: std::io::Error) -> Self {
        let err = ComputeError::MalformedInput(format!("IO error: {}", error));
        error!(?err, "IO failure");
        err
    }
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
