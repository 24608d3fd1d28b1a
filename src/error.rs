//! Error types for the market_forecast crate

use thiserror::Error;

/// Custom error types for the market_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Series is shorter than a model's minimum length requirement
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Minimum number of observations the operation requires
        required: usize,
        /// Number of observations actually supplied
        actual: usize,
    },

    /// Paired arrays passed to an error metric have different lengths
    #[error("Dimension mismatch: expected {expected} elements, got {actual}")]
    DimensionMismatch {
        /// Length of the reference array
        expected: usize,
        /// Length of the offending array
        actual: usize,
    },

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Every candidate model in a comparison failed, including the baseline
    #[error("All forecast models failed, including the linear regression baseline")]
    AllModelsFailed,

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
