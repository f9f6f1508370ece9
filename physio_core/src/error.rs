//! Error types for the physio_core library.
//!
//! The formulas never fail; these errors come from configuration,
//! range-table handling and output writers.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for physio_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Range table validation error
    #[error("Range validation error: {0}")]
    RangeValidation(String),

    /// Lookup of a parameter or organ system that does not exist
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),
}
