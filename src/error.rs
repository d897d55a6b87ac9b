//! Error types for the Floodgate library.

use thiserror::Error;

/// Main error type for Floodgate operations.
///
/// Only the configuration and preset loaders are fallible. A rate limit
/// check is total over its input domain and never returns an error.
#[derive(Error, Debug)]
pub enum FloodgateError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Floodgate operations.
pub type Result<T> = std::result::Result<T, FloodgateError>;
