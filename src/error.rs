//! Error types for the SPC chart monitor.

use thiserror::Error;

/// Result type alias for SPC operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for SPC operations
#[derive(Debug, Error)]
pub enum Error {
    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// API-level failure (success flag false, or malformed payload)
    #[error("API error: {0}")]
    Api(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Dashboard terminal error
    #[error("Dashboard error: {0}")]
    Dashboard(String),
}
