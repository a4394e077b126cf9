//! Error types for watch-core

use thiserror::Error;

/// Result type alias for watch-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for tool operations
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error message
    #[error("{0}")]
    Generic(String),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Tool execution failed
    #[error("Tool execution failed: {0}")]
    ToolFailed(String),
}
