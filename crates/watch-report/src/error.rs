//! Error types for report generation

use thiserror::Error;

/// Report generation errors
#[derive(Debug, Error)]
pub enum ReportError {
    /// Word document assembly or packing failed
    #[error("Document error: {0}")]
    Document(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for report operations
pub type Result<T> = std::result::Result<T, ReportError>;

/// Convert ReportError to watch_core::Error
impl From<ReportError> for watch_core::Error {
    fn from(err: ReportError) -> Self {
        watch_core::Error::ToolFailed(err.to_string())
    }
}
