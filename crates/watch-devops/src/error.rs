//! Error types for devops operations

use thiserror::Error;

/// DevOps tool errors
#[derive(Debug, Error)]
pub enum DevOpsError {
    /// The program to run was not found on PATH
    #[error("{0} is not installed or not on PATH")]
    ProgramNotFound(String),

    /// Spawning the subprocess failed for another reason
    #[error("failed to run {program}: {reason}")]
    Spawn { program: String, reason: String },

    /// The subprocess exited non-zero
    #[error("{command} failed ({exit_code}): {stderr}")]
    Command {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    /// Source file for scaffolding not found
    #[error("source file not found: {0}")]
    SourceNotFound(String),

    /// Unsupported test framework requested
    #[error("unsupported test type: {0} (expected 'pytest' or 'jest')")]
    UnsupportedTestType(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for devops operations
pub type Result<T> = std::result::Result<T, DevOpsError>;

/// Convert DevOpsError to watch_core::Error
impl From<DevOpsError> for watch_core::Error {
    fn from(err: DevOpsError) -> Self {
        watch_core::Error::ToolFailed(err.to_string())
    }
}
