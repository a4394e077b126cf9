//! Error types for pipeline definitions

use thiserror::Error;

/// Pipeline definition errors
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A role references a tool the registry does not know
    #[error("role '{role}' references unknown tool '{tool}'")]
    UnknownTool { role: String, tool: String },

    /// A task references a role the pipeline does not declare
    #[error("task '{task}' references unknown role '{role}'")]
    UnknownRole { task: String, role: String },

    /// Two roles share a name
    #[error("duplicate role name '{0}'")]
    DuplicateRole(String),

    /// A pipeline without roles or tasks cannot run
    #[error("pipeline must declare at least one role and one task")]
    Empty,

    /// YAML parsing or serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Convert PipelineError to watch_core::Error
impl From<PipelineError> for watch_core::Error {
    fn from(err: PipelineError) -> Self {
        watch_core::Error::Configuration(err.to_string())
    }
}
