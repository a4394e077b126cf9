//! Error types for GitHub operations

use thiserror::Error;

/// GitHub-specific errors
#[derive(Debug, Error)]
pub enum GitHubError {
    /// Private key unreadable or malformed, or signing failed
    #[error("Credential error: {0}")]
    Credential(String),

    /// Repository installation lookup failed (repository not found or app
    /// not installed)
    #[error("Failed to get installation for {owner}/{repo}: {status} {body}")]
    Lookup {
        owner: String,
        repo: String,
        status: u16,
        body: String,
    },

    /// Installation token exchange failed
    #[error("Failed to get installation token: {status} {body}")]
    Auth { status: u16, body: String },

    /// Any other non-success API response
    #[error("GitHub API error: {status} {body}")]
    Api { status: u16, body: String },

    /// Missing or inconsistent configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network or HTTP error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for GitHub operations
pub type Result<T> = std::result::Result<T, GitHubError>;

/// Convert GitHubError to watch_core::Error
impl From<GitHubError> for watch_core::Error {
    fn from(err: GitHubError) -> Self {
        watch_core::Error::ToolFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_embeds_status_and_body() {
        let err = GitHubError::Api {
            status: 422,
            body: r#"{"message":"Validation Failed"}"#.to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("422"));
        assert!(text.contains("Validation Failed"));
    }

    #[test]
    fn test_lookup_error_names_repository() {
        let err = GitHubError::Lookup {
            owner: "octocat".to_string(),
            repo: "hello-world".to_string(),
            status: 404,
            body: "Not Found".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("octocat/hello-world"));
        assert!(text.contains("404"));
    }
}
