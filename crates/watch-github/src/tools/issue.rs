//! Tool for opening GitHub issues

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;
use watch_core::{Result as CoreResult, Tool, WatchConfig};

use crate::auth::AppAuth;
use crate::error::{GitHubError, Result};
use crate::repo::RepoRef;

/// Tool for creating an issue in the configured repository
///
/// Creates a persistent artifact on the remote repository; re-invocation with
/// the same arguments creates a duplicate.
pub struct CreateIssueTool {
    config: Arc<WatchConfig>,
}

#[derive(Debug, Deserialize)]
struct IssueParams {
    title: String,
    body: String,
}

impl CreateIssueTool {
    /// Create a new issue tool
    pub fn new(config: Arc<WatchConfig>) -> Self {
        Self { config }
    }

    async fn create_issue(&self, params: IssueParams) -> Result<Value> {
        let repo = RepoRef::from_settings(&self.config.github)?;
        let auth = AppAuth::from_settings(&self.config.github, self.config.request_timeout)?;

        let token = auth.token_for(&repo).await?;

        let (status, body) = auth
            .post_as_installation(
                &format!("/repos/{}/{}/issues", repo.owner, repo.name),
                &token.token,
                &json!({ "title": params.title, "body": params.body }),
            )
            .await?;

        if status != 201 {
            return Err(GitHubError::Api { status, body });
        }

        let created: Value = serde_json::from_str(&body)?;
        let html_url = created
            .get("html_url")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        info!(repository = %repo, url = %html_url, "created issue");

        Ok(json!({
            "status": "created",
            "repository": repo.full_name(),
            "html_url": html_url,
        }))
    }
}

#[async_trait]
impl Tool for CreateIssueTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: IssueParams = serde_json::from_value(params).map_err(|e| {
            watch_core::Error::ToolFailed(format!("Invalid parameters: {e}"))
        })?;

        self.create_issue(params)
            .await
            .map_err(|e| watch_core::Error::ToolFailed(e.to_string()))
    }

    fn name(&self) -> &str {
        "create_issue"
    }

    fn description(&self) -> &str {
        "Create a new issue in the configured repository. \
         Useful for logging high-volatility alerts or important events."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "title": {
                    "type": "string",
                    "description": "Issue title"
                },
                "body": {
                    "type": "string",
                    "description": "Issue body text"
                }
            },
            "required": ["title", "body"]
        })
    }
}
