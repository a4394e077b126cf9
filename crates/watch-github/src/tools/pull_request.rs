//! Tool for opening pull requests

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;
use watch_core::{Result as CoreResult, Tool, WatchConfig};

use crate::auth::AppAuth;
use crate::error::{GitHubError, Result};
use crate::repo::RepoRef;

/// Tool for opening a pull request in the configured repository
///
/// Creates a persistent artifact on the remote repository; re-invocation with
/// the same arguments creates a duplicate.
pub struct CreatePullRequestTool {
    config: Arc<WatchConfig>,
}

#[derive(Debug, Deserialize)]
struct PullRequestParams {
    title: String,
    body: String,
    head_branch: String,
    #[serde(default = "default_base_branch")]
    base_branch: String,
}

fn default_base_branch() -> String {
    "main".to_string()
}

impl CreatePullRequestTool {
    /// Create a new pull request tool
    pub fn new(config: Arc<WatchConfig>) -> Self {
        Self { config }
    }

    async fn create_pull_request(&self, params: PullRequestParams) -> Result<Value> {
        let repo = RepoRef::from_settings(&self.config.github)?;
        let auth = AppAuth::from_settings(&self.config.github, self.config.request_timeout)?;

        let token = auth.token_for(&repo).await?;

        let (status, body) = auth
            .post_as_installation(
                &format!("/repos/{}/{}/pulls", repo.owner, repo.name),
                &token.token,
                &json!({
                    "title": params.title,
                    "body": params.body,
                    "head": params.head_branch,
                    "base": params.base_branch,
                }),
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

        info!(repository = %repo, url = %html_url, "created pull request");

        Ok(json!({
            "status": "created",
            "repository": repo.full_name(),
            "head": params.head_branch,
            "base": params.base_branch,
            "html_url": html_url,
        }))
    }
}

#[async_trait]
impl Tool for CreatePullRequestTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: PullRequestParams = serde_json::from_value(params).map_err(|e| {
            watch_core::Error::ToolFailed(format!("Invalid parameters: {e}"))
        })?;

        self.create_pull_request(params)
            .await
            .map_err(|e| watch_core::Error::ToolFailed(e.to_string()))
    }

    fn name(&self) -> &str {
        "create_pull_request"
    }

    fn description(&self) -> &str {
        "Open a pull request in the configured repository from a head branch \
         into a base branch (default 'main')."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "title": {
                    "type": "string",
                    "description": "Pull request title"
                },
                "body": {
                    "type": "string",
                    "description": "Pull request description"
                },
                "head_branch": {
                    "type": "string",
                    "description": "Source branch containing the changes"
                },
                "base_branch": {
                    "type": "string",
                    "description": "Target branch",
                    "default": "main"
                }
            },
            "required": ["title", "body", "head_branch"]
        })
    }
}
