//! Git subcommand tools
//!
//! Thin wrappers over the git CLI, run in the process working directory. Each
//! returns the captured output; a non-zero exit surfaces the captured stderr.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use watch_core::{Result as CoreResult, Tool};

use crate::error::{DevOpsError, Result};
use crate::process::run_command;

/// Tool reporting the working tree status
pub struct GitStatusTool;

impl GitStatusTool {
    pub fn new() -> Self {
        Self
    }

    async fn status(&self) -> Result<Value> {
        let output = run_command("git", &["status", "--short"], None).await?;
        if !output.success() {
            return Err(DevOpsError::Command {
                command: "git status".to_string(),
                exit_code: output.exit_code,
                stderr: output.stderr,
            });
        }

        let clean = output.stdout.trim().is_empty();
        Ok(json!({
            "clean": clean,
            "output": if clean {
                "Working tree clean".to_string()
            } else {
                output.stdout
            },
        }))
    }
}

impl Default for GitStatusTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for GitStatusTool {
    async fn execute(&self, _params: Value) -> CoreResult<Value> {
        self.status()
            .await
            .map_err(|e| watch_core::Error::ToolFailed(e.to_string()))
    }

    fn name(&self) -> &str {
        "git_status"
    }

    fn description(&self) -> &str {
        "Check the current git repository status, including modified files."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }
}

/// Tool creating and switching to a new branch
pub struct GitBranchTool;

#[derive(Debug, Deserialize)]
struct BranchParams {
    branch_name: String,
}

impl GitBranchTool {
    pub fn new() -> Self {
        Self
    }

    async fn create_branch(&self, params: BranchParams) -> Result<Value> {
        let output =
            run_command("git", &["checkout", "-b", &params.branch_name], None).await?;
        if !output.success() {
            return Err(DevOpsError::Command {
                command: format!("git checkout -b {}", params.branch_name),
                exit_code: output.exit_code,
                stderr: output.stderr,
            });
        }

        Ok(json!({
            "branch": params.branch_name,
            "output": format!(
                "Created and switched to branch '{}'",
                params.branch_name
            ),
        }))
    }
}

impl Default for GitBranchTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for GitBranchTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: BranchParams = serde_json::from_value(params).map_err(|e| {
            watch_core::Error::ToolFailed(format!("Invalid parameters: {e}"))
        })?;

        self.create_branch(params)
            .await
            .map_err(|e| watch_core::Error::ToolFailed(e.to_string()))
    }

    fn name(&self) -> &str {
        "git_branch"
    }

    fn description(&self) -> &str {
        "Create a new git branch from the current branch and switch to it."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "branch_name": {
                    "type": "string",
                    "description": "Name of the new branch to create"
                }
            },
            "required": ["branch_name"]
        })
    }
}

/// Tool staging files and creating a commit
pub struct GitCommitTool;

#[derive(Debug, Deserialize)]
struct CommitParams {
    message: String,
    #[serde(default)]
    files: Vec<String>,
}

impl GitCommitTool {
    pub fn new() -> Self {
        Self
    }

    async fn commit(&self, params: CommitParams) -> Result<Value> {
        // Stage the listed files, or everything when none are listed
        if params.files.is_empty() {
            run_command("git", &["add", "."], None).await?;
        } else {
            for file in &params.files {
                run_command("git", &["add", file], None).await?;
            }
        }

        let output = run_command("git", &["commit", "-m", &params.message], None).await?;
        if !output.success() {
            return Err(DevOpsError::Command {
                command: "git commit".to_string(),
                exit_code: output.exit_code,
                stderr: output.stderr,
            });
        }

        Ok(json!({
            "message": params.message,
            "output": output.stdout,
        }))
    }
}

impl Default for GitCommitTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for GitCommitTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: CommitParams = serde_json::from_value(params).map_err(|e| {
            watch_core::Error::ToolFailed(format!("Invalid parameters: {e}"))
        })?;

        self.commit(params)
            .await
            .map_err(|e| watch_core::Error::ToolFailed(e.to_string()))
    }

    fn name(&self) -> &str {
        "git_commit"
    }

    fn description(&self) -> &str {
        "Stage files and create a commit. Use conventional commit format: \
         type(scope): description. Types: feat, fix, docs, test, refactor, chore."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "message": {
                    "type": "string",
                    "description": "Commit message (e.g., 'feat: add daily report')"
                },
                "files": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Specific files to stage. Empty stages all changes."
                }
            },
            "required": ["message"]
        })
    }
}

/// Tool pushing a branch to the origin remote
pub struct GitPushTool;

#[derive(Debug, Deserialize)]
struct PushParams {
    branch_name: String,
    #[serde(default = "default_set_upstream")]
    set_upstream: bool,
}

fn default_set_upstream() -> bool {
    true
}

impl GitPushTool {
    pub fn new() -> Self {
        Self
    }

    async fn push(&self, params: PushParams) -> Result<Value> {
        let args: Vec<&str> = if params.set_upstream {
            vec!["push", "-u", "origin", &params.branch_name]
        } else {
            vec!["push", "origin", &params.branch_name]
        };

        let output = run_command("git", &args, None).await?;
        if !output.success() {
            return Err(DevOpsError::Command {
                command: format!("git push origin {}", params.branch_name),
                exit_code: output.exit_code,
                stderr: output.stderr,
            });
        }

        Ok(json!({
            "branch": params.branch_name,
            "output": format!("Pushed to {}", params.branch_name),
        }))
    }
}

impl Default for GitPushTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for GitPushTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: PushParams = serde_json::from_value(params).map_err(|e| {
            watch_core::Error::ToolFailed(format!("Invalid parameters: {e}"))
        })?;

        self.push(params)
            .await
            .map_err(|e| watch_core::Error::ToolFailed(e.to_string()))
    }

    fn name(&self) -> &str {
        "git_push"
    }

    fn description(&self) -> &str {
        "Push commits to the remote repository."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "branch_name": {
                    "type": "string",
                    "description": "Branch name to push to the remote"
                },
                "set_upstream": {
                    "type": "boolean",
                    "description": "Set upstream for new branches",
                    "default": true
                }
            },
            "required": ["branch_name"]
        })
    }
}
