//! Tool for running the test suite

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use watch_core::{Result as CoreResult, Tool};

use crate::error::{DevOpsError, Result};
use crate::process::run_command;

/// Tool executing pytest and returning the captured results verbatim
///
/// A failing suite is still a successful tool invocation; the exit code and
/// captured output are the result. Only a missing pytest binary is an error.
pub struct RunTestsTool;

#[derive(Debug, Deserialize)]
struct RunTestsParams {
    #[serde(default = "default_test_path")]
    test_path: String,
    #[serde(default = "default_verbose")]
    verbose: bool,
}

fn default_test_path() -> String {
    ".".to_string()
}

fn default_verbose() -> bool {
    true
}

impl RunTestsTool {
    pub fn new() -> Self {
        Self
    }

    async fn run(&self, params: RunTestsParams) -> Result<Value> {
        let mut args = vec![params.test_path.as_str()];
        if params.verbose {
            args.push("-v");
        }

        let output = run_command("pytest", &args, None).await.map_err(|e| {
            if matches!(e, DevOpsError::ProgramNotFound(_)) {
                DevOpsError::ProgramNotFound("pytest (run: pip install pytest)".to_string())
            } else {
                e
            }
        })?;

        Ok(json!({
            "exit_code": output.exit_code,
            "stdout": output.stdout,
            "stderr": output.stderr,
        }))
    }
}

impl Default for RunTestsTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for RunTestsTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: RunTestsParams = serde_json::from_value(params).map_err(|e| {
            watch_core::Error::ToolFailed(format!("Invalid parameters: {e}"))
        })?;

        self.run(params)
            .await
            .map_err(|e| watch_core::Error::ToolFailed(e.to_string()))
    }

    fn name(&self) -> &str {
        "run_tests"
    }

    fn description(&self) -> &str {
        "Execute Python tests using pytest and return the exit code, stdout, \
         and stderr."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "test_path": {
                    "type": "string",
                    "description": "Path to a test file or directory",
                    "default": "."
                },
                "verbose": {
                    "type": "boolean",
                    "description": "Run with verbose output",
                    "default": true
                }
            }
        })
    }
}
