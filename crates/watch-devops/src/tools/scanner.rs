//! Tool for scanning source trees for TODO markers

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::path::PathBuf;
use watch_core::{Result as CoreResult, Tool};

use crate::error::Result;
use crate::scanner::{format_findings, scan_directory};

/// Tool scanning a directory for TODO/FIXME/BUG markers
pub struct CodeScannerTool;

#[derive(Debug, Deserialize)]
struct ScannerParams {
    #[serde(default = "default_directory")]
    directory: PathBuf,
    #[serde(default = "default_patterns")]
    patterns: Vec<String>,
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_patterns() -> Vec<String> {
    vec!["TODO".to_string(), "FIXME".to_string(), "BUG".to_string()]
}

impl CodeScannerTool {
    pub fn new() -> Self {
        Self
    }

    async fn scan(&self, params: ScannerParams) -> Result<Value> {
        let findings = scan_directory(&params.directory, &params.patterns)?;

        Ok(json!({
            "directory": params.directory.to_string_lossy(),
            "total": findings.len(),
            "report": format_findings(&findings),
        }))
    }
}

impl Default for CodeScannerTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for CodeScannerTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: ScannerParams = serde_json::from_value(params).map_err(|e| {
            watch_core::Error::ToolFailed(format!("Invalid parameters: {e}"))
        })?;

        self.scan(params)
            .await
            .map_err(|e| watch_core::Error::ToolFailed(e.to_string()))
    }

    fn name(&self) -> &str {
        "scan_code"
    }

    fn description(&self) -> &str {
        "Scan a codebase for TODO comments, FIXME tags, and potential issues."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "directory": {
                    "type": "string",
                    "description": "Directory to scan",
                    "default": "."
                },
                "patterns": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Patterns to search for",
                    "default": ["TODO", "FIXME", "BUG"]
                }
            }
        })
    }
}
