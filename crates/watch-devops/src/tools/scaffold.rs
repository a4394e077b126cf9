//! Tool for generating unit-test scaffolds

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::path::PathBuf;
use tracing::info;
use watch_core::{Result as CoreResult, Tool};

use crate::error::{DevOpsError, Result};
use crate::scaffold::{
    TestKind, jest_scaffold, pytest_scaffold, python_declarations, test_file_path,
};

/// Tool writing pytest/jest scaffolds for a source file
pub struct TestScaffoldTool;

#[derive(Debug, Deserialize)]
struct ScaffoldParams {
    source_file: PathBuf,
    #[serde(default = "default_test_type")]
    test_type: String,
}

fn default_test_type() -> String {
    "pytest".to_string()
}

impl TestScaffoldTool {
    pub fn new() -> Self {
        Self
    }

    async fn generate(&self, params: ScaffoldParams) -> Result<Value> {
        if !params.source_file.exists() {
            return Err(DevOpsError::SourceNotFound(
                params.source_file.display().to_string(),
            ));
        }

        let kind = TestKind::parse(&params.test_type)?;
        let test_file = test_file_path(&params.source_file, kind);

        let result = match kind {
            TestKind::Pytest => {
                let source = std::fs::read_to_string(&params.source_file)?;
                let declarations = python_declarations(&source);
                let content = pytest_scaffold(&params.source_file, &declarations);
                write_scaffold(&test_file, &content)?;

                json!({
                    "test_file": test_file.to_string_lossy(),
                    "functions": declarations.functions.len(),
                    "classes": declarations.classes.len(),
                })
            }
            TestKind::Jest => {
                let content = jest_scaffold(&params.source_file);
                write_scaffold(&test_file, &content)?;

                json!({ "test_file": test_file.to_string_lossy() })
            }
        };

        info!(test_file = %test_file.display(), "scaffold written");
        Ok(result)
    }
}

fn write_scaffold(path: &std::path::Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

impl Default for TestScaffoldTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for TestScaffoldTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: ScaffoldParams = serde_json::from_value(params).map_err(|e| {
            watch_core::Error::ToolFailed(format!("Invalid parameters: {e}"))
        })?;

        self.generate(params)
            .await
            .map_err(|e| watch_core::Error::ToolFailed(e.to_string()))
    }

    fn name(&self) -> &str {
        "generate_test_scaffold"
    }

    fn description(&self) -> &str {
        "Generate a unit-test scaffold for a Python (pytest) or \
         TypeScript/JavaScript (jest) source file, placed in a __tests__ \
         subdirectory next to the source."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "source_file": {
                    "type": "string",
                    "description": "Path to the source file to generate tests for"
                },
                "test_type": {
                    "type": "string",
                    "enum": ["pytest", "jest"],
                    "description": "Test framework",
                    "default": "pytest"
                }
            },
            "required": ["source_file"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_metadata() {
        let tool = TestScaffoldTool::new();
        assert_eq!(tool.name(), "generate_test_scaffold");
        let schema = tool.input_schema();
        assert_eq!(schema["properties"]["test_type"]["default"], "pytest");
    }

    #[tokio::test]
    async fn test_missing_source_reported() {
        let tool = TestScaffoldTool::new();
        let err = tool
            .execute(json!({ "source_file": "/nonexistent/app.py" }))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/app.py"));
    }

    #[tokio::test]
    async fn test_pytest_scaffold_written() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("quotes.py");
        std::fs::write(&source, "def fetch_quotes(ticker):\n    return []\n").unwrap();

        let tool = TestScaffoldTool::new();
        let result = tool
            .execute(json!({ "source_file": source.to_string_lossy() }))
            .await
            .unwrap();

        assert_eq!(result["functions"], 1);
        let test_file = dir.path().join("__tests__").join("test_quotes.py");
        let content = std::fs::read_to_string(test_file).unwrap();
        assert!(content.contains("def test_fetch_quotes():"));
    }

    #[tokio::test]
    async fn test_jest_scaffold_written() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("picker.ts");
        std::fs::write(&source, "export const pick = () => 1;\n").unwrap();

        let tool = TestScaffoldTool::new();
        let result = tool
            .execute(json!({
                "source_file": source.to_string_lossy(),
                "test_type": "jest",
            }))
            .await
            .unwrap();

        let test_file = result["test_file"].as_str().unwrap().to_string();
        assert!(test_file.ends_with("picker.test.ts"));
        assert!(std::fs::read_to_string(test_file).unwrap().contains("describe('picker'"));
    }

    #[tokio::test]
    async fn test_unsupported_framework_reported() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("app.py");
        std::fs::write(&source, "x = 1\n").unwrap();

        let tool = TestScaffoldTool::new();
        let err = tool
            .execute(json!({
                "source_file": source.to_string_lossy(),
                "test_type": "mocha",
            }))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("unsupported test type"));
    }
}
