//! Tool for generating the Word report and dashboard data file

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use watch_core::{Result as CoreResult, Tool, WatchConfig};

use crate::dashboard::build_dashboard;
use crate::document::{parse_markdown, write_docx};
use crate::error::Result;

const REPORT_FILE: &str = "market_watch_report.docx";
const DASHBOARD_FILE: &str = "dashboard_data.json";

/// Tool writing the Word report and its companion dashboard data file
pub struct MarketReportTool {
    config: Arc<WatchConfig>,
}

#[derive(Debug, Deserialize)]
struct ReportParams {
    report_content: String,
    #[serde(default)]
    chart_paths: Vec<PathBuf>,
}

impl MarketReportTool {
    /// Create a new report tool
    pub fn new(config: Arc<WatchConfig>) -> Self {
        Self { config }
    }

    async fn generate(&self, params: ReportParams) -> Result<Value> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let report_path = self.config.output_dir.join(REPORT_FILE);
        let blocks = parse_markdown(&params.report_content);
        write_docx(&blocks, &params.chart_paths, &report_path)?;

        let dashboard_path = self.config.output_dir.join(DASHBOARD_FILE);
        let dashboard = build_dashboard(&params.report_content, &params.chart_paths, Utc::now());
        std::fs::write(&dashboard_path, serde_json::to_string_pretty(&dashboard)?)?;

        info!(
            report = %report_path.display(),
            dashboard = %dashboard_path.display(),
            "report artifacts written"
        );

        Ok(json!({
            "report_path": report_path.to_string_lossy(),
            "dashboard_path": dashboard_path.to_string_lossy(),
            "short_term_picks": dashboard.top_short.len(),
            "long_term_picks": dashboard.top_long.len(),
        }))
    }
}

#[async_trait]
impl Tool for MarketReportTool {
    async fn execute(&self, params: Value) -> CoreResult<Value> {
        let params: ReportParams = serde_json::from_value(params).map_err(|e| {
            watch_core::Error::ToolFailed(format!("Invalid parameters: {e}"))
        })?;

        self.generate(params)
            .await
            .map_err(|e| watch_core::Error::ToolFailed(e.to_string()))
    }

    fn name(&self) -> &str {
        "market_report"
    }

    fn description(&self) -> &str {
        "Generate a Word document (.docx) from the provided markdown report and \
         embed any specified chart images. Also writes a dashboard_data.json \
         file for the frontend."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "report_content": {
                    "type": "string",
                    "description": "The full markdown content of the report"
                },
                "chart_paths": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "File paths of generated chart PNGs to embed"
                }
            },
            "required": ["report_content"]
        })
    }
}
