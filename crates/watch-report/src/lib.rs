//! Report generation for market-watch
//!
//! Turns the pipeline's final markdown report into two artifacts: a Word
//! document (headings, bold paragraphs, page breaks, embedded charts) and a
//! structured dashboard data file with the extracted top picks.

pub mod dashboard;
pub mod document;
pub mod error;
pub mod tools;

pub use dashboard::{DashboardData, Pick, build_dashboard, extract_picks};
pub use document::{DocBlock, parse_markdown, write_docx};
pub use error::{ReportError, Result};
pub use tools::MarketReportTool;
