//! Dashboard data extraction
//!
//! Pulls the top-pick lists out of the markdown report for the frontend
//! dashboard. Collection is driven by the two pick headings and stops as
//! soon as a new heading line begins.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Expected pick format: "- **NVDA**: reason" (bold markers optional)
static PICK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^- (?:\*\*)?([A-Z]+)(?:\*\*)?[:\s]+(.*)").expect("pick regex is valid")
});

const SHORT_TERM_MARKER: &str = "Top 5 Short-Term Picks";
const LONG_TERM_MARKER: &str = "Top 5 Long-Term Picks";

/// A single extracted pick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pick {
    pub ticker: String,
    pub reason: String,
}

/// Structured data file written next to the Word report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    pub generated_at: String,
    pub top_short: Vec<Pick>,
    pub top_long: Vec<Pick>,
    pub charts: Vec<String>,
    pub full_report: String,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Short,
    Long,
}

/// Extract the short-term and long-term pick lists from the report
pub fn extract_picks(report: &str) -> (Vec<Pick>, Vec<Pick>) {
    let mut top_short = Vec::new();
    let mut top_long = Vec::new();
    let mut section: Option<Section> = None;

    for line in report.lines() {
        let line = line.trim();

        if line.contains(SHORT_TERM_MARKER) {
            section = Some(Section::Short);
            continue;
        } else if line.contains(LONG_TERM_MARKER) {
            section = Some(Section::Long);
            continue;
        } else if line.starts_with('#') {
            // A new heading ends the current pick section
            section = None;
        }

        let Some(current) = section else { continue };
        if !line.starts_with('-') {
            continue;
        }

        if let Some(captures) = PICK_RE.captures(line) {
            let pick = Pick {
                ticker: captures[1].to_string(),
                reason: captures[2].to_string(),
            };
            match current {
                Section::Short => top_short.push(pick),
                Section::Long => top_long.push(pick),
            }
        }
    }

    (top_short, top_long)
}

/// Assemble the dashboard data for a report and its charts
pub fn build_dashboard(
    report: &str,
    chart_paths: &[PathBuf],
    generated_at: DateTime<Utc>,
) -> DashboardData {
    let (top_short, top_long) = extract_picks(report);

    DashboardData {
        generated_at: generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        top_short,
        top_long,
        charts: chart_paths
            .iter()
            .map(|p| {
                Path::new(p)
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default()
            })
            .collect(),
        full_report: report.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const REPORT: &str = "# Daily Report\n\
        ## Top 5 Short-Term Picks\n\
        - **NVDA**: strong momentum\n\
        - AMD: breakout above resistance\n\
        ## Top 5 Long-Term Picks\n\
        - **MSFT**: durable cash flows\n\
        ## Risk Notes\n\
        - VIX: elevated going into the print\n";

    #[test]
    fn test_extracts_short_and_long_picks() {
        let (short, long) = extract_picks(REPORT);

        assert_eq!(
            short,
            vec![
                Pick {
                    ticker: "NVDA".to_string(),
                    reason: "strong momentum".to_string()
                },
                Pick {
                    ticker: "AMD".to_string(),
                    reason: "breakout above resistance".to_string()
                },
            ]
        );
        assert_eq!(
            long,
            vec![Pick {
                ticker: "MSFT".to_string(),
                reason: "durable cash flows".to_string()
            }]
        );
    }

    #[test]
    fn test_collection_stops_at_new_heading() {
        // "VIX" sits under "Risk Notes", after collection has ended
        let (short, long) = extract_picks(REPORT);
        assert!(short.iter().all(|p| p.ticker != "VIX"));
        assert!(long.iter().all(|p| p.ticker != "VIX"));
    }

    #[test]
    fn test_no_sections_yields_empty_lists() {
        let (short, long) = extract_picks("# Just a heading\n- NVDA: ignored\n");
        assert!(short.is_empty());
        assert!(long.is_empty());
    }

    #[test]
    fn test_non_pick_lines_inside_section_are_skipped() {
        let report = "## Top 5 Short-Term Picks\nsome prose\n- no ticker here\n";
        let (short, _) = extract_picks(report);
        assert!(short.is_empty());
    }

    #[test]
    fn test_build_dashboard() {
        let generated_at = Utc.with_ymd_and_hms(2026, 8, 5, 9, 30, 0).unwrap();
        let charts = vec![PathBuf::from("output/NVDA_chart.png")];

        let dashboard = build_dashboard(REPORT, &charts, generated_at);

        assert_eq!(dashboard.generated_at, "2026-08-05 09:30:00");
        assert_eq!(dashboard.charts, vec!["NVDA_chart.png"]);
        assert_eq!(dashboard.top_short.len(), 2);
        assert_eq!(dashboard.top_long.len(), 1);
        assert_eq!(dashboard.full_report, REPORT);
    }
}
