//! TODO/FIXME scanning
//!
//! Recursive scan over source trees, mirroring the layout conventions of the
//! ecosystems this workflow touches: dependency and VCS directories are
//! skipped, and only recognized source extensions are read.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Directories never descended into
const SKIP_DIRS: &[&str] = &["node_modules", ".venv", "__pycache__", ".git"];

/// File extensions scanned for markers
const SCAN_EXTENSIONS: &[&str] = &["py", "ts", "tsx", "js", "jsx", "rs"];

/// Number of findings included in the formatted report
const REPORT_LIMIT: usize = 20;

/// A single marker occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub file: PathBuf,
    /// 1-based line number
    pub line: usize,
    pub pattern: String,
    pub text: String,
}

/// Scan a directory tree for the given marker patterns
///
/// Entries are visited in name order so output is stable across runs.
pub fn scan_directory(directory: &Path, patterns: &[String]) -> Result<Vec<Finding>> {
    let mut findings = Vec::new();
    walk(directory, patterns, &mut findings)?;
    Ok(findings)
}

fn walk(dir: &Path, patterns: &[String], findings: &mut Vec<Finding>) -> Result<()> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)?.collect::<std::io::Result<_>>()?;
    entries.sort_by_key(std::fs::DirEntry::file_name);

    for entry in entries {
        let path = entry.path();
        let file_type = entry.file_type()?;

        if file_type.is_dir() {
            let name = entry.file_name();
            if SKIP_DIRS.iter().any(|skip| name == *skip) {
                continue;
            }
            walk(&path, patterns, findings)?;
        } else if file_type.is_file() && has_scan_extension(&path) {
            scan_file(&path, patterns, findings);
        }
    }

    Ok(())
}

fn has_scan_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SCAN_EXTENSIONS.contains(&ext))
}

fn scan_file(path: &Path, patterns: &[String], findings: &mut Vec<Finding>) {
    // Unreadable files are skipped rather than aborting the whole scan
    let Ok(content) = std::fs::read_to_string(path) else {
        return;
    };

    for (index, line) in content.lines().enumerate() {
        for pattern in patterns {
            if line.contains(pattern.as_str()) {
                findings.push(Finding {
                    file: path.to_path_buf(),
                    line: index + 1,
                    pattern: pattern.clone(),
                    text: line.trim().to_string(),
                });
            }
        }
    }
}

/// Render findings the way the scouting agent expects to read them
pub fn format_findings(findings: &[Finding]) -> String {
    if findings.is_empty() {
        return "No TODOs or issues found in codebase.".to_string();
    }

    let mut output = format!("Found {} items:\n\n", findings.len());
    for finding in findings.iter().take(REPORT_LIMIT) {
        output.push_str(&format!(
            "[{}] {}:{}\n  {}\n\n",
            finding.pattern,
            finding.file.display(),
            finding.line,
            finding.text
        ));
    }

    if findings.len() > REPORT_LIMIT {
        output.push_str(&format!(
            "\n... and {} more items",
            findings.len() - REPORT_LIMIT
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn default_patterns() -> Vec<String> {
        vec!["TODO".to_string(), "FIXME".to_string(), "BUG".to_string()]
    }

    #[test]
    fn test_scan_reports_lines_with_one_based_numbers() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("app.py"),
            "import os\n# TODO: wire config\nprint('hi')\n# FIXME handle errors\n",
        )
        .unwrap();

        let findings = scan_directory(dir.path(), &default_patterns()).unwrap();

        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].pattern, "TODO");
        assert_eq!(findings[0].line, 2);
        assert_eq!(findings[0].text, "# TODO: wire config");
        assert_eq!(findings[1].pattern, "FIXME");
        assert_eq!(findings[1].line, 4);
    }

    #[test]
    fn test_scan_skips_excluded_directories() {
        let dir = tempfile::tempdir().unwrap();
        let excluded = dir.path().join("node_modules");
        fs::create_dir(&excluded).unwrap();
        fs::write(excluded.join("dep.js"), "// TODO inside dependency\n").unwrap();
        fs::write(dir.path().join("main.js"), "// TODO real work\n").unwrap();

        let findings = scan_directory(dir.path(), &default_patterns()).unwrap();

        assert_eq!(findings.len(), 1);
        assert!(findings[0].file.ends_with("main.js"));
    }

    #[test]
    fn test_scan_ignores_unrecognized_extensions() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "TODO in plain text\n").unwrap();

        let findings = scan_directory(dir.path(), &default_patterns()).unwrap();
        assert!(findings.is_empty());
    }

    #[test]
    fn test_format_findings_empty() {
        assert_eq!(
            format_findings(&[]),
            "No TODOs or issues found in codebase."
        );
    }

    #[test]
    fn test_format_findings_caps_output() {
        let findings: Vec<Finding> = (0..25)
            .map(|i| Finding {
                file: PathBuf::from("a.rs"),
                line: i + 1,
                pattern: "TODO".to_string(),
                text: format!("// TODO item {i}"),
            })
            .collect();

        let report = format_findings(&findings);
        assert!(report.starts_with("Found 25 items:"));
        assert!(report.contains("... and 5 more items"));
    }
}
