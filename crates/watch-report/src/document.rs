//! Markdown to Word document mapping
//!
//! The markdown report is mapped line by line onto a flat block sequence,
//! then the blocks are written out with docx-rs. Keeping the mapping as a
//! separate pure stage makes the structure deterministic and directly
//! testable: the same input always yields the same block sequence.

use crate::error::{ReportError, Result};
use docx_rs::{AlignmentType, BreakType, Docx, Paragraph, Pic, Run};
use std::path::{Path, PathBuf};

/// Document title prepended to every report
pub const REPORT_TITLE: &str = "Market Watch Daily Report";

/// Heading for the embedded chart section
const VISUALS_HEADING: &str = "Market Visuals";

// 6 inches wide at the chart's 10:6 aspect ratio, in EMU
const IMAGE_WIDTH_EMU: u32 = 5_486_400;
const IMAGE_HEIGHT_EMU: u32 = 3_291_840;

/// One block of the generated document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocBlock {
    /// `# `, `## `, `### ` lines
    Heading { level: u8, text: String },
    /// A whole line wrapped in `**` markers
    BoldParagraph(String),
    /// A `---` line
    PageBreak,
    /// Anything else, verbatim
    Paragraph(String),
}

/// Map markdown content onto the document block sequence
///
/// The mapping is line-oriented and total: every input line produces exactly
/// one block.
pub fn parse_markdown(content: &str) -> Vec<DocBlock> {
    content
        .lines()
        .map(|line| {
            if let Some(text) = line.strip_prefix("# ") {
                DocBlock::Heading {
                    level: 1,
                    text: text.to_string(),
                }
            } else if let Some(text) = line.strip_prefix("## ") {
                DocBlock::Heading {
                    level: 2,
                    text: text.to_string(),
                }
            } else if let Some(text) = line.strip_prefix("### ") {
                DocBlock::Heading {
                    level: 3,
                    text: text.to_string(),
                }
            } else if line.len() >= 4 && line.starts_with("**") && line.ends_with("**") {
                DocBlock::BoldParagraph(line[2..line.len() - 2].to_string())
            } else if line.trim() == "---" {
                DocBlock::PageBreak
            } else {
                DocBlock::Paragraph(line.to_string())
            }
        })
        .collect()
}

/// Write the block sequence and chart images as a Word document
pub fn write_docx(blocks: &[DocBlock], chart_paths: &[PathBuf], path: &Path) -> Result<()> {
    let mut docx = Docx::new().add_paragraph(
        Paragraph::new()
            .add_run(Run::new().add_text(REPORT_TITLE).bold().size(48))
            .align(AlignmentType::Center),
    );

    for block in blocks {
        docx = docx.add_paragraph(paragraph_for(block));
    }

    if !chart_paths.is_empty() {
        docx = docx.add_paragraph(heading_paragraph(1, VISUALS_HEADING));

        for chart in chart_paths {
            if chart.exists() {
                let bytes = std::fs::read(chart)?;
                let pic = Pic::new(&bytes).size(IMAGE_WIDTH_EMU, IMAGE_HEIGHT_EMU);
                docx = docx
                    .add_paragraph(
                        Paragraph::new()
                            .add_run(Run::new().add_image(pic))
                            .align(AlignmentType::Center),
                    )
                    .add_paragraph(
                        Paragraph::new()
                            .add_run(Run::new().add_text(format!(
                                "Figure: {}",
                                chart
                                    .file_name()
                                    .map(|n| n.to_string_lossy().into_owned())
                                    .unwrap_or_default()
                            )))
                            .align(AlignmentType::Center),
                    );
            } else {
                docx = docx.add_paragraph(Paragraph::new().add_run(
                    Run::new().add_text(format!("[Missing Image: {}]", chart.display())),
                ));
            }
        }
    }

    let file = std::fs::File::create(path)?;
    docx.build()
        .pack(file)
        .map_err(|e| ReportError::Document(e.to_string()))?;

    Ok(())
}

fn paragraph_for(block: &DocBlock) -> Paragraph {
    match block {
        DocBlock::Heading { level, text } => heading_paragraph(*level, text),
        DocBlock::BoldParagraph(text) => {
            Paragraph::new().add_run(Run::new().add_text(text.as_str()).bold())
        }
        DocBlock::PageBreak => {
            Paragraph::new().add_run(Run::new().add_break(BreakType::Page))
        }
        DocBlock::Paragraph(text) => Paragraph::new().add_run(Run::new().add_text(text.as_str())),
    }
}

fn heading_paragraph(level: u8, text: &str) -> Paragraph {
    // Sizes in half-points: 36/30/26 for levels 1-3
    let size = match level {
        1 => 36,
        2 => 30,
        _ => 26,
    };

    Paragraph::new()
        .style(&format!("Heading{level}"))
        .add_run(Run::new().add_text(text).bold().size(size))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "# Market Summary\n\
        A quiet session.\n\
        ## Top 5 Short-Term Picks\n\
        - **NVDA**: strong momentum\n\
        **Key risk: rate decision on Thursday**\n\
        ---\n\
        ### Appendix\n\
        Data sources listed below.";

    #[test]
    fn test_markdown_mapping() {
        let blocks = parse_markdown(SAMPLE);

        assert_eq!(
            blocks,
            vec![
                DocBlock::Heading {
                    level: 1,
                    text: "Market Summary".to_string()
                },
                DocBlock::Paragraph("A quiet session.".to_string()),
                DocBlock::Heading {
                    level: 2,
                    text: "Top 5 Short-Term Picks".to_string()
                },
                DocBlock::Paragraph("- **NVDA**: strong momentum".to_string()),
                DocBlock::BoldParagraph("Key risk: rate decision on Thursday".to_string()),
                DocBlock::PageBreak,
                DocBlock::Heading {
                    level: 3,
                    text: "Appendix".to_string()
                },
                DocBlock::Paragraph("Data sources listed below.".to_string()),
            ]
        );
    }

    #[test]
    fn test_mapping_is_deterministic() {
        assert_eq!(parse_markdown(SAMPLE), parse_markdown(SAMPLE));
    }

    #[test]
    fn test_bare_bold_markers_stay_a_paragraph() {
        // "**" alone is not a bold paragraph
        let blocks = parse_markdown("**");
        assert_eq!(blocks, vec![DocBlock::Paragraph("**".to_string())]);
    }

    #[test]
    fn test_heading_requires_space() {
        let blocks = parse_markdown("#Nope");
        assert_eq!(blocks, vec![DocBlock::Paragraph("#Nope".to_string())]);
    }

    #[test]
    fn test_write_docx_produces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.docx");
        let blocks = parse_markdown(SAMPLE);

        write_docx(&blocks, &[], &path).unwrap();

        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_write_docx_with_missing_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.docx");
        let missing = dir.path().join("NVDA_chart.png");

        // A missing chart path becomes a placeholder, not an error
        write_docx(&[], &[missing], &path).unwrap();
        assert!(path.exists());
    }
}
