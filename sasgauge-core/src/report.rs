//! Reporting and output generation
//!
//! Global invariants enforced:
//! - Deterministic output ordering
//! - Byte-for-byte identical output across runs

use crate::metrics::FileMetrics;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Complete metrics report for one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FileReport {
    pub file: String,
    pub metrics: FileMetrics,
}

/// Sort reports deterministically
pub fn sort_reports(mut reports: Vec<FileReport>) -> Vec<FileReport> {
    reports.sort_by(|a, b| {
        // 1. Cyclomatic complexity descending
        b.metrics
            .cyclomatic_complexity
            .cmp(&a.metrics.cyclomatic_complexity)
            // 2. File path ascending
            .then_with(|| a.file.cmp(&b.file))
    });
    reports
}

/// Render reports as text output
pub fn render_text(reports: &[FileReport]) -> String {
    let mut output = String::new();

    // Header
    output.push_str(&format!(
        "{:<6} {:<7} {:<40} {:<6} {:<7} {:<7} {}\n",
        "CC", "DEPTH", "FILE", "COND", "LOOPS", "MACROS", "ISSUES"
    ));

    for report in reports {
        let m = &report.metrics;
        output.push_str(&format!(
            "{:<6} {:<7} {:<40} {:<6} {:<7} {:<7} {}\n",
            m.cyclomatic_complexity,
            m.max_nesting_depth,
            truncate_or_pad(&report.file, 40),
            m.conditionals,
            m.loops,
            m.macro_definitions,
            m.issues.len(),
        ));
    }

    output
}

/// Render reports as JSON output
pub fn render_json(reports: &[FileReport]) -> Result<String> {
    // Field order is fixed by the struct definitions, so output is
    // deterministic. Serialization failure propagates rather than
    // masquerading as an empty report.
    Ok(serde_json::to_string_pretty(reports)?)
}

/// Render reports as a Markdown document, one section per file.
///
/// An empty issue list renders an explicit "No issues found." marker so
/// a clean file is distinguishable from a missing report.
pub fn render_markdown(reports: &[FileReport]) -> String {
    let mut output = String::new();
    output.push_str("# SAS Complexity Report\n");

    for report in reports {
        let m = &report.metrics;
        output.push_str(&format!("\n## {}\n\n", report.file));
        output.push_str("| Metric | Value |\n");
        output.push_str("| --- | --- |\n");
        output.push_str(&format!("| Cyclomatic complexity | {} |\n", m.cyclomatic_complexity));
        output.push_str(&format!("| Max nesting depth | {} |\n", m.max_nesting_depth));
        output.push_str(&format!("| Data steps | {} |\n", m.data_steps));
        output.push_str(&format!("| Proc steps | {} |\n", m.proc_steps));
        output.push_str(&format!("| Macro definitions | {} |\n", m.macro_definitions));
        output.push_str(&format!("| Macro calls | {} |\n", m.macro_calls));
        output.push_str(&format!("| Conditionals | {} |\n", m.conditionals));
        output.push_str(&format!("| Loops | {} |\n", m.loops));
        output.push_str(&format!("| Merge statements | {} |\n", m.merges));
        output.push_str(&format!("| SQL blocks | {} |\n", m.sql_blocks));

        output.push_str("\n### Issues\n\n");
        if m.issues.is_empty() {
            output.push_str("No issues found.\n");
        } else {
            for issue in &m.issues {
                output.push_str(&format!("- **{}**: {}\n", issue.kind.as_str(), issue.message));
            }
        }
    }

    output
}

/// Truncate or pad string to fixed width
///
/// Truncation backs up to a char boundary so multibyte path names
/// never split mid-character.
fn truncate_or_pad(s: &str, width: usize) -> String {
    if s.len() > width {
        let mut cut = width.saturating_sub(3);
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...", &s[..cut])
    } else {
        format!("{:<width$}", s, width = width)
    }
}
