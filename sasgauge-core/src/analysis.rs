//! Analysis orchestration - ties together classification, nesting,
//! aggregation, and the complexity calculator
//!
//! Global invariants enforced:
//! - Analysis is a pure function from source text to metrics record
//! - Fresh record and fresh nesting state per unit; nothing carries over
//! - Identical input yields identical output

use crate::classify::{self, Construct};
use crate::complexity::{self, Thresholds};
use crate::metrics::FileMetrics;
use crate::nesting::NestingTracker;
use crate::report::FileReport;
use anyhow::{Context, Result};
use std::path::Path;

/// Analyze one source unit.
///
/// Total over any text input: the engine never fails on the content of
/// a unit. Only the file-access layer around it can error.
pub fn analyze_source(source: &str, thresholds: &Thresholds) -> FileMetrics {
    let mut metrics = FileMetrics::new();
    let mut tracker = NestingTracker::new();

    for line in source.lines() {
        for construct in classify::classify_line(line) {
            match construct {
                Construct::LoopOpen => tracker.open(),
                Construct::BlockClose => tracker.close(),
                _ => {}
            }
            metrics.record(&construct, thresholds);
        }
    }

    metrics.max_nesting_depth = tracker.max_depth();
    complexity::finalize(&mut metrics, thresholds);
    metrics
}

/// Analyze a SAS source file from disk.
pub fn analyze_file(path: &Path, thresholds: &Thresholds) -> Result<FileReport> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let metrics = analyze_source(&source, thresholds);

    Ok(FileReport {
        file: path.to_string_lossy().to_string(),
        metrics,
    })
}
