//! sasgauge core library - static complexity analysis of SAS sources
//!
//! Approximate, heuristic, single-pass structural counting. Not a
//! semantic analyzer: no control-flow graph, no macro expansion, no full
//! grammar parse.

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Analysis is strictly per-file; no state shared between units
// - No global mutable state
// - Deterministic traversal and output ordering
// - Identical input yields byte-for-byte identical output
// - The engine is total over any text input; only file access can fail

pub mod analysis;
pub mod classify;
pub mod complexity;
pub mod config;
pub mod metrics;
pub mod nesting;
pub mod report;

pub use analysis::analyze_source;
pub use complexity::Thresholds;
pub use metrics::{FileMetrics, Issue, IssueKind};
pub use report::{render_json, render_markdown, render_text, sort_reports, FileReport};

use anyhow::{Context, Result};
use config::ResolvedConfig;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

pub struct AnalysisOptions {
    pub min_complexity: Option<usize>,
    pub top_n: Option<usize>,
}

/// Analyze a SAS file or a directory tree of SAS files.
///
/// Files are analyzed in parallel, each against its own fresh engine
/// state, then sorted deterministically.
pub fn analyze(
    path: &Path,
    options: AnalysisOptions,
    config: &ResolvedConfig,
) -> Result<Vec<FileReport>> {
    let source_files = collect_source_files(path, config)?;

    let all_reports = source_files
        .par_iter()
        .map(|file_path| {
            analysis::analyze_file(file_path, &config.thresholds)
                .with_context(|| format!("Failed to analyze file: {}", file_path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let sorted_reports = sort_reports(all_reports);

    // Apply filters: config values, overridden by CLI options
    let min_complexity = options.min_complexity.or(config.min_complexity);
    let top_n = options.top_n.or(config.top_n);

    let filtered: Vec<FileReport> = sorted_reports
        .into_iter()
        .filter(|r| {
            min_complexity
                .map(|min| r.metrics.cyclomatic_complexity >= min)
                .unwrap_or(true)
        })
        .collect();

    let final_reports = if let Some(top_n) = top_n {
        filtered.into_iter().take(top_n).collect()
    } else {
        filtered
    };

    Ok(final_reports)
}

/// Check if a file is a SAS source file (case-insensitive extension)
fn is_sas_source_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.eq_ignore_ascii_case("sas"))
        .unwrap_or(false)
}

/// Collect all SAS files from a path (file or directory)
///
/// Config include/exclude globs apply to directory traversal; an
/// explicitly named single file is always analyzed.
fn collect_source_files(path: &Path, config: &ResolvedConfig) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    if path.is_file() {
        if let Some(filename) = path.file_name().and_then(|n| n.to_str()) {
            if is_sas_source_file(filename) {
                files.push(path.to_path_buf());
            }
        }
    } else if path.is_dir() {
        collect_source_files_recursive(path, config, &mut files)?;
    }

    // Sort files for deterministic order
    files.sort();

    Ok(files)
}

/// Recursively collect SAS files from a directory
fn collect_source_files_recursive(
    dir: &Path,
    config: &ResolvedConfig,
    files: &mut Vec<PathBuf>,
) -> Result<()> {
    use std::ffi::OsStr;

    for entry_result in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
    {
        let entry: std::fs::DirEntry = entry_result?;
        let path = entry.path();

        if path.is_dir() {
            // Skip hidden directories
            if let Some(name) = path.file_name().and_then(|n: &OsStr| n.to_str()) {
                if name.starts_with('.') {
                    continue;
                }
            }
            collect_source_files_recursive(&path, config, files)?;
        } else if path.is_file() {
            if let Some(filename) = path.file_name().and_then(|n: &OsStr| n.to_str()) {
                if is_sas_source_file(filename) && config.should_include(&path) {
                    files.push(path);
                }
            }
        }
    }

    Ok(())
}
