//! Cyclomatic complexity calculation and threshold policies
//!
//! Approximates McCabe complexity for a line-oriented scan as
//! `conditionals + loops + 1`: each independent decision point counts
//! once. This is the terminal step of an analysis; the record is
//! read-only afterwards.

use crate::metrics::{FileMetrics, Issue, IssueKind};

/// Fixed policy thresholds.
///
/// Pass `&Thresholds::default()` unless the project has configured
/// overrides via `.sasgaugerc.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thresholds {
    /// Complexity above this value raises a `high-complexity` issue.
    pub max_complexity: usize,
    /// Parameter count above this value raises `excess-macro-parameters`.
    pub max_macro_params: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            max_complexity: 10,
            max_macro_params: 3,
        }
    }
}

/// Derive the complexity score and evaluate the complexity threshold.
///
/// Sets `cyclomatic_complexity = conditionals + loops + 1` (always >= 1)
/// and appends exactly one `high-complexity` issue when the score
/// exceeds the configured limit.
pub fn finalize(metrics: &mut FileMetrics, thresholds: &Thresholds) {
    metrics.cyclomatic_complexity = metrics.conditionals + metrics.loops + 1;

    if metrics.cyclomatic_complexity > thresholds.max_complexity {
        metrics.issues.push(Issue {
            kind: IssueKind::HighComplexity,
            message: format!(
                "Cyclomatic complexity {} exceeds limit {}",
                metrics.cyclomatic_complexity, thresholds.max_complexity
            ),
        });
    }
}
