//! Per-file metrics record and event aggregation
//!
//! Global invariants enforced:
//! - One record per source unit; no state leaks between files
//! - Counts are monotonically non-decreasing during a scan
//! - Deterministic: the same event stream yields an identical record

use crate::classify::Construct;
use crate::complexity::Thresholds;
use serde::{Deserialize, Serialize};

/// Issue identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    ExcessMacroParameters,
    HighComplexity,
}

impl IssueKind {
    /// Get issue kind as string
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::ExcessMacroParameters => "excess-macro-parameters",
            IssueKind::HighComplexity => "high-complexity",
        }
    }
}

/// A severity-free diagnostic emitted when a measured value crosses a
/// fixed policy threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Issue {
    pub kind: IssueKind,
    pub message: String,
}

/// Aggregated metrics for one source unit.
///
/// Lifecycle: created fresh at the start of a unit's analysis, mutated
/// by `record` during the scan, finalized once by
/// [`crate::complexity::finalize`], then read-only for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FileMetrics {
    pub data_steps: usize,
    pub proc_steps: usize,
    pub macro_definitions: usize,
    pub macro_calls: usize,
    pub conditionals: usize,
    pub loops: usize,
    pub merges: usize,
    pub sql_blocks: usize,
    pub max_nesting_depth: usize,
    pub cyclomatic_complexity: usize,
    pub issues: Vec<Issue>,
}

impl FileMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the count matching one classified construct.
    ///
    /// A macro definition with more parameters than the configured limit
    /// additionally appends an `excess-macro-parameters` issue naming
    /// the macro. Block-close events carry no count; they only drive the
    /// nesting tracker.
    pub fn record(&mut self, construct: &Construct, thresholds: &Thresholds) {
        match construct {
            Construct::Conditional => self.conditionals += 1,
            Construct::LoopOpen => self.loops += 1,
            Construct::BlockClose => {}
            Construct::DataStep => self.data_steps += 1,
            Construct::ProcStep => self.proc_steps += 1,
            Construct::MacroDefinition { name, params } => {
                self.macro_definitions += 1;
                if *params > thresholds.max_macro_params {
                    self.issues.push(Issue {
                        kind: IssueKind::ExcessMacroParameters,
                        message: format!(
                            "Macro {} declares {} parameters (limit {})",
                            name, params, thresholds.max_macro_params
                        ),
                    });
                }
            }
            Construct::MacroCall { .. } => self.macro_calls += 1,
            Construct::Merge => self.merges += 1,
            Construct::SqlBlock => self.sql_blocks += 1,
        }
    }
}
