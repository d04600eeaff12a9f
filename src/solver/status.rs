//! Solve status — outcome data, not an error type.
//!
//! Per the error-handling design, `Infeasible`, `Unbounded`, and `TimeLimit`
//! are meaningful results a caller may act on (e.g. re-solve with shortages
//! enabled), so they are carried as data on [`crate::solution::SolveResult`]
//! rather than returned as `Err`.

use serde::{Deserialize, Serialize};

/// Outcome of a solve attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// The solver backend failed to run at all. The default, so
    /// `SolveResult::default()` never silently claims a solution exists.
    Error,
    /// Proven optimal within the configured MIP gap.
    Optimal,
    /// A feasible solution was found but optimality was not proven.
    Feasible,
    /// The model has no feasible solution.
    Infeasible,
    /// The model is unbounded.
    Unbounded,
    /// The solver stopped because the wall-clock time limit was reached.
    /// A feasible incumbent may still be present.
    TimeLimit,
}

impl Default for SolveStatus {
    fn default() -> Self {
        Self::Error
    }
}

impl SolveStatus {
    /// Whether a usable solution (schedule/shipments/etc) can be extracted.
    pub fn has_solution(&self) -> bool {
        matches!(self, Self::Optimal | Self::Feasible | Self::TimeLimit)
    }

    /// Whether this status proves optimality.
    pub fn is_optimal(&self) -> bool {
        matches!(self, Self::Optimal)
    }
}
