//! Solver ambient stack: configuration, budgets, status, diagnostics,
//! warmstart application, and the solve driver itself (C4).

pub mod budgets;
pub mod config;
pub mod diagnostics;
pub mod driver;
pub mod status;
pub mod warmstart;

pub use budgets::SolveBudgets;
pub use config::{PalletTrackingMode, PlannerConfig, PlannerConfigBuilder, SolverChoice, TrackingMode};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use driver::solve;
pub use status::SolveStatus;
pub use warmstart::{WarmstartHints, WarmstartReport};
