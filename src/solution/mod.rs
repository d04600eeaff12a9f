//! Solution Extractor (`C5`): pulls solved variable values into pure,
//! side-effect-free result structures.

pub mod extractor;
pub mod types;

pub use extractor::extract;
pub use types::{
    CostBreakdown, DemandOutcome, DemandOutcomeKey, InventoryTrajectoryKey, ProductionScheduleEntry,
    ShipmentEntry, SolveResult,
};
