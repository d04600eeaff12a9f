//! Result types produced by the solution extractor (`C5`).
//!
//! These are pure values: once built, a [`SolveResult`] holds no reference
//! back into the solver model, following the inventory lifecycle contract.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::network::ProductState;
use crate::solver::{Diagnostic, SolveStatus};

/// One row of the production schedule: positive production only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionScheduleEntry {
    /// Manufacturing node id.
    pub node: String,
    /// Product id.
    pub product: String,
    /// Production date.
    pub date: NaiveDate,
    /// Units produced.
    pub units: f64,
    /// Number of mix batches, when batch tracking is enabled.
    pub mix_count: Option<u64>,
}

/// One row of the shipment plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentEntry {
    /// Origin node id.
    pub origin: String,
    /// Destination node id.
    pub destination: String,
    /// Product id.
    pub product: String,
    /// Production date of the shipped cohort.
    pub prod_date: NaiveDate,
    /// Delivery date.
    pub delivery_date: NaiveDate,
    /// State the shipment arrives in.
    pub state: ProductState,
    /// Units shipped.
    pub units: f64,
}

/// Key identifying one inventory-trajectory cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InventoryTrajectoryKey {
    /// Node holding this inventory.
    pub node: String,
    /// Product id.
    pub product: String,
    /// Storage state.
    pub state: ProductState,
    /// Date observed.
    pub date: NaiveDate,
}

/// Per-category cost totals. Sums to the reported objective within `1e-2`
/// (a boundary-behavior invariant: zero demand must cost nothing).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Labor cost (F4).
    pub labor: f64,
    /// Production cost.
    pub production: f64,
    /// Transport cost.
    pub transport: f64,
    /// Holding cost (per-unit and per-pallet variants combined).
    pub holding: f64,
    /// Shortage penalty.
    pub shortage: f64,
}

impl CostBreakdown {
    /// Sum of every category.
    pub fn total(&self) -> f64 {
        self.labor + self.production + self.transport + self.holding + self.shortage
    }
}

/// Fill-rate outcome for a single forecast entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandOutcome {
    /// Destination node id is implied by the caller's forecast key; not
    /// duplicated here to keep this a flat numeric row.
    pub demand_units: f64,
    /// Units actually satisfied from eligible cohorts.
    pub satisfied_units: f64,
    /// Units left unmet (zero unless shortages are allowed).
    pub shortage_units: f64,
}

impl DemandOutcome {
    /// Fraction of demand satisfied, in `[0, 1]`. `1.0` for a zero-demand
    /// entry (boundary behavior: zero demand must cost nothing).
    pub fn fill_rate(&self) -> f64 {
        if self.demand_units <= 0.0 {
            1.0
        } else {
            (self.satisfied_units / self.demand_units).clamp(0.0, 1.0)
        }
    }
}

/// Key for a [`DemandOutcome`] row, mirroring [`crate::network::forecast::ForecastKey`]
/// without borrowing from the network.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DemandOutcomeKey {
    /// Destination node id.
    pub destination: String,
    /// Product id.
    pub product: String,
    /// Demand date.
    pub date: NaiveDate,
}

/// The full result of one `solve()` call (section 6.2).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolveResult {
    /// Solve outcome.
    pub status: SolveStatus,
    /// Objective value reported by the solver. `0.0` when no solution was
    /// extracted.
    pub objective: f64,
    /// Per-category cost totals.
    pub cost_breakdown: CostBreakdown,
    /// Production schedule, positive entries only.
    pub production_schedule: Vec<ProductionScheduleEntry>,
    /// Shipment plan.
    pub shipments: Vec<ShipmentEntry>,
    /// Inventory trajectory, keyed by `(node, product, state, date)`.
    pub inventory_trajectory: std::collections::HashMap<InventoryTrajectoryKey, f64>,
    /// Demand outcomes, keyed by forecast entry.
    pub demand_outcomes: std::collections::HashMap<DemandOutcomeKey, DemandOutcome>,
    /// Wall-clock solve time, seconds.
    pub solve_time_seconds: f64,
    /// Final relative MIP gap reported by the solver.
    pub mip_gap: f64,
    /// Accumulated diagnostics (warnings), never raised as errors.
    pub warnings: Vec<Diagnostic>,
}

impl SolveResult {
    /// An empty result carrying only a terminal status, for the
    /// infeasible/unbounded/error paths where no schedule is extracted.
    pub fn empty(status: SolveStatus) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }
}
