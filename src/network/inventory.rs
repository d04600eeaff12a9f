//! Initial inventory and the cost structure.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::product::ProductState;

/// A seed inventory entry, keyed by `(node, product, state, production_date?)`.
///
/// When `production_date` is `None`, the inventory is treated as the oldest
/// still-valid cohort for its state on the horizon start date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialInventoryEntry {
    /// Node holding this inventory.
    pub node: String,
    /// Product id.
    pub product: String,
    /// Storage state.
    pub state: ProductState,
    /// Production date seeding the cohort's age, if known.
    pub production_date: Option<NaiveDate>,
    /// Quantity, units.
    pub units: f64,
}

/// Per-state storage cost parameters for one node.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StorageCost {
    /// Per-unit-day holding cost (used when pallet tracking is off for this
    /// node/state).
    pub per_unit_day: f64,
    /// One-time cost charged per pallet brought into use.
    pub pallet_entry_cost: f64,
    /// Per-pallet-day holding cost.
    pub per_pallet_day: f64,
}

/// Cost parameters shared across the whole network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostStructure {
    /// Per-unit production cost, keyed by product id.
    pub production_cost_per_unit: std::collections::HashMap<String, f64>,
    /// Per-unit transport cost is carried on the leg itself
    /// ([`super::leg::Leg::cost_per_unit`]); nothing duplicated here.
    /// Per-`(node, state)` storage cost parameters.
    pub storage_cost: std::collections::HashMap<(String, ProductState), StorageCost>,
    /// Penalty charged per unit of unmet demand, when shortages are
    /// allowed.
    pub shortage_penalty_per_unit: f64,
}

impl CostStructure {
    /// Storage cost parameters for `(node, state)`, defaulting to zero
    /// when unspecified.
    pub fn storage_cost_for(&self, node: &str, state: ProductState) -> StorageCost {
        self.storage_cost
            .get(&(node.to_string(), state))
            .copied()
            .unwrap_or_default()
    }

    /// Per-unit production cost for a product, defaulting to zero.
    pub fn production_cost_for(&self, product: &str) -> f64 {
        self.production_cost_per_unit.get(product).copied().unwrap_or(0.0)
    }
}
