//! Objective & Solver Driver's cost half (`C4`): builds the
//! five cost-category expressions and their sum, the single `Expression`
//! `good_lp`'s `minimise` takes.
//!
//! Each category is returned individually, not just pre-summed, so
//! [`crate::solution::extractor`] can re-evaluate them against the solved
//! variable values for [`crate::solution::CostBreakdown`] — the same
//! `solution.eval(&expr)` pattern the wider ecosystem uses to report
//! per-category totals after a `good_lp` solve.

use good_lp::Expression;

use crate::index::Indices;
use crate::network::{Network, ProductState};
use crate::solver::config::{PalletTrackingMode, TrackingMode};
use crate::variables::{InventoryVariables, Variables};

/// The five cost-category expressions plus their sum.
#[derive(Clone)]
pub struct ObjectiveTerms {
    /// F4's labor cost.
    pub labor: Expression,
    /// Per-unit production cost.
    pub production: Expression,
    /// Per-unit transport cost.
    pub transport: Expression,
    /// Holding cost (per-unit or per-pallet-day, depending on tracking mode).
    pub holding: Expression,
    /// Shortage penalty.
    pub shortage: Expression,
}

impl ObjectiveTerms {
    /// The combined objective `good_lp::ProblemVariables::minimise` takes.
    pub fn total(&self) -> Expression {
        self.labor.clone() + self.production.clone() + self.transport.clone() + self.holding.clone() + self.shortage.clone()
    }
}

/// Build every cost-category expression over `network`'s decision
/// variables.
pub fn build(network: &Network, indices: &Indices, vars: &Variables) -> ObjectiveTerms {
    ObjectiveTerms {
        labor: labor_cost(network, vars),
        production: production_cost(network, indices, vars),
        transport: transport_cost(network, vars),
        holding: holding_cost(network, indices, vars),
        shortage: shortage_cost(network, vars),
    }
}

fn labor_cost(network: &Network, vars: &Variables) -> Expression {
    let mut total = Expression::from(0.0);
    for node in network.nodes().filter(|n| n.capabilities.can_manufacture) {
        for date in network.horizon().dates() {
            let key = (node.id.clone(), date);
            let labor_day = match network.labor_day(date) {
                Ok(d) => d,
                Err(_) => continue,
            };

            if labor_day.is_fixed_day {
                if let (Some(&fixed), Some(&overtime)) = (vars.fixed_hours_used.get(&key), vars.overtime_hours_used.get(&key)) {
                    total += labor_day.regular_rate * fixed + labor_day.overtime_rate * overtime;
                }
            } else if let Some(&paid) = vars.labor_hours_paid.get(&key) {
                total += labor_day.non_fixed_rate * paid;
            }
        }
    }
    total
}

fn production_cost(network: &Network, indices: &Indices, vars: &Variables) -> Expression {
    let mut total = Expression::from(0.0);
    for key in indices.prod.iter() {
        if let Some(&production) = vars.production.get(key) {
            let cost = network.cost_structure().production_cost_for(&key.product);
            total += cost * production;
        }
    }
    total
}

fn transport_cost(network: &Network, vars: &Variables) -> Expression {
    let mut total = Expression::from(0.0);
    for (key, &shipped) in vars.shipment_cohort.iter() {
        let leg = network
            .legs_from(&key.origin)
            .find(|l| l.destination == key.destination && matches_arrival(network, l, key.arrival_state));
        if let Some(leg) = leg {
            total += leg.cost_per_unit * shipped;
        }
    }
    total
}

fn matches_arrival(network: &Network, leg: &crate::network::Leg, arrival_state: ProductState) -> bool {
    network
        .node(&leg.destination)
        .map(|dest| leg.arrival_state(dest) == arrival_state)
        .unwrap_or(false)
}

fn holding_cost(network: &Network, indices: &Indices, vars: &Variables) -> Expression {
    let mut total = Expression::from(0.0);

    match &vars.inventory {
        InventoryVariables::Cohort(cohort_vars) => {
            for key in indices.cohort.iter() {
                let Some(&units) = cohort_vars.get(key) else { continue };
                let storage = network.cost_structure().storage_cost_for(&key.node, key.state);

                if indices.pallet.tracks(&key.node, key.state) {
                    if let Some(&pallets) = vars.pallet_count.get(key) {
                        total += storage.per_pallet_day * pallets;
                        // A cohort's pallet_count only ever falls across its
                        // lifetime (nothing replenishes an existing cohort),
                        // so its whole Δpallet_count (F11) lands on the
                        // cohort's birth day — charge the one-time entry
                        // cost there and nowhere else.
                        if key.prod_date == key.curr_date {
                            total += storage.pallet_entry_cost * pallets;
                        }
                    }
                } else {
                    total += storage.per_unit_day * units;
                }
            }
        }
        InventoryVariables::Aggregate => {
            for (key, &units) in vars.aggregate_inventory.iter() {
                let storage = network.cost_structure().storage_cost_for(&key.node, key.state);
                total += storage.per_unit_day * units;
            }
        }
    }

    total
}

fn shortage_cost(network: &Network, vars: &Variables) -> Expression {
    let penalty = network.cost_structure().shortage_penalty_per_unit;
    vars.shortage
        .values()
        .fold(Expression::from(0.0), |acc, &v| acc + penalty * v)
}

/// Whether `config`'s tracking mode has any bearing on objective assembly
/// beyond the variable shapes already baked into `vars` — kept as a
/// visible seam for callers that branch on mode explicitly, even though
/// `build` itself only ever reads through `vars.inventory`.
pub fn uses_pallet_holding(mode: &PalletTrackingMode) -> bool {
    !matches!(mode, PalletTrackingMode::Off)
}

/// Whether sliding-window mode is active, a convenience re-export for
/// callers assembling diagnostics alongside the objective.
pub fn is_sliding_window(mode: TrackingMode) -> bool {
    matches!(mode, TrackingMode::SlidingWindow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::builder::NetworkBuilder;
    use crate::network::inventory::StorageCost;
    use crate::network::labor::LaborDay;
    use crate::network::node::{ManufacturingParams, Node};
    use crate::network::product::Product;
    use crate::solver::config::PlannerConfig;
    use chrono::NaiveDate;

    #[test]
    fn objective_terms_sum_matches_total() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let network = NetworkBuilder::new(start, start)
            .product(Product::new("sku", 10))
            .node(Node::manufacturing(
                "plant",
                ManufacturingParams {
                    rate_units_per_hour: 100.0,
                    startup_hours: 0.1,
                    shutdown_hours: 0.1,
                    changeover_hours: 0.1,
                },
            ))
            .node(Node::destination("spoke"))
            .demand("spoke", "sku", start, 40.0)
            .production_cost("sku", 2.0)
            .storage_cost("plant", crate::network::ProductState::Ambient, StorageCost { per_unit_day: 0.1, ..Default::default() })
            .labor_day(LaborDay::weekday(start, 20.0, 30.0))
            .build()
            .unwrap();

        let config = PlannerConfig::default();
        let indices = Indices::build(&network, &config.enable_pallet_tracking).unwrap();
        let mut problem_vars = good_lp::ProblemVariables::new();
        let built = crate::variables::build(&mut problem_vars, &network, &indices, &config);

        let terms = build(&network, &indices, &built);
        // The combined total is literally the sum of the five categories;
        // this just exercises that `total()` doesn't panic or diverge from
        // its own definition.
        let _ = terms.total();
    }
}
