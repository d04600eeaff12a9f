//! Solution Extractor (`C5`): pulls solved variable values
//! out of the `good_lp` model into the pure [`SolveResult`] structures.
//!
//! Follows the same `solution.value(var)` / `solution.eval(&expr)` idiom
//! the wider `good_lp` ecosystem uses to read a solved model back out
//! (e.g. `growth-rs`'s optimiser calling `solution.value(dv.placements[..])`
//! to decide which binaries fired). Every value is snapped through
//! [`round_tolerance`] before being stored, since a MIP solved to a
//! non-zero gap can return e.g. `0.999999998` for what is conceptually `1`.

use std::collections::HashMap;

use good_lp::Solution;

use crate::error::Result;
use crate::index::Indices;
use crate::network::Network;
use crate::objective::ObjectiveTerms;
use crate::solver::config::PlannerConfig;
use crate::solver::diagnostics::Diagnostic;
use crate::solver::status::SolveStatus;
use crate::variables::{DemandVariables, InventoryVariables, Variables};

use super::types::{
    CostBreakdown, DemandOutcome, DemandOutcomeKey, InventoryTrajectoryKey, ProductionScheduleEntry, ShipmentEntry,
    SolveResult,
};

/// Below this magnitude a solved value is treated as exactly zero (section
/// 4.3.5's tolerance rule).
const ZERO_FLOOR: f64 = 1e-6;

/// Snap `value` to the nearest integer when within `1e-6` of one, and to
/// zero when within `1e-6` of zero. Continuous quantities (units, hours,
/// costs) are left alone past that floor.
fn round_tolerance(value: f64) -> f64 {
    if value.abs() < ZERO_FLOOR {
        return 0.0;
    }
    let nearest = value.round();
    if (value - nearest).abs() < ZERO_FLOOR {
        nearest
    } else {
        value
    }
}

/// Pull every decision variable's solved value into a [`SolveResult`].
///
/// `result.status` and `result.solve_time_seconds` are set by the caller
/// ([`crate::solver::driver::solve`]) after this returns — this function
/// only ever sees a model that solved, so it has no status to report
/// beyond what it finds in the schedule itself.
pub fn extract(
    solution: &impl Solution,
    network: &Network,
    indices: &Indices,
    vars: &Variables,
    terms: &ObjectiveTerms,
    config: &PlannerConfig,
) -> Result<SolveResult> {
    let objective = round_tolerance(solution.eval(&terms.total()));
    let cost_breakdown = CostBreakdown {
        labor: round_tolerance(solution.eval(&terms.labor)),
        production: round_tolerance(solution.eval(&terms.production)),
        transport: round_tolerance(solution.eval(&terms.transport)),
        holding: round_tolerance(solution.eval(&terms.holding)),
        shortage: round_tolerance(solution.eval(&terms.shortage)),
    };

    let production_schedule = production_schedule(solution, indices, vars, config);
    let shipments = shipments(solution, indices, vars);
    let inventory_trajectory = inventory_trajectory(solution, indices, vars);
    let demand_outcomes = demand_outcomes(solution, network, indices, vars, config);

    let mut warnings = Vec::new();
    let shortage_count = demand_outcomes.values().filter(|o| o.shortage_units > 0.0).count();
    if shortage_count > 0 {
        warnings.push(Diagnostic::shortage_triggered(shortage_count));
    }
    warnings.push(Diagnostic::mip_gap(config.mip_gap()));

    Ok(SolveResult {
        status: SolveStatus::Optimal,
        objective,
        cost_breakdown,
        production_schedule,
        shipments,
        inventory_trajectory,
        demand_outcomes,
        solve_time_seconds: 0.0,
        mip_gap: config.mip_gap(),
        warnings,
    })
}

fn production_schedule(
    solution: &impl Solution,
    indices: &Indices,
    vars: &Variables,
    config: &PlannerConfig,
) -> Vec<ProductionScheduleEntry> {
    let mut rows = Vec::new();
    for key in indices.prod.iter() {
        let Some(&production_var) = vars.production.get(key) else { continue };
        let units = round_tolerance(solution.value(production_var));
        if units <= 0.0 {
            continue;
        }

        let mix_count = if config.use_batch_tracking {
            vars.mix_count.get(key).map(|&v| round_tolerance(solution.value(v)).max(0.0) as u64)
        } else {
            None
        };

        rows.push(ProductionScheduleEntry {
            node: key.node.clone(),
            product: key.product.clone(),
            date: key.date,
            units,
            mix_count,
        });
    }
    rows
}

fn shipments(solution: &impl Solution, indices: &Indices, vars: &Variables) -> Vec<ShipmentEntry> {
    let mut rows = Vec::new();
    for key in indices.shipment.iter() {
        let Some(&shipment_var) = vars.shipment_cohort.get(key) else { continue };
        let units = round_tolerance(solution.value(shipment_var));
        if units <= 0.0 {
            continue;
        }
        rows.push(ShipmentEntry {
            origin: key.origin.clone(),
            destination: key.destination.clone(),
            product: key.product.clone(),
            prod_date: key.prod_date,
            delivery_date: key.delivery_date,
            state: key.arrival_state,
            units,
        });
    }
    rows
}

fn inventory_trajectory(
    solution: &impl Solution,
    indices: &Indices,
    vars: &Variables,
) -> HashMap<InventoryTrajectoryKey, f64> {
    let mut trajectory: HashMap<InventoryTrajectoryKey, f64> = HashMap::new();

    match &vars.inventory {
        InventoryVariables::Cohort(cohort_vars) => {
            for key in indices.cohort.iter() {
                let Some(&cohort_var) = cohort_vars.get(key) else { continue };
                let units = round_tolerance(solution.value(cohort_var));
                if units <= 0.0 {
                    continue;
                }
                let trajectory_key = InventoryTrajectoryKey {
                    node: key.node.clone(),
                    product: key.product.clone(),
                    state: key.state,
                    date: key.curr_date,
                };
                *trajectory.entry(trajectory_key).or_insert(0.0) += units;
            }
        }
        InventoryVariables::Aggregate => {
            for (key, &agg_var) in &vars.aggregate_inventory {
                let units = round_tolerance(solution.value(agg_var));
                if units <= 0.0 {
                    continue;
                }
                trajectory.insert(
                    InventoryTrajectoryKey {
                        node: key.node.clone(),
                        product: key.product.clone(),
                        state: key.state,
                        date: key.date,
                    },
                    units,
                );
            }
        }
    }

    trajectory
}

fn demand_outcomes(
    solution: &impl Solution,
    network: &Network,
    indices: &Indices,
    vars: &Variables,
    config: &PlannerConfig,
) -> HashMap<DemandOutcomeKey, DemandOutcome> {
    let mut outcomes = HashMap::new();

    for (forecast_key, entry) in network.forecast_entries() {
        let satisfied_units = round_tolerance(satisfied_for(solution, indices, vars, forecast_key));
        let shortage_units = if config.allow_shortages {
            vars.shortage.get(forecast_key).map(|&v| round_tolerance(solution.value(v))).unwrap_or(0.0)
        } else {
            (entry.demand_units - satisfied_units).max(0.0)
        };

        outcomes.insert(
            DemandOutcomeKey {
                destination: forecast_key.destination.clone(),
                product: forecast_key.product.clone(),
                date: forecast_key.date,
            },
            DemandOutcome {
                demand_units: entry.demand_units,
                satisfied_units,
                shortage_units,
            },
        );
    }

    outcomes
}

fn satisfied_for(
    solution: &impl Solution,
    indices: &Indices,
    vars: &Variables,
    forecast_key: &crate::network::forecast::ForecastKey,
) -> f64 {
    match &vars.demand {
        DemandVariables::Cohort(cohort_vars) => indices
            .demand_cohort
            .eligible_for(&forecast_key.destination, &forecast_key.product, forecast_key.date)
            .filter_map(|key| cohort_vars.get(key))
            .map(|&v| solution.value(v))
            .sum(),
        DemandVariables::Aggregate(agg_vars) => {
            agg_vars.get(forecast_key).map(|&v| solution.value(v)).unwrap_or(0.0)
        }
    }
}
