//! Decision variable containers: the typed bridge between `C2`'s sparse
//! index sets and the `good_lp` model `C3` assembles over them.
//!
//! Every decision variable gets one `HashMap` here, keyed
//! by the same key type its index uses, so constraint code never has to
//! re-derive "does this variable exist" — it's a map lookup.

use std::collections::HashMap;

use chrono::NaiveDate;
use good_lp::{variable, ProblemVariables, Variable};

use crate::index::{CohortKey, DemandCohortKey, Indices, ProdKey, ShipmentKey, TruckKey};
use crate::network::{Network, ProductState};
use crate::solver::config::{PalletTrackingMode, PlannerConfig, TrackingMode};

/// `(node, date)` key shared by every labor-hours variable family (F3/F4).
pub type LaborKey = (String, NaiveDate);

/// Key for a `truck_load[k, dest, p, t]` variable: one column per stop a
/// truck serves on a given scheduled date (F9).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TruckLoadKey {
    /// Truck id.
    pub truck: String,
    /// Destination served on this stop.
    pub destination: String,
    /// Product id.
    pub product: String,
    /// Truck's scheduled departure date.
    pub date: NaiveDate,
}

/// Aggregate inventory cell for sliding-window mode: no `prod_date`
/// dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AggregateInventoryKey {
    /// Node holding this inventory.
    pub node: String,
    /// Product id.
    pub product: String,
    /// Storage state.
    pub state: ProductState,
    /// Date observed.
    pub date: NaiveDate,
}

/// Shelf-life-tracking-mode-specific inventory variables, behind the
/// `InventoryBalanceStrategy` seam (`SPEC_FULL` E.1.3 / E.2).
#[derive(Debug, Clone, Default)]
pub enum InventoryVariables {
    /// Age-cohort mode: one variable per `(node, product, prod_date,
    /// curr_date, state)` cell.
    Cohort(HashMap<CohortKey, Variable>),
    /// Sliding-window mode: one variable per `(node, product, state, date)`
    /// cell, no production-date dimension.
    #[default]
    Aggregate,
}

/// Demand-satisfaction variables, mode-specific in the same way.
#[derive(Debug, Clone, Default)]
pub enum DemandVariables {
    /// Age-cohort mode: one `demand_from_cohort` variable per eligible
    /// cohort (F7/F8).
    Cohort(HashMap<DemandCohortKey, Variable>),
    /// Sliding-window mode: one aggregate `demand_consumed` variable per
    /// forecast entry, with freshness enforced by a windowed inflow cap
    /// (F6) rather than per-cohort eligibility.
    #[default]
    Aggregate(HashMap<crate::network::forecast::ForecastKey, Variable>),
}

/// Every decision variable, keyed for `O(1)` lookup by
/// the constraint assembler and the solution extractor alike.
#[derive(Debug, Clone, Default)]
pub struct Variables {
    /// `production[n,p,d]`.
    pub production: HashMap<ProdKey, Variable>,
    /// `mix_count[n,p,d]`, present only when batch tracking is enabled.
    pub mix_count: HashMap<ProdKey, Variable>,
    /// `product_produced[n,p,d]`, present only when SKU binaries are
    /// enabled.
    pub product_produced: HashMap<ProdKey, Variable>,
    /// Inventory variables, mode-dependent.
    pub inventory: InventoryVariables,
    /// Aggregate inventory variables when in sliding-window mode (kept
    /// separate from the enum's payload so constraint code can index it
    /// directly without re-matching the enum on every access).
    pub aggregate_inventory: HashMap<AggregateInventoryKey, Variable>,
    /// `shipment_cohort[o,d,p,prod_d,deliv_d,s]`.
    pub shipment_cohort: HashMap<ShipmentKey, Variable>,
    /// Demand-satisfaction variables, mode-dependent.
    pub demand: DemandVariables,
    /// `shortage[dest,p,t]`, present only when `allow_shortages`.
    pub shortage: HashMap<crate::network::forecast::ForecastKey, Variable>,
    /// `truck_used[k,t]`.
    pub truck_used: HashMap<TruckKey, Variable>,
    /// `truck_load[k,dest,p,t]`.
    pub truck_load: HashMap<TruckLoadKey, Variable>,
    /// `labor_hours_used[n,t]`.
    pub labor_hours_used: HashMap<LaborKey, Variable>,
    /// `labor_hours_paid[n,t]`.
    pub labor_hours_paid: HashMap<LaborKey, Variable>,
    /// `fixed_hours_used[n,t]`.
    pub fixed_hours_used: HashMap<LaborKey, Variable>,
    /// `overtime_hours_used[n,t]`.
    pub overtime_hours_used: HashMap<LaborKey, Variable>,
    /// `uses_overtime[n,t]`.
    pub uses_overtime: HashMap<LaborKey, Variable>,
    /// Auxiliary epigraph variable for F3's `overhead(n,t)` term: the LP
    /// formulation of `max(0, changeover_hours * (distinct_products - 1))`.
    /// Not a decision variable in its own right — it's how the non-linear
    /// `max` in the overhead formula is expressed linearly.
    pub overhead_hours: HashMap<LaborKey, Variable>,
    /// Indicator that *some* product was produced at `(n,t)`, used by
    /// F4's non-fixed-day minimum-payment rule. Distinct from
    /// `product_produced`, which is per-SKU.
    pub any_production: HashMap<LaborKey, Variable>,
    /// `pallet_count[...]`, restricted to `(node, state)` pairs
    /// `PalletTrackingMode` selects. Age-cohort mode only (per the design
    /// Notes: pallet granularity is defined over cohort cells).
    pub pallet_count: HashMap<CohortKey, Variable>,
    /// Reverse lookup from a variable's `good_lp` name (the same strings
    /// built below) back to its handle, so [`crate::solver::warmstart`] can
    /// resolve a hint dictionary keyed by name without the caller needing
    /// to know this module's internal key types.
    pub names: HashMap<String, Variable>,
}

/// Build every decision variable, over the sparse
/// index sets `C2` already computed.
pub fn build(
    vars: &mut ProblemVariables,
    network: &Network,
    indices: &Indices,
    config: &PlannerConfig,
) -> Variables {
    let mut out = Variables::default();

    let max_daily_units = max_daily_capacity_units(network);

    for key in indices.prod.iter() {
        let production = vars.add(
            variable()
                .min(0.0)
                .max(max_daily_units)
                .name(format!("production[{},{},{}]", key.node, key.product, key.date)),
        );
        out.production.insert(key.clone(), production);

        if config.use_batch_tracking {
            let product = network.product(&key.product).expect("indexed product exists");
            let max_mixes = (max_daily_units / f64::from(product.units_per_mix)).ceil();
            let mix = vars.add(
                variable()
                    .integer()
                    .min(0.0)
                    .max(max_mixes)
                    .name(format!("mix_count[{},{},{}]", key.node, key.product, key.date)),
            );
            out.mix_count.insert(key.clone(), mix);
        }

        // `product_produced` always exists: F3's overhead formula needs the
        // distinct-SKU count regardless of whether binary enforcement (F2)
        // is switched on. `enforce_sku_binary` only controls its domain —
        // true binary vs. an LP-relaxed `[0, 1]` continuous stand-in — since
        // the source reports binary SKU enforcement as the single most
        // expensive integrality choice (Design Notes, >300s on CBC).
        let mut produced_def = variable()
            .min(0.0)
            .max(1.0)
            .name(format!("product_produced[{},{},{}]", key.node, key.product, key.date));
        if config.enforce_sku_binary {
            produced_def = produced_def.binary();
        }
        out.product_produced.insert(key.clone(), vars.add(produced_def));
    }

    match config.tracking_mode {
        TrackingMode::AgeCohort => {
            let mut cohort_vars = HashMap::with_capacity(indices.cohort.len());
            for key in indices.cohort.iter() {
                let max_units = max_cohort_units(network, &key.node, &key.product, max_daily_units);
                let var = vars.add(
                    variable()
                        .min(0.0)
                        .max(max_units)
                        .name(format!(
                            "inventory_cohort[{},{},{},{},{:?}]",
                            key.node, key.product, key.prod_date, key.curr_date, key.state
                        )),
                );
                cohort_vars.insert(key.clone(), var);
            }
            out.inventory = InventoryVariables::Cohort(cohort_vars);

            if !matches!(config.enable_pallet_tracking, PalletTrackingMode::Off) {
                for key in indices.pallet.cohort_keys(&indices.cohort) {
                    let max_pallets = (max_daily_units / f64::from(crate::units::UNITS_PER_PALLET)).ceil();
                    let var = vars.add(
                        variable()
                            .integer()
                            .min(0.0)
                            .max(max_pallets)
                            .name(format!(
                                "pallet_count[{},{},{},{},{:?}]",
                                key.node, key.product, key.prod_date, key.curr_date, key.state
                            )),
                    );
                    out.pallet_count.insert(key.clone(), var);
                }
            }

            let mut demand_vars = HashMap::with_capacity(indices.demand_cohort.len());
            for key in indices.demand_cohort.iter() {
                let demand_units = network.demand(&key.destination, &key.product, key.date).unwrap_or(0.0);
                let var = vars.add(
                    variable()
                        .min(0.0)
                        .max(demand_units)
                        .name(format!(
                            "demand_from_cohort[{},{},{},{},{:?}]",
                            key.destination, key.product, key.date, key.prod_date, key.state
                        )),
                );
                demand_vars.insert(key.clone(), var);
            }
            out.demand = DemandVariables::Cohort(demand_vars);
        }
        TrackingMode::SlidingWindow => {
            for node in network.nodes() {
                for state in crate::index::cohort::storable_states(node) {
                    for date in network.horizon().dates() {
                        for product in network.products() {
                            let max_units = max_cohort_units(network, &node.id, &product.id, max_daily_units);
                            let var = vars.add(
                                variable()
                                    .min(0.0)
                                    .max(max_units)
                                    .name(format!(
                                        "aggregate_inventory[{},{},{},{:?}]",
                                        node.id, product.id, date, state
                                    )),
                            );
                            out.aggregate_inventory.insert(
                                AggregateInventoryKey {
                                    node: node.id.clone(),
                                    product: product.id.clone(),
                                    state,
                                    date,
                                },
                                var,
                            );
                        }
                    }
                }
            }

            let mut demand_vars = HashMap::with_capacity(network.forecast_entries().count());
            for (key, entry) in network.forecast_entries() {
                let var = vars.add(
                    variable()
                        .min(0.0)
                        .max(entry.demand_units)
                        .name(format!("demand_consumed[{},{},{}]", key.destination, key.product, key.date)),
                );
                demand_vars.insert(key.clone(), var);
            }
            out.demand = DemandVariables::Aggregate(demand_vars);
        }
    }

    for key in indices.shipment.iter() {
        let max_units = network.trucks().map(|t| f64::from(t.capacity_units)).sum::<f64>().max(max_daily_units);
        let var = vars.add(
            variable()
                .min(0.0)
                .max(max_units)
                .name(format!(
                    "shipment_cohort[{},{},{},{},{},{:?}]",
                    key.origin, key.destination, key.product, key.prod_date, key.delivery_date, key.arrival_state
                )),
        );
        out.shipment_cohort.insert(key.clone(), var);
    }

    if config.allow_shortages {
        for (key, entry) in network.forecast_entries() {
            let var = vars.add(
                variable()
                    .min(0.0)
                    .max(entry.demand_units)
                    .name(format!("shortage[{},{},{}]", key.destination, key.product, key.date)),
            );
            out.shortage.insert(key.clone(), var);
        }
    }

    for key in indices.truck.iter() {
        let truck = network.trucks().find(|t| t.id == key.truck).expect("indexed truck exists");
        let used = vars.add(variable().binary().name(format!("truck_used[{},{}]", key.truck, key.date)));
        out.truck_used.insert(key.clone(), used);

        for (destination, _) in truck.all_destinations() {
            let load = vars.add(
                variable()
                    .min(0.0)
                    .max(f64::from(truck.capacity_units))
                    .name(format!("truck_load[{},{},{}]", key.truck, destination, key.date)),
            );
            for product in network.products() {
                out.truck_load.insert(
                    TruckLoadKey {
                        truck: key.truck.clone(),
                        destination: destination.clone(),
                        product: product.id.clone(),
                        date: key.date,
                    },
                    load,
                );
            }
        }
    }

    for node in network.nodes().filter(|n| n.capabilities.can_manufacture) {
        for date in network.horizon().dates() {
            let labor_day = network.labor_day(date).expect("validated at construction");
            let max_hours = labor_day.max_daily_hours().max(labor_day.min_payment_hours);
            let key: LaborKey = (node.id.clone(), date);

            out.labor_hours_used.insert(
                key.clone(),
                vars.add(variable().min(0.0).max(max_hours).name(format!("labor_hours_used[{},{}]", node.id, date))),
            );
            out.labor_hours_paid.insert(
                key.clone(),
                vars.add(variable().min(0.0).max(max_hours).name(format!("labor_hours_paid[{},{}]", node.id, date))),
            );
            out.fixed_hours_used.insert(
                key.clone(),
                vars.add(
                    variable()
                        .min(0.0)
                        .max(labor_day.fixed_hours)
                        .name(format!("fixed_hours_used[{},{}]", node.id, date)),
                ),
            );
            out.overtime_hours_used.insert(
                key.clone(),
                vars.add(
                    variable()
                        .min(0.0)
                        .max(labor_day.max_overtime_hours)
                        .name(format!("overtime_hours_used[{},{}]", node.id, date)),
                ),
            );
            out.uses_overtime.insert(
                key.clone(),
                vars.add(variable().binary().name(format!("uses_overtime[{},{}]", node.id, date))),
            );

            let max_overhead = node
                .manufacturing
                .as_ref()
                .map(|m| m.startup_hours + m.shutdown_hours + m.changeover_hours * network.products().count() as f64)
                .unwrap_or(0.0);
            out.overhead_hours.insert(
                key.clone(),
                vars.add(
                    variable()
                        .min(0.0)
                        .max(max_overhead.max(1.0))
                        .name(format!("overhead_hours[{},{}]", node.id, date)),
                ),
            );
            out.any_production.insert(
                key.clone(),
                vars.add(variable().binary().name(format!("any_production[{},{}]", node.id, date))),
            );
        }
    }

    index_names(&mut out);
    out
}

/// Populate [`Variables::names`] from every collection, mirroring the
/// `.name(...)` strings each variable was created with above. Built as a
/// single pass after construction rather than threaded through every
/// insertion site, since the hint-resolution path (warmstart) is the only
/// consumer and it only ever runs once per solve.
fn index_names(vars: &mut Variables) {
    let mut names = HashMap::new();

    for (key, &v) in &vars.production {
        names.insert(format!("production[{},{},{}]", key.node, key.product, key.date), v);
    }
    for (key, &v) in &vars.mix_count {
        names.insert(format!("mix_count[{},{},{}]", key.node, key.product, key.date), v);
    }
    for (key, &v) in &vars.product_produced {
        names.insert(format!("product_produced[{},{},{}]", key.node, key.product, key.date), v);
    }
    if let InventoryVariables::Cohort(cohort_vars) = &vars.inventory {
        for (key, &v) in cohort_vars {
            names.insert(
                format!(
                    "inventory_cohort[{},{},{},{},{:?}]",
                    key.node, key.product, key.prod_date, key.curr_date, key.state
                ),
                v,
            );
        }
    }
    for (key, &v) in &vars.aggregate_inventory {
        names.insert(
            format!("aggregate_inventory[{},{},{},{:?}]", key.node, key.product, key.date, key.state),
            v,
        );
    }
    for (key, &v) in &vars.shipment_cohort {
        names.insert(
            format!(
                "shipment_cohort[{},{},{},{},{},{:?}]",
                key.origin, key.destination, key.product, key.prod_date, key.delivery_date, key.arrival_state
            ),
            v,
        );
    }
    match &vars.demand {
        DemandVariables::Cohort(m) => {
            for (key, &v) in m {
                names.insert(
                    format!(
                        "demand_from_cohort[{},{},{},{},{:?}]",
                        key.destination, key.product, key.date, key.prod_date, key.state
                    ),
                    v,
                );
            }
        }
        DemandVariables::Aggregate(m) => {
            for (key, &v) in m {
                names.insert(format!("demand_consumed[{},{},{}]", key.destination, key.product, key.date), v);
            }
        }
    }
    for (key, &v) in &vars.shortage {
        names.insert(format!("shortage[{},{},{}]", key.destination, key.product, key.date), v);
    }
    for (key, &v) in &vars.truck_used {
        names.insert(format!("truck_used[{},{}]", key.truck, key.date), v);
    }
    for (key, &v) in &vars.truck_load {
        names.insert(format!("truck_load[{},{},{}]", key.truck, key.destination, key.date), v);
    }
    for (key, &v) in &vars.labor_hours_used {
        names.insert(format!("labor_hours_used[{},{}]", key.0, key.1), v);
    }
    for (key, &v) in &vars.labor_hours_paid {
        names.insert(format!("labor_hours_paid[{},{}]", key.0, key.1), v);
    }
    for (key, &v) in &vars.fixed_hours_used {
        names.insert(format!("fixed_hours_used[{},{}]", key.0, key.1), v);
    }
    for (key, &v) in &vars.overtime_hours_used {
        names.insert(format!("overtime_hours_used[{},{}]", key.0, key.1), v);
    }
    for (key, &v) in &vars.uses_overtime {
        names.insert(format!("uses_overtime[{},{}]", key.0, key.1), v);
    }
    for (key, &v) in &vars.overhead_hours {
        names.insert(format!("overhead_hours[{},{}]", key.0, key.1), v);
    }
    for (key, &v) in &vars.any_production {
        names.insert(format!("any_production[{},{}]", key.0, key.1), v);
    }
    for (key, &v) in &vars.pallet_count {
        names.insert(
            format!(
                "pallet_count[{},{},{},{},{:?}]",
                key.node, key.product, key.prod_date, key.curr_date, key.state
            ),
            v,
        );
    }

    vars.names = names;
}

/// An upper bound on daily production across the whole network, used as
/// the big-M in F2 and as a tight explicit bound elsewhere (F12): the
/// largest single day's physical throughput any manufacturing node could
/// produce.
fn max_daily_capacity_units(network: &Network) -> f64 {
    network
        .nodes()
        .filter_map(|n| n.manufacturing.as_ref())
        .map(|m| m.rate_units_per_hour * 24.0)
        .fold(0.0, f64::max)
        .max(1.0)
}

/// Upper bound for a single cohort cell: never more than one day's
/// capacity could have been produced into it, or more than total demand
/// for that product could ever require it to hold (the batch-size ceiling
/// note: cumulative-horizon bounds are far looser and slow branch and
/// bound).
fn max_cohort_units(network: &Network, _node: &str, product: &str, max_daily_units: f64) -> f64 {
    let max_demand = network
        .forecast_entries()
        .filter(|(k, _)| k.product == product)
        .map(|(_, v)| v.demand_units)
        .fold(0.0, f64::max);
    max_daily_units.max(max_demand).max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::builder::NetworkBuilder;
    use crate::network::labor::LaborDay;
    use crate::network::node::{ManufacturingParams, Node};
    use crate::network::product::Product;
    use chrono::NaiveDate;

    #[test]
    fn production_variables_built_per_prod_index_entry() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let network = NetworkBuilder::new(start, start)
            .product(Product::new("sku", 100))
            .node(Node::manufacturing(
                "plant",
                ManufacturingParams {
                    rate_units_per_hour: 1000.0,
                    startup_hours: 0.5,
                    shutdown_hours: 0.5,
                    changeover_hours: 0.25,
                },
            ))
            .labor_day(LaborDay::weekday(start, 20.0, 30.0))
            .build()
            .unwrap();

        let config = PlannerConfig::default();
        let indices = Indices::build(&network, &config.enable_pallet_tracking).unwrap();
        let mut vars = ProblemVariables::new();
        let built = build(&mut vars, &network, &indices, &config);

        assert_eq!(built.production.len(), indices.prod.len());
        assert_eq!(built.mix_count.len(), indices.prod.len());
    }
}
