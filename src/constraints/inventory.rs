//! F5 (cohort-mode flow conservation) and F6 (sliding-window shelf-life).
//!
//! This is the core invariant: for every inventory cell,
//! inflows plus starting inventory equal outflows plus ending inventory
//! plus demand consumed. Section 9's hub lesson applies directly here —
//! every node is checked for outbound legs and demand by membership
//! (`legs_from`, `has_demand`), never by a "destination-only"/"transit-only"
//! type distinction.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use good_lp::{constraint, Expression, SolverModel};

use crate::index::{CohortKey, DemandCohortKey, Indices, ShipmentKey};
use crate::network::shelf_life::{shelf_life_days, MIN_REMAINING_SHELF_LIFE_DAYS};
use crate::network::{Network, ProductState};
use crate::solver::config::{PlannerConfig, TrackingMode};
use crate::variables::{AggregateInventoryKey, DemandVariables, Variables};

/// Add F5 (age-cohort) or the aggregate balance + F6 (sliding-window)
/// constraints, depending on `config.tracking_mode`.
pub fn add<P: SolverModel>(model: P, network: &Network, indices: &Indices, vars: &Variables, config: &PlannerConfig) -> P {
    match config.tracking_mode {
        TrackingMode::AgeCohort => add_cohort_balance(model, network, indices, vars),
        TrackingMode::SlidingWindow => {
            let model = add_aggregate_balance(model, network, vars);
            if config.enforce_shelf_life {
                add_sliding_window_freshness(model, network, vars)
            } else {
                model
            }
        }
    }
}

/// Seed quantities for `(node, product, state, prod_date)` cohorts that
/// exist on day one of the horizon, per `InitialInventory`
/// contract: an explicit `production_date` seeds that exact cohort;
/// omitted, it is folded into the oldest still-valid cohort for that
/// `(node, product, state)` as of the horizon start.
fn initial_inventory_by_cohort(network: &Network, indices: &Indices) -> HashMap<CohortKey, f64> {
    let horizon_start = network.horizon().start;
    let mut grouped: HashMap<(String, String, ProductState), Vec<&crate::network::InitialInventoryEntry>> = HashMap::new();
    for entry in network.initial_inventory() {
        grouped
            .entry((entry.node.clone(), entry.product.clone(), entry.state))
            .or_default()
            .push(entry);
    }

    let mut out = HashMap::new();
    for ((node, product, state), entries) in grouped {
        let oldest = indices
            .cohort
            .iter()
            .filter(|k| k.node == node && k.product == product && k.state == state && k.curr_date == horizon_start)
            .map(|k| k.prod_date)
            .min();

        for entry in entries {
            let prod_date = entry.production_date.or(oldest);
            if let Some(prod_date) = prod_date {
                let key = CohortKey {
                    node: node.clone(),
                    product: product.clone(),
                    prod_date,
                    curr_date: horizon_start,
                    state,
                };
                *out.entry(key).or_insert(0.0) += entry.units;
            }
        }
    }
    out
}

fn add_cohort_balance<P: SolverModel>(mut model: P, network: &Network, indices: &Indices, vars: &Variables) -> P {
    let cohort_vars = match &vars.inventory {
        crate::variables::InventoryVariables::Cohort(m) => m,
        crate::variables::InventoryVariables::Aggregate => return model,
    };
    let initial = initial_inventory_by_cohort(network, indices);
    let horizon_start = network.horizon().start;
    let demand_vars = match &vars.demand {
        DemandVariables::Cohort(m) => Some(m),
        DemandVariables::Aggregate(_) => None,
    };

    let mut count = 0usize;
    for key in indices.cohort.iter() {
        let this_var = cohort_vars[key];

        // Starting inventory: the same cohort one day earlier, or the
        // seeded initial-inventory quantity on day one, or zero if this
        // cohort is born today (prod_date == curr_date).
        let prior: Expression = if key.curr_date > horizon_start {
            let prior_key = CohortKey {
                curr_date: key.curr_date - Duration::days(1),
                ..key.clone()
            };
            cohort_vars.get(&prior_key).map(|&v| Expression::from(v)).unwrap_or_else(|| Expression::from(0.0))
        } else {
            Expression::from(initial.get(key).copied().unwrap_or(0.0))
        };

        // Production only ever lands as ambient inventory, born the same
        // day it is produced.
        let production_into: Expression = if key.state == ProductState::Ambient && key.prod_date == key.curr_date {
            let prod_key = crate::index::ProdKey {
                node: key.node.clone(),
                product: key.product.clone(),
                date: key.curr_date,
            };
            vars.production.get(&prod_key).map(|&v| Expression::from(v)).unwrap_or_else(|| Expression::from(0.0))
        } else {
            Expression::from(0.0)
        };

        // Arrivals: inbound legs landing on `curr_date` in this state.
        // `ShipmentKey::prod_date` always carries the *original* production
        // date, regardless of arrival state — but thawing re-anchors the
        // destination cohort's age clock (`CohortKey` doc comment), so a
        // freshly-thawed cohort (`prod_date == curr_date`, the thaw day)
        // absorbs every thawed arrival that day irrespective of the
        // shipment's original `prod_date`. A non-thawed cohort only
        // absorbs shipments whose own `prod_date` matches it exactly, and
        // an *aged* thawed cohort (`prod_date < curr_date`, already past
        // its thaw day) never receives new arrivals — only the day-one
        // carry-forward below ages it.
        let mut arrivals = Expression::from(0.0);
        for leg in network.legs_to(&key.node) {
            let destination = match network.node(&leg.destination) {
                Ok(n) => n,
                Err(_) => continue,
            };
            let arrival_state = leg.arrival_state(destination);
            if arrival_state != key.state {
                continue;
            }
            if arrival_state == ProductState::Thawed {
                if key.prod_date != key.curr_date {
                    continue;
                }
                for (shipment_key, &v) in vars.shipment_cohort.iter() {
                    if shipment_key.origin == leg.origin
                        && shipment_key.destination == key.node
                        && shipment_key.product == key.product
                        && shipment_key.delivery_date == key.curr_date
                        && shipment_key.arrival_state == ProductState::Thawed
                    {
                        arrivals += v;
                    }
                }
            } else {
                let shipment_key = ShipmentKey {
                    origin: leg.origin.clone(),
                    destination: key.node.clone(),
                    product: key.product.clone(),
                    prod_date: key.prod_date,
                    delivery_date: key.curr_date,
                    arrival_state,
                };
                if let Some(&v) = vars.shipment_cohort.get(&shipment_key) {
                    arrivals += v;
                }
            }
        }

        // Departures: outbound legs leaving `node` on `curr_date` from
        // this cohort's state.
        let mut departures = Expression::from(0.0);
        for leg in network.legs_from(&key.node) {
            if leg.departure_state != key.state {
                continue;
            }
            let delivery_date = key.curr_date + Duration::days(i64::from(leg.transit_days));
            let destination = match network.node(&leg.destination) {
                Ok(n) => n,
                Err(_) => continue,
            };
            let arrival_state = leg.arrival_state(destination);
            let shipment_key = ShipmentKey {
                origin: key.node.clone(),
                destination: leg.destination.clone(),
                product: key.product.clone(),
                prod_date: key.prod_date,
                delivery_date,
                arrival_state,
            };
            if let Some(&v) = vars.shipment_cohort.get(&shipment_key) {
                departures += v;
            }
        }

        // Demand consumed: only at destinations, only from this exact
        // cohort.
        let demand_consumed: Expression = if let Some(demand_vars) = demand_vars {
            let node = network.node(&key.node).expect("indexed node exists");
            if node.capabilities.has_demand {
                let demand_key = DemandCohortKey {
                    destination: key.node.clone(),
                    product: key.product.clone(),
                    date: key.curr_date,
                    prod_date: key.prod_date,
                    state: key.state,
                };
                demand_vars.get(&demand_key).map(|&v| Expression::from(v)).unwrap_or_else(|| Expression::from(0.0))
            } else {
                Expression::from(0.0)
            }
        } else {
            Expression::from(0.0)
        };

        model = model.with(constraint!(
            this_var == prior + production_into + arrivals - departures - demand_consumed
        ));
        count += 1;
    }

    tracing::trace!(cohort_balance_constraints = count, "F5 flow conservation assembled");
    model
}

fn add_aggregate_balance<P: SolverModel>(mut model: P, network: &Network, vars: &Variables) -> P {
    let horizon_start = network.horizon().start;
    let mut count = 0usize;

    for node in network.nodes() {
        for state in crate::index::cohort::storable_states(node) {
            for date in network.horizon().dates() {
                for product in network.products() {
                    let key = AggregateInventoryKey {
                        node: node.id.clone(),
                        product: product.id.clone(),
                        state,
                        date,
                    };
                    let this_var = match vars.aggregate_inventory.get(&key) {
                        Some(&v) => v,
                        None => continue,
                    };

                    let prior: Expression = if date > horizon_start {
                        let prior_key = AggregateInventoryKey {
                            date: date - Duration::days(1),
                            ..key.clone()
                        };
                        vars.aggregate_inventory
                            .get(&prior_key)
                            .map(|&v| Expression::from(v))
                            .unwrap_or_else(|| Expression::from(0.0))
                    } else {
                        let seed: f64 = network
                            .initial_inventory()
                            .filter(|e| e.node == node.id && e.product == product.id && e.state == state)
                            .map(|e| e.units)
                            .sum();
                        Expression::from(seed)
                    };

                    let production_into: Expression = if state == ProductState::Ambient {
                        let prod_key = crate::index::ProdKey {
                            node: node.id.clone(),
                            product: product.id.clone(),
                            date,
                        };
                        vars.production.get(&prod_key).map(|&v| Expression::from(v)).unwrap_or_else(|| Expression::from(0.0))
                    } else {
                        Expression::from(0.0)
                    };

                    let mut arrivals = Expression::from(0.0);
                    for leg in network.legs_to(&node.id) {
                        let dest = match network.node(&leg.destination) {
                            Ok(n) => n,
                            Err(_) => continue,
                        };
                        if leg.arrival_state(dest) != state {
                            continue;
                        }
                        // Aggregate mode has no production-date dimension;
                        // sum over every shipment landing here today in
                        // this state, regardless of which day it departed.
                        for shipment_key in vars.shipment_cohort.keys().filter(|k| {
                            k.destination == node.id && k.product == product.id && k.delivery_date == date && k.arrival_state == state
                        }) {
                            arrivals += vars.shipment_cohort[shipment_key];
                        }
                    }

                    let mut departures = Expression::from(0.0);
                    for leg in network.legs_from(&node.id) {
                        if leg.departure_state != state {
                            continue;
                        }
                        let delivery_date = date + Duration::days(i64::from(leg.transit_days));
                        let dest = match network.node(&leg.destination) {
                            Ok(n) => n,
                            Err(_) => continue,
                        };
                        let arrival_state = leg.arrival_state(dest);
                        for shipment_key in vars.shipment_cohort.keys().filter(|k| {
                            k.origin == node.id
                                && k.destination == leg.destination
                                && k.product == product.id
                                && k.delivery_date == delivery_date
                                && k.arrival_state == arrival_state
                        }) {
                            departures += vars.shipment_cohort[shipment_key];
                        }
                    }

                    let demand_consumed: Expression = if node.capabilities.has_demand && state == primary_demand_state(node) {
                        let forecast_key = crate::network::ForecastKey {
                            destination: node.id.clone(),
                            product: product.id.clone(),
                            date,
                        };
                        match &vars.demand {
                            DemandVariables::Aggregate(m) => m.get(&forecast_key).map(|&v| Expression::from(v)).unwrap_or_else(|| Expression::from(0.0)),
                            DemandVariables::Cohort(_) => Expression::from(0.0),
                        }
                    } else {
                        Expression::from(0.0)
                    };

                    model = model.with(constraint!(
                        this_var == prior + production_into + arrivals - departures - demand_consumed
                    ));
                    count += 1;
                }
            }
        }
    }

    tracing::trace!(aggregate_balance_constraints = count, "aggregate flow conservation assembled");
    model
}

/// Which state a node's aggregate demand is assumed to draw from, in
/// sliding-window mode: thawed if the node converts arriving frozen
/// shipments, else ambient. Sliding-window mode already gives up
/// per-cohort traceability; this resolves the one
/// remaining ambiguity — which state a demand node draws down — the same
/// way, by a single per-node rule rather than a per-demand-cell choice.
fn primary_demand_state(node: &crate::network::Node) -> ProductState {
    if node.capabilities.can_thaw_on_arrival {
        ProductState::Thawed
    } else {
        ProductState::Ambient
    }
}

/// F6: demand consumed at a destination in the trailing freshness window
/// `[floor(t), t]` must not exceed production, at any manufacturing site,
/// in that same window pushed further back by the network's maximum
/// transit time (production dated `d` can only have arrived by `t` if
/// `d + transit <= t`; using the network-wide maximum transit keeps the
/// constraint conservative rather than wrong for any specific route).
/// One constraint per `(destination, product, date)` — the window floor
/// depends on which state the destination draws from ([`primary_demand_state`]),
/// which a single per-`(product, date)` constraint could not express for a
/// network mixing ambient and thaw-capable destinations.
fn add_sliding_window_freshness<P: SolverModel>(mut model: P, network: &Network, vars: &Variables) -> P {
    let demand_vars = match &vars.demand {
        DemandVariables::Aggregate(m) => m,
        DemandVariables::Cohort(_) => return model,
    };
    let horizon_start = network.horizon().start;
    let max_transit = i64::from(network.max_transit_days());
    let mut count = 0usize;

    for destination in network.nodes().filter(|n| n.capabilities.has_demand) {
        let state = primary_demand_state(destination);
        let window_days = (shelf_life_days(state) - MIN_REMAINING_SHELF_LIFE_DAYS).max(0);

        for product in network.products() {
            for t in network.horizon().dates() {
                let demand_key = crate::network::ForecastKey {
                    destination: destination.id.clone(),
                    product: product.id.clone(),
                    date: t,
                };
                let demand_in_window = match demand_vars.get(&demand_key) {
                    Some(&v) => Expression::from(v),
                    None => continue,
                };

                let floor = (t - Duration::days(window_days + max_transit)).max(horizon_start);
                let production_ceiling = t - Duration::days(max_transit.max(0));

                let mut production_in_window = Expression::from(0.0);
                for node in network.nodes().filter(|n| n.capabilities.can_manufacture) {
                    let mut d = floor;
                    while d <= production_ceiling {
                        let prod_key = crate::index::ProdKey {
                            node: node.id.clone(),
                            product: product.id.clone(),
                            date: d,
                        };
                        if let Some(&v) = vars.production.get(&prod_key) {
                            production_in_window += v;
                        }
                        d += Duration::days(1);
                    }
                }

                model = model.with(constraint!(demand_in_window <= production_in_window));
                count += 1;
            }
        }
    }

    tracing::trace!(sliding_window_constraints = count, "F6 sliding-window freshness assembled");
    model
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::Indices;
    use crate::network::builder::NetworkBuilder;
    use crate::network::labor::LaborDay;
    use crate::network::node::{ManufacturingParams, Node};
    use crate::network::product::Product;
    use crate::solver::config::PlannerConfig;
    use good_lp::ProblemVariables;

    #[test]
    fn cohort_balance_assembles_one_constraint_per_cohort() {
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
        let mut problem_vars = ProblemVariables::new();
        let built = crate::variables::build(&mut problem_vars, &network, &indices, &config);

        // Exercising the constraint builder should not panic when wired up
        // against a real (tiny) model.
        let model = problem_vars.minimise(Expression::from(0.0)).using(good_lp::solvers::highs::highs);
        let _model = add_cohort_balance(model, &network, &indices, &built);
    }
}
