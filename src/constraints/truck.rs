//! F9 (truck scheduling/capacity) and F10 (D-1/D0 loading timing).
//!
//! A `truck_load` variable is tied to its covering leg's shipment flow by
//! an exact equality rather than a capacity-only inequality: the
//! network model treats `Leg`/`Truck` as two views of the same physical
//! route (a `Truck::Stop` always rides a `Leg` between the same origin and
//! destination), so the truck is simply the vehicle realizing that leg's
//! flow on its scheduled date — nothing is lost by requiring them equal.

use chrono::Duration;
use good_lp::{constraint, Expression, SolverModel};

use crate::index::{Indices, ShipmentKey};
use crate::network::{Departure, Network};
use crate::variables::{TruckLoadKey, Variables};

/// Add F9 (capacity + load linkage) and F10 (timing) for every scheduled
/// truck run.
pub fn add<P: SolverModel>(mut model: P, network: &Network, indices: &Indices, vars: &Variables) -> P {
    let mut capacity_count = 0usize;
    let mut linkage_count = 0usize;

    for key in indices.truck.iter() {
        let truck = network.trucks().find(|t| t.id == key.truck).expect("indexed truck exists");
        let truck_used = vars.truck_used[key];

        // F9 capacity: total load across every stop and product this truck
        // carries on this date cannot exceed its capacity, and is zero
        // unless the truck is actually used.
        let mut total_load = Expression::from(0.0);
        for (destination, _) in truck.all_destinations() {
            for product in network.products() {
                let load_key = TruckLoadKey {
                    truck: key.truck.clone(),
                    destination: destination.clone(),
                    product: product.id.clone(),
                    date: key.date,
                };
                if let Some(&load) = vars.truck_load.get(&load_key) {
                    total_load += load;
                }
            }
        }
        model = model.with(constraint!(total_load <= f64::from(truck.capacity_units) * truck_used));
        capacity_count += 1;

        // F10 + linkage: each stop's per-product load equals the shipment
        // volume on the matching leg, restricted to the production dates
        // this departure class is allowed to load.
        for (destination, _) in truck.all_destinations() {
            let leg = match network
                .legs_from(&truck.origin)
                .find(|l| l.destination == destination)
            {
                Some(l) => l,
                None => continue,
            };
            let delivery_date = key.date + Duration::days(i64::from(leg.transit_days));
            let arrival_state = match network.node(&destination) {
                Ok(dest_node) => leg.arrival_state(dest_node),
                Err(_) => continue,
            };
            let latest_prod_date = match truck.departure {
                Departure::Morning => key.date - Duration::days(1),
                Departure::Afternoon => key.date,
            };

            for product in network.products() {
                let load_key = TruckLoadKey {
                    truck: key.truck.clone(),
                    destination: destination.clone(),
                    product: product.id.clone(),
                    date: key.date,
                };
                let load = match vars.truck_load.get(&load_key) {
                    Some(&v) => v,
                    None => continue,
                };

                let covered_shipments = covered_shipment_volume(
                    vars,
                    &truck.origin,
                    &destination,
                    &product.id,
                    delivery_date,
                    arrival_state,
                    latest_prod_date,
                );
                model = model.with(constraint!(load == covered_shipments));
                linkage_count += 1;
            }
        }
    }

    tracing::trace!(f9_capacity = capacity_count, f9_linkage = linkage_count, "truck constraints assembled");
    model
}

/// Sum of shipment flow on the leg `(origin, destination)` landing on
/// `delivery_date` in `arrival_state`, restricted to cohorts produced no
/// later than `latest_prod_date` — the F10 cutoff for this truck's
/// departure class.
fn covered_shipment_volume(
    vars: &Variables,
    origin: &str,
    destination: &str,
    product: &str,
    delivery_date: chrono::NaiveDate,
    arrival_state: crate::network::ProductState,
    latest_prod_date: chrono::NaiveDate,
) -> Expression {
    vars.shipment_cohort
        .iter()
        .filter(|(k, _)| {
            k.origin == origin
                && k.destination == destination
                && k.product == product
                && k.delivery_date == delivery_date
                && k.arrival_state == arrival_state
                && k.prod_date <= latest_prod_date
        })
        .fold(Expression::from(0.0), |acc, (_, &v): (&ShipmentKey, &good_lp::Variable)| acc + v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::builder::NetworkBuilder;
    use crate::network::labor::LaborDay;
    use crate::network::leg::Leg;
    use crate::network::node::Node;
    use crate::network::product::{Product, ProductState};
    use crate::network::truck::Truck;
    use crate::solver::config::PlannerConfig;
    use chrono::{NaiveDate, Weekday};
    use good_lp::ProblemVariables;

    #[test]
    fn morning_truck_excludes_same_day_production() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(); // Monday
        let network = NetworkBuilder::new(start, start)
            .product(Product::new("sku", 10))
            .node(Node::destination("plant"))
            .node(Node::destination("spoke"))
            .leg(Leg {
                origin: "plant".into(),
                destination: "spoke".into(),
                transit_days: 0,
                departure_state: ProductState::Ambient,
                cost_per_unit: 1.0,
            })
            .truck(Truck::new("t1", "plant", "spoke", 0, vec![Weekday::Mon], Departure::Morning))
            .labor_day(LaborDay::weekday(start, 10.0, 2.0))
            .build()
            .unwrap();

        let config = PlannerConfig::default();
        let indices = Indices::build(&network, &config.enable_pallet_tracking).unwrap();
        let mut problem_vars = ProblemVariables::new();
        let built = crate::variables::build(&mut problem_vars, &network, &indices, &config);

        let model = problem_vars.minimise(Expression::from(0.0)).using(good_lp::solvers::highs::highs);
        let _model = add(model, &network, &indices, &built);
    }
}
