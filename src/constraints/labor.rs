//! F3 (labor capacity) and F4 (piecewise labor cost linking).
//!
//! The non-linear `max(0, ...)` in F3's overhead formula and the
//! minimum-payment floor in F4 are both expressed as LP epigraphs: a free
//! variable lower-bounded by every candidate expression, left for the
//! objective's cost pressure to pull down to the true maximum (the same
//! trick `good_lp`'s own examples use for Big-M build/flow linking).

use good_lp::{constraint, Expression, SolverModel};

use crate::network::Network;
use crate::variables::Variables;

/// Add F3 and F4 for every manufacturing node and horizon date.
pub fn add<P: SolverModel>(mut model: P, network: &Network, vars: &Variables) -> P {
    let mut count = 0usize;

    for node in network.nodes().filter(|n| n.capabilities.can_manufacture) {
        let params = node.manufacturing.as_ref().expect("can_manufacture implies params");

        for date in network.horizon().dates() {
            let key = (node.id.clone(), date);
            let labor_day = network.labor_day(date).expect("validated at construction");

            let production_sum: Expression = network
                .products()
                .filter_map(|p| {
                    let prod_key = crate::index::ProdKey {
                        node: node.id.clone(),
                        product: p.id.clone(),
                        date,
                    };
                    vars.production.get(&prod_key).map(|v| Expression::from(*v))
                })
                .fold(Expression::from(0.0), |acc, e| acc + e);

            let distinct_sum: Expression = network
                .products()
                .filter_map(|p| {
                    let prod_key = crate::index::ProdKey {
                        node: node.id.clone(),
                        product: p.id.clone(),
                        date,
                    };
                    vars.product_produced.get(&prod_key).map(|v| Expression::from(*v))
                })
                .fold(Expression::from(0.0), |acc, e| acc + e);

            let labor_hours_used = vars.labor_hours_used[&key];
            let overhead_hours = vars.overhead_hours[&key];
            let any_production = vars.any_production[&key];
            let fixed_hours_used = vars.fixed_hours_used[&key];
            let overtime_hours_used = vars.overtime_hours_used[&key];
            let uses_overtime = vars.uses_overtime[&key];
            let labor_hours_paid = vars.labor_hours_paid[&key];

            let big_m_overhead =
                (params.startup_hours + params.shutdown_hours + params.changeover_hours * network.products().count() as f64).max(1.0);

            // F3: labor_hours_used = production/rate + overhead.
            let rate = params.rate_units_per_hour.max(1e-9);
            model = model.with(constraint!(
                labor_hours_used == (1.0 / rate) * production_sum.clone() + overhead_hours
            ));

            // Overhead epigraph: zero whenever nothing is produced, else the
            // startup/shutdown/changeover formula from `Node::overhead_hours`.
            model = model.with(constraint!(overhead_hours <= big_m_overhead * any_production));
            let overhead_formula: Expression =
                (params.startup_hours + params.shutdown_hours - params.changeover_hours) + params.changeover_hours * distinct_sum.clone();
            model = model.with(constraint!(
                overhead_hours >= overhead_formula - big_m_overhead * (1.0 - any_production)
            ));

            // `any_production` indicator: 1 iff some SKU was produced.
            for p in network.products() {
                let prod_key = crate::index::ProdKey {
                    node: node.id.clone(),
                    product: p.id.clone(),
                    date,
                };
                if let Some(&produced) = vars.product_produced.get(&prod_key) {
                    model = model.with(constraint!(any_production >= produced));
                }
            }
            model = model.with(constraint!(any_production <= distinct_sum));

            // F4: split into fixed/overtime, with the tightening cap.
            model = model.with(constraint!(labor_hours_used == fixed_hours_used + overtime_hours_used));
            model = model.with(constraint!(overtime_hours_used <= labor_day.max_overtime_hours * uses_overtime));

            if labor_day.is_fixed_day {
                model = model.with(constraint!(labor_hours_paid == labor_hours_used));
            } else {
                model = model.with(constraint!(labor_hours_paid >= labor_day.min_payment_hours * any_production));
                model = model.with(constraint!(labor_hours_paid >= labor_hours_used));
            }

            count += 1;
        }
    }

    tracing::trace!(nodes_x_dates = count, "labor constraints assembled");
    model
}
