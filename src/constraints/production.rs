//! F1 (integer batch enforcement) and F2 (production/SKU-produced
//! linking).

use good_lp::{constraint, Expression, SolverModel};

use crate::index::Indices;
use crate::network::Network;
use crate::solver::config::PlannerConfig;
use crate::variables::Variables;

/// Big-M for F2: the largest amount any single `(node, product, date)`
/// could physically produce, so `product_produced = 1` never binds a
/// feasible production quantity.
fn big_m(network: &Network) -> f64 {
    network
        .nodes()
        .filter_map(|n| n.manufacturing.as_ref())
        .map(|m| m.rate_units_per_hour * 24.0)
        .fold(0.0, f64::max)
        .max(1.0)
}

/// Add F1 and F2 to `model`, returning it back (the `good_lp` builder
/// idiom: every `with()` call consumes and returns `Self`).
pub fn add<P: SolverModel>(mut model: P, network: &Network, indices: &Indices, vars: &Variables, config: &PlannerConfig) -> P {
    let m = big_m(network);
    let mut f1_count = 0usize;
    let mut f2_count = 0usize;

    for key in indices.prod.iter() {
        let production = vars.production[key];
        let produced = vars.product_produced[key];

        // F2: production <= M * product_produced.
        model = model.with(constraint!(production <= m * produced));
        f2_count += 1;

        if config.use_batch_tracking {
            let product = network.product(&key.product).expect("indexed product exists");
            let mix = vars.mix_count[key];
            // F1: production = mix_count * units_per_mix.
            let rhs: Expression = f64::from(product.units_per_mix) * mix;
            model = model.with(constraint!(production == rhs));
            f1_count += 1;
        }
    }

    tracing::trace!(f1 = f1_count, f2 = f2_count, "production constraints assembled");
    model
}
