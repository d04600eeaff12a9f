//! F7 (demand satisfaction) and the shortage-variable linkage.
//!
//! F8 (remaining-shelf-life eligibility) needs no constraint of its own in
//! age-cohort mode: `DemandCohortIdx` only ever enumerates eligible
//! cohorts, so summing over it already excludes ineligible ones. In
//! sliding-window mode, F8 is approximated by [`crate::constraints::inventory`]'s
//! windowed freshness cap instead.

use good_lp::{constraint, Expression, SolverModel};

use crate::network::{ForecastKey, Network};
use crate::solver::config::PlannerConfig;
use crate::variables::{DemandVariables, Variables};

/// Add F7: demand fulfilled (plus shortage, if allowed) equals forecast
/// demand, for every `(destination, product, date)` forecast entry.
pub fn add<P: SolverModel>(mut model: P, network: &Network, vars: &Variables, config: &PlannerConfig) -> P {
    let mut count = 0usize;

    for (key, entry) in network.forecast_entries() {
        let fulfilled = fulfilled_expression(key, vars);

        let shortage: Expression = if config.allow_shortages {
            vars.shortage.get(key).map(|&v| Expression::from(v)).unwrap_or_else(|| Expression::from(0.0))
        } else {
            Expression::from(0.0)
        };

        model = model.with(constraint!(fulfilled + shortage == entry.demand_units));
        count += 1;
    }

    tracing::trace!(f7 = count, "demand satisfaction constraints assembled");
    model
}

/// Sum of every demand-satisfaction variable drawing against `key`: every
/// eligible cohort in age-cohort mode, or the single aggregate variable in
/// sliding-window mode.
fn fulfilled_expression(key: &ForecastKey, vars: &Variables) -> Expression {
    match &vars.demand {
        DemandVariables::Cohort(cohort_demand) => cohort_demand
            .iter()
            .filter(|(k, _)| k.destination == key.destination && k.product == key.product && k.date == key.date)
            .fold(Expression::from(0.0), |acc, (_, &v)| acc + v),
        DemandVariables::Aggregate(aggregate_demand) => aggregate_demand
            .get(key)
            .map(|&v| Expression::from(v))
            .unwrap_or_else(|| Expression::from(0.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::Indices;
    use crate::network::builder::NetworkBuilder;
    use crate::network::labor::LaborDay;
    use crate::network::node::{ManufacturingParams, Node};
    use crate::network::product::Product;
    use chrono::NaiveDate;
    use good_lp::ProblemVariables;

    fn tiny_network() -> Network {
        let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        NetworkBuilder::new(start, start)
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
            .labor_day(LaborDay::weekday(start, 10.0, 2.0))
            .build()
            .unwrap()
    }

    #[test]
    fn one_constraint_per_forecast_entry() {
        let network = tiny_network();
        let config = PlannerConfig::default();
        let indices = Indices::build(&network, &config.enable_pallet_tracking).unwrap();
        let mut problem_vars = ProblemVariables::new();
        let built = crate::variables::build(&mut problem_vars, &network, &indices, &config);

        let model = problem_vars.minimise(Expression::from(0.0)).using(good_lp::solvers::highs::highs);
        let _model = add(model, &network, &built, &config);
        assert_eq!(network.forecast_entries().count(), 1);
    }
}
