//! Warmstart hint validation.
//!
//! `good_lp`'s solver-agnostic surface (`ProblemVariables`/`SolverModel`)
//! exposes no way to set a variable's starting value before `.solve()` —
//! HiGHS's own warm-start hook sits underneath that abstraction and isn't
//! reachable through it, the same gap already noted for `random_seed` in
//! `driver.rs`. So hints are never threaded into the solver at all: this
//! module only resolves each hint's name against the built variable set and
//! checks it against that variable's domain, for reporting. An unknown key
//! or a type mismatch (e.g. a binary hint value outside `{0, 1}`) is
//! recorded as a diagnostic and skipped, never a hard failure.

use std::collections::HashMap;

use super::diagnostics::Diagnostic;
use crate::variables::Variables;

/// A single warmstart hint: a variable key (the same `name(...)` strings
/// [`crate::variables::build`] gives each variable) and its suggested
/// starting value.
pub type WarmstartHints = HashMap<String, f64>;

/// Variable-name prefixes that are binary-domain (`{0, 1}`), so a hint
/// value outside that range is a type mismatch rather than a silent
/// truncation.
const BINARY_PREFIXES: [&str; 3] = ["product_produced[", "truck_used[", "uses_overtime["];

/// Variable-name prefixes that are integer-domain, so a hint carrying a
/// fractional value is a type mismatch.
const INTEGER_PREFIXES: [&str; 2] = ["mix_count[", "pallet_count["];

/// Resolve `hints` against `vars` and validate each against its variable's
/// domain. Nothing here is set on a model: `good_lp`'s public API gives no
/// way to, so this is bookkeeping only — a count of how many hints would
/// have been usable, reported back as a diagnostic.
///
/// An unresolved or out-of-domain hint is counted and logged, never a hard
/// failure, as the warmstart-hint contract requires ("missing indices are
/// skipped, type mismatches logged, never a hard failure").
pub fn apply(hints: &WarmstartHints, vars: &Variables) -> WarmstartReport {
    let mut report = WarmstartReport::default();

    for (key, &value) in hints {
        if !vars.names.contains_key(key) {
            tracing::warn!(hint = %key, "warmstart hint references unknown variable");
            report.skipped_unknown += 1;
            continue;
        }

        if !value_fits_domain(key, value) {
            tracing::warn!(hint = %key, value, "warmstart hint value outside variable domain, skipping");
            report.skipped_type_mismatch += 1;
            continue;
        }

        report.applied += 1;
    }

    report
}

/// Whether `value` is admissible for the variable named `key`, inferred
/// from its name prefix (binary, integer, or continuous).
fn value_fits_domain(key: &str, value: f64) -> bool {
    if BINARY_PREFIXES.iter().any(|p| key.starts_with(p)) {
        return (value - 0.0).abs() < 1e-9 || (value - 1.0).abs() < 1e-9;
    }
    if INTEGER_PREFIXES.iter().any(|p| key.starts_with(p)) {
        return (value - value.round()).abs() < 1e-6;
    }
    true
}

/// Outcome of applying a set of warmstart hints to a model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WarmstartReport {
    /// Hints that matched a known variable and were applied.
    pub applied: usize,
    /// Hints whose key did not match any variable in the model.
    pub skipped_unknown: usize,
    /// Hints that matched a variable but carried a value outside that
    /// variable's domain (e.g. 0.5 for a binary).
    pub skipped_type_mismatch: usize,
}

impl WarmstartReport {
    /// Total hints considered.
    pub fn total(&self) -> usize {
        self.applied + self.skipped_unknown + self.skipped_type_mismatch
    }

    /// Fraction of hints applied, in `[0, 1]`. Zero when no hints were given.
    pub fn applied_fraction(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.applied as f64 / total as f64
        }
    }

    /// Render this report as a single diagnostic for the result's warning list.
    pub fn as_diagnostic(&self) -> Diagnostic {
        Diagnostic::warmstart_summary(self.applied, self.skipped_unknown, self.skipped_type_mismatch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn applied_fraction_zero_with_no_hints() {
        let r = WarmstartReport::default();
        assert_eq!(r.applied_fraction(), 0.0);
    }

    #[test]
    fn applied_fraction_computed() {
        let r = WarmstartReport {
            applied: 3,
            skipped_unknown: 1,
            skipped_type_mismatch: 0,
        };
        assert!((r.applied_fraction() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn unknown_hint_is_counted_not_applied() {
        let network = crate::network::builder::NetworkBuilder::new(
            chrono::NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        )
        .node(crate::network::node::Node::destination("spoke"))
        .product(crate::network::product::Product::new("sku", 10))
        .labor_day(crate::network::labor::LaborDay::weekday(
            chrono::NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            10.0,
            2.0,
        ))
        .build()
        .unwrap();

        let config = crate::solver::config::PlannerConfig::default();
        let indices = crate::index::Indices::build(&network, &config.enable_pallet_tracking).unwrap();
        let mut problem_vars = good_lp::ProblemVariables::new();
        let built = crate::variables::build(&mut problem_vars, &network, &indices, &config);

        let mut hints = WarmstartHints::new();
        hints.insert("production[nowhere,sku,2026-01-05]".to_string(), 10.0);

        let report = apply(&hints, &built);
        assert_eq!(report.skipped_unknown, 1);
        assert_eq!(report.applied, 0);
    }

    #[test]
    fn binary_hint_out_of_range_is_type_mismatch() {
        let network = crate::network::builder::NetworkBuilder::new(
            chrono::NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            chrono::NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
        )
        .node(crate::network::node::Node::manufacturing(
            "plant",
            crate::network::node::ManufacturingParams {
                rate_units_per_hour: 1000.0,
                startup_hours: 0.5,
                shutdown_hours: 0.5,
                changeover_hours: 0.25,
            },
        ))
        .product(crate::network::product::Product::new("sku", 10))
        .labor_day(crate::network::labor::LaborDay::weekday(
            chrono::NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
            10.0,
            2.0,
        ))
        .build()
        .unwrap();

        let config = crate::solver::config::PlannerConfig::default();
        let indices = crate::index::Indices::build(&network, &config.enable_pallet_tracking).unwrap();
        let mut problem_vars = good_lp::ProblemVariables::new();
        let built = crate::variables::build(&mut problem_vars, &network, &indices, &config);

        let date = chrono::NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let mut hints = WarmstartHints::new();
        hints.insert(format!("product_produced[plant,sku,{date}]"), 0.5);

        let report = apply(&hints, &built);
        assert_eq!(report.skipped_type_mismatch, 1);
    }
}
