//! Planner configuration: the knobs a caller sets before building a model.

use crate::network::ProductState;
use std::time::Duration;

use super::budgets::SolveBudgets;

/// Shelf-life tracking strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackingMode {
    /// Explicit `(production_date, current_date)` cohorts; shelf-life is
    /// enforced by omitting stale tuples from the index.
    #[default]
    AgeCohort,
    /// Aggregate per-`(node, product, state, date)` inventory with a
    /// windowed "recent production only" demand-eligibility constraint.
    SlidingWindow,
}

/// Which `(node, state)` combinations get integer pallet-count variables.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PalletTrackingMode {
    /// No pallet variables anywhere; storage costs are purely per-unit.
    #[default]
    Off,
    /// Pallet variables only for the listed `(node, state)` pairs.
    PerState(Vec<(String, ProductState)>),
    /// Pallet variables everywhere storage cost parameters are present.
    All,
}

/// Backend solver selection. An enum rather than a single hardcoded
/// backend, so the construction interface stays solver-agnostic even while
/// only one feature-gated backend is wired up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverChoice {
    /// HiGHS, via `good_lp`'s `highs` feature. MIP-capable.
    #[default]
    Highs,
}

/// Full configuration for one planner instance.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Shelf-life tracking strategy.
    pub tracking_mode: TrackingMode,
    /// Whether unmet demand is allowed (as a penalized `shortage` variable)
    /// or must fail the solve as infeasible.
    pub allow_shortages: bool,
    /// Whether shelf-life eligibility constraints (F8) are enforced.
    pub enforce_shelf_life: bool,
    /// Whether production is forced to integer multiples of each SKU's
    /// mix size (F1) via `mix_count` variables.
    pub use_batch_tracking: bool,
    /// Which `(node, state)` pairs get integer pallet-count variables.
    pub enable_pallet_tracking: PalletTrackingMode,
    /// Whether `product_produced` binaries (F2) are instantiated at all.
    /// Kept independent of `use_batch_tracking` since binary SKU
    /// enforcement is reported as the single most expensive integrality
    /// choice.
    pub enforce_sku_binary: bool,
    /// Backend solver choice.
    pub solver: SolverChoice,
    /// Time/gap/seed budget for the solve call.
    pub budgets: SolveBudgets,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            tracking_mode: TrackingMode::default(),
            allow_shortages: false,
            enforce_shelf_life: true,
            use_batch_tracking: true,
            enable_pallet_tracking: PalletTrackingMode::default(),
            enforce_sku_binary: false,
            solver: SolverChoice::default(),
            budgets: SolveBudgets::default(),
        }
    }
}

impl PlannerConfig {
    /// Start a builder with defaults.
    pub fn builder() -> PlannerConfigBuilder {
        PlannerConfigBuilder::default()
    }

    /// The configured time limit, convenience accessor.
    pub fn time_limit(&self) -> Duration {
        self.budgets.time_limit
    }

    /// The configured MIP gap, convenience accessor.
    pub fn mip_gap(&self) -> f64 {
        self.budgets.mip_gap
    }
}

/// Fluent builder over [`PlannerConfig`].
#[derive(Debug, Clone, Default)]
pub struct PlannerConfigBuilder {
    inner: PlannerConfig,
}

impl PlannerConfigBuilder {
    /// Select the shelf-life tracking strategy.
    pub fn tracking_mode(mut self, mode: TrackingMode) -> Self {
        self.inner.tracking_mode = mode;
        self
    }

    /// Allow (penalized) shortages instead of failing infeasible.
    pub fn allow_shortages(mut self, allow: bool) -> Self {
        self.inner.allow_shortages = allow;
        self
    }

    /// Toggle shelf-life eligibility enforcement.
    pub fn enforce_shelf_life(mut self, enforce: bool) -> Self {
        self.inner.enforce_shelf_life = enforce;
        self
    }

    /// Toggle integer mix-batch enforcement.
    pub fn use_batch_tracking(mut self, enable: bool) -> Self {
        self.inner.use_batch_tracking = enable;
        self
    }

    /// Select where pallet-count integer variables apply.
    pub fn enable_pallet_tracking(mut self, mode: PalletTrackingMode) -> Self {
        self.inner.enable_pallet_tracking = mode;
        self
    }

    /// Toggle `product_produced` binary enforcement.
    pub fn enforce_sku_binary(mut self, enforce: bool) -> Self {
        self.inner.enforce_sku_binary = enforce;
        self
    }

    /// Select the backend solver.
    pub fn solver(mut self, choice: SolverChoice) -> Self {
        self.inner.solver = choice;
        self
    }

    /// Set the wall-clock time limit.
    pub fn time_limit(mut self, limit: Duration) -> Self {
        self.inner.budgets.time_limit = limit;
        self
    }

    /// Set the relative MIP gap.
    pub fn mip_gap(mut self, gap: f64) -> Self {
        self.inner.budgets.mip_gap = gap;
        self
    }

    /// Set the solver random seed, where the backend supports one.
    pub fn random_seed(mut self, seed: u64) -> Self {
        self.inner.budgets.random_seed = Some(seed);
        self
    }

    /// Validate and finalize the configuration.
    pub fn build(self) -> crate::error::Result<PlannerConfig> {
        self.inner.budgets.validate()?;
        Ok(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds() {
        let cfg = PlannerConfig::builder().build().unwrap();
        assert_eq!(cfg.tracking_mode, TrackingMode::AgeCohort);
        assert!(!cfg.allow_shortages);
    }

    #[test]
    fn invalid_budget_rejected_at_build() {
        let result = PlannerConfig::builder().mip_gap(2.0).build();
        assert!(result.is_err());
    }

    #[test]
    fn builder_overrides_apply() {
        let cfg = PlannerConfig::builder()
            .tracking_mode(TrackingMode::SlidingWindow)
            .allow_shortages(true)
            .enforce_sku_binary(true)
            .build()
            .unwrap();
        assert_eq!(cfg.tracking_mode, TrackingMode::SlidingWindow);
        assert!(cfg.allow_shortages);
        assert!(cfg.enforce_sku_binary);
    }
}
