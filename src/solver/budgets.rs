//! Solve budgets: time limit, MIP gap, and the optional random seed.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Resource budget for a single `solve()` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveBudgets {
    /// Wall-clock time limit for the solve.
    #[serde(with = "duration_secs")]
    pub time_limit: Duration,
    /// Relative MIP gap at which the solver may stop and report `Optimal`.
    pub mip_gap: f64,
    /// Seed passed to the backend solver when it supports one.
    pub random_seed: Option<u64>,
}

impl Default for SolveBudgets {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(30),
            mip_gap: 1e-4,
            random_seed: None,
        }
    }
}

impl SolveBudgets {
    /// Build a budget with only the time limit overridden.
    pub fn with_time_limit(seconds: u64) -> Self {
        Self {
            time_limit: Duration::from_secs(seconds),
            ..Default::default()
        }
    }

    /// Validate the budget is usable.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.time_limit.is_zero() {
            return Err(crate::error::PlannerError::configuration(
                "time_limit must be positive",
            ));
        }
        if !(0.0..1.0).contains(&self.mip_gap) {
            return Err(crate::error::PlannerError::configuration(
                "mip_gap must be in [0, 1)",
            ));
        }
        Ok(())
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        d.as_secs_f64().serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(d)?;
        Ok(Duration::from_secs_f64(secs))
    }
}
