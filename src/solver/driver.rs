//! Solver Driver (`C4`): assembles the model over `C1`-`C3` and invokes
//! the configured backend.
//!
//! Mirrors the `vars.minimise(objective).using(solver).set_time_limit(...)`
//! shape the wider `good_lp` ecosystem uses (e.g. `growth-rs`'s optimiser),
//! generalized here to also apply the relative MIP gap before handing the
//! assembled problem to `.solve()`. Warmstart hints, if given, are only
//! validated and reported — see `warmstart::apply`'s doc comment for why
//! they are never actually set on the model.

use std::time::Instant;

use good_lp::solvers::highs::highs;
use good_lp::{ProblemVariables, SolverModel};

use crate::constraints;
use crate::error::Result;
use crate::index::Indices;
use crate::network::Network;
use crate::objective;
use crate::solution::{self, SolveResult};
use crate::solver::config::{PlannerConfig, SolverChoice};
use crate::solver::diagnostics::Diagnostic;
use crate::solver::status::SolveStatus;
use crate::solver::warmstart::{WarmstartHints, WarmstartReport};
use crate::variables::{self, Variables};

/// Solve one planning horizon: build indices and variables (`C2`),
/// assemble constraints and objective (`C3`/`C4`), invoke the backend, and
/// extract a [`SolveResult`] (`C5`).
///
/// Never returns `Err` for infeasible, unbounded, or time-limited
/// outcomes — those are reported as `SolveStatus` on the result, per the
/// error-handling design (`PlannerError` is reserved for configuration and
/// input problems, not solve outcomes).
pub fn solve(network: &Network, config: &PlannerConfig, hints: Option<&WarmstartHints>) -> Result<SolveResult> {
    let started = Instant::now();

    let indices = Indices::build(network, &config.enable_pallet_tracking)?;
    let mut problem_vars = ProblemVariables::new();
    let vars = variables::build(&mut problem_vars, network, &indices, config);

    let terms = objective::build(network, &indices, &vars);
    let total_cost = terms.total();

    let model = match config.solver {
        SolverChoice::Highs => problem_vars.minimise(total_cost.clone()).using(highs),
    };
    let mut model = model.set_time_limit(config.time_limit().as_secs_f64());
    model.set_mip_gap(config.mip_gap()).unwrap_or_else(|err| {
        tracing::warn!(gap = config.mip_gap(), error = %err, "failed to apply mip gap, using backend default");
    });

    // Validated and counted only; see `warmstart::apply`'s doc comment for
    // why no hint ever reaches the solver as an actual starting value.
    let warmstart_report = hints.map(|h| crate::solver::warmstart::apply(h, &vars)).unwrap_or_default();

    let mut pre_solve_warnings = Vec::new();
    if config.budgets.random_seed.is_some() {
        // `good_lp`'s `highs` backend exposes no seed-setting hook through
        // `SolverModel`; the knob is accepted ("when
        // seed-controllable") but cannot be threaded through today, so say
        // so rather than silently ignoring it.
        pre_solve_warnings.push(Diagnostic::new(
            crate::solver::diagnostics::DiagnosticKind::SolveSummary,
            "random_seed configured but the selected backend does not expose a seed hook; ignored",
        ));
    }

    let model = constraints::assemble(model, network, &indices, &vars, config);

    tracing::info!(
        variables = problem_vars_len(&problem_vars),
        time_limit_seconds = config.time_limit().as_secs_f64(),
        mip_gap = config.mip_gap(),
        "solving model"
    );

    match model.solve() {
        Ok(solution) => {
            let elapsed = started.elapsed().as_secs_f64();
            let mut result = solution::extract(&solution, network, &indices, &vars, &terms, config)?;
            result.status = SolveStatus::Optimal;
            result.solve_time_seconds = elapsed;
            result.warnings.extend(pre_solve_warnings);
            if hints.is_some() {
                result.warnings.push(warmstart_report.as_diagnostic());
            }
            tracing::info!(
                status = ?result.status,
                objective = result.objective,
                elapsed_seconds = elapsed,
                "solve complete"
            );
            Ok(result)
        }
        Err(err) => {
            let elapsed = started.elapsed().as_secs_f64();
            let status = classify_failure(&err);
            tracing::warn!(status = ?status, error = %err, elapsed_seconds = elapsed, "solve did not reach optimality");
            let mut result = SolveResult::empty(status);
            result.solve_time_seconds = elapsed;
            result.warnings.extend(pre_solve_warnings);
            result.warnings.push(Diagnostic::new(
                crate::solver::diagnostics::DiagnosticKind::SolveSummary,
                format!("solver reported: {err}"),
            ));
            Ok(result)
        }
    }
}

fn problem_vars_len(vars: &ProblemVariables) -> usize {
    vars.iter_variables_with_def().count()
}

/// Map a `good_lp::ResolutionError` to the status taxonomy's
/// failure table defines.
fn classify_failure(err: &good_lp::ResolutionError) -> SolveStatus {
    match err {
        good_lp::ResolutionError::Infeasible => SolveStatus::Infeasible,
        good_lp::ResolutionError::Unbounded => SolveStatus::Unbounded,
        good_lp::ResolutionError::Other(message) if message.to_lowercase().contains("time") => SolveStatus::TimeLimit,
        _ => SolveStatus::Error,
    }
}
