//! F11: integer pallet ceiling for every tracked cohort cell.
//!
//! `pallet_count` is declared integer in [`crate::variables`]; the
//! ceiling itself falls out of a plain `>=` inequality plus the
//! objective's per-pallet holding cost pulling the integer down to the
//! true minimum — the same epigraph trick `labor.rs` uses for the
//! overhead formula.

use good_lp::{constraint, SolverModel};

use crate::index::Indices;
use crate::units::UNITS_PER_PALLET;
use crate::variables::Variables;

/// Add F11 for every cohort cell [`crate::index::PalletIdx`] selected.
pub fn add<P: SolverModel>(mut model: P, indices: &Indices, vars: &Variables) -> P {
    let mut count = 0usize;

    for key in indices.pallet.cohort_keys(&indices.cohort) {
        let Some(&pallet_count) = vars.pallet_count.get(key) else {
            continue;
        };
        let cohort_units = match &vars.inventory {
            crate::variables::InventoryVariables::Cohort(m) => m.get(key),
            crate::variables::InventoryVariables::Aggregate => None,
        };
        let Some(&units) = cohort_units else {
            continue;
        };

        model = model.with(constraint!(
            f64::from(UNITS_PER_PALLET) * pallet_count >= units
        ));
        count += 1;
    }

    tracing::trace!(f11 = count, "pallet ceiling constraints assembled");
    model
}
