//! `PalletIdx`: the subset of `CohortIdx` that gets an integer
//! `pallet_count` variable, per [`crate::solver::PalletTrackingMode`].

use indexmap::IndexSet;

use crate::network::{Network, ProductState};
use crate::solver::config::PalletTrackingMode;

use super::cohort::{CohortIdx, CohortKey};

/// Sparse index over cohort cells that carry an integer pallet-count
/// variable.
///
/// Kept as an explicit subset selection, rather than a second enumeration
/// pass, since pallet tracking is configuration-driven and this module
/// documents the one source of truth for "does this cohort get pallet
/// integers".
#[derive(Debug, Clone, Default)]
pub struct PalletIdx {
    requested: IndexSet<(String, ProductState)>,
}

impl PalletIdx {
    /// Build from the configured tracking mode.
    pub fn build(network: &Network, mode: &PalletTrackingMode) -> Self {
        let requested = match mode {
            PalletTrackingMode::Off => IndexSet::new(),
            PalletTrackingMode::All => network
                .nodes()
                .flat_map(|n| super::cohort::storable_states(n).into_iter().map(move |s| (n.id.clone(), s)))
                .collect(),
            PalletTrackingMode::PerState(pairs) => pairs.iter().cloned().collect(),
        };
        Self { requested }
    }

    /// Whether `(node, state)` carries pallet-count variables.
    pub fn tracks(&self, node: &str, state: ProductState) -> bool {
        self.requested.contains(&(node.to_string(), state))
    }

    /// Filter a [`CohortIdx`] down to the cells that get pallet variables.
    pub fn cohort_keys<'a>(&'a self, cohort_idx: &'a CohortIdx) -> impl Iterator<Item = &'a CohortKey> + 'a {
        cohort_idx.iter().filter(move |k| self.tracks(&k.node, k.state))
    }
}
