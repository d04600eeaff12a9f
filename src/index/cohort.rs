//! `CohortIdx` (age-cohort mode): valid `(node, product, prod_date,
//! curr_date, state)` inventory cells.

use chrono::{Duration, NaiveDate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::network::{shelf_life::shelf_life_days, Network, ProductState};

/// Key for a single cohort inventory cell.
///
/// For thawed cohorts, `prod_date` holds the *state-entry date* (the thaw
/// date), not the original production date — thawing re-anchors the age
/// clock per F5, so the generic `(curr_date - prod_date) <= shelf_life`
/// check applies uniformly across all three states.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CohortKey {
    /// Node holding this cohort.
    pub node: String,
    /// Product id.
    pub product: String,
    /// Production date, or state-entry date for thawed cohorts.
    pub prod_date: NaiveDate,
    /// The date this cell is being observed.
    pub curr_date: NaiveDate,
    /// Storage state.
    pub state: ProductState,
}

/// Sparse index over valid cohort cells.
#[derive(Debug, Clone, Default)]
pub struct CohortIdx {
    keys: IndexMap<CohortKey, usize>,
}

impl CohortIdx {
    /// Build the index from the network, extending the horizon by the
    /// network's maximum leg transit so in-flight shipments that arrive
    /// just past `end` are still representable.
    pub fn build(network: &Network) -> Self {
        let horizon = network.horizon();
        let extended_end = horizon.extended(network.max_transit_days()).end;
        let mut keys = IndexMap::new();

        for node in network.nodes() {
            for state in storable_states(node) {
                let shelf_life = shelf_life_days(state);
                let earliest_prod_date = horizon.start - Duration::days(shelf_life);

                let mut curr_date = horizon.start;
                while curr_date <= extended_end {
                    let mut prod_date = earliest_prod_date.max(curr_date - Duration::days(shelf_life));
                    while prod_date <= curr_date {
                        for product in network.products() {
                            let next = keys.len();
                            keys.insert(
                                CohortKey {
                                    node: node.id.clone(),
                                    product: product.id.clone(),
                                    prod_date,
                                    curr_date,
                                    state,
                                },
                                next,
                            );
                        }
                        prod_date += Duration::days(1);
                    }
                    curr_date += Duration::days(1);
                }
            }
        }

        Self { keys }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Dense row position of `key`, if present.
    pub fn position(&self, key: &CohortKey) -> Option<usize> {
        self.keys.get(key).copied()
    }

    /// Whether `key` is a valid cohort cell.
    pub fn contains(&self, key: &CohortKey) -> bool {
        self.keys.contains_key(key)
    }

    /// Iterate all keys, in deterministic insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CohortKey> {
        self.keys.keys()
    }
}

/// Which states a node is capable of storing — the state-validity
/// invariant from section 3.2.
pub fn storable_states(node: &crate::network::Node) -> Vec<ProductState> {
    let mut states = Vec::new();
    if node.capabilities.can_store_ambient {
        states.push(ProductState::Ambient);
    }
    if node.capabilities.can_store_frozen {
        states.push(ProductState::Frozen);
    }
    if node.capabilities.can_thaw_on_arrival {
        states.push(ProductState::Thawed);
    }
    states
}
