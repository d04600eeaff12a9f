//! `DemandCohortIdx`: cohorts eligible to satisfy demand (F8) — remaining
//! shelf life at the demand date must be at least the minimum.

use chrono::{Duration, NaiveDate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::network::{
    shelf_life::{is_eligible_for_demand, shelf_life_days},
    Network, ProductState,
};

use super::cohort::storable_states;

/// Key for a demand-eligible cohort.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DemandCohortKey {
    /// Demand destination node id.
    pub destination: String,
    /// Product id.
    pub product: String,
    /// Demand date.
    pub date: NaiveDate,
    /// Production date (state-entry date for thawed cohorts) of the
    /// candidate cohort.
    pub prod_date: NaiveDate,
    /// Storage state of the candidate cohort.
    pub state: ProductState,
}

/// Sparse index over demand-eligible cohorts.
#[derive(Debug, Clone, Default)]
pub struct DemandCohortIdx {
    keys: IndexMap<DemandCohortKey, usize>,
}

impl DemandCohortIdx {
    /// Build the index, restricted to nodes with `has_demand`.
    pub fn build(network: &Network) -> Self {
        let horizon = network.horizon();
        let mut keys = IndexMap::new();

        for node in network.nodes() {
            if !node.capabilities.has_demand {
                continue;
            }
            for state in storable_states(node) {
                let shelf_life = shelf_life_days(state);
                for date in horizon.dates() {
                    let mut prod_date = date - Duration::days(shelf_life);
                    while prod_date <= date {
                        let age = (date - prod_date).num_days();
                        if is_eligible_for_demand(state, age) {
                            for product in network.products() {
                                let next = keys.len();
                                keys.insert(
                                    DemandCohortKey {
                                        destination: node.id.clone(),
                                        product: product.id.clone(),
                                        date,
                                        prod_date,
                                        state,
                                    },
                                    next,
                                );
                            }
                        }
                        prod_date += Duration::days(1);
                    }
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
    pub fn position(&self, key: &DemandCohortKey) -> Option<usize> {
        self.keys.get(key).copied()
    }

    /// Iterate all keys, in deterministic insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &DemandCohortKey> {
        self.keys.keys()
    }

    /// All cohorts eligible to satisfy demand at `(destination, product, date)`.
    pub fn eligible_for(
        &self,
        destination: &str,
        product: &str,
        date: NaiveDate,
    ) -> impl Iterator<Item = &DemandCohortKey> {
        self.keys.keys().filter(move |k| {
            k.destination == destination && k.product == product && k.date == date
        })
    }
}
