//! `ShipmentIdx`: valid `(origin, dest, product, prod_date, delivery_date,
//! arrival_state)` aggregate shipment flows.

use chrono::{Duration, NaiveDate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::network::{shelf_life::shelf_life_days, Departure, Network, ProductState};

/// Key for a single shipment flow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShipmentKey {
    /// Origin node id.
    pub origin: String,
    /// Destination node id.
    pub destination: String,
    /// Product id.
    pub product: String,
    /// Production date of the cohort being shipped.
    pub prod_date: NaiveDate,
    /// Delivery (arrival) date.
    pub delivery_date: NaiveDate,
    /// State inventory arrives in at the destination.
    pub arrival_state: ProductState,
}

/// Sparse index over valid shipment flows.
#[derive(Debug, Clone, Default)]
pub struct ShipmentIdx {
    keys: IndexMap<ShipmentKey, usize>,
}

impl ShipmentIdx {
    /// Build the index from the network.
    pub fn build(network: &Network) -> Result<Self> {
        let horizon = network.horizon();
        let mut keys = IndexMap::new();

        for leg in network.legs() {
            let destination = network.node(&leg.destination)?;
            if !destination_accepts(destination, leg.arrival_state(destination)) {
                continue;
            }
            let arrival_state = leg.arrival_state(destination);
            let departure_shelf_life = shelf_life_days(leg.departure_state);

            // A truck-served leg only moves on that truck's scheduled dates,
            // and under its departure class's same-day-production rule (F10).
            // A leg with no truck at all is unrestricted, as before.
            let gate = network.truck_gate_for_leg(&leg.origin, &leg.destination);

            let mut departure_date = horizon.start;
            while departure_date <= horizon.end {
                let departure_class = match &gate {
                    Some(schedule) => match schedule.get(&departure_date) {
                        Some(class) => Some(*class),
                        None => {
                            departure_date += Duration::days(1);
                            continue;
                        }
                    },
                    None => None,
                };

                let delivery_date = departure_date + Duration::days(i64::from(leg.transit_days));
                let earliest_prod_date = departure_date - Duration::days(departure_shelf_life);
                let latest_prod_date = match departure_class {
                    Some(Departure::Morning) => departure_date - Duration::days(1),
                    Some(Departure::Afternoon) | None => departure_date,
                };

                for product in network.products() {
                    let mut prod_date = earliest_prod_date;
                    while prod_date <= latest_prod_date {
                        let next = keys.len();
                        keys.insert(
                            ShipmentKey {
                                origin: leg.origin.clone(),
                                destination: leg.destination.clone(),
                                product: product.id.clone(),
                                prod_date,
                                delivery_date,
                                arrival_state,
                            },
                            next,
                        );
                        prod_date += Duration::days(1);
                    }
                }
                departure_date += Duration::days(1);
            }
        }

        Ok(Self { keys })
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
    pub fn position(&self, key: &ShipmentKey) -> Option<usize> {
        self.keys.get(key).copied()
    }

    /// Whether `key` is a valid shipment flow.
    pub fn contains(&self, key: &ShipmentKey) -> bool {
        self.keys.contains_key(key)
    }

    /// Iterate all keys, in deterministic insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ShipmentKey> {
        self.keys.keys()
    }
}

fn destination_accepts(node: &crate::network::Node, state: ProductState) -> bool {
    match state {
        ProductState::Ambient => node.capabilities.can_store_ambient,
        ProductState::Frozen => node.capabilities.can_store_frozen,
        ProductState::Thawed => node.capabilities.can_thaw_on_arrival,
    }
}
