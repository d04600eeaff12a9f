//! `TruckIdx`: valid `(truck, date)` scheduled-run tuples.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::network::Network;

/// Key for a truck's scheduled run on a date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TruckKey {
    /// Truck id.
    pub truck: String,
    /// Date of the run.
    pub date: NaiveDate,
}

/// Sparse index over scheduled truck runs.
#[derive(Debug, Clone, Default)]
pub struct TruckIdx {
    keys: IndexMap<TruckKey, usize>,
}

impl TruckIdx {
    /// Build the index from the network's truck day-of-week masks.
    pub fn build(network: &Network) -> Self {
        let mut keys = IndexMap::new();
        for date in network.horizon().dates() {
            for truck in network.trucks_on(date) {
                let next = keys.len();
                keys.insert(
                    TruckKey {
                        truck: truck.id.clone(),
                        date,
                    },
                    next,
                );
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
    pub fn position(&self, key: &TruckKey) -> Option<usize> {
        self.keys.get(key).copied()
    }

    /// Whether `key` names a scheduled run.
    pub fn contains(&self, key: &TruckKey) -> bool {
        self.keys.contains_key(key)
    }

    /// Iterate all keys, in deterministic insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TruckKey> {
        self.keys.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::builder::NetworkBuilder;
    use crate::network::labor::LaborDay;
    use crate::network::node::Node;
    use crate::network::truck::{Departure, Truck};
    use chrono::Weekday;

    #[test]
    fn off_schedule_date_excluded() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(); // Monday
        let end = start + chrono::Duration::days(1);
        let network = NetworkBuilder::new(start, end)
            .node(Node::destination("plant"))
            .node(Node::destination("spoke"))
            .leg(crate::network::leg::Leg {
                origin: "plant".into(),
                destination: "spoke".into(),
                transit_days: 1,
                departure_state: crate::network::product::ProductState::Ambient,
                cost_per_unit: 1.0,
            })
            .truck(Truck::new(
                "t1",
                "plant",
                "spoke",
                1,
                vec![Weekday::Tue],
                Departure::Morning,
            ))
            .labor_day(LaborDay::weekday(start, 10.0, 2.0))
            .labor_day(LaborDay::weekday(end, 10.0, 2.0))
            .build()
            .unwrap();

        let idx = TruckIdx::build(&network);
        assert_eq!(idx.len(), 1);
        assert!(idx.contains(&TruckKey {
            truck: "t1".into(),
            date: end,
        }));
    }
}
