//! `ProdIdx`: valid `(node, product, date)` production tuples.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::network::Network;

/// Key for a production decision.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProdKey {
    /// Manufacturing node id.
    pub node: String,
    /// Product id.
    pub product: String,
    /// Production date.
    pub date: NaiveDate,
}

/// Sparse index over valid production tuples: `node.can_manufacture` and
/// `date` within the horizon.
#[derive(Debug, Clone, Default)]
pub struct ProdIdx {
    keys: IndexMap<ProdKey, usize>,
}

impl ProdIdx {
    /// Build the index from the network.
    pub fn build(network: &Network) -> Self {
        let mut keys = IndexMap::new();
        for node in network.nodes() {
            if !node.capabilities.can_manufacture {
                continue;
            }
            for product in network.products() {
                for date in network.horizon().dates() {
                    let next = keys.len();
                    keys.insert(
                        ProdKey {
                            node: node.id.clone(),
                            product: product.id.clone(),
                            date,
                        },
                        next,
                    );
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
    pub fn position(&self, key: &ProdKey) -> Option<usize> {
        self.keys.get(key).copied()
    }

    /// Whether `key` is a valid production tuple.
    pub fn contains(&self, key: &ProdKey) -> bool {
        self.keys.contains_key(key)
    }

    /// Iterate all keys, in deterministic insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ProdKey> {
        self.keys.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::builder::NetworkBuilder;
    use crate::network::labor::LaborDay;
    use crate::network::node::{ManufacturingParams, Node};
    use crate::network::product::Product;

    #[test]
    fn only_manufacturing_nodes_appear() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let network = NetworkBuilder::new(start, start)
            .product(Product::new("sku", 10))
            .node(Node::manufacturing(
                "plant",
                ManufacturingParams {
                    rate_units_per_hour: 100.0,
                    startup_hours: 0.0,
                    shutdown_hours: 0.0,
                    changeover_hours: 0.0,
                },
            ))
            .node(Node::destination("spoke"))
            .labor_day(LaborDay::weekday(start, 10.0, 2.0))
            .build()
            .unwrap();

        let idx = ProdIdx::build(&network);
        assert_eq!(idx.len(), 1);
        assert!(idx.contains(&ProdKey {
            node: "plant".into(),
            product: "sku".into(),
            date: start,
        }));
    }
}
