//! Node entities: capability-flag records rather than a type hierarchy.
//!
//! Section 9's design note is explicit: a single node record carries
//! capability flags, and downstream constraint code must test membership
//! ("is this node in the set with outbound legs?"), never node-type
//! exclusivity. A hub is simultaneously a manufacturing site, a transit
//! point, and a demand destination, and every constraint family must treat
//! it as all three at once.

use serde::{Deserialize, Serialize};

/// A location in the network: manufacturing site, storage hub, demand
/// destination, or any combination of the three.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique node identifier.
    pub id: String,
    /// Capability flags. Never tested by "node type" — always by flag.
    pub capabilities: NodeCapabilities,
    /// Manufacturing parameters, present only when `can_manufacture`.
    pub manufacturing: Option<ManufacturingParams>,
}

/// What a node is permitted to do. Any subset may be set simultaneously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeCapabilities {
    /// Can run production (consumes labor hours, produces ambient inventory).
    pub can_manufacture: bool,
    /// Can hold ambient-state inventory.
    pub can_store_ambient: bool,
    /// Can hold frozen-state inventory.
    pub can_store_frozen: bool,
    /// Converts arriving frozen shipments into thawed inventory.
    pub can_thaw_on_arrival: bool,
    /// Has forecast demand entries (is a destination).
    pub has_demand: bool,
}

/// Per-day production parameters for a manufacturing node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ManufacturingParams {
    /// Production throughput, units per hour.
    pub rate_units_per_hour: f64,
    /// Fixed daily startup time, hours.
    pub startup_hours: f64,
    /// Fixed daily shutdown time, hours.
    pub shutdown_hours: f64,
    /// Per-changeover time when more than one SKU runs in a day, hours.
    pub changeover_hours: f64,
}

impl Node {
    /// A destination-only node: no manufacturing, ambient storage, demand.
    pub fn destination(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            capabilities: NodeCapabilities {
                can_store_ambient: true,
                has_demand: true,
                ..Default::default()
            },
            manufacturing: None,
        }
    }

    /// A manufacturing node with the given throughput parameters.
    pub fn manufacturing(id: impl Into<String>, params: ManufacturingParams) -> Self {
        Self {
            id: id.into(),
            capabilities: NodeCapabilities {
                can_manufacture: true,
                can_store_ambient: true,
                ..Default::default()
            },
            manufacturing: Some(params),
        }
    }

    /// A frozen intermediate buffer: frozen storage only, no demand.
    pub fn frozen_buffer(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            capabilities: NodeCapabilities {
                can_store_frozen: true,
                ..Default::default()
            },
            manufacturing: None,
        }
    }

    /// Compute the variable daily labor overhead for this node, given the
    /// number of distinct SKUs produced that day (F3).
    pub fn overhead_hours(&self, distinct_products_today: u32) -> f64 {
        let params = match &self.manufacturing {
            Some(p) => p,
            None => return 0.0,
        };
        let changeovers = distinct_products_today.saturating_sub(1) as f64;
        params.startup_hours + params.shutdown_hours + changeovers * params.changeover_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overhead_zero_products_equals_startup_shutdown() {
        let node = Node::manufacturing(
            "plant",
            ManufacturingParams {
                rate_units_per_hour: 1000.0,
                startup_hours: 0.5,
                shutdown_hours: 0.5,
                changeover_hours: 0.25,
            },
        );
        assert_eq!(node.overhead_hours(1), 1.0);
        assert_eq!(node.overhead_hours(3), 1.5);
    }

    #[test]
    fn overhead_zero_for_non_manufacturing_node() {
        let node = Node::destination("spoke");
        assert_eq!(node.overhead_hours(5), 0.0);
    }

    #[test]
    fn hub_can_carry_all_capabilities_at_once() {
        let mut node = Node::manufacturing(
            "hub",
            ManufacturingParams {
                rate_units_per_hour: 500.0,
                startup_hours: 0.0,
                shutdown_hours: 0.0,
                changeover_hours: 0.0,
            },
        );
        node.capabilities.has_demand = true;
        node.capabilities.can_store_frozen = true;
        assert!(node.capabilities.can_manufacture);
        assert!(node.capabilities.has_demand);
        assert!(node.capabilities.can_store_frozen);
    }
}
