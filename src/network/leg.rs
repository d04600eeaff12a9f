//! Route legs and the arrival-state resolver.

use super::node::Node;
use super::product::ProductState;
use serde::{Deserialize, Serialize};

/// A directed route edge between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    /// Origin node id.
    pub origin: String,
    /// Destination node id.
    pub destination: String,
    /// Transit time, whole days, non-negative.
    pub transit_days: u32,
    /// State the shipment departs origin in.
    pub departure_state: ProductState,
    /// Per-unit transport cost.
    pub cost_per_unit: f64,
}

impl Leg {
    /// Resolve the state inventory arrives in at `destination`.
    ///
    /// A frozen leg landing on a thaw-capable node produces thawed
    /// inventory with the age clock restarted at the delivery date; every
    /// other case simply preserves the departure state. This is the single
    /// arrival-state resolver section 9 calls for, in place of leg
    /// subclasses per departure state.
    pub fn arrival_state(&self, destination: &Node) -> ProductState {
        if self.departure_state == ProductState::Frozen && destination.capabilities.can_thaw_on_arrival {
            ProductState::Thawed
        } else {
            self.departure_state
        }
    }
}
