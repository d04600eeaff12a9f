//! Network & Calendar Model (`C1`): canonical, immutable entities loaded
//! once per solve.

pub mod builder;
pub mod forecast;
pub mod inventory;
pub mod labor;
pub mod leg;
#[allow(clippy::module_inception)]
pub mod network;
pub mod node;
pub mod product;
pub mod shelf_life;
pub mod truck;

pub use builder::NetworkBuilder;
pub use forecast::{ForecastEntry, ForecastKey};
pub use inventory::{CostStructure, InitialInventoryEntry, StorageCost};
pub use labor::LaborDay;
pub use leg::Leg;
pub use network::{Horizon, Network};
pub use node::{ManufacturingParams, Node, NodeCapabilities};
pub use product::{Product, ProductState};
pub use truck::{Departure, Stop, Truck};
