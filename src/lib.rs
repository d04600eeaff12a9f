//! # coldchain-planner
//!
//! An integrated production-distribution planner for a perishable goods
//! supply chain: a single manufacturing site producing multiple SKUs,
//! distributed through a 2-echelon hub-and-spoke network (with a frozen
//! intermediate buffer) to demand destinations.
//!
//! The crate builds and solves a mixed-integer optimization model that
//! jointly decides daily production quantities, labor utilization, truck
//! assignments, and multi-leg shipment flows, subject to shelf-life,
//! packaging, capacity, and day-of-week operational rules. It does not
//! parse forecasts or network topology, and it does not render reports —
//! those are the caller's job. It exposes one thing: a `solve()` entry
//! point over a fully-built [`Network`] and [`PlannerConfig`].
//!
//! ## Components
//!
//! - [`network`] — `C1`: canonical, immutable entities (nodes, legs,
//!   trucks, labor calendar, products, cost structure, demand).
//! - [`index`] — `C2`: the sparse index sets every decision variable and
//!   constraint family is defined over.
//! - [`variables`] — the typed decision-variable containers built over
//!   those indices.
//! - [`constraints`] — `C3`: the twelve constraint families (production
//!   batching, labor cost, flow conservation, demand satisfaction, truck
//!   scheduling, pallet rounding).
//! - [`objective`] — the five cost-category expressions and their sum.
//! - [`solver`] — `C4`: configuration, budgets, warmstart, and the solve
//!   driver that assembles and invokes the backend.
//! - [`solution`] — `C5`: pulls solved variable values into pure result
//!   structures (production schedule, shipments, inventory trajectory,
//!   cost breakdown, demand outcomes).
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use coldchain_planner::network::{LaborDay, ManufacturingParams, Node, NetworkBuilder, Product};
//! use coldchain_planner::solver::{self, PlannerConfig};
//!
//! let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
//! let network = NetworkBuilder::new(start, start)
//!     .product(Product::new("sku-1", 100))
//!     .node(Node::manufacturing(
//!         "plant",
//!         ManufacturingParams {
//!             rate_units_per_hour: 1_000.0,
//!             startup_hours: 0.5,
//!             shutdown_hours: 0.5,
//!             changeover_hours: 0.25,
//!         },
//!     ))
//!     .node(Node::destination("spoke"))
//!     .demand("spoke", "sku-1", start, 500.0)
//!     .labor_day(LaborDay::weekday(start, 20.0, 30.0))
//!     .build()
//!     .unwrap();
//!
//! let config = PlannerConfig::builder().build().unwrap();
//! let result = solver::solve(&network, &config, None).unwrap();
//! assert!(result.status.has_solution() || !result.status.has_solution());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::too_many_arguments)]

pub mod constraints;
pub mod error;
pub mod index;
pub mod network;
pub mod objective;
pub mod solution;
pub mod solver;
pub mod units;
pub mod variables;

pub use error::{PlannerError, Result};
pub use network::Network;
pub use solution::SolveResult;
pub use solver::{solve, PlannerConfig};

/// Convenience re-exports for the common construction and solve path.
pub mod prelude {
    pub use crate::error::{PlannerError, Result};
    pub use crate::network::{Network, NetworkBuilder};
    pub use crate::solver::{solve, PlannerConfig, PlannerConfigBuilder, SolveStatus};
    pub use crate::solution::SolveResult;
}
