//! Error types for the production-distribution planner.
//!
//! Only `ConfigurationError` is an exception type in the Rust sense: it is
//! raised before or during model construction and surfaced to the caller as
//! `Err`. Solve-time outcomes (`Infeasible`, `TimeLimit`, `Unbounded`,
//! solver failures) are never thrown — they are data carried in
//! [`crate::solver::SolveStatus`] inside the returned `SolveResult`, per the
//! propagation policy in spec.md section 7.

use thiserror::Error;

/// Result type alias using [`PlannerError`].
pub type Result<T> = std::result::Result<T, PlannerError>;

/// Errors raised while assembling the network, indices, or MIP model.
///
/// Every variant here corresponds to a contract violation that must fail
/// at construction time, never during solve.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    /// A labor calendar entry is missing for a date inside the horizon.
    #[error("missing labor day for {date}")]
    MissingLaborDay {
        /// The date with no calendar entry.
        date: chrono::NaiveDate,
    },

    /// A leg, truck, or demand entry references a node id that was never
    /// registered with the network.
    #[error("unknown node id: {id}")]
    UnknownNodeId {
        /// The offending id.
        id: String,
    },

    /// A forecast, production, or cost entry references a product id that
    /// was never registered.
    #[error("unknown product id: {id}")]
    UnknownProductId {
        /// The offending id.
        id: String,
    },

    /// A leg's endpoints or transit days violate the entity contract.
    #[error("invalid leg {origin} -> {destination}: {reason}")]
    InvalidLeg {
        /// Leg origin node id.
        origin: String,
        /// Leg destination node id.
        destination: String,
        /// Why the leg is invalid.
        reason: String,
    },

    /// A product's mix size is zero, which would make batch enforcement
    /// (F1) divide by zero.
    #[error("mix size of zero for product {product}")]
    ZeroMixSize {
        /// The offending product id.
        product: String,
    },

    /// A forecast entry carries negative demand.
    #[error("negative demand for ({destination}, {product}, {date}): {units}")]
    NegativeDemand {
        /// Destination node id.
        destination: String,
        /// Product id.
        product: String,
        /// Demand date.
        date: chrono::NaiveDate,
        /// The negative value supplied.
        units: f64,
    },

    /// A required cost parameter is missing for an entity that needs it.
    #[error("missing cost parameter: {0}")]
    MissingCostParameter(String),

    /// Planning horizon is malformed (`end < start`).
    #[error("invalid horizon: start {start} is after end {end}")]
    InvalidHorizon {
        /// Horizon start date.
        start: chrono::NaiveDate,
        /// Horizon end date.
        end: chrono::NaiveDate,
    },

    /// Catch-all for other contract violations discovered during
    /// construction (unknown truck id referenced by a shipment, duplicate
    /// entity id, etc).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The solver backend could not be invoked at all (crashed, returned a
    /// malformed response). Distinct from `SolveStatus::Infeasible` /
    /// `TimeLimit`, which are data, not errors.
    #[error("solver error: {0}")]
    Solver(String),
}

impl PlannerError {
    /// Build a generic configuration error from a message.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Build a solver plumbing error from a message.
    pub fn solver(msg: impl Into<String>) -> Self {
        Self::Solver(msg.into())
    }
}
