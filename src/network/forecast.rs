//! Demand forecast entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single `(destination, product, date) -> demand_units` forecast entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Demand quantity, units. Must be non-negative.
    pub demand_units: f64,
}

/// Key identifying a forecast entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForecastKey {
    /// Destination node id.
    pub destination: String,
    /// Product id.
    pub product: String,
    /// Demand date.
    pub date: NaiveDate,
}
