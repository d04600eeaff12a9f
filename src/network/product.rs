//! Product entities.

use crate::units::UNITS_PER_CASE;
use serde::{Deserialize, Serialize};

/// A stock-keeping unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: String,
    /// Units per case. Fixed at 10 across all products but carried
    /// per-product so callers never have to special-case the constant.
    pub units_per_case: u32,
    /// Units per pallet. Fixed at 320 across all products.
    pub units_per_pallet: u32,
    /// Integer batch size production must round to, when batch tracking
    /// is enabled (F1).
    pub units_per_mix: u32,
}

impl Product {
    /// Build a product with the standard case/pallet packaging constants.
    pub fn new(id: impl Into<String>, units_per_mix: u32) -> Self {
        Self {
            id: id.into(),
            units_per_case: UNITS_PER_CASE,
            units_per_pallet: crate::units::UNITS_PER_PALLET,
            units_per_mix,
        }
    }
}

/// The state a unit of a product can be stored/shipped in.
///
/// Controls which shelf-life clock applies and which nodes may hold the
/// inventory (section 3.2's state-validity invariant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductState {
    /// Ambient-stored, 17-day shelf life.
    Ambient,
    /// Frozen-stored, 120-day shelf life.
    Frozen,
    /// Thawed from frozen on arrival, 14-day shelf life with a restarted
    /// age clock.
    Thawed,
}
