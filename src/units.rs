//! Packaging unit conversions (case / pallet / mix).
//!
//! Centralizes the arithmetic spec.md fixes as constants so call sites never
//! repeat `320.0` or `10.0` as a magic number.

/// Units per case. Fixed across all products.
pub const UNITS_PER_CASE: u32 = 10;

/// Units per pallet. Fixed across all products.
pub const UNITS_PER_PALLET: u32 = 320;

/// Units per truck (44 pallets).
pub const UNITS_PER_TRUCK: u32 = 44 * UNITS_PER_PALLET;

/// Pallets per truck.
pub const PALLETS_PER_TRUCK: u32 = 44;

/// Ceiling-divide `units` into whole pallets.
pub fn pallets_for(units: f64) -> u64 {
    if units <= 0.0 {
        return 0;
    }
    (units / f64::from(UNITS_PER_PALLET)).ceil() as u64
}

/// Whether `units` is an exact multiple of `mix_size` (within floating tolerance).
pub fn is_exact_mix_multiple(units: f64, mix_size: u32) -> bool {
    if mix_size == 0 {
        return units == 0.0;
    }
    let mixes = units / f64::from(mix_size);
    (mixes - mixes.round()).abs() < 1e-6
}
