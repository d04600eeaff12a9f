//! Shelf-life policy: fixed constants and the age/eligibility checks built
//! from them.

use crate::network::product::ProductState;

/// Ambient shelf life, days.
pub const AMBIENT_SHELF_LIFE_DAYS: i64 = 17;
/// Frozen shelf life, days.
pub const FROZEN_SHELF_LIFE_DAYS: i64 = 120;
/// Thawed shelf life, days.
pub const THAWED_SHELF_LIFE_DAYS: i64 = 14;
/// Minimum remaining shelf life required at a demand destination on
/// delivery.
pub const MIN_REMAINING_SHELF_LIFE_DAYS: i64 = 7;

/// Shelf life, in days, for a given state.
pub fn shelf_life_days(state: ProductState) -> i64 {
    match state {
        ProductState::Ambient => AMBIENT_SHELF_LIFE_DAYS,
        ProductState::Frozen => FROZEN_SHELF_LIFE_DAYS,
        ProductState::Thawed => THAWED_SHELF_LIFE_DAYS,
    }
}

/// Whether a cohort with the given state and age (in days since its
/// state-entry date) is still within its shelf life (section 3.2's
/// age-validity invariant).
pub fn is_within_shelf_life(state: ProductState, age_days: i64) -> bool {
    age_days >= 0 && age_days <= shelf_life_days(state)
}

/// Whether a cohort with `age_days` since state-entry is eligible to
/// satisfy demand today (F8): remaining shelf life must be at least
/// [`MIN_REMAINING_SHELF_LIFE_DAYS`].
pub fn is_eligible_for_demand(state: ProductState, age_days: i64) -> bool {
    shelf_life_days(state) - age_days >= MIN_REMAINING_SHELF_LIFE_DAYS
}

/// Oldest `prod_date` (relative to `date`) still admissible for demand in
/// sliding-window mode (F6): production dated before this is too old to
/// satisfy demand on `date`.
pub fn sliding_window_floor(date_ordinal: i64, state: ProductState) -> i64 {
    date_ordinal - (shelf_life_days(state) - MIN_REMAINING_SHELF_LIFE_DAYS)
}
