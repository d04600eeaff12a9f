//! Truck schedules: fixed day-of-week routes, optionally with one or more
//! intermediate drops.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::units::{PALLETS_PER_TRUCK, UNITS_PER_TRUCK};

/// Whether a truck departs in the morning (prior-day production only) or
/// the afternoon (same-day production loadable too). See F10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Departure {
    /// Loads inventory available at end-of-day `t - 1`.
    Morning,
    /// Loads inventory available at end-of-day `t` (same-day production
    /// included).
    Afternoon,
}

/// A single drop on a truck's route: a destination and the leg it rides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Destination node id for this drop.
    pub destination: String,
    /// Additional transit days from the truck's origin to reach this drop,
    /// on top of the truck's base departure time.
    pub transit_days: u32,
}

/// A truck: a fixed day-of-week route with one primary destination and
/// zero or more intermediate drops, all sharing one capacity and one
/// `truck_used` binary per scheduled date (F9).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Truck {
    /// Unique truck identifier.
    pub id: String,
    /// Node this truck departs from.
    pub origin: String,
    /// Primary destination (also represented as a `Stop` internally for
    /// uniform handling alongside `intermediate_stops`).
    pub primary_destination: String,
    /// Transit days to the primary destination.
    pub primary_transit_days: u32,
    /// Any intermediate drops this truck makes before or instead of its
    /// primary destination.
    pub intermediate_stops: Vec<Stop>,
    /// Which weekdays this truck runs.
    pub day_mask: Vec<Weekday>,
    /// Morning or afternoon departure class.
    pub departure: Departure,
    /// Capacity in units. Always `44 * 320 = 14,080` per the glossary, but
    /// carried explicitly rather than assumed.
    pub capacity_units: u32,
}

impl Truck {
    /// Build a truck with the standard 44-pallet capacity.
    pub fn new(
        id: impl Into<String>,
        origin: impl Into<String>,
        primary_destination: impl Into<String>,
        primary_transit_days: u32,
        day_mask: Vec<Weekday>,
        departure: Departure,
    ) -> Self {
        Self {
            id: id.into(),
            origin: origin.into(),
            primary_destination: primary_destination.into(),
            primary_transit_days,
            intermediate_stops: Vec::new(),
            day_mask,
            departure,
            capacity_units: UNITS_PER_TRUCK,
        }
    }

    /// Add an intermediate stop.
    pub fn with_stop(mut self, destination: impl Into<String>, transit_days: u32) -> Self {
        self.intermediate_stops.push(Stop {
            destination: destination.into(),
            transit_days,
        });
        self
    }

    /// Whether this truck runs on the given weekday.
    pub fn runs_on(&self, weekday: Weekday) -> bool {
        self.day_mask.contains(&weekday)
    }

    /// All `(destination, transit_days)` this truck serves, primary first.
    pub fn all_destinations(&self) -> Vec<(String, u32)> {
        let mut out = vec![(self.primary_destination.clone(), self.primary_transit_days)];
        out.extend(
            self.intermediate_stops
                .iter()
                .map(|s| (s.destination.clone(), s.transit_days)),
        );
        out
    }

    /// Capacity expressed in whole pallets (44), per the glossary.
    pub fn capacity_pallets(&self) -> u32 {
        PALLETS_PER_TRUCK
    }
}
