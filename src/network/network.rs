//! The immutable, fully-validated network: `C1`.

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::error::{PlannerError, Result};

use super::forecast::{ForecastEntry, ForecastKey};
use super::inventory::{CostStructure, InitialInventoryEntry};
use super::labor::LaborDay;
use super::leg::Leg;
use super::node::Node;
use super::product::{Product, ProductState};
use super::truck::{Departure, Truck};

/// Planning horizon, inclusive of both endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Horizon {
    /// First date in the planning window.
    pub start: NaiveDate,
    /// Last date in the planning window.
    pub end: NaiveDate,
}

impl Horizon {
    /// Construct a horizon, rejecting `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(PlannerError::InvalidHorizon { start, end });
        }
        Ok(Self { start, end })
    }

    /// All dates in `[start, end]`, inclusive.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }

    /// The horizon extended forward by `max_transit` days, to admit
    /// shipments that depart within `[start, end]` but deliver just beyond
    /// it.
    pub fn extended(&self, max_transit_days: u32) -> Horizon {
        Horizon {
            start: self.start,
            end: self.end + chrono::Duration::days(i64::from(max_transit_days)),
        }
    }
}

/// The fully-assembled, immutable network and calendar: every lookup the
/// rest of the planner needs, none of them fallible once constructed.
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) horizon: Horizon,
    pub(crate) nodes: IndexMap<String, Node>,
    pub(crate) products: IndexMap<String, Product>,
    pub(crate) legs: Vec<Leg>,
    pub(crate) legs_from: IndexMap<String, Vec<usize>>,
    pub(crate) legs_to: IndexMap<String, Vec<usize>>,
    pub(crate) trucks: IndexMap<String, Truck>,
    pub(crate) labor_calendar: IndexMap<NaiveDate, LaborDay>,
    pub(crate) forecast: IndexMap<ForecastKey, ForecastEntry>,
    pub(crate) initial_inventory: Vec<InitialInventoryEntry>,
    pub(crate) cost_structure: CostStructure,
}

impl Network {
    /// The planning horizon.
    pub fn horizon(&self) -> Horizon {
        self.horizon
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Result<&Node> {
        self.nodes
            .get(id)
            .ok_or_else(|| PlannerError::UnknownNodeId { id: id.to_string() })
    }

    /// Look up a product by id.
    pub fn product(&self, id: &str) -> Result<&Product> {
        self.products
            .get(id)
            .ok_or_else(|| PlannerError::UnknownProductId { id: id.to_string() })
    }

    /// Iterate all nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Iterate all products.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Outbound legs from `node`. Membership-based: every node with
    /// registered legs appears here, regardless of its capability flags
    /// (a lesson learned from hub-and-spoke topologies).
    pub fn legs_from(&self, node: &str) -> impl Iterator<Item = &Leg> {
        self.legs_from
            .get(node)
            .into_iter()
            .flatten()
            .map(move |&i| &self.legs[i])
    }

    /// Inbound legs to `node`.
    pub fn legs_to(&self, node: &str) -> impl Iterator<Item = &Leg> {
        self.legs_to
            .get(node)
            .into_iter()
            .flatten()
            .map(move |&i| &self.legs[i])
    }

    /// All legs.
    pub fn legs(&self) -> impl Iterator<Item = &Leg> {
        self.legs.iter()
    }

    /// Maximum transit days over all legs, used to extend the horizon.
    pub fn max_transit_days(&self) -> u32 {
        self.legs.iter().map(|l| l.transit_days).max().unwrap_or(0)
    }

    /// Trucks scheduled to run on `date` (by weekday mask).
    pub fn trucks_on(&self, date: NaiveDate) -> impl Iterator<Item = &Truck> {
        let weekday = date.weekday();
        self.trucks.values().filter(move |t| t.runs_on(weekday))
    }

    /// All trucks, regardless of schedule.
    pub fn trucks(&self) -> impl Iterator<Item = &Truck> {
        self.trucks.values()
    }

    /// Whether any truck serves the leg `(origin, destination)` at all, and
    /// if so, which dates it actually runs and under which departure class.
    ///
    /// `None` means the leg is not truck-served and moves unrestricted by
    /// any schedule (F9/F10 do not apply). `Some(schedule)` means the leg
    /// is a truck-served leg: it may only be used on dates present in
    /// `schedule`, and a cohort may only ride a given date under the
    /// departure class recorded for it (`Afternoon` if any truck serving
    /// that date is an afternoon departure, `Morning` otherwise — the more
    /// permissive class wins when multiple trucks cover the same date).
    pub fn truck_gate_for_leg(
        &self,
        origin: &str,
        destination: &str,
    ) -> Option<std::collections::HashMap<NaiveDate, Departure>> {
        let mut gate: Option<std::collections::HashMap<NaiveDate, Departure>> = None;
        for truck in self.trucks.values() {
            if truck.origin != origin {
                continue;
            }
            if !truck.all_destinations().iter().any(|(d, _)| d == destination) {
                continue;
            }
            let schedule = gate.get_or_insert_with(std::collections::HashMap::new);
            for date in self.horizon.dates() {
                if !truck.runs_on(date.weekday()) {
                    continue;
                }
                schedule
                    .entry(date)
                    .and_modify(|existing| {
                        if matches!(truck.departure, Departure::Afternoon) {
                            *existing = Departure::Afternoon;
                        }
                    })
                    .or_insert(truck.departure);
            }
        }
        gate
    }

    /// Labor rules for `date`. Missing dates are a configuration error,
    /// never a silent default.
    pub fn labor_day(&self, date: NaiveDate) -> Result<&LaborDay> {
        self.labor_calendar
            .get(&date)
            .ok_or(PlannerError::MissingLaborDay { date })
    }

    /// Demand for `(destination, product, date)`, or `None` if there is no
    /// forecast entry (treated as zero demand, not an error).
    pub fn demand(&self, destination: &str, product: &str, date: NaiveDate) -> Option<f64> {
        self.forecast
            .get(&ForecastKey {
                destination: destination.to_string(),
                product: product.to_string(),
                date,
            })
            .map(|e| e.demand_units)
    }

    /// All forecast entries.
    pub fn forecast_entries(&self) -> impl Iterator<Item = (&ForecastKey, &ForecastEntry)> {
        self.forecast.iter()
    }

    /// Initial inventory entries.
    pub fn initial_inventory(&self) -> impl Iterator<Item = &InitialInventoryEntry> {
        self.initial_inventory.iter()
    }

    /// Cost structure.
    pub fn cost_structure(&self) -> &CostStructure {
        &self.cost_structure
    }

    /// Validate that every date in the horizon has a labor calendar entry.
    /// Construction-time check.
    pub fn validate_labor_calendar(&self) -> Result<()> {
        for date in self.horizon.dates() {
            self.labor_day(date)?;
        }
        Ok(())
    }
}

/// State inventory arrives in on a frozen-from-manufacturing cohort. Small
/// helper used by callers composing sparse index sets.
pub fn ambient_state() -> ProductState {
    ProductState::Ambient
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::builder::NetworkBuilder;
    use crate::network::labor::LaborDay;
    use crate::network::node::{ManufacturingParams, Node};
    use crate::network::product::Product;

    fn one_day_network() -> Network {
        let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        NetworkBuilder::new(start, start)
            .product(Product::new("sku", 100))
            .node(Node::manufacturing(
                "plant",
                ManufacturingParams {
                    rate_units_per_hour: 1000.0,
                    startup_hours: 0.5,
                    shutdown_hours: 0.5,
                    changeover_hours: 0.25,
                },
            ))
            .labor_day(LaborDay::weekday(start, 20.0, 30.0))
            .build()
            .unwrap()
    }

    #[test]
    fn missing_labor_day_is_configuration_error() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 1, 6).unwrap();
        let result = NetworkBuilder::new(start, end)
            .product(Product::new("sku", 100))
            .labor_day(LaborDay::weekday(start, 20.0, 30.0))
            .build();
        assert!(matches!(result, Err(PlannerError::MissingLaborDay { .. })));
    }

    #[test]
    fn unknown_node_lookup_fails() {
        let network = one_day_network();
        assert!(matches!(
            network.node("nowhere"),
            Err(PlannerError::UnknownNodeId { .. })
        ));
    }

    #[test]
    fn horizon_extended_pushes_end_forward() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let horizon = Horizon::new(start, start).unwrap();
        let extended = horizon.extended(4);
        assert_eq!(extended.end, start + chrono::Duration::days(4));
    }
}
