//! Fluent builder over `C1` entities, in the same
//! `ProblemSpecBuilder`/`TepProblemBuilder` idiom used elsewhere in this
//! codebase. `C1` is a read interface; parsing is out of scope, but
//! *something* has to hand the typed entities to the planner.

use chrono::NaiveDate;
use indexmap::IndexMap;

use crate::error::{PlannerError, Result};

use super::forecast::{ForecastEntry, ForecastKey};
use super::inventory::{CostStructure, InitialInventoryEntry};
use super::labor::LaborDay;
use super::leg::Leg;
use super::network::{Horizon, Network};
use super::node::Node;
use super::product::Product;
use super::truck::Truck;

/// Builds a [`Network`] from individually-added entities, validating
/// cross-references at `build()` time.
#[derive(Debug, Clone)]
pub struct NetworkBuilder {
    start: NaiveDate,
    end: NaiveDate,
    nodes: IndexMap<String, Node>,
    products: IndexMap<String, Product>,
    legs: Vec<Leg>,
    trucks: IndexMap<String, Truck>,
    labor_calendar: IndexMap<NaiveDate, LaborDay>,
    forecast: IndexMap<ForecastKey, ForecastEntry>,
    initial_inventory: Vec<InitialInventoryEntry>,
    cost_structure: CostStructure,
}

impl NetworkBuilder {
    /// Start a new builder over the given planning horizon.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            nodes: IndexMap::new(),
            products: IndexMap::new(),
            legs: Vec::new(),
            trucks: IndexMap::new(),
            labor_calendar: IndexMap::new(),
            forecast: IndexMap::new(),
            initial_inventory: Vec::new(),
            cost_structure: CostStructure {
                production_cost_per_unit: std::collections::HashMap::new(),
                storage_cost: std::collections::HashMap::new(),
                shortage_penalty_per_unit: 0.0,
            },
        }
    }

    /// Register a node.
    pub fn node(mut self, node: Node) -> Self {
        self.nodes.insert(node.id.clone(), node);
        self
    }

    /// Register a product.
    pub fn product(mut self, product: Product) -> Self {
        self.products.insert(product.id.clone(), product);
        self
    }

    /// Register a leg.
    pub fn leg(mut self, leg: Leg) -> Self {
        self.legs.push(leg);
        self
    }

    /// Register a truck.
    pub fn truck(mut self, truck: Truck) -> Self {
        self.trucks.insert(truck.id.clone(), truck);
        self
    }

    /// Register a labor calendar entry.
    pub fn labor_day(mut self, day: LaborDay) -> Self {
        self.labor_calendar.insert(day.date, day);
        self
    }

    /// Register a forecast entry.
    pub fn demand(mut self, destination: impl Into<String>, product: impl Into<String>, date: NaiveDate, units: f64) -> Self {
        self.forecast.insert(
            ForecastKey {
                destination: destination.into(),
                product: product.into(),
                date,
            },
            ForecastEntry { demand_units: units },
        );
        self
    }

    /// Register an initial inventory entry.
    pub fn initial_inventory(mut self, entry: InitialInventoryEntry) -> Self {
        self.initial_inventory.push(entry);
        self
    }

    /// Set the per-unit production cost for a product.
    pub fn production_cost(mut self, product: impl Into<String>, cost_per_unit: f64) -> Self {
        self.cost_structure
            .production_cost_per_unit
            .insert(product.into(), cost_per_unit);
        self
    }

    /// Set storage cost parameters for a `(node, state)` pair.
    pub fn storage_cost(
        mut self,
        node: impl Into<String>,
        state: super::product::ProductState,
        cost: super::inventory::StorageCost,
    ) -> Self {
        self.cost_structure
            .storage_cost
            .insert((node.into(), state), cost);
        self
    }

    /// Set the per-unit shortage penalty.
    pub fn shortage_penalty(mut self, penalty_per_unit: f64) -> Self {
        self.cost_structure.shortage_penalty_per_unit = penalty_per_unit;
        self
    }

    /// Validate all cross-references and finalize the network.
    pub fn build(self) -> Result<Network> {
        let horizon = Horizon::new(self.start, self.end)?;

        for leg in &self.legs {
            if !self.nodes.contains_key(&leg.origin) {
                return Err(PlannerError::InvalidLeg {
                    origin: leg.origin.clone(),
                    destination: leg.destination.clone(),
                    reason: format!("unknown origin node {}", leg.origin),
                });
            }
            if !self.nodes.contains_key(&leg.destination) {
                return Err(PlannerError::InvalidLeg {
                    origin: leg.origin.clone(),
                    destination: leg.destination.clone(),
                    reason: format!("unknown destination node {}", leg.destination),
                });
            }
        }

        for truck in self.trucks.values() {
            if !self.nodes.contains_key(&truck.origin) {
                return Err(PlannerError::UnknownNodeId { id: truck.origin.clone() });
            }
            for (dest, _) in truck.all_destinations() {
                if !self.nodes.contains_key(&dest) {
                    return Err(PlannerError::UnknownNodeId { id: dest });
                }
                // F9/F10 tie `truck_load` to the shipment flow on the
                // matching `Leg` (constraints/truck.rs): a stop with no
                // corresponding leg would silently lose that linkage during
                // constraint assembly rather than failing loudly here.
                if !self.legs.iter().any(|l| l.origin == truck.origin && l.destination == dest) {
                    return Err(PlannerError::Configuration(format!(
                        "truck {} stops at {} but no leg {} -> {} exists",
                        truck.id, dest, truck.origin, dest
                    )));
                }
            }
        }

        for key in self.forecast.keys() {
            if !self.nodes.contains_key(&key.destination) {
                return Err(PlannerError::UnknownNodeId { id: key.destination.clone() });
            }
            if !self.products.contains_key(&key.product) {
                return Err(PlannerError::UnknownProductId { id: key.product.clone() });
            }
        }
        for entry in &self.forecast {
            if entry.1.demand_units < 0.0 {
                return Err(PlannerError::NegativeDemand {
                    destination: entry.0.destination.clone(),
                    product: entry.0.product.clone(),
                    date: entry.0.date,
                    units: entry.1.demand_units,
                });
            }
        }

        for product in self.products.values() {
            if product.units_per_mix == 0 {
                return Err(PlannerError::ZeroMixSize {
                    product: product.id.clone(),
                });
            }
        }

        let mut legs_from: IndexMap<String, Vec<usize>> = IndexMap::new();
        let mut legs_to: IndexMap<String, Vec<usize>> = IndexMap::new();
        for (i, leg) in self.legs.iter().enumerate() {
            legs_from.entry(leg.origin.clone()).or_default().push(i);
            legs_to.entry(leg.destination.clone()).or_default().push(i);
        }

        let network = Network {
            horizon,
            nodes: self.nodes,
            products: self.products,
            legs: self.legs,
            legs_from,
            legs_to,
            trucks: self.trucks,
            labor_calendar: self.labor_calendar,
            forecast: self.forecast,
            initial_inventory: self.initial_inventory,
            cost_structure: self.cost_structure,
        };

        network.validate_labor_calendar()?;

        tracing::debug!(
            nodes = network.nodes.len(),
            products = network.products.len(),
            legs = network.legs.len(),
            trucks = network.trucks.len(),
            forecast_entries = network.forecast.len(),
            "network constructed"
        );

        Ok(network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::node::Node;
    use crate::network::product::Product;

    #[test]
    fn leg_with_unknown_origin_fails() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let result = NetworkBuilder::new(start, start)
            .node(Node::destination("b"))
            .leg(Leg {
                origin: "a".into(),
                destination: "b".into(),
                transit_days: 1,
                departure_state: super::super::product::ProductState::Ambient,
                cost_per_unit: 1.0,
            })
            .build();
        assert!(matches!(result, Err(PlannerError::InvalidLeg { .. })));
    }

    #[test]
    fn zero_mix_size_rejected() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let result = NetworkBuilder::new(start, start)
            .product(Product::new("sku", 0))
            .build();
        assert!(matches!(result, Err(PlannerError::ZeroMixSize { .. })));
    }

    #[test]
    fn negative_demand_rejected() {
        let start = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let result = NetworkBuilder::new(start, start)
            .node(Node::destination("b"))
            .product(Product::new("sku", 10))
            .demand("b", "sku", start, -5.0)
            .build();
        assert!(matches!(result, Err(PlannerError::NegativeDemand { .. })));
    }
}
