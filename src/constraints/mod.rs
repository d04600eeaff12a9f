//! Constraint Assembler (`C3`): adds the twelve constraint families onto
//! a `good_lp` model, in the order a reader would expect to derive them —
//! production first, then labor, then flow, then demand, then the
//! physical realization (trucks, pallets).

pub mod demand;
pub mod inventory;
pub mod labor;
pub mod pallet;
pub mod production;
pub mod truck;

use good_lp::SolverModel;

use crate::index::Indices;
use crate::network::Network;
use crate::solver::config::PlannerConfig;
use crate::variables::Variables;

/// Add every constraint family applicable under `config` to `model`.
pub fn assemble<P: SolverModel>(
    model: P,
    network: &Network,
    indices: &Indices,
    vars: &Variables,
    config: &PlannerConfig,
) -> P {
    let model = production::add(model, network, indices, vars, config);
    let model = labor::add(model, network, vars);
    let model = inventory::add(model, network, indices, vars, config);
    let model = demand::add(model, network, vars, config);
    let model = truck::add(model, network, indices, vars);
    pallet::add(model, indices, vars)
}
