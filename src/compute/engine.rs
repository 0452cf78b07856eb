//! Mass evolution engine - top-level decay solver.
//!
//! Orchestrates the full query: validate the initial inventory, convert
//! masses to mole counts, enumerate every decay path out of every starting
//! nuclide once, and hand back a reusable evolution object that evaluates
//! the cached chains for arbitrary elapsed times.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{DecayError, DecayResult};
use crate::schema::{DecayBranch, Inventory, NuclideId, ReferenceTable};

use super::{DecayGraph, PathEnumerator, chain_fraction};

/// Avogadro constant, atoms per mole.
pub const AVOGADRO: f64 = 6.02214076e23;

/// Decay solver over one reference table.
///
/// Holds only a borrow of the immutable table; every query is a pure
/// synchronous computation with per-call state, so one engine may be shared
/// freely across threads.
#[derive(Debug, Clone, Copy)]
pub struct DecayEngine<'a> {
    graph: DecayGraph<'a>,
}

impl<'a> DecayEngine<'a> {
    /// Engine over `table`.
    pub fn new(table: &'a ReferenceTable) -> Self {
        Self {
            graph: DecayGraph::new(table),
        }
    }

    /// The underlying reference table.
    #[inline]
    pub fn table(&self) -> &'a ReferenceTable {
        self.graph.table()
    }

    /// Direct decay products of `id` with their branching ratios, in the
    /// table's listed order. Empty for stable nuclides.
    pub fn decay_products(&self, id: &str) -> DecayResult<&'a [DecayBranch]> {
        self.graph.branches(id)
    }

    /// Build the time-evolution of `initial` (a mass inventory, grams or any
    /// fixed mass unit).
    ///
    /// Validates every entry, converts to moles, and enumerates and caches
    /// all decay chains up front; the returned [`MassEvolution`] can then be
    /// queried repeatedly at different times without re-traversing the graph.
    pub fn mass_evolution(&self, initial: &Inventory) -> DecayResult<MassEvolution<'a>> {
        let mut chains = Vec::new();
        let mut sources = 0usize;

        for (id, mass) in initial.iter() {
            let data = self.table().get(id)?;
            if !(mass.is_finite() && mass >= 0.0) {
                return Err(DecayError::InvalidQuantity {
                    quantity: format!("mass of {id}"),
                    value: mass,
                });
            }
            if mass == 0.0 {
                continue;
            }
            sources += 1;
            let moles = mass / data.molar_mass;

            for path in PathEnumerator::new(self.graph, id)? {
                let path = path?;
                let mut nuclides = path.nuclides;
                let target = nuclides.pop().expect("path is never empty");
                chains.push(WeightedChain {
                    target,
                    lambdas: path.lambdas,
                    moles: moles * path.branch_fraction,
                });
            }
        }

        debug!(
            "cached {} decay chains from {} starting nuclides",
            chains.len(),
            sources
        );

        Ok(MassEvolution {
            table: self.table(),
            chains,
        })
    }

    /// Summary statistics of a mass inventory against this table.
    pub fn stats(&self, inventory: &Inventory) -> DecayResult<InventoryStats> {
        let mut total_mass = 0.0f64;
        let mut total_moles = 0.0f64;
        let mut activity_bq = 0.0f64;

        for (id, mass) in inventory.iter() {
            let data = self.table().get(id)?;
            if !(mass.is_finite() && mass >= 0.0) {
                return Err(DecayError::InvalidQuantity {
                    quantity: format!("mass of {id}"),
                    value: mass,
                });
            }
            let moles = mass / data.molar_mass;
            total_mass += mass;
            total_moles += moles;
            activity_bq += data.decay_constant() * moles * AVOGADRO;
        }

        Ok(InventoryStats {
            total_mass,
            total_moles,
            activity_bq,
            nuclides: inventory.len(),
        })
    }
}

/// One cached route: the chain of decay constants from a starting nuclide to
/// `target`, premultiplied by the start's initial moles and the route's
/// cumulative branching fraction.
#[derive(Debug, Clone)]
struct WeightedChain {
    target: NuclideId,
    lambdas: Vec<f64>,
    moles: f64,
}

/// Reusable time-evolution of one initial inventory.
///
/// Produced by [`DecayEngine::mass_evolution`]; [`at`](Self::at) is pure and
/// may be called any number of times with different elapsed times.
pub struct MassEvolution<'a> {
    table: &'a ReferenceTable,
    chains: Vec<WeightedChain>,
}

impl MassEvolution<'_> {
    /// Mass inventory after `t` seconds.
    ///
    /// Moles are accumulated per destination across every cached chain and
    /// converted back to mass through the destination's molar mass. Total
    /// moles are conserved for any `t`; total mass is not (parent and
    /// daughter molar masses differ).
    pub fn at(&self, t: f64) -> DecayResult<Inventory> {
        if !(t.is_finite() && t >= 0.0) {
            return Err(DecayError::InvalidQuantity {
                quantity: "elapsed time".to_string(),
                value: t,
            });
        }

        let mut moles = Inventory::new();
        for chain in &self.chains {
            let fraction = chain_fraction(&chain.lambdas, t);
            moles.add(chain.target.clone(), chain.moles * fraction);
        }

        let mut mass = Inventory::new();
        for (id, n) in moles.iter() {
            let molar_mass = self.table.get(id)?.molar_mass;
            mass.set(id.clone(), n * molar_mass);
        }
        Ok(mass)
    }

    /// Number of cached decay chains.
    #[inline]
    pub fn chain_count(&self) -> usize {
        self.chains.len()
    }
}

/// Summary of a mass inventory: totals and activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryStats {
    /// Sum of all masses, in the inventory's mass unit.
    pub total_mass: f64,
    /// Sum of all mole counts (mass unit assumed grams).
    pub total_moles: f64,
    /// Total activity in becquerels (mass unit assumed grams).
    pub activity_bq: f64,
    /// Number of nuclides with an entry.
    pub nuclides: usize,
}
