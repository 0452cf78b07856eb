//! Analytic decay-chain solver for radioactive nuclide networks.
//!
//! This crate computes the exact time-evolution of the mass of every nuclide
//! in a decay network: given how much of each nuclide exists at t = 0, it
//! answers how much of each exists at any later time, using the generalized
//! Bateman solution rather than numerical integration.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Reference-table and inventory types (serde-backed)
//! - `compute`: The solver (graph view, path enumeration, Bateman
//!   evaluation, mass evolution engine)
//!
//! # Example
//!
//! ```rust
//! use nuclide_decay::{
//!     compute::DecayEngine,
//!     schema::{Inventory, ReferenceTable},
//! };
//!
//! // Bundled dataset: the four natural decay series + fission chains
//! let table = ReferenceTable::builtin();
//! let engine = DecayEngine::new(&table);
//!
//! // 1000 g of Po-216; the graph is traversed once...
//! let evolution = engine
//!     .mass_evolution(&Inventory::from([("Po-216", 1000.0)]))
//!     .unwrap();
//!
//! // ...then any number of times may be queried.
//! let after_5s = evolution.at(5.0).unwrap();
//! println!("Pb-212 after 5 s: {} g", after_5s.get("Pb-212"));
//! ```

pub mod compute;
pub mod error;
pub mod schema;

// Re-export commonly used types
pub use compute::{DecayEngine, InventoryStats, MassEvolution};
pub use error::{DecayError, DecayResult};
pub use schema::{Inventory, NuclideData, NuclideId, ReferenceTable};
