//! Error taxonomy for the decay solver.

use crate::schema::NuclideId;

/// Errors surfaced by table validation and evolution queries.
///
/// Degenerate Bateman roots are not represented here: they are handled
/// internally by the evaluator and never reach the caller.
#[derive(Debug, thiserror::Error)]
pub enum DecayError {
    /// An identifier was not present in the reference table.
    #[error("unknown nuclide: {0}")]
    UnknownNuclide(NuclideId),
    /// A supplied mass, mole count, or elapsed time was negative or non-finite.
    #[error("invalid {quantity}: {value}")]
    InvalidQuantity { quantity: String, value: f64 },
    /// The reference table violates a structural invariant (branching sums,
    /// non-positive constants, or a traversal exceeding the depth guard).
    #[error("reference data integrity: {0}")]
    DataIntegrity(String),
}

pub type DecayResult<T> = Result<T, DecayError>;
