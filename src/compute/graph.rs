//! Read-only graph view over a reference table.
//!
//! Exposes exactly what the traversal and the evaluator need: per-nuclide
//! decay constants and outgoing weighted edges. Terminal (stable) nuclides
//! are the nodes with no outgoing edges.

use crate::error::DecayResult;
use crate::schema::{DecayBranch, ReferenceTable};

/// Borrowed, side-effect-free view of the decay graph.
#[derive(Debug, Clone, Copy)]
pub struct DecayGraph<'a> {
    table: &'a ReferenceTable,
}

impl<'a> DecayGraph<'a> {
    /// View over `table`.
    pub fn new(table: &'a ReferenceTable) -> Self {
        Self { table }
    }

    /// The underlying reference table.
    #[inline]
    pub fn table(&self) -> &'a ReferenceTable {
        self.table
    }

    /// Decay constant of `id` in 1/s; 0 for stable nuclides.
    pub fn decay_constant(&self, id: &str) -> DecayResult<f64> {
        Ok(self.table.get(id)?.decay_constant())
    }

    /// Outgoing decay edges of `id`, in the table's listed order.
    /// Empty for terminal nuclides.
    pub fn branches(&self, id: &str) -> DecayResult<&'a [DecayBranch]> {
        Ok(self.table.get(id)?.products.as_slice())
    }

    /// Whether `id` has no outgoing edges.
    pub fn is_stable(&self, id: &str) -> DecayResult<bool> {
        Ok(self.table.get(id)?.is_stable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecayError;

    #[test]
    fn test_graph_view() {
        let table = ReferenceTable::builtin();
        let graph = DecayGraph::new(&table);

        let lambda = graph.decay_constant("Po-216").unwrap();
        assert!((lambda - std::f64::consts::LN_2 / 0.145).abs() / lambda < 1e-12);

        let branches = graph.branches("Po-216").unwrap();
        assert_eq!(branches.len(), 1);
        assert_eq!(branches[0].product, "Pb-212");

        assert!(graph.is_stable("Pb-208").unwrap());
        assert_eq!(graph.decay_constant("Pb-208").unwrap(), 0.0);
        assert!(graph.branches("Pb-208").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_id() {
        let table = ReferenceTable::builtin();
        let graph = DecayGraph::new(&table);
        assert!(matches!(
            graph.decay_constant("Unobtainium-1"),
            Err(DecayError::UnknownNuclide(_))
        ));
    }
}
