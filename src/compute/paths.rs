//! Path enumeration over the decay graph.
//!
//! Every simple path from a starting nuclide to each reachable descendant is
//! enumerated depth-first, carrying the chain of decay constants and the
//! cumulative branching fraction. Paths through re-converging branches (DAG
//! diamonds) are yielded once per distinct route and summed independently by
//! the engine; contributions are linearly additive, so paths are never merged
//! before evaluation.

use crate::error::{DecayError, DecayResult};
use crate::schema::NuclideId;

use super::DecayGraph;

/// Defensive bound on path length. Reference graphs are acyclic, so any
/// traversal deeper than this indicates a malformed table.
pub const MAX_PATH_LEN: usize = 64;

/// One route from a starting nuclide to a reachable descendant.
///
/// Ephemeral: constructed during a single enumeration and consumed after
/// contributing to an accumulated result.
#[derive(Debug, Clone)]
pub struct DecayPath {
    /// Nuclides along the route, starting nuclide first.
    pub nuclides: Vec<NuclideId>,
    /// Decay constant of each nuclide along the route, in 1/s.
    pub lambdas: Vec<f64>,
    /// Product of branching ratios over the route's edges (1 for the
    /// zero-length path).
    pub branch_fraction: f64,
}

impl DecayPath {
    /// The destination nuclide of this route.
    #[inline]
    pub fn target(&self) -> &str {
        self.nuclides.last().expect("path is never empty")
    }

    /// Number of nuclides on the route (always >= 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.nuclides.len()
    }

    /// Paths always hold at least the starting nuclide.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nuclides.is_empty()
    }
}

/// Depth-first path iterator.
///
/// Explicit worklist instead of call recursion, so traversal depth is bounded
/// and enumeration order is defined: pre-order, the current node's path
/// yielded before descending, edges followed in the table's listed order.
/// The trivial zero-length path for the start itself is yielded first.
pub struct PathEnumerator<'a> {
    graph: DecayGraph<'a>,
    stack: Vec<DecayPath>,
    done: bool,
}

impl<'a> PathEnumerator<'a> {
    /// Enumerate all paths out of `start`. Fails immediately when `start` is
    /// not in the table.
    pub fn new(graph: DecayGraph<'a>, start: &str) -> DecayResult<Self> {
        let lambda = graph.decay_constant(start)?;
        let trivial = DecayPath {
            nuclides: vec![start.to_string()],
            lambdas: vec![lambda],
            branch_fraction: 1.0,
        };
        Ok(Self {
            graph,
            stack: vec![trivial],
            done: false,
        })
    }

    /// Extend `path` by each outgoing edge of its target, pushed in reverse
    /// so the first listed branch is explored first.
    fn push_extensions(&mut self, path: &DecayPath) -> DecayResult<()> {
        let branches = self.graph.branches(path.target())?;
        if branches.is_empty() {
            return Ok(());
        }
        if path.len() + 1 > MAX_PATH_LEN {
            return Err(DecayError::DataIntegrity(format!(
                "decay path from {} exceeds {MAX_PATH_LEN} nuclides; reference table may be cyclic",
                path.nuclides[0]
            )));
        }
        for branch in branches.iter().rev() {
            let lambda = self.graph.decay_constant(&branch.product)?;
            let mut nuclides = path.nuclides.clone();
            let mut lambdas = path.lambdas.clone();
            nuclides.push(branch.product.clone());
            lambdas.push(lambda);
            self.stack.push(DecayPath {
                nuclides,
                lambdas,
                branch_fraction: path.branch_fraction * branch.ratio,
            });
        }
        Ok(())
    }
}

impl Iterator for PathEnumerator<'_> {
    type Item = DecayResult<DecayPath>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let path = self.stack.pop()?;
        if let Err(e) = self.push_extensions(&path) {
            self.done = true;
            return Some(Err(e));
        }
        Some(Ok(path))
    }
}
