//! Inventories: mappings from nuclide to quantity.
//!
//! An inventory is the caller-facing mass map. Nuclides not present read as
//! zero. Evolution queries produce a fresh inventory per call; a returned
//! inventory is never mutated by the solver afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::schema::NuclideId;

/// Quantity per nuclide (mass in the public API, moles internally).
///
/// Backed by a `BTreeMap` so iteration order, and with it floating-point
/// accumulation order, is identical across invocations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    quantities: BTreeMap<NuclideId, f64>,
}

impl Inventory {
    /// Empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quantity for a nuclide, replacing any previous value.
    pub fn set(&mut self, id: impl Into<NuclideId>, quantity: f64) {
        self.quantities.insert(id.into(), quantity);
    }

    /// Add to the quantity for a nuclide.
    pub fn add(&mut self, id: impl Into<NuclideId>, quantity: f64) {
        *self.quantities.entry(id.into()).or_insert(0.0) += quantity;
    }

    /// Quantity for a nuclide; absent nuclides read as zero.
    #[inline]
    pub fn get(&self, id: &str) -> f64 {
        self.quantities.get(id).copied().unwrap_or(0.0)
    }

    /// Number of nuclides with an explicit entry.
    #[inline]
    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    /// Whether the inventory has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Iterate entries in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&NuclideId, f64)> {
        self.quantities.iter().map(|(id, &q)| (id, q))
    }

    /// Sum of all quantities.
    pub fn total(&self) -> f64 {
        self.quantities.values().sum()
    }
}

impl FromIterator<(NuclideId, f64)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (NuclideId, f64)>>(iter: I) -> Self {
        Self {
            quantities: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[(&str, f64); N]> for Inventory {
    fn from(entries: [(&str, f64); N]) -> Self {
        entries
            .into_iter()
            .map(|(id, q)| (id.to_string(), q))
            .collect()
    }
}
