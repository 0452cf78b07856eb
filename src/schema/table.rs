//! Reference table of nuclide decay data.
//!
//! The table is the immutable input to the solver: for each nuclide it holds
//! the half-life, the molar mass, and the list of decay products with their
//! branching ratios. Tables are constructed once (from JSON or the bundled
//! dataset), validated, and passed explicitly to the compute layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{DecayError, DecayResult};

/// Nuclide identifier, e.g. `"Po-216"`.
pub type NuclideId = String;

/// Branching ratios for one parent must sum to 1 within this tolerance.
pub const BRANCHING_SUM_TOLERANCE: f64 = 1e-6;

/// One outgoing decay edge: parent -> `product` with probability `ratio`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecayBranch {
    /// Identifier of the decay product.
    pub product: NuclideId,
    /// Fraction of decays taking this branch, in (0, 1].
    #[serde(rename = "branchingRatio")]
    pub ratio: f64,
}

/// Static decay data for a single nuclide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NuclideData {
    /// Half-life in seconds. `None` marks a stable nuclide.
    #[serde(rename = "halfLifeSeconds")]
    pub half_life: Option<f64>,
    /// Molar mass in grams per mole.
    #[serde(rename = "molarMassGramsPerMole")]
    pub molar_mass: f64,
    /// Outgoing decay branches, in listed order. Empty for stable nuclides.
    #[serde(default)]
    pub products: Vec<DecayBranch>,
}

impl NuclideData {
    /// Decay constant lambda = ln(2) / half-life, or 0 for stable nuclides.
    ///
    /// A nuclide with no listed products is terminal regardless of its
    /// half-life, so its rate in the solved system is 0.
    #[inline]
    pub fn decay_constant(&self) -> f64 {
        match self.half_life {
            Some(h) if !self.products.is_empty() => std::f64::consts::LN_2 / h,
            _ => 0.0,
        }
    }

    /// A nuclide is stable when it has no half-life or no decay products.
    #[inline]
    pub fn is_stable(&self) -> bool {
        self.half_life.is_none() || self.products.is_empty()
    }
}

/// Immutable nuclide reference table.
///
/// Keys are stored in a `BTreeMap` so traversal and accumulation order are
/// deterministic across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceTable {
    nuclides: BTreeMap<NuclideId, NuclideData>,
}

impl ReferenceTable {
    /// Build a table from nuclide entries and validate it.
    pub fn new(nuclides: BTreeMap<NuclideId, NuclideData>) -> DecayResult<Self> {
        let table = Self { nuclides };
        table.validate()?;
        Ok(table)
    }

    /// Parse a table from its JSON interchange form and validate it.
    pub fn from_json(json: &str) -> DecayResult<Self> {
        let nuclides: BTreeMap<NuclideId, NuclideData> = serde_json::from_str(json)
            .map_err(|e| DecayError::DataIntegrity(format!("reference table JSON: {e}")))?;
        Self::new(nuclides)
    }

    /// The bundled dataset: the four natural decay series (thorium from
    /// Cf-252, actinium from Pu-239, radium from Pu-242, neptunium from
    /// Cf-249) and the Y-99 and Te-135 fission-product chains.
    pub fn builtin() -> Self {
        Self::from_json(include_str!("../../data/nuclides.json"))
            .expect("bundled nuclide dataset is valid")
    }

    /// Look up a nuclide, failing with `UnknownNuclide` for absent ids.
    pub fn get(&self, id: &str) -> DecayResult<&NuclideData> {
        self.nuclides
            .get(id)
            .ok_or_else(|| DecayError::UnknownNuclide(id.to_string()))
    }

    /// Whether the table contains `id`.
    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.nuclides.contains_key(id)
    }

    /// Number of nuclides in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.nuclides.len()
    }

    /// Whether the table is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nuclides.is_empty()
    }

    /// Iterate nuclides in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&NuclideId, &NuclideData)> {
        self.nuclides.iter()
    }

    /// Check structural invariants of the table.
    ///
    /// Half-lives and molar masses must be positive and finite, every decay
    /// product must itself be listed, ratios must lie in (0, 1], and the
    /// branching ratios of each unstable nuclide must sum to 1 within
    /// tolerance. Violations report `DataIntegrity`; they indicate a
    /// malformed table, not a caller mistake, and are never repaired here.
    pub fn validate(&self) -> DecayResult<()> {
        for (id, data) in &self.nuclides {
            if let Some(h) = data.half_life {
                if !(h > 0.0 && h.is_finite()) {
                    return Err(DecayError::DataIntegrity(format!(
                        "{id}: half-life must be positive and finite, got {h}"
                    )));
                }
            }
            if !(data.molar_mass > 0.0 && data.molar_mass.is_finite()) {
                return Err(DecayError::DataIntegrity(format!(
                    "{id}: molar mass must be positive and finite, got {}",
                    data.molar_mass
                )));
            }
            if data.half_life.is_none() && !data.products.is_empty() {
                return Err(DecayError::DataIntegrity(format!(
                    "{id}: stable nuclide lists decay products"
                )));
            }
            for branch in &data.products {
                if !self.nuclides.contains_key(&branch.product) {
                    return Err(DecayError::DataIntegrity(format!(
                        "{id}: decay product {} not in table",
                        branch.product
                    )));
                }
                if !(branch.ratio > 0.0 && branch.ratio <= 1.0) {
                    return Err(DecayError::DataIntegrity(format!(
                        "{id}: branching ratio to {} out of (0, 1]: {}",
                        branch.product, branch.ratio
                    )));
                }
            }
            if !data.products.is_empty() {
                let sum: f64 = data.products.iter().map(|b| b.ratio).sum();
                if (sum - 1.0).abs() > BRANCHING_SUM_TOLERANCE {
                    return Err(DecayError::DataIntegrity(format!(
                        "{id}: branching ratios sum to {sum}, expected 1"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(half_life: Option<f64>, molar_mass: f64, products: &[(&str, f64)]) -> NuclideData {
        NuclideData {
            half_life,
            molar_mass,
            products: products
                .iter()
                .map(|&(product, ratio)| DecayBranch {
                    product: product.to_string(),
                    ratio,
                })
                .collect(),
        }
    }

    fn two_member_table() -> BTreeMap<NuclideId, NuclideData> {
        let mut nuclides = BTreeMap::new();
        nuclides.insert("A-2".to_string(), entry(Some(10.0), 2.0, &[("B-2", 1.0)]));
        nuclides.insert("B-2".to_string(), entry(None, 2.0, &[]));
        nuclides
    }

    #[test]
    fn test_valid_table() {
        let table = ReferenceTable::new(two_member_table()).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.get("A-2").unwrap().decay_constant() > 0.0);
        assert_eq!(table.get("B-2").unwrap().decay_constant(), 0.0);
    }

    #[test]
    fn test_unknown_nuclide() {
        let table = ReferenceTable::new(two_member_table()).unwrap();
        assert!(matches!(
            table.get("C-3"),
            Err(DecayError::UnknownNuclide(_))
        ));
    }

    #[test]
    fn test_branching_sum_enforced() {
        let mut nuclides = two_member_table();
        nuclides.insert(
            "C-4".to_string(),
            entry(Some(1.0), 4.0, &[("A-2", 0.6), ("B-2", 0.3)]),
        );
        assert!(matches!(
            ReferenceTable::new(nuclides),
            Err(DecayError::DataIntegrity(_))
        ));
    }

    #[test]
    fn test_missing_product_rejected() {
        let mut nuclides = BTreeMap::new();
        nuclides.insert("A-2".to_string(), entry(Some(1.0), 2.0, &[("X-9", 1.0)]));
        assert!(matches!(
            ReferenceTable::new(nuclides),
            Err(DecayError::DataIntegrity(_))
        ));
    }

    #[test]
    fn test_nonpositive_half_life_rejected() {
        let mut nuclides = two_member_table();
        nuclides.get_mut("A-2").unwrap().half_life = Some(0.0);
        assert!(ReferenceTable::new(nuclides).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let json = r#"{
            "Po-216": {
                "halfLifeSeconds": 0.145,
                "molarMassGramsPerMole": 216.00192,
                "products": [ { "product": "Pb-212", "branchingRatio": 1.0 } ]
            },
            "Pb-212": {
                "halfLifeSeconds": null,
                "molarMassGramsPerMole": 211.9919
            }
        }"#;
        let table = ReferenceTable::from_json(json).unwrap();
        let po = table.get("Po-216").unwrap();
        assert_eq!(po.products.len(), 1);
        assert_eq!(po.products[0].product, "Pb-212");

        let back = serde_json::to_string(&table).unwrap();
        let again = ReferenceTable::from_json(&back).unwrap();
        assert_eq!(again.len(), table.len());
    }

    #[test]
    fn test_builtin_dataset_loads() {
        let table = ReferenceTable::builtin();
        assert!(table.contains("Cf-252"));
        assert!(table.contains("Pb-208"));
        assert!(table.get("Pb-208").unwrap().is_stable());
    }

    #[test]
    fn test_load_from_file() {
        // Same path the CLI takes: serialize, write, read back, validate.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        let builtin = ReferenceTable::builtin();
        std::fs::write(&path, serde_json::to_string(&builtin).unwrap()).unwrap();

        let loaded =
            ReferenceTable::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.len(), builtin.len());
        assert_eq!(
            loaded.get("Po-216").unwrap().half_life,
            builtin.get("Po-216").unwrap().half_life
        );
    }
}
