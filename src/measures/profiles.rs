// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Information-diagram atoms.

use crate::distribution::VarSet;
use crate::error::{InfoError, Result};
use crate::measures::multivariate::co_information;
use crate::measures::traits::SubsetEntropy;
use std::collections::BTreeMap;

/// The Shannon partition of a joint distribution.
///
/// Atom `S` is `I(S_1; ...; S_k | complement(S))`, the region of the
/// information diagram shared by exactly the variables in `S`. Atoms are
/// signed and sum to the joint entropy.
///
/// ```rust
/// use infodist::{EntropyCache, VarSet, example_dists};
/// use infodist::measures::ShannonPartition;
///
/// let d = example_dists::xor();
/// let mut h = EntropyCache::new(&d);
/// let atoms = ShannonPartition::new(&mut h).unwrap();
/// assert!((atoms.atom(VarSet::full(3)).unwrap() + 1.0).abs() < 1e-12);
/// assert!((atoms.total() - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ShannonPartition {
    n: usize,
    atoms: BTreeMap<VarSet, f64>,
}

impl ShannonPartition {
    /// Evaluate all `2^n − 1` atoms.
    pub fn new<E: SubsetEntropy>(h: &mut E) -> Result<Self> {
        let n = h.num_variables();
        let full = VarSet::full(n);
        let mut atoms = BTreeMap::new();
        for s in full.nonempty_subsets() {
            let value = co_information(h, &s.singletons(), full.difference(s))?;
            atoms.insert(s, value);
        }
        Ok(Self { n, atoms })
    }

    pub fn num_variables(&self) -> usize {
        self.n
    }

    /// The atom shared by exactly `set`.
    pub fn atom(&self, set: VarSet) -> Result<f64> {
        self.atoms
            .get(&set)
            .copied()
            .ok_or_else(|| InfoError::UnknownVariable(set.to_string()))
    }

    /// Atoms in ascending bitmask order.
    pub fn iter(&self) -> impl Iterator<Item = (VarSet, f64)> + '_ {
        self.atoms.iter().map(|(&s, &v)| (s, v))
    }

    /// Sum of all atoms, the joint entropy.
    pub fn total(&self) -> f64 {
        self.atoms.values().sum()
    }
}
