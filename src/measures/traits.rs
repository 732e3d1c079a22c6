// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::config::DEFAULT_CLAMP_TOLERANCE;
use crate::distribution::VarSet;
use crate::error::{InfoError, Result};

/// Source of subset entropies, the single primitive every measure composes.
///
/// Measures only ever ask for `H(S)` of unions of variable subsets, so any
/// type that can answer that (a memoizing cache over a distribution, or a
/// hand-written table in tests) can drive the whole engine.
pub trait SubsetEntropy {
    /// Number of variables in the underlying distribution.
    fn num_variables(&self) -> usize;

    /// `H(set)`. Must return 0 for the empty set.
    ///
    /// Callers validate `set` with [`SubsetEntropy::check_set`] first.
    fn subset_entropy(&mut self, set: VarSet) -> f64;

    /// Negative results above `-clamp_tolerance()` are reported as zero.
    fn clamp_tolerance(&self) -> f64 {
        DEFAULT_CLAMP_TOLERANCE
    }

    fn check_set(&self, set: VarSet) -> Result<()> {
        let full = VarSet::full(self.num_variables());
        if set.is_subset(&full) {
            Ok(())
        } else {
            Err(InfoError::UnknownVariable(set.difference(full).to_string()))
        }
    }

    /// `H(a | b) = H(a ∪ b) - H(b)`
    fn conditional_subset_entropy(&mut self, a: VarSet, b: VarSet) -> f64 {
        self.subset_entropy(a.union(b)) - self.subset_entropy(b)
    }
}

/// Interface for distributions that support cross-entropy $H(P||Q)$.
pub trait CrossEntropy<Rhs = Self> {
    /// Compute the cross-entropy between this distribution (P) and another (Q), in bits.
    fn cross_entropy(&self, other: &Rhs) -> Result<f64>;
}
