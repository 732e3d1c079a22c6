// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shannon measures as linear combinations of subset entropies.

use crate::distribution::VarSet;
use crate::error::Result;
use crate::math::clamp_negative_zero;
use crate::measures::traits::SubsetEntropy;

/// `H(set)`; zero for the empty set.
pub fn entropy<E: SubsetEntropy>(h: &mut E, set: VarSet) -> Result<f64> {
    h.check_set(set)?;
    Ok(h.subset_entropy(set))
}

/// `H(a | b) = H(a ∪ b) − H(b)`
pub fn conditional_entropy<E: SubsetEntropy>(h: &mut E, a: VarSet, b: VarSet) -> Result<f64> {
    h.check_set(a)?;
    h.check_set(b)?;
    let value = h.conditional_subset_entropy(a, b);
    Ok(clamp_negative_zero(value, h.clamp_tolerance()))
}

/// `I(a; b) = H(a) + H(b) − H(a ∪ b)`
pub fn mutual_information<E: SubsetEntropy>(h: &mut E, a: VarSet, b: VarSet) -> Result<f64> {
    h.check_set(a)?;
    h.check_set(b)?;
    let value = h.subset_entropy(a) + h.subset_entropy(b) - h.subset_entropy(a.union(b));
    Ok(clamp_negative_zero(value, h.clamp_tolerance()))
}

/// `I(a; b | c) = H(a ∪ c) + H(b ∪ c) − H(a ∪ b ∪ c) − H(c)`
pub fn conditional_mutual_information<E: SubsetEntropy>(
    h: &mut E,
    a: VarSet,
    b: VarSet,
    c: VarSet,
) -> Result<f64> {
    h.check_set(a)?;
    h.check_set(b)?;
    h.check_set(c)?;
    let value = h.subset_entropy(a.union(c)) + h.subset_entropy(b.union(c))
        - h.subset_entropy(a.union(b).union(c))
        - h.subset_entropy(c);
    Ok(clamp_negative_zero(value, h.clamp_tolerance()))
}
