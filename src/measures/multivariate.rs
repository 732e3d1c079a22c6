// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Multivariate information measures over groups of variables.
//!
//! Every function takes a list of variable groups (use
//! [`VarSet::singletons`] for the plain one-variable-per-group form) and a
//! conditioning set, which may be empty. All of them are signed sums of
//! cached subset entropies over the lattice of group unions.
//!
//! Degenerate inputs follow one rule: with no groups every measure is 0, and
//! with a single group every measure is that group's (conditional) entropy.

use crate::distribution::{MAX_VARIABLES, VarSet};
use crate::error::{InfoError, Result};
use crate::math::clamp_negative_zero;
use crate::measures::traits::SubsetEntropy;

fn validate<E: SubsetEntropy>(h: &E, groups: &[VarSet], cond: VarSet) -> Result<()> {
    if groups.len() > MAX_VARIABLES {
        return Err(InfoError::TooManyVariables(groups.len()));
    }
    for &g in groups {
        h.check_set(g)?;
    }
    h.check_set(cond)
}

/// Union of the groups whose indices are in `members`.
fn union_of(groups: &[VarSet], members: VarSet) -> VarSet {
    members
        .iter()
        .fold(VarSet::empty(), |acc, i| acc.union(groups[i]))
}

/// `H(set | cond)`
fn cond_entropy<E: SubsetEntropy>(h: &mut E, set: VarSet, cond: VarSet) -> f64 {
    h.conditional_subset_entropy(set, cond)
}

/// Shared prologue: validation and the 0/1-group cases.
fn degenerate<E: SubsetEntropy>(h: &mut E, groups: &[VarSet], cond: VarSet) -> Result<Option<f64>> {
    validate(h, groups, cond)?;
    Ok(match groups {
        [] => Some(0.0),
        [g] => Some(clamp_negative_zero(cond_entropy(h, *g, cond), h.clamp_tolerance())),
        _ => None,
    })
}

/// `H(∪T | cond)` for every subset `T` of the group indices, in ascending
/// bitmask order of `T`.
///
/// Each union is computed once by the underlying cache and reused by any
/// later measure over the same groups.
pub fn power_set_entropies<E: SubsetEntropy>(
    h: &mut E,
    groups: &[VarSet],
    cond: VarSet,
) -> Result<Vec<(VarSet, f64)>> {
    validate(h, groups, cond)?;
    let h_cond = h.subset_entropy(cond);
    Ok(VarSet::full(groups.len())
        .subsets()
        .map(|t| {
            let union = union_of(groups, t);
            let value = if t.is_empty() {
                0.0
            } else {
                h.subset_entropy(union.union(cond)) - h_cond
            };
            (t, value)
        })
        .collect())
}

/// Co-information `I(G_1; ...; G_n | C)`.
///
/// `Σ_{∅≠T⊆[n]} (−1)^{|T|+1} H(∪_{i∈T} G_i | C)`. Equals the mutual
/// information for two groups; may be negative for three or more.
///
/// ```rust
/// use infodist::{EntropyCache, VarSet, example_dists};
/// use infodist::measures::multivariate::co_information;
///
/// let d = example_dists::xor();
/// let mut h = EntropyCache::new(&d);
/// let ci = co_information(&mut h, &d.full_set().singletons(), VarSet::empty()).unwrap();
/// assert!((ci + 1.0).abs() < 1e-12);
/// ```
pub fn co_information<E: SubsetEntropy>(h: &mut E, groups: &[VarSet], cond: VarSet) -> Result<f64> {
    if let Some(v) = degenerate(h, groups, cond)? {
        return Ok(v);
    }
    let h_cond = h.subset_entropy(cond);
    let mut total = 0.0;
    for t in VarSet::full(groups.len()).nonempty_subsets() {
        let term = h.subset_entropy(union_of(groups, t).union(cond)) - h_cond;
        if t.len() % 2 == 1 {
            total += term;
        } else {
            total -= term;
        }
    }
    Ok(clamp_negative_zero(total, h.clamp_tolerance()))
}

/// Interaction information, `(−1)^n` times the co-information.
///
/// Coincides with the mutual information for two groups.
pub fn interaction_information<E: SubsetEntropy>(
    h: &mut E,
    groups: &[VarSet],
    cond: VarSet,
) -> Result<f64> {
    if let Some(v) = degenerate(h, groups, cond)? {
        return Ok(v);
    }
    let ci = co_information(h, groups, cond)?;
    let value = if groups.len() % 2 == 0 { ci } else { -ci };
    Ok(clamp_negative_zero(value, h.clamp_tolerance()))
}

/// Total correlation (multi-information) `Σ H(G_i | C) − H(∪G | C)`.
pub fn total_correlation<E: SubsetEntropy>(h: &mut E, groups: &[VarSet], cond: VarSet) -> Result<f64> {
    if let Some(v) = degenerate(h, groups, cond)? {
        return Ok(v);
    }
    let parts: f64 = groups.iter().map(|&g| cond_entropy(h, g, cond)).sum();
    let all = union_of(groups, VarSet::full(groups.len()));
    let value = parts - cond_entropy(h, all, cond);
    Ok(clamp_negative_zero(value, h.clamp_tolerance()))
}

/// `Σ H(G_i | ∪_{j≠i} G_j, C)`, the entropy no other group accounts for.
fn residual_sum<E: SubsetEntropy>(h: &mut E, groups: &[VarSet], cond: VarSet) -> f64 {
    let everyone = VarSet::full(groups.len());
    (0..groups.len())
        .map(|i| {
            let others = union_of(groups, everyone.difference(VarSet::singleton(i)));
            cond_entropy(h, groups[i], others.union(cond))
        })
        .sum()
}

/// Residual (erasure) entropy `Σ H(G_i | ∪_{j≠i} G_j, C)`.
pub fn residual_entropy<E: SubsetEntropy>(h: &mut E, groups: &[VarSet], cond: VarSet) -> Result<f64> {
    if let Some(v) = degenerate(h, groups, cond)? {
        return Ok(v);
    }
    let value = residual_sum(h, groups, cond);
    Ok(clamp_negative_zero(value, h.clamp_tolerance()))
}

/// Dual total correlation (binding information)
/// `H(∪G | C) − Σ H(G_i | ∪_{j≠i} G_j, C)`.
pub fn dual_total_correlation<E: SubsetEntropy>(
    h: &mut E,
    groups: &[VarSet],
    cond: VarSet,
) -> Result<f64> {
    if let Some(v) = degenerate(h, groups, cond)? {
        return Ok(v);
    }
    let all = union_of(groups, VarSet::full(groups.len()));
    let value = cond_entropy(h, all, cond) - residual_sum(h, groups, cond);
    Ok(clamp_negative_zero(value, h.clamp_tolerance()))
}

/// O-information, total correlation minus dual total correlation.
///
/// Positive when redundancy dominates, negative when synergy does.
pub fn o_information<E: SubsetEntropy>(h: &mut E, groups: &[VarSet], cond: VarSet) -> Result<f64> {
    if let Some(v) = degenerate(h, groups, cond)? {
        return Ok(v);
    }
    let value = total_correlation(h, groups, cond)? - dual_total_correlation(h, groups, cond)?;
    Ok(clamp_negative_zero(value, h.clamp_tolerance()))
}

/// CAEKL multivariate mutual information.
///
/// The minimum over partitions `P` of the groups into at least two blocks of
/// `(Σ_{B∈P} H(B | C) − H(∪G | C)) / (|P| − 1)`.
pub fn caekl_mutual_information<E: SubsetEntropy>(
    h: &mut E,
    groups: &[VarSet],
    cond: VarSet,
) -> Result<f64> {
    if let Some(v) = degenerate(h, groups, cond)? {
        return Ok(v);
    }
    let everyone = VarSet::full(groups.len());
    let h_all = cond_entropy(h, union_of(groups, everyone), cond);
    let mut best = f64::INFINITY;
    for partition in everyone.partitions() {
        if partition.len() < 2 {
            continue;
        }
        let parts: f64 = partition
            .iter()
            .map(|&block| cond_entropy(h, union_of(groups, block), cond))
            .sum();
        let value = (parts - h_all) / (partition.len() - 1) as f64;
        best = best.min(value);
    }
    Ok(clamp_negative_zero(best, h.clamp_tolerance()))
}
