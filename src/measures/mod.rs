// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Information measures.
//!
//! The engine is layered on one primitive, the entropy of a variable subset
//! ([`SubsetEntropy`]). [`EntropyCache`] supplies it for a [`Distribution`],
//! and every Shannon and multivariate measure is a signed sum of such
//! entropies. Divergences and generalized entropies work on whole
//! distributions instead.
//!
//! The functions at this level are one-shot conveniences that build a fresh
//! cache, in bits. Reuse an [`EntropyCache`] with the submodule functions
//! when evaluating several measures of the same distribution.

pub mod cache;
pub mod divergences;
pub mod generalized;
pub mod multivariate;
pub mod profiles;
pub mod shannon;
pub mod traits;

pub use cache::EntropyCache;
pub use divergences::{cross_entropy, jensen_shannon_divergence, kullback_leibler_divergence};
pub use generalized::{extropy, renyi_entropy, tsallis_entropy};
pub use profiles::ShannonPartition;
pub use traits::{CrossEntropy, SubsetEntropy};

use crate::distribution::{Distribution, Symbol, VarSet};
use crate::error::Result;

/// Joint entropy of all variables, in bits.
pub fn joint_entropy<S: Symbol>(dist: &Distribution<S>) -> f64 {
    EntropyCache::new(dist).subset_entropy(dist.full_set())
}

/// `H(set)` in bits.
pub fn entropy<S: Symbol>(dist: &Distribution<S>, set: VarSet) -> Result<f64> {
    shannon::entropy(&mut EntropyCache::new(dist), set)
}

/// `H(a | b)` in bits.
pub fn conditional_entropy<S: Symbol>(dist: &Distribution<S>, a: VarSet, b: VarSet) -> Result<f64> {
    shannon::conditional_entropy(&mut EntropyCache::new(dist), a, b)
}

/// `I(a; b)` in bits.
pub fn mutual_information<S: Symbol>(dist: &Distribution<S>, a: VarSet, b: VarSet) -> Result<f64> {
    shannon::mutual_information(&mut EntropyCache::new(dist), a, b)
}

/// Co-information of every variable, one group each.
pub fn co_information<S: Symbol>(dist: &Distribution<S>) -> Result<f64> {
    let groups = dist.full_set().singletons();
    multivariate::co_information(&mut EntropyCache::new(dist), &groups, VarSet::empty())
}

/// Total correlation of every variable, one group each.
pub fn total_correlation<S: Symbol>(dist: &Distribution<S>) -> Result<f64> {
    let groups = dist.full_set().singletons();
    multivariate::total_correlation(&mut EntropyCache::new(dist), &groups, VarSet::empty())
}

/// Dual total correlation of every variable, one group each.
pub fn dual_total_correlation<S: Symbol>(dist: &Distribution<S>) -> Result<f64> {
    let groups = dist.full_set().singletons();
    multivariate::dual_total_correlation(&mut EntropyCache::new(dist), &groups, VarSet::empty())
}
