// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::config::MeasureConfig;
use crate::distribution::{Distribution, Symbol, VarSet, accumulate, reduce_joint_codes};
use crate::error::Result;
use crate::math::{clamp_negative_zero, surprisal_term};
use crate::measures::traits::SubsetEntropy;
use std::collections::HashMap;
use tracing::trace;

/// Memoized subset entropies of one distribution, keyed by bitmask.
///
/// Multivariate measures revisit the same unions over and over (a
/// co-information, a total correlation and a dual total correlation of the
/// same variables share every term), so each subset's marginal is formed at
/// most once per cache.
///
/// ```rust
/// use infodist::{EntropyCache, VarSet, example_dists};
///
/// let d = example_dists::xor();
/// let mut h = EntropyCache::new(&d);
/// assert_eq!(h.entropy(VarSet::full(3)).unwrap(), 2.0);
/// assert_eq!(h.entropy(VarSet::empty()).unwrap(), 0.0);
/// ```
#[derive(Debug)]
pub struct EntropyCache<'a, S> {
    dist: &'a Distribution<S>,
    config: MeasureConfig,
    radices: Vec<usize>,
    memo: HashMap<VarSet, f64>,
}

impl<'a, S: Symbol> EntropyCache<'a, S> {
    /// Cache reporting bits with the default clamp tolerance.
    pub fn new(dist: &'a Distribution<S>) -> Self {
        Self::with_config(dist, MeasureConfig::default())
    }

    pub fn with_config(dist: &'a Distribution<S>, config: MeasureConfig) -> Self {
        Self {
            dist,
            config,
            radices: dist.radices(),
            memo: HashMap::new(),
        }
    }

    pub fn distribution(&self) -> &'a Distribution<S> {
        self.dist
    }

    pub fn config(&self) -> &MeasureConfig {
        &self.config
    }

    /// Checked `H(set)`.
    pub fn entropy(&mut self, set: VarSet) -> Result<f64> {
        self.check_set(set)?;
        Ok(self.subset_entropy(set))
    }

    /// Number of distinct non-empty subsets evaluated so far.
    pub fn computed(&self) -> usize {
        self.memo.len()
    }

    fn compute(&self, set: VarSet) -> f64 {
        let positions = set.indices();
        let (ids, k) = reduce_joint_codes(self.dist.codes(), &self.radices, &positions);
        let cells = accumulate(self.dist.pmf(), &ids, k);
        let base = self.config.base;
        let h: f64 = cells.iter().map(|&p| surprisal_term(p, |x| base.log(x))).sum();
        clamp_negative_zero(h, self.config.clamp_tolerance)
    }
}

impl<S: Symbol> SubsetEntropy for EntropyCache<'_, S> {
    fn num_variables(&self) -> usize {
        self.dist.num_variables()
    }

    fn subset_entropy(&mut self, set: VarSet) -> f64 {
        if set.is_empty() {
            return 0.0;
        }
        if let Some(&h) = self.memo.get(&set) {
            return h;
        }
        let h = self.compute(set);
        trace!(set = %set, entropy = h, "computed subset entropy");
        self.memo.insert(set, h);
        h
    }

    fn clamp_tolerance(&self) -> f64 {
        self.config.clamp_tolerance
    }
}
