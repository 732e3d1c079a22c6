// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Divergences between distributions over the same variables.
//!
//! Outcomes are matched by value, so the two sides may list different
//! supports. Where `p > 0` but `q = 0` the cross entropy and the
//! Kullback-Leibler divergence are infinite.

use crate::config::{DEFAULT_CLAMP_TOLERANCE, LogBase};
use crate::distribution::{Distribution, Outcome, Symbol};
use crate::error::{InfoError, Result};
use crate::math::{clamp_negative_zero, kahan_sum, surprisal_term};
use crate::measures::traits::CrossEntropy;
use std::collections::BTreeMap;

fn check_arity<S: Symbol>(p: &Distribution<S>, q: &Distribution<S>) -> Result<()> {
    if p.num_variables() == q.num_variables() {
        Ok(())
    } else {
        Err(InfoError::ArityMismatch {
            expected: p.num_variables(),
            got: q.num_variables(),
        })
    }
}

/// `−Σ p(x) log q(x)`
pub fn cross_entropy<S: Symbol>(p: &Distribution<S>, q: &Distribution<S>, base: LogBase) -> Result<f64> {
    check_arity(p, q)?;
    let mut terms = Vec::with_capacity(p.len());
    for (o, px) in p.iter().filter(|(_, px)| *px > 0.0) {
        let qx = q.probability(o);
        if qx <= 0.0 {
            return Ok(f64::INFINITY);
        }
        terms.push(-px * base.log(qx));
    }
    Ok(kahan_sum(&terms))
}

/// `D(p || q) = Σ p(x) log(p(x) / q(x))`
pub fn kullback_leibler_divergence<S: Symbol>(
    p: &Distribution<S>,
    q: &Distribution<S>,
    base: LogBase,
) -> Result<f64> {
    check_arity(p, q)?;
    let mut terms = Vec::with_capacity(p.len());
    for (o, px) in p.iter().filter(|(_, px)| *px > 0.0) {
        let qx = q.probability(o);
        if qx <= 0.0 {
            return Ok(f64::INFINITY);
        }
        terms.push(px * base.log(px / qx));
    }
    Ok(clamp_negative_zero(kahan_sum(&terms), DEFAULT_CLAMP_TOLERANCE))
}

/// Generalized Jensen-Shannon divergence `H(Σ w_i P_i) − Σ w_i H(P_i)`.
///
/// `weights` defaults to uniform and must otherwise be non-negative, one per
/// distribution, and sum to 1.
pub fn jensen_shannon_divergence<S: Symbol>(
    dists: &[Distribution<S>],
    weights: Option<&[f64]>,
    base: LogBase,
) -> Result<f64> {
    let Some(first) = dists.first() else {
        return Err(InfoError::InvalidParameter(
            "Jensen-Shannon divergence needs at least one distribution".into(),
        ));
    };
    for d in &dists[1..] {
        check_arity(first, d)?;
    }
    let weights = match weights {
        Some(w) => {
            if w.len() != dists.len() {
                return Err(InfoError::InvalidParameter(format!(
                    "{} weights for {} distributions",
                    w.len(),
                    dists.len()
                )));
            }
            if w.iter().any(|&x| !x.is_finite() || x < 0.0) || (kahan_sum(w) - 1.0).abs() > 1e-9 {
                return Err(InfoError::InvalidParameter(
                    "weights must be non-negative and sum to 1".into(),
                ));
            }
            w.to_vec()
        }
        None => vec![1.0 / dists.len() as f64; dists.len()],
    };

    let mut mixture: BTreeMap<&Outcome<S>, f64> = BTreeMap::new();
    let mut parts = Vec::with_capacity(dists.len());
    for (d, &w) in dists.iter().zip(&weights) {
        for (o, p) in d.iter() {
            *mixture.entry(o).or_insert(0.0) += w * p;
        }
        parts.push(w * shannon(d, base));
    }
    let h_mix: Vec<f64> = mixture
        .values()
        .map(|&p| surprisal_term(p, |x| base.log(x)))
        .collect();
    let value = kahan_sum(&h_mix) - kahan_sum(&parts);
    Ok(clamp_negative_zero(value, DEFAULT_CLAMP_TOLERANCE))
}

fn shannon<S: Symbol>(d: &Distribution<S>, base: LogBase) -> f64 {
    let terms: Vec<f64> = d.pmf().iter().map(|&p| surprisal_term(p, |x| base.log(x))).collect();
    kahan_sum(&terms)
}

impl<S: Symbol> CrossEntropy for Distribution<S> {
    fn cross_entropy(&self, other: &Self) -> Result<f64> {
        cross_entropy(self, other, LogBase::Bits)
    }
}
