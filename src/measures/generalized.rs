// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rényi and Tsallis entropies and extropy of a joint distribution.
//!
//! Both families contain the Shannon entropy as a limit: Rényi for
//! `order → 1` and Tsallis for `q → 1` (in nats). The limits are evaluated
//! exactly rather than approached numerically.

use crate::config::LogBase;
use crate::distribution::{Distribution, Symbol};
use crate::error::{InfoError, Result};
use crate::math::{kahan_sum, surprisal_term};

fn check_order(name: &str, order: f64) -> Result<()> {
    if order.is_nan() || order < 0.0 {
        Err(InfoError::InvalidParameter(format!(
            "{name} order must be non-negative, got {order}"
        )))
    } else {
        Ok(())
    }
}

/// Shannon limit of both families: orders this close to 1 evaluate the limit.
const SHANNON_ORDER_EPS: f64 = 1e-12;

/// Below this distance from 1 the power sum is formed through `expm1`.
const NEAR_SHANNON: f64 = 0.5;

fn positive<S: Symbol>(dist: &Distribution<S>) -> impl Iterator<Item = f64> + '_ {
    dist.pmf().iter().copied().filter(|&p| p > 0.0)
}

/// Positive masses, renormalized to sum to exactly 1.
fn normalized<S: Symbol>(dist: &Distribution<S>) -> Vec<f64> {
    let p: Vec<f64> = positive(dist).collect();
    let total = kahan_sum(&p);
    p.into_iter().map(|x| x / total).collect()
}

/// `Σ p^α − 1 = Σ p (p^{α−1} − 1)`, accurate for `α` near 1.
fn power_sum_minus_one(p: &[f64], order: f64) -> f64 {
    let t = order - 1.0;
    let terms: Vec<f64> = p.iter().map(|&x| x * (t * x.ln()).exp_m1()).collect();
    kahan_sum(&terms)
}

/// `ln Σ p^α` with the largest mass factored out, so that no term underflows
/// to an all-zero sum.
fn ln_power_sum(p: &[f64], order: f64) -> f64 {
    let t = order - 1.0;
    if t.abs() < NEAR_SHANNON {
        return power_sum_minus_one(p, order).ln_1p();
    }
    let max = p.iter().copied().fold(0.0_f64, f64::max);
    let terms: Vec<f64> = p.iter().map(|&x| (x / max).powf(order)).collect();
    order * max.ln() + kahan_sum(&terms).ln()
}

fn shannon<S: Symbol>(dist: &Distribution<S>, base: LogBase) -> f64 {
    let terms: Vec<f64> = positive(dist).map(|p| surprisal_term(p, |x| base.log(x))).collect();
    kahan_sum(&terms)
}

/// Rényi entropy `log(Σ p^α) / (1 − α)`.
///
/// Order 0 is the Hartley entropy (log of the support size), order 1 the
/// Shannon entropy, and `f64::INFINITY` the min-entropy `−log max p`. Large
/// finite orders approach the min-entropy.
///
/// ```rust
/// use infodist::Distribution;
/// use infodist::config::LogBase;
/// use infodist::measures::renyi_entropy;
///
/// let d = Distribution::<char>::uniform(["0", "1", "2", "3"]).unwrap();
/// for order in [0.0, 0.5, 1.0, 2.0, f64::INFINITY] {
///     assert!((renyi_entropy(&d, order, LogBase::Bits).unwrap() - 2.0).abs() < 1e-12);
/// }
/// ```
pub fn renyi_entropy<S: Symbol>(dist: &Distribution<S>, order: f64, base: LogBase) -> Result<f64> {
    check_order("Rényi", order)?;
    let value = if order == 0.0 {
        base.log(positive(dist).count() as f64)
    } else if (order - 1.0).abs() < SHANNON_ORDER_EPS {
        shannon(dist, base)
    } else if order.is_infinite() {
        let max = positive(dist).fold(0.0_f64, f64::max);
        -base.log(max)
    } else {
        let nats = ln_power_sum(&normalized(dist), order) / (1.0 - order);
        nats / base.value().ln()
    };
    Ok(value)
}

/// Tsallis entropy `(1 − Σ p^q) / (q − 1)`; the Shannon entropy in nats at `q = 1`.
pub fn tsallis_entropy<S: Symbol>(dist: &Distribution<S>, q: f64) -> Result<f64> {
    check_order("Tsallis", q)?;
    if (q - 1.0).abs() < SHANNON_ORDER_EPS {
        return Ok(shannon(dist, LogBase::Nats));
    }
    if q.is_infinite() {
        return Err(InfoError::InvalidParameter("Tsallis order must be finite".into()));
    }
    Ok(-power_sum_minus_one(&normalized(dist), q) / (q - 1.0))
}

/// Extropy `−Σ (1 − p) log(1 − p)`.
pub fn extropy<S: Symbol>(dist: &Distribution<S>, base: LogBase) -> f64 {
    let terms: Vec<f64> = dist
        .pmf()
        .iter()
        .map(|&p| surprisal_term(1.0 - p, |x| base.log(x)))
        .collect();
    kahan_sum(&terms)
}
