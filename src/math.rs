// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Small numerical helpers shared by the distribution model and measures.

/// Kahan compensated sum.
///
/// Probability vectors built from many small masses (uniform constructions,
/// fitted distributions) would otherwise drift when checked against 1.
pub fn kahan_sum<'a, I>(values: I) -> f64
where
    I: IntoIterator<Item = &'a f64>,
{
    let mut sum = 0.0_f64;
    let mut c = 0.0_f64;
    for &x in values {
        let y = x - c;
        let t = sum + y;
        c = (t - sum) - y;
        sum = t;
    }
    sum
}

/// `|a - b| <= tol`
#[inline]
pub fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

/// `-p log_b p` with the `0 log 0 = 0` convention.
#[inline]
pub fn surprisal_term(p: f64, log: impl Fn(f64) -> f64) -> f64 {
    if p > 0.0 { -p * log(p) } else { 0.0 }
}

/// Clamp values in `(-tol, 0)` to exactly zero.
///
/// Alternating subset sums cancel in floating point and can land a hair
/// below zero for quantities that are zero analytically.
#[inline]
pub fn clamp_negative_zero(value: f64, tol: f64) -> f64 {
    if value < 0.0 && value > -tol { 0.0 } else { value }
}
