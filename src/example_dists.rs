// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Small reference distributions from the multivariate-dependency
//! literature. Each call builds a fresh value.

use crate::distribution::{Distribution, Outcome};
use crate::error::{InfoError, Result};

fn uniform_xyz(outcomes: &[&str]) -> Distribution<char> {
    // reference outcomes are constant
    Distribution::uniform(outcomes.iter().copied())
        .and_then(|d| d.with_rv_names(["X", "Y", "Z"]))
        .expect("reference outcomes form a valid distribution")
}

/// The dyadic system: each pair of variables shares one independent bit.
///
/// Uniform over `000, 021, 102, 123, 210, 231, 312, 333` with variables
/// named `X`, `Y`, `Z`.
pub fn dyadic() -> Distribution<char> {
    uniform_xyz(&["000", "021", "102", "123", "210", "231", "312", "333"])
}

/// The triadic system: one bit shared by all three variables plus an XOR
/// triple.
///
/// Uniform over `000, 111, 022, 133, 202, 313, 220, 331`. It has the same
/// information diagram as [`dyadic`] but a different dependency structure.
pub fn triadic() -> Distribution<char> {
    uniform_xyz(&["000", "111", "022", "133", "202", "313", "220", "331"])
}

/// `Z = X xor Y` for independent fair bits `X` and `Y`.
pub fn xor() -> Distribution<char> {
    uniform_xyz(&["000", "011", "101", "110"])
}

/// `Z = X and Y` for independent fair bits `X` and `Y`.
pub fn and_gate() -> Distribution<char> {
    uniform_xyz(&["000", "010", "100", "111"])
}

/// `n` copies of one uniform `k`-ary symbol.
///
/// # Errors
///
/// [`InfoError::InvalidParameter`] if `n` or `k` is zero.
pub fn giant_bit(n: usize, k: usize) -> Result<Distribution<usize>> {
    if n == 0 || k == 0 {
        return Err(InfoError::InvalidParameter(format!(
            "giant bit needs at least one variable and one symbol, got n = {n}, k = {k}"
        )));
    }
    Distribution::uniform((0..k).map(|s| Outcome::new(vec![s; n])))
}
