// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Reduce the selected columns of a symbol-code matrix into compact joint codes.
///
/// Row `r` of `codes` holds the alphabet position of each variable's symbol in
/// outcome `r`. The tuple of codes at `positions` is mapped to a unique compact
/// id, preserving first-occurrence order for determinism. Returns the ids and
/// the number of distinct tuples.
pub(crate) fn reduce_joint_codes(
    codes: &Array2<usize>,
    radices: &[usize],
    positions: &[usize],
) -> (Vec<usize>, usize) {
    let rows = codes.nrows();
    if positions.is_empty() {
        return (vec![0; rows], 1);
    }

    // Mixed-radix key when the sub-space fits in a u64, tuple key otherwise.
    let radix_fits = positions
        .iter()
        .try_fold(1u64, |acc, &p| acc.checked_mul(radices[p].max(1) as u64))
        .is_some();

    let mut out = Vec::with_capacity(rows);
    if radix_fits {
        let mut map: HashMap<u64, usize> = HashMap::new();
        for r in 0..rows {
            let mut key = 0u64;
            for &p in positions {
                key = key * radices[p].max(1) as u64 + codes[(r, p)] as u64;
            }
            let next = map.len();
            out.push(*map.entry(key).or_insert(next));
        }
        let k = map.len();
        (out, k)
    } else {
        let mut map: HashMap<Vec<usize>, usize> = HashMap::new();
        for r in 0..rows {
            let key: Vec<usize> = positions.iter().map(|&p| codes[(r, p)]).collect();
            let next = map.len();
            out.push(*map.entry(key).or_insert(next));
        }
        let k = map.len();
        (out, k)
    }
}

/// Sum `pmf` into the `k` cells given by `ids`.
pub(crate) fn accumulate(pmf: &Array1<f64>, ids: &[usize], k: usize) -> Array1<f64> {
    let mut cells = Array1::zeros(k);
    for (&id, &p) in ids.iter().zip(pmf.iter()) {
        cells[id] += p;
    }
    cells
}
