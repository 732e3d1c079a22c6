// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::test_helpers::{EPS, assert_abs_diff_eq, random_distribution};
use infodist::config::LogBase;
use infodist::measures::{
    self, CrossEntropy, cross_entropy, jensen_shannon_divergence, kullback_leibler_divergence,
};
use infodist::{Distribution, InfoError};
use rstest::*;

#[rstest]
#[case(91, 92)]
#[case(93, 94)]
#[case(95, 96)]
fn gibbs_inequality(#[case] sp: u64, #[case] sq: u64) {
    let p = random_distribution(2, 3, sp);
    let q = random_distribution(2, 3, sq);
    let kl = kullback_leibler_divergence(&p, &q, LogBase::Bits).unwrap();
    assert!(kl >= 0.0);
    // cross entropy decomposes into entropy plus divergence
    let ce = p.cross_entropy(&q).unwrap();
    assert_abs_diff_eq!(ce, measures::joint_entropy(&p) + kl, epsilon = EPS);
}

#[test]
fn jensen_shannon_is_symmetric_and_bounded() {
    let p = random_distribution(1, 4, 101);
    let q = random_distribution(1, 4, 102);
    let pq = jensen_shannon_divergence(&[p.clone(), q.clone()], None, LogBase::Bits).unwrap();
    let qp = jensen_shannon_divergence(&[q, p.clone()], None, LogBase::Bits).unwrap();
    assert_abs_diff_eq!(pq, qp, epsilon = EPS);
    assert!(pq > 0.0 && pq <= 1.0);
    let same = jensen_shannon_divergence(&[p.clone(), p], None, LogBase::Bits).unwrap();
    assert_abs_diff_eq!(same, 0.0, epsilon = EPS);
}

#[test]
fn weighted_jensen_shannon_with_a_point_mass_weight() {
    let p = random_distribution(1, 3, 111);
    let q = random_distribution(1, 3, 112);
    let js = jensen_shannon_divergence(&[p, q], Some(&[1.0, 0.0][..]), LogBase::Bits).unwrap();
    assert_abs_diff_eq!(js, 0.0, epsilon = EPS);
}

#[test]
fn bases_are_consistent() {
    let p = random_distribution(1, 3, 121);
    let q = random_distribution(1, 3, 122);
    let bits = kullback_leibler_divergence(&p, &q, LogBase::Bits).unwrap();
    let nats = kullback_leibler_divergence(&p, &q, LogBase::Nats).unwrap();
    assert_abs_diff_eq!(nats, bits * 2f64.ln(), epsilon = EPS);
    let ce = cross_entropy(&p, &q, LogBase::Dits).unwrap();
    assert_abs_diff_eq!(ce, p.cross_entropy(&q).unwrap() * 2f64.log10(), epsilon = EPS);
}

#[test]
fn arity_must_match() {
    let one = Distribution::<char>::uniform(["0", "1"]).unwrap();
    let two = Distribution::<char>::uniform(["00", "11"]).unwrap();
    assert!(matches!(
        kullback_leibler_divergence(&one, &two, LogBase::Bits),
        Err(InfoError::ArityMismatch { expected: 1, got: 2 })
    ));
    assert!(matches!(
        jensen_shannon_divergence(&[one, two], None, LogBase::Bits),
        Err(InfoError::ArityMismatch { .. })
    ));
}
