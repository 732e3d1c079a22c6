// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::test_helpers::{EPS, assert_abs_diff_eq, assert_relative_eq, random_distribution};
use infodist::config::LogBase;
use infodist::measures::{self, extropy, renyi_entropy, tsallis_entropy};
use infodist::{Distribution, InfoError};
use rstest::*;

#[rstest]
#[case(0.999_999)]
#[case(1.000_001)]
fn renyi_approaches_shannon_near_order_one(#[case] order: f64) {
    let d = random_distribution(2, 3, 131);
    let h = measures::joint_entropy(&d);
    assert_relative_eq!(renyi_entropy(&d, order, LogBase::Bits).unwrap(), h, max_relative = 1e-4);
    assert_abs_diff_eq!(renyi_entropy(&d, 1.0, LogBase::Bits).unwrap(), h, epsilon = EPS);
}

#[test]
fn tsallis_at_one_is_shannon_in_nats() {
    let d = random_distribution(1, 5, 141);
    let h_nats = measures::joint_entropy(&d) * 2f64.ln();
    assert_abs_diff_eq!(tsallis_entropy(&d, 1.0).unwrap(), h_nats, epsilon = EPS);
    assert_relative_eq!(tsallis_entropy(&d, 1.000_001).unwrap(), h_nats, max_relative = 1e-4);
}

#[rstest]
#[case(-0.5)]
#[case(f64::NAN)]
fn invalid_orders(#[case] order: f64) {
    let d = random_distribution(1, 2, 151);
    assert!(matches!(
        renyi_entropy(&d, order, LogBase::Bits),
        Err(InfoError::InvalidParameter(_))
    ));
    assert!(matches!(tsallis_entropy(&d, order), Err(InfoError::InvalidParameter(_))));
}

#[test]
fn hartley_and_min_entropy() {
    let d = Distribution::from_pairs([("a", 0.7), ("b", 0.2), ("c", 0.1), ("d", 0.0)]).unwrap();
    assert_abs_diff_eq!(renyi_entropy(&d, 0.0, LogBase::Bits).unwrap(), 3f64.log2(), epsilon = EPS);
    assert_abs_diff_eq!(
        renyi_entropy(&d, f64::INFINITY, LogBase::Bits).unwrap(),
        -(0.7f64).log2(),
        epsilon = EPS
    );
}

#[test]
fn extropy_of_a_point_mass_is_zero() {
    let d = Distribution::<char>::uniform(["x"]).unwrap();
    assert_eq!(extropy(&d, LogBase::Bits), 0.0);
}
