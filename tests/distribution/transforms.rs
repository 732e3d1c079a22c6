// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::test_helpers::{EPS, assert_abs_diff_eq, random_distribution};
use infodist::{Alphabet, Distribution, InfoError, Outcome, VarSet, example_dists};

fn o(s: &str) -> Outcome<char> {
    Outcome::from(s)
}

#[test]
fn marginal_of_the_full_set_is_the_distribution() {
    let d = example_dists::dyadic();
    assert_eq!(d.marginal(d.full_set()).unwrap(), d);
    let r = random_distribution(3, 3, 7);
    assert_eq!(r.marginal(r.full_set()).unwrap(), r);
}

#[test]
fn marginal_of_the_empty_set_is_trivial() {
    let d = example_dists::xor();
    let m = d.marginal(VarSet::empty()).unwrap();
    assert_eq!(m.num_variables(), 0);
    assert_eq!(m.len(), 1);
    assert_eq!(m.probability(&Outcome::empty()), 1.0);
    assert_eq!(m.rv_names().unwrap().len(), 0);
}

#[test]
fn marginal_keeps_names_in_index_order() {
    let d = example_dists::dyadic();
    let zx = d.marginal(d.select(["Z", "X"]).unwrap()).unwrap();
    assert_eq!(zx.rv_names().unwrap(), &["X".to_string(), "Z".to_string()]);
    assert_eq!(zx.len(), 8);
    assert_abs_diff_eq!(zx.probability(&o("01")), 0.125, epsilon = EPS);
}

#[test]
fn marginals_sum_to_one_and_match_hand_counts() {
    let d = Distribution::from_pairs([("000", 0.1), ("011", 0.2), ("101", 0.3), ("111", 0.4)]).unwrap();
    let yz = d.marginal(VarSet::from_indices([1, 2])).unwrap();
    assert_abs_diff_eq!(yz.probability(&o("11")), 0.6, epsilon = EPS);
    assert_abs_diff_eq!(yz.probability(&o("01")), 0.3, epsilon = EPS);
    assert_abs_diff_eq!(yz.pmf().sum(), 1.0, epsilon = EPS);
    let x = d.marginalize(VarSet::from_indices([1, 2])).unwrap();
    assert_abs_diff_eq!(x.probability(&o("1")), 0.7, epsilon = EPS);
}

#[test]
fn unknown_variables_are_reported() {
    let d = example_dists::xor();
    assert!(matches!(d.marginal(VarSet::singleton(3)), Err(InfoError::UnknownVariable(_))));
    assert!(matches!(d.select(["W"]), Err(InfoError::UnknownVariable(_))));
    assert!(matches!(d.select([5usize]), Err(InfoError::UnknownVariable(_))));
}

#[test]
fn conditioning_renormalizes_the_slice() {
    let d = example_dists::and_gate();
    let z = d.select(["Z"]).unwrap();
    let xy_given_z0 = d.condition_on(z, &o("0")).unwrap();
    assert_eq!(xy_given_z0.num_variables(), 2);
    assert_abs_diff_eq!(xy_given_z0.probability(&o("01")), 1.0 / 3.0, epsilon = EPS);
    let xy_given_z1 = d.condition_on(z, &o("1")).unwrap();
    assert_eq!(xy_given_z1.probability(&o("11")), 1.0);
}

#[test]
fn conditioning_on_impossible_events_fails() {
    let d = example_dists::xor();
    let xy = VarSet::from_indices([0, 1]);
    assert!(matches!(
        d.condition_on(xy, &o("22")),
        Err(InfoError::ZeroProbabilityEvent(_))
    ));
    assert!(matches!(d.condition_on(xy, &o("0")), Err(InfoError::Shape(_))));
}

#[test]
fn condition_on_all_covers_the_support() {
    let d = example_dists::xor();
    let (marginal, conditionals) = d.condition_on_all(VarSet::singleton(0)).unwrap();
    assert_eq!(marginal.len(), 2);
    assert_eq!(conditionals.len(), 2);
    for (_, c) in &conditionals {
        assert_eq!(c.num_variables(), 2);
        assert_abs_diff_eq!(c.pmf().sum(), 1.0, epsilon = EPS);
    }
}

#[test]
fn coalescing_into_pairs() {
    let d = example_dists::dyadic();
    let groups = [VarSet::from_indices([0, 1]), VarSet::singleton(2)];
    let c = d.coalesce(&groups).unwrap();
    assert_eq!(c.num_variables(), 2);
    assert_eq!(c.len(), 8);
    assert_eq!(c.rv_names().unwrap(), &["XY".to_string(), "Z".to_string()]);
    let first = Outcome::new(vec![o("00"), o("0")]);
    assert_abs_diff_eq!(c.probability(&first), 0.125, epsilon = EPS);
}

#[test]
fn dense_and_sparse_forms_are_close() {
    let d = example_dists::xor();
    let dense = d.make_dense().unwrap();
    assert_eq!(dense.len(), 8);
    assert_eq!(dense.support_size(), 4);
    assert!(dense.is_close(&d, EPS));
    let sparse = dense.make_sparse().unwrap();
    assert_eq!(sparse, d);
}

#[test]
fn dense_form_refuses_a_huge_outcome_space() {
    // 16^8 = 2^32 outcomes, far past the cap
    let d = Distribution::new(vec![Outcome::new(vec![0u32; 8])], vec![1.0])
        .unwrap()
        .with_alphabets(vec![Alphabet::new(0..16u32); 8])
        .unwrap();
    assert!(matches!(d.make_dense(), Err(InfoError::Shape(_))));
    assert!(d.make_sparse().is_ok());
}

#[test]
fn is_close_respects_tolerance_and_arity() {
    let a = Distribution::from_pairs([("0", 0.5), ("1", 0.5)]).unwrap();
    let b = Distribution::from_pairs([("0", 0.5 + 1e-6), ("1", 0.5 - 1e-6)]).unwrap();
    assert!(a.is_close(&b, 1e-5));
    assert!(!a.is_close(&b, 1e-8));
    let pair = Distribution::<char>::uniform(["00", "11"]).unwrap();
    assert!(!a.is_close(&pair, 1.0));
}

#[test]
fn product_of_independent_coins() {
    let coin = Distribution::<char>::uniform(["0", "1"]).unwrap().with_rv_names(["A"]).unwrap();
    let other = coin.clone().with_rv_names(["B"]).unwrap();
    let joint = coin.product(&other).unwrap();
    assert_eq!(joint.num_variables(), 2);
    assert_eq!(joint.len(), 4);
    assert_eq!(joint.rv_names().unwrap(), &["A".to_string(), "B".to_string()]);
    assert_eq!(joint.probability(&o("10")), 0.25);
}
