// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::test_helpers::{EPS, assert_abs_diff_eq, random_distribution};
use infodist::config::DEFAULT_CLAMP_TOLERANCE;
use infodist::measures::multivariate::{
    caekl_mutual_information, co_information, dual_total_correlation, interaction_information,
    o_information, power_set_entropies, residual_entropy, total_correlation,
};
use infodist::measures::shannon::{conditional_mutual_information, mutual_information};
use infodist::measures::{EntropyCache, SubsetEntropy};
use infodist::{Distribution, Symbol, VarSet, example_dists};
use rstest::*;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
enum Measure {
    CoInformation,
    Interaction,
    TotalCorrelation,
    DualTotalCorrelation,
    Residual,
    OInformation,
    Caekl,
}

impl Measure {
    fn eval<E: SubsetEntropy>(self, h: &mut E, groups: &[VarSet], cond: VarSet) -> f64 {
        let value = match self {
            Measure::CoInformation => co_information(h, groups, cond),
            Measure::Interaction => interaction_information(h, groups, cond),
            Measure::TotalCorrelation => total_correlation(h, groups, cond),
            Measure::DualTotalCorrelation => dual_total_correlation(h, groups, cond),
            Measure::Residual => residual_entropy(h, groups, cond),
            Measure::OInformation => o_information(h, groups, cond),
            Measure::Caekl => caekl_mutual_information(h, groups, cond),
        };
        value.unwrap()
    }
}

fn singletons<S: Symbol>(d: &Distribution<S>) -> Vec<VarSet> {
    d.full_set().singletons()
}

#[rstest]
#[case(Measure::CoInformation, -1.0)]
#[case(Measure::Interaction, 1.0)]
#[case(Measure::TotalCorrelation, 1.0)]
#[case(Measure::DualTotalCorrelation, 2.0)]
#[case(Measure::Residual, 0.0)]
#[case(Measure::OInformation, -1.0)]
#[case(Measure::Caekl, 0.5)]
fn xor_values(#[case] measure: Measure, #[case] expected: f64) {
    let d = example_dists::xor();
    let mut h = EntropyCache::new(&d);
    let value = measure.eval(&mut h, &singletons(&d), VarSet::empty());
    assert_abs_diff_eq!(value, expected, epsilon = EPS);
}

#[rstest]
#[case(Measure::CoInformation, 1.0)]
#[case(Measure::Interaction, -1.0)]
#[case(Measure::TotalCorrelation, 2.0)]
#[case(Measure::DualTotalCorrelation, 1.0)]
#[case(Measure::Residual, 0.0)]
#[case(Measure::OInformation, 1.0)]
#[case(Measure::Caekl, 1.0)]
fn giant_bit_values(#[case] measure: Measure, #[case] expected: f64) {
    let d = example_dists::giant_bit(3, 2).unwrap();
    let mut h = EntropyCache::new(&d);
    let value = measure.eval(&mut h, &singletons(&d), VarSet::empty());
    assert_abs_diff_eq!(value, expected, epsilon = EPS);
}

#[test]
fn xor_is_synergy_without_pairwise_correlation() {
    let d = example_dists::xor();
    let mut h = EntropyCache::new(&d);
    for (a, b) in [(0, 1), (0, 2), (1, 2)] {
        let mi = mutual_information(&mut h, VarSet::singleton(a), VarSet::singleton(b)).unwrap();
        assert_abs_diff_eq!(mi, 0.0, epsilon = EPS);
    }
    let ci = co_information(&mut h, &singletons(&d), VarSet::empty()).unwrap();
    assert!(ci < 0.0);
}

#[rstest]
#[case::dyadic(example_dists::dyadic())]
#[case::triadic(example_dists::triadic())]
fn dyadic_and_triadic_share_an_information_diagram(#[case] d: Distribution<char>) {
    let mut h = EntropyCache::new(&d);
    let groups = singletons(&d);
    for (a, b) in [(0, 1), (0, 2), (1, 2)] {
        let mi = mutual_information(&mut h, groups[a], groups[b]).unwrap();
        assert_abs_diff_eq!(mi, 1.0, epsilon = EPS);
    }
    let c = VarSet::empty();
    assert_abs_diff_eq!(h.entropy(d.full_set()).unwrap(), 3.0, epsilon = EPS);
    assert_abs_diff_eq!(co_information(&mut h, &groups, c).unwrap(), 0.0, epsilon = EPS);
    assert_abs_diff_eq!(total_correlation(&mut h, &groups, c).unwrap(), 3.0, epsilon = EPS);
    assert_abs_diff_eq!(dual_total_correlation(&mut h, &groups, c).unwrap(), 3.0, epsilon = EPS);
}

#[rstest]
#[case(2, 3, 61)]
#[case(2, 4, 62)]
fn two_group_co_information_is_mutual_information(#[case] n: usize, #[case] k: usize, #[case] seed: u64) {
    let d = random_distribution(n, k, seed);
    let mut h = EntropyCache::new(&d);
    let groups = singletons(&d);
    let mi = mutual_information(&mut h, groups[0], groups[1]).unwrap();
    let ci = co_information(&mut h, &groups, VarSet::empty()).unwrap();
    let ii = interaction_information(&mut h, &groups, VarSet::empty()).unwrap();
    assert_abs_diff_eq!(ci, mi, epsilon = EPS);
    assert_abs_diff_eq!(ii, mi, epsilon = EPS);
}

#[test]
fn conditioned_two_group_co_information_is_conditional_mi() {
    let d = random_distribution(3, 3, 71);
    let mut h = EntropyCache::new(&d);
    let (x, y, z) = (VarSet::singleton(0), VarSet::singleton(1), VarSet::singleton(2));
    let cmi = conditional_mutual_information(&mut h, x, y, z).unwrap();
    let ci = co_information(&mut h, &[x, y], z).unwrap();
    assert_abs_diff_eq!(ci, cmi, epsilon = EPS);
}

#[test]
fn groups_act_as_single_variables() {
    let d = example_dists::dyadic();
    let mut h = EntropyCache::new(&d);
    let xy = VarSet::from_indices([0, 1]);
    let z = VarSet::singleton(2);
    let tc = total_correlation(&mut h, &[xy, z], VarSet::empty()).unwrap();
    let mi = mutual_information(&mut h, xy, z).unwrap();
    assert_abs_diff_eq!(tc, mi, epsilon = EPS);
    assert_abs_diff_eq!(mi, 2.0, epsilon = EPS);
}

#[test]
fn single_group_measures_are_its_entropy() {
    let d = example_dists::and_gate();
    let mut h = EntropyCache::new(&d);
    let z = VarSet::singleton(2);
    let hz = h.entropy(z).unwrap();
    for m in [
        Measure::CoInformation,
        Measure::Interaction,
        Measure::TotalCorrelation,
        Measure::DualTotalCorrelation,
        Measure::Residual,
        Measure::OInformation,
        Measure::Caekl,
    ] {
        assert_abs_diff_eq!(m.eval(&mut h, &[z], VarSet::empty()), hz, epsilon = EPS);
    }
    assert_eq!(co_information(&mut h, &[], VarSet::empty()).unwrap(), 0.0);
}

#[test]
fn shared_lattice_is_computed_once() {
    let d = example_dists::xor();
    let mut h = EntropyCache::new(&d);
    let groups = singletons(&d);
    co_information(&mut h, &groups, VarSet::empty()).unwrap();
    assert_eq!(h.computed(), 7);
    total_correlation(&mut h, &groups, VarSet::empty()).unwrap();
    dual_total_correlation(&mut h, &groups, VarSet::empty()).unwrap();
    o_information(&mut h, &groups, VarSet::empty()).unwrap();
    let table = power_set_entropies(&mut h, &groups, VarSet::empty()).unwrap();
    assert_eq!(table.len(), 8);
    assert_eq!(h.computed(), 7);
}

/// Hand-written entropy table whose total correlation is `-offset`.
struct Offset(HashMap<VarSet, f64>);

impl SubsetEntropy for Offset {
    fn num_variables(&self) -> usize {
        2
    }
    fn subset_entropy(&mut self, set: VarSet) -> f64 {
        self.0[&set]
    }
}

fn offset_table(offset: f64) -> Offset {
    Offset(HashMap::from([
        (VarSet::empty(), 0.0),
        (VarSet::singleton(0), 1.0),
        (VarSet::singleton(1), 1.0),
        (VarSet::full(2), 2.0 + offset),
    ]))
}

#[rstest]
#[case(5e-11, 0.0)]
#[case(1e-9, -1e-9)]
fn clamps_only_below_tolerance(#[case] offset: f64, #[case] expected: f64) {
    assert_eq!(DEFAULT_CLAMP_TOLERANCE, 1e-10);
    let mut t = offset_table(offset);
    let groups = [VarSet::singleton(0), VarSet::singleton(1)];
    let tc = total_correlation(&mut t, &groups, VarSet::empty()).unwrap();
    assert_abs_diff_eq!(tc, expected, epsilon = 1e-15);
    if expected == 0.0 {
        assert_eq!(tc, 0.0);
    }
}
