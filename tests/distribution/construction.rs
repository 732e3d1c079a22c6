// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use infodist::config::Tolerances;
use infodist::{Alphabet, Distribution, InfoError, Outcome, ProbabilityError};
use rstest::*;

fn o(s: &str) -> Outcome<char> {
    Outcome::from(s)
}

#[rstest]
#[case(vec!["00", "1"], vec![0.5, 0.5], "mixed arity")]
#[case(vec!["00", "11"], vec![1.0], "fewer probabilities than outcomes")]
fn shape_errors(#[case] outcomes: Vec<&str>, #[case] probs: Vec<f64>, #[case] _description: &str) {
    let outcomes = outcomes.into_iter().map(o).collect();
    let err = Distribution::new(outcomes, probs).unwrap_err();
    assert!(matches!(err, InfoError::Shape(_)), "got {err:?}");
}

#[rstest]
#[case(vec![0.5, 0.6], "sum above one")]
#[case(vec![0.5, 0.4], "sum below one")]
#[case(vec![1.5, -0.5], "negative mass")]
#[case(vec![f64::NAN, 1.0], "not a number")]
fn probability_errors(#[case] probs: Vec<f64>, #[case] _description: &str) {
    let err = Distribution::new(vec![o("0"), o("1")], probs).unwrap_err();
    assert!(matches!(err, InfoError::Probability(_)), "got {err:?}");
}

#[test]
fn negative_mass_reports_its_position() {
    let err = Distribution::new(vec![o("0"), o("1")], vec![1.5, -0.5]).unwrap_err();
    assert_eq!(
        err,
        InfoError::Probability(ProbabilityError::Negative {
            index: 1,
            value: -0.5
        })
    );
}

#[test]
fn duplicate_outcomes_are_rejected() {
    let err = Distribution::new(vec![o("01"), o("01")], vec![0.5, 0.5]).unwrap_err();
    assert!(matches!(err, InfoError::DuplicateOutcome(_)));
    assert!(matches!(
        Distribution::<char>::uniform(["1", "1"]),
        Err(InfoError::DuplicateOutcome(_))
    ));
}

#[test]
fn uniform_over_nothing_is_empty_support() {
    let none: Vec<&str> = vec![];
    assert_eq!(Distribution::<char>::uniform(none).unwrap_err(), InfoError::EmptySupport);
}

#[test]
fn sum_check_honours_the_tolerance() {
    let probs = vec![0.5, 0.5 + 1e-6];
    assert!(Distribution::new(vec![o("0"), o("1")], probs.clone()).is_err());
    let loose = Tolerances { probability: 1e-5 };
    assert!(Distribution::new_with_tolerance(vec![o("0"), o("1")], probs, loose).is_ok());
}

#[test]
fn weights_are_renormalized() {
    let d = Distribution::from_weights(vec![o("a"), o("b")], vec![3.0, 1.0]).unwrap();
    assert_eq!(d.probability(&o("a")), 0.75);
    assert_eq!(
        Distribution::from_weights(vec![o("a")], vec![0.0]).unwrap_err(),
        InfoError::Probability(ProbabilityError::ZeroWeights)
    );
}

#[test]
fn naming_checks_length_and_uniqueness() {
    let d = Distribution::<char>::uniform(["00", "11"]).unwrap();
    assert_eq!(
        d.clone().with_rv_names(["X"]).unwrap_err(),
        InfoError::ArityMismatch {
            expected: 2,
            got: 1
        }
    );
    assert_eq!(
        d.clone().with_rv_names(["X", "X"]).unwrap_err(),
        InfoError::DuplicateVariableName("X".into())
    );
    let named = d.with_rv_names(["X", "Y"]).unwrap();
    assert_eq!(named.rv_names().unwrap(), &["X".to_string(), "Y".to_string()]);
}

#[test]
fn explicit_alphabets_must_cover_the_support() {
    let d = Distribution::<char>::uniform(["0", "1"]).unwrap();
    let wide = d.clone().with_alphabets(vec![Alphabet::new(['0', '1', '2'])]).unwrap();
    assert_eq!(wide.alphabet(0).unwrap().len(), 3);
    assert_eq!(wide.outcome_space().len(), 3);
    assert!(matches!(
        d.with_alphabets(vec![Alphabet::new(['0'])]),
        Err(InfoError::Shape(_))
    ));
}

#[test]
fn accessors_describe_the_support() {
    let d = Distribution::from_pairs([("10", 0.25), ("01", 0.75), ("11", 0.0)]).unwrap();
    assert_eq!(d.num_variables(), 2);
    assert_eq!(d.len(), 3);
    assert_eq!(d.support_size(), 2);
    assert_eq!(d.outcomes()[0], o("01"));
    assert_eq!(d.event_probability(|x| x[0] == '1'), 0.25);
    assert_eq!(d.iter().count(), 3);
}
