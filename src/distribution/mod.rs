// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Joint distributions over named discrete random variables.
//!
//! A [`Distribution`] is immutable: marginalization, conditioning, renaming
//! and coalescing all return a new, fully validated value.

mod codes;
pub mod outcome;
pub mod varset;

pub(crate) use codes::{accumulate, reduce_joint_codes};
pub use outcome::{Alphabet, Outcome, Symbol, cartesian};
pub use varset::{MAX_VARIABLES, RvRef, VarSet};

use crate::config::Tolerances;
use crate::error::{InfoError, ProbabilityError, Result};
use crate::math::{close, kahan_sum};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

/// Largest Cartesian outcome space that is ever materialized.
pub const MAX_OUTCOME_SPACE: usize = 1 << 22;

/// Size of the Cartesian product of `alphabets`.
///
/// # Errors
///
/// [`InfoError::Shape`] if it exceeds [`MAX_OUTCOME_SPACE`].
pub(crate) fn outcome_space_size<S: Symbol>(alphabets: &[Alphabet<S>]) -> Result<usize> {
    alphabets
        .iter()
        .try_fold(1usize, |acc, a| acc.checked_mul(a.len()))
        .filter(|&size| size <= MAX_OUTCOME_SPACE)
        .ok_or_else(|| {
            InfoError::shape(format!(
                "outcome space exceeds {MAX_OUTCOME_SPACE} outcomes"
            ))
        })
}

/// A probability mass function over joint outcomes of `n` random variables.
///
/// Outcomes are kept in sorted order, aligned with the probability vector.
/// Invariants, checked on every construction:
/// - every outcome has arity `n`, and no outcome appears twice
/// - probabilities are finite, non-negative and sum to 1 within the
///   distribution's tolerance
/// - variable names, if set, are `n` distinct strings
///
/// # Example
///
/// ```rust
/// use infodist::Distribution;
///
/// let d = Distribution::<char>::uniform(["00", "01", "10", "11"])
///     .unwrap()
///     .with_rv_names(["X", "Y"])
///     .unwrap();
/// assert_eq!(d.num_variables(), 2);
/// let x = d.marginal(d.select(["X"]).unwrap()).unwrap();
/// assert_eq!(x.probability(&"0".into()), 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct Distribution<S> {
    outcomes: Vec<Outcome<S>>,
    pmf: Array1<f64>,
    index: HashMap<Outcome<S>, usize>,
    alphabets: Vec<Alphabet<S>>,
    /// `codes[(r, i)]` is the alphabet position of variable `i` in outcome `r`
    codes: Array2<usize>,
    names: Option<Vec<String>>,
    tolerance: f64,
}

impl<S: Symbol> Distribution<S> {
    /// Create a distribution from outcomes and their probabilities.
    ///
    /// # Errors
    ///
    /// - [`InfoError::Shape`] if the lengths differ or outcome arities disagree
    /// - [`InfoError::Probability`] on negative or non-finite mass, or a sum
    ///   outside the default tolerance of 1
    /// - [`InfoError::DuplicateOutcome`] if an outcome is listed twice
    pub fn new(outcomes: Vec<Outcome<S>>, probabilities: Vec<f64>) -> Result<Self> {
        Self::new_with_tolerance(outcomes, probabilities, Tolerances::default())
    }

    pub fn new_with_tolerance(
        outcomes: Vec<Outcome<S>>,
        probabilities: Vec<f64>,
        tolerances: Tolerances,
    ) -> Result<Self> {
        Self::build(outcomes, probabilities, None, None, tolerances.probability)
    }

    /// Create a distribution from `(outcome, probability)` pairs.
    pub fn from_pairs<I, O>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (O, f64)>,
        O: Into<Outcome<S>>,
    {
        let (outcomes, probs): (Vec<Outcome<S>>, Vec<f64>) =
            pairs.into_iter().map(|(o, p)| (o.into(), p)).unzip();
        Self::new(outcomes, probs)
    }

    /// Create a distribution by renormalizing non-negative weights.
    pub fn from_weights(outcomes: Vec<Outcome<S>>, weights: Vec<f64>) -> Result<Self> {
        for (index, &value) in weights.iter().enumerate() {
            if !value.is_finite() {
                return Err(ProbabilityError::NonFinite { index, value }.into());
            }
            if value < 0.0 {
                return Err(ProbabilityError::Negative { index, value }.into());
            }
        }
        let total = kahan_sum(&weights);
        if total <= 0.0 {
            return Err(ProbabilityError::ZeroWeights.into());
        }
        let probs = weights.iter().map(|w| w / total).collect();
        Self::new(outcomes, probs)
    }

    /// Equal mass `1/k` on each of the `k` listed outcomes.
    ///
    /// # Errors
    ///
    /// [`InfoError::EmptySupport`] if no outcome is given; otherwise as for
    /// [`Distribution::new`].
    pub fn uniform<I, O>(outcomes: I) -> Result<Self>
    where
        I: IntoIterator<Item = O>,
        O: Into<Outcome<S>>,
    {
        let outcomes: Vec<Outcome<S>> = outcomes.into_iter().map(Into::into).collect();
        if outcomes.is_empty() {
            return Err(InfoError::EmptySupport);
        }
        let k = outcomes.len();
        Self::new(outcomes, vec![1.0 / k as f64; k])
    }

    /// Replace the inferred alphabets with explicit ones.
    ///
    /// Every observed symbol must belong to its variable's alphabet.
    pub fn with_alphabets(self, alphabets: Vec<Alphabet<S>>) -> Result<Self> {
        let probs = self.pmf.to_vec();
        Self::build(self.outcomes, probs, Some(alphabets), self.names, self.tolerance)
    }

    /// Bind names to the variable positions, in index order.
    ///
    /// # Errors
    ///
    /// [`InfoError::ArityMismatch`] if the number of names differs from the
    /// number of variables, [`InfoError::DuplicateVariableName`] on repeats.
    pub fn with_rv_names<I, N>(mut self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        validate_names(&names, self.num_variables())?;
        self.names = Some(names);
        Ok(self)
    }

    fn build(
        outcomes: Vec<Outcome<S>>,
        probs: Vec<f64>,
        alphabets: Option<Vec<Alphabet<S>>>,
        names: Option<Vec<String>>,
        tolerance: f64,
    ) -> Result<Self> {
        if outcomes.len() != probs.len() {
            return Err(InfoError::shape(format!(
                "{} outcomes but {} probabilities",
                outcomes.len(),
                probs.len()
            )));
        }
        let n = match (outcomes.first(), &alphabets) {
            (Some(o), _) => o.arity(),
            (None, Some(a)) => a.len(),
            (None, None) => 0,
        };
        if n > MAX_VARIABLES {
            return Err(InfoError::TooManyVariables(n));
        }
        if let Some(o) = outcomes.iter().find(|o| o.arity() != n) {
            return Err(InfoError::shape(format!(
                "outcome {} has arity {}, expected {}",
                o,
                o.arity(),
                n
            )));
        }
        validate_probabilities(&probs, tolerance)?;

        let mut pairs: Vec<(Outcome<S>, f64)> = outcomes.into_iter().zip(probs).collect();
        pairs.sort_by(|a, b| a.0.cmp(&b.0));
        if let Some(w) = pairs.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(InfoError::DuplicateOutcome(w[0].0.to_string()));
        }

        let alphabets = match alphabets {
            Some(a) if a.len() != n => {
                return Err(InfoError::ArityMismatch {
                    expected: n,
                    got: a.len(),
                });
            }
            Some(a) => a,
            None => (0..n)
                .map(|i| Alphabet::new(pairs.iter().map(|(o, _)| o[i].clone())))
                .collect(),
        };

        let mut codes = Array2::zeros((pairs.len(), n));
        for (r, (o, _)) in pairs.iter().enumerate() {
            for (c, s) in o.iter().enumerate() {
                codes[(r, c)] = alphabets[c].code(s).ok_or_else(|| {
                    InfoError::shape(format!(
                        "symbol {:?} of outcome {} is not in the alphabet of variable {}",
                        s, o, c
                    ))
                })?;
            }
        }
        if let Some(names) = &names {
            validate_names(names, n)?;
        }

        let (outcomes, pmf): (Vec<Outcome<S>>, Vec<f64>) = pairs.into_iter().unzip();
        let index = outcomes
            .iter()
            .enumerate()
            .map(|(i, o)| (o.clone(), i))
            .collect();
        Ok(Self {
            outcomes,
            pmf: Array1::from(pmf),
            index,
            alphabets,
            codes,
            names,
            tolerance,
        })
    }

    /// Number of random variables.
    pub fn num_variables(&self) -> usize {
        self.alphabets.len()
    }

    /// Number of stored outcomes, zero-mass ones included.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Number of outcomes with positive mass.
    pub fn support_size(&self) -> usize {
        self.pmf.iter().filter(|&&p| p > 0.0).count()
    }

    pub fn outcomes(&self) -> &[Outcome<S>] {
        &self.outcomes
    }

    /// Probabilities aligned with [`Distribution::outcomes`].
    pub fn pmf(&self) -> &Array1<f64> {
        &self.pmf
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Outcome<S>, f64)> {
        self.outcomes.iter().zip(self.pmf.iter().copied())
    }

    /// Mass of `outcome`; zero for outcomes not in the distribution.
    pub fn probability(&self, outcome: &Outcome<S>) -> f64 {
        self.index.get(outcome).map_or(0.0, |&i| self.pmf[i])
    }

    /// Total mass of outcomes satisfying `event`.
    pub fn event_probability<F>(&self, event: F) -> f64
    where
        F: Fn(&Outcome<S>) -> bool,
    {
        let masses: Vec<f64> = self
            .iter()
            .filter(|(o, _)| event(o))
            .map(|(_, p)| p)
            .collect();
        kahan_sum(&masses)
    }

    pub fn alphabet(&self, i: usize) -> Option<&Alphabet<S>> {
        self.alphabets.get(i)
    }

    pub fn alphabets(&self) -> &[Alphabet<S>] {
        &self.alphabets
    }

    pub fn rv_names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }

    /// Tolerance on the probability sum this distribution was validated with.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// All variable indices.
    pub fn full_set(&self) -> VarSet {
        VarSet::full(self.num_variables())
    }

    pub(crate) fn codes(&self) -> &Array2<usize> {
        &self.codes
    }

    pub(crate) fn radices(&self) -> Vec<usize> {
        self.alphabets.iter().map(Alphabet::len).collect()
    }

    /// Index of a variable given by position or name.
    pub fn resolve(&self, rv: &RvRef) -> Result<usize> {
        match rv {
            RvRef::Index(i) if *i < self.num_variables() => Ok(*i),
            RvRef::Index(_) => Err(InfoError::UnknownVariable(rv.to_string())),
            RvRef::Name(name) => self
                .names
                .as_ref()
                .and_then(|names| names.iter().position(|n| n == name))
                .ok_or_else(|| InfoError::UnknownVariable(rv.to_string())),
        }
    }

    /// Resolve indices or names into a [`VarSet`].
    ///
    /// ```rust
    /// # use infodist::{Distribution, VarSet};
    /// let d = Distribution::<char>::uniform(["000", "111"]).unwrap()
    ///     .with_rv_names(["X", "Y", "Z"]).unwrap();
    /// assert_eq!(d.select(["Z", "X"]).unwrap(), VarSet::from_indices([0, 2]));
    /// assert_eq!(d.select([1usize]).unwrap(), VarSet::singleton(1));
    /// assert!(d.select(["W"]).is_err());
    /// ```
    pub fn select<I, R>(&self, rvs: I) -> Result<VarSet>
    where
        I: IntoIterator<Item = R>,
        R: Into<RvRef>,
    {
        rvs.into_iter().try_fold(VarSet::empty(), |set, rv| {
            let i = self.resolve(&rv.into())?;
            Ok(set.union(VarSet::singleton(i)))
        })
    }

    /// Fail with [`InfoError::UnknownVariable`] unless `set` only holds valid indices.
    pub fn check_set(&self, set: VarSet) -> Result<()> {
        if set.is_subset(&self.full_set()) {
            Ok(())
        } else {
            Err(InfoError::UnknownVariable(
                set.difference(self.full_set()).to_string(),
            ))
        }
    }

    /// Distribution over the variables in `set`, summing out the rest.
    ///
    /// Names and alphabets of the retained positions are kept, in index
    /// order. The empty set yields the zero-variable distribution with a
    /// single empty outcome of mass 1.
    pub fn marginal(&self, set: VarSet) -> Result<Self> {
        self.check_set(set)?;
        let positions = set.indices();
        let mut acc: BTreeMap<Outcome<S>, f64> = BTreeMap::new();
        for (o, p) in self.iter() {
            *acc.entry(o.project(&positions)).or_insert(0.0) += p;
        }
        let (outcomes, probs): (Vec<Outcome<S>>, Vec<f64>) = acc.into_iter().unzip();
        Self::build(
            outcomes,
            probs,
            Some(self.project_alphabets(&positions)),
            self.project_names(&positions),
            self.tolerance,
        )
    }

    /// Sum out the variables in `set`.
    pub fn marginalize(&self, set: VarSet) -> Result<Self> {
        self.check_set(set)?;
        self.marginal(self.full_set().difference(set))
    }

    /// Distribution over the complement of `set`, given `set` takes `value`.
    ///
    /// `value` lists the symbols of the conditioning variables in index order.
    ///
    /// # Errors
    ///
    /// [`InfoError::ZeroProbabilityEvent`] if the event has no mass.
    pub fn condition_on(&self, set: VarSet, value: &Outcome<S>) -> Result<Self> {
        self.check_set(set)?;
        let positions = set.indices();
        if value.arity() != positions.len() {
            return Err(InfoError::shape(format!(
                "conditioning value {} has arity {}, expected {}",
                value,
                value.arity(),
                positions.len()
            )));
        }
        let rest = self.full_set().difference(set).indices();

        let mut acc: BTreeMap<Outcome<S>, f64> = BTreeMap::new();
        let mut masses = Vec::new();
        for (o, p) in self.iter() {
            if positions.iter().zip(value.iter()).all(|(&i, s)| o[i] == *s) {
                *acc.entry(o.project(&rest)).or_insert(0.0) += p;
                masses.push(p);
            }
        }
        let total = kahan_sum(&masses);
        if total <= 0.0 {
            return Err(InfoError::ZeroProbabilityEvent(format!("{} = {}", set, value)));
        }
        let (outcomes, probs): (Vec<Outcome<S>>, Vec<f64>) =
            acc.into_iter().map(|(o, p)| (o, p / total)).unzip();
        Self::build(
            outcomes,
            probs,
            Some(self.project_alphabets(&rest)),
            self.project_names(&rest),
            self.tolerance,
        )
    }

    /// The marginal on `set` and the conditional distribution of the
    /// remaining variables for each value of `set` with positive mass.
    pub fn condition_on_all(&self, set: VarSet) -> Result<(Self, Vec<(Outcome<S>, Self)>)> {
        let marginal = self.marginal(set)?;
        let conditionals = marginal
            .iter()
            .filter(|(_, p)| *p > 0.0)
            .map(|(o, _)| Ok((o.clone(), self.condition_on(set, o)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok((marginal, conditionals))
    }

    /// Merge each group of variables into a single new variable.
    ///
    /// Each new symbol is the sub-outcome of its group. Groups may overlap.
    /// When the source is named, a group is named by concatenating its
    /// members' names.
    pub fn coalesce(&self, groups: &[VarSet]) -> Result<Distribution<Outcome<S>>> {
        for &g in groups {
            self.check_set(g)?;
        }
        let positions: Vec<Vec<usize>> = groups.iter().map(VarSet::indices).collect();
        let mut acc: BTreeMap<Outcome<Outcome<S>>, f64> = BTreeMap::new();
        for (o, p) in self.iter() {
            let merged = Outcome::new(positions.iter().map(|pos| o.project(pos)).collect());
            *acc.entry(merged).or_insert(0.0) += p;
        }
        let names = self.names.as_ref().and_then(|names| {
            let joined: Vec<String> = positions
                .iter()
                .map(|pos| pos.iter().map(|&i| names[i].as_str()).collect())
                .collect();
            let unique: HashSet<&String> = joined.iter().collect();
            (unique.len() == joined.len()).then_some(joined)
        });
        let (outcomes, probs): (Vec<_>, Vec<f64>) = acc.into_iter().unzip();
        let alphabets = if outcomes.is_empty() {
            Some(vec![Alphabet::new(Vec::new()); groups.len()])
        } else {
            None
        };
        Distribution::build(outcomes, probs, alphabets, names, self.tolerance)
    }

    /// Same arity and, ignoring zero-mass outcomes, the same probabilities
    /// within `tolerance`.
    pub fn is_close(&self, other: &Self, tolerance: f64) -> bool {
        self.num_variables() == other.num_variables()
            && self
                .iter()
                .all(|(o, p)| close(p, other.probability(o), tolerance))
            && other
                .iter()
                .all(|(o, p)| close(p, self.probability(o), tolerance))
    }

    /// Every outcome of the Cartesian product of the alphabets.
    pub fn outcome_space(&self) -> Vec<Outcome<S>> {
        cartesian(&self.alphabets)
    }

    /// Include every Cartesian outcome, zero-filled.
    ///
    /// # Errors
    ///
    /// [`InfoError::Shape`] if the outcome space exceeds [`MAX_OUTCOME_SPACE`].
    pub fn make_dense(&self) -> Result<Self> {
        outcome_space_size(&self.alphabets)?;
        let outcomes = self.outcome_space();
        let probs = outcomes.iter().map(|o| self.probability(o)).collect();
        Self::build(
            outcomes,
            probs,
            Some(self.alphabets.clone()),
            self.names.clone(),
            self.tolerance,
        )
    }

    /// Drop zero-mass outcomes, keeping the alphabets.
    pub fn make_sparse(&self) -> Result<Self> {
        let (outcomes, probs): (Vec<Outcome<S>>, Vec<f64>) = self
            .iter()
            .filter(|(_, p)| *p > 0.0)
            .map(|(o, p)| (o.clone(), p))
            .unzip();
        Self::build(
            outcomes,
            probs,
            Some(self.alphabets.clone()),
            self.names.clone(),
            self.tolerance,
        )
    }

    /// Joint distribution of `self` and `other` taken independently.
    ///
    /// Variables of `other` follow those of `self`. Names are kept only when
    /// both sides are named.
    pub fn product(&self, other: &Self) -> Result<Self> {
        let n = self.num_variables() + other.num_variables();
        if n > MAX_VARIABLES {
            return Err(InfoError::TooManyVariables(n));
        }
        let mut outcomes = Vec::with_capacity(self.len() * other.len());
        let mut probs = Vec::with_capacity(self.len() * other.len());
        for (a, p) in self.iter() {
            for (b, q) in other.iter() {
                outcomes.push(a.concat(b));
                probs.push(p * q);
            }
        }
        let mut alphabets = self.alphabets.clone();
        alphabets.extend(other.alphabets.iter().cloned());
        let names = match (&self.names, &other.names) {
            (Some(a), Some(b)) => Some(a.iter().chain(b.iter()).cloned().collect()),
            _ => None,
        };
        Self::build(
            outcomes,
            probs,
            Some(alphabets),
            names,
            self.tolerance.max(other.tolerance),
        )
    }

    fn project_alphabets(&self, positions: &[usize]) -> Vec<Alphabet<S>> {
        positions.iter().map(|&i| self.alphabets[i].clone()).collect()
    }

    fn project_names(&self, positions: &[usize]) -> Option<Vec<String>> {
        self.names
            .as_ref()
            .map(|names| positions.iter().map(|&i| names[i].clone()).collect())
    }
}

fn validate_probabilities(probs: &[f64], tolerance: f64) -> Result<()> {
    for (index, &value) in probs.iter().enumerate() {
        if !value.is_finite() {
            return Err(ProbabilityError::NonFinite { index, value }.into());
        }
        if value < 0.0 {
            return Err(ProbabilityError::Negative { index, value }.into());
        }
    }
    let sum = kahan_sum(probs);
    if !close(sum, 1.0, tolerance) {
        return Err(ProbabilityError::NotNormalized { sum, tolerance }.into());
    }
    Ok(())
}

fn validate_names(names: &[String], n: usize) -> Result<()> {
    if names.len() != n {
        return Err(InfoError::ArityMismatch {
            expected: n,
            got: names.len(),
        });
    }
    let mut seen = HashSet::with_capacity(n);
    for name in names {
        if !seen.insert(name) {
            return Err(InfoError::DuplicateVariableName(name.clone()));
        }
    }
    Ok(())
}

impl<S: PartialEq> PartialEq for Distribution<S> {
    fn eq(&self, other: &Self) -> bool {
        self.outcomes == other.outcomes
            && self.pmf == other.pmf
            && self.alphabets == other.alphabets
            && self.names == other.names
    }
}

impl<S: Symbol> fmt::Display for Distribution<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.names {
            Some(names) => writeln!(f, "Distribution over ({})", names.join(", "))?,
            None => writeln!(f, "Distribution over {} variables", self.num_variables())?,
        }
        for (o, p) in self.iter() {
            writeln!(f, "{}  {}", o, p)?;
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct RawDistributionRef<'a, S> {
    outcomes: &'a [Outcome<S>],
    pmf: Vec<f64>,
    alphabets: &'a [Alphabet<S>],
    rv_names: Option<&'a [String]>,
    tolerance: f64,
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "S: Deserialize<'de>"))]
struct RawDistribution<S> {
    outcomes: Vec<Outcome<S>>,
    pmf: Vec<f64>,
    alphabets: Option<Vec<Vec<S>>>,
    rv_names: Option<Vec<String>>,
    #[serde(default = "default_tolerance")]
    tolerance: f64,
}

fn default_tolerance() -> f64 {
    Tolerances::default().probability
}

impl<S: Symbol + Serialize> Serialize for Distribution<S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> std::result::Result<Ser::Ok, Ser::Error> {
        RawDistributionRef {
            outcomes: &self.outcomes,
            pmf: self.pmf.to_vec(),
            alphabets: &self.alphabets,
            rv_names: self.names.as_deref(),
            tolerance: self.tolerance,
        }
        .serialize(serializer)
    }
}

/// Deserialization re-runs every construction check.
impl<'de, S: Symbol + Deserialize<'de>> Deserialize<'de> for Distribution<S> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = RawDistribution::<S>::deserialize(deserializer)?;
        let alphabets = raw
            .alphabets
            .map(|a| a.into_iter().map(Alphabet::new).collect());
        Distribution::build(
            raw.outcomes,
            raw.pmf,
            alphabets,
            raw.rv_names,
            raw.tolerance,
        )
        .map_err(serde::de::Error::custom)
    }
}
