// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::constraints::Constraint;
use super::support::{Support, feasible_support, tableau_fits};
use crate::config::{DEFAULT_PROBABILITY_TOLERANCE, SolverOptions};
use crate::distribution::{
    Alphabet, Distribution, MAX_VARIABLES, Outcome, Symbol, VarSet, accumulate, cartesian,
    outcome_space_size, reduce_joint_codes,
};
use crate::error::{InfoError, Result};
use crate::math::kahan_sum;
use ndarray::{Array1, Array2};
use std::collections::HashMap;
use tracing::{debug, trace, warn};

/// Sweeps over which the residual has to improve by `stall_tolerance`.
const STALL_WINDOW: usize = 10;

/// Bracket expansions and bisection steps of one moment update.
const TILT_EXPANSIONS: usize = 64;
const TILT_BISECTIONS: usize = 200;

/// Terminal result of a solve.
#[derive(Debug, Clone, PartialEq)]
pub enum MaxEntOutcome<S> {
    /// Every constraint holds within the solver tolerance.
    Solved {
        distribution: Distribution<S>,
        iterations: usize,
        residual: f64,
    },
    /// The constraints admit no distribution.
    Infeasible { reason: String },
    /// The iteration budget ran out while the residual was still improving.
    NumericalFailure { iterations: usize, residual: f64 },
}

impl<S: Symbol> MaxEntOutcome<S> {
    pub fn is_solved(&self) -> bool {
        matches!(self, MaxEntOutcome::Solved { .. })
    }

    pub fn distribution(&self) -> Option<&Distribution<S>> {
        match self {
            MaxEntOutcome::Solved { distribution, .. } => Some(distribution),
            _ => None,
        }
    }

    /// The fitted distribution, or the failure as an [`InfoError`].
    pub fn into_result(self) -> Result<Distribution<S>> {
        match self {
            MaxEntOutcome::Solved { distribution, .. } => Ok(distribution),
            MaxEntOutcome::Infeasible { reason } => Err(InfoError::Infeasible(reason)),
            MaxEntOutcome::NumericalFailure {
                iterations,
                residual,
            } => Err(InfoError::NumericalFailure {
                iterations,
                residual,
            }),
        }
    }
}

/// Lifecycle of a [`MaxEntSolver`].
#[derive(Debug, Clone, PartialEq)]
pub enum SolverState<S> {
    Unsolved,
    Solving,
    Done(MaxEntOutcome<S>),
}

/// A marginal constraint resolved against the outcome space.
struct MarginalFit {
    /// Cell (sub-outcome on the constrained variables) of every point
    cells: Vec<usize>,
    /// Target mass of every cell
    target: Vec<f64>,
    labels: Vec<String>,
    vars: VarSet,
}

struct MomentFit {
    label: String,
    values: Array1<f64>,
    target: f64,
}

enum Fit {
    Marginal(MarginalFit),
    Moment(MomentFit),
}

/// Explanation attached to an infeasible outcome.
type Reason = String;

/// Maximum-entropy fit over the full Cartesian outcome space.
///
/// The constraints are first written as linear equations over the outcome
/// probabilities, and outcomes that no feasible distribution can charge are
/// removed. Starting from the uniform distribution on what remains, each
/// sweep projects onto every constraint in turn: marginal constraints by
/// iterative proportional fitting, moment constraints by exponential tilting
/// with the multiplier found by bisection. A sweep never increases the
/// divergence to the solution, so the iterates converge to the
/// maximum-entropy distribution whenever the constraints are jointly
/// feasible.
///
/// ```rust
/// use infodist::config::SolverOptions;
/// use infodist::inference::{Constraint, MaxEntSolver};
/// use infodist::{Distribution, VarSet};
///
/// let base = Distribution::<char>::uniform(["00", "11"]).unwrap();
/// let mut solver = MaxEntSolver::new(&base, vec![], SolverOptions::default()).unwrap();
/// let fitted = solver.solve().distribution().unwrap();
/// assert_eq!(fitted.len(), 4);
/// assert!(fitted.pmf().iter().all(|&p| (p - 0.25).abs() < 1e-12));
/// ```
pub struct MaxEntSolver<S> {
    template: Distribution<S>,
    constraints: Vec<Constraint<S>>,
    options: SolverOptions,
    state: SolverState<S>,
}

impl<S: Symbol> MaxEntSolver<S> {
    /// Solver over the alphabets and names of `base`. Only the structure of
    /// `base` is used, never its probabilities.
    pub fn new(base: &Distribution<S>, constraints: Vec<Constraint<S>>, options: SolverOptions) -> Result<Self> {
        let names = base.rv_names().map(<[String]>::to_vec);
        Self::from_alphabets(base.alphabets().to_vec(), names, constraints, options)
    }

    /// # Errors
    ///
    /// - [`InfoError::TooManyVariables`] or [`InfoError::Shape`] if the
    ///   outcome space is too large, [`InfoError::EmptySupport`] if an
    ///   alphabet is empty
    /// - [`InfoError::UnknownVariable`] or [`InfoError::ArityMismatch`] for a
    ///   marginal constraint that doesn't fit the variables
    /// - [`InfoError::InvalidParameter`] for unusable options or a non-finite
    ///   moment target
    pub fn from_alphabets(
        alphabets: Vec<Alphabet<S>>,
        names: Option<Vec<String>>,
        constraints: Vec<Constraint<S>>,
        options: SolverOptions,
    ) -> Result<Self> {
        let n = alphabets.len();
        if n > MAX_VARIABLES {
            return Err(InfoError::TooManyVariables(n));
        }
        if !(options.tolerance.is_finite() && options.tolerance > 0.0) {
            return Err(InfoError::InvalidParameter(format!(
                "solver tolerance must be positive, got {}",
                options.tolerance
            )));
        }
        let size = outcome_space_size(&alphabets)?;
        if size == 0 {
            return Err(InfoError::EmptySupport);
        }

        let full = VarSet::full(n);
        for c in &constraints {
            match c {
                Constraint::Marginal { vars, target } => {
                    if !vars.is_subset(&full) {
                        return Err(InfoError::UnknownVariable(vars.difference(full).to_string()));
                    }
                    if target.num_variables() != vars.len() {
                        return Err(InfoError::ArityMismatch {
                            expected: vars.len(),
                            got: target.num_variables(),
                        });
                    }
                }
                Constraint::Moment { label, target, .. } => {
                    if !target.is_finite() {
                        return Err(InfoError::InvalidParameter(format!(
                            "moment {label:?} has non-finite target {target}"
                        )));
                    }
                }
            }
        }

        let space = cartesian(&alphabets);
        let mut template =
            Distribution::new(space, vec![1.0 / size as f64; size])?.with_alphabets(alphabets)?;
        if let Some(names) = names {
            template = template.with_rv_names(names)?;
        }
        Ok(Self {
            template,
            constraints,
            options,
            state: SolverState::Unsolved,
        })
    }

    pub fn state(&self) -> &SolverState<S> {
        &self.state
    }

    pub fn constraints(&self) -> &[Constraint<S>] {
        &self.constraints
    }

    /// Run the fit. Later calls return the stored outcome without solving
    /// again.
    pub fn solve(&mut self) -> &MaxEntOutcome<S> {
        if !matches!(self.state, SolverState::Done(_)) {
            self.state = SolverState::Solving;
            let outcome = self.run();
            self.state = SolverState::Done(outcome);
        }
        match &self.state {
            SolverState::Done(outcome) => outcome,
            SolverState::Unsolved | SolverState::Solving => unreachable!("solve always ends in Done"),
        }
    }

    /// Solve if needed and hand back the outcome.
    pub fn into_outcome(mut self) -> MaxEntOutcome<S> {
        self.solve();
        match self.state {
            SolverState::Done(outcome) => outcome,
            SolverState::Unsolved | SolverState::Solving => unreachable!("solve always ends in Done"),
        }
    }

    fn run(&self) -> MaxEntOutcome<S> {
        let fits = match self.prepare() {
            Ok(fits) => fits,
            Err(reason) => return self.infeasible(reason),
        };
        let outcomes = self.template.outcomes();
        let mut p = self.template.pmf().clone();

        if fits.is_empty() {
            debug!(outcomes = outcomes.len(), "no constraints, returning uniform");
            return self.solved(p, 0, 0.0);
        }

        let tol = self.options.tolerance.max(DEFAULT_PROBABILITY_TOLERANCE);
        let support = match linear_system(&fits, outcomes.len()) {
            Some((a, b)) => feasible_support(&a, &b, tol),
            None => Support::Unknown,
        };
        match support {
            Support::Infeasible(residual) => {
                return self.infeasible(format!(
                    "no distribution satisfies every constraint (residual {residual:e})"
                ));
            }
            Support::Feasible(mask) => {
                let excluded = mask.iter().filter(|&&keep| !keep).count();
                if excluded > 0 {
                    for (x, &keep) in p.iter_mut().zip(&mask) {
                        if !keep {
                            *x = 0.0;
                        }
                    }
                    let total = kahan_sum(p.iter());
                    p.mapv_inplace(|x| x / total);
                    debug!(excluded, "constraints force outcomes to zero mass");
                }
            }
            Support::Unknown => {
                debug!(outcomes = outcomes.len(), "feasible support undetermined, fitting every outcome");
            }
        }

        let mut history: Vec<f64> = Vec::with_capacity(self.options.max_iterations);
        for iteration in 1..=self.options.max_iterations {
            for fit in &fits {
                let step = match fit {
                    Fit::Marginal(m) => project_marginal(&mut p, m),
                    Fit::Moment(m) => tilt(&mut p, m, self.options.tolerance),
                };
                if let Err(reason) = step {
                    return self.infeasible(reason);
                }
            }
            let residual = fits.iter().map(|f| violation(&p, f)).fold(0.0, f64::max);
            trace!(iteration, residual, "maxent sweep");
            if residual <= self.options.tolerance {
                return self.solved(p, iteration, residual);
            }
            if let Some(&old) = history.len().checked_sub(STALL_WINDOW).and_then(|i| history.get(i)) {
                if old - residual < self.options.stall_tolerance {
                    return self.infeasible(format!(
                        "residual stalled at {residual:e} after {iteration} sweeps"
                    ));
                }
            }
            history.push(residual);
        }

        let residual = history.last().copied().unwrap_or(f64::INFINITY);
        warn!(
            iterations = self.options.max_iterations,
            residual, "maxent solver exhausted its iteration budget"
        );
        MaxEntOutcome::NumericalFailure {
            iterations: self.options.max_iterations,
            residual,
        }
    }

    fn solved(&self, p: Array1<f64>, iterations: usize, residual: f64) -> MaxEntOutcome<S> {
        let total = kahan_sum(p.iter());
        let probs = p.iter().map(|x| x / total).collect();
        let built = Distribution::new(self.template.outcomes().to_vec(), probs)
            .and_then(|d| d.with_alphabets(self.template.alphabets().to_vec()))
            .and_then(|d| match self.template.rv_names() {
                Some(names) => d.with_rv_names(names.iter().cloned()),
                None => Ok(d),
            });
        match built {
            Ok(distribution) => {
                debug!(iterations, residual, "maxent solver converged");
                MaxEntOutcome::Solved {
                    distribution,
                    iterations,
                    residual,
                }
            }
            Err(err) => {
                warn!(%err, "fitted distribution failed validation");
                MaxEntOutcome::NumericalFailure {
                    iterations,
                    residual,
                }
            }
        }
    }

    fn infeasible(&self, reason: Reason) -> MaxEntOutcome<S> {
        warn!(%reason, "maxent constraints are infeasible");
        MaxEntOutcome::Infeasible { reason }
    }

    /// Resolve constraints against the outcome space and run the feasibility
    /// checks that need no iteration.
    fn prepare(&self) -> std::result::Result<Vec<Fit>, Reason> {
        let outcomes = self.template.outcomes();
        let radices: Vec<usize> = self.template.alphabets().iter().map(Alphabet::len).collect();
        let tol = self.options.tolerance.max(DEFAULT_PROBABILITY_TOLERANCE);
        let mut fits = Vec::with_capacity(self.constraints.len());

        for c in &self.constraints {
            match c {
                Constraint::Marginal { vars, target } => {
                    let positions = vars.indices();
                    let (cells, k) = reduce_joint_codes(self.template.codes(), &radices, &positions);
                    let mut keys: Vec<Option<Outcome<S>>> = vec![None; k];
                    for (o, &cell) in outcomes.iter().zip(&cells) {
                        if keys[cell].is_none() {
                            keys[cell] = Some(o.project(&positions));
                        }
                    }
                    let keys: Vec<Outcome<S>> = keys.into_iter().flatten().collect();
                    let index: HashMap<&Outcome<S>, usize> =
                        keys.iter().enumerate().map(|(i, o)| (o, i)).collect();
                    if let Some((o, _)) = target.iter().find(|(o, p)| *p > 0.0 && !index.contains_key(o)) {
                        return Err(format!(
                            "target outcome {o} on {vars} is outside the variables' alphabets"
                        ));
                    }
                    fits.push(Fit::Marginal(MarginalFit {
                        target: keys.iter().map(|o| target.probability(o)).collect(),
                        labels: keys.iter().map(ToString::to_string).collect(),
                        cells,
                        vars: *vars,
                    }));
                }
                Constraint::Moment {
                    label,
                    feature,
                    target,
                } => {
                    let values: Array1<f64> = outcomes.iter().map(|o| feature.as_ref()(o)).collect();
                    if values.iter().any(|v| !v.is_finite()) {
                        return Err(format!("moment {label:?} is not finite on every outcome"));
                    }
                    let (lo, hi) = range(values.iter().copied());
                    if *target < lo - tol || *target > hi + tol {
                        return Err(format!(
                            "moment {label:?} target {target} is outside [{lo}, {hi}]"
                        ));
                    }
                    fits.push(Fit::Moment(MomentFit {
                        label: label.clone(),
                        values,
                        target: *target,
                    }));
                }
            }
        }
        self.check_overlaps(tol)?;
        Ok(fits)
    }

    /// Marginal targets must agree wherever their variables overlap.
    fn check_overlaps(&self, tol: f64) -> std::result::Result<(), Reason> {
        let marginals: Vec<(VarSet, &Distribution<S>)> = self
            .constraints
            .iter()
            .filter_map(|c| match c {
                Constraint::Marginal { vars, target } => Some((*vars, target)),
                Constraint::Moment { .. } => None,
            })
            .collect();
        for (i, &(va, ta)) in marginals.iter().enumerate() {
            for &(vb, tb) in &marginals[i + 1..] {
                let shared = va.intersection(vb);
                if shared.is_empty() {
                    continue;
                }
                let on_shared = |vars: VarSet, target: &Distribution<S>| {
                    let local = VarSet::from_indices(
                        vars.iter()
                            .enumerate()
                            .filter(|&(_, v)| shared.contains(v))
                            .map(|(k, _)| k),
                    );
                    target.marginal(local).map_err(|e| e.to_string())
                };
                let (ma, mb) = (on_shared(va, ta)?, on_shared(vb, tb)?);
                if !ma.is_close(&mb, tol) {
                    return Err(format!(
                        "marginal targets on {va} and {vb} disagree on {shared}"
                    ));
                }
            }
        }
        Ok(())
    }
}

/// The constraints as equations `A p = b`, normalization first.
///
/// Moment rows are scaled to unit magnitude. `None` when the system is too
/// large to tabulate.
fn linear_system(fits: &[Fit], m: usize) -> Option<(Array2<f64>, Vec<f64>)> {
    let rows = 1 + fits
        .iter()
        .map(|f| match f {
            Fit::Marginal(mf) => mf.target.len(),
            Fit::Moment(_) => 1,
        })
        .sum::<usize>();
    if !tableau_fits(rows, m) {
        return None;
    }
    let mut a = Array2::zeros((rows, m));
    let mut b = Vec::with_capacity(rows);
    a.row_mut(0).fill(1.0);
    b.push(1.0);
    for fit in fits {
        match fit {
            Fit::Marginal(mf) => {
                let first = b.len();
                for (x, &cell) in mf.cells.iter().enumerate() {
                    a[(first + cell, x)] = 1.0;
                }
                b.extend_from_slice(&mf.target);
            }
            Fit::Moment(mf) => {
                let scale = mf.values.iter().fold(1.0_f64, |s, v| s.max(v.abs()));
                a.row_mut(b.len()).assign(&mf.values.mapv(|v| v / scale));
                b.push(mf.target / scale);
            }
        }
    }
    Some((a, b))
}

fn range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// Rescale every cell to its target mass.
fn project_marginal(p: &mut Array1<f64>, fit: &MarginalFit) -> std::result::Result<(), Reason> {
    let current = accumulate(p, &fit.cells, fit.target.len());
    for (cell, (&have, &want)) in current.iter().zip(&fit.target).enumerate() {
        if want > 0.0 && have <= 0.0 {
            return Err(format!(
                "cell {} on {} needs mass {want} but every supporting outcome is excluded",
                fit.labels[cell], fit.vars
            ));
        }
    }
    for (x, &cell) in p.iter_mut().zip(&fit.cells) {
        let want = fit.target[cell];
        *x = if want > 0.0 { *x * want / current[cell] } else { 0.0 };
    }
    Ok(())
}

/// Tilt `p` by `exp(λ f)` so that `E[f]` hits the target.
fn tilt(p: &mut Array1<f64>, fit: &MomentFit, tol: f64) -> std::result::Result<(), Reason> {
    let supported = p.iter().zip(fit.values.iter()).filter(|(x, _)| **x > 0.0);
    let (lo, hi) = range(supported.map(|(_, &v)| v));
    if fit.target < lo - tol || fit.target > hi + tol {
        return Err(format!(
            "moment {:?} target {} is outside [{lo}, {hi}] on the remaining support",
            fit.label, fit.target
        ));
    }
    if hi - lo <= tol {
        return Ok(());
    }

    // shifting by the extreme value keeps exp() in range for either sign of λ
    let tilted = |lambda: f64| -> Array1<f64> {
        let shift = if lambda > 0.0 { hi } else { lo };
        let mut w = p.clone();
        w.zip_mut_with(&fit.values, |x, &v| {
            *x = if *x > 0.0 { *x * (lambda * (v - shift)).exp() } else { 0.0 };
        });
        w
    };
    let gap = |lambda: f64| -> f64 {
        let w = tilted(lambda);
        let total = kahan_sum(w.iter());
        let terms: Vec<f64> = w.iter().zip(fit.values.iter()).map(|(x, v)| x * v).collect();
        kahan_sum(&terms) / total - fit.target
    };

    let (mut a, mut b) = (-1.0_f64, 1.0_f64);
    for _ in 0..TILT_EXPANSIONS {
        if gap(a) <= 0.0 {
            break;
        }
        a *= 2.0;
    }
    for _ in 0..TILT_EXPANSIONS {
        if gap(b) >= 0.0 {
            break;
        }
        b *= 2.0;
    }
    let mut lambda = 0.5 * (a + b);
    for _ in 0..TILT_BISECTIONS {
        lambda = 0.5 * (a + b);
        let g = gap(lambda);
        if g.abs() <= tol * 1e-3 || b - a <= f64::EPSILON * b.abs().max(1.0) {
            break;
        }
        if g > 0.0 {
            b = lambda;
        } else {
            a = lambda;
        }
    }

    let w = tilted(lambda);
    let total = kahan_sum(w.iter());
    *p = w / total;
    Ok(())
}

/// Largest absolute deviation of `p` from one constraint.
fn violation(p: &Array1<f64>, fit: &Fit) -> f64 {
    match fit {
        Fit::Marginal(m) => accumulate(p, &m.cells, m.target.len())
            .iter()
            .zip(&m.target)
            .map(|(have, want)| (have - want).abs())
            .fold(0.0, f64::max),
        Fit::Moment(m) => {
            let terms: Vec<f64> = p.iter().zip(m.values.iter()).map(|(x, v)| x * v).collect();
            (kahan_sum(&terms) - m.target).abs()
        }
    }
}

/// Maximum-entropy distribution matching the marginals of `dist` on each of
/// `subsets`.
///
/// With every pair of variables this is the pairwise maximum-entropy model.
pub fn maxent_dist<S: Symbol>(
    dist: &Distribution<S>,
    subsets: &[VarSet],
    options: SolverOptions,
) -> Result<Distribution<S>> {
    let constraints = subsets
        .iter()
        .map(|&vars| Ok(Constraint::marginal(vars, dist.marginal(vars)?)))
        .collect::<Result<Vec<_>>>()?;
    MaxEntSolver::new(dist, constraints, options)?
        .into_outcome()
        .into_result()
}

/// Maximum-entropy fits matching all `k`-variable marginals of `dist`, for
/// `k = 0, ..., n`.
///
/// The first entry is uniform over the outcome space and the last matches
/// `dist` itself; entropies are non-increasing along the list.
pub fn marginal_maxent_dists<S: Symbol>(
    dist: &Distribution<S>,
    options: SolverOptions,
) -> Result<Vec<Distribution<S>>> {
    let full = dist.full_set();
    (0..=dist.num_variables())
        .map(|k| {
            let subsets: Vec<VarSet> = full.subsets().filter(|s| s.len() == k && k > 0).collect();
            maxent_dist(dist, &subsets, options)
        })
        .collect()
}
