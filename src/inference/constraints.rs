// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::distribution::{Distribution, Outcome, Symbol, VarSet};
use crate::error::Result;
use std::fmt;
use std::sync::Arc;

/// Feature function of a moment constraint, evaluated on full outcomes.
pub type Feature<S> = Arc<dyn Fn(&Outcome<S>) -> f64 + Send + Sync>;

/// A statistic the fitted distribution has to reproduce.
#[derive(Clone)]
pub enum Constraint<S> {
    /// The marginal on `vars` must equal `target`, a distribution over
    /// `vars.len()` variables listed in index order.
    Marginal { vars: VarSet, target: Distribution<S> },

    /// `E[feature(X)] = target`.
    Moment {
        label: String,
        feature: Feature<S>,
        target: f64,
    },
}

impl<S: Symbol> Constraint<S> {
    pub fn marginal(vars: VarSet, target: Distribution<S>) -> Self {
        Self::Marginal { vars, target }
    }

    pub fn moment<F>(label: impl Into<String>, feature: F, target: f64) -> Self
    where
        F: Fn(&Outcome<S>) -> f64 + Send + Sync + 'static,
    {
        Self::Moment {
            label: label.into(),
            feature: Arc::new(feature),
            target,
        }
    }

    /// Marginal constraint from observed counts of sub-outcomes on `vars`.
    ///
    /// ```rust
    /// use infodist::VarSet;
    /// use infodist::inference::Constraint;
    ///
    /// let c = Constraint::<char>::from_counts(
    ///     VarSet::from_indices([0, 1]),
    ///     vec!["00".into(), "11".into()],
    ///     vec![30.0, 10.0],
    /// )
    /// .unwrap();
    /// assert!(matches!(c, Constraint::Marginal { .. }));
    /// ```
    pub fn from_counts(vars: VarSet, outcomes: Vec<Outcome<S>>, counts: Vec<f64>) -> Result<Self> {
        Ok(Self::Marginal {
            vars,
            target: Distribution::from_weights(outcomes, counts)?,
        })
    }
}

impl<S: Symbol> fmt::Debug for Constraint<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Marginal { vars, target } => f
                .debug_struct("Marginal")
                .field("vars", vars)
                .field("target", target)
                .finish(),
            Constraint::Moment { label, target, .. } => f
                .debug_struct("Moment")
                .field("label", label)
                .field("target", target)
                .finish_non_exhaustive(),
        }
    }
}
