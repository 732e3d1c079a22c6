// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Maximum-entropy inference from marginal and moment constraints.
//!
//! A [`MaxEntSolver`] moves through [`SolverState`] once:
//! `Unsolved` to `Solving` to `Done`, where the [`MaxEntOutcome`] is
//! `Solved`, `Infeasible` or `NumericalFailure`. Infeasibility and
//! non-convergence are outcomes, not errors, so batches of fits can continue
//! past a bad request; [`MaxEntOutcome::into_result`] converts when an error
//! is preferred.

pub mod constraints;
pub mod maxent;
mod support;

pub use crate::distribution::MAX_OUTCOME_SPACE;
pub use constraints::{Constraint, Feature};
pub use maxent::{MaxEntOutcome, MaxEntSolver, SolverState, marginal_maxent_dists, maxent_dist};
