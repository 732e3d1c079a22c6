// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Numerical tolerances, logarithm base and solver budgets.
//!
//! These values are part of the observable contract: the probability
//! tolerance decides which inputs a [`Distribution`](crate::Distribution)
//! accepts, and the clamp tolerance decides when a tiny negative information
//! value is reported as exactly zero.

use serde::{Deserialize, Serialize};

/// Default tolerance on `|Σp − 1|` accepted at construction.
pub const DEFAULT_PROBABILITY_TOLERANCE: f64 = 1e-9;

/// Values in `(-DEFAULT_CLAMP_TOLERANCE, 0)` are reported as `0.0`.
pub const DEFAULT_CLAMP_TOLERANCE: f64 = 1e-10;

/// Tolerances used when validating probability vectors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerances {
    /// Maximum deviation of the probability sum from one
    #[serde(default = "default_probability")]
    pub probability: f64,
}

fn default_probability() -> f64 {
    DEFAULT_PROBABILITY_TOLERANCE
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            probability: default_probability(),
        }
    }
}

/// Logarithm base in which measures are reported.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogBase {
    /// Base 2
    #[default]
    Bits,
    /// Base e
    Nats,
    /// Base 10
    Dits,
    Custom(f64),
}

impl LogBase {
    /// Numeric value of the base.
    pub fn value(&self) -> f64 {
        match self {
            LogBase::Bits => 2.0,
            LogBase::Nats => std::f64::consts::E,
            LogBase::Dits => 10.0,
            LogBase::Custom(b) => *b,
        }
    }

    /// `log_b(x)` for this base.
    pub fn log(&self, x: f64) -> f64 {
        match self {
            LogBase::Bits => x.log2(),
            LogBase::Nats => x.ln(),
            LogBase::Dits => x.log10(),
            LogBase::Custom(b) => x.ln() / b.ln(),
        }
    }
}

/// Settings for the measure engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasureConfig {
    #[serde(default)]
    pub base: LogBase,

    /// Negative results above `-clamp_tolerance` are clamped to zero
    #[serde(default = "default_clamp")]
    pub clamp_tolerance: f64,
}

fn default_clamp() -> f64 {
    DEFAULT_CLAMP_TOLERANCE
}

impl Default for MeasureConfig {
    fn default() -> Self {
        Self {
            base: LogBase::default(),
            clamp_tolerance: default_clamp(),
        }
    }
}

impl MeasureConfig {
    pub fn with_base(mut self, base: LogBase) -> Self {
        self.base = base;
        self
    }
}

/// Budget and convergence settings for the maximum-entropy solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverOptions {
    /// Largest absolute constraint violation accepted as converged
    #[serde(default = "default_solver_tolerance")]
    pub tolerance: f64,

    /// Hard cap on fitting sweeps
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Residual improvement over ten sweeps below this counts as a stall
    #[serde(default = "default_stall_tolerance")]
    pub stall_tolerance: f64,
}

fn default_solver_tolerance() -> f64 {
    1e-9
}

fn default_max_iterations() -> usize {
    500
}

fn default_stall_tolerance() -> f64 {
    1e-14
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            tolerance: default_solver_tolerance(),
            max_iterations: default_max_iterations(),
            stall_tolerance: default_stall_tolerance(),
        }
    }
}

impl SolverOptions {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}
