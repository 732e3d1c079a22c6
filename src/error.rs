// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for distribution construction, transforms and inference.

use thiserror::Error;

/// Reasons a probability vector is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProbabilityError {
    /// A probability below zero.
    #[error("negative probability {value} at outcome {index}")]
    Negative { index: usize, value: f64 },

    /// NaN or infinite mass.
    #[error("non-finite probability {value} at outcome {index}")]
    NonFinite { index: usize, value: f64 },

    /// Probabilities don't sum to 1.
    #[error("probabilities sum to {sum} (expected 1 within {tolerance})")]
    NotNormalized { sum: f64, tolerance: f64 },

    /// Weights sum to zero and cannot be renormalized.
    #[error("cannot normalize: all weights are zero")]
    ZeroWeights,
}

/// Errors that can occur when building or querying distributions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InfoError {
    /// Inconsistent outcome arity or mismatched input lengths.
    #[error("shape error: {0}")]
    Shape(String),

    #[error(transparent)]
    Probability(#[from] ProbabilityError),

    /// The same outcome was listed twice.
    #[error("duplicate outcome {0}")]
    DuplicateOutcome(String),

    /// Number of variable names differs from the number of variables.
    #[error("expected {expected} variable names, got {got}")]
    ArityMismatch { expected: usize, got: usize },

    #[error("variable name {0:?} used more than once")]
    DuplicateVariableName(String),

    /// A subset references an index or name the distribution doesn't have.
    #[error("unknown random variable {0}")]
    UnknownVariable(String),

    /// Conditioning on an event of probability zero.
    #[error("cannot condition on zero-probability event {0}")]
    ZeroProbabilityEvent(String),

    #[error("cannot build a distribution with empty support")]
    EmptySupport,

    /// A measure parameter outside its domain (e.g. a negative Rényi order).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Subsets are bitmasks, so at most 64 variables are supported.
    #[error("{0} random variables exceed the supported maximum of 64")]
    TooManyVariables(usize),

    /// The constraint set admits no distribution.
    #[error("infeasible constraints: {0}")]
    Infeasible(String),

    /// The solver ran out of iterations before converging.
    #[error("solver did not converge after {iterations} iterations (residual {residual:e})")]
    NumericalFailure { iterations: usize, residual: f64 },
}

impl InfoError {
    pub(crate) fn shape(msg: impl Into<String>) -> Self {
        Self::Shape(msg.into())
    }
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, InfoError>;
