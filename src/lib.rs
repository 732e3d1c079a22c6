// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # infodist
//!
//! Discrete multivariate probability distributions and the information
//! measures defined over them: Shannon entropy and mutual information,
//! their multivariate generalizations, divergences, and maximum-entropy
//! inference from partial statistics.
//!
//! ## Quick Start
//!
//! ```rust
//! use infodist::{EntropyCache, VarSet, example_dists};
//! use infodist::measures::{multivariate, shannon};
//!
//! let d = example_dists::xor();
//! let mut h = EntropyCache::new(&d);
//! let (x, y) = (VarSet::singleton(0), VarSet::singleton(1));
//!
//! // no pairwise correlation ...
//! assert_eq!(shannon::mutual_information(&mut h, x, y).unwrap(), 0.0);
//! // ... but one bit of synergy
//! let groups = d.full_set().singletons();
//! let ci = multivariate::co_information(&mut h, &groups, VarSet::empty()).unwrap();
//! assert!((ci + 1.0).abs() < 1e-12);
//! ```
//!
//! ## Measures
//!
//! | Family | Measures |
//! |--------|----------|
//! | Shannon | entropy, conditional entropy, mutual information, conditional MI |
//! | Multivariate | co-information, interaction information, total correlation, dual total correlation, residual entropy, O-information, CAEKL MI |
//! | Profiles | Shannon partition (information-diagram atoms) |
//! | Divergences | cross entropy, Kullback-Leibler, Jensen-Shannon |
//! | Generalized | Rényi, Tsallis, extropy |
//!
//! ## Architecture
//!
//! 1. **Distribution model** ([`distribution`]): validated, immutable joint
//!    distributions; every transform returns a new value
//! 2. **Measure engine** ([`measures`]): memoized subset entropies behind the
//!    [`SubsetEntropy`] trait, combined by inclusion-exclusion
//! 3. **Inference** ([`inference`]): maximum-entropy fitting to marginal and
//!    moment constraints
//!
//! Variable subsets are [`VarSet`] bitmasks, so a distribution has at most
//! 64 variables. Results are reported in bits unless a
//! [`config::MeasureConfig`] says otherwise.

pub mod config;
pub mod distribution;
pub mod error;
pub mod example_dists;
pub mod inference;
pub mod math;
pub mod measures;

pub use distribution::{Alphabet, Distribution, Outcome, RvRef, Symbol, VarSet};
pub use error::{InfoError, ProbabilityError, Result};
pub use measures::{CrossEntropy, EntropyCache, ShannonPartition, SubsetEntropy};
