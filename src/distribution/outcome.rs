// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::ops::Index;

/// Bound for values a random variable can take.
///
/// Ordering is required so outcomes and alphabets have a canonical order.
pub trait Symbol: Clone + Eq + Hash + Ord + fmt::Debug {}

impl<T: Clone + Eq + Hash + Ord + fmt::Debug> Symbol for T {}

/// One joint assignment of symbols to all random variables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Outcome<S>(Vec<S>);

impl<S> Outcome<S> {
    pub fn new(symbols: Vec<S>) -> Self {
        Self(symbols)
    }

    /// The zero-variable outcome.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Number of components.
    pub fn arity(&self) -> usize {
        self.0.len()
    }

    pub fn symbols(&self) -> &[S] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<S> {
        self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.0.iter()
    }
}

impl<S: Clone> Outcome<S> {
    /// Keep only the given positions, in the order listed.
    pub fn project(&self, positions: &[usize]) -> Self {
        Self(positions.iter().map(|&i| self.0[i].clone()).collect())
    }

    /// Concatenate two outcomes.
    pub fn concat(&self, other: &Self) -> Self {
        let mut v = self.0.clone();
        v.extend(other.0.iter().cloned());
        Self(v)
    }
}

impl<S> Index<usize> for Outcome<S> {
    type Output = S;

    fn index(&self, i: usize) -> &S {
        &self.0[i]
    }
}

impl<S> From<Vec<S>> for Outcome<S> {
    fn from(v: Vec<S>) -> Self {
        Self(v)
    }
}

impl<S: Clone> From<&[S]> for Outcome<S> {
    fn from(v: &[S]) -> Self {
        Self(v.to_vec())
    }
}

impl<S, const N: usize> From<[S; N]> for Outcome<S> {
    fn from(v: [S; N]) -> Self {
        Self(Vec::from(v))
    }
}

/// `"021"` becomes the outcome `('0', '2', '1')`.
impl From<&str> for Outcome<char> {
    fn from(s: &str) -> Self {
        Self(s.chars().collect())
    }
}

impl<S: fmt::Debug> fmt::Display for Outcome<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, s) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", s)?;
        }
        write!(f, ")")
    }
}

/// Sorted, duplicate-free set of symbols one variable can take.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Alphabet<S>(Vec<S>);

impl<S: Symbol> Alphabet<S> {
    pub fn new(symbols: impl IntoIterator<Item = S>) -> Self {
        let mut v: Vec<S> = symbols.into_iter().collect();
        v.sort();
        v.dedup();
        Self(v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, s: &S) -> bool {
        self.0.binary_search(s).is_ok()
    }

    /// Position of `s` within the alphabet.
    pub fn code(&self, s: &S) -> Option<usize> {
        self.0.binary_search(s).ok()
    }

    pub fn symbol(&self, code: usize) -> &S {
        &self.0[code]
    }

    pub fn symbols(&self) -> &[S] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.0.iter()
    }
}

/// Cartesian product of alphabets, in lexicographic order.
pub fn cartesian<S: Symbol>(alphabets: &[Alphabet<S>]) -> Vec<Outcome<S>> {
    let mut out = vec![Vec::with_capacity(alphabets.len())];
    for alphabet in alphabets {
        let mut next = Vec::with_capacity(out.len() * alphabet.len());
        for prefix in &out {
            for s in alphabet.iter() {
                let mut o = prefix.clone();
                o.push(s.clone());
                next.push(o);
            }
        }
        out = next;
    }
    out.into_iter().map(Outcome::new).collect()
}
