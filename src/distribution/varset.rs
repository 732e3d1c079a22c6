// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bitmask subsets of variable indices and their combinatorics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest number of variables a [`VarSet`] can address.
pub const MAX_VARIABLES: usize = 64;

/// A set of random-variable indices stored as a `u64` bitmask.
///
/// Bit `i` set means variable `i` is a member. Sets compare by membership, so
/// `{0, 2}` built in any order is the same key for memoized entropies.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct VarSet(u64);

impl VarSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    /// `{0, 1, ..., n-1}`.
    ///
    /// # Panics
    /// If `n > 64`.
    pub fn full(n: usize) -> Self {
        assert!(n <= MAX_VARIABLES, "at most {} variables", MAX_VARIABLES);
        if n == MAX_VARIABLES {
            Self(u64::MAX)
        } else {
            Self((1u64 << n) - 1)
        }
    }

    /// # Panics
    /// If `i >= 64`.
    pub fn singleton(i: usize) -> Self {
        assert!(i < MAX_VARIABLES, "variable index {} out of range", i);
        Self(1u64 << i)
    }

    /// # Panics
    /// If any index is `>= 64`.
    pub fn from_indices<I: IntoIterator<Item = usize>>(indices: I) -> Self {
        indices
            .into_iter()
            .fold(Self::empty(), |acc, i| acc.union(Self::singleton(i)))
    }

    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> u64 {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn contains(&self, i: usize) -> bool {
        i < MAX_VARIABLES && self.0 & (1u64 << i) != 0
    }

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    pub fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.0 & other.0 == 0
    }

    /// Highest member index.
    pub fn max_index(&self) -> Option<usize> {
        if self.0 == 0 {
            None
        } else {
            Some(63 - self.0.leading_zeros() as usize)
        }
    }

    /// Member indices in ascending order.
    pub fn iter(&self) -> Indices {
        Indices(self.0)
    }

    pub fn indices(&self) -> Vec<usize> {
        self.iter().collect()
    }

    /// One singleton set per member.
    pub fn singletons(&self) -> Vec<VarSet> {
        self.iter().map(VarSet::singleton).collect()
    }

    /// Every subset including `∅` and `self`, in ascending bitmask order.
    pub fn subsets(&self) -> Subsets {
        Subsets {
            mask: self.0,
            next: Some(0),
        }
    }

    /// Every non-empty subset, in ascending bitmask order.
    pub fn nonempty_subsets(&self) -> impl Iterator<Item = VarSet> {
        self.subsets().skip(1)
    }

    /// All set partitions of `self` into non-empty blocks.
    ///
    /// The count is the Bell number of `len()`, so this is meant for the
    /// handful of variables multivariate measures work with.
    pub fn partitions(&self) -> Vec<Vec<VarSet>> {
        let mut out = Vec::new();
        let mut blocks = Vec::new();
        partitions_rec(*self, &mut blocks, &mut out);
        out
    }
}

fn partitions_rec(rest: VarSet, blocks: &mut Vec<VarSet>, out: &mut Vec<Vec<VarSet>>) {
    let first = match rest.iter().next() {
        Some(i) => i,
        None => {
            out.push(blocks.clone());
            return;
        }
    };
    let head = VarSet::singleton(first);
    let others = rest.difference(head);
    for sub in others.subsets() {
        let block = head.union(sub);
        blocks.push(block);
        partitions_rec(rest.difference(block), blocks, out);
        blocks.pop();
    }
}

impl fmt::Display for VarSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (k, i) in self.iter().enumerate() {
            if k > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", i)?;
        }
        write!(f, "}}")
    }
}

impl IntoIterator for VarSet {
    type Item = usize;
    type IntoIter = Indices;

    fn into_iter(self) -> Indices {
        self.iter()
    }
}

/// Iterator over member indices of a [`VarSet`].
#[derive(Debug, Clone)]
pub struct Indices(u64);

impl Iterator for Indices {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let i = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(i)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Indices {}

/// Submask enumeration of a [`VarSet`].
#[derive(Debug, Clone)]
pub struct Subsets {
    mask: u64,
    next: Option<u64>,
}

impl Iterator for Subsets {
    type Item = VarSet;

    fn next(&mut self) -> Option<VarSet> {
        let cur = self.next?;
        // Next submask in ascending order; wraps back to 0 after `mask`.
        let succ = cur.wrapping_sub(self.mask) & self.mask;
        self.next = if cur == self.mask { None } else { Some(succ) };
        Some(VarSet(cur))
    }
}

/// A random variable referenced by position or by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RvRef {
    Index(usize),
    Name(String),
}

impl From<usize> for RvRef {
    fn from(i: usize) -> Self {
        RvRef::Index(i)
    }
}

impl From<&str> for RvRef {
    fn from(s: &str) -> Self {
        RvRef::Name(s.to_string())
    }
}

impl From<String> for RvRef {
    fn from(s: String) -> Self {
        RvRef::Name(s)
    }
}

impl From<char> for RvRef {
    fn from(c: char) -> Self {
        RvRef::Name(c.to_string())
    }
}

impl fmt::Display for RvRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RvRef::Index(i) => write!(f, "index {}", i),
            RvRef::Name(n) => write!(f, "{:?}", n),
        }
    }
}
