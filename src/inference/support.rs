// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Support of the feasible set of a linear system over probability vectors.
//!
//! The maximum-entropy distribution charges exactly the outcomes that some
//! feasible distribution charges. Constraints can force outcomes to zero
//! without any single target cell being zero, and proportional fitting only
//! reaches such zeros in the limit. The solver therefore restricts itself to
//! this support before fitting.
//!
//! # Algorithm
//!
//! A dense two-phase simplex over `A p = b`, `p ≥ 0`:
//!
//! ```text
//! phase 1:  min Σ a            s.t.  A p + a = b,  p, a ≥ 0
//! phase 2:  max Σ_{j ∈ U} p_j  over the feasible set, where U holds the
//!           outcomes no feasible point has charged yet; repeat until the
//!           optimum is zero
//! ```
//!
//! Every phase-2 round starts from the previous optimal basis. Besides the
//! basic solution itself, any nonbasic outcome whose edge out of the current
//! vertex has positive length is reachable, which usually settles most
//! outcomes without another round. Bland's rule keeps degenerate pivots from
//! cycling.

use ndarray::Array2;

/// Largest tableau, in entries, the solver will build.
pub(crate) const MAX_TABLEAU_ENTRIES: usize = 1 << 22;

const PIVOT_EPS: f64 = 1e-11;

/// Mass at or below this counts as zero.
const ZERO_MASS: f64 = 1e-12;

/// Pivots allowed per tableau column.
const PIVOTS_PER_COLUMN: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Support {
    /// `mask[j]` holds when some feasible distribution gives outcome `j` mass
    Feasible(Vec<bool>),
    /// No probability vector satisfies the system; the phase-1 residual
    Infeasible(f64),
    /// The pivot budget ran out
    Unknown,
}

/// Whether a system with `rows` equations over `m` outcomes is small enough
/// for [`feasible_support`].
pub(crate) fn tableau_fits(rows: usize, m: usize) -> bool {
    m.checked_add(rows)
        .and_then(|c| c.checked_add(1))
        .and_then(|c| c.checked_mul(rows))
        .is_some_and(|entries| entries <= MAX_TABLEAU_ENTRIES)
}

/// Outcomes that can carry mass under `a p = b`.
///
/// `tolerance` bounds the total violation a feasible system may show after
/// phase 1, per equation.
pub(crate) fn feasible_support(a: &Array2<f64>, b: &[f64], tolerance: f64) -> Support {
    let (r, m) = a.dim();
    if r == 0 {
        return Support::Feasible(vec![true; m]);
    }
    let mut tab = Tableau::new(a, b);
    let mut budget = PIVOTS_PER_COLUMN * (m + r);

    let mut cost = vec![0.0; m + r];
    cost[m..].fill(1.0);
    if !tab.minimize(&cost, m + r, &mut budget) {
        return Support::Unknown;
    }
    let residual: f64 = (0..r).filter(|&i| tab.basis[i] >= m).map(|i| tab.rhs(i)).sum();
    if residual > tolerance * r as f64 {
        return Support::Infeasible(residual);
    }
    tab.drive_out_artificials();

    let mut reachable = vec![false; m];
    tab.mark(&mut reachable);
    while reachable.contains(&false) {
        let cost: Vec<f64> = (0..m + r)
            .map(|j| if j < m && !reachable[j] { -1.0 } else { 0.0 })
            .collect();
        if !tab.minimize(&cost, m, &mut budget) {
            return Support::Unknown;
        }
        if !tab.mark(&mut reachable) {
            break;
        }
    }
    Support::Feasible(reachable)
}

struct Tableau {
    /// `r × (m + r + 1)`: structural columns, artificial columns, right-hand side
    t: Array2<f64>,
    basis: Vec<usize>,
    /// Rows found redundant are dropped
    active: Vec<bool>,
    m: usize,
}

impl Tableau {
    fn new(a: &Array2<f64>, b: &[f64]) -> Self {
        let (r, m) = a.dim();
        let mut t = Array2::zeros((r, m + r + 1));
        for i in 0..r {
            let sign = if b[i] < 0.0 { -1.0 } else { 1.0 };
            for j in 0..m {
                t[(i, j)] = sign * a[(i, j)];
            }
            t[(i, m + i)] = 1.0;
            t[(i, m + r)] = sign * b[i];
        }
        Self {
            t,
            basis: (m..m + r).collect(),
            active: vec![true; r],
            m,
        }
    }

    fn rhs_col(&self) -> usize {
        self.t.ncols() - 1
    }

    fn rhs(&self, i: usize) -> f64 {
        self.t[(i, self.rhs_col())]
    }

    fn reduced_cost(&self, cost: &[f64], j: usize) -> f64 {
        self.basis
            .iter()
            .enumerate()
            .filter(|&(i, _)| self.active[i])
            .fold(cost[j], |d, (i, &b)| d - cost[b] * self.t[(i, j)])
    }

    /// Minimize `cost · x`, letting only columns `0..allowed` enter.
    ///
    /// Returns `false` when the pivot budget runs out.
    fn minimize(&mut self, cost: &[f64], allowed: usize, budget: &mut usize) -> bool {
        loop {
            let Some(col) = (0..allowed).find(|&j| self.reduced_cost(cost, j) < -PIVOT_EPS) else {
                return true;
            };
            let leaving = (0..self.t.nrows())
                .filter(|&i| self.active[i] && self.t[(i, col)] > PIVOT_EPS)
                .min_by(|&x, &y| {
                    let rx = self.rhs(x) / self.t[(x, col)];
                    let ry = self.rhs(y) / self.t[(y, col)];
                    rx.total_cmp(&ry).then(self.basis[x].cmp(&self.basis[y]))
                });
            // the feasible set lies in the simplex, so a ray means lost precision
            let Some(row) = leaving else {
                return false;
            };
            if *budget == 0 {
                return false;
            }
            *budget -= 1;
            self.pivot(row, col);
        }
    }

    fn pivot(&mut self, row: usize, col: usize) {
        let rc = self.rhs_col();
        let piv = self.t[(row, col)];
        self.t.row_mut(row).mapv_inplace(|x| x / piv);
        let pivot_row = self.t.row(row).to_owned();
        for i in 0..self.t.nrows() {
            if !self.active[i] {
                continue;
            }
            if i != row {
                let f = self.t[(i, col)];
                if f != 0.0 {
                    self.t.row_mut(i).scaled_add(-f, &pivot_row);
                }
            }
            if self.t[(i, rc)] < ZERO_MASS {
                self.t[(i, rc)] = 0.0;
            }
        }
        self.basis[row] = col;
    }

    /// After phase 1, swap every artificial still in the basis for a
    /// structural column, or drop its row as redundant.
    fn drive_out_artificials(&mut self) {
        for i in 0..self.basis.len() {
            if !self.active[i] || self.basis[i] < self.m {
                continue;
            }
            match (0..self.m).find(|&j| self.t[(i, j)].abs() > PIVOT_EPS) {
                Some(j) => self.pivot(i, j),
                None => self.active[i] = false,
            }
        }
    }

    /// Largest step outcome `j` can enter the basis with.
    fn edge_length(&self, j: usize) -> f64 {
        (0..self.t.nrows())
            .filter(|&i| self.active[i] && self.t[(i, j)] > PIVOT_EPS)
            .map(|i| self.rhs(i) / self.t[(i, j)])
            .fold(f64::INFINITY, f64::min)
    }

    /// Record every outcome the current vertex or one of its edges charges;
    /// `true` if any was new.
    fn mark(&self, reachable: &mut [bool]) -> bool {
        let values = self.values();
        let mut grew = false;
        for j in 0..self.m {
            if !reachable[j] && (values[j] > ZERO_MASS || self.edge_length(j) > ZERO_MASS) {
                reachable[j] = true;
                grew = true;
            }
        }
        grew
    }

    fn values(&self) -> Vec<f64> {
        let mut x = vec![0.0; self.m];
        for (i, &b) in self.basis.iter().enumerate() {
            if self.active[i] && b < self.m {
                x[b] = self.rhs(i);
            }
        }
        x
    }
}
