//! Dense matrices of real balls.

use std::ops::{Index, IndexMut};

use ntk_core::errors::{ErrorInfo, NtkError};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::arb::Arb;

fn shape_error(code: &str, message: impl Into<String>) -> NtkError {
    NtkError::Matrix(ErrorInfo::new(code, message))
}

/// Row-major matrix of [`Arb`] entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArbMat {
    rows: usize,
    cols: usize,
    entries: Vec<Arb>,
}

impl ArbMat {
    /// Zero matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            entries: vec![Arb::zero(); rows * cols],
        }
    }

    /// Identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut mat = Self::new(n, n);
        for i in 0..n {
            mat[(i, i)] = Arb::one();
        }
        mat
    }

    /// Matrix whose every entry is indeterminate.
    pub fn indeterminate(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            entries: vec![Arb::indeterminate(); rows * cols],
        }
    }

    /// Builds a matrix entry by entry.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> Arb) -> Self {
        let mut entries = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                entries.push(f(i, j));
            }
        }
        Self {
            rows,
            cols,
            entries,
        }
    }

    /// Builds a matrix from a row-major entry vector.
    pub fn from_entries(rows: usize, cols: usize, entries: Vec<Arb>) -> Result<Self, NtkError> {
        if entries.len() != rows * cols {
            return Err(NtkError::Matrix(
                ErrorInfo::new("entry-count", "entry count does not match the shape")
                    .with_context("rows", rows)
                    .with_context("cols", cols)
                    .with_context("entries", entries.len()),
            ));
        }
        Ok(Self {
            rows,
            cols,
            entries,
        })
    }

    /// Builds an exact matrix from rows of floats.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, NtkError> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        if rows.iter().any(|row| row.len() != cols) {
            return Err(shape_error("ragged-rows", "rows have different lengths"));
        }
        let entries = rows.iter().flatten().copied().map(Arb::from_f64).collect();
        Self::from_entries(rows.len(), cols, entries)
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.cols
    }

    /// True for square matrices.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Row-major entries.
    pub fn entries(&self) -> &[Arb] {
        &self.entries
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[Arb] {
        &self.entries[i * self.cols..(i + 1) * self.cols]
    }

    /// True when every entry has finite radius.
    pub fn is_finite(&self) -> bool {
        self.entries.iter().all(Arb::is_finite)
    }

    /// True when `other` has the same shape and is entrywise contained in `self`.
    pub fn contains(&self, other: &ArbMat) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .entries
                .iter()
                .zip(&other.entries)
                .all(|(a, b)| a.contains(b))
    }

    /// Transposed copy.
    pub fn transpose(&self) -> ArbMat {
        ArbMat::from_fn(self.cols, self.rows, |i, j| self[(j, i)])
    }

    /// Matrix product.
    pub fn mul(&self, other: &ArbMat, prec: u32) -> Result<ArbMat, NtkError> {
        if self.cols != other.rows {
            return Err(NtkError::Matrix(
                ErrorInfo::new("product-shape", "inner dimensions differ")
                    .with_context("left_cols", self.cols)
                    .with_context("right_rows", other.rows),
            ));
        }
        Ok(ArbMat::from_fn(self.rows, other.cols, |i, j| {
            (0..self.cols).fold(Arb::zero(), |acc, k| {
                acc.add(&self[(i, k)].mul(&other[(k, j)], prec), prec)
            })
        }))
    }

    /// Product with a column vector.
    pub fn mul_vec(&self, v: &[Arb], prec: u32) -> Result<Vec<Arb>, NtkError> {
        if self.cols != v.len() {
            return Err(NtkError::Matrix(
                ErrorInfo::new("vector-shape", "vector length differs from column count")
                    .with_context("cols", self.cols)
                    .with_context("len", v.len()),
            ));
        }
        Ok((0..self.rows)
            .map(|i| {
                self.row(i)
                    .iter()
                    .zip(v)
                    .fold(Arb::zero(), |acc, (a, x)| acc.add(&a.mul(x, prec), prec))
            })
            .collect())
    }

    /// Certified inverse by Gauss-Jordan elimination.
    ///
    /// Pivots are chosen by midpoint magnitude. Returns `None` when the matrix
    /// is not square or some pivot ball contains zero.
    pub fn try_inv(&self, prec: u32) -> Option<ArbMat> {
        if !self.is_square() {
            return None;
        }
        let n = self.rows;
        let mut a = self.clone();
        let mut inv = ArbMat::identity(n);

        for col in 0..n {
            let pivot = (col..n).max_by(|&r, &s| {
                a[(r, col)]
                    .mid()
                    .abs()
                    .partial_cmp(&a[(s, col)].mid().abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })?;
            if a[(pivot, col)].contains_zero() {
                trace!(col, "pivot ball contains zero");
                return None;
            }
            a.swap_rows(pivot, col);
            inv.swap_rows(pivot, col);

            let scale = a[(col, col)].inv(prec);
            for j in col..n {
                a[(col, j)] = a[(col, j)].mul(&scale, prec);
            }
            for j in 0..n {
                inv[(col, j)] = inv[(col, j)].mul(&scale, prec);
            }
            a[(col, col)] = Arb::one();

            for r in 0..n {
                if r == col {
                    continue;
                }
                let factor = a[(r, col)];
                if factor.is_zero() {
                    continue;
                }
                for j in col + 1..n {
                    let delta = factor.mul(&a[(col, j)], prec);
                    a[(r, j)] = a[(r, j)].sub(&delta, prec);
                }
                for j in 0..n {
                    let delta = factor.mul(&inv[(col, j)], prec);
                    inv[(r, j)] = inv[(r, j)].sub(&delta, prec);
                }
                a[(r, col)] = Arb::zero();
            }
        }
        Some(inv)
    }

    /// Certified lower-triangular Cholesky factor `L` with `L * L^T` enclosing `self`.
    ///
    /// Only the lower triangle of `self` is read. Returns `None` when the
    /// matrix is not square or a pivot is not certainly positive.
    pub fn cho(&self, prec: u32) -> Option<ArbMat> {
        if !self.is_square() {
            return None;
        }
        let n = self.rows;
        let mut l = ArbMat::new(n, n);
        for j in 0..n {
            let mut d = self[(j, j)];
            for k in 0..j {
                d = d.sub(&l[(j, k)].sqr(prec), prec);
            }
            if !d.is_positive() {
                trace!(pivot = j, %d, "cholesky pivot not certainly positive");
                return None;
            }
            let diag = d.sqrt(prec);
            l[(j, j)] = diag;
            for i in j + 1..n {
                let mut s = self[(i, j)];
                for k in 0..j {
                    s = s.sub(&l[(i, k)].mul(&l[(j, k)], prec), prec);
                }
                l[(i, j)] = s.div(&diag, prec);
            }
        }
        Some(l)
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for j in 0..self.cols {
            self.entries.swap(a * self.cols + j, b * self.cols + j);
        }
    }
}

impl Index<(usize, usize)> for ArbMat {
    type Output = Arb;

    fn index(&self, (i, j): (usize, usize)) -> &Arb {
        &self.entries[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for ArbMat {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Arb {
        &mut self.entries[i * self.cols + j]
    }
}
