//! Dense matrices of complex balls.

use std::ops::{Index, IndexMut};

use ntk_core::errors::{ErrorInfo, NtkError};
use serde::{Deserialize, Serialize};

use crate::acb::Acb;
use crate::mat::ArbMat;

/// Row-major matrix of [`Acb`] entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcbMat {
    rows: usize,
    cols: usize,
    entries: Vec<Acb>,
}

impl AcbMat {
    /// Zero matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            entries: vec![Acb::zero(); rows * cols],
        }
    }

    /// Builds a matrix entry by entry.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> Acb) -> Self {
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

    /// Combines a real and an imaginary part of equal shape.
    pub fn from_parts(re: &ArbMat, im: &ArbMat) -> Result<Self, NtkError> {
        if re.nrows() != im.nrows() || re.ncols() != im.ncols() {
            return Err(NtkError::Matrix(
                ErrorInfo::new("part-shape", "real and imaginary parts differ in shape")
                    .with_context("re", format!("{}x{}", re.nrows(), re.ncols()))
                    .with_context("im", format!("{}x{}", im.nrows(), im.ncols())),
            ));
        }
        Ok(Self::from_fn(re.nrows(), re.ncols(), |i, j| {
            Acb::new(re[(i, j)], im[(i, j)])
        }))
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

    /// Real part.
    pub fn get_real(&self) -> ArbMat {
        ArbMat::from_fn(self.rows, self.cols, |i, j| self[(i, j)].real())
    }

    /// Imaginary part.
    pub fn get_imag(&self) -> ArbMat {
        ArbMat::from_fn(self.rows, self.cols, |i, j| self[(i, j)].imag())
    }

    /// Product with a column vector.
    pub fn mul_vec(&self, v: &[Acb], prec: u32) -> Result<Vec<Acb>, NtkError> {
        if self.cols != v.len() {
            return Err(NtkError::Matrix(
                ErrorInfo::new("vector-shape", "vector length differs from column count")
                    .with_context("cols", self.cols)
                    .with_context("len", v.len()),
            ));
        }
        Ok((0..self.rows)
            .map(|i| {
                (0..self.cols).fold(Acb::zero(), |acc, j| {
                    acc.add(&self[(i, j)].mul(&v[j], prec), prec)
                })
            })
            .collect())
    }
}

impl Index<(usize, usize)> for AcbMat {
    type Output = Acb;

    fn index(&self, (i, j): (usize, usize)) -> &Acb {
        &self.entries[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for AcbMat {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Acb {
        &mut self.entries[i * self.cols + j]
    }
}
