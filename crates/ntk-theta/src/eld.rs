//! Cholesky factor of `Im(tau)` and enumeration of lattice points in an ellipsoid.
//!
//! With `L` the lower Cholesky factor of `Im(tau)`, the lattice is spanned
//! by the columns of the upper-triangular `L^T`. Coordinate `k` of
//! `w + L^T n` only involves `n_k, ..., n_{g-1}`, so points are enumerated
//! from the last coordinate down to the first.

use ntk_ball::mag::{add_up, div_down, div_up, sqrt_up, sub_down, sub_up};
use ntk_ball::{AcbMat, Arb, ArbMat};
use tracing::{trace, warn};

/// Lower-triangular Cholesky factor of `Im(tau)`.
///
/// When the imaginary part cannot be certified positive definite at this
/// precision the factor is the indeterminate matrix.
pub fn eld_cho(tau: &AcbMat, prec: u32) -> ArbMat {
    let g = tau.nrows();
    match tau.get_imag().cho(prec) {
        Some(cho) => cho,
        None => {
            warn!(g, prec, "imaginary part of tau is not certifiably positive definite");
            ArbMat::indeterminate(g, g)
        }
    }
}

/// Partial residual `w_k + sum_{j > k} L[j][k] n_j` of coordinate `k`.
pub(crate) fn partial_residual(
    w: &[Arb],
    cho: &ArbMat,
    pt: &[i64],
    k: usize,
    prec: u32,
) -> Arb {
    ((k + 1)..w.len()).fold(w[k], |acc, j| {
        acc.add(&cho[(j, k)].mul(&Arb::from_i64(pt[j]), prec), prec)
    })
}

/// Every integer `n` with `||w + L^T n||^2 <= radius2`.
///
/// Interval bounds are rounded outward so no qualifying point is lost; a few
/// points slightly outside the ellipsoid may be returned as well. Returns
/// `None` when the factor has a diagonal entry that is not certainly
/// positive, when the data is not finite, or when more than `max_points`
/// points would be produced.
pub fn lattice_points(
    w: &[Arb],
    cho: &ArbMat,
    radius2: f64,
    max_points: usize,
    prec: u32,
) -> Option<Vec<Vec<i64>>> {
    let g = w.len();
    if cho.nrows() != g || cho.ncols() != g || radius2.is_nan() || radius2 < 0.0 {
        return None;
    }
    if g == 0 {
        return Some(vec![Vec::new()]);
    }
    let mut walker = Walker {
        w,
        cho,
        prec,
        max_points,
        current: vec![0; g],
        points: Vec::new(),
    };
    if walker.descend(g - 1, radius2) {
        trace!(g, radius2, points = walker.points.len(), "ellipsoid enumerated");
        Some(walker.points)
    } else {
        None
    }
}

struct Walker<'a> {
    w: &'a [Arb],
    cho: &'a ArbMat,
    prec: u32,
    max_points: usize,
    current: Vec<i64>,
    points: Vec<Vec<i64>>,
}

impl Walker<'_> {
    /// Enumerates coordinate `k` under the remaining squared budget.
    fn descend(&mut self, k: usize, budget: f64) -> bool {
        let prec = self.prec;
        let c = partial_residual(self.w, self.cho, &self.current, k, prec);
        let r = self.cho[(k, k)];
        if !c.is_finite() || !r.is_positive() || !budget.is_finite() {
            return false;
        }
        let Some((lo, hi)) = coordinate_range(&c, &r, budget) else {
            return false;
        };
        if i128::from(hi) - i128::from(lo) > self.max_points as i128 {
            return false;
        }

        for n in lo..=hi {
            let term = c.add(&r.mul(&Arb::from_i64(n), prec), prec).sqr(prec);
            let floor = term.lower().max(0.0);
            if floor > budget {
                continue;
            }
            let remaining = sub_up(budget, floor).max(0.0);
            self.current[k] = n;
            if k == 0 {
                self.points.push(self.current.clone());
                if self.points.len() > self.max_points {
                    return false;
                }
            } else if !self.descend(k - 1, remaining) {
                return false;
            }
        }
        self.current[k] = 0;
        true
    }
}

/// Integer range of `n` with `|c + r n| <= sqrt(budget)` for some `c`, `r` in the balls.
fn coordinate_range(c: &Arb, r: &Arb, budget: f64) -> Option<(i64, i64)> {
    let s = sqrt_up(budget);
    let (r_lo, r_hi) = (r.lower(), r.upper());
    let lo_num = sub_down(-c.upper(), s);
    let hi_num = add_up(-c.lower(), s);

    // n >= lo_num / r and n <= hi_num / r, extremal over r in [r_lo, r_hi].
    let lo_t = if lo_num >= 0.0 {
        div_down(lo_num, r_hi)
    } else {
        -div_up(-lo_num, r_lo)
    };
    let hi_t = if hi_num >= 0.0 {
        div_up(hi_num, r_lo)
    } else {
        -div_down(-hi_num, r_hi)
    };
    let limit = 2f64.powi(62);
    if !lo_t.is_finite() || !hi_t.is_finite() || lo_t.abs() > limit || hi_t.abs() > limit {
        return None;
    }
    Some((lo_t.ceil() as i64, hi_t.floor() as i64))
}
