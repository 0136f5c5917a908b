//! Certified lattice distances and their evaluation over all characteristics.

use ntk_ball::{acb_vec_imag, vec_add, vec_is_finite, Acb, AcbMat, Arb, ArbMat, MAX_PREC};
use ntk_core::errors::{ErrorInfo, NtkError};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::char::{char_count, char_get_arb};
use crate::eld::{eld_cho, lattice_points, partial_residual};
use crate::params::ThetaOpts;

/// Default cap on the number of lattice points examined by [`dist_lat`].
pub const DEFAULT_MAX_POINTS: usize = 1 << 16;

fn theta_error(code: &str, message: impl Into<String>) -> NtkError {
    NtkError::Theta(ErrorInfo::new(code, message))
}

/// Certified squared distance `||w + L^T n||^2` at the integer point `pt`.
pub fn dist_pt(w: &[Arb], cho: &ArbMat, pt: &[i64], prec: u32) -> Arb {
    (0..w.len()).fold(Arb::zero(), |acc, k| {
        let c = partial_residual(w, cho, pt, k, prec);
        let term = c.add(&cho[(k, k)].mul(&Arb::from_i64(pt[k]), prec), prec);
        acc.add(&term.sqr(prec), prec)
    })
}

/// Nearest-plane point and a certified upper bound on its squared distance.
///
/// Coordinates are chosen from the last one down, each rounding the
/// midpoint of `-c / L[k][k]`. Returns `None` when the data is not finite
/// or a rounded coordinate leaves the `i64` range.
pub fn dist_ubound(w: &[Arb], cho: &ArbMat, prec: u32) -> Option<(Vec<i64>, f64)> {
    let g = w.len();
    let limit = 2f64.powi(62);
    let mut pt = vec![0i64; g];
    for k in (0..g).rev() {
        let c = partial_residual(w, cho, &pt, k, prec).mid();
        let r = cho[(k, k)].mid();
        if !c.is_finite() || r.is_nan() || r <= 0.0 {
            return None;
        }
        let n = (-c / r).round();
        if !n.is_finite() || n.abs() > limit {
            return None;
        }
        pt[k] = n as i64;
    }
    let bound = dist_pt(w, cho, &pt, prec).upper();
    bound.is_finite().then_some((pt, bound))
}

/// Enclosure of `min_n ||w + L^T n||^2` over integer vectors `n`.
///
/// The result is indeterminate when the inputs are not finite, when the
/// factor is not certainly positive on its diagonal, or when too many
/// candidates would have to be examined.
pub fn dist_lat(w: &[Arb], cho: &ArbMat, prec: u32) -> Arb {
    dist_lat_capped(w, cho, prec, DEFAULT_MAX_POINTS)
}

/// [`dist_lat`] with an explicit cap on the number of candidate points.
pub fn dist_lat_capped(w: &[Arb], cho: &ArbMat, prec: u32, max_points: usize) -> Arb {
    let g = w.len();
    if g == 0 {
        return Arb::zero();
    }
    if cho.nrows() != g || cho.ncols() != g || !vec_is_finite(w) || !cho.is_finite() {
        warn!(g, "lattice distance inputs are not finite");
        return Arb::indeterminate();
    }
    let Some((_, bound)) = dist_ubound(w, cho, prec) else {
        warn!(g, prec, "no finite upper bound for the lattice distance");
        return Arb::indeterminate();
    };
    let Some(points) = lattice_points(w, cho, bound, max_points, prec) else {
        warn!(g, bound, max_points, "lattice enumeration failed");
        return Arb::indeterminate();
    };
    let best = points
        .iter()
        .map(|pt| dist_pt(w, cho, pt, prec))
        .reduce(|acc, d| acc.min(&d));
    match best {
        Some(best) => best.nonnegative_part(),
        None => {
            warn!(g, bound, "lattice enumeration produced no candidates");
            Arb::indeterminate()
        }
    }
}

/// Distances for all `2^g` characteristics at default options.
pub fn dist_a0(z: &[Acb], tau: &AcbMat, prec: u32) -> Result<Vec<Arb>, NtkError> {
    dist_a0_with(z, tau, &ThetaOpts::with_prec(prec))
}

/// Distances for all `2^g` characteristics.
///
/// Entry `a` encloses `min_n ||L^T (char(a) + v + n)||^2` with `L` the
/// Cholesky factor of `Im(tau)` and `v = Im(tau)^{-1} Im(z)`.
///
/// The computation always runs at full double precision. `opts.prec` only
/// fixes the grid the returned enclosures are widened to, so a lower
/// precision always yields enclosures containing those of a higher one.
pub fn dist_a0_with(z: &[Acb], tau: &AcbMat, opts: &ThetaOpts) -> Result<Vec<Arb>, NtkError> {
    let opts = opts.sanitised();
    let prec = MAX_PREC;
    if !tau.is_square() {
        return Err(NtkError::Theta(
            ErrorInfo::new("non-square-tau", "period matrix must be square")
                .with_context("rows", tau.nrows())
                .with_context("cols", tau.ncols()),
        ));
    }
    let g = tau.nrows();
    if z.len() != g {
        return Err(NtkError::Theta(
            ErrorInfo::new("dimension-mismatch", "z length differs from the dimension of tau")
                .with_context("g", g)
                .with_context("len", z.len()),
        ));
    }
    if g > opts.max_dim {
        return Err(NtkError::Theta(
            ErrorInfo::new("dimension-too-large", "dimension exceeds the configured maximum")
                .with_context("g", g)
                .with_context("max_dim", opts.max_dim),
        ));
    }
    let count = char_count(g)?;
    if g == 0 {
        return Ok(vec![Arb::zero()]);
    }

    let y = tau.get_imag();
    let yinv = y.try_inv(prec).unwrap_or_else(|| {
        warn!(g, prec, "imaginary part of tau is not certifiably invertible");
        ArbMat::indeterminate(g, g)
    });
    let cho = eld_cho(tau, prec);
    let cho_t = cho.transpose();
    let v = yinv.mul_vec(&acb_vec_imag(z), prec)?;
    debug!(
        g,
        prec = opts.prec,
        count,
        concurrency = opts.concurrency,
        "evaluating characteristic distances"
    );

    let eval = |a: u64| -> Result<Arb, NtkError> {
        let shifted = vec_add(&char_get_arb(a, g), &v, prec);
        let w = cho_t.mul_vec(&shifted, prec)?;
        Ok(dist_lat_capped(&w, &cho, prec, opts.max_points).widen_to_prec(opts.prec))
    };

    if opts.concurrency > 1 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(opts.concurrency)
            .build()
            .map_err(|err| theta_error("thread-pool", err.to_string()))?;
        pool.install(|| (0..count).into_par_iter().map(eval).collect())
    } else {
        (0..count).map(eval).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_dimension_is_zero() {
        assert_eq!(dist_lat(&[], &ArbMat::new(0, 0), 53), Arb::zero());
    }

    #[test]
    fn one_dimensional_distance_to_integers() {
        let cho = ArbMat::identity(1);
        let d = dist_lat(&[Arb::from_f64(2.25)], &cho, 53);
        assert!(d.contains_f64(0.0625));
        assert!(d.rad() < 1e-12);
    }

    #[test]
    fn nearest_plane_rounds_from_last_coordinate() {
        let cho = ArbMat::from_rows(&[vec![2.0, 0.0], vec![0.0, 1.0]]).unwrap();
        let w = vec![Arb::from_f64(3.0), Arb::from_f64(-0.75)];
        let (pt, bound) = dist_ubound(&w, &cho, 53).unwrap();
        assert_eq!(pt, vec![-2, 1]);
        assert_eq!(bound, 1.0625);
    }

    #[test]
    fn indeterminate_factor_gives_indeterminate_distance() {
        let cho = ArbMat::indeterminate(2, 2);
        let d = dist_lat(&[Arb::zero(), Arb::zero()], &cho, 53);
        assert!(!d.is_finite());
    }

    #[test]
    fn tiny_point_cap_gives_indeterminate_distance() {
        let cho = ArbMat::identity(2);
        let w = vec![Arb::from_f64(0.5), Arb::from_f64(0.5)];
        assert!(!dist_lat_capped(&w, &cho, 53, 1).is_finite());
        assert!(dist_lat_capped(&w, &cho, 53, 16).contains_f64(0.5));
    }
}
