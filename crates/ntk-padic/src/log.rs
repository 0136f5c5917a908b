//! The p-adic logarithm `log(x) = -sum_{i >= 1} (1 - x)^i / i`.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};
use ntk_core::errors::{ErrorInfo, NtkError};
use tracing::trace;

use crate::ctx::{mod_inverse, PadicCtx};
use crate::padic::Padic;

/// Precisions at or above this bound are rejected by [`log_bound`].
pub const LOG_BOUND_LIMIT: i64 = 1 << 62;

/// `floor(log_p x)` for `x >= 1`.
fn flog(x: i64, p: i64) -> i64 {
    let (x, p) = (i128::from(x), i128::from(p));
    let mut e = 0;
    let mut pe = p;
    while pe <= x {
        pe *= p;
        e += 1;
    }
    e
}

/// `ceil(log_p x)` for `x >= 1`.
fn clog(x: i64, p: i64) -> i64 {
    let (x, p) = (i128::from(x), i128::from(p));
    let mut e = 0;
    let mut pe = 1;
    while pe < x {
        pe *= p;
        e += 1;
    }
    e
}

/// Number of leading series terms to sum at valuation `v` and precision `n`.
///
/// Every term `y^i / i` with `i` at or past the bound has valuation at least
/// `n`. Requires `1 <= v < n`.
pub fn log_bound(v: i64, n: i64, p: &BigInt) -> Result<i64, NtkError> {
    if n >= LOG_BOUND_LIMIT {
        return Err(NtkError::Padic(
            ErrorInfo::new("precision-too-large", "precision exceeds the series bound guard")
                .with_context("n", n)
                .with_context("limit", LOG_BOUND_LIMIT),
        ));
    }
    let Ok(p) = i64::try_from(p) else {
        return Ok((n + v - 1) / v);
    };
    let c = n - flog(v, p);
    let mut b = ((c + clog(c, p) + 1) + (v - 1)) / v;
    loop {
        b -= 1;
        if b < 2 {
            return Ok(2);
        }
        if b * v - clog(b, p) < n {
            return Ok(b + 1);
        }
    }
}

/// Largest `ord_p(i)` over `1 <= i < terms`.
fn max_index_valuation(ctx: &PadicCtx, terms: i64) -> i64 {
    (1..terms)
        .map(|i| ctx.remove(&BigInt::from(i)).0)
        .max()
        .unwrap_or(0)
}

/// `-sum_{i < terms} y^i / i mod p^n`, one term at a time.
pub fn log_series_straight(y: &BigInt, terms: i64, ctx: &PadicCtx) -> BigInt {
    let n = ctx.precision();
    let k = max_index_valuation(ctx, terms);
    let wide = ctx.pow(n + k);
    let modulus = ctx.pow(n);

    let mut ypow = BigInt::one();
    let mut acc = BigInt::zero();
    for i in 1..terms {
        ypow = (&ypow * y).mod_floor(&wide);
        let (e, u) = ctx.remove(&BigInt::from(i));
        let Some(u_inv) = mod_inverse(&u, &modulus) else {
            continue;
        };
        let scaled = (&ypow / ctx.pow(e)).mod_floor(&modulus);
        acc += scaled * u_inv;
    }
    (-acc).mod_floor(&modulus)
}

/// Same value as [`log_series_straight`], accumulated two terms per step
/// over the common denominator `lcm(1, ..., terms - 1)`.
pub fn log_series_paired(y: &BigInt, terms: i64, ctx: &PadicCtx) -> BigInt {
    let n = ctx.precision();
    let m = terms - 1;
    let modulus = ctx.pow(n);
    if m < 1 {
        return BigInt::zero();
    }
    let lcm = (2..=m).fold(BigInt::one(), |acc, i| acc.lcm(&BigInt::from(i)));
    let (k, lcm_unit) = ctx.remove(&lcm);
    let wide = ctx.pow(n + k);
    let coeff = |i: i64| -> BigInt {
        if i > m {
            BigInt::zero()
        } else {
            (&lcm / BigInt::from(i)).mod_floor(&wide)
        }
    };

    let y2 = (y * y).mod_floor(&wide);
    let mut acc = BigInt::zero();
    for j in (1..=(m + 1) / 2).rev() {
        let pair = coeff(2 * j - 1) + coeff(2 * j) * y;
        acc = (acc * &y2 + pair).mod_floor(&wide);
    }
    let total = (acc * y).mod_floor(&wide);
    let reduced = (total / ctx.pow(k)).mod_floor(&modulus);
    let inv = mod_inverse(&lcm_unit, &modulus).unwrap_or_else(BigInt::zero);
    (-(reduced * inv)).mod_floor(&modulus)
}

/// Whether the straight summation is used at this precision.
pub fn uses_straight_summation(ctx: &PadicCtx) -> bool {
    let bits = ctx.prime().bits().max(1) as i64;
    ctx.precision() < 512 / bits
}

impl Padic {
    /// The p-adic logarithm.
    ///
    /// `None` when the series does not converge: negative valuation, or
    /// `ord_p(1 - x)` below 1 (below 2 for `p = 2`).
    pub fn log(&self, ctx: &PadicCtx) -> Option<Padic> {
        if self.val() < 0 {
            return None;
        }
        let x = self.to_int(ctx).ok()?;
        let modulus = ctx.pow(ctx.precision());
        let y = (BigInt::one() - x).mod_floor(&modulus);
        if y.is_zero() {
            return Some(Padic::zero());
        }
        let (v, _) = ctx.remove(&y);
        let converges = if ctx.is_two() { v >= 2 } else { v >= 1 };
        if !converges {
            return None;
        }
        if v >= ctx.precision() {
            return Some(Padic::zero());
        }
        // Context precision is far below the guard, so the bound exists.
        let terms = log_bound(v, ctx.precision(), ctx.prime()).ok()?;
        let straight = uses_straight_summation(ctx);
        trace!(v, terms, straight, "summing logarithm series");
        let z = if straight {
            log_series_straight(&y, terms, ctx)
        } else {
            log_series_paired(&y, terms, ctx)
        };
        Some(Padic::canonical(z, 0, ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logarithm_helpers() {
        assert_eq!(flog(1, 3), 0);
        assert_eq!(flog(9, 3), 2);
        assert_eq!(flog(26, 3), 2);
        assert_eq!(clog(1, 3), 0);
        assert_eq!(clog(9, 3), 2);
        assert_eq!(clog(10, 3), 3);
    }

    #[test]
    fn bound_covers_every_omitted_term() {
        for (p, v, n) in [(2i64, 2i64, 20i64), (3, 1, 30), (5, 2, 17), (7, 1, 100)] {
            let b = log_bound(v, n, &BigInt::from(p)).unwrap();
            assert!(b >= 2);
            for i in b..b + 200 {
                let mut t = i;
                let mut ord = 0;
                while t % p == 0 {
                    t /= p;
                    ord += 1;
                }
                assert!(i * v - ord >= n, "p={p} v={v} n={n} i={i}");
            }
        }
    }

    #[test]
    fn bound_guard_rejects_huge_precision() {
        let err = log_bound(1, LOG_BOUND_LIMIT, &BigInt::from(3)).unwrap_err();
        assert_eq!(err.code(), "precision-too-large");
    }

    #[test]
    fn strategies_agree() {
        for (p, n) in [(2u32, 40i64), (3, 25), (7, 12), (101, 9)] {
            let ctx = PadicCtx::new(p, n).unwrap();
            let pp = BigInt::from(p);
            let v = if p == 2 { 2 } else { 1 };
            for seed in 1..6u32 {
                let y = pp.pow(v) * BigInt::from(seed * 13 + 1);
                let terms = log_bound(i64::from(v), n, &pp).unwrap();
                assert_eq!(
                    log_series_straight(&y, terms, &ctx),
                    log_series_paired(&y, terms, &ctx),
                    "p={p} n={n} seed={seed}"
                );
            }
        }
    }
}
