//! Certified real balls.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mag::{
    add_down, add_up, div_up, effective_prec, mul_down, mul_up, round_to_prec, sqrt_down,
    sub_down, sub_up, two_prod, two_sum, MAX_PREC,
};

/// Wire form of a ball; an infinite radius is written as `null`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ArbRepr {
    mid: f64,
    rad: Option<f64>,
}

impl From<Arb> for ArbRepr {
    fn from(value: Arb) -> Self {
        Self {
            mid: value.mid,
            rad: value.rad.is_finite().then_some(value.rad),
        }
    }
}

impl From<ArbRepr> for Arb {
    fn from(repr: ArbRepr) -> Self {
        match repr.rad {
            Some(rad) => Arb::new(repr.mid, rad),
            None => Arb::indeterminate(),
        }
    }
}

/// A real number known to lie in `[mid - rad, mid + rad]`.
///
/// Every operation takes the working precision in bits. The midpoint of the
/// result is rounded to that many significant bits and the radius grows by
/// the exact rounding error, so a result always encloses every value the
/// operation can produce from points of its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "ArbRepr", into = "ArbRepr")]
pub struct Arb {
    mid: f64,
    rad: f64,
}

impl Default for Arb {
    fn default() -> Self {
        Self::zero()
    }
}

impl Arb {
    /// The exact value zero.
    pub const fn zero() -> Self {
        Self { mid: 0.0, rad: 0.0 }
    }

    /// The exact value one.
    pub const fn one() -> Self {
        Self { mid: 1.0, rad: 0.0 }
    }

    /// The ball `[0 +/- inf]`, used whenever no finite enclosure is known.
    pub const fn indeterminate() -> Self {
        Self {
            mid: 0.0,
            rad: f64::INFINITY,
        }
    }

    /// Creates a ball from a midpoint and radius.
    ///
    /// Negative radii are replaced by their magnitude; non-finite midpoints
    /// and NaN radii give the indeterminate ball.
    pub fn new(mid: f64, rad: f64) -> Self {
        if !mid.is_finite() || rad.is_nan() || rad.is_infinite() {
            return Self::indeterminate();
        }
        Self {
            mid,
            rad: rad.abs(),
        }
    }

    /// The exact ball around a finite float.
    pub fn from_f64(x: f64) -> Self {
        Self::new(x, 0.0)
    }

    /// The smallest ball this type can form around an integer.
    pub fn from_i64(x: i64) -> Self {
        let mid = x as f64;
        let back = mid as i128;
        let err = (x as i128 - back).unsigned_abs() as f64;
        Self::new(mid, err)
    }

    /// A ball enclosing the closed interval `[lo, hi]`.
    pub fn from_interval(lo: f64, hi: f64) -> Self {
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Self::indeterminate();
        }
        let mid = lo * 0.5 + hi * 0.5;
        let rad = sub_up(hi, mid).max(sub_up(mid, lo)).max(0.0);
        Self::new(mid, rad)
    }

    /// Midpoint of the ball.
    pub fn mid(&self) -> f64 {
        self.mid
    }

    /// Radius of the ball.
    pub fn rad(&self) -> f64 {
        self.rad
    }

    /// Rigorous lower bound of the enclosed values.
    pub fn lower(&self) -> f64 {
        if self.rad == 0.0 {
            self.mid
        } else {
            sub_down(self.mid, self.rad)
        }
    }

    /// Rigorous upper bound of the enclosed values.
    pub fn upper(&self) -> f64 {
        if self.rad == 0.0 {
            self.mid
        } else {
            add_up(self.mid, self.rad)
        }
    }

    /// True when the radius is finite.
    pub fn is_finite(&self) -> bool {
        self.mid.is_finite() && self.rad.is_finite()
    }

    /// True when the ball is a single point.
    pub fn is_exact(&self) -> bool {
        self.rad == 0.0
    }

    /// True when the ball is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.mid == 0.0 && self.rad == 0.0
    }

    /// True when every enclosed value is strictly positive.
    pub fn is_positive(&self) -> bool {
        self.is_finite() && self.lower() > 0.0
    }

    /// True when every enclosed value is non-negative.
    pub fn is_nonnegative(&self) -> bool {
        self.is_finite() && self.lower() >= 0.0
    }

    /// True when every enclosed value is strictly negative.
    pub fn is_negative(&self) -> bool {
        self.is_finite() && self.upper() < 0.0
    }

    /// True when zero is among the enclosed values.
    pub fn contains_zero(&self) -> bool {
        self.contains_f64(0.0)
    }

    /// True when `x` lies in the ball.
    pub fn contains_f64(&self, x: f64) -> bool {
        if !self.is_finite() {
            return !x.is_nan();
        }
        self.lower() <= x && x <= self.upper()
    }

    /// True when `other` is a subset of `self`.
    pub fn contains(&self, other: &Arb) -> bool {
        if !self.is_finite() {
            return true;
        }
        if !other.is_finite() {
            return false;
        }
        self.lower() <= other.lower() && other.upper() <= self.upper()
    }

    /// True when the two balls share at least one value.
    pub fn overlaps(&self, other: &Arb) -> bool {
        if !self.is_finite() || !other.is_finite() {
            return true;
        }
        self.lower() <= other.upper() && other.lower() <= self.upper()
    }

    /// Rounds the midpoint to `prec` bits.
    pub fn round(&self, prec: u32) -> Arb {
        finish(self.mid, 0.0, self.rad, prec)
    }

    /// Smallest ball with endpoints on the `prec`-bit grid that contains `self`.
    ///
    /// The grid spacing is fixed by the magnitude of the ball and halves with
    /// every extra bit, so for `lo <= hi` the result at `lo` contains the
    /// result at `hi`. Both endpoints of the result are exact, so `lower()`
    /// and `upper()` return them unchanged. From 52 bits upward, and for
    /// balls too close to the subnormal or overflow range, the ball is
    /// returned as is.
    pub fn widen_to_prec(&self, prec: u32) -> Arb {
        let prec = effective_prec(prec);
        if !self.is_finite() || prec + 1 >= MAX_PREC {
            return *self;
        }
        let (lo, hi) = (self.lower(), self.upper());
        let top = lo.abs().max(hi.abs());
        let biased = ((top.to_bits() >> 52) & 0x7ff) as i32;
        if top == 0.0 || biased == 0 || biased >= 0x7fe {
            return *self;
        }
        let quantum_exp = biased - 1023 - prec as i32 + 1;
        if quantum_exp < -1021 {
            return *self;
        }
        let quantum = f64::from_bits(((quantum_exp + 1023) as u64) << 52);
        let a = (lo / quantum).floor() * quantum;
        let b = (hi / quantum).ceil() * quantum;
        Arb::new((a + b) * 0.5, (b - a) * 0.5)
    }

    /// Negation (exact).
    pub fn neg(&self) -> Arb {
        Arb {
            mid: -self.mid,
            rad: self.rad,
        }
    }

    /// Absolute value.
    pub fn abs(&self) -> Arb {
        if !self.is_finite() {
            return Self::indeterminate();
        }
        if self.contains_zero() {
            let hi = self.lower().abs().max(self.upper().abs());
            return Self::from_interval(0.0, hi);
        }
        Arb {
            mid: self.mid.abs(),
            rad: self.rad,
        }
    }

    /// Sum of two balls.
    pub fn add(&self, other: &Arb, prec: u32) -> Arb {
        let (s, e) = two_sum(self.mid, other.mid);
        finish(s, e, add_up(self.rad, other.rad), prec)
    }

    /// Difference of two balls.
    pub fn sub(&self, other: &Arb, prec: u32) -> Arb {
        self.add(&other.neg(), prec)
    }

    /// Product of two balls.
    pub fn mul(&self, other: &Arb, prec: u32) -> Arb {
        if !self.is_finite() || !other.is_finite() {
            return Self::indeterminate();
        }
        let (p, e) = two_prod(self.mid, other.mid);
        let rad = add_up(
            add_up(
                mul_up(self.mid.abs(), other.rad),
                mul_up(other.mid.abs(), self.rad),
            ),
            mul_up(self.rad, other.rad),
        );
        finish(p, e, rad, prec)
    }

    /// Square of a ball; tighter than `mul` when the ball straddles zero.
    pub fn sqr(&self, prec: u32) -> Arb {
        if self.is_finite() && !self.is_exact() && self.contains_zero() {
            let m = self.lower().abs().max(self.upper().abs());
            return Self::from_interval(0.0, mul_up(m, m));
        }
        self.mul(self, prec)
    }

    /// Quotient of two balls; indeterminate when the divisor contains zero.
    pub fn div(&self, other: &Arb, prec: u32) -> Arb {
        if !self.is_finite() || !other.is_finite() || other.contains_zero() {
            return Self::indeterminate();
        }
        let q = self.mid / other.mid;
        let r = (-q).mul_add(other.mid, self.mid);
        let err = div_up(r.abs(), other.mid.abs());
        let rad = if self.rad == 0.0 && other.rad == 0.0 {
            0.0
        } else {
            let b = other.mid.abs();
            let num = add_up(mul_up(self.mid.abs(), other.rad), mul_up(b, self.rad));
            let den = mul_down(b, sub_down(b, other.rad));
            div_up(num, den)
        };
        finish(q, err, rad, prec)
    }

    /// Reciprocal of a ball.
    pub fn inv(&self, prec: u32) -> Arb {
        Arb::one().div(self, prec)
    }

    /// Square root; indeterminate unless the ball is zero or certainly positive.
    pub fn sqrt(&self, prec: u32) -> Arb {
        if self.is_zero() {
            return Self::zero();
        }
        if !self.is_positive() {
            return Self::indeterminate();
        }
        let s = self.mid.sqrt();
        let r = (-s).mul_add(s, self.mid);
        let err = div_up(r.abs(), s);
        let rad = if self.rad == 0.0 {
            0.0
        } else {
            let den = add_down(sqrt_down(self.lower()), sqrt_down(self.mid));
            div_up(self.rad, den)
        };
        finish(s, err, rad, prec)
    }

    /// Multiplies by `2^exp`.
    pub fn mul_2exp(&self, exp: i32) -> Arb {
        if !self.is_finite() {
            return Self::indeterminate();
        }
        let exp = exp.clamp(-1074, 1023);
        let scale = 2f64.powi(exp);
        let (p, e) = two_prod(self.mid, scale);
        finish(p, e, mul_up(self.rad, scale), MAX_PREC)
    }

    /// Ball enclosing `min(x, y)` for `x` in `self`, `y` in `other`.
    pub fn min(&self, other: &Arb) -> Arb {
        if !self.is_finite() || !other.is_finite() {
            return Self::indeterminate();
        }
        Self::from_interval(
            self.lower().min(other.lower()),
            self.upper().min(other.upper()),
        )
    }

    /// Ball enclosing `max(x, y)` for `x` in `self`, `y` in `other`.
    pub fn max(&self, other: &Arb) -> Arb {
        if !self.is_finite() || !other.is_finite() {
            return Self::indeterminate();
        }
        Self::from_interval(
            self.lower().max(other.lower()),
            self.upper().max(other.upper()),
        )
    }

    /// Ball enclosing `max(x, 0)` for `x` in `self`.
    pub fn nonnegative_part(&self) -> Arb {
        if !self.is_finite() {
            return *self;
        }
        if self.is_nonnegative() {
            return *self;
        }
        Self::from_interval(self.lower().max(0.0), self.upper().max(0.0))
    }
}

/// Rounds a freshly computed midpoint and folds every error term into the radius.
fn finish(mid: f64, err: f64, rad: f64, prec: u32) -> Arb {
    if !mid.is_finite() || rad.is_nan() || err.is_nan() {
        return Arb::indeterminate();
    }
    let (rounded, round_err) = round_to_prec(mid, prec);
    let rad = add_up(add_up(rad, err.abs()), round_err);
    Arb::new(rounded, rad)
}

impl fmt::Display for Arb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_finite() {
            return write!(f, "[+/- inf]");
        }
        if self.rad == 0.0 {
            write!(f, "{}", self.mid)
        } else {
            write!(f, "[{} +/- {:.3e}]", self.mid, self.rad)
        }
    }
}
