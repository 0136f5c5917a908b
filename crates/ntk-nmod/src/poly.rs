//! Dense polynomials over `Z/nZ`.

use std::ops::{Add, Mul, Neg, Sub};

use ntk_core::errors::{ErrorInfo, NtkError};
use ntk_core::RngHandle;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ctx::NmodCtx;

/// Operand length below which Karatsuba falls back to the schoolbook product.
pub const KARATSUBA_CUTOFF: usize = 8;

pub(crate) fn nmod_error(code: &str, message: impl Into<String>) -> NtkError {
    NtkError::Nmod(ErrorInfo::new(code, message))
}

/// Polynomial with coefficients reduced modulo a word-size modulus.
///
/// Coefficients are stored lowest degree first with no trailing zeros, so
/// structural equality is polynomial equality. Binary operations require
/// both operands to share a modulus. Those returning `Result` report a
/// mismatch as `modulus-mismatch`; the ring operations and operators panic
/// on it, the way slice arithmetic panics on a length mismatch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NmodPoly {
    ctx: NmodCtx,
    coeffs: Vec<u64>,
}

impl NmodPoly {
    /// Zero polynomial modulo `modulus`.
    pub fn new(modulus: u64) -> Result<Self, NtkError> {
        Ok(Self::zero(NmodCtx::new(modulus)?))
    }

    /// Zero polynomial in the given context.
    pub fn zero(ctx: NmodCtx) -> Self {
        Self {
            ctx,
            coeffs: Vec::new(),
        }
    }

    /// The constant one (zero when the modulus is one).
    pub fn one(ctx: NmodCtx) -> Self {
        Self::from_coeffs(ctx, &[1])
    }

    /// Polynomial with the given coefficients, lowest degree first, reduced.
    pub fn from_coeffs(ctx: NmodCtx, coeffs: &[u64]) -> Self {
        Self::from_raw(ctx, coeffs.iter().map(|&c| ctx.red(c)).collect())
    }

    fn from_raw(ctx: NmodCtx, coeffs: Vec<u64>) -> Self {
        let mut poly = Self { ctx, coeffs };
        poly.normalise();
        poly
    }

    fn normalise(&mut self) {
        while self.coeffs.last() == Some(&0) {
            self.coeffs.pop();
        }
    }

    fn same_modulus(&self, other: &NmodPoly) -> Result<(), NtkError> {
        if self.ctx == other.ctx {
            return Ok(());
        }
        Err(NtkError::Nmod(
            ErrorInfo::new("modulus-mismatch", "polynomial operands have different moduli")
                .with_context("left", self.modulus())
                .with_context("right", other.modulus()),
        ))
    }

    fn check_same(&self, other: &NmodPoly) {
        if let Err(err) = self.same_modulus(other) {
            panic!("{err}");
        }
    }

    /// Modulus context.
    pub fn ctx(&self) -> NmodCtx {
        self.ctx
    }

    /// The modulus.
    pub fn modulus(&self) -> u64 {
        self.ctx.modulus()
    }

    /// Number of coefficients up to the leading one.
    pub fn length(&self) -> usize {
        self.coeffs.len()
    }

    /// Degree, with `-1` for the zero polynomial.
    pub fn degree(&self) -> i64 {
        self.coeffs.len() as i64 - 1
    }

    /// Coefficients, lowest degree first.
    pub fn coeffs(&self) -> &[u64] {
        &self.coeffs
    }

    /// True for the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// True for the constant one.
    pub fn is_one(&self) -> bool {
        self.coeffs == [1]
    }

    /// Coefficient of `x^i`; zero past the leading term.
    pub fn get_coeff(&self, i: usize) -> u64 {
        self.coeffs.get(i).copied().unwrap_or(0)
    }

    /// Sets the coefficient of `x^i` to `c mod n`.
    pub fn set_coeff(&mut self, i: usize, c: u64) {
        let c = self.ctx.red(c);
        if i >= self.coeffs.len() {
            if c == 0 {
                return;
            }
            self.coeffs.resize(i + 1, 0);
        }
        self.coeffs[i] = c;
        self.normalise();
    }

    /// Keeps only the coefficients of `x^0, ..., x^{n-1}`.
    pub fn truncate(&mut self, n: usize) {
        self.coeffs.truncate(n);
        self.normalise();
    }

    /// Resets to the zero polynomial.
    pub fn clear(&mut self) {
        self.coeffs.clear();
    }

    /// Multiplies by `x^n`.
    pub fn shift_left(&self, n: usize) -> NmodPoly {
        if self.is_zero() {
            return self.clone();
        }
        let mut coeffs = vec![0; n];
        coeffs.extend_from_slice(&self.coeffs);
        Self { ctx: self.ctx, coeffs }
    }

    /// Divides by `x^n`, dropping the low coefficients.
    pub fn shift_right(&self, n: usize) -> NmodPoly {
        let coeffs = self.coeffs.get(n..).map(<[u64]>::to_vec).unwrap_or_default();
        Self { ctx: self.ctx, coeffs }
    }

    /// Additive inverse.
    pub fn neg(&self) -> NmodPoly {
        let coeffs = self.coeffs.iter().map(|&c| self.ctx.neg(c)).collect();
        Self { ctx: self.ctx, coeffs }
    }

    /// Sum.
    ///
    /// # Panics
    ///
    /// When the operands have different moduli; likewise for [`NmodPoly::sub`],
    /// the products and [`NmodPoly::compose`].
    pub fn add(&self, other: &NmodPoly) -> NmodPoly {
        self.check_same(other);
        let len = self.length().max(other.length());
        let coeffs = (0..len)
            .map(|i| self.ctx.add(self.get_coeff(i), other.get_coeff(i)))
            .collect();
        Self::from_raw(self.ctx, coeffs)
    }

    /// Difference.
    pub fn sub(&self, other: &NmodPoly) -> NmodPoly {
        self.check_same(other);
        let len = self.length().max(other.length());
        let coeffs = (0..len)
            .map(|i| self.ctx.sub(self.get_coeff(i), other.get_coeff(i)))
            .collect();
        Self::from_raw(self.ctx, coeffs)
    }

    /// Multiplies every coefficient by `c mod n`.
    pub fn scalar_mul(&self, c: u64) -> NmodPoly {
        let c = self.ctx.red(c);
        let coeffs = self.coeffs.iter().map(|&a| self.ctx.mul(a, c)).collect();
        Self::from_raw(self.ctx, coeffs)
    }

    /// Schoolbook product.
    pub fn mul(&self, other: &NmodPoly) -> NmodPoly {
        self.check_same(other);
        Self::from_raw(self.ctx, mul_classical(self.ctx, &self.coeffs, &other.coeffs))
    }

    /// Karatsuba product; equal to [`NmodPoly::mul`].
    pub fn mul_karatsuba(&self, other: &NmodPoly) -> NmodPoly {
        self.check_same(other);
        Self::from_raw(self.ctx, mul_karatsuba(self.ctx, &self.coeffs, &other.coeffs))
    }

    /// The product truncated to its first `n` coefficients.
    pub fn mullow(&self, other: &NmodPoly, n: usize) -> NmodPoly {
        self.check_same(other);
        if self.is_zero() || other.is_zero() || n == 0 {
            return Self::zero(self.ctx);
        }
        let len = n.min(self.length() + other.length() - 1);
        let mut out = vec![0; len];
        for (i, &a) in self.coeffs.iter().enumerate().take(len) {
            for (j, &b) in other.coeffs.iter().enumerate().take(len - i) {
                out[i + j] = self.ctx.add(out[i + j], self.ctx.mul(a, b));
            }
        }
        Self::from_raw(self.ctx, out)
    }

    /// The product with only the coefficients of `x^n` and above computed.
    ///
    /// Coefficients below `n` are zero.
    pub fn mulhigh(&self, other: &NmodPoly, n: usize) -> NmodPoly {
        self.check_same(other);
        if self.is_zero() || other.is_zero() {
            return Self::zero(self.ctx);
        }
        let len = self.length() + other.length() - 1;
        if n >= len {
            return Self::zero(self.ctx);
        }
        let mut out = vec![0; len];
        for (i, &a) in self.coeffs.iter().enumerate() {
            let start = n.saturating_sub(i);
            for (j, &b) in other.coeffs.iter().enumerate().skip(start) {
                out[i + j] = self.ctx.add(out[i + j], self.ctx.mul(a, b));
            }
        }
        Self::from_raw(self.ctx, out)
    }

    /// `self^e`.
    pub fn pow(&self, mut e: u64) -> NmodPoly {
        let mut base = self.clone();
        let mut acc = Self::one(self.ctx);
        while e > 0 {
            if e & 1 == 1 {
                acc = acc.mul(&base);
            }
            e >>= 1;
            if e > 0 {
                base = base.mul(&base);
            }
        }
        acc
    }

    /// Quotient and remainder of Euclidean division by `other`.
    ///
    /// Fails when the moduli differ, when `other` is zero or when its leading
    /// coefficient is not a unit.
    pub fn divrem(&self, other: &NmodPoly) -> Result<(NmodPoly, NmodPoly), NtkError> {
        self.same_modulus(other)?;
        let ctx = self.ctx;
        let lead = other
            .coeffs
            .last()
            .copied()
            .ok_or_else(|| nmod_error("division-by-zero", "divisor is the zero polynomial"))?;
        let lead_inv = ctx.inv(lead).ok_or_else(|| {
            NtkError::Nmod(
                ErrorInfo::new("non-unit-leading", "leading coefficient is not invertible")
                    .with_context("lead", lead)
                    .with_context("modulus", ctx.modulus()),
            )
        })?;
        if self.length() < other.length() {
            return Ok((Self::zero(ctx), self.clone()));
        }

        let db = other.length() - 1;
        let mut r = self.coeffs.clone();
        let mut q = vec![0; r.len() - db];
        for i in (0..q.len()).rev() {
            let c = ctx.mul(r[i + db], lead_inv);
            q[i] = c;
            if c == 0 {
                continue;
            }
            for (j, &b) in other.coeffs.iter().enumerate() {
                r[i + j] = ctx.sub(r[i + j], ctx.mul(c, b));
            }
        }
        r.truncate(db);
        Ok((Self::from_raw(ctx, q), Self::from_raw(ctx, r)))
    }

    /// Quotient of [`NmodPoly::divrem`].
    pub fn div(&self, other: &NmodPoly) -> Result<NmodPoly, NtkError> {
        Ok(self.divrem(other)?.0)
    }

    /// Remainder of [`NmodPoly::divrem`].
    pub fn rem(&self, other: &NmodPoly) -> Result<NmodPoly, NtkError> {
        Ok(self.divrem(other)?.1)
    }

    /// `self * other mod f`.
    pub fn mulmod(&self, other: &NmodPoly, f: &NmodPoly) -> Result<NmodPoly, NtkError> {
        self.same_modulus(other)?;
        self.mul(other).rem(f)
    }

    /// `self^e mod f` by binary exponentiation.
    pub fn powmod(&self, mut e: u64, f: &NmodPoly) -> Result<NmodPoly, NtkError> {
        let mut base = self.rem(f)?;
        let mut acc = Self::one(self.ctx).rem(f)?;
        while e > 0 {
            if e & 1 == 1 {
                acc = acc.mulmod(&base, f)?;
            }
            e >>= 1;
            if e > 0 {
                base = base.mulmod(&base, f)?;
            }
        }
        Ok(acc)
    }

    /// Scales so the leading coefficient is one.
    pub fn make_monic(&self) -> Result<NmodPoly, NtkError> {
        let lead = self
            .coeffs
            .last()
            .copied()
            .ok_or_else(|| nmod_error("zero-polynomial", "zero polynomial has no leading term"))?;
        let inv = self.ctx.inv(lead).ok_or_else(|| {
            nmod_error("non-unit-leading", "leading coefficient is not invertible")
        })?;
        Ok(self.scalar_mul(inv))
    }

    /// Monic greatest common divisor; zero when both inputs are zero.
    ///
    /// Meant for prime moduli; a composite modulus can fail with
    /// `non-unit-leading`.
    pub fn gcd(&self, other: &NmodPoly) -> Result<NmodPoly, NtkError> {
        self.same_modulus(other)?;
        let (mut a, mut b) = (self.clone(), other.clone());
        while !b.is_zero() {
            let r = a.rem(&b)?;
            a = b;
            b = r;
        }
        if a.is_zero() {
            return Ok(a);
        }
        a.make_monic()
    }

    /// Formal derivative.
    pub fn derivative(&self) -> NmodPoly {
        let ctx = self.ctx;
        let coeffs = self
            .coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &c)| ctx.mul(ctx.red(i as u64), c))
            .collect();
        Self::from_raw(ctx, coeffs)
    }

    /// Value at `x` by Horner's rule.
    pub fn evaluate(&self, x: u64) -> u64 {
        let ctx = self.ctx;
        let x = ctx.red(x);
        self.coeffs
            .iter()
            .rev()
            .fold(0, |acc, &c| ctx.add(ctx.mul(acc, x), c))
    }

    /// Values at each point of `xs`.
    pub fn evaluate_vec(&self, xs: &[u64]) -> Vec<u64> {
        xs.iter().map(|&x| self.evaluate(x)).collect()
    }

    /// `self(inner)`.
    pub fn compose(&self, inner: &NmodPoly) -> NmodPoly {
        self.check_same(inner);
        let ctx = self.ctx;
        self.coeffs.iter().rev().fold(Self::zero(ctx), |acc, &c| {
            acc.mul(inner).add(&Self::from_raw(ctx, vec![c]))
        })
    }

    /// Random polynomial of length at most `len`.
    pub fn randtest(ctx: NmodCtx, rng: &mut RngHandle, len: usize) -> NmodPoly {
        let n = ctx.modulus();
        let coeffs = (0..len).map(|_| rng.gen_range(0..n)).collect();
        Self::from_raw(ctx, coeffs)
    }
}

fn mul_classical(ctx: NmodCtx, a: &[u64], b: &[u64]) -> Vec<u64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        if x == 0 {
            continue;
        }
        for (j, &y) in b.iter().enumerate() {
            out[i + j] = ctx.add(out[i + j], ctx.mul(x, y));
        }
    }
    out
}

fn mul_karatsuba(ctx: NmodCtx, a: &[u64], b: &[u64]) -> Vec<u64> {
    if a.len() < KARATSUBA_CUTOFF || b.len() < KARATSUBA_CUTOFF {
        return mul_classical(ctx, a, b);
    }
    let mut out = vec![0; a.len() + b.len() - 1];
    let m = a.len().max(b.len()) / 2;

    if a.len() <= m || b.len() <= m {
        // Unbalanced: split only the longer operand.
        let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
        let lo = mul_karatsuba(ctx, &long[..m], short);
        let hi = mul_karatsuba(ctx, &long[m..], short);
        add_into(ctx, &mut out, &lo, 0);
        add_into(ctx, &mut out, &hi, m);
        return out;
    }

    let (a0, a1) = a.split_at(m);
    let (b0, b1) = b.split_at(m);
    let z0 = mul_karatsuba(ctx, a0, b0);
    let z2 = mul_karatsuba(ctx, a1, b1);
    let mut z1 = mul_karatsuba(ctx, &sum_slices(ctx, a0, a1), &sum_slices(ctx, b0, b1));
    sub_into(ctx, &mut z1, &z0);
    sub_into(ctx, &mut z1, &z2);

    add_into(ctx, &mut out, &z0, 0);
    add_into(ctx, &mut out, &z1, m);
    add_into(ctx, &mut out, &z2, 2 * m);
    out
}

fn sum_slices(ctx: NmodCtx, a: &[u64], b: &[u64]) -> Vec<u64> {
    let len = a.len().max(b.len());
    (0..len)
        .map(|i| {
            ctx.add(
                a.get(i).copied().unwrap_or(0),
                b.get(i).copied().unwrap_or(0),
            )
        })
        .collect()
}

fn add_into(ctx: NmodCtx, out: &mut [u64], src: &[u64], offset: usize) {
    for (i, &c) in src.iter().enumerate() {
        out[i + offset] = ctx.add(out[i + offset], c);
    }
}

fn sub_into(ctx: NmodCtx, out: &mut [u64], src: &[u64]) {
    for (o, &c) in out.iter_mut().zip(src) {
        *o = ctx.sub(*o, c);
    }
}

impl Add for &NmodPoly {
    type Output = NmodPoly;

    fn add(self, rhs: &NmodPoly) -> NmodPoly {
        NmodPoly::add(self, rhs)
    }
}

impl Sub for &NmodPoly {
    type Output = NmodPoly;

    fn sub(self, rhs: &NmodPoly) -> NmodPoly {
        NmodPoly::sub(self, rhs)
    }
}

impl Mul for &NmodPoly {
    type Output = NmodPoly;

    fn mul(self, rhs: &NmodPoly) -> NmodPoly {
        NmodPoly::mul(self, rhs)
    }
}

impl Neg for &NmodPoly {
    type Output = NmodPoly;

    fn neg(self) -> NmodPoly {
        NmodPoly::neg(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx31() -> NmodCtx {
        NmodCtx::new(31).unwrap()
    }

    #[test]
    fn new_polynomial_is_empty() {
        let p = NmodPoly::new(10).unwrap();
        assert_eq!(p.length(), 0);
        assert_eq!(p.degree(), -1);
        assert_eq!(p.modulus(), 10);
    }

    #[test]
    fn set_coeff_reduces_and_normalises() {
        let mut p = NmodPoly::zero(ctx31());
        let mut q = NmodPoly::zero(ctx31());
        p.set_coeff(5, 17 + 31);
        assert_eq!(p.degree(), 5);
        q.set_coeff(5, 17);
        assert_eq!(q.add(&NmodPoly::zero(ctx31())).get_coeff(5), 17);
        p.set_coeff(0, 1);
        assert_ne!(p, q);
        p.set_coeff(0, 0);
        assert_eq!(p, q);
        assert_eq!(p.length(), 6);

        p.clear();
        assert!(p.is_zero() && !p.is_one());
        p.set_coeff(0, 1);
        assert!(p.is_one());

        p.set_coeff(4, 0);
        assert_eq!(p.length(), 1);
        p.set_coeff(0, 31);
        assert!(p.is_zero());
    }

    #[test]
    fn truncation_and_shifts() {
        let mut g = NmodPoly::zero(ctx31());
        g.set_coeff(5, 15);
        g.truncate(3);
        assert!(g.is_zero());

        g.set_coeff(15, 1);
        assert!(g.shift_right(15).is_one());
        assert_eq!(g.shift_right(15).shift_left(15), g);
        assert!(g.shift_right(40).is_zero());
    }

    #[test]
    fn karatsuba_splits_unbalanced_operands() {
        let ctx = ctx31();
        let a = NmodPoly::from_coeffs(ctx, &(1..40).collect::<Vec<_>>());
        let b = NmodPoly::from_coeffs(ctx, &(3..12).collect::<Vec<_>>());
        assert_eq!(a.mul_karatsuba(&b), a.mul(&b));
        assert_eq!(b.mul_karatsuba(&a), a.mul(&b));
    }

    #[test]
    fn division_errors() {
        let ctx = NmodCtx::new(12).unwrap();
        let a = NmodPoly::from_coeffs(ctx, &[1, 2, 3]);
        let zero = NmodPoly::zero(ctx);
        assert_eq!(a.divrem(&zero).unwrap_err().code(), "division-by-zero");
        let b = NmodPoly::from_coeffs(ctx, &[1, 4]);
        assert_eq!(a.divrem(&b).unwrap_err().code(), "non-unit-leading");
        assert_eq!(zero.make_monic().unwrap_err().code(), "zero-polynomial");
    }

    #[test]
    fn fallible_operations_report_mismatched_moduli() {
        let a = NmodPoly::from_coeffs(ctx31(), &[1, 2, 3]);
        let b = NmodPoly::from_coeffs(NmodCtx::new(7).unwrap(), &[1, 1]);
        let err = a.divrem(&b).unwrap_err();
        assert_eq!(err.code(), "modulus-mismatch");
        assert_eq!(err.info().context["left"], "31");
        assert_eq!(err.info().context["right"], "7");
        assert_eq!(a.rem(&b).unwrap_err().code(), "modulus-mismatch");
        assert_eq!(a.gcd(&b).unwrap_err().code(), "modulus-mismatch");
        assert_eq!(a.mulmod(&b, &a).unwrap_err().code(), "modulus-mismatch");
        assert_eq!(a.mulmod(&a, &b).unwrap_err().code(), "modulus-mismatch");
        assert_eq!(a.powmod(3, &b).unwrap_err().code(), "modulus-mismatch");
    }

    #[test]
    fn derivative_and_evaluation() {
        let ctx = ctx31();
        let f = NmodPoly::from_coeffs(ctx, &[1, 1, 1, 1, 1]);
        assert_eq!(f.derivative(), NmodPoly::from_coeffs(ctx, &[1, 2, 3, 4]));
        let g = NmodPoly::from_coeffs(ctx, &[1, 0, 1]);
        assert_eq!(g.evaluate(7), 50 % 31);
        assert_eq!(g.evaluate_vec(&[7, 15]), vec![50 % 31, 226 % 31]);
    }
}
