//! p-adic numbers `unit * p^val` at the absolute precision of a context.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::Zero;
use ntk_core::errors::{ErrorInfo, NtkError};
use serde::{Deserialize, Serialize};

use crate::ctx::{mod_inverse, PadicCtx};

/// A p-adic number known modulo `p^n`.
///
/// Values are kept canonical: the unit is coprime to `p` and reduced into
/// `[0, p^(n - val))`, and zero is stored as unit `0`, valuation `0`. Two
/// values from the same context are equal exactly when their fields are.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Padic {
    unit: BigInt,
    val: i64,
}

impl Padic {
    /// The zero value.
    pub fn zero() -> Self {
        Self {
            unit: BigInt::zero(),
            val: 0,
        }
    }

    /// The value one.
    pub fn one(ctx: &PadicCtx) -> Self {
        Self::canonical(BigInt::from(1), 0, ctx)
    }

    /// The unit part.
    pub fn unit(&self) -> &BigInt {
        &self.unit
    }

    /// The valuation; zero for the zero value.
    pub fn val(&self) -> i64 {
        self.val
    }

    /// True for zero.
    pub fn is_zero(&self) -> bool {
        self.unit.is_zero()
    }

    pub(crate) fn canonical(unit: BigInt, val: i64, ctx: &PadicCtx) -> Self {
        if unit.is_zero() {
            return Self::zero();
        }
        let (shift, unit) = ctx.remove(&unit);
        let val = val + shift;
        if val >= ctx.precision() {
            return Self::zero();
        }
        let unit = unit.mod_floor(&ctx.pow(ctx.precision() - val));
        Self { unit, val }
    }

    /// Image of an integer.
    pub fn from_int(x: &BigInt, ctx: &PadicCtx) -> Self {
        Self::canonical(x.clone(), 0, ctx)
    }

    /// Image of a rational number.
    ///
    /// Fails when the denominator is zero.
    pub fn from_rational(x: &BigRational, ctx: &PadicCtx) -> Result<Self, NtkError> {
        if x.denom().is_zero() {
            return Err(NtkError::Padic(ErrorInfo::new(
                "zero-denominator",
                "rational has a zero denominator",
            )));
        }
        if x.numer().is_zero() {
            return Ok(Self::zero());
        }
        let (vn, un) = ctx.remove(x.numer());
        let (vd, ud) = ctx.remove(x.denom());
        let val = vn - vd;
        if val >= ctx.precision() {
            return Ok(Self::zero());
        }
        let modulus = ctx.pow(ctx.precision() - val);
        let inv = mod_inverse(&ud, &modulus).ok_or_else(|| {
            NtkError::Padic(ErrorInfo::new(
                "non-unit-denominator",
                "denominator unit is not invertible",
            ))
        })?;
        Ok(Self::canonical(un * inv, val, ctx))
    }

    /// The integer in `[0, p^n)` congruent to a value of non-negative valuation.
    pub fn to_int(&self, ctx: &PadicCtx) -> Result<BigInt, NtkError> {
        if self.val < 0 {
            return Err(NtkError::Padic(
                ErrorInfo::new("negative-valuation", "value is not a p-adic integer")
                    .with_context("val", self.val),
            ));
        }
        Ok((&self.unit * ctx.pow(self.val)).mod_floor(&ctx.pow(ctx.precision())))
    }

    /// Sum.
    pub fn add(&self, other: &Padic, ctx: &PadicCtx) -> Padic {
        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }
        let val = self.val.min(other.val);
        if val >= ctx.precision() {
            return Self::zero();
        }
        let unit = &self.unit * ctx.pow(self.val - val) + &other.unit * ctx.pow(other.val - val);
        Self::canonical(unit, val, ctx)
    }

    /// Additive inverse.
    pub fn neg(&self, ctx: &PadicCtx) -> Padic {
        if self.is_zero() {
            return Self::zero();
        }
        Self::canonical(-&self.unit, self.val, ctx)
    }

    /// Difference.
    pub fn sub(&self, other: &Padic, ctx: &PadicCtx) -> Padic {
        self.add(&other.neg(ctx), ctx)
    }

    /// Product.
    pub fn mul(&self, other: &Padic, ctx: &PadicCtx) -> Padic {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        Self::canonical(&self.unit * &other.unit, self.val + other.val, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> PadicCtx {
        PadicCtx::new(5, 6).unwrap()
    }

    #[test]
    fn canonical_form_moves_factors_of_p() {
        let x = Padic::from_int(&BigInt::from(50), &ctx());
        assert_eq!(x.val(), 2);
        assert_eq!(x.unit(), &BigInt::from(2));
        assert_eq!(x.to_int(&ctx()).unwrap(), BigInt::from(50));
        assert!(Padic::from_int(&BigInt::from(5i64.pow(6)), &ctx()).is_zero());
    }

    #[test]
    fn rational_values_and_negative_valuation() {
        let third = Padic::from_rational(&BigRational::new(1.into(), 3.into()), &ctx()).unwrap();
        let three = Padic::from_int(&BigInt::from(3), &ctx());
        assert_eq!(third.mul(&three, &ctx()), Padic::one(&ctx()));

        let fifth = Padic::from_rational(&BigRational::new(1.into(), 5.into()), &ctx()).unwrap();
        assert_eq!(fifth.val(), -1);
        assert_eq!(fifth.to_int(&ctx()).unwrap_err().code(), "negative-valuation");
    }

    #[test]
    fn ring_operations() {
        let ctx = ctx();
        let a = Padic::from_int(&BigInt::from(-7), &ctx);
        let b = Padic::from_int(&BigInt::from(35), &ctx);
        assert!(a.sub(&a, &ctx).is_zero());
        assert_eq!(a.add(&b, &ctx), Padic::from_int(&BigInt::from(28), &ctx));
        assert_eq!(a.neg(&ctx), Padic::from_int(&BigInt::from(7), &ctx));
        assert_eq!(a.mul(&b, &ctx), Padic::from_int(&BigInt::from(-245), &ctx));
    }
}
