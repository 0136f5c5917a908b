//! Certified complex balls (rectangular: one real ball per component).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::arb::Arb;

/// A complex number whose real and imaginary parts are enclosed independently.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Acb {
    re: Arb,
    im: Arb,
}

impl Acb {
    /// Creates a complex ball from its component balls.
    pub const fn new(re: Arb, im: Arb) -> Self {
        Self { re, im }
    }

    /// The exact complex number `re + i im`.
    pub fn from_f64s(re: f64, im: f64) -> Self {
        Self::new(Arb::from_f64(re), Arb::from_f64(im))
    }

    /// The exact value zero.
    pub const fn zero() -> Self {
        Self::new(Arb::zero(), Arb::zero())
    }

    /// The exact value one.
    pub const fn one() -> Self {
        Self::new(Arb::one(), Arb::zero())
    }

    /// The imaginary unit.
    pub const fn i() -> Self {
        Self::new(Arb::zero(), Arb::one())
    }

    /// Both components indeterminate.
    pub const fn indeterminate() -> Self {
        Self::new(Arb::indeterminate(), Arb::indeterminate())
    }

    /// Real part.
    pub fn real(&self) -> Arb {
        self.re
    }

    /// Imaginary part.
    pub fn imag(&self) -> Arb {
        self.im
    }

    /// True when both components have finite radius.
    pub fn is_finite(&self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }

    /// True when both components are exact.
    pub fn is_exact(&self) -> bool {
        self.re.is_exact() && self.im.is_exact()
    }

    /// True when `other` is a subset of `self`.
    pub fn contains(&self, other: &Acb) -> bool {
        self.re.contains(&other.re) && self.im.contains(&other.im)
    }

    /// True when the two boxes share at least one point.
    pub fn overlaps(&self, other: &Acb) -> bool {
        self.re.overlaps(&other.re) && self.im.overlaps(&other.im)
    }

    /// Negation.
    pub fn neg(&self) -> Acb {
        Acb::new(self.re.neg(), self.im.neg())
    }

    /// Sum.
    pub fn add(&self, other: &Acb, prec: u32) -> Acb {
        Acb::new(self.re.add(&other.re, prec), self.im.add(&other.im, prec))
    }

    /// Difference.
    pub fn sub(&self, other: &Acb, prec: u32) -> Acb {
        Acb::new(self.re.sub(&other.re, prec), self.im.sub(&other.im, prec))
    }

    /// Product.
    pub fn mul(&self, other: &Acb, prec: u32) -> Acb {
        let re = self
            .re
            .mul(&other.re, prec)
            .sub(&self.im.mul(&other.im, prec), prec);
        let im = self
            .re
            .mul(&other.im, prec)
            .add(&self.im.mul(&other.re, prec), prec);
        Acb::new(re, im)
    }

    /// Product with a real ball.
    pub fn mul_arb(&self, x: &Arb, prec: u32) -> Acb {
        Acb::new(self.re.mul(x, prec), self.im.mul(x, prec))
    }

    /// Multiplies both components by `2^exp`.
    pub fn mul_2exp(&self, exp: i32) -> Acb {
        Acb::new(self.re.mul_2exp(exp), self.im.mul_2exp(exp))
    }
}

impl fmt::Display for Acb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} + {}*I", self.re, self.im)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn i_squared_is_minus_one() {
        let sq = Acb::i().mul(&Acb::i(), 53);
        assert_eq!(sq, Acb::from_f64s(-1.0, 0.0));
    }

    #[test]
    fn product_encloses_exact_value() {
        let a = Acb::from_f64s(0.1, 0.7);
        let b = Acb::from_f64s(-0.3, 0.2);
        let p = a.mul(&b, 30);
        assert!(p.real().contains_f64(0.1 * -0.3 - 0.7 * 0.2));
        assert!(p.imag().contains_f64(0.1 * 0.2 + 0.7 * -0.3));
    }
}
