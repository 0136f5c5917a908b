//! Exact numbers: rationals, or values known only through an enclosure.

use ntk_ball::mag::next_up;
use ntk_ball::{Acb, Arb};
use ntk_core::errors::{ErrorInfo, NtkError};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::truth::Truth;

/// A number in some field, stored with the data that identifies it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum Ca {
    /// An element of the rationals, known exactly.
    Rational(BigRational),
    /// A complex number known only to lie in the enclosure.
    Enclosure(Acb),
}

impl Ca {
    /// The integer `n`.
    pub fn from_int(n: impl Into<BigInt>) -> Self {
        Ca::Rational(BigRational::from_integer(n.into()))
    }

    /// The rational `num / den` in lowest terms.
    pub fn from_ratio(num: impl Into<BigInt>, den: impl Into<BigInt>) -> Result<Self, NtkError> {
        let den = den.into();
        if den.is_zero() {
            return Err(NtkError::Ca(
                ErrorInfo::new("zero-denominator", "rational with zero denominator")
                    .with_hint("pass a non-zero denominator"),
            ));
        }
        Ok(Ca::Rational(BigRational::new(num.into(), den)))
    }

    /// The exact value known from a certified enclosure alone.
    pub fn from_enclosure(z: Acb) -> Self {
        Ca::Enclosure(z)
    }

    /// True for exactly known rationals.
    pub fn is_rational(&self) -> bool {
        matches!(self, Ca::Rational(_))
    }

    /// A certified complex enclosure of the value.
    pub fn enclosure(&self) -> Acb {
        match self {
            Ca::Rational(q) => Acb::new(rational_ball(q), Arb::zero()),
            Ca::Enclosure(z) => *z,
        }
    }
}

/// Smallest convenient ball around a rational: the nearest double and a
/// radius rounded up from the exact error.
fn rational_ball(q: &BigRational) -> Arb {
    let Some(mid) = q.to_f64().filter(|m| m.is_finite()) else {
        return Arb::indeterminate();
    };
    let Some(mid_q) = BigRational::from_float(mid) else {
        return Arb::indeterminate();
    };
    let err = (q - mid_q).abs();
    let Some(mut rad) = err.to_f64() else {
        return Arb::indeterminate();
    };
    while BigRational::from_float(rad).map_or(false, |r| r < err) {
        rad = next_up(rad);
    }
    Arb::new(mid, rad)
}

/// Decides `x == y` where possible.
///
/// Two rationals are compared exactly. Otherwise the answer is
/// [`Truth::False`] when the enclosures are disjoint and [`Truth::Unknown`]
/// when they overlap; equality of non-rational values is never proven.
pub fn check_equal(x: &Ca, y: &Ca) -> Truth {
    if let (Ca::Rational(a), Ca::Rational(b)) = (x, y) {
        return Truth::from_bool(a == b);
    }
    let (ex, ey) = (x.enclosure(), y.enclosure());
    if ex.overlaps(&ey) {
        trace!(%ex, %ey, "enclosures overlap; equality undecided");
        Truth::Unknown
    } else {
        Truth::False
    }
}
