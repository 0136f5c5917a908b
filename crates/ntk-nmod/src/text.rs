//! Text form `"len modulus  c0 c1 ..."` of polynomials.

use std::fmt;
use std::str::FromStr;

use ntk_core::errors::{ErrorInfo, NtkError};

use crate::ctx::NmodCtx;
use crate::poly::NmodPoly;

fn parse_error(code: &str, input: &str, message: &str) -> NtkError {
    NtkError::Nmod(ErrorInfo::new(code, message).with_context("input", input))
}

impl fmt::Display for NmodPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.length(), self.modulus())?;
        if self.is_zero() {
            return Ok(());
        }
        write!(f, " ")?;
        for c in self.coeffs() {
            write!(f, " {c}")?;
        }
        Ok(())
    }
}

impl FromStr for NmodPoly {
    type Err = NtkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let len: usize = tokens
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| parse_error("malformed-length", s, "expected a length"))?;
        let modulus: u64 = tokens
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| parse_error("malformed-modulus", s, "expected a modulus"))?;
        let ctx = NmodCtx::new(modulus)?;
        let coeffs = tokens
            .map(|t| {
                t.parse::<u64>()
                    .map_err(|_| parse_error("malformed-coefficient", s, "expected a coefficient"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if coeffs.len() != len {
            return Err(NtkError::Nmod(
                ErrorInfo::new("coefficient-count", "coefficient count differs from the length")
                    .with_context("input", s)
                    .with_context("expected", len)
                    .with_context("found", coeffs.len()),
            ));
        }
        Ok(NmodPoly::from_coeffs(ctx, &coeffs))
    }
}

impl TryFrom<String> for NmodPoly {
    type Error = NtkError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NmodPoly> for String {
    fn from(poly: NmodPoly) -> Self {
        poly.to_string()
    }
}
