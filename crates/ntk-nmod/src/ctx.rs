//! Arithmetic modulo a word-size integer.

use ntk_core::errors::{ErrorInfo, NtkError};
use serde::{Deserialize, Serialize};

/// Modulus context for residues in `[0, n)`.
///
/// Every operation expects reduced operands and returns a reduced result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NmodCtx {
    n: u64,
}

impl NmodCtx {
    /// Context for the modulus `n >= 1`.
    pub fn new(n: u64) -> Result<Self, NtkError> {
        if n == 0 {
            return Err(NtkError::Nmod(
                ErrorInfo::new("zero-modulus", "modulus must be at least one")
                    .with_hint("use n = 1 for the zero ring"),
            ));
        }
        Ok(Self { n })
    }

    /// The modulus.
    pub fn modulus(&self) -> u64 {
        self.n
    }

    /// Reduces an arbitrary word.
    pub fn red(&self, a: u64) -> u64 {
        a % self.n
    }

    /// Reduces a signed value.
    pub fn red_signed(&self, a: i64) -> u64 {
        i128::from(a).rem_euclid(i128::from(self.n)) as u64
    }

    /// Sum.
    pub fn add(&self, a: u64, b: u64) -> u64 {
        ((u128::from(a) + u128::from(b)) % u128::from(self.n)) as u64
    }

    /// Difference.
    pub fn sub(&self, a: u64, b: u64) -> u64 {
        if a >= b {
            a - b
        } else {
            self.n - (b - a)
        }
    }

    /// Additive inverse.
    pub fn neg(&self, a: u64) -> u64 {
        if a == 0 {
            0
        } else {
            self.n - a
        }
    }

    /// Product.
    pub fn mul(&self, a: u64, b: u64) -> u64 {
        (u128::from(a) * u128::from(b) % u128::from(self.n)) as u64
    }

    /// `a^e` by binary exponentiation; `a^0 = 1` reduced.
    pub fn pow(&self, a: u64, mut e: u64) -> u64 {
        let mut base = a;
        let mut acc = self.red(1);
        while e > 0 {
            if e & 1 == 1 {
                acc = self.mul(acc, base);
            }
            base = self.mul(base, base);
            e >>= 1;
        }
        acc
    }

    /// Multiplicative inverse, or `None` when `a` is not a unit.
    pub fn inv(&self, a: u64) -> Option<u64> {
        let (mut old_r, mut r) = (i128::from(a), i128::from(self.n));
        let (mut old_s, mut s) = (1i128, 0i128);
        while r != 0 {
            let q = old_r / r;
            (old_r, r) = (r, old_r - q * r);
            (old_s, s) = (s, old_s - q * s);
        }
        if old_r != 1 {
            return None;
        }
        Some(old_s.rem_euclid(i128::from(self.n)) as u64)
    }

    /// True when `a` is invertible.
    pub fn is_unit(&self, a: u64) -> bool {
        self.inv(a).is_some()
    }
}
