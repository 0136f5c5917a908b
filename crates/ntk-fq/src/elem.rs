//! Field arithmetic on discrete logarithms.

use ntk_core::RngHandle;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ctx::FqZechCtx;

/// Element of an [`FqZechCtx`] field, stored as its discrete logarithm.
///
/// The value `q - 1` encodes zero. Elements carry no reference to their
/// field; every operation goes through the context that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FqZech {
    log: u64,
}

impl FqZech {
    pub(crate) fn from_log(log: u64) -> Self {
        Self { log }
    }

    /// Discrete logarithm to the generator; `q - 1` for zero.
    pub fn log(&self) -> u64 {
        self.log
    }

    /// Uniformly random element of `ctx`, zero included.
    pub fn randtest(ctx: &FqZechCtx, rng: &mut RngHandle) -> FqZech {
        Self::from_log(rng.gen_range(0..ctx.order()))
    }
}

impl FqZechCtx {
    fn group_order(&self) -> u64 {
        self.order() - 1
    }

    /// The zero element.
    pub fn zero(&self) -> FqZech {
        FqZech::from_log(self.zero_log())
    }

    /// The unit element.
    pub fn one(&self) -> FqZech {
        FqZech::from_log(0)
    }

    /// The multiplicative generator, the class of `x`.
    pub fn gen(&self) -> FqZech {
        FqZech::from_log(1 % self.group_order())
    }

    /// True for zero.
    pub fn is_zero(&self, a: &FqZech) -> bool {
        a.log == self.zero_log()
    }

    /// True for one.
    pub fn is_one(&self, a: &FqZech) -> bool {
        a.log == 0 && !self.is_zero(a)
    }

    /// Element equality.
    pub fn equal(&self, a: &FqZech, b: &FqZech) -> bool {
        a.log == b.log
    }

    /// `g^a + g^b = g^a (1 + g^(b - a))`, read from the Zech table.
    pub fn add(&self, a: &FqZech, b: &FqZech) -> FqZech {
        if self.is_zero(a) {
            return *b;
        }
        if self.is_zero(b) {
            return *a;
        }
        let m = self.group_order();
        let n = (b.log + m - a.log) % m;
        let z = self.zech_of(n);
        if z == self.zero_log() {
            return self.zero();
        }
        FqZech::from_log((a.log + z) % m)
    }

    /// Additive inverse; `-1 = g^((q-1)/2)` in odd characteristic.
    pub fn neg(&self, a: &FqZech) -> FqZech {
        if self.prime() == 2 || self.is_zero(a) {
            return *a;
        }
        let m = self.group_order();
        FqZech::from_log((a.log + m / 2) % m)
    }

    /// Difference.
    pub fn sub(&self, a: &FqZech, b: &FqZech) -> FqZech {
        self.add(a, &self.neg(b))
    }

    /// Product.
    pub fn mul(&self, a: &FqZech, b: &FqZech) -> FqZech {
        if self.is_zero(a) || self.is_zero(b) {
            return self.zero();
        }
        FqZech::from_log((a.log + b.log) % self.group_order())
    }

    /// Multiplicative inverse, or `None` for zero.
    pub fn inv(&self, a: &FqZech) -> Option<FqZech> {
        if self.is_zero(a) {
            return None;
        }
        let m = self.group_order();
        Some(FqZech::from_log((m - a.log) % m))
    }

    /// `a / b`, or `None` when `b` is zero.
    pub fn div(&self, a: &FqZech, b: &FqZech) -> Option<FqZech> {
        Some(self.mul(a, &self.inv(b)?))
    }

    /// `a^e`, with `0^0 = 1`.
    pub fn pow(&self, a: &FqZech, e: u64) -> FqZech {
        if e == 0 {
            return self.one();
        }
        if self.is_zero(a) {
            return self.zero();
        }
        let m = self.group_order();
        let log = (u128::from(a.log) * u128::from(e) % u128::from(m)) as u64;
        FqZech::from_log(log)
    }
}
