//! Prime and precision of a p-adic computation.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use ntk_core::errors::{ErrorInfo, NtkError};
use serde::{Deserialize, Serialize};

/// Largest supported absolute precision.
pub const MAX_PRECISION: i64 = 1 << 20;

const WITNESSES: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// A prime `p` and an absolute precision `n`: values are known modulo `p^n`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PadicCtx {
    p: BigInt,
    n: i64,
}

impl PadicCtx {
    /// Context for the prime `p` at precision `1 <= n <= MAX_PRECISION`.
    pub fn new(p: impl Into<BigInt>, n: i64) -> Result<Self, NtkError> {
        let p = p.into();
        if !is_probable_prime(&p) {
            return Err(NtkError::Padic(
                ErrorInfo::new("not-prime", "p-adic base must be prime").with_context("p", &p),
            ));
        }
        if !(1..=MAX_PRECISION).contains(&n) {
            return Err(NtkError::Padic(
                ErrorInfo::new("precision-out-of-range", "precision must be positive and bounded")
                    .with_context("n", n)
                    .with_context("max", MAX_PRECISION),
            ));
        }
        Ok(Self { p, n })
    }

    /// The prime.
    pub fn prime(&self) -> &BigInt {
        &self.p
    }

    /// The absolute precision.
    pub fn precision(&self) -> i64 {
        self.n
    }

    /// `p^e` for `e >= 0`.
    pub fn pow(&self, e: i64) -> BigInt {
        // Exponents are bounded by MAX_PRECISION plus a logarithmic margin.
        self.p.pow(e.max(0) as u32)
    }

    /// Splits `x != 0` as `p^v * u` with `u` coprime to `p`.
    pub fn remove(&self, x: &BigInt) -> (i64, BigInt) {
        let mut u = x.clone();
        let mut v = 0;
        if u.is_zero() {
            return (0, u);
        }
        loop {
            let (q, r) = u.div_rem(&self.p);
            if !r.is_zero() {
                return (v, u);
            }
            u = q;
            v += 1;
        }
    }

    /// True for `p = 2`.
    pub fn is_two(&self) -> bool {
        self.p.to_u8() == Some(2)
    }
}

/// Inverse of `a` modulo `m`, if it exists.
pub(crate) fn mod_inverse(a: &BigInt, m: &BigInt) -> Option<BigInt> {
    let egcd = a.mod_floor(m).extended_gcd(m);
    egcd.gcd.is_one().then(|| egcd.x.mod_floor(m))
}

/// Miller-Rabin with the first twelve primes as witnesses; exact below `3.3 * 10^24`.
pub fn is_probable_prime(n: &BigInt) -> bool {
    let two = BigInt::from(2u32);
    if n < &two {
        return false;
    }
    for w in WITNESSES {
        let w = BigInt::from(w);
        if n == &w {
            return true;
        }
        if n.is_multiple_of(&w) {
            return false;
        }
    }
    let n_minus_one = n - 1u32;
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }
    'witness: for w in WITNESSES {
        let mut x = BigInt::from(w).modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = (&x * &x).mod_floor(n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primality_of_small_and_large_values() {
        let primes = [2u64, 3, 5, 41, 1_000_000_007, 18_446_744_073_709_551_557];
        for p in primes {
            assert!(is_probable_prime(&BigInt::from(p)), "{p}");
        }
        let composites = [0u64, 1, 4, 91, 561, 1_000_000_007 * 3];
        for c in composites {
            assert!(!is_probable_prime(&BigInt::from(c)), "{c}");
        }
    }

    #[test]
    fn context_validation() {
        assert_eq!(PadicCtx::new(6, 10).unwrap_err().code(), "not-prime");
        assert_eq!(
            PadicCtx::new(7, 0).unwrap_err().code(),
            "precision-out-of-range"
        );
        let ctx = PadicCtx::new(7, 10).unwrap();
        assert_eq!(ctx.remove(&BigInt::from(98)), (2, BigInt::from(2)));
        assert_eq!(
            mod_inverse(&BigInt::from(3), &BigInt::from(7)),
            Some(BigInt::from(5))
        );
    }
}
