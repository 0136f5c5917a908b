//! Field construction: primitive modulus search and Zech tables.

use ntk_core::errors::{ErrorInfo, NtkError};
use ntk_core::RngHandle;
use ntk_nmod::{NmodCtx, NmodPoly};
use rand::Rng;
use tracing::debug;

use crate::elem::FqZech;

/// Largest supported field order.
pub const MAX_ORDER: u64 = 1 << 20;

const SMALL_PRIMES: [u64; 6] = [2, 3, 5, 7, 11, 13];

fn field_error(code: &str, message: impl Into<String>) -> NtkError {
    NtkError::Field(ErrorInfo::new(code, message))
}

pub(crate) fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut d = 2;
    while d <= n / d {
        if n % d == 0 {
            return false;
        }
        d += 1;
    }
    true
}

/// The field `F_q`, `q = p^d`, with elements stored as discrete logarithms.
///
/// The generator is the class of `x` modulo the first monic primitive
/// polynomial of degree `d`, listed by the integer whose base-`p` digits are
/// its lower coefficients. Field elements are encoded as integers the same
/// way: coefficient `i` is digit `i`.
#[derive(Debug, Clone)]
pub struct FqZechCtx {
    p: u64,
    d: u32,
    q: u64,
    modulus: NmodPoly,
    /// `log[r]` for the element with digit encoding `r`; `log[0] = q - 1`.
    log: Vec<u64>,
    /// Digit encoding of `g^k` for `k < q - 1`.
    antilog: Vec<u64>,
    /// `zech[n] = log(1 + g^n)`.
    zech: Vec<u64>,
}

impl FqZechCtx {
    /// Builds `F_{p^d}`; `p` must be prime, `d >= 1` and `p^d <= 2^20`.
    pub fn new(p: u64, d: u32) -> Result<Self, NtkError> {
        if d == 0 {
            return Err(field_error("zero-degree", "extension degree must be positive"));
        }
        let q = p
            .checked_pow(d)
            .filter(|&q| q <= MAX_ORDER)
            .ok_or_else(|| {
                NtkError::Field(
                    ErrorInfo::new("field-too-large", "field order exceeds the table limit")
                        .with_context("p", p)
                        .with_context("d", d)
                        .with_context("max", MAX_ORDER),
                )
            })?;
        if !is_prime(p) {
            return Err(NtkError::Field(
                ErrorInfo::new("not-prime", "characteristic must be prime").with_context("p", p),
            ));
        }

        for tail in 0..q {
            let lower = digits(tail, p, d as usize);
            if lower[0] == 0 {
                continue;
            }
            if let Some(antilog) = primitive_powers(&lower, p, q) {
                debug!(p, d, candidate = tail, "primitive modulus found");
                return Self::from_tables(p, d, q, &lower, antilog);
            }
        }
        Err(field_error(
            "no-primitive-polynomial",
            "no primitive polynomial of the requested degree",
        ))
    }

    fn from_tables(
        p: u64,
        d: u32,
        q: u64,
        lower: &[u64],
        antilog: Vec<u64>,
    ) -> Result<Self, NtkError> {
        let qm1 = q - 1;
        let mut log = vec![qm1; q as usize];
        for (k, &r) in antilog.iter().enumerate() {
            log[r as usize] = k as u64;
        }
        let zech = antilog
            .iter()
            .map(|&r| {
                let c0 = r % p;
                let shifted = if c0 + 1 == p { r - c0 } else { r + 1 };
                log[shifted as usize]
            })
            .collect();

        let mut coeffs = lower.to_vec();
        coeffs.push(1);
        let modulus = NmodPoly::from_coeffs(NmodCtx::new(p)?, &coeffs);
        Ok(Self {
            p,
            d,
            q,
            modulus,
            log,
            antilog,
            zech,
        })
    }

    /// Random small field with order at most `2^12`.
    pub fn randtest(rng: &mut RngHandle) -> Result<Self, NtkError> {
        let p = SMALL_PRIMES[rng.gen_range(0..SMALL_PRIMES.len())];
        let mut max_d = 1;
        while p.pow(max_d + 1) <= 1 << 12 {
            max_d += 1;
        }
        let d = rng.gen_range(1..=max_d);
        Self::new(p, d)
    }

    /// The characteristic.
    pub fn prime(&self) -> u64 {
        self.p
    }

    /// The extension degree.
    pub fn degree(&self) -> u32 {
        self.d
    }

    /// The number of elements.
    pub fn order(&self) -> u64 {
        self.q
    }

    /// The defining primitive polynomial.
    pub fn modulus(&self) -> &NmodPoly {
        &self.modulus
    }

    pub(crate) fn zero_log(&self) -> u64 {
        self.q - 1
    }

    pub(crate) fn log_of(&self, encoding: u64) -> u64 {
        self.log[encoding as usize]
    }

    pub(crate) fn antilog_of(&self, k: u64) -> u64 {
        self.antilog[k as usize]
    }

    pub(crate) fn zech_of(&self, n: u64) -> u64 {
        self.zech[n as usize]
    }

    /// Element with the given digit encoding, reduced modulo `q`.
    pub fn from_encoding(&self, encoding: u64) -> FqZech {
        FqZech::from_log(self.log_of(encoding % self.q))
    }

    /// Digit encoding of an element.
    pub fn encoding(&self, a: &FqZech) -> u64 {
        if self.is_zero(a) {
            0
        } else {
            self.antilog_of(a.log())
        }
    }

    /// Image of a polynomial over `F_p`.
    pub fn from_poly(&self, poly: &NmodPoly) -> Result<FqZech, NtkError> {
        if poly.modulus() != self.p {
            return Err(NtkError::Field(
                ErrorInfo::new("modulus-mismatch", "polynomial is not over the prime field")
                    .with_context("p", self.p)
                    .with_context("modulus", poly.modulus()),
            ));
        }
        let reduced = poly.rem(&self.modulus)?;
        let encoding = reduced
            .coeffs()
            .iter()
            .rev()
            .fold(0u64, |acc, &c| acc * self.p + c);
        Ok(self.from_encoding(encoding))
    }

    /// Representative of degree below `d`.
    pub fn to_poly(&self, a: &FqZech) -> NmodPoly {
        let coeffs = digits(self.encoding(a), self.p, self.d as usize);
        NmodPoly::from_coeffs(self.modulus.ctx(), &coeffs)
    }

    /// Image of an integer in the prime field.
    pub fn from_u64(&self, n: u64) -> FqZech {
        self.from_encoding(n % self.p)
    }
}

fn digits(mut n: u64, p: u64, len: usize) -> Vec<u64> {
    let mut out = Vec::with_capacity(len);
    for _ in 0..len {
        out.push(n % p);
        n /= p;
    }
    out
}

/// Encodings of `x^0, ..., x^{q-2}` modulo `x^d + lower`, or `None` when `x`
/// does not have order `q - 1`.
fn primitive_powers(lower: &[u64], p: u64, q: u64) -> Option<Vec<u64>> {
    let d = lower.len();
    let encode = |s: &[u64]| s.iter().rev().fold(0u64, |acc, &c| acc * p + c);
    let mut state = vec![0u64; d];
    state[0] = 1;
    let mut powers = Vec::with_capacity((q - 1) as usize);
    for k in 0..q - 1 {
        let code = encode(&state);
        if k > 0 && code == 1 {
            return None;
        }
        powers.push(code);

        let top = state[d - 1];
        for i in (1..d).rev() {
            state[i] = state[i - 1];
        }
        state[0] = 0;
        for (s, &f) in state.iter_mut().zip(lower) {
            *s = (*s + p - (top * f) % p) % p;
        }
    }
    (encode(&state) == 1).then_some(powers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_parameters() {
        assert_eq!(FqZechCtx::new(4, 2).unwrap_err().code(), "not-prime");
        assert_eq!(FqZechCtx::new(3, 0).unwrap_err().code(), "zero-degree");
        assert_eq!(FqZechCtx::new(2, 21).unwrap_err().code(), "field-too-large");
        assert_eq!(FqZechCtx::new(1031, 2).unwrap_err().code(), "field-too-large");
        assert_eq!(FqZechCtx::new(0, 1).unwrap_err().code(), "not-prime");
    }

    #[test]
    fn huge_characteristic_is_rejected_before_primality() {
        // 2^64 - 59 is prime.
        let err = FqZechCtx::new(u64::MAX - 58, 1).unwrap_err();
        assert_eq!(err.code(), "field-too-large");
    }

    #[test]
    fn trial_division_handles_the_top_of_the_range() {
        assert!(is_prime(1_048_573));
        assert!(!is_prime(1 << 20));
        assert!(!is_prime(u64::MAX));
        assert!(is_prime(4_294_967_291));
    }

    #[test]
    fn first_primitive_modulus_is_chosen() {
        let f4 = FqZechCtx::new(2, 2).unwrap();
        assert_eq!(f4.modulus().to_string(), "3 2  1 1 1");
        let f9 = FqZechCtx::new(3, 2).unwrap();
        assert_eq!(f9.modulus().to_string(), "3 3  2 1 1");
        let f7 = FqZechCtx::new(7, 1).unwrap();
        // x = -2 = 5 generates F_7^*.
        assert_eq!(f7.modulus().to_string(), "2 7  2 1");
    }

    #[test]
    fn log_and_antilog_are_inverse() {
        let ctx = FqZechCtx::new(5, 2).unwrap();
        for k in 0..ctx.order() - 1 {
            assert_eq!(ctx.log_of(ctx.antilog_of(k)), k);
        }
        assert_eq!(ctx.log_of(0), ctx.zero_log());
    }
}
