//! Directed rounding on non-negative magnitudes and midpoint rounding.
//!
//! Radii are only ever moved upward. Every helper checks whether the
//! floating-point operation it wraps was exact (through an error-free
//! transformation) and only steps to the neighbouring float when it was not,
//! so exact inputs keep a zero radius.

/// Largest supported working precision in bits.
pub const MAX_PREC: u32 = 53;

/// Smallest supported working precision in bits.
pub const MIN_PREC: u32 = 2;

/// Clamps a requested precision into the supported range.
pub fn effective_prec(prec: u32) -> u32 {
    prec.clamp(MIN_PREC, MAX_PREC)
}

/// Returns the smallest float strictly greater than `x`.
pub fn next_up(x: f64) -> f64 {
    if x.is_nan() || x == f64::INFINITY {
        return x;
    }
    if x == 0.0 {
        return f64::from_bits(1);
    }
    let bits = x.to_bits();
    if x > 0.0 {
        f64::from_bits(bits + 1)
    } else {
        f64::from_bits(bits - 1)
    }
}

/// Returns the largest float strictly smaller than `x`.
pub fn next_down(x: f64) -> f64 {
    -next_up(-x)
}

/// Error-free sum: `a + b == s + e` exactly when no overflow occurs.
pub fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bb = s - a;
    let e = (a - (s - bb)) + (b - bb);
    (s, e)
}

/// Error-free product: `a * b == p + e` exactly when no underflow occurs.
pub fn two_prod(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    let e = a.mul_add(b, -p);
    (p, e)
}

/// Upper bound for `a + b`.
pub fn add_up(a: f64, b: f64) -> f64 {
    let (s, e) = two_sum(a, b);
    if !s.is_finite() {
        return s;
    }
    if e > 0.0 {
        next_up(s)
    } else {
        s
    }
}

/// Lower bound for `a + b`.
pub fn add_down(a: f64, b: f64) -> f64 {
    sub_down(a, -b)
}

/// Lower bound for `a - b`.
pub fn sub_down(a: f64, b: f64) -> f64 {
    let (d, e) = two_sum(a, -b);
    if !d.is_finite() {
        return d;
    }
    if e < 0.0 {
        next_down(d)
    } else {
        d
    }
}

/// Upper bound for `a - b`.
pub fn sub_up(a: f64, b: f64) -> f64 {
    add_up(a, -b)
}

/// Upper bound for `a * b` with `a, b >= 0`.
pub fn mul_up(a: f64, b: f64) -> f64 {
    if a == 0.0 || b == 0.0 {
        return 0.0;
    }
    let (p, e) = two_prod(a, b);
    if !p.is_finite() {
        return f64::INFINITY;
    }
    if e > 0.0 || (p == 0.0) {
        next_up(p)
    } else {
        p
    }
}

/// Lower bound for `a * b` with `a, b >= 0`.
pub fn mul_down(a: f64, b: f64) -> f64 {
    let (p, e) = two_prod(a, b);
    if !p.is_finite() {
        return p;
    }
    if e < 0.0 {
        next_down(p).max(0.0)
    } else {
        p
    }
}

/// Upper bound for `a / b` with `a >= 0`, `b > 0`.
pub fn div_up(a: f64, b: f64) -> f64 {
    if a == 0.0 {
        return 0.0;
    }
    if b <= 0.0 {
        return f64::INFINITY;
    }
    let q = a / b;
    if !q.is_finite() {
        return f64::INFINITY;
    }
    let r = (-q).mul_add(b, a);
    if r > 0.0 || q == 0.0 {
        next_up(q)
    } else {
        q
    }
}

/// Lower bound for `a / b` with `a >= 0`, `b > 0`.
pub fn div_down(a: f64, b: f64) -> f64 {
    if a == 0.0 || b == f64::INFINITY {
        return 0.0;
    }
    let q = a / b;
    if !q.is_finite() {
        return q;
    }
    let r = (-q).mul_add(b, a);
    if r < 0.0 {
        next_down(q).max(0.0)
    } else {
        q
    }
}

/// Lower bound for `sqrt(x)` with `x >= 0`.
pub fn sqrt_down(x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    let s = x.sqrt();
    let r = (-s).mul_add(s, x);
    if r < 0.0 {
        next_down(s).max(0.0)
    } else {
        s
    }
}

/// Upper bound for `sqrt(x)` with `x >= 0`.
pub fn sqrt_up(x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    let s = x.sqrt();
    let r = (-s).mul_add(s, x);
    if r > 0.0 {
        next_up(s)
    } else {
        s
    }
}

/// Rounds `x` to `prec` significant bits (ties away from zero).
///
/// Returns the rounded value together with the exact magnitude of the
/// rounding error. Subnormal and non-finite inputs are returned unchanged.
pub fn round_to_prec(x: f64, prec: u32) -> (f64, f64) {
    let prec = effective_prec(prec);
    if prec >= MAX_PREC || x == 0.0 || !x.is_finite() {
        return (x, 0.0);
    }
    let biased = ((x.to_bits() >> 52) & 0x7ff) as i32;
    if biased == 0 {
        return (x, 0.0);
    }
    let exp = biased - 1023;
    let quantum_exp = exp - prec as i32 + 1;
    if quantum_exp < -1022 {
        return (x, 0.0);
    }
    let quantum = f64::from_bits(((quantum_exp + 1023) as u64) << 52);
    let rounded = (x / quantum).round() * quantum;
    if !rounded.is_finite() {
        return (x, 0.0);
    }
    (rounded, (x - rounded).abs())
}
