//! Helpers on slices of balls.
//!
//! Length mismatches are caller bugs and panic.

use crate::acb::Acb;
use crate::arb::Arb;

/// Entrywise sum.
pub fn vec_add(a: &[Arb], b: &[Arb], prec: u32) -> Vec<Arb> {
    assert_eq!(a.len(), b.len(), "vector length mismatch");
    a.iter().zip(b).map(|(x, y)| x.add(y, prec)).collect()
}

/// Entrywise difference.
pub fn vec_sub(a: &[Arb], b: &[Arb], prec: u32) -> Vec<Arb> {
    assert_eq!(a.len(), b.len(), "vector length mismatch");
    a.iter().zip(b).map(|(x, y)| x.sub(y, prec)).collect()
}

/// Multiplies every entry by `2^exp`.
pub fn vec_scalar_mul_2exp(a: &[Arb], exp: i32) -> Vec<Arb> {
    a.iter().map(|x| x.mul_2exp(exp)).collect()
}

/// Dot product.
pub fn vec_dot(a: &[Arb], b: &[Arb], prec: u32) -> Arb {
    assert_eq!(a.len(), b.len(), "vector length mismatch");
    a.iter()
        .zip(b)
        .fold(Arb::zero(), |acc, (x, y)| acc.add(&x.mul(y, prec), prec))
}

/// Imaginary parts of a complex vector.
pub fn acb_vec_imag(z: &[Acb]) -> Vec<Arb> {
    z.iter().map(Acb::imag).collect()
}

/// Real parts of a complex vector.
pub fn acb_vec_real(z: &[Acb]) -> Vec<Arb> {
    z.iter().map(Acb::real).collect()
}

/// True when every entry of `b` lies inside the matching entry of `a`.
pub fn vec_contains(a: &[Arb], b: &[Arb]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.contains(y))
}

/// True when every entry has finite radius.
pub fn vec_is_finite(a: &[Arb]) -> bool {
    a.iter().all(Arb::is_finite)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balls(xs: &[f64]) -> Vec<Arb> {
        xs.iter().copied().map(Arb::from_f64).collect()
    }

    #[test]
    fn entrywise_operations_are_exact_on_dyadics() {
        let a = balls(&[1.5, -0.25, 4.0]);
        let b = balls(&[0.5, 0.75, -2.0]);
        assert_eq!(vec_add(&a, &b, 53), balls(&[2.0, 0.5, 2.0]));
        assert_eq!(vec_sub(&a, &b, 53), balls(&[1.0, -1.0, 6.0]));
        assert_eq!(vec_scalar_mul_2exp(&a, -2), balls(&[0.375, -0.0625, 1.0]));
        assert_eq!(vec_dot(&a, &b, 53), Arb::from_f64(0.75 - 0.1875 - 8.0));
    }

    #[test]
    fn low_precision_dot_product_encloses_the_sum() {
        let a = balls(&[3.0, 5.0, 7.0]);
        let d = vec_dot(&a, &a, 2);
        assert!(d.contains_f64(83.0));
        assert!(!d.is_exact());
    }

    #[test]
    fn complex_parts_split() {
        let z = [Acb::from_f64s(1.0, -2.0), Acb::from_f64s(0.5, 3.0)];
        assert_eq!(acb_vec_real(&z), balls(&[1.0, 0.5]));
        assert_eq!(acb_vec_imag(&z), balls(&[-2.0, 3.0]));
    }

    #[test]
    fn containment_is_entrywise() {
        let wide = vec![Arb::new(0.0, 1.0), Arb::new(5.0, 0.5)];
        assert!(vec_contains(&wide, &balls(&[0.5, 5.25])));
        assert!(!vec_contains(&wide, &balls(&[0.5, 6.0])));
        assert!(!vec_contains(&wide, &balls(&[0.5])));
        assert!(vec_is_finite(&wide));
        assert!(!vec_is_finite(&[Arb::indeterminate()]));
    }
}
