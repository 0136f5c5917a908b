#![allow(dead_code)]

use ntk_ball::{Acb, AcbMat, Arb, ArbMat};

/// `tau = i * I_g` with a small real off-diagonal perturbation.
pub fn tau_diag(g: usize) -> AcbMat {
    AcbMat::from_fn(g, g, |i, j| {
        if i == j {
            Acb::i()
        } else {
            Acb::from_f64s(0.125, 0.0)
        }
    })
}

/// A reduced genus-two period matrix with dyadic entries.
pub fn tau_example() -> AcbMat {
    let re = ArbMat::from_rows(&[vec![0.25, 0.125], vec![0.125, -0.5]]).unwrap();
    let im = ArbMat::from_rows(&[vec![1.5, 0.375], vec![0.375, 1.25]]).unwrap();
    AcbMat::from_parts(&re, &im).unwrap()
}

pub fn z_example() -> Vec<Acb> {
    vec![Acb::from_f64s(0.25, 0.5), Acb::from_f64s(-0.125, 0.25)]
}

/// `tau` with zero real part and imaginary part `y`.
pub fn tau_from_imag(y: &[Vec<f64>]) -> AcbMat {
    let im = ArbMat::from_rows(y).unwrap();
    AcbMat::from_parts(&ArbMat::new(im.nrows(), im.ncols()), &im).unwrap()
}

/// `z` with zero real part and the given imaginary part.
pub fn z_from_imag(y: &[f64]) -> Vec<Acb> {
    y.iter().map(|&v| Acb::new(Arb::zero(), Arb::from_f64(v))).collect()
}

/// `z + tau e_col * scale`.
pub fn shift_by_column(z: &[Acb], tau: &AcbMat, col: usize, scale: f64) -> Vec<Acb> {
    z.iter()
        .enumerate()
        .map(|(i, zi)| zi.add(&tau[(i, col)].mul_arb(&Arb::from_f64(scale), 53), 53))
        .collect()
}

pub fn mat_vec(y: &[Vec<f64>], u: &[f64]) -> Vec<f64> {
    y.iter()
        .map(|row| row.iter().zip(u).map(|(a, b)| a * b).sum())
        .collect()
}

/// Floating-point minimum of `x^T Y x` over `x = offset + n`, `n` in `[-radius, radius]^g`.
pub fn brute_force_min(y: &[Vec<f64>], offset: &[f64], radius: i64) -> f64 {
    let g = offset.len();
    let mut best = f64::INFINITY;
    let mut n = vec![-radius; g];
    loop {
        let x: Vec<f64> = offset.iter().zip(&n).map(|(o, k)| o + *k as f64).collect();
        let yx = mat_vec(y, &x);
        let q: f64 = x.iter().zip(&yx).map(|(a, b)| a * b).sum();
        best = best.min(q);

        let mut k = 0;
        loop {
            if k == g {
                return best;
            }
            if n[k] < radius {
                n[k] += 1;
                break;
            }
            n[k] = -radius;
            k += 1;
        }
    }
}
