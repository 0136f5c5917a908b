use ntk_core::RngHandle;
use ntk_fq::{FqZech, FqZechCtx};
use ntk_nmod::NmodPoly;
use proptest::prelude::*;

fn fields() -> Vec<FqZechCtx> {
    [(2, 1), (2, 5), (3, 3), (5, 2), (7, 1), (13, 2)]
        .iter()
        .map(|&(p, d)| FqZechCtx::new(p, d).unwrap())
        .collect()
}

#[test]
fn polynomial_round_trip_covers_every_element() {
    for ctx in fields() {
        for code in 0..ctx.order() {
            let a = ctx.from_encoding(code);
            let poly = ctx.to_poly(&a);
            assert!(poly.degree() < i64::from(ctx.degree()));
            assert_eq!(ctx.from_poly(&poly).unwrap(), a);
        }
    }
}

#[test]
fn addition_matches_polynomial_addition() {
    let mut rng = RngHandle::from_seed(99);
    for ctx in fields() {
        for _ in 0..200 {
            let a = FqZech::randtest(&ctx, &mut rng);
            let b = FqZech::randtest(&ctx, &mut rng);
            let sum = ctx.to_poly(&a).add(&ctx.to_poly(&b));
            assert_eq!(ctx.from_poly(&sum).unwrap(), ctx.add(&a, &b));
            let prod = ctx.to_poly(&a).mul(&ctx.to_poly(&b));
            assert_eq!(ctx.from_poly(&prod).unwrap(), ctx.mul(&a, &b));
        }
    }
}

#[test]
fn generator_has_full_order() {
    for ctx in fields() {
        let g = ctx.gen();
        let m = ctx.order() - 1;
        assert!(ctx.is_one(&ctx.pow(&g, m)));
        for k in 1..m {
            if m % k == 0 {
                assert!(!ctx.is_one(&ctx.pow(&g, k)));
            }
        }
    }
}

#[test]
fn polynomials_over_another_prime_are_rejected() {
    let ctx = FqZechCtx::new(5, 2).unwrap();
    let poly = NmodPoly::new(7).unwrap();
    assert_eq!(ctx.from_poly(&poly).unwrap_err().code(), "modulus-mismatch");
}

proptest! {
    #[test]
    fn nonzero_elements_are_invertible(log in 0u64..624) {
        let ctx = FqZechCtx::new(5, 4).unwrap();
        let a = ctx.from_encoding(log + 1);
        let inv = ctx.inv(&a).unwrap();
        prop_assert!(ctx.is_one(&ctx.mul(&a, &inv)));
        prop_assert_eq!(ctx.div(&a, &a), Some(ctx.one()));
    }

    #[test]
    fn distributive_law(x in 0u64..729, y in 0u64..729, z in 0u64..729) {
        let ctx = FqZechCtx::new(3, 6).unwrap();
        let (a, b, c) = (ctx.from_encoding(x), ctx.from_encoding(y), ctx.from_encoding(z));
        let lhs = ctx.mul(&a, &ctx.add(&b, &c));
        let rhs = ctx.add(&ctx.mul(&a, &b), &ctx.mul(&a, &c));
        prop_assert_eq!(lhs, rhs);
    }
}
