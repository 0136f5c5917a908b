use ntk_core::RngHandle;
use ntk_fq::{FqZech, FqZechCtx};

#[test]
fn negation_is_consistent_under_aliasing() {
    for field in 0..10 {
        let mut rng = RngHandle::from_substream(2013, field);
        let ctx = FqZechCtx::randtest(&mut rng).unwrap();
        for _ in 0..200 {
            let a = FqZech::randtest(&ctx, &mut rng);
            let mut b = a;
            let c = ctx.neg(&b);
            b = ctx.neg(&b);
            assert!(ctx.equal(&b, &c), "p={} d={} a={:?}", ctx.prime(), ctx.degree(), a);
        }
    }
}

#[test]
fn subtraction_is_addition_of_the_negation() {
    for field in 0..10 {
        let mut rng = RngHandle::from_substream(2014, field);
        let ctx = FqZechCtx::randtest(&mut rng).unwrap();
        for _ in 0..2000 {
            let a = FqZech::randtest(&ctx, &mut rng);
            let b = FqZech::randtest(&ctx, &mut rng);
            let c1 = ctx.sub(&a, &b);
            let c2 = ctx.add(&a, &ctx.neg(&b));
            assert!(ctx.equal(&c1, &c2));
        }
    }
}

#[test]
fn negation_is_an_involution_summing_to_zero() {
    for field in 0..10 {
        let mut rng = RngHandle::from_substream(7, field);
        let ctx = FqZechCtx::randtest(&mut rng).unwrap();
        for _ in 0..100 {
            let a = FqZech::randtest(&ctx, &mut rng);
            assert_eq!(ctx.neg(&ctx.neg(&a)), a);
            assert!(ctx.is_zero(&ctx.add(&a, &ctx.neg(&a))));
        }
    }
}
