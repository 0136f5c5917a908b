use criterion::{criterion_group, criterion_main, Criterion};
use ntk_core::RngHandle;
use ntk_nmod::{NmodCtx, NmodPoly};

fn bench_poly_mul(c: &mut Criterion) {
    let ctx = NmodCtx::new(1_000_000_007).unwrap();
    let mut rng = RngHandle::from_seed(5);
    let a = NmodPoly::randtest(ctx, &mut rng, 256);
    let b = NmodPoly::randtest(ctx, &mut rng, 256);
    let mut group = c.benchmark_group("nmod_poly_mul_256");
    group.bench_function("schoolbook", |bench| {
        bench.iter(|| {
            let _ = a.mul(&b);
        })
    });
    group.bench_function("karatsuba", |bench| {
        bench.iter(|| {
            let _ = a.mul_karatsuba(&b);
        })
    });
    group.finish();
}

criterion_group!(benches, bench_poly_mul);
criterion_main!(benches);
