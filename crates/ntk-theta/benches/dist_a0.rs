use criterion::{criterion_group, criterion_main, Criterion};
use ntk_ball::{Acb, AcbMat};
use ntk_theta::{dist_a0_with, ThetaOpts};

fn build_tau(g: usize) -> AcbMat {
    AcbMat::from_fn(g, g, |i, j| {
        if i == j {
            Acb::from_f64s(0.0, 1.0 + 0.25 * i as f64)
        } else {
            Acb::from_f64s(0.125, 0.0625)
        }
    })
}

fn bench_dist_a0(c: &mut Criterion) {
    let mut group = c.benchmark_group("dist_a0");
    for g in [2usize, 4, 6] {
        let tau = build_tau(g);
        let z: Vec<Acb> = (0..g).map(|k| Acb::from_f64s(0.0, 0.1 * k as f64)).collect();
        group.bench_function(format!("g{g}_seq"), |b| {
            b.iter(|| {
                let _ = dist_a0_with(&z, &tau, &ThetaOpts::default()).unwrap();
            })
        });
        let opts = ThetaOpts {
            concurrency: 4,
            ..ThetaOpts::default()
        };
        group.bench_function(format!("g{g}_par4"), |b| {
            b.iter(|| {
                let _ = dist_a0_with(&z, &tau, &opts).unwrap();
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_dist_a0);
criterion_main!(benches);
