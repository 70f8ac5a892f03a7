use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gamma_bootstrap::statistics::bootstrap_row;
use gamma_bootstrap::Method;
use rand::SeedableRng;
use rand_distr::{Distribution, Gamma};
use rand_xoshiro::Xoshiro256PlusPlus;

fn reference(n: usize) -> Vec<f64> {
    let dist = Gamma::new(2.0, 3.0).unwrap();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
    (0..n).map(|_| dist.sample(&mut rng)).collect()
}

fn bench_estimators(c: &mut Criterion) {
    let data = reference(10_000);
    let mut group = c.benchmark_group("estimate");
    for method in Method::ALL {
        group.bench_function(method.name(), |b| {
            b.iter(|| black_box(method.estimate(black_box(&data)).unwrap()));
        });
    }
    group.finish();
}

fn bench_bootstrap(c: &mut Criterion) {
    let data = reference(100_000);
    let mut group = c.benchmark_group("bootstrap_row");
    // A single MLLH row at n = 10,000 takes a noticeable fraction of a second
    group.sample_size(10);
    for method in Method::ALL {
        let truth = method.estimate(&data).unwrap();
        let estimator = |s: &[f64]| method.estimate(s);
        for n in [1_000usize, 10_000] {
            group.bench_with_input(BenchmarkId::new(method.name(), n), &n, |b, &n| {
                b.iter(|| black_box(bootstrap_row(&data, n, &estimator, truth, 100, 42).unwrap()));
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_estimators, bench_bootstrap);
criterion_main!(benches);
