use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use RustedSymbolic::symbolic::symbolic_engine::Expr;

/// Sum of `n` terms `c_i * x^i * Sinh(y / (i + 1))`.
fn series(n: usize) -> Expr {
    let (x, y) = (Expr::var("x"), Expr::var("y"));
    (0..n)
        .map(|i| {
            (i as f64 + 1.0) * (x.clone() ^ i as f64) * Expr::sinh(y.clone() / (i as f64 + 1.0))
        })
        .reduce(|acc, term| acc + term)
        .unwrap_or_else(Expr::zero)
}

fn bench_compute(c: &mut Criterion) {
    let expr = series(20);
    c.bench_function("compute series(20)", |b| {
        b.iter(|| black_box(&expr).compute_with(&[("x", 0.9), ("y", 1.1)]))
    });
}

fn bench_simplify(c: &mut Criterion) {
    let mut group = c.benchmark_group("simplify derivative");
    for n in [5, 10, 20] {
        let derivative = series(n).derivative("x");
        group.bench_with_input(BenchmarkId::from_parameter(n), &derivative, |b, d| {
            b.iter(|| black_box(d).simplify())
        });
    }
    group.finish();
}

fn bench_diff_multi(c: &mut Criterion) {
    let expr = series(10);
    c.bench_function("diff_multi series(10)", |b| {
        b.iter(|| black_box(&expr).diff_multi())
    });
}

criterion_group!(benches, bench_compute, bench_simplify, bench_diff_multi);
criterion_main!(benches);
