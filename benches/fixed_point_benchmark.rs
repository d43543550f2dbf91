// ============================================================================
// Fixed-Point Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Construction - Quantizing f64 input, wrapping and checked
// 2. Arithmetic - Synthesized operators against native f64
// 3. Accumulation - Dot products over growing slices
// ============================================================================

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fixed_point::prelude::*;
use std::hint::black_box;

// ============================================================================
// Construction Benchmarks
// ============================================================================

fn benchmark_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");

    group.bench_function("from_f64", |b| {
        b.iter(|| Q16_16::from_f64(black_box(1234.5678)))
    });

    group.bench_function("try_from_f64", |b| {
        b.iter(|| Q16_16::try_from_f64(black_box(1234.5678)))
    });

    group.bench_function("from_str", |b| {
        b.iter(|| black_box("1234.5678").parse::<Q16_16>())
    });

    group.finish();
}

// ============================================================================
// Arithmetic Benchmarks
// Same expression evaluated with Q16.16 and f64
// ============================================================================

fn benchmark_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("arithmetic");

    let (fa, fb) = (3.75f64, -1.125f64);
    let (qa, qb) = (Q16_16::from_f64(fa), Q16_16::from_f64(fb));

    group.bench_function("f64_mixed", |b| {
        b.iter(|| {
            let (x, y) = (black_box(fa), black_box(fb));
            (x + y) * (x - y) / y
        })
    });

    group.bench_function("q16_16_mixed", |b| {
        b.iter(|| {
            let (x, y) = (black_box(qa), black_box(qb));
            (x + y) * (x - y) / y
        })
    });

    group.bench_function("q16_16_checked_mixed", |b| {
        b.iter(|| {
            let (x, y) = (black_box(qa), black_box(qb));
            x.checked_add(y)?
                .checked_mul(x.checked_sub(y)?)?
                .checked_div(y)
        })
    });

    group.bench_function("q16_16_shift", |b| {
        b.iter(|| (black_box(qa) << 3) >> 2)
    });

    group.finish();
}

// ============================================================================
// Accumulation Benchmarks
// ============================================================================

fn benchmark_dot_product(c: &mut Criterion) {
    let mut group = c.benchmark_group("dot_product");

    for len in [16, 256, 4096].iter() {
        let floats: Vec<f64> = (0..*len).map(|i| (i % 17) as f64 * 0.125).collect();
        let fixed: Vec<Q32_32> = floats.iter().copied().map(Q32_32::from_f64).collect();

        group.bench_with_input(BenchmarkId::new("f64", len), &floats, |b, v| {
            b.iter(|| v.iter().zip(v.iter()).map(|(x, y)| x * y).sum::<f64>())
        });

        group.bench_with_input(BenchmarkId::new("Q32_32", len), &fixed, |b, v| {
            b.iter(|| v.iter().zip(v.iter()).map(|(&x, &y)| x * y).sum::<Q32_32>())
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_construction,
    benchmark_arithmetic,
    benchmark_dot_product
);
criterion_main!(benches);
