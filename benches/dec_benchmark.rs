// ============================================================================
// Decimal Benchmarks
// ============================================================================
//
// Benchmark Categories:
// 1. Arithmetic - Rounded multiply and divide at several magnitudes
// 2. Roots and Powers - Newton iteration and repeated squaring
// 3. Encodings - Canonical string, parse, sortable key bytes
// 4. Ranking - Stake index updates and scans over an in-memory store
// ============================================================================

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use ledger_dec::prelude::*;
use std::hint::black_box;

fn operands() -> Vec<(&'static str, Dec, Dec)> {
    vec![
        ("small", "1.5".parse().unwrap(), "0.25".parse().unwrap()),
        (
            "fractional",
            "3.141592653589793238".parse().unwrap(),
            "2.718281828459045235".parse().unwrap(),
        ),
        (
            "large",
            "123456789012345678901234.5".parse().unwrap(),
            "98765.4321".parse().unwrap(),
        ),
    ]
}

// ============================================================================
// Arithmetic
// ============================================================================

fn benchmark_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("arithmetic");

    for (name, a, b) in operands() {
        group.bench_with_input(BenchmarkId::new("add", name), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| black_box(*a + *b));
        });
        group.bench_with_input(BenchmarkId::new("mul", name), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| black_box(*a * *b));
        });
        group.bench_with_input(BenchmarkId::new("quo", name), &(&a, &b), |bench, (a, b)| {
            bench.iter(|| black_box(a.quo(b)));
        });
        group.bench_with_input(
            BenchmarkId::new("quo_round_up", name),
            &(&a, &b),
            |bench, (a, b)| {
                bench.iter(|| black_box(a.quo_round_up(b)));
            },
        );
    }

    group.finish();
}

// ============================================================================
// Roots and Powers
// ============================================================================

fn benchmark_roots(c: &mut Criterion) {
    let mut group = c.benchmark_group("roots");

    let two = Dec::new(2);
    group.bench_function("approx_sqrt_2", |b| {
        b.iter(|| black_box(two.approx_sqrt()));
    });

    let rate: Dec = "1.005".parse().unwrap();
    group.bench_function("approx_root_per_second_rate", |b| {
        b.iter(|| black_box(rate.approx_root(31536000)));
    });

    // hits the iteration cap
    let tiny: Dec = "0.00000001".parse().unwrap();
    group.bench_function("approx_root_capped", |b| {
        b.iter(|| black_box(tiny.approx_root(3)));
    });

    for exponent in [2u64, 10, 64].iter() {
        let base: Dec = "1.0001".parse().unwrap();
        group.bench_with_input(BenchmarkId::new("power", exponent), exponent, |b, e| {
            b.iter(|| black_box(base.power(*e)));
        });
    }

    group.finish();
}

// ============================================================================
// Encodings
// ============================================================================

fn benchmark_encodings(c: &mut Criterion) {
    let mut group = c.benchmark_group("encodings");

    let value: Dec = "-12345.678901234567890123".parse().unwrap();
    let text = value.to_string();
    let sortable = value.to_sortable_bytes();

    group.bench_function("to_string", |b| b.iter(|| black_box(value.to_string())));
    group.bench_function("parse", |b| b.iter(|| black_box(text.parse::<Dec>())));
    group.bench_function("to_sortable_bytes", |b| {
        b.iter(|| black_box(value.to_sortable_bytes()))
    });
    group.bench_function("from_sortable_bytes", |b| {
        b.iter(|| black_box(Dec::from_sortable_bytes(&sortable)))
    });

    group.finish();
}

// ============================================================================
// Ranking
// ============================================================================

fn populated_ranking(size: usize) -> StakeRanking<MemStore> {
    let mut ranking = StakeRanking::new(MemStore::new(), IndexConfig::new(b"stake".to_vec()))
        .expect("valid index config");
    for i in 0..size {
        let stake = Dec::with_prec((i as i64 * 7919) % 100_000, 2);
        ranking
            .set_stake(format!("acct{:06}", i).as_bytes(), &stake)
            .expect("stake fits");
    }
    ranking
}

fn benchmark_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");

    for size in [100usize, 1000].iter() {
        group.bench_with_input(BenchmarkId::new("set_stake", size), size, |b, &size| {
            b.iter_batched(
                || populated_ranking(size),
                |mut ranking| {
                    ranking
                        .set_stake(b"acct000001", &Dec::new(42))
                        .expect("stake fits");
                    black_box(ranking)
                },
                BatchSize::SmallInput,
            );
        });

        let ranking = populated_ranking(*size);
        group.bench_with_input(BenchmarkId::new("top_10", size), &ranking, |b, ranking| {
            b.iter(|| black_box(ranking.top(10)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_arithmetic,
    benchmark_roots,
    benchmark_encodings,
    benchmark_ranking
);
criterion_main!(benches);
