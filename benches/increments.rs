//! Benchmarks for the increment and cost engines.
//!
//! ## Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//!
//! # Run specific benchmark
//! cargo bench -- increment_prefix
//! ```
//!
//! Results are saved to `target/criterion/` with HTML reports.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;
use std::time::Duration;

use lot_pricing::schedule::{Bracket, ExtrapolationPolicy, IncrementSchedule, PremiumSchedule};
use lot_pricing::{calculated_cost, increments, Baseline, CurrencyBook, CurrencyMetadata};

// ============================================================================
// HELPER FUNCTIONS - Deterministic schedules
// ============================================================================

/// A typical six-tier auction increment table.
fn tiered_increments() -> IncrementSchedule {
    IncrementSchedule::new(
        vec![
            Bracket::new(0, 99_999, 2_500),
            Bracket::new(100_000, 399_999, 5_000),
            Bracket::new(400_000, 999_999, 10_000),
            Bracket::new(1_000_000, 1_999_999, 25_000),
            Bracket::new(2_000_000, 4_999_999, 50_000),
            Bracket::new(5_000_000, 3_000_000_000, 100_000),
        ],
        ExtrapolationPolicy::Extrapolate,
    )
    .unwrap()
}

fn tiered_premium() -> PremiumSchedule {
    PremiumSchedule::from_bands(
        &[
            (0, Decimal::new(25, 2)),
            (50_000_000, Decimal::new(20, 2)),
            (300_000_000, Decimal::new(12, 2)),
        ],
        ExtrapolationPolicy::Extrapolate,
    )
    .unwrap()
}

// ============================================================================
// BENCHMARKS
// ============================================================================

fn bench_increment_prefix(c: &mut Criterion) {
    let mut group = c.benchmark_group("increment_prefix");
    group.measurement_time(Duration::from_secs(5));

    let schedule = tiered_increments();
    for count in [20usize, 1_000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("from_asking", count), &count, |b, &count| {
            b.iter(|| {
                increments(&schedule, black_box(Baseline::inclusive(351_000)))
                    .unwrap()
                    .take_prefix(count)
                    .unwrap()
            })
        });
        group.bench_with_input(BenchmarkId::new("large_baseline", count), &count, |b, &count| {
            b.iter(|| {
                increments(&schedule, black_box(Baseline::exclusive(2_400_000_000)))
                    .unwrap()
                    .take_prefix(count)
                    .unwrap()
            })
        });
    }

    group.finish();
}

fn bench_calculated_cost(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculated_cost");

    let schedule = tiered_premium();
    let usd = CurrencyBook::with_defaults().require("USD").unwrap();

    group.bench_function("three_tier", |b| {
        b.iter(|| calculated_cost(black_box(400_000_000), &schedule, usd.clone()).unwrap())
    });
    group.bench_function("display", |b| {
        b.iter(|| {
            let cost = calculated_cost(black_box(1_000_000), &schedule, usd.clone()).unwrap();
            cost.subtotal.display()
        })
    });

    group.finish();
}

criterion_group!(benches, bench_increment_prefix, bench_calculated_cost);
criterion_main!(benches);
