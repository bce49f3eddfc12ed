//! Benchmarks for the value formatter and logger hot path
//!
//! Run with: cargo bench -p openlog-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use openlog_core::{Formatter, Logger, LoggerConfig, Value};

// ============================================================================
// Fixtures
// ============================================================================

fn record(i: i64) -> Value {
    Value::map(vec![
        ("id", Value::from(i)),
        ("name", Value::from(format!("worker-{}", i))),
        ("healthy", Value::from(i % 3 != 0)),
        ("tags", Value::seq(vec!["edge", "eu-west"])),
    ])
}

fn records(n: i64) -> Value {
    Value::seq((0..n).map(record))
}

// ============================================================================
// Formatter Benchmarks
// ============================================================================

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let formatter = Formatter::new(120);

    for n in [1, 10, 100, 1000] {
        let value = records(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &value, |b, value| {
            b.iter(|| black_box(formatter.render(value)))
        });
    }

    group.finish();
}

fn bench_deep_nesting(c: &mut Criterion) {
    let mut value = Value::seq(1..=5);
    for depth in 0..20 {
        value = Value::map(vec![(format!("level{}", depth), value)]);
    }
    let formatter = Formatter::new(80);

    c.bench_function("render_depth_20", |b| {
        b.iter(|| black_box(formatter.render(&value)))
    });
}

// ============================================================================
// Logger Benchmarks
// ============================================================================

fn bench_log_in_memory(c: &mut Criterion) {
    c.bench_function("log_text_in_memory", |b| {
        b.iter_batched(
            || Logger::new(LoggerConfig::new().echo(false).width(80)).unwrap(),
            |mut logger| {
                for i in 0..100 {
                    logger.log(format!("message {}", i)).unwrap();
                }
                black_box(logger.flush_logs(false))
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_render, bench_deep_nesting, bench_log_in_memory);
criterion_main!(benches);
