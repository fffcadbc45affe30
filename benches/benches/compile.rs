//! Benchmark hydration program compilation time.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use benches::context;
use hydrant::{Compiler, Options};

criterion_main! { benches }
criterion_group! { benches, bench_compile, bench_options, bench_to_json }

/// Benchmarks the time taken to compile templates of increasing size.
fn bench_compile(c: &mut Criterion) {
    let mut g = c.benchmark_group("compile");
    let compiler = Compiler::new();
    for n in [10, 100, 1000] {
        let template = context::random(n);
        g.bench_with_input(BenchmarkId::from_parameter(n), &template, |b, t| {
            b.iter(|| compiler.compile(t).unwrap());
        });
    }
}

/// Benchmarks compilation with every repair and eager caching disabled.
fn bench_options(c: &mut Criterion) {
    let options = Options::builder()
        .repair_blank_text(false)
        .repair_checked(false)
        .cache_threshold(u32::MAX)
        .build();
    let compiler = Compiler::with_options(options);
    let template = context::random(100);
    c.bench_function("compile_without_repairs", |b| {
        b.iter(|| compiler.compile(&template).unwrap());
    });
}

/// Benchmarks the time taken to serialize a compiled program as JSON.
fn bench_to_json(c: &mut Criterion) {
    let program = hydrant::compile(&context::random(100)).unwrap();
    c.bench_function("to_json", |b| {
        b.iter(|| serde_json::to_string(&program).unwrap());
    });
}
