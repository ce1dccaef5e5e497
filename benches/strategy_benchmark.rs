#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for line-drawing strategies and full orchestration cycles.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use trazar::prelude::*;

fn raw_strategy_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("raw_strategy");

    for length in [10, 100, 1_000, 10_000] {
        let line = Line::from_coords(0, 0, length, length / 2);

        group.bench_with_input(
            BenchmarkId::new("bresenham", length),
            &line,
            |b, &line| {
                b.iter(|| {
                    Bresenham.draw(
                        black_box(line),
                        PlotHandle::discard(),
                        Completion::new(|| {}),
                    );
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("dda", length), &line, |b, &line| {
            b.iter(|| {
                Dda.draw(
                    black_box(line),
                    PlotHandle::discard(),
                    Completion::new(|| {}),
                );
            });
        });
    }

    group.finish();
}

fn full_cycle_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_cycle");

    for bench_times in [0u32, 10, 100] {
        group.bench_with_input(
            BenchmarkId::from_parameter(bench_times),
            &bench_times,
            |b, &bench_times| {
                let registry = Rc::new(RefCell::new(StrategyRegistry::with_builtins()));
                let canvas: Rc<RefCell<dyn Canvas>> =
                    Rc::new(RefCell::new(PixelCanvas::new(800, 450).expect("valid dims")));
                let runloop = RunLoop::new();
                let orchestrator = Orchestrator::new(registry, canvas, runloop).config(
                    BenchConfig::new()
                        .bench_times(bench_times)
                        .settle_delay(Duration::ZERO),
                );

                b.iter(|| {
                    orchestrator.run_cycle(black_box(DrawRequest::new(
                        Line::from_coords(5, 5, 700, 400),
                        "Bresenham",
                    )));
                    orchestrator.result()
                });
            },
        );
    }

    group.finish();
}

fn encoding_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoding");

    let request = DrawRequest::new(Line::from_coords(5, 5, 700, 400), "Bresenham");
    let encoded = trazar::encoding::encode(&request);

    group.bench_function("encode", |b| {
        b.iter(|| trazar::encoding::encode(black_box(&request)));
    });
    group.bench_function("decode", |b| {
        b.iter(|| trazar::encoding::decode(black_box(&encoded)).expect("valid encoding"));
    });

    group.finish();
}

criterion_group!(
    benches,
    raw_strategy_benchmark,
    full_cycle_benchmark,
    encoding_benchmark
);
criterion_main!(benches);
