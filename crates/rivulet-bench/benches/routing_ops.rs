//! Criterion benchmarks for whole-basin routing.

use criterion::{criterion_group, criterion_main, Criterion};
use rivulet_bench::reference_basin;
use rivulet_core::RiverId;
use rivulet_routing::{Evaluation, RoutingConfig, RoutingModel};
use std::hint::black_box;

/// Benchmark: bind a model over the reference basin (validation and UHGs).
fn bench_bind_reference(c: &mut Criterion) {
    let basin = reference_basin(42).unwrap();

    c.bench_function("bind_reference_basin", |b| {
        b.iter(|| {
            let model = RoutingModel::new(&basin.network, &basin.cells, basin.axis).unwrap();
            black_box(&model);
        });
    });
}

/// Benchmark: route every river of the reference basin, memoized.
fn bench_outputs_reference(c: &mut Criterion) {
    let basin = reference_basin(42).unwrap();
    let model = RoutingModel::new(&basin.network, &basin.cells, basin.axis).unwrap();

    c.bench_function("outputs_reference_basin", |b| {
        b.iter(|| black_box(model.outputs_m3s().unwrap()));
    });
}

/// Benchmark: outlet discharge of the reference basin, memoized vs recursive.
fn bench_outlet_strategies(c: &mut Criterion) {
    let basin = reference_basin(7).unwrap();
    let mut group = c.benchmark_group("outlet_reference_basin");
    for evaluation in [Evaluation::Memoized, Evaluation::Recursive] {
        let config = RoutingConfig {
            evaluation,
            ..Default::default()
        };
        let model =
            RoutingModel::with_config(&basin.network, &basin.cells, basin.axis, config).unwrap();
        group.bench_function(format!("{evaluation:?}"), |b| {
            b.iter(|| black_box(model.output_m3s(RiverId(1)).unwrap()));
        });
    }
    group.finish();
}

/// Benchmark: outlet discharge with cell contributions on the rayon pool.
#[cfg(feature = "parallel")]
fn bench_outlet_parallel(c: &mut Criterion) {
    let basin = rivulet_bench::stress_basin(42).unwrap();
    let config = RoutingConfig {
        parallel: true,
        ..Default::default()
    };
    let model =
        RoutingModel::with_config(&basin.network, &basin.cells, basin.axis, config).unwrap();

    c.bench_function("outlet_stress_basin_parallel", |b| {
        b.iter(|| black_box(model.output_m3s(RiverId(1)).unwrap()));
    });
}

#[cfg(not(feature = "parallel"))]
criterion_group!(
    benches,
    bench_bind_reference,
    bench_outputs_reference,
    bench_outlet_strategies
);
#[cfg(feature = "parallel")]
criterion_group!(
    benches,
    bench_bind_reference,
    bench_outputs_reference,
    bench_outlet_strategies,
    bench_outlet_parallel
);
criterion_main!(benches);
