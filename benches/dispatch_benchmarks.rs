use chain_dispatch::catalog::builtin_kinds;
use chain_dispatch::chain::ChainAssembler;
use chain_dispatch::constants::DEFAULT_ITEMS;
use chain_dispatch::dispatcher::Dispatcher;
use chain_dispatch::handler::HandlerKind;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;

fn wide_ring_kinds(size: usize) -> Vec<HandlerKind> {
    (0..size)
        .map(|i| HandlerKind::new(format!("Handler{i}"), [format!("Item{i}")]))
        .collect()
}

fn benchmark_ring_assembly(c: &mut Criterion) {
    let kinds = builtin_kinds();
    c.bench_function("ring_assembly_builtin", |b| {
        b.iter(|| ChainAssembler::build(black_box(&kinds)))
    });
}

fn benchmark_builtin_dispatch(c: &mut Criterion) {
    let dispatcher = Dispatcher::new(Arc::new(
        ChainAssembler::build(&builtin_kinds()).expect("builtin ring"),
    ));
    c.bench_function("dispatch_default_items", |b| {
        b.iter(|| dispatcher.dispatch(black_box(DEFAULT_ITEMS)))
    });
}

fn benchmark_miss_by_ring_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch_miss");
    for size in [4, 16, 64, 256] {
        let ring = ChainAssembler::build(&wide_ring_kinds(size)).expect("ring");
        let dispatcher = Dispatcher::new(Arc::new(ring));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| dispatcher.dispatch_item(black_box("Nothing")))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_ring_assembly,
    benchmark_builtin_dispatch,
    benchmark_miss_by_ring_size
);
criterion_main!(benches);
