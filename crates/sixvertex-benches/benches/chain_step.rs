#![allow(missing_docs)]
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sixvertex_core::{Chain, Config, InitialState, Weights};

fn build_chain(n: usize) -> Chain {
    let cfg = Config {
        n,
        initial_state: InitialState::High,
        weights: Weights::uniform(),
        seed: 7777,
        steps_per_batch: 1000,
    };
    Chain::new(&cfg)
}

fn bench_chain_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_step");
    for &n in &[8usize, 32, 128] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut chain = build_chain(n);
            b.iter(|| {
                chain.step().expect("step should not fail under uniform weights");
                criterion::black_box(chain.get_height());
            });
        });
    }
    group.finish();
}

fn bench_chain_run_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_run_batch");
    for &n in &[8usize, 32, 128] {
        group.throughput(Throughput::Elements(1000));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut chain = build_chain(n);
            b.iter(|| {
                chain.run(1000).expect("batch should not fail under uniform weights");
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_chain_step, bench_chain_run_batch);
criterion_main!(benches);
