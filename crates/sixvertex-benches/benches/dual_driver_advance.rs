#![allow(missing_docs)]
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sixvertex_core::{DualDriver, Weights};

fn bench_dual_driver_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("dual_driver_advance");
    for &n in &[8usize, 16, 32] {
        group.throughput(Throughput::Elements(200));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            let mut driver = DualDriver::new_high_low(n, Weights::uniform(), 111, 222, 100);
            b.iter(|| {
                driver.advance(200).expect("advance should not fail under uniform weights");
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_dual_driver_advance);
criterion_main!(benches);
