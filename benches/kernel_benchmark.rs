/*!
 * Kernel Benchmarks
 *
 * Hot paths: create/destroy churn, request/release handoff, timeout rotation
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use resman_kernel::Kernel;

fn bench_create_destroy(c: &mut Criterion) {
    let mut group = c.benchmark_group("create_destroy");

    for children in [1usize, 8, 15] {
        group.bench_with_input(
            BenchmarkId::from_parameter(children),
            &children,
            |b, &children| {
                let mut kernel = Kernel::default();
                b.iter(|| {
                    // One top process owning a chain of children
                    let top = kernel.create_process(2).unwrap();
                    for _ in 1..children {
                        kernel.create_process(1).unwrap();
                    }
                    black_box(kernel.destroy_process(top).unwrap());
                });
            },
        );
    }

    group.finish();
}

fn bench_request_release_handoff(c: &mut Criterion) {
    c.bench_function("request_release_handoff", |b| {
        let mut kernel = Kernel::default();
        let holder = kernel.create_process(1).unwrap();
        let waiter = kernel.create_process(1).unwrap();

        b.iter(|| {
            kernel.request_resource(holder, 0, 1).unwrap();
            kernel.request_resource(waiter, 0, 1).unwrap();
            kernel.release_resource(holder, 0, 1).unwrap();
            black_box(kernel.release_resource(waiter, 0, 1).unwrap());
        });
    });
}

fn bench_timeout(c: &mut Criterion) {
    c.bench_function("timeout_rotation", |b| {
        let mut kernel = Kernel::default();
        for _ in 0..15 {
            kernel.create_process(1).unwrap();
        }
        b.iter(|| black_box(kernel.timeout()));
    });
}

fn bench_snapshot(c: &mut Criterion) {
    c.bench_function("snapshot", |b| {
        let mut kernel = Kernel::default();
        for _ in 0..15 {
            kernel.create_process(2).unwrap();
        }
        b.iter(|| black_box(kernel.snapshot()));
    });
}

criterion_group!(
    benches,
    bench_create_destroy,
    bench_request_release_handoff,
    bench_timeout,
    bench_snapshot
);
criterion_main!(benches);
