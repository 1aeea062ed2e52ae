use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use dynvar::dispatch::{self, operator::OperatorKind, registry::DispatchRegistry};
use dynvar::runtime::{batch, generic_value::GenericValue};

fn bench_bootstrap(c: &mut Criterion) {
    c.bench_function("registry/bootstrap", |b| {
        b.iter(|| black_box(DispatchRegistry::bootstrap()));
    });
}

fn bench_single_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch/single");
    dispatch::init();

    let cases = [
        ("i32+i32", OperatorKind::Add, GenericValue::new(5i32), GenericValue::new(3i32)),
        ("u8*f64", OperatorKind::Mul, GenericValue::new(7u8), GenericValue::new(1.5f64)),
        ("i64^u16", OperatorKind::BitXor, GenericValue::new(-9i64), GenericValue::new(0xffu16)),
    ];
    for (name, op, lhs, rhs) in &cases {
        group.bench_function(*name, |b| {
            b.iter(|| black_box(lhs.apply(*op, rhs).unwrap()));
        });
    }

    group.finish();
}

fn bench_elementwise(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch/elementwise");
    let registry = DispatchRegistry::bootstrap();

    for &size in &[100, 1_000, 10_000] {
        let lhs: Vec<GenericValue> = (0..size as i64).map(GenericValue::new).collect();
        let rhs: Vec<GenericValue> = (0..size as u32).map(GenericValue::new).collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("parallel", size), &size, |b, _| {
            b.iter(|| {
                black_box(
                    batch::apply_elementwise(&registry, OperatorKind::Add, &lhs, &rhs).unwrap(),
                );
            });
        });
        group.bench_with_input(BenchmarkId::new("sequential", size), &size, |b, _| {
            b.iter(|| {
                for (l, r) in lhs.iter().zip(&rhs) {
                    black_box(l.apply_in(&registry, OperatorKind::Add, r).unwrap());
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_bootstrap, bench_single_dispatch, bench_elementwise);
criterion_main!(benches);
