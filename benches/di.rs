use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ferrous_ioc::*;
use std::sync::Arc;

// ===== Micro Benchmarks =====

fn bench_singleton_hit(c: &mut Criterion) {
    let container = Container::new();
    container.singleton("answer", Recipe::resolver(|_| Ok(42u64)));

    // Prime the singleton
    let _ = container.get::<u64>("answer").unwrap();

    c.bench_function("singleton_hit_u64", |b| {
        b.iter(|| {
            let v = container.get::<u64>("answer").unwrap();
            black_box(v);
        })
    });
}

fn bench_singleton_cold(c: &mut Criterion) {
    struct ExpensiveToCreate {
        data: Vec<u64>,
    }

    c.bench_function("singleton_cold_expensive", |b| {
        b.iter_batched(
            || {
                let container = Container::new();
                container.singleton(
                    "expensive",
                    Recipe::resolver(|_| Ok(ExpensiveToCreate { data: (0..1000).collect() })),
                );
                container
            },
            |container| {
                let v = container.get::<ExpensiveToCreate>("expensive").unwrap();
                black_box(v.data.len());
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

fn bench_identifier_casing(c: &mut Criterion) {
    let mut group = c.benchmark_group("identifier_casing");
    let container = Container::new();
    container.bind("config.database.url", Recipe::value("postgres://localhost"), false);

    group.bench_function("lowercase", |b| {
        b.iter(|| black_box(container.resolve("config.database.url").unwrap()))
    });
    group.bench_function("mixed_case", |b| {
        b.iter(|| black_box(container.resolve("Config.Database.URL").unwrap()))
    });

    group.finish();
}

fn bench_catalog_build(c: &mut Criterion) {
    #[derive(Default)]
    struct Leaf;
    struct Branch {
        _leaf: Arc<Leaf>,
    }

    impl Injectable for Branch {
        fn constructor() -> Option<Vec<Parameter>> {
            Some(vec![Parameter::typed::<Leaf>("leaf")])
        }

        fn construct(mut args: Arguments) -> DiResult<Self> {
            Ok(Branch { _leaf: args.next()? })
        }
    }

    let mut group = c.benchmark_group("catalog_build");
    let container = Container::new();
    container.register_type(TypeDescriptor::with_default::<Leaf>());
    container.register::<Branch>();

    group.bench_function("default_constructed", |b| {
        b.iter(|| black_box(container.make::<Leaf>().unwrap()))
    });
    group.bench_function("one_dependency", |b| {
        b.iter(|| black_box(container.make::<Branch>().unwrap()))
    });

    group.finish();
}

fn bench_resolution_chain_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolution_chain");

    for &depth in &[1usize, 8, 64] {
        let container = Container::new();
        container.bind("link0", Recipe::value(0u64), false);
        for i in 1..=depth {
            let previous = format!("link{}", i - 1);
            container.bind(
                format!("link{}", i),
                Recipe::resolver(move |c| Ok(*c.get::<u64>(&previous)? + 1)),
                false,
            );
        }
        let top = format!("link{}", depth);

        group.bench_with_input(BenchmarkId::new("transient_chain", depth), &depth, |b, _| {
            b.iter(|| black_box(container.get::<u64>(&top).unwrap()))
        });
    }

    group.finish();
}

fn bench_contention(c: &mut Criterion) {
    let mut group = c.benchmark_group("contention");

    let container = Container::new();
    container.singleton("answer", Recipe::resolver(|_| Ok(42u64)));

    // Prime the singleton
    let _ = container.get::<u64>("answer").unwrap();

    for &thread_count in &[1, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::new("singleton_threads", thread_count),
            &thread_count,
            |b, &threads| {
                b.iter_custom(|iters| {
                    let start = std::time::Instant::now();
                    crossbeam_utils::thread::scope(|s| {
                        for _ in 0..threads {
                            let container_ref = &container;
                            s.spawn(move |_| {
                                for _ in 0..iters / threads as u64 {
                                    let v = container_ref.get::<u64>("answer").unwrap();
                                    black_box(v);
                                }
                            });
                        }
                    })
                    .unwrap();
                    start.elapsed()
                })
            },
        );
    }

    group.finish();
}

// ===== Macro Benchmarks =====

fn bench_large_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_table");

    for &binding_count in &[10, 100, 1000] {
        let container = Container::new();
        container.singleton("baseline", Recipe::value(42u64));
        for i in 0..binding_count {
            container.bind(format!("service.{}", i), Recipe::value(i as u32), false);
        }

        group.bench_with_input(
            BenchmarkId::new("resolve_from_large_table", binding_count),
            &binding_count,
            |b, _| {
                b.iter(|| {
                    let v = container.get::<u64>("baseline").unwrap();
                    black_box(v);
                })
            },
        );
    }

    group.finish();
}

fn bench_mixed_workload(c: &mut Criterion) {
    // 70% singleton hits, 20% literal values, 10% transient
    struct SingletonService(u64);
    struct TransientService(u64);

    let container = Container::new();
    container.singleton("singleton", Recipe::resolver(|_| Ok(SingletonService(1))));
    container.bind("value", Recipe::value(2u64), false);
    container.bind("transient", Recipe::resolver(|_| Ok(TransientService(3))), false);

    // Prime services
    let _ = container.get::<SingletonService>("singleton").unwrap();

    c.bench_function("mixed_workload_realistic", |b| {
        b.iter(|| {
            for _ in 0..7 {
                let v = container.get::<SingletonService>("singleton").unwrap();
                black_box(v.0);
            }

            for _ in 0..2 {
                let v = container.get::<u64>("value").unwrap();
                black_box(*v);
            }

            let v = container.get::<TransientService>("transient").unwrap();
            black_box(v.0);
        })
    });
}

criterion_group!(
    micro_benches,
    bench_singleton_hit,
    bench_singleton_cold,
    bench_identifier_casing,
    bench_catalog_build,
    bench_resolution_chain_depth,
    bench_contention
);

criterion_group!(macro_benches, bench_large_table, bench_mixed_workload);

criterion_main!(micro_benches, macro_benches);
