// Criterion benchmarks for the matching core

use bloodlink::{classify, compatible_donor_types, partition_by_proximity, BloodType, Donor};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn create_donor(id: usize, location: &str) -> Donor {
    Donor {
        id: id as i64,
        name: format!("Donor {id}"),
        blood_type: if id % 2 == 0 {
            BloodType::OPos
        } else {
            BloodType::ONeg
        },
        email: format!("donor{id}@example.com"),
        phone: format!("+91{id:010}"),
        location: location.to_string(),
        created_at: chrono::Utc::now(),
    }
}

fn bench_compatibility_lookup(c: &mut Criterion) {
    c.bench_function("compatible_donor_types", |b| {
        b.iter(|| compatible_donor_types(black_box(BloodType::ABPos)));
    });
}

fn bench_classify(c: &mut Criterion) {
    c.bench_function("classify_nearby", |b| {
        b.iter(|| classify(black_box("Mumbai"), black_box("Mumbai Central")));
    });
}

fn bench_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition_by_proximity");
    for size in [100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || {
                    (0..size)
                        .map(|i| {
                            let location = if i % 3 == 0 { "Mumbai" } else { "Delhi" };
                            create_donor(i, location)
                        })
                        .collect::<Vec<_>>()
                },
                |donors| partition_by_proximity(donors, black_box("Mumbai")),
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_compatibility_lookup,
    bench_classify,
    bench_partition
);
criterion_main!(benches);
