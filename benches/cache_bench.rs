//! Cache benchmarks
//!
//! Run with: cargo bench --bench cache_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use diskcache::{Cache, CacheConfig, LockStrategy};
use rand::distributions::Alphanumeric;
use rand::Rng;
use tempfile::TempDir;

fn random_key() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

fn bench_put(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_put");

    for size in [64usize, 1024, 16 * 1024].iter() {
        for (label, strategy) in [
            ("per_key", LockStrategy::PerKey),
            ("global", LockStrategy::Global),
        ] {
            group.bench_with_input(
                BenchmarkId::new(label, size),
                size,
                |b, &size| {
                    let temp_dir = TempDir::new().unwrap();
                    let cache = Cache::builder()
                        .directory(temp_dir.path().join("cache"))
                        .lock_strategy(strategy)
                        .build()
                        .unwrap();
                    let data = vec![0u8; size];

                    b.iter(|| {
                        let key = random_key();
                        cache.put(black_box(&key), black_box(&data)).unwrap();
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_get");

    for size in [64usize, 1024, 16 * 1024].iter() {
        group.bench_with_input(BenchmarkId::new("hit", size), size, |b, &size| {
            let temp_dir = TempDir::new().unwrap();
            let cache = Cache::new(CacheConfig::new(temp_dir.path().join("cache"))).unwrap();
            let key = random_key();
            cache.put(&key, &vec![0u8; size]).unwrap();

            b.iter(|| {
                black_box(cache.get(black_box(&key)));
            });
        });
    }

    group.bench_function("miss", |b| {
        let temp_dir = TempDir::new().unwrap();
        let cache = Cache::new(CacheConfig::new(temp_dir.path().join("cache"))).unwrap();

        b.iter(|| {
            black_box(cache.get(black_box("absent key")));
        });
    });

    group.finish();
}

criterion_group!(benches, bench_put, bench_get);
criterion_main!(benches);
