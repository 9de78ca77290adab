// Mixed read/write workloads over a skewed key distribution
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use lru_arena::config::LruCacheConfig;
use lru_arena::LruCache;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::num::NonZeroUsize;

// Benchmark configuration
const CACHE_SIZE: usize = 1_000;
const NUM_OPERATIONS: usize = 10_000;

fn make_lru<K: std::hash::Hash + Eq + Clone, V>(cap: usize) -> LruCache<K, V> {
    let config = LruCacheConfig {
        capacity: NonZeroUsize::new(cap).unwrap(),
    };
    LruCache::init(config, None)
}

// Zipf-like samples via inverse transform over a precomputed CDF
fn zipf_sample(n: usize, skew: f64) -> Vec<usize> {
    let mut rng = StdRng::seed_from_u64(42);

    let weights: Vec<f64> = (1..=n).map(|i| 1.0 / (i as f64).powf(skew)).collect();
    let norm: f64 = weights.iter().sum();
    let mut cdf = Vec::with_capacity(n);
    let mut sum = 0.0;
    for w in &weights {
        sum += w / norm;
        cdf.push(sum);
    }

    (0..NUM_OPERATIONS)
        .map(|_| {
            let u: f64 = rng.gen();
            cdf.partition_point(|&p| p < u).min(n - 1)
        })
        .collect()
}

fn benchmark_caches(c: &mut Criterion) {
    let mut group = c.benchmark_group("Cache Mixed Access");

    for skew in [0.5, 0.8, 1.2] {
        let samples = zipf_sample(CACHE_SIZE * 2, skew);

        group.bench_with_input(BenchmarkId::new("lru-arena", skew), &samples, |b, samples| {
            b.iter(|| {
                let mut cache = make_lru(CACHE_SIZE);
                for &idx in samples {
                    // read-through: fill on miss
                    if cache.get(&idx).is_none() {
                        black_box(cache.update(idx, idx));
                    }
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("lru crate", skew), &samples, |b, samples| {
            b.iter(|| {
                let mut cache = lru::LruCache::new(NonZeroUsize::new(CACHE_SIZE).unwrap());
                for &idx in samples {
                    if cache.get(&idx).is_none() {
                        black_box(cache.push(idx, idx));
                    }
                }
            });
        });
    }

    let samples = zipf_sample(CACHE_SIZE * 2, 0.8);
    group.bench_function("lru-arena 25% writes", |b| {
        b.iter(|| {
            let mut cache = make_lru(CACHE_SIZE);
            for &idx in &samples {
                if idx % 4 == 0 {
                    // 25% updates
                    black_box(cache.update(idx, idx));
                } else {
                    // 75% gets
                    black_box(cache.get(&idx));
                }
            }
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_caches);
criterion_main!(benches);
