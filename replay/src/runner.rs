//! Replay runner
//!
//! Drives an [`LruCache`] with a trace as a read-through cache: every request
//! is a `get`, and a miss is filled with `update`. When verification is on,
//! the same requests go to `lru::LruCache` and every disagreement about hit
//! or miss is counted as a divergence. Both caches implement the same policy,
//! so any divergence points at a bug.

use crate::error::ReplayError;
use crate::input::TraceReader;
use crate::models::{ReplayConfig, ReplayResult, ReplayStats, Request};
use lru_arena::{CacheMetrics, LruCache};
use std::collections::HashSet;
use std::time::Instant;

/// Runs a trace through the cache and collects statistics.
#[derive(Debug)]
pub struct ReplayRunner {
    config: ReplayConfig,
}

impl ReplayRunner {
    /// Create a new replay runner
    pub fn new(config: ReplayConfig) -> Self {
        Self { config }
    }

    /// Replay the configured trace file
    pub fn run(&self) -> Result<ReplayResult, ReplayError> {
        // Validate the capacity before touching the input
        let cache = LruCache::try_new(self.config.capacity)?;
        let reader = TraceReader::from_path(&self.config.input)?;
        self.replay_into(cache, reader)
    }

    /// Replay an already opened stream of requests
    pub fn replay<I>(&self, requests: I) -> Result<ReplayResult, ReplayError>
    where
        I: IntoIterator<Item = Result<Request, ReplayError>>,
    {
        let cache = LruCache::try_new(self.config.capacity)?;
        self.replay_into(cache, requests)
    }

    fn replay_into<I>(
        &self,
        mut cache: LruCache<String, u64>,
        requests: I,
    ) -> Result<ReplayResult, ReplayError>
    where
        I: IntoIterator<Item = Result<Request, ReplayError>>,
    {
        let mut reference = if self.config.verify {
            Some(lru::LruCache::new(cache.cap()))
        } else {
            None
        };

        let mut stats = ReplayStats::new();
        let mut unique_keys = HashSet::new();
        let start = Instant::now();

        for request in requests {
            let Request { key, value } = request?;

            let get_start = Instant::now();
            let hit = cache.get(&key).is_some();
            stats.get_latency.record(elapsed_ns(get_start));

            if let Some(reference) = reference.as_mut() {
                let reference_hit = reference.get(&key).is_some();
                if reference_hit != hit {
                    stats.divergences += 1;
                }
                if !reference_hit {
                    reference.push(key.clone(), value);
                }
            }

            if hit {
                stats.hits += 1;
            } else {
                stats.misses += 1;
                // the first request for any key is a miss
                unique_keys.insert(key.clone());
                let update_start = Instant::now();
                if cache.update(key, value).is_some() {
                    stats.evictions += 1;
                }
                stats.update_latency.record(elapsed_ns(update_start));
            }

            if stats.requests() % 10_000_000 == 0 {
                println!("  Replayed {} million requests...", stats.requests() / 1_000_000);
            }
        }

        if let Some(reference) = reference.as_ref() {
            let ours: Vec<&String> = cache.iter().map(|(k, _)| k).collect();
            let theirs: Vec<&String> = reference.iter().map(|(k, _)| k).collect();
            if ours != theirs {
                stats.divergences += 1;
            }
        }

        Ok(ReplayResult {
            metrics: cache.metrics(),
            unique_keys: unique_keys.len(),
            final_len: cache.len(),
            capacity: cache.cap().get(),
            verified: reference.is_some(),
            duration: start.elapsed(),
            stats,
        })
    }
}

fn elapsed_ns(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{TraceConfig, TraceGenerator};
    use std::path::PathBuf;

    fn config(capacity: usize, verify: bool) -> ReplayConfig {
        ReplayConfig {
            input: PathBuf::from("unused.csv"),
            capacity,
            verify,
        }
    }

    fn requests(keys: &[&str]) -> Vec<Result<Request, ReplayError>> {
        keys.iter()
            .enumerate()
            .map(|(i, k)| Ok(Request::new(*k, i as u64)))
            .collect()
    }

    #[test]
    fn test_read_through_counts_hits_and_misses() {
        let runner = ReplayRunner::new(config(2, true));
        let result = runner
            .replay(requests(&["a", "b", "a", "c", "b", "a"]))
            .unwrap();

        // a miss, b miss, a hit, c miss (evicts b), b miss (evicts a), a miss (evicts c)
        assert_eq!(result.stats.hits, 1);
        assert_eq!(result.stats.misses, 5);
        assert_eq!(result.stats.evictions, 3);
        assert_eq!(result.stats.divergences, 0);
        assert_eq!(result.unique_keys, 3);
        assert_eq!(result.final_len, 2);
        assert_eq!(result.metrics.get("evictions"), Some(&3.0));
        assert_eq!(result.metrics.get("cache_hits"), Some(&1.0));
    }

    #[test]
    fn test_generated_trace_agrees_with_reference() {
        let mut buffer = Vec::new();
        TraceGenerator::new(TraceConfig {
            requests: 20_000,
            unique_keys: 500,
            hot_keys: 50,
            hot_percent: 70,
            seed: 9,
            ..TraceConfig::default()
        })
        .write_to(&mut buffer)
        .unwrap();

        let reader = TraceReader::from_reader(buffer.as_slice()).unwrap();
        let result = ReplayRunner::new(config(100, true)).replay(reader).unwrap();
        assert_eq!(result.stats.requests(), 20_000);
        assert_eq!(result.stats.divergences, 0);
        assert!(result.stats.hits > 0);
        assert!(result.verified);
    }

    #[test]
    fn test_zero_capacity_is_a_cache_error() {
        let err = ReplayRunner::new(config(0, false))
            .replay(requests(&["a"]))
            .unwrap_err();
        assert!(matches!(
            err,
            ReplayError::Cache(lru_arena::Error::InvalidCapacity(0))
        ));
    }

    #[test]
    fn test_parse_error_stops_the_replay() {
        let mut input = requests(&["a", "b"]);
        input.push(Err(ReplayError::Parse {
            line: 4,
            reason: "empty key".to_string(),
        }));
        let err = ReplayRunner::new(config(4, false)).replay(input).unwrap_err();
        assert!(matches!(err, ReplayError::Parse { line: 4, .. }));
    }

    #[test]
    fn test_without_verification() {
        let result = ReplayRunner::new(config(8, false))
            .replay(requests(&["x", "x", "x"]))
            .unwrap();
        assert!(!result.verified);
        assert_eq!(result.stats.hits, 2);
        assert_eq!(result.stats.divergences, 0);
    }
}
