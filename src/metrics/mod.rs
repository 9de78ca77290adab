//! Cache Metrics System
//!
//! Provides BTreeMap-based metrics reporting for the cache. The cache keeps
//! its own counters and exposes them through the [`CacheMetrics`] trait, so a
//! caller can log, export or compare them without knowing the cache type.
//!
//! # Why BTreeMap over HashMap?
//!
//! - **Deterministic ordering**: Metrics always appear in consistent order
//! - **Reproducible output**: Replay reports and tests compare cleanly
//! - **Better debugging**: Consistent output makes logs more readable
//!
//! The lookup cost difference is irrelevant for a dozen metric keys.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod lru;

pub use lru::LruCacheMetrics;

/// Counters shared by every cache algorithm.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Total number of lookups (`get` / `get_mut`) made to the cache
    pub requests: u64,

    /// Number of lookups that found their key
    pub cache_hits: u64,

    /// Number of updates that introduced a new key
    pub insertions: u64,

    /// Number of updates that overwrote the value of an existing key
    pub updates: u64,

    /// Number of entries evicted because the cache overflowed
    pub evictions: u64,
}

impl CoreCacheMetrics {
    /// Creates a zeroed set of counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a lookup that found its key.
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a lookup that did not find its key.
    ///
    /// Misses are derived as `requests - cache_hits`.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records an update that added a new entry.
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Records an update that replaced the value of an existing entry.
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Records the eviction of one entry.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Number of lookups that missed.
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Calculates the hit rate
    ///
    /// # Returns
    /// A value between 0.0 and 1.0, or 0.0 if no requests have been made
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Calculates the miss rate
    ///
    /// # Returns
    /// A value between 0.0 and 1.0, or 0.0 if no requests have been made
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Convert core metrics to BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        // Basic counters
        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("updates".to_string(), self.updates as f64);

        // Rates (0.0 to 1.0)
        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        // Derived metrics
        let writes = self.insertions + self.updates;
        if writes > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / writes as f64,
            );
        }

        metrics
    }
}

/// Trait that cache algorithms implement for metrics reporting
///
/// The trait uses BTreeMap to ensure deterministic ordering of metrics, which
/// keeps reports and test assertions stable.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs in deterministic order
    ///
    /// Keys are sorted alphabetically for consistent output.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Algorithm name for identification
    ///
    /// # Returns
    /// A static string identifying the cache algorithm (e.g., "LRU")
    fn algorithm_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_metrics_start_at_zero() {
        let metrics = CoreCacheMetrics::new();
        assert_eq!(metrics.requests, 0);
        assert_eq!(metrics.hit_rate(), 0.0);
        assert_eq!(metrics.miss_rate(), 0.0);
        assert!(!metrics.to_btreemap().contains_key("eviction_rate"));
    }

    #[test]
    fn test_core_metrics_rates() {
        let mut metrics = CoreCacheMetrics::new();
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_hit();
        metrics.record_miss();
        assert_eq!(metrics.requests, 4);
        assert_eq!(metrics.cache_misses(), 1);
        assert_eq!(metrics.hit_rate(), 0.75);
        assert_eq!(metrics.miss_rate(), 0.25);
    }

    #[test]
    fn test_core_metrics_btreemap_is_sorted() {
        let mut metrics = CoreCacheMetrics::new();
        metrics.record_insertion();
        metrics.record_insertion();
        metrics.record_update();
        metrics.record_eviction();

        let map = metrics.to_btreemap();
        let keys: alloc::vec::Vec<&str> = map.keys().map(String::as_str).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
        assert_eq!(map.get("insertions"), Some(&2.0));
        assert_eq!(map.get("updates"), Some(&1.0));
        assert_eq!(map.get("evictions"), Some(&1.0));
        assert_eq!(map.get("eviction_rate"), Some(&(1.0 / 3.0)));
    }
}
