//! LRU Cache Metrics
//!
//! Metrics specific to the LRU (Least Recently Used) cache algorithm.

extern crate alloc;

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LRU-specific metrics (extends CoreCacheMetrics)
///
/// On top of the core counters, the LRU cache tracks how often an entry was
/// actually relinked to the front of the recency list. Hits on the entry that
/// is already most recently used do not count as promotions.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LruCacheMetrics {
    /// Core metrics common to all cache algorithms
    pub core: CoreCacheMetrics,
    /// Number of times an entry was moved to the most recently used position
    pub promotions: u64,
}

impl LruCacheMetrics {
    /// Creates a zeroed set of LRU metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that an existing entry was moved to the front.
    pub fn record_promotion(&mut self) {
        self.promotions += 1;
    }

    /// Converts LRU metrics to a BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("promotions".to_string(), self.promotions as f64);
        metrics
    }
}

impl CacheMetrics for LruCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    /// Returns "LRU", identifying this as a Least Recently Used cache
    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}
