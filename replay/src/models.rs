// Data models for trace replay

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// A single trace row: read `key`, and on a miss fill it with `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Cache key
    pub key: String,
    /// Value to store when the key is not cached
    pub value: u64,
}

impl Request {
    /// Create a new request
    pub fn new(key: impl Into<String>, value: u64) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Configuration for a replay run
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Trace file to replay
    pub input: PathBuf,
    /// Cache capacity in number of entries, validated when the cache is built
    pub capacity: usize,
    /// Mirror every request into the `lru` crate and compare hit/miss outcomes
    pub verify: bool,
}

/// Latency statistics for a single operation type (get, update)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpLatencyStats {
    /// Total time spent (nanoseconds)
    pub total_ns: u64,
    /// Number of operations
    pub count: u64,
    /// Minimum latency (nanoseconds)
    pub min_ns: u64,
    /// Maximum latency (nanoseconds)
    pub max_ns: u64,
}

impl OpLatencyStats {
    /// Record one operation
    #[inline]
    pub fn record(&mut self, latency_ns: u64) {
        if self.count == 0 {
            self.min_ns = latency_ns;
        }
        self.total_ns += latency_ns;
        self.count += 1;
        self.min_ns = self.min_ns.min(latency_ns);
        self.max_ns = self.max_ns.max(latency_ns);
    }

    /// Calculate average latency in nanoseconds
    pub fn avg_ns(&self) -> f64 {
        if self.count > 0 {
            self.total_ns as f64 / self.count as f64
        } else {
            0.0
        }
    }
}

/// Hit/miss accounting for one replay
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplayStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
    /// Entries evicted by fills
    pub evictions: usize,
    /// Requests on which the reference cache disagreed about hit or miss
    pub divergences: usize,
    /// Get latencies
    pub get_latency: OpLatencyStats,
    /// Update (fill) latencies
    pub update_latency: OpLatencyStats,
}

impl ReplayStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of requests replayed
    pub fn requests(&self) -> usize {
        self.hits + self.misses
    }

    /// Calculate hit rate as percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.requests();
        if total > 0 {
            (self.hits as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    }
}

/// Results of a replay run
#[derive(Debug)]
pub struct ReplayResult {
    /// Hit/miss and latency accounting
    pub stats: ReplayStats,
    /// Counters reported by the cache itself
    pub metrics: BTreeMap<String, f64>,
    /// Number of distinct keys in the trace
    pub unique_keys: usize,
    /// Entries left in the cache at the end
    pub final_len: usize,
    /// Cache capacity used
    pub capacity: usize,
    /// Whether the reference cache was consulted
    pub verified: bool,
    /// Wall-clock duration of the replay
    pub duration: Duration,
}

/// CSV export row for a replay result
#[derive(Debug, Serialize)]
pub struct CsvResultRow {
    /// Cache capacity in entries
    pub capacity: usize,
    /// Total requests replayed
    pub requests: usize,
    /// Distinct keys in the trace
    pub unique_keys: usize,
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
    /// Hit rate as percentage
    pub hit_rate: f64,
    /// Entries evicted by fills
    pub evictions: usize,
    /// Hit/miss disagreements with the reference cache
    pub divergences: usize,
    /// Whether the reference cache was consulted
    pub verified: bool,
    /// Entries left in the cache at the end
    pub final_len: usize,
    /// Average get latency (nanoseconds)
    pub get_avg_ns: f64,
    /// Average update latency (nanoseconds)
    pub update_avg_ns: f64,
    /// Wall-clock duration of the replay (milliseconds)
    pub duration_ms: u128,
}

impl From<&ReplayResult> for CsvResultRow {
    fn from(result: &ReplayResult) -> Self {
        Self {
            capacity: result.capacity,
            requests: result.stats.requests(),
            unique_keys: result.unique_keys,
            hits: result.stats.hits,
            misses: result.stats.misses,
            hit_rate: result.stats.hit_rate(),
            evictions: result.stats.evictions,
            divergences: result.stats.divergences,
            verified: result.verified,
            final_len: result.final_len,
            get_avg_ns: result.stats.get_latency.avg_ns(),
            update_avg_ns: result.stats.update_latency.avg_ns(),
            duration_ms: result.duration.as_millis(),
        }
    }
}
