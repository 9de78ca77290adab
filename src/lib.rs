#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## How an access moves through the cache
//!
//! ```text
//!   get(k) ──▶ map lookup ──miss──▶ None (cache unchanged)
//!                  │
//!                 hit
//!                  ▼
//!          relink slot at head ──▶ Some(&v)
//!
//!   update(k, v) ──▶ map lookup ──hit──▶ relink at head, overwrite value
//!                        │
//!                       miss
//!                        ▼
//!               link new slot at head
//!                        │
//!                 len > capacity? ──yes──▶ unlink tail, drop its key,
//!                        │                  return the evicted pair
//!                       no
//!                        ▼
//!                      None
//! ```
//!
//! ## Quick Reference
//!
//! | Operation | Cost | Changes recency | Counted in metrics |
//! |-----------|------|-----------------|--------------------|
//! | [`LruCache::get`] / [`LruCache::get_mut`] | O(1) | yes | request, hit or miss |
//! | [`LruCache::update`] | O(1) | yes | insertion or update, eviction |
//! | [`LruCache::peek`] / [`LruCache::contains`] | O(1) | no | no |
//! | [`LruCache::peek_lru`] | O(1) | no | no |
//! | [`LruCache::iter`] | O(n) | no | no |
//!
//! ## Code Example
//!
//! ```rust
//! use lru_arena::{CacheMetrics, LruCache};
//! use lru_arena::config::LruCacheConfig;
//!
//! let config = LruCacheConfig::new(2).unwrap();
//! let mut cache = LruCache::init(config, None);
//!
//! cache.update("a", 1);
//! cache.update("b", 2);
//! cache.get(&"a");                      // "a" is now most recently used
//! let evicted = cache.update("c", 3);   // "b" is the least recently used
//!
//! assert_eq!(evicted, Some(("b", 2)));
//! assert_eq!(cache.metrics().get("evictions"), Some(&1.0));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `hashbrown` | ✓ | Use hashbrown for the key index (works in `no_std`) |
//! | `std` | | Implement `std::error::Error` for [`Error`] |
//! | `nightly` | | Enable nightly-only hashbrown optimizations |
//!
//! Without `hashbrown` the key index falls back to `std::collections::HashMap`.

#![no_std]

extern crate alloc;

#[cfg(any(feature = "std", not(feature = "hashbrown")))]
extern crate std;

#[cfg(test)]
extern crate scoped_threadpool;

/// Slot-arena doubly linked list holding the recency order.
///
/// **Note**: This module is internal infrastructure. Entries are addressed by
/// slot handles that are only meaningful to the list that issued them.
pub(crate) mod list;

/// Cache configuration structures.
pub mod config;

/// Error type returned when a cache cannot be built.
pub mod error;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least recently used entry when
/// an insert pushes it past its capacity.
pub mod lru;

/// Cache metrics system.
///
/// Counters collected by the cache and exported as a sorted map.
pub mod metrics;

pub use config::LruCacheConfig;
pub use error::{Error, Result};
pub use lru::LruCache;
pub use metrics::{CacheMetrics, LruCacheMetrics};
