//! Cache Configuration Module
//!
//! Configuration structures for the cache. Each config struct has public
//! fields so it can be written out in full at the call site:
//!
//! - **Simple**: Just create the struct with all fields set
//! - **Type safety**: `capacity` is a `NonZeroUsize`, so a zero-sized cache
//!   cannot be described
//! - **Validation at the edge**: `new` accepts a plain `usize` (from a CLI flag,
//!   an environment variable, a config file) and reports an
//!   [`Error::InvalidCapacity`](crate::Error::InvalidCapacity) instead of panicking
//!
//! # Sizing Guidelines
//!
//! `capacity` is the maximum number of entries. The arena that backs the
//! recency list holds at most `capacity + 1` slots (one extra while an
//! overflowing insert is being resolved). Both the arena and the key index are
//! reserved up front for up to 65,536 slots; bigger caches grow on demand, and
//! the arena stops growing once the cache has filled up:
//!
//! ```text
//! Total Memory ≈ capacity × (size_of::<K>() * 2 + size_of::<V>() + overhead_per_entry)
//! overhead_per_entry ≈ 40 bytes (two links, slot tag, hash table control bytes)
//! ```
//!
//! # Examples
//!
//! ```
//! use lru_arena::config::LruCacheConfig;
//! use lru_arena::LruCache;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(10_000).unwrap(),
//! };
//! let cache: LruCache<String, Vec<u8>> = LruCache::init(config, None);
//! assert_eq!(cache.cap().get(), 10_000);
//! ```

pub mod lru;

pub use lru::{LruCacheConfig, DEFAULT_CAPACITY};
