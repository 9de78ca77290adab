//! Least Recently Used (LRU) Cache Implementation
//!
//! This module provides a bounded LRU cache with O(1) operations for lookups,
//! updates and eviction.
//!
//! # Algorithm
//!
//! The cache keeps its entries in a recency list ordered from most recently
//! used (front) to least recently used (back). Both [`LruCache::get`] and
//! [`LruCache::update`] count as a use and move the entry to the front. When
//! an update introduces a new key and the cache grows past its capacity, the
//! entry at the back is evicted.
//!
//! # Layout
//!
//! ```text
//!   map: K -> Slot
//!  ┌────────┬──────┐
//!  │ "bar"  │  1   │        head                              tail
//!  │ "baz"  │  0   │         │                                  │
//!  │ "ball" │  2   │         ▼                                  ▼
//!  └────────┴──────┘    ┌───────────┐   ┌───────────┐   ┌───────────┐
//!                       │ slot 1    │◀─▶│ slot 2    │◀─▶│ slot 0    │
//!                       │ bar, 420  │   │ ball, 99  │   │ baz, 1337 │
//!                       └───────────┘   └───────────┘   └───────────┘
//!                        most recent                     next victim
//! ```
//!
//! Each slot stores the key next to the value, so the key of the evicted tail
//! is known without a second (slot → key) index.
//!
//! # Performance Characteristics
//!
//! - **Time Complexity**:
//!   - Get: O(1)
//!   - Update: O(1)
//!   - Eviction: O(1)
//!
//! - **Space Complexity**:
//!   - O(n) where n is the capacity of the cache
//!   - At most 65,536 slots are reserved up front; larger caches grow on
//!     demand while filling up
//!   - The arena never holds more than `capacity + 1` slots; freed slots are
//!     reused, and `get` or `update` of a cached key never allocates
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe. Because every `get` reorders the
//! recency list, even readers need exclusive access: share a cache between
//! threads by wrapping the whole cache in a single `Mutex`.

extern crate alloc;

use crate::config::LruCacheConfig;
use crate::error::Result;
use crate::list::{self, List, Slot};
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Upper bound on the slots reserved when a cache is built. Larger caches
/// grow their arena and index on demand until they fill up.
const MAX_PREALLOCATED_SLOTS: usize = 1 << 16;

/// An implementation of a Least Recently Used (LRU) cache.
///
/// The cache has a fixed capacity and supports O(1) operations for
/// inserting, retrieving, and updating entries. When an insert pushes the
/// cache past its capacity, the least recently used entry is evicted.
///
/// # Examples
///
/// ```
/// use lru_arena::LruCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
///
/// // Add items to the cache
/// cache.update("apple", 1);
/// cache.update("banana", 2);
///
/// // Accessing items updates their recency
/// assert_eq!(cache.get(&"apple"), Some(&1));
///
/// // Adding beyond capacity evicts the least recently used item
/// assert_eq!(cache.update("cherry", 3), Some(("banana", 2)));
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// assert_eq!(cache.get(&"cherry"), Some(&3));
/// ```
pub struct LruCache<K, V, S = DefaultHashBuilder> {
    config: LruCacheConfig,
    list: List<(K, V)>,
    map: HashMap<K, Slot, S>,
    metrics: LruCacheMetrics,
}

impl<K: Hash + Eq, V, S: BuildHasher> LruCache<K, V, S> {
    /// Creates a new LRU cache with the specified capacity and hash builder.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        // One extra slot: an overflowing insert links the new entry before the
        // tail is evicted.
        let slots = cap.get().saturating_add(1).min(MAX_PREALLOCATED_SLOTS);
        LruCache {
            config: LruCacheConfig { capacity: cap },
            list: List::with_capacity(slots),
            map: HashMap::with_capacity_and_hasher(slots, hash_builder),
            metrics: LruCacheMetrics::new(),
        }
    }

    /// Returns the maximum number of entries the cache holds.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.config.capacity
    }

    /// Returns the number of entries currently cached.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if the cache holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Returns the counters collected so far.
    #[inline]
    pub fn lru_metrics(&self) -> &LruCacheMetrics {
        &self.metrics
    }

    /// Looks up `key` and marks its entry as most recently used.
    ///
    /// A miss returns `None` and leaves the cache untouched apart from the
    /// miss counter.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get(key).copied() {
            Some(slot) => {
                self.promote(slot);
                self.metrics.core.record_hit();
                self.list.get_value(slot).map(|(_, v)| v)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    /// Like [`get`](Self::get), but hands out a mutable reference.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.map.get(key).copied() {
            Some(slot) => {
                self.promote(slot);
                self.metrics.core.record_hit();
                self.list.get_value_mut(slot).map(|(_, v)| v)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    /// Returns the value for `key` without touching its recency or the metrics.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let slot = *self.map.get(key)?;
        self.list.get_value(slot).map(|(_, v)| v)
    }

    /// Returns true if `key` is cached. Does not touch recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    /// Returns the least recently used entry, the next one to be evicted.
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        let slot = self.list.tail()?;
        self.list.get_value(slot).map(|(k, v)| (k, v))
    }

    /// Iterates over the entries from most to least recently used.
    ///
    /// Iteration does not change the recency order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.list.iter(),
        }
    }

    fn promote(&mut self, slot: Slot) {
        if self.list.head() != Some(slot) {
            self.list.move_to_front(slot);
            self.metrics.record_promotion();
        }
    }

    /// Drops the least recently used entry and returns it.
    fn evict_lru(&mut self) -> Option<(K, V)> {
        let (key, value) = self.list.remove_last()?;
        self.map.remove(&key);
        self.metrics.core.record_eviction();
        Some((key, value))
    }

    #[cfg(test)]
    fn assert_consistent(&self) {
        self.list.assert_links();
        assert_eq!(self.map.len(), self.list.len());
        assert!(self.len() <= self.cap().get());
        assert!(self.list.slots() <= self.cap().get().saturating_add(1));
        for (key, slot) in self.map.iter() {
            let stored = self.list.get_value(*slot).map(|(k, _)| k);
            assert!(stored == Some(key), "index points at a foreign slot");
        }
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LruCache<K, V, S> {
    /// Inserts or overwrites `key`, marking it as most recently used.
    ///
    /// If `key` is already cached its value is replaced and the size does not
    /// change. Otherwise a new entry is added, and if that pushes the cache
    /// past its capacity the least recently used entry is evicted and
    /// returned. Exactly one entry is evicted per overflowing update.
    pub fn update(&mut self, key: K, value: V) -> Option<(K, V)> {
        if let Some(&slot) = self.map.get(&key) {
            self.promote(slot);
            if let Some(entry) = self.list.get_value_mut(slot) {
                entry.1 = value;
            }
            self.metrics.core.record_update();
            return None;
        }

        let slot = self.list.add((key.clone(), value));
        self.map.insert(key, slot);
        self.metrics.core.record_insertion();

        if self.list.len() > self.cap().get() {
            self.evict_lru()
        } else {
            None
        }
    }
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Creates a new LRU cache holding at most `cap` entries.
    pub fn new(cap: NonZeroUsize) -> LruCache<K, V, DefaultHashBuilder> {
        LruCache::with_hasher(cap, DefaultHashBuilder::default())
    }

    /// Creates a new LRU cache from an unchecked capacity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCapacity`](crate::Error::InvalidCapacity) when
    /// `capacity` is zero.
    pub fn try_new(capacity: usize) -> Result<LruCache<K, V, DefaultHashBuilder>> {
        let config = LruCacheConfig::new(capacity)?;
        Ok(LruCache::init(config, None))
    }

    /// Creates a new LRU cache from a configuration with an optional hasher.
    ///
    /// # Example
    ///
    /// ```
    /// use lru_arena::LruCache;
    /// use lru_arena::config::LruCacheConfig;
    ///
    /// let config = LruCacheConfig::new(3).unwrap();
    /// let mut cache = LruCache::init(config, None);
    /// cache.update("key", 42);
    /// assert_eq!(cache.get(&"key"), Some(&42));
    /// ```
    pub fn init(
        config: LruCacheConfig,
        hasher: Option<DefaultHashBuilder>,
    ) -> LruCache<K, V, DefaultHashBuilder> {
        LruCache::with_hasher(config.capacity, hasher.unwrap_or_default())
    }
}

impl<K: Hash + Eq, V> Default for LruCache<K, V> {
    /// Creates a cache with the default capacity of 10 entries.
    fn default() -> Self {
        LruCache::init(LruCacheConfig::default(), None)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> CacheMetrics for LruCache<K, V, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<K, V, S> core::fmt::Debug for LruCache<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.config.capacity)
            .field("len", &self.list.len())
            .finish()
    }
}

/// Iterator over the entries of an [`LruCache`], most recently used first.
pub struct Iter<'a, K, V> {
    inner: list::Iter<'a, (K, V)>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> core::fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.inner.len())
            .finish()
    }
}

impl<'a, K: Hash + Eq, V, S: BuildHasher> IntoIterator for &'a LruCache<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}
