//! Configuration for the Least Recently Used (LRU) cache.
//!
//! # Examples
//!
//! ```
//! use lru_arena::config::LruCacheConfig;
//! use lru_arena::LruCache;
//! use core::num::NonZeroUsize;
//!
//! // Fixed number of entries
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(1000).unwrap(),
//! };
//! let cache: LruCache<String, i32> = LruCache::init(config, None);
//!
//! // Capacity coming from user input is validated
//! assert!(LruCacheConfig::new(0).is_err());
//!
//! // Ten entries unless told otherwise
//! assert_eq!(LruCacheConfig::default().capacity.get(), 10);
//! ```

use crate::error::{Error, Result};
use core::fmt;
use core::num::NonZeroUsize;

/// Capacity used when none is given.
pub const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(capacity) => capacity,
    None => panic!("default capacity must be non-zero"),
};

/// Configuration for an LRU (Least Recently Used) cache.
///
/// LRU evicts the least recently accessed entry when an insert pushes the
/// cache past `capacity`. The capacity is fixed for the lifetime of the cache.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries the cache can hold.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: NonZeroUsize,
}

impl LruCacheConfig {
    /// Builds a configuration from an unchecked capacity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCapacity`] when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity).ok_or(Error::InvalidCapacity(capacity))?;
        Ok(Self { capacity })
    }
}

impl Default for LruCacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl TryFrom<usize> for LruCacheConfig {
    type Error = Error;

    fn try_from(capacity: usize) -> Result<Self> {
        Self::new(capacity)
    }
}

impl From<NonZeroUsize> for LruCacheConfig {
    fn from(capacity: NonZeroUsize) -> Self {
        Self { capacity }
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_config_creation() {
        let config = LruCacheConfig {
            capacity: NonZeroUsize::new(1000).unwrap(),
        };
        assert_eq!(config.capacity.get(), 1000);
    }

    #[test]
    fn test_lru_config_default_capacity() {
        assert_eq!(LruCacheConfig::default().capacity.get(), 10);
        assert_eq!(DEFAULT_CAPACITY.get(), 10);
    }

    #[test]
    fn test_lru_config_rejects_zero() {
        assert_eq!(LruCacheConfig::new(0), Err(Error::InvalidCapacity(0)));
        assert_eq!(LruCacheConfig::try_from(0), Err(Error::InvalidCapacity(0)));
    }

    #[test]
    fn test_lru_config_accepts_positive() {
        let config = LruCacheConfig::new(1).unwrap();
        assert_eq!(config.capacity.get(), 1);
        let config: LruCacheConfig = NonZeroUsize::new(3).unwrap().into();
        assert_eq!(config.capacity.get(), 3);
    }
}
