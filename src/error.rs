//! Error types for cache construction.
//!
//! Lookups and updates are total: a miss is reported as `None` and an update
//! always succeeds. The only failure is an invalid configuration, which is
//! rejected when the cache is built rather than on first use.

use core::fmt;

/// Result type alias for fallible cache operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors reported by the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The requested capacity cannot hold a single entry.
    InvalidCapacity(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCapacity(capacity) => write!(
                f,
                "invalid cache configuration: capacity must be a positive integer, got {}",
                capacity
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
