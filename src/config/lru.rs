//! Configuration for the key-value LRU caches.
//!
//! The same configuration drives both backing strategies; the strategy itself
//! is picked by the constructor (see [`LruCache`](crate::LruCache)).
//!
//! # Examples
//!
//! ```
//! use sentinel_cache::config::LruCacheConfig;
//! use sentinel_cache::LruCache;
//! use core::num::NonZeroUsize;
//!
//! let config = LruCacheConfig {
//!     capacity: NonZeroUsize::new(1000).unwrap(),
//! };
//! let cache: LruCache<String, i32> = LruCache::init(config);
//! assert_eq!(cache.cap().get(), 1000);
//!
//! // Capacities that come from outside can be checked at runtime.
//! assert!(LruCacheConfig::try_from(0).is_err());
//! ```

use crate::error::CapacityError;
use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for an LRU (Least Recently Used) cache.
///
/// # Fields
///
/// - `capacity`: Maximum number of entries the cache can hold. Once reached,
///   inserting a new key evicts the least recently used one.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LruCacheConfig {
    /// Maximum number of key-value pairs the cache can hold.
    pub capacity: NonZeroUsize,
}

impl LruCacheConfig {
    /// Creates a configuration holding at most `capacity` entries.
    pub const fn new(capacity: NonZeroUsize) -> Self {
        LruCacheConfig { capacity }
    }
}

impl TryFrom<usize> for LruCacheConfig {
    type Error = CapacityError;

    fn try_from(capacity: usize) -> Result<Self, Self::Error> {
        let capacity = NonZeroUsize::new(capacity).ok_or(CapacityError::Zero)?;
        Ok(LruCacheConfig { capacity })
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
