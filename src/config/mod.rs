//! Cache Configuration Module
//!
//! Configuration structures for the caches in this crate. Each cache type has
//! its own configuration struct with public fields.
//!
//! Configs can be built directly from a [`NonZeroUsize`](core::num::NonZeroUsize),
//! or from a plain `usize` through `TryFrom`, which rejects a zero capacity
//! with [`CapacityError`](crate::CapacityError).
//!
//! | Config | Cache | Description |
//! |--------|-------|-------------|
//! | `LruCacheConfig` | [`LruCache`](crate::LruCache) | Key-value LRU, either backing strategy |
//! | `PageCacheConfig` | [`PageCache`](crate::PageCache) | Value-only LRU page replacement |
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
//!
//! let indexed: LruCache<String, i32> = LruCache::init(config);
//! let scanning = LruCache::<String, i32, _>::init_linear_scan(config);
//! assert_eq!(indexed.cap(), scanning.cap());
//! ```

pub mod lru;
pub mod page;

pub use lru::LruCacheConfig;
pub use page::PageCacheConfig;
