#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Which type do I want?
//!
//! | Type | Identity | Lookup | Use when |
//! |------|----------|--------|----------|
//! | [`LruCache`] / [`IndexedLruCache`] | key | O(1) | general key-value caching |
//! | [`ListOnlyLruCache`] | key | O(n) | small capacities, keys without a cheap `Clone` |
//! | [`PageCache`] | the value itself | O(n) | page-reference traces |
//! | [`SentinelList`] | node handle | O(n) search | building your own ordering policy |
//! | [`SentinelKeyValueList`] | node handle or key | O(n) search | same, with a key per node |
//!
//! ## Sentinel list
//!
//! ```rust
//! use sentinel_cache::SentinelList;
//!
//! let mut list = SentinelList::new();
//! let two = list.insert_last(2);
//! list.insert_first(1);
//! list.insert_after(two, 3).unwrap();
//!
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
//! assert_eq!(list.nth(0).and_then(|id| list.get(id)), Some(&1));
//!
//! // Erasing hands back the node that followed the erased one.
//! let after = list.erase(two).unwrap();
//! assert_eq!(list.get(after), Some(&3));
//!
//! // The erased handle is now stale and every operation rejects it.
//! assert_eq!(list.get(two), None);
//! assert_eq!(list.erase(two), None);
//! ```
//!
//! ## Key-value LRU
//!
//! ```rust
//! use sentinel_cache::LruCache;
//! use sentinel_cache::config::LruCacheConfig;
//!
//! let config = LruCacheConfig::try_from(2).unwrap();
//! let mut cache = LruCache::init(config);
//! cache.put(1, 1000);
//! cache.put(2, 2000);
//! assert_eq!(cache.get(&1), Some(&1000));
//! assert_eq!(cache.put(3, 3000), Some((2, 2000)));
//! assert_eq!(cache.get(&2), None);
//! ```
//!
//! ## Page replacement
//!
//! ```rust
//! use sentinel_cache::PageCache;
//!
//! let mut frames = PageCache::try_new(3).unwrap();
//! let faults = [7, 0, 1, 2, 0, 3, 0, 4]
//!     .into_iter()
//!     .filter(|&page| frames.access(page).is_fault())
//!     .count();
//! assert_eq!(faults, 6);
//! ```
//!
//! ## Modules
//!
//! - [`list`]: the sentinel doubly linked list
//! - [`kv_list`]: its key-value flavour
//! - [`lru`]: the LRU cache
//! - [`store`]: the backing strategies behind [`LruCache`]
//! - [`page`]: the value-only page cache
//! - [`config`]: configuration structures
//! - [`metrics`]: metrics collection for cache monitoring

#![no_std]

extern crate alloc;

#[cfg(any(feature = "std", not(feature = "hashbrown")))]
extern crate std;

/// Sentinel-based circular doubly linked list over an index arena.
pub mod list;

/// Key-value flavour of the sentinel list, searchable by key.
pub mod kv_list;

/// Cache configuration structures.
pub mod config;

/// Errors raised while building a cache.
pub mod error;

/// Storage strategies for the key-value LRU cache.
///
/// [`HashIndexed`](store::HashIndexed) pairs a hash index with the recency
/// list; [`LinearScan`](store::LinearScan) searches one key-value list.
pub mod store;

/// Least Recently Used (LRU) cache implementation.
///
/// Provides a fixed-size cache that evicts the least recently used items when
/// the capacity is reached.
pub mod lru;

/// Value-only LRU cache for page-replacement traces.
pub mod page;

/// Cache metrics system.
///
/// Counters for every cache in the crate, reported through one trait.
pub mod metrics;

pub use error::CapacityError;
pub use kv_list::SentinelKeyValueList;
pub use list::{NodeId, SentinelList};
pub use lru::{IndexedLruCache, ListOnlyLruCache, LruCache};
pub use page::{Access, PageCache};
pub use store::{HashIndexed, LinearScan, LruStore};
