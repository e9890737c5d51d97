//! Least Recently Used (LRU) Cache Implementation
//!
//! A fixed-capacity key-value cache that evicts the least recently used entry
//! when a new key arrives and every slot is taken.
//!
//! # Algorithm
//!
//! Entries are kept in a [`SentinelList`](crate::SentinelList) ordered most
//! recent first. A hit moves the entry's node to the front of the list; an
//! insert at capacity drops the node just before the sentinel, which is the
//! least recently used entry.
//!
//! # Backing strategies
//!
//! The policy above is written once. Where the entries live is decided by the
//! [`LruStore`] type parameter:
//!
//! - [`HashIndexed`] (the default): a hash index beside the recency list.
//!   Get, put and remove are O(1).
//! - [`LinearScan`]: a single key-value list searched front to back. Every
//!   lookup is O(n), but keys are never hashed for storage nor cloned.
//!
//! # Thread Safety
//!
//! This implementation is not thread-safe. Both `get` and `put` reorder
//! entries, so even readers need exclusive access; wrap the cache in a
//! `Mutex` to share it.

use crate::config::LruCacheConfig;
use crate::error::CapacityError;
use crate::metrics::{CacheMetrics, LruCacheMetrics};
use crate::store::{HashIndexed, LinearScan, LruStore};
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::marker::PhantomData;
use core::num::NonZeroUsize;
use tracing::{debug, trace};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// An implementation of a Least Recently Used (LRU) cache.
///
/// The cache has a fixed capacity. When it is full, inserting a new key
/// evicts the least recently used entry and hands it back to the caller.
///
/// # Examples
///
/// ```
/// use sentinel_cache::LruCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = LruCache::new(NonZeroUsize::new(2).unwrap());
///
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // Accessing items updates their recency
/// assert_eq!(cache.get(&"apple"), Some(&1));
///
/// // Adding beyond capacity evicts the least recently used item
/// assert_eq!(cache.put("cherry", 3), Some(("banana", 2)));
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(&1));
/// assert_eq!(cache.get(&"cherry"), Some(&3));
/// ```
///
/// The same contract over a plain list, without a hash index:
///
/// ```
/// use sentinel_cache::LruCache;
/// use core::num::NonZeroUsize;
///
/// let mut cache = LruCache::linear_scan(NonZeroUsize::new(2).unwrap());
/// cache.put(1, -1);
/// assert_eq!(cache.get(&1), Some(&-1));
/// ```
pub struct LruCache<K, V, B = HashIndexed<K, V>> {
    config: LruCacheConfig,
    store: B,
    metrics: LruCacheMetrics,
    _marker: PhantomData<(K, V)>,
}

/// An LRU cache over a hash index. Same type as [`LruCache`] with its default store.
pub type IndexedLruCache<K, V, S = DefaultHashBuilder> = LruCache<K, V, HashIndexed<K, V, S>>;

/// An LRU cache that finds keys by scanning its recency list.
pub type ListOnlyLruCache<K, V> = LruCache<K, V, LinearScan<K, V>>;

impl<K, V, B: LruStore<K, V>> LruCache<K, V, B> {
    /// Creates a cache from a configuration and a store.
    ///
    /// Entries already in `store` are kept in their recency order. If there
    /// are more of them than the capacity allows, the least recently used are
    /// dropped until the store fits.
    pub fn with_store(config: LruCacheConfig, store: B) -> Self {
        let mut cache = LruCache {
            config,
            store,
            metrics: LruCacheMetrics::new(B::NAME),
            _marker: PhantomData,
        };
        let trimmed = cache.shrink_to(config.capacity.get());
        if trimmed > 0 {
            debug!(
                capacity = config.capacity.get(),
                trimmed,
                "dropped entries beyond capacity from initial store"
            );
        }
        cache
    }

    /// Evicts least recently used entries until at most `target` remain.
    /// Returns how many were evicted.
    fn shrink_to(&mut self, target: usize) -> usize {
        let mut evicted = 0;
        while self.store.len() > target {
            if self.store.pop_back().is_none() {
                break;
            }
            self.metrics.core.record_eviction();
            evicted += 1;
        }
        evicted
    }

    /// Maximum number of entries.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.config.capacity
    }

    /// Number of cached entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` when nothing is cached.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the value for `key` and marks it most recently used.
    ///
    /// A miss leaves the recency order untouched.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_mut(key).map(|value| &*value)
    }

    /// Like [`get`](Self::get), but the value can be modified in place.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        match self.store.touch(key) {
            Some(value) => {
                self.metrics.core.record_hit();
                trace!(hits = self.metrics.core.cache_hits, "lru hit");
                Some(value)
            }
            None => {
                self.metrics.core.record_miss();
                None
            }
        }
    }

    /// Returns the value for `key` without changing its recency.
    #[inline]
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.store.peek(key)
    }

    /// Whether `key` is cached. Does not update recency.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.store.peek(key).is_some()
    }

    /// Inserts or updates `key`, making it the most recently used entry.
    ///
    /// Updating a resident key replaces its value and returns `None`. Adding a
    /// new key to a full cache evicts the least recently used entry first and
    /// returns it.
    pub fn put(&mut self, key: K, value: V) -> Option<(K, V)>
    where
        K: Hash + Eq,
    {
        if let Some(slot) = self.store.touch(&key) {
            *slot = value;
            self.metrics.core.record_update();
            trace!(len = self.store.len(), "lru update");
            return None;
        }

        let mut evicted = None;
        while self.store.len() >= self.cap().get() {
            match self.store.pop_back() {
                Some(entry) => {
                    self.metrics.core.record_eviction();
                    debug!(
                        capacity = self.cap().get(),
                        evictions = self.metrics.core.evictions,
                        "evicted least recently used entry"
                    );
                    evicted = Some(entry);
                }
                None => break,
            }
        }

        self.store.push_front(key, value);
        self.metrics.core.record_insertion();
        trace!(len = self.store.len(), "lru insert");

        evicted
    }

    /// Removes `key` from the cache and returns its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (_, value) = self.store.remove(key)?;
        self.metrics.record_removal();
        Some(value)
    }

    /// Drops every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.store.clear();
        trace!("lru cleared");
    }

    /// Iterates over the entries, most recently used first, without touching them.
    pub fn iter<'a>(&'a self) -> B::Iter<'a>
    where
        K: 'a,
        V: 'a,
    {
        self.store.iter()
    }

    /// The most recently used entry. Does not update recency.
    #[inline]
    pub fn most_recent(&self) -> Option<(&K, &V)> {
        self.store.front()
    }

    /// The entry the next insert of a new key would evict, once the cache is full.
    #[inline]
    pub fn least_recent(&self) -> Option<(&K, &V)> {
        self.store.back()
    }

    /// Hit, miss and eviction counters.
    #[inline]
    pub fn stats(&self) -> &LruCacheMetrics {
        &self.metrics
    }
}

impl<K: Hash + Eq + Clone, V> LruCache<K, V> {
    /// Creates a hash-indexed cache with the default hasher.
    pub fn new(cap: NonZeroUsize) -> Self {
        Self::init(LruCacheConfig::new(cap))
    }

    /// Creates a hash-indexed cache from a configuration.
    pub fn init(config: LruCacheConfig) -> Self {
        let store = HashIndexed::with_capacity(config.capacity.get());
        Self::with_store(config, store)
    }

    /// Creates a hash-indexed cache from a runtime capacity.
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError::Zero`] when `cap` is zero.
    pub fn try_new(cap: usize) -> Result<Self, CapacityError> {
        Ok(Self::init(LruCacheConfig::try_from(cap)?))
    }
}

impl<K: Hash + Eq + Clone, V, S: BuildHasher> LruCache<K, V, HashIndexed<K, V, S>> {
    /// Creates a hash-indexed cache with the specified capacity and hash builder.
    pub fn with_hasher(cap: NonZeroUsize, hash_builder: S) -> Self {
        let store = HashIndexed::with_capacity_and_hasher(cap.get(), hash_builder);
        Self::with_store(LruCacheConfig::new(cap), store)
    }
}

impl<K: Eq, V> LruCache<K, V, LinearScan<K, V>> {
    /// Creates a cache that locates keys by scanning its recency list.
    pub fn linear_scan(cap: NonZeroUsize) -> Self {
        Self::init_linear_scan(LruCacheConfig::new(cap))
    }

    /// Creates a list-only cache from a configuration.
    pub fn init_linear_scan(config: LruCacheConfig) -> Self {
        let store = LinearScan::with_capacity(config.capacity.get());
        Self::with_store(config, store)
    }

    /// # Errors
    ///
    /// Returns [`CapacityError::Zero`] when `cap` is zero.
    pub fn try_linear_scan(cap: usize) -> Result<Self, CapacityError> {
        Ok(Self::init_linear_scan(LruCacheConfig::try_from(cap)?))
    }
}

impl<K, V, B: LruStore<K, V>> CacheMetrics for LruCache<K, V, B> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<K, V, B: LruStore<K, V>> core::fmt::Debug for LruCache<K, V, B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LruCache")
            .field("algorithm", &B::NAME)
            .field("capacity", &self.config.capacity)
            .field("len", &self.store.len())
            .finish()
    }
}
