//! Cache Metrics System
//!
//! Counters kept by every cache in this crate, reported through the
//! [`CacheMetrics`] trait as a `BTreeMap` so keys always come out in the same
//! order.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

pub mod lru;
pub mod page;

pub use lru::LruCacheMetrics;
pub use page::PageCacheMetrics;

/// Common metrics tracked by all caches
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CoreCacheMetrics {
    /// Total number of lookups made against the cache
    pub requests: u64,

    /// Number of lookups that found their key
    pub cache_hits: u64,

    /// Number of new entries stored
    pub insertions: u64,

    /// Number of writes that replaced the value of a resident key
    pub updates: u64,

    /// Number of entries dropped because the cache was full
    pub evictions: u64,
}

impl CoreCacheMetrics {
    /// Creates a set of zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a lookup that found its key.
    pub fn record_hit(&mut self) {
        self.requests += 1;
        self.cache_hits += 1;
    }

    /// Records a lookup that did not find its key.
    ///
    /// Misses are derived as `requests - cache_hits`.
    pub fn record_miss(&mut self) {
        self.requests += 1;
    }

    /// Records a new entry stored.
    pub fn record_insertion(&mut self) {
        self.insertions += 1;
    }

    /// Records a write that replaced a resident value.
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Records an entry dropped to make room.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    /// Lookups that did not find their key.
    pub fn cache_misses(&self) -> u64 {
        self.requests - self.cache_hits
    }

    /// Fraction of lookups that hit, between 0.0 and 1.0. Zero before any request.
    pub fn hit_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_hits as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Fraction of lookups that missed, between 0.0 and 1.0. Zero before any request.
    pub fn miss_rate(&self) -> f64 {
        if self.requests > 0 {
            self.cache_misses() as f64 / self.requests as f64
        } else {
            0.0
        }
    }

    /// Resets every counter to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Convert core metrics to BTreeMap for reporting
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = BTreeMap::new();

        // Counters
        metrics.insert("cache_hits".to_string(), self.cache_hits as f64);
        metrics.insert("evictions".to_string(), self.evictions as f64);
        metrics.insert("insertions".to_string(), self.insertions as f64);
        metrics.insert("requests".to_string(), self.requests as f64);
        metrics.insert("updates".to_string(), self.updates as f64);
        metrics.insert("cache_misses".to_string(), self.cache_misses() as f64);

        // Rates (0.0 to 1.0)
        metrics.insert("hit_rate".to_string(), self.hit_rate());
        metrics.insert("miss_rate".to_string(), self.miss_rate());

        if self.requests > 0 {
            metrics.insert(
                "eviction_rate".to_string(),
                self.evictions as f64 / self.requests as f64,
            );
        }

        metrics
    }
}

/// Trait that all caches implement for metrics reporting
///
/// Gives a uniform way to pull counters out of any cache in this crate, so
/// callers can compare backing strategies side by side.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs, keys sorted alphabetically.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Short name identifying the cache (e.g. "LRU", "LRU-SCAN", "PAGE-LRU").
    fn algorithm_name(&self) -> &'static str;
}
