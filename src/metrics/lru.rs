//! LRU Cache Metrics
//!
//! Metrics reported by [`LruCache`](crate::LruCache) under either backing
//! strategy.

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// LRU-specific metrics (extends CoreCacheMetrics)
#[derive(Debug, Clone)]
pub struct LruCacheMetrics {
    /// Core metrics common to all caches
    pub core: CoreCacheMetrics,

    /// Name of the backing strategy, reported through [`CacheMetrics::algorithm_name`]
    pub algorithm: &'static str,

    /// Number of explicit removals through `remove`
    pub removals: u64,
}

impl LruCacheMetrics {
    /// Creates zeroed metrics reported under `algorithm`.
    pub fn new(algorithm: &'static str) -> Self {
        Self {
            core: CoreCacheMetrics::new(),
            algorithm,
            removals: 0,
        }
    }

    /// Records an explicit removal.
    pub fn record_removal(&mut self) {
        self.removals += 1;
    }

    /// Core counters plus `removals`.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("removals".to_string(), self.removals as f64);
        metrics
    }
}

impl CacheMetrics for LruCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        self.algorithm
    }
}
