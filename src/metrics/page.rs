//! Page Cache Metrics
//!
//! A page reference either hits a resident frame or faults. Faults are the
//! core misses; `page_faults` repeats them under the name paging code uses.

use super::{CacheMetrics, CoreCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// Metrics reported by [`PageCache`](crate::PageCache).
#[derive(Debug, Default, Clone)]
pub struct PageCacheMetrics {
    /// Core metrics common to all caches
    pub core: CoreCacheMetrics,
}

impl PageCacheMetrics {
    /// Creates zeroed metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of references that did not find their page resident.
    pub fn page_faults(&self) -> u64 {
        self.core.cache_misses()
    }

    /// Fraction of references that faulted. Zero before any reference.
    pub fn fault_rate(&self) -> f64 {
        self.core.miss_rate()
    }

    /// Core counters plus `page_faults` and `fault_rate`.
    pub fn to_btreemap(&self) -> BTreeMap<String, f64> {
        let mut metrics = self.core.to_btreemap();
        metrics.insert("page_faults".to_string(), self.page_faults() as f64);
        metrics.insert("fault_rate".to_string(), self.fault_rate());
        metrics
    }
}

impl CacheMetrics for PageCacheMetrics {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.to_btreemap()
    }

    fn algorithm_name(&self) -> &'static str {
        "PAGE-LRU"
    }
}
