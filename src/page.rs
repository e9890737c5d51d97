//! Value-only LRU cache for page-replacement traces.
//!
//! There is no key: a page is identified by its own value. Referencing a page
//! either finds it resident (a hit) or faults it in, paging out the least
//! recently used frame when all frames are taken. Membership is a linear scan
//! of the frame list.

use crate::config::PageCacheConfig;
use crate::error::CapacityError;
use crate::list::{self, SentinelList};
use crate::metrics::{CacheMetrics, PageCacheMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::num::NonZeroUsize;
use tracing::{debug, trace};

/// Outcome of referencing a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access<T> {
    /// The page was resident and is now the most recently used.
    Hit,
    /// The page was not resident and has been loaded. `evicted` holds the
    /// page that was paged out to make room, if any.
    Fault {
        /// The page paged out, or `None` while free frames remained.
        evicted: Option<T>,
    },
}

impl<T> Access<T> {
    /// Returns `true` if the page was already resident.
    pub fn is_hit(&self) -> bool {
        matches!(self, Access::Hit)
    }

    /// Returns `true` if the page had to be loaded.
    pub fn is_fault(&self) -> bool {
        !self.is_hit()
    }

    /// The page paged out by this access.
    pub fn evicted(self) -> Option<T> {
        match self {
            Access::Hit => None,
            Access::Fault { evicted } => evicted,
        }
    }
}

/// A fixed number of page frames with LRU replacement.
///
/// # Examples
///
/// ```
/// use sentinel_cache::{Access, PageCache};
/// use core::num::NonZeroUsize;
///
/// let mut frames = PageCache::new(NonZeroUsize::new(2).unwrap());
/// assert_eq!(frames.access(7), Access::Fault { evicted: None });
/// assert_eq!(frames.access(8), Access::Fault { evicted: None });
/// assert_eq!(frames.access(7), Access::Hit);
/// assert_eq!(frames.access(9), Access::Fault { evicted: Some(8) });
/// assert_eq!(frames.iter().copied().collect::<Vec<_>>(), vec![9, 7]);
/// ```
pub struct PageCache<T> {
    config: PageCacheConfig,
    frames: SentinelList<T>,
    metrics: PageCacheMetrics,
}

impl<T: PartialEq> PageCache<T> {
    /// Creates a cache with `cap` frames.
    pub fn new(cap: NonZeroUsize) -> Self {
        Self::init(PageCacheConfig::new(cap))
    }

    /// Creates a cache from a [`PageCacheConfig`].
    pub fn init(config: PageCacheConfig) -> Self {
        PageCache {
            config,
            frames: SentinelList::with_capacity(config.capacity.get()),
            metrics: PageCacheMetrics::new(),
        }
    }

    /// # Errors
    ///
    /// Returns [`CapacityError::Zero`] when `cap` is zero.
    pub fn try_new(cap: usize) -> Result<Self, CapacityError> {
        Ok(Self::init(PageCacheConfig::try_from(cap)?))
    }

    /// Number of frames.
    #[inline]
    pub fn cap(&self) -> NonZeroUsize {
        self.config.capacity
    }

    /// Number of resident pages.
    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` when no page is resident.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// References `page` and returns it.
    pub fn reference(&mut self, page: T) -> T
    where
        T: Clone,
    {
        self.access(page.clone());
        page
    }

    /// References `page`, making it the most recently used frame.
    ///
    /// A resident page is unlinked and the new value is placed at the head. A
    /// missing page faults; with every frame taken, the least recently used
    /// page is paged out first.
    pub fn access(&mut self, page: T) -> Access<T> {
        if let Some(node) = self.frames.find(&page) {
            self.frames.erase(node);
            self.frames.insert_first(page);
            self.metrics.core.record_hit();
            trace!(resident = self.frames.len(), "page hit");
            return Access::Hit;
        }

        self.metrics.core.record_miss();
        let mut evicted = None;
        if self.frames.len() >= self.cap().get() {
            evicted = self.frames.erase_last();
            if evicted.is_some() {
                self.metrics.core.record_eviction();
                debug!(
                    capacity = self.cap().get(),
                    faults = self.metrics.page_faults(),
                    "paged out least recently used frame"
                );
            }
        }

        self.frames.insert_first(page);
        self.metrics.core.record_insertion();
        trace!(resident = self.frames.len(), "page fault");
        Access::Fault { evicted }
    }

    /// Whether `page` is resident. Does not count as a reference.
    pub fn contains(&self, page: &T) -> bool {
        self.frames.find(page).is_some()
    }

    /// Resident pages, most recently used first.
    pub fn iter(&self) -> list::Iter<'_, T> {
        self.frames.iter()
    }

    /// Pages everything out. Counters are kept.
    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// Hit and fault counters.
    #[inline]
    pub fn stats(&self) -> &PageCacheMetrics {
        &self.metrics
    }
}

impl<T> CacheMetrics for PageCache<T> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.metrics.metrics()
    }

    fn algorithm_name(&self) -> &'static str {
        self.metrics.algorithm_name()
    }
}

impl<T> core::fmt::Debug for PageCache<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PageCache")
            .field("capacity", &self.config.capacity)
            .field("len", &self.frames.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn frames(cap: usize) -> PageCache<u32> {
        PageCache::try_new(cap).unwrap()
    }

    fn resident(cache: &PageCache<u32>) -> Vec<u32> {
        cache.iter().copied().collect()
    }

    #[test]
    fn test_page_reference_returns_page() {
        let mut cache = frames(2);
        assert_eq!(cache.reference(5), 5);
        assert_eq!(cache.reference(5), 5);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_page_fills_then_evicts_oldest() {
        let mut cache = frames(3);
        for page in 0..3 {
            assert_eq!(cache.access(page), Access::Fault { evicted: None });
        }
        assert_eq!(resident(&cache), vec![2, 1, 0]);
        assert_eq!(cache.access(3).evicted(), Some(0));
        assert_eq!(resident(&cache), vec![3, 2, 1]);
    }

    #[test]
    fn test_page_hit_moves_to_front() {
        let mut cache = frames(3);
        cache.access(1);
        cache.access(2);
        cache.access(3);
        assert!(cache.access(1).is_hit());
        assert_eq!(resident(&cache), vec![1, 3, 2]);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_page_reference_trace_eviction_order() {
        let mut cache = frames(3);
        let evicted: Vec<u32> = [0, 1, 2, 3, 0, 3, 4, 2, 3, 2, 1, 3]
            .into_iter()
            .filter_map(|page| cache.access(page).evicted())
            .collect();
        assert_eq!(evicted, vec![0, 1, 2, 0, 4]);
    }

    #[test]
    fn test_page_contains_does_not_reorder() {
        let mut cache = frames(2);
        cache.access(1);
        cache.access(2);
        assert!(cache.contains(&1));
        assert!(!cache.contains(&9));
        assert_eq!(cache.access(3).evicted(), Some(1));
    }

    #[test]
    fn test_page_clear() {
        let mut cache = frames(2);
        cache.access(1);
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.access(1).is_fault());
    }

    #[test]
    fn test_page_metrics() {
        let mut cache = frames(2);
        for page in [1, 2, 1, 3, 1] {
            cache.access(page);
        }
        assert_eq!(cache.stats().page_faults(), 3);
        let metrics = cache.metrics();
        assert_eq!(metrics.get("cache_hits"), Some(&2.0));
        assert_eq!(metrics.get("page_faults"), Some(&3.0));
        assert_eq!(metrics.get("evictions"), Some(&1.0));
        assert_eq!(cache.algorithm_name(), "PAGE-LRU");
    }

    #[test]
    fn test_page_zero_capacity_rejected() {
        assert_eq!(PageCache::<u32>::try_new(0).unwrap_err(), CapacityError::Zero);
    }
}
