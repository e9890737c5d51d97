//! Configuration for the page-replacement cache.

use crate::error::CapacityError;
use core::fmt;
use core::num::NonZeroUsize;

/// Configuration for a [`PageCache`](crate::PageCache).
///
/// # Fields
///
/// - `capacity`: Number of page frames. Referencing a page that is not
///   resident while every frame is taken pages out the least recently used
///   one.
///
/// # Examples
///
/// ```
/// use sentinel_cache::config::PageCacheConfig;
/// use sentinel_cache::PageCache;
///
/// let config = PageCacheConfig::try_from(3).unwrap();
/// let frames: PageCache<u32> = PageCache::init(config);
/// assert_eq!(frames.cap().get(), 3);
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PageCacheConfig {
    /// Number of page frames.
    pub capacity: NonZeroUsize,
}

impl PageCacheConfig {
    /// Creates a configuration with `capacity` frames.
    pub const fn new(capacity: NonZeroUsize) -> Self {
        PageCacheConfig { capacity }
    }
}

impl TryFrom<usize> for PageCacheConfig {
    type Error = CapacityError;

    fn try_from(capacity: usize) -> Result<Self, Self::Error> {
        let capacity = NonZeroUsize::new(capacity).ok_or(CapacityError::Zero)?;
        Ok(PageCacheConfig { capacity })
    }
}

impl fmt::Debug for PageCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}
