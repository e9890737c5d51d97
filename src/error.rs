//! Errors raised when building a cache.
//!
//! A missing key is not an error: lookups return `Option`. The only failure a
//! caller can hit is asking for a cache that cannot hold anything.

use core::fmt::{self, Display, Formatter};

/// Why a cache could not be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityError {
    /// A capacity of zero was requested.
    Zero,
}

impl Display for CapacityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CapacityError::Zero => write!(f, "cache capacity must be greater than zero"),
        }
    }
}

// Allow the error to be used with ?
#[cfg(feature = "std")]
impl std::error::Error for CapacityError {}
