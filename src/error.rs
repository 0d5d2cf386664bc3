//! Failures while growing the bucket array.
//!
//! None of these are recoverable: [`ChainedHashMap::put`](crate::ChainedHashMap::put) turns
//! them into a process abort through [`fatal`]. They are surfaced as values only by
//! [`ChainedHashMap::try_put`](crate::ChainedHashMap::try_put), so a caller can report the
//! failure before it terminates.
//!
//! Tests cover how each variant is produced and rendered. A `try_put` that actually fails is
//! not exercised, since reaching it needs a bucket array near `usize::MAX / 3`.

use std::collections::TryReserveError;

use thiserror::Error;

/// The bucket array could not be grown.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapacityError {
    /// Multiplying the capacity by the growth factor overflowed `usize`
    #[error("bucket capacity {capacity} cannot grow any further")]
    Overflow {
        /// Capacity at the time of the failed resize
        capacity: usize,
    },
    /// The allocator refused the new bucket array
    #[error("failed to allocate {capacity} buckets")]
    Alloc {
        /// Requested number of buckets
        capacity: usize,
        /// Error reported by the allocator
        #[source]
        source: TryReserveError,
    },
}

/// Logs `err` and aborts the process.
#[cold]
pub fn fatal(err: &CapacityError) -> ! {
    log::error!("chainmap: {err}");
    eprintln!("chainmap: {err}");
    std::process::abort()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_message() {
        let err = CapacityError::Overflow { capacity: 42 };
        assert_eq!(err.to_string(), "bucket capacity 42 cannot grow any further");
    }

    #[test]
    fn test_alloc_keeps_source() {
        let source = Vec::<u64>::new()
            .try_reserve_exact(usize::MAX)
            .expect_err("reserving usize::MAX elements must fail");
        let err = CapacityError::Alloc { capacity: usize::MAX, source };

        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("failed to allocate"));
    }
}
