//! Error types for HashCraft operations.
//!
//! Every fallible constructor and the growth path of
//! [`DisplacementMap::put`](crate::map::DisplacementMap::put) report failures
//! through [`HashCraftError`]. Lookups, membership queries and removals are
//! total and never produce an error.
//!
//! # Error Propagation
//!
//! ```
//! use hashcraft::{Result, MembershipFilter};
//!
//! fn seen_before(words: &[&str], probe: &str) -> Result<bool> {
//!     let mut filter = MembershipFilter::new(12, 3)?;
//!     filter.add_all(words.iter().copied());
//!     Ok(filter.contains(probe))
//! }
//! # assert!(seen_before(&["alpha", "beta"], "alpha").unwrap());
//! ```

#![allow(clippy::module_name_repetitions)]

use std::fmt;

/// Result type alias for HashCraft operations.
pub type Result<T> = std::result::Result<T, HashCraftError>;

/// Errors that can occur while building or growing the data structures.
///
/// `Clone` + `PartialEq` keep errors easy to compare in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum HashCraftError {
    /// Parameters are inconsistent in a way no narrower variant describes.
    InvalidParameters {
        /// Human-readable description of what's invalid.
        message: String,
    },

    /// The base-2 logarithm of the filter's bit count is out of range.
    InvalidBitCount {
        /// The rejected exponent.
        log2_bits: u32,
        /// Smallest accepted exponent.
        min: u32,
        /// Largest accepted exponent.
        max: u32,
    },

    /// Number of hash slots is out of range.
    InvalidHashCount {
        /// The invalid hash count provided.
        count: usize,
        /// Minimum allowed value.
        min: usize,
        /// Maximum allowed value.
        max: usize,
    },

    /// A displacement map needs at least one slot.
    InvalidCapacity {
        /// The rejected capacity.
        capacity: usize,
    },

    /// Expected item count must be positive.
    InvalidItemCount {
        /// The invalid count that was provided.
        count: usize,
    },

    /// False positive rate outside the open interval (0, 1).
    FalsePositiveRateOutOfBounds {
        /// The invalid false positive rate that was provided.
        fp_rate: f64,
    },

    /// Two filters cannot be combined because their geometry differs.
    IncompatibleFilters {
        /// Description of the incompatibility.
        reason: String,
    },

    /// A single insertion needed more growth steps than the map allows.
    ///
    /// The map is left exactly as it was before the insertion.
    RehashLimitExceeded {
        /// Capacity of the map, unchanged by the failed insertion.
        capacity: usize,
        /// Number of growth attempts made.
        rehashes: usize,
    },

    /// Growing the slot array would overflow `usize`.
    CapacityOverflow {
        /// Capacity that could not be grown further.
        capacity: usize,
    },
}

impl fmt::Display for HashCraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameters { message } => {
                write!(f, "Invalid parameters: {}.", message)
            }
            Self::InvalidBitCount { log2_bits, min, max } => {
                write!(
                    f,
                    "Invalid number of bits: 2^{}. Exponent must be in range [{}, {}].",
                    log2_bits, min, max
                )
            }
            Self::InvalidHashCount { count, min, max } => {
                write!(
                    f,
                    "Invalid number of hashes: {}. Must be in range [{}, {}].",
                    count, min, max
                )
            }
            Self::InvalidCapacity { capacity } => {
                write!(
                    f,
                    "Invalid capacity: {}. A displacement map needs at least one slot.",
                    capacity
                )
            }
            Self::InvalidItemCount { count } => {
                write!(
                    f,
                    "Invalid item count: {}. Expected items must be greater than 0.",
                    count
                )
            }
            Self::FalsePositiveRateOutOfBounds { fp_rate } => {
                write!(
                    f,
                    "False positive rate {} is out of bounds. Must be in range (0, 1).",
                    fp_rate
                )
            }
            Self::IncompatibleFilters { reason } => {
                write!(
                    f,
                    "Cannot perform operation on incompatible filters: {}.",
                    reason
                )
            }
            Self::RehashLimitExceeded { capacity, rehashes } => {
                write!(
                    f,
                    "Insertion abandoned after {} rehashes (capacity {}). Keys may share hash codes.",
                    rehashes, capacity
                )
            }
            Self::CapacityOverflow { capacity } => {
                write!(f, "Cannot grow capacity {} without overflow.", capacity)
            }
        }
    }
}

impl std::error::Error for HashCraftError {}

impl HashCraftError {
    /// Create an `InvalidParameters` error with a formatted message.
    #[must_use]
    pub fn invalid_parameters(message: impl Into<String>) -> Self {
        Self::InvalidParameters {
            message: message.into(),
        }
    }

    /// Create an `InvalidBitCount` error.
    #[must_use]
    pub fn invalid_bit_count(log2_bits: u32, min: u32, max: u32) -> Self {
        Self::InvalidBitCount { log2_bits, min, max }
    }

    /// Create an `InvalidHashCount` error.
    #[must_use]
    pub fn invalid_hash_count(count: usize, min: usize, max: usize) -> Self {
        Self::InvalidHashCount { count, min, max }
    }

    /// Create an `InvalidCapacity` error.
    #[must_use]
    pub fn invalid_capacity(capacity: usize) -> Self {
        Self::InvalidCapacity { capacity }
    }

    /// Create an `InvalidItemCount` error.
    #[must_use]
    pub fn invalid_item_count(count: usize) -> Self {
        Self::InvalidItemCount { count }
    }

    /// Create a `FalsePositiveRateOutOfBounds` error.
    #[must_use]
    pub fn fp_rate_out_of_bounds(fp_rate: f64) -> Self {
        Self::FalsePositiveRateOutOfBounds { fp_rate }
    }

    /// Create an `IncompatibleFilters` error.
    #[must_use]
    pub fn incompatible_filters(reason: impl Into<String>) -> Self {
        Self::IncompatibleFilters {
            reason: reason.into(),
        }
    }

    /// Create a `RehashLimitExceeded` error.
    #[must_use]
    pub fn rehash_limit_exceeded(capacity: usize, rehashes: usize) -> Self {
        Self::RehashLimitExceeded { capacity, rehashes }
    }

    /// Create a `CapacityOverflow` error.
    #[must_use]
    pub fn capacity_overflow(capacity: usize) -> Self {
        Self::CapacityOverflow { capacity }
    }
}
