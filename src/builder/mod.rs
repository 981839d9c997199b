//! Builder pattern for filter and map construction.
//!
//! Builders use the type-state pattern: `build()` only exists once every
//! required parameter is set, so a missing parameter is a compile error and
//! only out-of-range values are reported at runtime.
//!
//! # Examples
//!
//! ## Membership Filter Builder
//!
//! ```
//! use hashcraft::builder::MembershipFilterBuilder;
//!
//! let mut filter = MembershipFilterBuilder::new()
//!     .expected_items(10_000)
//!     .false_positive_rate(0.01)
//!     .build()
//!     .unwrap();
//! filter.add("hello");
//! ```
//!
//! ## Displacement Map Builder
//!
//! ```
//! use hashcraft::builder::DisplacementMapBuilder;
//! use hashcraft::DisplacementMap;
//!
//! let map: DisplacementMap<u64, String> = DisplacementMapBuilder::new()
//!     .initial_capacity(1_024)
//!     .max_rehashes(8)  // Optional, defaults to 16
//!     .build()
//!     .unwrap();
//! ```
//!
//! # Builder Comparison
//!
//! | Builder | Required Parameters | Optional Parameters |
//! |---------|---------------------|---------------------|
//! | Membership | items + fp_rate, or log2_bits + hash_count | table |
//! | Displacement | initial_capacity | seeds, max_rehashes, hasher |

#![allow(clippy::module_name_repetitions)]

pub mod displacement;
pub mod membership;

pub use displacement::DisplacementMapBuilder;
pub use membership::MembershipFilterBuilder;

/// Common validation functions for the builders.
mod validation {
    use crate::error::{HashCraftError, Result};

    /// Validate expected items count.
    ///
    /// # Errors
    ///
    /// Returns error if `items == 0`.
    #[inline]
    pub fn validate_items(items: usize) -> Result<()> {
        if items == 0 {
            return Err(HashCraftError::invalid_item_count(items));
        }
        Ok(())
    }

    /// Validate false positive rate.
    ///
    /// # Errors
    ///
    /// Returns error if `fp_rate` is not in (0, 1), NaN included.
    #[inline]
    pub fn validate_fp_rate(fp_rate: f64) -> Result<()> {
        if fp_rate.is_nan() || fp_rate <= 0.0 || fp_rate >= 1.0 {
            return Err(HashCraftError::fp_rate_out_of_bounds(fp_rate));
        }
        Ok(())
    }
}

/// Prelude for convenient builder imports.
pub mod prelude {
    pub use super::{DisplacementMapBuilder, MembershipFilterBuilder};
}

#[cfg(test)]
mod tests {
    use super::validation::*;

    #[test]
    fn test_validate_items() {
        assert!(validate_items(1).is_ok());
        assert!(validate_items(1000).is_ok());
        assert!(validate_items(0).is_err());
    }

    #[test]
    fn test_validate_fp_rate() {
        assert!(validate_fp_rate(0.01).is_ok());
        assert!(validate_fp_rate(0.5).is_ok());
        assert!(validate_fp_rate(0.0).is_err());
        assert!(validate_fp_rate(1.0).is_err());
        assert!(validate_fp_rate(-0.1).is_err());
        assert!(validate_fp_rate(f64::NAN).is_err());
    }
}
