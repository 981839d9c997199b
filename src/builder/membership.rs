//! Builder for membership filters.
//!
//! # Type-State Pattern
//!
//! A filter is sized either explicitly or from a capacity target. The
//! builder only offers `build()` once one of the two paths is complete:
//!
//! ```text
//! Initial ─ .expected_items() → WithItems ─ .false_positive_rate() ┐
//!    │                                                             ├→ Complete → .build()
//!    └──── .log2_bits() ─────→ WithBits ── .hash_count() ──────────┘
//! ```
//!
//! # Examples
//!
//! ## Sized from a target rate
//!
//! ```
//! use hashcraft::builder::MembershipFilterBuilder;
//!
//! let filter = MembershipFilterBuilder::new()
//!     .expected_items(1_000)
//!     .false_positive_rate(0.01)
//!     .build()
//!     .unwrap();
//!
//! // ≈9586 bits round up to 2^14
//! assert_eq!(filter.log2_bits(), 14);
//! ```
//!
//! ## Explicit geometry
//!
//! ```
//! use hashcraft::builder::MembershipFilterBuilder;
//!
//! let filter = MembershipFilterBuilder::new()
//!     .log2_bits(12)
//!     .hash_count(4)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(filter.bit_count(), 4096);
//! ```
//!
//! ## Error Handling
//!
//! ```
//! use hashcraft::builder::MembershipFilterBuilder;
//!
//! let result = MembershipFilterBuilder::new()
//!     .expected_items(0)
//!     .false_positive_rate(0.01)
//!     .build();
//!
//! assert!(result.is_err());
//! ```

use super::validation::{validate_fp_rate, validate_items};
use crate::core::params;
use crate::error::Result;
use crate::filters::MembershipFilter;
use crate::hash::ScrambleTable;
use std::marker::PhantomData;
use std::sync::Arc;

/// Type-state marker: no sizing chosen yet.
pub struct Initial;

/// Type-state marker: expected item count set, rate pending.
pub struct WithItems;

/// Type-state marker: bit exponent set, hash count pending.
pub struct WithBits;

/// Type-state marker: sizing complete.
pub struct Complete;

/// Builder for [`MembershipFilter`] with type-state guarantees.
pub struct MembershipFilterBuilder<State> {
    expected_items: Option<usize>,
    fp_rate: Option<f64>,
    log2_bits: Option<u32>,
    hash_count: Option<usize>,
    table: Arc<ScrambleTable>,
    _state: PhantomData<State>,
}

impl MembershipFilterBuilder<Initial> {
    /// Create a builder hashing through the process-wide scramble table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            expected_items: None,
            fp_rate: None,
            log2_bits: None,
            hash_count: None,
            table: ScrambleTable::shared(),
            _state: PhantomData,
        }
    }

    /// Size for `items` expected insertions.
    #[must_use]
    pub fn expected_items(mut self, items: usize) -> MembershipFilterBuilder<WithItems> {
        self.expected_items = Some(items);
        self.transition()
    }

    /// Use exactly `2^log2_bits` bits.
    #[must_use]
    pub fn log2_bits(mut self, log2_bits: u32) -> MembershipFilterBuilder<WithBits> {
        self.log2_bits = Some(log2_bits);
        self.transition()
    }
}

impl Default for MembershipFilterBuilder<Initial> {
    fn default() -> Self {
        Self::new()
    }
}

impl MembershipFilterBuilder<WithItems> {
    /// Target false positive rate at the expected item count.
    #[must_use]
    pub fn false_positive_rate(mut self, fp_rate: f64) -> MembershipFilterBuilder<Complete> {
        self.fp_rate = Some(fp_rate);
        self.transition()
    }
}

impl MembershipFilterBuilder<WithBits> {
    /// Number of digests per string, in `[1, 8]`.
    #[must_use]
    pub fn hash_count(mut self, hash_count: usize) -> MembershipFilterBuilder<Complete> {
        self.hash_count = Some(hash_count);
        self.transition()
    }
}

impl<State> MembershipFilterBuilder<State> {
    /// Hash through `table` instead of the process-wide one.
    #[must_use]
    pub fn table(mut self, table: Arc<ScrambleTable>) -> Self {
        self.table = table;
        self
    }

    fn transition<Next>(self) -> MembershipFilterBuilder<Next> {
        MembershipFilterBuilder {
            expected_items: self.expected_items,
            fp_rate: self.fp_rate,
            log2_bits: self.log2_bits,
            hash_count: self.hash_count,
            table: self.table,
            _state: PhantomData,
        }
    }
}

impl MembershipFilterBuilder<Complete> {
    /// Resolve the geometry and build the filter.
    ///
    /// For a target, the bit count is the optimal one rounded up to a power
    /// of two, and the hash count is optimal for that rounded size, clamped
    /// to `[1, 8]`.
    ///
    /// # Errors
    ///
    /// - [`InvalidItemCount`](crate::HashCraftError::InvalidItemCount) if the
    ///   expected item count is 0
    /// - [`FalsePositiveRateOutOfBounds`](crate::HashCraftError::FalsePositiveRateOutOfBounds)
    ///   if the rate is outside (0, 1)
    /// - [`InvalidBitCount`](crate::HashCraftError::InvalidBitCount) or
    ///   [`InvalidHashCount`](crate::HashCraftError::InvalidHashCount) for
    ///   geometry outside the supported range
    pub fn build(self) -> Result<MembershipFilter> {
        let (log2_bits, hash_count) = self.geometry()?;
        MembershipFilter::with_table(log2_bits, hash_count, self.table)
    }

    /// The `(log2_bits, hash_count)` pair `build` would use.
    ///
    /// # Errors
    ///
    /// Same as [`build`](Self::build), minus the explicit-geometry range
    /// checks.
    pub fn geometry(&self) -> Result<(u32, usize)> {
        if let (Some(log2_bits), Some(hash_count)) = (self.log2_bits, self.hash_count) {
            return Ok((log2_bits, hash_count));
        }

        // Complete without explicit geometry means the target path was taken
        let items = self.expected_items.unwrap_or(0);
        let fp_rate = self.fp_rate.unwrap_or(f64::NAN);
        validate_items(items)?;
        validate_fp_rate(fp_rate)?;

        let log2_bits = params::optimal_log2_bits(items, fp_rate)?;
        let hash_count = params::optimal_hash_count(1usize << log2_bits, items)?;
        Ok((log2_bits, hash_count))
    }
}
