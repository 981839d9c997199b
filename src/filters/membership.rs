//! Scramble-table Bloom filter over strings.
//!
//! A [`MembershipFilter`] owns `2^log2_bits` bits and tests membership with
//! `hash_count` independent digests from the shared
//! [`ScrambleTable`](crate::hash::ScrambleTable). Each digest is masked with
//! `2^log2_bits - 1` to pick a bit.
//!
//! # Guarantees
//!
//! - **No false negatives**: after `add(s)`, `contains(s)` is `true` forever.
//!   Bits are only ever set, never cleared.
//! - **Possible false positives**: a string never added may still be
//!   reported present once its bits were set by other strings.
//!
//! # Examples
//!
//! ```
//! use hashcraft::filters::MembershipFilter;
//!
//! let mut filter = MembershipFilter::new(10, 3).unwrap();
//! filter.add("hello");
//!
//! assert!(filter.contains("hello"));
//! // "world" may or may not be reported; "hello" always is
//! let _maybe = filter.contains("world");
//! ```
//!
//! ## Sizing from a target rate
//!
//! ```
//! use hashcraft::builder::MembershipFilterBuilder;
//!
//! let filter = MembershipFilterBuilder::new()
//!     .expected_items(10_000)
//!     .false_positive_rate(0.01)
//!     .build()
//!     .unwrap();
//! assert_eq!(filter.log2_bits(), 17);
//! assert_eq!(filter.hash_count(), 8);
//! ```

#![allow(clippy::cast_precision_loss)]

use crate::core::bitvec::BitVec;
use crate::core::params::validate_geometry;
use crate::error::{HashCraftError, Result};
use crate::hash::ScrambleTable;
use std::sync::Arc;

/// Bloom filter over strings with a fixed power-of-two bit count.
///
/// # Thread Safety
///
/// `add` takes `&mut self`; share behind a lock if several threads write.
/// Queries on a shared reference are safe from any thread.
#[derive(Debug, Clone)]
pub struct MembershipFilter {
    bits: BitVec,
    log2_bits: u32,
    hash_count: usize,
    hash_mask: usize,
    table: Arc<ScrambleTable>,
}

impl MembershipFilter {
    /// Create an empty filter of `2^log2_bits` bits using `hash_count`
    /// hash slots and the process-wide scramble table.
    ///
    /// # Errors
    ///
    /// - [`HashCraftError::InvalidBitCount`] if `log2_bits` is not in [1, 31]
    /// - [`HashCraftError::InvalidHashCount`] if `hash_count` is not in [1, 8]
    ///
    /// # Examples
    ///
    /// ```
    /// use hashcraft::filters::MembershipFilter;
    ///
    /// assert!(MembershipFilter::new(10, 3).is_ok());
    /// assert!(MembershipFilter::new(32, 3).is_err());
    /// assert!(MembershipFilter::new(10, 9).is_err());
    /// ```
    pub fn new(log2_bits: u32, hash_count: usize) -> Result<Self> {
        Self::with_table(log2_bits, hash_count, ScrambleTable::shared())
    }

    /// Create a filter that hashes through an explicit scramble table.
    ///
    /// Filters only agree on digests (and can only be merged) when they share
    /// a table built from the same seed.
    ///
    /// # Errors
    ///
    /// Same as [`MembershipFilter::new`].
    ///
    /// # Examples
    ///
    /// ```
    /// use hashcraft::filters::MembershipFilter;
    /// use hashcraft::hash::ScrambleTable;
    /// use std::sync::Arc;
    ///
    /// let table = Arc::new(ScrambleTable::build(42).unwrap());
    /// let mut filter = MembershipFilter::with_table(10, 3, Arc::clone(&table)).unwrap();
    /// filter.add("seeded");
    /// assert!(filter.contains("seeded"));
    /// ```
    pub fn with_table(
        log2_bits: u32,
        hash_count: usize,
        table: Arc<ScrambleTable>,
    ) -> Result<Self> {
        validate_geometry(log2_bits, hash_count)?;

        let bit_count = 1usize << log2_bits;

        Ok(Self {
            bits: BitVec::new(bit_count)?,
            log2_bits,
            hash_count,
            hash_mask: bit_count - 1,
            table,
        })
    }

    /// Record `s` as a member. Idempotent.
    pub fn add(&mut self, s: &str) {
        for index in self.table.bit_indices(s, self.hash_count, self.hash_mask) {
            self.bits.set(index);
        }
    }

    /// Record every string yielded by `items`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashcraft::filters::MembershipFilter;
    ///
    /// let mut filter = MembershipFilter::new(12, 4).unwrap();
    /// filter.add_all(["apple", "banana", "cherry"]);
    /// assert!(filter.contains("banana"));
    /// ```
    pub fn add_all<'a, I>(&mut self, items: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for item in items {
            self.add(item);
        }
    }

    /// `true` iff every bit selected by `s` is set.
    ///
    /// Never `false` for a string that was added.
    #[must_use]
    pub fn contains(&self, s: &str) -> bool {
        self.table
            .bit_indices(s, self.hash_count, self.hash_mask)
            .all(|index| self.bits.get(index))
    }

    /// Number of bits, `2^log2_bits`.
    #[must_use]
    #[inline]
    pub fn bit_count(&self) -> usize {
        self.bits.len()
    }

    /// Base-2 logarithm of the bit count.
    #[must_use]
    #[inline]
    pub fn log2_bits(&self) -> u32 {
        self.log2_bits
    }

    /// Number of hash slots consulted per string.
    #[must_use]
    #[inline]
    pub fn hash_count(&self) -> usize {
        self.hash_count
    }

    /// `true` until the first `add`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.none_set()
    }

    /// Number of bits currently set.
    #[must_use]
    pub fn count_set_bits(&self) -> usize {
        self.bits.count_ones()
    }

    /// Fraction of bits set, in [0.0, 1.0].
    #[must_use]
    pub fn fill_rate(&self) -> f64 {
        self.count_set_bits() as f64 / self.bit_count() as f64
    }

    /// Estimate the current false positive rate from the fill rate.
    ///
    /// With every bit equally likely to be set, a string that was never
    /// added passes all `k` probes with probability `fill_rate^k`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashcraft::filters::MembershipFilter;
    ///
    /// let mut filter = MembershipFilter::new(14, 7).unwrap();
    /// assert_eq!(filter.estimate_fpr(), 0.0);
    ///
    /// for i in 0..1000 {
    ///     filter.add(&format!("item-{i}"));
    /// }
    /// let fpr = filter.estimate_fpr();
    /// assert!(fpr > 0.0 && fpr < 0.05);
    /// ```
    #[must_use]
    pub fn estimate_fpr(&self) -> f64 {
        self.fill_rate().powi(self.hash_count as i32)
    }

    /// Merge `other` into `self`; afterwards `self` contains every string
    /// either filter contained.
    ///
    /// # Errors
    ///
    /// Returns [`HashCraftError::IncompatibleFilters`] unless both filters
    /// have the same bit count, hash count and scramble table contents.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashcraft::filters::MembershipFilter;
    ///
    /// let mut a = MembershipFilter::new(10, 3).unwrap();
    /// let mut b = MembershipFilter::new(10, 3).unwrap();
    /// a.add("left");
    /// b.add("right");
    ///
    /// a.union_with(&b).unwrap();
    /// assert!(a.contains("left") && a.contains("right"));
    /// ```
    pub fn union_with(&mut self, other: &Self) -> Result<()> {
        if self.log2_bits != other.log2_bits {
            return Err(HashCraftError::incompatible_filters(format!(
                "bit counts differ: 2^{} vs 2^{}",
                self.log2_bits, other.log2_bits
            )));
        }

        if self.hash_count != other.hash_count {
            return Err(HashCraftError::incompatible_filters(format!(
                "hash counts differ: {} vs {}",
                self.hash_count, other.hash_count
            )));
        }

        if !Arc::ptr_eq(&self.table, &other.table) && self.table != other.table {
            return Err(HashCraftError::incompatible_filters(
                "filters use different scramble tables",
            ));
        }

        self.bits.union_with(&other.bits)
    }

    /// Heap bytes used by the bit array.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.bits.memory_usage()
    }
}
