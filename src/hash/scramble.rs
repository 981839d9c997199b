//! Table-driven rolling hash behind the membership filter.
//!
//! The scramble table holds [`MAX_HASHES`] rows of 256 pseudo-random 64-bit
//! constants. Row `n` drives hash slot `n`: every UTF-16 code unit of the
//! input is split into its low and high byte, and each byte folds one table
//! entry into the running state:
//!
//! ```text
//! h = HASH_START
//! for unit in s.encode_utf16():
//!     h = (h * HASH_MULTIPLIER) ^ row[unit & 0xff]
//!     h = (h * HASH_MULTIPLIER) ^ row[unit >> 8]
//! ```
//!
//! Because each slot reads a disjoint row, the slots behave as independent
//! hash functions while sharing one multiply-xor loop.
//!
//! The table is generated from a fixed seed with a xorshift recurrence
//! (right 7, left 11, right 10). All three steps run 31 times per entry, so
//! digests are not interchangeable with generators that repeat only the
//! first step and apply the other two once. It is not a cryptographic
//! construction; it only has to be deterministic and well mixed.
//!
//! # Sharing
//!
//! [`ScrambleTable::global`] builds the process-wide table on first use and
//! hands out `&'static` references afterwards; [`ScrambleTable::shared`]
//! hands out the same table as an `Arc`. Filters hold their table through an
//! `Arc`, so a table built from a custom seed needs no `'static` lifetime.
//! Tables are never mutated after construction, so they are safe to share
//! between filters and threads.
//!
//! # Examples
//!
//! ```
//! use hashcraft::hash::ScrambleTable;
//!
//! let table = ScrambleTable::global();
//! let a = table.digest("hello", 0);
//! let b = table.digest("hello", 0);
//! assert_eq!(a, b);
//! assert_ne!(table.digest("hello", 0), table.digest("hello", 1));
//! ```

use crate::core::params::MAX_HASHES;
use crate::error::{HashCraftError, Result};
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Seed of the process-wide table.
pub const TABLE_SEED: u64 = 0x544B_2FBA_CAAF_1684;

/// Initial state of every digest.
pub const HASH_START: u64 = 0xBB40_E64D_A205_B064;

/// Multiplier applied before each table entry is folded in.
pub const HASH_MULTIPLIER: u64 = 7_664_345_821_815_920_749;

/// Xorshift rounds between consecutive table entries.
const MIX_ROUNDS: usize = 31;

/// Entries per row, one per byte value.
const ROW_LEN: usize = 256;

/// Immutable per-slot scramble constants.
#[derive(Clone, PartialEq, Eq)]
pub struct ScrambleTable {
    rows: Box<[[u64; ROW_LEN]; MAX_HASHES]>,
}

impl ScrambleTable {
    /// The process-wide table, generated from [`TABLE_SEED`] on first call.
    #[must_use]
    pub fn global() -> &'static ScrambleTable {
        Self::global_arc()
    }

    /// The process-wide table as a shared handle.
    #[must_use]
    pub fn shared() -> Arc<ScrambleTable> {
        Arc::clone(Self::global_arc())
    }

    fn global_arc() -> &'static Arc<ScrambleTable> {
        static TABLE: OnceLock<Arc<ScrambleTable>> = OnceLock::new();

        TABLE.get_or_init(|| Arc::new(Self::generate(TABLE_SEED)))
    }

    /// Build a table from a custom seed.
    ///
    /// # Errors
    ///
    /// Returns [`HashCraftError::InvalidParameters`] for a zero seed, which
    /// is a fixed point of the xorshift recurrence and would yield an
    /// all-zero table.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashcraft::hash::ScrambleTable;
    ///
    /// let table = ScrambleTable::build(42).unwrap();
    /// assert_ne!(table.digest("x", 0), ScrambleTable::global().digest("x", 0));
    /// assert!(ScrambleTable::build(0).is_err());
    /// ```
    pub fn build(seed: u64) -> Result<Self> {
        if seed == 0 {
            return Err(HashCraftError::invalid_parameters(
                "scramble table seed must be non-zero",
            ));
        }

        Ok(Self::generate(seed))
    }

    fn generate(seed: u64) -> Self {
        let mut rows = Box::new([[0u64; ROW_LEN]; MAX_HASHES]);
        let mut h = seed;

        for entry in rows.iter_mut().flat_map(|row| row.iter_mut()) {
            for _ in 0..MIX_ROUNDS {
                h ^= h >> 7;
                h ^= h << 11;
                h ^= h >> 10;
            }
            *entry = h;
        }

        Self { rows }
    }

    /// Raw table entry for `(slot, byte)`.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= MAX_HASHES`.
    #[must_use]
    #[inline]
    pub fn entry(&self, slot: usize, byte: u8) -> u64 {
        self.rows[slot][usize::from(byte)]
    }

    /// 64-bit digest of `s` for hash slot `slot`.
    ///
    /// Identical inputs always produce identical digests, in every table
    /// built from the same seed.
    ///
    /// # Panics
    ///
    /// Panics if `slot >= MAX_HASHES`.
    #[must_use]
    pub fn digest(&self, s: &str, slot: usize) -> u64 {
        let row = &self.rows[slot];

        s.encode_utf16().fold(HASH_START, |h, unit| {
            let h = h.wrapping_mul(HASH_MULTIPLIER) ^ row[usize::from(unit & 0xff)];
            h.wrapping_mul(HASH_MULTIPLIER) ^ row[usize::from(unit >> 8)]
        })
    }

    /// Bit indices for the first `hash_count` slots, each digest masked
    /// with `mask`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashcraft::hash::ScrambleTable;
    ///
    /// let mask = (1 << 10) - 1;
    /// let indices: Vec<usize> = ScrambleTable::global().bit_indices("hello", 3, mask).collect();
    /// assert_eq!(indices.len(), 3);
    /// assert!(indices.iter().all(|&i| i <= mask));
    /// ```
    pub fn bit_indices<'a>(
        &'a self,
        s: &'a str,
        hash_count: usize,
        mask: usize,
    ) -> impl Iterator<Item = usize> + 'a {
        (0..hash_count).map(move |slot| (self.digest(s, slot) as usize) & mask)
    }
}

impl fmt::Debug for ScrambleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrambleTable")
            .field("slots", &MAX_HASHES)
            .field("first_entry", &format_args!("{:#018x}", self.rows[0][0]))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_deterministic() {
        let table = ScrambleTable::global();
        for slot in 0..MAX_HASHES {
            assert_eq!(table.digest("hello", slot), table.digest("hello", slot));
        }
    }

    #[test]
    fn test_same_seed_same_table() {
        let rebuilt = ScrambleTable::build(TABLE_SEED).unwrap();
        assert_eq!(&rebuilt, ScrambleTable::global());
        assert_eq!(rebuilt.digest("abc", 5), ScrambleTable::global().digest("abc", 5));
    }

    #[test]
    fn test_global_is_shared() {
        assert!(std::ptr::eq(ScrambleTable::global(), ScrambleTable::global()));
        assert!(std::ptr::eq(&*ScrambleTable::shared(), ScrambleTable::global()));
    }

    #[test]
    fn test_recurrence_vectors() {
        // All three xorshift steps repeated MIX_ROUNDS times per entry
        let table = ScrambleTable::global();
        assert_eq!(table.entry(0, 0), 0xcfb2_b99d_0cdb_12a6);
        assert_eq!(table.entry(0, 1), 0xd219_e697_e4ad_6e46);
        assert_eq!(table.entry(0, 2), 0x1f64_4a12_48cf_37e7);
        assert_eq!(table.entry(MAX_HASHES - 1, 255), 0x3b92_3209_9d4f_41ec);
    }

    #[test]
    fn test_single_step_rounds_differ() {
        // Repeating only the right-7 step, then left-11 and right-10 once
        let mut h = TABLE_SEED;
        for _ in 0..MIX_ROUNDS {
            h ^= h >> 7;
        }
        h ^= h << 11;
        h ^= h >> 10;
        assert_ne!(ScrambleTable::global().entry(0, 0), h);
    }

    #[test]
    fn test_slots_are_distinct() {
        let table = ScrambleTable::global();
        let digests: Vec<u64> = (0..MAX_HASHES).map(|slot| table.digest("hello", slot)).collect();
        for i in 0..digests.len() {
            for j in (i + 1)..digests.len() {
                assert_ne!(digests[i], digests[j], "slots {} and {} collide", i, j);
            }
        }
    }

    #[test]
    fn test_rows_differ() {
        let table = ScrambleTable::global();
        assert_ne!(table.entry(0, 0), table.entry(1, 0));
        assert_ne!(table.entry(0, 0), table.entry(0, 1));
    }

    #[test]
    fn test_empty_string_is_start_state() {
        let table = ScrambleTable::global();
        for slot in 0..MAX_HASHES {
            assert_eq!(table.digest("", slot), HASH_START);
        }
    }

    #[test]
    fn test_digest_matches_manual_fold() {
        let table = ScrambleTable::global();
        // 'é' is U+00E9: low byte 0xE9, high byte 0x00
        let mut h = HASH_START;
        h = h.wrapping_mul(HASH_MULTIPLIER) ^ table.entry(2, 0xE9);
        h = h.wrapping_mul(HASH_MULTIPLIER) ^ table.entry(2, 0x00);
        assert_eq!(table.digest("é", 2), h);
    }

    #[test]
    fn test_high_byte_contributes() {
        let table = ScrambleTable::global();
        // U+0141 and U+0041 share a low byte
        assert_ne!(table.digest("Ł", 0), table.digest("A", 0));
    }

    #[test]
    fn test_order_sensitive() {
        let table = ScrambleTable::global();
        assert_ne!(table.digest("ab", 0), table.digest("ba", 0));
    }

    #[test]
    fn test_zero_seed_rejected() {
        assert!(ScrambleTable::build(0).is_err());
    }

    #[test]
    #[should_panic]
    fn test_slot_out_of_range_panics() {
        let _ = ScrambleTable::global().digest("x", MAX_HASHES);
    }
}
