//! Word-packed bit vector backing the membership filter.
//!
//! `BitVec` is a fixed-size bit array backed by `Box<[u64]>`. Bits are packed
//! into 64-bit words in little-endian bit order:
//!
//! ```text
//! Word 0: [bit 0][bit 1]...[bit 63]
//! Word 1: [bit 64][bit 65]...[bit 127]
//! ```
//!
//! The vector has no operation that clears a single bit: a filter built on it
//! can only ever gain bits, which is what keeps membership answers monotonic.
//!
//! # Performance Characteristics
//!
//! - Space: `⌈n/64⌉ * 8` bytes for `n` bits
//! - `set` / `get`: O(1)
//! - `count_ones`: O(n/64), uses the CPU POPCNT instruction where available
//!
//! # Examples
//!
//! ```
//! use hashcraft::core::bitvec::BitVec;
//!
//! let mut bv = BitVec::new(100).unwrap();
//! bv.set(42);
//! assert!(bv.get(42));
//! assert!(!bv.get(43));
//! assert_eq!(bv.count_ones(), 1);
//! ```

use crate::error::{HashCraftError, Result};

/// Fixed-size bit vector with set-only mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitVec {
    /// Words, each storing 64 bits.
    blocks: Box<[u64]>,

    /// Total number of bits in the vector.
    len: usize,
}

impl BitVec {
    /// Create a new bit vector with `num_bits` bits, all cleared.
    ///
    /// # Errors
    ///
    /// Returns [`HashCraftError::InvalidParameters`] if `num_bits` is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashcraft::core::bitvec::BitVec;
    ///
    /// let bv = BitVec::new(1000).unwrap();
    /// assert_eq!(bv.len(), 1000);
    /// assert_eq!(bv.count_ones(), 0);
    /// ```
    pub fn new(num_bits: usize) -> Result<Self> {
        if num_bits == 0 {
            return Err(HashCraftError::invalid_parameters(
                "BitVec size must be greater than 0",
            ));
        }

        let num_blocks = (num_bits + 63) / 64;

        Ok(Self {
            blocks: vec![0u64; num_blocks].into_boxed_slice(),
            len: num_bits,
        })
    }

    /// Number of bits in the vector.
    #[must_use]
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Always `false` for a successfully constructed vector.
    #[must_use]
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Set a bit to 1. Idempotent.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`, matching slice indexing.
    #[inline]
    pub fn set(&mut self, index: usize) {
        assert!(
            index < self.len,
            "BitVec index out of bounds: index={} len={}",
            index,
            self.len
        );

        self.blocks[index / 64] |= 1u64 << (index % 64);
    }

    /// Read a bit.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[must_use]
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        assert!(
            index < self.len,
            "BitVec index out of bounds: index={} len={}",
            index,
            self.len
        );

        (self.blocks[index / 64] >> (index % 64)) & 1 == 1
    }

    /// Count the bits set to 1.
    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.blocks.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// `true` when no bit is set.
    #[must_use]
    pub fn none_set(&self) -> bool {
        self.blocks.iter().all(|&word| word == 0)
    }

    /// OR every bit of `other` into `self`.
    ///
    /// # Errors
    ///
    /// Returns [`HashCraftError::IncompatibleFilters`] if the lengths differ.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashcraft::core::bitvec::BitVec;
    ///
    /// let mut a = BitVec::new(64).unwrap();
    /// let mut b = BitVec::new(64).unwrap();
    /// a.set(10);
    /// b.set(20);
    ///
    /// a.union_with(&b).unwrap();
    /// assert!(a.get(10) && a.get(20));
    /// ```
    pub fn union_with(&mut self, other: &Self) -> Result<()> {
        if self.len != other.len {
            return Err(HashCraftError::incompatible_filters(format!(
                "bit vector lengths differ: {} vs {}",
                self.len, other.len
            )));
        }

        for (dst, src) in self.blocks.iter_mut().zip(other.blocks.iter()) {
            *dst |= *src;
        }

        Ok(())
    }

    /// Number of 64-bit words allocated.
    #[must_use]
    #[inline]
    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Heap bytes used by the bit storage.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.blocks.len() * std::mem::size_of::<u64>()
    }
}
