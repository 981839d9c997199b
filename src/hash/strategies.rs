//! Candidate slot selection for two-choice displacement hashing.
//!
//! Every key has exactly two candidate slots in a table of `capacity` slots,
//! both derived from the key's 64-bit hash code `h`:
//!
//! ```text
//! primary(h)   = h mod capacity
//! secondary(h) = (seed_a · seed_b + h) mod capacity
//! ```
//!
//! Both functions depend on the capacity, so growing the table moves every
//! key's candidates. When `seed_a · seed_b` is a multiple of the capacity the
//! two candidates coincide; the displacement loop tolerates that and simply
//! falls through to a rehash sooner.
//!
//! # Examples
//!
//! ```
//! use hashcraft::hash::TwoChoice;
//!
//! let probe = TwoChoice::default(); // seeds 37 and 17
//! assert_eq!(probe.primary(12, 11), 1);
//! assert_eq!(probe.secondary(12, 11), 3); // (629 + 12) mod 11
//! assert_eq!(probe.alternate(12, 11, 1), 3);
//! assert_eq!(probe.alternate(12, 11, 3), 1);
//! ```

#![allow(clippy::cast_possible_truncation)]

/// Default first seed of the secondary hash.
pub const DEFAULT_SEED_A: u64 = 37;

/// Default second seed of the secondary hash.
pub const DEFAULT_SEED_B: u64 = 17;

/// The pair of hash functions used by the displacement map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoChoice {
    seed_a: u64,
    seed_b: u64,
    offset: u64,
}

impl TwoChoice {
    /// Hash pair with custom seeds; the secondary hash is offset by
    /// `seed_a · seed_b` (wrapping).
    #[must_use]
    pub const fn new(seed_a: u64, seed_b: u64) -> Self {
        Self {
            seed_a,
            seed_b,
            offset: seed_a.wrapping_mul(seed_b),
        }
    }

    /// The seeds this pair was built from.
    #[must_use]
    pub const fn seeds(&self) -> (u64, u64) {
        (self.seed_a, self.seed_b)
    }

    /// First candidate slot.
    ///
    /// `capacity` must be non-zero.
    #[must_use]
    #[inline]
    pub const fn primary(&self, hash: u64, capacity: usize) -> usize {
        (hash % capacity as u64) as usize
    }

    /// Second candidate slot.
    ///
    /// Computed without overflow: both terms are reduced before adding.
    #[must_use]
    #[inline]
    pub const fn secondary(&self, hash: u64, capacity: usize) -> usize {
        let cap = capacity as u64;
        (((self.offset % cap) + (hash % cap)) % cap) as usize
    }

    /// Both candidates as `(primary, secondary)`.
    #[must_use]
    #[inline]
    pub const fn candidates(&self, hash: u64, capacity: usize) -> (usize, usize) {
        (self.primary(hash, capacity), self.secondary(hash, capacity))
    }

    /// The candidate a key sitting at `current` should move to when evicted:
    /// the secondary slot if it sits at its primary, the primary otherwise.
    #[must_use]
    #[inline]
    pub const fn alternate(&self, hash: u64, capacity: usize, current: usize) -> usize {
        let primary = self.primary(hash, capacity);
        if current == primary {
            self.secondary(hash, capacity)
        } else {
            primary
        }
    }
}

impl Default for TwoChoice {
    fn default() -> Self {
        Self::new(DEFAULT_SEED_A, DEFAULT_SEED_B)
    }
}
