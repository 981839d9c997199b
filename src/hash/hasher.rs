//! Stable key hashing for the displacement map.
//!
//! The map derives both candidate slots from one 64-bit hash code per key,
//! so the code must be the same every time the key is hashed. Any
//! [`BuildHasher`] works; the default is [`BuildDeterministicHasher`], an
//! FNV-1a hasher with no per-process randomness, which keeps slot placement
//! reproducible across runs (and therefore testable).
//!
//! # Examples
//!
//! ```
//! use hashcraft::hash::BuildDeterministicHasher;
//! use std::hash::BuildHasher;
//!
//! let build = BuildDeterministicHasher::new();
//! assert_eq!(build.hash_one("key"), build.hash_one("key"));
//! assert_ne!(build.hash_one("key"), build.hash_one("other"));
//! ```

use std::hash::{BuildHasher, Hasher};

/// FNV-1a 64-bit offset basis.
const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

/// FNV-1a 64-bit prime.
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a hasher with a fixed starting state.
#[derive(Debug, Clone)]
pub struct DeterministicHasher {
    state: u64,
}

impl DeterministicHasher {
    /// Create a hasher starting from the FNV-1a offset basis.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: FNV_OFFSET_BASIS,
        }
    }

    /// Create a hasher whose state is pre-mixed with `seed`.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        let mut hasher = Self::new();
        hasher.write_u64(seed);
        hasher
    }
}

impl Default for DeterministicHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for DeterministicHasher {
    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= u64::from(byte);
            self.state = self.state.wrapping_mul(FNV_PRIME);
        }
    }

    fn finish(&self) -> u64 {
        self.state
    }
}

/// [`BuildHasher`] producing [`DeterministicHasher`]s.
///
/// Two builders with the same seed hash every key identically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildDeterministicHasher {
    seed: Option<u64>,
}

impl BuildDeterministicHasher {
    /// Builder using the plain FNV-1a offset basis.
    #[must_use]
    pub const fn new() -> Self {
        Self { seed: None }
    }

    /// Builder whose hashers are pre-mixed with `seed`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashcraft::hash::BuildDeterministicHasher;
    /// use std::hash::BuildHasher;
    ///
    /// let a = BuildDeterministicHasher::with_seed(1);
    /// let b = BuildDeterministicHasher::with_seed(2);
    /// assert_ne!(a.hash_one(7u64), b.hash_one(7u64));
    /// ```
    #[must_use]
    pub const fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

impl BuildHasher for BuildDeterministicHasher {
    type Hasher = DeterministicHasher;

    fn build_hasher(&self) -> Self::Hasher {
        match self.seed {
            Some(seed) => DeterministicHasher::with_seed(seed),
            None => DeterministicHasher::new(),
        }
    }
}
