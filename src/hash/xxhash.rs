//! XXH3 key hashing for the displacement map.
//!
//! XXH3 is a fast, high-quality non-cryptographic hash by Yann Collet. This
//! module wraps the `xxhash-rust` crate's streaming [`Xxh3`] hasher in a
//! seeded [`BuildHasher`] so it can replace the default FNV-1a key hasher,
//! which pays off for long keys.
//!
//! # Examples
//!
//! ```
//! # #[cfg(feature = "xxhash")]
//! # {
//! use hashcraft::hash::XxBuildHasher;
//! use hashcraft::DisplacementMap;
//!
//! let mut map = DisplacementMap::with_hasher(16, XxBuildHasher::with_seed(7)).unwrap();
//! map.put("alpha".to_string(), 1).unwrap();
//! assert_eq!(map.get("alpha"), Some(&1));
//! # }
//! ```
//!
//! # References
//!
//! - XXHash Project: https://github.com/Cyan4973/xxHash

use std::hash::BuildHasher;
use xxhash_rust::xxh3::Xxh3;

/// Seeded [`BuildHasher`] producing XXH3 hashers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XxBuildHasher {
    seed: u64,
}

impl XxBuildHasher {
    /// Builder with seed 0.
    #[must_use]
    pub const fn new() -> Self {
        Self { seed: 0 }
    }

    /// Builder with an explicit seed.
    #[must_use]
    pub const fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    /// The configured seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl BuildHasher for XxBuildHasher {
    type Hasher = Xxh3;

    fn build_hasher(&self) -> Self::Hasher {
        Xxh3::with_seed(self.seed)
    }
}
