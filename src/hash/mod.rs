//! Hash functions for both data structures.
//!
//! # Module Structure
//!
//! ```text
//! hash/
//! ├── scramble.rs    - Scramble table and rolling multi-hash (membership filter)
//! ├── hasher.rs      - Deterministic FNV-1a key hasher (displacement map)
//! ├── strategies.rs  - Two-choice candidate slot selection
//! ├── xxhash.rs      - XXH3 key hasher (optional, feature = "xxhash")
//! └── mod.rs         - This file (public API)
//! ```
//!
//! The two structures never share hashing state. The filter hashes strings
//! through the process-wide [`ScrambleTable`]; the map hashes arbitrary
//! `Hash` keys through a [`BuildHasher`](std::hash::BuildHasher) and places
//! them with [`TwoChoice`].
//!
//! # Feature Flags
//!
//! | Feature      | Enables                                    |
//! |--------------|--------------------------------------------|
//! | (default)    | [`BuildDeterministicHasher`] (FNV-1a)      |
//! | `xxhash`     | `XxBuildHasher` (XXH3)                     |

pub mod hasher;
pub mod scramble;
pub mod strategies;

#[cfg(feature = "xxhash")]
pub mod xxhash;

pub use hasher::{BuildDeterministicHasher, DeterministicHasher};
pub use scramble::ScrambleTable;
pub use strategies::TwoChoice;

#[cfg(feature = "xxhash")]
pub use xxhash::XxBuildHasher;

/// Key hasher used by a displacement map unless another is supplied.
pub type DefaultBuildHasher = BuildDeterministicHasher;
