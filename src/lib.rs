//! HashCraft: a scramble-table Bloom filter and a two-choice displacement
//! (cuckoo) hash map.
//!
//! # What's Inside
//!
//! - [`MembershipFilter`]: a Bloom filter over strings with `2^log2_bits`
//!   bits and up to 8 independent digests per string, all drawn from one
//!   process-wide [`ScrambleTable`]. No false negatives; false positives are
//!   possible.
//! - [`DisplacementMap`]: a key/value map in which every key lives in one of
//!   exactly two slots. Lookups probe at most two slots; insertions evict
//!   along a chain and grow the table when the chain cycles.
//!
//! # Quick Start
//!
//! ```
//! use hashcraft::{DisplacementMap, MembershipFilter};
//!
//! // 2^12 bits, 3 digests per string
//! let mut filter = MembershipFilter::new(12, 3).unwrap();
//! filter.add("hello");
//! assert!(filter.contains("hello"));
//!
//! let mut map = DisplacementMap::new(8).unwrap();
//! map.put("hello".to_string(), 1).unwrap();
//! assert_eq!(map.get("hello"), Some(&1));
//! ```
//!
//! # Using Builders
//!
//! ```
//! use hashcraft::{DisplacementMap, DisplacementMapBuilder, MembershipFilterBuilder};
//!
//! let filter = MembershipFilterBuilder::new()
//!     .expected_items(10_000)
//!     .false_positive_rate(0.01)
//!     .build()
//!     .unwrap();
//!
//! let map: DisplacementMap<u64, u64> = DisplacementMapBuilder::new()
//!     .initial_capacity(256)
//!     .seeds(37, 17)
//!     .build()
//!     .unwrap();
//! # let _ = (filter, map);
//! ```
//!
//! # Features
//!
//! - `trace` (default) - `tracing` events for displacement cycles, rehashes
//!   and the rehash limit
//! - `xxhash` - XXH3 key hasher for the map
//!
//! # Thread Safety
//!
//! Neither structure locks internally. Mutation takes `&mut self`; wrap in a
//! `Mutex` or `RwLock` to share across threads.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::len_zero)]
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc(html_root_url = "https://docs.rs/hashcraft/0.1.0")]

/// Bit storage and sizing math
pub mod core;

/// Error types and result aliases
pub mod error;

/// Probabilistic membership filters
pub mod filters;

/// Hash functions and slot strategies
pub mod hash;

/// Hash maps
pub mod map;

/// Type-safe builders
pub mod builder;

// Re-export commonly used types at crate root
pub use error::{HashCraftError, Result};

pub use filters::MembershipFilter;
pub use map::{DisplacementMap, MapStats};

pub use builder::{DisplacementMapBuilder, MembershipFilterBuilder};

pub use hash::{BuildDeterministicHasher, ScrambleTable, TwoChoice};

#[cfg(feature = "xxhash")]
#[cfg_attr(docsrs, doc(cfg(feature = "xxhash")))]
pub use hash::XxBuildHasher;

/// Prelude module for convenient imports.
///
/// # Examples
///
/// ```
/// use hashcraft::prelude::*;
///
/// let mut filter = MembershipFilter::new(10, 2).unwrap();
/// filter.add("hello");
/// assert!(filter.contains("hello"));
/// ```
pub mod prelude {
    pub use crate::builder::{DisplacementMapBuilder, MembershipFilterBuilder};
    pub use crate::error::{HashCraftError, Result};
    pub use crate::filters::MembershipFilter;
    pub use crate::hash::{BuildDeterministicHasher, ScrambleTable, TwoChoice};
    pub use crate::map::{DisplacementMap, MapStats};

    #[cfg(feature = "xxhash")]
    pub use crate::hash::XxBuildHasher;
}

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
