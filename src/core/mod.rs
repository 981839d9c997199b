//! Core building blocks shared by the filter and the builders.
//!
//! # Module Organization
//!
//! ```text
//! core/
//! ├── bitvec.rs    - Word-packed, set-only bit vector
//! ├── params.rs    - Geometry bounds and sizing formulas
//! └── mod.rs       - This file
//! ```
//!
//! # Examples
//!
//! ```
//! use hashcraft::core::{params, BitVec};
//!
//! let log2_bits = params::optimal_log2_bits(1_000, 0.01).unwrap();
//! let bits = BitVec::new(1 << log2_bits).unwrap();
//! assert_eq!(bits.len(), 16_384);
//! ```

pub mod bitvec;
pub mod params;

pub use bitvec::BitVec;
pub use params::{
    expected_fp_rate, optimal_hash_count, optimal_log2_bits, validate_geometry, MAX_HASHES,
    MAX_LOG2_BITS, MIN_HASHES, MIN_LOG2_BITS,
};
