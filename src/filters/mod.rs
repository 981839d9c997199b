//! Probabilistic membership filters.
//!
//! | Filter | Hashing | Bit count | Deletion |
//! |--------|---------|-----------|----------|
//! | [`MembershipFilter`] | k scramble-table digests (k ≤ 8) | `2^log2_bits` | No |

pub mod membership;

pub use membership::MembershipFilter;
