//! Hash maps with bounded-probe lookups.
//!
//! [`DisplacementMap`] keeps every key in one of two candidate slots, so a
//! lookup touches at most two slots regardless of load. Insertions that find
//! both candidates taken evict along a chain and, when the chain cycles, grow
//! the table.

pub mod displacement;

pub use displacement::{DisplacementMap, Iter, Keys, MapStats, Values, DEFAULT_MAX_REHASHES};
