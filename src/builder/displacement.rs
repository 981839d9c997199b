//! Builder for displacement maps.
//!
//! # Type-State Pattern
//!
//! ```text
//! Initial → WithCapacity → DisplacementMap
//!     ↓           ↓
//!   .initial_capacity()  .build()
//! ```
//!
//! Seeds, the rehash budget and the key hasher are optional and may be set
//! in either state.
//!
//! # Examples
//!
//! ```
//! use hashcraft::builder::DisplacementMapBuilder;
//! use hashcraft::DisplacementMap;
//!
//! let mut map: DisplacementMap<String, u32> = DisplacementMapBuilder::new()
//!     .initial_capacity(64)
//!     .seeds(41, 13)
//!     .max_rehashes(4)
//!     .build()
//!     .unwrap();
//!
//! map.put("k".to_string(), 1).unwrap();
//! assert_eq!(map.probe().seeds(), (41, 13));
//! ```

use crate::error::Result;
use crate::hash::{DefaultBuildHasher, TwoChoice};
use crate::map::{DisplacementMap, DEFAULT_MAX_REHASHES};
use std::marker::PhantomData;

/// Type-state marker: capacity not set.
pub struct Initial;

/// Type-state marker: capacity set, ready to build.
pub struct WithCapacity;

/// Builder for [`DisplacementMap`] with type-state guarantees.
///
/// # Type Parameters
///
/// - `State`: builder state (`Initial`, `WithCapacity`)
/// - `S`: key hasher builder, defaults to [`DefaultBuildHasher`]
pub struct DisplacementMapBuilder<State, S = DefaultBuildHasher> {
    capacity: Option<usize>,
    probe: TwoChoice,
    max_rehashes: usize,
    hash_builder: S,
    _state: PhantomData<State>,
}

impl DisplacementMapBuilder<Initial, DefaultBuildHasher> {
    /// Create a builder with default seeds (37, 17), a rehash budget of
    /// [`DEFAULT_MAX_REHASHES`] and the deterministic key hasher.
    #[must_use]
    pub fn new() -> Self {
        Self {
            capacity: None,
            probe: TwoChoice::default(),
            max_rehashes: DEFAULT_MAX_REHASHES,
            hash_builder: DefaultBuildHasher::new(),
            _state: PhantomData,
        }
    }
}

impl Default for DisplacementMapBuilder<Initial, DefaultBuildHasher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> DisplacementMapBuilder<Initial, S> {
    /// Number of slots to start with (must be > 0).
    ///
    /// This is a required parameter. Transitions to `WithCapacity`.
    #[must_use]
    pub fn initial_capacity(self, capacity: usize) -> DisplacementMapBuilder<WithCapacity, S> {
        DisplacementMapBuilder {
            capacity: Some(capacity),
            probe: self.probe,
            max_rehashes: self.max_rehashes,
            hash_builder: self.hash_builder,
            _state: PhantomData,
        }
    }
}

impl<State, S> DisplacementMapBuilder<State, S> {
    /// Seeds for the secondary slot offset `(seed_a · seed_b) mod capacity`.
    #[must_use]
    pub fn seeds(mut self, seed_a: u64, seed_b: u64) -> Self {
        self.probe = TwoChoice::new(seed_a, seed_b);
        self
    }

    /// Growth steps a single `put` may take before failing. 0 disables
    /// growth.
    #[must_use]
    pub fn max_rehashes(mut self, max_rehashes: usize) -> Self {
        self.max_rehashes = max_rehashes;
        self
    }

    /// Hash keys with `hash_builder`.
    #[must_use]
    pub fn hasher<S2>(self, hash_builder: S2) -> DisplacementMapBuilder<State, S2> {
        DisplacementMapBuilder {
            capacity: self.capacity,
            probe: self.probe,
            max_rehashes: self.max_rehashes,
            hash_builder,
            _state: PhantomData,
        }
    }
}

impl<S> DisplacementMapBuilder<WithCapacity, S> {
    /// Build the map.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCapacity`](crate::HashCraftError::InvalidCapacity) if
    /// the initial capacity is 0.
    pub fn build<K, V>(self) -> Result<DisplacementMap<K, V, S>> {
        DisplacementMap::from_parts(
            self.capacity.unwrap_or(0),
            self.probe,
            self.hash_builder,
            self.max_rehashes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HashCraftError;
    use crate::hash::BuildDeterministicHasher;

    #[test]
    fn test_defaults() {
        let map: DisplacementMap<u32, u32> = DisplacementMapBuilder::new()
            .initial_capacity(5)
            .build()
            .unwrap();

        assert_eq!(map.capacity(), 5);
        assert_eq!(map.probe().seeds(), (37, 17));
        assert_eq!(map.max_rehashes(), DEFAULT_MAX_REHASHES);
    }

    #[test]
    fn test_options_before_capacity() {
        let map: DisplacementMap<u32, u32, _> = DisplacementMapBuilder::new()
            .seeds(3, 5)
            .max_rehashes(2)
            .hasher(BuildDeterministicHasher::with_seed(9))
            .initial_capacity(8)
            .build()
            .unwrap();

        assert_eq!(map.probe().seeds(), (3, 5));
        assert_eq!(map.max_rehashes(), 2);
        assert_eq!(*map.hasher(), BuildDeterministicHasher::with_seed(9));
    }

    #[test]
    fn test_zero_capacity() {
        let result: Result<DisplacementMap<u32, u32>> = DisplacementMapBuilder::new()
            .initial_capacity(0)
            .build();
        assert_eq!(result.unwrap_err(), HashCraftError::invalid_capacity(0));
    }

    #[test]
    fn test_seeds_change_placement() {
        let mut default_seeds: DisplacementMap<u64, ()> = DisplacementMapBuilder::new()
            .initial_capacity(101)
            .build()
            .unwrap();
        let mut other_seeds: DisplacementMap<u64, ()> = DisplacementMapBuilder::new()
            .initial_capacity(101)
            .seeds(2, 3)
            .build()
            .unwrap();

        let key = 12345u64;
        assert_ne!(
            default_seeds.candidate_slots(&key).1,
            other_seeds.candidate_slots(&key).1
        );

        default_seeds.put(key, ()).unwrap();
        other_seeds.put(key, ()).unwrap();
        assert!(default_seeds.contains_key(&key));
        assert!(other_seeds.contains_key(&key));
    }
}
