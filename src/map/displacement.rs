//! Two-choice displacement (cuckoo) hash map.
//!
//! Every key may live in exactly one of two slots, chosen by
//! [`TwoChoice`] from the key's 64-bit hash code. Lookups therefore probe at
//! most two slots; insertion does the extra work.
//!
//! # Insertion
//!
//! ```text
//! put(k, v):
//!   k already stored           → overwrite its value in place
//!   primary or secondary empty → store there
//!   otherwise                  → displacement loop
//!
//! displacement loop (at most capacity + 1 steps):
//!   store the entry at `pos`, evicting the occupant
//!   pos = the evicted entry's other candidate slot
//!   stop when an empty slot takes the evicted entry
//! ```
//!
//! If the loop runs out of steps the eviction chain is a cycle. The chain is
//! unwound, which restores the table exactly, and the map grows to
//! `2 · capacity + 1` slots, reinserting every entry in ascending slot
//! order followed by the new one. A growth attempt can itself cycle; the map
//! then grows again, up to `max_rehashes` times per insertion. Past that
//! limit `put` fails with
//! [`RehashLimitExceeded`](crate::HashCraftError::RehashLimitExceeded) and the
//! map is left untouched. Keys whose hash codes are identical can never be
//! separated by growth, so the limit is what stops them from exhausting
//! memory.
//!
//! # Removal
//!
//! [`DisplacementMap::remove`] is value-addressed: it takes the key *and*
//! the value, and only removes the entry if the stored value equals the one
//! given. A matching key with a different value is left in place.
//!
//! The key has to match as well. A purely value-addressed removal would also
//! clear a *different* key sitting in one of the two candidate slots when
//! its value happens to be equal; this map never does that.
//!
//! # Examples
//!
//! ```
//! use hashcraft::map::DisplacementMap;
//!
//! let mut map = DisplacementMap::new(5).unwrap();
//! map.put("apple".to_string(), 3).unwrap();
//! map.put("pear".to_string(), 7).unwrap();
//!
//! assert_eq!(map.get("apple"), Some(&3));
//! assert!(!map.remove("pear", &8));
//! assert!(map.remove("pear", &7));
//! assert_eq!(map.get("pear"), None);
//! assert_eq!(map.len(), 1);
//! ```

#![allow(clippy::cast_precision_loss)]

use crate::error::{HashCraftError, Result};
use crate::hash::{DefaultBuildHasher, TwoChoice};
use std::borrow::Borrow;
use std::fmt;
use std::hash::{BuildHasher, Hash};

/// Growth attempts a single insertion may make before giving up.
pub const DEFAULT_MAX_REHASHES: usize = 16;

/// A stored entry. The hash code is cached so evictions and growth never
/// rehash keys.
#[derive(Clone)]
struct Bucket<K, V> {
    hash: u64,
    key: K,
    value: V,
}

/// Lifetime counters of a [`DisplacementMap`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MapStats {
    /// Growth steps taken (each one a full rehash).
    pub rehashes: u64,
    /// Entries moved to their alternate slot by successful insertions.
    pub evictions: u64,
    /// Insertions whose eviction chain hit the step bound.
    pub cycles: u64,
}

/// An eviction chain that ran out of steps.
struct Cycle<T> {
    homeless: T,
    path: Vec<usize>,
}

impl<T> Cycle<T> {
    /// Replay the chain's swaps backwards, restoring every slot it touched,
    /// and return the item that started it.
    fn unwind(self, slots: &mut [Option<T>]) -> T {
        let Cycle { mut homeless, path } = self;

        for &position in path.iter().rev() {
            if let Some(occupant) = slots[position].as_mut() {
                std::mem::swap(occupant, &mut homeless);
            }
        }

        homeless
    }
}

/// Place `item` into `slots`, evicting along the chain if both candidates are
/// taken. Returns the number of evictions, or the cycle if the chain did not
/// end within `slots.len() + 1` steps.
fn displace<T>(
    slots: &mut [Option<T>],
    item: T,
    probe: &TwoChoice,
    hash_of: impl Fn(&T) -> u64,
) -> std::result::Result<usize, Cycle<T>> {
    let capacity = slots.len();
    let (first, second) = probe.candidates(hash_of(&item), capacity);

    if slots[first].is_none() {
        slots[first] = Some(item);
        return Ok(0);
    }
    if slots[second].is_none() {
        slots[second] = Some(item);
        return Ok(0);
    }

    let mut current = item;
    let mut position = first;
    let mut path = Vec::new();

    for _ in 0..=capacity {
        match slots[position].as_mut() {
            Some(occupant) => std::mem::swap(occupant, &mut current),
            None => {
                slots[position] = Some(current);
                return Ok(path.len());
            }
        }
        path.push(position);
        position = probe.alternate(hash_of(&current), capacity, position);
    }

    Err(Cycle {
        homeless: current,
        path,
    })
}

/// Dry-run placement of entries (by index into `hashes`, in order) into a
/// table of `capacity` slots.
fn plan_layout(hashes: &[u64], capacity: usize, probe: &TwoChoice) -> Option<Vec<Option<usize>>> {
    let mut layout = vec![None; capacity];

    for index in 0..hashes.len() {
        displace(&mut layout, index, probe, |&i| hashes[i]).ok()?;
    }

    Some(layout)
}

fn grown_capacity(capacity: usize) -> Result<usize> {
    capacity
        .checked_mul(2)
        .and_then(|doubled| doubled.checked_add(1))
        .ok_or_else(|| HashCraftError::capacity_overflow(capacity))
}

/// Hash map with two candidate slots per key.
///
/// # Type Parameters
///
/// * `K` - key type; must be `Hash + Eq` for lookups and insertion
/// * `V` - value type; must be `PartialEq` for [`remove`](Self::remove)
/// * `S` - key hasher, defaults to the deterministic FNV-1a builder
///
/// # Thread Safety
///
/// No internal locking. Wrap in a `Mutex` to share between threads.
#[derive(Clone)]
pub struct DisplacementMap<K, V, S = DefaultBuildHasher> {
    slots: Vec<Option<Bucket<K, V>>>,
    probe: TwoChoice,
    hash_builder: S,
    max_rehashes: usize,
    stats: MapStats,
}

impl<K, V> DisplacementMap<K, V, DefaultBuildHasher> {
    /// Create an empty map with `capacity` slots, the default seeds (37, 17)
    /// and the deterministic key hasher.
    ///
    /// # Errors
    ///
    /// Returns [`HashCraftError::InvalidCapacity`] if `capacity` is 0.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_hasher(capacity, DefaultBuildHasher::new())
    }
}

impl<K, V, S> DisplacementMap<K, V, S> {
    /// Create an empty map hashing keys with `hash_builder`.
    ///
    /// # Errors
    ///
    /// Returns [`HashCraftError::InvalidCapacity`] if `capacity` is 0.
    pub fn with_hasher(capacity: usize, hash_builder: S) -> Result<Self> {
        Self::from_parts(capacity, TwoChoice::default(), hash_builder, DEFAULT_MAX_REHASHES)
    }

    pub(crate) fn from_parts(
        capacity: usize,
        probe: TwoChoice,
        hash_builder: S,
        max_rehashes: usize,
    ) -> Result<Self> {
        if capacity == 0 {
            return Err(HashCraftError::invalid_capacity(capacity));
        }

        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);

        Ok(Self {
            slots,
            probe,
            hash_builder,
            max_rehashes,
            stats: MapStats::default(),
        })
    }

    /// Current number of slots. Grows on rehash, never shrinks.
    #[must_use]
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of stored entries, counted over all slots (O(capacity)).
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// `true` if no entry is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Occupied fraction of the slots.
    #[must_use]
    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    /// Remove every entry. Capacity is kept.
    pub fn clear(&mut self) {
        self.slots.fill_with(|| None);

        #[cfg(feature = "trace")]
        tracing::debug!(capacity = self.capacity(), "displacement map cleared");
    }

    /// Lifetime counters.
    #[must_use]
    pub fn stats(&self) -> MapStats {
        self.stats
    }

    /// Growth attempts allowed per insertion.
    #[must_use]
    pub fn max_rehashes(&self) -> usize {
        self.max_rehashes
    }

    /// The candidate slot functions.
    #[must_use]
    pub fn probe(&self) -> &TwoChoice {
        &self.probe
    }

    /// The key hasher.
    #[must_use]
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Entries in slot order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.slots.iter().flatten(),
        }
    }

    /// Stored keys in slot order. Each key appears once.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Stored values in slot order.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Render as `[ <k1, v1> <k2, v2> ... ]` in slot order.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashcraft::map::DisplacementMap;
    ///
    /// let mut map = DisplacementMap::new(3).unwrap();
    /// assert_eq!(map.debug_dump(), "[ ]");
    ///
    /// map.put("k", 1).unwrap();
    /// assert_eq!(map.debug_dump(), "[ <k, 1> ]");
    /// ```
    #[must_use]
    pub fn debug_dump(&self) -> String
    where
        K: fmt::Display,
        V: fmt::Display,
    {
        self.to_string()
    }
}

impl<K, V, S> DisplacementMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Insert `value` under `key`, returning the value it replaced.
    ///
    /// Re-inserting an identical pair leaves the map unchanged.
    ///
    /// # Errors
    ///
    /// - [`HashCraftError::RehashLimitExceeded`] if the entry could not be
    ///   placed within `max_rehashes` growth steps
    /// - [`HashCraftError::CapacityOverflow`] if growth would overflow
    ///
    /// On error the map is exactly as it was before the call.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashcraft::map::DisplacementMap;
    ///
    /// let mut map = DisplacementMap::new(4).unwrap();
    /// assert_eq!(map.put(1u32, "one").unwrap(), None);
    /// assert_eq!(map.put(1u32, "uno").unwrap(), Some("one"));
    /// assert_eq!(map.get(&1), Some(&"uno"));
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Result<Option<V>> {
        let hash = self.hash_builder.hash_one(&key);

        if let Some(index) = self.find_slot(hash, &key) {
            if let Some(bucket) = self.slots[index].as_mut() {
                return Ok(Some(std::mem::replace(&mut bucket.value, value)));
            }
        }

        let bucket = Bucket { hash, key, value };

        match displace(&mut self.slots, bucket, &self.probe, |b| b.hash) {
            Ok(evictions) => {
                self.stats.evictions += evictions as u64;
                Ok(None)
            }
            Err(cycle) => {
                self.stats.cycles += 1;

                #[cfg(feature = "trace")]
                tracing::trace!(
                    capacity = self.capacity(),
                    chain = cycle.path.len(),
                    "eviction chain cycled"
                );

                let pending = cycle.unwind(&mut self.slots);
                self.grow_with(pending)?;
                Ok(None)
            }
        }
    }

    /// Value stored under `key`. Probes at most two slots.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find_slot(self.hash_builder.hash_one(key), key)?;
        self.slots[index].as_ref().map(|bucket| &bucket.value)
    }

    /// Mutable access to the value stored under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find_slot(self.hash_builder.hash_one(key), key)?;
        self.slots[index].as_mut().map(|bucket| &mut bucket.value)
    }

    /// `true` if `key` is stored.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_slot(self.hash_builder.hash_one(key), key).is_some()
    }

    /// Remove the entry for `key` only if its stored value equals `value`.
    ///
    /// Returns `false`, changing nothing, when the key is absent or stored
    /// with a different value.
    ///
    /// Both must match. Another key that shares a candidate slot and holds
    /// an equal value is never removed in its place, which is where this
    /// differs from a removal addressed by value alone.
    ///
    /// # Examples
    ///
    /// ```
    /// use hashcraft::map::DisplacementMap;
    ///
    /// let mut map = DisplacementMap::new(5).unwrap();
    /// map.put("a", 1).unwrap();
    /// map.put("b", 1).unwrap();
    ///
    /// assert!(!map.remove("c", &1));
    /// assert!(map.remove("b", &1));
    /// assert_eq!(map.get("a"), Some(&1));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: PartialEq,
    {
        let Some(index) = self.find_slot(self.hash_builder.hash_one(key), key) else {
            return false;
        };

        let matches = self.slots[index]
            .as_ref()
            .is_some_and(|bucket| bucket.value == *value);
        if matches {
            self.slots[index] = None;
        }
        matches
    }

    /// The two slots `key` may occupy under the current capacity.
    #[must_use]
    pub fn candidate_slots<Q>(&self, key: &Q) -> (usize, usize)
    where
        K: Borrow<Q>,
        Q: Hash + ?Sized,
    {
        self.probe
            .candidates(self.hash_builder.hash_one(key), self.capacity())
    }

    /// The slot currently holding `key`.
    #[must_use]
    pub fn slot_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_slot(self.hash_builder.hash_one(key), key)
    }

    fn find_slot<Q>(&self, hash: u64, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let (first, second) = self.probe.candidates(hash, self.capacity());

        [first, second].into_iter().find(|&index| {
            matches!(
                &self.slots[index],
                Some(bucket) if bucket.hash == hash && bucket.key.borrow() == key
            )
        })
    }

    /// Grow until every current entry plus `pending` fits, committing only a
    /// complete layout.
    fn grow_with(&mut self, pending: Bucket<K, V>) -> Result<()> {
        let mut hashes: Vec<u64> = self.slots.iter().flatten().map(|b| b.hash).collect();
        hashes.push(pending.hash);

        let mut capacity = self.capacity();

        for attempt in 1..=self.max_rehashes {
            capacity = grown_capacity(capacity)?;

            if let Some(layout) = plan_layout(&hashes, capacity, &self.probe) {
                #[cfg(feature = "trace")]
                tracing::debug!(
                    from = self.capacity(),
                    to = capacity,
                    entries = hashes.len(),
                    attempts = attempt,
                    "displacement map rehashed"
                );

                self.apply_layout(layout, pending);
                self.stats.rehashes += attempt as u64;
                return Ok(());
            }

            #[cfg(feature = "trace")]
            tracing::trace!(attempt, capacity, "rehash attempt cycled");
        }

        #[cfg(feature = "trace")]
        tracing::warn!(
            capacity = self.capacity(),
            max_rehashes = self.max_rehashes,
            "insertion abandoned at rehash limit"
        );

        Err(HashCraftError::rehash_limit_exceeded(
            self.capacity(),
            self.max_rehashes,
        ))
    }

    /// Move every entry into the slot `layout` assigns it. Entry `i` of the
    /// layout is the `i`-th occupied slot in order, then `pending`.
    fn apply_layout(&mut self, layout: Vec<Option<usize>>, pending: Bucket<K, V>) {
        let mut entries: Vec<Option<Bucket<K, V>>> =
            self.slots.drain(..).flatten().map(Some).collect();
        entries.push(Some(pending));

        self.slots = layout
            .into_iter()
            .map(|index| index.and_then(|i| entries[i].take()))
            .collect();
    }
}

impl<K, V, S> fmt::Display for DisplacementMap<K, V, S>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[ ")?;
        for (key, value) in self.iter() {
            write!(f, "<{}, {}> ", key, value)?;
        }
        f.write_str("]")
    }
}

impl<K, V, S> fmt::Debug for DisplacementMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V, S> IntoIterator for &'a DisplacementMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over `(key, value)` pairs in slot order.
pub struct Iter<'a, K, V> {
    inner: std::iter::Flatten<std::slice::Iter<'a, Option<Bucket<K, V>>>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|bucket| (&bucket.key, &bucket.value))
    }
}

/// Iterator over keys in slot order.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }
}

/// Iterator over values in slot order.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }
}
