//! ProbeMap: open-addressing map with linear probing, tombstones and
//! load-factor driven growth.

use crate::entry::Entry;
use crate::error::{Error, InsertError, Result};
use crate::reentrancy::DebugReentrancy;
use crate::slots::{EntryId, Slot, SlotArray};
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;
use slotmap::SlotMap;

/// Slot count of a map built with `ProbeMap::new`.
pub const DEFAULT_CAPACITY: usize = 8;

/// A `put` that brings `len / capacity` to this value or above grows the map.
pub const MAX_LOAD_FACTOR: f64 = 0.7;

const GROWTH_FACTOR: usize = 2;

#[derive(Debug)]
struct Stored<K, V> {
    entry: Entry<K, V>,
    hash: u64,
}

/// Hash map with unique, insert-only keys.
///
/// `put` rejects keys that are already present; remove the old entry first
/// to replace it. Capacity only grows: removals leave tombstones that are
/// reused by later inserts and discarded on the next growth.
pub struct ProbeMap<K, V, S = DefaultHashBuilder> {
    hasher: S,
    slots: SlotArray,
    entries: SlotMap<EntryId, Stored<K, V>>, // slots hold ids into this arena
    reentrancy: DebugReentrancy,
}

impl<K, V> ProbeMap<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a map with `capacity` slots. A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::build(capacity, DefaultHashBuilder::default())
    }
}

impl<K, V> Default for ProbeMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> ProbeMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn build(capacity: usize, hasher: S) -> Self {
        Self {
            hasher,
            slots: SlotArray::new(capacity.max(1)),
            entries: SlotMap::with_key(),
            reentrancy: DebugReentrancy::new(),
        }
    }

    /// Create a map hashing with `hasher`. Not part of the public API; used
    /// to force collisions in tests and benches.
    #[cfg(any(test, feature = "bench_internal"))]
    #[doc(hidden)]
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self::build(capacity, hasher)
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of slots in the backing array.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    // Slot index and id of the entry whose key equals `q`.
    fn locate<Q>(&self, hash: u64, q: &Q) -> Option<(usize, EntryId)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let home = self.slots.home(hash);
        if self.slots.get(home) == Slot::Empty {
            return None;
        }
        let index = self.slots.find_by(home, |id| {
            self.entries
                .get(id)
                .map(|s| s.hash == hash && s.entry.key().borrow() == q)
                .unwrap_or(false)
        })?;
        match self.slots.get(index) {
            Slot::Occupied(id) => Some((index, id)),
            _ => None,
        }
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(q);
        self.locate(hash, q).is_some()
    }

    pub fn get<Q>(&self, q: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter();
        let hash = self.make_hash(q);
        let (_, id) = self.locate(hash, q).ok_or(Error::KeyNotFound)?;
        self.entries
            .get(id)
            .map(|s| s.entry.value())
            .ok_or(Error::KeyNotFound)
    }

    /// Insert a new entry. Fails without touching the map if `key` is `None`
    /// or already present.
    pub fn put(&mut self, key: impl Into<Option<K>>, value: V) -> Result<()> {
        let key: Option<K> = key.into();
        let key = key.ok_or(InsertError::NullKey)?;
        {
            let _g = self.reentrancy.enter();
            let hash = self.make_hash(&key);
            if self.locate(hash, &key).is_some() {
                return Err(InsertError::DuplicateKey.into());
            }

            let home = self.slots.home(hash);
            // len < capacity holds between calls, so a free slot exists.
            let Some(index) = self.slots.find_open(home) else {
                unreachable!("no free slot with {} of {} used", self.len(), self.capacity());
            };
            let id = self.entries.insert(Stored {
                entry: Entry::new(key, value),
                hash,
            });
            self.slots.occupy(index, id);
        }

        if self.load_factor() >= MAX_LOAD_FACTOR {
            self.grow();
        }
        debug_assert!(self.load_factor() < MAX_LOAD_FACTOR);
        Ok(())
    }

    /// Remove the entry for `q` and return its value. The slot becomes a
    /// tombstone so probes for other keys keep walking past it.
    pub fn remove<Q>(&mut self, q: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let stored = {
            let _g = self.reentrancy.enter();
            let hash = self.make_hash(q);
            let (index, id) = self.locate(hash, q).ok_or(Error::KeyNotFound)?;
            self.slots.bury(index);
            self.entries.remove(id)
        };
        // Key drop runs user code; the map is consistent again at this point.
        stored
            .map(|s| s.entry.into_value())
            .ok_or(Error::KeyNotFound)
    }

    /// Drop every entry and tombstone. Capacity is kept.
    pub fn clear(&mut self) {
        log::trace!(
            "Clearing probe map ({} entries, {} slots)",
            self.len(),
            self.capacity()
        );
        self.slots = SlotArray::new(self.slots.capacity());
        self.entries.clear();
    }

    // Double the slot array and re-slot every live entry under the new
    // capacity. Uses cached hashes, so no user code runs. Tombstones are not
    // carried over.
    fn grow(&mut self) {
        let old_capacity = self.slots.capacity();
        let new_capacity = old_capacity
            .checked_mul(GROWTH_FACTOR)
            .expect("capacity overflow");

        let mut slots = SlotArray::new(new_capacity);
        let mut carried = 0;
        for id in self.slots.occupied() {
            let home = slots.home(self.entries[id].hash);
            let Some(index) = slots.find_open(home) else {
                unreachable!("grown slot array has no free slot");
            };
            slots.occupy(index, id);
            debug_assert_eq!(slots.find_id(home, id), Some(index));
            carried += 1;
        }
        debug_assert_eq!(carried, self.entries.len());

        log::debug!(
            "Growing probe map from {old_capacity} to {new_capacity} slots ({carried} entries carried, {} tombstones dropped)",
            self.slots.tombstones()
        );
        self.slots = slots;
    }
}

impl<K, V, S> core::fmt::Debug for ProbeMap<K, V, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProbeMap")
            .field("len", &self.entries.len())
            .field("capacity", &self.slots.capacity())
            .finish()
    }
}
