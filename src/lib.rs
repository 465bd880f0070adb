//! probe-map: a single-threaded hash map built on open addressing with
//! linear probing, tombstones and load-factor driven growth.
//!
//! Internal Design:
//!
//! Summary
//! - Layers:
//!   - `SlotArray`: the open-addressed index. Each slot is `Empty`,
//!     `Occupied(EntryId)` or `Tombstone`; probes walk forward one slot at a
//!     time and wrap at the end of the array.
//!   - `SlotMap<EntryId, _>`: owns the entries. Slots hold ids, so an entry
//!     keeps its identity while growth moves it between slots.
//!   - `ProbeMap<K, V>`: public API (`put`, `get`, `contains_key`,
//!     `remove`, `clear`), hashing and growth.
//!
//! Constraints
//! - Unique keys, insert-only: `put` on a present key fails with
//!   `InvalidArgument(DuplicateKey)` and leaves the map unchanged.
//! - `len / capacity < 0.7` after every `put`; reaching 0.7 doubles the
//!   slot array before `put` returns.
//! - Capacity never shrinks. `clear` keeps it.
//! - No iteration API and no ordering between entries.
//!
//! Tombstones
//! - `remove` turns the slot into a `Tombstone`, never `Empty`. Searches stop
//!   at `Empty` but walk past tombstones, so keys that probed past the removed
//!   entry stay reachable. `put` reuses the first free slot (empty or
//!   tombstone) on its probe path.
//! - Growth re-slots live entries only; tombstones are dropped there.
//! - Every probe visits each slot at most once, so lookups terminate even
//!   when tombstones fill all non-live slots.
//!
//! Hasher and rehashing invariants
//! - Each entry stores its `u64` hash. Growth recomputes home slots from the
//!   stored hash, so `K: Hash` is never called after insertion.
//! - Lookups accept any `Q` with `K: Borrow<Q>`; as with `std`, equal keys
//!   must hash equal.
//!
//! Reentrancy
//! - Every public operation enters a debug-only reentrancy guard. User `Eq`
//!   or `Hash` code that calls back into the same map during a probe panics
//!   in debug builds. Wrap the map in a lock for shared use.

pub mod entry;
mod error;
mod hashers;
pub mod probe_map;
mod probe_map_proptest;
mod reentrancy;
mod slots;

// Public surface
pub use entry::Entry;
pub use error::{Error, InsertError, Result};
pub use probe_map::{ProbeMap, DEFAULT_CAPACITY, MAX_LOAD_FACTOR};
