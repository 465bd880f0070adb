//! Slot array: the open-addressed index and its linear probe sequence.
//!
//! Each slot is `Empty`, `Occupied` by an entry id, or a `Tombstone`. Probes
//! start at a home index, advance by one and wrap at the end of the array.
//! Every probe visits each slot at most once, so it terminates even if no
//! `Empty` slot is left.
//!
//! Searches (`find_id`, `find_by`) stop at the first `Empty` slot and step
//! over tombstones: a tombstone marks a slot that was occupied when later
//! entries probed past it, so those entries may still live further along.

use slotmap::new_key_type;

new_key_type! {
    /// Identity of a stored entry; unchanged when the entry is re-slotted.
    pub(crate) struct EntryId;
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum Slot {
    #[default]
    Empty,
    Occupied(EntryId),
    Tombstone,
}

impl Slot {
    #[inline]
    fn is_free(&self) -> bool {
        matches!(self, Slot::Empty | Slot::Tombstone)
    }
}

/// Wrapping linear probe over `[0, capacity)`.
struct Probe {
    i: usize,
    remaining: usize,
    capacity: usize,
}

impl Iterator for Probe {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let cur = self.i;
        self.i += 1;
        if self.i == self.capacity {
            self.i = 0;
        }
        self.remaining -= 1;
        Some(cur)
    }
}

#[derive(Debug)]
pub(crate) struct SlotArray {
    slots: Box<[Slot]>,
}

impl SlotArray {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "slot array must have at least one slot");
        Self {
            slots: vec![Slot::Empty; capacity].into_boxed_slice(),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Home index of a hash under the current capacity.
    #[inline]
    pub fn home(&self, hash: u64) -> usize {
        (hash % self.slots.len() as u64) as usize
    }

    #[inline]
    pub fn get(&self, index: usize) -> Slot {
        self.slots[index]
    }

    pub fn occupy(&mut self, index: usize, id: EntryId) {
        debug_assert!(self.slots[index].is_free());
        self.slots[index] = Slot::Occupied(id);
    }

    /// Turn an occupied slot into a tombstone, returning the id it held.
    pub fn bury(&mut self, index: usize) -> Option<EntryId> {
        match self.slots[index] {
            Slot::Occupied(id) => {
                self.slots[index] = Slot::Tombstone;
                Some(id)
            }
            _ => None,
        }
    }

    /// Ids of all occupied slots, in slot order.
    pub fn occupied(&self) -> impl Iterator<Item = EntryId> + '_ {
        self.slots.iter().filter_map(|s| match *s {
            Slot::Occupied(id) => Some(id),
            _ => None,
        })
    }

    pub fn tombstones(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, Slot::Tombstone))
            .count()
    }

    fn probe(&self, start: usize) -> Probe {
        debug_assert!(start < self.slots.len());
        Probe {
            i: start,
            remaining: self.slots.len(),
            capacity: self.slots.len(),
        }
    }

    /// First `Empty` or `Tombstone` slot at or after `start`.
    pub fn find_open(&self, start: usize) -> Option<usize> {
        self.probe(start).find(|&i| self.slots[i].is_free())
    }

    /// Slot holding exactly the entry `id`.
    pub fn find_id(&self, start: usize, id: EntryId) -> Option<usize> {
        self.find_by(start, |held| held == id)
    }

    /// Slot whose entry satisfies `matches`, typically a key comparison.
    pub fn find_by<F>(&self, start: usize, mut matches: F) -> Option<usize>
    where
        F: FnMut(EntryId) -> bool,
    {
        for i in self.probe(start) {
            match self.slots[i] {
                Slot::Empty => return None,
                Slot::Tombstone => continue,
                Slot::Occupied(id) => {
                    if matches(id) {
                        return Some(i);
                    }
                }
            }
        }
        None
    }
}
