//! Index-addressed storage for map entries.
//!
//! Chains are linked through [`EntryId`]s instead of owning pointers, so
//! splicing a node out of a chain only rewrites indices. Freed slots are kept
//! on an intrusive free list and reused by later insertions; a rehash moves the
//! live entries into a fresh, compact arena.

use core::{convert::TryFrom, mem, num::NonZeroU32};

/// Position of an entry inside an [`EntryArena`].
///
/// Stored as the slot index plus one, so `Option<EntryId>` stays four bytes
/// wide.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EntryId(NonZeroU32);

impl EntryId {
    fn new(idx: usize) -> Self {
        u32::try_from(idx)
            .ok()
            .and_then(|idx| NonZeroU32::new(idx.wrapping_add(1)))
            .map(EntryId)
            .unwrap_or_else(|| {
                panic!(
                    "Entry arena can't hold more than {} entries",
                    u32::MAX - 1
                )
            })
    }

    #[inline]
    fn idx(self) -> usize {
        self.0.get() as usize - 1
    }
}

/// A key/value pair and the link to the next entry of its chain.
#[derive(Clone, Debug)]
pub struct Entry<V> {
    pub key: i64,
    pub value: V,
    pub next: Option<EntryId>,
}

#[derive(Clone, Debug)]
enum Slot<V> {
    Occupied(Entry<V>),
    Vacant { next_free: Option<EntryId> },
}

#[derive(Clone, Debug)]
pub struct EntryArena<V> {
    slots: Vec<Slot<V>>,
    free_head: Option<EntryId>,
    length: usize,
}

impl<V> Default for EntryArena<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> EntryArena<V> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            length: 0,
        }
    }

    /// Creates an arena with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            length: 0,
        }
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of slots in use or on the free list.
    #[cfg(test)]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Stores an unlinked entry and returns its id.
    ///
    /// # Panics
    ///
    /// Panics if the arena already holds `u32::MAX - 1` slots.
    pub fn insert(&mut self, key: i64, value: V) -> EntryId {
        let entry = Entry {
            key,
            value,
            next: None,
        };
        self.length += 1;
        match self.free_head {
            Some(id) => {
                let slot = mem::replace(&mut self.slots[id.idx()], Slot::Occupied(entry));
                match slot {
                    Slot::Vacant { next_free } => self.free_head = next_free,
                    Slot::Occupied(_) => unreachable!("Free list points to an occupied slot"),
                }
                id
            }
            None => {
                let id = EntryId::new(self.slots.len());
                self.slots.push(Slot::Occupied(entry));
                id
            }
        }
    }

    /// Takes an entry out of the arena, freeing its slot.
    ///
    /// The caller is responsible for unlinking it from its chain first.
    pub fn remove(&mut self, id: EntryId) -> Entry<V> {
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        match mem::replace(&mut self.slots[id.idx()], vacant) {
            Slot::Occupied(entry) => {
                self.free_head = Some(id);
                self.length -= 1;
                entry
            }
            Slot::Vacant { .. } => panic!("Entry {:?} has already been removed", id),
        }
    }

    #[inline]
    pub fn get(&self, id: EntryId) -> &Entry<V> {
        match &self.slots[id.idx()] {
            Slot::Occupied(entry) => entry,
            Slot::Vacant { .. } => panic!("Dangling entry id {:?}", id),
        }
    }

    #[inline]
    pub fn get_mut(&mut self, id: EntryId) -> &mut Entry<V> {
        match &mut self.slots[id.idx()] {
            Slot::Occupied(entry) => entry,
            Slot::Vacant { .. } => panic!("Dangling entry id {:?}", id),
        }
    }

    /// Drops every entry and releases the storage.
    pub fn clear(&mut self) {
        self.slots = Vec::new();
        self.free_head = None;
        self.length = 0;
    }
}
