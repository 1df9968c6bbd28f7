//! Hash map with 64-bit integer keys and separate chaining.

use crate::{
    arena::{EntryArena, EntryId},
    config::{self, LongMapConfig, DEFAULT_CAPACITY, MAX_CAPACITY},
    hash::{bucket_index, hash_key},
};
use core::{fmt, iter::FromIterator, mem, ops::Index};
use log::{debug, warn};

pub mod iter;

/// Occupied-bucket ratio above which the table doubles before an insertion.
const HIGH_WATER_MARK: f64 = 0.75;

/// Occupied-bucket ratio below which the table halves after a removal, if
/// shrinking is enabled.
const LOW_WATER_MARK: f64 = 0.35;

/// Tables with this many buckets or fewer are never shrunk.
const MIN_SHRINK_CAPACITY: usize = 100;

/// Hash map from `i64` keys to values of type `V`.
///
/// Every bucket holds the head of a singly linked collision chain. Entries live
/// in a single arena and are linked by index.
///
/// Growth and shrinking are driven by the share of *occupied buckets* rather
/// than by the number of entries: the table doubles before an insertion once
/// more than 75% of the buckets are in use, and, when shrinking is enabled, halves
/// after a removal empties a bucket and leaves less than 35% of them in use.
///
/// The bucket array is allocated on the first insertion.
#[derive(Clone)]
pub struct LongMap<V> {
    // Either empty (not allocated yet) or exactly `capacity` long.
    buckets: Vec<Option<EntryId>>,
    entries: EntryArena<V>,

    capacity: usize,
    max_capacity: usize,
    occupied_buckets: usize,

    growth_allowed: bool,
    shrink_enabled: bool,
}

impl<V> Default for LongMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> LongMap<V> {
    /// Creates an empty map with [`DEFAULT_CAPACITY`] buckets and shrinking
    /// disabled.
    pub fn new() -> Self {
        Self::with_validated(DEFAULT_CAPACITY, false)
    }

    /// Creates an empty map with a given number of buckets.
    ///
    /// Fails if `capacity` is negative. A capacity above [`MAX_CAPACITY`] is
    /// clamped.
    pub fn with_capacity(capacity: i64) -> Result<Self, config::Error> {
        LongMapConfig::default()
            .initial_capacity(capacity)
            .build()
    }

    /// Like `with_capacity`, but also chooses whether the table shrinks after
    /// removals.
    pub fn with_capacity_and_shrink(
        capacity: i64,
        shrink_enabled: bool,
    ) -> Result<Self, config::Error> {
        LongMapConfig::default()
            .initial_capacity(capacity)
            .shrink_enabled(shrink_enabled)
            .build()
    }

    pub(crate) fn with_validated(capacity: usize, shrink_enabled: bool) -> Self {
        debug_assert!(capacity > 0 && capacity <= MAX_CAPACITY);
        Self {
            buckets: Vec::new(),
            entries: EntryArena::new(),
            capacity,
            max_capacity: MAX_CAPACITY,
            occupied_buckets: 0,
            growth_allowed: true,
            shrink_enabled,
        }
    }

    /// Number of key/value pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current number of buckets.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn shrink_enabled(&self) -> bool {
        self.shrink_enabled
    }

    /// Inserts a value, returning the one previously stored under `key`.
    pub fn put(&mut self, key: i64, value: V) -> Option<V> {
        if self.load() > HIGH_WATER_MARK {
            self.grow();
        }
        if self.buckets.is_empty() {
            self.buckets.resize(self.capacity, None);
        }

        let idx = bucket_index(hash_key(key), self.capacity);
        let mut current = match self.buckets[idx] {
            Some(head) => head,
            None => {
                let id = self.entries.insert(key, value);
                self.buckets[idx] = Some(id);
                self.occupied_buckets += 1;
                return None;
            }
        };

        loop {
            let entry = self.entries.get_mut(current);
            if entry.key == key {
                return Some(mem::replace(&mut entry.value, value));
            }
            match entry.next {
                Some(next) => current = next,
                None => break,
            }
        }

        // `current` is the tail of the chain.
        let id = self.entries.insert(key, value);
        self.entries.get_mut(current).next = Some(id);
        None
    }

    /// Returns a reference to the value stored under `key`, if any.
    pub fn get(&self, key: i64) -> Option<&V> {
        self.find(key).map(|id| &self.entries.get(id).value)
    }

    /// Returns a mutable reference to the value stored under `key`, if any.
    pub fn get_mut(&mut self, key: i64) -> Option<&mut V> {
        let id = self.find(key)?;
        Some(&mut self.entries.get_mut(id).value)
    }

    pub fn contains_key(&self, key: i64) -> bool {
        self.find(key).is_some()
    }

    /// Checks whether any key maps to a value equal to `value`.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values_iter().any(|stored| stored == value)
    }

    /// Removes `key` from the map, returning its value.
    ///
    /// If that empties a bucket and shrinking is enabled, the table may be
    /// halved.
    pub fn remove(&mut self, key: i64) -> Option<V> {
        let idx = self.bucket_of(key)?;
        let head = self.buckets[idx]?;

        if self.entries.get(head).key == key {
            let entry = self.entries.remove(head);
            self.buckets[idx] = entry.next;
            if entry.next.is_none() {
                self.occupied_buckets -= 1;
                self.shrink_if_sparse();
            }
            if self.entries.is_empty() {
                self.entries.clear();
            }
            return Some(entry.value);
        }

        let mut previous = head;
        while let Some(current) = self.entries.get(previous).next {
            if self.entries.get(current).key == key {
                let entry = self.entries.remove(current);
                self.entries.get_mut(previous).next = entry.next;
                return Some(entry.value);
            }
            previous = current;
        }
        None
    }

    /// Collects all the keys, in bucket order.
    pub fn keys(&self) -> Vec<i64> {
        let mut keys = Vec::with_capacity(self.len());
        keys.extend(self.keys_iter());
        keys
    }

    /// Collects references to all the values, in the same order as [`keys`].
    ///
    /// [`keys`]: LongMap::keys
    pub fn values(&self) -> Vec<&V> {
        let mut values = Vec::with_capacity(self.len());
        values.extend(self.values_iter());
        values
    }

    /// Returns iterator over stored pairs.
    pub fn iter(&self) -> iter::Iter<V> {
        iter::Iter::new(self)
    }

    /// Returns iterator over stored keys.
    pub fn keys_iter(&self) -> iter::Keys<V> {
        iter::Keys::new(self)
    }

    /// Returns iterator over stored values.
    pub fn values_iter(&self) -> iter::Values<V> {
        iter::Values::new(self)
    }

    /// Removes everything and goes back to [`DEFAULT_CAPACITY`] buckets, no
    /// matter how large the table has grown.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.buckets = Vec::new();
        self.capacity = DEFAULT_CAPACITY;
        self.occupied_buckets = 0;
        self.growth_allowed = true;
    }

    fn load(&self) -> f64 {
        self.occupied_buckets as f64 / self.capacity as f64
    }

    fn bucket_of(&self, key: i64) -> Option<usize> {
        if self.buckets.is_empty() {
            None
        } else {
            Some(bucket_index(hash_key(key), self.capacity))
        }
    }

    fn find(&self, key: i64) -> Option<EntryId> {
        let mut current = self.buckets[self.bucket_of(key)?];
        while let Some(id) = current {
            let entry = self.entries.get(id);
            if entry.key == key {
                return Some(id);
            }
            current = entry.next;
        }
        None
    }

    fn grow(&mut self) {
        if !self.growth_allowed {
            return;
        }
        match doubled_capacity(self.capacity, self.max_capacity) {
            Some(new_capacity) => {
                debug!(
                    "Growing from {} to {} buckets ({} entries)",
                    self.capacity,
                    new_capacity,
                    self.len()
                );
                self.rehash(new_capacity);
            }
            None => {
                self.growth_allowed = false;
                warn!(
                    "Map is {:.1}% full and can't grow past {} buckets",
                    self.load() * 100.0,
                    self.capacity
                );
            }
        }
    }

    fn shrink_if_sparse(&mut self) {
        if self.shrink_enabled
            && self.load() < LOW_WATER_MARK
            && self.capacity > MIN_SHRINK_CAPACITY
        {
            let new_capacity = self.capacity / 2;
            debug!(
                "Shrinking from {} to {} buckets ({} entries)",
                self.capacity,
                new_capacity,
                self.len()
            );
            self.growth_allowed = true;
            self.rehash(new_capacity);
        }
    }

    /// Moves every entry into a fresh bucket array of `new_capacity` slots and a
    /// compact arena.
    ///
    /// Old buckets are walked in order and every entry is appended to the tail of
    /// its new chain.
    fn rehash(&mut self, new_capacity: usize) {
        let old_buckets = mem::replace(&mut self.buckets, Vec::new());
        let entry_count = self.entries.len();
        let mut old_entries =
            mem::replace(&mut self.entries, EntryArena::with_capacity(entry_count));
        self.capacity = new_capacity;
        self.occupied_buckets = 0;
        if old_entries.is_empty() {
            return;
        }

        self.buckets.resize(new_capacity, None);
        let mut tails: Vec<Option<EntryId>> = vec![None; new_capacity];

        for head in old_buckets {
            let mut current = head;
            while let Some(old_id) = current {
                let entry = old_entries.remove(old_id);
                current = entry.next;
                let idx = bucket_index(hash_key(entry.key), new_capacity);
                let id = self.entries.insert(entry.key, entry.value);

                match tails[idx] {
                    Some(tail) => self.entries.get_mut(tail).next = Some(id),
                    None => {
                        self.buckets[idx] = Some(id);
                        self.occupied_buckets += 1;
                    }
                }
                tails[idx] = Some(id);
            }
        }
    }
}

/// Twice `capacity`, unless that exceeds `max_capacity`.
fn doubled_capacity(capacity: usize, max_capacity: usize) -> Option<usize> {
    capacity
        .checked_mul(2)
        .filter(|&doubled| doubled <= max_capacity)
}

impl<V: fmt::Debug> fmt::Debug for LongMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V: PartialEq> PartialEq for LongMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<V: Eq> Eq for LongMap<V> {}

impl<V> Index<i64> for LongMap<V> {
    type Output = V;

    fn index(&self, key: i64) -> &V {
        self.get(key)
            .unwrap_or_else(|| panic!("No entry found for key {}", key))
    }
}

impl<V> Extend<(i64, V)> for LongMap<V> {
    fn extend<I: IntoIterator<Item = (i64, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<V> FromIterator<(i64, V)> for LongMap<V> {
    fn from_iter<I: IntoIterator<Item = (i64, V)>>(iter: I) -> Self {
        let mut map = LongMap::new();
        map.extend(iter);
        map
    }
}

impl<'a, V> IntoIterator for &'a LongMap<V> {
    type Item = (i64, &'a V);
    type IntoIter = iter::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V> IntoIterator for LongMap<V> {
    type Item = (i64, V);
    type IntoIter = iter::IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        iter::IntoIter::new(self)
    }
}
