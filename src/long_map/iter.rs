//! LongMap iterators.
//!
//! All of them walk the buckets in order and every chain from head to tail.

use super::LongMap;
use crate::arena::EntryId;
use core::iter::ExactSizeIterator;

pub struct Iter<'a, V> {
    map: &'a LongMap<V>,
    next_bucket: usize,
    current: Option<EntryId>,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(super) fn new(map: &'a LongMap<V>) -> Self {
        Self {
            map,
            next_bucket: 0,
            current: None,
            remaining: map.len(),
        }
    }
}

impl<'a, V: 'a> Iterator for Iter<'a, V> {
    type Item = (i64, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let map = self.map;
        loop {
            if let Some(id) = self.current {
                let entry = map.entries.get(id);
                self.current = entry.next;
                self.remaining -= 1;
                return Some((entry.key, &entry.value));
            }
            if self.remaining == 0 {
                return None;
            }
            self.current = map.buckets[self.next_bucket];
            self.next_bucket += 1;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl<'a, V: 'a> ExactSizeIterator for Iter<'a, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

pub struct Keys<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Keys<'a, V> {
    pub(super) fn new(map: &'a LongMap<V>) -> Self {
        Self {
            inner: Iter::new(map),
        }
    }
}

impl<'a, V: 'a> Iterator for Keys<'a, V> {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, V: 'a> ExactSizeIterator for Keys<'a, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

pub struct Values<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Values<'a, V> {
    pub(super) fn new(map: &'a LongMap<V>) -> Self {
        Self {
            inner: Iter::new(map),
        }
    }
}

impl<'a, V: 'a> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, V: 'a> ExactSizeIterator for Values<'a, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// Owning iterator. Takes chain heads off the buckets one at a time.
#[derive(Clone)]
pub struct IntoIter<V> {
    inner: LongMap<V>,
    next_bucket: usize,
}

impl<V> IntoIter<V> {
    pub(super) fn new(map: LongMap<V>) -> Self {
        Self {
            inner: map,
            next_bucket: 0,
        }
    }
}

impl<V> Iterator for IntoIter<V> {
    type Item = (i64, V);

    fn next(&mut self) -> Option<Self::Item> {
        while !self.inner.is_empty() {
            let idx = self.next_bucket;
            match self.inner.buckets[idx] {
                Some(head) => {
                    let entry = self.inner.entries.remove(head);
                    self.inner.buckets[idx] = entry.next;
                    if entry.next.is_none() {
                        self.inner.occupied_buckets -= 1;
                    }
                    return Some((entry.key, entry.value));
                }
                None => self.next_bucket += 1,
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}
