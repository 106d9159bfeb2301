//! Lazy views over a `ChainedHashMap`.
//!
//! All three views share `RawIter`, a cursor that walks bucket slots in
//! ascending order and follows each chain to its tail before moving on.
//! Views borrow the table, so the table cannot change underneath them.

use crate::entry::{Entry, NodeKey};
use core::iter::FusedIterator;
use slotmap::SlotMap;

pub(crate) struct RawIter<'a, K, V> {
    buckets: &'a [Option<NodeKey>],
    nodes: &'a SlotMap<NodeKey, Entry<K, V>>,
    bucket: usize,
    current: Option<NodeKey>,
    remaining: usize,
}

impl<'a, K, V> RawIter<'a, K, V> {
    pub(crate) fn new(
        buckets: &'a [Option<NodeKey>],
        nodes: &'a SlotMap<NodeKey, Entry<K, V>>,
    ) -> Self {
        let mut it = Self {
            buckets,
            nodes,
            bucket: 0,
            current: buckets.first().copied().flatten(),
            remaining: nodes.len(),
        };
        it.skip_empty();
        it
    }

    // Move forward to the head of the next non-empty bucket, or run off the end.
    fn skip_empty(&mut self) {
        while self.current.is_none() {
            self.bucket += 1;
            match self.buckets.get(self.bucket) {
                Some(head) => self.current = *head,
                None => break,
            }
        }
    }

    fn next_entry(&mut self) -> Option<&'a Entry<K, V>> {
        let node = self.current?;
        let entry = &self.nodes[node];
        self.current = entry.next;
        self.skip_empty();
        self.remaining -= 1;
        Some(entry)
    }
}

impl<K, V> Clone for RawIter<'_, K, V> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

/// Iterator over `(&K, &V)` pairs, created by `ChainedHashMap::iter`.
pub struct Iter<'a, K, V> {
    pub(crate) raw: RawIter<'a, K, V>,
}

/// Iterator over keys, created by `ChainedHashMap::keys`.
pub struct Keys<'a, K, V> {
    pub(crate) raw: RawIter<'a, K, V>,
}

/// Iterator over values, created by `ChainedHashMap::values`.
pub struct Values<'a, K, V> {
    pub(crate) raw: RawIter<'a, K, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.raw.next_entry().map(|e| (&e.key, &e.value))
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.raw.remaining, Some(self.raw.remaining))
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.raw.next_entry().map(|e| &e.key)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.raw.remaining, Some(self.raw.remaining))
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.raw.next_entry().map(|e| &e.value)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.raw.remaining, Some(self.raw.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

// Once `current` is None and `bucket` is past the end, `skip_empty` is a no-op.
impl<K, V> FusedIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }
}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }
}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }
}
