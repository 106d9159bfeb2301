//! ChainedHashMap: bucket array of arena-backed chains with doubling growth.

use crate::config::{threshold, TableConfig};
use crate::entry::{Entry, NodeKey};
use crate::error::ConfigError;
use crate::iter::{Iter, Keys, RawIter, Values};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::ops::Index;
use slotmap::SlotMap;
use std::collections::hash_map::RandomState;

/// Separate-chaining hash map.
///
/// Each bucket slot holds the head of a singly-linked chain. Chain nodes live
/// in an arena owned by the map, so unlinking a node also frees it. When the
/// element count exceeds `floor(load_factor * capacity)` the bucket array
/// doubles and every entry is re-inserted.
#[derive(Clone)]
pub struct ChainedHashMap<K, V, S = RandomState> {
    hasher: S,
    buckets: Vec<Option<NodeKey>>,
    nodes: SlotMap<NodeKey, Entry<K, V>>,
    len: usize,
    load_factor: f32,
    threshold: usize,
}

impl<K, V> ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    /// 16 buckets, load factor 0.75.
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    pub fn with_capacity_and_load_factor(
        initial_capacity: usize,
        load_factor: f32,
    ) -> Result<Self, ConfigError> {
        Self::with_config(TableConfig::new(initial_capacity, load_factor))
    }

    pub fn with_config(config: TableConfig) -> Result<Self, ConfigError> {
        Self::with_config_and_hasher(config, Default::default())
    }
}

impl<K, V> Default for ChainedHashMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self::from_valid_config(TableConfig::default(), hasher)
    }

    /// Build a table from a caller-supplied configuration, rejecting zero
    /// buckets or a load factor outside of `(0, 1]`.
    pub fn with_config_and_hasher(config: TableConfig, hasher: S) -> Result<Self, ConfigError> {
        config.validate()?;
        log::debug!(
            "chained map: {} buckets, load factor {}",
            config.initial_capacity,
            config.load_factor
        );
        Ok(Self::from_valid_config(config, hasher))
    }

    fn from_valid_config(config: TableConfig, hasher: S) -> Self {
        Self {
            hasher,
            buckets: vec![None; config.initial_capacity],
            nodes: SlotMap::with_key(),
            len: 0,
            load_factor: config.load_factor,
            threshold: config.threshold_for(config.initial_capacity),
        }
    }

    fn make_hash<Q>(&self, q: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(q)
    }

    // Unsigned hash, so the index is never negative.
    #[inline]
    fn bucket_index(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }
    pub fn load_factor(&self) -> f32 {
        self.load_factor
    }
    /// Element count above which the next insertion grows the table.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    fn find_in_bucket<Q>(&self, index: usize, hash: u64, q: &Q) -> Option<NodeKey>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let mut cursor = self.buckets[index];
        while let Some(node) = cursor {
            let entry = &self.nodes[node];
            if entry.matches(hash, q) {
                return Some(node);
            }
            cursor = entry.next;
        }
        None
    }

    fn find<Q>(&self, q: &Q) -> Option<NodeKey>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        self.find_in_bucket(self.bucket_index(hash), hash, q)
    }

    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(q).map(|node| &self.nodes[node].value)
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let node = self.find(q)?;
        Some(&mut self.nodes[node].value)
    }

    pub fn get_key_value<Q>(&self, q: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(q).map(|node| {
            let e = &self.nodes[node];
            (&e.key, &e.value)
        })
    }

    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.find(q).is_some()
    }

    /// Insert or overwrite. Returns `true` when `key` was already present, in
    /// which case only the value changes and the table never grows.
    pub fn place(&mut self, key: K, value: V) -> bool {
        let hash = self.make_hash(&key);
        let index = self.bucket_index(hash);
        self.place_in_bucket(index, hash, key, value)
    }

    fn place_in_bucket(&mut self, index: usize, hash: u64, key: K, value: V) -> bool {
        let mut last = None;
        let mut cursor = self.buckets[index];
        while let Some(node) = cursor {
            let entry = &mut self.nodes[node];
            if entry.matches(hash, &key) {
                entry.value = value;
                return true;
            }
            last = Some(node);
            cursor = entry.next;
        }

        let node = self.nodes.insert(Entry::new(hash, key, value));
        match last {
            None => self.buckets[index] = Some(node),
            Some(prev) => self.nodes[prev].next = Some(node),
        }
        self.len += 1;

        if self.len > self.threshold {
            self.reallocate();
        }
        false
    }

    /// Remove `q`, returning whether it was present. Capacity never shrinks.
    pub fn remove<Q>(&mut self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(q).is_some()
    }

    /// Remove `q` and hand back the owned pair.
    pub fn remove_entry<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let hash = self.make_hash(q);
        let index = self.bucket_index(hash);

        let mut prev: Option<NodeKey> = None;
        let mut cursor = self.buckets[index];
        while let Some(node) = cursor {
            let entry = &self.nodes[node];
            if entry.matches(hash, q) {
                let next = entry.next;
                match prev {
                    None => self.buckets[index] = next,
                    Some(p) => self.nodes[p].next = next,
                }
                let removed = self.nodes.remove(node)?;
                self.len -= 1;
                return Some((removed.key, removed.value));
            }
            prev = Some(node);
            cursor = entry.next;
        }
        None
    }

    /// Drop every entry. Capacity, load factor and threshold are unchanged.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.buckets.fill(None);
        self.len = 0;
    }

    // Double the bucket array and re-insert every entry through
    // `place_in_bucket`, walking the old chains in bucket order. Cached hashes
    // are reused; `K: Hash` is not called again.
    fn reallocate(&mut self) {
        let old_capacity = self.buckets.len();
        let capacity = old_capacity
            .checked_mul(2)
            .expect("chained map capacity overflow");

        let old_buckets = core::mem::replace(&mut self.buckets, vec![None; capacity]);
        let mut old_nodes =
            core::mem::replace(&mut self.nodes, SlotMap::with_capacity_and_key(self.len));
        self.threshold = threshold(self.load_factor, capacity);
        let moved = self.len;
        self.len = 0;

        for head in old_buckets {
            let mut cursor = head;
            while let Some(node) = cursor {
                let Entry {
                    hash,
                    key,
                    value,
                    next,
                } = old_nodes
                    .remove(node)
                    .expect("chain link points at a live node");
                let index = self.bucket_index(hash);
                self.place_in_bucket(index, hash, key, value);
                cursor = next;
            }
        }
        debug_assert!(old_nodes.is_empty(), "rehash left nodes behind");
        debug_assert_eq!(self.len, moved);

        log::trace!(
            "chained map grew {} -> {} buckets, {} entries rehashed, threshold {}",
            old_capacity,
            self.buckets.len(),
            moved,
            self.threshold
        );
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            raw: RawIter::new(&self.buckets, &self.nodes),
        }
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys {
            raw: RawIter::new(&self.buckets, &self.nodes),
        }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values {
            raw: RawIter::new(&self.buckets, &self.nodes),
        }
    }

    /// Bucket-by-bucket chain lengths, for diagnostics and tests.
    #[cfg(test)]
    pub(crate) fn chain_lengths(&self) -> Vec<usize> {
        self.buckets
            .iter()
            .map(|head| {
                let mut n = 0;
                let mut cursor = *head;
                while let Some(node) = cursor {
                    n += 1;
                    cursor = self.nodes[node].next;
                }
                n
            })
            .collect()
    }

    /// Every linked node sits in the bucket its cached hash selects.
    #[cfg(test)]
    pub(crate) fn nodes_in_home_buckets(&self) -> bool {
        self.buckets.iter().enumerate().all(|(i, head)| {
            let mut cursor = *head;
            while let Some(node) = cursor {
                let e = &self.nodes[node];
                if self.bucket_index(e.hash) != i {
                    return false;
                }
                cursor = e.next;
            }
            true
        })
    }

    #[cfg(test)]
    pub(crate) fn arena_len(&self) -> usize {
        self.nodes.len()
    }
}

impl<K, V, S> fmt::Debug for ChainedHashMap<K, V, S>
where
    K: Eq + Hash + fmt::Debug,
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S, Q> Index<&Q> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash + Borrow<Q>,
    Q: ?Sized + Hash + Eq,
    S: BuildHasher,
{
    type Output = V;

    fn index(&self, q: &Q) -> &V {
        self.get(q).expect("key not present in chained map")
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> Extend<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.place(k, v);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::with_hasher(S::default());
        map.extend(iter);
        map
    }
}
