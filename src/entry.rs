//! Chain nodes stored in the table's arena.

use slotmap::new_key_type;

new_key_type! {
    /// Arena key of a chain node. Bucket slots and `Entry::next` hold these.
    pub(crate) struct NodeKey;
}

/// A chain link: cached hash, key, value, and the next node in the bucket.
#[derive(Debug, Clone)]
pub(crate) struct Entry<K, V> {
    pub(crate) hash: u64,
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) next: Option<NodeKey>,
}

impl<K, V> Entry<K, V> {
    /// Fresh tail node. The hash is computed once by the table and never again.
    pub(crate) fn new(hash: u64, key: K, value: V) -> Self {
        Self {
            hash,
            key,
            value,
            next: None,
        }
    }

    /// Cheap hash comparison first, key equality only on a hash match.
    #[inline]
    pub(crate) fn matches<Q>(&self, hash: u64, key: &Q) -> bool
    where
        K: core::borrow::Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.hash == hash && self.key.borrow() == key
    }
}
