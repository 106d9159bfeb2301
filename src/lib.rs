//! chain-hashmap: a single-threaded, separate-chaining hash map with a fixed
//! doubling growth policy.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small map whose collision strategy and growth policy are
//!   explicit and easy to reason about, with no dependency on std's map.
//! - Pieces:
//!   - ChainedHashMap<K, V, S>: owns the bucket array (one optional chain
//!     head per bucket), the element count, and the resize threshold;
//!     exposes the public operations and walks chains for get/place/remove.
//!   - Entry<K, V>: a chain node with a cached hash, the key, the value and
//!     the arena key of its successor.
//!   - RawIter: a cursor over buckets then chains, shared by the `iter`,
//!     `keys` and `values` views.
//!
//! Ownership
//! - Chain nodes live in a `slotmap` arena owned by the table. Bucket slots
//!   and `Entry::next` hold arena keys. Every node is reachable from exactly
//!   one predecessor, and removing a node from the arena frees it.
//! - Views borrow the table immutably, so structural mutation during
//!   iteration is a compile error rather than a runtime hazard.
//!
//! Hashing
//! - Each entry caches its `u64` hash. Lookups compare cached hashes before
//!   calling `K: Eq`, and growth reuses cached hashes, so `K: Hash` runs once
//!   per `place`.
//! - The bucket index is `hash % capacity` on an unsigned hash.
//! - There is no null key. Use `Option<K>` when an absent key must be
//!   storable; `None` is an ordinary key.
//!
//! Growth
//! - After an insertion pushes the count above `floor(load_factor *
//!   capacity)`, the bucket array doubles and every entry is re-inserted
//!   into a fresh arena in old-bucket order. Removal and `clear` never
//!   shrink the table.
//!
//! Notes and non-goals
//! - Single-threaded: no locking, no atomics.
//! - No randomized-hashing requirement; the hasher is pluggable through `S`.
//! - Iteration order is bucket order and carries no insertion-order promise.

pub mod config;
mod entry;
pub mod error;
pub mod iter;
mod table;
mod table_proptest;

// Public surface
pub use config::{TableConfig, DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR};
pub use error::ConfigError;
pub use iter::{Iter, Keys, Values};
pub use table::ChainedHashMap;
