//! chained-hashmap: hash map, multi-map, set and multi-set built on
//! separate chaining with load-factor driven rehashing.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: average O(1) insert/lookup/remove on a table we own end to end
//!   (addressing, chains, resizing, iteration), with one engine shared by
//!   four container shapes.
//! - Layers:
//!   - Chain<T>: doubly linked list per bucket. Nodes live in a slotmap
//!     arena and link to each other by generational key, so there is no
//!     shared ownership between neighbours and stale node handles are
//!     detected rather than aliased.
//!   - BucketTable<K, V>: power-of-two `Vec` of chains; addresses entries
//!     by `hash % bucket_count` and rebuilds itself wholesale on rehash.
//!   - HashEngine<K, V, H, P>: insert/lookup/remove and the load-factor
//!     policy. `P` is the duplicate policy (`Unique` or `Multi`).
//!   - HashMap, HashMultiMap, HashSet, HashMultiSet: typed facades. Sets
//!     store `()` as the value.
//!
//! Hashing and rehashing invariants
//! - The hash function is any `HashFn<K>` (closures `Fn(&K) -> u64` work
//!   directly); the default adapts hashbrown's `BuildHasher`.
//! - Each entry stores the `u64` hash computed at insertion. Rehashing
//!   uses only the stored hash; the hash function never runs during a
//!   rehash.
//! - Bucket count is always a power of two and at least 1. Construction
//!   rounds the requested count up.
//! - After an insert that adds an entry, load factor >= 0.75 doubles the
//!   bucket count. After a removal that drops entries, load factor <= 0.25
//!   halves it (floor 1). At most one rehash per operation.
//!
//! Duplicate policy
//! - Unique containers: `insert` fails with `DuplicateKey` (handing the
//!   key back), `insert_safely` is a silent no-op. The stored value is
//!   never overwritten.
//! - Multi containers store every occurrence and keep them distinct across
//!   rehashes; removal takes out every matching occurrence.
//!
//! Iteration
//! - `Cursor` exposes the table position `(outer_index, inner_index)` with
//!   `begin`/`end`/`advance`; `Iter`/`SetIter` drive a cursor. Both borrow
//!   the container, so a rehash can never invalidate a live iterator.
//! - `EntryHandle`s outlive borrows; they carry the table generation and a
//!   generational node key and fail with `ChainError::StaleHandle` once the
//!   entry is removed or the table has been rebuilt.
//!
//! Constraints
//! - Single-threaded. Containers are `!Sync`; there is no internal locking.
//! - Reentrancy: calling back into a container from its own hash function
//!   or `K: Eq` panics in debug builds (see `reentrancy`).
//! - Rehashes are reported through the `log` facade at trace level.

pub mod bucket_table;
pub mod chain;
mod engine;
#[cfg(test)]
mod engine_proptest;
pub mod error;
pub mod hash_fn;
mod hash_map;
mod hash_multi_map;
mod hash_multi_set;
mod hash_set;
pub mod iter;
mod reentrancy;

// Public surface
pub use engine::{
    DuplicatePolicy, EntryHandle, Multi, Unique, GROW_LOAD_FACTOR, SHRINK_LOAD_FACTOR,
};
pub use error::{ChainError, DuplicateKey, ValueNotFound};
pub use hash_fn::{BuildHasherFn, HashFn};
pub use hash_map::HashMap;
pub use hash_multi_map::HashMultiMap;
pub use hash_multi_set::HashMultiSet;
pub use hash_set::HashSet;
pub use iter::{Cursor, Iter, SetCursor, SetIter};
pub use reentrancy::{DebugReentrancy, ReentrancyGuard};
