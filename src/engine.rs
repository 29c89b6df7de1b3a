//! HashEngine: the chained hash table shared by all four containers.
//!
//! The engine owns one `BucketTable`, the hash function and the element
//! count. The duplicate policy is a type parameter: `Unique` rejects a key
//! that is already present, `Multi` appends unconditionally. Everything
//! else (addressing, load-factor policy, rehashing, iteration) is common.

use crate::bucket_table::{round_bucket_count, BucketTable, Entry};
use crate::chain::NodeHandle;
use crate::error::{ChainError, DuplicateKey};
use crate::hash_fn::HashFn;
use crate::iter::{Cursor, Iter};
use crate::reentrancy::DebugReentrancy;
use core::marker::PhantomData;

/// Load factor at or above which an insert doubles the bucket count.
pub const GROW_LOAD_FACTOR: f64 = 0.75;
/// Load factor at or below which a removal halves the bucket count.
pub const SHRINK_LOAD_FACTOR: f64 = 0.25;

mod sealed {
    pub trait Sealed {}
}

/// How an engine treats an insert whose key is already present.
pub trait DuplicatePolicy: sealed::Sealed {
    const ALLOWS_DUPLICATES: bool;
}

/// At most one entry per key.
#[derive(Debug)]
pub enum Unique {}

/// Any number of entries per key.
#[derive(Debug)]
pub enum Multi {}

impl sealed::Sealed for Unique {}
impl sealed::Sealed for Multi {}

impl DuplicatePolicy for Unique {
    const ALLOWS_DUPLICATES: bool = false;
}

impl DuplicatePolicy for Multi {
    const ALLOWS_DUPLICATES: bool = true;
}

/// Reference to one stored entry, valid until that entry is removed or the
/// table is rehashed (any insert or removal may rehash).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct EntryHandle {
    generation: u64,
    bucket: usize,
    node: NodeHandle,
}

pub(crate) struct HashEngine<K, V, H, P> {
    hash_fn: H,
    table: BucketTable<K, V>,
    len: usize,
    reentrancy: DebugReentrancy,
    _policy: PhantomData<fn() -> P>,
}

impl<K, V, H, P> HashEngine<K, V, H, P>
where
    K: Eq,
    H: HashFn<K>,
    P: DuplicatePolicy,
{
    pub fn new(hash_fn: H) -> Self {
        Self::with_bucket_count(hash_fn, 1)
    }

    pub fn with_bucket_count(hash_fn: H, bucket_count: usize) -> Self {
        Self {
            hash_fn,
            table: BucketTable::with_bucket_count(bucket_count),
            len: 0,
            reentrancy: DebugReentrancy::new(),
            _policy: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    pub fn bucket_count(&self) -> usize {
        self.table.bucket_count()
    }

    pub fn load_factor(&self) -> f64 {
        load_factor(self.len, self.table.bucket_count())
    }

    #[cfg(test)]
    pub fn hash_fn(&self) -> &H {
        &self.hash_fn
    }

    // Unguarded probe; callers hold the reentrancy guard.
    fn locate(&self, hash: u64, key: &K) -> Option<(NodeHandle, &Entry<K, V>)> {
        self.table
            .chain_for(hash)
            .iter_with_handles()
            .find(|(_, e)| e.hash == hash && e.key == *key)
    }

    pub fn find(&self, key: &K) -> Option<&Entry<K, V>> {
        let _g = self.reentrancy.enter("find");
        let hash = self.hash_fn.hash(key);
        self.locate(hash, key).map(|(_, e)| e)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Number of entries with `key` that also satisfy `pred`.
    pub fn count_matching<F>(&self, key: &K, mut pred: F) -> usize
    where
        F: FnMut(&V) -> bool,
    {
        let _g = self.reentrancy.enter("count");
        let hash = self.hash_fn.hash(key);
        self.table
            .chain_for(hash)
            .iter()
            .filter(|e| e.hash == hash && e.key == *key && pred(&e.value))
            .count()
    }

    /// Whether some entry with `key` satisfies `pred`. Stops at the first match.
    pub fn contains_matching<F>(&self, key: &K, mut pred: F) -> bool
    where
        F: FnMut(&V) -> bool,
    {
        let _g = self.reentrancy.enter("contains");
        let hash = self.hash_fn.hash(key);
        self.table
            .chain_for(hash)
            .iter()
            .any(|e| e.hash == hash && e.key == *key && pred(&e.value))
    }

    /// Entries with `key`, in chain order. Not guarded: `K: Eq` runs lazily
    /// as the caller iterates.
    pub fn matching<'a>(&'a self, key: &'a K) -> impl Iterator<Item = &'a Entry<K, V>> + 'a {
        let hash = self.hash_fn.hash(key);
        self.table
            .chain_for(hash)
            .iter()
            .filter(move |e| e.hash == hash && e.key == *key)
    }

    /// Insert under the engine's duplicate policy. On rejection the key is
    /// handed back and the container is unchanged.
    pub fn insert(&mut self, key: K, value: V) -> Result<(), DuplicateKey<K>> {
        let _g = self.reentrancy.enter("insert");
        let hash = self.hash_fn.hash(&key);
        if !P::ALLOWS_DUPLICATES && self.locate(hash, &key).is_some() {
            return Err(DuplicateKey::new(key));
        }
        append(&mut self.table, &mut self.len, Entry { key, value, hash });
        Ok(())
    }

    /// Like `insert`, but a duplicate is silently ignored. Returns whether
    /// the entry was stored.
    pub fn insert_safely(&mut self, key: K, value: V) -> bool {
        let _g = self.reentrancy.enter("insert_safely");
        let hash = self.hash_fn.hash(&key);
        if !P::ALLOWS_DUPLICATES && self.locate(hash, &key).is_some() {
            return false;
        }
        append(&mut self.table, &mut self.len, Entry { key, value, hash });
        true
    }

    /// Remove every entry with `key` whose value satisfies `pred`; returns
    /// the number removed.
    pub fn remove_matching<F>(&mut self, key: &K, mut pred: F) -> usize
    where
        F: FnMut(&V) -> bool,
    {
        let _g = self.reentrancy.enter("remove");
        let hash = self.hash_fn.hash(key);
        // Matching runs user code; it finishes before anything is unlinked.
        let removed = self
            .table
            .chain_for_mut(hash)
            .remove_matching(|e| e.hash == hash && e.key == *key && pred(&e.value));
        let count = removed.len();
        after_removal(&mut self.table, &mut self.len, count);
        // Values drop only once the count and table are consistent again.
        drop(removed);
        count
    }

    pub fn find_handle(&self, key: &K) -> Option<EntryHandle> {
        let _g = self.reentrancy.enter("find_handle");
        let hash = self.hash_fn.hash(key);
        let (node, _) = self.locate(hash, key)?;
        Some(EntryHandle {
            generation: self.table.generation(),
            bucket: self.table.bucket_index(hash),
            node,
        })
    }

    pub fn get_by_handle(&self, h: EntryHandle) -> Option<&Entry<K, V>> {
        if h.generation != self.table.generation() {
            return None;
        }
        self.table.chain(h.bucket)?.get_by_handle(h.node)
    }

    /// Remove the entry behind `h`. Stale handles surface the chain's
    /// `StaleHandle` error.
    pub fn remove_by_handle(&mut self, h: EntryHandle) -> Result<Entry<K, V>, ChainError> {
        let _g = self.reentrancy.enter("remove_by_handle");
        if h.generation != self.table.generation() {
            return Err(ChainError::StaleHandle);
        }
        let entry = self
            .table
            .chain_mut(h.bucket)
            .ok_or(ChainError::StaleHandle)?
            .remove(h.node)?;
        after_removal(&mut self.table, &mut self.len, 1);
        Ok(entry)
    }

    pub fn clear(&mut self) {
        let _g = self.reentrancy.enter("clear");
        self.table.clear();
        self.len = 0;
    }

    pub fn begin(&self) -> Cursor<'_, K, V> {
        Cursor::begin(&self.table)
    }

    pub fn end(&self) -> Cursor<'_, K, V> {
        Cursor::end(&self.table)
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.table, self.len)
    }

    pub(crate) fn table(&self) -> &BucketTable<K, V> {
        &self.table
    }
}

// Load-factor policy. These take the table and count rather than `&mut self`
// so callers can keep holding the reentrancy guard.

fn load_factor(len: usize, bucket_count: usize) -> f64 {
    len as f64 / bucket_count as f64
}

fn append<K, V>(table: &mut BucketTable<K, V>, len: &mut usize, entry: Entry<K, V>) {
    let _ = table.push(entry);
    *len += 1;
    if load_factor(*len, table.bucket_count()) >= GROW_LOAD_FACTOR {
        let target = table.bucket_count().saturating_mul(2);
        resize(table, target);
    }
    debug_assert_eq!(*len, table.entry_count());
}

fn after_removal<K, V>(table: &mut BucketTable<K, V>, len: &mut usize, removed: usize) {
    if removed == 0 {
        return;
    }
    debug_assert!(removed <= *len);
    *len -= removed;
    if load_factor(*len, table.bucket_count()) <= SHRINK_LOAD_FACTOR {
        let target = (table.bucket_count() / 2).max(1);
        resize(table, target);
    }
    debug_assert_eq!(*len, table.entry_count());
}

fn resize<K, V>(table: &mut BucketTable<K, V>, requested: usize) {
    if round_bucket_count(requested) != table.bucket_count() {
        table.rehash(requested);
    }
}
