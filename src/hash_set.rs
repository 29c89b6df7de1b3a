//! HashSet: unique-key set over the chained engine.

use crate::engine::{EntryHandle, HashEngine, Unique};
use crate::error::{ChainError, DuplicateKey};
use crate::hash_fn::{BuildHasherFn, HashFn};
use crate::iter::{SetCursor, SetIter};
use core::fmt;
use core::hash::Hash;

/// Set holding each key at most once.
pub struct HashSet<K, H = BuildHasherFn> {
    engine: HashEngine<K, (), H, Unique>,
}

impl<K> HashSet<K>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self::with_hash_fn(BuildHasherFn::default())
    }

    pub fn with_bucket_count(bucket_count: usize) -> Self {
        Self::with_hash_fn_and_bucket_count(BuildHasherFn::default(), bucket_count)
    }
}

impl<K> Default for HashSet<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, H> HashSet<K, H>
where
    K: Eq,
    H: HashFn<K>,
{
    pub fn with_hash_fn(hash_fn: H) -> Self {
        Self {
            engine: HashEngine::new(hash_fn),
        }
    }

    pub fn with_hash_fn_and_bucket_count(hash_fn: H, bucket_count: usize) -> Self {
        Self {
            engine: HashEngine::with_bucket_count(hash_fn, bucket_count),
        }
    }

    pub fn len(&self) -> usize {
        self.engine.len()
    }
    pub fn is_empty(&self) -> bool {
        self.engine.is_empty()
    }
    pub fn bucket_count(&self) -> usize {
        self.engine.bucket_count()
    }
    pub fn load_factor(&self) -> f64 {
        self.engine.load_factor()
    }

    pub fn insert(&mut self, key: K) -> Result<(), DuplicateKey<K>> {
        self.engine.insert(key, ())
    }

    /// Insert unless present; returns whether the key was added.
    pub fn insert_safely(&mut self, key: K) -> bool {
        self.engine.insert_safely(key, ())
    }

    pub fn exists(&self, key: &K) -> bool {
        self.engine.contains(key)
    }

    /// Remove `key`; returns whether it was present.
    pub fn remove(&mut self, key: &K) -> bool {
        self.engine.remove_matching(key, |_| true) > 0
    }

    pub fn find_handle(&self, key: &K) -> Option<EntryHandle> {
        self.engine.find_handle(key)
    }

    pub fn get_by_handle(&self, handle: EntryHandle) -> Option<&K> {
        self.engine.get_by_handle(handle).map(|e| &e.key)
    }

    pub fn remove_by_handle(&mut self, handle: EntryHandle) -> Result<K, ChainError> {
        self.engine.remove_by_handle(handle).map(|e| e.key)
    }

    pub fn clear(&mut self) {
        self.engine.clear()
    }

    pub fn begin(&self) -> SetCursor<'_, K> {
        self.engine.begin()
    }

    pub fn end(&self) -> SetCursor<'_, K> {
        self.engine.end()
    }

    pub fn iter(&self) -> SetIter<'_, K> {
        SetIter::new(self.engine.table(), self.engine.len())
    }
}

impl<'a, K, H> IntoIterator for &'a HashSet<K, H>
where
    K: Eq,
    H: HashFn<K>,
{
    type Item = &'a K;
    type IntoIter = SetIter<'a, K>;
    fn into_iter(self) -> SetIter<'a, K> {
        self.iter()
    }
}

impl<K, H> fmt::Debug for HashSet<K, H>
where
    K: Eq + fmt::Debug,
    H: HashFn<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
