//! HashMultiSet: set that keeps every inserted occurrence.

use crate::engine::{HashEngine, Multi};
use crate::hash_fn::{BuildHasherFn, HashFn};
use crate::iter::{SetCursor, SetIter};
use core::fmt;
use core::hash::Hash;

pub struct HashMultiSet<K, H = BuildHasherFn> {
    engine: HashEngine<K, (), H, Multi>,
}

impl<K> HashMultiSet<K>
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

impl<K> Default for HashMultiSet<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, H> HashMultiSet<K, H>
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

    /// Total occurrences, duplicates included.
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

    pub fn insert(&mut self, key: K) {
        let stored = self.engine.insert_safely(key, ());
        debug_assert!(stored);
    }

    pub fn exists(&self, key: &K) -> bool {
        self.engine.contains(key)
    }

    pub fn count(&self, key: &K) -> usize {
        self.engine.count_matching(key, |_| true)
    }

    /// Remove every occurrence of `key`; returns how many were removed.
    pub fn remove(&mut self, key: &K) -> usize {
        self.engine.remove_matching(key, |_| true)
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

impl<'a, K, H> IntoIterator for &'a HashMultiSet<K, H>
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

impl<K, H> fmt::Debug for HashMultiSet<K, H>
where
    K: Eq + fmt::Debug,
    H: HashFn<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
