//! HashMultiMap: map storing every inserted `(key, value)` pair.

use crate::engine::{HashEngine, Multi};
use crate::hash_fn::{BuildHasherFn, HashFn};
use crate::iter::{Cursor, Iter};
use core::fmt;
use core::hash::Hash;

/// Map allowing any number of values per key, including repeated
/// identical pairs. Every occurrence counts towards `len`.
pub struct HashMultiMap<K, V, H = BuildHasherFn> {
    engine: HashEngine<K, V, H, Multi>,
}

impl<K, V> HashMultiMap<K, V>
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

impl<K, V> Default for HashMultiMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H> HashMultiMap<K, V, H>
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

    /// Always stores the pair.
    pub fn insert(&mut self, key: K, value: V) {
        let stored = self.engine.insert_safely(key, value);
        debug_assert!(stored);
    }

    pub fn exists_by_key(&self, key: &K) -> bool {
        self.engine.contains(key)
    }

    /// Whether some entry matches both `key` and `value`.
    pub fn exists(&self, key: &K, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.engine.contains_matching(key, |v| v == value)
    }

    /// Number of values stored under `key`.
    pub fn count(&self, key: &K) -> usize {
        self.engine.count_matching(key, |_| true)
    }

    /// Values stored under `key`, in no particular order.
    pub fn find_all_by_key<'a>(&'a self, key: &'a K) -> impl Iterator<Item = &'a V> + 'a {
        self.engine.matching(key).map(|e| &e.value)
    }

    /// Remove every value stored under `key`; returns how many were removed.
    pub fn remove_by_key(&mut self, key: &K) -> usize {
        self.engine.remove_matching(key, |_| true)
    }

    /// Remove every occurrence of the exact pair; returns how many were removed.
    pub fn remove(&mut self, key: &K, value: &V) -> usize
    where
        V: PartialEq,
    {
        self.engine.remove_matching(key, |v| v == value)
    }

    pub fn clear(&mut self) {
        self.engine.clear()
    }

    pub fn begin(&self) -> Cursor<'_, K, V> {
        self.engine.begin()
    }

    pub fn end(&self) -> Cursor<'_, K, V> {
        self.engine.end()
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        self.engine.iter()
    }
}

impl<'a, K, V, H> IntoIterator for &'a HashMultiMap<K, V, H>
where
    K: Eq,
    H: HashFn<K>,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;
    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V, H> fmt::Debug for HashMultiMap<K, V, H>
where
    K: Eq + fmt::Debug,
    V: fmt::Debug,
    H: HashFn<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
