//! HashMap: unique-key map over the chained engine.

use crate::engine::{EntryHandle, HashEngine, Unique};
use crate::error::{ChainError, DuplicateKey, ValueNotFound};
use crate::hash_fn::{BuildHasherFn, HashFn};
use crate::iter::{Cursor, Iter};
use core::fmt;
use core::hash::Hash;

/// Map holding at most one value per key.
///
/// `insert` rejects a key that is already present with `DuplicateKey`;
/// `insert_safely` ignores it instead. Neither overwrites the stored value.
pub struct HashMap<K, V, H = BuildHasherFn> {
    engine: HashEngine<K, V, H, Unique>,
}

impl<K, V> HashMap<K, V>
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

impl<K, V> Default for HashMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H> HashMap<K, V, H>
where
    K: Eq,
    H: HashFn<K>,
{
    /// Empty map with a single bucket.
    pub fn with_hash_fn(hash_fn: H) -> Self {
        Self {
            engine: HashEngine::new(hash_fn),
        }
    }

    /// Empty map whose bucket count is `bucket_count` rounded up to a power
    /// of two (at least 1).
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

    pub fn insert(&mut self, key: K, value: V) -> Result<(), DuplicateKey<K>> {
        self.engine.insert(key, value)
    }

    /// Insert unless `key` is present; returns `false` (and keeps the stored
    /// value) when it is.
    pub fn insert_safely(&mut self, key: K, value: V) -> bool {
        self.engine.insert_safely(key, value)
    }

    pub fn find_by_key(&self, key: &K) -> Option<&V> {
        self.engine.find(key).map(|e| &e.value)
    }

    pub fn find_by_key_or_fail(&self, key: &K) -> Result<&V, ValueNotFound<K>>
    where
        K: Clone,
    {
        self.find_by_key(key)
            .ok_or_else(|| ValueNotFound::new(key.clone()))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.engine.contains(key)
    }

    /// Remove `key`; returns whether an entry was removed.
    pub fn remove(&mut self, key: &K) -> bool {
        self.engine.remove_matching(key, |_| true) > 0
    }

    pub fn find_handle(&self, key: &K) -> Option<EntryHandle> {
        self.engine.find_handle(key)
    }

    /// `None` once the entry is removed or the map has rehashed.
    pub fn get_by_handle(&self, handle: EntryHandle) -> Option<(&K, &V)> {
        self.engine
            .get_by_handle(handle)
            .map(|e| (&e.key, &e.value))
    }

    pub fn remove_by_handle(&mut self, handle: EntryHandle) -> Result<(K, V), ChainError> {
        self.engine
            .remove_by_handle(handle)
            .map(|e| (e.key, e.value))
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

impl<'a, K, V, H> IntoIterator for &'a HashMap<K, V, H>
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

impl<K, V, H> fmt::Debug for HashMap<K, V, H>
where
    K: Eq + fmt::Debug,
    V: fmt::Debug,
    H: HashFn<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> HashMap<String, i32> {
        let mut m = HashMap::new();
        m.insert("key1".to_string(), 1).unwrap();
        m.insert("key2".to_string(), 2).unwrap();
        m.insert("key3".to_string(), 3).unwrap();
        m
    }

    #[test]
    fn insert_then_find() {
        let mut m = seeded();
        assert_eq!(m.len(), 3);
        m.insert("key4".to_string(), 4).unwrap();
        assert_eq!(m.find_by_key(&"key4".to_string()), Some(&4));
        assert!(m.contains_key(&"key4".to_string()));
        assert_eq!(m.find_by_key(&"nonexistent".to_string()), None);
    }

    /// Invariant: a rejected duplicate leaves size and stored value untouched
    /// and hands the key back.
    #[test]
    fn duplicate_insert_rejected() {
        let mut m = seeded();
        let err = m.insert("key1".to_string(), 10).unwrap_err();
        assert_eq!(err.into_key(), "key1");
        assert_eq!(m.find_by_key(&"key1".to_string()), Some(&1));
        assert_eq!(m.len(), 3);
    }

    #[test]
    fn insert_safely_never_overwrites() {
        let mut m = seeded();
        assert!(!m.insert_safely("key1".to_string(), 10));
        assert_eq!(m.find_by_key(&"key1".to_string()), Some(&1));
        assert!(m.insert_safely("key9".to_string(), 9));
        assert_eq!(m.len(), 4);
    }

    #[test]
    fn find_or_fail_reports_missing_key() {
        let m = seeded();
        assert_eq!(m.find_by_key_or_fail(&"key2".to_string()), Ok(&2));
        let err = m.find_by_key_or_fail(&"nope".to_string()).unwrap_err();
        assert_eq!(err.key(), "nope");
    }

    #[test]
    fn remove_present_and_absent() {
        let mut m = seeded();
        assert!(m.remove(&"key1".to_string()));
        assert!(m.find_by_key(&"key1".to_string()).is_none());
        assert_eq!(m.len(), 2);
        assert!(!m.remove(&"key1".to_string()));
        assert!(!m.remove(&"nonexistent".to_string()));
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn handle_round_trip() {
        let mut m = seeded();
        let h = m.find_handle(&"key2".to_string()).unwrap();
        assert_eq!(
            m.get_by_handle(h),
            Some((&"key2".to_string(), &2))
        );
        assert_eq!(m.remove_by_handle(h), Ok(("key2".to_string(), 2)));
        assert_eq!(m.remove_by_handle(h), Err(ChainError::StaleHandle));
        assert!(m.find_handle(&"key2".to_string()).is_none());
    }

    #[test]
    fn debug_renders_as_map() {
        let mut m: HashMap<u8, u8> = HashMap::new();
        m.insert(1, 2).unwrap();
        assert_eq!(format!("{m:?}"), "{1: 2}");
    }
}
