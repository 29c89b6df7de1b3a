//! Hash function seam.
//!
//! Containers accept anything implementing `HashFn<K>`: plain closures and
//! fn items `Fn(&K) -> u64`, or `BuildHasherFn`, which adapts a
//! `BuildHasher` for `K: Hash` keys. The hash is computed exactly once per
//! inserted entry and memoized; lookups hash the probe key once.

use core::hash::{BuildHasher, Hash};
use hashbrown::hash_map::DefaultHashBuilder;

pub trait HashFn<K: ?Sized> {
    fn hash(&self, key: &K) -> u64;
}

impl<K: ?Sized, F> HashFn<K> for F
where
    F: Fn(&K) -> u64,
{
    #[inline]
    fn hash(&self, key: &K) -> u64 {
        self(key)
    }
}

/// `HashFn` backed by a `BuildHasher`; the default hash function of every
/// container uses hashbrown's default builder.
#[derive(Clone, Debug, Default)]
pub struct BuildHasherFn<S = DefaultHashBuilder> {
    build_hasher: S,
}

impl<S> BuildHasherFn<S> {
    pub fn new(build_hasher: S) -> Self {
        Self { build_hasher }
    }

    pub fn build_hasher(&self) -> &S {
        &self.build_hasher
    }
}

impl<K, S> HashFn<K> for BuildHasherFn<S>
where
    K: ?Sized + Hash,
    S: BuildHasher,
{
    #[inline]
    fn hash(&self, key: &K) -> u64 {
        self.build_hasher.hash_one(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::RandomState;

    fn len_hash(s: &String) -> u64 {
        s.len() as u64
    }

    #[test]
    fn fn_items_and_closures_are_hash_fns() {
        assert_eq!(HashFn::hash(&len_hash, &"abc".to_string()), 3);
        let offset = 10u64;
        let f = move |k: &u32| *k as u64 + offset;
        assert_eq!(f.hash(&5), 15);
    }

    /// Invariant: equal keys hash equally through the same builder.
    #[test]
    fn build_hasher_fn_is_deterministic_per_instance() {
        let h = BuildHasherFn::new(RandomState::new());
        assert_eq!(h.hash("key"), h.hash("key"));
        assert_eq!(HashFn::<str>::hash(&h, "key"), h.build_hasher().hash_one("key"));

        let d: BuildHasherFn = BuildHasherFn::default();
        assert_eq!(d.hash(&42u64), d.hash(&42u64));
    }
}
