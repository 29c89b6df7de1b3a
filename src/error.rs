//! Failure signals raised by container operations.

use thiserror::Error;

/// Returned by `insert` on unique-key containers when the key is already
/// present. Carries the rejected key back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("key {key:?} is already present")]
pub struct DuplicateKey<K> {
    key: K,
}

impl<K> DuplicateKey<K> {
    pub(crate) fn new(key: K) -> Self {
        Self { key }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn into_key(self) -> K {
        self.key
    }
}

/// Returned by `find_by_key_or_fail` when no entry has the requested key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no value stored for key {key:?}")]
pub struct ValueNotFound<K> {
    key: K,
}

impl<K> ValueNotFound<K> {
    pub(crate) fn new(key: K) -> Self {
        Self { key }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn into_key(self) -> K {
        self.key
    }
}

/// Position errors raised by a chain. Containers pass them through
/// unchanged: they mean the caller used a handle or index that no longer
/// refers to a live entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("handle does not refer to a live entry")]
    StaleHandle,
    #[error("index {index} out of range for chain of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}
