//! Table iteration.
//!
//! A `Cursor` is an explicit `(outer_index, inner_index)` position in one
//! bucket table: `outer_index` selects the chain, `inner_index` the element
//! within it. The end position is `(bucket_count, 0)`. Cursors borrow the
//! table, so the container cannot be mutated (and therefore cannot rehash)
//! while one is alive.
//!
//! `Iter` and `SetIter` are ordinary Rust iterators driven by a cursor.

use crate::bucket_table::{BucketTable, Entry};
use crate::chain::{Chain, NodeHandle};
use core::fmt;
use core::iter::FusedIterator;

pub struct Cursor<'a, K, V> {
    table: &'a BucketTable<K, V>,
    outer: usize,
    inner: usize,
    // Node at (outer, inner); keeps `get` O(1) instead of walking the chain.
    node: Option<NodeHandle>,
}

/// Cursor over a set's table.
pub type SetCursor<'a, K> = Cursor<'a, K, ()>;

impl<'a, K, V> Cursor<'a, K, V> {
    pub(crate) fn begin(table: &'a BucketTable<K, V>) -> Self {
        let outer = table.first_non_empty();
        Self {
            table,
            outer,
            inner: 0,
            node: table.chain(outer).and_then(Chain::first_handle),
        }
    }

    pub(crate) fn end(table: &'a BucketTable<K, V>) -> Self {
        Self {
            table,
            outer: table.bucket_count(),
            inner: 0,
            node: None,
        }
    }

    pub fn is_end(&self) -> bool {
        self.outer >= self.table.bucket_count()
    }

    /// `(outer_index, inner_index)`.
    pub fn position(&self) -> (usize, usize) {
        (self.outer, self.inner)
    }

    /// Step to the next element: the next one in the current chain if there
    /// is one, otherwise the head of the next non-empty chain, otherwise the
    /// end position. No-op at the end.
    pub fn advance(&mut self) {
        let Some(chain) = self.table.chain(self.outer) else {
            return;
        };
        if let Some(next) = self.node.and_then(|n| chain.next_handle(n)) {
            self.inner += 1;
            self.node = Some(next);
            return;
        }
        self.outer = self.table.next_non_empty(self.outer);
        self.inner = 0;
        self.node = self
            .table
            .chain(self.outer)
            .and_then(Chain::first_handle);
    }

    pub(crate) fn entry(&self) -> Option<&'a Entry<K, V>> {
        self.table.chain(self.outer)?.get_by_handle(self.node?)
    }

    /// Key and value at the current position; `None` at the end.
    pub fn get(&self) -> Option<(&'a K, &'a V)> {
        self.entry().map(|e| (&e.key, &e.value))
    }

    /// Key at the current position; `None` at the end.
    pub fn key(&self) -> Option<&'a K> {
        self.entry().map(|e| &e.key)
    }
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            table: self.table,
            outer: self.outer,
            inner: self.inner,
            node: self.node,
        }
    }
}

/// Equal iff both cursors belong to the same table and sit at the same position.
impl<K, V> PartialEq for Cursor<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.table, other.table)
            && self.outer == other.outer
            && self.inner == other.inner
    }
}

impl<K, V> Eq for Cursor<'_, K, V> {}

impl<K, V> fmt::Debug for Cursor<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("outer_index", &self.outer)
            .field("inner_index", &self.inner)
            .field("bucket_count", &self.table.bucket_count())
            .finish()
    }
}

/// Iterator over `(&K, &V)` pairs of a map.
pub struct Iter<'a, K, V> {
    cursor: Cursor<'a, K, V>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(table: &'a BucketTable<K, V>, len: usize) -> Self {
        Self {
            cursor: Cursor::begin(table),
            remaining: len,
        }
    }

    pub(crate) fn next_entry(&mut self) -> Option<&'a Entry<K, V>> {
        let entry = self.cursor.entry()?;
        self.cursor.advance();
        self.remaining = self.remaining.saturating_sub(1);
        Some(entry)
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry().map(|e| (&e.key, &e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            cursor: self.cursor.clone(),
            remaining: self.remaining,
        }
    }
}

/// Iterator over the keys of a set.
pub struct SetIter<'a, K> {
    inner: Iter<'a, K, ()>,
}

impl<'a, K> SetIter<'a, K> {
    pub(crate) fn new(table: &'a BucketTable<K, ()>, len: usize) -> Self {
        Self {
            inner: Iter::new(table, len),
        }
    }
}

impl<'a, K> Iterator for SetIter<'a, K> {
    type Item = &'a K;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next_entry().map(|e| &e.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> ExactSizeIterator for SetIter<'_, K> {}
impl<K> FusedIterator for SetIter<'_, K> {}

impl<K> Clone for SetIter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}
