//! Chain: per-bucket doubly linked list whose nodes live in a generational
//! arena.
//!
//! Nodes are addressed by `NodeHandle` (a `slotmap` key) instead of
//! pointers, so there is no cyclic ownership between neighbours and a
//! handle to a removed node never aliases a later one.

use crate::error::ChainError;
use slotmap::{DefaultKey, SlotMap};

/// Stable reference to one node of a `Chain`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeHandle(DefaultKey);

impl NodeHandle {
    pub(crate) fn new(k: DefaultKey) -> Self {
        NodeHandle(k)
    }
    pub(crate) fn raw_handle(&self) -> DefaultKey {
        self.0
    }
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<DefaultKey>,
    next: Option<DefaultKey>,
}

pub struct Chain<T> {
    // Created on the first push; most buckets of a sparse table never
    // allocate. Once created it is kept so node keys are never reused.
    nodes: Option<SlotMap<DefaultKey, Node<T>>>,
    head: Option<DefaultKey>,
    tail: Option<DefaultKey>,
}

impl<T> Default for Chain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Chain<T> {
    pub const fn new() -> Self {
        Self {
            nodes: None,
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.as_ref().map_or(0, SlotMap::len)
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn node(&self, k: DefaultKey) -> Option<&Node<T>> {
        self.nodes.as_ref()?.get(k)
    }

    /// Append `value` after the current tail.
    pub fn push_back(&mut self, value: T) -> NodeHandle {
        let prev = self.tail;
        let nodes = self.nodes.get_or_insert_with(SlotMap::with_key);
        let k = nodes.insert(Node {
            value,
            prev,
            next: None,
        });
        match prev.and_then(|p| nodes.get_mut(p)) {
            Some(tail) => tail.next = Some(k),
            None => self.head = Some(k),
        }
        self.tail = Some(k);
        NodeHandle::new(k)
    }

    pub fn front(&self) -> Option<&T> {
        self.head.and_then(|k| self.node(k)).map(|n| &n.value)
    }

    pub fn back(&self) -> Option<&T> {
        self.tail.and_then(|k| self.node(k)).map(|n| &n.value)
    }

    /// Positional access; walks the links from the head.
    pub fn get(&self, index: usize) -> Result<&T, ChainError> {
        self.iter().nth(index).ok_or(ChainError::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    pub fn get_by_handle(&self, h: NodeHandle) -> Option<&T> {
        self.node(h.raw_handle()).map(|n| &n.value)
    }

    pub fn first_handle(&self) -> Option<NodeHandle> {
        self.head.map(NodeHandle::new)
    }

    /// Successor of `h`, or `None` at the tail or when `h` is stale.
    pub fn next_handle(&self, h: NodeHandle) -> Option<NodeHandle> {
        self.node(h.raw_handle())
            .and_then(|n| n.next)
            .map(NodeHandle::new)
    }

    /// Unlink the node behind `h` and hand back its value.
    pub fn remove(&mut self, h: NodeHandle) -> Result<T, ChainError> {
        self.unlink(h.raw_handle()).ok_or(ChainError::StaleHandle)
    }

    /// Remove every element matching `pred` and return them in chain order.
    ///
    /// `pred` sees every element before the first one is unlinked, so a
    /// panicking predicate leaves the chain untouched.
    pub fn remove_matching<F>(&mut self, mut pred: F) -> Vec<T>
    where
        F: FnMut(&T) -> bool,
    {
        let mut doomed = Vec::new();
        let mut it = self.iter();
        while let Some((k, value)) = it.next_node() {
            if pred(value) {
                doomed.push(k);
            }
        }
        doomed.into_iter().filter_map(|k| self.unlink(k)).collect()
    }

    pub fn pop_front(&mut self) -> Option<T> {
        let k = self.head?;
        self.unlink(k)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            nodes: self.nodes.as_ref(),
            next: self.head,
            remaining: self.len(),
        }
    }

    /// Like `iter`, additionally yielding each element's handle.
    pub fn iter_with_handles(&self) -> IterWithHandles<'_, T> {
        IterWithHandles { inner: self.iter() }
    }

    fn unlink(&mut self, k: DefaultKey) -> Option<T> {
        let nodes = self.nodes.as_mut()?;
        let node = nodes.remove(k)?;
        match node.prev.and_then(|p| nodes.get_mut(p)) {
            Some(prev) => prev.next = node.next,
            None => self.head = node.next,
        }
        match node.next.and_then(|n| nodes.get_mut(n)) {
            Some(next) => next.prev = node.prev,
            None => self.tail = node.prev,
        }
        Some(node.value)
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for Chain<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Iterator over the elements of a `Chain`, head to tail.
pub struct Iter<'a, T> {
    nodes: Option<&'a SlotMap<DefaultKey, Node<T>>>,
    next: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    fn next_node(&mut self) -> Option<(DefaultKey, &'a T)> {
        let k = self.next?;
        let node = self.nodes?.get(k)?;
        self.next = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((k, &node.value))
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next_node().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

pub struct IterWithHandles<'a, T> {
    inner: Iter<'a, T>,
}

impl<'a, T> Iterator for IterWithHandles<'a, T> {
    type Item = (NodeHandle, &'a T);
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next_node()
            .map(|(k, v)| (NodeHandle::new(k), v))
    }
}

/// Owning iterator; drains the chain from the head.
pub struct IntoIter<T> {
    chain: Chain<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;
    fn next(&mut self) -> Option<T> {
        self.chain.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.chain.len(), Some(self.chain.len()))
    }
}

impl<T> IntoIterator for Chain<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> IntoIter<T> {
        IntoIter { chain: self }
    }
}

impl<'a, T> IntoIterator for &'a Chain<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;
    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
