//! BucketTable: power-of-two array of chains with hash addressing and
//! whole-table rehashing.

use crate::chain::{Chain, NodeHandle};

/// Largest bucket count a table can be rounded up to.
pub const MAX_BUCKET_COUNT: usize = 1 << (usize::BITS - 1);

/// Stored element: key, value (`()` for sets) and the key's memoized hash.
#[derive(Debug)]
pub struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) hash: u64,
}

impl<K, V> Entry<K, V> {
    pub fn key(&self) -> &K {
        &self.key
    }
    pub fn value(&self) -> &V {
        &self.value
    }
    pub fn hash(&self) -> u64 {
        self.hash
    }
}

/// Smallest power of two `>= requested`, with a floor of 1.
pub fn round_bucket_count(requested: usize) -> usize {
    requested
        .max(1)
        .checked_next_power_of_two()
        .unwrap_or(MAX_BUCKET_COUNT)
}

pub struct BucketTable<K, V> {
    chains: Vec<Chain<Entry<K, V>>>,
    // Bumped every time the table is rebuilt; handles record it.
    generation: u64,
}

impl<K, V> Default for BucketTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> BucketTable<K, V> {
    /// Single-bucket table.
    pub fn new() -> Self {
        Self::with_bucket_count(1)
    }

    /// Table with `requested` buckets rounded up to a power of two.
    ///
    /// # Panics
    /// If the rounded bucket array does not fit in memory (capacity overflow).
    pub fn with_bucket_count(requested: usize) -> Self {
        Self::build(round_bucket_count(requested), 0)
    }

    fn build(bucket_count: usize, generation: u64) -> Self {
        debug_assert!(bucket_count.is_power_of_two());
        let mut chains = Vec::with_capacity(bucket_count);
        chains.resize_with(bucket_count, Chain::new);
        Self { chains, generation }
    }

    pub fn bucket_count(&self) -> usize {
        self.chains.len()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn bucket_index(&self, hash: u64) -> usize {
        (hash % self.chains.len() as u64) as usize
    }

    pub fn chain(&self, index: usize) -> Option<&Chain<Entry<K, V>>> {
        self.chains.get(index)
    }

    pub(crate) fn chain_mut(&mut self, index: usize) -> Option<&mut Chain<Entry<K, V>>> {
        self.chains.get_mut(index)
    }

    /// Home chain of `hash`.
    pub fn chain_for(&self, hash: u64) -> &Chain<Entry<K, V>> {
        &self.chains[self.bucket_index(hash)]
    }

    pub(crate) fn chain_for_mut(&mut self, hash: u64) -> &mut Chain<Entry<K, V>> {
        let index = self.bucket_index(hash);
        &mut self.chains[index]
    }

    /// Append `entry` to its home chain; returns `(bucket, node)`.
    pub(crate) fn push(&mut self, entry: Entry<K, V>) -> (usize, NodeHandle) {
        let index = self.bucket_index(entry.hash);
        (index, self.chains[index].push_back(entry))
    }

    /// Total entries across all chains. O(bucket_count).
    pub fn entry_count(&self) -> usize {
        self.chains.iter().map(Chain::len).sum()
    }

    /// Rebuild with `requested` buckets (rounded up to a power of two) and
    /// move every entry into chain `hash % new_count`. Hashes are never
    /// recomputed. Invalidates all handles into the old table.
    pub fn rehash(&mut self, requested: usize) {
        let bucket_count = round_bucket_count(requested);
        let generation = self.generation.wrapping_add(1);
        let old = std::mem::replace(self, Self::build(bucket_count, generation));
        let old_count = old.chains.len();

        let mut moved = 0usize;
        for chain in old.chains {
            for entry in chain {
                let _ = self.push(entry);
                moved += 1;
            }
        }
        log::trace!(
            "rehash {old_count} -> {bucket_count} buckets, {moved} entries moved (generation {generation})"
        );
    }

    /// Drop every entry and shrink back to a single bucket.
    pub fn clear(&mut self) {
        let generation = self.generation.wrapping_add(1);
        *self = Self::build(1, generation);
    }

    /// Index of the first non-empty chain, or `bucket_count()` if all are empty.
    pub fn first_non_empty(&self) -> usize {
        self.non_empty_from(0)
    }

    /// Index of the first non-empty chain strictly after `index`, or
    /// `bucket_count()` if every later chain is empty.
    pub fn next_non_empty(&self, index: usize) -> usize {
        self.non_empty_from(index.saturating_add(1))
    }

    fn non_empty_from(&self, start: usize) -> usize {
        let count = self.chains.len();
        self.chains
            .get(start..)
            .and_then(|rest| rest.iter().position(|c| !c.is_empty()))
            .map_or(count, |offset| start + offset)
    }
}

impl<K: core::fmt::Debug, V: core::fmt::Debug> core::fmt::Debug for BucketTable<K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BucketTable")
            .field("generation", &self.generation)
            .field("chains", &self.chains)
            .finish()
    }
}
