// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

mod chain;

use crate::{
    config::{CollectionType, DuplicatePolicy},
    Collection, Config, Error,
};
use chain::Chain;
use rustc_hash::FxBuildHasher;
use std::hash::{BuildHasher, Hash};

/// Chain length statistics of a [`HashTableCollection`]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChainStats {
    /// Length of the shortest non-empty chain (0 if the table is empty)
    pub min: usize,

    /// Length of the longest chain
    pub max: usize,

    /// Entries per bucket (`size / bucket_count`)
    pub avg: f64,
}

/// Collection that spreads its entries over a growable array of hash buckets
///
/// Each bucket holds a singly linked chain of entries. Once the load factor
/// (`size / bucket_count`) reaches the configured threshold, the next insert first
/// doubles the bucket count and relinks every entry into its new bucket.
///
/// Keys are stored in no particular order, so [`Collection::find_range`] scans the whole table
/// and [`Collection::sort`] has to sort.
///
/// # Examples
///
/// ```
/// use kv_collections::{Collection, HashTableCollection};
///
/// let mut table = HashTableCollection::with_capacity(16);
///
/// for key in 0..13 {
///     table.add(key, key.to_string())?;
/// }
///
/// // The 13th insert pushed the load factor over 0.75
/// assert_eq!(32, table.bucket_count());
/// assert_eq!(Some(&"7".to_string()), table.find(&7));
/// assert_eq!(vec![3, 4, 5], {
///     let mut keys = table.find_range(&3, &5);
///     keys.sort_unstable();
///     keys
/// });
/// #
/// # Ok::<(), kv_collections::Error>(())
/// ```
#[derive(Clone)]
pub struct HashTableCollection<K, V, S = FxBuildHasher> {
    buckets: Vec<Chain<K, V>>,

    /// Number of entries over all chains
    len: usize,

    load_factor_threshold: f64,
    duplicate_policy: DuplicatePolicy,
    hash_builder: S,
}

impl<K, V, S> std::fmt::Debug for HashTableCollection<K, V, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashTableCollection")
            .field("len", &self.len)
            .field("bucket_count", &self.buckets.len())
            .field("load_factor_threshold", &self.load_factor_threshold)
            .field("duplicate_policy", &self.duplicate_policy)
            .finish_non_exhaustive()
    }
}

impl<K: Ord + Hash + Clone, V> Default for HashTableCollection<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Hash + Clone, V> HashTableCollection<K, V> {
    /// Creates an empty hash table with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Config::new(CollectionType::HashTable).open_hash_table()
    }

    /// Creates an empty hash table with `bucket_count` initial buckets.
    ///
    /// # Panics
    ///
    /// Panics if `bucket_count` is 0.
    #[must_use]
    pub fn with_capacity(bucket_count: usize) -> Self {
        Config::new(CollectionType::HashTable)
            .initial_capacity(bucket_count)
            .open_hash_table()
    }
}

fn bucket_index<K: Hash, S: BuildHasher>(hash_builder: &S, key: &K, bucket_count: usize) -> usize {
    // NOTE: The remainder is < bucket_count, so it fits into usize
    #[allow(clippy::cast_possible_truncation)]
    let idx = (hash_builder.hash_one(key) % bucket_count as u64) as usize;
    idx
}

impl<K: Ord + Hash + Clone, V, S: BuildHasher> HashTableCollection<K, V, S> {
    /// Creates an empty hash table that hashes keys using `hash_builder`.
    #[must_use]
    pub fn with_hasher(hash_builder: S) -> Self {
        Config::new(CollectionType::HashTable).open_hash_table_with_hasher(hash_builder)
    }

    pub(crate) fn from_config(config: &Config, hash_builder: S) -> Self {
        log::trace!(
            "Creating hash table collection, buckets={}, load_factor_threshold={}, duplicates={:?}",
            config.initial_capacity,
            config.load_factor_threshold,
            config.duplicate_policy,
        );

        let mut buckets = Vec::with_capacity(config.initial_capacity);
        buckets.resize_with(config.initial_capacity, Chain::default);

        Self {
            buckets,
            len: 0,
            load_factor_threshold: config.load_factor_threshold,
            duplicate_policy: config.duplicate_policy,
            hash_builder,
        }
    }

    /// Returns the current number of buckets.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current load factor (`size / bucket_count`).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.buckets.len() as f64
    }

    /// Returns the duplicate key policy of this table.
    #[must_use]
    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }

    /// Returns the length of the shortest non-empty chain, or 0 if the table is empty.
    #[must_use]
    pub fn min_chain_length(&self) -> usize {
        self.buckets
            .iter()
            .filter(|chain| !chain.is_empty())
            .map(Chain::len)
            .min()
            .unwrap_or(0)
    }

    /// Returns the length of the longest chain.
    #[must_use]
    pub fn max_chain_length(&self) -> usize {
        self.buckets.iter().map(Chain::len).max().unwrap_or(0)
    }

    /// Returns the average number of entries per bucket.
    ///
    /// This is the ratio `size / bucket_count` (i.e. the load factor), counting
    /// empty buckets too, not the average length of the non-empty chains.
    #[must_use]
    pub fn avg_chain_length(&self) -> f64 {
        self.load_factor()
    }

    /// Returns the chain length statistics in one go.
    #[must_use]
    pub fn chain_stats(&self) -> ChainStats {
        ChainStats {
            min: self.min_chain_length(),
            max: self.max_chain_length(),
            avg: self.avg_chain_length(),
        }
    }

    /// Returns an iterator over all entries, in bucket-then-chain order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.buckets.iter().flat_map(Chain::iter)
    }

    fn bucket(&self, key: &K) -> &Chain<K, V> {
        let idx = bucket_index(&self.hash_builder, key, self.buckets.len());
        self.buckets.get(idx).expect("bucket should exist")
    }

    fn bucket_mut(&mut self, key: &K) -> &mut Chain<K, V> {
        let idx = bucket_index(&self.hash_builder, key, self.buckets.len());
        self.buckets.get_mut(idx).expect("bucket should exist")
    }

    fn needs_growth(&self) -> bool {
        self.load_factor() >= self.load_factor_threshold
    }

    /// Doubles the bucket count and relinks every node into the bucket
    /// its hash maps to under the new bucket count.
    ///
    /// The new bucket array is fully allocated before any node is moved,
    /// so on allocation failure the table is left untouched.
    fn grow(&mut self) -> crate::Result<()> {
        let old_count = self.buckets.len();
        let new_count = old_count.saturating_mul(2);

        let mut buckets = Vec::new();
        buckets.try_reserve_exact(new_count)?;
        buckets.resize_with(new_count, Chain::default);

        for mut chain in std::mem::take(&mut self.buckets) {
            // NOTE: Moving the oldest node first keeps newer duplicates in front of older ones
            chain.reverse();

            while let Some(node) = chain.pop_front_node() {
                let idx = bucket_index(&self.hash_builder, &node.key, new_count);

                buckets
                    .get_mut(idx)
                    .expect("bucket should exist")
                    .push_front_node(node);
            }
        }

        self.buckets = buckets;

        log::debug!(
            "Grew hash table from {old_count} to {new_count} buckets ({} entries)",
            self.len,
        );

        Ok(())
    }
}

impl<K: Ord + Hash + Clone, V, S: BuildHasher> Collection<K, V> for HashTableCollection<K, V, S> {
    fn add(&mut self, key: K, value: V) -> crate::Result<()> {
        match self.duplicate_policy {
            DuplicatePolicy::Shadow => {}
            DuplicatePolicy::Overwrite => {
                if let Some(slot) = self.bucket_mut(&key).find_mut(&key) {
                    log::trace!("Overwriting existing entry");
                    *slot = value;
                    return Ok(());
                }
            }
            DuplicatePolicy::Reject => {
                if self.bucket(&key).find(&key).is_some() {
                    log::trace!("Rejecting duplicate entry");
                    return Err(Error::DuplicateKey);
                }
            }
        }

        if self.needs_growth() {
            self.grow()?;
        }

        self.bucket_mut(&key).push_front(key, value);
        self.len += 1;

        Ok(())
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        let (_, value) = self.bucket_mut(key).remove(key)?;
        self.len -= 1;
        Some(value)
    }

    fn find(&self, key: &K) -> Option<&V> {
        self.bucket(key).find(key)
    }

    fn find_range(&self, k1: &K, k2: &K) -> Vec<K> {
        if k1 > k2 {
            return Vec::new();
        }

        // NOTE: Hash order says nothing about key order, so scan everything
        self.iter()
            .filter(|(key, _)| *key >= k1 && *key <= k2)
            .map(|(key, _)| key.clone())
            .collect()
    }

    fn keys(&self) -> Vec<K> {
        self.iter().map(|(key, _)| key.clone()).collect()
    }

    fn sort(&self) -> Vec<K> {
        let mut keys = self.keys();
        keys.sort_unstable();
        keys
    }

    fn size(&self) -> usize {
        self.len
    }
}
