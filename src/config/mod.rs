// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

mod duplicate;

pub use duplicate::DuplicatePolicy;

use crate::{AnyCollection, BinSearchCollection, HashTableCollection};
use rustc_hash::FxBuildHasher;
use std::hash::{BuildHasher, Hash};

/// Default number of buckets (or entry slots) a collection starts with
pub const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// Default load factor at which a hash table grows
pub const DEFAULT_LOAD_FACTOR_THRESHOLD: f64 = 0.75;

/// Collection type
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CollectionType {
    /// Sorted array with binary search, see [`BinSearchCollection`]
    BinSearch,

    /// Separate-chaining hash table, see [`HashTableCollection`]
    ///
    /// This is the default, as it offers _O(1)_ average point lookups
    /// at the cost of unordered key listings.
    #[default]
    HashTable,
}

impl TryFrom<&str> for CollectionType {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "bin-search" | "binsearch" | "sorted" => Ok(Self::BinSearch),
            "hash-table" | "hashtable" | "hash" => Ok(Self::HashTable),
            _ => Err(()),
        }
    }
}

/// Collection configuration builder
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Which implementation [`Config::open`] creates
    pub collection_type: CollectionType,

    /// Number of buckets a hash table starts with, or the
    /// number of entries a sorted array preallocates
    pub initial_capacity: usize,

    /// Load factor (`size / bucket_count`) at which a hash table
    /// doubles its bucket count before the next insert
    pub load_factor_threshold: f64,

    /// What happens when an existing key is added again
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            collection_type: CollectionType::default(),
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            load_factor_threshold: DEFAULT_LOAD_FACTOR_THRESHOLD,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl Config {
    /// Initializes a new config for the given collection type
    #[must_use]
    pub fn new(collection_type: CollectionType) -> Self {
        Self {
            collection_type,
            ..Default::default()
        }
    }

    /// Sets the collection type.
    #[must_use]
    pub fn collection_type(mut self, collection_type: CollectionType) -> Self {
        self.collection_type = collection_type;
        self
    }

    /// Sets the initial capacity.
    ///
    /// Defaults to 16.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    #[must_use]
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "initial capacity may not be 0");
        self.initial_capacity = capacity;
        self
    }

    /// Sets the load factor threshold of hash tables.
    ///
    /// A lower threshold keeps chains shorter at the cost of more buckets.
    ///
    /// Defaults to 0.75.
    ///
    /// # Panics
    ///
    /// Panics if `ratio` is not a finite, positive number.
    #[must_use]
    pub fn load_factor_threshold(mut self, ratio: f64) -> Self {
        assert!(
            ratio.is_finite() && ratio > 0.0,
            "load factor threshold must be finite and positive"
        );
        self.load_factor_threshold = ratio;
        self
    }

    /// Sets the duplicate key policy.
    ///
    /// Defaults to [`DuplicatePolicy::Shadow`].
    #[must_use]
    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Opens a collection of the configured type.
    #[must_use]
    pub fn open<K: Ord + Hash + Clone, V>(self) -> AnyCollection<K, V> {
        match self.collection_type {
            CollectionType::BinSearch => AnyCollection::BinSearch(self.open_bin_search()),
            CollectionType::HashTable => AnyCollection::HashTable(self.open_hash_table()),
        }
    }

    /// Opens a sorted array collection, ignoring the configured collection type.
    #[must_use]
    pub fn open_bin_search<K: Ord + Hash + Clone, V>(&self) -> BinSearchCollection<K, V> {
        BinSearchCollection::from_config(self)
    }

    /// Opens a hash table collection, ignoring the configured collection type.
    #[must_use]
    pub fn open_hash_table<K: Ord + Hash + Clone, V>(&self) -> HashTableCollection<K, V> {
        self.open_hash_table_with_hasher(FxBuildHasher)
    }

    /// Opens a hash table collection that hashes keys using `hasher`.
    #[must_use]
    pub fn open_hash_table_with_hasher<K: Ord + Hash + Clone, V, S: BuildHasher>(
        &self,
        hasher: S,
    ) -> HashTableCollection<K, V, S> {
        HashTableCollection::from_config(self, hasher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Collection;
    use test_log::test;

    #[test]
    fn config_defaults() {
        let config = Config::default();
        assert_eq!(CollectionType::HashTable, config.collection_type);
        assert_eq!(16, config.initial_capacity);
        assert!((config.load_factor_threshold - 0.75).abs() < f64::EPSILON);
        assert_eq!(DuplicatePolicy::Shadow, config.duplicate_policy);
    }

    #[test]
    fn config_open_type() {
        let coll = Config::new(CollectionType::BinSearch).open::<u32, u32>();
        assert!(matches!(coll, AnyCollection::BinSearch(_)));
        assert!(coll.is_empty());

        let coll = Config::new(CollectionType::HashTable).open::<u32, u32>();
        assert!(matches!(coll, AnyCollection::HashTable(_)));
    }

    #[test]
    fn config_default_opens_hash_table() {
        let coll = Config::default().open::<u32, u32>();
        assert!(matches!(coll, AnyCollection::HashTable(_)));
    }

    #[test]
    fn config_hash_table_capacity() {
        let table = Config::default()
            .initial_capacity(4)
            .open_hash_table::<u32, u32>();
        assert_eq!(4, table.bucket_count());
    }

    #[test]
    #[should_panic(expected = "initial capacity may not be 0")]
    fn config_zero_capacity() {
        let _ = Config::default().initial_capacity(0);
    }

    #[test]
    #[should_panic(expected = "load factor threshold must be finite and positive")]
    fn config_bad_load_factor() {
        let _ = Config::default().load_factor_threshold(f64::NAN);
    }

    #[test]
    fn collection_type_parse() {
        assert_eq!(Ok(CollectionType::BinSearch), CollectionType::try_from("bin-search"));
        assert_eq!(Ok(CollectionType::HashTable), CollectionType::try_from("hash-table"));
        assert_eq!(Err(()), CollectionType::try_from("btree"));
    }
}
