// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use enum_dispatch::enum_dispatch;
#[allow(unused_imports)]
use crate::{AnyCollection, BinSearchCollection, HashTableCollection};
use std::hash::{BuildHasher, Hash};

/// Generic collection API
///
/// Implemented by [`BinSearchCollection`](crate::BinSearchCollection),
/// [`HashTableCollection`](crate::HashTableCollection) and the runtime-selected
/// [`AnyCollection`](crate::AnyCollection), so the storage strategy can be swapped
/// without touching call sites.
///
/// Absent keys are never an error: lookups and removals signal them with `None`.
#[allow(clippy::module_name_repetitions)]
#[enum_dispatch]
pub trait Collection<K: Ord + Hash + Clone, V> {
    /// Adds a key-value pair.
    ///
    /// How an already existing key is handled depends on the configured
    /// [`DuplicatePolicy`](crate::DuplicatePolicy).
    ///
    /// # Errors
    ///
    /// Will return `Err` if storage could not be allocated, or if the key
    /// exists and duplicates are rejected. The collection is unchanged in both cases.
    fn add(&mut self, key: K, value: V) -> crate::Result<()>;

    /// Removes the entry for the given key, returning its value.
    ///
    /// If the key is stored more than once, only the newest entry is removed.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Returns the value of the newest entry for the given key.
    fn find(&self, key: &K) -> Option<&V>;

    /// Returns every stored key `k` with `k1 <= k <= k2`.
    ///
    /// Whether the result is ordered depends on the implementation.
    /// If `k1 > k2`, the result is empty.
    fn find_range(&self, k1: &K, k2: &K) -> Vec<K>;

    /// Returns all stored keys.
    ///
    /// Whether the result is ordered depends on the implementation.
    fn keys(&self) -> Vec<K>;

    /// Returns all stored keys in ascending order.
    fn sort(&self) -> Vec<K>;

    /// Returns the number of stored entries.
    fn size(&self) -> usize;

    /// Returns `true` if the collection holds no entries.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Returns `true` if the key is stored.
    fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }
}
