// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{BinSearchCollection, Collection, HashTableCollection};
use enum_dispatch::enum_dispatch;
use rustc_hash::FxBuildHasher;
use std::hash::{BuildHasher, Hash};

/// May be a [`BinSearchCollection`] or a [`HashTableCollection`].
///
/// Usually created through [`Config::open`](crate::Config::open).
#[derive(Clone, Debug)]
#[enum_dispatch(Collection<K, V>)]
pub enum AnyCollection<K: Ord + Hash + Clone, V, S: BuildHasher = FxBuildHasher> {
    /// Sorted array, see [`BinSearchCollection`]
    BinSearch(BinSearchCollection<K, V>),

    /// Chained hash table, see [`HashTableCollection`]
    HashTable(HashTableCollection<K, V, S>),
}
