// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

/// Key-value pair as stored in a collection
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry<K, V> {
    /// Lookup key
    pub key: K,

    /// Opaque payload
    pub value: V,
}

impl<K, V> Entry<K, V> {
    /// Creates a new entry.
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}
