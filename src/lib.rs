// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! In-memory key-value collections with interchangeable storage strategies.
//!
//! ##### About
//!
//! This crate exports two implementations of the same [`Collection`] contract:
//!
//! - [`BinSearchCollection`] keeps its entries sorted in a contiguous array.
//!   Lookups and range queries use binary search, and keys always come out in ascending order.
//! - [`HashTableCollection`] spreads its entries over hash buckets, each holding a
//!   singly linked chain. Point lookups are _O(1)_ on average; the bucket array doubles
//!   once the load factor reaches a threshold (0.75 by default).
//!
//! Because both implement [`Collection`], call sites do not need to change when swapping
//! one for the other. [`Config::open`] returns an [`AnyCollection`] whose strategy is picked at runtime.
//!
//! Adding a key that is already stored is governed by the [`DuplicatePolicy`]. The default policy
//! keeps both entries, with the newest one shadowing the older ones.
//!
//! ```
//! use kv_collections::{Collection, CollectionType, Config};
//!
//! for collection_type in [CollectionType::BinSearch, CollectionType::HashTable] {
//!     let mut coll = Config::new(collection_type).open();
//!
//!     for key in [5, 1, 3, 2, 4] {
//!         coll.add(key, "value")?;
//!     }
//!
//!     assert_eq!(vec![1, 2, 3, 4, 5], coll.sort());
//!     assert_eq!(Some(&"value"), coll.find(&3));
//! }
//! #
//! # Ok::<(), kv_collections::Error>(())
//! ```
//!
//! Collections are single-threaded, in-memory containers; nothing is persisted.

#![deny(clippy::all, missing_docs, clippy::cargo)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::indexing_slicing)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(clippy::expect_used)]
#![allow(clippy::missing_const_for_fn)]
#![warn(clippy::multiple_crate_versions)]
#![allow(clippy::option_if_let_else)]
#![warn(clippy::redundant_feature_names)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod any_collection;
mod bin_search;

#[doc(hidden)]
pub mod binary_search;

mod collection;

/// Configuration
pub mod config;

mod entry;
mod error;
mod hash_table;

pub use {
    any_collection::AnyCollection,
    bin_search::BinSearchCollection,
    collection::Collection,
    config::{CollectionType, Config, DuplicatePolicy},
    error::{Error, Result},
    hash_table::{ChainStats, HashTableCollection},
};
