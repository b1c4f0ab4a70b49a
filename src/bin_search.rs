// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{
    binary_search::{partition_point, search_by_key},
    config::{CollectionType, DuplicatePolicy},
    entry::Entry,
    Collection, Config, Error,
};
use std::hash::Hash;

/// Collection that keeps its entries sorted by key in a contiguous array
///
/// Lookups, insertion points, removals and range scans are all driven by binary search,
/// so keys come out in ascending order without any extra sorting work.
///
/// Insertion and removal shift the tail of the array, making them _O(n)_,
/// while lookups are _O(log n)_.
///
/// # Examples
///
/// ```
/// use kv_collections::{BinSearchCollection, Collection};
///
/// let mut coll = BinSearchCollection::new();
///
/// for key in [5, 1, 3, 2, 4] {
///     coll.add(key, key * 10)?;
/// }
///
/// assert_eq!(vec![1, 2, 3, 4, 5], coll.keys());
/// assert_eq!(vec![2, 3, 4], coll.find_range(&2, &4));
/// assert_eq!(Some(&30), coll.find(&3));
/// #
/// # Ok::<(), kv_collections::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct BinSearchCollection<K, V> {
    /// Entries, strictly ascending by key (non-descending if duplicates are shadowed)
    entries: Vec<Entry<K, V>>,

    duplicate_policy: DuplicatePolicy,
}

impl<K, V> Default for BinSearchCollection<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> BinSearchCollection<K, V> {
    /// Creates an empty collection with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&Config::new(CollectionType::BinSearch))
    }

    pub(crate) fn from_config(config: &Config) -> Self {
        log::trace!(
            "Creating sorted array collection, capacity={}, duplicates={:?}",
            config.initial_capacity,
            config.duplicate_policy,
        );

        Self {
            entries: Vec::with_capacity(config.initial_capacity),
            duplicate_policy: config.duplicate_policy,
        }
    }

    /// Returns the duplicate key policy of this collection.
    #[must_use]
    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicate_policy
    }

    /// Returns an iterator over all entries in ascending key order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&K, &V)> + '_ {
        self.entries.iter().map(|entry| (&entry.key, &entry.value))
    }
}

impl<K: Ord, V> BinSearchCollection<K, V> {
    fn search(&self, key: &K) -> Result<usize, usize> {
        search_by_key(&self.entries, key, |entry| &entry.key)
    }

    fn insert_at(&mut self, idx: usize, key: K, value: V) -> crate::Result<()> {
        self.entries.try_reserve(1)?;
        self.entries.insert(idx, Entry::new(key, value));
        Ok(())
    }
}

impl<K: Ord + Hash + Clone, V> Collection<K, V> for BinSearchCollection<K, V> {
    fn add(&mut self, key: K, value: V) -> crate::Result<()> {
        match self.search(&key) {
            Ok(idx) => match self.duplicate_policy {
                // NOTE: idx is the newest equal entry, so idx + 1 is the upper bound of the run
                DuplicatePolicy::Shadow => self.insert_at(idx + 1, key, value),
                DuplicatePolicy::Overwrite => {
                    log::trace!("Overwriting existing entry at index {idx}");
                    let entry = self.entries.get_mut(idx).expect("should exist");
                    entry.value = value;
                    Ok(())
                }
                DuplicatePolicy::Reject => {
                    log::trace!("Rejecting duplicate entry at index {idx}");
                    Err(Error::DuplicateKey)
                }
            },
            Err(idx) => self.insert_at(idx, key, value),
        }
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        let idx = self.search(key).ok()?;
        Some(self.entries.remove(idx).value)
    }

    fn find(&self, key: &K) -> Option<&V> {
        let idx = self.search(key).ok()?;
        self.entries.get(idx).map(|entry| &entry.value)
    }

    fn find_range(&self, k1: &K, k2: &K) -> Vec<K> {
        if k1 > k2 {
            return Vec::new();
        }

        let start = partition_point(&self.entries, |entry| entry.key < *k1);

        self.entries
            .get(start..)
            .unwrap_or_default()
            .iter()
            .take_while(|entry| entry.key <= *k2)
            .map(|entry| entry.key.clone())
            .collect()
    }

    fn keys(&self) -> Vec<K> {
        self.entries.iter().map(|entry| entry.key.clone()).collect()
    }

    fn sort(&self) -> Vec<K> {
        // Already sorted
        self.keys()
    }

    fn size(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use test_log::test;

    fn assert_ordered<V>(coll: &BinSearchCollection<u32, V>) {
        let keys = coll.keys();
        assert!(keys.is_sorted(), "not ordered: {keys:?}");
    }

    #[test]
    fn bin_search_add_keeps_order() -> crate::Result<()> {
        let mut coll = BinSearchCollection::new();

        for key in [5, 1, 3, 2, 4] {
            coll.add(key, format!("v{key}"))?;
            assert_ordered(&coll);
        }

        assert_eq!(vec![1, 2, 3, 4, 5], coll.keys());
        assert_eq!(vec![1, 2, 3, 4, 5], coll.sort());
        assert_eq!(5, coll.size());

        Ok(())
    }

    #[test]
    fn bin_search_find() -> crate::Result<()> {
        let mut coll = BinSearchCollection::new();
        assert_eq!(None, coll.find(&1));

        coll.add(10, "a")?;
        coll.add(20, "b")?;
        coll.add(30, "c")?;

        assert_eq!(Some(&"a"), coll.find(&10));
        assert_eq!(Some(&"b"), coll.find(&20));
        assert_eq!(Some(&"c"), coll.find(&30));
        assert_eq!(None, coll.find(&0));
        assert_eq!(None, coll.find(&25));
        assert_eq!(None, coll.find(&31));

        Ok(())
    }

    #[test]
    fn bin_search_remove() -> crate::Result<()> {
        let mut coll = BinSearchCollection::new();

        for key in 0..10 {
            coll.add(key, key)?;
        }

        assert_eq!(Some(4), coll.remove(&4));
        assert_eq!(None, coll.remove(&4));
        assert_eq!(None, coll.remove(&100));
        assert_eq!(9, coll.size());
        assert_eq!(None, coll.find(&4));
        assert_ordered(&coll);

        assert_eq!(Some(0), coll.remove(&0));
        assert_eq!(Some(9), coll.remove(&9));
        assert_eq!(vec![1, 2, 3, 5, 6, 7, 8], coll.keys());

        Ok(())
    }

    #[test]
    fn bin_search_remove_empty() {
        let mut coll = BinSearchCollection::<u32, u32>::new();
        assert_eq!(None, coll.remove(&1));
        assert_eq!(0, coll.size());
    }

    #[test]
    fn bin_search_range() -> crate::Result<()> {
        let mut coll = BinSearchCollection::new();

        for key in [10, 20, 30, 40, 50] {
            coll.add(key, ())?;
        }

        assert_eq!(vec![20, 30, 40], coll.find_range(&20, &40));
        assert_eq!(vec![20, 30, 40], coll.find_range(&15, &45));
        assert_eq!(vec![10, 20, 30, 40, 50], coll.find_range(&0, &100));
        assert_eq!(vec![50], coll.find_range(&50, &50));
        assert!(coll.find_range(&51, &100).is_empty());
        assert!(coll.find_range(&0, &9).is_empty());
        assert!(coll.find_range(&21, &29).is_empty());
        assert!(coll.find_range(&40, &20).is_empty());

        Ok(())
    }

    #[test]
    fn bin_search_range_empty_collection() {
        let coll = BinSearchCollection::<u32, ()>::new();
        assert!(coll.find_range(&0, &100).is_empty());
    }

    #[test]
    fn bin_search_duplicates_shadow() -> crate::Result<()> {
        let mut coll = BinSearchCollection::new();

        coll.add(1, "a")?;
        coll.add(2, "old")?;
        coll.add(3, "c")?;
        coll.add(2, "new")?;

        assert_eq!(4, coll.size());
        assert_eq!(vec![1, 2, 2, 3], coll.keys());
        assert_eq!(vec![2, 2], coll.find_range(&2, &2));
        assert_eq!(Some(&"new"), coll.find(&2));

        assert_eq!(Some("new"), coll.remove(&2));
        assert_eq!(Some(&"old"), coll.find(&2));

        assert_eq!(Some("old"), coll.remove(&2));
        assert_eq!(None, coll.find(&2));
        assert_eq!(2, coll.size());

        Ok(())
    }

    #[test]
    fn bin_search_duplicates_overwrite() -> crate::Result<()> {
        let mut coll = Config::default()
            .duplicate_policy(DuplicatePolicy::Overwrite)
            .open_bin_search();

        coll.add(1, "a")?;
        coll.add(1, "b")?;

        assert_eq!(1, coll.size());
        assert_eq!(Some(&"b"), coll.find(&1));

        Ok(())
    }

    #[test]
    fn bin_search_duplicates_reject() -> crate::Result<()> {
        let mut coll = Config::default()
            .duplicate_policy(DuplicatePolicy::Reject)
            .open_bin_search();

        coll.add(1, "a")?;
        assert!(matches!(coll.add(1, "b"), Err(Error::DuplicateKey)));

        assert_eq!(1, coll.size());
        assert_eq!(Some(&"a"), coll.find(&1));

        Ok(())
    }

    #[test]
    fn bin_search_clone_is_independent() -> crate::Result<()> {
        let mut coll = BinSearchCollection::new();
        coll.add("a".to_string(), 1)?;
        coll.add("b".to_string(), 2)?;

        let mut copy = coll.clone();
        copy.add("c".to_string(), 3)?;
        copy.remove(&"a".to_string());

        assert_eq!(vec!["a", "b"], coll.keys());
        assert_eq!(vec!["b", "c"], copy.keys());

        Ok(())
    }

    #[test]
    fn bin_search_iter() -> crate::Result<()> {
        let mut coll = BinSearchCollection::new();
        coll.add(2, 'b')?;
        coll.add(1, 'a')?;

        let items = coll.iter().collect::<Vec<_>>();
        assert_eq!(vec![(&1, &'a'), (&2, &'b')], items);

        let last = coll.iter().next_back().unwrap();
        assert_eq!((&2, &'b'), last);

        Ok(())
    }
}
