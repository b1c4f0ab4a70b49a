// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

// NOTE: PERF: For some reason, hand-rolling a binary search is
// faster than using slice::partition_point

/// Returns the index of the partition point according to the given predicate
/// (the index of the first element of the second partition).
///
/// Faster alternative to [`slice::partition_point`] (according to benchmarks).
pub fn partition_point<T, F>(slice: &[T], pred: F) -> usize
where
    F: Fn(&T) -> bool,
{
    let mut left = 0;
    let mut right = slice.len();

    if right == 0 {
        return 0;
    }

    while left < right {
        let mid = (left + right) / 2;

        // TODO: PERF: could use get_unchecked for perf... but unsafe
        let item = slice.get(mid).expect("should exist");

        if pred(item) {
            left = mid + 1;
        } else {
            right = mid;
        }
    }

    left
}

/// Searches a slice that is sorted by `key_fn` for `key`.
///
/// Returns `Ok(idx)` with the index of the *last* element equal to `key`
/// (the most recently inserted one, if duplicates were inserted at the upper bound),
/// or `Err(idx)` with the index where `key` could be inserted while keeping the slice sorted.
pub fn search_by_key<T, K, F>(slice: &[T], key: &K, key_fn: F) -> Result<usize, usize>
where
    K: Ord,
    F: Fn(&T) -> &K,
{
    let upper = partition_point(slice, |item| key_fn(item) <= key);

    match upper.checked_sub(1).and_then(|idx| slice.get(idx)) {
        Some(item) if key_fn(item) == key => Ok(upper - 1),
        _ => Err(upper),
    }
}

#[cfg(test)]
mod tests {
    use super::{partition_point, search_by_key};
    use test_log::test;

    #[test]
    fn binary_search_first() {
        let items = [1, 2, 3, 4, 5];
        let idx = partition_point(&items, |&x| x < 1);
        assert_eq!(0, idx);

        let pp_idx = items.partition_point(|&x| x < 1);
        assert_eq!(pp_idx, idx);
    }

    #[test]
    fn binary_search_last() {
        let items = [1, 2, 3, 4, 5];
        let idx = partition_point(&items, |&x| x < 5);
        assert_eq!(4, idx);

        let pp_idx = items.partition_point(|&x| x < 5);
        assert_eq!(pp_idx, idx);
    }

    #[test]
    fn binary_search_none() {
        let items = [1, 2, 3, 4, 5];
        let idx = partition_point(&items, |&x| x < 10);
        assert_eq!(5, idx);

        let pp_idx = items.partition_point(|&x| x < 10);
        assert_eq!(pp_idx, idx);
    }

    #[test]
    fn binary_search_empty() {
        let items: [i32; 0] = [];
        let idx = partition_point(&items, |&x| x < 10);
        assert_eq!(0, idx);
    }

    #[test]
    fn search_hit() {
        let items = [(1, 'a'), (3, 'b'), (5, 'c')];
        assert_eq!(Ok(1), search_by_key(&items, &3, |(k, _)| k));
        assert_eq!(Ok(0), search_by_key(&items, &1, |(k, _)| k));
        assert_eq!(Ok(2), search_by_key(&items, &5, |(k, _)| k));
    }

    #[test]
    fn search_miss_insertion_point() {
        let items = [(1, 'a'), (3, 'b'), (5, 'c')];
        assert_eq!(Err(0), search_by_key(&items, &0, |(k, _)| k));
        assert_eq!(Err(1), search_by_key(&items, &2, |(k, _)| k));
        assert_eq!(Err(2), search_by_key(&items, &4, |(k, _)| k));
        assert_eq!(Err(3), search_by_key(&items, &6, |(k, _)| k));
    }

    #[test]
    fn search_duplicates_returns_last() {
        let items = [(1, 'a'), (2, 'b'), (2, 'c'), (2, 'd'), (3, 'e')];
        assert_eq!(Ok(3), search_by_key(&items, &2, |(k, _)| k));
    }

    #[test]
    fn search_empty() {
        let items: [(u8, u8); 0] = [];
        assert_eq!(Err(0), search_by_key(&items, &1, |(k, _)| k));
    }
}
