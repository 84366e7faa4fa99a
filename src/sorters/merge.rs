//! Top-down merge sort. Always O(n log n), stable.

use super::Sorter;

pub fn merge_sort<T: Ord + Clone>(items: &[T]) -> Vec<T> {
    merge_sort_by_key(items, |item| item.clone())
}

/// Sort by a derived key. Elements with equal keys keep their input order.
pub fn merge_sort_by_key<T, K, F>(items: &[T], key: F) -> Vec<T>
where
    T: Clone,
    K: Ord,
    F: Fn(&T) -> K,
{
    split(items, &key)
}

fn split<T, K, F>(items: &[T], key: &F) -> Vec<T>
where
    T: Clone,
    K: Ord,
    F: Fn(&T) -> K,
{
    if items.len() <= 1 {
        return items.to_vec();
    }
    // len / 2 is always a valid split point, so neither half can be out of range
    let (left, right) = items.split_at(items.len() / 2);
    merge(split(left, key), split(right, key), key)
}

/// Merge two sorted runs. Ties take from `left`.
pub fn merge<T, K, F>(left: Vec<T>, right: Vec<T>, key: &F) -> Vec<T>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => key(l) <= key(r),
            _ => break,
        };
        let next = if take_left { left.next() } else { right.next() };
        merged.extend(next);
    }
    merged.extend(left);
    merged.extend(right);
    merged
}

pub struct MergeSorter;

impl Sorter for MergeSorter {
    fn name(&self) -> &str {
        "merge"
    }

    fn description(&self) -> &str {
        "midpoint split and stable merge, O(n log n)"
    }

    fn sort(&self, items: &[i64]) -> Vec<i64> {
        merge_sort(items)
    }
}
