//! Quicksort with a first-element pivot and a three-way partition.
//!
//! Elements equal to the pivot stay with it and are never recursed on.
//! A first-element pivot degrades to O(n) depth on sorted or reversed
//! input, so recursion stops at a depth limit and the rest of the
//! partition is finished on an explicit stack.

use super::Sorter;
use crate::consts::MAX_QUICK_DEPTH_LIMIT;

/// Sort `items` into a new vector, recursing at most
/// [`DEFAULT_QUICK_DEPTH_LIMIT`](crate::consts::DEFAULT_QUICK_DEPTH_LIMIT) deep.
pub fn quick_sort<T: Ord + Clone>(items: &[T]) -> Vec<T> {
    quick_sort_with_limit(items, crate::consts::DEFAULT_QUICK_DEPTH_LIMIT)
}

pub fn quick_sort_with_limit<T: Ord + Clone>(items: &[T], depth_limit: usize) -> Vec<T> {
    recurse(items.to_vec(), 0, depth_limit)
}

/// Split into `(smaller, equal, bigger)` around the first element.
fn partition<T: Ord>(items: Vec<T>) -> (Vec<T>, Vec<T>, Vec<T>) {
    let mut iter = items.into_iter();
    let mut smaller = Vec::new();
    let mut bigger = Vec::new();
    let mut equal = Vec::new();
    if let Some(pivot) = iter.next() {
        for item in iter {
            if item < pivot {
                smaller.push(item);
            } else if item > pivot {
                bigger.push(item);
            } else {
                equal.push(item);
            }
        }
        equal.insert(0, pivot);
    }
    (smaller, equal, bigger)
}

fn recurse<T: Ord>(items: Vec<T>, depth: usize, depth_limit: usize) -> Vec<T> {
    if items.len() < 2 {
        return items;
    }
    if depth >= depth_limit {
        tracing::trace!(depth, len = items.len(), "quicksort falling back to explicit stack");
        return iterative(items);
    }

    let (smaller, equal, bigger) = partition(items);
    let mut sorted = recurse(smaller, depth + 1, depth_limit);
    sorted.extend(equal);
    sorted.extend(recurse(bigger, depth + 1, depth_limit));
    sorted
}

enum Work<T> {
    Sort(Vec<T>),
    Emit(Vec<T>),
}

/// Same partition policy as [`recurse`], with pending work kept on the heap.
fn iterative<T: Ord>(items: Vec<T>) -> Vec<T> {
    let mut sorted = Vec::with_capacity(items.len());
    let mut stack = vec![Work::Sort(items)];

    while let Some(work) = stack.pop() {
        match work {
            Work::Emit(run) => sorted.extend(run),
            Work::Sort(run) if run.len() < 2 => sorted.extend(run),
            Work::Sort(run) => {
                let (smaller, equal, bigger) = partition(run);
                // LIFO: pushed in reverse of output order
                stack.push(Work::Sort(bigger));
                stack.push(Work::Emit(equal));
                stack.push(Work::Sort(smaller));
            }
        }
    }
    sorted
}

pub struct QuickSorter {
    depth_limit: usize,
}

impl QuickSorter {
    /// `depth_limit` is clamped to [`MAX_QUICK_DEPTH_LIMIT`].
    pub fn new(depth_limit: usize) -> Self {
        Self {
            depth_limit: depth_limit.min(MAX_QUICK_DEPTH_LIMIT),
        }
    }
}

impl Sorter for QuickSorter {
    fn name(&self) -> &str {
        "quick"
    }

    fn description(&self) -> &str {
        "first-element pivot, three-way partition, O(n log n) average"
    }

    fn sort(&self, items: &[i64]) -> Vec<i64> {
        quick_sort_with_limit(items, self.depth_limit)
    }
}
