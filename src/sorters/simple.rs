use super::Sorter;

/// The naive double scan: for every `(i, j)` over the whole range, swap
/// when `items[i] < items[j]`. After row `i` the prefix `[0, i]` is sorted
/// ascending, so the full scan ends sorted despite the redundant checks.
pub fn simple_sort_in_place<T: Ord>(items: &mut [T]) {
    let length = items.len();
    for i in 0..length {
        for j in 0..length {
            if items[i] < items[j] {
                items.swap(i, j);
            }
        }
    }
}

pub fn simple_sort<T: Ord + Clone>(items: &[T]) -> Vec<T> {
    let mut sorted = items.to_vec();
    simple_sort_in_place(&mut sorted);
    sorted
}

pub struct SimpleSorter;

impl Sorter for SimpleSorter {
    fn name(&self) -> &str {
        "simple"
    }

    fn description(&self) -> &str {
        "full double scan swapping any out-of-order pair, O(n²), unstable"
    }

    fn sort(&self, items: &[i64]) -> Vec<i64> {
        simple_sort(items)
    }
}
