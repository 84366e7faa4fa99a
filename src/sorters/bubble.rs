use super::Sorter;

/// Bubble sort with a shrinking scan window. Stops after the first pass
/// that makes no swap.
pub fn bubble_sort_in_place<T: Ord>(items: &mut [T]) {
    let length = items.len();
    for pass in 0..length {
        let mut swapped = false;
        for index in 0..length - pass - 1 {
            if items[index] > items[index + 1] {
                items.swap(index, index + 1);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
    }
}

pub fn bubble_sort<T: Ord + Clone>(items: &[T]) -> Vec<T> {
    let mut sorted = items.to_vec();
    bubble_sort_in_place(&mut sorted);
    sorted
}

pub struct BubbleSorter;

impl Sorter for BubbleSorter {
    fn name(&self) -> &str {
        "bubble"
    }

    fn description(&self) -> &str {
        "adjacent swaps, pass-bounded with early exit, O(n²)"
    }

    fn sort(&self, items: &[i64]) -> Vec<i64> {
        bubble_sort(items)
    }
}
