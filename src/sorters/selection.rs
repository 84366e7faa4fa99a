use super::Sorter;

/// Selection sort: swap the minimum of each unsorted suffix into place.
pub fn selection_sort_in_place<T: Ord>(items: &mut [T]) {
    let length = items.len();
    for position in 0..length {
        let mut min = position;
        for index in position + 1..length {
            if items[index] < items[min] {
                min = index;
            }
        }
        if min != position {
            items.swap(position, min);
        }
    }
}

pub fn selection_sort<T: Ord + Clone>(items: &[T]) -> Vec<T> {
    let mut sorted = items.to_vec();
    selection_sort_in_place(&mut sorted);
    sorted
}

pub struct SelectionSorter;

impl Sorter for SelectionSorter {
    fn name(&self) -> &str {
        "selection"
    }

    fn description(&self) -> &str {
        "minimum of the unsorted suffix, O(n²) compares, O(n) swaps"
    }

    fn sort(&self, items: &[i64]) -> Vec<i64> {
        selection_sort(items)
    }
}
