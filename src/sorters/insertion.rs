use super::Sorter;

/// Insertion sort. Larger predecessors shift right one slot until the
/// held value's position opens up. Linear on nearly sorted input.
pub fn insertion_sort_in_place<T: Ord + Clone>(items: &mut [T]) {
    for i in 1..items.len() {
        let held = items[i].clone();
        let mut slot = i;
        while slot > 0 && items[slot - 1] > held {
            items[slot] = items[slot - 1].clone();
            slot -= 1;
        }
        items[slot] = held;
    }
}

pub fn insertion_sort<T: Ord + Clone>(items: &[T]) -> Vec<T> {
    let mut sorted = items.to_vec();
    insertion_sort_in_place(&mut sorted);
    sorted
}

pub struct InsertionSorter;

impl Sorter for InsertionSorter {
    fn name(&self) -> &str {
        "insertion"
    }

    fn description(&self) -> &str {
        "shift-and-insert, O(n²) worst, O(n) on nearly sorted input"
    }

    fn sort(&self, items: &[i64]) -> Vec<i64> {
        insertion_sort(items)
    }
}
