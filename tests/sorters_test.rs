use proptest::prelude::*;

use sortkit::sorters::bubble::bubble_sort;
use sortkit::sorters::insertion::insertion_sort;
use sortkit::sorters::merge::{merge_sort, merge_sort_by_key};
use sortkit::sorters::quick::{quick_sort, quick_sort_with_limit};
use sortkit::sorters::selection::selection_sort;
use sortkit::sorters::simple::simple_sort;
use sortkit::consts::DEFAULT_QUICK_DEPTH_LIMIT;
use sortkit::sorters::{Algorithm, Sorter};

fn all_sorters() -> Vec<std::sync::Arc<dyn Sorter>> {
    Algorithm::ALL
        .iter()
        .map(|a| a.sorter(DEFAULT_QUICK_DEPTH_LIMIT))
        .collect()
}

fn reference(items: &[i64]) -> Vec<i64> {
    let mut sorted = items.to_vec();
    sorted.sort();
    sorted
}

#[test]
fn demo_input_end_to_end() {
    for sorter in all_sorters() {
        assert_eq!(
            sorter.sort(&[0, 43, 3, 2, 3, 4]),
            vec![0, 2, 3, 3, 4, 43],
            "{}",
            sorter.name()
        );
    }
}

#[test]
fn descending_input_for_every_sorter() {
    for sorter in all_sorters() {
        assert_eq!(
            sorter.sort(&[9, 8, 7, 6, 5, 4, 3, 2, 1]),
            vec![1, 2, 3, 4, 5, 6, 7, 8, 9],
            "{}",
            sorter.name()
        );
    }
}

#[test]
fn generic_over_other_orderable_types() {
    let words = ["pear", "apple", "fig"];
    let expected = vec!["apple", "fig", "pear"];
    assert_eq!(quick_sort(&words), expected);
    assert_eq!(bubble_sort(&words), expected);
    assert_eq!(selection_sort(&words), expected);
    assert_eq!(insertion_sort(&words), expected);
    assert_eq!(simple_sort(&words), expected);
    assert_eq!(merge_sort(&words), expected);
}

proptest! {
    #[test]
    fn every_sorter_returns_a_sorted_permutation(items in prop::collection::vec(any::<i64>(), 0..64)) {
        let expected = reference(&items);
        for sorter in all_sorters() {
            prop_assert_eq!(sorter.sort(&items), expected.clone(), "{}", sorter.name());
        }
    }

    #[test]
    fn sorting_is_idempotent(items in prop::collection::vec(-20i64..20, 0..48)) {
        for sorter in all_sorters() {
            let once = sorter.sort(&items);
            prop_assert_eq!(sorter.sort(&once), once.clone(), "{}", sorter.name());
        }
    }

    #[test]
    fn quick_sort_agrees_across_depth_limits(
        items in prop::collection::vec(-50i64..50, 0..128),
        limit in 0usize..8,
    ) {
        prop_assert_eq!(quick_sort_with_limit(&items, limit), reference(&items));
    }

    #[test]
    fn merge_sort_is_stable(keys in prop::collection::vec(0i64..5, 0..64)) {
        let tagged: Vec<(i64, usize)> = keys.into_iter().enumerate().map(|(i, k)| (k, i)).collect();
        let sorted = merge_sort_by_key(&tagged, |pair| pair.0);

        for pair in sorted.windows(2) {
            prop_assert!(pair[0].0 <= pair[1].0);
            if pair[0].0 == pair[1].0 {
                prop_assert!(pair[0].1 < pair[1].1);
            }
        }
        prop_assert_eq!(sorted.len(), tagged.len());
    }
}
