use pretty_assertions::assert_eq;

use super::*;

#[test]
fn unsorted_collection_scenario() {
    let collection = [10, 80, 20, 70, 30, 60, 40, 50];
    let ctx = locate(55, &collection, 2);
    assert_eq!(ctx.below, Some(50));
    assert_eq!(ctx.above, Some(60));
    assert_eq!(ctx.index, 5);
    assert_eq!(ctx.window, [40, 50, 60, 70]);
    assert_eq!(ctx.window_split, 2);
    // Caller's data is untouched.
    assert_eq!(collection, [10, 80, 20, 70, 30, 60, 40, 50]);
}

#[test]
fn empty_collection_has_no_neighbors() {
    let ctx = locate(5, &[], 2);
    assert_eq!(ctx.below, None);
    assert_eq!(ctx.above, None);
    assert!(ctx.window.is_empty());
    assert!(ctx.is_empty());
    assert!(!ctx.is_below_all());
    assert!(!ctx.is_above_all());
}

#[test]
fn query_below_minimum() {
    let ctx = locate(1, &[30, 10, 20], 2);
    assert_eq!(ctx.below, None);
    assert_eq!(ctx.above, Some(10));
    assert_eq!(ctx.window, [10, 20]);
    assert!(ctx.is_below_all());
}

#[test]
fn query_above_maximum() {
    let ctx = locate(99, &[30, 10, 20], 2);
    assert_eq!(ctx.below, Some(30));
    assert_eq!(ctx.above, None);
    assert_eq!(ctx.window, [20, 30]);
    assert_eq!(ctx.window_split, 2);
    assert!(ctx.is_above_all());
}

#[test]
fn duplicates_use_leftmost_insertion_point() {
    let ctx = locate(20, &[20, 10, 20, 30], 1);
    assert_eq!(ctx.index, 1);
    assert_eq!(ctx.below, Some(10));
    assert_eq!(ctx.above, Some(20));
    assert_eq!(ctx.window, [10, 20]);
}

#[test]
fn single_element_window_is_one_sided() {
    let ctx = locate(7, &[3], 2);
    assert_eq!(ctx.window, [3]);
    assert_eq!(ctx.below, Some(3));
    assert_eq!(ctx.above, None);
}

#[test]
fn nan_is_excluded_from_sorted_view() {
    let ctx = locate(2.5, &[3.0, f64::NAN, 1.0, 2.0], 1);
    assert_eq!(ctx.total, 3);
    assert_eq!(ctx.below, Some(2.0));
    assert_eq!(ctx.above, Some(3.0));
}

#[test]
fn neighbors_bracket_the_query() {
    let collection: Vec<i64> = (0..40).map(|i| (i * 37) % 101).collect();
    for query in [-5, 3, 50, 77, 200] {
        if collection.contains(&query) {
            continue;
        }
        let ctx = locate(query, &collection, 2);
        if let Some(below) = ctx.below {
            assert!(below < query);
        }
        if let Some(above) = ctx.above {
            assert!(query < above);
        }
    }
}
