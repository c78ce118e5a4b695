//! Integration test: array-mode ownership lifecycle.
//!
//! Exercises `UniqueArray` end-to-end: build from a vector, unchecked
//! indexing, surrender via `release`, and element-destructor accounting
//! through the default block-releasing deleter.

use uniq::UniqueArray;
use uniq_test_utils::{DropSpy, DropTally};

#[test]
fn wrapped_array_indexes_and_releases() {
    let mut a = UniqueArray::from_vec(vec![1, 2, 3, 4, 5]);

    // SAFETY: indices 0 and 2 are within the five elements allocated above.
    unsafe {
        assert_eq!(*a.at(0), 1);
        assert_eq!(*a.at(2), 3);
    }

    let raw = a.release();
    assert!(a.is_empty());
    assert!(!raw.is_null());

    // SAFETY: `release` handed the block back with its elements intact;
    // readopting restores the single-owner state and frees it on drop.
    let readopted: UniqueArray<i32> = unsafe { UniqueArray::from_raw(raw) };
    // SAFETY: all five elements are still live.
    assert_eq!(unsafe { *readopted.at(4) }, 5);
}

#[test]
fn every_element_destructor_runs_exactly_once_on_drop() {
    let tally = DropTally::new();

    {
        let a: UniqueArray<DropSpy> = (0..5).map(|i| DropSpy::new(&tally, i)).collect();
        // SAFETY: five elements were allocated; spy identity survives the move.
        assert_eq!(unsafe { a.at(3).id }, 3);
        assert_eq!(tally.count(), 0);
    }

    assert_eq!(tally.count(), 5);
}

#[test]
fn take_then_drop_releases_through_the_new_owner_only() {
    let tally = DropTally::new();
    let mut a: UniqueArray<DropSpy> = (0..4).map(|i| DropSpy::new(&tally, i)).collect();

    let b = a.take();
    drop(a);
    assert_eq!(tally.count(), 0);

    drop(b);
    assert_eq!(tally.count(), 4);
}

#[test]
fn swapped_arrays_keep_their_elements_straight() {
    let mut a = UniqueArray::from_vec(vec!["left"]);
    let mut b = UniqueArray::from_vec(vec!["right", "right"]);

    a.swap(&mut b);

    // SAFETY: `a` now holds the two-element block, `b` the one-element block.
    unsafe {
        assert_eq!(*a.at(1), "right");
        assert_eq!(*b.at(0), "left");
    }
}
