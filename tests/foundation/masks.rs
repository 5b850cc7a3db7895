//! Integration tests for capability masks and index sets

use maskstore_foundation::{ComponentMask, ComponentTag, IndexSet, MAX_COMPONENTS};
use proptest::prelude::*;

// =============================================================================
// ComponentMask
// =============================================================================

#[test]
fn mask_is_at_least_thirty_two_bits() {
    let last = ComponentTag::new(MAX_COMPONENTS - 1).unwrap();
    let mut mask = ComponentMask::empty();
    assert!(mask.insert(last));
    assert!(mask.contains(last));
    assert_eq!(mask.len(), 1);
}

#[test]
fn mask_toggles_are_independent() {
    let a = ComponentTag::new(0).unwrap();
    let b = ComponentTag::new(1).unwrap();
    let mut mask = ComponentMask::empty();

    mask.insert(a);
    mask.insert(b);
    mask.remove(a);

    assert!(!mask.contains(a));
    assert!(mask.contains(b));
}

// =============================================================================
// IndexSet
// =============================================================================

#[test]
fn index_set_scans_both_ways() {
    let mut set = IndexSet::new();
    for i in [0, 2, 1000] {
        set.insert(i);
    }

    assert_eq!(set.next_set(1, 2000), Some(2));
    assert_eq!(set.next_set(3, 2000), Some(1000));
    assert_eq!(set.prev_set(0, 1000), Some(2));
    assert_eq!(set.prev_set(1, 2), None);
}

proptest! {
    #[test]
    fn mask_len_matches_popcount(bits in any::<u32>()) {
        let mask = ComponentMask::from_bits(bits);
        prop_assert_eq!(mask.len(), bits.count_ones() as usize);
        prop_assert_eq!(mask.is_empty(), bits == 0);
    }
}
