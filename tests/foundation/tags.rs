//! Integration tests for component tags and entity handles

use maskstore_foundation::{ComponentTag, EntityHandle, ErrorKind, Tag, Tagged, tag_of};

type ItemName = Tagged<String, 0>;
type ItemStock = Tagged<u32, 1>;
type ItemValue = Tagged<f64, 2>;
type ItemForSale = Tagged<bool, 4>;

/// Hand-written tag, for hosts that prefer a named type over an alias.
struct Description;

impl Tag for Description {
    const INDEX: usize = 3;
    type Value = String;
}

#[test]
fn tagged_aliases_resolve() {
    assert_eq!(tag_of::<ItemName>().index(), 0);
    assert_eq!(tag_of::<ItemStock>().index(), 1);
    assert_eq!(tag_of::<ItemValue>().index(), 2);
    assert_eq!(tag_of::<Description>().index(), 3);
    assert_eq!(tag_of::<ItemForSale>().index(), 4);
}

#[test]
fn tag_index_is_bounded() {
    assert!(ComponentTag::new(31).is_ok());
    let err = ComponentTag::new(32).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TagOutOfRange(32)));
}

#[test]
fn handles_order_by_index() {
    let mut handles = vec![EntityHandle::new(2), EntityHandle::new(0), EntityHandle::new(1)];
    handles.sort();
    assert_eq!(
        handles.iter().map(|h| h.index()).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
}
