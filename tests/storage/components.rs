//! Integration tests for component stores and gated access
//!
//! Tests registration, enable/disable toggles, and get/set preconditions.

use maskstore_foundation::{ErrorKind, Tagged};
use maskstore_storage::{StorageConfig, World};

type ItemName = Tagged<String, 0>;
type ItemStock = Tagged<u32, 1>;
type ItemValue = Tagged<f64, 2>;
type ItemDescription = Tagged<String, 3>;
type ItemForSale = Tagged<bool, 4>;
type StockAsText = Tagged<String, 1>;

// =============================================================================
// Registration
// =============================================================================

#[test]
fn register_component_twice() {
    let mut world = World::default();
    assert!(world.register_component::<ItemName>().is_ok());

    let err = world.register_component::<ItemName>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::AlreadyRegistered(_)));
    assert!(world.is_registered::<ItemName>());
}

#[test]
fn unregister_component_twice() {
    let mut world = World::default();
    world.register_component::<ItemStock>().unwrap();
    assert!(world.unregister_component::<ItemStock>().is_ok());

    let err = world.unregister_component::<ItemStock>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ComponentNotRegistered(_)));
    assert!(!world.is_registered::<ItemStock>());
}

#[test]
fn unregister_never_registered() {
    let mut world = World::default();
    assert!(world.unregister_component::<ItemValue>().is_err());
}

// =============================================================================
// Toggles
// =============================================================================

#[test]
fn enable_twice() {
    let mut world = World::default();
    let e = world.register_entity().unwrap();

    assert!(world.enable::<ItemName>(e).is_ok());
    let err = world.enable::<ItemName>(e).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::AlreadyEnabled { .. }));
}

#[test]
fn disable_twice() {
    let mut world = World::default();
    let e = world.register_entity().unwrap();
    world.enable::<ItemName>(e).unwrap();

    assert!(world.disable::<ItemName>(e).is_ok());
    let err = world.disable::<ItemName>(e).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::AlreadyDisabled { .. }));
}

#[test]
fn enable_does_not_need_a_store() {
    let mut world = World::default();
    let e = world.register_entity().unwrap();

    assert!(world.enable::<ItemForSale>(e).is_ok());
    assert!(world.is_enabled::<ItemForSale>(e));
    assert!(!world.is_registered::<ItemForSale>());
}

#[test]
fn mask_reports_enabled_tags() {
    let mut world = World::default();
    let e = world.register_entity().unwrap();
    world.enable::<ItemName>(e).unwrap();
    world.enable::<ItemForSale>(e).unwrap();

    let tags: Vec<_> = world.mask(e).unwrap().iter().map(|t| t.index()).collect();
    assert_eq!(tags, vec![0, 4]);
}

// =============================================================================
// Get / Set
// =============================================================================

#[test]
fn set_then_get_round_trips() {
    for config in [StorageConfig::default(), StorageConfig::growable()] {
        let mut world = World::new(config);
        world.register_component::<ItemDescription>().unwrap();
        world.register_component::<ItemValue>().unwrap();
        let e = world.register_entity().unwrap();
        world.enable::<ItemDescription>(e).unwrap();
        world.enable::<ItemValue>(e).unwrap();

        world
            .set::<ItemDescription>(e, "Probably handmade.".to_string())
            .unwrap();
        world.set::<ItemValue>(e, 36.0).unwrap();

        assert_eq!(
            world.get::<ItemDescription>(e).unwrap(),
            "Probably handmade."
        );
        assert_eq!(world.get_cloned::<ItemValue>(e).unwrap(), 36.0);
    }
}

#[test]
fn get_fails_when_disabled() {
    let mut world = World::default();
    world.register_component::<ItemStock>().unwrap();
    let e = world.register_entity().unwrap();

    let err = world.get::<ItemStock>(e).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ComponentDisabled { .. }));
}

#[test]
fn get_fails_without_store() {
    let mut world = World::default();
    let e = world.register_entity().unwrap();
    world.enable::<ItemStock>(e).unwrap();

    let err = world.get::<ItemStock>(e).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ComponentNotRegistered(_)));
}

#[test]
fn get_mut_updates_in_place() {
    let mut world = World::growable();
    world.register_component::<ItemStock>().unwrap();
    let e = world.register_entity().unwrap();
    world.enable::<ItemStock>(e).unwrap();

    *world.get_mut::<ItemStock>(e).unwrap() += 5;
    *world.get_mut::<ItemStock>(e).unwrap() += 5;
    assert_eq!(world.get::<ItemStock>(e).unwrap(), &10);
}

#[test]
fn disabling_keeps_value() {
    let mut world = World::default();
    world.register_component::<ItemStock>().unwrap();
    let e = world.register_entity().unwrap();
    world.enable::<ItemStock>(e).unwrap();
    world.set::<ItemStock>(e, 7).unwrap();

    world.disable::<ItemStock>(e).unwrap();
    assert!(world.set::<ItemStock>(e, 8).is_err());
    world.enable::<ItemStock>(e).unwrap();
    assert_eq!(world.get::<ItemStock>(e).unwrap(), &7);
}

#[test]
fn conflicting_value_type_is_rejected() {
    let mut world = World::default();
    world.register_component::<ItemStock>().unwrap();
    let e = world.register_entity().unwrap();
    world.enable::<ItemStock>(e).unwrap();

    let err = world.set::<StockAsText>(e, "ten".to_string()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
    assert_eq!(world.get::<ItemStock>(e).unwrap(), &0);
}

// =============================================================================
// Unregistration Clears Capability Bits
// =============================================================================

#[test]
fn reregistered_component_starts_disabled() {
    let mut world = World::default();
    world.register_component::<ItemName>().unwrap();
    let e = world.register_entity().unwrap();
    world.enable::<ItemName>(e).unwrap();
    world.set::<ItemName>(e, "old".to_string()).unwrap();

    world.unregister_component::<ItemName>().unwrap();
    world.register_component::<ItemName>().unwrap();

    assert!(!world.is_enabled::<ItemName>(e));
    assert!(world.get::<ItemName>(e).is_err());

    world.enable::<ItemName>(e).unwrap();
    assert_eq!(world.get::<ItemName>(e).unwrap(), "");
}
