//! Integration tests for filtered iteration and unfiltered slot access

use maskstore_foundation::Tagged;
use maskstore_storage::World;

type ItemName = Tagged<String, 0>;
type ItemValue = Tagged<f64, 2>;

fn three_items(world: &mut World) {
    world.register_component::<ItemName>().unwrap();
    let handles: Vec<_> = (0..3).map(|_| world.register_entity().unwrap()).collect();

    world.enable::<ItemName>(handles[0]).unwrap();
    world.enable::<ItemName>(handles[2]).unwrap();
    world.set::<ItemName>(handles[0], "a".to_string()).unwrap();
    world.set::<ItemName>(handles[2], "c".to_string()).unwrap();
}

// =============================================================================
// Filtered Iteration
// =============================================================================

#[test]
fn filtered_iteration_yields_enabled_only() {
    for mut world in [World::default(), World::growable()] {
        three_items(&mut world);

        let names: Vec<_> = world
            .iter::<ItemName>()
            .unwrap()
            .map(|(_, name)| name.clone())
            .collect();
        assert_eq!(names, vec!["a", "c"]);
    }
}

#[test]
fn filtered_iteration_is_reversible() {
    let mut world = World::default();
    three_items(&mut world);

    let names: Vec<_> = world
        .iter::<ItemName>()
        .unwrap()
        .rev()
        .map(|(handle, name)| (handle.index(), name.as_str()))
        .collect();
    assert_eq!(names, vec![(2, "c"), (0, "a")]);
}

#[test]
fn filtered_iteration_restarts_fresh() {
    let mut world = World::default();
    three_items(&mut world);
    assert_eq!(world.iter::<ItemName>().unwrap().count(), 2);

    let second = world.entities().iter().nth(1).unwrap();
    world.enable::<ItemName>(second).unwrap();
    assert_eq!(world.iter::<ItemName>().unwrap().count(), 3);
}

#[test]
fn iter_mut_yields_writable_values() {
    let mut world = World::default();
    three_items(&mut world);

    for (_, name) in world.iter_mut::<ItemName>().unwrap() {
        name.push('!');
    }
    let names: Vec<_> = world
        .iter::<ItemName>()
        .unwrap()
        .map(|(_, name)| name.clone())
        .collect();
    assert_eq!(names, vec!["a!", "c!"]);
}

#[test]
fn iteration_skips_unregistered_entities() {
    let mut world = World::default();
    world.register_component::<ItemValue>().unwrap();
    let handles: Vec<_> = (0..20).map(|_| world.register_entity().unwrap()).collect();
    for (i, handle) in handles.iter().enumerate() {
        world.enable::<ItemValue>(*handle).unwrap();
        world.set::<ItemValue>(*handle, (i * 3) as f64).unwrap();
    }
    for handle in handles.iter().step_by(2) {
        world.unregister_entity(*handle).unwrap();
    }

    let values: Vec<f64> = world.iter::<ItemValue>().unwrap().map(|(_, v)| *v).collect();
    assert_eq!(values.len(), 10);
    assert!(values.iter().all(|v| (*v as usize / 3) % 2 == 1));
}

// =============================================================================
// Unfiltered Slots
// =============================================================================

#[test]
fn unfiltered_slots_expose_disabled_filler() {
    let mut world = World::growable();
    three_items(&mut world);

    let slots = world.unfiltered_slots_mut::<ItemName>().unwrap();
    assert_eq!(slots.len(), 3);
    assert_eq!(slots, &["a".to_string(), String::new(), "c".to_string()]);
}

#[test]
fn unfiltered_slots_span_bounded_capacity() {
    let mut world = World::bounded(8);
    three_items(&mut world);

    let slots = world.unfiltered_slots_mut::<ItemName>().unwrap();
    assert_eq!(slots.len(), 8);
    assert_eq!(slots[0], "a");
    assert_eq!(slots[1], "");
}
