#![cfg(test)]

use avian3d::prelude::*;
use bevy::ecs::query::Has;
use bevy::prelude::*;

use super::*;
use crate::common::test_utils::run_system_once;
use crate::plugins::props::{BreakableKind, Prop};

#[test]
fn ground_is_a_static_body() {
    let mut world = World::new();
    run_system_once(&mut world, spawn_ground);

    let grounds = world
        .query::<(&Name, &RigidBody)>()
        .iter(&world)
        .filter(|(n, rb)| n.as_str() == "Ground" && matches!(**rb, RigidBody::Static))
        .count();
    assert_eq!(grounds, 1);
}

#[test]
fn layout_spawns_the_sandbox_cast() {
    let mut world = World::new();
    run_system_once(&mut world, spawn_props);

    // 3 boxes + 3 barrels + 5 cones + 1 sphere.
    let props = world.query::<&Prop>().iter(&world).count();
    assert_eq!(props, 12);

    let crates = world
        .query::<&BreakableKind>()
        .iter(&world)
        .filter(|k| **k == BreakableKind::Crate)
        .count();
    assert_eq!(crates, 4);

    let panes = world
        .query::<&BreakableKind>()
        .iter(&world)
        .filter(|k| **k == BreakableKind::GlassPane)
        .count();
    assert_eq!(panes, 3);

    let walls = world
        .query::<(&Name, &RigidBody)>()
        .iter(&world)
        .filter(|(n, rb)| n.as_str() == "ConcreteWall" && matches!(**rb, RigidBody::Static))
        .count();
    assert_eq!(walls, 2);
}

#[test]
fn dynamic_bodies_carry_collision_events() {
    let mut world = World::new();
    run_system_once(&mut world, spawn_props);

    let mut q = world.query::<(&RigidBody, Has<CollisionEventsEnabled>)>();
    for (rb, has_events) in q.iter(&world) {
        if matches!(rb, RigidBody::Dynamic) {
            assert!(has_events, "dynamic props must opt into collision events");
        }
    }
}
