#![cfg(test)]

use bevy::ecs::message::Messages;
use bevy::prelude::*;
use std::time::Duration;

use super::*;
use crate::common::test_utils::run_system_once;
use crate::common::tunables::Tunables;
use crate::plugins::audio::PlaySound;
use crate::plugins::core::GameRng;
use crate::plugins::player::{LookAngles, PlayerInput, PlayerPositionSlot};
use crate::plugins::projectiles::messages::SpawnBulletRequest;

fn fire_world() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(PlayerInput::default());
    world.insert_resource(LookAngles::default());
    world.insert_resource(PlayerPositionSlot::default());
    world.insert_resource(Arsenal::default());
    world.insert_resource(GameRng::seeded(42));
    world.init_resource::<Messages<SpawnBulletRequest>>();
    world.init_resource::<Messages<PlaySound>>();
    world.insert_resource(Time::<Fixed>::default());
    world
}

fn drain_bullets(world: &mut World) -> Vec<SpawnBulletRequest> {
    world
        .resource_mut::<Messages<SpawnBulletRequest>>()
        .drain()
        .collect()
}

fn drain_sounds(world: &mut World) -> Vec<PlaySound> {
    world.resource_mut::<Messages<PlaySound>>().drain().collect()
}

#[test]
fn config_table_matches_the_three_archetypes() {
    let pistol = WeaponKind::Pistol.config();
    assert_eq!(pistol.fire_interval, 0.25);
    assert_eq!(pistol.pellets, 1);
    assert_eq!(pistol.spread, 0.0);
    assert_eq!(pistol.muzzle_speed, 40.0);

    let shotgun = WeaponKind::Shotgun.config();
    assert_eq!(shotgun.fire_interval, 0.8);
    assert_eq!(shotgun.pellets, 6);
    assert!(shotgun.spread > pistol.spread);

    let smg = WeaponKind::Smg.config();
    assert!(smg.fire_interval < pistol.fire_interval);
    assert_eq!(smg.pellets, 1);
}

#[test]
fn no_fire_intent_means_no_bullets() {
    let mut world = fire_world();
    run_system_once(&mut world, fire_weapon);
    assert!(drain_bullets(&mut world).is_empty());
    assert!(drain_sounds(&mut world).is_empty());
}

#[test]
fn pistol_fires_one_pellet_straight_ahead() {
    let mut world = fire_world();
    world.resource_mut::<PlayerInput>().fire = true;

    run_system_once(&mut world, fire_weapon);

    let bullets = drain_bullets(&mut world);
    assert_eq!(bullets.len(), 1);
    // Zero spread: velocity is exactly forward * muzzle speed.
    assert!((bullets[0].vel - Vec3::NEG_Z * 40.0).length() < 1e-4);
    // Muzzle sits ahead of the eye.
    assert!((bullets[0].pos - Vec3::new(0.0, 0.8, -1.0)).length() < 1e-4);
}

#[test]
fn shotgun_emits_six_pellets_and_one_sound() {
    let mut world = fire_world();
    world.resource_mut::<PlayerInput>().fire = true;
    world.resource_mut::<Arsenal>().equipped = WeaponKind::Shotgun;

    run_system_once(&mut world, fire_weapon);

    let bullets = drain_bullets(&mut world);
    assert_eq!(bullets.len(), 6);
    for b in &bullets {
        // Spread jitters the direction but not the muzzle speed.
        assert!((b.vel.length() - 40.0).abs() < 1e-3);
    }

    let sounds = drain_sounds(&mut world);
    assert_eq!(sounds.len(), 1);
    assert_eq!(sounds[0].effect, SoundEffect::ShotgunBlast);
}

#[test]
fn held_fire_respects_cadence_exactly() {
    // Intent held for T seconds with interval f yields floor(T/f) + 1 fire
    // events, the first at t = 0.
    let mut world = fire_world();
    world.resource_mut::<PlayerInput>().fire = true;

    let interval = WeaponKind::Pistol.config().fire_interval;
    // Exactly representable step so elapsed time accumulates without drift.
    let dt = 0.0625;
    let total = 1.0_f32;

    // First tick at t = 0.
    run_system_once(&mut world, fire_weapon);
    let mut events = drain_bullets(&mut world).len();

    let steps = (total / dt).round() as usize;
    for _ in 0..steps {
        world
            .resource_mut::<Time<Fixed>>()
            .advance_by(Duration::from_secs_f32(dt));
        run_system_once(&mut world, fire_weapon);
        events += drain_bullets(&mut world).len();
    }

    assert_eq!(events, (total / interval).floor() as usize + 1);
}

#[test]
fn early_refire_is_dropped_not_queued() {
    let mut world = fire_world();
    world.resource_mut::<PlayerInput>().fire = true;

    run_system_once(&mut world, fire_weapon);
    assert_eq!(drain_bullets(&mut world).len(), 1);

    // 0.1s later: still inside the pistol's 0.25s interval.
    world
        .resource_mut::<Time<Fixed>>()
        .advance_by(Duration::from_secs_f32(0.1));
    run_system_once(&mut world, fire_weapon);
    assert!(drain_bullets(&mut world).is_empty());

    // Past the interval: exactly one shot, the skipped attempt is gone.
    world
        .resource_mut::<Time<Fixed>>()
        .advance_by(Duration::from_secs_f32(0.2));
    run_system_once(&mut world, fire_weapon);
    assert_eq!(drain_bullets(&mut world).len(), 1);
}

#[test]
fn spread_stays_within_the_configured_cone() {
    let mut world = fire_world();
    world.resource_mut::<PlayerInput>().fire = true;
    world.resource_mut::<Arsenal>().equipped = WeaponKind::Shotgun;

    run_system_once(&mut world, fire_weapon);

    let spread = WeaponKind::Shotgun.config().spread;
    for b in drain_bullets(&mut world) {
        let dir = b.vel / 40.0;
        // Each axis offset was drawn from [-spread/2, spread/2] before
        // renormalizing, so the deviation from straight ahead is bounded.
        let deviation = (dir - Vec3::NEG_Z).length();
        assert!(deviation <= spread * 1.5, "deviation {deviation} too large");
    }
}
