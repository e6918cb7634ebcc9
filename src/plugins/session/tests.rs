#![cfg(test)]

use bevy::ecs::message::Messages;
use bevy::prelude::*;
use std::time::Duration;

use super::*;
use crate::common::state::GameState;
use crate::common::test_utils::{run_system_once, TestRng};
use crate::common::tunables::Tunables;
use crate::plugins::audio::PlaySound;

fn session_world() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(PlayerVitals::full());
    world.init_resource::<Messages<DamagePlayer>>();
    world.init_resource::<Messages<PlaySound>>();
    world.init_resource::<NextState<GameState>>();
    world.insert_resource(Time::<Fixed>::default());
    world
}

fn advance(world: &mut World, secs: f32) {
    world
        .resource_mut::<Time<Fixed>>()
        .advance_by(Duration::from_secs_f32(secs));
}

fn hit(world: &mut World, amount: f32) {
    world.write_message(DamagePlayer { amount });
    run_system_once(world, apply_damage);
    // `run_system_once` builds a fresh reader each call; clear the buffer so
    // the next run does not see this message again.
    world.resource_mut::<Messages<DamagePlayer>>().clear();
}

fn drain_sounds(world: &mut World) -> Vec<PlaySound> {
    world.resource_mut::<Messages<PlaySound>>().drain().collect()
}

// -----------------------------------------------------------------------------
// Damage
// -----------------------------------------------------------------------------

#[test]
fn forty_damage_leaves_sixty_and_one_sound() {
    let mut world = session_world();
    hit(&mut world, 40.0);

    let vitals = world.resource::<PlayerVitals>();
    assert_eq!(vitals.health, 60.0);
    assert!(vitals.alive);

    let sounds = drain_sounds(&mut world);
    assert_eq!(sounds.len(), 1);
    assert_eq!(sounds[0].effect, SoundEffect::PlayerDamage);
}

#[test]
fn lethal_damage_clamps_at_zero_and_flips_alive() {
    let mut world = session_world();
    hit(&mut world, 250.0);

    let vitals = world.resource::<PlayerVitals>();
    assert_eq!(vitals.health, 0.0);
    assert!(!vitals.alive);
}

#[test]
fn damage_while_dead_is_a_no_op() {
    let mut world = session_world();
    hit(&mut world, 100.0);
    assert!(!world.resource::<PlayerVitals>().alive);
    drain_sounds(&mut world);

    hit(&mut world, 25.0);

    let vitals = world.resource::<PlayerVitals>();
    assert_eq!(vitals.health, 0.0);
    assert!(!vitals.alive);
    // No second death transition, no hurt sound.
    assert!(drain_sounds(&mut world).is_empty());
}

#[test]
fn health_stays_clamped_under_random_damage_and_regen() {
    let mut world = session_world();
    let mut rng = TestRng::new(0xC0FFEE_5EED);

    for _ in 0..2_000 {
        let before = *world.resource::<PlayerVitals>();

        if rng.next_f32() < 0.5 {
            let amount = rng.range_f32(0.0, 40.0);
            hit(&mut world, amount);

            let after = world.resource::<PlayerVitals>();
            if before.alive {
                assert_eq!(after.health, (before.health - amount).max(0.0));
            } else {
                assert_eq!(after.health, before.health);
            }
        } else {
            advance(&mut world, rng.range_f32(0.0, 2.0));
            run_system_once(&mut world, regenerate);
        }

        let vitals = world.resource::<PlayerVitals>();
        assert!((0.0..=MAX_HEALTH).contains(&vitals.health));
    }
}

// -----------------------------------------------------------------------------
// Regeneration
// -----------------------------------------------------------------------------

#[test]
fn regen_starts_after_three_quiet_seconds() {
    let mut world = session_world();
    advance(&mut world, 1.0);
    hit(&mut world, 50.0);
    drain_sounds(&mut world);

    // Inside the 3 s window: nothing.
    advance(&mut world, 2.5);
    run_system_once(&mut world, regenerate);
    assert_eq!(world.resource::<PlayerVitals>().health, 50.0);

    // Past the window: +5 per elapsed second.
    advance(&mut world, 1.0);
    run_system_once(&mut world, regenerate);
    advance(&mut world, 1.0);
    run_system_once(&mut world, regenerate);
    assert_eq!(world.resource::<PlayerVitals>().health, 60.0);
}

#[test]
fn regen_never_exceeds_full_health() {
    let mut world = session_world();
    advance(&mut world, 1.0);
    hit(&mut world, 7.0);

    advance(&mut world, 10.0);
    run_system_once(&mut world, regenerate);
    advance(&mut world, 10.0);
    run_system_once(&mut world, regenerate);

    assert_eq!(world.resource::<PlayerVitals>().health, MAX_HEALTH);
}

#[test]
fn regen_does_not_run_while_dead() {
    let mut world = session_world();
    advance(&mut world, 1.0);
    hit(&mut world, 150.0);
    assert!(!world.resource::<PlayerVitals>().alive);

    advance(&mut world, 30.0);
    run_system_once(&mut world, regenerate);

    assert_eq!(world.resource::<PlayerVitals>().health, 0.0);
}

#[test]
fn fresh_damage_restarts_the_quiet_window() {
    let mut world = session_world();
    advance(&mut world, 1.0);
    hit(&mut world, 50.0);

    advance(&mut world, 2.9);
    run_system_once(&mut world, regenerate);

    // Damage again right before regen would have started.
    hit(&mut world, 10.0);
    advance(&mut world, 2.9);
    run_system_once(&mut world, regenerate);

    assert_eq!(world.resource::<PlayerVitals>().health, 40.0);
}
