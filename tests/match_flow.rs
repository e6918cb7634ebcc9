//! End-to-end session flow: damage, death, respawn.

mod common;

use bevy::ecs::message::Messages;
use bevy::prelude::*;

use train_eater::common::state::GameState;
use train_eater::plugins::audio::{PlaySound, SoundEffect};
use train_eater::plugins::creature::{Creature, Health};
use train_eater::plugins::session::{DamagePlayer, PlayerVitals, RespawnRequested};

fn drain_sounds(app: &mut App) -> Vec<PlaySound> {
    app.world_mut()
        .resource_mut::<Messages<PlaySound>>()
        .drain()
        .collect()
}

fn state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}

#[test]
fn forty_damage_leaves_sixty_with_one_hurt_sound() {
    let mut app = common::app_headless();
    common::tick(&mut app, 0.05);
    drain_sounds(&mut app);

    app.world_mut().write_message(DamagePlayer { amount: 40.0 });
    common::tick(&mut app, 0.05);

    let vitals = app.world().resource::<PlayerVitals>();
    assert_eq!(vitals.health, 60.0);
    assert!(vitals.alive);
    assert_eq!(state(&app), GameState::InGame);

    let hurt = drain_sounds(&mut app)
        .iter()
        .filter(|s| s.effect == SoundEffect::PlayerDamage)
        .count();
    assert_eq!(hurt, 1);
}

#[test]
fn death_locks_the_session_until_respawn() {
    let mut app = common::app_headless();
    common::tick(&mut app, 0.05);

    // Drive health to zero.
    app.world_mut().write_message(DamagePlayer { amount: 150.0 });
    common::tick(&mut app, 0.05);

    {
        let vitals = app.world().resource::<PlayerVitals>();
        assert_eq!(vitals.health, 0.0);
        assert!(!vitals.alive);
    }

    // The state transition lands on the next frame.
    common::tick(&mut app, 0.05);
    assert_eq!(state(&app), GameState::Dead);

    // Further damage is a no-op while dead.
    app.world_mut().write_message(DamagePlayer { amount: 25.0 });
    common::tick(&mut app, 0.05);
    assert_eq!(app.world().resource::<PlayerVitals>().health, 0.0);

    // Respawn: player back to 100, boss rebuilt at 100, alive again.
    app.world_mut().write_message(RespawnRequested);
    common::tick(&mut app, 0.05);
    common::tick(&mut app, 0.05);

    assert_eq!(state(&app), GameState::InGame);
    let vitals = app.world().resource::<PlayerVitals>();
    assert_eq!(vitals.health, 100.0);
    assert!(vitals.alive);

    let boss_hp = app
        .world_mut()
        .query_filtered::<&Health, With<Creature>>()
        .iter(app.world())
        .next()
        .expect("boss respawned")
        .hp;
    assert_eq!(boss_hp, 100.0);
}

#[test]
fn regeneration_heals_after_quiet_time() {
    let mut app = common::app_headless();
    common::tick(&mut app, 0.05);

    app.world_mut().write_message(DamagePlayer { amount: 30.0 });
    common::tick(&mut app, 0.05);
    assert_eq!(app.world().resource::<PlayerVitals>().health, 70.0);

    // Well past the 3 s quiet window plus several regen seconds.
    common::run_for(&mut app, 8.0);

    let healed = app.world().resource::<PlayerVitals>().health;
    assert!(healed > 70.0, "expected regen, got {healed}");
    assert!(healed <= 100.0);
}
