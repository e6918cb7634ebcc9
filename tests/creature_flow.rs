//! End-to-end boss fight: fifty 2-damage hits kill the creature for good.

mod common;

use bevy::prelude::*;

use train_eater::plugins::creature::{Creature, CreatureLife, CreatureStruck, Health};
use train_eater::plugins::player::Player;
use train_eater::plugins::session::PlayerVitals;

fn boss_entity(app: &mut App) -> Entity {
    app.world_mut()
        .query_filtered::<Entity, With<Creature>>()
        .iter(app.world())
        .next()
        .expect("boss exists")
}

#[test]
fn fifty_small_hits_retire_the_boss() {
    let mut app = common::app_headless();
    common::tick(&mut app, 0.05);

    let boss = boss_entity(&mut app);

    for _ in 0..50 {
        app.world_mut().write_message(CreatureStruck {
            creature: boss,
            hit_point: Vec3::new(0.0, 2.0, -17.0),
            damage: 2.0,
        });
    }
    common::tick(&mut app, 0.05);

    assert_eq!(app.world().get::<Health>(boss).unwrap().hp, 0.0);
    assert_eq!(
        *app.world().get::<CreatureLife>(boss).unwrap(),
        CreatureLife::Dead
    );

    // Off-field pose.
    let y = app.world().get::<Transform>(boss).unwrap().translation.y;
    assert_eq!(y, -10.0);

    // Shove the player right where the boss stood: a dead boss never bites.
    let player = app
        .world_mut()
        .query_filtered::<Entity, With<Player>>()
        .iter(app.world())
        .next()
        .expect("player exists");
    app.world_mut()
        .get_mut::<Transform>(player)
        .unwrap()
        .translation = Vec3::new(0.0, 2.0, -20.0);

    common::run_for(&mut app, 3.0);

    assert_eq!(app.world().resource::<PlayerVitals>().health, 100.0);
    let y = app.world().get::<Transform>(boss).unwrap().translation.y;
    assert_eq!(y, -10.0);
}

#[test]
fn a_live_boss_does_bite_at_close_range() {
    let mut app = common::app_headless();
    common::tick(&mut app, 0.05);

    let player = app
        .world_mut()
        .query_filtered::<Entity, With<Player>>()
        .iter(app.world())
        .next()
        .unwrap();
    app.world_mut()
        .get_mut::<Transform>(player)
        .unwrap()
        .translation = Vec3::new(0.0, 2.0, -18.0);

    common::run_for(&mut app, 1.0);

    assert!(
        app.world().resource::<PlayerVitals>().health < 100.0,
        "boss in range should have attacked"
    );
}
