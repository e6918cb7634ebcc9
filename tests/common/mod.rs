//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides the core ECS runtime.
//! - `TimeUpdateStrategy::ManualDuration` makes every `app.update()` advance
//!   game time by a fixed amount, so fixed-step systems (physics, AI, damage)
//!   run deterministically instead of depending on wall-clock speed.

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use bevy::transform::TransformPlugin;
use std::time::Duration;

pub fn app_headless() -> App {
    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins,
        TransformPlugin,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));

    train_eater::game::configure_headless(&mut app);
    app
}

/// Advance the app by one frame worth `secs` of simulated time.
pub fn tick(app: &mut App, secs: f32) {
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
        secs,
    )));
    app.update();
}

/// Simulate `total` seconds in small frame steps.
#[allow(dead_code)]
pub fn run_for(app: &mut App, total: f32) {
    let step = 0.05;
    let frames = (total / step).ceil() as usize;
    for _ in 0..frames {
        tick(app, step);
    }
}
