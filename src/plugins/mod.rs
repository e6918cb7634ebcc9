//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::projectiles::ProjectilesPlugin;

pub mod audio;
pub mod core;
pub mod creature;
pub mod effects;
pub mod physics;
pub mod player;
pub mod projectiles;
pub mod props;
pub mod session;
pub mod weapons;
pub mod world;

// Render-only
pub mod camera;
pub mod hud;
pub mod lighting;
pub mod visuals;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    audio::plugin(app);
    world::plugin(app);
    player::plugin(app);
    weapons::plugin(app);
    app.add_plugins(ProjectilesPlugin);
    creature::plugin(app);
    props::plugin(app);
    effects::plugin(app);
    session::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    lighting::plugin(app);
    camera::plugin(app);
    visuals::plugin(app);
    hud::plugin(app);
}

/// Register all plugins (full app).
pub fn register_all(app: &mut App) {
    register_gameplay(app);
    register_render(app);
}
