//! Core plugin: shared resources and global settings.

use bevy::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::common::tunables::Tunables;

/// Single random stream for gameplay (spread, debris, particles, stun jitter).
///
/// Owning the stream in one resource keeps randomized systems sequential and
/// lets tests seed it for reproducible runs.
#[derive(Resource)]
pub struct GameRng(pub SmallRng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self(SmallRng::from_entropy())
    }
}

pub fn plugin(app: &mut App) {
    app.insert_resource(Tunables::default());
    app.insert_resource(GameRng::default());
    // Bright, sunny flatgrass sky.
    app.insert_resource(ClearColor(Color::srgb(0.53, 0.77, 0.92)));
}

#[cfg(test)]
mod tests;
