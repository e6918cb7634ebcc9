//! Global state machine.
//!
//! `InGame` is the live match; `Dead` is the terminal death screen. Respawning
//! is a round-trip back into `InGame`: world entities are scoped with
//! `DespawnOnExit(GameState::InGame)`, so re-entry rebuilds the arena and the
//! creature at full health.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
    Dead,
}
