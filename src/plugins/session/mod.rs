//! Session plugin: player vitals, regeneration, death and respawn.
//!
//! This is the thin orchestrator the other systems report into. Player health
//! lives here as a resource (exactly one writer per field per tick); the HUD
//! and the pointer-capture logic only ever read it.

use bevy::ecs::message::{MessageReader, MessageWriter, Messages};
use bevy::prelude::*;

use crate::common::{state::GameState, tunables::Tunables};
use crate::plugins::audio::{PlaySound, SoundEffect};

pub const MAX_HEALTH: f32 = 100.0;

#[derive(Resource, Debug, Clone, Copy)]
pub struct PlayerVitals {
    /// Clamped to [0, 100].
    pub health: f32,
    pub alive: bool,
    pub last_damage_at: f32,
    regen_accum: f32,
}

impl PlayerVitals {
    pub fn full() -> Self {
        Self {
            health: MAX_HEALTH,
            alive: true,
            last_damage_at: f32::NEG_INFINITY,
            regen_accum: 0.0,
        }
    }
}

impl Default for PlayerVitals {
    fn default() -> Self {
        Self::full()
    }
}

/// Damage request against the player (creature bites, future hazards).
#[derive(Message, Clone, Copy, Debug)]
pub struct DamagePlayer {
    pub amount: f32,
}

/// The death screen's single action.
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct RespawnRequested;

fn update_session_messages(
    mut damage: ResMut<Messages<DamagePlayer>>,
    mut respawn: ResMut<Messages<RespawnRequested>>,
) {
    damage.update();
    respawn.update();
}

pub fn plugin(app: &mut App) {
    app.insert_resource(PlayerVitals::full());
    app.init_resource::<Messages<DamagePlayer>>();
    app.init_resource::<Messages<RespawnRequested>>();
    app.add_systems(PostUpdate, update_session_messages);

    app.add_systems(OnEnter(GameState::InGame), reset_vitals);

    app.add_systems(
        FixedUpdate,
        (apply_damage, regenerate)
            .chain()
            .after(crate::plugins::creature::think)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        Update,
        (request_respawn, handle_respawn)
            .chain()
            .run_if(in_state(GameState::Dead)),
    );
}

fn reset_vitals(mut vitals: ResMut<PlayerVitals>) {
    *vitals = PlayerVitals::full();
}

/// Apply queued damage, clamped to zero; dying flips the alive flag exactly
/// once and enters the death screen. Damage against a dead player is a no-op.
pub fn apply_damage(
    time: Res<Time<Fixed>>,
    mut reader: MessageReader<DamagePlayer>,
    mut vitals: ResMut<PlayerVitals>,
    mut next_state: ResMut<NextState<GameState>>,
    mut sounds: MessageWriter<PlaySound>,
) {
    let now = time.elapsed_secs();

    for hit in reader.read() {
        if !vitals.alive || vitals.health <= 0.0 {
            continue;
        }

        vitals.health = (vitals.health - hit.amount).max(0.0);
        vitals.last_damage_at = now;
        vitals.regen_accum = 0.0;
        sounds.write(PlaySound::new(SoundEffect::PlayerDamage));

        if vitals.health <= 0.0 {
            vitals.alive = false;
            next_state.set(GameState::Dead);
        }
    }
}

/// +regen_step health per full second, once regen_delay has passed without
/// damage. Never while dead, never beyond 100.
pub fn regenerate(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    mut vitals: ResMut<PlayerVitals>,
) {
    let now = time.elapsed_secs();

    let regenerating = vitals.alive
        && vitals.health > 0.0
        && vitals.health < MAX_HEALTH
        && now - vitals.last_damage_at > tunables.regen_delay;

    if !regenerating {
        vitals.regen_accum = 0.0;
        return;
    }

    vitals.regen_accum += time.delta_secs();
    while vitals.regen_accum >= 1.0 {
        vitals.regen_accum -= 1.0;
        vitals.health = (vitals.health + tunables.regen_step).min(MAX_HEALTH);
    }
}

fn request_respawn(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    mut writer: MessageWriter<RespawnRequested>,
) {
    let key = keys.map(|k| k.just_pressed(KeyCode::KeyR)).unwrap_or(false);
    let click = buttons
        .map(|b| b.just_pressed(MouseButton::Left))
        .unwrap_or(false);

    if key || click {
        writer.write(RespawnRequested);
    }
}

/// Re-entering `InGame` rebuilds the arena and the creature (full health) and
/// `reset_vitals` restores the player.
fn handle_respawn(
    mut reader: MessageReader<RespawnRequested>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if reader.read().next().is_some() {
        next_state.set(GameState::InGame);
    }
}

#[cfg(test)]
mod tests;
