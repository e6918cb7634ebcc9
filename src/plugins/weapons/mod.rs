//! Weapon model: per-weapon cadence, pellet count, spread, muzzle kinematics.
//!
//! The fire path is a producer only: it converts a held `fire` intent into
//! zero or more `SpawnBulletRequest` messages plus exactly one sound request
//! per fire event. Pool allocation happens downstream in the projectiles
//! plugin.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use rand::Rng;

use crate::common::{state::GameState, tunables::Tunables};
use crate::plugins::audio::{PlaySound, SoundEffect};
use crate::plugins::core::GameRng;
use crate::plugins::player::{LookAngles, PlayerInput, PlayerPositionSlot};
use crate::plugins::projectiles::messages::SpawnBulletRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeaponKind {
    #[default]
    Pistol,
    Shotgun,
    Smg,
}

#[derive(Debug, Clone, Copy)]
pub struct WeaponConfig {
    /// Minimum seconds between fire events.
    pub fire_interval: f32,
    pub pellets: u32,
    /// Per-axis aim offset magnitude; each pellet is jittered in
    /// [-spread/2, +spread/2] per axis and renormalized.
    pub spread: f32,
    pub muzzle_speed: f32,
    pub sound: SoundEffect,
}

impl WeaponKind {
    pub const fn config(self) -> WeaponConfig {
        match self {
            WeaponKind::Pistol => WeaponConfig {
                fire_interval: 0.25,
                pellets: 1,
                spread: 0.0,
                muzzle_speed: 40.0,
                sound: SoundEffect::PistolShot,
            },
            WeaponKind::Shotgun => WeaponConfig {
                fire_interval: 0.8,
                pellets: 6,
                spread: 0.15,
                muzzle_speed: 40.0,
                sound: SoundEffect::ShotgunBlast,
            },
            WeaponKind::Smg => WeaponConfig {
                fire_interval: 0.1,
                pellets: 1,
                spread: 0.05,
                muzzle_speed: 40.0,
                sound: SoundEffect::SmgShot,
            },
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            WeaponKind::Pistol => "GRAVITY PISTOL",
            WeaponKind::Shotgun => "SCATTER BLASTER",
            WeaponKind::Smg => "RAPID REPEATER",
        }
    }
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct Arsenal {
    pub equipped: WeaponKind,
    pub last_fired_at: f32,
}

impl Default for Arsenal {
    fn default() -> Self {
        Self {
            equipped: WeaponKind::Pistol,
            // Never fired: the first fire event passes the cadence gate at t=0.
            last_fired_at: f32::NEG_INFINITY,
        }
    }
}

pub fn plugin(app: &mut App) {
    app.insert_resource(Arsenal::default())
        .add_systems(Update, select_weapon.run_if(in_state(GameState::InGame)))
        .add_systems(
            FixedUpdate,
            fire_weapon
                .after(crate::plugins::player::publish_position)
                .run_if(in_state(GameState::InGame)),
        );
}

fn select_weapon(keys: Option<Res<ButtonInput<KeyCode>>>, mut arsenal: ResMut<Arsenal>) {
    let Some(keys) = keys else { return };

    if keys.just_pressed(KeyCode::Digit1) {
        arsenal.equipped = WeaponKind::Pistol;
    }
    if keys.just_pressed(KeyCode::Digit2) {
        arsenal.equipped = WeaponKind::Shotgun;
    }
    if keys.just_pressed(KeyCode::Digit3) {
        arsenal.equipped = WeaponKind::Smg;
    }
}

/// Cadence-gated auto fire.
///
/// A held intent refires once per interval, never faster; an intent arriving
/// before the interval elapses is dropped, not queued. Each fire event emits
/// `pellets` spawn requests and one sound request.
pub fn fire_weapon(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    look: Res<LookAngles>,
    slot: Res<PlayerPositionSlot>,
    mut arsenal: ResMut<Arsenal>,
    mut rng: ResMut<GameRng>,
    mut bullets: MessageWriter<SpawnBulletRequest>,
    mut sounds: MessageWriter<PlaySound>,
) {
    if !input.fire {
        return;
    }

    let config = arsenal.equipped.config();
    let now = time.elapsed_secs();
    if now - arsenal.last_fired_at < config.fire_interval {
        return;
    }
    arsenal.last_fired_at = now;

    // One report per trigger pull, not per pellet.
    sounds.write(PlaySound::new(config.sound));

    let forward = look.forward();
    let origin =
        slot.0 + Vec3::Y * tunables.eye_height + forward * tunables.muzzle_offset;

    for _ in 0..config.pellets {
        let jitter = Vec3::new(
            rng.0.gen_range(-0.5..0.5) * config.spread,
            rng.0.gen_range(-0.5..0.5) * config.spread,
            rng.0.gen_range(-0.5..0.5) * config.spread,
        );
        let dir = (forward + jitter).normalize_or_zero();

        bullets.write(SpawnBulletRequest {
            pos: origin,
            vel: dir * config.muzzle_speed,
        });
    }
}

#[cfg(test)]
mod tests;
