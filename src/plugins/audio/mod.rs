//! Audio contract: fire-and-forget sound requests.
//!
//! Gameplay systems only *emit* `PlaySound` messages; whatever plays them
//! (a synthesizer, a sample bank) is a presentation collaborator. The drain
//! here logs requests at debug level so headless runs stay observable.

use bevy::ecs::message::{MessageReader, Messages};
use bevy::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundEffect {
    PistolShot,
    ShotgunBlast,
    SmgShot,
    BulletImpact,
    PropImpact,
    WoodBreak,
    GlassBreak,
    CreatureHit,
    PlayerDamage,
}

#[derive(Message, Clone, Copy, Debug)]
pub struct PlaySound {
    pub effect: SoundEffect,
    pub intensity: Option<f32>,
}

impl PlaySound {
    pub fn new(effect: SoundEffect) -> Self {
        Self { effect, intensity: None }
    }

    pub fn scaled(effect: SoundEffect, intensity: f32) -> Self {
        Self { effect, intensity: Some(intensity) }
    }
}

/// Maintain the sound request buffer.
///
/// Messages are double-buffered; `update()` advances buffers.
fn update_sound_messages(mut msgs: ResMut<Messages<PlaySound>>) {
    msgs.update();
}

fn drain_sound_requests(mut reader: MessageReader<PlaySound>) {
    for req in reader.read() {
        match req.intensity {
            Some(i) => debug!("sound: {:?} (intensity {i:.2})", req.effect),
            None => debug!("sound: {:?}", req.effect),
        }
    }
}

pub fn plugin(app: &mut App) {
    app.init_resource::<Messages<PlaySound>>();
    app.add_systems(PostUpdate, (drain_sound_requests, update_sound_messages).chain());
}
