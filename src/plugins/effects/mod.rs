//! Particle pool: a fixed-capacity, recyclable burst emitter shared by hit
//! and break effects.
//!
//! Thirty slot entities are pre-spawned once and never despawned. A burst
//! request scans for dead slots (life <= 0) and reinitializes up to `count`
//! of them; when fewer are free, the burst silently spawns fewer. Live slots
//! fall under a fixed downward acceleration, shrink linearly with remaining
//! life, and become reusable the moment life reaches zero.

use bevy::ecs::message::{MessageReader, Messages};
use bevy::prelude::*;
use rand::Rng;

use crate::plugins::core::GameRng;

pub const PARTICLE_CAPACITY: usize = 30;

/// Life decays at this rate, so a full burst lives ~0.66 s.
const LIFE_DECAY_PER_SEC: f32 = 1.5;
const PARTICLE_GRAVITY: f32 = 20.0;
const MAX_SCALE: f32 = 0.4;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Particle {
    pub velocity: Vec3,
    /// Remaining life in [0..1]; the slot is dead (and reusable) at <= 0.
    pub life: f32,
}

#[derive(Message, Clone, Copy, Debug)]
pub struct ParticleBurst {
    pub origin: Vec3,
    pub count: u32,
}

fn update_burst_messages(mut msgs: ResMut<Messages<ParticleBurst>>) {
    msgs.update();
}

pub fn plugin(app: &mut App) {
    app.init_resource::<Messages<ParticleBurst>>();
    app.add_systems(PostUpdate, update_burst_messages);

    app.add_systems(Startup, init_particle_pool);
    app.add_systems(
        FixedUpdate,
        (spawn_bursts, tick_particles)
            .chain()
            .after(crate::plugins::creature::think),
    );
}

pub fn init_particle_pool(mut commands: Commands) {
    for _ in 0..PARTICLE_CAPACITY {
        commands.spawn((
            Name::new("Particle(Pooled)"),
            Particle::default(),
            Transform::from_xyz(0.0, -100.0, 0.0).with_scale(Vec3::ZERO),
            Visibility::Hidden,
        ));
    }
}

pub fn spawn_bursts(
    mut reader: MessageReader<ParticleBurst>,
    mut rng: ResMut<GameRng>,
    mut q: Query<(&mut Particle, &mut Transform, &mut Visibility)>,
) {
    for burst in reader.read() {
        let mut remaining = burst.count;

        for (mut particle, mut tf, mut vis) in &mut q {
            if remaining == 0 {
                break;
            }
            if particle.life > 0.0 {
                continue;
            }

            particle.life = 1.0;
            particle.velocity = Vec3::new(
                rng.0.gen_range(-5.0..5.0),
                rng.0.gen_range(2.0..7.0),
                rng.0.gen_range(-5.0..5.0),
            );

            tf.translation = burst.origin
                + Vec3::new(
                    rng.0.gen_range(-0.5..0.5),
                    rng.0.gen_range(-0.5..0.5),
                    rng.0.gen_range(-0.25..0.25),
                );
            tf.scale = Vec3::splat(MAX_SCALE);
            *vis = Visibility::Visible;

            remaining -= 1;
        }
        // Exhausted pool: the rest of the request is dropped by design.
    }
}

pub fn tick_particles(
    time: Res<Time<Fixed>>,
    mut q: Query<(&mut Particle, &mut Transform, &mut Visibility)>,
) {
    let dt = time.delta_secs();

    for (mut particle, mut tf, mut vis) in &mut q {
        if particle.life <= 0.0 {
            continue;
        }

        particle.life -= LIFE_DECAY_PER_SEC * dt;
        particle.velocity.y -= PARTICLE_GRAVITY * dt;
        let step = particle.velocity * dt;
        tf.translation += step;

        if particle.life <= 0.0 {
            particle.life = 0.0;
            tf.scale = Vec3::ZERO;
            *vis = Visibility::Hidden;
        } else {
            tf.scale = Vec3::splat(particle.life * MAX_SCALE);
        }
    }
}
