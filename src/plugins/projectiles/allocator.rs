//! Spawn consumer: activate bullets from the pool.
//!
//! # Fail-fast invariants
//! - The pool free list contains only valid pooled bullet entities.
//! - Therefore, a pooled entity must match the bullet query.
//!
//! If this is violated, we `expect()` and crash loudly. Capacity exhaustion
//! is different: the request is silently dropped.

use avian3d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use super::components::{BulletState, FiredAt, PooledBullet};
use super::messages::SpawnBulletRequest;
use super::pool::{active_bullet_layers, BulletPool};

pub fn allocate_from_pool(
    time: Res<Time<Fixed>>,
    mut pool: ResMut<BulletPool>,
    mut reader: MessageReader<SpawnBulletRequest>,
    mut q: Query<
        (
            &mut BulletState,
            &mut FiredAt,
            &mut Transform,
            &mut LinearVelocity,
            &mut GravityScale,
            &mut Visibility,
            &mut CollisionLayers,
        ),
        With<PooledBullet>,
    >,
) {
    let now = time.elapsed_secs();

    for req in reader.read() {
        let Some(e) = pool.free.pop() else {
            // Capacity decision, not a correctness failure.
            continue;
        };

        let (mut state, mut fired_at, mut tf, mut vel, mut gravity, mut vis, mut layers) =
            q.get_mut(e)
                .expect("BulletPool contained an entity missing pooled bullet components");

        *state = BulletState::Active;
        fired_at.0 = now;
        tf.translation = req.pos;
        vel.0 = req.vel;
        gravity.0 = 1.0;
        *vis = Visibility::Visible;
        *layers = active_bullet_layers();
    }
}
