//! Return commit: recycle bullets back into the pool.
//!
//! This system is the owner of the *Inactive invariants*:
//! - hidden
//! - velocity = 0, gravity scale = 0
//! - collide with nothing (filters empty)
//!
//! Centralizing these writes here prevents inconsistencies.

use avian3d::prelude::*;
use bevy::prelude::*;

use super::components::{BulletState, PooledBullet};
use super::pool::{inactive_bullet_layers, BulletPool};

pub fn return_to_pool_commit(
    mut pool: ResMut<BulletPool>,
    mut q: Query<
        (
            Entity,
            &mut BulletState,
            &mut Visibility,
            &mut LinearVelocity,
            &mut GravityScale,
            &mut CollisionLayers,
        ),
        With<PooledBullet>,
    >,
) {
    for (e, mut state, mut vis, mut vel, mut gravity, mut layers) in &mut q {
        if *state != BulletState::PendingReturn {
            continue;
        }

        *state = BulletState::Inactive;
        *vis = Visibility::Hidden;
        vel.0 = Vec3::ZERO;
        gravity.0 = 0.0;
        *layers = inactive_bullet_layers();

        pool.free.push(e);
    }
}
