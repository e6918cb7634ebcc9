//! Time-boxed bullet lifetime.
//!
//! Bullets never die on impact; each one is marked for return exactly when
//! `now - fired_at >= lifetime`. A bullet fired at t0 is therefore present
//! at every tick with t < t0 + 2.0 and absent from the active set at every
//! tick with t >= t0 + 2.0.

use bevy::prelude::*;

use super::components::{BulletState, FiredAt, PooledBullet};
use crate::common::tunables::Tunables;

pub fn expire_bullets(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    mut q: Query<(&FiredAt, &mut BulletState), With<PooledBullet>>,
) {
    let now = time.elapsed_secs();

    for (fired_at, mut state) in &mut q {
        if *state != BulletState::Active {
            continue;
        }
        if now - fired_at.0 >= tunables.bullet_lifetime {
            *state = BulletState::PendingReturn;
        }
    }
}
