//! Impact reporting for bullets.
//!
//! This system only turns contact-begin events into sound requests. It never
//! applies damage and never recycles bullets; those are owned by the creature
//! controller and the expiry deadline respectively.

use avian3d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use super::components::{BulletState, PooledBullet};
use crate::common::tunables::Tunables;
use crate::plugins::audio::{PlaySound, SoundEffect};

#[derive(Clone, Copy, Debug)]
pub(crate) struct CollisionTarget {
    pub collider: Entity,
    pub body: Option<Entity>,
}

impl CollisionTarget {
    #[inline]
    pub fn gameplay_owner(self) -> Entity {
        self.body.unwrap_or(self.collider)
    }
}

#[inline]
pub(crate) fn targets(ev: &CollisionStart) -> (CollisionTarget, CollisionTarget) {
    (
        CollisionTarget {
            collider: ev.collider1,
            body: ev.body1,
        },
        CollisionTarget {
            collider: ev.collider2,
            body: ev.body2,
        },
    )
}

/// Relative speed of two bodies at contact begin.
///
/// Static/kinematic colliders without a `LinearVelocity` count as at rest.
#[inline]
pub(crate) fn impact_speed(
    q_vel: &Query<&LinearVelocity>,
    a: Entity,
    b: Entity,
) -> f32 {
    let va = q_vel.get(a).map(|v| v.0).unwrap_or(Vec3::ZERO);
    let vb = q_vel.get(b).map(|v| v.0).unwrap_or(Vec3::ZERO);
    (va - vb).length()
}

pub fn report_bullet_impacts(
    tunables: Res<Tunables>,
    mut started: MessageReader<CollisionStart>,
    q_bullets: Query<&BulletState, With<PooledBullet>>,
    q_vel: Query<&LinearVelocity>,
    mut sounds: MessageWriter<PlaySound>,
    // One sound per bullet per tick, even with several simultaneous contacts.
    mut seen: Local<HashSet<Entity>>,
) {
    seen.clear();

    for ev in started.read() {
        let (t1, t2) = targets(ev);

        let b1 = q_bullets.contains(t1.collider);
        let b2 = q_bullets.contains(t2.collider);
        if !(b1 ^ b2) {
            continue; // must be exactly one bullet
        }
        let (bullet_side, other_side) = if b1 { (t1, t2) } else { (t2, t1) };

        let Ok(state) = q_bullets.get(bullet_side.collider) else {
            continue;
        };
        if *state != BulletState::Active {
            continue;
        }

        if !seen.insert(bullet_side.collider) {
            continue;
        }

        let speed = impact_speed(
            &q_vel,
            bullet_side.gameplay_owner(),
            other_side.gameplay_owner(),
        );
        if speed > tunables.bullet_impact_min {
            sounds.write(PlaySound::scaled(SoundEffect::BulletImpact, speed));
        }
    }
}
