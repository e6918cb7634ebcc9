use avian3d::prelude::*;
use bevy::prelude::*;

use super::components::{BulletState, FiredAt, PooledBullet};
use crate::common::layers::Layer;

#[derive(Resource, Debug)]
pub struct BulletPool {
    pub free: Vec<Entity>,
    pub capacity: usize,
}

impl BulletPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(capacity),
            capacity,
        }
    }
}

#[inline]
pub fn active_bullet_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Bullet, [Layer::World, Layer::Creature, Layer::Prop])
}

/// "Disabled" without structural changes: empty filters means we collide with nothing.
#[inline]
pub fn inactive_bullet_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::Bullet, [] as [Layer; 0])
}

/// Pre-spawn pooled bullets (inactive).
///
/// Physics components stay present the whole time; only values change on
/// activation. Inactive bullets have empty collision filters (no contacts,
/// no collision events) and zero gravity scale so they hold still while
/// parked.
pub fn init_bullet_pool(mut commands: Commands, mut pool: ResMut<BulletPool>) {
    pool.free.clear();
    let cap = pool.capacity;
    pool.free.reserve(cap);

    let restitution = Restitution::new(0.4).with_combine_rule(CoefficientCombine::Max);

    for _ in 0..cap {
        let e = commands
            .spawn((
                Name::new("Bullet(Pooled)"),
                PooledBullet,
                BulletState::Inactive,
                FiredAt(0.0),
                Transform::from_xyz(0.0, -100.0, 0.0),
                Visibility::Hidden,
                RigidBody::Dynamic,
                Collider::sphere(0.1),
                Mass(0.2),
                inactive_bullet_layers(),
                restitution,
                Friction::ZERO,
                LinearVelocity(Vec3::ZERO),
                GravityScale(0.0),
                // Keep this always; inactive bullets won't collide anyway
                // because filters are empty.
                CollisionEventsEnabled,
            ))
            .id();

        pool.free.push(e);
    }
}
