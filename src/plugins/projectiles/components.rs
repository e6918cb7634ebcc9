use bevy::prelude::*;

#[derive(Component)]
pub struct PooledBullet;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulletState {
    #[default]
    Inactive,
    Active,
    PendingReturn,
}

/// Fixed-time timestamp of the fire event, in seconds.
///
/// Expiry is a polled deadline check against this value, never a scheduled
/// callback, so a fixed sequence of ticks always expires a bullet on the
/// same tick.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct FiredAt(pub f32);
