//! Buffered spawn requests.
//!
//! Producers (the weapon model) create *intent*; the allocator applies it
//! (pool pop + component writes). Keeping the queue between them means the
//! weapon never borrows the pool.

use bevy::prelude::*;

#[derive(Message, Clone, Copy, Debug)]
pub struct SpawnBulletRequest {
    pub pos: Vec3,
    pub vel: Vec3,
}
