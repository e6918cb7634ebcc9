//! Projectiles plugin: message-based producer → consumer spawning over a
//! fixed-capacity pool.
//!
//! # Data flow
//! ```text
//! FixedUpdate
//!   weapons::fire_weapon            (producer: SpawnBulletRequest messages)
//!   allocator::allocate_from_pool   (consumer: pool pop + component writes)
//!   expiry::expire_bullets          (deadline check: 2 s after firing)
//!
//! FixedPostUpdate
//!   avian emits CollisionStart messages
//!   collision::report_bullet_impacts (impact sounds only; no damage here)
//!   commit::return_to_pool_commit    (recycle PendingReturn bullets)
//! ```
//!
//! Bullets are time-boxed, not collision-terminated: an impact never returns
//! a bullet to the pool, only its 2-second deadline does. Damage is likewise
//! not applied here; the creature's own collision handler owns that.
//!
//! Producers do not borrow the pool. The allocator is the single writer that
//! mutates the free list, and the commit system is the single owner of the
//! Inactive-state invariants (hidden, zero velocity, empty collision filters,
//! zero gravity). A request that finds the pool empty is dropped: a capacity
//! decision, not an error.

pub mod allocator;
pub mod collision;
pub mod commit;
pub mod components;
pub mod expiry;
pub mod messages;
pub mod pool;

use avian3d::collision::narrow_phase::CollisionEventSystems;
use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::common::state::GameState;

pub struct ProjectilesPlugin;

/// Maintain spawn request message buffers.
///
/// Messages are double-buffered; `update()` advances buffers.
fn update_spawn_messages(mut msgs: ResMut<Messages<messages::SpawnBulletRequest>>) {
    msgs.update();
}

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(pool::BulletPool::new(128))
            .add_systems(Startup, pool::init_bullet_pool);

        app.init_resource::<Messages<messages::SpawnBulletRequest>>();
        app.add_systems(PostUpdate, update_spawn_messages);

        app.add_systems(
            FixedUpdate,
            allocator::allocate_from_pool
                .after(crate::plugins::weapons::fire_weapon)
                .run_if(in_state(GameState::InGame)),
        );

        // Expiry runs in every state so in-flight bullets still time out
        // while the death screen is up.
        app.add_systems(FixedUpdate, expiry::expire_bullets);

        app.add_systems(
            FixedPostUpdate,
            (
                collision::report_bullet_impacts.after(CollisionEventSystems),
                commit::return_to_pool_commit.after(collision::report_bullet_impacts),
            ),
        );
    }
}
