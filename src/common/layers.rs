use avian3d::prelude::*;

/// Collision layers.
///
/// Membership/filter pairs are assigned at spawn; pooled bullets toggle
/// between "active" and "collide with nothing" filter sets instead of being
/// despawned.
#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    World,
    Player,
    Creature,
    Bullet,
    Prop,
    Debris,
}
