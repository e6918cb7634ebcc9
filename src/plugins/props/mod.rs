//! Props plugin: dynamic sandbox bodies, destructible objects, debris.
//!
//! Gameplay owns the facts (shape, break state, physics); rendering derives
//! meshes from `PropVisual` elsewhere. Destruction is a one-way transition:
//! the first qualifying impact flips `BreakState` to `Shattered`, spawns a
//! fixed number of debris bodies and marks the intact body for removal.
//! Later collision events find either `Shattered` or no entity at all, so a
//! broken object can never burst twice.

use avian3d::collision::narrow_phase::CollisionEventSystems;
use avian3d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use rand::Rng;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::audio::{PlaySound, SoundEffect};
use crate::plugins::core::GameRng;
use crate::plugins::effects::ParticleBurst;
use crate::plugins::projectiles::collision::{impact_speed, targets};

const DEBRIS_TTL_SECS: f32 = 10.0;

// -----------------------------------------------------------------------------
// Components
// -----------------------------------------------------------------------------

/// Marker for non-breakable sandbox bodies that report impact sounds.
#[derive(Component, Debug, Clone, Copy)]
pub struct Prop;

/// Shape + color facts the render layer turns into meshes.
#[derive(Component, Debug, Clone, Copy)]
pub struct PropVisual {
    pub shape: PropShape,
    pub color: Color,
}

#[derive(Debug, Clone, Copy)]
pub enum PropShape {
    Cuboid(Vec3),
    Cylinder { radius: f32, height: f32 },
    Cone { radius: f32, height: f32 },
    Sphere(f32),
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakableKind {
    Crate,
    GlassPane,
}

impl BreakableKind {
    /// Impact speed above which the object shatters.
    pub fn break_threshold(self) -> f32 {
        match self {
            BreakableKind::Crate => 8.0,
            BreakableKind::GlassPane => 5.0,
        }
    }

    pub fn debris_count(self) -> usize {
        match self {
            BreakableKind::Crate => 8,
            BreakableKind::GlassPane => 6,
        }
    }

    fn break_sound(self) -> SoundEffect {
        match self {
            BreakableKind::Crate => SoundEffect::WoodBreak,
            BreakableKind::GlassPane => SoundEffect::GlassBreak,
        }
    }
}

/// One-way break flag; `Shattered` entities are already queued for removal.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakState {
    Intact,
    Shattered,
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Debris;

/// Debris is fully physics-driven; this sweep is the only management it gets.
#[derive(Component, Deref, DerefMut)]
pub struct DebrisTtl(pub Timer);

/// Marker: entity should be removed from the world.
///
/// We don't despawn inside the fixed step; we mark and despawn in PostUpdate
/// so physics and queued systems never race a vanishing entity.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;

// -----------------------------------------------------------------------------
// Spawn helpers (used by the world plugin's layout)
// -----------------------------------------------------------------------------

fn prop_layers() -> CollisionLayers {
    CollisionLayers::new(
        Layer::Prop,
        [
            Layer::World,
            Layer::Player,
            Layer::Bullet,
            Layer::Prop,
            Layer::Debris,
        ],
    )
}

pub fn spawn_box(commands: &mut Commands, pos: Vec3, color: Color) {
    commands.spawn((
        Name::new("PhysicsBox"),
        Prop,
        PropVisual {
            shape: PropShape::Cuboid(Vec3::ONE),
            color,
        },
        Transform::from_translation(pos),
        Visibility::default(),
        RigidBody::Dynamic,
        Collider::cuboid(1.0, 1.0, 1.0),
        Mass(1.0),
        prop_layers(),
        CollisionEventsEnabled,
        DespawnOnExit(GameState::InGame),
    ));
}

pub fn spawn_barrel(commands: &mut Commands, pos: Vec3, color: Color) {
    commands.spawn((
        Name::new("PhysicsBarrel"),
        Prop,
        PropVisual {
            shape: PropShape::Cylinder {
                radius: 0.5,
                height: 1.5,
            },
            color,
        },
        Transform::from_translation(pos),
        Visibility::default(),
        RigidBody::Dynamic,
        Collider::cylinder(0.5, 1.5),
        Mass(5.0),
        prop_layers(),
        CollisionEventsEnabled,
        DespawnOnExit(GameState::InGame),
    ));
}

pub fn spawn_sphere(commands: &mut Commands, pos: Vec3, color: Color) {
    commands.spawn((
        Name::new("PhysicsSphere"),
        Prop,
        PropVisual {
            shape: PropShape::Sphere(0.5),
            color,
        },
        Transform::from_translation(pos),
        Visibility::default(),
        RigidBody::Dynamic,
        Collider::sphere(0.5),
        Mass(2.0),
        prop_layers(),
        CollisionEventsEnabled,
        DespawnOnExit(GameState::InGame),
    ));
}

pub fn spawn_cone(commands: &mut Commands, pos: Vec3, color: Color) {
    commands.spawn((
        Name::new("PhysicsCone"),
        Prop,
        PropVisual {
            shape: PropShape::Cone {
                radius: 0.5,
                height: 1.5,
            },
            color,
        },
        Transform::from_translation(pos),
        Visibility::default(),
        RigidBody::Dynamic,
        Collider::cone(0.5, 1.5),
        Mass(1.0),
        prop_layers(),
        CollisionEventsEnabled,
        DespawnOnExit(GameState::InGame),
    ));
}

pub fn spawn_breakable_crate(commands: &mut Commands, pos: Vec3) {
    commands.spawn((
        Name::new("BreakableCrate"),
        BreakableKind::Crate,
        BreakState::Intact,
        PropVisual {
            shape: PropShape::Cuboid(Vec3::ONE),
            color: Color::srgb(0.55, 0.27, 0.07),
        },
        Transform::from_translation(pos),
        Visibility::default(),
        RigidBody::Dynamic,
        Collider::cuboid(1.0, 1.0, 1.0),
        Mass(1.0),
        prop_layers(),
        CollisionEventsEnabled,
        DespawnOnExit(GameState::InGame),
    ));
}

pub fn spawn_glass_pane(commands: &mut Commands, pos: Vec3, yaw: f32) {
    commands.spawn((
        Name::new("BreakableGlassPane"),
        BreakableKind::GlassPane,
        BreakState::Intact,
        PropVisual {
            shape: PropShape::Cuboid(Vec3::new(4.0, 2.0, 0.1)),
            color: Color::srgba(0.66, 0.85, 0.92, 0.3),
        },
        Transform::from_translation(pos).with_rotation(Quat::from_rotation_y(yaw)),
        Visibility::default(),
        RigidBody::Dynamic,
        Collider::cuboid(4.0, 2.0, 0.1),
        Mass(10.0),
        prop_layers(),
        CollisionEventsEnabled,
        DespawnOnExit(GameState::InGame),
    ));
}

// -----------------------------------------------------------------------------
// Plugin wiring
// -----------------------------------------------------------------------------

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedPostUpdate,
        process_prop_impacts
            .after(CollisionEventSystems)
            .run_if(in_state(GameState::InGame)),
    );
    app.add_systems(FixedUpdate, debris_ttl);
    app.add_systems(PostUpdate, despawn_marked);
}

// -----------------------------------------------------------------------------
// Impact handling
// -----------------------------------------------------------------------------

/// Drain this tick's contact-begin events for props and destructibles.
///
/// Breakage wins over the generic impact sound; impacts slower than the
/// audible minimum are ignored entirely.
pub fn process_prop_impacts(
    tunables: Res<Tunables>,
    mut commands: Commands,
    mut started: MessageReader<CollisionStart>,
    mut rng: ResMut<GameRng>,
    q_vel: Query<&LinearVelocity>,
    q_props: Query<(), With<Prop>>,
    mut q_breakables: Query<(&BreakableKind, &mut BreakState, &Transform)>,
    mut bursts: MessageWriter<ParticleBurst>,
    mut sounds: MessageWriter<PlaySound>,
) {
    for ev in started.read() {
        let (t1, t2) = targets(ev);
        let speed = impact_speed(&q_vel, t1.gameplay_owner(), t2.gameplay_owner());

        for side in [t1, t2] {
            let owner = side.gameplay_owner();

            if let Ok((kind, mut break_state, tf)) = q_breakables.get_mut(owner) {
                // Already shattered and waiting for the sweep: nothing to do.
                if *break_state != BreakState::Intact {
                    continue;
                }
                if speed > kind.break_threshold() {
                    *break_state = BreakState::Shattered;
                    commands.entity(owner).insert(PendingDespawn);

                    sounds.write(PlaySound::new(kind.break_sound()));
                    bursts.write(ParticleBurst {
                        origin: tf.translation,
                        count: 6,
                    });
                    spawn_debris(&mut commands, &mut rng, *kind, tf);
                } else if speed > tunables.min_audible_impact {
                    sounds.write(PlaySound::scaled(SoundEffect::PropImpact, speed));
                }
                continue;
            }

            if q_props.contains(owner) && speed > tunables.min_audible_impact {
                sounds.write(PlaySound::scaled(SoundEffect::PropImpact, speed));
            }
        }
    }
}

/// Fragment layout per type: crates burst into eight corner chunks, panes
/// scatter shards across their local plane.
fn spawn_debris(commands: &mut Commands, rng: &mut GameRng, kind: BreakableKind, tf: &Transform) {
    match kind {
        BreakableKind::Crate => {
            for ix in [-0.25f32, 0.25] {
                for iy in [-0.25f32, 0.25] {
                    for iz in [-0.25f32, 0.25] {
                        let vel = Vec3::new(
                            rng.0.gen_range(-2.5..2.5),
                            rng.0.gen_range(0.0..5.0),
                            rng.0.gen_range(-2.5..2.5),
                        );
                        spawn_fragment(
                            commands,
                            tf.translation + Vec3::new(ix, iy, iz),
                            vel,
                            0.45,
                            Color::srgb(0.55, 0.27, 0.07),
                        );
                    }
                }
            }
        }
        BreakableKind::GlassPane => {
            for _ in 0..kind.debris_count() {
                let local = Vec3::new(
                    rng.0.gen_range(-1.5..1.5),
                    rng.0.gen_range(-0.75..0.75),
                    0.0,
                );
                let vel = Vec3::new(
                    rng.0.gen_range(-1.5..1.5),
                    rng.0.gen_range(0.5..2.0),
                    rng.0.gen_range(-1.5..1.5),
                );
                spawn_fragment(
                    commands,
                    tf.translation + tf.rotation * local,
                    vel,
                    0.4,
                    Color::srgba(0.66, 0.85, 0.92, 0.4),
                );
            }
        }
    }
}

fn spawn_fragment(commands: &mut Commands, pos: Vec3, vel: Vec3, size: f32, color: Color) {
    commands.spawn((
        Name::new("Debris"),
        Debris,
        DebrisTtl(Timer::from_seconds(DEBRIS_TTL_SECS, TimerMode::Once)),
        PropVisual {
            shape: PropShape::Cuboid(Vec3::splat(size)),
            color,
        },
        Transform::from_translation(pos),
        Visibility::default(),
        RigidBody::Dynamic,
        Collider::cuboid(size, size, size),
        Mass(0.1),
        LinearDamping(0.1),
        AngularDamping(0.1),
        CollisionLayers::new(
            Layer::Debris,
            [Layer::World, Layer::Prop, Layer::Debris, Layer::Player],
        ),
        LinearVelocity(vel),
        DespawnOnExit(GameState::InGame),
    ));
}

// -----------------------------------------------------------------------------
// Cleanup
// -----------------------------------------------------------------------------

fn debris_ttl(
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut q: Query<(Entity, &mut DebrisTtl), Without<PendingDespawn>>,
) {
    for (e, mut ttl) in &mut q {
        ttl.tick(time.delta());
        if ttl.is_finished() {
            commands.entity(e).insert(PendingDespawn);
        }
    }
}

/// Centralized structural cleanup, outside the fixed step.
fn despawn_marked(mut commands: Commands, q: Query<Entity, With<PendingDespawn>>) {
    for e in &q {
        commands.entity(e).despawn();
    }
}
