//! Visuals plugin (render-only): derive meshes and materials from gameplay
//! facts.
//!
//! Gameplay spawns entities with data components only (`PropVisual`,
//! `Particle`, `Creature`, pooled bullets). This plugin decorates them with
//! meshes once, on insertion, and keeps the creature's skin tint in sync with
//! its flash/stun state. Headless runs never touch any of this.

use bevy::prelude::*;

use crate::plugins::creature::{Creature, CreatureState};
use crate::plugins::effects::Particle;
use crate::plugins::projectiles::components::PooledBullet;
use crate::plugins::props::{PropShape, PropVisual};

/// Handle to the creature's body material so tint updates are straight-line.
#[derive(Component)]
pub struct CreatureSkin(Handle<StandardMaterial>);

pub fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (
            decorate_props,
            decorate_bullets,
            decorate_particles,
            decorate_creature,
            update_creature_skin,
        ),
    );
}

fn mesh_for(shape: PropShape, meshes: &mut Assets<Mesh>) -> Handle<Mesh> {
    match shape {
        PropShape::Cuboid(size) => meshes.add(Cuboid::new(size.x, size.y, size.z)),
        PropShape::Cylinder { radius, height } => meshes.add(Cylinder::new(radius, height)),
        PropShape::Cone { radius, height } => meshes.add(Cone { radius, height }),
        PropShape::Sphere(radius) => meshes.add(Sphere::new(radius)),
    }
}

fn decorate_props(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    q: Query<(Entity, &PropVisual), Added<PropVisual>>,
) {
    for (e, visual) in &q {
        let translucent = visual.color.alpha() < 1.0;
        let material = materials.add(StandardMaterial {
            base_color: visual.color,
            alpha_mode: if translucent {
                AlphaMode::Blend
            } else {
                AlphaMode::Opaque
            },
            metallic: if translucent { 0.9 } else { 0.1 },
            perceptual_roughness: if translucent { 0.1 } else { 0.8 },
            ..default()
        });

        commands
            .entity(e)
            .insert((Mesh3d(mesh_for(visual.shape, &mut meshes)), MeshMaterial3d(material)));
    }
}

fn decorate_bullets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    q: Query<Entity, Added<PooledBullet>>,
) {
    for e in &q {
        let material = materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.9, 0.2),
            emissive: LinearRgba::rgb(1.0, 0.9, 0.2),
            ..default()
        });
        commands
            .entity(e)
            .insert((Mesh3d(meshes.add(Sphere::new(0.1))), MeshMaterial3d(material)));
    }
}

fn decorate_particles(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    q: Query<Entity, Added<Particle>>,
) {
    for e in &q {
        let material = materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.84, 0.0),
            emissive: LinearRgba::rgb(1.0, 0.27, 0.0),
            metallic: 0.6,
            perceptual_roughness: 0.4,
            ..default()
        });
        commands
            .entity(e)
            .insert((Mesh3d(meshes.add(Sphere::new(0.5))), MeshMaterial3d(material)));
    }
}

/// Build the boss model: a big head with a dark maw and tapering tail
/// segments, all sharing one tintable skin material.
fn decorate_creature(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    q: Query<Entity, Added<Creature>>,
) {
    for e in &q {
        let skin = materials.add(StandardMaterial {
            base_color: Color::srgb(0.55, 0.0, 0.0),
            emissive: LinearRgba::rgb(0.11, 0.0, 0.0),
            perceptual_roughness: 0.3,
            ..default()
        });
        let maw = materials.add(StandardMaterial {
            base_color: Color::BLACK,
            perceptual_roughness: 1.0,
            ..default()
        });

        let head = meshes.add(Cuboid::new(4.0, 4.0, 7.0));
        let mouth = meshes.add(Cylinder::new(1.8, 0.5));
        let segment = meshes.add(Cylinder::new(1.6, 2.0));

        commands
            .entity(e)
            .insert(CreatureSkin(skin.clone()))
            .with_children(|parent| {
                parent.spawn((Mesh3d(head), MeshMaterial3d(skin.clone())));
                parent.spawn((
                    Mesh3d(mouth),
                    MeshMaterial3d(maw),
                    Transform::from_xyz(0.0, 0.0, 3.51)
                        .with_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)),
                ));
                for i in 0..6 {
                    let i = i as f32;
                    parent.spawn((
                        Mesh3d(segment.clone()),
                        MeshMaterial3d(skin.clone()),
                        Transform::from_xyz(0.0, -0.3 * i, -3.5 - i * 1.8)
                            .with_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2))
                            .with_scale(Vec3::splat(1.0 - i * 0.1)),
                    ));
                }
            });
    }
}

/// Tint toward a bright hit color while flashing; stunned eyes glow white.
fn update_creature_skin(
    q: Query<(&CreatureState, &CreatureSkin)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (state, skin) in &q {
        let Some(material) = materials.get_mut(&skin.0) else {
            continue;
        };

        let flash = state.flash();
        let base = Vec3::new(0.55, 0.0, 0.0);
        let hit = Vec3::new(1.0, 0.53, 0.53);
        let mixed = base.lerp(hit, flash);
        material.base_color = Color::srgb(mixed.x, mixed.y, mixed.z);

        material.emissive = if state.is_stunned() {
            LinearRgba::rgb(0.5, 0.5, 0.5)
        } else {
            LinearRgba::rgb(0.11 + flash * 0.5, 0.0, 0.0)
        };
    }
}
