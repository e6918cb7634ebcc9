//! World plugin: ground plane and the sandbox prop layout.

use avian3d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState};
use crate::plugins::props;
use crate::plugins::props::{PropShape, PropVisual};

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), (spawn_ground, spawn_props));
}

fn static_world_layers() -> CollisionLayers {
    CollisionLayers::new(
        Layer::World,
        [
            Layer::Player,
            Layer::Creature,
            Layer::Bullet,
            Layer::Prop,
            Layer::Debris,
        ],
    )
}

fn spawn_ground(mut commands: Commands) {
    commands.spawn((
        Name::new("Ground"),
        PropVisual {
            shape: PropShape::Cuboid(Vec3::new(400.0, 0.2, 400.0)),
            color: Color::srgb(0.36, 0.55, 0.27),
        },
        Transform::from_xyz(0.0, -0.1, 0.0),
        Visibility::default(),
        RigidBody::Static,
        Collider::cuboid(400.0, 0.2, 400.0),
        Friction::new(0.1),
        Restitution::new(0.1),
        static_world_layers(),
        DespawnOnExit(GameState::InGame),
    ));
}

fn spawn_concrete_wall(commands: &mut Commands, pos: Vec3, yaw: f32) {
    commands.spawn((
        Name::new("ConcreteWall"),
        PropVisual {
            shape: PropShape::Cuboid(Vec3::new(8.0, 4.0, 1.0)),
            color: Color::srgb(0.58, 0.65, 0.65),
        },
        Transform::from_translation(pos).with_rotation(Quat::from_rotation_y(yaw)),
        Visibility::default(),
        RigidBody::Static,
        Collider::cuboid(8.0, 4.0, 1.0),
        static_world_layers(),
        DespawnOnExit(GameState::InGame),
    ));
}

fn spawn_props(mut commands: Commands) {
    // Crate pile
    props::spawn_box(&mut commands, Vec3::new(5.0, 0.5, 5.0), Color::srgb(0.9, 0.49, 0.13));
    props::spawn_box(&mut commands, Vec3::new(5.0, 1.5, 5.0), Color::srgb(0.9, 0.49, 0.13));
    props::spawn_box(&mut commands, Vec3::new(6.0, 0.5, 5.0), Color::srgb(0.9, 0.49, 0.13));

    // Barrels
    props::spawn_barrel(&mut commands, Vec3::new(-5.0, 1.0, 5.0), Color::srgb(0.18, 0.2, 0.21));
    props::spawn_barrel(&mut commands, Vec3::new(-6.0, 1.0, 6.0), Color::srgb(0.88, 0.44, 0.33));
    props::spawn_barrel(&mut commands, Vec3::new(-4.0, 1.0, 4.0), Color::srgb(0.04, 0.52, 0.89));

    spawn_concrete_wall(&mut commands, Vec3::new(20.0, 2.0, -10.0), -0.5);
    spawn_concrete_wall(&mut commands, Vec3::new(-20.0, 2.0, -15.0), 0.5);

    // Bowling setup
    for (x, z) in [(-1.0, 15.0), (1.0, 15.0), (-0.5, 16.0), (0.5, 16.0), (0.0, 17.0)] {
        props::spawn_cone(&mut commands, Vec3::new(x, 0.75, z), Color::WHITE);
    }
    props::spawn_sphere(&mut commands, Vec3::new(0.0, 2.0, 12.0), Color::srgb(0.17, 0.24, 0.31));

    // Destructible stack
    props::spawn_breakable_crate(&mut commands, Vec3::new(15.0, 0.5, 5.0));
    props::spawn_breakable_crate(&mut commands, Vec3::new(16.1, 0.5, 5.0));
    props::spawn_breakable_crate(&mut commands, Vec3::new(15.5, 1.5, 5.0));
    props::spawn_breakable_crate(&mut commands, Vec3::new(15.5, 2.5, 5.0));

    // Glass walls
    props::spawn_glass_pane(&mut commands, Vec3::new(0.0, 1.0, 25.0), 0.0);
    props::spawn_glass_pane(&mut commands, Vec3::new(5.0, 1.0, 25.0), 0.2);
    props::spawn_glass_pane(&mut commands, Vec3::new(-5.0, 1.0, 25.0), -0.2);
}

#[cfg(test)]
mod tests;
