//! Player plugin: first-person locomotion.
//!
//! Pipeline:
//! - Update: sample input intents + mouse look into resources
//! - FixedUpdate: apply velocity to the dynamic rigid body, then publish the
//!   player's position into a shared read slot
//!
//! The position slot is the one producer/many consumers hand-off the creature
//! AI targets: locomotion writes it once per fixed tick, everything else only
//! reads it later in the same tick.

use avian3d::prelude::*;
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};

#[derive(Component)]
pub struct Player;

/// Named boolean intents, sampled once per frame.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct PlayerInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub run: bool,
    pub fire: bool,
}

/// Camera orientation owned by gameplay so aiming works headless.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct LookAngles {
    pub yaw: f32,
    pub pitch: f32,
}

impl LookAngles {
    /// World-space aim direction (unit length).
    pub fn forward(&self) -> Vec3 {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0) * Vec3::NEG_Z
    }
}

/// Read-only snapshot of the player's position, refreshed each fixed tick.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct PlayerPositionSlot(pub Vec3);

pub fn plugin(app: &mut App) {
    app.insert_resource(PlayerInput::default())
        .insert_resource(LookAngles::default())
        .insert_resource(PlayerPositionSlot::default())
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(OnExit(GameState::InGame), reset_input)
        .add_systems(
            Update,
            (gather_input, update_look).run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedUpdate,
            (apply_movement, publish_position)
                .chain()
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn(mut commands: Commands) {
    let layers = CollisionLayers::new(
        Layer::Player,
        [Layer::World, Layer::Creature, Layer::Prop, Layer::Debris],
    );

    commands.spawn((
        Name::new("Player"),
        Player,
        Transform::from_xyz(0.0, 2.0, 10.0),
        RigidBody::Dynamic,
        Collider::sphere(0.5),
        // Prevent the capsule-less player ball from rolling away.
        LockedAxes::ROTATION_LOCKED,
        LinearDamping(0.1),
        layers,
        LinearVelocity::ZERO,
        DespawnOnExit(GameState::InGame),
    ));
}

fn gather_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    mut input: ResMut<PlayerInput>,
) {
    let Some(keys) = keys else { return };

    input.forward = keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp);
    input.backward = keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown);
    input.left = keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft);
    input.right = keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight);
    input.jump = keys.pressed(KeyCode::Space);
    input.run = keys.pressed(KeyCode::ShiftLeft) || keys.pressed(KeyCode::ShiftRight);

    input.fire = buttons
        .map(|b| b.pressed(MouseButton::Left))
        .unwrap_or(false)
        || keys.pressed(KeyCode::KeyE);
}

fn update_look(
    tunables: Res<Tunables>,
    motion: Option<Res<AccumulatedMouseMotion>>,
    mut look: ResMut<LookAngles>,
) {
    let Some(motion) = motion else { return };
    if motion.delta == Vec2::ZERO {
        return;
    }

    look.yaw -= motion.delta.x * tunables.mouse_sensitivity;
    look.pitch = (look.pitch - motion.delta.y * tunables.mouse_sensitivity)
        .clamp(-1.54, 1.54);
}

/// Stale intents must not leak into the next life.
fn reset_input(mut input: ResMut<PlayerInput>) {
    *input = PlayerInput::default();
}

/// Translate intents + camera yaw into a target horizontal velocity.
///
/// Vertical velocity passes through from physics, except that a jump intent
/// while roughly grounded (near-zero vertical speed) replaces it with a fixed
/// impulse. A zero-length intent normalizes to zero, not NaN.
pub fn apply_movement(
    tunables: Res<Tunables>,
    input: Res<PlayerInput>,
    look: Res<LookAngles>,
    mut q_player: Query<&mut LinearVelocity, With<Player>>,
) {
    let Ok(mut vel) = q_player.single_mut() else {
        return;
    };

    let axis = Vec3::new(
        (input.right as i32 - input.left as i32) as f32,
        0.0,
        (input.backward as i32 - input.forward as i32) as f32,
    );
    let speed = if input.run {
        tunables.run_speed
    } else {
        tunables.walk_speed
    };

    // Movement follows yaw only; pitch never tilts the walk direction.
    let horizontal = Quat::from_rotation_y(look.yaw) * axis.normalize_or_zero() * speed;
    vel.0.x = horizontal.x;
    vel.0.z = horizontal.z;

    if input.jump && vel.0.y.abs() < tunables.grounded_epsilon {
        vel.0.y = tunables.jump_impulse;
    }
}

pub fn publish_position(
    q_player: Query<&Transform, With<Player>>,
    mut slot: ResMut<PlayerPositionSlot>,
) {
    let Ok(tf) = q_player.single() else {
        return;
    };
    slot.0 = tf.translation;
}
