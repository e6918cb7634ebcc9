//! Camera plugin (render-only): first-person lock + pointer capture.
//!
//! Gameplay owns the look angles and the player position slot; this plugin
//! only projects them onto the `Camera3d` transform after the simulation has
//! run. Pointer capture is requested on click while alive and released
//! automatically on death.

use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

use crate::common::{state::GameState, tunables::Tunables};
use crate::plugins::player::{LookAngles, PlayerPositionSlot};

#[derive(Component)]
pub struct MainCamera;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_camera)
        .add_systems(
            PostUpdate,
            sync_camera
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(Update, grab_pointer.run_if(in_state(GameState::InGame)))
        .add_systems(OnEnter(GameState::Dead), release_pointer);
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("MainCamera"),
        MainCamera,
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: 75_f32.to_radians(),
            ..default()
        }),
        Transform::from_xyz(0.0, 5.0, 10.0),
    ));
}

/// First-person lock: eye position is always the player's physics position
/// plus a fixed offset, orientation comes straight from the look angles.
fn sync_camera(
    tunables: Res<Tunables>,
    slot: Res<PlayerPositionSlot>,
    look: Res<LookAngles>,
    mut q_cam: Query<&mut Transform, With<MainCamera>>,
) {
    let Ok(mut tf) = q_cam.single_mut() else {
        return;
    };

    tf.translation = slot.0 + Vec3::Y * tunables.eye_height;
    tf.rotation = Quat::from_euler(EulerRot::YXZ, look.yaw, look.pitch, 0.0);
}

fn grab_pointer(
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    mut q_cursor: Query<&mut CursorOptions, With<PrimaryWindow>>,
) {
    let Some(buttons) = buttons else { return };
    if !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(mut cursor) = q_cursor.single_mut() else {
        return;
    };

    cursor.grab_mode = CursorGrabMode::Locked;
    cursor.visible = false;
}

fn release_pointer(mut q_cursor: Query<&mut CursorOptions, With<PrimaryWindow>>) {
    let Ok(mut cursor) = q_cursor.single_mut() else {
        return;
    };

    cursor.grab_mode = CursorGrabMode::None;
    cursor.visible = true;
}
