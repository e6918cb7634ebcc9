//! HUD plugin (render-only): pure projection of core state.
//!
//! Reads `PlayerVitals`, the creature's `Health` and the equipped weapon;
//! never writes anything back. The death screen is its own state-scoped tree.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::plugins::creature::{Creature, Health};
use crate::plugins::session::{PlayerVitals, MAX_HEALTH};
use crate::plugins::weapons::Arsenal;

#[derive(Component)]
struct BossBarFill;

#[derive(Component)]
struct PlayerHealthText;

#[derive(Component)]
struct WeaponText;

#[derive(Component)]
struct DamageVignette;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnEnter(GameState::Dead), spawn_death_screen)
        .add_systems(
            Update,
            (update_boss_bar, update_player_health, update_weapon, update_vignette)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_hud(mut commands: Commands) {
    // Red vignette that thickens as health drops.
    commands.spawn((
        Name::new("DamageVignette"),
        DamageVignette,
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(Color::srgba(1.0, 0.0, 0.0, 0.0)),
        DespawnOnExit(GameState::InGame),
    ));

    // Boss bar, top center.
    commands
        .spawn((
            Name::new("BossBar"),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(24.0),
                left: Val::Percent(25.0),
                width: Val::Percent(50.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                padding: UiRect::all(Val::Px(8.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
            DespawnOnExit(GameState::InGame),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("TRAIN EATER"),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::srgb(0.94, 0.27, 0.27)),
            ));
            parent
                .spawn((
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(16.0),
                        margin: UiRect::top(Val::Px(6.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.12, 0.12, 0.14)),
                ))
                .with_children(|bar| {
                    bar.spawn((
                        BossBarFill,
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(Color::srgb(0.86, 0.15, 0.15)),
                    ));
                });
        });

    // Player health, bottom left.
    commands.spawn((
        Name::new("PlayerHealth"),
        PlayerHealthText,
        Text::new("100.00"),
        TextFont {
            font_size: 36.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(24.0),
            left: Val::Px(24.0),
            ..default()
        },
        DespawnOnExit(GameState::InGame),
    ));

    // Equipped weapon, top right.
    commands.spawn((
        Name::new("WeaponLabel"),
        WeaponText,
        Text::new(""),
        TextFont {
            font_size: 24.0,
            ..default()
        },
        TextColor(Color::srgb(0.98, 0.83, 0.25)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(96.0),
            right: Val::Px(24.0),
            ..default()
        },
        DespawnOnExit(GameState::InGame),
    ));

    // Crosshair.
    commands.spawn((
        Name::new("Crosshair"),
        Text::new("+"),
        TextFont {
            font_size: 28.0,
            ..default()
        },
        TextColor(Color::srgba(1.0, 1.0, 1.0, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Percent(49.0),
            left: Val::Percent(49.6),
            ..default()
        },
        DespawnOnExit(GameState::InGame),
    ));
}

fn spawn_death_screen(mut commands: Commands) {
    commands
        .spawn((
            Name::new("DeathScreen"),
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                row_gap: Val::Px(16.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.8)),
            DespawnOnExit(GameState::Dead),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("YOU DIED"),
                TextFont {
                    font_size: 96.0,
                    ..default()
                },
                TextColor(Color::srgb(0.86, 0.08, 0.08)),
            ));
            parent.spawn((
                Text::new("The ecosystem has claimed you."),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.6, 0.6, 0.6)),
            ));
            parent.spawn((
                Text::new("PRESS R OR CLICK TO RESPAWN"),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

fn update_boss_bar(
    q_creature: Query<&Health, With<Creature>>,
    mut q_fill: Query<&mut Node, With<BossBarFill>>,
) {
    let Ok(health) = q_creature.single() else {
        return;
    };
    let Ok(mut node) = q_fill.single_mut() else {
        return;
    };
    node.width = Val::Percent(health.hp.clamp(0.0, MAX_HEALTH));
}

fn update_player_health(
    vitals: Res<PlayerVitals>,
    mut q: Query<&mut Text, With<PlayerHealthText>>,
) {
    let Ok(mut text) = q.single_mut() else {
        return;
    };
    text.0 = format!("{:.2}", vitals.health);
}

fn update_weapon(arsenal: Res<Arsenal>, mut q: Query<&mut Text, With<WeaponText>>) {
    let Ok(mut text) = q.single_mut() else {
        return;
    };
    text.0 = format!("[1][2][3]  {}", arsenal.equipped.display_name());
}

fn update_vignette(
    vitals: Res<PlayerVitals>,
    mut q: Query<&mut BackgroundColor, With<DamageVignette>>,
) {
    let Ok(mut bg) = q.single_mut() else {
        return;
    };
    let missing = (MAX_HEALTH - vitals.health) / MAX_HEALTH;
    bg.0 = Color::srgba(1.0, 0.0, 0.0, missing * 0.35);
}
