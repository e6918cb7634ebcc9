//! Creature plugin: the boss ("train eater") behavior controller.
//!
//! The creature's pose is owned by this controller, not by force integration:
//! the physics body is kinematic and mirrors the AI-integrated position every
//! fixed tick. The body exists so bullets have a hitbox to strike.
//!
//! Per-tick evaluation order (highest priority first):
//! 1. health <= 0 -> dead: forced off-field pose, everything below skipped.
//! 2. health dropped since the last tick (any external source) -> hit
//!    reaction bundle (flash, particle burst, hop recoil, brief stun, sound).
//! 3. stun countdown; while stunned only a small positional/rotational jitter
//!    plays, no chasing or attacking.
//! 4. not stunned: attack when the target is inside attack range and the
//!    cooldown is ready; chase while the target is beyond chase-stop range.
//!    The two thresholds differ on purpose (attack 6.0, stop 5.0) so there is
//!    a band where the creature stands and bites instead of jittering around
//!    a single boundary.
//! 5. idle sway when neither stunned nor chasing.
//! 6. recoil decays toward zero every tick regardless of state.
//!
//! Damage reaches the creature on two paths: the direct bullet-hit handler
//! (`process_creature_hits` -> `apply_strikes`) and the health-delta observer
//! in `think`. The direct path syncs the observer's last-seen health so one
//! hit produces one reaction; the delta path still catches damage applied by
//! anything else.

use avian3d::collision::narrow_phase::CollisionEventSystems;
use avian3d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter, Messages};
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use rand::Rng;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::audio::{PlaySound, SoundEffect};
use crate::plugins::core::GameRng;
use crate::plugins::effects::ParticleBurst;
use crate::plugins::player::PlayerPositionSlot;
use crate::plugins::projectiles::collision::targets;
use crate::plugins::projectiles::components::{BulletState, PooledBullet};
use crate::plugins::session::DamagePlayer;

/// Vertical drop applied to the pose once dead; the carcass sinks out of the
/// arena and stays there until a respawn rebuilds the world.
const DEAD_SINK_Y: f32 = -10.0;

const DIRECT_HIT_STUN: f32 = 0.5;
const EXTERNAL_HIT_STUN: f32 = 0.2;
const HIT_PARTICLES: u32 = 8;
const FLASH_DECAY_PER_SEC: f32 = 5.0;
const RECOIL_RECOVERY_RATE: f32 = 5.0;

// -----------------------------------------------------------------------------
// Newtypes
// -----------------------------------------------------------------------------

/// A value conceptually normalized to [0..1]; clamped once on write so the
/// hot path never re-checks.
#[derive(Clone, Copy, Debug, Default)]
struct UnitF32(f32);

impl UnitF32 {
    #[inline]
    fn new_clamped(v: f32) -> Self {
        Self(v.clamp(0.0, 1.0))
    }
    #[inline]
    fn get(self) -> f32 {
        self.0
    }
    #[inline]
    fn decay_to_zero(&mut self, rate_per_sec: f32, dt: f32) {
        self.0 = (self.0 - rate_per_sec * dt).max(0.0);
    }
}

// -----------------------------------------------------------------------------
// Components
// -----------------------------------------------------------------------------

/// Marker + optional explicit target. When no override is set, the creature
/// hunts the shared player position slot.
#[derive(Component, Debug, Default)]
pub struct Creature {
    pub target_override: Option<Entity>,
}

/// Alive/Dead as a tagged variant rather than a boolean: the death transition
/// is one-way and `Dead` short-circuits everything else.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatureLife {
    Alive,
    Dead,
}

/// Creature health; only ever decreased externally, never healed here.
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub hp: f32,
}

impl Health {
    #[inline]
    pub fn take(&mut self, amount: f32) {
        self.hp = (self.hp - amount).max(0.0);
    }
}

/// The controller's working state: AI-integrated pose plus reaction timers.
#[derive(Component, Debug, Clone)]
pub struct CreatureState {
    /// Position integrated by the AI; the kinematic body mirrors it.
    pub pos: Vec3,
    pub yaw: f32,
    pub stun_timer: f32,
    pub attack_cooldown: f32,
    pub recoil: Vec3,
    flash: UnitF32,
    last_seen_hp: f32,
}

impl CreatureState {
    pub fn new(pos: Vec3, hp: f32) -> Self {
        Self {
            pos,
            yaw: 0.0,
            stun_timer: 0.0,
            attack_cooldown: 0.0,
            recoil: Vec3::ZERO,
            flash: UnitF32::default(),
            last_seen_hp: hp,
        }
    }

    #[inline]
    pub fn is_stunned(&self) -> bool {
        self.stun_timer > 0.0
    }

    /// Hit-flash intensity in [0..1] for presentation tinting.
    #[inline]
    pub fn flash(&self) -> f32 {
        self.flash.get()
    }

    /// Shared part of both damage-reaction paths: full flash, upward hop,
    /// stun. Particle burst and sound are emitted by the caller.
    fn hit_reaction(&mut self, stun: f32) {
        self.flash = UnitF32::new_clamped(1.0);
        self.recoil.y += 0.5;
        self.stun_timer = stun;
    }
}

/// A bullet struck the creature's hitbox.
#[derive(Message, Clone, Copy, Debug)]
pub struct CreatureStruck {
    pub creature: Entity,
    pub hit_point: Vec3,
    pub damage: f32,
}

// -----------------------------------------------------------------------------
// Plugin wiring
// -----------------------------------------------------------------------------

fn update_struck_messages(mut msgs: ResMut<Messages<CreatureStruck>>) {
    msgs.update();
}

pub fn plugin(app: &mut App) {
    app.init_resource::<Messages<CreatureStruck>>();
    app.add_systems(PostUpdate, update_struck_messages);

    app.add_systems(OnEnter(GameState::InGame), spawn_creature);

    app.add_systems(
        FixedUpdate,
        (apply_strikes, think)
            .chain()
            .after(crate::plugins::player::publish_position)
            .run_if(in_state(GameState::InGame)),
    );

    // The hitbox handler reads contact-begin events after the physics step
    // has produced them.
    app.add_systems(
        FixedPostUpdate,
        process_creature_hits
            .after(CollisionEventSystems)
            .run_if(in_state(GameState::InGame)),
    );
}

fn spawn_creature(mut commands: Commands) {
    let spawn = Vec3::new(0.0, 2.0, -20.0);

    commands.spawn((
        Name::new("TrainEater"),
        Creature::default(),
        Health { hp: 100.0 },
        CreatureLife::Alive,
        CreatureState::new(spawn, 100.0),
        Transform::from_translation(spawn),
        Visibility::default(),
        RigidBody::Kinematic,
        // Hitbox is slightly smaller than the visual head.
        Collider::cuboid(3.5, 3.5, 6.0),
        CollisionLayers::new(Layer::Creature, [Layer::World, Layer::Player, Layer::Bullet]),
        CollisionEventsEnabled,
        DespawnOnExit(GameState::InGame),
    ));
}

// -----------------------------------------------------------------------------
// Damage path 1: direct bullet hits on the hitbox
// -----------------------------------------------------------------------------

/// Translate bullet/creature contact-begin events into strike messages.
///
/// Damage numbers and reactions are applied by `apply_strikes`; the
/// projectile subsystem stays damage-free.
pub fn process_creature_hits(
    tunables: Res<Tunables>,
    mut started: MessageReader<CollisionStart>,
    q_bullets: Query<(&BulletState, &Transform), With<PooledBullet>>,
    q_creatures: Query<(), With<Creature>>,
    mut writer: MessageWriter<CreatureStruck>,
) {
    for ev in started.read() {
        let (t1, t2) = targets(ev);

        let b1 = q_bullets.contains(t1.collider);
        let b2 = q_bullets.contains(t2.collider);
        if !(b1 ^ b2) {
            continue;
        }
        let (bullet_side, other_side) = if b1 { (t1, t2) } else { (t2, t1) };

        let creature = other_side.gameplay_owner();
        if !q_creatures.contains(creature) {
            continue;
        }

        let Ok((state, bullet_tf)) = q_bullets.get(bullet_side.collider) else {
            continue;
        };
        if *state != BulletState::Active {
            continue;
        }

        writer.write(CreatureStruck {
            creature,
            hit_point: bullet_tf.translation,
            damage: tunables.bullet_hit_damage,
        });
    }
}

pub fn apply_strikes(
    mut reader: MessageReader<CreatureStruck>,
    mut rng: ResMut<GameRng>,
    mut q: Query<(&mut Health, &CreatureLife, &mut CreatureState)>,
    mut bursts: MessageWriter<ParticleBurst>,
    mut sounds: MessageWriter<PlaySound>,
) {
    for strike in reader.read() {
        let Ok((mut health, life, mut state)) = q.get_mut(strike.creature) else {
            continue;
        };
        // Damage while already dead is a no-op.
        if *life == CreatureLife::Dead || health.hp <= 0.0 {
            continue;
        }

        health.take(strike.damage);

        state.hit_reaction(DIRECT_HIT_STUN);
        state.recoil.x += rng.0.gen_range(-0.75..0.75);
        state.recoil.z += rng.0.gen_range(-0.75..0.75);
        // Sync the delta observer so this hit is not reported twice.
        state.last_seen_hp = health.hp;

        bursts.write(ParticleBurst {
            origin: strike.hit_point,
            count: HIT_PARTICLES,
        });
        sounds.write(PlaySound::new(SoundEffect::CreatureHit));
    }
}

// -----------------------------------------------------------------------------
// Per-tick behavior
// -----------------------------------------------------------------------------

pub fn think(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    mut rng: ResMut<GameRng>,
    player_slot: Res<PlayerPositionSlot>,
    q_target_tf: Query<&Transform, Without<Creature>>,
    mut q: Query<(
        &Creature,
        &Health,
        &mut CreatureLife,
        &mut CreatureState,
        &mut Transform,
    )>,
    mut damage: MessageWriter<DamagePlayer>,
    mut bursts: MessageWriter<ParticleBurst>,
    mut sounds: MessageWriter<PlaySound>,
) {
    let dt = time.delta_secs();
    let elapsed = time.elapsed_secs();

    for (creature, health, mut life, mut state, mut tf) in &mut q {
        // 1. Death dominates everything.
        if health.hp <= 0.0 {
            *life = CreatureLife::Dead;
            tf.translation = Vec3::new(state.pos.x, DEAD_SINK_Y, state.pos.z);
            continue;
        }

        // 2. Damage observed since last tick (melee, scripts, anything that
        // is not a direct bullet hit).
        if health.hp < state.last_seen_hp {
            state.hit_reaction(EXTERNAL_HIT_STUN);
            state.last_seen_hp = health.hp;

            bursts.write(ParticleBurst {
                origin: state.pos,
                count: HIT_PARTICLES,
            });
            sounds.write(PlaySound::new(SoundEffect::CreatureHit));
        }

        // 3. Timers.
        state.stun_timer = (state.stun_timer - dt).max(0.0);
        state.attack_cooldown = (state.attack_cooldown - dt).max(0.0);
        state.flash.decay_to_zero(FLASH_DECAY_PER_SEC, dt);

        let stunned = state.is_stunned();

        // 4. Target acquisition: explicit override first, then the shared
        // player slot.
        let target = creature
            .target_override
            .and_then(|e| q_target_tf.get(e).ok())
            .map(|t| t.translation)
            .unwrap_or(player_slot.0);

        let to_target = target - state.pos;
        let dist = to_target.length();
        let mut chasing = false;

        if !stunned {
            let dir_h = Vec3::new(to_target.x, 0.0, to_target.z).normalize_or_zero();

            if dist < tunables.attack_range && state.attack_cooldown <= 0.0 {
                damage.write(DamagePlayer {
                    amount: tunables.attack_damage,
                });
                state.attack_cooldown = tunables.attack_cooldown;
                // Forward lunge toward the bite.
                state.recoil += dir_h * 1.5;
            }

            if dist > tunables.chase_stop_range {
                chasing = true;
                state.pos += dir_h * tunables.chase_speed * dt;
                if dir_h != Vec3::ZERO {
                    state.yaw = dir_h.x.atan2(dir_h.z);
                }
            }
        }

        // 5/6. Pose composition: base position, plus jitter while stunned or
        // a breathing sway while standing, plus the decaying recoil.
        let mut offset = Vec3::ZERO;
        if stunned {
            offset.x += rng.0.gen_range(-0.25..0.25);
            offset.y += rng.0.gen_range(-0.25..0.25);
        } else if !chasing {
            offset.x += (elapsed * 0.5).sin() * 0.5;
        }

        state.recoil = state
            .recoil
            .lerp(Vec3::ZERO, (RECOIL_RECOVERY_RATE * dt).min(1.0));

        tf.translation = state.pos + offset + state.recoil;
        tf.rotation = if stunned {
            Quat::from_euler(
                EulerRot::YXZ,
                state.yaw,
                -0.5 + rng.0.gen_range(0.0..0.1),
                rng.0.gen_range(-0.1..0.1),
            )
        } else {
            Quat::from_rotation_y(state.yaw)
        };
    }
}
