//! Tunable gameplay constants.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    // Locomotion
    pub walk_speed: f32,
    pub run_speed: f32,
    pub jump_impulse: f32,
    /// Grounded heuristic: jumping is allowed while |vertical speed| is below this.
    pub grounded_epsilon: f32,
    pub eye_height: f32,
    pub mouse_sensitivity: f32,

    // Projectiles
    pub muzzle_offset: f32,
    pub bullet_lifetime: f32,
    /// Bullet impact sounds are suppressed below this impact speed.
    pub bullet_impact_min: f32,

    // Creature
    pub attack_range: f32,
    pub chase_stop_range: f32,
    pub chase_speed: f32,
    pub attack_damage: f32,
    pub attack_cooldown: f32,
    pub bullet_hit_damage: f32,

    // Session
    pub regen_delay: f32,
    pub regen_step: f32,

    // Props
    pub min_audible_impact: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            run_speed: 10.0,
            jump_impulse: 5.0,
            grounded_epsilon: 0.05,
            eye_height: 0.8,
            mouse_sensitivity: 0.002,

            muzzle_offset: 1.0,
            bullet_lifetime: 2.0,
            bullet_impact_min: 1.0,

            attack_range: 6.0,
            chase_stop_range: 5.0,
            chase_speed: 2.0,
            attack_damage: 10.0,
            attack_cooldown: 1.0,
            bullet_hit_damage: 2.0,

            regen_delay: 3.0,
            regen_step: 5.0,

            min_audible_impact: 1.5,
        }
    }
}
