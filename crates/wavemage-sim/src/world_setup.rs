//! Entity spawn factories for the simulation world.
//!
//! Creates the player, enemy and wave projectile entities with their
//! component bundles, and resolves the player for systems that chase or
//! fire from it.

use glam::Vec2;
use hecs::{Entity, World};

use wavemage_core::components::*;
use wavemage_core::enums::HitEffect;
use wavemage_core::tuning::{EnemyTuning, PlayerTuning, ProjectileTuning};
use wavemage_core::types::{Position, Velocity};

use crate::projectile;

/// Spawn the player at `at` with full health.
pub fn spawn_player(world: &mut World, tuning: &PlayerTuning, at: Vec2) -> Entity {
    world.spawn((
        Player {
            health: tuning.max_health,
            max_health: tuning.max_health,
            move_input: Vec2::ZERO,
            invincible_secs: 0.0,
            radius: tuning.radius,
        },
        Position(at),
        Velocity::default(),
    ))
}

/// Spawn one enemy unit for `wave` at `at`.
pub fn spawn_enemy(world: &mut World, tuning: &EnemyTuning, at: Vec2, wave: u32) -> Entity {
    world.spawn((
        Enemy,
        EnemyUnit {
            health: tuning.max_health,
            max_health: tuning.max_health,
            move_speed: tuning.move_speed,
            contact_damage: tuning.contact_damage,
            score_value: tuning.score_value,
            min_distance: tuning.min_distance,
            radius: tuning.radius,
            facing_deg: 0.0,
            touching_player: false,
            wave,
        },
        Position(at),
        Velocity::default(),
    ))
}

/// Spawn a wave projectile at `origin` travelling along `direction`.
/// Overrides replace the tuning defaults only when positive.
pub fn spawn_projectile(
    world: &mut World,
    tuning: &ProjectileTuning,
    origin: Vec2,
    direction: Vec2,
    speed_override: Option<f32>,
    damage_override: Option<u32>,
    hit_effect: HitEffect,
) -> Entity {
    let mut wave = projectile::new_projectile(tuning, direction, speed_override, damage_override);
    wave.hit_effect = hit_effect;
    world.spawn((wave, Position(origin)))
}

/// Current player position, if a living player exists.
pub fn player_position(world: &World) -> Option<Vec2> {
    let mut query = world.query::<(&Position, &Player)>();
    let position = query
        .iter()
        .find(|(_, (_, player))| player.is_alive())
        .map(|(_, (pos, _))| pos.0);
    position
}
