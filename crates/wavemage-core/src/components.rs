//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in the simulation
//! crate's systems, not here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::HitEffect;

/// An oscillating "wave" projectile fired by the wave attack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveProjectile {
    /// Unit travel direction.
    pub direction: Vec2,
    pub speed: f32,
    /// Seconds the projectile lives for.
    pub lifetime: f32,
    /// Seconds since spawn. Non-decreasing.
    pub age: f32,
    pub damage: u32,
    pub hit_radius: f32,
    pub amplitude: f32,
    pub frequency: f32,
    /// Cosmetic scale for renderers (1.0 at spawn).
    pub scale: f32,
    /// Facing angle in degrees derived from `direction`.
    pub rotation_deg: f32,
    /// Set once, on the tick the lifetime runs out.
    pub retired: bool,
    /// Extra behaviour run after each enemy hit.
    #[serde(skip)]
    pub hit_effect: HitEffect,
}

/// Health and movement state of an enemy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyUnit {
    pub health: u32,
    pub max_health: u32,
    pub move_speed: f32,
    pub contact_damage: u32,
    pub score_value: u32,
    /// Enemies hold position once this close to the player.
    pub min_distance: f32,
    pub radius: f32,
    /// Facing angle in degrees, updated from velocity.
    pub facing_deg: f32,
    /// Whether the enemy overlapped the player last tick.
    pub touching_player: bool,
    /// Wave this enemy was spawned for.
    pub wave: u32,
}

/// Marks an entity as an enemy. Projectile hit tests only consider entities
/// carrying this tag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Enemy;

/// The player character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub health: u32,
    pub max_health: u32,
    /// Latest movement input, magnitude at most 1.
    pub move_input: Vec2,
    /// Remaining invincibility after taking damage (seconds).
    pub invincible_secs: f32,
    pub radius: f32,
}

impl EnemyUnit {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

impl Player {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_secs > 0.0
    }
}
