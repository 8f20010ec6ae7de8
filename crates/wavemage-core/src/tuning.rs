//! Gameplay tuning. Every struct deserializes with per-field defaults so a
//! partial JSON file only overrides what it names.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// All tunables for one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameTuning {
    pub tick_rate: TickRate,
    pub fire: WaveFireConfig,
    pub projectile: ProjectileTuning,
    pub enemy: EnemyTuning,
    pub spawner: SpawnTuning,
    pub waves: WaveTuning,
    pub player: PlayerTuning,
    pub upgrades: UpgradeTuning,
}

/// Fixed-step rate in Hz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TickRate(pub u32);

impl Default for TickRate {
    fn default() -> Self {
        Self(TICK_RATE)
    }
}

impl TickRate {
    /// Seconds per tick. A zero rate falls back to the default.
    pub fn dt(&self) -> f32 {
        if self.0 == 0 {
            DT
        } else {
            1.0 / self.0 as f32
        }
    }
}

/// Wave attack fire configuration.
///
/// The multipliers and `additional_waves` only ever grow during a session;
/// upgrades accumulate multiplicatively and nothing resets them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveFireConfig {
    /// Seconds between volleys at multiplier 1.0.
    pub base_interval: f32,
    pub base_damage: u32,
    pub base_speed: f32,
    /// Directions per ring.
    pub direction_count: u32,
    pub attack_speed_multiplier: f32,
    pub damage_multiplier: f32,
    pub speed_multiplier: f32,
    pub additional_waves: u32,
}

impl Default for WaveFireConfig {
    fn default() -> Self {
        Self {
            base_interval: FIRE_BASE_INTERVAL,
            base_damage: FIRE_BASE_DAMAGE,
            base_speed: FIRE_BASE_SPEED,
            direction_count: FIRE_BASE_DIRECTIONS,
            attack_speed_multiplier: 1.0,
            damage_multiplier: 1.0,
            speed_multiplier: 1.0,
            additional_waves: 0,
        }
    }
}

impl WaveFireConfig {
    /// Seconds between volleys after attack-speed upgrades.
    pub fn effective_interval(&self) -> f32 {
        self.base_interval / self.attack_speed_multiplier
    }

    /// Damage carried by each projectile of the next volley.
    pub fn effective_damage(&self) -> u32 {
        crate::types::round_to_u32(self.base_damage as f32 * self.damage_multiplier)
    }

    /// Speed given to each projectile of the next volley.
    pub fn effective_speed(&self) -> f32 {
        self.base_speed * self.speed_multiplier
    }

    /// Number of concentric rings per volley.
    pub fn waves_to_fire(&self) -> u32 {
        1 + self.additional_waves
    }

    /// Directions per ring, widened once any extra ring is unlocked.
    pub fn directions_per_wave(&self) -> u32 {
        let extra = if self.additional_waves > 0 {
            FIRE_EXTRA_WAVE_DIRECTIONS
        } else {
            0
        };
        self.direction_count + extra
    }

    pub fn increase_fire_rate(&mut self, factor: f32) {
        self.attack_speed_multiplier *= factor;
    }

    pub fn increase_damage(&mut self, factor: f32) {
        self.damage_multiplier *= factor;
    }

    pub fn increase_projectile_speed(&mut self, factor: f32) {
        self.speed_multiplier *= factor;
    }

    pub fn add_extra_volley(&mut self) {
        self.additional_waves += 1;
    }

    /// Set directions per ring, clamped to at least `FIRE_MIN_DIRECTIONS`.
    pub fn set_direction_count(&mut self, count: i32) {
        self.direction_count = count.max(FIRE_MIN_DIRECTIONS as i32) as u32;
    }
}

/// Default projectile parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    /// Speed used when a spawn supplies no override.
    pub speed: f32,
    /// Damage used when a spawn supplies no override.
    pub damage: u32,
    /// Seconds before the projectile retires.
    pub lifetime: f32,
    pub hit_radius: f32,
    pub amplitude: f32,
    /// Oscillation frequency in radians per second of age.
    pub frequency: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: FIRE_BASE_SPEED,
            damage: FIRE_BASE_DAMAGE,
            lifetime: PROJECTILE_LIFETIME,
            hit_radius: PROJECTILE_HIT_RADIUS,
            amplitude: PROJECTILE_AMPLITUDE,
            frequency: PROJECTILE_FREQUENCY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub max_health: u32,
    pub move_speed: f32,
    pub contact_damage: u32,
    pub score_value: u32,
    pub min_distance: f32,
    pub radius: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            max_health: ENEMY_MAX_HEALTH,
            move_speed: ENEMY_MOVE_SPEED,
            contact_damage: ENEMY_CONTACT_DAMAGE,
            score_value: ENEMY_SCORE_VALUE,
            min_distance: ENEMY_MIN_DISTANCE,
            radius: ENEMY_RADIUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    /// Seconds between spawns within a batch.
    pub spawn_delay: f32,
    /// Inner radius of the spawn ring around the arena centre.
    pub min_spawn_distance: f32,
    /// Outer radius of the spawn ring around the arena centre.
    pub max_spawn_distance: f32,
    pub min_distance_from_player: f32,
    pub max_attempts: u32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            spawn_delay: SPAWN_DELAY,
            min_spawn_distance: SPAWN_MIN_DISTANCE,
            max_spawn_distance: SPAWN_MAX_DISTANCE,
            min_distance_from_player: SPAWN_MIN_DISTANCE_FROM_PLAYER,
            max_attempts: SPAWN_MAX_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveTuning {
    pub start_delay: f32,
    pub time_between_waves: f32,
    pub base_enemies: u32,
    pub growth_factor: f32,
    pub clear_poll_interval: f32,
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            start_delay: WAVE_START_DELAY,
            time_between_waves: WAVE_TIME_BETWEEN,
            base_enemies: WAVE_BASE_ENEMIES,
            growth_factor: WAVE_ENEMY_GROWTH,
            clear_poll_interval: WAVE_CLEAR_POLL_INTERVAL,
        }
    }
}

impl WaveTuning {
    /// Enemies spawned in wave `wave` (1-based):
    /// `round(base * growth^(wave - 1))`.
    pub fn enemies_for_wave(&self, wave: u32) -> u32 {
        let exponent = wave.saturating_sub(1) as i32;
        crate::types::round_to_u32(self.base_enemies as f32 * self.growth_factor.powi(exponent))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub max_health: u32,
    pub move_speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    pub invincibility_secs: f32,
    pub radius: f32,
    /// Radius of the circular arena the player is confined to.
    pub game_area_radius: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_health: PLAYER_MAX_HEALTH,
            move_speed: PLAYER_MOVE_SPEED,
            acceleration: PLAYER_ACCELERATION,
            deceleration: PLAYER_DECELERATION,
            invincibility_secs: PLAYER_INVINCIBILITY_SECS,
            radius: PLAYER_RADIUS,
            game_area_radius: GAME_AREA_RADIUS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeTuning {
    /// Choices offered after a cleared wave. Zero disables the pause.
    pub choices_per_wave: u32,
}

impl Default for UpgradeTuning {
    fn default() -> Self {
        Self {
            choices_per_wave: UPGRADES_PER_WAVE,
        }
    }
}
