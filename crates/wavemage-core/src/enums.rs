//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::components::{EnemyUnit, WaveProjectile};

/// Overall session phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    MainMenu,
    Active,
    Paused,
    /// Frozen between waves while the player picks an upgrade.
    UpgradeSelection,
    /// Terminal.
    GameOver,
}

/// Wave progression state. Timers hold the time remaining before the next
/// transition, so the sequence resumes from plain data each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SequencerPhase {
    /// Not started yet.
    #[default]
    Idle,
    /// Counting down the initial start delay.
    StartDelay { remaining: f32 },
    /// Wave entered; its spawn batch is dispatched on the same tick.
    WaveActive { wave: u32 },
    /// Batch dispatched, polling until every enemy of the wave is dead.
    WaitingForClear { wave: u32, until_poll: f32 },
    /// Wave cleared, waiting before the next one.
    Cooldown { wave: u32, remaining: f32 },
    /// Terminal. Reached only through game over.
    Stopped,
}

/// Behaviour a projectile runs after damaging an enemy.
#[derive(Debug, Clone, Copy, Default)]
pub enum HitEffect {
    #[default]
    None,
    /// Interfere with every other live projectile after a hit.
    Interference,
    /// Arbitrary hook over the projectile and the enemy it just hit.
    Custom(fn(&mut WaveProjectile, &mut EnemyUnit)),
}
