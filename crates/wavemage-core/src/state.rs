//! Game state snapshot: the complete visible state handed to a frontend each tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::{GamePhase, SequencerPhase};
use crate::events::GameEvent;
use crate::tuning::WaveFireConfig;
use crate::types::SimTime;

/// Complete game state after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub wave: WaveView,
    pub player: Option<PlayerView>,
    pub enemies: Vec<EnemyView>,
    pub projectiles: Vec<ProjectileView>,
    pub fire: WaveFireConfig,
    /// Upgrade choices, non-empty only during `UpgradeSelection`.
    pub upgrade_offer: Vec<UpgradeView>,
    pub events: Vec<GameEvent>,
    pub score: ScoreView,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub current_wave: u32,
    pub phase: SequencerPhase,
    pub enemies_alive: u32,
    /// Enemies still queued in spawn batches.
    pub pending_spawns: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec2,
    pub velocity: Vec2,
    pub health: u32,
    pub max_health: u32,
    pub invincible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub position: Vec2,
    pub health: u32,
    pub max_health: u32,
    pub facing_deg: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub position: Vec2,
    pub rotation_deg: f32,
    pub scale: f32,
    pub damage: u32,
}

/// An upgrade as shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeView {
    pub id: String,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub enemies_killed: u32,
    pub score: u32,
    pub projectiles_fired: u32,
}
