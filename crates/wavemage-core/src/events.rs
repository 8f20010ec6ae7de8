//! Events emitted by the simulation for UI, upgrade and audio collaborators.
//!
//! Events are fire-and-forget: the simulation never depends on who listens.

use serde::{Deserialize, Serialize};

use crate::state::UpgradeView;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A new wave of enemies began.
    WaveStarted { wave: u32 },
    /// Every enemy of the wave is dead.
    WaveCompleted { wave: u32 },
    /// The live-enemy counter changed.
    EnemyCountChanged { count: u32 },
    /// An enemy's health reached zero.
    EnemyKilled { wave: u32, score_value: u32 },
    /// The wave attack fired a volley.
    VolleyFired { projectiles: u32 },
    PlayerDamaged { amount: u32, health: u32 },
    /// Health restored; `amount` is what was actually added under the cap.
    PlayerHealed { amount: u32, health: u32 },
    PlayerDied,
    /// Upgrade choices are waiting for the player.
    UpgradeOffered { options: Vec<UpgradeView> },
    UpgradeApplied { upgrade: UpgradeView },
    /// The session ended. Emitted once.
    GameOver { wave_reached: u32 },
}
