//! Player commands sent from a frontend to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Session control ---
    /// Spawn the player and start the wave sequence.
    StartGame,
    /// Pause the simulation.
    Pause,
    /// Resume the simulation.
    Resume,
    /// Set time scale (1.0 = normal, 2.0 = double). Only used by real-time hosts.
    SetTimeScale { scale: f32 },
    /// End the session immediately.
    EndGame,

    // --- Player ---
    /// Desired movement direction; vectors longer than 1 are normalised.
    SetMoveInput { x: f32, y: f32 },

    // --- Upgrades ---
    /// Pick one of the currently offered upgrades.
    ChooseUpgrade { index: usize },
    /// Dismiss the offer without applying anything.
    SkipUpgrade,
}
