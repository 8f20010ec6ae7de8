//! Scripted player for unattended runs: takes the first upgrade offered and
//! steers away from the nearest enemy while staying inside the arena.

use glam::Vec2;

use wavemage_core::commands::PlayerCommand;
use wavemage_core::enums::GamePhase;
use wavemage_core::state::GameStateSnapshot;

/// Pull towards the centre, scaled by how far out the player is.
const CENTRE_PULL: f32 = 0.6;

pub fn decide(snapshot: &GameStateSnapshot, arena_radius: f32) -> Option<PlayerCommand> {
    match snapshot.phase {
        GamePhase::UpgradeSelection if !snapshot.upgrade_offer.is_empty() => {
            Some(PlayerCommand::ChooseUpgrade { index: 0 })
        }
        GamePhase::Active => {
            let player = snapshot.player.as_ref()?;
            let steer = steer(
                player.position,
                snapshot.enemies.iter().map(|e| e.position),
                arena_radius,
            );
            Some(PlayerCommand::SetMoveInput {
                x: steer.x,
                y: steer.y,
            })
        }
        _ => None,
    }
}

/// Unit-or-shorter steering input away from the nearest enemy.
pub fn steer(player: Vec2, enemies: impl Iterator<Item = Vec2>, arena_radius: f32) -> Vec2 {
    let flee = enemies
        .min_by(|a, b| a.distance_squared(player).total_cmp(&b.distance_squared(player)))
        .map(|nearest| (player - nearest).normalize_or_zero())
        .unwrap_or(Vec2::ZERO);

    let edge = if arena_radius > 0.0 {
        player.length() / arena_radius
    } else {
        0.0
    };
    let home = -player.normalize_or_zero() * edge * CENTRE_PULL;

    (flee + home).clamp_length_max(1.0)
}
