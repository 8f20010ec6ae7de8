//! Snapshot builder: reads the world and services into a `GameStateSnapshot`.

use hecs::World;

use wavemage_core::components::{Enemy, EnemyUnit, Player, WaveProjectile};
use wavemage_core::enums::GamePhase;
use wavemage_core::events::GameEvent;
use wavemage_core::state::*;
use wavemage_core::types::{Position, SimTime, Velocity};

use crate::combat::ScoreState;
use crate::systems::enemy_spawner::EnemySpawnController;
use crate::systems::wave_fire::WaveFireController;
use crate::systems::wave_sequencer::WaveSequencer;

/// Build a complete snapshot of the current game state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    sequencer: &WaveSequencer,
    spawner: &EnemySpawnController,
    fire: &WaveFireController,
    upgrade_offer: Vec<UpgradeView>,
    events: Vec<GameEvent>,
    score: &ScoreState,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        wave: WaveView {
            current_wave: sequencer.current_wave(),
            phase: sequencer.phase(),
            enemies_alive: sequencer.enemies_alive(),
            pending_spawns: spawner.pending(),
        },
        player: build_player(world),
        enemies: build_enemies(world),
        projectiles: build_projectiles(world),
        fire: fire.config().clone(),
        upgrade_offer,
        events,
        score: ScoreView {
            enemies_killed: score.enemies_killed,
            score: score.score,
            projectiles_fired: score.projectiles_fired,
        },
    }
}

fn build_player(world: &World) -> Option<PlayerView> {
    let mut query = world.query::<(&Position, &Velocity, &Player)>();
    let view = query.iter().next().map(|(_, (pos, vel, player))| PlayerView {
        position: pos.0,
        velocity: vel.0,
        health: player.health,
        max_health: player.max_health,
        invincible: player.is_invincible(),
    });
    view
}

fn build_enemies(world: &World) -> Vec<EnemyView> {
    let mut query = world.query::<(&Position, &EnemyUnit, &Enemy)>();
    query
        .iter()
        .map(|(_, (pos, enemy, _))| EnemyView {
            position: pos.0,
            health: enemy.health,
            max_health: enemy.max_health,
            facing_deg: enemy.facing_deg,
        })
        .collect()
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut query = world.query::<(&Position, &WaveProjectile)>();
    query
        .iter()
        .filter(|(_, (_, wave))| !wave.retired)
        .map(|(_, (pos, wave))| ProjectileView {
            position: pos.0,
            rotation_deg: wave.rotation_deg,
            scale: wave.scale,
            damage: wave.damage,
        })
        .collect()
}
