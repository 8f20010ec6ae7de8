//! Enemy spawn controller: turns "spawn N enemies for wave K" into a timed
//! sequence of single spawns at randomised positions.

use glam::Vec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use wavemage_core::tuning::{EnemyTuning, SpawnTuning};
use wavemage_core::types::direction_from_degrees;

use crate::world_setup;

/// One in-flight spawn sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnBatch {
    pub wave: u32,
    /// Enemies still to spawn.
    pub remaining: u32,
    /// Seconds until the next spawn. The first spawn is immediate.
    pub until_next: f32,
}

#[derive(Debug, Clone)]
pub struct EnemySpawnController {
    tuning: SpawnTuning,
    enemy: EnemyTuning,
    batches: Vec<SpawnBatch>,
}

impl EnemySpawnController {
    pub fn new(tuning: SpawnTuning, enemy: EnemyTuning) -> Self {
        Self {
            tuning,
            enemy,
            batches: Vec::new(),
        }
    }

    /// Queue `count` spawns for `wave`, `spawn_delay` seconds apart.
    pub fn spawn_wave(&mut self, count: u32, wave: u32) {
        if count == 0 {
            return;
        }
        debug!(wave, count, "spawn batch queued");
        self.batches.push(SpawnBatch {
            wave,
            remaining: count,
            until_next: 0.0,
        });
    }

    /// Drop every queued spawn. Nothing already queued will spawn afterwards.
    pub fn cancel_all(&mut self) {
        if !self.batches.is_empty() {
            debug!(pending = self.pending(), "spawn batches cancelled");
        }
        self.batches.clear();
    }

    /// Enemies still queued across all batches.
    pub fn pending(&self) -> u32 {
        self.batches.iter().map(|b| b.remaining).sum()
    }

    pub fn batches(&self) -> &[SpawnBatch] {
        &self.batches
    }

    /// Advance every batch by `dt` and spawn the enemies that are due.
    /// Returns how many were spawned.
    pub fn run(&mut self, world: &mut World, rng: &mut ChaCha8Rng, dt: f32) -> u32 {
        if self.batches.is_empty() {
            return 0;
        }

        let mut spawned = 0;
        for batch in &mut self.batches {
            batch.until_next -= dt;
            while batch.remaining > 0 && batch.until_next <= 0.0 {
                // Re-resolve the player for each spawn; it moves between them.
                let player = world_setup::player_position(world);
                let at = sample_spawn_position(rng, &self.tuning, player);
                world_setup::spawn_enemy(world, &self.enemy, at, batch.wave);
                trace!(wave = batch.wave, x = at.x, y = at.y, "enemy spawned");

                batch.remaining -= 1;
                batch.until_next += self.tuning.spawn_delay;
                spawned += 1;
            }
        }
        self.batches.retain(|b| b.remaining > 0);
        spawned
    }
}

/// Pick a spawn point on the ring `[min_spawn_distance, max_spawn_distance]`
/// around the arena centre, resampling while it lands closer than
/// `min_distance_from_player` to the player.
///
/// After `max_attempts` candidates the last one is accepted as is, so this
/// always terminates and can occasionally return a point near the player.
pub fn sample_spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    tuning: &SpawnTuning,
    player: Option<Vec2>,
) -> Vec2 {
    let (lo, hi) = if tuning.min_spawn_distance <= tuning.max_spawn_distance {
        (tuning.min_spawn_distance, tuning.max_spawn_distance)
    } else {
        (tuning.max_spawn_distance, tuning.min_spawn_distance)
    };
    let max_attempts = tuning.max_attempts.max(1);

    let mut candidate = Vec2::ZERO;
    for _ in 0..max_attempts {
        let angle: f32 = rng.gen_range(0.0..360.0);
        let distance: f32 = rng.gen_range(lo..=hi);
        candidate = direction_from_degrees(angle) * distance;

        match player {
            Some(player) if candidate.distance(player) < tuning.min_distance_from_player => {}
            _ => break,
        }
    }
    candidate
}
