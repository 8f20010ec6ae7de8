//! Simulation engine: the session object.
//!
//! `SimulationEngine` owns the hecs ECS world and the three stateful services
//! (wave fire controller, enemy spawn controller, wave sequencer), processes
//! player commands, runs all systems, and produces `GameStateSnapshot`s.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use glam::Vec2;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use wavemage_core::commands::PlayerCommand;
use wavemage_core::components::Player;
use wavemage_core::enums::GamePhase;
use wavemage_core::events::GameEvent;
use wavemage_core::state::GameStateSnapshot;
use wavemage_core::tuning::GameTuning;
use wavemage_core::types::SimTime;
use wavemage_upgrades::{apply_upgrade, roll_offer, UpgradeKind};

use crate::combat::{self, ScoreState};
use crate::observer::GameEventListener;
use crate::systems;
use crate::systems::enemy_spawner::EnemySpawnController;
use crate::systems::wave_fire::WaveFireController;
use crate::systems::wave_sequencer::WaveSequencer;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f32,
    pub tuning: GameTuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            tuning: GameTuning::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    time_scale: f32,
    rng: ChaCha8Rng,
    tuning: GameTuning,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<GameEvent>,
    listeners: Vec<Box<dyn GameEventListener>>,

    fire: WaveFireController,
    spawner: EnemySpawnController,
    sequencer: WaveSequencer,
    score: ScoreState,
    upgrade_offer: Vec<UpgradeKind>,
    player: Option<Entity>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        let tuning = config.tuning;
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            time_scale: config.time_scale,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            listeners: Vec::new(),
            fire: WaveFireController::new(tuning.fire.clone()),
            spawner: EnemySpawnController::new(tuning.spawner.clone(), tuning.enemy.clone()),
            sequencer: WaveSequencer::new(tuning.waves.clone()),
            score: ScoreState::default(),
            upgrade_offer: Vec::new(),
            player: None,
            tuning,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Register a listener for every event emitted from now on.
    pub fn subscribe(&mut self, listener: impl GameEventListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Advance the simulation by one fixed step and return the snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        let dt = self.tuning.tick_rate.dt();
        self.tick_with_dt(dt)
    }

    /// Advance the simulation by `dt` seconds (variable-step hosts).
    pub fn tick_with_dt(&mut self, dt: f32) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active && dt > 0.0 {
            self.run_systems(dt);
            self.time.advance(dt);
        }

        let events = std::mem::take(&mut self.events);
        for listener in &mut self.listeners {
            for event in &events {
                listener.on_event(event);
            }
        }

        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.sequencer,
            &self.spawner,
            &self.fire,
            self.upgrade_offer.iter().map(UpgradeKind::view).collect(),
            events,
            &self.score,
        )
    }

    /// End the session: stop the sequencer, cancel pending spawns, freeze
    /// the world. Calling it again has no effect.
    pub fn game_over(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.sequencer.game_over(&mut self.events);
        self.spawner.cancel_all();
        self.upgrade_offer.clear();
        self.phase = GamePhase::GameOver;
    }

    /// Restore player health, capped at the maximum. A dead or missing
    /// player is left alone. `PlayerHealed` goes out with the next tick.
    pub fn heal_player(&mut self, amount: u32) {
        let Some(entity) = self.player else {
            return;
        };
        let Ok(player) = self.world.query_one_mut::<&mut Player>(entity) else {
            return;
        };
        if !player.is_alive() {
            return;
        }
        let before = player.health;
        combat::heal_player(player, amount);
        self.events.push(GameEvent::PlayerHealed {
            amount: player.health - before,
            health: player.health,
        });
    }

    /// Current player health, if the player exists.
    pub fn player_health(&self) -> Option<u32> {
        let entity = self.player?;
        self.world.get::<&Player>(entity).ok().map(|p| p.health)
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Seconds per fixed tick.
    pub fn dt(&self) -> f32 {
        self.tuning.tick_rate.dt()
    }

    pub fn tuning(&self) -> &GameTuning {
        &self.tuning
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn fire(&self) -> &WaveFireController {
        &self.fire
    }

    /// Mutable access for upgrade calls from outside the offer flow.
    pub fn fire_mut(&mut self) -> &mut WaveFireController {
        &mut self.fire
    }

    pub fn spawner(&self) -> &EnemySpawnController {
        &self.spawner
    }

    pub fn sequencer(&self) -> &WaveSequencer {
        &self.sequencer
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// Upgrades currently offered, empty outside `UpgradeSelection`.
    pub fn upgrade_offer(&self) -> &[UpgradeKind] {
        &self.upgrade_offer
    }

    /// Spawn an enemy directly (for tests).
    #[cfg(test)]
    pub fn spawn_test_enemy(&mut self, at: Vec2) -> Entity {
        world_setup::spawn_enemy(&mut self.world, &self.tuning.enemy, at, 0)
    }

    /// Mutable world access (for tests).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartGame => {
                if self.phase == GamePhase::MainMenu {
                    let player =
                        world_setup::spawn_player(&mut self.world, &self.tuning.player, Vec2::ZERO);
                    self.player = Some(player);
                    self.sequencer.start();
                    self.time = SimTime::default();
                    self.phase = GamePhase::Active;
                    info!("session started");
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, 4.0);
            }
            PlayerCommand::EndGame => self.game_over(),
            PlayerCommand::SetMoveInput { x, y } => {
                systems::player::set_move_input(&mut self.world, Vec2::new(x, y));
            }
            PlayerCommand::ChooseUpgrade { index } => {
                if self.phase != GamePhase::UpgradeSelection {
                    return;
                }
                let Some(&kind) = self.upgrade_offer.get(index) else {
                    debug!(index, "upgrade choice out of range");
                    return;
                };
                apply_upgrade(kind, self.fire.config_mut());
                self.events.push(GameEvent::UpgradeApplied {
                    upgrade: kind.view(),
                });
                self.upgrade_offer.clear();
                self.phase = GamePhase::Active;
            }
            PlayerCommand::SkipUpgrade => {
                if self.phase == GamePhase::UpgradeSelection {
                    self.upgrade_offer.clear();
                    self.phase = GamePhase::Active;
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32) {
        // 1. Wave progression (may dispatch a spawn batch)
        let completed = self
            .sequencer
            .advance(dt, &mut self.spawner, &mut self.events);
        // 2. Enemy spawning
        self.spawner.run(&mut self.world, &mut self.rng, dt);
        // 3. Wave attack volleys
        let fired = self.fire.advance(
            &mut self.world,
            &self.tuning.projectile,
            dt,
            &mut self.events,
        );
        self.score.projectiles_fired += fired;
        // 4. Player steering + invincibility
        systems::player::run(&mut self.world, &self.tuning.player, dt);
        // 5. Enemy chase
        systems::enemy_ai::run(&mut self.world);
        // 6. Movement integration
        systems::movement::run(&mut self.world, dt);
        // 7. Arena boundary
        systems::player::confine(&mut self.world, self.tuning.player.game_area_radius);
        // 8. Projectile motion + hits (kills feed the sequencer)
        systems::projectiles::run(
            &mut self.world,
            dt,
            &mut self.sequencer,
            &mut self.events,
            &mut self.score,
        );
        // 9. Contact damage
        let player_died = systems::contact::run(&mut self.world, &self.tuning.player, &mut self.events);
        // 10. Cleanup (retired, dead)
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        self.fire.purge_retired(&self.world);

        if player_died {
            self.game_over();
            return;
        }
        if completed.is_some() {
            self.offer_upgrades();
        }
    }

    /// Freeze the session and offer upgrade choices, if any are configured.
    fn offer_upgrades(&mut self) {
        let count = self.tuning.upgrades.choices_per_wave as usize;
        if count == 0 {
            return;
        }
        self.upgrade_offer = roll_offer(&mut self.rng, count);
        self.events.push(GameEvent::UpgradeOffered {
            options: self.upgrade_offer.iter().map(UpgradeKind::view).collect(),
        });
        self.phase = GamePhase::UpgradeSelection;
    }
}
