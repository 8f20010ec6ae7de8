//! Wave progression sequencer.
//!
//! Drives the wave lifecycle as a resumable state machine:
//! start delay → wave active → waiting for clear → cooldown → next wave,
//! ending only at game over. Every wait is stored as time remaining in the
//! phase, so nothing resumes after `game_over` has moved the phase to
//! `Stopped`.

use tracing::info;

use wavemage_core::enums::SequencerPhase;
use wavemage_core::events::GameEvent;
use wavemage_core::tuning::WaveTuning;

use crate::systems::enemy_spawner::EnemySpawnController;

#[derive(Debug, Clone)]
pub struct WaveSequencer {
    tuning: WaveTuning,
    phase: SequencerPhase,
    current_wave: u32,
    enemies_alive: u32,
}

impl WaveSequencer {
    pub fn new(tuning: WaveTuning) -> Self {
        Self {
            tuning,
            phase: SequencerPhase::Idle,
            current_wave: 0,
            enemies_alive: 0,
        }
    }

    pub fn phase(&self) -> SequencerPhase {
        self.phase
    }

    /// Index of the latest wave started (0 before the first).
    pub fn current_wave(&self) -> u32 {
        self.current_wave
    }

    /// Authoritative live-enemy counter.
    pub fn enemies_alive(&self) -> u32 {
        self.enemies_alive
    }

    /// Running: started and not stopped.
    pub fn is_active(&self) -> bool {
        !matches!(self.phase, SequencerPhase::Idle | SequencerPhase::Stopped)
    }

    /// Begin the sequence; the first wave starts after the start delay.
    /// Ignored unless idle.
    pub fn start(&mut self) {
        if self.phase != SequencerPhase::Idle {
            return;
        }
        self.current_wave = 0;
        self.enemies_alive = 0;
        self.phase = SequencerPhase::StartDelay {
            remaining: self.tuning.start_delay,
        };
    }

    /// Advance the sequence by `dt`. Returns the wave number if a wave was
    /// completed during this call.
    pub fn advance(
        &mut self,
        dt: f32,
        spawner: &mut EnemySpawnController,
        events: &mut Vec<GameEvent>,
    ) -> Option<u32> {
        let mut completed = None;

        match self.phase {
            SequencerPhase::Idle | SequencerPhase::Stopped | SequencerPhase::WaveActive { .. } => {}
            SequencerPhase::StartDelay { remaining } => {
                let remaining = remaining - dt;
                self.phase = if remaining <= 0.0 {
                    SequencerPhase::WaveActive { wave: 1 }
                } else {
                    SequencerPhase::StartDelay { remaining }
                };
            }
            SequencerPhase::WaitingForClear { wave, until_poll } => {
                let until_poll = until_poll - dt;
                if until_poll > 0.0 {
                    self.phase = SequencerPhase::WaitingForClear { wave, until_poll };
                } else if self.enemies_alive == 0 {
                    info!(wave, "wave completed");
                    events.push(GameEvent::WaveCompleted { wave });
                    self.phase = SequencerPhase::Cooldown {
                        wave,
                        remaining: self.tuning.time_between_waves,
                    };
                    completed = Some(wave);
                } else {
                    self.phase = SequencerPhase::WaitingForClear {
                        wave,
                        until_poll: self.tuning.clear_poll_interval,
                    };
                }
            }
            SequencerPhase::Cooldown { wave, remaining } => {
                let remaining = remaining - dt;
                self.phase = if remaining <= 0.0 {
                    SequencerPhase::WaveActive { wave: wave + 1 }
                } else {
                    SequencerPhase::Cooldown { wave, remaining }
                };
            }
        }

        if let SequencerPhase::WaveActive { wave } = self.phase {
            self.begin_wave(wave, spawner, events);
        }
        completed
    }

    /// Enter wave `wave`: dispatch its whole spawn batch, reset the live
    /// counter, then wait for the clear.
    fn begin_wave(&mut self, wave: u32, spawner: &mut EnemySpawnController, events: &mut Vec<GameEvent>) {
        self.current_wave = wave;
        events.push(GameEvent::WaveStarted { wave });

        let count = self.tuning.enemies_for_wave(wave);
        spawner.spawn_wave(count, wave);
        self.enemies_alive = count;
        events.push(GameEvent::EnemyCountChanged { count });
        info!(wave, enemies = count, "wave started");

        // First clear check runs on the next advance.
        self.phase = SequencerPhase::WaitingForClear {
            wave,
            until_poll: 0.0,
        };
    }

    /// Record one enemy death. The counter never goes below zero.
    pub fn report_enemy_defeated(&mut self, events: &mut Vec<GameEvent>) {
        self.enemies_alive = self.enemies_alive.saturating_sub(1);
        events.push(GameEvent::EnemyCountChanged {
            count: self.enemies_alive,
        });
    }

    /// Stop the sequence for good. Emits `GameOver` the first time only;
    /// returns whether this call did the stopping.
    pub fn game_over(&mut self, events: &mut Vec<GameEvent>) -> bool {
        if self.phase == SequencerPhase::Stopped {
            return false;
        }
        self.phase = SequencerPhase::Stopped;
        info!(wave_reached = self.current_wave, "game over");
        events.push(GameEvent::GameOver {
            wave_reached: self.current_wave,
        });
        true
    }
}
