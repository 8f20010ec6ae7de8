//! Game loop thread: runs the simulation engine at the tuning tick rate and
//! publishes snapshots.
//!
//! The engine is created inside this thread so it never crosses threads.
//! Commands arrive via an `mpsc` channel. The latest snapshot is stored in
//! shared state for polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use wavemage_core::enums::GamePhase;
use wavemage_core::state::GameStateSnapshot;
use wavemage_sim::engine::{SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Wall-clock duration of one tick at 1x speed.
pub fn tick_duration(dt: f32) -> Duration {
    Duration::from_secs_f32(dt.max(0.0))
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and a handle yielding the last snapshot when
/// the loop exits.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> Result<
    (
        mpsc::Sender<GameLoopCommand>,
        JoinHandle<Option<GameStateSnapshot>>,
    ),
    String,
> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("wavemage-game-loop".into())
        .spawn(move || run_game_loop(config, cmd_rx, &latest_snapshot))
        .map_err(|e| format!("Failed to spawn game loop thread: {e}"))?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown, channel disconnect or game over.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) -> Option<GameStateSnapshot> {
    let mut engine = SimulationEngine::new(config);
    let tick = tick_duration(engine.dt());
    let mut next_tick_time = Instant::now();
    let mut last = None;

    info!(tick_ms = tick.as_secs_f32() * 1000.0, "game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => return last,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return last,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();
        for event in &snapshot.events {
            debug!(?event, "game event");
        }
        let finished = snapshot.phase == GamePhase::GameOver;

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot.clone());
        }
        last = Some(snapshot);

        if finished {
            info!("game loop finished");
            return last;
        }

        // 4. Sleep until next tick, adjusting for time_scale
        let time_scale = engine.time_scale();
        let effective_tick_duration = if time_scale > 0.001 {
            tick.div_f32(time_scale)
        } else {
            tick
        };

        next_tick_time += effective_tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > effective_tick_duration * 2 {
            // Too far behind, reset rather than catch up
            next_tick_time = now;
        }
    }
}
