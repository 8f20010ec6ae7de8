use std::time::{Duration, Instant};

use tracing::{error, info};

use wavemage_app::autopilot;
use wavemage_app::config::AppConfig;
use wavemage_app::core::commands::PlayerCommand;
use wavemage_app::game_loop;
use wavemage_app::state::AppState;

/// How often the driver polls the latest snapshot.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}

fn main() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = AppConfig::from_env();
    let sim_config = config.sim_config();
    let arena_radius = sim_config.tuning.player.game_area_radius;
    info!(seed = config.seed, run_secs = config.run_secs, "starting run");

    let mut state = AppState::new();
    let (tx, handle) = match game_loop::spawn_game_loop(sim_config, state.latest_snapshot.clone()) {
        Ok(spawned) => spawned,
        Err(e) => {
            error!(error = %e, "could not start game loop");
            return;
        }
    };
    state.command_tx = Some(tx);
    state.send(PlayerCommand::StartGame);

    let deadline = Instant::now() + Duration::from_secs(config.run_secs);
    while Instant::now() < deadline && !handle.is_finished() {
        std::thread::sleep(POLL_INTERVAL);
        let Some(snapshot) = state.snapshot() else {
            continue;
        };
        if let Some(command) = autopilot::decide(&snapshot, arena_radius) {
            state.send(command);
        }
    }

    state.shutdown();
    let last = match handle.join() {
        Ok(last) => last,
        Err(_) => {
            error!("game loop panicked");
            return;
        }
    };

    match last {
        Some(snapshot) => info!(
            phase = ?snapshot.phase,
            wave = snapshot.wave.current_wave,
            kills = snapshot.score.enemies_killed,
            score = snapshot.score.score,
            projectiles = snapshot.score.projectiles_fired,
            health = snapshot.player.as_ref().map(|p| p.health).unwrap_or(0),
            "run finished"
        ),
        None => info!("run finished before the first tick"),
    }
}
