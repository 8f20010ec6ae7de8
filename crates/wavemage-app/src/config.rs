//! Runner configuration from the environment (and `.env`).

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use wavemage_core::tuning::GameTuning;
use wavemage_sim::engine::SimConfig;

pub const SEED_VAR: &str = "WAVEMAGE_SEED";
pub const TUNING_VAR: &str = "WAVEMAGE_TUNING";
pub const RUN_SECS_VAR: &str = "WAVEMAGE_RUN_SECS";

const DEFAULT_SEED: u64 = 42;
const DEFAULT_RUN_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub seed: u64,
    /// JSON `GameTuning` file; built-in defaults when unset.
    pub tuning_path: Option<PathBuf>,
    /// Wall-clock cap on the run.
    pub run_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            tuning_path: None,
            run_secs: DEFAULT_RUN_SECS,
        }
    }
}

impl AppConfig {
    /// Read the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            seed: parse_or(lookup(SEED_VAR), SEED_VAR, defaults.seed),
            tuning_path: lookup(TUNING_VAR)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            run_secs: parse_or(lookup(RUN_SECS_VAR), RUN_SECS_VAR, defaults.run_secs),
        }
    }

    /// Simulation config for this run. A tuning file that cannot be loaded
    /// is logged and replaced by the defaults.
    pub fn sim_config(&self) -> SimConfig {
        let tuning = match &self.tuning_path {
            Some(path) => load_tuning(path).unwrap_or_else(|e| {
                error!(path = %path.display(), error = %e, "using default tuning");
                GameTuning::default()
            }),
            None => GameTuning::default(),
        };
        SimConfig {
            seed: self.seed,
            tuning,
            ..Default::default()
        }
    }
}

fn parse_or(value: Option<String>, key: &str, default: u64) -> u64 {
    match value {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, default, "not a number, using default");
            default
        }),
    }
}

/// Load a `GameTuning` from a JSON file. Missing fields take defaults.
pub fn load_tuning(path: &Path) -> Result<GameTuning, String> {
    let json =
        fs::read_to_string(path).map_err(|e| format!("Failed to read tuning file: {e}"))?;
    let tuning: GameTuning =
        serde_json::from_str(&json).map_err(|e| format!("Failed to parse tuning: {e}"))?;
    info!(path = %path.display(), "tuning loaded");
    Ok(tuning)
}
