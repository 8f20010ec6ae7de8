//! Simulation engine for the wave survivor game.
//!
//! Owns the hecs ECS world, runs systems each tick, and produces
//! GameStateSnapshots for a frontend.

pub mod combat;
pub mod engine;
pub mod observer;
pub mod projectile;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use observer::GameEventListener;
pub use wavemage_core as core;

#[cfg(test)]
mod tests;
