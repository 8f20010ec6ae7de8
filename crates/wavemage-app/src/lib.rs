//! Headless runner for the wave survivor simulation.
//!
//! Wires configuration, the game loop thread and a scripted player together
//! so a session can run unattended and report how far it got.

pub mod autopilot;
pub mod config;
pub mod game_loop;
pub mod state;

pub use wavemage_core as core;
