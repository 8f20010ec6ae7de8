//! ECS systems that operate on the simulation world each tick.
//!
//! Stateless systems are plain functions over `&mut World`. The three
//! stateful services (fire controller, spawn controller, sequencer) are
//! owned by the engine and passed in by reference.

pub mod cleanup;
pub mod contact;
pub mod enemy_ai;
pub mod enemy_spawner;
pub mod movement;
pub mod player;
pub mod projectiles;
pub mod snapshot;
pub mod wave_fire;
pub mod wave_sequencer;
