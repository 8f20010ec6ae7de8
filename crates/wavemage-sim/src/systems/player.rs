//! Player steering, invincibility countdown and arena confinement.

use glam::Vec2;
use hecs::World;

use wavemage_core::components::Player;
use wavemage_core::constants::PLAYER_INPUT_DEADZONE;
use wavemage_core::tuning::PlayerTuning;
use wavemage_core::types::{Position, Velocity};

/// Count down invincibility and ease velocity towards the input.
pub fn run(world: &mut World, tuning: &PlayerTuning, dt: f32) {
    for (_entity, (player, vel)) in world.query_mut::<(&mut Player, &mut Velocity)>() {
        player.invincible_secs = (player.invincible_secs - dt).max(0.0);

        if !player.is_alive() {
            vel.0 = Vec2::ZERO;
            continue;
        }

        vel.0 = if player.move_input.length() > PLAYER_INPUT_DEADZONE {
            let target = player.move_input * tuning.move_speed;
            vel.0.lerp(target, (tuning.acceleration * dt).min(1.0))
        } else {
            vel.0.lerp(Vec2::ZERO, (tuning.deceleration * dt).min(1.0))
        };
    }
}

/// Put a player who left the arena back on its edge.
pub fn confine(world: &mut World, game_area_radius: f32) {
    for (_entity, (pos, _player)) in world.query_mut::<(&mut Position, &Player)>() {
        if pos.0.length() > game_area_radius {
            pos.0 = pos.0.normalize_or_zero() * game_area_radius;
        }
    }
}

/// Store a movement input, normalising anything longer than a unit vector.
pub fn set_move_input(world: &mut World, input: Vec2) {
    let input = if input.is_finite() {
        input.clamp_length_max(1.0)
    } else {
        Vec2::ZERO
    };
    for (_entity, player) in world.query_mut::<&mut Player>() {
        player.move_input = input;
    }
}
