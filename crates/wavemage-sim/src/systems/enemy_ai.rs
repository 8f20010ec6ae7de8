//! Enemy chase behaviour: head straight for the player, stop when close.

use glam::Vec2;
use hecs::World;

use wavemage_core::components::{Enemy, EnemyUnit};
use wavemage_core::constants::FACING_SPEED_THRESHOLD;
use wavemage_core::types::{facing_degrees, Position, Velocity};

use crate::world_setup;

/// Set every enemy's velocity towards the player. Without a player, enemies
/// hold position until one shows up again.
pub fn run(world: &mut World) {
    let target = world_setup::player_position(world);

    for (_entity, (pos, vel, enemy, _enemy)) in
        world.query_mut::<(&Position, &mut Velocity, &mut EnemyUnit, &Enemy)>()
    {
        vel.0 = match target {
            Some(target) if enemy.is_alive() => {
                chase_velocity(pos.0, target, enemy.move_speed, enemy.min_distance)
            }
            _ => Vec2::ZERO,
        };

        if vel.speed() > FACING_SPEED_THRESHOLD {
            enemy.facing_deg = facing_degrees(vel.0);
        }
    }
}

/// Velocity of `move_speed` towards `target`, or zero within `min_distance`.
pub fn chase_velocity(from: Vec2, target: Vec2, move_speed: f32, min_distance: f32) -> Vec2 {
    if from.distance(target) > min_distance {
        (target - from).normalize_or_zero() * move_speed
    } else {
        Vec2::ZERO
    }
}
