//! Cleanup system: removes retired projectiles and dead enemies.

use hecs::{Entity, World};

use wavemage_core::components::{Enemy, EnemyUnit, WaveProjectile};

/// Despawn everything that finished this tick. Uses a pre-allocated buffer to
/// avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, wave) in world.query_mut::<&WaveProjectile>() {
        if wave.retired {
            despawn_buffer.push(entity);
        }
    }

    for (entity, (enemy, _enemy)) in world.query_mut::<(&EnemyUnit, &Enemy)>() {
        if !enemy.is_alive() {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
