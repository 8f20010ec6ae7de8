//! Enemy-player contact damage.
//!
//! Damage lands when an enemy starts overlapping the player, not while it
//! stays there. Projectiles, in contrast, hit every tick they overlap.

use hecs::World;

use wavemage_core::components::{Enemy, EnemyUnit, Player};
use wavemage_core::events::GameEvent;
use wavemage_core::tuning::PlayerTuning;
use wavemage_core::types::Position;

use crate::combat::{self, DamageOutcome};

/// Run contact checks. Returns true if the player died this tick.
pub fn run(world: &mut World, tuning: &PlayerTuning, events: &mut Vec<GameEvent>) -> bool {
    let player = {
        let mut query = world.query::<(&Position, &Player)>();
        let found = query
            .iter()
            .find(|(_, (_, player))| player.is_alive())
            .map(|(entity, (pos, player))| (entity, pos.0, player.radius));
        found
    };
    let Some((player_entity, player_pos, player_radius)) = player else {
        return false;
    };

    let mut hits = Vec::new();
    for (_entity, (pos, enemy, _enemy)) in
        world.query_mut::<(&Position, &mut EnemyUnit, &Enemy)>()
    {
        let touching =
            enemy.is_alive() && pos.0.distance(player_pos) <= enemy.radius + player_radius;
        if touching && !enemy.touching_player {
            hits.push(enemy.contact_damage);
        }
        enemy.touching_player = touching;
    }

    let Ok(player) = world.query_one_mut::<&mut Player>(player_entity) else {
        return false;
    };
    for amount in hits {
        match combat::damage_player(player, amount, tuning.invincibility_secs) {
            DamageOutcome::Ignored => {}
            DamageOutcome::Wounded => events.push(GameEvent::PlayerDamaged {
                amount,
                health: player.health,
            }),
            DamageOutcome::Killed => {
                events.push(GameEvent::PlayerDamaged { amount, health: 0 });
                events.push(GameEvent::PlayerDied);
                return true;
            }
        }
    }
    false
}
