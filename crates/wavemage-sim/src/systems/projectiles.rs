//! Wave projectile system: ages and moves every projectile, retires expired
//! ones, and damages enemies inside each projectile's hit circle.
//!
//! Damage is applied on every tick a projectile and an enemy overlap; there is
//! no per-pair hit memory.

use glam::Vec2;
use hecs::{Entity, World};

use wavemage_core::components::{Enemy, EnemyUnit, WaveProjectile};
use wavemage_core::enums::HitEffect;
use wavemage_core::events::GameEvent;
use wavemage_core::types::Position;

use crate::combat::{self, DamageOutcome, ScoreState};
use crate::projectile;
use crate::systems::wave_sequencer::WaveSequencer;

/// Working copy of a live projectile for the collision pass.
struct Probe {
    entity: Entity,
    position: Vec2,
    projectile: WaveProjectile,
    hit_this_tick: bool,
}

/// Run the projectile system for one tick.
pub fn run(
    world: &mut World,
    dt: f32,
    sequencer: &mut WaveSequencer,
    events: &mut Vec<GameEvent>,
    score: &mut ScoreState,
) {
    let mut probes = advance_all(world, dt);
    if probes.is_empty() {
        return;
    }

    for probe in probes.iter_mut() {
        for (_entity, (pos, enemy, _enemy)) in
            world.query_mut::<(&Position, &mut EnemyUnit, &Enemy)>()
        {
            if !enemy.is_alive() || !projectile::overlaps(&probe.projectile, probe.position, pos.0) {
                continue;
            }

            let mut killed =
                combat::damage_enemy(enemy, probe.projectile.damage) == DamageOutcome::Killed;

            probe.hit_this_tick = true;
            if let HitEffect::Custom(effect) = probe.projectile.hit_effect {
                let alive_before = enemy.is_alive();
                effect(&mut probe.projectile, enemy);
                // An effect that finishes the enemy off counts as the kill.
                killed |= alive_before && !enemy.is_alive();
            }

            if killed {
                score.record_kill(enemy.score_value);
                events.push(GameEvent::EnemyKilled {
                    wave: enemy.wave,
                    score_value: enemy.score_value,
                });
                sequencer.report_enemy_defeated(events);
            }
        }
    }

    apply_interference(&mut probes);

    for probe in probes {
        if let Ok(mut stored) = world.get::<&mut WaveProjectile>(probe.entity) {
            *stored = probe.projectile;
        }
    }
}

/// Age and move every projectile. Returns copies of those still live.
fn advance_all(world: &mut World, dt: f32) -> Vec<Probe> {
    let mut probes = Vec::new();
    for (entity, (pos, wave)) in world.query_mut::<(&mut Position, &mut WaveProjectile)>() {
        let Some(displacement) = projectile::advance(wave, dt) else {
            continue;
        };
        pos.0 += displacement;
        probes.push(Probe {
            entity,
            position: pos.0,
            projectile: wave.clone(),
            hit_this_tick: false,
        });
    }
    probes
}

/// Projectiles with the interference effect that hit something this tick
/// interfere with every other live projectile.
fn apply_interference(probes: &mut [Probe]) {
    let positions: Vec<Vec2> = probes.iter().map(|p| p.position).collect();
    for (i, probe) in probes.iter_mut().enumerate() {
        if !probe.hit_this_tick || !matches!(probe.projectile.hit_effect, HitEffect::Interference) {
            continue;
        }
        for (j, other) in positions.iter().enumerate() {
            if i != j {
                projectile::interfere(&mut probe.projectile, probe.position, *other);
            }
        }
    }
}

/// Let projectile `a` interfere with projectile `b` in the world.
/// Returns false if either is missing or they are too far apart.
pub fn interfere_pair(world: &mut World, a: Entity, b: Entity) -> bool {
    if world.get::<&WaveProjectile>(b).is_err() {
        return false;
    }
    let Ok(other) = world.get::<&Position>(b).map(|pos| pos.0) else {
        return false;
    };
    let Ok((pos, wave)) = world.query_one_mut::<(&Position, &mut WaveProjectile)>(a) else {
        return false;
    };
    projectile::interfere(wave, pos.0, other)
}
