//! Tests for projectile kinematics, combat, the three services and the engine.

use glam::Vec2;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use wavemage_core::commands::PlayerCommand;
use wavemage_core::components::{EnemyUnit, Player, WaveProjectile};
use wavemage_core::enums::{GamePhase, HitEffect, SequencerPhase};
use wavemage_core::events::GameEvent;
use wavemage_core::tuning::*;
use wavemage_core::types::{Position, Velocity};

use crate::combat::{self, DamageOutcome, ScoreState};
use crate::engine::{SimConfig, SimulationEngine};
use crate::projectile;
use crate::systems::enemy_spawner::{sample_spawn_position, EnemySpawnController};
use crate::systems::wave_fire::{volley_angles, WaveFireController};
use crate::systems::wave_sequencer::WaveSequencer;
use crate::systems::{cleanup, contact, enemy_ai, player, projectiles};
use crate::world_setup;

const EPS: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPS
}

fn started_engine(tuning: GameTuning) -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig {
        tuning,
        ..Default::default()
    });
    engine.queue_command(PlayerCommand::StartGame);
    engine.tick();
    engine
}

fn still_projectile_tuning() -> ProjectileTuning {
    ProjectileTuning {
        amplitude: 0.0,
        ..Default::default()
    }
}

fn enemy_health(world: &World, entity: hecs::Entity) -> u32 {
    world.get::<&EnemyUnit>(entity).map(|e| e.health).unwrap()
}

// ---- Projectile kinematics ----

#[test]
fn test_projectile_direction_normalized_and_facing() {
    let tuning = ProjectileTuning::default();
    let wave = projectile::new_projectile(&tuning, Vec2::new(0.0, 3.0), None, None);
    assert!(approx(wave.direction.length(), 1.0));
    assert!(approx(wave.rotation_deg, 90.0));
    assert_eq!(wave.speed, tuning.speed);
    assert_eq!(wave.damage, tuning.damage);
}

#[test]
fn test_projectile_overrides_only_when_positive() {
    let tuning = ProjectileTuning::default();
    let wave = projectile::new_projectile(&tuning, Vec2::X, Some(9.0), Some(25));
    assert_eq!(wave.speed, 9.0);
    assert_eq!(wave.damage, 25);

    let wave = projectile::new_projectile(&tuning, Vec2::X, Some(-1.0), Some(0));
    assert_eq!(wave.speed, tuning.speed);
    assert_eq!(wave.damage, tuning.damage);
}

#[test]
fn test_projectile_oscillation_step() {
    let tuning = ProjectileTuning::default();
    let mut wave = projectile::new_projectile(&tuning, Vec2::X, None, None);
    let displacement = projectile::advance(&mut wave, 0.1).unwrap();

    // base = 5 * 0.1 along X, sway = sin(0.1 * 2) * 1 * 0.1 along +Y
    assert!(approx(displacement.x, 0.5), "x = {}", displacement.x);
    assert!(approx(displacement.y, (0.2_f32).sin() * 0.1), "y = {}", displacement.y);
    assert!(approx(wave.scale, 1.0 + (0.1 / 3.0) * 0.5));
}

#[test]
fn test_projectile_age_monotonic_and_retires_once() {
    let tuning = ProjectileTuning::default();
    let mut wave = projectile::new_projectile(&tuning, Vec2::X, None, None);

    let mut last_age = 0.0;
    let mut retirements = 0;
    for _ in 0..100 {
        let was_retired = wave.retired;
        let step = projectile::advance(&mut wave, 0.1);
        assert!(wave.age >= last_age, "age went backwards");
        last_age = wave.age;

        if !was_retired && wave.retired {
            retirements += 1;
            assert!(step.is_none(), "retiring tick must not move");
            assert!(wave.age >= wave.lifetime);
        }
        if was_retired {
            assert!(step.is_none());
        }
    }
    assert_eq!(retirements, 1);
}

#[test]
fn test_interference_compounds() {
    let tuning = ProjectileTuning::default();
    let mut wave = projectile::new_projectile(&tuning, Vec2::X, None, None);

    assert!(projectile::interfere(&mut wave, Vec2::ZERO, Vec2::new(0.5, 0.0)));
    assert_eq!(wave.damage, 15);
    assert!(approx(wave.speed, 6.0));

    assert!(projectile::interfere(&mut wave, Vec2::ZERO, Vec2::new(0.5, 0.0)));
    assert_eq!(wave.damage, 22, "15 * 1.5 = 22.5 rounds to even");
    assert!(approx(wave.speed, 7.2));
}

#[test]
fn test_interference_requires_proximity() {
    let tuning = ProjectileTuning::default();
    let mut wave = projectile::new_projectile(&tuning, Vec2::X, None, None);
    assert!(!projectile::interfere(&mut wave, Vec2::ZERO, Vec2::new(1.0, 0.0)));
    assert_eq!(wave.damage, 10);
    assert_eq!(wave.speed, 5.0);
}

#[test]
fn test_interfere_pair_only_changes_caller() {
    let mut world = World::new();
    let tuning = ProjectileTuning::default();
    let a = world_setup::spawn_projectile(&mut world, &tuning, Vec2::ZERO, Vec2::X, None, None, HitEffect::None);
    let b = world_setup::spawn_projectile(&mut world, &tuning, Vec2::new(0.2, 0.0), Vec2::X, None, None, HitEffect::None);

    assert!(projectiles::interfere_pair(&mut world, a, b));
    assert_eq!(world.get::<&WaveProjectile>(a).unwrap().damage, 15);
    assert_eq!(world.get::<&WaveProjectile>(b).unwrap().damage, 10);

    let _ = world.despawn(b);
    assert!(!projectiles::interfere_pair(&mut world, a, b));
}

// ---- Combat ----

#[test]
fn test_enemy_health_is_clamped_sum_and_dies_once() {
    let mut world = World::new();
    let entity = world_setup::spawn_enemy(&mut world, &EnemyTuning::default(), Vec2::ZERO, 1);
    let mut enemy = world.get::<&mut EnemyUnit>(entity).unwrap();

    let damages = [7, 5, 20, 4];
    let outcomes: Vec<DamageOutcome> = damages
        .iter()
        .map(|&d| combat::damage_enemy(&mut enemy, d))
        .collect();

    assert_eq!(enemy.health, 30u32.saturating_sub(damages.iter().sum()));
    assert_eq!(
        outcomes,
        vec![
            DamageOutcome::Wounded,
            DamageOutcome::Wounded,
            DamageOutcome::Killed,
            DamageOutcome::Ignored,
        ]
    );
}

#[test]
fn test_player_invincibility_blocks_damage() {
    let mut player = Player {
        health: 100,
        max_health: 100,
        move_input: Vec2::ZERO,
        invincible_secs: 0.0,
        radius: 0.5,
    };
    assert_eq!(combat::damage_player(&mut player, 10, 1.0), DamageOutcome::Wounded);
    assert_eq!(player.health, 90);
    assert_eq!(combat::damage_player(&mut player, 10, 1.0), DamageOutcome::Ignored);
    assert_eq!(player.health, 90);

    player.invincible_secs = 0.0;
    assert_eq!(combat::damage_player(&mut player, 500, 1.0), DamageOutcome::Killed);
    assert_eq!(player.health, 0);

    combat::heal_player(&mut player, 1000);
    assert_eq!(player.health, 100);
}

// ---- Projectile system ----

#[test]
fn test_stationary_overlap_damages_every_tick() {
    let mut world = World::new();
    let enemy = world_setup::spawn_enemy(
        &mut world,
        &EnemyTuning {
            max_health: 100,
            ..Default::default()
        },
        Vec2::ZERO,
        1,
    );
    world_setup::spawn_projectile(
        &mut world,
        &still_projectile_tuning(),
        Vec2::ZERO,
        Vec2::X,
        Some(1e-6),
        None,
        HitEffect::None,
    );

    let mut sequencer = WaveSequencer::new(WaveTuning::default());
    let mut events = Vec::new();
    let mut score = ScoreState::default();
    for _ in 0..3 {
        projectiles::run(&mut world, 0.1, &mut sequencer, &mut events, &mut score);
    }
    assert_eq!(enemy_health(&world, enemy), 70);
}

#[test]
fn test_projectile_hit_radius_is_inclusive() {
    let mut world = World::new();
    let tuning = still_projectile_tuning();
    // After one 0.1 s step at speed 5 the projectile sits at x = 0.5.
    let near = world_setup::spawn_enemy(&mut world, &EnemyTuning::default(), Vec2::new(0.9, 0.0), 1);
    let far = world_setup::spawn_enemy(&mut world, &EnemyTuning::default(), Vec2::new(1.2, 0.0), 1);
    world_setup::spawn_projectile(&mut world, &tuning, Vec2::ZERO, Vec2::X, None, None, HitEffect::None);

    let mut sequencer = WaveSequencer::new(WaveTuning::default());
    projectiles::run(&mut world, 0.1, &mut sequencer, &mut Vec::new(), &mut ScoreState::default());

    assert_eq!(enemy_health(&world, near), 20);
    assert_eq!(enemy_health(&world, far), 30);
}

#[test]
fn test_kill_reports_to_sequencer_once() {
    let mut world = World::new();
    let mut spawner = EnemySpawnController::new(SpawnTuning::default(), EnemyTuning::default());
    let mut sequencer = WaveSequencer::new(WaveTuning {
        start_delay: 0.0,
        ..Default::default()
    });
    let mut events = Vec::new();
    sequencer.start();
    sequencer.advance(0.1, &mut spawner, &mut events);
    assert_eq!(sequencer.enemies_alive(), 5);

    let enemy = world_setup::spawn_enemy(&mut world, &EnemyTuning::default(), Vec2::ZERO, 1);
    world_setup::spawn_projectile(
        &mut world,
        &still_projectile_tuning(),
        Vec2::ZERO,
        Vec2::X,
        Some(1e-6),
        Some(30),
        HitEffect::None,
    );

    events.clear();
    let mut score = ScoreState::default();
    for _ in 0..5 {
        projectiles::run(&mut world, 0.1, &mut sequencer, &mut events, &mut score);
    }

    assert_eq!(enemy_health(&world, enemy), 0);
    assert_eq!(sequencer.enemies_alive(), 4);
    let kills = events
        .iter()
        .filter(|e| matches!(e, GameEvent::EnemyKilled { .. }))
        .count();
    assert_eq!(kills, 1);
    assert_eq!(score.enemies_killed, 1);
    assert_eq!(score.score, 10);

    cleanup::run(&mut world, &mut Vec::new());
    assert!(!world.contains(enemy), "dead enemy should be despawned");
}

fn add_one_damage(wave: &mut WaveProjectile, _enemy: &mut EnemyUnit) {
    wave.damage += 1;
}

#[test]
fn test_custom_hit_effect_runs_after_hit() {
    let mut world = World::new();
    world_setup::spawn_enemy(
        &mut world,
        &EnemyTuning {
            max_health: 1000,
            ..Default::default()
        },
        Vec2::ZERO,
        1,
    );
    let wave = world_setup::spawn_projectile(
        &mut world,
        &still_projectile_tuning(),
        Vec2::ZERO,
        Vec2::X,
        Some(1e-6),
        None,
        HitEffect::Custom(add_one_damage),
    );

    let mut sequencer = WaveSequencer::new(WaveTuning::default());
    projectiles::run(&mut world, 0.1, &mut sequencer, &mut Vec::new(), &mut ScoreState::default());
    projectiles::run(&mut world, 0.1, &mut sequencer, &mut Vec::new(), &mut ScoreState::default());

    assert_eq!(world.get::<&WaveProjectile>(wave).unwrap().damage, 12);
}

fn finish_off(_wave: &mut WaveProjectile, enemy: &mut EnemyUnit) {
    enemy.health = 0;
}

#[test]
fn test_custom_effect_kill_is_reported() {
    let mut world = World::new();
    let mut spawner = EnemySpawnController::new(SpawnTuning::default(), EnemyTuning::default());
    let mut sequencer = WaveSequencer::new(WaveTuning {
        start_delay: 0.0,
        ..Default::default()
    });
    let mut events = Vec::new();
    sequencer.start();
    sequencer.advance(0.1, &mut spawner, &mut events);
    assert_eq!(sequencer.enemies_alive(), 5);

    let enemy = world_setup::spawn_enemy(
        &mut world,
        &EnemyTuning {
            max_health: 1000,
            ..Default::default()
        },
        Vec2::ZERO,
        1,
    );
    world_setup::spawn_projectile(
        &mut world,
        &still_projectile_tuning(),
        Vec2::ZERO,
        Vec2::X,
        Some(1e-6),
        None,
        HitEffect::Custom(finish_off),
    );

    events.clear();
    let mut score = ScoreState::default();
    for _ in 0..3 {
        projectiles::run(&mut world, 0.1, &mut sequencer, &mut events, &mut score);
    }

    assert_eq!(enemy_health(&world, enemy), 0);
    assert_eq!(sequencer.enemies_alive(), 4, "effect kill must reach the sequencer");
    let kills = events
        .iter()
        .filter(|e| matches!(e, GameEvent::EnemyKilled { .. }))
        .count();
    assert_eq!(kills, 1);
    assert_eq!(score.enemies_killed, 1);
}

#[test]
fn test_interference_effect_after_hit() {
    let mut world = World::new();
    world_setup::spawn_enemy(
        &mut world,
        &EnemyTuning {
            max_health: 1000,
            ..Default::default()
        },
        Vec2::ZERO,
        1,
    );
    let tuning = still_projectile_tuning();
    let a = world_setup::spawn_projectile(&mut world, &tuning, Vec2::ZERO, Vec2::X, Some(1e-6), None, HitEffect::Interference);
    let b = world_setup::spawn_projectile(&mut world, &tuning, Vec2::new(0.1, 0.0), Vec2::X, Some(1e-6), None, HitEffect::None);

    let mut sequencer = WaveSequencer::new(WaveTuning::default());
    projectiles::run(&mut world, 0.1, &mut sequencer, &mut Vec::new(), &mut ScoreState::default());

    assert_eq!(world.get::<&WaveProjectile>(a).unwrap().damage, 15);
    assert_eq!(world.get::<&WaveProjectile>(b).unwrap().damage, 10);
}

// ---- Fire controller ----

#[test]
fn test_volley_angles_four_directions() {
    let angles = volley_angles(&WaveFireConfig::default());
    assert_eq!(angles, vec![0.0, 90.0, 180.0, 270.0]);
}

#[test]
fn test_volley_angles_interleaved_hexagons() {
    let mut config = WaveFireConfig::default();
    config.add_extra_volley();
    let angles = volley_angles(&config);
    assert_eq!(angles.len(), 12);

    let expected = [
        0.0, 60.0, 120.0, 180.0, 240.0, 300.0, // ring 0
        30.0, 90.0, 150.0, 210.0, 270.0, 330.0, // ring 1
    ];
    for (got, want) in angles.iter().zip(expected.iter()) {
        assert!(approx(*got, *want), "got {got}, want {want}");
    }
}

#[test]
fn test_fire_controller_fires_on_interval() {
    let mut world = World::new();
    world_setup::spawn_player(&mut world, &PlayerTuning::default(), Vec2::ZERO);
    let mut fire = WaveFireController::new(WaveFireConfig::default());
    let tuning = ProjectileTuning::default();
    let mut events = Vec::new();

    let mut fired = 0;
    for _ in 0..9 {
        fired += fire.advance(&mut world, &tuning, 0.1, &mut events);
    }
    assert_eq!(fired, 0, "interval is 1 s");
    fired += fire.advance(&mut world, &tuning, 0.1001, &mut events);
    assert_eq!(fired, 4);
    assert_eq!(fire.timer(), 0.0);
    assert_eq!(fire.active_projectiles().len(), 4);
    assert!(matches!(events.last(), Some(GameEvent::VolleyFired { projectiles: 4 })));
}

#[test]
fn test_fire_controller_volley_uses_multipliers() {
    let mut world = World::new();
    let mut fire = WaveFireController::new(WaveFireConfig::default());
    fire.increase_damage(1.2);
    fire.increase_damage(1.2);
    fire.increase_projectile_speed(2.0);
    fire.fire_volley(&mut world, &ProjectileTuning::default(), Vec2::new(1.0, 1.0));

    let mut query = world.query::<(&Position, &WaveProjectile)>();
    for (_, (pos, wave)) in query.iter() {
        assert_eq!(pos.0, Vec2::new(1.0, 1.0));
        assert_eq!(wave.damage, 14);
        assert!(approx(wave.speed, 10.0));
    }
}

#[test]
fn test_fire_controller_without_player_is_idle() {
    let mut world = World::new();
    let mut fire = WaveFireController::new(WaveFireConfig::default());
    let mut events = Vec::new();
    for _ in 0..50 {
        assert_eq!(fire.advance(&mut world, &ProjectileTuning::default(), 0.1, &mut events), 0);
    }
    assert_eq!(fire.timer(), 0.0);
    assert!(events.is_empty());
}

#[test]
fn test_fire_controller_applies_hit_effect() {
    let mut world = World::new();
    let mut fire = WaveFireController::new(WaveFireConfig::default());
    fire.set_hit_effect(HitEffect::Interference);
    fire.fire_volley(&mut world, &ProjectileTuning::default(), Vec2::ZERO);

    assert_eq!(fire.active_projectiles().len(), 4);
    for &entity in fire.active_projectiles() {
        let wave = world.get::<&WaveProjectile>(entity).unwrap();
        assert!(matches!(wave.hit_effect, HitEffect::Interference));
    }

    let mut custom = WaveFireController::new(WaveFireConfig::default())
        .with_hit_effect(HitEffect::Custom(add_one_damage));
    let mut world = World::new();
    custom.fire_volley(&mut world, &ProjectileTuning::default(), Vec2::ZERO);
    let entity = custom.active_projectiles()[0];
    assert!(matches!(
        world.get::<&WaveProjectile>(entity).unwrap().hit_effect,
        HitEffect::Custom(_)
    ));
}

#[test]
fn test_fire_controller_clamps_loaded_direction_count() {
    let config = WaveFireConfig {
        direction_count: 0,
        ..Default::default()
    };
    let mut fire = WaveFireController::new(config);
    assert_eq!(fire.config().direction_count, 2);

    let mut world = World::new();
    assert_eq!(fire.fire_volley(&mut world, &ProjectileTuning::default(), Vec2::ZERO), 2);
}

#[test]
fn test_engine_clamps_tuned_direction_count() {
    let tuning: GameTuning = serde_json::from_str(r#"{ "fire": { "direction_count": 1 } }"#).unwrap();
    let engine = SimulationEngine::new(SimConfig {
        tuning,
        ..Default::default()
    });
    assert_eq!(volley_angles(engine.fire().config()), vec![0.0, 180.0]);
}

#[test]
fn test_fire_controller_purges_retired() {
    let mut world = World::new();
    let mut fire = WaveFireController::new(WaveFireConfig::default());
    let tuning = ProjectileTuning::default();
    fire.fire_volley(&mut world, &tuning, Vec2::ZERO);
    assert_eq!(fire.active_projectiles().len(), 4);

    let mut sequencer = WaveSequencer::new(WaveTuning::default());
    let mut buffer = Vec::new();
    for _ in 0..40 {
        projectiles::run(&mut world, 0.1, &mut sequencer, &mut Vec::new(), &mut ScoreState::default());
        cleanup::run(&mut world, &mut buffer);
        fire.purge_retired(&world);
    }
    assert!(fire.active_projectiles().is_empty());
    assert_eq!(world.query::<&WaveProjectile>().iter().count(), 0);

    // Purging again is harmless.
    fire.purge_retired(&world);
}

#[test]
fn test_direction_count_upgrade_clamps() {
    let mut fire = WaveFireController::new(WaveFireConfig::default());
    fire.set_direction_count(1);
    assert_eq!(fire.config().direction_count, 2);
    assert_eq!(volley_angles(fire.config()), vec![0.0, 180.0]);
}

// ---- Spawn controller ----

#[test]
fn test_spawn_positions_within_ring() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let tuning = SpawnTuning::default();
    for _ in 0..1000 {
        let at = sample_spawn_position(&mut rng, &tuning, Some(Vec2::ZERO));
        let d = at.length();
        assert!((8.0 - EPS..=12.0 + EPS).contains(&d), "distance {d}");
        assert!(at.distance(Vec2::ZERO) >= 5.0);
    }
}

#[test]
fn test_spawn_positions_avoid_offset_player() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let tuning = SpawnTuning::default();
    let player = Vec2::new(10.0, 0.0);
    let ok = (0..1000)
        .map(|_| sample_spawn_position(&mut rng, &tuning, Some(player)))
        .filter(|at| at.distance(player) >= 5.0)
        .count();
    assert!(ok >= 990, "only {ok} of 1000 samples kept their distance");
}

#[test]
fn test_spawn_sampling_terminates_when_impossible() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let tuning = SpawnTuning {
        min_distance_from_player: 100.0,
        ..Default::default()
    };
    let at = sample_spawn_position(&mut rng, &tuning, Some(Vec2::ZERO));
    assert!((8.0 - EPS..=12.0 + EPS).contains(&at.length()));
}

#[test]
fn test_spawn_batch_is_spaced_by_delay() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut spawner = EnemySpawnController::new(SpawnTuning::default(), EnemyTuning::default());
    spawner.spawn_wave(3, 1);

    assert_eq!(spawner.run(&mut world, &mut rng, 0.1), 1, "first spawn is immediate");
    assert_eq!(spawner.run(&mut world, &mut rng, 0.3), 0);
    assert_eq!(spawner.run(&mut world, &mut rng, 0.2), 1);
    assert_eq!(spawner.pending(), 1);
    assert_eq!(spawner.run(&mut world, &mut rng, 0.5), 1);
    assert_eq!(spawner.pending(), 0);
    assert!(spawner.batches().is_empty());

    let enemies = world.query::<&EnemyUnit>().iter().count();
    assert_eq!(enemies, 3);
}

#[test]
fn test_cancelled_batch_never_spawns() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut spawner = EnemySpawnController::new(SpawnTuning::default(), EnemyTuning::default());
    spawner.spawn_wave(5, 1);
    spawner.run(&mut world, &mut rng, 0.1);
    spawner.cancel_all();
    for _ in 0..20 {
        spawner.run(&mut world, &mut rng, 0.5);
    }
    assert_eq!(world.query::<&EnemyUnit>().iter().count(), 1);
}

// ---- Sequencer ----

fn fast_waves() -> WaveTuning {
    WaveTuning {
        start_delay: 0.0,
        time_between_waves: 0.0,
        base_enemies: 5,
        growth_factor: 1.5,
        ..Default::default()
    }
}

#[test]
fn test_sequencer_wave_sizes_escalate() {
    let mut sequencer = WaveSequencer::new(fast_waves());
    let mut spawner = EnemySpawnController::new(SpawnTuning::default(), EnemyTuning::default());
    let mut events = Vec::new();
    sequencer.start();

    let mut sizes = Vec::new();
    for _ in 0..3 {
        // Enter the next wave.
        sequencer.advance(0.1, &mut spawner, &mut events);
        sizes.push(spawner.pending());
        assert_eq!(sequencer.enemies_alive(), spawner.pending());

        for _ in 0..spawner.pending() {
            sequencer.report_enemy_defeated(&mut events);
        }
        spawner.cancel_all();
        // Poll sees the clear.
        let completed = sequencer.advance(0.1, &mut spawner, &mut events);
        assert_eq!(completed, Some(sequencer.current_wave()));
    }
    assert_eq!(sizes, vec![5, 8, 11]);
}

#[test]
fn test_sequencer_waits_for_clear() {
    let mut sequencer = WaveSequencer::new(fast_waves());
    let mut spawner = EnemySpawnController::new(SpawnTuning::default(), EnemyTuning::default());
    let mut events = Vec::new();
    sequencer.start();
    sequencer.advance(0.1, &mut spawner, &mut events);

    for _ in 0..100 {
        assert_eq!(sequencer.advance(0.05, &mut spawner, &mut events), None);
    }
    assert!(matches!(sequencer.phase(), SequencerPhase::WaitingForClear { wave: 1, .. }));
    assert!(!events.iter().any(|e| matches!(e, GameEvent::WaveCompleted { .. })));
}

#[test]
fn test_sequencer_event_order() {
    let mut sequencer = WaveSequencer::new(WaveTuning {
        start_delay: 0.5,
        ..fast_waves()
    });
    let mut spawner = EnemySpawnController::new(SpawnTuning::default(), EnemyTuning::default());
    let mut events = Vec::new();
    sequencer.start();
    assert!(matches!(sequencer.phase(), SequencerPhase::StartDelay { .. }));

    sequencer.advance(0.3, &mut spawner, &mut events);
    assert!(events.is_empty(), "still in start delay");
    sequencer.advance(0.3, &mut spawner, &mut events);
    assert_eq!(
        events,
        vec![
            GameEvent::WaveStarted { wave: 1 },
            GameEvent::EnemyCountChanged { count: 5 },
        ]
    );
}

#[test]
fn test_defeat_counter_floors_at_zero() {
    let mut sequencer = WaveSequencer::new(fast_waves());
    let mut events = Vec::new();
    sequencer.report_enemy_defeated(&mut events);
    sequencer.report_enemy_defeated(&mut events);
    assert_eq!(sequencer.enemies_alive(), 0);
    assert_eq!(events.last(), Some(&GameEvent::EnemyCountChanged { count: 0 }));
}

#[test]
fn test_sequencer_game_over_is_idempotent_and_final() {
    let mut sequencer = WaveSequencer::new(fast_waves());
    let mut spawner = EnemySpawnController::new(SpawnTuning::default(), EnemyTuning::default());
    let mut events = Vec::new();
    sequencer.start();
    sequencer.advance(0.1, &mut spawner, &mut events);
    spawner.cancel_all();

    events.clear();
    assert!(sequencer.game_over(&mut events));
    assert!(!sequencer.game_over(&mut events));
    assert_eq!(events, vec![GameEvent::GameOver { wave_reached: 1 }]);

    for _ in 0..5 {
        sequencer.report_enemy_defeated(&mut events);
    }
    events.clear();
    for _ in 0..100 {
        assert_eq!(sequencer.advance(0.5, &mut spawner, &mut events), None);
    }
    assert_eq!(sequencer.phase(), SequencerPhase::Stopped);
    assert_eq!(spawner.pending(), 0);
    assert!(events.is_empty());
}

// ---- Enemy AI / player / contact ----

#[test]
fn test_chase_velocity() {
    let v = enemy_ai::chase_velocity(Vec2::new(3.0, 4.0), Vec2::ZERO, 2.0, 0.5);
    assert!(approx(v.x, -1.2) && approx(v.y, -1.6));
    assert_eq!(enemy_ai::chase_velocity(Vec2::new(0.3, 0.0), Vec2::ZERO, 2.0, 0.5), Vec2::ZERO);
}

#[test]
fn test_enemies_hold_without_player() {
    let mut world = World::new();
    let enemy = world_setup::spawn_enemy(&mut world, &EnemyTuning::default(), Vec2::new(5.0, 0.0), 1);
    enemy_ai::run(&mut world);
    assert_eq!(world.get::<&Velocity>(enemy).unwrap().0, Vec2::ZERO);

    world_setup::spawn_player(&mut world, &PlayerTuning::default(), Vec2::ZERO);
    enemy_ai::run(&mut world);
    let vel = world.get::<&Velocity>(enemy).unwrap().0;
    assert!(approx(vel.x, -2.0));
    assert!(approx(world.get::<&EnemyUnit>(enemy).unwrap().facing_deg.abs(), 180.0));
}

#[test]
fn test_player_steering_and_confinement() {
    let mut world = World::new();
    let tuning = PlayerTuning::default();
    let entity = world_setup::spawn_player(&mut world, &tuning, Vec2::ZERO);

    player::set_move_input(&mut world, Vec2::new(2.0, 0.0));
    assert_eq!(world.get::<&Player>(entity).unwrap().move_input, Vec2::X);

    // acceleration * dt = 1.0 reaches the target velocity at once.
    player::run(&mut world, &tuning, 0.1);
    assert!(approx(world.get::<&Velocity>(entity).unwrap().0.x, 5.0));

    world.get::<&mut Position>(entity).unwrap().0 = Vec2::new(20.0, 0.0);
    player::confine(&mut world, tuning.game_area_radius);
    assert_eq!(world.get::<&Position>(entity).unwrap().0, Vec2::new(10.0, 0.0));
}

#[test]
fn test_contact_damage_only_on_entry() {
    let mut world = World::new();
    let tuning = PlayerTuning {
        invincibility_secs: 0.0,
        ..Default::default()
    };
    let player_entity = world_setup::spawn_player(&mut world, &tuning, Vec2::ZERO);
    let enemy = world_setup::spawn_enemy(&mut world, &EnemyTuning::default(), Vec2::new(0.3, 0.0), 1);
    let mut events = Vec::new();

    for _ in 0..5 {
        assert!(!contact::run(&mut world, &tuning, &mut events));
    }
    assert_eq!(world.get::<&Player>(player_entity).unwrap().health, 90);

    world.get::<&mut Position>(enemy).unwrap().0 = Vec2::new(5.0, 0.0);
    contact::run(&mut world, &tuning, &mut events);
    world.get::<&mut Position>(enemy).unwrap().0 = Vec2::new(0.3, 0.0);
    contact::run(&mut world, &tuning, &mut events);

    assert_eq!(world.get::<&Player>(player_entity).unwrap().health, 80);
    let hits = events
        .iter()
        .filter(|e| matches!(e, GameEvent::PlayerDamaged { .. }))
        .count();
    assert_eq!(hits, 2);
}

// ---- Engine ----

#[test]
fn test_first_wave_after_start_delay() {
    let mut engine = started_engine(GameTuning::default());
    let mut ticks = 1;
    loop {
        let snap = engine.tick();
        ticks += 1;
        if snap.events.contains(&GameEvent::WaveStarted { wave: 1 }) {
            break;
        }
        assert!(ticks < 1000, "first wave never started");
    }
    // 2 s at 60 Hz, counted from the first active tick.
    assert!((119..=122).contains(&ticks), "wave started at tick {ticks}");
}

#[test]
fn test_engine_game_over_twice() {
    let mut engine = started_engine(GameTuning::default());
    for _ in 0..200 {
        engine.tick();
    }
    assert!(engine.spawner().pending() > 0 || engine.sequencer().current_wave() == 1);

    engine.queue_commands([PlayerCommand::EndGame, PlayerCommand::EndGame]);
    let snap = engine.tick();
    engine.game_over();
    let after = engine.tick();

    let game_overs = snap
        .events
        .iter()
        .chain(after.events.iter())
        .filter(|e| matches!(e, GameEvent::GameOver { .. }))
        .count();
    assert_eq!(game_overs, 1);
    assert_eq!(engine.phase(), GamePhase::GameOver);
    assert_eq!(engine.spawner().pending(), 0);
    assert_eq!(engine.sequencer().phase(), SequencerPhase::Stopped);
}

#[test]
fn test_game_over_freezes_world() {
    let mut engine = started_engine(GameTuning::default());
    for _ in 0..150 {
        engine.tick();
    }
    engine.game_over();
    let frozen = engine.tick();
    for _ in 0..300 {
        engine.tick();
    }
    let later = engine.tick();
    assert_eq!(frozen.enemies.len(), later.enemies.len());
    assert_eq!(frozen.time.tick, later.time.tick);
}

#[test]
fn test_player_death_ends_game() {
    let mut tuning = GameTuning::default();
    tuning.player.max_health = 10;
    let mut engine = started_engine(tuning);
    engine.spawn_test_enemy(Vec2::new(0.3, 0.0));

    let snap = engine.tick();
    assert!(snap.events.contains(&GameEvent::PlayerDied));
    assert!(snap.events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })));
    assert_eq!(engine.phase(), GamePhase::GameOver);
}

#[test]
fn test_heal_caps_and_notifies() {
    let mut engine = started_engine(GameTuning::default());
    engine.spawn_test_enemy(Vec2::new(0.3, 0.0));
    let snap = engine.tick();
    assert!(snap
        .events
        .contains(&GameEvent::PlayerDamaged { amount: 10, health: 90 }));
    assert_eq!(engine.player_health(), Some(90));

    engine.heal_player(50);
    assert_eq!(engine.player_health(), Some(100), "heal is capped at max health");
    let snap = engine.tick();
    assert!(snap
        .events
        .contains(&GameEvent::PlayerHealed { amount: 10, health: 100 }));
}

#[test]
fn test_heal_ignores_dead_player() {
    let mut tuning = GameTuning::default();
    tuning.player.max_health = 10;
    let mut engine = started_engine(tuning);
    engine.spawn_test_enemy(Vec2::new(0.3, 0.0));
    engine.tick();
    assert_eq!(engine.player_health(), Some(0));

    engine.heal_player(50);
    assert_eq!(engine.player_health(), Some(0));
}

#[test]
fn test_missing_player_is_soft() {
    let mut engine = started_engine(GameTuning::default());
    let player = engine
        .world()
        .query::<&Player>()
        .iter()
        .next()
        .map(|(entity, _)| entity)
        .unwrap();
    engine.world_mut().despawn(player).unwrap();
    engine.spawn_test_enemy(Vec2::new(4.0, 0.0));

    for _ in 0..300 {
        engine.tick();
    }
    assert_eq!(engine.phase(), GamePhase::Active);
    assert_eq!(engine.score().projectiles_fired, 0);
    let snap = engine.tick();
    assert!(snap.player.is_none());
    assert!(snap.enemies.iter().any(|e| e.position == Vec2::new(4.0, 0.0)));
}

#[test]
fn test_upgrade_accumulation_through_engine() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.fire_mut().increase_damage(1.2);
    engine.fire_mut().increase_damage(1.2);
    assert!((engine.fire().config().damage_multiplier - 1.44).abs() < 1e-5);
}

#[test]
fn test_pause_freezes_time() {
    let mut engine = started_engine(GameTuning::default());
    engine.queue_command(PlayerCommand::Pause);
    let paused = engine.tick();
    for _ in 0..10 {
        engine.tick();
    }
    assert_eq!(engine.phase(), GamePhase::Paused);
    assert_eq!(engine.time().tick, paused.time.tick);

    engine.queue_command(PlayerCommand::Resume);
    engine.tick();
    assert_eq!(engine.time().tick, paused.time.tick + 1);
}

#[test]
fn test_score_counts_fired_projectiles() {
    let mut engine = started_engine(GameTuning::default());
    for _ in 0..61 {
        engine.tick();
    }
    assert_eq!(engine.score().projectiles_fired, 4);
}
