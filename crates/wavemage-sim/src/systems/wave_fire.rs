//! Wave fire controller: fires volleys of wave projectiles from the player
//! on a timer and carries the upgrade multipliers.

use glam::Vec2;
use hecs::{Entity, World};
use tracing::debug;

use wavemage_core::constants::FIRE_MIN_DIRECTIONS;
use wavemage_core::enums::HitEffect;
use wavemage_core::events::GameEvent;
use wavemage_core::tuning::{ProjectileTuning, WaveFireConfig};
use wavemage_core::types::direction_from_degrees;

use crate::world_setup;

/// Owns the volley timer, the fire configuration and the handles of every
/// projectile it has fired that may still be alive.
#[derive(Debug, Clone)]
pub struct WaveFireController {
    config: WaveFireConfig,
    timer: f32,
    active: Vec<Entity>,
    hit_effect: HitEffect,
}

impl WaveFireController {
    /// A `direction_count` below `FIRE_MIN_DIRECTIONS` is raised to it.
    pub fn new(mut config: WaveFireConfig) -> Self {
        config.direction_count = config.direction_count.max(FIRE_MIN_DIRECTIONS);
        Self {
            config,
            timer: 0.0,
            active: Vec::new(),
            hit_effect: HitEffect::None,
        }
    }

    /// Use `effect` for every projectile fired from now on.
    pub fn with_hit_effect(mut self, effect: HitEffect) -> Self {
        self.hit_effect = effect;
        self
    }

    pub fn set_hit_effect(&mut self, effect: HitEffect) {
        self.hit_effect = effect;
    }

    pub fn config(&self) -> &WaveFireConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut WaveFireConfig {
        &mut self.config
    }

    /// Projectiles fired and not yet purged.
    pub fn active_projectiles(&self) -> &[Entity] {
        &self.active
    }

    /// Seconds accumulated towards the next volley.
    pub fn timer(&self) -> f32 {
        self.timer
    }

    /// Advance the volley timer and fire when it reaches the effective
    /// interval. Without a player nothing happens, the timer included.
    /// Returns the number of projectiles fired.
    pub fn advance(
        &mut self,
        world: &mut World,
        projectile: &ProjectileTuning,
        dt: f32,
        events: &mut Vec<GameEvent>,
    ) -> u32 {
        let Some(origin) = world_setup::player_position(world) else {
            return 0;
        };

        self.timer += dt;
        if self.timer < self.config.effective_interval() {
            return 0;
        }
        self.timer = 0.0;

        let fired = self.fire_volley(world, projectile, origin);
        if fired > 0 {
            events.push(GameEvent::VolleyFired { projectiles: fired });
        }
        fired
    }

    /// Fire one volley from `origin` immediately.
    pub fn fire_volley(&mut self, world: &mut World, projectile: &ProjectileTuning, origin: Vec2) -> u32 {
        let speed = self.config.effective_speed();
        let damage = self.config.effective_damage();
        let angles = volley_angles(&self.config);

        for &angle in &angles {
            let entity = world_setup::spawn_projectile(
                world,
                projectile,
                origin,
                direction_from_degrees(angle),
                Some(speed),
                Some(damage),
                self.hit_effect,
            );
            self.active.push(entity);
        }

        debug!(
            projectiles = angles.len(),
            rings = self.config.waves_to_fire(),
            damage,
            speed,
            "volley fired"
        );
        angles.len() as u32
    }

    /// Drop handles of projectiles that no longer exist in the world.
    pub fn purge_retired(&mut self, world: &World) {
        self.active.retain(|entity| world.contains(*entity));
    }

    pub fn increase_fire_rate(&mut self, factor: f32) {
        self.config.increase_fire_rate(factor);
    }

    pub fn increase_damage(&mut self, factor: f32) {
        self.config.increase_damage(factor);
    }

    pub fn increase_projectile_speed(&mut self, factor: f32) {
        self.config.increase_projectile_speed(factor);
    }

    pub fn add_extra_volley(&mut self) {
        self.config.add_extra_volley();
    }

    pub fn set_direction_count(&mut self, count: i32) {
        self.config.set_direction_count(count);
    }
}

/// Firing angles in degrees for one volley.
///
/// Ring `i` of `n` is rotated by `step * i / n`, where `step` is the angle
/// between neighbouring directions, so multiple rings interleave evenly.
pub fn volley_angles(config: &WaveFireConfig) -> Vec<f32> {
    let rings = config.waves_to_fire();
    let directions = config.directions_per_wave();
    if directions == 0 {
        return Vec::new();
    }

    let step = 360.0 / directions as f32;
    let mut angles = Vec::with_capacity((rings * directions) as usize);
    for i in 0..rings {
        for j in 0..directions {
            angles.push(step * j as f32 + step * i as f32 / rings as f32);
        }
    }
    angles
}
