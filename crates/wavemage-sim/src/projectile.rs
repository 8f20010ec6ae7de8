//! Wave projectile kinematics.
//!
//! Pure functions over `WaveProjectile`; the ECS plumbing lives in
//! `systems::projectiles`.

use glam::Vec2;

use wavemage_core::components::WaveProjectile;
use wavemage_core::constants::{
    INTERFERENCE_DAMAGE_MULT, INTERFERENCE_SPEED_MULT, PROJECTILE_SCALE_GROWTH,
};
use wavemage_core::enums::HitEffect;
use wavemage_core::tuning::ProjectileTuning;
use wavemage_core::types::{facing_degrees, round_to_u32};

/// Build a projectile heading along `direction` (normalised here).
pub fn new_projectile(
    tuning: &ProjectileTuning,
    direction: Vec2,
    speed_override: Option<f32>,
    damage_override: Option<u32>,
) -> WaveProjectile {
    let direction = direction.normalize_or_zero();
    WaveProjectile {
        direction,
        speed: speed_override.filter(|s| *s > 0.0).unwrap_or(tuning.speed),
        lifetime: tuning.lifetime,
        age: 0.0,
        damage: damage_override.filter(|d| *d > 0).unwrap_or(tuning.damage),
        hit_radius: tuning.hit_radius,
        amplitude: tuning.amplitude,
        frequency: tuning.frequency,
        scale: 1.0,
        rotation_deg: facing_degrees(direction),
        retired: false,
        hit_effect: HitEffect::None,
    }
}

/// Age the projectile by `dt` and return this tick's displacement.
///
/// Returns `None` once the projectile has retired; the tick on which age
/// reaches the lifetime flips `retired` and does no movement.
///
/// The lateral term is `sin(age * frequency) * amplitude * dt` added straight
/// to the position, so the sway depends on the step size.
pub fn advance(projectile: &mut WaveProjectile, dt: f32) -> Option<Vec2> {
    if projectile.retired {
        return None;
    }

    projectile.age += dt;
    if projectile.age >= projectile.lifetime {
        projectile.retired = true;
        return None;
    }

    let base = projectile.direction * projectile.speed * dt;
    let sway = (projectile.age * projectile.frequency).sin() * projectile.amplitude * dt;
    let lateral = projectile.direction.perp() * sway;

    projectile.scale = visual_scale(projectile);
    Some(base + lateral)
}

/// Cosmetic scale: grows linearly from 1.0 to 1.5 over the lifetime.
pub fn visual_scale(projectile: &WaveProjectile) -> f32 {
    if projectile.lifetime <= 0.0 {
        return 1.0;
    }
    1.0 + (projectile.age / projectile.lifetime) * PROJECTILE_SCALE_GROWTH
}

/// Constructive interference with another projectile at `other`.
///
/// When the two are closer than twice the hit radius, this projectile's
/// damage is multiplied by 1.5 (rounded) and its speed by 1.2. Only the
/// caller changes, and repeated calls compound.
pub fn interfere(projectile: &mut WaveProjectile, own: Vec2, other: Vec2) -> bool {
    if own.distance(other) >= projectile.hit_radius * 2.0 {
        return false;
    }
    projectile.damage = round_to_u32(projectile.damage as f32 * INTERFERENCE_DAMAGE_MULT);
    projectile.speed *= INTERFERENCE_SPEED_MULT;
    true
}

/// Whether a target at `target` is inside the hit circle.
pub fn overlaps(projectile: &WaveProjectile, own: Vec2, target: Vec2) -> bool {
    own.distance(target) <= projectile.hit_radius
}
