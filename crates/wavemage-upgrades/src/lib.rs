//! Between-wave upgrades for the wave attack.
//!
//! The catalogue is fixed; after each cleared wave a shuffled subset is
//! offered and the chosen upgrade is folded into the `WaveFireConfig`.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use wavemage_core::constants::{UPGRADE_MULTIPLIER, UPGRADE_MULTI_DIRECTIONS};
use wavemage_core::state::UpgradeView;
use wavemage_core::tuning::WaveFireConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    AttackSpeed,
    DamageUp,
    SpeedBoost,
    ExtraWave,
    MultiDirection,
}

impl UpgradeKind {
    /// Every upgrade, in catalogue order.
    pub const ALL: [UpgradeKind; 5] = [
        UpgradeKind::AttackSpeed,
        UpgradeKind::DamageUp,
        UpgradeKind::SpeedBoost,
        UpgradeKind::ExtraWave,
        UpgradeKind::MultiDirection,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AttackSpeed => "attack_speed",
            Self::DamageUp => "damage_up",
            Self::SpeedBoost => "speed_boost",
            Self::ExtraWave => "extra_wave",
            Self::MultiDirection => "multi_direction",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::AttackSpeed => "Attack Speed",
            Self::DamageUp => "Damage Up",
            Self::SpeedBoost => "Speed Boost",
            Self::ExtraWave => "Extra Wave",
            Self::MultiDirection => "Multi-Direction",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::AttackSpeed => "Faster wave attacks",
            Self::DamageUp => "+20% wave damage",
            Self::SpeedBoost => "Waves move 20% faster",
            Self::ExtraWave => "Fire additional waves",
            Self::MultiDirection => "Fire in more directions",
        }
    }

    pub fn view(&self) -> UpgradeView {
        UpgradeView {
            id: self.as_str().to_string(),
            name: self.name().to_string(),
            description: self.description().to_string(),
        }
    }
}

/// Shuffle the catalogue and return the first `count` upgrades (at most the
/// whole catalogue, no repeats).
pub fn roll_offer<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<UpgradeKind> {
    let mut pool = UpgradeKind::ALL.to_vec();
    pool.shuffle(rng);
    pool.truncate(count.min(UpgradeKind::ALL.len()));
    pool
}

/// Apply one upgrade to the fire configuration.
pub fn apply_upgrade(kind: UpgradeKind, fire: &mut WaveFireConfig) {
    match kind {
        UpgradeKind::AttackSpeed => fire.increase_fire_rate(UPGRADE_MULTIPLIER),
        UpgradeKind::DamageUp => fire.increase_damage(UPGRADE_MULTIPLIER),
        UpgradeKind::SpeedBoost => fire.increase_projectile_speed(UPGRADE_MULTIPLIER),
        UpgradeKind::ExtraWave => fire.add_extra_volley(),
        UpgradeKind::MultiDirection => fire.set_direction_count(UPGRADE_MULTI_DIRECTIONS as i32),
    }
    info!(upgrade = kind.as_str(), "upgrade applied");
}
