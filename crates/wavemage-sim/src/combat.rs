//! Damage rules for enemies and the player, plus session score keeping.

use wavemage_core::components::{EnemyUnit, Player};

/// Result of applying damage to something with health.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Target was already dead or invincible.
    Ignored,
    /// Damage landed, target still alive.
    Wounded,
    /// This hit took health to zero. Reported exactly once per target.
    Killed,
}

/// Apply `amount` damage to an enemy; health is clamped at zero and a dead
/// enemy ignores further damage.
pub fn damage_enemy(enemy: &mut EnemyUnit, amount: u32) -> DamageOutcome {
    if !enemy.is_alive() {
        return DamageOutcome::Ignored;
    }
    enemy.health = enemy.health.saturating_sub(amount);
    if enemy.is_alive() {
        DamageOutcome::Wounded
    } else {
        DamageOutcome::Killed
    }
}

/// Apply `amount` damage to the player. A surviving player becomes
/// invincible for `invincibility_secs`.
pub fn damage_player(player: &mut Player, amount: u32, invincibility_secs: f32) -> DamageOutcome {
    if !player.is_alive() || player.is_invincible() {
        return DamageOutcome::Ignored;
    }
    player.health = player.health.saturating_sub(amount);
    if player.is_alive() {
        player.invincible_secs = invincibility_secs;
        DamageOutcome::Wounded
    } else {
        DamageOutcome::Killed
    }
}

/// Restore health, capped at the maximum.
pub fn heal_player(player: &mut Player, amount: u32) {
    player.health = player.health.saturating_add(amount).min(player.max_health);
}

/// Running totals for the session.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreState {
    pub enemies_killed: u32,
    pub score: u32,
    pub projectiles_fired: u32,
}

impl ScoreState {
    pub fn record_kill(&mut self, score_value: u32) {
        self.enemies_killed += 1;
        self.score += score_value;
    }
}
