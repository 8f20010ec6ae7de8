//! Simulation constants and default tuning parameters.

/// Default simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the default tick rate.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Wave attack (fire controller) ---

/// Seconds between volleys before attack-speed upgrades.
pub const FIRE_BASE_INTERVAL: f32 = 1.0;

/// Projectile damage before damage upgrades.
pub const FIRE_BASE_DAMAGE: u32 = 10;

/// Projectile speed before speed upgrades (units/s).
pub const FIRE_BASE_SPEED: f32 = 5.0;

/// Directions per ring in a volley.
pub const FIRE_BASE_DIRECTIONS: u32 = 4;

/// Minimum allowed direction count.
pub const FIRE_MIN_DIRECTIONS: u32 = 2;

/// Extra directions added to a volley once any additional wave is unlocked.
pub const FIRE_EXTRA_WAVE_DIRECTIONS: u32 = 2;

// --- Wave projectile ---

pub const PROJECTILE_LIFETIME: f32 = 3.0;
pub const PROJECTILE_HIT_RADIUS: f32 = 0.5;
pub const PROJECTILE_AMPLITUDE: f32 = 1.0;
pub const PROJECTILE_FREQUENCY: f32 = 2.0;

/// Visual growth over the projectile's lifetime (scale goes 1.0 → 1.0 + this).
pub const PROJECTILE_SCALE_GROWTH: f32 = 0.5;

/// Damage multiplier applied by constructive interference.
pub const INTERFERENCE_DAMAGE_MULT: f32 = 1.5;

/// Speed multiplier applied by constructive interference.
pub const INTERFERENCE_SPEED_MULT: f32 = 1.2;

// --- Enemies ---

pub const ENEMY_MAX_HEALTH: u32 = 30;
pub const ENEMY_MOVE_SPEED: f32 = 2.0;
pub const ENEMY_CONTACT_DAMAGE: u32 = 10;
pub const ENEMY_SCORE_VALUE: u32 = 10;

/// Enemies stop advancing once this close to the player.
pub const ENEMY_MIN_DISTANCE: f32 = 0.5;

/// Collision radius used for player contact.
pub const ENEMY_RADIUS: f32 = 0.4;

/// Velocity magnitude below which facing is left unchanged.
pub const FACING_SPEED_THRESHOLD: f32 = 0.1;

// --- Enemy spawning ---

/// Seconds between consecutive spawns within one batch.
pub const SPAWN_DELAY: f32 = 0.5;
pub const SPAWN_MIN_DISTANCE: f32 = 8.0;
pub const SPAWN_MAX_DISTANCE: f32 = 12.0;
pub const SPAWN_MIN_DISTANCE_FROM_PLAYER: f32 = 5.0;

/// Rejection-sampling cap; the last candidate is accepted after this many.
pub const SPAWN_MAX_ATTEMPTS: u32 = 20;

// --- Wave progression ---

pub const WAVE_START_DELAY: f32 = 2.0;
pub const WAVE_TIME_BETWEEN: f32 = 5.0;
pub const WAVE_BASE_ENEMIES: u32 = 5;
pub const WAVE_ENEMY_GROWTH: f32 = 1.5;

/// Cadence of the wait-for-clear check.
pub const WAVE_CLEAR_POLL_INTERVAL: f32 = 0.1;

// --- Player & arena ---

pub const GAME_AREA_RADIUS: f32 = 10.0;
pub const PLAYER_MAX_HEALTH: u32 = 100;
pub const PLAYER_MOVE_SPEED: f32 = 5.0;
pub const PLAYER_ACCELERATION: f32 = 10.0;
pub const PLAYER_DECELERATION: f32 = 10.0;
pub const PLAYER_INVINCIBILITY_SECS: f32 = 1.0;
pub const PLAYER_RADIUS: f32 = 0.5;

/// Input magnitude below which the player decelerates.
pub const PLAYER_INPUT_DEADZONE: f32 = 0.1;

// --- Upgrades ---

/// Number of upgrade choices offered after each cleared wave.
pub const UPGRADES_PER_WAVE: u32 = 3;

/// Multiplier used by the rate/damage/speed upgrades.
pub const UPGRADE_MULTIPLIER: f32 = 1.2;

/// Direction count granted by the multi-direction upgrade.
pub const UPGRADE_MULTI_DIRECTIONS: u32 = 6;
