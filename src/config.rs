//! Runtime game configuration loaded from `assets/slingfort.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`]. At startup, [`load_game_config`] reads
//! `assets/slingfort.toml` and overwrites the defaults with any values present
//! in the file. Missing keys fall back to the compile-time defaults, so a
//! minimal TOML can override just the constants you care about.
//!
//! Add `config: Res<GameConfig>` to any system parameter list and read values
//! with `config.max_pull`, `config.pig_damage_divisor`, etc. Keep
//! `src/constants.rs` in sync: it remains the authoritative default source
//! used by `GameConfig::default()`.

use crate::constants::*;
use bevy::prelude::*;
use serde::Deserialize;

/// Runtime-tunable physics and gameplay configuration.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── World Bounds ─────────────────────────────────────────────────────────
    pub world_width: f32,
    pub world_height: f32,
    pub ground_y: f32,
    pub ceiling_y: f32,
    pub bounds_margin: f32,
    pub boundary_half_thickness: f32,

    // ── Gravity ──────────────────────────────────────────────────────────────
    pub gravity_y: f32,

    // ── Slingshot ────────────────────────────────────────────────────────────
    pub anchor_x: f32,
    pub anchor_y: f32,
    pub max_pull: f32,
    pub min_pull: f32,
    pub drag_zone_radius: f32,
    pub power_factor: f32,

    // ── Trajectory Preview ───────────────────────────────────────────────────
    pub preview_dt: f32,
    pub preview_max_t: f32,

    // ── Projectile ───────────────────────────────────────────────────────────
    pub projectile_radius: f32,
    pub projectile_mass: f32,
    pub projectile_restitution: f32,
    pub projectile_friction: f32,
    pub settle_speed: f32,
    pub settle_timeout: f32,

    // ── Target ───────────────────────────────────────────────────────────────
    pub target_radius: f32,
    pub target_mass: f32,
    pub target_restitution: f32,
    pub target_friction: f32,
    pub target_default_life: i32,

    // ── Structural Elements ──────────────────────────────────────────────────
    pub column_width: f32,
    pub column_height: f32,
    pub structure_mass: f32,
    pub structure_friction: f32,
    pub structure_integrity: f32,

    // ── Damage Rules ─────────────────────────────────────────────────────────
    pub pig_damage_divisor: f32,
    pub target_contact_min_impulse: f32,
    pub wood_on_target_min_impulse: f32,
    pub wood_damage_factor: f32,

    // ── Scoring ──────────────────────────────────────────────────────────────
    pub target_points: u32,
    pub structure_points: u32,
    pub unused_projectile_bonus: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            ground_y: GROUND_Y,
            ceiling_y: CEILING_Y,
            bounds_margin: BOUNDS_MARGIN,
            boundary_half_thickness: BOUNDARY_HALF_THICKNESS,
            gravity_y: GRAVITY_Y,
            anchor_x: ANCHOR_X,
            anchor_y: ANCHOR_Y,
            max_pull: MAX_PULL,
            min_pull: MIN_PULL,
            drag_zone_radius: DRAG_ZONE_RADIUS,
            power_factor: POWER_FACTOR,
            preview_dt: PREVIEW_DT,
            preview_max_t: PREVIEW_MAX_T,
            projectile_radius: PROJECTILE_RADIUS,
            projectile_mass: PROJECTILE_MASS,
            projectile_restitution: PROJECTILE_RESTITUTION,
            projectile_friction: PROJECTILE_FRICTION,
            settle_speed: SETTLE_SPEED,
            settle_timeout: SETTLE_TIMEOUT,
            target_radius: TARGET_RADIUS,
            target_mass: TARGET_MASS,
            target_restitution: TARGET_RESTITUTION,
            target_friction: TARGET_FRICTION,
            target_default_life: TARGET_DEFAULT_LIFE,
            column_width: COLUMN_WIDTH,
            column_height: COLUMN_HEIGHT,
            structure_mass: STRUCTURE_MASS,
            structure_friction: STRUCTURE_FRICTION,
            structure_integrity: STRUCTURE_INTEGRITY,
            pig_damage_divisor: PIG_DAMAGE_DIVISOR,
            target_contact_min_impulse: TARGET_CONTACT_MIN_IMPULSE,
            wood_on_target_min_impulse: WOOD_ON_TARGET_MIN_IMPULSE,
            wood_damage_factor: WOOD_DAMAGE_FACTOR,
            target_points: TARGET_POINTS,
            structure_points: STRUCTURE_POINTS,
            unused_projectile_bonus: UNUSED_PROJECTILE_BONUS,
        }
    }
}

impl GameConfig {
    /// The sling anchor as a world point.
    pub fn anchor(&self) -> Vec2 {
        Vec2::new(self.anchor_x, self.anchor_y)
    }
}

/// Startup system: attempt to load `assets/slingfort.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults. TOML parse errors are printed
/// to stderr but do not abort the game. A missing file is silently ignored
/// (defaults are already in place from `insert_resource`).
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    let path = "assets/slingfort.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<GameConfig>(&contents) {
            Ok(loaded) => {
                *config = loaded;
                println!("✓ Loaded game config from {path}");
            }
            Err(e) => {
                eprintln!("⚠ Failed to parse {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            println!("ℹ No {path} found; using compiled defaults");
        }
    }
}
