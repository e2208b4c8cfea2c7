//! Centralised physics and gameplay constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! [`crate::config::GameConfig`] mirrors every constant and can override any
//! subset from `assets/slingfort.toml` at startup.

// ── World Bounds ──────────────────────────────────────────────────────────────

/// Width of the playfield in world units. The slingshot sits near the left
/// edge; level structures occupy the right half.
pub const WORLD_WIDTH: f32 = 1200.0;

/// Height of the playfield in world units (camera frames 0..WORLD_HEIGHT).
pub const WORLD_HEIGHT: f32 = 650.0;

/// Y coordinate of the ground surface that every structure rests on.
pub const GROUND_Y: f32 = 60.0;

/// Top of the boundary walls when walls are enabled.
pub const CEILING_Y: f32 = 800.0;

/// Bodies further than this outside the playfield are culled.
pub const BOUNDS_MARGIN: f32 = 60.0;

/// Half-thickness of the ground and boundary wall colliders.
pub const BOUNDARY_HALF_THICKNESS: f32 = 5.0;

// ── Physics: Gravity ──────────────────────────────────────────────────────────

/// Downward gravity (world units / s²) while gravity is enabled.
/// Tuned so a full-pull launch arcs across roughly the whole playfield.
pub const GRAVITY_Y: f32 = -700.0;

// ── Slingshot ─────────────────────────────────────────────────────────────────

/// World position of the sling anchor; projectiles are staged and launched
/// from here.
pub const ANCHOR_X: f32 = 154.0;
pub const ANCHOR_Y: f32 = 156.0;

/// Maximum pull distance. Drags beyond this keep their direction but are
/// clamped to this magnitude.
pub const MAX_PULL: f32 = 90.0;

/// Drags released below this magnitude are treated as a cancelled gesture:
/// no launch, no projectile consumed.
pub const MIN_PULL: f32 = 8.0;

/// Pointer-down further than this from the anchor does not start a drag.
pub const DRAG_ZONE_RADIUS: f32 = 130.0;

/// Launch impulse per unit of pull distance.
/// At MAX_PULL this gives an impulse of 90 × 53 = 4770 on a mass-5 body.
pub const POWER_FACTOR: f32 = 53.0;

// ── Trajectory Preview ────────────────────────────────────────────────────────

/// Time between preview samples (seconds of simulated flight).
pub const PREVIEW_DT: f32 = 0.02;

/// Total simulated flight time covered by the preview.
pub const PREVIEW_MAX_T: f32 = 1.5;

// ── Projectile ────────────────────────────────────────────────────────────────

/// Collision circle radius of a projectile.
pub const PROJECTILE_RADIUS: f32 = 12.0;

/// Projectile mass. The preview divides the launch impulse by this to get
/// the initial velocity, so it must match the collider's mass exactly.
pub const PROJECTILE_MASS: f32 = 5.0;

pub const PROJECTILE_RESTITUTION: f32 = 0.95;
pub const PROJECTILE_FRICTION: f32 = 1.0;

/// A launched projectile slower than this counts as settling.
pub const SETTLE_SPEED: f32 = 4.0;

/// Seconds a projectile must stay below [`SETTLE_SPEED`] before it is
/// considered at rest and removed.
pub const SETTLE_TIMEOUT: f32 = 2.0;

// ── Target ────────────────────────────────────────────────────────────────────

/// Collision circle radius of a target (slightly larger than a projectile).
pub const TARGET_RADIUS: f32 = 14.0;

pub const TARGET_MASS: f32 = 5.0;
pub const TARGET_RESTITUTION: f32 = 0.95;
pub const TARGET_FRICTION: f32 = 1.0;

/// Default hit points. Level builders override this for reinforced targets.
pub const TARGET_DEFAULT_LIFE: i32 = 20;

// ── Structural Elements ───────────────────────────────────────────────────────

/// Column footprint: 20 wide × 85 tall. Beams use the transposed extents.
pub const COLUMN_WIDTH: f32 = 20.0;
pub const COLUMN_HEIGHT: f32 = 85.0;

pub const STRUCTURE_MASS: f32 = 5.0;
pub const STRUCTURE_FRICTION: f32 = 0.5;

/// Impact energy a wood element absorbs before breaking. With
/// [`WOOD_DAMAGE_FACTOR`] = 1.0 a single impulse of 1100 destroys it.
pub const STRUCTURE_INTEGRITY: f32 = 1100.0;

// ── Damage Rules ──────────────────────────────────────────────────────────────

/// Target life lost per collision = floor(impulse / this divisor), min 1.
/// 1100 / 55 = 20, so a wood-breaking impact also one-shots a stock target.
pub const PIG_DAMAGE_DIVISOR: f32 = 55.0;

/// Projectile contacts below this impulse do not damage targets.
pub const TARGET_CONTACT_MIN_IMPULSE: f32 = 200.0;

/// Structural elements falling onto a target need this much impulse to hurt
/// it; a resting contact is harmless.
pub const WOOD_ON_TARGET_MIN_IMPULSE: f32 = 700.0;

/// Scale applied to impulse before subtracting from structural integrity.
pub const WOOD_DAMAGE_FACTOR: f32 = 1.0;

// ── Scoring ───────────────────────────────────────────────────────────────────

/// Points per destroyed target.
pub const TARGET_POINTS: u32 = 10_000;

/// Points per destroyed structural element.
pub const STRUCTURE_POINTS: u32 = 5_000;

/// Bonus per unlaunched projectile, awarded once on the Cleared transition.
pub const UNUSED_PROJECTILE_BONUS: u32 = 10_000;
