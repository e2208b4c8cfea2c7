//! Rigid-body world configuration and collision rules.
//!
//! The crate does not implement broad/narrow-phase collision itself; Rapier
//! owns the body arena and contact solving. This module configures it:
//! collision categories and their pair filters, the damage-rule registry
//! dispatched on contact-force events, the ground and toggleable boundary
//! walls, the gravity toggle, and the guard that force-removes bodies whose
//! position goes non-finite.
//!
//! Damage is dispatched through an explicit [`DamageTable`] mapping category
//! pairs to pure rules, so every rule is independently testable instead of
//! being scattered across conditional branches.

use crate::config::GameConfig;
use crate::error::GameError;
use crate::structure::StructuralElement;
use crate::target::Target;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use std::collections::{HashMap, HashSet};

// ── Collision categories ──────────────────────────────────────────────────────

/// Category tag attached to every rigid body. Drives both Rapier group
/// filtering and damage-rule dispatch.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CollisionCategory {
    /// Launched birds.
    Projectile,
    /// Destructible pigs.
    Target,
    /// Wood beams and columns.
    Structural,
    /// Ground, walls, and other immovable geometry.
    Static,
}

impl CollisionCategory {
    pub const ALL: [CollisionCategory; 4] = [
        CollisionCategory::Projectile,
        CollisionCategory::Target,
        CollisionCategory::Structural,
        CollisionCategory::Static,
    ];

    /// The Rapier membership group for this category.
    pub fn group(self) -> Group {
        match self {
            CollisionCategory::Projectile => Group::GROUP_1,
            CollisionCategory::Target => Group::GROUP_2,
            CollisionCategory::Structural => Group::GROUP_3,
            CollisionCategory::Static => Group::GROUP_4,
        }
    }
}

/// Which category pairs generate narrow-phase checks and contact events.
///
/// By default every pair is enabled except Static×Static (walls never need
/// to collide with the ground). [`CategoryFilters::set`] toggles a pair;
/// the change applies to bodies spawned afterwards.
#[derive(Resource, Debug, Clone)]
pub struct CategoryFilters {
    disabled: HashSet<(CollisionCategory, CollisionCategory)>,
}

impl Default for CategoryFilters {
    fn default() -> Self {
        let mut disabled = HashSet::new();
        disabled.insert(pair_key(CollisionCategory::Static, CollisionCategory::Static));
        Self { disabled }
    }
}

impl CategoryFilters {
    /// Enable or disable collision between categories `a` and `b`
    /// (order-insensitive).
    pub fn set(&mut self, a: CollisionCategory, b: CollisionCategory, enabled: bool) {
        if enabled {
            self.disabled.remove(&pair_key(a, b));
        } else {
            self.disabled.insert(pair_key(a, b));
        }
    }

    pub fn enabled(&self, a: CollisionCategory, b: CollisionCategory) -> bool {
        !self.disabled.contains(&pair_key(a, b))
    }

    /// Union of the membership groups of every category that `cat` may
    /// collide with.
    pub fn filter_for(&self, cat: CollisionCategory) -> Group {
        let mut filter = Group::NONE;
        for other in CollisionCategory::ALL {
            if self.enabled(cat, other) {
                filter |= other.group();
            }
        }
        filter
    }
}

/// Rapier collision-group pair for a body of category `cat` under the
/// current filter table.
pub fn collision_groups(cat: CollisionCategory, filters: &CategoryFilters) -> CollisionGroups {
    CollisionGroups::new(cat.group(), filters.filter_for(cat))
}

fn pair_key(
    a: CollisionCategory,
    b: CollisionCategory,
) -> (CollisionCategory, CollisionCategory) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

// ── Damage rules ──────────────────────────────────────────────────────────────

/// What happens when a pair of categories makes contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageRule {
    /// Decrement the target side's life by `floor(impulse / divisor)`,
    /// minimum 1, for impulses above `min_impulse`.
    TargetImpact { divisor: f32, min_impulse: f32 },
    /// Decrement every structural side's integrity by `impulse * factor`.
    /// Zero-impulse resting contacts cause no damage.
    StructuralImpact { factor: f32 },
    /// Pure elastic/inelastic response, no damage (e.g. anything vs Static).
    Inert,
}

/// Registry mapping unordered category pairs to damage rules.
#[derive(Resource, Debug, Clone)]
pub struct DamageTable {
    rules: HashMap<(CollisionCategory, CollisionCategory), DamageRule>,
}

impl DamageTable {
    /// The standard rule set:
    ///
    /// | Pair                      | Rule                                   |
    /// |---------------------------|----------------------------------------|
    /// | Projectile × Target       | TargetImpact (low contact threshold)   |
    /// | Structural × Target       | TargetImpact (high contact threshold)  |
    /// | Projectile × Structural   | StructuralImpact                       |
    /// | Structural × Structural   | StructuralImpact                       |
    /// | anything × Static         | Inert                                  |
    pub fn standard(config: &GameConfig) -> Self {
        use CollisionCategory::*;
        let mut table = Self {
            rules: HashMap::new(),
        };
        table.set_rule(
            Projectile,
            Target,
            DamageRule::TargetImpact {
                divisor: config.pig_damage_divisor,
                min_impulse: config.target_contact_min_impulse,
            },
        );
        table.set_rule(
            Structural,
            Target,
            DamageRule::TargetImpact {
                divisor: config.pig_damage_divisor,
                min_impulse: config.wood_on_target_min_impulse,
            },
        );
        table.set_rule(
            Projectile,
            Structural,
            DamageRule::StructuralImpact {
                factor: config.wood_damage_factor,
            },
        );
        table.set_rule(
            Structural,
            Structural,
            DamageRule::StructuralImpact {
                factor: config.wood_damage_factor,
            },
        );
        table
    }

    pub fn set_rule(&mut self, a: CollisionCategory, b: CollisionCategory, rule: DamageRule) {
        self.rules.insert(pair_key(a, b), rule);
    }

    /// Rule for a category pair; unregistered pairs are [`DamageRule::Inert`].
    pub fn rule(&self, a: CollisionCategory, b: CollisionCategory) -> DamageRule {
        self.rules
            .get(&pair_key(a, b))
            .copied()
            .unwrap_or(DamageRule::Inert)
    }
}

/// Life lost by a target from a contact of the given impulse.
///
/// Returns 0 below the contact threshold, otherwise at least 1.
pub fn target_damage(impulse: f32, divisor: f32, min_impulse: f32) -> i32 {
    if impulse <= min_impulse {
        return 0;
    }
    ((impulse / divisor).floor() as i32).max(1)
}

/// Integrity lost by a structural element from a contact of the given impulse.
pub fn structural_damage(impulse: f32, factor: f32) -> f32 {
    if impulse <= 0.0 {
        0.0
    } else {
        impulse * factor
    }
}

/// Startup system (after config load): build the standard damage table.
pub fn init_damage_table(mut commands: Commands, config: Res<GameConfig>) {
    commands.insert_resource(DamageTable::standard(&config));
}

// ── Contact dispatch ──────────────────────────────────────────────────────────

/// Apply damage rules for every contact-force event reported by Rapier this
/// step. Mutates life/integrity only; the removal systems despawn dead
/// entities afterwards, so the body set is never modified mid-iteration.
pub fn contact_damage_system(
    mut events: MessageReader<ContactForceEvent>,
    table: Res<DamageTable>,
    categories: Query<&CollisionCategory>,
    mut targets: Query<&mut Target>,
    mut structures: Query<&mut StructuralElement>,
) {
    for event in events.read() {
        let impulse = event.max_force_magnitude;
        let pair = [event.collider1, event.collider2];
        let (Ok(cat_a), Ok(cat_b)) = (categories.get(pair[0]), categories.get(pair[1]))
        else {
            continue;
        };

        match table.rule(*cat_a, *cat_b) {
            DamageRule::TargetImpact {
                divisor,
                min_impulse,
            } => {
                let damage = target_damage(impulse, divisor, min_impulse);
                if damage == 0 {
                    continue;
                }
                for (entity, cat) in pair.iter().zip([cat_a, cat_b]) {
                    if *cat == CollisionCategory::Target {
                        if let Ok(mut target) = targets.get_mut(*entity) {
                            target.life -= damage;
                        }
                    }
                }
            }
            DamageRule::StructuralImpact { factor } => {
                let damage = structural_damage(impulse, factor);
                if damage <= 0.0 {
                    continue;
                }
                for (entity, cat) in pair.iter().zip([cat_a, cat_b]) {
                    if *cat == CollisionCategory::Structural {
                        if let Ok(mut element) = structures.get_mut(*entity) {
                            element.integrity -= damage;
                        }
                    }
                }
            }
            DamageRule::Inert => {}
        }
    }
}

/// Force-remove any body whose position became non-finite (numeric overflow
/// from an extreme impulse). Recovery is invisible: the body disappears
/// instead of smearing NaNs across the renderer.
pub fn instability_guard_system(
    mut commands: Commands,
    bodies: Query<(Entity, &Transform, &CollisionCategory)>,
) {
    for (entity, transform, category) in &bodies {
        if !transform.translation.is_finite() {
            warn!(
                "{}",
                GameError::NumericInstability {
                    body: match category {
                        CollisionCategory::Projectile => "projectile",
                        CollisionCategory::Target => "target",
                        CollisionCategory::Structural => "structural element",
                        CollisionCategory::Static => "static body",
                    },
                }
            );
            commands.entity(entity).despawn();
        }
    }
}

// ── Gravity ───────────────────────────────────────────────────────────────────

/// Whether world gravity is active. Disabling it (zero-gravity mode) zeroes
/// the Rapier gravity vector; the trajectory preview reads this too.
#[derive(Resource, Debug, Clone, Copy)]
pub struct GravityMode {
    pub enabled: bool,
}

impl Default for GravityMode {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl GravityMode {
    /// The active gravity vector: `(0, gravity_y)` or zero.
    pub fn vector(&self, config: &GameConfig) -> Vec2 {
        if self.enabled {
            Vec2::new(0.0, config.gravity_y)
        } else {
            Vec2::ZERO
        }
    }
}

/// Push the [`GravityMode`] vector into the Rapier configuration whenever it
/// changes (and once at startup, when the resource is freshly inserted).
pub fn gravity_sync_system(
    mode: Res<GravityMode>,
    config: Res<GameConfig>,
    mut rapier_config: Query<&mut RapierConfiguration>,
) {
    if !mode.is_changed() && !config.is_changed() {
        return;
    }
    for mut cfg in rapier_config.iter_mut() {
        cfg.gravity = mode.vector(&config);
    }
}

// ── Ground and boundary walls ─────────────────────────────────────────────────

/// Marker for the permanent ground body.
#[derive(Component)]
pub struct Ground;

/// Marker for a toggleable boundary wall body.
#[derive(Component)]
pub struct Wall;

/// Whether the left/right/top boundary walls are present.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct WallsEnabled(pub bool);

/// Spawn the fixed ground body spanning the playfield at `ground_y`.
pub fn spawn_ground(commands: &mut Commands, config: &GameConfig, filters: &CategoryFilters) {
    let half_width = config.world_width / 2.0;
    commands.spawn((
        Ground,
        CollisionCategory::Static,
        Transform::from_xyz(half_width, config.ground_y, 0.0),
        GlobalTransform::default(),
        RigidBody::Fixed,
        Collider::cuboid(half_width, config.boundary_half_thickness),
        Restitution::coefficient(0.95),
        Friction::coefficient(1.0),
        collision_groups(CollisionCategory::Static, filters),
    ));
}

/// Keep the boundary-wall bodies in sync with [`WallsEnabled`].
///
/// Toggling only adds or removes the wall geometry; no existing body is
/// moved. Walls are kinematic so they are unaffected by forces.
pub fn walls_sync_system(
    mut commands: Commands,
    enabled: Res<WallsEnabled>,
    config: Res<GameConfig>,
    filters: Res<CategoryFilters>,
    walls: Query<Entity, With<Wall>>,
) {
    if enabled.0 && walls.is_empty() {
        let half_height = (config.ceiling_y - config.ground_y) / 2.0;
        let mid_y = (config.ceiling_y + config.ground_y) / 2.0;
        let half_width = config.world_width / 2.0;
        let sides = [
            // left, right, top
            (
                Vec2::new(0.0, mid_y),
                Vec2::new(config.boundary_half_thickness, half_height),
            ),
            (
                Vec2::new(config.world_width, mid_y),
                Vec2::new(config.boundary_half_thickness, half_height),
            ),
            (
                Vec2::new(half_width, config.ceiling_y),
                Vec2::new(half_width, config.boundary_half_thickness),
            ),
        ];
        for (position, half_extents) in sides {
            commands.spawn((
                Wall,
                CollisionCategory::Static,
                Transform::from_translation(position.extend(0.0)),
                GlobalTransform::default(),
                RigidBody::KinematicPositionBased,
                Collider::cuboid(half_extents.x, half_extents.y),
                Restitution::coefficient(0.95),
                Friction::coefficient(1.0),
                collision_groups(CollisionCategory::Static, &filters),
            ));
        }
    } else if !enabled.0 && !walls.is_empty() {
        for entity in &walls {
            commands.entity(entity).despawn();
        }
    }
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers the collision-rule resources and the per-frame damage,
/// removal-guard, wall, and gravity systems.
pub struct PhysicsRulesPlugin;

impl Plugin for PhysicsRulesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CategoryFilters>()
            .init_resource::<GravityMode>()
            .init_resource::<WallsEnabled>()
            .add_systems(
                Startup,
                init_damage_table.after(crate::config::load_game_config),
            )
            .add_systems(
                Update,
                (
                    contact_damage_system,
                    crate::target::target_removal_system,
                    crate::structure::structure_removal_system,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (instability_guard_system, walls_sync_system, gravity_sync_system),
            );
    }
}
