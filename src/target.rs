//! Targets: the round bodies the player must destroy to clear a level.
//!
//! Each target is a dynamic circle with an integer `life` pool. Impacts
//! drain life through the damage table; once it is non-positive the target
//! despawns and scores. A target knocked off the world falls out silently.

use crate::config::GameConfig;
use crate::physics::{collision_groups, CategoryFilters, CollisionCategory};
use crate::session::Score;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// A destructible target. `life` is drained by impacts and never refills.
#[derive(Component, Debug, Clone)]
pub struct Target {
    pub life: i32,
}

/// Spawn one target body at `position`. `life` of `None` uses the configured
/// default; level builders pass `Some` for the tougher ones.
pub fn spawn_target(
    commands: &mut Commands,
    position: Vec2,
    life: Option<i32>,
    config: &GameConfig,
    filters: &CategoryFilters,
) -> Entity {
    commands
        .spawn((
            (
                Target {
                    life: life.unwrap_or(config.target_default_life),
                },
                CollisionCategory::Target,
                Transform::from_translation(position.extend(0.0)),
                GlobalTransform::default(),
                RigidBody::Dynamic,
            ),
            (
                Collider::ball(config.target_radius),
                ColliderMassProperties::Mass(config.target_mass),
                Restitution::coefficient(config.target_restitution),
                Friction::coefficient(config.target_friction),
                Velocity::zero(),
                collision_groups(CollisionCategory::Target, filters),
                ActiveEvents::CONTACT_FORCE_EVENTS,
            ),
        ))
        .id()
}

/// Despawn dead or fallen targets. Only a kill awards points; a target that
/// drops below the world is removed without scoring.
pub fn target_removal_system(
    mut commands: Commands,
    mut score: ResMut<Score>,
    config: Res<GameConfig>,
    targets: Query<(Entity, &Target, &Transform)>,
) {
    for (entity, target, transform) in &targets {
        if target.life <= 0 {
            score.0 += config.target_points;
            commands.entity(entity).despawn();
        } else if transform.translation.y < 0.0 {
            commands.entity(entity).despawn();
        }
    }
}
