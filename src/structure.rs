//! Destructible wooden structural elements (beams and columns).
//!
//! Each element is a box-shaped dynamic body whose `integrity` is worn down
//! by impact energy (see [`crate::physics::DamageTable`]). When integrity
//! reaches zero the element is removed and scored; anything resting on it is
//! simply left to gravity.

use crate::config::GameConfig;
use crate::physics::{collision_groups, CategoryFilters, CollisionCategory};
use crate::session::Score;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Material of a structural element. Only wood exists today; the damage
/// factor is looked up per material when more are added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    Wood,
}

/// Orientation/footprint of a structural element.
///
/// Columns stand 20×85, beams lie 85×20 (the transposed extents).
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureKind {
    Beam,
    Column,
}

impl StructureKind {
    /// Collider half-extents for this kind.
    pub fn half_extents(self, config: &GameConfig) -> Vec2 {
        match self {
            StructureKind::Column => Vec2::new(config.column_width / 2.0, config.column_height / 2.0),
            StructureKind::Beam => Vec2::new(config.column_height / 2.0, config.column_width / 2.0),
        }
    }
}

/// Destructible wood element. `integrity` only ever decreases; the removal
/// system despawns the body once it is non-positive.
#[derive(Component, Debug, Clone)]
pub struct StructuralElement {
    pub material: Material,
    pub integrity: f32,
}

/// Spawn one structural element body at `position`.
pub fn spawn_structure(
    commands: &mut Commands,
    position: Vec2,
    kind: StructureKind,
    config: &GameConfig,
    filters: &CategoryFilters,
) -> Entity {
    let half = kind.half_extents(config);
    commands
        .spawn((
            (
                StructuralElement {
                    material: Material::Wood,
                    integrity: config.structure_integrity,
                },
                kind,
                CollisionCategory::Structural,
                Transform::from_translation(position.extend(0.0)),
                GlobalTransform::default(),
                RigidBody::Dynamic,
            ),
            (
                Collider::cuboid(half.x, half.y),
                ColliderMassProperties::Mass(config.structure_mass),
                Friction::coefficient(config.structure_friction),
                Velocity::zero(),
                collision_groups(CollisionCategory::Structural, filters),
                ActiveEvents::CONTACT_FORCE_EVENTS,
            ),
        ))
        .id()
}

/// Despawn broken elements and award points. Runs after
/// [`crate::physics::contact_damage_system`] so removals never happen while
/// the contact events are being walked.
pub fn structure_removal_system(
    mut commands: Commands,
    mut score: ResMut<Score>,
    config: Res<GameConfig>,
    elements: Query<(Entity, &StructuralElement, &Transform)>,
) {
    for (entity, element, transform) in &elements {
        if element.integrity <= 0.0 {
            score.0 += config.structure_points;
            commands.entity(entity).despawn();
        } else if transform.translation.y < 0.0 {
            // Fell out of the world; no points for that.
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_and_beam_extents_are_transposed() {
        let config = GameConfig::default();
        let column = StructureKind::Column.half_extents(&config);
        let beam = StructureKind::Beam.half_extents(&config);
        assert_eq!(column, Vec2::new(10.0, 42.5));
        assert_eq!(beam, Vec2::new(42.5, 10.0));
        assert_eq!(column, Vec2::new(beam.y, beam.x));
    }
}
