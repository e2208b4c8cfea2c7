//! Projectile lifecycle: staging on the sling, flight, settling, and cleanup.
//!
//! At most one projectile exists at a time. While staged it is a kinematic
//! body excluded from all collision groups, parked at the sling anchor and
//! moved directly by the drag systems. Launching (see [`crate::slingshot`])
//! swaps it to a dynamic body with its real collision groups and applies the
//! launch impulse. A launched projectile is removed once it settles (slow for
//! long enough) or leaves the world bounds, which frees the sling for the
//! next shot.

use crate::config::GameConfig;
use crate::physics::WallsEnabled;
use crate::session::{LevelProgress, SessionState};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// The one live projectile. `launched` flips at release; `settle` accumulates
/// seconds spent below the settle speed since launch.
#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub launched: bool,
    pub settle: f32,
}

/// Park a fresh projectile on the sling whenever none exists and shots
/// remain. Staged projectiles collide with nothing until launched.
pub fn stage_projectile_system(
    mut commands: Commands,
    config: Res<GameConfig>,
    progress: Res<LevelProgress>,
    projectiles: Query<(), With<Projectile>>,
) {
    if !projectiles.is_empty() || progress.remaining == 0 {
        return;
    }
    commands.spawn((
        (
            Projectile {
                launched: false,
                settle: 0.0,
            },
            crate::physics::CollisionCategory::Projectile,
            Transform::from_translation(config.anchor().extend(0.0)),
            GlobalTransform::default(),
            RigidBody::KinematicPositionBased,
        ),
        (
            Collider::ball(config.projectile_radius),
            ColliderMassProperties::Mass(config.projectile_mass),
            Restitution::coefficient(config.projectile_restitution),
            Friction::coefficient(config.projectile_friction),
            Velocity::zero(),
            CollisionGroups::new(Group::NONE, Group::NONE),
            ActiveEvents::CONTACT_FORCE_EVENTS,
        ),
    ));
}

/// Remove a launched projectile once it settles or leaves the world.
///
/// "Settled" means its speed stayed below `settle_speed` for
/// `settle_timeout` seconds in a row; any faster motion resets the timer.
/// With walls down nothing stops a shot from escaping upward (a zero-gravity
/// launch never slows down), so the cull also covers the space above the
/// ceiling; with walls up the ceiling body bounces it back instead.
pub fn settle_and_bounds_system(
    mut commands: Commands,
    time: Res<Time>,
    config: Res<GameConfig>,
    walls: Res<WallsEnabled>,
    mut projectiles: Query<(Entity, &mut Projectile, &Transform, &Velocity)>,
) {
    for (entity, mut projectile, transform, velocity) in &mut projectiles {
        if !projectile.launched {
            continue;
        }
        let pos = transform.translation;
        let out_of_bounds = pos.y < 0.0
            || pos.x < -config.bounds_margin
            || pos.x > config.world_width + config.bounds_margin
            || (!walls.0 && pos.y > config.ceiling_y + config.bounds_margin);
        if out_of_bounds {
            commands.entity(entity).despawn();
            continue;
        }
        if velocity.linvel.length() < config.settle_speed {
            projectile.settle += time.delta_secs();
            if projectile.settle >= config.settle_timeout {
                commands.entity(entity).despawn();
            }
        } else {
            projectile.settle = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds_app(walls_up: bool) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(GameConfig::default());
        app.insert_resource(WallsEnabled(walls_up));
        app.add_systems(Update, settle_and_bounds_system);
        app
    }

    fn spawn_launched(app: &mut App, position: Vec2, linvel: Vec2) -> Entity {
        app.world_mut()
            .spawn((
                Projectile {
                    launched: true,
                    settle: 0.0,
                },
                Transform::from_translation(position.extend(0.0)),
                Velocity {
                    linvel,
                    angvel: 0.0,
                },
            ))
            .id()
    }

    #[test]
    fn projectile_below_the_world_is_culled() {
        let mut app = bounds_app(false);
        let entity = spawn_launched(&mut app, Vec2::new(600.0, -10.0), Vec2::new(0.0, -300.0));
        app.update();
        assert!(app.world().get_entity(entity).is_err());
    }

    #[test]
    fn straight_up_zero_gravity_shot_is_culled_above_the_ceiling() {
        let mut app = bounds_app(false);
        // Constant upward velocity, never below the settle speed, x inside
        // the margins. Only the upper cull can end this flight.
        let entity = spawn_launched(&mut app, Vec2::new(154.0, 1_000.0), Vec2::new(0.0, 500.0));
        app.update();
        assert!(app.world().get_entity(entity).is_err());
    }

    #[test]
    fn walls_up_keeps_high_projectiles_alive() {
        let mut app = bounds_app(true);
        // The ceiling body is responsible for turning it around; no cull even
        // if a fast shot briefly overshoots the ceiling line.
        let entity = spawn_launched(&mut app, Vec2::new(154.0, 2_000.0), Vec2::new(0.0, 500.0));
        app.update();
        assert!(app.world().get_entity(entity).is_ok());
    }

    #[test]
    fn in_flight_projectile_is_untouched() {
        let mut app = bounds_app(false);
        let entity = spawn_launched(&mut app, Vec2::new(600.0, 300.0), Vec2::new(400.0, 100.0));
        app.update();
        app.update();
        assert!(app.world().get_entity(entity).is_ok());
        let projectile = app.world().get::<Projectile>(entity).unwrap();
        assert_eq!(projectile.settle, 0.0);
    }
}

pub struct ProjectilePlugin;

impl Plugin for ProjectilePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (stage_projectile_system, settle_and_bounds_system)
                .run_if(in_state(SessionState::Playing))
                .run_if(resource_exists::<LevelProgress>),
        );
    }
}
