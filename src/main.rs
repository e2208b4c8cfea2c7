use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_rapier2d::prelude::*;

use slingfort::config::{self, GameConfig};
use slingfort::level::{LevelPlugin, PendingLevel};
use slingfort::physics::PhysicsRulesPlugin;
use slingfort::projectile::ProjectilePlugin;
use slingfort::rendering::RenderingPlugin;
use slingfort::session::SessionPlugin;
use slingfort::slingshot::SlingshotPlugin;

/// Set the initial gravity on the Rapier world; the gravity sync system
/// keeps it updated afterwards.
fn setup_physics_config(
    config: Res<GameConfig>,
    mut rapier_config: Query<&mut RapierConfiguration>,
) {
    for mut cfg in rapier_config.iter_mut() {
        cfg.gravity = Vec2::new(0.0, config.gravity_y);
    }
}

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Slingfort".into(),
                resolution: WindowResolution::new(1200, 650),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .insert_resource(ClearColor(Color::srgb(0.08, 0.09, 0.12)))
        // Compiled defaults; load_game_config overwrites them from
        // assets/slingfort.toml (if present) in the Startup schedule.
        .insert_resource(GameConfig::default())
        // pixels_per_meter(1.0) keeps world units and physics units identical,
        // so the impulse and damage constants apply without rescaling.
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(1.0))
        .add_plugins((
            PhysicsRulesPlugin,
            SessionPlugin,
            LevelPlugin,
            ProjectilePlugin,
            SlingshotPlugin,
            RenderingPlugin,
        ))
        // Queue the first level; the loader picks it up on the first frame.
        .insert_resource(PendingLevel(Some(0)))
        .add_systems(
            Startup,
            (
                // Load config first so every other startup system sees the
                // final values.
                config::load_game_config,
                setup_physics_config.after(config::load_game_config),
            ),
        )
        .run();
}
