//! Headless tests for level loading.
//!
//! The loader runs against [`MinimalPlugins`]: Rapier components are spawned
//! as plain data and never stepped, which is enough to verify what gets
//! spawned, reset, and despawned.

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use slingfort::config::GameConfig;
use slingfort::level::{build, level_load_system, PendingLevel, MAX_LEVEL};
use slingfort::physics::{
    walls_sync_system, CategoryFilters, CollisionCategory, GravityMode, Wall, WallsEnabled,
};
use slingfort::session::{AwardedStars, LevelProgress, Score, SessionState};
use slingfort::structure::StructuralElement;
use slingfort::target::Target;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn loader_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.init_state::<SessionState>();
    app.insert_resource(GameConfig::default());
    app.insert_resource(CategoryFilters::default());
    app.insert_resource(GravityMode::default());
    app.insert_resource(WallsEnabled::default());
    app.insert_resource(Score::default());
    app.insert_resource(AwardedStars::default());
    app.insert_resource(PendingLevel::default());
    app.add_systems(Update, level_load_system);
    app
}

fn request_load(app: &mut App, id: usize) {
    app.world_mut().resource_mut::<PendingLevel>().0 = Some(id);
    app.update();
}

fn count<C: Component>(app: &mut App) -> usize {
    let world = app.world_mut();
    let mut query = world.query::<&C>();
    query.iter(world).count()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn loading_spawns_the_descriptor_layout() {
    let mut app = loader_app();
    request_load(&mut app, 0);

    let descriptor = build(0).unwrap();
    assert_eq!(count::<Target>(&mut app), descriptor.targets.len());
    assert_eq!(
        count::<StructuralElement>(&mut app),
        descriptor.structures.len()
    );

    let progress = app.world().resource::<LevelProgress>();
    assert_eq!(progress.id, 0);
    assert_eq!(progress.remaining, descriptor.projectile_count);
}

#[test]
fn reloading_replaces_instead_of_accumulating() {
    let mut app = loader_app();
    request_load(&mut app, 3);
    let first_targets = count::<Target>(&mut app);
    let first_structures = count::<StructuralElement>(&mut app);

    // Reload the same level twice more; counts must not grow.
    request_load(&mut app, 3);
    request_load(&mut app, 3);
    assert_eq!(count::<Target>(&mut app), first_targets);
    assert_eq!(count::<StructuralElement>(&mut app), first_structures);

    // Exactly one ground body survives the reloads.
    let world = app.world_mut();
    let mut query = world.query::<&CollisionCategory>();
    let statics = query
        .iter(world)
        .filter(|c| **c == CollisionCategory::Static)
        .count();
    assert_eq!(statics, 1);
}

#[test]
fn switching_levels_swaps_the_layout() {
    let mut app = loader_app();
    request_load(&mut app, 0);
    request_load(&mut app, 4);

    // Level 4 has three free-floating targets and no structures.
    assert_eq!(count::<Target>(&mut app), 3);
    assert_eq!(count::<StructuralElement>(&mut app), 0);
    assert_eq!(app.world().resource::<LevelProgress>().id, 4);
}

#[test]
fn loading_resets_score_and_stars() {
    let mut app = loader_app();
    request_load(&mut app, 0);
    app.world_mut().resource_mut::<Score>().0 = 12_345;
    app.world_mut().resource_mut::<AwardedStars>().0 = Some(2);

    request_load(&mut app, 1);
    assert_eq!(app.world().resource::<Score>().0, 0);
    assert_eq!(app.world().resource::<AwardedStars>().0, None);
}

#[test]
fn invalid_level_leaves_the_world_untouched() {
    let mut app = loader_app();
    request_load(&mut app, 2);
    let targets = count::<Target>(&mut app);

    request_load(&mut app, MAX_LEVEL + 7);
    assert_eq!(count::<Target>(&mut app), targets);
    assert_eq!(app.world().resource::<LevelProgress>().id, 2);
    // The bad request is consumed, not retried forever.
    assert_eq!(app.world().resource::<PendingLevel>().0, None);
}

#[test]
fn zero_gravity_doubles_the_shot_budget() {
    let mut app = loader_app();
    app.world_mut().resource_mut::<GravityMode>().enabled = false;
    request_load(&mut app, 0);

    let descriptor = build(0).unwrap();
    let progress = app.world().resource::<LevelProgress>();
    assert_eq!(progress.remaining, descriptor.projectile_count * 2);
}

#[test]
fn wall_toggle_never_leaks_bodies() {
    let mut app = loader_app();
    app.add_systems(Update, walls_sync_system);

    app.update();
    assert_eq!(count::<Wall>(&mut app), 0);

    // Left, right, and top walls appear once, no matter how many frames pass.
    app.world_mut().resource_mut::<WallsEnabled>().0 = true;
    app.update();
    app.update();
    assert_eq!(count::<Wall>(&mut app), 3);

    app.world_mut().resource_mut::<WallsEnabled>().0 = false;
    app.update();
    assert_eq!(count::<Wall>(&mut app), 0);

    for _ in 0..3 {
        app.world_mut().resource_mut::<WallsEnabled>().0 = true;
        app.update();
        app.world_mut().resource_mut::<WallsEnabled>().0 = false;
        app.update();
    }
    assert_eq!(count::<Wall>(&mut app), 0);
}

#[test]
fn load_request_is_consumed_after_one_frame() {
    let mut app = loader_app();
    request_load(&mut app, 0);
    assert_eq!(app.world().resource::<PendingLevel>().0, None);

    // Further frames without a request are no-ops.
    let targets = count::<Target>(&mut app);
    app.update();
    assert_eq!(count::<Target>(&mut app), targets);
}
