//! Headless tests for contact-damage dispatch and removal scoring.
//!
//! Contact-force messages are written by hand instead of stepping Rapier,
//! so each rule in the damage table can be exercised with an exact impulse.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use slingfort::config::GameConfig;
use slingfort::physics::{contact_damage_system, CollisionCategory, DamageTable};
use slingfort::session::Score;
use slingfort::structure::{structure_removal_system, Material, StructuralElement};
use slingfort::target::{target_removal_system, Target};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn damage_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_message::<ContactForceEvent>();
    let config = GameConfig::default();
    app.insert_resource(DamageTable::standard(&config));
    app.insert_resource(config);
    app.insert_resource(Score::default());
    app.add_systems(
        Update,
        (
            contact_damage_system,
            target_removal_system,
            structure_removal_system,
        )
            .chain(),
    );
    app
}

fn spawn_target(app: &mut App, life: i32) -> Entity {
    app.world_mut()
        .spawn((
            Target { life },
            CollisionCategory::Target,
            Transform::from_xyz(900.0, 100.0, 0.0),
        ))
        .id()
}

fn spawn_structure(app: &mut App, integrity: f32) -> Entity {
    app.world_mut()
        .spawn((
            StructuralElement {
                material: Material::Wood,
                integrity,
            },
            CollisionCategory::Structural,
            Transform::from_xyz(950.0, 100.0, 0.0),
        ))
        .id()
}

fn spawn_projectile(app: &mut App) -> Entity {
    app.world_mut()
        .spawn((
            CollisionCategory::Projectile,
            Transform::from_xyz(880.0, 100.0, 0.0),
        ))
        .id()
}

fn contact(app: &mut App, a: Entity, b: Entity, impulse: f32) {
    app.world_mut().write_message(ContactForceEvent {
        collider1: a,
        collider2: b,
        total_force: Vect::new(impulse, 0.0),
        total_force_magnitude: impulse,
        max_force_direction: Vect::X,
        max_force_magnitude: impulse,
    });
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn projectile_hit_drains_target_life() {
    let mut app = damage_app();
    let target = spawn_target(&mut app, 20);
    let projectile = spawn_projectile(&mut app);

    contact(&mut app, projectile, target, 550.0);
    app.update();

    // 550 / 55 = 10 damage.
    let life = app.world().get::<Target>(target).unwrap().life;
    assert_eq!(life, 10);
}

#[test]
fn soft_contact_leaves_target_unharmed() {
    let mut app = damage_app();
    let target = spawn_target(&mut app, 20);
    let projectile = spawn_projectile(&mut app);

    contact(&mut app, projectile, target, 150.0);
    app.update();

    assert_eq!(app.world().get::<Target>(target).unwrap().life, 20);
}

#[test]
fn lethal_hit_despawns_target_and_scores() {
    let mut app = damage_app();
    let target = spawn_target(&mut app, 20);
    let projectile = spawn_projectile(&mut app);

    contact(&mut app, projectile, target, 1100.0);
    app.update();

    assert!(app.world().get_entity(target).is_err());
    assert_eq!(app.world().resource::<Score>().0, 10_000);
}

#[test]
fn event_order_does_not_matter() {
    let mut app = damage_app();
    let target = spawn_target(&mut app, 20);
    let projectile = spawn_projectile(&mut app);

    // Target listed first in the pair this time.
    contact(&mut app, target, projectile, 550.0);
    app.update();

    assert_eq!(app.world().get::<Target>(target).unwrap().life, 10);
}

#[test]
fn wood_falling_on_target_needs_the_high_threshold() {
    let mut app = damage_app();
    let target = spawn_target(&mut app, 20);
    let wood = spawn_structure(&mut app, 1100.0);

    // Below the wood-on-target threshold: harmless, even though the same
    // impulse from a projectile would hurt.
    contact(&mut app, wood, target, 650.0);
    app.update();
    assert_eq!(app.world().get::<Target>(target).unwrap().life, 20);

    contact(&mut app, wood, target, 750.0);
    app.update();
    assert_eq!(app.world().get::<Target>(target).unwrap().life, 7);
}

#[test]
fn projectile_impact_breaks_wood_and_scores() {
    let mut app = damage_app();
    let wood = spawn_structure(&mut app, 1100.0);
    let projectile = spawn_projectile(&mut app);

    contact(&mut app, projectile, wood, 800.0);
    app.update();
    let integrity = app
        .world()
        .get::<StructuralElement>(wood)
        .unwrap()
        .integrity;
    assert_eq!(integrity, 300.0);

    contact(&mut app, projectile, wood, 800.0);
    app.update();
    assert!(app.world().get_entity(wood).is_err());
    assert_eq!(app.world().resource::<Score>().0, 5_000);
}

#[test]
fn wood_on_wood_grinds_both_sides() {
    let mut app = damage_app();
    let upper = spawn_structure(&mut app, 1100.0);
    let lower = spawn_structure(&mut app, 1100.0);

    contact(&mut app, upper, lower, 400.0);
    app.update();

    for entity in [upper, lower] {
        let integrity = app
            .world()
            .get::<StructuralElement>(entity)
            .unwrap()
            .integrity;
        assert_eq!(integrity, 700.0);
    }
}

#[test]
fn fallen_target_is_removed_without_scoring() {
    let mut app = damage_app();
    let target = spawn_target(&mut app, 20);
    app.world_mut()
        .get_mut::<Transform>(target)
        .unwrap()
        .translation
        .y = -50.0;

    app.update();
    assert!(app.world().get_entity(target).is_err());
    assert_eq!(app.world().resource::<Score>().0, 0);
}

#[test]
fn unknown_collider_pairs_are_ignored() {
    let mut app = damage_app();
    let target = spawn_target(&mut app, 20);
    // A collider with no category (e.g. already-despawned body).
    let stray = app.world_mut().spawn(Transform::default()).id();

    contact(&mut app, stray, target, 5_000.0);
    app.update();

    assert_eq!(app.world().get::<Target>(target).unwrap().life, 20);
}
