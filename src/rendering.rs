//! Camera, HUD, gizmo scene drawing, and state overlays.
//!
//! Bodies are drawn as gizmo wireframes from their physics transforms, so
//! the renderer never owns state the simulation does not: circles for
//! projectiles and targets, rotated rectangles for wood, lines for the
//! ground, walls, sling bands, and the trajectory preview dots.

use crate::config::GameConfig;
use crate::geometry::{direction, unit_vector};
use crate::physics::{Wall, WallsEnabled};
use crate::projectile::Projectile;
use crate::session::{AwardedStars, LevelProgress, Score, SessionState};
use crate::slingshot::{LaunchController, TrajectoryPreview};
use crate::structure::{StructuralElement, StructureKind};
use crate::target::Target;
use bevy::prelude::*;

const HUD_FONT_SIZE: f32 = 22.0;
const OVERLAY_FONT_SIZE: f32 = 48.0;

const WOOD_COLOR: Color = Color::srgb(0.72, 0.52, 0.3);
const TARGET_COLOR: Color = Color::srgb(0.35, 0.85, 0.35);
const PROJECTILE_COLOR: Color = Color::srgb(0.9, 0.25, 0.2);
const GROUND_COLOR: Color = Color::srgb(0.5, 0.5, 0.55);
const BAND_COLOR: Color = Color::srgb(0.45, 0.3, 0.18);
const PREVIEW_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.5);

/// Camera centered on the playfield so world (0,0) is the bottom-left corner.
pub fn setup_camera(mut commands: Commands, config: Res<GameConfig>) {
    commands.spawn((
        Camera2d,
        Transform::from_xyz(config.world_width / 2.0, config.world_height / 2.0, 0.0),
    ));
}

// ── HUD ───────────────────────────────────────────────────────────────────────

#[derive(Component)]
pub struct ScoreText;

#[derive(Component)]
pub struct ShotsText;

#[derive(Component)]
pub struct LevelText;

fn hud_row(top: f32) -> Node {
    Node {
        position_type: PositionType::Absolute,
        left: Val::Px(10.0),
        top: Val::Px(top),
        ..default()
    }
}

fn hud_text(label: &str) -> (Text, TextFont, TextColor) {
    (
        Text::new(label),
        TextFont {
            font_size: HUD_FONT_SIZE,
            ..default()
        },
        TextColor(Color::srgb(0.95, 0.88, 0.45)),
    )
}

/// Spawn the permanent top-left HUD (level, score, shots remaining).
pub fn setup_hud(mut commands: Commands) {
    commands.spawn(hud_row(10.0)).with_children(|parent| {
        parent.spawn((hud_text("Level: 0"), LevelText));
    });
    commands.spawn(hud_row(38.0)).with_children(|parent| {
        parent.spawn((hud_text("Score: 0"), ScoreText));
    });
    commands.spawn(hud_row(66.0)).with_children(|parent| {
        parent.spawn((hud_text("Shots: 0"), ShotsText));
    });
}

/// Refresh the HUD text from the score and progress resources.
pub fn hud_update_system(
    score: Res<Score>,
    progress: Option<Res<LevelProgress>>,
    mut score_text: Query<&mut Text, (With<ScoreText>, Without<ShotsText>, Without<LevelText>)>,
    mut shots_text: Query<&mut Text, (With<ShotsText>, Without<ScoreText>, Without<LevelText>)>,
    mut level_text: Query<&mut Text, (With<LevelText>, Without<ScoreText>, Without<ShotsText>)>,
) {
    for mut text in score_text.iter_mut() {
        **text = format!("Score: {}", score.0);
    }
    let Some(progress) = progress else {
        return;
    };
    for mut text in shots_text.iter_mut() {
        **text = format!("Shots: {}", progress.remaining);
    }
    for mut text in level_text.iter_mut() {
        **text = format!("Level: {}", progress.id);
    }
}

// ── Scene drawing ─────────────────────────────────────────────────────────────

/// Draw every body plus the sling and preview as gizmo wireframes.
pub fn draw_scene_system(
    mut gizmos: Gizmos,
    config: Res<GameConfig>,
    walls_enabled: Res<WallsEnabled>,
    controller: Res<LaunchController>,
    preview: Res<TrajectoryPreview>,
    structures: Query<(&Transform, &StructureKind), With<StructuralElement>>,
    targets: Query<&Transform, With<Target>>,
    projectiles: Query<(&Transform, &Projectile)>,
    walls: Query<(), With<Wall>>,
) {
    // Ground line across the playfield.
    gizmos.line_2d(
        Vec2::new(0.0, config.ground_y),
        Vec2::new(config.world_width, config.ground_y),
        GROUND_COLOR,
    );

    // Boundary outline, drawn only while the wall bodies exist.
    if walls_enabled.0 && !walls.is_empty() {
        gizmos.line_2d(
            Vec2::new(0.0, config.ground_y),
            Vec2::new(0.0, config.ceiling_y),
            GROUND_COLOR,
        );
        gizmos.line_2d(
            Vec2::new(config.world_width, config.ground_y),
            Vec2::new(config.world_width, config.ceiling_y),
            GROUND_COLOR,
        );
        gizmos.line_2d(
            Vec2::new(0.0, config.ceiling_y),
            Vec2::new(config.world_width, config.ceiling_y),
            GROUND_COLOR,
        );
    }

    for (transform, kind) in &structures {
        let half = kind.half_extents(&config);
        let angle = transform.rotation.to_euler(EulerRot::ZYX).0;
        let iso = Isometry2d::new(transform.translation.truncate(), Rot2::radians(angle));
        gizmos.rect_2d(iso, half * 2.0, WOOD_COLOR);
    }

    for transform in &targets {
        gizmos.circle_2d(
            transform.translation.truncate(),
            config.target_radius,
            TARGET_COLOR,
        );
    }

    // Sling post and bands to the projectile (staged or mid-drag).
    let anchor = controller.anchor;
    gizmos.line_2d(
        Vec2::new(anchor.x, config.ground_y),
        anchor,
        BAND_COLOR,
    );
    for (transform, projectile) in &projectiles {
        let pos = transform.translation.truncate();
        gizmos.circle_2d(pos, config.projectile_radius, PROJECTILE_COLOR);
        if !projectile.launched {
            gizmos.line_2d(anchor + Vec2::new(-8.0, 0.0), pos, BAND_COLOR);
            gizmos.line_2d(anchor + Vec2::new(8.0, 0.0), pos, BAND_COLOR);
            // Aim indicator: a short arrow through the anchor in the launch
            // direction, with a dot at the tip.
            let aim = unit_vector(direction(pos, anchor));
            if aim != Vec2::ZERO {
                let tip = anchor + aim * 30.0;
                gizmos.line_2d(anchor, tip, PREVIEW_COLOR);
                gizmos.circle_2d(tip, 3.0, PREVIEW_COLOR);
            }
        }
    }

    for point in &preview.points {
        gizmos.circle_2d(*point, 2.0, PREVIEW_COLOR);
    }
}

// ── State overlays ────────────────────────────────────────────────────────────

#[derive(Component)]
pub struct StateOverlay;

fn spawn_overlay(commands: &mut Commands, line1: String, line2: &str, color: Color) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                top: Val::Percent(35.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                ..default()
            },
            StateOverlay,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(line1),
                TextFont {
                    font_size: OVERLAY_FONT_SIZE,
                    ..default()
                },
                TextColor(color),
            ));
            parent.spawn((
                Text::new(line2),
                TextFont {
                    font_size: HUD_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
            ));
        });
}

pub fn spawn_paused_overlay(mut commands: Commands) {
    spawn_overlay(
        &mut commands,
        "PAUSED".to_string(),
        "P to resume, R to restart",
        Color::srgb(0.9, 0.9, 0.9),
    );
}

pub fn spawn_failed_overlay(mut commands: Commands) {
    spawn_overlay(
        &mut commands,
        "LEVEL FAILED".to_string(),
        "R to retry",
        Color::srgb(0.9, 0.3, 0.25),
    );
}

pub fn spawn_cleared_overlay(mut commands: Commands, stars: Res<AwardedStars>) {
    let stars = stars.0.unwrap_or(0);
    spawn_overlay(
        &mut commands,
        format!("LEVEL CLEARED  {}", "★".repeat(stars as usize)),
        "Enter for next level, R to replay",
        Color::srgb(0.95, 0.88, 0.45),
    );
}

pub fn despawn_overlay(mut commands: Commands, overlays: Query<Entity, With<StateOverlay>>) {
    for entity in &overlays {
        commands.entity(entity).despawn();
    }
}

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (setup_camera, setup_hud).after(crate::config::load_game_config),
        )
        .add_systems(Update, (hud_update_system, draw_scene_system))
        .add_systems(OnEnter(SessionState::Paused), spawn_paused_overlay)
        .add_systems(OnExit(SessionState::Paused), despawn_overlay)
        .add_systems(OnEnter(SessionState::Failed), spawn_failed_overlay)
        .add_systems(OnExit(SessionState::Failed), despawn_overlay)
        .add_systems(OnEnter(SessionState::Cleared), spawn_cleared_overlay)
        .add_systems(OnExit(SessionState::Cleared), despawn_overlay);
    }
}
