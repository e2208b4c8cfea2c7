//! Slingshot drag, trajectory preview, and launch.
//!
//! The drag state lives in [`LaunchController`], a plain resource with pure
//! methods so the clamp and release math is testable without a window. The
//! input systems translate mouse events into controller calls, move the
//! staged projectile to the pull position, and on release convert the
//! clamped pull into a launch impulse.

use crate::config::GameConfig;
use crate::error::GameError;
use crate::geometry::{clamp_magnitude, direction, distance, Trajectory};
use crate::physics::{collision_groups, CategoryFilters, CollisionCategory, GravityMode};
use crate::projectile::Projectile;
use crate::session::{LevelProgress, SessionState};
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Drag-gesture state. `pointer` is `Some` while a drag is in progress.
#[derive(Resource, Debug, Clone)]
pub struct LaunchController {
    pub anchor: Vec2,
    pointer: Option<Vec2>,
}

impl LaunchController {
    pub fn new(anchor: Vec2) -> Self {
        Self {
            anchor,
            pointer: None,
        }
    }

    pub fn dragging(&self) -> bool {
        self.pointer.is_some()
    }

    pub fn begin_drag(&mut self, pointer: Vec2) {
        self.pointer = Some(pointer);
    }

    pub fn update_drag(&mut self, pointer: Vec2) {
        if self.pointer.is_some() {
            self.pointer = Some(pointer);
        }
    }

    pub fn cancel_drag(&mut self) {
        self.pointer = None;
    }

    /// Raw pull vector, pointing from the pointer back through the anchor
    /// (i.e. the launch direction).
    pub fn drag_vector(&self) -> Option<Vec2> {
        self.pointer.map(|p| direction(p, self.anchor))
    }

    /// Pull vector clamped to the rope length `max_pull`.
    pub fn clamped_pull(&self, max_pull: f32) -> Option<Vec2> {
        self.drag_vector().map(|v| clamp_magnitude(v, max_pull))
    }

    /// End the drag. Returns the launch impulse for a valid gesture, or
    /// `None` for a pull shorter than `min_pull` (a cancelled tap).
    pub fn end_drag(&mut self, max_pull: f32, min_pull: f32, power_factor: f32) -> Option<Vec2> {
        let pull = self.clamped_pull(max_pull)?;
        self.pointer = None;
        if pull.length() < min_pull {
            return None;
        }
        Some(pull * power_factor)
    }
}

/// Sampled preview points for the current drag; empty when not dragging.
#[derive(Resource, Debug, Clone, Default)]
pub struct TrajectoryPreview {
    pub points: Vec<Vec2>,
}

/// Cursor position in world coordinates, given a camera centered on the
/// playfield (screen y is flipped).
fn cursor_world_position(window: &Window, config: &GameConfig) -> Option<Vec2> {
    let cursor = window.cursor_position()?;
    let center = Vec2::new(config.world_width / 2.0, config.world_height / 2.0);
    let x = cursor.x - window.width() / 2.0 + center.x;
    let y = -(cursor.y - window.height() / 2.0) + center.y;
    Some(Vec2::new(x, y))
}

/// Translate mouse input into drag state, move the staged projectile with
/// the pull, and launch on release.
pub fn sling_input_system(
    mut commands: Commands,
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    config: Res<GameConfig>,
    filters: Res<CategoryFilters>,
    gravity: Res<GravityMode>,
    mut controller: ResMut<LaunchController>,
    mut preview: ResMut<TrajectoryPreview>,
    mut progress: ResMut<LevelProgress>,
    mut staged: Query<(Entity, &mut Projectile, &mut Transform)>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let cursor = cursor_world_position(window, &config);

    let staged = staged
        .iter_mut()
        .find(|(_, projectile, _)| !projectile.launched);

    if buttons.just_pressed(MouseButton::Left) {
        if let (Some(pos), Some(_)) = (cursor, staged.as_ref()) {
            if distance(pos, controller.anchor) <= config.drag_zone_radius {
                controller.begin_drag(pos);
            }
        }
        return;
    }

    if buttons.just_pressed(MouseButton::Right) && controller.dragging() {
        controller.cancel_drag();
        preview.points.clear();
        if let Some((_, _, mut transform)) = staged {
            transform.translation = controller.anchor.extend(0.0);
        }
        return;
    }

    if !controller.dragging() {
        return;
    }

    if buttons.pressed(MouseButton::Left) {
        if let Some(pos) = cursor {
            controller.update_drag(pos);
        }
        let Some((_, _, mut transform)) = staged else {
            return;
        };
        let Some(pull) = controller.clamped_pull(config.max_pull) else {
            return;
        };
        let start = controller.anchor - pull;
        transform.translation = start.extend(0.0);
        // Impulse / mass = launch velocity for the preview curve.
        let velocity = pull * config.power_factor / config.projectile_mass;
        let trajectory = Trajectory::new(
            controller.anchor,
            velocity,
            gravity.vector(&config),
            config.preview_dt,
            config.preview_max_t,
        );
        preview.points = trajectory.points().collect();
        return;
    }

    if buttons.just_released(MouseButton::Left) {
        preview.points.clear();
        let impulse = controller.end_drag(config.max_pull, config.min_pull, config.power_factor);
        let Some(impulse) = impulse else {
            info!("{}", GameError::EmptyDragCancelled);
            if let Some((_, _, mut transform)) = staged {
                transform.translation = controller.anchor.extend(0.0);
            }
            return;
        };
        let Some((entity, mut projectile, _)) = staged else {
            warn!("{}", GameError::DuplicateLaunch);
            return;
        };
        projectile.launched = true;
        progress.remaining = progress.remaining.saturating_sub(1);
        commands.entity(entity).insert((
            RigidBody::Dynamic,
            ExternalImpulse {
                impulse,
                torque_impulse: 0.0,
            },
            collision_groups(CollisionCategory::Projectile, &filters),
        ));
        info!(
            "launched projectile (impulse {:.0}, {} shots left)",
            impulse.length(),
            progress.remaining
        );
    }
}

/// Insert the controller once the config is final.
pub fn init_launch_controller(mut commands: Commands, config: Res<GameConfig>) {
    commands.insert_resource(LaunchController::new(config.anchor()));
}

pub struct SlingshotPlugin;

impl Plugin for SlingshotPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TrajectoryPreview>()
            .add_systems(
                Startup,
                init_launch_controller.after(crate::config::load_game_config),
            )
            .add_systems(
                Update,
                sling_input_system
                    .run_if(in_state(SessionState::Playing))
                    .run_if(resource_exists::<LevelProgress>),
            );
    }
}
