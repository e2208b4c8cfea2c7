//! Session state machine, scoring, and keyboard controls.
//!
//! The session is a four-state machine: `Playing` steps the simulation,
//! `Paused` freezes it, and the two terminal states `Failed` and `Cleared`
//! freeze it until a reload or level advance. Physics stepping is gated by
//! the state transitions, so a paused world resumes exactly where it
//! stopped.

use crate::level::{star_rating, PendingLevel, StarThresholds, MAX_LEVEL};
use crate::physics::{GravityMode, WallsEnabled};
use crate::projectile::Projectile;
use crate::target::Target;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Top-level session state.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Playing,
    Paused,
    Failed,
    Cleared,
}

/// Accumulated score for the current level attempt.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct Score(pub u32);

/// Star rating computed when the level is cleared; `None` until then.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct AwardedStars(pub Option<u8>);

/// Progress through the current level. Inserted by the level loader.
#[derive(Resource, Debug, Clone)]
pub struct LevelProgress {
    pub id: usize,
    /// Shots not yet taken (the staged projectile still counts).
    pub remaining: u32,
    pub thresholds: StarThresholds,
}

// ── Outcome ───────────────────────────────────────────────────────────────────

/// Decide whether the attempt has ended.
///
/// Cleared: no targets remain. The unused-shot bonus is added and the star
/// rating fixed at this moment, before any further scoring could happen.
/// Failed: targets remain, no shots remain, and no projectile is in play.
pub fn outcome_system(
    mut score: ResMut<Score>,
    mut stars: ResMut<AwardedStars>,
    progress: Res<LevelProgress>,
    config: Res<crate::config::GameConfig>,
    mut next_state: ResMut<NextState<SessionState>>,
    targets: Query<(), With<Target>>,
    projectiles: Query<&Projectile>,
) {
    if targets.is_empty() {
        score.0 += progress.remaining * config.unused_projectile_bonus;
        stars.0 = Some(star_rating(score.0, &progress.thresholds));
        next_state.set(SessionState::Cleared);
        info!(
            "level {} cleared: score {}, {} stars",
            progress.id,
            score.0,
            stars.0.unwrap_or(0)
        );
        return;
    }

    // A staged (unlaunched) projectile still represents a shot in hand.
    let out_of_shots = progress.remaining == 0 && projectiles.is_empty();
    if out_of_shots {
        next_state.set(SessionState::Failed);
        info!("level {} failed: score {}", progress.id, score.0);
    }
}

// ── Keyboard controls ─────────────────────────────────────────────────────────

/// Global keys, live in every state:
/// P pause/resume, S zero gravity, N normal gravity, W wall toggle,
/// R restart level, Enter next level (after a clear), Escape quit.
pub fn keyboard_system(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<SessionState>>,
    mut next_state: ResMut<NextState<SessionState>>,
    mut gravity: ResMut<GravityMode>,
    mut walls: ResMut<WallsEnabled>,
    mut pending: ResMut<PendingLevel>,
    progress: Option<Res<LevelProgress>>,
    mut exit: MessageWriter<bevy::app::AppExit>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(bevy::app::AppExit::Success);
        return;
    }

    if keys.just_pressed(KeyCode::KeyP) {
        match state.get() {
            SessionState::Playing => next_state.set(SessionState::Paused),
            SessionState::Paused => next_state.set(SessionState::Playing),
            _ => {}
        }
    }

    if keys.just_pressed(KeyCode::KeyS) {
        gravity.enabled = false;
        info!("zero gravity on");
    }
    if keys.just_pressed(KeyCode::KeyN) {
        gravity.enabled = true;
        info!("zero gravity off");
    }
    if keys.just_pressed(KeyCode::KeyW) {
        walls.0 = !walls.0;
        info!("walls {}", if walls.0 { "up" } else { "down" });
    }

    let Some(progress) = progress else {
        return;
    };

    if keys.just_pressed(KeyCode::KeyR) {
        pending.0 = Some(progress.id);
    }

    if keys.just_pressed(KeyCode::Enter) && *state.get() == SessionState::Cleared {
        // Past the last level, start over from the first.
        let next = if progress.id >= MAX_LEVEL {
            0
        } else {
            progress.id + 1
        };
        pending.0 = Some(next);
    }
}

// ── Physics freeze ────────────────────────────────────────────────────────────

/// Stop Rapier stepping. Bodies keep their velocities and resume unchanged.
pub fn pause_physics(mut rapier_config: Query<&mut RapierConfiguration>) {
    for mut cfg in rapier_config.iter_mut() {
        cfg.physics_pipeline_active = false;
    }
}

/// Resume Rapier stepping.
pub fn resume_physics(mut rapier_config: Query<&mut RapierConfiguration>) {
    for mut cfg in rapier_config.iter_mut() {
        cfg.physics_pipeline_active = true;
    }
}

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<SessionState>()
            .init_resource::<Score>()
            .init_resource::<AwardedStars>()
            .add_systems(Update, keyboard_system)
            .add_systems(
                Update,
                outcome_system
                    .run_if(in_state(SessionState::Playing))
                    .run_if(resource_exists::<LevelProgress>),
            )
            .add_systems(OnEnter(SessionState::Paused), pause_physics)
            .add_systems(OnExit(SessionState::Paused), resume_physics)
            .add_systems(OnEnter(SessionState::Failed), pause_physics)
            .add_systems(OnEnter(SessionState::Cleared), pause_physics);
    }
}
