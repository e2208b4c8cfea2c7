//! Level catalogue and loading.
//!
//! Levels are plain data: a [`LevelDescriptor`] lists structure and target
//! placements, the shot budget, and the star thresholds. [`build`] returns
//! the descriptor for an ordinal in `0..=MAX_LEVEL` and fails with
//! [`GameError::InvalidLevelId`] for anything else, so a bad id can never
//! half-load a level.
//!
//! Loading is driven by the [`PendingLevel`] resource: any system that wants
//! a (re)load sets it, and [`level_load_system`] performs the whole swap in
//! one frame — despawn every body, rebuild the ground, spawn the new layout,
//! reset score and progress. Requesting a load twice in the same frame is
//! the same as requesting it once.

use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use crate::physics::{
    spawn_ground, CategoryFilters, CollisionCategory, GravityMode, WallsEnabled,
};
use crate::session::{AwardedStars, LevelProgress, Score, SessionState};
use crate::structure::{spawn_structure, StructureKind};
use crate::target::spawn_target;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

/// Highest defined level ordinal.
pub const MAX_LEVEL: usize = 20;

/// Minimum scores for one, two, and three stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarThresholds {
    pub one: u32,
    pub two: u32,
    pub three: u32,
}

/// Stars earned by `score` under the given thresholds (0 through 3).
pub fn star_rating(score: u32, thresholds: &StarThresholds) -> u8 {
    if score >= thresholds.three {
        3
    } else if score >= thresholds.two {
        2
    } else if score >= thresholds.one {
        1
    } else {
        0
    }
}

/// One wooden element in a level layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StructurePlacement {
    pub position: Vec2,
    pub kind: StructureKind,
}

/// One target in a level layout. `life` of `None` means the default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetPlacement {
    pub position: Vec2,
    pub life: Option<i32>,
}

/// Everything needed to instantiate a level.
#[derive(Debug, Clone)]
pub struct LevelDescriptor {
    pub structures: Vec<StructurePlacement>,
    pub targets: Vec<TargetPlacement>,
    pub projectile_count: u32,
    pub thresholds: StarThresholds,
    /// `Some` forces the boundary walls on or off at load; `None` keeps the
    /// player's current toggle. The stock levels all leave it alone.
    pub walls_enabled: Option<bool>,
}

// ── Layout builder ────────────────────────────────────────────────────────────

/// Accumulates placements while a level function lays out its scene.
#[derive(Default)]
struct Scene {
    structures: Vec<StructurePlacement>,
    targets: Vec<TargetPlacement>,
}

impl Scene {
    fn column(&mut self, x: f32, y: f32) {
        self.structures.push(StructurePlacement {
            position: Vec2::new(x, y),
            kind: StructureKind::Column,
        });
    }

    fn beam(&mut self, x: f32, y: f32) {
        self.structures.push(StructurePlacement {
            position: Vec2::new(x, y),
            kind: StructureKind::Beam,
        });
    }

    fn target(&mut self, x: f32, y: f32) {
        self.targets.push(TargetPlacement {
            position: Vec2::new(x, y),
            life: None,
        });
    }

    fn target_with_life(&mut self, x: f32, y: f32, life: i32) {
        self.targets.push(TargetPlacement {
            position: Vec2::new(x, y),
            life: Some(life),
        });
    }

    /// Doorway frames (two columns, beam on top) stacked with 100px spacing.
    fn open_flat(&mut self, x: f32, y: f32, n: usize) {
        for i in 0..n {
            let yi = y + 100.0 + i as f32 * 100.0;
            self.column(x, yi);
            self.column(x + 60.0, yi);
            self.beam(x + 30.0, yi + 50.0);
        }
    }

    /// Boxed frames (two columns, top and bottom beams) stacked with 125px
    /// spacing.
    fn closed_flat(&mut self, x: f32, y: f32, n: usize) {
        for i in 0..n {
            let yi = y + 100.0 + i as f32 * 125.0;
            self.column(x + 1.0, yi + 22.0);
            self.column(x + 60.0, yi + 22.0);
            self.beam(x + 30.0, yi + 70.0);
            self.beam(x + 30.0, yi - 30.0);
        }
    }

    /// Wall of horizontal beams stacked with 20px spacing.
    fn horizontal_pile(&mut self, x: f32, y: f32, n: usize) {
        let y = y + 70.0;
        for i in 0..n {
            self.beam(x, y + i as f32 * 20.0);
        }
    }

    /// Tower of columns stacked with 85px spacing.
    fn vertical_pile(&mut self, x: f32, y: f32, n: usize) {
        let y = y + 10.0;
        for i in 0..n {
            self.column(x, y + 85.0 + i as f32 * 85.0);
        }
    }
}

// ── Level catalogue ───────────────────────────────────────────────────────────

/// Build the descriptor for level `id`.
pub fn build(id: usize) -> GameResult<LevelDescriptor> {
    let mut scene = Scene::default();
    let (projectile_count, thresholds) = match id {
        0 => {
            // Tutorial: two-story house with two targets.
            scene.target(980.0, 100.0);
            scene.target(985.0, 182.0);
            scene.column(950.0, 80.0);
            scene.column(1010.0, 80.0);
            scene.beam(980.0, 150.0);
            scene.column(950.0, 200.0);
            scene.column(1010.0, 200.0);
            scene.beam(980.0, 240.0);
            (4, EASY_THRESHOLDS)
        }
        1 => {
            // Scattered columns, one target.
            scene.target(1000.0, 100.0);
            scene.column(900.0, 80.0);
            scene.column(850.0, 80.0);
            scene.column(850.0, 150.0);
            scene.column(1050.0, 150.0);
            scene.beam(1105.0, 210.0);
            (4, EASY_THRESHOLDS)
        }
        2 => {
            // Two towers, the right one taller.
            scene.target(880.0, 180.0);
            scene.target(1000.0, 230.0);
            scene.column(880.0, 80.0);
            scene.beam(880.0, 150.0);
            scene.column(1000.0, 80.0);
            scene.column(1000.0, 180.0);
            scene.beam(1000.0, 210.0);
            (4, EASY_THRESHOLDS)
        }
        3 => {
            // Pyramid fortress with three reinforced targets.
            scene.target_with_life(950.0, 320.0, 25);
            scene.target_with_life(885.0, 225.0, 25);
            scene.target_with_life(1005.0, 225.0, 25);
            scene.column(1100.0, 100.0);
            scene.beam(1070.0, 152.0);
            scene.column(1040.0, 100.0);
            scene.column(980.0, 100.0);
            scene.column(920.0, 100.0);
            scene.beam(950.0, 152.0);
            scene.beam(1010.0, 180.0);
            scene.column(860.0, 100.0);
            scene.column(800.0, 100.0);
            scene.beam(830.0, 152.0);
            scene.beam(890.0, 180.0);
            scene.column(860.0, 223.0);
            scene.column(920.0, 223.0);
            scene.column(980.0, 223.0);
            scene.column(1040.0, 223.0);
            scene.beam(890.0, 280.0);
            scene.beam(1010.0, 280.0);
            scene.beam(950.0, 300.0);
            scene.column(920.0, 350.0);
            scene.column(980.0, 350.0);
            scene.beam(950.0, 400.0);
            (4, EASY_THRESHOLDS)
        }
        4 => {
            // Free-floating targets, no structures.
            scene.target(900.0, 300.0);
            scene.target(1000.0, 500.0);
            scene.target(1100.0, 400.0);
            (4, EASY_THRESHOLDS)
        }
        5 => {
            // Two beam walls; the right one carries a frame on top.
            scene.target(900.0, 70.0);
            scene.target(1000.0, 152.0);
            for i in 0..9 {
                scene.beam(800.0, 70.0 + i as f32 * 21.0);
            }
            for i in 0..4 {
                scene.beam(1000.0, 70.0 + i as f32 * 21.0);
            }
            scene.column(970.0, 176.0);
            scene.column(1026.0, 176.0);
            scene.beam(1000.0, 230.0);
            (4, EASY_THRESHOLDS)
        }
        6 => {
            // Closed frame atop a triple-column tower; 40-life boss target.
            scene.target_with_life(920.0, 533.0, 40);
            scene.target(820.0, 533.0);
            scene.target(720.0, 633.0);
            scene.closed_flat(895.0, 423.0, 1);
            scene.vertical_pile(900.0, 0.0, 5);
            scene.vertical_pile(926.0, 0.0, 5);
            scene.vertical_pile(950.0, 0.0, 5);
            (4, EASY_THRESHOLDS)
        }
        7 => {
            // Three-story open structure with flanking column piles.
            scene.target_with_life(978.0, 180.0, 30);
            scene.target_with_life(978.0, 280.0, 30);
            scene.target_with_life(978.0, 80.0, 30);
            scene.open_flat(950.0, 0.0, 3);
            scene.vertical_pile(850.0, 0.0, 3);
            scene.vertical_pile(830.0, 0.0, 3);
            (4, EASY_THRESHOLDS)
        }
        8 => {
            // Staircase of open flats (3, 2, 1 stories).
            scene.target_with_life(1000.0, 180.0, 30);
            scene.target_with_life(1078.0, 280.0, 30);
            scene.target_with_life(900.0, 80.0, 30);
            scene.open_flat(1050.0, 0.0, 3);
            scene.open_flat(963.0, 0.0, 2);
            scene.open_flat(880.0, 0.0, 1);
            (4, EASY_THRESHOLDS)
        }
        9 => {
            // Four towers, only two targets.
            scene.target(1000.0, 180.0);
            scene.target(900.0, 180.0);
            scene.open_flat(1050.0, 0.0, 3);
            scene.open_flat(963.0, 0.0, 2);
            scene.open_flat(880.0, 0.0, 2);
            scene.open_flat(790.0, 0.0, 3);
            (4, EASY_THRESHOLDS)
        }
        10 => {
            // Central column fortress with beam barriers on the sides.
            scene.target(960.0, 250.0);
            scene.target(820.0, 160.0);
            scene.target(1100.0, 160.0);
            scene.vertical_pile(900.0, 0.0, 3);
            scene.vertical_pile(930.0, 0.0, 3);
            scene.vertical_pile(1000.0, 0.0, 3);
            scene.vertical_pile(1030.0, 0.0, 3);
            scene.horizontal_pile(970.0, 250.0, 2);
            scene.horizontal_pile(820.0, 0.0, 4);
            scene.horizontal_pile(1100.0, 0.0, 4);
            (4, EASY_THRESHOLDS)
        }
        11 => {
            // Mixed piles and a bridging beam; four targets.
            scene.target(820.0, 177.0);
            scene.target(960.0, 150.0);
            scene.target(1100.0, 130.0);
            scene.target_with_life(890.0, 270.0, 30);
            scene.horizontal_pile(800.0, 0.0, 5);
            scene.horizontal_pile(950.0, 0.0, 3);
            scene.horizontal_pile(1100.0, 0.0, 2);
            scene.vertical_pile(745.0, 0.0, 2);
            scene.vertical_pile(855.0, 0.0, 2);
            scene.vertical_pile(900.0, 0.0, 2);
            scene.vertical_pile(1000.0, 0.0, 2);
            scene.beam(875.0, 230.0);
            (4, EASY_THRESHOLDS)
        }
        12 => {
            // Five-tower castle, tallest on the edges.
            scene.target_with_life(960.0, 180.0, 30);
            scene.target(850.0, 280.0);
            scene.target(1070.0, 280.0);
            scene.open_flat(790.0, 0.0, 4);
            scene.open_flat(880.0, 0.0, 3);
            scene.open_flat(950.0, 0.0, 2);
            scene.open_flat(1020.0, 0.0, 3);
            scene.open_flat(1090.0, 0.0, 4);
            (
                5,
                StarThresholds {
                    one: 40_000,
                    two: 55_000,
                    three: 75_000,
                },
            )
        }
        13 => {
            // Twin closed fortresses on beam walls.
            scene.target_with_life(860.0, 320.0, 30);
            scene.target(940.0, 320.0);
            scene.target_with_life(1040.0, 320.0, 30);
            scene.target(1120.0, 320.0);
            scene.horizontal_pile(860.0, 0.0, 5);
            scene.closed_flat(835.0, 230.0, 2);
            scene.horizontal_pile(1040.0, 0.0, 5);
            scene.closed_flat(1015.0, 230.0, 2);
            (
                5,
                StarThresholds {
                    one: 45_000,
                    two: 60_000,
                    three: 80_000,
                },
            )
        }
        14 => {
            // Zigzag of staggered open flats.
            scene.target(820.0, 80.0);
            scene.target_with_life(960.0, 180.0, 30);
            scene.target(1100.0, 80.0);
            scene.target(960.0, 380.0);
            scene.open_flat(800.0, 0.0, 1);
            scene.open_flat(930.0, 0.0, 3);
            scene.open_flat(1060.0, 0.0, 1);
            scene.open_flat(930.0, 250.0, 2);
            scene.vertical_pile(870.0, 0.0, 2);
            scene.vertical_pile(1040.0, 0.0, 2);
            (
                5,
                StarThresholds {
                    one: 45_000,
                    two: 62_000,
                    three: 85_000,
                },
            )
        }
        15 => {
            // Three fortified positions.
            scene.target_with_life(780.0, 200.0, 30);
            scene.target_with_life(960.0, 250.0, 30);
            scene.target(1140.0, 200.0);
            scene.target(870.0, 350.0);
            scene.target(1050.0, 350.0);
            scene.horizontal_pile(780.0, 0.0, 4);
            scene.closed_flat(755.0, 150.0, 2);
            scene.horizontal_pile(960.0, 0.0, 6);
            scene.closed_flat(935.0, 120.0, 2);
            scene.horizontal_pile(1140.0, 0.0, 4);
            scene.closed_flat(1115.0, 150.0, 2);
            (
                5,
                StarThresholds {
                    one: 50_000,
                    two: 70_000,
                    three: 90_000,
                },
            )
        }
        16 => {
            // Domino walls connected by bridging beams.
            scene.target(750.0, 90.0);
            scene.target_with_life(900.0, 180.0, 30);
            scene.target(960.0, 270.0);
            scene.target(1020.0, 180.0);
            scene.target(1150.0, 90.0);
            scene.horizontal_pile(750.0, 0.0, 6);
            scene.horizontal_pile(900.0, 0.0, 5);
            scene.vertical_pile(955.0, 0.0, 3);
            scene.horizontal_pile(1020.0, 0.0, 5);
            scene.horizontal_pile(1150.0, 0.0, 6);
            scene.beam(875.0, 140.0);
            scene.beam(1045.0, 140.0);
            scene.beam(960.0, 340.0);
            (
                5,
                StarThresholds {
                    one: 55_000,
                    two: 75_000,
                    three: 95_000,
                },
            )
        }
        17 => {
            // High-rise towers capped with open frames.
            scene.target_with_life(880.0, 550.0, 30);
            scene.target_with_life(960.0, 400.0, 30);
            scene.target_with_life(1040.0, 550.0, 30);
            scene.target(920.0, 250.0);
            scene.target(1000.0, 250.0);
            scene.vertical_pile(860.0, 0.0, 6);
            scene.open_flat(845.0, 400.0, 2);
            scene.vertical_pile(940.0, 0.0, 6);
            scene.vertical_pile(960.0, 0.0, 4);
            scene.open_flat(945.0, 350.0, 1);
            scene.vertical_pile(1020.0, 0.0, 6);
            scene.open_flat(1005.0, 400.0, 2);
            (
                5,
                StarThresholds {
                    one: 55_000,
                    two: 78_000,
                    three: 100_000,
                },
            )
        }
        18 => {
            // The gauntlet: barriers the full width of the field.
            scene.target(760.0, 90.0);
            scene.target_with_life(860.0, 200.0, 30);
            scene.target(960.0, 280.0);
            scene.target_with_life(1060.0, 200.0, 30);
            scene.target(1160.0, 90.0);
            scene.target(960.0, 150.0);
            scene.horizontal_pile(760.0, 0.0, 6);
            scene.vertical_pile(820.0, 0.0, 3);
            scene.closed_flat(870.0, 100.0, 2);
            scene.vertical_pile(955.0, 0.0, 4);
            scene.closed_flat(1005.0, 100.0, 2);
            scene.vertical_pile(1090.0, 0.0, 3);
            scene.horizontal_pile(1140.0, 0.0, 6);
            scene.beam(920.0, 330.0);
            scene.beam(1000.0, 330.0);
            (
                6,
                StarThresholds {
                    one: 60_000,
                    two: 85_000,
                    three: 110_000,
                },
            )
        }
        19 => {
            // Boss fortress: 40-life target at the peak.
            scene.target_with_life(960.0, 500.0, 40);
            scene.target_with_life(880.0, 350.0, 30);
            scene.target_with_life(1040.0, 350.0, 30);
            scene.target(920.0, 200.0);
            scene.target(1000.0, 200.0);
            scene.closed_flat(935.0, 0.0, 2);
            scene.closed_flat(945.0, 180.0, 2);
            scene.open_flat(955.0, 350.0, 2);
            scene.vertical_pile(900.0, 0.0, 4);
            scene.vertical_pile(1020.0, 0.0, 4);
            scene.horizontal_pile(960.0, 420.0, 2);
            (
                6,
                StarThresholds {
                    one: 70_000,
                    two: 95_000,
                    three: 120_000,
                },
            )
        }
        20 => {
            // Final challenge: dual bosses over a shared base.
            scene.target_with_life(880.0, 450.0, 40);
            scene.target_with_life(1040.0, 450.0, 40);
            scene.target_with_life(920.0, 280.0, 30);
            scene.target_with_life(1000.0, 280.0, 30);
            scene.target(960.0, 150.0);
            scene.target(960.0, 350.0);
            scene.horizontal_pile(800.0, 0.0, 5);
            scene.horizontal_pile(1120.0, 0.0, 5);
            scene.closed_flat(890.0, 0.0, 2);
            scene.closed_flat(1010.0, 0.0, 2);
            scene.vertical_pile(930.0, 180.0, 4);
            scene.vertical_pile(990.0, 180.0, 4);
            scene.open_flat(935.0, 350.0, 2);
            scene.open_flat(985.0, 350.0, 2);
            scene.beam(960.0, 420.0);
            scene.beam(960.0, 300.0);
            (
                6,
                StarThresholds {
                    one: 80_000,
                    two: 110_000,
                    three: 140_000,
                },
            )
        }
        _ => {
            return Err(GameError::InvalidLevelId {
                requested: id,
                max: MAX_LEVEL,
            })
        }
    };

    Ok(LevelDescriptor {
        structures: scene.structures,
        targets: scene.targets,
        projectile_count,
        thresholds,
        walls_enabled: None,
    })
}

const EASY_THRESHOLDS: StarThresholds = StarThresholds {
    one: 30_000,
    two: 40_000,
    three: 60_000,
};

// ── Loading ───────────────────────────────────────────────────────────────────

/// Level load request. Set to `Some(id)` to (re)load; cleared once the load
/// runs. Setting the same request twice in one frame collapses to one load.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct PendingLevel(pub Option<usize>);

/// Perform a pending level load: clear every body, rebuild the static world,
/// spawn the new layout, and reset score and progress. An invalid ordinal
/// is logged and leaves the current world untouched.
pub fn level_load_system(
    mut commands: Commands,
    mut pending: ResMut<PendingLevel>,
    config: Res<GameConfig>,
    filters: Res<CategoryFilters>,
    gravity: Res<GravityMode>,
    mut walls: ResMut<WallsEnabled>,
    mut score: ResMut<Score>,
    mut stars: ResMut<AwardedStars>,
    mut next_state: ResMut<NextState<SessionState>>,
    bodies: Query<Entity, With<CollisionCategory>>,
    mut rapier_config: Query<&mut RapierConfiguration>,
) {
    let Some(id) = pending.0.take() else {
        return;
    };
    let descriptor = match build(id) {
        Ok(descriptor) => descriptor,
        Err(e) => {
            warn!("level load rejected: {e}");
            return;
        }
    };

    // Tear down everything with a collision category, including any staged
    // projectile and the walls; the wall sync system respawns walls if they
    // are still enabled.
    for entity in &bodies {
        commands.entity(entity).despawn();
    }

    spawn_ground(&mut commands, &config, &filters);
    for placement in &descriptor.structures {
        spawn_structure(
            &mut commands,
            placement.position,
            placement.kind,
            &config,
            &filters,
        );
    }
    for placement in &descriptor.targets {
        spawn_target(&mut commands, placement.position, placement.life, &config, &filters);
    }

    if let Some(enabled) = descriptor.walls_enabled {
        walls.0 = enabled;
    }

    // Zero-gravity play doubles the shot budget.
    let remaining = if gravity.enabled {
        descriptor.projectile_count
    } else {
        descriptor.projectile_count * 2
    };

    commands.insert_resource(LevelProgress {
        id,
        remaining,
        thresholds: descriptor.thresholds,
    });
    score.0 = 0;
    stars.0 = None;
    next_state.set(SessionState::Playing);
    for mut cfg in rapier_config.iter_mut() {
        cfg.physics_pipeline_active = true;
    }
    info!(
        "loaded level {id}: {} structures, {} targets, {remaining} shots",
        descriptor.structures.len(),
        descriptor.targets.len()
    );
}

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PendingLevel>()
            .add_systems(Update, level_load_system);
    }
}
