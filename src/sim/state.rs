//! Game state and core simulation types
//!
//! Everything the per-frame tick mutates lives in `GameState`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::table::{Axis, PocketKind, TableGeometry, edge_coordinate};
use crate::consts::*;
use crate::tuning::Tuning;

/// Distance from the cue spawn to the front ball of the rack (along +Z)
pub const RACK_APEX_DISTANCE: f32 = 2.0;
/// Center spacing between neighboring rack balls
pub const RACK_SPACING: f32 = 0.56;
/// Rows in the triangle rack (1 + 2 + 3 balls)
pub const RACK_ROWS: usize = 3;

/// A ball on the table
///
/// Position and velocity live in the table plane (`x` = world X,
/// `y` = world Z); the height is the fixed `BALL_HEIGHT`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub is_cue: bool,
    /// Object balls go inactive for good once pocketed
    pub active: bool,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, is_cue: bool) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            is_cue,
            active: true,
        }
    }

    /// Leading-edge coordinate along an axis
    #[inline]
    pub fn edge(&self, axis: Axis) -> f32 {
        edge_coordinate(self.pos, self.radius, axis)
    }

    /// Exactly at rest
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.vel == Vec2::ZERO
    }
}

/// Aim/shot state machine mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AimMode {
    /// Waiting for the aim key (and for the table to settle)
    #[default]
    Idle,
    /// Waiting for a power level
    PowerSelect,
    /// Rotating the aim line, waiting for confirm
    Aiming,
}

/// Discrete shot strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PowerLevel {
    #[default]
    Soft,
    Medium,
    Hard,
}

impl PowerLevel {
    /// Map a power key (1, 2, 3) to a level
    pub fn from_key(key: u8) -> Option<Self> {
        match key {
            1 => Some(PowerLevel::Soft),
            2 => Some(PowerLevel::Medium),
            3 => Some(PowerLevel::Hard),
            _ => None,
        }
    }

    /// Key number for this level
    pub fn key(&self) -> u8 {
        match self {
            PowerLevel::Soft => 1,
            PowerLevel::Medium => 2,
            PowerLevel::Hard => 3,
        }
    }

    /// Cue ball launch speed for this level
    pub fn speed(&self, tuning: &Tuning) -> f32 {
        tuning.power_coefficients[(self.key() - 1) as usize]
    }
}

/// Aim/shot session state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AimState {
    pub mode: AimMode,
    /// Accumulated aim angle (radians, not wrapped)
    pub angle: f32,
    pub power: PowerLevel,
}

/// Things that happened during a tick, for audio/UI collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired { power: PowerLevel, speed: f32 },
    CushionHit { id: u32 },
    BallCollision { a: u32, b: u32 },
    BallPocketed { id: u32, pocket: PocketKind },
    CueBallRespawned { pocket: PocketKind },
    TableCleared,
    Restarted,
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Fresh generator for the next draw sequence (advances the stream)
    pub fn next_rng(&mut self) -> Pcg32 {
        let rng = Pcg32::seed_from_u64(self.seed ^ self.stream.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        self.stream += 1;
        rng
    }
}

/// Complete game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed (demo autopilot)
    pub seed: u64,
    pub rng_state: RngState,
    /// Physics/gameplay numbers
    pub tuning: Tuning,
    pub table: TableGeometry,
    /// Cue ball first, then object balls in rack order
    pub balls: Vec<Ball>,
    pub aim: AimState,
    /// Frames simulated since the last rack
    pub time_ticks: u64,
    /// Shots fired since the last rack
    pub shots: u32,
    /// Object ball ids in the order they dropped
    pub pocketed: Vec<u32>,
    /// Autopilot's chosen aim angle for the current shot
    #[serde(default)]
    pub demo_target: Option<f32>,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// New session on the standard table with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, Tuning::default(), TableGeometry::standard())
    }

    /// New session with explicit tuning and table
    pub fn with_config(seed: u64, tuning: Tuning, table: TableGeometry) -> Self {
        let mut state = Self {
            seed,
            rng_state: RngState::new(seed),
            tuning,
            table,
            balls: Vec::new(),
            aim: AimState::default(),
            time_ticks: 0,
            shots: 0,
            pocketed: Vec::new(),
            demo_target: None,
            events: Vec::new(),
        };
        state.rack();
        state
    }

    /// Clear the table and set up the opening rack
    pub fn rack(&mut self) {
        self.balls.clear();
        self.balls.push(Ball::new(0, self.table.cue_spawn, true));
        for pos in rack_positions(self.table.cue_spawn) {
            let id = self.balls.len() as u32;
            self.balls.push(Ball::new(id, pos, false));
        }
        self.aim = AimState::default();
        self.time_ticks = 0;
        self.shots = 0;
        self.pocketed.clear();
        self.demo_target = None;
    }

    /// The cue ball (always index 0 once racked)
    pub fn cue_ball(&self) -> Option<&Ball> {
        self.balls.first().filter(|b| b.is_cue)
    }

    pub fn cue_ball_mut(&mut self) -> Option<&mut Ball> {
        self.balls.first_mut().filter(|b| b.is_cue)
    }

    /// Balls still in play
    pub fn active_balls(&self) -> impl Iterator<Item = &Ball> {
        self.balls.iter().filter(|b| b.active)
    }

    pub fn active_count(&self) -> usize {
        self.active_balls().count()
    }

    /// Object balls still on the table
    pub fn remaining_object_balls(&self) -> usize {
        self.active_balls().filter(|b| !b.is_cue).count()
    }

    /// Every active ball is exactly at rest
    pub fn is_quiescent(&self) -> bool {
        self.active_balls().all(Ball::is_stopped)
    }
}

/// Opening triangle, apex pointing back at the cue spawn
pub fn rack_positions(cue_spawn: Vec2) -> Vec<Vec2> {
    let row_step = RACK_SPACING * 0.866; // sqrt(3)/2
    let apex = cue_spawn + Vec2::new(0.0, RACK_APEX_DISTANCE);

    let mut positions = Vec::with_capacity(RACK_ROWS * (RACK_ROWS + 1) / 2);
    for row in 0..RACK_ROWS {
        let z = apex.y + row as f32 * row_step;
        for i in 0..=row {
            let x = apex.x + (i as f32 - row as f32 / 2.0) * RACK_SPACING;
            positions.push(Vec2::new(x, z));
        }
    }
    positions
}
