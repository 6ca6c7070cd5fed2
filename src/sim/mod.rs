//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied frame dt only
//! - Seeded RNG only
//! - Stable iteration order (ball index, cue ball first)
//! - No rendering or platform dependencies

pub mod aim;
pub mod collision;
pub mod motion;
pub mod snapshot;
pub mod state;
pub mod table;
pub mod tick;

pub use aim::update_aim;
pub use collision::{
    Capture, CollisionResult, apply_captures, ball_ball_collision, find_captures,
    resolve_ball_pairs, resolve_cushions, resolve_pair,
};
pub use motion::{integrate, integrate_ball};
pub use snapshot::{AimLine, BallTransform, FrameSnapshot, aim_line};
pub use state::{AimMode, AimState, Ball, GameEvent, GameState, PowerLevel, RngState};
pub use table::{Axis, Cushion, Interval, Pocket, PocketKind, TableGeometry, edge_coordinate};
pub use tick::{TickInput, tick};
