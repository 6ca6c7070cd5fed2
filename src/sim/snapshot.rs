//! Per-frame render snapshot
//!
//! What the renderer gets after each tick: world-space ball transforms and
//! the aim line while the player is aiming.

use glam::Vec3;
use serde::Serialize;

use super::state::{AimMode, GameState};
use crate::consts::BALL_HEIGHT;
use crate::{aim_direction, to_world};

/// One drawable ball
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BallTransform {
    pub id: u32,
    pub position: Vec3,
    pub radius: f32,
    pub visible: bool,
    pub is_cue: bool,
}

/// Aim line segment in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AimLine {
    pub start: Vec3,
    pub end: Vec3,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub balls: Vec<BallTransform>,
    pub aim_line: Option<AimLine>,
}

impl FrameSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let balls = state
            .active_balls()
            .map(|b| BallTransform {
                id: b.id,
                position: to_world(b.pos, BALL_HEIGHT),
                radius: b.radius,
                visible: true,
                is_cue: b.is_cue,
            })
            .collect();

        Self {
            balls,
            aim_line: aim_line(state),
        }
    }
}

/// Aim line from just above the cue ball along the aim direction
pub fn aim_line(state: &GameState) -> Option<AimLine> {
    if state.aim.mode != AimMode::Aiming {
        return None;
    }
    let cue = state.cue_ball()?;
    let tuning = &state.tuning;

    let start = to_world(cue.pos, BALL_HEIGHT) + Vec3::Y * tuning.aim_line_lift;
    let dir = to_world(aim_direction(state.aim.angle), 0.0);
    Some(AimLine {
        start,
        end: start + dir * tuning.aim_line_length,
    })
}
