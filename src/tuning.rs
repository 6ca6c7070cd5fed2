//! Data-driven physics and gameplay balance
//!
//! Every number the simulation uses lives here so a settings file can
//! override it. Defaults match `crate::consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Physics and gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Per-frame velocity damping factor
    pub friction_decay: f32,
    /// Speed below which a ball snaps to rest
    pub stiction_speed: f32,
    /// Velocity retained after a cushion bounce
    pub cushion_damping: f32,
    /// Ball-ball restitution
    pub restitution: f32,
    /// Gap added to the sum of radii for the contact test
    pub collision_clearance: f32,
    /// Aim rotation speed (radians/sec)
    pub rotate_speed: f32,
    /// Launch speed per power level (index 0 = level 1)
    pub power_coefficients: [f32; 3],
    /// Vertical offset of the aim line above the cue ball
    pub aim_line_lift: f32,
    /// Aim line length
    pub aim_line_length: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            friction_decay: FRICTION_DECAY,
            stiction_speed: STICTION_SPEED,
            cushion_damping: CUSHION_DAMPING,
            restitution: RESTITUTION,
            collision_clearance: COLLISION_CLEARANCE,
            rotate_speed: ROTATE_SPEED,
            power_coefficients: POWER_COEFFICIENTS,
            aim_line_lift: AIM_LINE_LIFT,
            aim_line_length: AIM_LINE_LENGTH,
        }
    }
}

impl Tuning {
    /// Center distance below which two balls are in contact
    #[inline]
    pub fn collision_threshold(&self, radius_a: f32, radius_b: f32) -> f32 {
        radius_a + radius_b + self.collision_clearance
    }
}
