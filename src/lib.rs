//! Cue Table - A billiards table simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball dynamics, cushions, pockets, aim/shot)
//! - `tuning`: Data-driven physics and gameplay constants
//! - `settings`: Headless runner preferences

pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

use glam::{Vec2, Vec3};

/// Game configuration constants
pub mod consts {
    /// Default frame timestep for the headless runner (60 Hz)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Ball radius (all balls share it)
    pub const BALL_RADIUS: f32 = 0.25;
    /// Height of every ball center above the table plane (table-normal coordinate)
    pub const BALL_HEIGHT: f32 = 0.25;
    /// Extra gap added to the sum of radii before two balls count as touching
    pub const COLLISION_CLEARANCE: f32 = 0.05;

    /// Per-frame multiplicative velocity damping (not scaled by dt)
    pub const FRICTION_DECAY: f32 = 0.9995;
    /// Below this speed a ball stops dead
    pub const STICTION_SPEED: f32 = 0.1;
    /// Velocity retained after a cushion bounce (both components)
    pub const CUSHION_DAMPING: f32 = 0.9;
    /// Ball-ball coefficient of restitution
    pub const RESTITUTION: f32 = 0.7;

    /// Aim rotation speed (radians/sec)
    pub const ROTATE_SPEED: f32 = 5.0;
    /// Cue ball launch speed for power levels 1, 2, 3
    pub const POWER_COEFFICIENTS: [f32; 3] = [3.0, 5.0, 10.0];

    /// Aim line starts this far above the cue ball
    pub const AIM_LINE_LIFT: f32 = 0.2;
    /// Aim line length along the shot direction
    pub const AIM_LINE_LENGTH: f32 = 2.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit aim direction on the table plane for an aim angle.
///
/// Angle 0 points down the table (+Z); positive angles swing toward +X.
#[inline]
pub fn aim_direction(angle: f32) -> Vec2 {
    Vec2::new(angle.sin(), angle.cos())
}

/// Aim angle that would point along a table-plane direction
#[inline]
pub fn direction_to_angle(dir: Vec2) -> f32 {
    dir.x.atan2(dir.y)
}

/// Lift a table-plane point (x, z) into world space at the given height
#[inline]
pub fn to_world(plane: Vec2, height: f32) -> Vec3 {
    Vec3::new(plane.x, height, plane.y)
}
