//! Ball integration: rolling friction, stiction and position update

use glam::Vec2;

use super::state::Ball;
use crate::tuning::Tuning;

/// Advance one ball by `dt`.
///
/// Friction is a flat per-frame factor, independent of `dt`.
#[inline]
pub fn integrate_ball(ball: &mut Ball, tuning: &Tuning, dt: f32) {
    ball.vel *= tuning.friction_decay;
    if ball.vel.length() < tuning.stiction_speed {
        ball.vel = Vec2::ZERO;
    }
    ball.pos += ball.vel * dt;
}

/// Advance every active ball
pub fn integrate(balls: &mut [Ball], tuning: &Tuning, dt: f32) {
    for ball in balls.iter_mut().filter(|b| b.active) {
        integrate_ball(ball, tuning, dt);
    }
}
