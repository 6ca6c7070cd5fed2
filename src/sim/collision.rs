//! Collision detection and response
//!
//! Three passes run every frame, in this order:
//! - cushions: reflect balls pressing into a solid stretch of rail
//! - pockets: find captured balls first, then apply the captures
//! - ball pairs: restitution impulse along the line of centers plus de-penetration

use glam::Vec2;

use super::state::{Ball, GameEvent};
use super::table::{Cushion, PocketKind, TableGeometry};
use crate::tuning::Tuning;

/// Result of a ball-ball contact check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether the balls are in contact
    pub hit: bool,
    /// Unit normal pointing from the second ball toward the first
    pub normal: Vec2,
    /// How far inside the contact threshold the centers are
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check two ball centers against a contact threshold
///
/// Coincident centers have no usable normal and are reported as a miss.
pub fn ball_ball_collision(pos_a: Vec2, pos_b: Vec2, threshold: f32) -> CollisionResult {
    let delta = pos_a - pos_b;
    let dist = delta.length();

    if dist >= threshold || dist == 0.0 {
        return CollisionResult::miss();
    }

    CollisionResult {
        hit: true,
        normal: delta / dist,
        penetration: threshold - dist,
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Bounce a ball off one cushion. Returns true if it bounced.
///
/// Only a ball still heading into the rail is reflected, so a ball that
/// bounced last frame and is still inside the band is left alone.
pub fn cushion_bounce(ball: &mut Ball, cushion: &Cushion, damping: f32) -> bool {
    if !cushion.touches(ball.pos, ball.radius) {
        return false;
    }

    let outward = cushion.outward();
    if ball.vel.dot(outward) <= 0.0 {
        return false;
    }

    ball.vel = reflect_velocity(ball.vel, outward) * damping;
    true
}

/// Cushion pass over all active balls
pub fn resolve_cushions(
    balls: &mut [Ball],
    table: &TableGeometry,
    tuning: &Tuning,
    events: &mut Vec<GameEvent>,
) {
    for ball in balls.iter_mut().filter(|b| b.active) {
        for cushion in &table.cushions {
            if cushion_bounce(ball, cushion, tuning.cushion_damping) {
                events.push(GameEvent::CushionHit { id: ball.id });
            }
        }
    }
}

/// A ball found inside a pocket
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capture {
    /// Index into the ball list
    pub index: usize,
    pub pocket: PocketKind,
}

/// Find every active ball sitting in a pocket (first matching pocket wins)
pub fn find_captures(balls: &[Ball], table: &TableGeometry) -> Vec<Capture> {
    balls
        .iter()
        .enumerate()
        .filter(|(_, b)| b.active)
        .filter_map(|(index, b)| {
            table.pocket_at(b.pos, b.radius).map(|p| Capture {
                index,
                pocket: table.pockets[p].kind,
            })
        })
        .collect()
}

/// Apply captures found by `find_captures`.
///
/// The cue ball goes back to the spawn point at rest; object balls leave
/// play for the rest of the session. Returns the ids of object balls removed.
pub fn apply_captures(
    balls: &mut [Ball],
    captures: &[Capture],
    table: &TableGeometry,
    events: &mut Vec<GameEvent>,
) -> Vec<u32> {
    let mut removed = Vec::new();

    for capture in captures {
        let Some(ball) = balls.get_mut(capture.index) else {
            continue;
        };

        if ball.is_cue {
            ball.pos = table.cue_spawn;
            ball.vel = Vec2::ZERO;
            log::debug!("Cue ball scratched ({:?} pocket)", capture.pocket);
            events.push(GameEvent::CueBallRespawned {
                pocket: capture.pocket,
            });
        } else {
            ball.active = false;
            removed.push(ball.id);
            log::debug!("Ball {} pocketed ({:?})", ball.id, capture.pocket);
            events.push(GameEvent::BallPocketed {
                id: ball.id,
                pocket: capture.pocket,
            });
        }
    }

    removed
}

/// Resolve one ball pair. Returns true if an impact impulse was applied.
///
/// Both balls have the same mass, so the restitution impulse is split
/// evenly. Separating pairs are left untouched.
pub fn resolve_pair(a: &mut Ball, b: &mut Ball, tuning: &Tuning) -> bool {
    let threshold = tuning.collision_threshold(a.radius, b.radius);
    let contact = ball_ball_collision(a.pos, b.pos, threshold);
    if !contact.hit {
        return false;
    }

    let normal = contact.normal;
    let approach = (a.vel - b.vel).dot(normal);
    if approach > 0.0 {
        return false;
    }

    let impulse = -(1.0 + tuning.restitution) * approach * 0.5;
    a.vel += normal * impulse;
    b.vel -= normal * impulse;

    let push = normal * (contact.penetration * 0.5);
    a.pos += push;
    b.pos -= push;

    approach < 0.0
}

/// Pairwise pass over all active balls (i < j)
pub fn resolve_ball_pairs(balls: &mut [Ball], tuning: &Tuning, events: &mut Vec<GameEvent>) {
    for j in 1..balls.len() {
        let (head, tail) = balls.split_at_mut(j);
        let b = &mut tail[0];
        if !b.active {
            continue;
        }
        for a in head.iter_mut().filter(|a| a.active) {
            if resolve_pair(a, b, tuning) {
                events.push(GameEvent::BallCollision { a: a.id, b: b.id });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BALL_RADIUS;
    use crate::sim::table::{TABLE_HALF_LENGTH, TABLE_HALF_WIDTH};
    use proptest::prelude::*;

    fn ball_at(id: u32, pos: Vec2, vel: Vec2) -> Ball {
        let mut ball = Ball::new(id, pos, id == 0);
        ball.vel = vel;
        ball
    }

    fn normal_energy(a: &Ball, b: &Ball, n: Vec2) -> f32 {
        let va = a.vel.dot(n);
        let vb = b.vel.dot(n);
        0.5 * (va * va + vb * vb)
    }

    #[test]
    fn test_reflect_velocity() {
        let reflected = reflect_velocity(Vec2::new(3.0, 1.0), Vec2::new(1.0, 0.0));
        assert!((reflected.x + 3.0).abs() < 1e-6);
        assert!((reflected.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_ball_ball_collision_miss_and_hit() {
        assert!(!ball_ball_collision(Vec2::ZERO, Vec2::new(0.6, 0.0), 0.55).hit);

        let hit = ball_ball_collision(Vec2::new(0.5, 0.0), Vec2::ZERO, 0.55);
        assert!(hit.hit);
        assert_eq!(hit.normal, Vec2::new(1.0, 0.0));
        assert!((hit.penetration - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_coincident_centers_are_skipped() {
        let tuning = Tuning::default();
        let mut a = ball_at(1, Vec2::ONE, Vec2::new(1.0, 0.0));
        let mut b = ball_at(2, Vec2::ONE, Vec2::ZERO);
        assert!(!resolve_pair(&mut a, &mut b, &tuning));
        assert_eq!(a.vel, Vec2::new(1.0, 0.0));
        assert_eq!(a.pos, Vec2::ONE);
        assert_eq!(b.pos, Vec2::ONE);
    }

    #[test]
    fn test_cushion_bounce_right_rail() {
        let table = TableGeometry::standard();
        let tuning = Tuning::default();
        let mut ball = ball_at(1, Vec2::new(TABLE_HALF_WIDTH - 0.2, 1.5), Vec2::new(2.0, 1.0));
        let mut events = Vec::new();

        resolve_cushions(std::slice::from_mut(&mut ball), &table, &tuning, &mut events);

        assert!((ball.vel.x - (-2.0 * 0.9)).abs() < 1e-6);
        assert!((ball.vel.y - 0.9).abs() < 1e-6);
        assert_eq!(events, vec![GameEvent::CushionHit { id: 1 }]);
    }

    #[test]
    fn test_cushion_bounce_far_end_rail() {
        let table = TableGeometry::standard();
        let tuning = Tuning::default();
        let mut ball = ball_at(1, Vec2::new(0.5, -(TABLE_HALF_LENGTH - 0.1)), Vec2::new(0.0, -4.0));
        let mut events = Vec::new();

        resolve_cushions(std::slice::from_mut(&mut ball), &table, &tuning, &mut events);

        assert!((ball.vel.y - 3.6).abs() < 1e-6);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_no_second_bounce_while_leaving_band() {
        let table = TableGeometry::standard();
        let tuning = Tuning::default();
        let mut ball = ball_at(1, Vec2::new(TABLE_HALF_WIDTH - 0.2, 1.5), Vec2::new(-1.8, 0.0));
        let mut events = Vec::new();

        resolve_cushions(std::slice::from_mut(&mut ball), &table, &tuning, &mut events);

        assert_eq!(ball.vel, Vec2::new(-1.8, 0.0));
        assert!(events.is_empty());
    }

    #[test]
    fn test_no_bounce_in_pocket_gap() {
        let table = TableGeometry::standard();
        let tuning = Tuning::default();
        let mut ball = ball_at(1, Vec2::new(TABLE_HALF_WIDTH - 0.2, 0.0), Vec2::new(2.0, 0.0));
        let mut events = Vec::new();

        resolve_cushions(std::slice::from_mut(&mut ball), &table, &tuning, &mut events);

        assert_eq!(ball.vel, Vec2::new(2.0, 0.0));
        assert!(events.is_empty());
    }

    #[test]
    fn test_pocket_capture_cue_respawns() {
        let table = TableGeometry::standard();
        let mut balls = vec![ball_at(
            0,
            Vec2::new(TABLE_HALF_WIDTH - 0.22, TABLE_HALF_LENGTH - 0.22),
            Vec2::new(1.0, 1.0),
        )];
        let mut events = Vec::new();

        let captures = find_captures(&balls, &table);
        assert_eq!(captures.len(), 1);
        let removed = apply_captures(&mut balls, &captures, &table, &mut events);

        assert!(removed.is_empty());
        assert_eq!(balls[0].pos, table.cue_spawn);
        assert_eq!(balls[0].vel, Vec2::ZERO);
        assert!(balls[0].active);
        assert_eq!(
            events,
            vec![GameEvent::CueBallRespawned {
                pocket: PocketKind::Corner
            }]
        );
    }

    #[test]
    fn test_pocket_capture_object_ball_leaves_play() {
        let table = TableGeometry::standard();
        let mut balls = vec![
            ball_at(0, Vec2::ZERO, Vec2::ZERO),
            ball_at(1, Vec2::new(-(TABLE_HALF_WIDTH - 0.2), 0.1), Vec2::new(-1.0, 0.0)),
            ball_at(2, Vec2::new(0.5, 1.0), Vec2::ZERO),
        ];
        let before = balls.iter().filter(|b| b.active).count();
        let mut events = Vec::new();

        let captures = find_captures(&balls, &table);
        let removed = apply_captures(&mut balls, &captures, &table, &mut events);

        assert_eq!(removed, vec![1]);
        assert!(!balls[1].active);
        assert_eq!(balls.iter().filter(|b| b.active).count(), before - 1);

        // Already inactive balls are never captured again
        assert!(find_captures(&balls, &table).is_empty());
    }

    #[test]
    fn test_separation_guarantee() {
        let tuning = Tuning::default();
        let mut a = ball_at(1, Vec2::new(0.5, 0.0), Vec2::new(-1.0, 0.0));
        let mut b = ball_at(2, Vec2::ZERO, Vec2::new(1.0, 0.0));

        assert!(resolve_pair(&mut a, &mut b, &tuning));
        assert!(a.pos.distance(b.pos) >= 0.55 - 1e-5);
        // Closing speed 2.0 comes back out at 0.7 * 2.0
        assert!(((a.vel - b.vel).x - 1.4).abs() < 1e-5);
    }

    #[test]
    fn test_separating_pair_untouched() {
        let tuning = Tuning::default();
        let mut a = ball_at(1, Vec2::new(0.5, 0.0), Vec2::new(1.0, 0.0));
        let mut b = ball_at(2, Vec2::ZERO, Vec2::ZERO);

        assert!(!resolve_pair(&mut a, &mut b, &tuning));
        assert_eq!(a.pos, Vec2::new(0.5, 0.0));
        assert_eq!(a.vel, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_head_on_transfers_momentum() {
        let tuning = Tuning::default();
        let mut cue = ball_at(0, Vec2::ZERO, Vec2::new(0.0, 4.0));
        let mut target = ball_at(1, Vec2::new(0.0, 0.54), Vec2::ZERO);

        // Second ball first so the normal points from the cue to the target
        assert!(resolve_pair(&mut target, &mut cue, &tuning));
        assert!((target.vel.y - 3.4).abs() < 1e-5);
        assert!((cue.vel.y - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_pair_pass_skips_inactive() {
        let tuning = Tuning::default();
        let mut balls = vec![
            ball_at(0, Vec2::ZERO, Vec2::new(0.0, 1.0)),
            ball_at(1, Vec2::new(0.0, 0.5), Vec2::ZERO),
        ];
        balls[1].active = false;
        let mut events = Vec::new();

        resolve_ball_pairs(&mut balls, &tuning, &mut events);
        assert_eq!(balls[0].vel, Vec2::new(0.0, 1.0));
        assert!(events.is_empty());

        balls[1].active = true;
        resolve_ball_pairs(&mut balls, &tuning, &mut events);
        assert_eq!(events, vec![GameEvent::BallCollision { a: 0, b: 1 }]);
    }

    #[test]
    fn test_standard_radius_threshold() {
        let tuning = Tuning::default();
        let a = ball_at(1, Vec2::ZERO, Vec2::ZERO);
        assert_eq!(a.radius, BALL_RADIUS);
        assert!((tuning.collision_threshold(a.radius, a.radius) - 0.55).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_collision_loses_normal_energy(
            dist in 0.05f32..0.549,
            angle in 0.0f32..std::f32::consts::TAU,
            va in (-10.0f32..10.0, -10.0f32..10.0),
            vb in (-10.0f32..10.0, -10.0f32..10.0),
        ) {
            let tuning = Tuning::default();
            let n = Vec2::new(angle.cos(), angle.sin());
            let mut a = ball_at(1, n * dist, Vec2::new(va.0, va.1));
            let mut b = ball_at(2, Vec2::ZERO, Vec2::new(vb.0, vb.1));
            let normal = (a.pos - b.pos).normalize();
            let approach = (a.vel - b.vel).dot(normal);
            prop_assume!(approach < -0.1);

            let before = normal_energy(&a, &b, normal);
            prop_assert!(resolve_pair(&mut a, &mut b, &tuning));
            let after = normal_energy(&a, &b, normal);

            prop_assert!(after < before);
        }

        #[test]
        fn prop_resolution_separates(
            dist in 0.05f32..0.549,
            angle in 0.0f32..std::f32::consts::TAU,
            speed in 0.1f32..10.0,
        ) {
            let tuning = Tuning::default();
            let n = Vec2::new(angle.cos(), angle.sin());
            let mut a = ball_at(1, n * dist, -n * speed);
            let mut b = ball_at(2, Vec2::ZERO, n * speed);

            resolve_pair(&mut a, &mut b, &tuning);
            prop_assert!(a.pos.distance(b.pos) >= 0.55 - 1e-4);
        }
    }
}
