//! Per-frame simulation tick
//!
//! Frame order: integrate -> cushions -> pockets -> ball pairs -> aim/shot.

use rand::Rng;

use super::aim::update_aim;
use super::collision::{apply_captures, find_captures, resolve_ball_pairs, resolve_cushions};
use super::motion::integrate;
use super::state::{AimMode, GameEvent, GameState};
use crate::{direction_to_angle, normalize_angle};

/// Input signals for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Aim key is held
    pub aim_held: bool,
    /// Power key pressed this frame (1, 2 or 3; anything else is ignored)
    pub select_power: Option<u8>,
    /// Rotate aim left (held)
    pub rotate_left: bool,
    /// Rotate aim right (held)
    pub rotate_right: bool,
    /// Fire the shot
    pub confirm: bool,
    /// Clear the table and rack again
    pub restart: bool,
    /// Idle/demo mode - autopilot takes the shots
    pub idle_mode: bool,
}

/// Advance the session by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    if input.restart {
        state.rack();
        state.events.push(GameEvent::Restarted);
        log::info!("Table racked ({} object balls)", state.remaining_object_balls());
        return;
    }

    let mut input = input.clone();
    if input.idle_mode {
        autopilot(state, &mut input, dt);
    }
    let input = &input;

    state.time_ticks += 1;

    integrate(&mut state.balls, &state.tuning, dt);
    resolve_cushions(&mut state.balls, &state.table, &state.tuning, &mut state.events);

    let had_object_balls = state.remaining_object_balls() > 0;
    let captures = find_captures(&state.balls, &state.table);
    let removed = apply_captures(&mut state.balls, &captures, &state.table, &mut state.events);
    state.pocketed.extend(removed);
    if had_object_balls && state.remaining_object_balls() == 0 {
        log::info!("Table cleared in {} shots", state.shots);
        state.events.push(GameEvent::TableCleared);
    }

    resolve_ball_pairs(&mut state.balls, &state.tuning, &mut state.events);

    update_aim(state, input, dt);
}

/// Fill in aim inputs for demo mode.
///
/// Drives the same state machine a player would: hold aim, pick a power,
/// rotate toward the nearest object ball, confirm.
fn autopilot(state: &mut GameState, input: &mut TickInput, dt: f32) {
    if !state.is_quiescent() {
        return;
    }
    input.aim_held = true;

    match state.aim.mode {
        AimMode::Idle => {}
        AimMode::PowerSelect => {
            let mut rng = state.rng_state.next_rng();
            input.select_power = Some(rng.random_range(1..=3));

            let jitter: f32 = rng.random_range(-0.05..0.05);
            state.demo_target = nearest_object_angle(state).map(|a| a + jitter);
        }
        AimMode::Aiming => {
            let Some(target) = state.demo_target else {
                input.confirm = true;
                return;
            };
            let diff = normalize_angle(target - state.aim.angle);
            let step = state.tuning.rotate_speed * dt;
            if diff.abs() <= step {
                input.confirm = true;
                state.demo_target = None;
            } else if diff > 0.0 {
                input.rotate_left = true;
            } else {
                input.rotate_right = true;
            }
        }
    }
}

/// Aim angle from the cue ball to the closest object ball still in play
fn nearest_object_angle(state: &GameState) -> Option<f32> {
    let cue = state.cue_ball()?;
    state
        .active_balls()
        .filter(|b| !b.is_cue)
        .min_by(|a, b| {
            a.pos
                .distance_squared(cue.pos)
                .partial_cmp(&b.pos.distance_squared(cue.pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .and_then(|b| (b.pos - cue.pos).try_normalize())
        .map(direction_to_angle)
}
