//! Aim and shot state machine
//!
//! Idle -> PowerSelect -> Aiming -> (shot) -> Idle
//!
//! Every input is only looked at while the aim key is held. Letting go of the
//! key does not drop back to Idle; the machine simply waits where it is until
//! the key is held again. Idle and PowerSelect only advance while every
//! active ball is at rest. Within one frame the checks fall through, so a
//! held aim key plus a power key can go from Idle straight to Aiming.

use super::state::{AimMode, GameEvent, GameState, PowerLevel};
use super::tick::TickInput;
use crate::aim_direction;

/// Advance the aim state machine by one frame. Returns true if a shot was fired.
pub fn update_aim(state: &mut GameState, input: &TickInput, dt: f32) -> bool {
    if !input.aim_held {
        return false;
    }

    if state.aim.mode == AimMode::Idle && state.is_quiescent() {
        state.aim.mode = AimMode::PowerSelect;
    }

    if state.aim.mode == AimMode::PowerSelect && state.is_quiescent() {
        if let Some(level) = input.select_power.and_then(PowerLevel::from_key) {
            state.aim.power = level;
            state.aim.mode = AimMode::Aiming;
        }
    }

    if state.aim.mode != AimMode::Aiming {
        return false;
    }

    let step = state.tuning.rotate_speed * dt;
    if input.rotate_left {
        state.aim.angle += step;
    }
    if input.rotate_right {
        state.aim.angle -= step;
    }

    input.confirm && fire_shot(state)
}

/// Launch the cue ball along the current aim and reset the aim state
fn fire_shot(state: &mut GameState) -> bool {
    let Some(dir) = aim_direction(state.aim.angle).try_normalize() else {
        log::warn!("Aim direction degenerate at angle {}, shot skipped", state.aim.angle);
        return false;
    };
    let power = state.aim.power;
    let speed = power.speed(&state.tuning);

    let Some(cue) = state.cue_ball_mut() else {
        return false;
    };
    cue.vel = dir * speed;

    state.aim.angle = 0.0;
    state.aim.mode = AimMode::Idle;
    state.shots += 1;
    state.events.push(GameEvent::ShotFired { power, speed });
    log::info!("Shot {} fired: power {} at {:.2} u/s", state.shots, power.key(), speed);
    true
}
