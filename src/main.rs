//! Cue Table headless runner
//!
//! Racks a table, lets the demo autopilot play at a fixed frame rate until the
//! table is cleared or the frame cap is reached, then prints the final frame
//! snapshot as JSON.
//!
//! Usage: `cue-table [settings.json]`

use std::path::Path;

use cue_table::Settings;
use cue_table::sim::{FrameSnapshot, GameEvent, GameState, TickInput, TableGeometry, tick};

fn main() {
    env_logger::init();
    log::info!("Cue Table (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };

    let mut state = GameState::with_config(settings.seed, settings.tuning.clone(), TableGeometry::standard());
    log::info!(
        "Session seed {}, {} balls racked, dt {:.4}s",
        state.seed,
        state.balls.len(),
        settings.frame_dt
    );

    let input = TickInput {
        idle_mode: settings.demo_mode,
        ..Default::default()
    };

    let mut cleared = false;
    for frame in 0..settings.max_frames {
        tick(&mut state, &input, settings.frame_dt);

        for event in &state.events {
            match event {
                GameEvent::CushionHit { .. } | GameEvent::BallCollision { .. } => {
                    log::trace!("frame {}: {:?}", frame, event)
                }
                GameEvent::TableCleared => cleared = true,
                _ => log::info!("frame {}: {:?}", frame, event),
            }
        }

        if settings.snapshot_every > 0 && frame % settings.snapshot_every == 0 {
            log::debug!(
                "frame {}: {} balls active, aim {:?}",
                frame,
                state.active_count(),
                state.aim.mode
            );
        }

        if cleared {
            break;
        }
    }

    log::info!(
        "Finished after {} frames: {} shots, {} balls pocketed {:?}",
        state.time_ticks,
        state.shots,
        state.pocketed.len(),
        state.pocketed
    );

    match serde_json::to_string_pretty(&FrameSnapshot::capture(&state)) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not serialize snapshot: {}", e),
    }
}
