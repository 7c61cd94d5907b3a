//! Space Rocks headless host
//!
//! Drives one session with a scripted pilot at a steady 60 Hz and prints the
//! final snapshot as JSON. Usage: `space-rocks [settings.json] [max_frames]`.

use space_rocks::Settings;
use space_rocks::sim::{FrameClock, GameEvent, GameState, InputBuffer, TickInput, tick};

const FRAME_MS: f64 = 1000.0 / 60.0;
const DEFAULT_MAX_FRAMES: u64 = 60 * 60;

/// Key codes the scripted pilot holds on a given frame
fn pilot_keys(frame: u64) -> Vec<&'static str> {
    let mut keys = Vec::new();
    // Sweep the guns around, with short thrust bursts
    if frame % 240 < 180 {
        keys.push("KeyA");
    }
    if frame % 120 < 15 {
        keys.push("KeyW");
    }
    if frame % 120 > 90 {
        keys.push("KeyS");
    }
    // Tap fire: press 4 frames, release 4 frames
    if frame % 8 < 4 {
        keys.push("Space");
    }
    keys
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    let max_frames = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(n)) => n,
        Some(Err(err)) => {
            log::warn!("Bad frame count ({err}), using {DEFAULT_MAX_FRAMES}");
            DEFAULT_MAX_FRAMES
        }
        None => DEFAULT_MAX_FRAMES,
    };

    log::info!("Space Rocks (headless) starting...");
    let mut state = match GameState::try_new(settings) {
        Ok(state) => state,
        Err(err) => {
            log::error!("Invalid settings: {err}");
            std::process::exit(1);
        }
    };
    let mut clock = FrameClock::new(state.settings.fallback_delta_ms);
    let mut buffer = InputBuffer::new();

    for frame in 0..max_frames {
        // Input collaborator: rewrite the buffer between ticks
        buffer.clear();
        for code in pilot_keys(frame) {
            buffer.key_down(code);
        }

        let timestamp = frame as f64 * FRAME_MS;
        let delta = clock.delta(timestamp);
        let input = TickInput {
            keys: buffer.snapshot(),
        };
        tick(&mut state, &input, delta);

        for event in &state.events {
            match event {
                GameEvent::AsteroidDestroyed { .. } => {
                    log::info!(
                        "Frame {frame}: hit! score {} ({} left)",
                        state.score(),
                        state.remaining_asteroids()
                    );
                }
                GameEvent::PlayerDestroyed { .. } => log::info!("Frame {frame}: Y O U   D I E D"),
                GameEvent::Won => log::info!("Frame {frame}: Y O U   D I D   I T"),
                GameEvent::BulletFired { .. } | GameEvent::BulletExpired { .. } => {}
            }
        }

        if !state.is_alive() || state.has_won() {
            break;
        }
    }

    match state.snapshot().to_json() {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("Could not serialize snapshot: {err}"),
    }
}
