//! Asteroids headless driver
//!
//! Runs the simulation at a fixed 60 Hz with a scripted pilot, logs the
//! frame events and prints the final HUD as JSON. Usage:
//!
//! ```text
//! asteroids-sim [settings.json] [frames]
//! ```

#[cfg(not(target_arch = "wasm32"))]
use asteroids_sim::sim::{GameEvent, GamePhase, GameState, TickInput, draw_list, tick};
#[cfg(not(target_arch = "wasm32"))]
use asteroids_sim::{Result, Settings};

#[cfg(not(target_arch = "wasm32"))]
const FRAME_DT: f32 = 1.0 / 60.0;

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_FRAMES: u64 = 60 * 120;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Asteroids (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match load_settings(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load settings from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };
    let frames = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(n)) => n,
        Some(Err(e)) => {
            log::error!("Invalid frame count: {}", e);
            std::process::exit(2);
        }
        None => DEFAULT_FRAMES,
    };

    let settings = Settings {
        seed: Some(settings.seed.unwrap_or_else(clock_seed)),
        ..settings
    };
    let mut state = match GameState::from_settings(&settings) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Cannot start session: {}", e);
            std::process::exit(1);
        }
    };
    log::info!(
        "Arena {}x{}, seed {}, quality {}",
        settings.width,
        settings.height,
        state.seed,
        settings.quality.as_str()
    );

    let mut peak_draw = 0;
    let mut games = 0;
    for frame in 0..frames {
        let input = autopilot(&state, frame);
        if input.start {
            games += 1;
        }
        tick(&mut state, &input, FRAME_DT);

        for event in state.drain_events() {
            match event {
                GameEvent::Sound(sound) => log::trace!("sound: {}", sound.name()),
                other => log::debug!("frame {}: {:?}", frame, other),
            }
        }
        peak_draw = peak_draw.max(draw_list(&state).len());
    }

    log::info!(
        "Ran {} frames over {} game(s), peak draw list {}",
        frames,
        games,
        peak_draw
    );
    match serde_json::to_string_pretty(&state.hud()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize HUD: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The core is embedded by a host on wasm; there is no standalone driver
}

#[cfg(not(target_arch = "wasm32"))]
fn load_settings(path: &str) -> Result<Settings> {
    let json = std::fs::read_to_string(path).map_err(|e| asteroids_sim::SimError::InvalidSettings {
        field: "path",
        reason: e.to_string(),
    })?;
    Settings::from_json(&json)
}

#[cfg(not(target_arch = "wasm32"))]
fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5eed)
}

/// Scripted pilot: sweep the nose around, fire constantly, thrust in
/// bursts, jump now and then, and restart when the run ends
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(state: &GameState, frame: u64) -> TickInput {
    if state.phase != GamePhase::Playing {
        return TickInput {
            start: frame % 30 == 0,
            ..Default::default()
        };
    }
    let phase = frame % 240;
    TickInput {
        left: phase < 90,
        right: (120..150).contains(&phase),
        thrust: (90..110).contains(&phase),
        shoot: true,
        hyperspace: frame % 900 == 899,
        start: false,
    }
}
