//! Alien Storm entry point
//!
//! Headless driver: runs the deterministic simulation with a scripted
//! pilot and logs what the scene framework would present (audio cues,
//! score label updates), then prints a JSON snapshot of the final state.

use alien_storm::audio;
use alien_storm::consts::SIM_DT;
use alien_storm::sim::{GameEvent, GameState, TickInput, tick};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(2024);
    log::info!("starting run with seed {seed}");

    let mut state = GameState::new(seed);
    let total_ticks = (30.0 / SIM_DT) as u64;

    for frame in 0..total_ticks {
        // Scripted pilot: sway side to side, fire twice a second
        let t = frame as f32 * SIM_DT;
        let input = TickInput {
            tilt: Some((t * 0.8).sin() * 0.4),
            fire: frame % 30 == 0,
        };
        tick(&mut state, &input);

        for event in &state.events {
            if let Some(cue) = audio::cue_for(event) {
                log::debug!("audio cue: {}", cue.file_name());
            }
            if let GameEvent::ScoreChanged { .. } = event {
                log::info!("{}", state.score.label());
            }
        }
    }

    log::info!(
        "run finished after {} ticks: {}",
        state.time_ticks,
        state.score.label()
    );

    match serde_json::to_string_pretty(&state) {
        Ok(snapshot) => println!("{snapshot}"),
        Err(err) => log::error!("failed to serialize final state: {err}"),
    }
}
