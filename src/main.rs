//! Curling entry point
//!
//! Headless runner: plays whole ends with the computer throwing for both
//! sides and logs each result. Rendering and pointer input live outside
//! this crate; they drive `MatchState` through the same calls used here.
//!
//! Usage: `curling [settings.json] [ends]`

use std::path::PathBuf;

use curling::Settings;
use curling::sim::{GameEvent, MatchState, Side, TickInput, tick};

/// Ends played when none is given
const DEFAULT_ENDS: u32 = 4;

/// Bail out if a match somehow never settles
const MAX_TICKS_PER_END: u64 = 1_000_000;

fn main() {
    env_logger::init();
    log::info!("Curling (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = args.next().map(PathBuf::from);
    let ends = args
        .next()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(DEFAULT_ENDS);

    let settings = Settings::load_or_default(settings_path.as_deref());
    log::info!(
        "Playing {} ends on a {}x{} rink ({} opponent, seed {})",
        ends,
        settings.rink_width,
        settings.rink_height,
        settings.difficulty.as_str(),
        settings.seed
    );

    let mut state = MatchState::from_settings(&settings);
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut ends_played = 0;
    let tick_limit = MAX_TICKS_PER_END * ends.max(1) as u64;
    while ends_played < ends && state.time_ticks < tick_limit {
        tick(&mut state, &input);
        for event in state.drain_events() {
            match event {
                GameEvent::EndFinished { end, result } => {
                    ends_played += 1;
                    match result.winner {
                        Some(side) => {
                            println!("End {end}: {} scores {}", side.as_str(), result.points)
                        }
                        None => println!("End {end}: blank"),
                    }
                }
                GameEvent::ThrowLaunched { side, velocity } => {
                    log::debug!("{} throw ({:.2}, {:.2})", side.as_str(), velocity.x, velocity.y);
                }
                GameEvent::TurnChanged { .. } | GameEvent::NewEnd { .. } => {}
            }
        }
    }

    if ends_played < ends {
        log::warn!(
            "Stopped after {} ticks with {ends_played} of {ends} ends played",
            state.time_ticks
        );
    }

    let snapshot = state.snapshot();
    println!(
        "Final: Player {} - {} Opponent ({} ticks)",
        snapshot.player_score, snapshot.opponent_score, state.time_ticks
    );
    match snapshot.player_score.cmp(&snapshot.opponent_score) {
        std::cmp::Ordering::Greater => println!("{} wins", Side::Player.as_str()),
        std::cmp::Ordering::Less => println!("{} wins", Side::Opponent.as_str()),
        std::cmp::Ordering::Equal => println!("Tied"),
    }
}
