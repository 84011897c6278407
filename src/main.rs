//! Map Jump headless entry point
//!
//! Plays a seeded session against the in-memory host with a slightly
//! imperfect autoplayer, then resets once to show the restart path.
//!
//! Usage: `map-jump [seed] [options.json]`

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use map_jump::{GameEvent, GameOptions, InputEvent, JumpGame, RecordingHost};

/// Autoplayer timing error, in charge intervals either side of ideal
const HOLD_JITTER_TICKS: i64 = 3;
/// Stop a session after this many landings even if it never misses
const MAX_JUMPS: u32 = 200;

fn main() {
    env_logger::init();
    log::info!("Map Jump (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(20_210_401);
    let options = match args.next() {
        Some(path) => match GameOptions::load(&path) {
            Ok(options) => options,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => GameOptions::default(),
    };

    let mut game = match JumpGame::new(RecordingHost::new(), options, seed) {
        Ok(game) => game,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    let mut player = Pcg32::seed_from_u64(seed ^ 0x5eed);

    if let Err(e) = game.start_game() {
        log::error!("{}", e);
        std::process::exit(1);
    }
    let first = play_session(&mut game, &mut player);
    println!("Session 1: {} jumps", first);

    if let Err(e) = game.reset_game() {
        log::error!("{}", e);
        std::process::exit(1);
    }
    let second = play_session(&mut game, &mut player);
    println!("Session 2: {} jumps", second);

    let host = game.into_host();
    println!(
        "Host saw {} calls, {} entities live",
        host.calls.len(),
        host.entities.len()
    );
}

/// Play until game over; returns the score
fn play_session(game: &mut JumpGame<RecordingHost>, player: &mut Pcg32) -> u32 {
    loop {
        for event in game.drain_events() {
            match event {
                GameEvent::GameStart => log::info!("UI: hide reset button"),
                GameEvent::GameOver => {
                    log::info!("UI: show reset button");
                    return game.score();
                }
            }
        }
        if game.score() >= MAX_JUMPS {
            return game.score();
        }

        let Some(ideal) = game.ideal_hold_ms() else {
            return game.score();
        };
        let interval = game.options().charge_interval_ms as i64;
        let jitter = player.random_range(-HOLD_JITTER_TICKS..=HOLD_JITTER_TICKS) * interval;
        let hold = (ideal as i64 + jitter).max(0) as u64;

        if let Err(e) = game.handle_input(InputEvent::Press) {
            log::warn!("Press rejected: {}", e);
            return game.score();
        }
        if let Err(e) = game.advance(hold) {
            log::warn!("Charge failed: {}", e);
        }
        if let Err(e) = game.handle_input(InputEvent::Release) {
            log::warn!("Release rejected: {}", e);
            return game.score();
        }

        let interval = game.options().flight_interval_ms;
        loop {
            match game.advance(interval) {
                Ok(Some(landing)) => {
                    log::debug!("Landing: {:?}", landing);
                    break;
                }
                Ok(None) => {}
                Err(e) => {
                    log::warn!("Flight failed: {}", e);
                    return game.score();
                }
            }
        }
    }
}
