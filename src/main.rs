//! Pong Duel entry point
//!
//! Runs a headless computer-vs-computer demo on the simulation clock.
//! Usage: `pong-duel [settings.json] [seconds] [simple|predictive]`

use std::path::Path;

use pong_duel::{AiKind, Settings};
use pong_duel::sim::{Game, GameEvent, GameMode, GameType};

/// Simulated seconds when none are given
const DEFAULT_DEMO_SECONDS: u64 = 120;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Pong Duel (headless) starting...");

    let mut args = std::env::args().skip(1);
    let mut settings = match args.next() {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };
    let seconds = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_DEMO_SECONDS);
    if let Some(arg) = args.next() {
        match AiKind::from_str(&arg) {
            Some(ai) => settings.ai = ai,
            None => log::warn!("Unknown AI '{}', keeping {}", arg, settings.ai.as_str()),
        }
    }

    let mut game = Game::new(settings);
    while game.game_type() != GameType::ZeroPlayer {
        game.cycle_game_type();
    }
    game.play();

    let frame = game.settings().frame_interval_ms();
    let end_ms = seconds * 1000;
    let mut matches = 0u32;
    let mut rallies = 0u32;

    while game.now_ms() < end_ms {
        game.advance(frame);

        for event in game.drain_events() {
            match event {
                GameEvent::PaddleHit(_) => rallies += 1,
                GameEvent::MatchWon(side) => {
                    matches += 1;
                    log::info!("Match {} won by {:?} after {} hits", matches, side, rallies);
                    rallies = 0;
                }
                _ => {}
            }
        }

        if game.mode() == GameMode::Menu {
            game.play();
        }
    }

    log::info!("Simulated {}s, {} matches finished", seconds, matches);
    match serde_json::to_string_pretty(&game.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Could not serialize snapshot: {}", e),
    }
}
