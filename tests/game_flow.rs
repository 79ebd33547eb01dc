use glam::Vec2;
use pong_duel::Settings;
use pong_duel::sim::{ESCAPE, Game, GameEvent, GameMode, GameType, Side, Timer, TimerKind};

/// A game in play with a ball just served, at a tick boundary
fn game_in_play(settings: Settings) -> Game {
    let mut game = Game::new(settings);
    assert!(game.play());
    let delay = game.settings().resume_delay_ms;
    game.advance(delay);
    assert!(game.state.ball.in_play);
    game
}

/// Milliseconds until the next scheduled tick after `game_in_play`
fn to_next_tick(game: &Game) -> u64 {
    let frame = game.settings().frame_interval_ms();
    frame - game.now_ms() % frame
}

#[test]
fn test_ball_leaving_left_scores_right_and_reserves() {
    let mut game = game_in_play(Settings::default());
    let speed = game.state.ball.speed;
    game.state.ball.pos = Vec2::new(0.0, 300.0);
    game.state.ball.vel = Vec2::new(-speed, 0.0);

    let wait = to_next_tick(&game);
    game.advance(wait);
    assert_eq!(game.state.scores.right, 1);
    assert_eq!(game.state.scores.left, 0);
    assert!(!game.state.ball.in_play);
    assert!(game.drain_events().contains(&GameEvent::Point(Side::Right)));

    let delay = game.settings().score_delay_ms;
    game.advance(delay - 1);
    assert!(!game.state.ball.in_play);
    game.advance(1);
    assert!(game.state.ball.in_play);
    assert_eq!(game.state.ball.speed, game.settings().initial_ball_speed);
    assert_eq!(game.mode(), GameMode::Playing);
}

#[test]
fn test_winning_point_returns_to_menu() {
    let mut game = game_in_play(Settings::default());
    let target = game.settings().target_score;
    game.state.scores.left = target - 1;
    game.state.scores.right = 2;
    let speed = game.state.ball.speed;
    game.state.ball.pos = Vec2::new(795.0, 300.0);
    game.state.ball.vel = Vec2::new(speed, 0.0);

    let epoch = game.epoch();
    let wait = to_next_tick(&game);
    game.advance(wait);

    assert_eq!(game.mode(), GameMode::Menu);
    assert_eq!(game.state.scores.left, 0);
    assert_eq!(game.state.scores.right, 0);
    assert_eq!(game.state.last_winner, Some(Side::Left));
    assert!(game.epoch() > epoch);
    assert!(game.drain_events().contains(&GameEvent::MatchWon(Side::Left)));

    // No serve or tick survives the match
    let ticks = game.state.time_ticks;
    game.advance(5000);
    assert_eq!(game.state.time_ticks, ticks);
    assert!(!game.state.ball.in_play);
}

#[test]
fn test_short_match_target() {
    let settings = Settings {
        target_score: 1,
        ..Default::default()
    };
    let mut game = game_in_play(settings);
    let speed = game.state.ball.speed;
    game.state.ball.pos = Vec2::new(0.0, 300.0);
    game.state.ball.vel = Vec2::new(-speed, 0.0);
    let wait = to_next_tick(&game);
    game.advance(wait);
    assert_eq!(game.mode(), GameMode::Menu);
    assert_eq!(game.state.last_winner, Some(Side::Right));
}

#[test]
fn test_pause_during_score_delay_still_serves_on_resume() {
    let mut game = game_in_play(Settings::default());
    let speed = game.state.ball.speed;
    game.state.ball.pos = Vec2::new(0.0, 300.0);
    game.state.ball.vel = Vec2::new(-speed, 0.0);
    let wait = to_next_tick(&game);
    game.advance(wait);
    assert!(!game.state.ball.in_play);

    game.key(ESCAPE, true);
    assert_eq!(game.mode(), GameMode::Paused);
    game.advance(3000);
    assert!(!game.state.ball.in_play);

    game.key(ESCAPE, true);
    let delay = game.settings().resume_delay_ms;
    game.advance(delay);
    assert!(game.state.ball.in_play);
}

#[test]
fn test_stale_timers_do_not_mutate() {
    let mut game = game_in_play(Settings::default());
    let old_epoch = game.epoch();
    game.pause();
    game.resume();

    let before = game.state.clone();
    for kind in [TimerKind::Tick, TimerKind::RoundReset] {
        game.on_timer(Timer {
            epoch: old_epoch,
            kind,
        });
    }
    assert_eq!(game.state.time_ticks, before.time_ticks);
    assert_eq!(game.state.ball, before.ball);
    assert_eq!(game.state.paddles, before.paddles);
    assert_eq!(game.state.scores, before.scores);
}

#[test]
fn test_two_player_keys_move_each_side() {
    let mut game = Game::default();
    game.cycle_game_type();
    assert_eq!(game.game_type(), GameType::TwoPlayer);
    game.play();

    let start = game.state.paddles[0].y;
    game.key('w', true);
    game.special_key(pong_duel::sim::SpecialKey::Down, true);
    game.advance(game.settings().frame_interval_ms());

    assert!(game.state.paddles[0].y > start);
    assert!(game.state.paddles[1].y < start);
}

#[test]
fn test_demo_match_is_deterministic() {
    let run = || {
        let settings = Settings {
            seed: Some(1234),
            ..Default::default()
        };
        let mut game = Game::new(settings);
        game.cycle_game_type();
        game.cycle_game_type();
        assert_eq!(game.game_type(), GameType::ZeroPlayer);
        game.play();
        for _ in 0..2000 {
            game.advance(16);
        }
        game.snapshot()
    };

    assert_eq!(run(), run());
}

#[test]
fn test_demo_rallies_happen() {
    let mut game = Game::default();
    game.cycle_game_type();
    game.cycle_game_type();
    game.play();

    let mut hits = 0;
    for _ in 0..3000 {
        game.advance(16);
        hits += game
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::PaddleHit(_)))
            .count();
        if game.mode() == GameMode::Menu {
            game.play();
        }
    }
    assert!(hits > 0);
}

#[test]
fn test_snapshot_serializes() {
    let game = game_in_play(Settings::default());
    let json = serde_json::to_string(&game.snapshot()).unwrap();
    assert!(json.contains("\"mode\":\"Playing\""));
}
