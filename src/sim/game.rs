//! Game-mode state machine and the simulation context that owns everything
//!
//! Menu ⇄ Playing ⇄ Paused. Every mode change bumps the epoch; timers
//! scheduled under an older epoch are dropped when they fire, which is how
//! pausing or leaving a match stops in-flight ticks and serves.

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::control::Controller;
use super::input::{ESCAPE, InputState, SpecialKey};
use super::state::{GameMode, GameState, GameType, Side};
use super::tick::{GameEvent, tick};
use super::timer::{Timer, TimerKind, TimerQueue};
use crate::consts::DEFAULT_SEED;
use crate::settings::Settings;
use crate::ui::{ButtonKind, Menu};

/// Read-only view of the game for the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub mode: GameMode,
    pub game_type: GameType,
    pub left_paddle_y: f32,
    pub right_paddle_y: f32,
    pub ball_x: f32,
    pub ball_y: f32,
    pub ball_visible: bool,
    pub left_score: u8,
    pub right_score: u8,
    pub hovered: Vec<ButtonKind>,
    pub last_winner: Option<Side>,
}

/// The whole game: simulation state, input, controllers, mode and timers
#[derive(Debug, Clone)]
pub struct Game {
    settings: Settings,
    pub state: GameState,
    pub input: InputState,
    mode: GameMode,
    game_type: GameType,
    controllers: [Controller; 2],
    epoch: u64,
    now_ms: u64,
    timers: TimerQueue,
    rng: Pcg32,
    menu: Menu,
    redraw: bool,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(settings: Settings) -> Self {
        let settings = settings.sanitized();
        let state = GameState::new(&settings);
        let rng = super::state::RngState::new(settings.seed.unwrap_or(DEFAULT_SEED)).to_rng();
        let game_type = GameType::default();
        let menu = Menu::for_mode(GameMode::Menu, &state.arena);

        Self {
            controllers: Controller::pair(game_type, settings.ai),
            settings,
            state,
            input: InputState::new(),
            mode: GameMode::Menu,
            game_type,
            epoch: 0,
            now_ms: 0,
            timers: TimerQueue::new(),
            rng,
            menu,
            redraw: true,
            events: Vec::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn game_type(&self) -> GameType {
        self.game_type
    }

    pub fn controllers(&self) -> &[Controller; 2] {
        &self.controllers
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Simulation clock in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    /// Whether a redraw was requested since the last call; clears the request
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw)
    }

    /// Events from ticks since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            mode: self.mode,
            game_type: self.game_type,
            left_paddle_y: self.state.paddle(Side::Left).y,
            right_paddle_y: self.state.paddle(Side::Right).y,
            ball_x: self.state.ball.pos.x,
            ball_y: self.state.ball.pos.y,
            ball_visible: self.state.ball.in_play,
            left_score: self.state.scores.left,
            right_score: self.state.scores.right,
            hovered: self.menu.hovered(),
            last_winner: self.state.last_winner,
        }
    }

    fn schedule(&mut self, delay_ms: u64, kind: TimerKind) {
        let timer = Timer {
            epoch: self.epoch,
            kind,
        };
        self.timers.schedule(self.now_ms, delay_ms, timer);
    }

    fn enter(&mut self, mode: GameMode) {
        log::info!("{:?} -> {:?}", self.mode, mode);
        // Keys held when play stops shouldn't carry over
        if self.mode == GameMode::Playing {
            self.input.clear();
        }
        self.mode = mode;
        self.epoch += 1;
        self.menu = Menu::for_mode(mode, &self.state.arena);
        self.redraw = true;
    }

    /// Menu -> Playing
    pub fn play(&mut self) -> bool {
        if self.mode != GameMode::Menu {
            return false;
        }
        self.enter(GameMode::Playing);

        let arena = self.state.arena;
        self.state.ball.hide(&arena);
        self.state.recenter_paddles();
        self.state.shots = Default::default();

        self.schedule(self.settings.resume_delay_ms, TimerKind::RoundReset);
        self.schedule(self.settings.frame_interval_ms(), TimerKind::Tick);
        true
    }

    /// Playing -> Paused. Ball and paddles stay where they are.
    pub fn pause(&mut self) -> bool {
        if self.mode != GameMode::Playing {
            return false;
        }
        self.enter(GameMode::Paused);
        true
    }

    /// Paused -> Playing after the resume delay
    pub fn resume(&mut self) -> bool {
        if self.mode != GameMode::Paused {
            return false;
        }
        self.enter(GameMode::Playing);

        self.schedule(self.settings.resume_delay_ms, TimerKind::Tick);
        // A serve pending at pause time was invalidated with the old epoch
        if !self.state.ball.in_play {
            self.schedule(self.settings.resume_delay_ms, TimerKind::RoundReset);
        }
        true
    }

    /// Paused -> Menu, abandoning the match
    pub fn exit_to_menu(&mut self) -> bool {
        if self.mode != GameMode::Paused {
            return false;
        }
        self.enter(GameMode::Menu);

        let arena = self.state.arena;
        self.state.ball.hide(&arena);
        self.state.recenter_paddles();
        self.state.scores.reset();
        true
    }

    /// Cycle the game type (menu only) and rebind controllers
    pub fn cycle_game_type(&mut self) -> bool {
        if self.mode != GameMode::Menu {
            return false;
        }
        self.game_type = self.game_type.next();
        self.controllers = Controller::pair(self.game_type, self.settings.ai);
        log::info!(
            "Game type: {} ({} computer)",
            self.game_type.as_str(),
            self.settings.ai.as_str()
        );
        self.redraw = true;
        true
    }

    /// Character key press/release
    pub fn key(&mut self, key: char, pressed: bool) {
        if key == ESCAPE {
            if pressed {
                match self.mode {
                    GameMode::Playing => {
                        self.pause();
                    }
                    GameMode::Paused => {
                        self.resume();
                    }
                    GameMode::Menu => {}
                }
            }
            return;
        }
        self.input.set_key(key, pressed);
    }

    /// Arrow-key press/release
    pub fn special_key(&mut self, key: SpecialKey, pressed: bool) {
        self.input.set_special_key(key, pressed);
    }

    /// Pointer moved to arena coordinates (x, y)
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        if self.menu.pointer_moved(x, y) {
            self.redraw = true;
        }
    }

    /// Pointer pressed at arena coordinates (x, y)
    pub fn pointer_pressed(&mut self, x: f32, y: f32) -> bool {
        match self.menu.button_at(x, y) {
            Some(ButtonKind::Play) => self.play(),
            Some(ButtonKind::GameType) => self.cycle_game_type(),
            Some(ButtonKind::Resume) => self.resume(),
            Some(ButtonKind::Exit) => self.exit_to_menu(),
            None => false,
        }
    }

    /// Advance the clock, firing every timer that comes due
    pub fn advance(&mut self, elapsed_ms: u64) {
        let until = self.now_ms.saturating_add(elapsed_ms);
        while let Some((due_ms, timer)) = self.timers.pop_due(until) {
            self.now_ms = self.now_ms.max(due_ms);
            self.on_timer(timer);
        }
        self.now_ms = until;
    }

    /// Handle a fired timer. Timers from an older epoch do nothing.
    pub fn on_timer(&mut self, timer: Timer) {
        if timer.epoch != self.epoch {
            log::trace!(
                "Dropping stale {:?} (epoch {} != {})",
                timer.kind,
                timer.epoch,
                self.epoch
            );
            return;
        }

        match timer.kind {
            TimerKind::Tick => self.step(),
            TimerKind::RoundReset => {
                if self.mode == GameMode::Playing {
                    self.state.reset_round(self.settings.initial_ball_speed);
                    log::debug!("New round, serving {:?}", self.state.ball.vel);
                    self.redraw = true;
                }
            }
        }
    }

    fn step(&mut self) {
        if self.mode != GameMode::Playing {
            return;
        }

        let events = tick(
            &mut self.state,
            &self.controllers,
            &self.input,
            &self.settings,
            &mut self.rng,
        );

        let match_won = events.iter().any(|e| matches!(e, GameEvent::MatchWon(_)));
        let point = events.iter().any(|e| matches!(e, GameEvent::Point(_)));
        self.events.extend(events);

        if match_won {
            self.enter(GameMode::Menu);
            return;
        }
        if point {
            self.schedule(self.settings.score_delay_ms, TimerKind::RoundReset);
        }

        self.redraw = true;
        self.schedule(self.settings.frame_interval_ms(), TimerKind::Tick);
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_starts_in_menu() {
        let game = Game::default();
        assert_eq!(game.mode(), GameMode::Menu);
        assert_eq!(game.game_type(), GameType::OnePlayer);
        assert!(!game.state.ball.in_play);
    }

    #[test]
    fn test_play_serves_after_delay() {
        let mut game = Game::default();
        assert!(game.play());
        assert_eq!(game.mode(), GameMode::Playing);

        game.advance(game.settings().resume_delay_ms - 1);
        assert!(!game.state.ball.in_play);
        game.advance(1);
        assert!(game.state.ball.in_play);
    }

    #[test]
    fn test_invalid_transitions_ignored() {
        let mut game = Game::default();
        assert!(!game.pause());
        assert!(!game.resume());
        assert!(!game.exit_to_menu());
        let epoch = game.epoch();
        game.play();
        assert!(!game.play());
        assert!(!game.cycle_game_type());
        assert_eq!(game.epoch(), epoch + 1);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut game = Game::default();
        game.play();
        game.advance(1500);
        assert!(game.state.ball.in_play);

        assert!(game.pause());
        let ball = game.state.ball;
        let ticks = game.state.time_ticks;
        game.advance(5000);
        assert_eq!(game.state.ball, ball);
        assert_eq!(game.state.time_ticks, ticks);
    }

    #[test]
    fn test_resume_waits_for_delay() {
        let mut game = Game::default();
        game.play();
        game.advance(1500);
        game.pause();
        let ticks = game.state.time_ticks;

        assert!(game.resume());
        game.advance(game.settings().resume_delay_ms - 1);
        assert_eq!(game.state.time_ticks, ticks);
        game.advance(1);
        assert_eq!(game.state.time_ticks, ticks + 1);
    }

    #[test]
    fn test_stale_tick_is_ignored() {
        let mut game = Game::default();
        game.play();
        game.advance(1200);
        let stale = Timer {
            epoch: game.epoch() - 1,
            kind: TimerKind::Tick,
        };
        let before = game.state.clone();
        game.on_timer(stale);
        assert_eq!(game.state.time_ticks, before.time_ticks);
        assert_eq!(game.state.ball, before.ball);
    }

    #[test]
    fn test_exit_to_menu_resets() {
        let mut game = Game::default();
        game.play();
        game.advance(1500);
        game.state.scores.left = 3;
        game.pause();
        assert!(game.exit_to_menu());

        assert_eq!(game.mode(), GameMode::Menu);
        assert_eq!(game.state.scores.left, 0);
        assert!(!game.state.ball.in_play);
        assert_eq!(game.state.ball.vel, Vec2::ZERO);
        assert_eq!(game.state.paddles[0].y, game.state.arena.centered_paddle_y());

        // Nothing from the abandoned match fires later
        let ticks = game.state.time_ticks;
        game.advance(10_000);
        assert_eq!(game.state.time_ticks, ticks);
        assert!(!game.state.ball.in_play);
    }

    #[test]
    fn test_escape_toggles_pause() {
        let mut game = Game::default();
        game.key(ESCAPE, true);
        assert_eq!(game.mode(), GameMode::Menu);
        game.play();
        game.key(ESCAPE, true);
        assert_eq!(game.mode(), GameMode::Paused);
        game.key(ESCAPE, false);
        assert_eq!(game.mode(), GameMode::Paused);
        game.key(ESCAPE, true);
        assert_eq!(game.mode(), GameMode::Playing);
    }

    #[test]
    fn test_held_keys_released_on_pause() {
        let mut game = Game::default();
        game.play();
        game.key('w', true);
        game.special_key(SpecialKey::Down, true);
        game.pause();
        assert_eq!(game.input, InputState::default());

        game.resume();
        let y = game.state.paddles[0].y;
        let delay = game.settings().resume_delay_ms;
        game.advance(delay);
        assert_eq!(game.state.paddles[0].y, y);
    }

    #[test]
    fn test_cycle_game_type_rebinds() {
        let mut game = Game::default();
        assert!(game.cycle_game_type());
        assert_eq!(game.game_type(), GameType::TwoPlayer);
        assert_eq!(
            game.controllers(),
            &[Controller::HumanWasd, Controller::HumanArrows]
        );
        game.cycle_game_type();
        assert_eq!(game.game_type(), GameType::ZeroPlayer);
        assert!(game.controllers().iter().all(|c| c.is_computer()));
    }

    #[test]
    fn test_pointer_buttons() {
        let mut game = Game::default();
        game.pointer_moved(400.0, 320.0);
        assert_eq!(game.snapshot().hovered, vec![ButtonKind::Play]);
        assert!(game.pointer_pressed(400.0, 260.0));
        assert_eq!(game.game_type(), GameType::TwoPlayer);
        assert!(game.pointer_pressed(400.0, 320.0));
        assert_eq!(game.mode(), GameMode::Playing);
        // No buttons while playing
        assert!(!game.pointer_pressed(400.0, 320.0));
    }

    #[test]
    fn test_redraw_requests() {
        let mut game = Game::default();
        assert!(game.take_redraw());
        assert!(!game.take_redraw());
        game.play();
        assert!(game.take_redraw());
        game.advance(game.settings().frame_interval_ms());
        assert!(game.take_redraw());
    }
}
