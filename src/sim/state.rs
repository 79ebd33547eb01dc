//! Game state and core simulation types
//!
//! Every entity has fixed cardinality (two paddles, one ball, one score pair)
//! and is mutated in place for the lifetime of the process.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Paddle side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    /// Sign of the x velocity that carries the ball away from this side
    pub fn outward(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

/// Top-level game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Menu,
    Playing,
    Paused,
}

/// Which controllers drive the two paddles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameType {
    /// Human on the left, computer on the right
    #[default]
    OnePlayer,
    /// Humans on both sides
    TwoPlayer,
    /// Computer against computer
    ZeroPlayer,
}

impl GameType {
    /// Next type in the menu cycle
    pub fn next(self) -> GameType {
        match self {
            GameType::OnePlayer => GameType::TwoPlayer,
            GameType::TwoPlayer => GameType::ZeroPlayer,
            GameType::ZeroPlayer => GameType::OnePlayer,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameType::OnePlayer => "1 Player",
            GameType::TwoPlayer => "2 Players",
            GameType::ZeroPlayer => "Demo",
        }
    }
}

/// Aiming strategy the AI uses for its next return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ComputerShot {
    /// Straight back
    #[default]
    Flat,
    /// Toward the top of the far side
    Top,
    /// Toward the bottom of the far side
    Bottom,
    /// Toward whichever edge is farthest from the opponent
    Aggressive,
    /// Right at the opponent
    Easy,
    /// Steepest upward deflection
    ErraticUp,
    /// Steepest downward deflection
    ErraticDown,
}

/// Fixed arena geometry derived from settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Side length of the square ball
    pub ball_size: f32,
    /// Front face of the left paddle
    pub left_paddle_x: f32,
    /// Front face of the right paddle
    pub right_paddle_x: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        let left_paddle_x = width / 16.0;
        Self {
            width,
            height,
            paddle_width: width / 100.0,
            paddle_height: height / 8.0,
            ball_size: width / 120.0,
            left_paddle_x,
            right_paddle_x: width - left_paddle_x,
        }
    }

    pub fn min_paddle_y(&self) -> f32 {
        0.0
    }

    pub fn max_paddle_y(&self) -> f32 {
        self.height - self.paddle_height
    }

    /// Paddle y that centers it vertically
    pub fn centered_paddle_y(&self) -> f32 {
        (self.height - self.paddle_height) / 2.0
    }

    /// Front face x of the given paddle
    pub fn paddle_face_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.left_paddle_x,
            Side::Right => self.right_paddle_x,
        }
    }

    /// Horizontal extent (min, max) of the given paddle
    pub fn paddle_x_range(&self, side: Side) -> (f32, f32) {
        match side {
            Side::Left => (self.left_paddle_x - self.paddle_width, self.left_paddle_x),
            Side::Right => (self.right_paddle_x, self.right_paddle_x + self.paddle_width),
        }
    }

    /// Ball-center x at which the ball touches the given paddle's face
    pub fn contact_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.left_paddle_x + self.ball_size / 2.0,
            Side::Right => self.right_paddle_x - self.ball_size / 2.0,
        }
    }

    pub fn center_y(&self) -> f32 {
        self.height / 2.0
    }
}

/// A paddle (position is the bottom edge; the face x is fixed by the arena)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub y: f32,
}

impl Paddle {
    pub fn centered(arena: &Arena) -> Self {
        Self {
            y: arena.centered_paddle_y(),
        }
    }

    pub fn center_y(&self, arena: &Arena) -> f32 {
        self.y + arena.paddle_height / 2.0
    }

    /// Move by `dy`, clamped to the arena
    pub fn shift(&mut self, dy: f32, arena: &Arena) {
        self.y = (self.y + dy).clamp(arena.min_paddle_y(), arena.max_paddle_y());
    }
}

/// The ball. `pos` is the bottom-left corner of its box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Target magnitude of `vel` while in play
    pub speed: f32,
    /// Whether the ball takes part in collisions and scoring
    pub in_play: bool,
}

impl Ball {
    /// A hidden ball parked off the arena
    pub fn hidden(arena: &Arena, speed: f32) -> Self {
        Self {
            pos: Vec2::splat(-arena.ball_size),
            vel: Vec2::ZERO,
            speed,
            in_play: false,
        }
    }

    pub fn hide(&mut self, arena: &Arena) {
        self.pos = Vec2::splat(-arena.ball_size);
        self.vel = Vec2::ZERO;
        self.in_play = false;
    }

    pub fn center(&self, arena: &Arena) -> Vec2 {
        self.pos + Vec2::splat(arena.ball_size / 2.0)
    }

    /// Serve from mid-court toward `toward` at `speed`
    pub fn serve(&mut self, arena: &Arena, toward: Side, speed: f32) {
        use crate::consts::{SERVE_DX, SERVE_DY};

        let dir_x = match toward {
            Side::Left => -SERVE_DX,
            Side::Right => SERVE_DX,
        };
        self.pos = Vec2::new(
            (arena.width - arena.ball_size) / 2.0,
            (arena.height - arena.ball_size) / 2.0,
        );
        self.speed = speed;
        self.vel = crate::with_speed(Vec2::new(dir_x, SERVE_DY), speed);
        self.in_play = true;
    }

    /// Multiply speed by `factor` up to `max`, keeping direction
    pub fn accelerate(&mut self, factor: f32, max: f32) {
        self.speed = (self.speed * factor).min(max);
        self.vel = crate::with_speed(self.vel, self.speed);
    }

    /// True if the ball moves toward the given paddle
    pub fn approaching(&self, side: Side) -> bool {
        self.vel.x * side.outward() < 0.0
    }
}

/// Points per side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scores {
    pub left: u8,
    pub right: u8,
}

impl Scores {
    pub fn get(&self, side: Side) -> u8 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Add a point, returning the new total
    pub fn award(&mut self, side: Side) -> u8 {
        let score = match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        };
        *score = score.saturating_add(1);
        *score
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub arena: Arena,
    pub paddles: [Paddle; 2],
    pub ball: Ball,
    pub scores: Scores,
    /// Side the next serve travels toward; flips every round
    pub left_start: bool,
    /// Pending AI shot per side
    pub shots: [ComputerShot; 2],
    /// Winner of the most recent match
    pub last_winner: Option<Side>,
    /// Ticks simulated since startup
    pub time_ticks: u64,
}

impl GameState {
    pub fn new(settings: &Settings) -> Self {
        let arena = Arena::new(settings.arena_width, settings.arena_height);
        Self {
            arena,
            paddles: [Paddle::centered(&arena), Paddle::centered(&arena)],
            ball: Ball::hidden(&arena, settings.initial_ball_speed),
            scores: Scores::default(),
            left_start: true,
            shots: [ComputerShot::Flat; 2],
            last_winner: None,
            time_ticks: 0,
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        &self.paddles[side.index()]
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        &mut self.paddles[side.index()]
    }

    pub fn shot(&self, side: Side) -> ComputerShot {
        self.shots[side.index()]
    }

    pub fn recenter_paddles(&mut self) {
        let arena = self.arena;
        for paddle in &mut self.paddles {
            *paddle = Paddle::centered(&arena);
        }
    }

    /// Start a new round: serve toward the side picked by `left_start`, then flip it
    pub fn reset_round(&mut self, initial_speed: f32) {
        let toward = if self.left_start { Side::Left } else { Side::Right };
        let arena = self.arena;
        self.ball.serve(&arena, toward, initial_speed);
        self.left_start = !self.left_start;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_geometry() {
        let arena = Arena::new(800.0, 600.0);
        assert_eq!(arena.paddle_height, 75.0);
        assert_eq!(arena.paddle_width, 8.0);
        assert_eq!(arena.left_paddle_x, 50.0);
        assert_eq!(arena.right_paddle_x, 750.0);
        assert_eq!(arena.max_paddle_y(), 525.0);
        assert_eq!(arena.paddle_x_range(Side::Left), (42.0, 50.0));
        assert_eq!(arena.paddle_x_range(Side::Right), (750.0, 758.0));
    }

    #[test]
    fn test_paddle_shift_clamps() {
        let arena = Arena::new(800.0, 600.0);
        let mut paddle = Paddle::centered(&arena);
        paddle.shift(10_000.0, &arena);
        assert_eq!(paddle.y, arena.max_paddle_y());
        paddle.shift(-10_000.0, &arena);
        assert_eq!(paddle.y, 0.0);
    }

    #[test]
    fn test_reset_round_alternates() {
        let settings = Settings::default();
        let mut state = GameState::new(&settings);
        assert!(!state.ball.in_play);

        state.reset_round(settings.initial_ball_speed);
        assert!(state.ball.in_play);
        assert!(state.ball.vel.x < 0.0);
        assert!((state.ball.vel.length() - settings.initial_ball_speed).abs() < 1e-4);
        assert_eq!(state.ball.speed, settings.initial_ball_speed);

        state.reset_round(settings.initial_ball_speed);
        assert!(state.ball.vel.x > 0.0);
    }

    #[test]
    fn test_accelerate_caps() {
        let settings = Settings::default();
        let mut state = GameState::new(&settings);
        state.reset_round(settings.initial_ball_speed);
        for _ in 0..100 {
            state.ball.accelerate(1.5, settings.max_ball_speed);
        }
        assert_eq!(state.ball.speed, settings.max_ball_speed);
        assert!((state.ball.vel.length() - settings.max_ball_speed).abs() < 1e-3);
    }

    #[test]
    fn test_scores_award() {
        let mut scores = Scores::default();
        assert_eq!(scores.award(Side::Right), 1);
        assert_eq!(scores.get(Side::Right), 1);
        assert_eq!(scores.get(Side::Left), 0);
        scores.reset();
        assert_eq!(scores, Scores::default());
    }

    #[test]
    fn test_game_type_cycle() {
        let t = GameType::OnePlayer;
        assert_eq!(t.next(), GameType::TwoPlayer);
        assert_eq!(t.next().next(), GameType::ZeroPlayer);
        assert_eq!(t.next().next().next(), GameType::OnePlayer);
    }
}
