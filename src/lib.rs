//! Pong Duel - a two-paddle arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddles, ball, collisions, AI, game modes)
//! - `settings`: Data-driven game tuning
//! - `ui`: Menu button layout and pointer hit testing

pub mod settings;
pub mod sim;
pub mod ui;

pub use settings::{AiKind, Settings, ShotWeights};

use glam::Vec2;

/// Game configuration constants (defaults for `Settings`)
pub mod consts {
    /// Simulation ticks per second
    pub const FRAME_RATE: u32 = 60;
    /// Pause after a point before the next serve (ms)
    pub const SCORE_DELAY_MS: u64 = 1000;
    /// Orientation pause before play starts or resumes (ms)
    pub const RESUME_DELAY_MS: u64 = 1000;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Paddle speed multiplier (scaled by arena height / 512 per tick)
    pub const PADDLE_SPEED: f32 = 4.0;

    /// Ball speed in units per tick
    pub const INITIAL_BALL_SPEED: f32 = 6.0;
    pub const MAX_BALL_SPEED: f32 = 16.0;
    /// Speed multiplier on paddle hit
    pub const BALL_ACCELERATION_FACTOR: f32 = 1.1;
    /// Speed multiplier on wall bounce
    pub const WALL_ACCELERATION_FACTOR: f32 = 1.01;

    /// Serve direction before normalization (x sign alternates per round)
    pub const SERVE_DX: f32 = 5.0;
    pub const SERVE_DY: f32 = -1.0;

    /// Steepest bounce off a paddle edge (degrees from horizontal)
    pub const MAX_BOUNCE_ANGLE_DEG: f32 = 60.0;

    /// Points needed to win a match
    pub const TARGET_SCORE: u8 = 10;

    /// Dead zone for the simple tracking AI
    pub const COMPUTER_AIMING_TOLERANCE: f32 = 10.0;

    /// Seed used when settings don't provide one
    pub const DEFAULT_SEED: u64 = 0x5EED_0F_9A11;
}

/// Angle of a vector from the +x axis, in radians.
/// A zero vector has angle 0.
#[inline]
pub fn angle_of(v: Vec2) -> f32 {
    if v == Vec2::ZERO { 0.0 } else { v.y.atan2(v.x) }
}

/// Unit vector at `angle` scaled to `length`
#[inline]
pub fn from_angle(angle: f32, length: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin()) * length
}

/// Rescale `v` to magnitude `speed`, keeping its direction.
/// Degenerate vectors fall back to pointing along +x.
#[inline]
pub fn with_speed(v: Vec2, speed: f32) -> Vec2 {
    let dir = v.normalize_or_zero();
    if dir == Vec2::ZERO { Vec2::X * speed } else { dir * speed }
}
