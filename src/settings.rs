//! Game settings and tuning
//!
//! Loaded once at startup from an optional JSON file. Nothing is written
//! back between runs.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Which AI drives computer-controlled paddles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiKind {
    /// Tracks the ball's current height
    Simple,
    /// Predicts the intercept and aims its returns
    #[default]
    Predictive,
}

impl AiKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiKind::Simple => "Simple",
            AiKind::Predictive => "Predictive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "simple" | "easy" => Some(AiKind::Simple),
            "predictive" | "hard" => Some(AiKind::Predictive),
            _ => None,
        }
    }
}

/// Relative likelihood of each AI shot after a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotWeights {
    pub flat: u32,
    pub top: u32,
    pub bottom: u32,
    pub aggressive: u32,
    pub easy: u32,
    pub erratic_up: u32,
    pub erratic_down: u32,
}

impl Default for ShotWeights {
    fn default() -> Self {
        Self {
            flat: 4,
            top: 3,
            bottom: 3,
            aggressive: 4,
            easy: 2,
            erratic_up: 1,
            erratic_down: 1,
        }
    }
}

impl ShotWeights {
    /// Sum of all weights. Widened so user-supplied weights can't overflow.
    pub fn total(&self) -> u64 {
        [
            self.flat,
            self.top,
            self.bottom,
            self.aggressive,
            self.easy,
            self.erratic_up,
            self.erratic_down,
        ]
        .iter()
        .map(|&w| w as u64)
        .sum()
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timing ===
    /// Simulation ticks per second
    pub frame_rate: u32,
    /// Delay between a point and the next serve
    pub score_delay_ms: u64,
    /// Delay before play starts from the menu or resumes from pause
    pub resume_delay_ms: u64,

    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Movement ===
    pub paddle_speed: f32,
    pub initial_ball_speed: f32,
    pub max_ball_speed: f32,
    /// Speed multiplier applied on every paddle hit
    pub paddle_acceleration: f32,
    /// Speed multiplier applied on every wall bounce
    pub wall_acceleration: f32,
    pub max_bounce_angle_deg: f32,

    // === Match ===
    pub target_score: u8,

    // === Computer ===
    pub ai: AiKind,
    /// Dead zone for the simple AI
    pub computer_aiming_tolerance: f32,
    pub shot_weights: ShotWeights,
    /// RNG seed for shot selection (fixed default when absent)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frame_rate: FRAME_RATE,
            score_delay_ms: SCORE_DELAY_MS,
            resume_delay_ms: RESUME_DELAY_MS,

            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,

            paddle_speed: PADDLE_SPEED,
            initial_ball_speed: INITIAL_BALL_SPEED,
            max_ball_speed: MAX_BALL_SPEED,
            paddle_acceleration: BALL_ACCELERATION_FACTOR,
            wall_acceleration: WALL_ACCELERATION_FACTOR,
            max_bounce_angle_deg: MAX_BOUNCE_ANGLE_DEG,

            target_score: TARGET_SCORE,

            ai: AiKind::Predictive,
            computer_aiming_tolerance: COMPUTER_AIMING_TOLERANCE,
            shot_weights: ShotWeights::default(),
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &std::path::Path) -> Self {
        match Self::read_file(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    fn read_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        Ok(Self::from_json(&json)?)
    }

    /// Clamp out-of-range values so the simulation can rely on them
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if self.frame_rate == 0 || self.frame_rate > 1000 {
            log::warn!("frame_rate {} out of range, using {}", self.frame_rate, FRAME_RATE);
            self.frame_rate = FRAME_RATE;
        }
        if !(self.arena_width > 0.0 && self.arena_height > 0.0) {
            log::warn!(
                "arena {}x{} invalid, using {}x{}",
                self.arena_width,
                self.arena_height,
                ARENA_WIDTH,
                ARENA_HEIGHT
            );
            self.arena_width = ARENA_WIDTH;
            self.arena_height = ARENA_HEIGHT;
        }
        if !(self.paddle_speed > 0.0) {
            log::warn!("paddle_speed {} invalid", self.paddle_speed);
            self.paddle_speed = defaults.paddle_speed;
        }
        if !(self.initial_ball_speed > 0.0) {
            log::warn!("initial_ball_speed {} invalid", self.initial_ball_speed);
            self.initial_ball_speed = defaults.initial_ball_speed;
        }
        if !(self.max_ball_speed >= self.initial_ball_speed) {
            log::warn!(
                "max_ball_speed {} below initial speed, raising",
                self.max_ball_speed
            );
            self.max_ball_speed = self.initial_ball_speed;
        }
        if !(self.paddle_acceleration >= 1.0) {
            log::warn!("paddle_acceleration {} below 1", self.paddle_acceleration);
            self.paddle_acceleration = 1.0;
        }
        if !(self.wall_acceleration >= 1.0) {
            log::warn!("wall_acceleration {} below 1", self.wall_acceleration);
            self.wall_acceleration = 1.0;
        }
        if !(self.max_bounce_angle_deg > 0.0 && self.max_bounce_angle_deg <= 85.0) {
            log::warn!(
                "max_bounce_angle_deg {} out of range",
                self.max_bounce_angle_deg
            );
            self.max_bounce_angle_deg = MAX_BOUNCE_ANGLE_DEG;
        }
        if self.target_score == 0 {
            log::warn!("target_score 0, using {}", TARGET_SCORE);
            self.target_score = TARGET_SCORE;
        }
        if !(self.computer_aiming_tolerance >= 0.0) {
            self.computer_aiming_tolerance = COMPUTER_AIMING_TOLERANCE;
        }
        if self.shot_weights.total() == 0 {
            log::warn!("all shot weights are zero, using defaults");
            self.shot_weights = ShotWeights::default();
        }

        self
    }

    /// Milliseconds between simulation ticks
    pub fn frame_interval_ms(&self) -> u64 {
        1000 / self.frame_rate.max(1) as u64
    }

    /// Distance a paddle travels in one tick
    pub fn paddle_step(&self) -> f32 {
        self.arena_height / 512.0 * self.paddle_speed
    }

    pub fn max_bounce_angle_rad(&self) -> f32 {
        self.max_bounce_angle_deg.to_radians()
    }
}
