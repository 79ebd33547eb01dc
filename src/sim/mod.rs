//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Time advances only through the game's timer queue
//! - No rendering or platform dependencies

pub mod collision;
pub mod control;
pub mod game;
pub mod input;
pub mod state;
pub mod tick;
pub mod timer;

pub use collision::{bounce_velocity, exit_side, paddle_contact, relative_hit, wall_collision};
pub use control::{
    Controller, Directive, predict_intersect_y, roll_shot, shot_for_draw, target_aiming_shift,
};
pub use game::{Game, Snapshot};
pub use input::{ESCAPE, InputState, KeySet, SpecialKey};
pub use state::{Arena, Ball, ComputerShot, GameMode, GameState, GameType, Paddle, Scores, Side};
pub use tick::{GameEvent, tick};
pub use timer::{Timer, TimerKind, TimerQueue};
