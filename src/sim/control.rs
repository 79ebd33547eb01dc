//! Paddle controllers
//!
//! Each tick every paddle asks its controller for a [`Directive`]. Human
//! controllers read the held keys; computer controllers read the ball.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::input::{InputState, KeySet};
use super::state::{Arena, ComputerShot, GameState, GameType, Side};
use crate::settings::{AiKind, Settings, ShotWeights};

/// Largest hit offset (fraction of half paddle height) the AI aims for.
/// Keeps the ball on the paddle despite the one-step dead zone.
pub const AIM_LIMIT: f32 = 0.85;

/// Wall bounces followed before prediction gives up
const MAX_PREDICTED_BOUNCES: usize = 64;

/// Velocity components below this are treated as zero
const MIN_VELOCITY: f32 = 1e-4;

/// Per-tick movement instruction for one paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Directive {
    Up,
    Down,
    #[default]
    Static,
}

impl Directive {
    /// Signed displacement for a paddle moving `step` per tick
    pub fn dy(self, step: f32) -> f32 {
        match self {
            Directive::Up => step,
            Directive::Down => -step,
            Directive::Static => 0.0,
        }
    }
}

/// Strategy driving one paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Controller {
    /// W / S keys
    HumanWasd,
    /// Arrow keys
    HumanArrows,
    /// Either key-set (single human)
    HumanEither,
    /// Follows the ball's current height
    SimpleAi,
    /// Predicts the intercept and aims the return
    PredictiveAi,
}

impl Controller {
    /// Controllers for (left, right) under a game type
    pub fn pair(game_type: GameType, ai: AiKind) -> [Controller; 2] {
        let computer = match ai {
            AiKind::Simple => Controller::SimpleAi,
            AiKind::Predictive => Controller::PredictiveAi,
        };
        match game_type {
            GameType::OnePlayer => [Controller::HumanEither, computer],
            GameType::TwoPlayer => [Controller::HumanWasd, Controller::HumanArrows],
            GameType::ZeroPlayer => [computer, computer],
        }
    }

    pub fn is_computer(&self) -> bool {
        matches!(self, Controller::SimpleAi | Controller::PredictiveAi)
    }

    /// Decide this tick's movement for the paddle on `side`
    pub fn directive(
        &self,
        side: Side,
        state: &GameState,
        input: &InputState,
        settings: &Settings,
    ) -> Directive {
        match self {
            Controller::HumanWasd => human(input, KeySet::Wasd),
            Controller::HumanArrows => human(input, KeySet::Arrows),
            Controller::HumanEither => human(input, KeySet::Either),
            Controller::SimpleAi => simple_ai(side, state, settings.computer_aiming_tolerance),
            Controller::PredictiveAi => predictive_ai(side, state, settings),
        }
    }
}

fn human(input: &InputState, keys: KeySet) -> Directive {
    match input.held(keys) {
        (true, false) => Directive::Up,
        (false, true) => Directive::Down,
        _ => Directive::Static,
    }
}

/// Move toward `target` once it leaves the dead zone around `current`
fn steer(current: f32, target: f32, tolerance: f32) -> Directive {
    let diff = target - current;
    if diff > tolerance {
        Directive::Up
    } else if diff < -tolerance {
        Directive::Down
    } else {
        Directive::Static
    }
}

fn simple_ai(side: Side, state: &GameState, tolerance: f32) -> Directive {
    let arena = &state.arena;
    let ball = &state.ball;
    let target = if ball.in_play && ball.approaching(side) {
        ball.center(arena).y
    } else {
        arena.center_y()
    };
    steer(state.paddle(side).center_y(arena), target, tolerance)
}

fn predictive_ai(side: Side, state: &GameState, settings: &Settings) -> Directive {
    let arena = &state.arena;
    let ball = &state.ball;
    let half = arena.paddle_height / 2.0;

    let intercept = if ball.in_play && ball.approaching(side) {
        predict_intersect_y(ball.center(arena), ball.vel, arena.contact_x(side), arena)
    } else {
        None
    };

    let target = match intercept {
        Some(y) => {
            y + target_aiming_shift(
                state.shot(side),
                y,
                side,
                state,
                settings.max_bounce_angle_rad(),
            )
        }
        None => arena.center_y(),
    };
    let target = target.clamp(half, arena.height - half);

    steer(
        state.paddle(side).center_y(arena),
        target,
        settings.paddle_step(),
    )
}

/// Predict the ball-center y when the ball next reaches `plane_x`,
/// following reflections off the top and bottom walls.
///
/// Returns `None` if the ball is moving away from the plane, has no
/// horizontal velocity, or bounces more than the prediction follows.
pub fn predict_intersect_y(pos: Vec2, vel: Vec2, plane_x: f32, arena: &Arena) -> Option<f32> {
    if vel.x.abs() < MIN_VELOCITY {
        return None;
    }

    let lo = arena.ball_size / 2.0;
    let hi = arena.height - arena.ball_size / 2.0;
    let (mut pos, mut vel) = (pos, vel);

    for _ in 0..=MAX_PREDICTED_BOUNCES {
        let t_plane = (plane_x - pos.x) / vel.x;
        if t_plane < 0.0 {
            return None;
        }

        let t_wall = if vel.y > MIN_VELOCITY {
            (hi - pos.y) / vel.y
        } else if vel.y < -MIN_VELOCITY {
            (lo - pos.y) / vel.y
        } else {
            f32::INFINITY
        };

        if t_plane <= t_wall {
            return Some((pos.y + vel.y * t_plane).clamp(lo, hi));
        }

        // Bounce: move to the wall and reflect
        pos += vel * t_wall.max(0.0);
        pos.y = pos.y.clamp(lo, hi);
        vel.y = -vel.y;
    }

    None
}

/// Offset from the predicted intercept to where this paddle's center
/// should be so the return follows `shot`.
///
/// The desired ball height at the far paddle is turned into a bounce angle,
/// then into a hit offset on this paddle, limited to [`AIM_LIMIT`] so the
/// angle never exceeds `max_angle`.
pub fn target_aiming_shift(
    shot: ComputerShot,
    intercept_y: f32,
    side: Side,
    state: &GameState,
    max_angle: f32,
) -> f32 {
    let arena = &state.arena;
    let half = arena.paddle_height / 2.0;

    let rel_y = match far_side_target(shot, side, state) {
        Some(far_y) => {
            let run = (arena.contact_x(side.opposite()) - arena.contact_x(side)).abs();
            if run < MIN_VELOCITY || max_angle <= 0.0 {
                0.0
            } else {
                let angle = ((far_y - intercept_y) / run).atan();
                (angle / max_angle).clamp(-AIM_LIMIT, AIM_LIMIT)
            }
        }
        None => match shot {
            ComputerShot::ErraticUp => AIM_LIMIT,
            ComputerShot::ErraticDown => -AIM_LIMIT,
            _ => 0.0,
        },
    };

    // Ball center sits rel_y half-heights above the paddle center at contact
    -rel_y * half
}

/// Ball-center height the shot aims for at the opponent's paddle
fn far_side_target(shot: ComputerShot, side: Side, state: &GameState) -> Option<f32> {
    let arena = &state.arena;
    let lo = arena.ball_size / 2.0;
    let hi = arena.height - arena.ball_size / 2.0;
    let opponent = state.paddle(side.opposite()).center_y(arena);

    match shot {
        ComputerShot::Top => Some(hi),
        ComputerShot::Bottom => Some(lo),
        ComputerShot::Aggressive => Some(if opponent > arena.center_y() { lo } else { hi }),
        ComputerShot::Easy => Some(opponent),
        ComputerShot::Flat | ComputerShot::ErraticUp | ComputerShot::ErraticDown => None,
    }
}

/// Map a uniform draw in `[0, total)` onto the weighted shot table
pub fn shot_for_draw(draw: u64, weights: &ShotWeights) -> ComputerShot {
    let table = [
        (ComputerShot::Flat, weights.flat),
        (ComputerShot::Top, weights.top),
        (ComputerShot::Bottom, weights.bottom),
        (ComputerShot::Aggressive, weights.aggressive),
        (ComputerShot::Easy, weights.easy),
        (ComputerShot::ErraticUp, weights.erratic_up),
        (ComputerShot::ErraticDown, weights.erratic_down),
    ];

    let mut remaining = draw;
    for (shot, weight) in table {
        let weight = weight as u64;
        if remaining < weight {
            return shot;
        }
        remaining -= weight;
    }
    ComputerShot::Flat
}

/// Draw a new shot from the weighted distribution
pub fn roll_shot<R: Rng + ?Sized>(rng: &mut R, weights: &ShotWeights) -> ComputerShot {
    let total = weights.total();
    if total == 0 {
        return ComputerShot::Flat;
    }
    shot_for_draw(rng.random_range(0..total), weights)
}
