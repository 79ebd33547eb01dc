//! Fixed timestep simulation tick
//!
//! Core game loop step. Order matters: paddles move first, then the ball is
//! integrated, then collisions and scoring are resolved against the new
//! positions.

use rand::Rng;

use super::collision::{bounce_off_paddle, exit_side, paddle_contact, wall_collision};
use super::control::{Controller, roll_shot};
use super::input::InputState;
use super::state::{GameState, Side};
use crate::settings::Settings;

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    WallBounce,
    PaddleHit(Side),
    /// A side scored a point
    Point(Side),
    /// A side reached the target score; scores are already reset
    MatchWon(Side),
}

/// Advance the game state by one tick
pub fn tick<R: Rng + ?Sized>(
    state: &mut GameState,
    controllers: &[Controller; 2],
    input: &InputState,
    settings: &Settings,
    rng: &mut R,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.time_ticks += 1;

    // Paddles
    let step = settings.paddle_step();
    for side in Side::BOTH {
        let directive = controllers[side.index()].directive(side, state, input, settings);
        let arena = state.arena;
        state.paddle_mut(side).shift(directive.dy(step), &arena);
    }

    // Ball
    state.ball.pos += state.ball.vel;

    if !state.ball.in_play {
        return events;
    }

    let arena = state.arena;

    if wall_collision(&mut state.ball, &arena).is_some() {
        state
            .ball
            .accelerate(settings.wall_acceleration, settings.max_ball_speed);
        events.push(GameEvent::WallBounce);
    }

    for side in Side::BOTH {
        let paddle_y = state.paddle(side).y;
        if !paddle_contact(&state.ball, paddle_y, side, &arena) {
            continue;
        }

        bounce_off_paddle(
            &mut state.ball,
            paddle_y,
            side,
            &arena,
            settings.max_bounce_angle_rad(),
        );

        if controllers[side.index()].is_computer() {
            let shot = roll_shot(rng, &settings.shot_weights);
            state.shots[side.index()] = shot;
            log::debug!("{:?} computer next shot: {:?}", side, shot);
        }

        state
            .ball
            .accelerate(settings.paddle_acceleration, settings.max_ball_speed);
        events.push(GameEvent::PaddleHit(side));
        break;
    }

    // Scoring
    if let Some(exited) = exit_side(&state.ball, &arena) {
        let scorer = exited.opposite();
        let points = state.scores.award(scorer);
        state.ball.hide(&arena);
        log::info!(
            "{:?} scores ({} - {})",
            scorer,
            state.scores.left,
            state.scores.right
        );
        events.push(GameEvent::Point(scorer));

        if points >= settings.target_score {
            log::info!("{:?} wins the match", scorer);
            state.scores.reset();
            state.recenter_paddles();
            state.last_winner = Some(scorer);
            events.push(GameEvent::MatchWon(scorer));
        }
    }

    events
}
