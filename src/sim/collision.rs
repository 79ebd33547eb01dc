//! Collision detection and response for the ball
//!
//! The ball moves a small distance per tick compared to its size, so walls
//! use a single-step correction instead of a time-of-impact solve. Paddles
//! get an extra margin equal to the ball's horizontal speed so fast balls
//! can't slip through between ticks.

use glam::Vec2;

use super::state::{Arena, Ball, Side};

/// Which wall the ball bounced off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Top,
    Bottom,
}

/// Reflect the ball off the top/bottom wall if its leading edge crossed it
pub fn wall_collision(ball: &mut Ball, arena: &Arena) -> Option<Wall> {
    let wall = if ball.vel.y > 0.0 && ball.pos.y + arena.ball_size > arena.height {
        Wall::Top
    } else if ball.vel.y < 0.0 && ball.pos.y < 0.0 {
        Wall::Bottom
    } else {
        return None;
    };

    ball.vel.y = -ball.vel.y;
    ball.pos.y += ball.vel.y;
    Some(wall)
}

/// True if the ball is striking the paddle on `side` whose bottom is at `paddle_y`
pub fn paddle_contact(ball: &Ball, paddle_y: f32, side: Side, arena: &Arena) -> bool {
    if !ball.approaching(side) {
        return false;
    }

    let margin = ball.vel.x.abs();
    let (min_x, max_x) = arena.paddle_x_range(side);
    let in_band = match side {
        Side::Left => {
            let leading = ball.pos.x;
            leading <= max_x && leading >= min_x - margin
        }
        Side::Right => {
            let leading = ball.pos.x + arena.ball_size;
            leading >= min_x && leading <= max_x + margin
        }
    };

    in_band
        && ball.pos.y + arena.ball_size >= paddle_y
        && ball.pos.y <= paddle_y + arena.paddle_height
}

/// Where the ball met the paddle: -1 at the bottom edge, 0 at the center, 1 at the top
pub fn relative_hit(ball_center_y: f32, paddle_center_y: f32, half_height: f32) -> f32 {
    if half_height <= 0.0 {
        return 0.0;
    }
    ((ball_center_y - paddle_center_y) / half_height).clamp(-1.0, 1.0)
}

/// Outgoing velocity for a hit at `rel_y` on the paddle on `side`
pub fn bounce_velocity(rel_y: f32, speed: f32, side: Side, max_angle: f32) -> Vec2 {
    let angle = rel_y.clamp(-1.0, 1.0) * max_angle;
    Vec2::new(side.outward() * speed * angle.cos(), speed * angle.sin())
}

/// Send the ball back off the paddle on `side`. Returns the bounce angle.
pub fn bounce_off_paddle(
    ball: &mut Ball,
    paddle_y: f32,
    side: Side,
    arena: &Arena,
    max_angle: f32,
) -> f32 {
    // Undo this tick's horizontal travel
    ball.pos.x -= ball.vel.x;

    let half = arena.paddle_height / 2.0;
    let rel_y = relative_hit(ball.center(arena).y, paddle_y + half, half);

    ball.vel = bounce_velocity(rel_y, ball.speed, side, max_angle);
    ball.pos.y += ball.vel.y;

    rel_y * max_angle
}

/// Side whose goal line the ball's leading edge has crossed
pub fn exit_side(ball: &Ball, arena: &Arena) -> Option<Side> {
    if ball.vel.x < 0.0 && ball.pos.x < 0.0 {
        Some(Side::Left)
    } else if ball.vel.x > 0.0 && ball.pos.x + arena.ball_size > arena.width {
        Some(Side::Right)
    } else {
        None
    }
}
