//! Collision response against the floor, backboard, rim/net and court edges.
//!
//! Every resolver works on the already-integrated [`BallState`] and may
//! update its flags. They run in a fixed order each tick (see
//! [`resolve_all`]); the rim resolver relies on the backboard having already
//! pushed the ball back out.

use crate::constants::{
    BACKBOARD_THICKNESS, BACKBOARD_TOP, BACKBOARD_X, BALL_RADIUS, COURT_RIGHT_EDGE,
    FLOOR_FRICTION, GRAVITY, LEFT_WALL_X, NET_DEPTH, RESTITUTION, RIM_CENTRE_X, RIM_HEIGHT,
    RIM_INNER_MARGIN, RIM_RADIUS, WALL_DAMPING,
};
use crate::state::{BallState, RIM_CENTRE, Vec2};

/// Stiffness of the pull toward the rim centre while the ball drops through the net (1/s²).
const NET_CENTRING_STIFFNESS: f64 = 400.0;
/// Vertical velocity kept per tick while the net centres the ball.
const NET_VERTICAL_DECAY: f64 = 0.995;

/// Run all resolvers in order: floor, backboard, rim/net, court edges.
pub fn resolve_all(ball: &mut BallState, dt: f64) {
    resolve_floor(ball, dt);
    resolve_backboard(ball, dt);
    resolve_rim(ball, dt);
    resolve_walls(ball);
}

/// Bounce or roll on the floor.
///
/// A fall faster than one tick of gravity (scaled by restitution) bounces;
/// anything slower is treated as rolling, which applies Coulomb friction
/// and eventually stops the ball.
pub fn resolve_floor(ball: &mut BallState, dt: f64) {
    if ball.bottom() > 0.0 {
        return;
    }

    // Contact at or past the rim is a rebound, not a missed shot.
    if !ball.flags.bounced_on_floor
        && !ball.flags.ball_in_hoop()
        && ball.position.x < RIM_CENTRE_X
    {
        ball.flags.bounced_on_floor = true;
    }

    let threshold = GRAVITY * dt / RESTITUTION;
    if ball.velocity.y < -threshold {
        ball.velocity.y = -ball.velocity.y * RESTITUTION;
        ball.position.y = BALL_RADIUS;
    } else if ball.velocity.y.abs() <= threshold {
        ball.position.y = BALL_RADIUS;
        ball.velocity.y = 0.0;

        let friction = FLOOR_FRICTION * GRAVITY * dt;
        if ball.velocity.x.abs() <= friction {
            ball.velocity.x = 0.0;
            ball.stopped = true;
        } else {
            ball.velocity.x -= friction * ball.velocity.x.signum();
        }
    }
}

/// Reflect off the backboard slab.
///
/// Uses the position one step ahead so a fast ball cannot cross the thin
/// slab between two ticks.
pub fn resolve_backboard(ball: &mut BallState, dt: f64) {
    let x = ball.position.x;
    let y = ball.position.y;
    let vx = ball.velocity.x;

    if !ball.flags.went_above_backboard && y + BALL_RADIUS + ball.velocity.y * dt > BACKBOARD_TOP
    {
        ball.flags.went_above_backboard = true;
    }

    if !(RIM_HEIGHT..=BACKBOARD_TOP).contains(&y) {
        return;
    }

    let next_x = x + vx * dt;
    let back_face = BACKBOARD_X + BACKBOARD_THICKNESS;

    if vx > 0.0 && x < BACKBOARD_X && next_x + BALL_RADIUS >= BACKBOARD_X {
        ball.velocity.x = -vx * RESTITUTION;
        ball.position.x = x.min(BACKBOARD_X - BALL_RADIUS);
        ball.flags.hit_backboard = true;
    } else if vx < 0.0 && x > back_face && next_x - BALL_RADIUS <= back_face {
        ball.velocity.x = -vx * RESTITUTION;
        ball.position.x = x.max(back_face + BALL_RADIUS);
    }
}

/// Rim and net interaction, including the made-shot bookkeeping.
pub fn resolve_rim(ball: &mut BallState, dt: f64) {
    let pos = ball.position;
    let dx = pos.x - RIM_CENTRE_X;

    if dx.abs() > RIM_RADIUS - RIM_INNER_MARGIN + BALL_RADIUS {
        return;
    }

    ball.flags.record_distance_to_hoop(pos.distance(RIM_CENTRE));

    if dx.abs() < 2.0 * BALL_RADIUS {
        let flags = &mut ball.flags;
        if pos.y > RIM_HEIGHT {
            if !flags.entered_from_below {
                flags.on_target_above_hoop = true;
            }
        } else if pos.y < RIM_HEIGHT {
            let descended = flags.on_target_above_hoop && pos.y < RIM_HEIGHT - BALL_RADIUS;
            if flags.on_target_below_hoop || descended {
                flags.on_target_below_hoop = true;
            } else if pos.y > RIM_HEIGHT - NET_DEPTH {
                // Caught by the net.
                if !flags.on_target_above_hoop {
                    flags.entered_from_below = true;
                }
                ball.velocity.x = ball.velocity.x.min(0.0);
                return;
            }
        }
    }

    let front_edge = Vec2::new(RIM_CENTRE_X - RIM_RADIUS, RIM_HEIGHT);
    if (pos.y - RIM_HEIGHT).abs() < RIM_RADIUS && pos.distance(front_edge) < BALL_RADIUS {
        bounce_off_rim(ball, dt);
        return;
    }

    if ball.bottom() > RIM_HEIGHT {
        return;
    }

    // Below the rim and outside the net only the back of the ring can be hit.
    let in_net_gate = dx.abs() < RIM_RADIUS && pos.y > RIM_HEIGHT - NET_DEPTH;
    if pos.y < RIM_HEIGHT && !in_net_gate {
        let back_edge = Vec2::new(RIM_CENTRE_X + RIM_RADIUS, RIM_HEIGHT);
        if pos.distance(back_edge) < BALL_RADIUS {
            bounce_off_rim(ball, dt);
        }
        return;
    }

    let inside_rim = pos.x - BALL_RADIUS >= RIM_CENTRE_X - RIM_RADIUS
        && pos.x + BALL_RADIUS <= RIM_CENTRE_X + RIM_RADIUS;
    if inside_rim {
        centre_in_net(ball, dt);
        return;
    }

    bounce_off_rim(ball, dt);
}

/// Reflect the velocity about the rim-centre normal, keeping `RESTITUTION`
/// of the normal component.
fn bounce_off_rim(ball: &mut BallState, dt: f64) {
    let nx = ball.position.x - RIM_CENTRE.x;
    let ny = ball.position.y - RIM_CENTRE.y;
    let len = (nx * nx + ny * ny).sqrt();
    if len > 1e-9 {
        let (nx, ny) = (nx / len, ny / len);
        let dot = ball.velocity.x * nx + ball.velocity.y * ny;
        if dot < 0.0 {
            ball.velocity.x -= (1.0 + RESTITUTION) * dot * nx;
            ball.velocity.y -= (1.0 + RESTITUTION) * dot * ny;
        }
    }

    ball.position.x += ball.velocity.x * dt;
    ball.position.y += ball.velocity.y * dt;
    ball.flags.hit_hoop = true;
}

/// Critically damped pull toward the rim centre line for a ball dropping
/// cleanly through.
fn centre_in_net(ball: &mut BallState, dt: f64) {
    let offset = ball.position.x - RIM_CENTRE_X;
    let damping = 2.0 * NET_CENTRING_STIFFNESS.sqrt();
    let accel = -NET_CENTRING_STIFFNESS * offset - damping * ball.velocity.x;
    ball.velocity.x += accel * dt;
    ball.velocity.y *= NET_VERTICAL_DECAY;
}

/// Keep the ball inside the visible court.
pub fn resolve_walls(ball: &mut BallState) {
    let bounce = RESTITUTION * WALL_DAMPING;
    if ball.position.x < LEFT_WALL_X && ball.velocity.x < 0.0 {
        ball.position.x = LEFT_WALL_X;
        ball.velocity.x = -ball.velocity.x * bounce;
    } else if ball.position.x + BALL_RADIUS > COURT_RIGHT_EDGE && ball.velocity.x > 0.0 {
        ball.position.x = COURT_RIGHT_EDGE - BALL_RADIUS;
        ball.velocity.x = -ball.velocity.x * bounce;
    }
}
