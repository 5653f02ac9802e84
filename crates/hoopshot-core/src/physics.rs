use crate::constants::{
    AIR_DENSITY, BACKBOARD_THICKNESS, BACKBOARD_TOP, BACKBOARD_X, BALL_MASS, BALL_RADIUS,
    COARSE_TIMESTEP, DRAG_COEFFICIENT, FINE_TIMESTEP, GRAVITY, NET_DEPTH, RIM_CENTRE_X,
    RIM_HEIGHT, RIM_RADIUS, SLOW_MOTION_MARGIN,
};
use crate::state::BallState;

/// Pick the timestep for the next tick.
///
/// Near the rim and backboard the geometry is thin enough for a coarse step
/// to tunnel through it, so the ball slows down there until it has gone
/// through the hoop.
pub fn select_timestep(ball: &BallState) -> f64 {
    if ball.flags.ball_in_hoop() {
        return COARSE_TIMESTEP;
    }
    let x = ball.position.x;
    let y = ball.position.y;

    let in_band = y >= RIM_HEIGHT - NET_DEPTH - BALL_RADIUS && y <= BACKBOARD_TOP + BALL_RADIUS;
    let reach = BALL_RADIUS + SLOW_MOTION_MARGIN;
    let zone_left = RIM_CENTRE_X - RIM_RADIUS;
    let zone_right = BACKBOARD_X + BACKBOARD_THICKNESS;
    let in_zone = x + reach >= zone_left && x - reach <= zone_right;

    if in_band && in_zone {
        FINE_TIMESTEP
    } else {
        COARSE_TIMESTEP
    }
}

/// Drag deceleration magnitude at `speed`: 0.25·Cd·ρ·A·v² over mass.
pub fn drag_deceleration(speed: f64) -> f64 {
    let area = std::f64::consts::PI * BALL_RADIUS * BALL_RADIUS;
    let drag_force = 0.25 * DRAG_COEFFICIENT * AIR_DENSITY * area * speed * speed;
    drag_force / BALL_MASS
}

/// Advance position and velocity by `dt` before collisions are resolved.
///
/// Semi-implicit Euler: move with the current velocity, then apply gravity.
/// Drag is taken off both axes as the same scalar rather than along the
/// velocity direction. Trajectories and calibrated forces depend on this
/// exact form.
pub fn integrate(ball: &mut BallState, dt: f64) {
    ball.position.x += ball.velocity.x * dt;
    ball.position.y += ball.velocity.y * dt;

    ball.velocity.y -= GRAVITY * dt;

    let decel = drag_deceleration(ball.velocity.length());
    ball.velocity.x -= decel * dt;
    ball.velocity.y -= decel * dt;

    if ball.position.y >= RIM_HEIGHT {
        ball.flags.went_above_hoop = true;
    }
}
