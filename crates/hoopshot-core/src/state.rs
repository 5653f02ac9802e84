use serde::{Deserialize, Serialize};

use crate::collision;
use crate::constants::{BALL_RADIUS, RIM_CENTRE_X, RIM_HEIGHT, launch_speed};
use crate::physics;

/// A planar point or velocity in court space (metres, x to the right, y up).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(&self, other: Vec2) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Default for Vec2 {
    fn default() -> Self {
        Self::ZERO
    }
}

/// The rim centre as a point.
pub const RIM_CENTRE: Vec2 = Vec2::new(RIM_CENTRE_X, RIM_HEIGHT);

/// One-shot flags gathered during a throw. Reset only when a new throw starts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CollisionFlags {
    pub bounced_on_floor: bool,
    pub hit_backboard: bool,
    pub hit_hoop: bool,
    pub went_above_hoop: bool,
    pub went_above_backboard: bool,
    pub on_target_above_hoop: bool,
    pub on_target_below_hoop: bool,
    /// Set when the ball reached the net from underneath before it was ever
    /// seen above the rim. Blocks `on_target_above_hoop` from then on.
    pub entered_from_below: bool,
    /// Running minimum of the ball-centre to rim-centre distance, `None` until
    /// the ball first enters the rim band.
    pub closest_distance_to_hoop: Option<f64>,
}

impl CollisionFlags {
    /// Passed the rim from above and then below it.
    pub fn ball_in_hoop(&self) -> bool {
        self.on_target_above_hoop && self.on_target_below_hoop
    }

    pub(crate) fn record_distance_to_hoop(&mut self, distance: f64) {
        self.closest_distance_to_hoop = Some(match self.closest_distance_to_hoop {
            Some(closest) => closest.min(distance),
            None => distance,
        });
    }
}

/// How a run-to-rest loop ended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RunOutcome {
    /// The ball stopped on its own.
    Rest,
    /// Position or velocity stopped being finite; the run is void.
    NonFinite,
    /// The step budget ran out before the ball stopped.
    StepLimit,
}

/// State of the ball for a single throw.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BallState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub stopped: bool,
    pub flags: CollisionFlags,
}

impl BallState {
    /// A stopped ball resting at `position` with clean flags.
    pub fn at_rest(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            stopped: true,
            flags: CollisionFlags::default(),
        }
    }

    /// A freshly released ball. `angle_deg` is measured from the floor.
    pub fn launched(release: Vec2, force: f64, angle_deg: f64) -> Self {
        let speed = launch_speed(force);
        let angle = angle_deg.to_radians();
        Self {
            position: release,
            velocity: Vec2::new(speed * angle.cos(), speed * angle.sin()),
            stopped: false,
            flags: CollisionFlags::default(),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }

    pub fn is_in_hoop(&self) -> bool {
        self.flags.ball_in_hoop()
    }

    /// Lowest point of the ball.
    pub fn bottom(&self) -> f64 {
        self.position.y - BALL_RADIUS
    }

    /// Advance by one tick: pick a timestep, integrate, then resolve
    /// floor, backboard, rim/net and court edges in that order.
    pub fn tick(&mut self) {
        if self.stopped {
            return;
        }
        let dt = physics::select_timestep(self);
        physics::integrate(self, dt);
        collision::resolve_all(self, dt);
    }

    /// Tick until the ball stops, goes non-finite, or `max_steps` ticks pass.
    pub fn run_to_rest(&mut self, max_steps: usize) -> RunOutcome {
        for _ in 0..max_steps {
            if self.stopped {
                return RunOutcome::Rest;
            }
            self.tick();
            if !self.is_finite() {
                return RunOutcome::NonFinite;
            }
        }
        if self.stopped {
            RunOutcome::Rest
        } else {
            RunOutcome::StepLimit
        }
    }
}
