//! Court, rim, backboard and ball constants.
//!
//! All values are SI (metres, seconds, kilograms, newtons). Downstream
//! normalisation depends on these exact magnitudes, so treat them as part of
//! the public contract.

/// Gravitational acceleration (m/s², magnitude).
pub const GRAVITY: f64 = 9.81;
/// Drag coefficient of a sphere.
pub const DRAG_COEFFICIENT: f64 = 0.47;
/// Air density at sea level (kg/m³).
pub const AIR_DENSITY: f64 = 1.225;

/// Ball radius (m).
pub const BALL_RADIUS: f64 = 0.121;
/// Ball mass (kg).
pub const BALL_MASS: f64 = 0.623;
/// Fraction of normal velocity kept after any bounce.
pub const RESTITUTION: f64 = 0.6;
/// Coulomb friction coefficient between a rolling ball and the floor.
pub const FLOOR_FRICTION: f64 = 0.1;

/// Rim radius (m).
pub const RIM_RADIUS: f64 = 0.2286;
/// Height of the rim above the floor (m).
pub const RIM_HEIGHT: f64 = 3.05;

/// Length of the court along x (m).
pub const COURT_LENGTH: f64 = 28.0;
/// Ceiling of the playable space (m). Probes that rise above it overshoot.
pub const COURT_HEIGHT: f64 = 10.0;
/// Extra visible width beyond the court length on the right (m).
pub const COURT_MARGIN: f64 = 1.0;
/// Right edge of the visible court (m).
pub const COURT_RIGHT_EDGE: f64 = COURT_LENGTH + COURT_MARGIN;
/// Left wall; the ball centre never goes left of this.
pub const LEFT_WALL_X: f64 = 0.1;
/// Extra damping on top of restitution for court-edge bounces.
pub const WALL_DAMPING: f64 = 0.8;

/// x of the backboard's front face (m).
pub const BACKBOARD_X: f64 = 26.8;
/// Backboard slab thickness (m).
pub const BACKBOARD_THICKNESS: f64 = 0.05;
/// Backboard height above the rim (m).
pub const BACKBOARD_HEIGHT: f64 = 1.05;
/// y of the backboard's top edge (m).
pub const BACKBOARD_TOP: f64 = RIM_HEIGHT + BACKBOARD_HEIGHT;
/// Gap between the backboard face and the back of the rim (m).
pub const RIM_BACKBOARD_GAP: f64 = 0.15;
/// x of the rim centre (m).
pub const RIM_CENTRE_X: f64 = BACKBOARD_X - RIM_BACKBOARD_GAP - RIM_RADIUS;

/// Depth of the net below the rim (m).
pub const NET_DEPTH: f64 = 0.4;
/// Inward margin that narrows the rim band used for early rejection (m).
pub const RIM_INNER_MARGIN: f64 = 0.02;
/// Horizontal slack around the rim/backboard zone for fine timesteps (m).
pub const SLOW_MOTION_MARGIN: f64 = 0.1;

/// Timestep away from thin geometry (s).
pub const COARSE_TIMESTEP: f64 = 0.01;
/// Timestep near the rim and backboard (s).
pub const FINE_TIMESTEP: f64 = 0.001;

/// Upper bound of the launch force domain (N). The lower bound is exclusive zero.
pub const FORCE_MAX: f64 = 300.0;
/// Smallest accepted launch angle (degrees).
pub const ANGLE_MIN: f64 = 15.0;
/// Largest accepted launch angle (degrees).
pub const ANGLE_MAX: f64 = 89.0;
/// Force scale shared with the network that consumes training rows (N).
/// Calibration never searches above twice this value.
pub const FORCE_NORMALISER: f64 = 70.0;
/// Contact time over which the launch force acts (s).
pub const LAUNCH_IMPULSE_SECONDS: f64 = 0.05;

/// Speed imparted by a launch force: impulse over ball mass.
pub fn launch_speed(force: f64) -> f64 {
    force * LAUNCH_IMPULSE_SECONDS / BALL_MASS
}
