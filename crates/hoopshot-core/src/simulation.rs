use crate::calibration::{CalibrationConfig, ForceCalibrator, TraceEvent};
use crate::error::{ThrowError, validate_angle, validate_force};
use crate::scoring::calculate_score;
use crate::state::{BallState, RunOutcome, Vec2};

/// Release point used until the caller sets one (metres).
pub const DEFAULT_RELEASE: Vec2 = Vec2::new(2.0, 2.25);

/// A single-ball shooting session.
///
/// Lifecycle: `Idle -> throw -> InFlight -> move_ball* -> Stopped`. A new
/// throw or release point resets the ball and its flags.
#[derive(Debug, Clone)]
pub struct Simulation {
    release: Vec2,
    ball: BallState,
    fun_mode: bool,
    calibrator: ForceCalibrator,
    trace: Vec<TraceEvent>,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    /// Calibrator settings come from [`CalibrationConfig::load`].
    pub fn new() -> Self {
        Self::with_calibrator(ForceCalibrator::new(CalibrationConfig::load()))
    }

    pub fn with_calibrator(calibrator: ForceCalibrator) -> Self {
        Self {
            release: DEFAULT_RELEASE,
            ball: BallState::at_rest(DEFAULT_RELEASE),
            fun_mode: false,
            calibrator,
            trace: Vec::new(),
        }
    }

    /// Move the release point. The ball is parked there, stopped, with
    /// cleared flags.
    pub fn set_release_point(&mut self, x: f64, y: f64) {
        self.release = Vec2::new(x, y);
        self.ball = BallState::at_rest(self.release);
    }

    pub fn calibrator(&self) -> &ForceCalibrator {
        &self.calibrator
    }

    pub fn release_point(&self) -> Vec2 {
        self.release
    }

    /// Launch from the release point.
    ///
    /// With `guess_the_force` set the calibrator runs first and its force is
    /// returned, but the ball still flies with the caller's `force`; throw
    /// again with the returned value to see the calibrated shot. Returns 0.0
    /// when not guessing or when no force lands the shot.
    pub fn throw(&mut self, force: f64, angle: f64, guess_the_force: bool) -> Result<f64, ThrowError> {
        validate_force(force)?;
        validate_angle(angle)?;

        let mut guessed = 0.0;
        if guess_the_force {
            let calibration = self.calibrator.calibrate(angle, self.release)?;
            guessed = calibration.force;
            self.trace = calibration.trace;
        }

        self.ball = BallState::launched(self.release, force, angle);
        tracing::debug!(force, angle, release_x = self.release.x, release_y = self.release.y, "Throw");
        Ok(guessed)
    }

    /// Advance the ball one tick. No-op once stopped.
    pub fn move_ball(&mut self) {
        self.ball.tick();
    }

    /// Tick until the ball stops, goes non-finite, or `max_steps` ticks pass.
    pub fn run_to_rest(&mut self, max_steps: usize) -> RunOutcome {
        self.ball.run_to_rest(max_steps)
    }

    pub fn location(&self) -> Vec2 {
        self.ball.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.ball.velocity
    }

    pub fn is_stopped(&self) -> bool {
        self.ball.stopped
    }

    pub fn score(&self) -> f64 {
        calculate_score(&self.ball, self.fun_mode)
    }

    pub fn is_in_hoop(&self) -> bool {
        self.ball.is_in_hoop()
    }

    /// Events of the most recent calibration.
    pub fn diagnostic_trace(&self) -> &[TraceEvent] {
        &self.trace
    }

    pub fn fun_mode(&self) -> bool {
        self.fun_mode
    }

    pub fn set_fun_mode(&mut self, fun_mode: bool) {
        self.fun_mode = fun_mode;
    }

    pub fn ball(&self) -> &BallState {
        &self.ball
    }
}
