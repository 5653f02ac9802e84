//! Basketball shot engine: flight under gravity and drag, collisions with
//! floor, backboard and rim, shot scoring, and the inverse solver that finds
//! the launch force for a given angle and release point.

pub mod calibration;
pub mod collision;
pub mod constants;
pub mod error;
pub mod physics;
pub mod scoring;
pub mod simulation;
pub mod state;
pub mod training;

pub use calibration::{Calibration, CalibrationConfig, ForceCalibrator, ProbeOutcome, TraceEvent};
pub use error::ThrowError;
pub use scoring::calculate_score;
pub use simulation::Simulation;
pub use state::{BallState, CollisionFlags, RunOutcome, Vec2};
pub use training::TrainingRow;
