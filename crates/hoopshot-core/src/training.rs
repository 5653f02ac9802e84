use serde::{Deserialize, Serialize};

use crate::constants::RIM_CENTRE_X;
use crate::scoring::MADE_SHOT_THRESHOLD;

/// Column names, in order.
pub const HEADER: [&str; 5] = ["force", "angle", "releaseX", "distanceFromRim", "score"];

/// One calibrated shot, as fed to the force-prediction model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrainingRow {
    pub force: f64,
    pub angle: f64,
    pub release_x: f64,
    pub distance_from_rim: f64,
    pub score: f64,
}

impl TrainingRow {
    pub fn new(force: f64, angle: f64, release_x: f64, score: f64) -> Self {
        Self {
            force,
            angle,
            release_x,
            distance_from_rim: RIM_CENTRE_X - release_x,
            score,
        }
    }

    /// Only made shots are kept.
    pub fn qualifies(&self) -> bool {
        self.score >= MADE_SHOT_THRESHOLD
    }

    /// Fields in `HEADER` order, force rounded to 5 decimals.
    pub fn to_record(&self) -> [String; 5] {
        [
            format!("{:.5}", self.force),
            self.angle.to_string(),
            self.release_x.to_string(),
            self.distance_from_rim.to_string(),
            self.score.to_string(),
        ]
    }
}
