//! Inverse solver: the launch force that lands a shot at a given angle.
//!
//! Two phases:
//!
//! 1. **Coarse**: bisect the force range with a cheap probe that only
//!    classifies each flight as short, long or on target.
//! 2. **Refine**: scan a narrow window around the coarse estimate in fixed
//!    increments, running every candidate to rest and scoring it.
//!
//! Each trial gets its own [`BallState`], so nothing is shared between
//! trials and the calibrator itself holds only configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{COURT_HEIGHT, FORCE_MAX, FORCE_NORMALISER};
use crate::error::{ThrowError, validate_angle};
use crate::scoring::calculate_score;
use crate::state::{BallState, RIM_CENTRE, RunOutcome, Vec2};

/// Environment variable naming a TOML file with a [`CalibrationConfig`].
pub const CONFIG_ENV: &str = "HOOPSHOT_CALIBRATION_CONFIG";
/// Config file used when the environment variable is not set.
pub const DEFAULT_CONFIG_PATH: &str = "config/calibration.toml";

/// Tunable parameters of the force search, loadable from TOML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Lowest force ever tried (N).
    pub search_floor: f64,
    /// Upper end of the coarse search (N).
    pub search_ceiling: f64,
    /// Coarse search stops once the bracket is narrower than this (N).
    pub coarse_tolerance: f64,
    /// Half-size of the square around the rim centre that counts as a probe hit (m).
    pub target_box: f64,
    /// Refinement scans this far either side of the coarse estimate (N).
    pub refine_window: f64,
    /// Refinement step (N).
    pub refine_increment: f64,
    /// A refined candidate scoring above this is returned at once.
    pub exact_match_score: f64,
    /// Best candidate must score above this to be returned at all.
    pub viable_score: f64,
    /// Tick budget for one coarse probe.
    pub max_probe_steps: usize,
    /// Tick budget for one full trial.
    pub max_trial_steps: usize,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            search_floor: 3.0,
            search_ceiling: 2.0 * FORCE_NORMALISER,
            coarse_tolerance: 0.0005,
            target_box: 0.05,
            refine_window: 2.0,
            refine_increment: 0.01,
            exact_match_score: 999_999.0,
            viable_score: 999_000.0,
            max_probe_steps: 20_000,
            max_trial_steps: 100_000,
        }
    }
}

impl CalibrationConfig {
    /// Load from the file named by `HOOPSHOT_CALIBRATION_CONFIG`, else
    /// `config/calibration.toml`, else defaults.
    pub fn load() -> Self {
        let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&path))
    }

    /// Load from a TOML file. Missing or unparseable files give defaults.
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<CalibrationConfig>(&content) {
                Ok(cfg) => cfg,
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {e}, using defaults", path.display());
                    CalibrationConfig::default()
                },
            },
            Err(_) => CalibrationConfig::default(),
        }
    }
}

/// Classification of one coarse probe.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Passed through the target box.
    Hit,
    /// Needs more force.
    Short,
    /// Needs less force.
    Long,
}

/// One step of a calibration, in order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    Probe { force: f64, outcome: ProbeOutcome },
    CoarseEstimate { force: f64, matched: bool },
    BestCandidate { force: f64, score: f64 },
    TrialAborted { force: f64 },
    ExactMatch { force: f64, score: f64 },
    Resolved { force: f64, score: f64 },
    NoViableForce { best_force: Option<f64>, best_score: Option<f64> },
}

/// Result of a calibration. `force` is 0 when no force lands the shot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Calibration {
    pub force: f64,
    pub trace: Vec<TraceEvent>,
}

impl Calibration {
    pub fn is_feasible(&self) -> bool {
        self.force > 0.0
    }
}

/// Finds the launch force for an angle and release point.
#[derive(Debug, Clone, Default)]
pub struct ForceCalibrator {
    config: CalibrationConfig,
}

impl ForceCalibrator {
    pub fn new(config: CalibrationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    /// Force that lands a shot from `release` at `angle` degrees, or 0.
    pub fn calibrate(&self, angle: f64, release: Vec2) -> Result<Calibration, ThrowError> {
        validate_angle(angle)?;

        let mut trace = Vec::new();
        let estimate = self.approximate_force(angle, release, &mut trace);
        let force = self.refine(estimate, angle, release, &mut trace);

        tracing::info!(angle, release_x = release.x, release_y = release.y, force, "Calibrated");
        Ok(Calibration { force, trace })
    }

    /// Coarse phase: bisect on probe outcomes. Returns the first force that
    /// hits the target box, or the middle of the final bracket.
    pub fn approximate_force(&self, angle: f64, release: Vec2, trace: &mut Vec<TraceEvent>) -> f64 {
        let mut low = self.config.search_floor;
        let mut high = self.config.search_ceiling;

        while high - low > self.config.coarse_tolerance {
            let mid = (low + high) / 2.0;
            let outcome = self.probe(mid, angle, release);
            tracing::debug!(force = mid, ?outcome, "Coarse probe");
            trace.push(TraceEvent::Probe { force: mid, outcome });
            match outcome {
                ProbeOutcome::Hit => {
                    trace.push(TraceEvent::CoarseEstimate {
                        force: mid,
                        matched: true,
                    });
                    return mid;
                },
                ProbeOutcome::Short => low = mid,
                ProbeOutcome::Long => high = mid,
            }
        }

        let estimate = (low + high) / 2.0;
        trace.push(TraceEvent::CoarseEstimate {
            force: estimate,
            matched: false,
        });
        estimate
    }

    /// Fly one throwaway ball and classify it against the rim centre.
    pub fn probe(&self, force: f64, angle: f64, release: Vec2) -> ProbeOutcome {
        let target = RIM_CENTRE;
        let half = self.config.target_box;
        let mut ball = BallState::launched(release, force, angle);

        for _ in 0..self.config.max_probe_steps {
            let prev_x = ball.position.x;
            ball.tick();
            if ball.stopped || !ball.is_finite() {
                return ProbeOutcome::Short;
            }

            let pos = ball.position;
            if (pos.x - target.x).abs() <= half && (pos.y - target.y).abs() <= half {
                return ProbeOutcome::Hit;
            }
            if pos.y > COURT_HEIGHT {
                return ProbeOutcome::Long;
            }
            if ball.flags.hit_hoop {
                return ProbeOutcome::Short;
            }
            if prev_x < target.x && pos.x >= target.x {
                return if pos.y < target.y {
                    ProbeOutcome::Short
                } else {
                    ProbeOutcome::Long
                };
            }
            if ball.velocity.y < 0.0 && pos.y < target.y - half {
                return if pos.x < target.x {
                    ProbeOutcome::Short
                } else {
                    ProbeOutcome::Long
                };
            }
        }

        ProbeOutcome::Short
    }

    /// Refinement bounds around a coarse estimate.
    pub fn refinement_window(&self, estimate: f64) -> (f64, f64) {
        let low = (estimate - self.config.refine_window).max(self.config.search_floor);
        let high = (estimate + self.config.refine_window).min(FORCE_MAX);
        (low, high)
    }

    /// Fine phase: linear scan of the refinement window.
    pub fn refine(
        &self,
        estimate: f64,
        angle: f64,
        release: Vec2,
        trace: &mut Vec<TraceEvent>,
    ) -> f64 {
        let (low, high) = self.refinement_window(estimate);
        let steps = ((high - low) / self.config.refine_increment).round().max(0.0) as usize;

        let mut best: Option<(f64, f64)> = None;
        for i in 0..=steps {
            let force = low + i as f64 * self.config.refine_increment;
            let Some(score) = self.trial_score(force, angle, release) else {
                tracing::warn!(force, angle, "Discarding non-finite trial");
                trace.push(TraceEvent::TrialAborted { force });
                continue;
            };

            if score > self.config.exact_match_score {
                trace.push(TraceEvent::ExactMatch { force, score });
                return force;
            }
            let improved = match best {
                Some((_, best_score)) => score > best_score,
                None => true,
            };
            if improved {
                best = Some((force, score));
                trace.push(TraceEvent::BestCandidate { force, score });
            }
        }

        match best {
            Some((force, score)) if score > self.config.viable_score => {
                trace.push(TraceEvent::Resolved { force, score });
                force
            },
            _ => {
                tracing::debug!(angle, ?best, "No viable force");
                trace.push(TraceEvent::NoViableForce {
                    best_force: best.map(|(f, _)| f),
                    best_score: best.map(|(_, s)| s),
                });
                0.0
            },
        }
    }

    /// Run one full throw to rest and score it strictly. `None` when the
    /// trial went non-finite.
    pub fn trial_score(&self, force: f64, angle: f64, release: Vec2) -> Option<f64> {
        let mut ball = BallState::launched(release, force, angle);
        match ball.run_to_rest(self.config.max_trial_steps) {
            RunOutcome::NonFinite => None,
            RunOutcome::StepLimit => {
                tracing::debug!(force, angle, "Trial hit step limit, scoring in flight");
                Some(calculate_score(&ball, false))
            },
            RunOutcome::Rest => Some(calculate_score(&ball, false)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::RIM_CENTRE_X;

    fn above_rim() -> Vec2 {
        Vec2::new(RIM_CENTRE_X, 5.0)
    }

    #[test]
    fn default_config_matches_search_contract() {
        let config = CalibrationConfig::default();
        assert_eq!(config.search_floor, 3.0);
        assert_eq!(config.search_ceiling, 140.0);
        assert_eq!(config.coarse_tolerance, 0.0005);
        assert_eq!(config.refine_window, 2.0);
        assert_eq!(config.refine_increment, 0.01);
        assert_eq!(config.exact_match_score, 999_999.0);
        assert_eq!(config.viable_score, 999_000.0);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calibration.toml");
        std::fs::write(&path, "refine_window = 1.5\nmax_trial_steps = 500\n").unwrap();

        let config = CalibrationConfig::load_from(&path);
        assert_eq!(config.refine_window, 1.5);
        assert_eq!(config.max_trial_steps, 500);
        assert_eq!(config.search_floor, 3.0);
    }

    #[test]
    fn bad_toml_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calibration.toml");
        std::fs::write(&path, "refine_window = \"wide\"").unwrap();
        assert_eq!(CalibrationConfig::load_from(&path), CalibrationConfig::default());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = CalibrationConfig::load_from(Path::new("/nonexistent/calibration.toml"));
        assert_eq!(config, CalibrationConfig::default());
    }

    #[test]
    fn refinement_window_is_clamped() {
        let calibrator = ForceCalibrator::default();
        assert_eq!(calibrator.refinement_window(50.0), (48.0, 52.0));
        assert_eq!(calibrator.refinement_window(3.5), (3.0, 5.5));
        assert_eq!(calibrator.refinement_window(299.0), (297.0, 300.0));
    }

    #[test]
    fn weak_probe_is_short() {
        let calibrator = ForceCalibrator::default();
        let outcome = calibrator.probe(5.0, 45.0, Vec2::new(20.0, 2.25));
        assert_eq!(outcome, ProbeOutcome::Short);
    }

    #[test]
    fn skyward_probe_is_long() {
        let calibrator = ForceCalibrator::default();
        let outcome = calibrator.probe(300.0, 89.0, Vec2::new(20.0, 2.25));
        assert_eq!(outcome, ProbeOutcome::Long);
    }

    #[test]
    fn drop_onto_rim_centre_is_hit() {
        let calibrator = ForceCalibrator::default();
        let outcome = calibrator.probe(3.0, 89.0, above_rim());
        assert_eq!(outcome, ProbeOutcome::Hit);
    }

    #[test]
    fn clean_drop_trial_scores_a_make() {
        let calibrator = ForceCalibrator::default();
        let score = calibrator.trial_score(3.0, 89.0, above_rim()).unwrap();
        assert_eq!(score, 1_000_000.0);
    }

    #[test]
    fn calibrate_rejects_bad_angle() {
        let calibrator = ForceCalibrator::default();
        let err = calibrator.calibrate(10.0, above_rim()).unwrap_err();
        assert_eq!(err, ThrowError::AngleOutOfRange(10.0));
    }

    #[test]
    fn coarse_phase_traces_every_probe() {
        let calibrator = ForceCalibrator::default();
        let mut trace = Vec::new();
        let estimate = calibrator.approximate_force(45.0, Vec2::new(2.0, 2.25), &mut trace);

        let probes = trace
            .iter()
            .filter(|e| matches!(e, TraceEvent::Probe { .. }))
            .count();
        assert!(probes > 0);
        assert!(matches!(trace.last(), Some(TraceEvent::CoarseEstimate { .. })));
        assert!(estimate >= 3.0 && estimate <= 140.0);
    }

    #[test]
    fn far_short_release_saturates_at_ceiling() {
        // 24 m from the rim at 45° cannot be reached within the ceiling, so every
        // probe is short and the bracket closes on the top.
        let calibrator = ForceCalibrator::default();
        let mut trace = Vec::new();
        let estimate = calibrator.approximate_force(45.0, Vec2::new(2.0, 2.25), &mut trace);
        assert!(estimate > 139.99, "estimate {estimate}");
        assert!(
            trace
                .iter()
                .all(|e| !matches!(e, TraceEvent::Probe { outcome: ProbeOutcome::Long, .. }))
        );
    }

    #[test]
    fn calibrate_drop_shot() {
        let calibrator = ForceCalibrator::default();
        let calibration = calibrator.calibrate(89.0, above_rim()).unwrap();
        assert!(calibration.is_feasible());
        assert!(
            calibration
                .trace
                .iter()
                .any(|e| matches!(e, TraceEvent::ExactMatch { .. }))
        );
    }

    #[test]
    fn trace_serializes_with_event_tag() {
        let event = TraceEvent::Probe {
            force: 12.5,
            outcome: ProbeOutcome::Short,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"event":"probe","force":12.5,"outcome":"Short"}"#);
    }
}
