//! Training-data generation for the force-prediction model.
//!
//! Sweeps a grid of release points and angles, calibrates each shot through
//! the public [`Simulation`] API, re-throws with the calibrated force and keeps
//! the shots that actually go in.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use hoopshot_core::calibration::{CalibrationConfig, ForceCalibrator, TraceEvent};
use hoopshot_core::training::HEADER;
use hoopshot_core::{RunOutcome, Simulation, TrainingRow};

/// Grid and budget for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatagenConfig {
    pub angle_min: f64,
    pub angle_max: f64,
    pub angle_step: f64,
    pub release_x_min: f64,
    pub release_x_max: f64,
    pub release_x_step: f64,
    pub release_height: f64,
    /// Tick budget for each verification throw.
    pub max_steps: usize,
    pub calibration: CalibrationConfig,
}

impl Default for DatagenConfig {
    fn default() -> Self {
        Self {
            angle_min: 40.0,
            angle_max: 75.0,
            angle_step: 5.0,
            release_x_min: 10.0,
            release_x_max: 24.0,
            release_x_step: 2.0,
            release_height: 2.25,
            max_steps: 100_000,
            calibration: CalibrationConfig::default(),
        }
    }
}

impl DatagenConfig {
    /// Read a TOML config, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Every `(release_x, angle)` pair, release-major.
    pub fn grid(&self) -> Vec<(f64, f64)> {
        let xs = steps(self.release_x_min, self.release_x_max, self.release_x_step);
        let angles = steps(self.angle_min, self.angle_max, self.angle_step);
        xs.iter()
            .flat_map(|&x| angles.iter().map(move |&a| (x, a)))
            .collect()
    }
}

/// Inclusive range sampled at `step`. Empty for a non-positive step.
fn steps(min: f64, max: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || max < min {
        return Vec::new();
    }
    let count = ((max - min) / step + 1e-9).floor() as usize;
    (0..=count).map(|i| min + i as f64 * step).collect()
}

/// What happened to one grid point.
#[derive(Debug, Clone, PartialEq)]
pub enum ShotOutcome {
    /// No force lands the shot.
    Infeasible,
    /// Calibrated, but the verification throw missed or never settled.
    Rejected { force: f64, score: f64 },
    Accepted(TrainingRow),
}

/// One JSON line of the optional trace dump.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceRecord {
    pub release_x: f64,
    pub angle: f64,
    pub events: Vec<TraceEvent>,
}

/// Calibrate and verify one shot with the two-call contract: a guessing
/// throw to get the force, then a real throw with it.
pub fn calibrate_shot(sim: &mut Simulation, angle: f64, max_steps: usize) -> Result<ShotOutcome> {
    let force = sim.throw(1.0, angle, true)?;
    if force == 0.0 {
        return Ok(ShotOutcome::Infeasible);
    }

    sim.throw(force, angle, false)?;
    let outcome = sim.run_to_rest(max_steps);
    let score = sim.score();
    if outcome == RunOutcome::NonFinite {
        tracing::warn!(force, angle, "Verification throw diverged");
        return Ok(ShotOutcome::Rejected { force, score });
    }

    let row = TrainingRow::new(force, angle, sim.release_point().x, score);
    if row.qualifies() {
        Ok(ShotOutcome::Accepted(row))
    } else {
        Ok(ShotOutcome::Rejected { force, score })
    }
}

/// Totals for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub attempted: usize,
    pub accepted: usize,
    pub infeasible: usize,
    pub rejected: usize,
}

/// Sweep the grid, writing qualifying rows as CSV and, if given, each
/// calibration trace as a JSON line.
pub fn generate<W: Write>(
    config: &DatagenConfig,
    rows: &mut csv::Writer<W>,
    mut traces: Option<&mut dyn Write>,
) -> Result<RunSummary> {
    let calibrator = ForceCalibrator::new(config.calibration.clone());
    let mut sim = Simulation::with_calibrator(calibrator);
    let mut summary = RunSummary::default();

    rows.write_record(HEADER).context("writing CSV header")?;

    for (release_x, angle) in config.grid() {
        sim.set_release_point(release_x, config.release_height);
        let outcome = calibrate_shot(&mut sim, angle, config.max_steps)?;
        summary.attempted += 1;

        if let Some(out) = traces.as_deref_mut() {
            let record = TraceRecord {
                release_x,
                angle,
                events: sim.diagnostic_trace().to_vec(),
            };
            serde_json::to_writer(&mut *out, &record).context("writing trace")?;
            writeln!(out).context("writing trace")?;
        }

        match outcome {
            ShotOutcome::Accepted(row) => {
                rows.write_record(row.to_record()).context("writing CSV row")?;
                summary.accepted += 1;
            },
            ShotOutcome::Infeasible => {
                tracing::debug!(release_x, angle, "No force lands this shot");
                summary.infeasible += 1;
            },
            ShotOutcome::Rejected { force, score } => {
                tracing::warn!(release_x, angle, force, score, "Calibrated force missed on re-throw");
                summary.rejected += 1;
            },
        }
    }

    rows.flush().context("flushing CSV")?;
    Ok(summary)
}
