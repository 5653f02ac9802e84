//! Runs in its own process: it points `HOOPSHOT_CALIBRATION_CONFIG` at a
//! temporary file, which would leak into any test sharing the environment.

use hoopshot_core::Simulation;
use hoopshot_core::calibration::{CONFIG_ENV, CalibrationConfig};

#[test]
fn simulation_reads_calibration_config_from_env() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calibration.toml");
    std::fs::write(&path, "refine_window = 0.5\nrefine_increment = 0.05\n").unwrap();

    unsafe {
        std::env::set_var(CONFIG_ENV, &path);
    }
    let sim = Simulation::new();
    let loaded = CalibrationConfig::load();
    unsafe {
        std::env::remove_var(CONFIG_ENV);
    }

    let config = sim.calibrator().config();
    assert_eq!(config.refine_window, 0.5);
    assert_eq!(config.refine_increment, 0.05);
    assert_eq!(config.search_ceiling, 140.0);
    assert_eq!(&loaded, config);

    let (low, high) = sim.calibrator().refinement_window(50.0);
    assert_eq!((low, high), (49.5, 50.5));
}
