use hoopshot_core::constants::RIM_CENTRE_X;
use hoopshot_core::{RunOutcome, Simulation};

/// Tick budget used by every scenario.
pub const MAX_STEPS: usize = 100_000;

/// Straight above the rim, high enough for a light lob to drop through.
pub const DROP_RELEASE: (f64, f64) = (RIM_CENTRE_X, 5.0);

pub fn sim_at(x: f64, y: f64) -> Simulation {
    let mut sim = Simulation::new();
    sim.set_release_point(x, y);
    sim
}

/// Throw and run to rest, returning the final score.
pub fn shoot(sim: &mut Simulation, force: f64, angle: f64) -> f64 {
    sim.throw(force, angle, false).unwrap();
    let outcome = sim.run_to_rest(MAX_STEPS);
    assert_ne!(outcome, RunOutcome::NonFinite, "shot at {force} N, {angle}° diverged");
    sim.score()
}
