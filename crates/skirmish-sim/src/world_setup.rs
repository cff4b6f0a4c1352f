//! Unit spawn factories for setting up the simulation world.

use rand::Rng;
use tracing::info;

use skirmish_behavior::fsm::random_target;
use skirmish_core::constants::UNIT_SIZE;
use skirmish_core::types::UnitColor;

use crate::engine::SimulationManager;
use crate::unit::Unit;

/// Colors handed out to randomly spawned soldiers.
pub const PALETTE: [UnitColor; 3] = [UnitColor::RED, UnitColor::GREEN, UnitColor::BLUE];

/// The stock four-soldier opening: one red, one blue, and a green pair
/// close enough to chase each other.
pub fn default_scenario() -> Vec<Unit> {
    vec![
        Unit::soldier(100.0, 100.0, 1.0, 1.0, 0.0, UnitColor::RED, UNIT_SIZE),
        Unit::soldier(300.0, 200.0, -1.0, 0.5, 0.0, UnitColor::BLUE, UNIT_SIZE),
        Unit::soldier(500.0, 400.0, 0.0, -1.0, 0.0, UnitColor::GREEN, UNIT_SIZE),
        Unit::soldier(450.0, 400.0, 0.0, -1.0, 0.0, UnitColor::GREEN, UNIT_SIZE),
    ]
}

/// Add the default scenario to `sim`.
pub fn setup_default(sim: &mut SimulationManager) {
    for unit in default_scenario() {
        sim.add_unit(unit);
    }
    info!(units = sim.units().len(), "default scenario loaded");
}

/// Scatter `count` soldiers uniformly over the world with small random
/// velocities and palette colors, drawn from the manager's random source.
pub fn spawn_random_soldiers(sim: &mut SimulationManager, count: usize) {
    let world = sim.world();
    for _ in 0..count {
        let rng = sim.rng_mut();
        let at = random_target(rng, &world);
        let vx = rng.gen_range(-1.0..=1.0);
        let vy = rng.gen_range(-1.0..=1.0);
        let color = PALETTE[rng.gen_range(0..PALETTE.len())];
        sim.add_unit(Unit::soldier(at.x, at.y, vx, vy, 0.0, color, UNIT_SIZE));
    }
    info!(count, total = sim.units().len(), "random soldiers spawned");
}

/// Scatter `count` non-reacting drifters in light gray.
pub fn spawn_drifters(sim: &mut SimulationManager, count: usize) {
    let world = sim.world();
    for _ in 0..count {
        let rng = sim.rng_mut();
        let at = random_target(rng, &world);
        let vx = rng.gen_range(-1.5..=1.5);
        let vy = rng.gen_range(-1.5..=1.5);
        sim.add_unit(Unit::drifter(at.x, at.y, vx, vy, UnitColor::LIGHT_GRAY, UNIT_SIZE));
    }
    info!(count, "drifters spawned");
}
