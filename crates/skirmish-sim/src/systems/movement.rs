//! Movement pass: per-unit update followed by boundary handling, in list order.

use rand::Rng;
use tracing::trace;

use skirmish_core::config::SimConfig;

use crate::systems::boundary;
use crate::unit::Unit;

/// Update and confine every unit. Returns the number of state transitions.
pub fn run(units: &mut [Unit], config: &SimConfig, rng: &mut impl Rng) -> usize {
    let world = config.world_bounds();
    let mut transitions = 0;

    for (id, unit) in units.iter_mut().enumerate() {
        if let Some(change) = unit.update(config, rng) {
            trace!(unit = id, from = ?change.from, to = ?change.to, "behavior change");
            transitions += 1;
        }
        boundary::confine(&mut unit.kinematics, &world, config.bounce_damping);
    }

    transitions
}
