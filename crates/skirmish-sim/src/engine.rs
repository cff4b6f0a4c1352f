//! Simulation manager, the owner of all simulation state.
//!
//! `SimulationManager` owns the authoritative unit list and the spatial index
//! and advances both one tick at a time. It is completely headless; drivers
//! call `tick()` and then read `units()` / `spatial_index_root()` (or take a
//! `snapshot()`) between ticks.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use skirmish_core::config::SimConfig;
use skirmish_core::enums::SoldierState;
use skirmish_core::state::FrameSnapshot;
use skirmish_core::types::{Rect, SimTime};
use skirmish_spatial::{QuadtreeNode, SpatialEntry};

use crate::error::SimError;
use crate::systems;
use crate::unit::Unit;

/// Owns every unit and the index over them.
pub struct SimulationManager {
    config: SimConfig,
    world: Rect,
    units: Vec<Unit>,
    index: QuadtreeNode,
    time: SimTime,
    rng: ChaCha8Rng,
    /// Reused query buffer for the neighbor pass.
    found: Vec<SpatialEntry>,
}

impl SimulationManager {
    /// Validate `config` and create an empty simulation seeded from `config.seed`.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_rng(config, rng)
    }

    /// Like `new`, with a caller-supplied random source.
    pub fn with_rng(config: SimConfig, rng: ChaCha8Rng) -> Result<Self, SimError> {
        config.validate()?;
        let world = config.world_bounds();
        let index = QuadtreeNode::new(world, config.quadtree)?;

        info!(
            width = world.width,
            height = world.height,
            policy = ?config.quadtree,
            "simulation created"
        );

        Ok(Self {
            config,
            world,
            units: Vec::new(),
            index,
            time: SimTime::default(),
            rng,
            found: Vec::new(),
        })
    }

    /// Append a unit and index it. Returns the unit's id (its position in the list).
    ///
    /// Adding the same unit twice creates two independent units.
    pub fn add_unit(&mut self, unit: Unit) -> usize {
        let id = self.units.len();
        let point = self.world.clamp_inside(unit.position());
        if point != unit.position() {
            debug!(unit = id, position = ?unit.position(), ?point, "unit indexed at clamped point");
        }
        if !self.index.insert(id, point) {
            warn!(unit = id, ?point, "unit could not be indexed");
        }
        self.units.push(unit);
        id
    }

    /// Advance one tick: move every unit, rebuild the index, run reactions.
    pub fn tick(&mut self) {
        let moved = systems::movement::run(&mut self.units, &self.config, &mut self.rng);

        self.rebuild_index();

        let reacted = systems::interactions::run(
            &mut self.units,
            &self.index,
            &self.config,
            &mut self.rng,
            &mut self.found,
        );

        self.time.advance();

        debug!(
            tick = self.time.tick,
            units = self.units.len(),
            index_nodes = self.index.node_count(),
            transitions = moved + reacted,
            "tick complete"
        );
    }

    /// Discard the index contents and re-insert every unit at its current position.
    fn rebuild_index(&mut self) {
        let world = self.world;
        let rejected = self.index.rebuild(
            self.units
                .iter()
                .enumerate()
                .map(|(id, unit)| SpatialEntry::new(id, world.clamp_inside(unit.position()))),
        );
        if rejected > 0 {
            warn!(rejected, "units missing from spatial index (non-finite position)");
        }
    }

    /// Units in insertion order.
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Root of the spatial index, for debug overlays.
    pub fn spatial_index_root(&self) -> &QuadtreeNode {
        &self.index
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn world(&self) -> Rect {
        self.world
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Soldier count per state, indexed by `SoldierState::index`.
    pub fn state_histogram(&self) -> [usize; 4] {
        let mut counts = [0; 4];
        for state in self.units.iter().filter_map(Unit::state) {
            counts[state.index()] += 1;
        }
        counts
    }

    /// Number of soldiers currently in `state`.
    pub fn count_in_state(&self, state: SoldierState) -> usize {
        self.state_histogram()[state.index()]
    }

    /// Owned copy of the visible state, safe to hand to another thread.
    pub fn snapshot(&self) -> FrameSnapshot {
        systems::snapshot::build_snapshot(&self.units, &self.index, self.time, self.world)
    }

    /// The manager's random source, for scenario setup.
    pub(crate) fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Direct access to a unit for test setup. The index is not updated until the next tick.
    #[cfg(test)]
    pub(crate) fn unit_mut(&mut self, id: usize) -> Option<&mut Unit> {
        self.units.get_mut(id)
    }
}
