//! Soldier behavior finite state machine.
//!
//! Two entry points drive a soldier each tick: `update` runs during the
//! movement pass (dwell timer, random perturbation, per-state steering and
//! integration) and `react` runs during the neighbor pass once the spatial
//! index reflects current positions.

use glam::Vec2;
use rand::Rng;

use skirmish_core::config::SimConfig;
use skirmish_core::enums::SoldierState;
use skirmish_core::math::distance_squared;
use skirmish_core::types::{Kinematics, Rect, UnitColor};

use crate::steering;

/// Behavior state carried by every soldier.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SoldierMind {
    pub state: SoldierState,
    /// Point the soldier is steering toward (ignored while idle).
    pub target: Vec2,
    /// Ticks since the last state change.
    pub ticks_in_state: u32,
}

/// A state change, reported for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: SoldierState,
    pub to: SoldierState,
}

/// What a soldier knows about one unit near it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub id: usize,
    pub position: Vec2,
    pub color: UnitColor,
}

impl SoldierMind {
    /// Set state and target. The dwell timer restarts only if the state changes.
    pub fn transition(&mut self, state: SoldierState, target: Vec2) -> Option<Transition> {
        let from = self.state;
        self.state = state;
        self.target = target;
        if from == state {
            return None;
        }
        self.ticks_in_state = 0;
        Some(Transition { from, to: state })
    }
}

/// Uniform random point inside `world` (half-open, so always indexable).
pub fn random_target(rng: &mut impl Rng, world: &Rect) -> Vec2 {
    Vec2::new(
        rng.gen_range(world.x..world.max_x()),
        rng.gen_range(world.y..world.max_y()),
    )
}

/// Point `distance` away from `position`, directly away from `threat`.
///
/// If the two coincide there is no direction to flee in and the result is
/// `position` itself, which makes the next steer a no-op.
pub fn flee_target(position: Vec2, threat: Vec2, distance: f32) -> Vec2 {
    position + (position - threat).normalize_or_zero() * distance
}

/// Closest neighbor by squared distance; ties go to the earliest in the slice.
pub fn nearest(position: Vec2, neighbors: &[Neighbor]) -> Option<&Neighbor> {
    let mut best: Option<(&Neighbor, f32)> = None;
    for neighbor in neighbors {
        let d = distance_squared(position, neighbor.position);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((neighbor, d)),
        }
    }
    best.map(|(neighbor, _)| neighbor)
}

/// Random switch to idle or wandering once the soldier has dwelt long enough.
pub fn perturb(mind: &mut SoldierMind, config: &SimConfig, rng: &mut impl Rng) -> Option<Transition> {
    if mind.ticks_in_state < config.min_dwell_ticks {
        return None;
    }

    let roll: f32 = rng.gen();
    if roll < config.idle_chance {
        mind.transition(SoldierState::Idle, mind.target)
    } else if roll < config.idle_chance + config.wander_chance {
        let target = random_target(rng, &config.world_bounds());
        mind.transition(SoldierState::Wandering, target)
    } else {
        None
    }
}

/// Per-state steering for one tick. Does not integrate.
pub fn drive(
    mind: &mut SoldierMind,
    kin: &mut Kinematics,
    config: &SimConfig,
    rng: &mut impl Rng,
) -> Option<Transition> {
    let mut change = None;

    match mind.state {
        SoldierState::Idle => {
            kin.velocity *= config.idle_damping;
        }
        SoldierState::Wandering => {
            if distance_squared(kin.position, mind.target) <= config.arrival_distance_sq {
                mind.target = random_target(rng, &config.world_bounds());
            }
            steering::steer(kin, mind.target, config);
        }
        SoldierState::Chasing => {
            steering::steer(kin, mind.target, config);
        }
        SoldierState::Fleeing => {
            if mind.ticks_in_state >= config.flee_duration_ticks {
                let target = random_target(rng, &config.world_bounds());
                change = mind.transition(SoldierState::Wandering, target);
            }
            steering::steer(kin, mind.target, config);
        }
    }

    change
}

/// Full movement-pass update: dwell timer, perturbation, steering, integration.
pub fn update(
    mind: &mut SoldierMind,
    kin: &mut Kinematics,
    config: &SimConfig,
    rng: &mut impl Rng,
) -> Option<Transition> {
    mind.ticks_in_state = mind.ticks_in_state.saturating_add(1);

    let perturbed = perturb(mind, config, rng);
    let driven = drive(mind, kin, config, rng);
    steering::advance(kin, config);

    driven.or(perturbed)
}

/// Neighbor-pass reaction.
///
/// With nobody around, any state other than idle becomes wandering (a soldier
/// already wandering keeps its target). Otherwise the nearest neighbor decides:
/// same color is chased, anything else is fled from.
///
/// The wandering retarget is skipped on purpose so arrival keeps driving new targets.
pub fn react(
    mind: &mut SoldierMind,
    position: Vec2,
    color: UnitColor,
    neighbors: &[Neighbor],
    config: &SimConfig,
    rng: &mut impl Rng,
) -> Option<Transition> {
    match nearest(position, neighbors) {
        None => match mind.state {
            SoldierState::Idle | SoldierState::Wandering => None,
            SoldierState::Chasing | SoldierState::Fleeing => {
                let target = random_target(rng, &config.world_bounds());
                mind.transition(SoldierState::Wandering, target)
            }
        },
        Some(other) if other.color == color => {
            mind.transition(SoldierState::Chasing, other.position)
        }
        Some(other) => {
            let target = flee_target(position, other.position, config.flee_distance);
            mind.transition(SoldierState::Fleeing, target)
        }
    }
}
