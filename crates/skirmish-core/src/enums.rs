//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Soldier behavior state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoldierState {
    /// Coasting to a stop, no steering.
    #[default]
    Idle,
    /// Steering toward a random point in the world.
    Wandering,
    /// Following the nearest same-colored neighbor.
    Chasing,
    /// Running from the nearest differently-colored neighbor.
    Fleeing,
}

impl SoldierState {
    pub const ALL: [SoldierState; 4] = [
        SoldierState::Idle,
        SoldierState::Wandering,
        SoldierState::Chasing,
        SoldierState::Fleeing,
    ];

    /// Position in `ALL`, used for per-state tallies.
    pub fn index(self) -> usize {
        match self {
            SoldierState::Idle => 0,
            SoldierState::Wandering => 1,
            SoldierState::Chasing => 2,
            SoldierState::Fleeing => 3,
        }
    }
}

/// Which variant a unit is, for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitKindTag {
    Soldier,
    Drifter,
}
