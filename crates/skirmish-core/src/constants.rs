//! Simulation constants and default tuning parameters.
//!
//! These are the values `SimConfig::default()` is built from. Components never
//! read them directly; they receive a validated `SimConfig` instead.

/// Frame rate the driver ticks at (Hz).
pub const TICK_RATE: u32 = 60;

// --- World bounds ---

/// Default world width in world units.
pub const FIELD_WIDTH: f32 = 800.0;

/// Default world height in world units.
pub const FIELD_HEIGHT: f32 = 600.0;

// --- Neighbor detection ---

/// Half-extent of the square neighbor query centred on each unit.
pub const DETECTION_RADIUS: f32 = 50.0;

// --- Steering ---

/// Fraction of the steering delta applied per tick.
pub const STEERING_DAMPING: f32 = 0.1;

/// Maximum unit speed (world units per tick).
pub const MAX_SPEED: f32 = 2.0;

/// Squared distance below which a unit counts as arrived and stops steering.
pub const ARRIVAL_DISTANCE_SQ: f32 = 50.0;

/// Velocity multiplier applied on a wall bounce (sign is inverted separately).
pub const BOUNCE_DAMPING: f32 = 0.5;

/// Per-tick velocity multiplier while idle.
pub const IDLE_DAMPING: f32 = 0.95;

// --- Soldier behavior ---

/// Distance of the flee point from the fleeing unit.
pub const FLEE_DISTANCE: f32 = 100.0;

/// Ticks spent fleeing before reverting to wandering.
pub const FLEE_DURATION_TICKS: u32 = 50;

/// Ticks a unit must spend in a state before random perturbation can fire.
pub const MIN_DWELL_TICKS: u32 = 100;

/// Per-tick chance of a random switch to idle once the dwell time is met.
pub const IDLE_CHANCE: f32 = 0.002;

/// Per-tick chance of a random switch to wandering once the dwell time is met.
pub const WANDER_CHANCE: f32 = 0.005;

// --- Quadtree ---

/// Maximum depth of the quadtree.
pub const QUADTREE_MAX_DEPTH: u32 = 4;

/// Maximum units per leaf before splitting.
pub const QUADTREE_MAX_OBJECTS: usize = 4;

// --- Randomness ---

/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 42;

// --- Display ---

/// Default side length of a unit's drawn square.
pub const UNIT_SIZE: f32 = 10.0;
