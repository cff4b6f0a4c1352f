//! Simulation engine for skirmish.
//!
//! Owns the unit list and the spatial index, advances them one tick at a
//! time, and exposes read-only views for renderers.

pub mod engine;
pub mod error;
pub mod render;
pub mod systems;
pub mod unit;
pub mod world_setup;

pub use engine::SimulationManager;
pub use error::SimError;
pub use skirmish_core as core;
pub use unit::{Unit, UnitKind};
