//! Unit behavior for skirmish.
//!
//! Steering and the soldier state machine, as pure functions over plain data.
//! Nothing here knows about the unit list or the spatial index.

pub mod fsm;
pub mod steering;

pub use skirmish_core as core;

#[cfg(test)]
mod tests;
