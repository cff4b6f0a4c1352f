//! Headless skirmish driver.
//!
//! Runs the simulation on its own thread and draws published frames to the
//! terminal.

pub mod game_loop;
pub mod state;
pub mod terminal;

pub use skirmish_core as core;
