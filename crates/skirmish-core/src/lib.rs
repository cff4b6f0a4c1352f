//! Core types and definitions for the skirmish simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry, configuration, behavior states, render snapshots, and constants.
//! It has no dependency on any windowing or rendering framework.

pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod math;
pub mod state;
pub mod types;

pub use config::{SimConfig, SubdivisionPolicy};
pub use error::ConfigError;
