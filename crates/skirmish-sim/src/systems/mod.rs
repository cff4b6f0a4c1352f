//! Per-tick systems over the unit list.
//!
//! Systems are free functions: they borrow what they need from the manager
//! and own no state of their own.

pub mod boundary;
pub mod interactions;
pub mod movement;
pub mod snapshot;
