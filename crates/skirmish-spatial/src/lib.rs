//! Spatial index for neighbor queries.
//!
//! A rebuildable quadtree over unit ids. The tree never owns units; it stores
//! `(id, position)` pairs that point back into the caller's unit list.

pub mod quadtree;

pub use quadtree::{QuadtreeNode, SpatialEntry, SpatialError};
pub use skirmish_core as core;
