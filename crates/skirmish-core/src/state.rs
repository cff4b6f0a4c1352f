//! Frame snapshot: the complete visible state handed to a renderer after a tick.
//!
//! Snapshots are plain owned data, so a renderer on another thread can read
//! them while the next tick mutates the live simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::{SoldierState, UnitKindTag};
use crate::types::{Rect, SimTime, UnitColor};

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: SimTime,
    pub world: Rect,
    /// Units in insertion order.
    pub units: Vec<UnitView>,
    /// Root of the spatial index, for the debug overlay.
    pub index: QuadNodeView,
}

/// A unit as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitView {
    pub id: usize,
    pub kind: UnitKindTag,
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle: f32,
    pub color: UnitColor,
    pub size: f32,
    /// Behavior state, for soldiers only.
    pub state: Option<SoldierState>,
}

/// One node of the spatial index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuadNodeView {
    pub bounds: Rect,
    /// Ids of units stored directly at this node.
    pub unit_ids: Vec<usize>,
    /// Empty for leaves, otherwise exactly four quadrants.
    pub children: Vec<QuadNodeView>,
}

impl QuadNodeView {
    /// Number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(QuadNodeView::node_count)
            .sum::<usize>()
    }

    /// Number of unit entries in this subtree.
    pub fn unit_count(&self) -> usize {
        self.unit_ids.len()
            + self
                .children
                .iter()
                .map(QuadNodeView::unit_count)
                .sum::<usize>()
    }
}
