//! Snapshot system: copies the unit list and index into a `FrameSnapshot`.
//!
//! This system is read-only; it never modifies the simulation.

use skirmish_core::state::{FrameSnapshot, UnitView};
use skirmish_core::types::{Rect, SimTime};
use skirmish_spatial::QuadtreeNode;

use crate::unit::Unit;

pub fn build_snapshot(units: &[Unit], index: &QuadtreeNode, time: SimTime, world: Rect) -> FrameSnapshot {
    FrameSnapshot {
        time,
        world,
        units: units
            .iter()
            .enumerate()
            .map(|(id, unit)| UnitView {
                id,
                kind: unit.tag(),
                position: unit.position(),
                velocity: unit.velocity(),
                angle: unit.angle(),
                color: unit.color,
                size: unit.size,
                state: unit.state(),
            })
            .collect(),
        index: index.to_view(),
    }
}
