//! Neighbor pass: query the index around each reacting unit and hand it the
//! units found, minus itself.

use rand::Rng;
use tracing::trace;

use skirmish_behavior::fsm::Neighbor;
use skirmish_core::config::SimConfig;
use skirmish_core::types::Rect;
use skirmish_spatial::{QuadtreeNode, SpatialEntry};

use crate::unit::Unit;

/// Ids of every unit inside the detection square around unit `id`, excluding it.
///
/// `found` is scratch space and is cleared first.
pub fn neighbors_of(
    id: usize,
    units: &[Unit],
    index: &QuadtreeNode,
    detection_radius: f32,
    found: &mut Vec<SpatialEntry>,
) -> Vec<Neighbor> {
    found.clear();
    let Some(unit) = units.get(id) else {
        return Vec::new();
    };

    let range = Rect::centered(unit.position(), detection_radius);
    index.query_into(&range, found);

    found
        .iter()
        .filter(|entry| entry.id != id)
        .filter_map(|entry| {
            units.get(entry.id).map(|other| Neighbor {
                id: entry.id,
                position: other.position(),
                color: other.color,
            })
        })
        .collect()
}

/// Run reactions for every unit that can react. Returns the number of transitions.
pub fn run(
    units: &mut [Unit],
    index: &QuadtreeNode,
    config: &SimConfig,
    rng: &mut impl Rng,
    found: &mut Vec<SpatialEntry>,
) -> usize {
    let mut transitions = 0;

    for id in 0..units.len() {
        if !units[id].can_react() {
            continue;
        }
        let neighbors = neighbors_of(id, units, index, config.detection_radius, found);
        if let Some(change) = units[id].react(&neighbors, config, rng) {
            trace!(
                unit = id,
                neighbors = neighbors.len(),
                from = ?change.from,
                to = ?change.to,
                "reaction"
            );
            transitions += 1;
        }
    }

    transitions
}
