//! Drawing through an abstract canvas.
//!
//! The simulation never talks to a graphics API. Front ends implement
//! `Canvas` and hand it to `Renderer` after each tick.

use skirmish_core::state::{FrameSnapshot, QuadNodeView};
use skirmish_core::types::{Rect, UnitColor};

use crate::engine::SimulationManager;

/// Minimal drawing surface.
pub trait Canvas {
    fn clear(&mut self, color: UnitColor);
    fn fill_rect(&mut self, rect: Rect, color: UnitColor);
    fn stroke_rect(&mut self, rect: Rect, color: UnitColor);
}

/// Draws the background, the optional quadtree overlay, then every unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Renderer {
    pub show_quadtree: bool,
    pub background: UnitColor,
    pub overlay: UnitColor,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Renderer {
    pub fn new(show_quadtree: bool) -> Self {
        Self {
            show_quadtree,
            background: UnitColor::rgb(0, 0, 0),
            overlay: UnitColor::LIGHT_GRAY,
        }
    }

    /// Flip the overlay and return the new setting.
    pub fn toggle_quadtree(&mut self) -> bool {
        self.show_quadtree = !self.show_quadtree;
        self.show_quadtree
    }

    /// Draw the live simulation.
    pub fn render<C: Canvas + ?Sized>(&self, sim: &SimulationManager, canvas: &mut C) {
        canvas.clear(self.background);
        if self.show_quadtree {
            sim.spatial_index_root()
                .for_each_node(&mut |node| canvas.stroke_rect(node.bounds(), self.overlay));
        }
        for unit in sim.units() {
            unit.render(canvas);
        }
    }

    /// Draw a snapshot taken earlier, possibly on another thread.
    pub fn render_snapshot<C: Canvas + ?Sized>(&self, frame: &FrameSnapshot, canvas: &mut C) {
        canvas.clear(self.background);
        if self.show_quadtree {
            stroke_view(&frame.index, self.overlay, canvas);
        }
        for unit in &frame.units {
            canvas.fill_rect(Rect::centered(unit.position, unit.size / 2.0), unit.color);
        }
    }
}

fn stroke_view<C: Canvas + ?Sized>(node: &QuadNodeView, color: UnitColor, canvas: &mut C) {
    canvas.stroke_rect(node.bounds, color);
    for child in &node.children {
        stroke_view(child, color, canvas);
    }
}
