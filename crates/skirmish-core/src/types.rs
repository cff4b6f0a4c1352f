//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::math::next_down;

/// Axis-aligned rectangle anchored at its minimum corner.
///
/// Containment is half-open: a point is inside when
/// `x in [x, x + width)` and `y in [y, y + height)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of side `2 * half_extent` centred on `center`.
    pub fn centered(center: Vec2, half_extent: f32) -> Self {
        Self::new(
            center.x - half_extent,
            center.y - half_extent,
            half_extent * 2.0,
            half_extent * 2.0,
        )
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Half-open point containment.
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.y >= self.y && point.x < self.max_x() && point.y < self.max_y()
    }

    /// True when the rectangles overlap or share an edge.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.max_x()
            && other.x <= self.max_x()
            && self.y <= other.max_y()
            && other.y <= self.max_y()
    }

    /// The four equal quadrants: top-left, top-right, bottom-left, bottom-right.
    pub fn quadrants(&self) -> [Rect; 4] {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        [
            Rect::new(self.x, self.y, half_w, half_h),
            Rect::new(self.x + half_w, self.y, half_w, half_h),
            Rect::new(self.x, self.y + half_h, half_w, half_h),
            Rect::new(self.x + half_w, self.y + half_h, half_w, half_h),
        ]
    }

    /// Pull `point` to the nearest representable point this rectangle contains.
    ///
    /// Points on or past the exclusive max edges land just inside them.
    pub fn clamp_inside(&self, point: Vec2) -> Vec2 {
        let max_x = next_down(self.max_x()).max(self.x);
        let max_y = next_down(self.max_y()).max(self.y);
        Vec2::new(point.x.max(self.x).min(max_x), point.y.max(self.y).min(max_y))
    }
}

/// Position, velocity and facing of a moving point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Orientation in radians, `atan2(vy, vx)` after the last steer.
    pub angle: f32,
}

impl Kinematics {
    pub fn new(position: Vec2, velocity: Vec2, angle: f32) -> Self {
        Self {
            position,
            velocity,
            angle,
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Display color; doubles as the group tag for same/other comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl UnitColor {
    pub const RED: UnitColor = UnitColor::rgb(255, 0, 0);
    pub const GREEN: UnitColor = UnitColor::rgb(0, 255, 0);
    pub const BLUE: UnitColor = UnitColor::rgb(0, 0, 255);
    pub const LIGHT_GRAY: UnitColor = UnitColor::rgb(192, 192, 192);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of completed ticks.
    pub tick: u64,
}

impl SimTime {
    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
    }
}
