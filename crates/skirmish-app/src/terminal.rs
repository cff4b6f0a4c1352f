//! Character-grid canvas for printing frames to a terminal.

use std::fmt;

use skirmish_core::types::{Rect, UnitColor};
use skirmish_sim::render::Canvas;

/// A `Canvas` that rasterises world rectangles onto a grid of characters.
///
/// Units are drawn as the first letter of their color; quadtree cells as
/// `+`, `-` and `|` outlines.
#[derive(Debug, Clone)]
pub struct AsciiCanvas {
    world: Rect,
    cols: usize,
    rows: usize,
    cells: Vec<char>,
}

impl AsciiCanvas {
    /// A blank grid of `cols` x `rows` covering `world`. Zero sizes are raised to 1.
    pub fn new(world: Rect, cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            world,
            cols,
            rows,
            cells: vec![' '; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Character at a grid cell, if in range.
    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        (col < self.cols && row < self.rows).then(|| self.cells[row * self.cols + col])
    }

    fn col_of(&self, x: f32) -> usize {
        scale(x - self.world.x, self.world.width, self.cols)
    }

    fn row_of(&self, y: f32) -> usize {
        scale(y - self.world.y, self.world.height, self.rows)
    }

    fn put(&mut self, col: usize, row: usize, glyph: char) {
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col] = glyph;
        }
    }
}

/// Map an offset within `extent` onto `0..cells`, clamping outside values.
fn scale(offset: f32, extent: f32, cells: usize) -> usize {
    if offset.is_nan() || offset <= 0.0 || extent <= 0.0 {
        return 0;
    }
    let cell = (offset / extent * cells as f32) as usize;
    cell.min(cells - 1)
}

fn glyph(color: UnitColor) -> char {
    match color {
        UnitColor::RED => 'R',
        UnitColor::GREEN => 'G',
        UnitColor::BLUE => 'B',
        UnitColor::LIGHT_GRAY => 'o',
        _ => '#',
    }
}

impl Canvas for AsciiCanvas {
    fn clear(&mut self, _color: UnitColor) {
        self.cells.fill(' ');
    }

    fn fill_rect(&mut self, rect: Rect, color: UnitColor) {
        let (left, right) = (self.col_of(rect.x), self.col_of(rect.max_x()));
        let (top, bottom) = (self.row_of(rect.y), self.row_of(rect.max_y()));
        let glyph = glyph(color);
        for row in top..=bottom {
            for col in left..=right {
                self.put(col, row, glyph);
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, _color: UnitColor) {
        let (left, right) = (self.col_of(rect.x), self.col_of(rect.max_x()));
        let (top, bottom) = (self.row_of(rect.y), self.row_of(rect.max_y()));
        for col in left..=right {
            self.put(col, top, '-');
            self.put(col, bottom, '-');
        }
        for row in top..=bottom {
            self.put(left, row, '|');
            self.put(right, row, '|');
        }
        for (col, row) in [(left, top), (right, top), (left, bottom), (right, bottom)] {
            self.put(col, row, '+');
        }
    }
}

impl fmt::Display for AsciiCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.cols).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &c in row {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}
