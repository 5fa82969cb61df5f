//! Brush footprints and stroke primitives
//!
//! GUI-independent drawing helpers: the square or round footprint a brush
//! covers and Bresenham line strokes built from it. Everything plots through
//! [`DrawTarget`] so the algorithms can be tested without an editor.

pub mod line;

use pixie_engine::{Position, Rgba};
use serde::{Deserialize, Serialize};

use crate::{CellIndex, EditState};

/// Shape of the area a brush covers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrushShape {
    #[default]
    Square,
    Circle,
}

/// Something pixels can be plotted on.
pub trait DrawTarget {
    /// Returns whether the pixel changed.
    fn plot(&mut self, pos: Position, color: Rgba<u8>) -> bool;
}

/// Plots on the current cell of the editor.
impl DrawTarget for EditState {
    fn plot(&mut self, pos: Position, color: Rgba<u8>) -> bool {
        self.draw_pixel(pos, color)
    }
}

/// Plots on one fixed cell of the editor.
pub struct CellTarget<'a> {
    pub state: &'a mut EditState,
    pub cell: CellIndex,
}

impl DrawTarget for CellTarget<'_> {
    fn plot(&mut self, pos: Position, color: Rgba<u8>) -> bool {
        self.state.draw_to_cell(self.cell, pos, color)
    }
}

/// Cells covered by a brush of `size` whose footprint starts at `origin`.
///
/// `origin` is the top-left cell of the `size`×`size` box. Circles keep the
/// cells whose center lies inside the inscribed circle.
pub fn footprint(origin: Position, size: i32, shape: BrushShape) -> Vec<Position> {
    let size = size.max(1);
    let radius = size as f32 / 2.0;
    let mut result = Vec::with_capacity((size * size) as usize);
    for y in 0..size {
        for x in 0..size {
            if shape == BrushShape::Circle {
                let dx = x as f32 + 0.5 - radius;
                let dy = y as f32 + 0.5 - radius;
                if dx * dx + dy * dy > radius * radius {
                    continue;
                }
            }
            result.push(origin + Position::new(x, y));
        }
    }
    result
}

/// Plots one footprint; returns the number of changed pixels.
pub fn stamp<T: DrawTarget>(target: &mut T, origin: Position, size: i32, shape: BrushShape, color: Rgba<u8>) -> usize {
    footprint(origin, size, shape).into_iter().filter(|pos| target.plot(*pos, color)).count()
}
