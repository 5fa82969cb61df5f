#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::too_many_lines,
    clippy::cast_lossless,
    clippy::cast_precision_loss,
    clippy::must_use_candidate,
    clippy::struct_excessive_bools,
    clippy::return_self_not_must_use,
    clippy::module_name_repetitions
)]
//! Core data model of the pixie editing surface: pixel coordinates, the
//! selection set and its outline, and the layer/frame raster stack.

use std::cmp::min;

use serde::{Deserialize, Serialize};

mod error;
pub use error::*;

mod position;
pub use position::*;

mod selection;
pub use selection::*;

pub mod outline;
pub use outline::{EdgeDirection, OutlineEdge, OutlineEdgeSet};

mod layer;
pub use layer::*;

mod layer_stack;
pub use layer_stack::*;

mod post_effect;
pub use post_effect::*;

mod dirty;
pub use dirty::*;

pub use image::{Rgba, RgbaImage};

#[derive(Copy, Clone, Debug, Default, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(width: {}, height: {})", self.width, self.height)
    }
}

impl PartialEq for Size {
    fn eq(&self, other: &Size) -> bool {
        self.width == other.width && self.height == other.height
    }
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Size { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

impl From<(usize, usize)> for Size {
    fn from(value: (usize, usize)) -> Self {
        Size {
            width: value.0 as i32,
            height: value.1 as i32,
        }
    }
}

impl From<(i32, i32)> for Size {
    fn from(value: (i32, i32)) -> Self {
        Size {
            width: value.0,
            height: value.1,
        }
    }
}

impl From<(u32, u32)> for Size {
    fn from(value: (u32, u32)) -> Self {
        Size {
            width: value.0 as i32,
            height: value.1 as i32,
        }
    }
}

impl From<Position> for Size {
    fn from(value: Position) -> Self {
        Size {
            width: value.x,
            height: value.y,
        }
    }
}

/// Half-open rectangle of pixel cells: `start` is inside, `start + size` is not.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rectangle {
    pub start: Position,
    pub size: Size,
}

impl std::fmt::Display for Rectangle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(x:{}, y:{}, width: {}, height: {})",
            self.start.x, self.start.y, self.size.width, self.size.height
        )
    }
}

impl Rectangle {
    pub fn from(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            start: Position::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Rectangle spanning two cells, both of them included.
    pub fn from_pt(p1: Position, p2: Position) -> Self {
        let start = Position::new(min(p1.x, p2.x), min(p1.y, p2.y));

        Rectangle {
            start,
            size: Size::new((p1.x - p2.x).abs() + 1, (p1.y - p2.y).abs() + 1),
        }
    }

    pub fn from_min_size(pos: impl Into<Position>, size: impl Into<Size>) -> Rectangle {
        Rectangle {
            start: pos.into(),
            size: size.into(),
        }
    }

    /// First position past the rectangle on both axes.
    pub fn bottom_right(&self) -> Position {
        Position {
            x: self.start.x + self.size.width,
            y: self.start.y + self.size.height,
        }
    }

    pub fn intersect(&self, other: &Rectangle) -> Rectangle {
        let min = self.start.max(other.start);
        let max = self.bottom_right().min(other.bottom_right());
        if max.x <= min.x || max.y <= min.y {
            return Rectangle::from_min_size(min, (0, 0));
        }
        Rectangle {
            start: min,
            size: (max - min).into(),
        }
    }

    pub fn y_range(&self) -> std::ops::Range<i32> {
        self.start.y..self.bottom_right().y
    }

    pub fn x_range(&self) -> std::ops::Range<i32> {
        self.start.x..self.bottom_right().x
    }

    pub fn left(&self) -> i32 {
        self.start.x
    }

    pub fn right(&self) -> i32 {
        self.bottom_right().x
    }

    pub fn top(&self) -> i32 {
        self.start.y
    }

    pub fn bottom(&self) -> i32 {
        self.bottom_right().y
    }

    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    pub fn is_inside(&self, pos: impl Into<Position>) -> bool {
        let pos = pos.into();

        self.start.x <= pos.x && self.start.y <= pos.y && pos.x < self.start.x + self.size.width && pos.y < self.start.y + self.size.height
    }

    /// Iterates all cells row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.y_range().flat_map(move |y| self.x_range().map(move |x| Position::new(x, y)))
    }
}
