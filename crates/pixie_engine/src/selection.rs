use std::collections::BTreeSet;

use crate::{Position, Rectangle, Size};

/// How a new selection shape combines with the existing selection.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Discard the current selection first.
    #[default]
    Replace,
    Add,
    Subtract,
    Intersect,
}

/// Sparse set of selected pixel cells plus its cached bounding box.
///
/// An empty set means "nothing selected". The bounding box is kept in sync
/// by every mutating method, so readers never have to rescan the set.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SelectionSet {
    cells: BTreeSet<Position>,
    bounding_box: Option<(i32, i32, i32, i32)>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection covering every cell of `size`.
    pub fn all(size: Size) -> Self {
        let mut result = Self::default();
        result.select_all(size);
        result
    }

    pub fn from_rectangle(rect: Rectangle) -> Self {
        let mut result = Self::default();
        result.add_rectangle(rect);
        result
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn is_selected(&self, pos: impl Into<Position>) -> bool {
        self.cells.contains(&pos.into())
    }

    /// Selected cells in x-major order.
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().copied()
    }

    /// Inclusive `(x_min, y_min, x_max, y_max)`, `None` when nothing is selected.
    pub fn bounding_box(&self) -> Option<(i32, i32, i32, i32)> {
        self.bounding_box
    }

    /// Bounding box as a half-open rectangle, empty when nothing is selected.
    pub fn rectangle(&self) -> Rectangle {
        match self.bounding_box {
            Some((x_min, y_min, x_max, y_max)) => Rectangle::from(x_min, y_min, x_max - x_min + 1, y_max - y_min + 1),
            None => Rectangle::default(),
        }
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.bounding_box = None;
    }

    pub fn select_all(&mut self, size: Size) {
        self.cells.clear();
        for x in 0..size.width {
            for y in 0..size.height {
                self.cells.insert(Position::new(x, y));
            }
        }
        self.update_bounding_box();
    }

    pub fn set_is_selected(&mut self, pos: impl Into<Position>, selected: bool) {
        let pos = pos.into();
        if selected {
            if self.cells.insert(pos) {
                self.widen_bounding_box(pos);
            }
        } else if self.cells.remove(&pos) {
            // Only a cell on the box edge can shrink it.
            if let Some((x_min, y_min, x_max, y_max)) = self.bounding_box {
                if pos.x == x_min || pos.x == x_max || pos.y == y_min || pos.y == y_max {
                    self.update_bounding_box();
                }
            }
        }
    }

    fn widen_bounding_box(&mut self, pos: Position) {
        self.bounding_box = Some(match self.bounding_box {
            Some((x_min, y_min, x_max, y_max)) => (x_min.min(pos.x), y_min.min(pos.y), x_max.max(pos.x), y_max.max(pos.y)),
            None => (pos.x, pos.y, pos.x, pos.y),
        });
    }

    pub fn add_rectangle(&mut self, rect: Rectangle) {
        for pos in rect.positions() {
            self.cells.insert(pos);
        }
        self.update_bounding_box();
    }

    pub fn remove_rectangle(&mut self, rect: Rectangle) {
        if rect.is_empty() || self.cells.is_empty() {
            return;
        }
        self.cells.retain(|pos| !rect.is_inside(*pos));
        self.update_bounding_box();
    }

    pub fn intersect_rectangle(&mut self, rect: Rectangle) {
        self.cells.retain(|pos| rect.is_inside(*pos));
        self.update_bounding_box();
    }

    /// Combines `rect` into the selection according to `mode`.
    pub fn apply_rectangle(&mut self, rect: Rectangle, mode: SelectionMode) {
        match mode {
            SelectionMode::Replace => {
                self.cells.clear();
                self.add_rectangle(rect);
            }
            SelectionMode::Add => self.add_rectangle(rect),
            SelectionMode::Subtract => self.remove_rectangle(rect),
            SelectionMode::Intersect => self.intersect_rectangle(rect),
        }
    }

    /// Combines another selection into this one according to `mode`.
    pub fn apply_set(&mut self, other: &SelectionSet, mode: SelectionMode) {
        match mode {
            SelectionMode::Replace => self.cells = other.cells.clone(),
            SelectionMode::Add => self.cells.extend(other.cells.iter().copied()),
            SelectionMode::Subtract => self.cells.retain(|pos| !other.cells.contains(pos)),
            SelectionMode::Intersect => self.cells.retain(|pos| other.cells.contains(pos)),
        }
        self.update_bounding_box();
    }

    /// Replaces the set wholesale with the complement inside `size`.
    pub fn invert(&mut self, size: Size) {
        let mut inverted = BTreeSet::new();
        for x in 0..size.width {
            for y in 0..size.height {
                let pos = Position::new(x, y);
                if !self.cells.contains(&pos) {
                    inverted.insert(pos);
                }
            }
        }
        self.cells = inverted;
        self.update_bounding_box();
    }

    /// Replaces the set wholesale, dropping cells outside `size`.
    pub fn replace(&mut self, other: SelectionSet, size: Size) {
        self.cells = other.cells;
        self.clamp_to(size);
    }

    /// Moves every cell by `(dx, dy)`; cells leaving `size` are dropped.
    pub fn translate(&mut self, dx: i32, dy: i32, size: Size) {
        let offset = Position::new(dx, dy);
        self.cells = std::mem::take(&mut self.cells).into_iter().map(|pos| pos + offset).collect();
        self.clamp_to(size);
    }

    /// Drops every cell outside `[0, width) × [0, height)`.
    pub fn clamp_to(&mut self, size: Size) {
        let bounds = Rectangle::from_min_size((0, 0), size);
        self.cells.retain(|pos| bounds.is_inside(*pos));
        self.update_bounding_box();
    }

    fn update_bounding_box(&mut self) {
        // BTreeSet orders by x first, so the x extent is at both ends.
        let (Some(first), Some(last)) = (self.cells.first(), self.cells.last()) else {
            self.bounding_box = None;
            return;
        };
        let (y_min, y_max) = self.cells.iter().fold((i32::MAX, i32::MIN), |(lo, hi), pos| (lo.min(pos.y), hi.max(pos.y)));
        self.bounding_box = Some((first.x, y_min, last.x, y_max));
    }
}

impl FromIterator<Position> for SelectionSet {
    fn from_iter<T: IntoIterator<Item = Position>>(iter: T) -> Self {
        let mut result = SelectionSet {
            cells: iter.into_iter().collect(),
            bounding_box: None,
        };
        result.update_bounding_box();
        result
    }
}

impl Extend<Position> for SelectionSet {
    fn extend<T: IntoIterator<Item = Position>>(&mut self, iter: T) {
        self.cells.extend(iter);
        self.update_bounding_box();
    }
}
