//! Selection boundary extraction for marching-ants rendering.
//!
//! The outline is described by directed edges in corner space: the corner
//! `(x, y)` is the top-left corner of cell `(x, y)`. Edges are grouped by
//! their sweep direction and the lists are never merged, because the
//! renderer picks the dash direction from the list an edge belongs to.
//!
//! Winding is clockwise in y-down space: top sides run left to right, right
//! sides top to bottom, bottom sides right to left and left sides bottom to
//! top. One edge is emitted per maximal run of exposed cells, never one per
//! cell, so a filled square always yields four edges.

use crate::{Position, SelectionSet};

/// One directed, axis-aligned boundary segment between two grid corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutlineEdge {
    pub start: Position,
    pub end: Position,
}

impl OutlineEdge {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Length in pixel units along the edge's axis.
    pub fn len(&self) -> i32 {
        (self.end.x - self.start.x).abs() + (self.end.y - self.start.y).abs()
    }

    pub fn is_horizontal(&self) -> bool {
        self.start.y == self.end.y
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeDirection {
    LeftToRight,
    RightToLeft,
    BottomToTop,
    TopToBottom,
}

impl EdgeDirection {
    pub const ALL: [EdgeDirection; 4] = [
        EdgeDirection::LeftToRight,
        EdgeDirection::RightToLeft,
        EdgeDirection::BottomToTop,
        EdgeDirection::TopToBottom,
    ];

    /// Unit step of the dash animation along this direction, y pointing down.
    pub fn step(self) -> (i32, i32) {
        match self {
            EdgeDirection::LeftToRight => (1, 0),
            EdgeDirection::RightToLeft => (-1, 0),
            EdgeDirection::BottomToTop => (0, -1),
            EdgeDirection::TopToBottom => (0, 1),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineEdgeSet {
    pub left_to_right: Vec<OutlineEdge>,
    pub right_to_left: Vec<OutlineEdge>,
    pub bottom_to_top: Vec<OutlineEdge>,
    pub top_to_bottom: Vec<OutlineEdge>,
}

impl OutlineEdgeSet {
    /// Extracts the outline of `selection`.
    ///
    /// Cost is proportional to the area of the selection's bounding box.
    pub fn from_selection(selection: &SelectionSet) -> Self {
        let mut result = OutlineEdgeSet::default();
        let Some((x_min, y_min, x_max, y_max)) = selection.bounding_box() else {
            return result;
        };

        // Row sweep: horizontal edges above and below each exposed run.
        for y in y_min..=y_max {
            for (x1, x2) in runs(x_min..=x_max, |x| {
                selection.is_selected((x, y)) && !selection.is_selected((x, y - 1))
            }) {
                result.left_to_right.push(OutlineEdge::new(Position::new(x1, y), Position::new(x2 + 1, y)));
            }
            for (x1, x2) in runs(x_min..=x_max, |x| {
                selection.is_selected((x, y)) && !selection.is_selected((x, y + 1))
            }) {
                result
                    .right_to_left
                    .push(OutlineEdge::new(Position::new(x2 + 1, y + 1), Position::new(x1, y + 1)));
            }
        }

        // Column sweep: vertical edges left and right of each exposed run.
        for x in x_min..=x_max {
            for (y1, y2) in runs(y_min..=y_max, |y| {
                selection.is_selected((x, y)) && !selection.is_selected((x - 1, y))
            }) {
                result.bottom_to_top.push(OutlineEdge::new(Position::new(x, y2 + 1), Position::new(x, y1)));
            }
            for (y1, y2) in runs(y_min..=y_max, |y| {
                selection.is_selected((x, y)) && !selection.is_selected((x + 1, y))
            }) {
                result
                    .top_to_bottom
                    .push(OutlineEdge::new(Position::new(x + 1, y1), Position::new(x + 1, y2 + 1)));
            }
        }

        result
    }

    pub fn edges(&self, direction: EdgeDirection) -> &[OutlineEdge] {
        match direction {
            EdgeDirection::LeftToRight => &self.left_to_right,
            EdgeDirection::RightToLeft => &self.right_to_left,
            EdgeDirection::BottomToTop => &self.bottom_to_top,
            EdgeDirection::TopToBottom => &self.top_to_bottom,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (EdgeDirection, &OutlineEdge)> {
        EdgeDirection::ALL
            .into_iter()
            .flat_map(move |direction| self.edges(direction).iter().map(move |edge| (direction, edge)))
    }

    pub fn edge_count(&self) -> usize {
        self.left_to_right.len() + self.right_to_left.len() + self.bottom_to_top.len() + self.top_to_bottom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edge_count() == 0
    }

    /// Signed crossing count of a ray cast from the center of `pos` towards +x.
    ///
    /// Right sides count +1 and left sides -1, so a cell enclosed by the
    /// outline has winding 1 and every other cell has winding 0.
    pub fn winding_at(&self, pos: Position) -> i32 {
        let covers = |edge: &OutlineEdge| {
            let (lo, hi) = if edge.start.y < edge.end.y {
                (edge.start.y, edge.end.y)
            } else {
                (edge.end.y, edge.start.y)
            };
            edge.start.x > pos.x && lo <= pos.y && pos.y < hi
        };
        let down = self.top_to_bottom.iter().filter(|e| covers(e)).count() as i32;
        let up = self.bottom_to_top.iter().filter(|e| covers(e)).count() as i32;
        down - up
    }
}

/// Run-length encodes the maximal inclusive spans of `range` where `hit` holds.
fn runs(range: std::ops::RangeInclusive<i32>, hit: impl Fn(i32) -> bool) -> Vec<(i32, i32)> {
    let mut result = Vec::new();
    let mut run_start = None;
    let end = *range.end();
    for i in range {
        match (hit(i), run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                result.push((start, i - 1));
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        result.push((start, end));
    }
    result
}
