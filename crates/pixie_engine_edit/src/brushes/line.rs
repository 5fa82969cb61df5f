//! Line strokes
//!
//! Bresenham's line algorithm, stamped with a brush footprint at every step.

use pixie_engine::{Position, Rgba};

use super::{BrushShape, DrawTarget, footprint, stamp};

/// All points on the line from p0 to p1, both ends included.
pub fn get_line_points(p0: Position, p1: Position) -> Vec<Position> {
    let dx = (p1.x - p0.x).abs();
    let dy = -(p1.y - p0.y).abs();
    let sx = if p0.x < p1.x { 1 } else { -1 };
    let sy = if p0.y < p1.y { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = p0.x;
    let mut y = p0.y;
    let mut points = Vec::new();

    loop {
        points.push(Position::new(x, y));

        if x == p1.x && y == p1.y {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }

    points
}

/// Cells a brush stroke from p0 to p1 covers, without duplicates.
pub fn line_footprint(p0: Position, p1: Position, size: i32, shape: BrushShape) -> Vec<Position> {
    let mut cells: Vec<Position> = get_line_points(p0, p1).into_iter().flat_map(|origin| footprint(origin, size, shape)).collect();
    cells.sort_unstable();
    cells.dedup();
    cells
}

/// Stamps the brush along the line; returns the number of changed pixels.
pub fn draw_line<T: DrawTarget>(target: &mut T, p0: Position, p1: Position, size: i32, shape: BrushShape, color: Rgba<u8>) -> usize {
    if size <= 1 {
        return get_line_points(p0, p1).into_iter().filter(|pos| target.plot(*pos, color)).count();
    }
    line_footprint(p0, p1, size, shape).into_iter().filter(|pos| target.plot(*pos, color)).count()
}
