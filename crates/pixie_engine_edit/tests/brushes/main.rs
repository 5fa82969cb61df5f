//! Tests for brush footprints and line strokes

use pixie_engine_edit::{
    CellIndex, EditState, Position, Rgba,
    brushes::{BrushShape, CellTarget, DrawTarget, footprint, line, stamp},
};
use pretty_assertions::assert_eq;

/// Records plotted points
#[derive(Default)]
struct RecordingTarget {
    points: Vec<Position>,
}

impl DrawTarget for RecordingTarget {
    fn plot(&mut self, pos: Position, _color: Rgba<u8>) -> bool {
        if self.points.contains(&pos) {
            return false;
        }
        self.points.push(pos);
        true
    }
}

#[test]
fn test_square_footprint() {
    let cells = footprint(Position::new(2, 2), 3, BrushShape::Square);
    assert_eq!(cells.len(), 9);
    assert_eq!(cells.first(), Some(&Position::new(2, 2)));
    assert_eq!(cells.last(), Some(&Position::new(4, 4)));
}

#[test]
fn test_size_one_footprint_is_origin() {
    for shape in [BrushShape::Square, BrushShape::Circle] {
        assert_eq!(footprint(Position::new(5, 1), 1, shape), vec![Position::new(5, 1)]);
        assert_eq!(footprint(Position::new(5, 1), 0, shape), vec![Position::new(5, 1)]);
    }
}

#[test]
fn test_circle_footprint_drops_corners() {
    let cells = footprint(Position::new(0, 0), 4, BrushShape::Circle);
    assert_eq!(cells.len(), 12);
    assert!(!cells.contains(&Position::new(0, 0)));
    assert!(!cells.contains(&Position::new(3, 3)));
    assert!(cells.contains(&Position::new(1, 1)));
}

#[test]
fn test_stamp_counts_changed_pixels() {
    let mut target = RecordingTarget::default();
    assert_eq!(stamp(&mut target, Position::new(0, 0), 2, BrushShape::Square, Rgba([1, 2, 3, 4])), 4);
    assert_eq!(stamp(&mut target, Position::new(1, 0), 2, BrushShape::Square, Rgba([1, 2, 3, 4])), 2);
}

#[test]
fn test_thick_line_has_no_duplicates() {
    let cells = line::line_footprint(Position::new(0, 0), Position::new(3, 0), 2, BrushShape::Square);
    assert_eq!(cells.len(), 10);

    let mut target = RecordingTarget::default();
    let drawn = line::draw_line(&mut target, Position::new(0, 0), Position::new(3, 0), 2, BrushShape::Square, Rgba([0, 0, 0, 255]));
    assert_eq!(drawn, 10);
}

#[test]
fn test_diagonal_line() {
    let points = line::get_line_points(Position::new(0, 0), Position::new(3, 3));
    assert_eq!(
        points,
        vec![Position::new(0, 0), Position::new(1, 1), Position::new(2, 2), Position::new(3, 3)]
    );
}

#[test]
fn test_reversed_line_covers_same_cells() {
    let mut forward = line::get_line_points(Position::new(0, 0), Position::new(6, 2));
    let mut backward = line::get_line_points(Position::new(6, 2), Position::new(0, 0));
    forward.sort();
    backward.sort();
    assert_eq!(forward.len(), backward.len());
    assert_eq!(forward.first(), backward.first());
    assert_eq!(forward.last(), backward.last());
}

#[test]
fn test_cell_target_draws_outside_current_cell() {
    let mut state = EditState::new((4, 4)).unwrap();
    state.add_new_frame(0).unwrap();
    state.set_current_layer_and_frame(0, 0);
    let color = Rgba([9, 9, 9, 255]);

    let mut target = CellTarget {
        state: &mut state,
        cell: CellIndex::new(0, 1),
    };
    assert_eq!(stamp(&mut target, Position::new(1, 1), 2, BrushShape::Square, color), 4);

    assert_eq!(state.pixel_at(Position::new(1, 1)), Some(Rgba([0, 0, 0, 0])));
    state.set_current_layer_and_frame(0, 1);
    assert_eq!(state.pixel_at(Position::new(2, 2)), Some(color));
}
