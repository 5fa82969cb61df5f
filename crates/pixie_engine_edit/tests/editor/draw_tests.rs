//! Tests for the single raster write path

use pixie_engine_edit::{CellIndex, Dirty, EditState, Position, Rectangle, Rgba, SelectionMode};
use pretty_assertions::assert_eq;

use super::create_test_state;

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

// ============================================================================
// Initial State Tests
// ============================================================================

#[test]
fn test_new_state_selects_everything() {
    let state = EditState::new((4, 3)).unwrap();
    assert_eq!(state.layers().layer_count(), 1);
    assert_eq!(state.layers().frame_count(), 1);
    assert_eq!(state.selection().len(), 12);
    assert_eq!(state.dirty(), Dirty::all());
}

#[test]
fn test_empty_canvas_is_rejected() {
    assert!(EditState::new((0, 5)).is_err());
}

#[test]
fn test_take_dirty_resets() {
    let mut state = EditState::new((4, 4)).unwrap();
    assert_eq!(state.take_dirty(), Dirty::all());
    assert_eq!(state.take_dirty(), Dirty::empty());
}

// ============================================================================
// draw_to_cell Tests
// ============================================================================

#[test]
fn test_draw_pixel_writes_and_invalidates_upload() {
    let mut state = create_test_state(8, 8);
    let cell = state.current_cell();

    assert!(state.draw_pixel(Position::new(2, 3), RED));

    let frame = state.layers().frame(cell).unwrap();
    assert_eq!(state.pixel_at(Position::new(2, 3)), Some(RED));
    assert!(frame.needs_upload());
    assert_eq!(frame.revision(), 1);
    assert_eq!(state.take_dirty(), Dirty::LAYERS);
}

#[test]
fn test_draw_same_color_is_noop() {
    let mut state = create_test_state(8, 8);
    assert!(state.draw_pixel(Position::new(1, 1), RED));
    state.take_dirty();

    assert!(!state.draw_pixel(Position::new(1, 1), RED));
    assert_eq!(state.take_dirty(), Dirty::empty());
}

#[test]
fn test_draw_out_of_bounds_is_ignored() {
    let mut state = create_test_state(8, 8);
    assert!(!state.draw_pixel(Position::new(-1, 0), RED));
    assert!(!state.draw_pixel(Position::new(8, 0), RED));
    assert!(!state.draw_pixel(Position::new(0, 8), RED));
    assert_eq!(state.dirty(), Dirty::empty());
}

#[test]
fn test_draw_on_locked_layer_is_ignored() {
    let mut state = create_test_state(8, 8);
    state.set_layer_locked(0, true).unwrap();
    assert!(!state.draw_pixel(Position::new(1, 1), RED));
    assert_eq!(state.pixel_at(Position::new(1, 1)), Some(Rgba([0, 0, 0, 0])));
}

#[test]
fn test_draw_respects_selection() {
    let mut state = create_test_state(8, 8);
    state.select_rectangle(Rectangle::from(0, 0, 2, 2), SelectionMode::Replace);

    assert!(state.draw_pixel(Position::new(1, 1), RED));
    assert!(!state.draw_pixel(Position::new(3, 3), RED));
}

#[test]
fn test_draw_without_selection_is_unrestricted() {
    let mut state = create_test_state(8, 8);
    state.clear_selection();
    assert!(state.draw_pixel(Position::new(7, 7), RED));
}

#[test]
fn test_draw_to_other_cell() {
    let mut state = create_test_state(4, 4);
    state.add_new_frame(0).unwrap();
    state.set_current_layer_and_frame(0, 0);

    assert!(state.draw_to_cell(CellIndex::new(0, 1), Position::new(0, 0), RED));
    assert_eq!(state.pixel_at(Position::new(0, 0)), Some(Rgba([0, 0, 0, 0])));
    assert_eq!(state.layers().frame(CellIndex::new(0, 1)).unwrap().pixel(Position::new(0, 0)), Some(RED));
}

#[test]
fn test_draw_to_invalid_cell() {
    let mut state = create_test_state(4, 4);
    assert!(!state.draw_to_cell(CellIndex::new(3, 0), Position::new(0, 0), RED));
    assert!(!state.draw_to_cell(CellIndex::new(0, 3), Position::new(0, 0), RED));
}

// ============================================================================
// Current Cell Tests
// ============================================================================

#[test]
fn test_set_current_layer_and_frame_clamps() {
    let mut state = create_test_state(4, 4);
    state.add_new_layer(0).unwrap();
    state.take_dirty();

    state.set_current_layer_and_frame(5, 5);
    assert_eq!(state.current_cell(), CellIndex::new(1, 0));

    state.set_current_layer_and_frame(0, 0);
    assert_eq!(state.take_dirty(), Dirty::CURRENT_CELL);

    state.set_current_layer_and_frame(0, 0);
    assert_eq!(state.take_dirty(), Dirty::empty());
}

#[test]
fn test_brush_size_is_clamped() {
    let mut state = create_test_state(4, 4);
    state.set_brush_size(0);
    assert_eq!(state.brush_size(), 1);
    state.set_brush_size(1000);
    assert_eq!(state.brush_size(), pixie_engine_edit::MAX_BRUSH_SIZE);
}

#[test]
fn test_swap_colors() {
    let mut state = create_test_state(4, 4);
    state.set_primary_color(RED);
    state.set_secondary_color(Rgba([0, 0, 255, 255]));
    state.swap_colors();
    assert_eq!(state.primary_color(), Rgba([0, 0, 255, 255]));
    assert_eq!(state.secondary_color(), RED);
}
