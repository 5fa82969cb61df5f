//! Tests for layer and frame operations

use pixie_engine_edit::{BlendMode, CellIndex, Dirty, EditState, EditorError, EngineError, LayerStack, Position, Rectangle, Rgba, SelectionMode, Size, TextureId};
use pretty_assertions::assert_eq;

use super::create_test_state;

// ============================================================================
// Add / Remove Layer Tests
// ============================================================================

#[test]
fn test_add_new_layer_becomes_current() {
    let mut state = create_test_state(20, 10);

    let index = state.add_new_layer(0).unwrap();

    assert_eq!(index, 1);
    assert_eq!(state.layers().layer_count(), 2);
    assert_eq!(state.current_layer(), 1);
    assert_eq!(state.layers().layer(1).unwrap().name(), "Layer 2");
    assert_eq!(state.take_dirty(), Dirty::LAYERS | Dirty::CURRENT_CELL);
}

#[test]
fn test_remove_last_layer_fails() {
    let mut state = create_test_state(20, 10);
    assert_eq!(state.remove_layer(0), Err(EditorError::CannotRemoveLastLayer));
}

#[test]
fn test_remove_invalid_layer_fails() {
    let mut state = create_test_state(20, 10);
    assert_eq!(
        state.remove_layer(5),
        Err(EditorError::Engine(EngineError::InvalidLayer { index: 5, count: 1 }))
    );
}

#[test]
fn test_remove_layer_keeps_current_in_range() {
    let mut state = create_test_state(20, 10);
    state.add_new_layer(0).unwrap();
    state.add_new_layer(1).unwrap();
    assert_eq!(state.current_layer(), 2);

    state.remove_layer(2).unwrap();
    assert_eq!(state.current_layer(), 1);

    state.remove_layer(0).unwrap();
    assert_eq!(state.current_layer(), 0);
    assert_eq!(state.layers().layer_count(), 1);
}

#[test]
fn test_add_new_layer_past_top_is_clamped() {
    let mut state = create_test_state(4, 4);

    assert_eq!(state.add_new_layer(usize::MAX).unwrap(), 1);
    assert_eq!(state.add_new_frame(usize::MAX).unwrap(), 1);
    assert_eq!(state.current_cell(), CellIndex::new(1, 1));
}

#[test]
fn test_current_cell_stays_in_range_for_wrapped_stack() {
    let mut stack = LayerStack::new((4, 4)).unwrap();
    assert_eq!(stack.remove_layer(0).unwrap_err(), EngineError::LastLayer);
    let mut state = EditState::from_layers(stack);

    state.set_current_layer_and_frame(3, 9);

    assert_eq!(state.current_cell(), CellIndex::new(0, 0));
}

// ============================================================================
// Raise / Lower Layer Tests
// ============================================================================

#[test]
fn test_raise_layer_moves_layer_up() {
    let mut state = create_test_state(20, 10);
    state.add_new_layer(0).unwrap();

    state.raise_layer(0).unwrap();

    assert_eq!(state.layers().layer(0).unwrap().name(), "Layer 2");
    assert_eq!(state.layers().layer(1).unwrap().name(), "Layer 1");
    assert_eq!(state.current_layer(), 1);
}

#[test]
fn test_raise_top_layer_fails() {
    let mut state = create_test_state(20, 10);
    state.add_new_layer(0).unwrap();
    assert_eq!(state.raise_layer(1), Err(EditorError::CannotMoveLayer(1)));
}

#[test]
fn test_lower_bottom_layer_fails() {
    let mut state = create_test_state(20, 10);
    assert_eq!(state.lower_layer(0), Err(EditorError::CannotMoveLayer(0)));
}

#[test]
fn test_lower_layer_moves_layer_down() {
    let mut state = create_test_state(20, 10);
    state.add_new_layer(0).unwrap();

    state.lower_layer(1).unwrap();

    assert_eq!(state.layers().layer(0).unwrap().name(), "Layer 2");
    assert_eq!(state.current_layer(), 0);
}

// ============================================================================
// Duplicate Layer Tests
// ============================================================================

#[test]
fn test_duplicate_layer_copies_content() {
    let mut state = create_test_state(4, 4);
    state.draw_pixel(Position::new(1, 2), Rgba([9, 9, 9, 255]));

    let index = state.duplicate_layer(0).unwrap();

    assert_eq!(index, 1);
    let copy = state.layers().layer(1).unwrap();
    assert_eq!(copy.name(), "Layer 1 copy");
    assert_eq!(copy.frame(0).unwrap().pixel(Position::new(1, 2)), Some(Rgba([9, 9, 9, 255])));
    assert!(copy.frame(0).unwrap().needs_upload());
}

// ============================================================================
// Layer Property Tests
// ============================================================================

#[test]
fn test_set_layer_opacity_clamps() {
    let mut state = create_test_state(4, 4);

    state.set_layer_opacity(0, 2.0).unwrap();
    assert_eq!(state.layers().layer(0).unwrap().opacity(), 1.0);
    assert_eq!(state.take_dirty(), Dirty::empty());

    state.set_layer_opacity(0, -1.0).unwrap();
    assert_eq!(state.layers().layer(0).unwrap().opacity(), 0.0);
    assert_eq!(state.take_dirty(), Dirty::LAYERS);
}

#[test]
fn test_set_layer_visibility_marks_layers() {
    let mut state = create_test_state(4, 4);
    state.set_layer_visibility(0, false).unwrap();
    assert!(!state.layers().layer(0).unwrap().is_visible());
    assert_eq!(state.take_dirty(), Dirty::LAYERS);
}

#[test]
fn test_set_layer_blend_mode() {
    let mut state = create_test_state(4, 4);
    state.set_layer_blend_mode(0, BlendMode::Multiply).unwrap();
    assert_eq!(state.layers().layer(0).unwrap().blend_mode(), BlendMode::Multiply);
    assert!(state.set_layer_blend_mode(3, BlendMode::Add).is_err());
}

#[test]
fn test_set_layer_name() {
    let mut state = create_test_state(4, 4);
    state.set_layer_name(0, "Background").unwrap();
    assert_eq!(state.layers().layer(0).unwrap().name(), "Background");
}

// ============================================================================
// Frame Tests
// ============================================================================

#[test]
fn test_add_new_frame_adds_to_every_layer() {
    let mut state = create_test_state(4, 4);
    state.add_new_layer(0).unwrap();

    let index = state.add_new_frame(0).unwrap();

    assert_eq!(index, 1);
    assert_eq!(state.current_frame(), 1);
    for layer in state.layers().layers() {
        assert_eq!(layer.frame_count(), 2);
    }
}

#[test]
fn test_remove_last_frame_fails() {
    let mut state = create_test_state(4, 4);
    assert_eq!(state.remove_frame(0), Err(EditorError::CannotRemoveLastFrame));
    assert!(state.remove_frame(7).is_err());
}

#[test]
fn test_remove_frame_keeps_current_in_range() {
    let mut state = create_test_state(4, 4);
    state.add_new_frame(0).unwrap();
    state.remove_frame(1).unwrap();
    assert_eq!(state.current_frame(), 0);
    assert_eq!(state.layers().frame_count(), 1);
}

#[test]
fn test_duplicate_frame_and_key_frame() {
    let mut state = create_test_state(4, 4);
    state.set_key_frame(CellIndex::new(0, 0), true).unwrap();

    let index = state.duplicate_frame(0).unwrap();

    assert_eq!(index, 1);
    assert!(state.layers().frame(CellIndex::new(0, 1)).unwrap().is_key_frame);
}

// ============================================================================
// Canvas Tests
// ============================================================================

#[test]
fn test_resize_canvas_clamps_selection() {
    let mut state = create_test_state(4, 4);
    assert_eq!(state.selection().len(), 16);

    state.resize_canvas((2, 2)).unwrap();

    assert_eq!(state.size(), Size::new(2, 2));
    assert_eq!(state.selection().len(), 4);
    assert!(state.take_dirty().contains(Dirty::SELECTION | Dirty::LAYERS));
}

#[test]
fn test_grown_canvas_is_drawable() {
    let red = Rgba([255, 0, 0, 255]);
    let mut state = create_test_state(4, 4);

    state.resize_canvas((8, 8)).unwrap();

    assert_eq!(state.selection().len(), 64);
    assert_eq!(state.selection().bounding_box(), Some((0, 0, 7, 7)));
    assert!(state.draw_pixel(Position::new(6, 6), red));
    assert_eq!(state.pixel_at(Position::new(6, 6)), Some(red));
}

#[test]
fn test_resize_canvas_keeps_partial_selection() {
    let mut state = create_test_state(4, 4);
    state.select_rectangle(Rectangle::from(0, 0, 2, 2), SelectionMode::Replace);

    state.resize_canvas((8, 8)).unwrap();

    assert_eq!(state.selection().len(), 4);
    assert!(!state.draw_pixel(Position::new(6, 6), Rgba([255, 0, 0, 255])));
}

#[test]
fn test_mark_uploaded_clears_upload_flag() {
    let mut state = create_test_state(4, 4);
    let cell = state.current_cell();
    assert_eq!(state.layers().frames_needing_upload(), vec![cell]);

    state.mark_uploaded(cell, TextureId(7)).unwrap();

    assert!(state.layers().frames_needing_upload().is_empty());
    assert_eq!(state.layers().frame(cell).unwrap().texture(), Some(TextureId(7)));
}
