//! Tests for selection operations

use pixie_engine_edit::{Dirty, Position, Rectangle, Rgba, SelectionMode, SelectionSet};
use pretty_assertions::assert_eq;

use super::create_test_state;

#[test]
fn test_select_all_then_invert_is_empty() {
    let mut state = create_test_state(6, 5);
    state.clear_selection();
    state.select_all();
    assert_eq!(state.selection().len(), 30);

    state.invert_selection();

    assert!(state.selection().is_empty());
    assert!(state.dirty().contains(Dirty::SELECTION));
}

#[test]
fn test_select_all_when_already_selected_is_clean() {
    let mut state = create_test_state(6, 5);
    state.select_all();
    assert_eq!(state.take_dirty(), Dirty::empty());
}

#[test]
fn test_select_rectangle_modes() {
    let mut state = create_test_state(10, 10);
    state.select_rectangle(Rectangle::from(0, 0, 4, 4), SelectionMode::Replace);
    assert_eq!(state.selection().len(), 16);

    state.select_rectangle(Rectangle::from(2, 2, 4, 4), SelectionMode::Add);
    assert_eq!(state.selection().len(), 28);

    state.select_rectangle(Rectangle::from(0, 0, 2, 2), SelectionMode::Subtract);
    assert_eq!(state.selection().len(), 24);

    state.select_rectangle(Rectangle::from(2, 2, 2, 2), SelectionMode::Intersect);
    assert_eq!(state.selection().len(), 4);
    assert_eq!(state.selection().bounding_box(), Some((2, 2, 3, 3)));
}

#[test]
fn test_select_rectangle_is_clipped_to_canvas() {
    let mut state = create_test_state(4, 4);
    state.select_rectangle(Rectangle::from(2, 2, 10, 10), SelectionMode::Replace);
    assert_eq!(state.selection().len(), 4);
}

#[test]
fn test_set_selection_drops_outside_cells() {
    let mut state = create_test_state(4, 4);
    let selection: SelectionSet = [Position::new(1, 1), Position::new(-1, 0), Position::new(4, 4)].into_iter().collect();

    state.set_selection(selection);

    assert_eq!(state.selection().iter().collect::<Vec<_>>(), vec![Position::new(1, 1)]);
    assert_eq!(state.take_dirty(), Dirty::SELECTION);
}

#[test]
fn test_select_color() {
    let mut state = create_test_state(4, 4);
    let red = Rgba([255, 0, 0, 255]);
    state.draw_pixel(Position::new(1, 1), red);
    state.draw_pixel(Position::new(2, 3), red);

    state.select_color(red, SelectionMode::Replace);
    assert_eq!(state.selection().iter().collect::<Vec<_>>(), vec![Position::new(1, 1), Position::new(2, 3)]);

    state.select_color(Rgba([0, 0, 0, 0]), SelectionMode::Add);
    assert_eq!(state.selection().len(), 16);
}

#[test]
fn test_translate_selection_drops_cells() {
    let mut state = create_test_state(4, 4);
    state.select_rectangle(Rectangle::from(0, 0, 2, 2), SelectionMode::Replace);
    state.take_dirty();

    state.translate_selection(3, 0);

    assert_eq!(state.selection().len(), 2);
    assert!(state.is_selected(Position::new(3, 1)));
    assert_eq!(state.take_dirty(), Dirty::SELECTION);

    state.translate_selection(0, 0);
    assert_eq!(state.take_dirty(), Dirty::empty());
}
