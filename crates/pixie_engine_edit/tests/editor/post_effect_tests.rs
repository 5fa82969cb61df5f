//! Tests for committing color and flip post-effects

use pixie_engine_edit::{CellIndex, ColorOffset, Dirty, EditState, Flip, Position, PostEffectScope, PostEffects, Rectangle, Rgba, SelectionMode};
use pretty_assertions::assert_eq;

use super::create_test_state;

const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);
const RED_OFFSET: Rgba<u8> = Rgba([255, 0, 0, 0]);

fn red_shift() -> ColorOffset {
    ColorOffset { r: 1.0, ..Default::default() }
}

/// 2 layers × 2 frames, current cell (0, 0)
fn create_grid_state() -> EditState {
    let mut state = create_test_state(3, 3);
    state.add_new_layer(0).unwrap();
    state.add_new_frame(0).unwrap();
    state.set_current_layer_and_frame(0, 0);
    state.take_dirty();
    state
}

fn pixel(state: &EditState, layer: usize, frame: usize, pos: Position) -> Rgba<u8> {
    state.layers().frame(CellIndex::new(layer, frame)).unwrap().pixel(pos).unwrap()
}

#[test]
fn test_set_color_offset_marks_post_effect() {
    let mut state = create_grid_state();
    state.set_color_offset(PostEffectScope::CurrentLayer, red_shift());
    assert_eq!(state.take_dirty(), Dirty::POST_EFFECT);
    assert_eq!(state.post_effects().color_scope, PostEffectScope::CurrentLayer);

    state.set_color_offset(PostEffectScope::CurrentLayer, red_shift());
    assert_eq!(state.take_dirty(), Dirty::empty());
}

#[test]
fn test_identity_commit_touches_nothing() {
    let mut state = create_grid_state();
    assert_eq!(state.commit_post_effects(), Ok(0));
    assert_eq!(state.dirty(), Dirty::empty());
}

#[test]
fn test_commit_everywhere() {
    let mut state = create_grid_state();
    state.set_color_offset(PostEffectScope::Everywhere, red_shift());

    assert_eq!(state.commit_post_effects(), Ok(4));

    for layer in 0..2 {
        for frame in 0..2 {
            assert_eq!(pixel(&state, layer, frame, Position::new(2, 2)), RED_OFFSET);
        }
    }
    assert_eq!(*state.post_effects(), PostEffects {
        color_scope: PostEffectScope::Everywhere,
        ..Default::default()
    });
    assert!(state.take_dirty().contains(Dirty::LAYERS | Dirty::POST_EFFECT));
}

#[test]
fn test_commit_current_frame_is_exact() {
    let mut state = create_grid_state();
    state.set_color_offset(PostEffectScope::CurrentFrame, red_shift());

    assert_eq!(state.commit_post_effects(), Ok(2));

    assert_eq!(pixel(&state, 0, 0, Position::new(0, 0)), RED_OFFSET);
    assert_eq!(pixel(&state, 1, 0, Position::new(0, 0)), RED_OFFSET);
    assert_eq!(pixel(&state, 0, 1, Position::new(0, 0)), CLEAR);
    assert_eq!(pixel(&state, 1, 1, Position::new(0, 0)), CLEAR);
}

#[test]
fn test_commit_current_layer() {
    let mut state = create_grid_state();
    state.set_color_offset(PostEffectScope::CurrentLayer, red_shift());

    assert_eq!(state.commit_post_effects(), Ok(2));

    assert_eq!(pixel(&state, 0, 1, Position::new(0, 0)), RED_OFFSET);
    assert_eq!(pixel(&state, 1, 0, Position::new(0, 0)), CLEAR);
}

#[test]
fn test_commit_current_cell() {
    let mut state = create_grid_state();
    state.set_color_offset(PostEffectScope::CurrentCell, red_shift());

    assert_eq!(state.commit_post_effects(), Ok(1));
    assert_eq!(pixel(&state, 0, 0, Position::new(1, 1)), RED_OFFSET);
    assert_eq!(pixel(&state, 0, 1, Position::new(1, 1)), CLEAR);
}

#[test]
fn test_commit_selection_only_touches_selected_pixels() {
    let mut state = create_grid_state();
    state.select_rectangle(Rectangle::from(0, 0, 2, 1), SelectionMode::Replace);
    state.set_color_offset(PostEffectScope::Selection, red_shift());

    assert_eq!(state.commit_post_effects(), Ok(1));

    assert_eq!(pixel(&state, 0, 0, Position::new(0, 0)), RED_OFFSET);
    assert_eq!(pixel(&state, 0, 0, Position::new(1, 0)), RED_OFFSET);
    assert_eq!(pixel(&state, 0, 0, Position::new(2, 0)), CLEAR);
    assert_eq!(pixel(&state, 0, 0, Position::new(0, 1)), CLEAR);
}

#[test]
fn test_commit_skips_locked_layers() {
    let mut state = create_grid_state();
    state.set_layer_locked(1, true).unwrap();
    state.set_color_offset(PostEffectScope::Everywhere, red_shift());

    assert_eq!(state.commit_post_effects(), Ok(2));
    assert_eq!(pixel(&state, 1, 0, Position::new(0, 0)), CLEAR);
}

#[test]
fn test_commit_flip_whole_cell() {
    let mut state = create_test_state(4, 1);
    let red = Rgba([255, 0, 0, 255]);
    state.draw_pixel(Position::new(0, 0), red);
    state.set_flip(PostEffectScope::Everywhere, Flip { horizontal: true, vertical: false });

    assert_eq!(state.commit_post_effects(), Ok(1));

    assert_eq!(state.pixel_at(Position::new(0, 0)), Some(CLEAR));
    assert_eq!(state.pixel_at(Position::new(3, 0)), Some(red));
    assert!(state.post_effects().flip.is_identity());
}

#[test]
fn test_commit_flip_within_selection() {
    let mut state = create_test_state(4, 1);
    let red = Rgba([255, 0, 0, 255]);
    let blue = Rgba([0, 0, 255, 255]);
    state.draw_pixel(Position::new(0, 0), red);
    state.draw_pixel(Position::new(3, 0), blue);
    state.select_rectangle(Rectangle::from(0, 0, 2, 1), SelectionMode::Replace);
    state.set_flip(PostEffectScope::Selection, Flip { horizontal: true, vertical: false });

    state.commit_post_effects().unwrap();

    assert_eq!(state.pixel_at(Position::new(0, 0)), Some(CLEAR));
    assert_eq!(state.pixel_at(Position::new(1, 0)), Some(red));
    assert_eq!(state.pixel_at(Position::new(3, 0)), Some(blue));
}
