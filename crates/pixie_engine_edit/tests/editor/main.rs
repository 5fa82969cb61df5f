//! Tests for editor operations
//!
//! Every operation is checked for its effect on the project and for the
//! stale caches it reports through `take_dirty`.

mod draw_tests;
mod layer_operations_tests;
mod post_effect_tests;
mod selection_operations_tests;

use pixie_engine_edit::EditState;

/// Helper to create an EditState with a given size, dirty flags consumed
pub fn create_test_state(width: i32, height: i32) -> EditState {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut state = EditState::new((width, height)).unwrap();
    state.take_dirty();
    state
}
