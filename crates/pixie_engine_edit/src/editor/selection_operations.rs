use pixie_engine::{Dirty, Position, Rectangle, Rgba, SelectionMode, SelectionSet};

use super::EditState;

impl EditState {
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn is_selected(&self, pos: Position) -> bool {
        self.selection.is_selected(pos)
    }

    /// Replaces the selection; cells outside the canvas are dropped.
    pub fn set_selection(&mut self, selection: SelectionSet) {
        let size = self.layers.size();
        let mut selection = selection;
        selection.clamp_to(size);
        if selection != self.selection {
            self.selection = selection;
            self.mark_dirty(Dirty::SELECTION);
        }
    }

    pub fn select_all(&mut self) {
        let all = SelectionSet::all(self.layers.size());
        self.set_selection(all);
    }

    pub fn clear_selection(&mut self) {
        if !self.selection.is_empty() {
            self.selection.clear();
            self.mark_dirty(Dirty::SELECTION);
        }
    }

    pub fn invert_selection(&mut self) {
        self.selection.invert(self.layers.size());
        self.mark_dirty(Dirty::SELECTION);
    }

    pub fn select_rectangle(&mut self, rect: Rectangle, mode: SelectionMode) {
        let rect = rect.intersect(&Rectangle::from_min_size((0, 0), self.layers.size()));
        let mut selection = self.selection.clone();
        selection.apply_rectangle(rect, mode);
        self.set_selection(selection);
    }

    /// Selects every pixel of the current cell with exactly `color`.
    pub fn select_color(&mut self, color: Rgba<u8>, mode: SelectionMode) {
        let Ok(frame) = self.layers.frame(self.current_cell()) else {
            return;
        };
        let matching: SelectionSet = frame
            .image()
            .enumerate_pixels()
            .filter(|(_, _, pixel)| **pixel == color)
            .map(|(x, y, _)| Position::new(x as i32, y as i32))
            .collect();
        let mut selection = self.selection.clone();
        selection.apply_set(&matching, mode);
        self.set_selection(selection);
    }

    /// Moves the selection (not the pixels) by the given offset.
    pub fn translate_selection(&mut self, dx: i32, dy: i32) {
        if dx == 0 && dy == 0 {
            return;
        }
        self.selection.translate(dx, dy, self.layers.size());
        self.mark_dirty(Dirty::SELECTION);
    }
}
