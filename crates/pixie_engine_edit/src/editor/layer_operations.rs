#![allow(clippy::missing_errors_doc)]
use pixie_engine::{BlendMode, CellIndex, Dirty, SelectionSet, Size, TextureId};

use super::{EditState, EditorError, Result};

impl EditState {
    /// Adds an empty layer above `layer` and makes it current.
    pub fn add_new_layer(&mut self, layer: usize) -> Result<usize> {
        let name = format!("Layer {}", self.layers.layer_count() + 1);
        let index = self.layers.insert_layer(layer.saturating_add(1), name);
        self.current_layer = index;
        self.mark_dirty(Dirty::LAYERS | Dirty::CURRENT_CELL);
        Ok(index)
    }

    pub fn remove_layer(&mut self, layer: usize) -> Result<()> {
        self.layers.layer(layer)?;
        if self.layers.layer_count() == 1 {
            return Err(EditorError::CannotRemoveLastLayer);
        }
        let removed = self.layers.remove_layer(layer)?;
        log::debug!("removed layer '{}'", removed.name());
        if self.current_layer >= self.layers.layer_count() || self.current_layer > layer {
            self.current_layer = self.current_layer.saturating_sub(1);
        }
        self.mark_dirty(Dirty::LAYERS | Dirty::CURRENT_CELL);
        Ok(())
    }

    pub fn duplicate_layer(&mut self, layer: usize) -> Result<usize> {
        let name = format!("{} copy", self.layers.layer(layer)?.name());
        let index = self.layers.duplicate_layer(layer, name)?;
        self.current_layer = index;
        self.mark_dirty(Dirty::LAYERS | Dirty::CURRENT_CELL);
        Ok(index)
    }

    /// Moves `layer` one step up; the current layer follows it.
    pub fn raise_layer(&mut self, layer: usize) -> Result<()> {
        self.layers.layer(layer)?;
        if layer + 1 >= self.layers.layer_count() {
            return Err(EditorError::CannotMoveLayer(layer));
        }
        self.layers.swap_layers(layer, layer + 1)?;
        self.current_layer = layer + 1;
        self.mark_dirty(Dirty::LAYERS | Dirty::CURRENT_CELL);
        Ok(())
    }

    pub fn lower_layer(&mut self, layer: usize) -> Result<()> {
        self.layers.layer(layer)?;
        if layer == 0 {
            return Err(EditorError::CannotMoveLayer(layer));
        }
        self.layers.swap_layers(layer, layer - 1)?;
        self.current_layer = layer - 1;
        self.mark_dirty(Dirty::LAYERS | Dirty::CURRENT_CELL);
        Ok(())
    }

    pub fn set_layer_name(&mut self, layer: usize, name: impl Into<String>) -> Result<()> {
        self.layers.layer_mut(layer)?.set_name(name);
        Ok(())
    }

    pub fn set_layer_visibility(&mut self, layer: usize, is_visible: bool) -> Result<()> {
        let target = self.layers.layer_mut(layer)?;
        if target.is_visible() != is_visible {
            target.set_is_visible(is_visible);
            self.mark_dirty(Dirty::LAYERS);
        }
        Ok(())
    }

    pub fn set_layer_locked(&mut self, layer: usize, is_locked: bool) -> Result<()> {
        self.layers.layer_mut(layer)?.set_is_locked(is_locked);
        Ok(())
    }

    /// Opacity is clamped to `[0, 1]`.
    pub fn set_layer_opacity(&mut self, layer: usize, opacity: f32) -> Result<()> {
        let target = self.layers.layer_mut(layer)?;
        let old = target.opacity();
        target.set_opacity(opacity);
        if target.opacity() != old {
            self.mark_dirty(Dirty::LAYERS);
        }
        Ok(())
    }

    pub fn set_layer_blend_mode(&mut self, layer: usize, blend_mode: BlendMode) -> Result<()> {
        let target = self.layers.layer_mut(layer)?;
        if target.blend_mode() != blend_mode {
            target.set_blend_mode(blend_mode);
            self.mark_dirty(Dirty::LAYERS);
        }
        Ok(())
    }

    /// Inserts an empty frame after `frame` in every layer and makes it current.
    pub fn add_new_frame(&mut self, frame: usize) -> Result<usize> {
        let index = self.layers.insert_frame(frame.saturating_add(1));
        self.current_frame = index;
        self.mark_dirty(Dirty::LAYERS | Dirty::CURRENT_CELL | Dirty::ONION_SKIN);
        Ok(index)
    }

    pub fn remove_frame(&mut self, frame: usize) -> Result<()> {
        if frame < self.layers.frame_count() && self.layers.frame_count() == 1 {
            return Err(EditorError::CannotRemoveLastFrame);
        }
        self.layers.remove_frame(frame)?;
        if self.current_frame >= self.layers.frame_count() || self.current_frame > frame {
            self.current_frame = self.current_frame.saturating_sub(1);
        }
        self.mark_dirty(Dirty::LAYERS | Dirty::CURRENT_CELL | Dirty::ONION_SKIN);
        Ok(())
    }

    pub fn duplicate_frame(&mut self, frame: usize) -> Result<usize> {
        let index = self.layers.duplicate_frame(frame)?;
        self.current_frame = index;
        self.mark_dirty(Dirty::LAYERS | Dirty::CURRENT_CELL | Dirty::ONION_SKIN);
        Ok(index)
    }

    pub fn set_key_frame(&mut self, cell: CellIndex, is_key_frame: bool) -> Result<()> {
        self.layers.frame_mut(cell)?.is_key_frame = is_key_frame;
        Ok(())
    }

    /// Crops or extends the canvas at the top-left corner.
    ///
    /// The selection is replaced: a selection that covered the whole old
    /// canvas covers the whole new one, any other selection is clamped.
    pub fn resize_canvas(&mut self, size: impl Into<Size>) -> Result<()> {
        let size = size.into();
        let old_size = self.layers.size();
        self.layers.resize(size)?;
        // Selections never hold cells outside the canvas.
        let covered_canvas = self.selection.len() == old_size.width as usize * old_size.height as usize;
        if covered_canvas {
            self.selection = SelectionSet::all(size);
        } else {
            self.selection.clamp_to(size);
        }
        self.mark_dirty(Dirty::LAYERS | Dirty::SELECTION | Dirty::TRANSFORM);
        Ok(())
    }

    /// Records the texture the rasterizer created for a cell.
    pub fn mark_uploaded(&mut self, cell: CellIndex, texture: TextureId) -> Result<()> {
        self.layers.mark_uploaded(cell, texture)?;
        self.mark_dirty(Dirty::LAYERS);
        Ok(())
    }
}
