use pixie_engine::{CellIndex, ColorOffset, Dirty, Flip, LayerStack, Position, PostEffectScope, Rgba, SelectionSet, Size};

mod editor_error;
pub use editor_error::*;

mod layer_operations;
mod post_effect_operations;
mod selection_operations;

pub use post_effect_operations::{bake_color_offset, bake_flip};

/// Largest brush footprint, in pixels per side.
pub const MAX_BRUSH_SIZE: i32 = 64;

/// Global color/flip post-effects with their scopes.
///
/// The compositor previews them; [`EditState::commit_post_effects`] bakes them.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PostEffects {
    pub color_offset: ColorOffset,
    pub color_scope: PostEffectScope,
    pub flip: Flip,
    pub flip_scope: PostEffectScope,
}

impl PostEffects {
    pub fn is_identity(&self) -> bool {
        self.color_offset.is_identity() && self.flip.is_identity()
    }
}

/// The project context every edit goes through.
///
/// Owns the layer stack and the selection set. All raster writes funnel
/// through [`EditState::draw_to_cell`]. Every mutation records which derived
/// caches went stale; the canvas collects them with [`EditState::take_dirty`].
#[derive(Debug, Clone)]
pub struct EditState {
    layers: LayerStack,
    selection: SelectionSet,

    current_layer: usize,
    current_frame: usize,

    primary_color: Rgba<u8>,
    secondary_color: Rgba<u8>,
    brush_size: i32,

    post_effects: PostEffects,

    dirty: Dirty,
}

impl EditState {
    pub fn new(size: impl Into<Size>) -> Result<Self> {
        Ok(Self::from_layers(LayerStack::new(size)?))
    }

    /// Wraps an existing stack; the selection starts out covering the canvas.
    pub fn from_layers(layers: LayerStack) -> Self {
        let selection = SelectionSet::all(layers.size());
        Self {
            layers,
            selection,
            current_layer: 0,
            current_frame: 0,
            primary_color: Rgba([0, 0, 0, 255]),
            secondary_color: Rgba([255, 255, 255, 255]),
            brush_size: 1,
            post_effects: PostEffects::default(),
            dirty: Dirty::all(),
        }
    }

    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    pub fn size(&self) -> Size {
        self.layers.size()
    }

    pub fn current_layer(&self) -> usize {
        self.current_layer
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn current_cell(&self) -> CellIndex {
        CellIndex::new(self.current_layer, self.current_frame)
    }

    /// Selects the cell edits go to. Out of range indices are clamped.
    pub fn set_current_layer_and_frame(&mut self, layer: usize, frame: usize) {
        let layer = self.clamp_layer(layer);
        let frame = self.clamp_frame(frame);
        if layer == self.current_layer && frame == self.current_frame {
            return;
        }
        self.current_layer = layer;
        self.current_frame = frame;
        self.mark_dirty(Dirty::CURRENT_CELL);
    }

    pub fn primary_color(&self) -> Rgba<u8> {
        self.primary_color
    }

    pub fn set_primary_color(&mut self, color: Rgba<u8>) {
        self.primary_color = color;
    }

    pub fn secondary_color(&self) -> Rgba<u8> {
        self.secondary_color
    }

    pub fn set_secondary_color(&mut self, color: Rgba<u8>) {
        self.secondary_color = color;
    }

    pub fn swap_colors(&mut self) {
        std::mem::swap(&mut self.primary_color, &mut self.secondary_color);
    }

    pub fn brush_size(&self) -> i32 {
        self.brush_size
    }

    pub fn set_brush_size(&mut self, size: i32) {
        let size = size.clamp(1, MAX_BRUSH_SIZE);
        if size != self.brush_size {
            self.brush_size = size;
            self.mark_dirty(Dirty::OVERLAY);
        }
    }

    pub fn post_effects(&self) -> &PostEffects {
        &self.post_effects
    }

    /// Color of `pos` in the current cell.
    pub fn pixel_at(&self, pos: Position) -> Option<Rgba<u8>> {
        self.layers.frame(self.current_cell()).ok()?.pixel(pos)
    }

    /// Writes one pixel; the only raster write path of the editor.
    ///
    /// Returns `false` without touching anything when the layer is locked,
    /// the position lies outside the canvas, a selection exists that does
    /// not contain the pixel, or the pixel already has the requested color.
    pub fn draw_to_cell(&mut self, cell: CellIndex, pos: Position, color: Rgba<u8>) -> bool {
        let size = self.layers.size();
        if pos.x < 0 || pos.y < 0 || pos.x >= size.width || pos.y >= size.height {
            return false;
        }
        if !self.selection.is_empty() && !self.selection.is_selected(pos) {
            return false;
        }
        let Ok(layer) = self.layers.layer_mut(cell.layer) else {
            log::warn!("draw to invalid layer {}", cell.layer);
            return false;
        };
        if layer.is_locked() {
            return false;
        }
        let Some(frame) = layer.frame_mut(cell.frame) else {
            log::warn!("draw to invalid frame {}", cell.frame);
            return false;
        };
        if frame.pixel(pos) == Some(color) {
            return false;
        }
        frame.image_mut().put_pixel(pos.x as u32, pos.y as u32, color);
        self.mark_dirty(Dirty::LAYERS);
        true
    }

    /// [`Self::draw_to_cell`] on the current cell.
    pub fn draw_pixel(&mut self, pos: Position, color: Rgba<u8>) -> bool {
        self.draw_to_cell(self.current_cell(), pos, color)
    }

    pub fn mark_dirty(&mut self, dirty: Dirty) {
        self.dirty |= dirty;
    }

    pub fn dirty(&self) -> Dirty {
        self.dirty
    }

    /// Returns and resets the accumulated stale caches.
    pub fn take_dirty(&mut self) -> Dirty {
        std::mem::take(&mut self.dirty)
    }

    fn clamp_layer(&self, layer: usize) -> usize {
        let count = self.layers.layer_count();
        if layer >= count {
            let last = count.saturating_sub(1);
            log::warn!("layer {layer} out of range, clamping to {last}");
            last
        } else {
            layer
        }
    }

    fn clamp_frame(&self, frame: usize) -> usize {
        let count = self.layers.frame_count();
        if frame >= count {
            let last = count.saturating_sub(1);
            log::warn!("frame {frame} out of range, clamping to {last}");
            last
        } else {
            frame
        }
    }
}
