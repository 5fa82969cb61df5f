#![allow(clippy::missing_errors_doc)]
use image::imageops;
use pixie_engine::{CellIndex, ColorOffset, Dirty, Flip, PostEffectScope, RgbaImage, SelectionSet};
use rayon::prelude::*;

use super::{EditState, PostEffects, Result};

impl EditState {
    pub fn set_color_offset(&mut self, scope: PostEffectScope, offset: ColorOffset) {
        let effects = PostEffects {
            color_offset: offset,
            color_scope: scope,
            ..self.post_effects
        };
        self.set_post_effects(effects);
    }

    pub fn set_flip(&mut self, scope: PostEffectScope, flip: Flip) {
        let effects = PostEffects {
            flip,
            flip_scope: scope,
            ..self.post_effects
        };
        self.set_post_effects(effects);
    }

    pub fn set_post_effects(&mut self, effects: PostEffects) {
        if effects != self.post_effects {
            self.post_effects = effects;
            self.mark_dirty(Dirty::POST_EFFECT);
        }
    }

    /// Bakes the pending color offset and flip into the raster data.
    ///
    /// Unlike the live preview the scope is honored exactly: frame and cell
    /// scopes only touch matching cells, the selection scope only selected
    /// pixels of the current cell. Locked layers are skipped. The post-effects
    /// are reset afterwards. Returns the number of cells written.
    pub fn commit_post_effects(&mut self) -> Result<usize> {
        let effects = self.post_effects;
        if effects.is_identity() {
            return Ok(0);
        }
        let (current_layer, current_frame) = (self.current_layer, self.current_frame);
        let mut touched = 0;

        for layer in 0..self.layers.layer_count() {
            if self.layers.layer(layer)?.is_locked() {
                log::debug!("skipping locked layer {layer} on commit");
                continue;
            }
            for frame in 0..self.layers.frame_count() {
                let color = !effects.color_offset.is_identity() && effects.color_scope.applies_to_cell(layer, frame, current_layer, current_frame);
                let flip = !effects.flip.is_identity() && effects.flip_scope.applies_to_cell(layer, frame, current_layer, current_frame);
                if !color && !flip {
                    continue;
                }

                let image = self.layers.frame_mut(CellIndex::new(layer, frame))?.image_mut();
                if color {
                    let mask = (effects.color_scope == PostEffectScope::Selection).then_some(&self.selection);
                    bake_color_offset(image, &effects.color_offset, mask);
                }
                if flip {
                    let mask = (effects.flip_scope == PostEffectScope::Selection).then_some(&self.selection);
                    bake_flip(image, effects.flip, mask);
                }
                touched += 1;
            }
        }

        log::info!("committed post effects to {touched} cells");
        self.post_effects.color_offset = ColorOffset::default();
        self.post_effects.flip = Flip::default();
        self.mark_dirty(Dirty::LAYERS | Dirty::POST_EFFECT);
        Ok(touched)
    }
}

/// Applies `offset` to every pixel, or only to the pixels in `mask`.
pub fn bake_color_offset(image: &mut RgbaImage, offset: &ColorOffset, mask: Option<&SelectionSet>) {
    let stride = image.width() as usize * 4;
    if stride == 0 {
        return;
    }
    let raw: &mut [u8] = image;
    raw.par_chunks_mut(stride).enumerate().for_each(|(y, row)| {
        for (x, pixel) in row.chunks_exact_mut(4).enumerate() {
            if mask.is_some_and(|mask| !mask.is_selected((x, y))) {
                continue;
            }
            let shifted = offset.apply([pixel[0], pixel[1], pixel[2], pixel[3]]);
            pixel.copy_from_slice(&shifted);
        }
    });
}

/// Mirrors the whole image, or with a mask the selected pixels within the
/// mask's bounding box.
pub fn bake_flip(image: &mut RgbaImage, flip: Flip, mask: Option<&SelectionSet>) {
    let Some(mask) = mask else {
        if flip.horizontal {
            imageops::flip_horizontal_in_place(image);
        }
        if flip.vertical {
            imageops::flip_vertical_in_place(image);
        }
        return;
    };
    let Some((x_min, y_min, x_max, y_max)) = mask.bounding_box() else {
        return;
    };
    let source = image.clone();
    for pos in mask.iter() {
        let src_x = if flip.horizontal { x_min + x_max - pos.x } else { pos.x };
        let src_y = if flip.vertical { y_min + y_max - pos.y } else { pos.y };
        if let Some(pixel) = source.get_pixel_checked(src_x as u32, src_y as u32) {
            if pos.x >= 0 && pos.y >= 0 && pos.x < image.width() as i32 && pos.y < image.height() as i32 {
                image.put_pixel(pos.x as u32, pos.y as u32, *pixel);
            }
        }
    }
}
