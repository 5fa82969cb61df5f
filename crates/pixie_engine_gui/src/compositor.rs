//! Draw-list construction
//!
//! Turns the project state into an ordered list of draw operations for the
//! external rasterizer: visible layers bottom to top, the onion skin of the
//! current layer, then the overlays.

use std::sync::Arc;

use pixie_engine::{BlendMode, CellIndex, ColorOffset, Flip, OutlineEdgeSet, Position, Rectangle, Rgba, Size, TextureId};
use pixie_engine_edit::EditState;

use crate::OnionSkinOptions;

/// Named shader parameter value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Uniform {
    Bool(bool),
    Int(i32),
    Float(f32),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
}

/// One layer of the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerDraw {
    pub cell: CellIndex,
    pub texture: TextureId,
    pub blend_mode: BlendMode,
    pub apply_color_offset: bool,
    pub color_offset: ColorOffset,
    pub apply_flip: bool,
    pub flip: Flip,
    /// Layer opacity premultiplied into every channel
    pub modulate: [f32; 4],
}

impl LayerDraw {
    pub fn uniforms(&self) -> Vec<(&'static str, Uniform)> {
        let offset = self.color_offset;
        vec![
            ("blend_mode", Uniform::Int(i32::from(self.blend_mode.to_u8()))),
            ("apply_color_offset", Uniform::Bool(self.apply_color_offset)),
            ("hsv_offset", Uniform::Vec3([offset.h, offset.s, offset.v])),
            ("rgba_offset", Uniform::Vec4([offset.r, offset.g, offset.b, offset.a])),
            ("apply_flip", Uniform::Bool(self.apply_flip)),
            ("flip_x", Uniform::Bool(self.flip.horizontal)),
            ("flip_y", Uniform::Bool(self.flip.vertical)),
            ("modulate", Uniform::Vec4(self.modulate)),
        ]
    }
}

/// A neighbouring frame of the current layer, faded out with distance.
#[derive(Debug, Clone, PartialEq)]
pub struct OnionSkinDraw {
    pub cell: CellIndex,
    /// Signed distance to the current frame
    pub delta: i32,
    pub texture: TextureId,
    pub tint: Option<[f32; 3]>,
    pub alpha: f32,
}

impl OnionSkinDraw {
    pub fn uniforms(&self) -> Vec<(&'static str, Uniform)> {
        vec![
            ("apply_tint", Uniform::Bool(self.tint.is_some())),
            ("tint", Uniform::Vec3(self.tint.unwrap_or([1.0, 1.0, 1.0]))),
            ("modulate", Uniform::Vec4([1.0, 1.0, 1.0, self.alpha])),
        ]
    }
}

/// The animated selection outline.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineDraw {
    pub edges: Arc<OutlineEdgeSet>,
    pub dash_length: f32,
    pub dash_phase: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Layer(LayerDraw),
    OnionSkin(OnionSkinDraw),
    SelectionOutline(OutlineDraw),
    /// Cells the active tool would change
    ToolPreview { cells: Vec<Position>, color: Rgba<u8> },
    /// Brush footprint under the pointer
    CursorOutline { rect: Rectangle },
}

impl DrawOp {
    pub fn uniforms(&self) -> Vec<(&'static str, Uniform)> {
        match self {
            DrawOp::Layer(draw) => draw.uniforms(),
            DrawOp::OnionSkin(draw) => draw.uniforms(),
            DrawOp::SelectionOutline(draw) => vec![
                ("dash_length", Uniform::Float(draw.dash_length)),
                ("dash_phase", Uniform::Float(draw.dash_phase)),
            ],
            DrawOp::ToolPreview { color, .. } => vec![("color", Uniform::Vec4(color.0.map(|c| f32::from(c) / 255.0)))],
            DrawOp::CursorOutline { .. } => Vec::new(),
        }
    }
}

/// Everything the rasterizer needs for one repaint.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawList {
    /// Image uv to GL space
    pub matrix: [[f32; 3]; 3],
    pub resolution: Size,
    pub ops: Vec<DrawOp>,
}

impl DrawList {
    pub fn layers(&self) -> impl Iterator<Item = &LayerDraw> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Layer(draw) => Some(draw),
            _ => None,
        })
    }

    pub fn onion_skin(&self) -> impl Iterator<Item = &OnionSkinDraw> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::OnionSkin(draw) => Some(draw),
            _ => None,
        })
    }
}

/// One draw op per visible layer at the current frame, bottom to top.
///
/// Post-effects use the coarse per-layer scope rule; exact scopes only
/// apply when the effect is committed. Frames without an uploaded texture
/// are skipped.
pub fn compose_layers(state: &EditState) -> Vec<DrawOp> {
    let effects = state.post_effects();
    let current_layer = state.current_layer();
    let current_frame = state.current_frame();

    let mut ops = Vec::new();
    for (index, layer) in state.layers().layers().iter().enumerate() {
        if !layer.is_visible() || layer.blend_mode() == BlendMode::None {
            continue;
        }
        let Some(frame) = layer.frame(current_frame) else {
            log::warn!("layer {index} has no frame {current_frame}");
            continue;
        };
        let Some(texture) = frame.texture() else {
            log::debug!("layer {index} frame {current_frame} not uploaded yet, skipping");
            continue;
        };
        let opacity = layer.opacity();
        ops.push(DrawOp::Layer(LayerDraw {
            cell: CellIndex::new(index, current_frame),
            texture,
            blend_mode: layer.blend_mode(),
            apply_color_offset: effects.color_scope.applies_to_layer_preview(index, current_layer),
            color_offset: effects.color_offset,
            apply_flip: effects.flip_scope.applies_to_layer_preview(index, current_layer),
            flip: effects.flip,
            modulate: [opacity; 4],
        }));
    }
    ops
}

/// Opacity of an onion frame `distance` frames away, `count` being the number
/// of frames shown on that side.
pub fn onion_skin_alpha(distance: usize, count: usize, max_opacity: f32) -> f32 {
    if distance == 0 || distance > count {
        return 0.0;
    }
    (1.0 - (distance - 1) as f32 / count as f32) * max_opacity
}

/// Past and future frames of the current layer, farthest first on each side.
pub fn compose_onion_skin(state: &EditState, options: &OnionSkinOptions) -> Vec<DrawOp> {
    let mut ops = Vec::new();
    if !options.enabled {
        return ops;
    }
    let Ok(layer) = state.layers().layer(state.current_layer()) else {
        return ops;
    };
    if !layer.is_visible() {
        return ops;
    }
    let current_frame = state.current_frame();
    let frame_count = state.layers().frame_count();

    let sides = [
        (-1, options.past_frames, options.past_color),
        (1, options.future_frames, options.future_color),
    ];
    for (direction, count, color) in sides {
        for distance in (1..=count).rev() {
            let frame = current_frame as i64 + direction * distance as i64;
            if frame < 0 || frame >= frame_count as i64 {
                continue;
            }
            let cell = CellIndex::new(state.current_layer(), frame as usize);
            let Some(texture) = layer.frame(cell.frame).and_then(|frame| frame.texture()) else {
                log::debug!("onion frame {} not uploaded yet, skipping", cell.frame);
                continue;
            };
            ops.push(DrawOp::OnionSkin(OnionSkinDraw {
                cell,
                delta: (direction * distance as i64) as i32,
                texture,
                tint: options.tint.then(|| color.map(|c| f32::from(c) / 255.0)),
                alpha: onion_skin_alpha(distance, count, options.max_opacity),
            }));
        }
    }
    ops
}
