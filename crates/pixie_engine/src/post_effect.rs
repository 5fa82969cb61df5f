use serde::{Deserialize, Serialize};

/// Which (layer, frame) pairs a global post-effect applies to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostEffectScope {
    #[default]
    Everywhere,
    CurrentLayer,
    CurrentFrame,
    CurrentCell,
    Selection,
}

impl PostEffectScope {
    pub const ALL: [PostEffectScope; 5] = [
        PostEffectScope::Everywhere,
        PostEffectScope::CurrentLayer,
        PostEffectScope::CurrentFrame,
        PostEffectScope::CurrentCell,
        PostEffectScope::Selection,
    ];

    pub fn to_u8(self) -> u8 {
        match self {
            PostEffectScope::Everywhere => 0,
            PostEffectScope::CurrentLayer => 1,
            PostEffectScope::CurrentFrame => 2,
            PostEffectScope::CurrentCell => 3,
            PostEffectScope::Selection => 4,
        }
    }

    /// Unknown values fall back to `Everywhere`.
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => PostEffectScope::Everywhere,
            1 => PostEffectScope::CurrentLayer,
            2 => PostEffectScope::CurrentFrame,
            3 => PostEffectScope::CurrentCell,
            4 => PostEffectScope::Selection,
            _ => {
                log::warn!("Unknown post effect scope {value}, using everywhere");
                PostEffectScope::Everywhere
            }
        }
    }

    /// Coarse per-layer rule used while compositing the live preview.
    ///
    /// Frame, cell and selection scopes are finer than a layer; they are
    /// approximated here and only enforced exactly when the effect is
    /// committed into the raster data.
    pub fn applies_to_layer_preview(self, layer: usize, current_layer: usize) -> bool {
        matches!(self, PostEffectScope::Everywhere | PostEffectScope::CurrentFrame) || layer == current_layer
    }

    /// Exact rule used when committing an effect into raster data.
    ///
    /// For `Selection` this only answers whether the cell is touched at all;
    /// the per-pixel restriction is up to the caller.
    pub fn applies_to_cell(self, layer: usize, frame: usize, current_layer: usize, current_frame: usize) -> bool {
        match self {
            PostEffectScope::Everywhere => true,
            PostEffectScope::CurrentLayer => layer == current_layer,
            PostEffectScope::CurrentFrame => frame == current_frame,
            PostEffectScope::CurrentCell | PostEffectScope::Selection => layer == current_layer && frame == current_frame,
        }
    }
}

/// Hue/saturation/value shift plus additive RGBA offsets.
///
/// `h` is measured in turns, every other component is an additive offset in
/// `[-1, 1]` on the normalized channel.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorOffset {
    pub h: f32,
    pub s: f32,
    pub v: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorOffset {
    pub fn is_identity(&self) -> bool {
        self.as_array().iter().all(|c| *c == 0.0)
    }

    /// Offsets in shader order: h, s, v, r, g, b, a.
    pub fn as_array(&self) -> [f32; 7] {
        [self.h, self.s, self.v, self.r, self.g, self.b, self.a]
    }

    /// Applies the offset to one 8-bit RGBA pixel.
    pub fn apply(&self, pixel: [u8; 4]) -> [u8; 4] {
        let [r, g, b, a] = pixel.map(|c| c as f32 / 255.0);
        let (mut h, mut s, mut v) = rgb_to_hsv(r, g, b);
        h = (h + self.h).rem_euclid(1.0);
        s = (s + self.s).clamp(0.0, 1.0);
        v = (v + self.v).clamp(0.0, 1.0);
        let (r, g, b) = hsv_to_rgb(h, s, v);
        [r + self.r, g + self.g, b + self.b, a + self.a].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flip {
    pub horizontal: bool,
    pub vertical: bool,
}

impl Flip {
    pub fn is_identity(&self) -> bool {
        !self.horizontal && !self.vertical
    }
}

fn rgb_to_hsv(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        ((g - b) / delta).rem_euclid(6.0) / 6.0
    } else if max == g {
        ((b - r) / delta + 2.0) / 6.0
    } else {
        ((r - g) / delta + 4.0) / 6.0
    };
    let s = if max == 0.0 { 0.0 } else { delta / max };
    (h, s, max)
}

fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let c = v * s;
    let h6 = h * 6.0;
    let x = c * (1.0 - (h6.rem_euclid(2.0) - 1.0).abs());
    let m = v - c;
    let (r, g, b) = match h6 as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    (r + m, g + m, b + m)
}
