use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::{Position, Size};

/// Per-layer compositing function used when merging onto the accumulated image.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// The layer is not composited at all.
    None,
    #[default]
    Normal,
    Add,
    Subtract,
    ReverseSubtract,
    Multiply,
    Min,
    Max,
}

impl BlendMode {
    pub const ALL: [BlendMode; 8] = [
        BlendMode::None,
        BlendMode::Normal,
        BlendMode::Add,
        BlendMode::Subtract,
        BlendMode::ReverseSubtract,
        BlendMode::Multiply,
        BlendMode::Min,
        BlendMode::Max,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BlendMode::None => "none",
            BlendMode::Normal => "normal",
            BlendMode::Add => "add",
            BlendMode::Subtract => "subtract",
            BlendMode::ReverseSubtract => "reverse_subtract",
            BlendMode::Multiply => "multiply",
            BlendMode::Min => "min",
            BlendMode::Max => "max",
        }
    }

    pub fn to_u8(&self) -> u8 {
        match self {
            BlendMode::None => 0,
            BlendMode::Normal => 1,
            BlendMode::Add => 2,
            BlendMode::Subtract => 3,
            BlendMode::ReverseSubtract => 4,
            BlendMode::Multiply => 5,
            BlendMode::Min => 6,
            BlendMode::Max => 7,
        }
    }

    /// Unknown values fall back to `None`.
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => BlendMode::None,
            1 => BlendMode::Normal,
            2 => BlendMode::Add,
            3 => BlendMode::Subtract,
            4 => BlendMode::ReverseSubtract,
            5 => BlendMode::Multiply,
            6 => BlendMode::Min,
            7 => BlendMode::Max,
            _ => {
                log::warn!("Unknown blend mode {value}, using none");
                BlendMode::None
            }
        }
    }

    /// Unknown names fall back to `None`.
    pub fn from_name(name: &str) -> Self {
        if let Some(mode) = Self::ALL.iter().find(|mode| mode.name().eq_ignore_ascii_case(name)) {
            *mode
        } else {
            log::warn!("Unknown blend mode '{name}', using none");
            BlendMode::None
        }
    }
}

/// Handle of an uploaded frame image, assigned by the external rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureId(pub u64);

/// The raster image of one layer at one animation frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    image: RgbaImage,
    pub is_key_frame: bool,
    texture: Option<TextureId>,
    needs_upload: bool,
    revision: u64,
}

impl Frame {
    pub fn new(size: Size) -> Self {
        Self::from_image(RgbaImage::new(size.width.max(0) as u32, size.height.max(0) as u32))
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self {
            image,
            is_key_frame: false,
            texture: None,
            needs_upload: true,
            revision: 0,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn size(&self) -> Size {
        Size::new(self.image.width() as i32, self.image.height() as i32)
    }

    pub fn pixel(&self, pos: Position) -> Option<Rgba<u8>> {
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        self.image.get_pixel_checked(pos.x as u32, pos.y as u32).copied()
    }

    /// The texture last uploaded for this frame, `None` while no upload happened yet.
    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    pub fn needs_upload(&self) -> bool {
        self.needs_upload
    }

    /// Increments on every raster change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn mark_uploaded(&mut self, texture: TextureId) {
        self.texture = Some(texture);
        self.needs_upload = false;
    }

    /// Raster access for the single writer in the edit layer.
    ///
    /// Invalidates the upload; the previous texture stays usable until the
    /// new one is acknowledged so redraws in between show the old content.
    pub fn image_mut(&mut self) -> &mut RgbaImage {
        self.needs_upload = true;
        self.revision += 1;
        &mut self.image
    }

    /// Crops or extends the image, anchored at the top-left corner.
    pub fn resize(&mut self, size: Size) {
        let mut resized = RgbaImage::new(size.width.max(0) as u32, size.height.max(0) as u32);
        image::imageops::replace(&mut resized, &self.image, 0, 0);
        *self.image_mut() = resized;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Properties {
    pub name: String,
    pub is_visible: bool,
    pub is_locked: bool,
    pub opacity: f32,
    pub blend_mode: BlendMode,
}

impl Default for Properties {
    fn default() -> Self {
        Self {
            name: String::new(),
            is_visible: true,
            is_locked: false,
            opacity: 1.0,
            blend_mode: BlendMode::Normal,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub properties: Properties,
    pub(crate) frames: Vec<Frame>,
}

impl Layer {
    pub fn new(name: impl Into<String>, size: Size, frame_count: usize) -> Self {
        Layer {
            properties: Properties {
                name: name.into(),
                ..Default::default()
            },
            frames: (0..frame_count).map(|_| Frame::new(size)).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.properties.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.properties.name = name.into();
    }

    pub fn is_visible(&self) -> bool {
        self.properties.is_visible
    }

    pub fn set_is_visible(&mut self, is_visible: bool) {
        self.properties.is_visible = is_visible;
    }

    pub fn is_locked(&self) -> bool {
        self.properties.is_locked
    }

    pub fn set_is_locked(&mut self, is_locked: bool) {
        self.properties.is_locked = is_locked;
    }

    pub fn opacity(&self) -> f32 {
        self.properties.opacity
    }

    /// Stores the opacity clamped to `[0, 1]`; NaN becomes fully opaque.
    pub fn set_opacity(&mut self, opacity: f32) {
        self.properties.opacity = if opacity.is_nan() {
            log::warn!("NaN opacity for layer '{}', using 1.0", self.properties.name);
            1.0
        } else {
            opacity.clamp(0.0, 1.0)
        };
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.properties.blend_mode
    }

    pub fn set_blend_mode(&mut self, blend_mode: BlendMode) {
        self.properties.blend_mode = blend_mode;
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame(&self, frame: usize) -> Option<&Frame> {
        self.frames.get(frame)
    }

    pub fn frame_mut(&mut self, frame: usize) -> Option<&mut Frame> {
        self.frames.get_mut(frame)
    }

    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    pub fn frames_mut(&mut self) -> impl Iterator<Item = &mut Frame> {
        self.frames.iter_mut()
    }
}
