use crate::{EngineError, Frame, Layer, Result, Size, TextureId};

/// Identifies one cell of the layer × frame grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellIndex {
    pub layer: usize,
    pub frame: usize,
}

impl CellIndex {
    pub const fn new(layer: usize, frame: usize) -> Self {
        Self { layer, frame }
    }
}

/// Ordered layers (index 0 is the bottom), all sharing one frame count and size.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerStack {
    size: Size,
    frame_count: usize,
    layers: Vec<Layer>,
}

impl LayerStack {
    /// Stack with one empty layer and one frame.
    pub fn new(size: impl Into<Size>) -> Result<Self> {
        let size = size.into();
        if size.is_empty() {
            return Err(EngineError::InvalidSize { size });
        }
        Ok(Self {
            size,
            frame_count: 1,
            layers: vec![Layer::new("Layer 1", size, 1)],
        })
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, layer: usize) -> Result<&Layer> {
        let count = self.layers.len();
        self.layers.get(layer).ok_or(EngineError::InvalidLayer { index: layer, count })
    }

    pub fn layer_mut(&mut self, layer: usize) -> Result<&mut Layer> {
        let count = self.layers.len();
        self.layers.get_mut(layer).ok_or(EngineError::InvalidLayer { index: layer, count })
    }

    pub fn frame(&self, cell: CellIndex) -> Result<&Frame> {
        let frame_count = self.frame_count;
        self.layer(cell.layer)?.frame(cell.frame).ok_or(EngineError::InvalidFrame {
            index: cell.frame,
            count: frame_count,
        })
    }

    pub fn frame_mut(&mut self, cell: CellIndex) -> Result<&mut Frame> {
        let frame_count = self.frame_count;
        self.layer_mut(cell.layer)?.frame_mut(cell.frame).ok_or(EngineError::InvalidFrame {
            index: cell.frame,
            count: frame_count,
        })
    }

    /// Inserts a new empty layer at `index` (clamped to the top).
    pub fn insert_layer(&mut self, index: usize, name: impl Into<String>) -> usize {
        let index = index.min(self.layers.len());
        self.layers.insert(index, Layer::new(name, self.size, self.frame_count));
        index
    }

    /// Fails on the last remaining layer; a stack is never empty.
    pub fn remove_layer(&mut self, layer: usize) -> Result<Layer> {
        self.layer(layer)?;
        if self.layers.len() == 1 {
            return Err(EngineError::LastLayer);
        }
        Ok(self.layers.remove(layer))
    }

    /// Copies `layer` directly above itself; the copies need their own upload.
    pub fn duplicate_layer(&mut self, layer: usize, name: impl Into<String>) -> Result<usize> {
        let source = self.layer(layer)?;
        let copy = Layer {
            properties: crate::Properties {
                name: name.into(),
                ..source.properties.clone()
            },
            frames: source.frames().map(fresh_copy).collect(),
        };
        self.layers.insert(layer + 1, copy);
        Ok(layer + 1)
    }

    pub fn swap_layers(&mut self, a: usize, b: usize) -> Result<()> {
        self.layer(a)?;
        self.layer(b)?;
        self.layers.swap(a, b);
        Ok(())
    }

    /// Inserts an empty frame at `index` (clamped to the end) in every layer.
    pub fn insert_frame(&mut self, index: usize) -> usize {
        let index = index.min(self.frame_count);
        for layer in &mut self.layers {
            layer.frames.insert(index, Frame::new(self.size));
        }
        self.frame_count += 1;
        index
    }

    /// Fails on the last remaining frame.
    pub fn remove_frame(&mut self, frame: usize) -> Result<()> {
        if frame >= self.frame_count {
            return Err(EngineError::InvalidFrame {
                index: frame,
                count: self.frame_count,
            });
        }
        if self.frame_count == 1 {
            return Err(EngineError::LastFrame);
        }
        for layer in &mut self.layers {
            layer.frames.remove(frame);
        }
        self.frame_count -= 1;
        Ok(())
    }

    /// Copies `frame` of every layer directly after itself.
    pub fn duplicate_frame(&mut self, frame: usize) -> Result<usize> {
        if frame >= self.frame_count {
            return Err(EngineError::InvalidFrame {
                index: frame,
                count: self.frame_count,
            });
        }
        for layer in &mut self.layers {
            let copy = fresh_copy(&layer.frames[frame]);
            layer.frames.insert(frame + 1, copy);
        }
        self.frame_count += 1;
        Ok(frame + 1)
    }

    /// Crops or extends every frame, anchored at the top-left corner.
    pub fn resize(&mut self, size: impl Into<Size>) -> Result<()> {
        let size = size.into();
        if size.is_empty() {
            return Err(EngineError::InvalidSize { size });
        }
        self.size = size;
        for layer in &mut self.layers {
            for frame in layer.frames_mut() {
                frame.resize(size);
            }
        }
        Ok(())
    }

    /// Cells whose raster changed since their last upload, bottom layer first.
    pub fn frames_needing_upload(&self) -> Vec<CellIndex> {
        let mut result = Vec::new();
        for (layer_index, layer) in self.layers.iter().enumerate() {
            for (frame_index, frame) in layer.frames().enumerate() {
                if frame.needs_upload() {
                    result.push(CellIndex::new(layer_index, frame_index));
                }
            }
        }
        result
    }

    pub fn mark_uploaded(&mut self, cell: CellIndex, texture: TextureId) -> Result<()> {
        self.frame_mut(cell)?.mark_uploaded(texture);
        Ok(())
    }
}

fn fresh_copy(frame: &Frame) -> Frame {
    let mut copy = Frame::from_image(frame.image().clone());
    copy.is_key_frame = frame.is_key_frame;
    copy
}
