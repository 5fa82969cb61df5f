use serde::{Deserialize, Serialize};

/// Pan and zoom of the canvas.
///
/// `pan` is measured in image-normalized units (1.0 = one full image width or
/// height), `scale` is the zoom factor (1.0 = the image fits the widget).
/// Pixel and canvas space have their origin top-left with y pointing down;
/// GL space is centered with y pointing up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    pub pan: (f32, f32),
    pub scale: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self { pan: (0.0, 0.0), scale: 1.0 }
    }
}

impl Transform2D {
    pub fn new(pan: (f32, f32), scale: f32) -> Self {
        Self { pan, scale }
    }

    /// Canvas `[0, 1]²` (y down) to GL `[-1, 1]²` (y up).
    pub fn canvas_to_gl(canvas: (f32, f32)) -> (f32, f32) {
        (canvas.0 * 2.0 - 1.0, 1.0 - canvas.1 * 2.0)
    }

    pub fn gl_to_canvas(gl: (f32, f32)) -> (f32, f32) {
        ((gl.0 + 1.0) / 2.0, (1.0 - gl.1) / 2.0)
    }

    /// Row-major orthographic matrix taking image uv coordinates to GL space.
    ///
    /// `extent` is the number of image units the widget spans on each axis at
    /// scale 1, see [`crate::CoordinateMapper::extent`].
    pub fn matrix(&self, extent: (f32, f32)) -> [[f32; 3]; 3] {
        let sx = 2.0 * self.scale / extent.0;
        let sy = 2.0 * self.scale / extent.1;
        [
            [sx, 0.0, -sx * (0.5 + self.pan.0)],
            [0.0, -sy, sy * (0.5 + self.pan.1)],
            [0.0, 0.0, 1.0],
        ]
    }
}

/// Applies a matrix from [`Transform2D::matrix`] to a point.
pub fn apply_matrix(matrix: &[[f32; 3]; 3], point: (f32, f32)) -> (f32, f32) {
    (
        matrix[0][0] * point.0 + matrix[0][1] * point.1 + matrix[0][2],
        matrix[1][0] * point.0 + matrix[1][1] * point.1 + matrix[1][2],
    )
}
