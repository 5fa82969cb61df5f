//! Pure coordinate conversions for the editing surface
//!
//! Four spaces are involved:
//! - widget pixels, origin top-left of the widget
//! - canvas space, the widget normalized to `[0, 1]²`
//! - image uv, the image normalized to `[0, 1]²`
//! - the integer pixel grid of the image
//!
//! None of these functions fail. Positions outside the image are valid
//! results; callers check [`Rectangle::is_inside`] before indexing.

use pixie_engine::{Position, Rectangle, Size};

use crate::Transform2D;

/// Smallest widget dimension used in divisions.
const MIN_WIDGET_SIZE: f32 = 1.0;

/// Axis-aligned rectangle in widget pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Offset of a brush footprint center from the pixel grid.
///
/// Even footprints center on a grid corner, odd ones on a cell center.
pub fn footprint_offset(size: i32) -> f32 {
    if size % 2 == 0 { 0.5 } else { 0.0 }
}

/// Maps between widget pixels and image pixels for one view state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    pub transform: Transform2D,
    /// Widget size in widget pixels
    pub widget_size: (f32, f32),
    /// Image resolution in image pixels
    pub resolution: Size,
}

impl CoordinateMapper {
    pub fn new(transform: Transform2D, widget_size: (f32, f32), resolution: Size) -> Self {
        Self {
            transform,
            widget_size,
            resolution,
        }
    }

    fn widget_width(&self) -> f32 {
        self.widget_size.0.max(MIN_WIDGET_SIZE)
    }

    fn widget_height(&self) -> f32 {
        self.widget_size.1.max(MIN_WIDGET_SIZE)
    }

    fn scale(&self) -> f32 {
        self.transform.scale.max(f32::EPSILON)
    }

    /// Image units the widget spans on each axis at scale 1.
    ///
    /// The image is letterboxed: the axis where the widget is relatively
    /// longer gets an extent above 1 so image pixels stay square.
    pub fn extent(&self) -> (f32, f32) {
        let widget_aspect = self.widget_width() / self.widget_height();
        let image_aspect = self.resolution.width.max(1) as f32 / self.resolution.height.max(1) as f32;
        if widget_aspect > image_aspect {
            (widget_aspect / image_aspect, 1.0)
        } else {
            (1.0, image_aspect / widget_aspect)
        }
    }

    pub fn widget_to_canvas(&self, widget: (f32, f32)) -> (f32, f32) {
        (widget.0 / self.widget_width(), widget.1 / self.widget_height())
    }

    pub fn canvas_to_widget(&self, canvas: (f32, f32)) -> (f32, f32) {
        (canvas.0 * self.widget_width(), canvas.1 * self.widget_height())
    }

    pub fn canvas_to_image_uv(&self, canvas: (f32, f32)) -> (f32, f32) {
        let (ex, ey) = self.extent();
        let scale = self.scale();
        let pan = self.transform.pan;
        (
            (canvas.0 - 0.5) * ex / scale + 0.5 + pan.0,
            (canvas.1 - 0.5) * ey / scale + 0.5 + pan.1,
        )
    }

    pub fn image_uv_to_canvas(&self, uv: (f32, f32)) -> (f32, f32) {
        let (ex, ey) = self.extent();
        let scale = self.scale();
        let pan = self.transform.pan;
        (
            (uv.0 - 0.5 - pan.0) * scale / ex + 0.5,
            (uv.1 - 0.5 - pan.1) * scale / ey + 0.5,
        )
    }

    /// Continuous image pixel coordinate under a widget point.
    pub fn widget_to_image(&self, widget: (f32, f32)) -> (f32, f32) {
        let uv = self.canvas_to_image_uv(self.widget_to_canvas(widget));
        (uv.0 * self.resolution.width as f32, uv.1 * self.resolution.height as f32)
    }

    pub fn image_to_widget(&self, image: (f32, f32)) -> (f32, f32) {
        let uv = (
            image.0 / self.resolution.width.max(1) as f32,
            image.1 / self.resolution.height.max(1) as f32,
        );
        self.canvas_to_widget(self.image_uv_to_canvas(uv))
    }

    /// The pixel cell under a widget point.
    pub fn widget_to_pixel_grid(&self, widget: (f32, f32)) -> Position {
        let (x, y) = self.widget_to_image(widget);
        Position::new(x.floor() as i32, y.floor() as i32)
    }

    /// Center of a pixel cell in widget pixels, snapped to whole widget pixels.
    ///
    /// When the cell is smaller than a widget pixel, snapping could land in a
    /// neighbouring cell; the exact center is returned then, so mapping the
    /// result back always yields `pos` again.
    pub fn pixel_grid_to_widget(&self, pos: Position) -> (f32, f32) {
        let center = self.image_to_widget((pos.x as f32 + 0.5, pos.y as f32 + 0.5));
        let snapped = (center.0.round(), center.1.round());
        if self.widget_to_pixel_grid(snapped) == pos { snapped } else { center }
    }

    /// Widget rectangle covering `rect`, corners rounded to whole widget pixels.
    pub fn cell_rect_to_widget(&self, rect: Rectangle) -> WidgetRect {
        let top_left = self.image_to_widget((rect.left() as f32, rect.top() as f32));
        let bottom_right = self.image_to_widget((rect.right() as f32, rect.bottom() as f32));
        let (x0, y0) = (top_left.0.round(), top_left.1.round());
        let (x1, y1) = (bottom_right.0.round(), bottom_right.1.round());
        WidgetRect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        }
    }

    /// Top-left cell of a `size`×`size` brush footprint centered at the pointer.
    pub fn brush_origin(&self, widget: (f32, f32), size: i32) -> Position {
        let size = size.max(1);
        let offset = footprint_offset(size);
        let (x, y) = self.widget_to_image(widget);
        Position::new((x + offset).floor() as i32 - size / 2, (y + offset).floor() as i32 - size / 2)
    }

    /// Image pixels currently visible, clipped to the image.
    pub fn visible_pixel_rect(&self) -> Rectangle {
        let (x0, y0) = self.widget_to_image((0.0, 0.0));
        let (x1, y1) = self.widget_to_image(self.widget_size);
        let visible = Rectangle::from_pt(
            Position::new(x0.floor() as i32, y0.floor() as i32),
            Position::new(x1.ceil() as i32 - 1, y1.ceil() as i32 - 1),
        );
        visible.intersect(&Rectangle::from_min_size((0, 0), self.resolution))
    }

    /// Size of one image pixel in widget pixels.
    pub fn pixel_size(&self) -> (f32, f32) {
        let (ex, ey) = self.extent();
        let scale = self.scale();
        (
            self.widget_width() * scale / (ex * self.resolution.width.max(1) as f32),
            self.widget_height() * scale / (ey * self.resolution.height.max(1) as f32),
        )
    }

    /// Sets the zoom and adjusts pan so the image point under `widget` stays put.
    pub fn zoom_at(&mut self, new_scale: f32, widget: (f32, f32)) {
        let canvas = self.widget_to_canvas(widget);
        let uv = self.canvas_to_image_uv(canvas);
        self.transform.scale = new_scale.max(f32::EPSILON);
        let (ex, ey) = self.extent();
        let scale = self.scale();
        self.transform.pan = (
            uv.0 - 0.5 - (canvas.0 - 0.5) * ex / scale,
            uv.1 - 0.5 - (canvas.1 - 0.5) * ey / scale,
        );
    }

    /// Moves the image by a widget pixel delta.
    pub fn pan_by(&mut self, delta: (f32, f32)) {
        let (ex, ey) = self.extent();
        let scale = self.scale();
        self.transform.pan.0 -= delta.0 / self.widget_width() * ex / scale;
        self.transform.pan.1 -= delta.1 / self.widget_height() * ey / scale;
    }
}
