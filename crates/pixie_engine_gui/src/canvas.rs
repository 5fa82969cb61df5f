use std::sync::Arc;

use pixie_engine::{BlendMode, CellIndex, ColorOffset, Dirty, Flip, OutlineEdgeSet, Position, PostEffectScope, Rectangle, SelectionSet, Size, TextureId};
use pixie_engine_edit::{
    EditState, Result,
    tools::{ActiveTool, Tool, ToolEvent},
};

use crate::{CanvasOptions, CoordinateMapper, MarchingAnts, OverlayState, Rasterizer, RedrawScheduler, RedrawState, RedrawStats, SubscriptionId, Transform2D};

/// A global post-effect change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PostEffect {
    ColorOffset(ColorOffset),
    Flip(Flip),
}

/// The editing surface: routes widget events into the project and keeps the
/// rasterizer supplied with draw-lists.
pub struct Canvas<R: Rasterizer> {
    project: EditState,
    mapper: CoordinateMapper,
    options: CanvasOptions,
    scheduler: RedrawScheduler,
    ants: MarchingAnts,
    tool: ActiveTool,
    /// Last pointer position in widget pixels, `None` while outside
    pointer: Option<(f32, f32)>,
    cursor: Option<Rectangle>,
    rasterizer: R,
}

impl<R: Rasterizer> Canvas<R> {
    pub fn new(mut project: EditState, widget_size: (f32, f32), options: CanvasOptions, mut rasterizer: R) -> Self {
        project.take_dirty();
        let mapper = CoordinateMapper::new(Transform2D::default(), widget_size, project.size());
        let ants = MarchingAnts::new(options.marching_ants.dash_length, options.marching_ants.speed);
        rasterizer.request_redraw();
        Self {
            project,
            mapper,
            options,
            scheduler: RedrawScheduler::new(),
            ants,
            tool: ActiveTool::default(),
            pointer: None,
            cursor: None,
            rasterizer,
        }
    }

    pub fn project(&self) -> &EditState {
        &self.project
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn options(&self) -> &CanvasOptions {
        &self.options
    }

    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    pub fn rasterizer_mut(&mut self) -> &mut R {
        &mut self.rasterizer
    }

    pub fn redraw_state(&self) -> RedrawState {
        self.scheduler.state()
    }

    pub fn stats(&self) -> RedrawStats {
        self.scheduler.stats()
    }

    pub fn set_options(&mut self, options: CanvasOptions) {
        if options == self.options {
            return;
        }
        self.ants.set_style(options.marching_ants.dash_length, options.marching_ants.speed);
        self.mapper.transform.scale = options.clamp_zoom(self.mapper.transform.scale);
        self.options = options;
        self.mark_dirty(Dirty::TRANSFORM | Dirty::ONION_SKIN | Dirty::OVERLAY | Dirty::ANTS);
    }

    /// Runs arbitrary edits; the changes are picked up for the next redraw.
    pub fn with_edit_state<T>(&mut self, edit: impl FnOnce(&mut EditState) -> T) -> T {
        let result = edit(&mut self.project);
        self.sync_project();
        result
    }

    pub fn subscribe(&mut self, observer: impl FnMut(RedrawState, Dirty) + 'static) -> SubscriptionId {
        self.scheduler.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.scheduler.unsubscribe(id)
    }

    // ------------------------------------------------------------------------
    // Coordinates
    // ------------------------------------------------------------------------

    pub fn pointer_to_pixel(&self, widget: (f32, f32)) -> Position {
        self.mapper.widget_to_pixel_grid(widget)
    }

    pub fn pixel_to_pointer(&self, pos: Position) -> (f32, f32) {
        self.mapper.pixel_grid_to_widget(pos)
    }

    pub fn set_transform(&mut self, pan: (f32, f32), scale: f32) {
        let transform = Transform2D::new(pan, self.options.clamp_zoom(scale));
        if transform != self.mapper.transform {
            self.mapper.transform = transform;
            self.transform_changed();
        }
    }

    /// Zooms keeping the image point under `widget` in place.
    pub fn zoom_at(&mut self, scale: f32, widget: (f32, f32)) {
        let scale = self.options.clamp_zoom(scale);
        self.mapper.zoom_at(scale, widget);
        self.transform_changed();
    }

    pub fn pan_by(&mut self, delta: (f32, f32)) {
        if delta != (0.0, 0.0) {
            self.mapper.pan_by(delta);
            self.transform_changed();
        }
    }

    pub fn on_resize(&mut self, width: f32, height: f32) {
        if self.mapper.widget_size != (width, height) {
            self.mapper.widget_size = (width, height);
            self.transform_changed();
        }
    }

    // ------------------------------------------------------------------------
    // Project shortcuts
    // ------------------------------------------------------------------------

    pub fn set_selection(&mut self, selection: SelectionSet) {
        self.project.set_selection(selection);
        self.sync_project();
    }

    /// The outline of the current selection.
    pub fn get_selection_outline(&self) -> Arc<OutlineEdgeSet> {
        if self.scheduler.pending().contains(Dirty::SELECTION) {
            Arc::new(OutlineEdgeSet::from_selection(self.project.selection()))
        } else {
            self.scheduler.outline().clone()
        }
    }

    pub fn set_layer_visibility(&mut self, layer: usize, is_visible: bool) -> Result<()> {
        let result = self.project.set_layer_visibility(layer, is_visible);
        self.sync_project();
        result
    }

    pub fn set_layer_opacity(&mut self, layer: usize, opacity: f32) -> Result<()> {
        let result = self.project.set_layer_opacity(layer, opacity);
        self.sync_project();
        result
    }

    pub fn set_layer_blend_mode(&mut self, layer: usize, blend_mode: BlendMode) -> Result<()> {
        let result = self.project.set_layer_blend_mode(layer, blend_mode);
        self.sync_project();
        result
    }

    pub fn set_current_layer_and_frame(&mut self, layer: usize, frame: usize) {
        self.project.set_current_layer_and_frame(layer, frame);
        self.sync_project();
    }

    pub fn set_post_effect(&mut self, effect: PostEffect, scope: PostEffectScope) {
        match effect {
            PostEffect::ColorOffset(offset) => self.project.set_color_offset(scope, offset),
            PostEffect::Flip(flip) => self.project.set_flip(scope, flip),
        }
        self.sync_project();
    }

    pub fn commit_post_effects(&mut self) -> Result<usize> {
        let result = self.project.commit_post_effects();
        self.sync_project();
        result
    }

    /// Cells whose raster must be (re)uploaded before they can be drawn.
    pub fn frames_needing_upload(&self) -> Vec<CellIndex> {
        self.project.layers().frames_needing_upload()
    }

    pub fn mark_uploaded(&mut self, cell: CellIndex, texture: TextureId) -> Result<()> {
        let result = self.project.mark_uploaded(cell, texture);
        self.sync_project();
        result
    }

    /// Resizes the image; the view is kept, the selection is clamped.
    pub fn resize_image(&mut self, size: impl Into<Size>) -> Result<()> {
        let result = self.project.resize_canvas(size);
        self.mapper.resolution = self.project.size();
        self.sync_project();
        result
    }

    // ------------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------------

    pub fn tool(&self) -> &ActiveTool {
        &self.tool
    }

    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool.tool() != tool {
            self.tool = ActiveTool::new(tool);
            self.update_cursor();
            self.mark_dirty(Dirty::OVERLAY);
        }
    }

    pub fn on_pointer_enter(&mut self, widget: (f32, f32)) {
        self.pointer = Some(widget);
        self.update_cursor();
    }

    pub fn on_pointer_leave(&mut self) {
        self.pointer = None;
        self.update_cursor();
    }

    pub fn on_pointer_down(&mut self, widget: (f32, f32)) {
        self.pointer = Some(widget);
        let pos = self.tool_position(widget);
        let event = self.tool.on_pointer_down(&mut self.project, pos);
        self.finish_tool_event(event);
    }

    pub fn on_pointer_move(&mut self, widget: (f32, f32)) {
        self.pointer = Some(widget);
        if self.tool.is_dragging() {
            let pos = self.tool_position(widget);
            let event = self.tool.on_pointer_move(&mut self.project, pos);
            self.finish_tool_event(event);
        } else {
            self.update_cursor();
        }
    }

    pub fn on_pointer_up(&mut self, widget: (f32, f32)) {
        self.pointer = Some(widget);
        let pos = self.tool_position(widget);
        let event = self.tool.on_pointer_up(&mut self.project, pos);
        self.finish_tool_event(event);
    }

    // ------------------------------------------------------------------------
    // Redraw
    // ------------------------------------------------------------------------

    /// Advances the marching ants and submits a draw-list if anything changed.
    pub fn on_frame_tick(&mut self, now_ms: u128) -> bool {
        if self.ants.update(now_ms) && !self.project.selection().is_empty() {
            self.mark_dirty(Dirty::ANTS);
        }
        let overlay = OverlayState {
            tool_preview: self.tool.preview_cells(&self.project),
            preview_color: self.project.primary_color(),
            cursor: self.cursor,
        };
        self.scheduler
            .on_frame_tick(&self.project, &self.mapper, &self.ants, &overlay, &self.options, &mut self.rasterizer)
    }

    fn tool_position(&self, widget: (f32, f32)) -> Position {
        self.mapper.brush_origin(widget, self.tool.footprint_size(&self.project))
    }

    fn finish_tool_event(&mut self, event: ToolEvent) {
        match event {
            ToolEvent::None => {}
            ToolEvent::Redraw => self.mark_dirty(Dirty::OVERLAY),
            ToolEvent::Commit(description) => {
                log::debug!("{description}");
                self.mark_dirty(Dirty::OVERLAY);
            }
        }
        self.update_cursor();
        self.sync_project();
    }

    fn update_cursor(&mut self) {
        let cursor = match self.pointer {
            Some(widget) if self.options.show_cursor_outline => {
                let size = self.tool.footprint_size(&self.project);
                Some(Rectangle::from_min_size(self.mapper.brush_origin(widget, size), (size, size)))
            }
            _ => None,
        };
        if cursor != self.cursor {
            self.cursor = cursor;
            self.mark_dirty(Dirty::OVERLAY);
        }
    }

    fn transform_changed(&mut self) {
        self.mark_dirty(Dirty::TRANSFORM);
        self.update_cursor();
    }

    fn sync_project(&mut self) {
        let dirty = self.project.take_dirty();
        if dirty.contains(Dirty::OVERLAY) {
            // brush size changes move the cursor footprint
            self.update_cursor();
        }
        self.scheduler.mark_dirty(dirty, &mut self.rasterizer);
    }

    fn mark_dirty(&mut self, dirty: Dirty) {
        self.scheduler.mark_dirty(dirty, &mut self.rasterizer);
    }
}
