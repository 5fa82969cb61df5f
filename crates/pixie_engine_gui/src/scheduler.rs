use std::sync::Arc;

use pixie_engine::{Dirty, OutlineEdgeSet, Position, Rectangle, Rgba, Size};
use pixie_engine_edit::EditState;

use crate::{CanvasOptions, CoordinateMapper, DrawList, DrawOp, MarchingAnts, OutlineDraw, compose_layers, compose_onion_skin};

/// Receives finished draw-lists; implemented by the rendering backend.
pub trait Rasterizer {
    fn submit(&mut self, draw_list: DrawList);

    /// Asks the host to call `on_frame_tick` soon.
    fn request_redraw(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedrawState {
    #[default]
    Clean,
    Dirty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(RedrawState, Dirty)>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedrawStats {
    pub submitted_frames: u64,
    pub outline_recomputes: u64,
    pub layer_recomputes: u64,
    pub redraw_requests: u64,
}

/// Overlay inputs that live outside the project.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayState {
    pub tool_preview: Vec<Position>,
    pub preview_color: Rgba<u8>,
    /// Brush footprint under the pointer
    pub cursor: Option<Rectangle>,
}

impl Default for OverlayState {
    fn default() -> Self {
        Self {
            tool_preview: Vec::new(),
            preview_color: Rgba([0, 0, 0, 255]),
            cursor: None,
        }
    }
}

/// Coalesces change notifications into one recompute and one submitted
/// draw-list per frame tick.
///
/// Caches are recomputed in a fixed order: geometry, selection outline,
/// layer composite, onion skin, overlays.
pub struct RedrawScheduler {
    state: RedrawState,
    pending: Dirty,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
    stats: RedrawStats,

    matrix: [[f32; 3]; 3],
    resolution: Size,
    outline: Arc<OutlineEdgeSet>,
    layer_ops: Vec<DrawOp>,
    onion_ops: Vec<DrawOp>,
    overlay_ops: Vec<DrawOp>,
}

impl Default for RedrawScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl RedrawScheduler {
    /// Starts dirty so the first tick builds every cache.
    pub fn new() -> Self {
        Self {
            state: RedrawState::Dirty,
            pending: Dirty::all(),
            observers: Vec::new(),
            next_subscription: 0,
            stats: RedrawStats::default(),
            matrix: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            resolution: Size::default(),
            outline: Arc::new(OutlineEdgeSet::default()),
            layer_ops: Vec::new(),
            onion_ops: Vec::new(),
            overlay_ops: Vec::new(),
        }
    }

    pub fn state(&self) -> RedrawState {
        self.state
    }

    pub fn pending(&self) -> Dirty {
        self.pending
    }

    pub fn stats(&self) -> RedrawStats {
        self.stats
    }

    /// The outline extracted on the last tick.
    pub fn outline(&self) -> &Arc<OutlineEdgeSet> {
        &self.outline
    }

    pub fn subscribe(&mut self, observer: impl FnMut(RedrawState, Dirty) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if the subscription was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let len = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != len
    }

    /// Records stale caches. Only the transition out of `Clean` requests a redraw.
    pub fn mark_dirty(&mut self, dirty: Dirty, rasterizer: &mut dyn Rasterizer) {
        if dirty.is_empty() {
            return;
        }
        self.pending |= dirty;
        if self.state == RedrawState::Clean {
            self.state = RedrawState::Dirty;
            self.stats.redraw_requests += 1;
            rasterizer.request_redraw();
            self.notify(RedrawState::Dirty, dirty);
        }
    }

    /// Recomputes the stale caches and submits one draw-list.
    ///
    /// Returns false without submitting when nothing changed since the last tick.
    pub fn on_frame_tick(
        &mut self,
        project: &EditState,
        mapper: &CoordinateMapper,
        ants: &MarchingAnts,
        overlay: &OverlayState,
        options: &CanvasOptions,
        rasterizer: &mut dyn Rasterizer,
    ) -> bool {
        if self.state == RedrawState::Clean {
            return false;
        }
        let dirty = std::mem::take(&mut self.pending);
        log::debug!("frame tick, recomputing {dirty:?}");

        if dirty.contains(Dirty::TRANSFORM) {
            self.matrix = mapper.transform.matrix(mapper.extent());
            self.resolution = mapper.resolution;
        }
        if dirty.contains(Dirty::SELECTION) {
            self.outline = Arc::new(OutlineEdgeSet::from_selection(project.selection()));
            self.stats.outline_recomputes += 1;
        }
        if dirty.affects_layers() {
            self.layer_ops = compose_layers(project);
            self.stats.layer_recomputes += 1;
        }
        if dirty.affects_onion_skin() {
            self.onion_ops = compose_onion_skin(project, &options.onion_skin);
        }
        self.overlay_ops = self.compose_overlays(ants, overlay);

        let ops = self
            .layer_ops
            .iter()
            .chain(&self.onion_ops)
            .chain(&self.overlay_ops)
            .cloned()
            .collect();
        rasterizer.submit(DrawList {
            matrix: self.matrix,
            resolution: self.resolution,
            ops,
        });
        self.stats.submitted_frames += 1;

        self.state = RedrawState::Clean;
        self.notify(RedrawState::Clean, dirty);
        true
    }

    fn compose_overlays(&self, ants: &MarchingAnts, overlay: &OverlayState) -> Vec<DrawOp> {
        let mut ops = Vec::new();
        if !self.outline.is_empty() {
            ops.push(DrawOp::SelectionOutline(OutlineDraw {
                edges: self.outline.clone(),
                dash_length: ants.dash_length(),
                dash_phase: ants.phase(),
            }));
        }
        if !overlay.tool_preview.is_empty() {
            ops.push(DrawOp::ToolPreview {
                cells: overlay.tool_preview.clone(),
                color: overlay.preview_color,
            });
        }
        if let Some(rect) = overlay.cursor {
            ops.push(DrawOp::CursorOutline { rect });
        }
        ops
    }

    fn notify(&mut self, state: RedrawState, dirty: Dirty) {
        for (_, observer) in &mut self.observers {
            observer(state, dirty);
        }
    }
}
