//! Tool definitions for pixel editing
//!
//! [`Tool`] names a tool for toolbars and shortcuts, [`ActiveTool`] is the
//! selected tool together with its in-progress drag state. Tools are
//! organized in toggle pairs: clicking an already-selected tool switches to
//! its partner.

use pixie_engine::{Position, Rectangle, Rgba, SelectionMode};

use crate::{
    EditState,
    brushes::{BrushShape, line},
};

/// Available editing tools
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tool {
    #[default]
    Pencil,
    Eraser,
    Line,
    RectSelect,
    ColorPicker,
}

/// A toggle pair of tools sharing one icon slot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToolPair {
    pub primary: Tool,
    pub secondary: Tool,
}

impl ToolPair {
    pub const fn new(primary: Tool, secondary: Tool) -> Self {
        Self { primary, secondary }
    }

    pub const fn single(tool: Tool) -> Self {
        Self {
            primary: tool,
            secondary: tool,
        }
    }

    pub fn contains(&self, tool: Tool) -> bool {
        self.primary == tool || self.secondary == tool
    }

    /// Get the other tool in the pair
    pub fn toggle(&self, current: Tool) -> Tool {
        if current == self.primary { self.secondary } else { self.primary }
    }
}

pub const TOOL_SLOTS: [ToolPair; 4] = [
    ToolPair::new(Tool::Pencil, Tool::Eraser),
    ToolPair::single(Tool::Line),
    ToolPair::single(Tool::RectSelect),
    ToolPair::single(Tool::ColorPicker),
];

impl Tool {
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Pencil => "Pencil",
            Tool::Eraser => "Eraser",
            Tool::Line => "Line",
            Tool::RectSelect => "Rectangle Select",
            Tool::ColorPicker => "Color Picker",
        }
    }

    pub fn shortcut(&self) -> Option<char> {
        match self {
            Tool::Pencil => Some('p'),
            Tool::Eraser => Some('e'),
            Tool::Line => Some('l'),
            Tool::RectSelect => Some('r'),
            Tool::ColorPicker => Some('i'),
        }
    }

    pub fn slot_index(&self) -> usize {
        TOOL_SLOTS.iter().position(|pair| pair.contains(*self)).unwrap_or(0)
    }

    /// Tools whose footprint follows the brush size.
    pub fn uses_brush(&self) -> bool {
        matches!(self, Tool::Pencil | Tool::Eraser | Tool::Line)
    }
}

/// Handle clicking on a tool slot - returns the new tool
pub fn click_tool_slot(slot: usize, current_tool: Tool) -> Tool {
    let Some(pair) = TOOL_SLOTS.get(slot) else {
        return current_tool;
    };
    if pair.contains(current_tool) { pair.toggle(current_tool) } else { pair.primary }
}

/// What a pointer event did to the project.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToolEvent {
    None,
    /// Only the tool preview changed
    Redraw,
    /// Project data changed; the string describes the edit
    Commit(String),
}

/// The selected tool with its drag state.
///
/// Positions passed to the pointer handlers are footprint origins: for
/// brush tools the top-left cell of the brush, otherwise the cell under the
/// pointer.
#[derive(Clone, Debug, PartialEq)]
pub enum ActiveTool {
    Pencil { shape: BrushShape, last: Option<Position> },
    Eraser { shape: BrushShape, last: Option<Position> },
    Line { shape: BrushShape, start: Option<Position>, end: Position },
    RectSelect { mode: SelectionMode, anchor: Option<Position>, lead: Position },
    ColorPicker { picking: bool },
}

impl Default for ActiveTool {
    fn default() -> Self {
        Self::new(Tool::default())
    }
}

impl From<Tool> for ActiveTool {
    fn from(tool: Tool) -> Self {
        Self::new(tool)
    }
}

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

impl ActiveTool {
    pub fn new(tool: Tool) -> Self {
        match tool {
            Tool::Pencil => ActiveTool::Pencil {
                shape: BrushShape::Square,
                last: None,
            },
            Tool::Eraser => ActiveTool::Eraser {
                shape: BrushShape::Square,
                last: None,
            },
            Tool::Line => ActiveTool::Line {
                shape: BrushShape::Square,
                start: None,
                end: Position::default(),
            },
            Tool::RectSelect => ActiveTool::RectSelect {
                mode: SelectionMode::Replace,
                anchor: None,
                lead: Position::default(),
            },
            Tool::ColorPicker => ActiveTool::ColorPicker { picking: false },
        }
    }

    pub fn tool(&self) -> Tool {
        match self {
            ActiveTool::Pencil { .. } => Tool::Pencil,
            ActiveTool::Eraser { .. } => Tool::Eraser,
            ActiveTool::Line { .. } => Tool::Line,
            ActiveTool::RectSelect { .. } => Tool::RectSelect,
            ActiveTool::ColorPicker { .. } => Tool::ColorPicker,
        }
    }

    /// Side length of the cell footprint under the pointer.
    pub fn footprint_size(&self, state: &EditState) -> i32 {
        if self.tool().uses_brush() { state.brush_size() } else { 1 }
    }

    pub fn is_dragging(&self) -> bool {
        match self {
            ActiveTool::Pencil { last, .. } | ActiveTool::Eraser { last, .. } => last.is_some(),
            ActiveTool::Line { start, .. } => start.is_some(),
            ActiveTool::RectSelect { anchor, .. } => anchor.is_some(),
            ActiveTool::ColorPicker { picking } => *picking,
        }
    }

    pub fn on_pointer_down(&mut self, state: &mut EditState, pos: Position) -> ToolEvent {
        match self {
            ActiveTool::Pencil { shape, last } => {
                *last = Some(pos);
                let color = state.primary_color();
                stroke(state, pos, pos, *shape, color, "Pencil")
            }
            ActiveTool::Eraser { shape, last } => {
                *last = Some(pos);
                stroke(state, pos, pos, *shape, TRANSPARENT, "Eraser")
            }
            ActiveTool::Line { start, end, .. } => {
                *start = Some(pos);
                *end = pos;
                ToolEvent::Redraw
            }
            ActiveTool::RectSelect { anchor, lead, .. } => {
                *anchor = Some(pos);
                *lead = pos;
                ToolEvent::Redraw
            }
            ActiveTool::ColorPicker { picking } => {
                *picking = true;
                pick_color(state, pos)
            }
        }
    }

    pub fn on_pointer_move(&mut self, state: &mut EditState, pos: Position) -> ToolEvent {
        match self {
            ActiveTool::Pencil { shape, last } => {
                let Some(from) = last.replace(pos) else {
                    return ToolEvent::None;
                };
                let color = state.primary_color();
                stroke(state, from, pos, *shape, color, "Pencil")
            }
            ActiveTool::Eraser { shape, last } => {
                let Some(from) = last.replace(pos) else {
                    return ToolEvent::None;
                };
                stroke(state, from, pos, *shape, TRANSPARENT, "Eraser")
            }
            ActiveTool::Line { start: Some(_), end, .. } | ActiveTool::RectSelect { anchor: Some(_), lead: end, .. } => {
                if *end == pos {
                    return ToolEvent::None;
                }
                *end = pos;
                ToolEvent::Redraw
            }
            ActiveTool::ColorPicker { picking: true } => pick_color(state, pos),
            _ => ToolEvent::None,
        }
    }

    pub fn on_pointer_up(&mut self, state: &mut EditState, pos: Position) -> ToolEvent {
        match self {
            ActiveTool::Pencil { last, .. } | ActiveTool::Eraser { last, .. } => {
                *last = None;
                ToolEvent::None
            }
            ActiveTool::Line { shape, start, .. } => {
                let Some(from) = start.take() else {
                    return ToolEvent::None;
                };
                let color = state.primary_color();
                match stroke(state, from, pos, *shape, color, "Line") {
                    ToolEvent::None => ToolEvent::Redraw,
                    event => event,
                }
            }
            ActiveTool::RectSelect { mode, anchor, .. } => {
                let Some(from) = anchor.take() else {
                    return ToolEvent::None;
                };
                state.select_rectangle(Rectangle::from_pt(from, pos), *mode);
                ToolEvent::Commit("Select rectangle".to_string())
            }
            ActiveTool::ColorPicker { picking } => {
                *picking = false;
                ToolEvent::None
            }
        }
    }

    /// Cells the tool previews while dragging.
    pub fn preview_cells(&self, state: &EditState) -> Vec<Position> {
        match self {
            ActiveTool::Line { shape, start: Some(start), end } => line::line_footprint(*start, *end, state.brush_size(), *shape),
            ActiveTool::RectSelect { anchor: Some(anchor), lead, .. } => rectangle_border(Rectangle::from_pt(*anchor, *lead)),
            _ => Vec::new(),
        }
    }
}

fn stroke(state: &mut EditState, from: Position, to: Position, shape: BrushShape, color: Rgba<u8>, description: &str) -> ToolEvent {
    let size = state.brush_size();
    if line::draw_line(state, from, to, size, shape, color) > 0 {
        ToolEvent::Commit(description.to_string())
    } else {
        ToolEvent::None
    }
}

fn pick_color(state: &mut EditState, pos: Position) -> ToolEvent {
    match state.pixel_at(pos) {
        Some(color) if color != state.primary_color() => {
            state.set_primary_color(color);
            ToolEvent::Redraw
        }
        _ => ToolEvent::None,
    }
}

fn rectangle_border(rect: Rectangle) -> Vec<Position> {
    rect.positions()
        .filter(|pos| pos.x == rect.left() || pos.y == rect.top() || pos.x == rect.right() - 1 || pos.y == rect.bottom() - 1)
        .collect()
}
