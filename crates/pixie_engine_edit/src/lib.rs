#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Editing layer of pixie: the project context that owns layers and
//! selection, the operations on it, brushes and tools.

mod editor;
pub use editor::*;

pub mod brushes;
pub mod tools;

pub use pixie_engine::{
    BlendMode, CellIndex, ColorOffset, Dirty, EngineError, Flip, Frame, Layer, LayerStack, Position, PostEffectScope, Rectangle, Rgba, RgbaImage,
    SelectionMode, SelectionSet, Size, TextureId,
};
