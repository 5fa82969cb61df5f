//! Unified error types for pixie_engine

use thiserror::Error;

/// Main error type for pixie_engine operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    // === Layer stack ===
    #[error("Invalid layer index {index} (layer count {count})")]
    InvalidLayer { index: usize, count: usize },

    #[error("Invalid frame index {index} (frame count {count})")]
    InvalidFrame { index: usize, count: usize },

    #[error("A layer stack needs at least one layer")]
    LastLayer,

    #[error("A layer stack needs at least one frame")]
    LastFrame,

    #[error("Invalid canvas size {size}")]
    InvalidSize { size: crate::Size },

    // === Configuration ===
    #[error("Failed to parse options: {message}")]
    ParseOptions { message: String },

    #[error("Failed to serialize options: {message}")]
    SerializeOptions { message: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;
