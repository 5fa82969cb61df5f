use pixie_engine::EngineError;
use thiserror::Error;

/// Errors raised by edit operations on an [`super::EditState`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EditorError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Cannot remove the last layer")]
    CannotRemoveLastLayer,

    #[error("Cannot remove the last frame")]
    CannotRemoveLastFrame,

    #[error("Cannot move layer {0} further")]
    CannotMoveLayer(usize),
}

pub type Result<T> = std::result::Result<T, EditorError>;
