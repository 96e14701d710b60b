use fm_core::{FmError, LabelId};
use thiserror::Error;

/// Degenerate layout input.  A failed call leaves every label untouched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    #[error("invalid viewport: {0}")]
    Viewport(#[from] FmError),

    #[error("label {id} has invalid size {width} x {height}")]
    InvalidLabelSize { id: LabelId, width: f64, height: f64 },

    #[error("label {id} has a non-finite anchor or position")]
    NonFinitePoint { id: LabelId },

    #[error("layout configuration error: {0}")]
    Config(String),
}

pub type LayoutResult<T> = Result<T, LayoutError>;
