//! Shared error type for geometry construction.
//!
//! Sub-crates define their own error enums and wrap `FmError` as one variant
//! via `#[from]`.

use thiserror::Error;

/// Errors raised when a caller-supplied primitive violates a precondition.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FmError {
    #[error("{what} is not finite")]
    NonFinite { what: &'static str },

    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("viewport {width} x {height} has no area")]
    EmptyViewport { width: f64, height: f64 },
}

/// Shorthand result type for `fm-core` constructors.
pub type FmResult<T> = Result<T, FmError>;
