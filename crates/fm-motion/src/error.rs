use thiserror::Error;

/// Precondition failures for motion construction and speed changes.
///
/// Ordinary state-transition no-ops (pausing an idle controller, starting a
/// moving one) are not errors; they happen routinely on double clicks.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MotionError {
    #[error("path needs at least 2 waypoints, got {got}")]
    InvalidPath { got: usize },

    #[error("waypoint {index} has a non-finite coordinate")]
    NonFiniteWaypoint { index: usize },

    #[error("speed must be finite and greater than zero, got {0}")]
    InvalidSpeed(f64),
}

pub type MotionResult<T> = Result<T, MotionError>;
