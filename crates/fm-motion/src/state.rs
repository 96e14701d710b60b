//! Playback state, options, speed, and the per-frame output record.

use fm_core::GeoPoint;

use crate::{MotionError, MotionResult};

/// Playback state of a single [`MotionController`][crate::MotionController].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MotionState {
    /// At the first waypoint, not yet started (or just reset).
    Ready,
    Moving,
    Paused,
    /// Reached the final waypoint.  `start` replays from the beginning.
    Ended,
}

/// Construction options.  All default to `false`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionOptions {
    /// Recompute the great-circle heading whenever the segment changes.
    pub track_heading: bool,

    /// Start moving immediately on construction and after every `reset`.
    pub autoplay: bool,

    /// On reaching the end, reset to the first waypoint and keep going.
    pub looping: bool,
}

// ── Speed ─────────────────────────────────────────────────────────────────────

/// Travel speed in metric length units per second (m/s under `Haversine`).
///
/// The constructors do not validate; controllers reject non-positive or
/// non-finite speeds at construction and in `set_speed`.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Speed(f64);

impl Speed {
    const KMH_TO_MPS:   f64 = 1_000.0 / 3_600.0;
    const KNOTS_TO_MPS: f64 = 1_852.0 / 3_600.0;

    /// Length units per second.
    #[inline]
    pub const fn mps(units_per_sec: f64) -> Self {
        Speed(units_per_sec)
    }

    #[inline]
    pub fn kmh(kmh: f64) -> Self {
        Speed(kmh * Self::KMH_TO_MPS)
    }

    /// Nautical miles per hour, as reported by AIS feeds.
    #[inline]
    pub fn knots(knots: f64) -> Self {
        Speed(knots * Self::KNOTS_TO_MPS)
    }

    #[inline]
    pub fn as_mps(self) -> f64 {
        self.0
    }

    pub fn validate(self) -> MotionResult<Self> {
        if self.0.is_finite() && self.0 > 0.0 {
            Ok(self)
        } else {
            Err(MotionError::InvalidSpeed(self.0))
        }
    }
}

// ── Frame ─────────────────────────────────────────────────────────────────────

/// What the host applies to its marker after a tick.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub position: GeoPoint,

    /// Compass heading in degrees; `None` unless heading tracking is enabled
    /// and a non-degenerate segment has been entered.
    pub heading:  Option<f64>,

    /// Index of the segment the asset is on.
    pub segment:  usize,

    pub state:    MotionState,
}
