//! Host wall-clock time.
//!
//! The engines never read a clock themselves: the host passes a `Timestamp`
//! into every time-dependent operation.  Elapsed time is always recomputed
//! from stored anchor timestamps, so irregular frame pacing cannot drift.

use std::fmt;

/// A point on the host's monotonic clock, in seconds.
///
/// The origin is arbitrary (typically page load or process start); only
/// differences between timestamps are meaningful.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp(pub f64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0.0);

    #[inline]
    pub fn from_secs(secs: f64) -> Self {
        Timestamp(secs)
    }

    /// Browser-style `performance.now()` millisecond readings.
    #[inline]
    pub fn from_millis(millis: f64) -> Self {
        Timestamp(millis / 1_000.0)
    }

    #[inline]
    pub fn as_secs(self) -> f64 {
        self.0
    }

    /// Seconds elapsed from `earlier` to `self`, floored at zero so a clock
    /// that steps backwards never produces negative travel.
    #[inline]
    pub fn secs_since(self, earlier: Timestamp) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }
}

impl std::ops::Add<f64> for Timestamp {
    type Output = Timestamp;
    #[inline]
    fn add(self, secs: f64) -> Timestamp {
        Timestamp(self.0 + secs)
    }
}

impl std::ops::Sub<f64> for Timestamp {
    type Output = Timestamp;
    #[inline]
    fn sub(self, secs: f64) -> Timestamp {
        Timestamp(self.0 - secs)
    }
}

impl std::ops::Sub for Timestamp {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: Timestamp) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}
