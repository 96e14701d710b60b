//! Validated waypoint paths.

use fm_core::{GeoPoint, Metric};

use crate::{MotionError, MotionResult};

/// An ordered list of at least two waypoints with precomputed segment lengths.
///
/// Consecutive duplicate waypoints are kept; they form zero-length segments
/// that the controller steps over without consuming time.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    points:  Vec<GeoPoint>,
    /// `lengths[i]` is the length of segment `i` (`points[i] → points[i + 1]`).
    lengths: Vec<f64>,
    /// `offsets[i]` is the path distance at which segment `i` begins.
    offsets: Vec<f64>,
    total:   f64,
}

impl Path {
    /// Validate `points` and measure every segment with `metric`.
    ///
    /// # Errors
    ///
    /// [`MotionError::InvalidPath`] for fewer than two points,
    /// [`MotionError::NonFiniteWaypoint`] for NaN or infinite coordinates.
    pub fn new<M: Metric>(points: Vec<GeoPoint>, metric: &M) -> MotionResult<Self> {
        if points.len() < 2 {
            return Err(MotionError::InvalidPath { got: points.len() });
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(MotionError::NonFiniteWaypoint { index });
        }

        let lengths: Vec<f64> = points
            .windows(2)
            .map(|w| metric.distance(w[0], w[1]))
            .collect();

        let mut offsets = Vec::with_capacity(lengths.len());
        let mut total = 0.0;
        for len in &lengths {
            offsets.push(total);
            total += len;
        }

        Ok(Self { points, lengths, offsets, total })
    }

    #[inline]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    #[inline]
    pub fn point(&self, index: usize) -> GeoPoint {
        self.points[index]
    }

    #[inline]
    pub fn first(&self) -> GeoPoint {
        self.points[0]
    }

    #[inline]
    pub fn last(&self) -> GeoPoint {
        self.points[self.points.len() - 1]
    }

    /// Number of segments; always `points().len() - 1 >= 1`.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.lengths.len()
    }

    /// Endpoints of segment `index`.
    #[inline]
    pub fn segment(&self, index: usize) -> (GeoPoint, GeoPoint) {
        (self.points[index], self.points[index + 1])
    }

    #[inline]
    pub fn segment_length(&self, index: usize) -> f64 {
        self.lengths[index]
    }

    /// Path distance at which segment `index` begins.
    #[inline]
    pub fn segment_offset(&self, index: usize) -> f64 {
        self.offsets[index]
    }

    #[inline]
    pub fn total_length(&self) -> f64 {
        self.total
    }
}
