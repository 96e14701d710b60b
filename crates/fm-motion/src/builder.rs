//! Fluent builder for [`MotionController`].

use fm_core::{GeoPoint, Haversine, Metric, Timestamp};

use crate::{MotionController, MotionObserver, MotionOptions, MotionResult, NoopObserver, Path, Speed};

/// Fluent builder for [`MotionController<M, O>`].
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default                    |
/// |----------------------|----------------------------|
/// | `.metric(m)`         | `Haversine` (metres)       |
/// | `.observer(o)`       | `NoopObserver`             |
/// | `.options(o)`        | `MotionOptions::default()` |
/// | `.track_heading(b)`  | `false`                    |
/// | `.autoplay(b)`       | `false`                    |
/// | `.looping(b)`        | `false`                    |
///
/// # Example
///
/// ```rust,ignore
/// let ctl = MotionBuilder::new(points, Speed::mps(1.0))
///     .metric(Planar)
///     .observer(EventLog::default())
///     .looping(true)
///     .build(Timestamp::ZERO)?;
/// ```
pub struct MotionBuilder<M: Metric = Haversine, O: MotionObserver = NoopObserver> {
    points:   Vec<GeoPoint>,
    speed:    Speed,
    options:  MotionOptions,
    metric:   M,
    observer: O,
}

impl MotionBuilder {
    pub fn new(points: impl Into<Vec<GeoPoint>>, speed: Speed) -> Self {
        Self {
            points:   points.into(),
            speed,
            options:  MotionOptions::default(),
            metric:   Haversine,
            observer: NoopObserver,
        }
    }
}

impl<M: Metric, O: MotionObserver> MotionBuilder<M, O> {
    /// Swap the distance/bearing metric.
    pub fn metric<M2: Metric>(self, metric: M2) -> MotionBuilder<M2, O> {
        MotionBuilder {
            points:   self.points,
            speed:    self.speed,
            options:  self.options,
            metric,
            observer: self.observer,
        }
    }

    /// Attach an event observer.
    pub fn observer<O2: MotionObserver>(self, observer: O2) -> MotionBuilder<M, O2> {
        MotionBuilder {
            points:   self.points,
            speed:    self.speed,
            options:  self.options,
            metric:   self.metric,
            observer,
        }
    }

    pub fn options(mut self, options: MotionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn track_heading(mut self, on: bool) -> Self {
        self.options.track_heading = on;
        self
    }

    pub fn autoplay(mut self, on: bool) -> Self {
        self.options.autoplay = on;
        self
    }

    pub fn looping(mut self, on: bool) -> Self {
        self.options.looping = on;
        self
    }

    /// Validate the path and speed and return a controller.
    ///
    /// With `autoplay`, the controller is already `Moving` from `now`.
    ///
    /// # Errors
    ///
    /// `InvalidPath` / `NonFiniteWaypoint` for a bad path, `InvalidSpeed`
    /// for a non-positive or non-finite speed.
    pub fn build(self, now: Timestamp) -> MotionResult<MotionController<M, O>> {
        let path = Path::new(self.points, &self.metric)?;
        let speed = self.speed.validate()?;
        Ok(MotionController::from_parts(
            path,
            self.metric,
            speed,
            self.options,
            self.observer,
            now,
        ))
    }
}
