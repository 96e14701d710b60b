//! The per-asset playback state machine.

use fm_core::{GeoPoint, Haversine, Metric, Timestamp};
use tracing::{debug, trace};

use crate::{
    Frame, MotionBuilder, MotionObserver, MotionOptions, MotionResult, MotionState, NoopObserver,
    Path, Speed,
};

/// Moves one asset along a fixed [`Path`] at a settable [`Speed`].
///
/// # Type parameters
///
/// - `M: Metric` measures segments and computes headings.  `Haversine` for
///   real coordinates; `Planar` for flat test fixtures.
/// - `O: MotionObserver` receives start/pause/reset/segment/end callbacks.
///
/// Every operation takes the host's current [`Timestamp`]; the controller
/// never reads a clock.  Calls that are invalid for the current state are
/// silently ignored.
pub struct MotionController<M: Metric = Haversine, O: MotionObserver = NoopObserver> {
    path:     Path,
    metric:   M,
    speed:    Speed,
    options:  MotionOptions,
    observer: O,

    state:    MotionState,

    /// Segment the asset is currently on.
    segment:  usize,

    /// Time at which the current segment was entered, shifted by pauses and
    /// speed changes so that `(now − anchor) × speed` is the distance into
    /// the segment.
    anchor:   Timestamp,

    /// Set while `Paused`.
    paused_at: Option<Timestamp>,

    position: GeoPoint,
    heading:  Option<f64>,
}

impl MotionController {
    /// Great-circle controller without an observer.
    ///
    /// Shorthand for `MotionBuilder::new(points, speed).options(options).build(now)`.
    pub fn new(
        points:  Vec<GeoPoint>,
        speed:   Speed,
        options: MotionOptions,
        now:     Timestamp,
    ) -> MotionResult<Self> {
        MotionBuilder::new(points, speed).options(options).build(now)
    }
}

impl<M: Metric, O: MotionObserver> MotionController<M, O> {
    /// Assemble a controller from validated parts.  Starts immediately when
    /// `options.autoplay` is set.
    pub(crate) fn from_parts(
        path:     Path,
        metric:   M,
        speed:    Speed,
        options:  MotionOptions,
        observer: O,
        now:      Timestamp,
    ) -> Self {
        let position = path.first();
        let mut ctl = Self {
            path,
            metric,
            speed,
            options,
            observer,
            state:     MotionState::Ready,
            segment:   0,
            anchor:    now,
            paused_at: None,
            position,
            heading:   None,
        };
        ctl.rewind();
        if options.autoplay {
            ctl.start(now);
        }
        ctl
    }

    // ── Playback control ──────────────────────────────────────────────────

    /// Begin, resume, or replay.
    ///
    /// From `Ready` or `Ended` the asset restarts at the first waypoint.  From
    /// `Paused` it resumes exactly where it stopped.  No-op while `Moving`.
    pub fn start(&mut self, now: Timestamp) {
        match self.state {
            MotionState::Moving => return,
            MotionState::Paused => {
                if let Some(paused_at) = self.paused_at.take() {
                    self.anchor = self.anchor + now.secs_since(paused_at);
                }
            }
            MotionState::Ready | MotionState::Ended => {
                self.rewind();
                self.anchor = now;
            }
        }
        self.state = MotionState::Moving;
        debug!(segment = self.segment, %now, "motion start");
        self.observer.on_start(now);
    }

    /// Freeze in place.  No-op unless `Moving`.
    ///
    /// The position is brought up to date first, so a pause issued after the
    /// path end has been passed ends the motion instead.
    pub fn pause(&mut self, now: Timestamp) {
        if self.state != MotionState::Moving {
            return;
        }
        self.advance(now);
        if self.state != MotionState::Moving {
            return;
        }
        self.paused_at = Some(now);
        self.state = MotionState::Paused;
        debug!(segment = self.segment, %now, "motion pause");
        self.observer.on_pause(now);
    }

    /// Return to the first waypoint in `Ready`; restarts at once with
    /// `autoplay`.
    pub fn reset(&mut self, now: Timestamp) {
        self.state = MotionState::Ready;
        self.paused_at = None;
        self.rewind();
        self.anchor = now;
        debug!(%now, "motion reset");
        self.observer.on_reset(now);
        if self.options.autoplay {
            self.start(now);
        }
    }

    /// Change speed without moving the asset.
    ///
    /// While `Moving` or `Paused`, the segment anchor is rescaled so the
    /// distance already covered on the current segment is unchanged; the next
    /// tick continues from the displayed position at the new rate.
    ///
    /// # Errors
    ///
    /// [`MotionError::InvalidSpeed`][crate::MotionError::InvalidSpeed] for a
    /// non-finite or non-positive speed; the old speed is kept.
    pub fn set_speed(&mut self, speed: Speed, now: Timestamp) -> MotionResult<()> {
        let speed = speed.validate()?;

        let reference = match self.state {
            MotionState::Moving => {
                self.advance(now);
                (self.state == MotionState::Moving).then_some(now)
            }
            MotionState::Paused => self.paused_at,
            MotionState::Ready | MotionState::Ended => None,
        };

        if let Some(reference) = reference {
            let elapsed = reference.secs_since(self.anchor);
            self.anchor = reference - elapsed * self.speed.as_mps() / speed.as_mps();
        }

        debug!(from = self.speed.as_mps(), to = speed.as_mps(), "motion speed change");
        self.speed = speed;
        Ok(())
    }

    /// Advance to `now` and report where the asset is.
    ///
    /// Only `Moving` controllers advance; in any other state the last
    /// position is reported unchanged.
    pub fn tick(&mut self, now: Timestamp) -> Frame {
        if self.state == MotionState::Moving {
            self.advance(now);
        }
        self.frame()
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.state == MotionState::Ready
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.state == MotionState::Moving
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.state == MotionState::Paused
    }

    #[inline]
    pub fn is_ended(&self) -> bool {
        self.state == MotionState::Ended
    }

    #[inline]
    pub fn state(&self) -> MotionState {
        self.state
    }

    /// Position as of the most recent operation.
    #[inline]
    pub fn position(&self) -> GeoPoint {
        self.position
    }

    #[inline]
    pub fn heading(&self) -> Option<f64> {
        self.heading
    }

    #[inline]
    pub fn segment_index(&self) -> usize {
        self.segment
    }

    #[inline]
    pub fn speed(&self) -> Speed {
        self.speed
    }

    #[inline]
    pub fn options(&self) -> MotionOptions {
        self.options
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn frame(&self) -> Frame {
        Frame {
            position: self.position,
            heading:  self.heading,
            segment:  self.segment,
            state:    self.state,
        }
    }

    /// Fraction of the total path length covered at `now`, in `[0, 1]`.
    ///
    /// Side-effect free: it does not fire segment events or change state.
    pub fn progress(&self, now: Timestamp) -> f64 {
        let elapsed = match self.state {
            MotionState::Ready => return 0.0,
            MotionState::Ended => return 1.0,
            MotionState::Moving => now.secs_since(self.anchor),
            MotionState::Paused => self.paused_at.unwrap_or(now).secs_since(self.anchor),
        };
        let covered = elapsed * self.speed.as_mps();

        let total = self.path.total_length();
        if total <= 0.0 {
            return 0.0;
        }
        ((self.path.segment_offset(self.segment) + covered) / total).clamp(0.0, 1.0)
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Walk forward from the current segment anchor to `now`.
    ///
    /// Consumes as many whole segments as the elapsed distance covers, so a
    /// single long frame still lands on the right segment, or on the final
    /// waypoint.
    fn advance(&mut self, now: Timestamp) {
        let speed = self.speed.as_mps();
        let mut travelled = now.secs_since(self.anchor) * speed;

        loop {
            let len = self.path.segment_length(self.segment);
            if travelled < len {
                let (a, b) = self.path.segment(self.segment);
                self.position = self.metric.interpolate(a, b, travelled / len);
                return;
            }

            travelled -= len;
            self.anchor = self.anchor + len / speed;

            if self.segment + 1 >= self.path.segment_count() {
                self.finish(now);
                return;
            }

            self.segment += 1;
            self.update_heading();
            trace!(segment = self.segment, "motion segment");
            self.observer.on_segment(self.segment);
        }
    }

    fn finish(&mut self, now: Timestamp) {
        self.position = self.path.last();
        self.state = MotionState::Ended;
        debug!(%now, "motion end");
        self.observer.on_end(now);

        if self.options.looping {
            self.reset(now);
            self.start(now);
        }
    }

    /// Cursor back to the first waypoint, without touching state or anchor.
    fn rewind(&mut self) {
        self.segment = 0;
        self.position = self.path.first();
        self.heading = None;
        self.update_heading();
    }

    /// Zero-length segments have no direction; the previous heading stands.
    fn update_heading(&mut self) {
        if !self.options.track_heading || self.path.segment_length(self.segment) <= 0.0 {
            return;
        }
        let (a, b) = self.path.segment(self.segment);
        self.heading = Some(self.metric.bearing(a, b));
    }
}
