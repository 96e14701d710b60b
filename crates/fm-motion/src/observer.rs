//! Typed motion event callbacks.

use std::sync::mpsc::Sender;

use fm_core::Timestamp;

/// Callbacks fired by a [`MotionController`][crate::MotionController] on
/// playback transitions.
///
/// All methods default to no-ops so implementors override only the event
/// kinds they care about.
///
/// # Example — rotate a marker only when the segment changes
///
/// ```rust,ignore
/// struct SegmentCounter(usize);
///
/// impl MotionObserver for SegmentCounter {
///     fn on_segment(&mut self, _index: usize) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait MotionObserver {
    /// Motion began or resumed at `at`.
    fn on_start(&mut self, _at: Timestamp) {}

    fn on_pause(&mut self, _at: Timestamp) {}

    /// The controller returned to the first waypoint.
    fn on_reset(&mut self, _at: Timestamp) {}

    /// A segment was fully traversed; `index` is the newly entered segment.
    fn on_segment(&mut self, _index: usize) {}

    /// The final waypoint was reached at tick time `at`.
    fn on_end(&mut self, _at: Timestamp) {}
}

/// A [`MotionObserver`] that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl MotionObserver for NoopObserver {}

/// One recorded motion notification.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MotionEvent {
    Start { at: Timestamp },
    Pause { at: Timestamp },
    Reset { at: Timestamp },
    Segment { index: usize },
    End { at: Timestamp },
}

/// Appends every event to a `Vec` the host drains between frames.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    pub events: Vec<MotionEvent>,
}

impl EventLog {
    /// Take all recorded events, leaving the log empty.
    pub fn drain(&mut self) -> Vec<MotionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of recorded events matching `pred`.
    pub fn count(&self, pred: impl Fn(&MotionEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl MotionObserver for EventLog {
    fn on_start(&mut self, at: Timestamp) {
        self.events.push(MotionEvent::Start { at });
    }

    fn on_pause(&mut self, at: Timestamp) {
        self.events.push(MotionEvent::Pause { at });
    }

    fn on_reset(&mut self, at: Timestamp) {
        self.events.push(MotionEvent::Reset { at });
    }

    fn on_segment(&mut self, index: usize) {
        self.events.push(MotionEvent::Segment { index });
    }

    fn on_end(&mut self, at: Timestamp) {
        self.events.push(MotionEvent::End { at });
    }
}

/// Forwards events over a channel.  A disconnected receiver is ignored: the
/// host stopped listening, the animation carries on.
impl MotionObserver for Sender<MotionEvent> {
    fn on_start(&mut self, at: Timestamp) {
        let _ = self.send(MotionEvent::Start { at });
    }

    fn on_pause(&mut self, at: Timestamp) {
        let _ = self.send(MotionEvent::Pause { at });
    }

    fn on_reset(&mut self, at: Timestamp) {
        let _ = self.send(MotionEvent::Reset { at });
    }

    fn on_segment(&mut self, index: usize) {
        let _ = self.send(MotionEvent::Segment { index });
    }

    fn on_end(&mut self, at: Timestamp) {
        let _ = self.send(MotionEvent::End { at });
    }
}
