//! `fm-motion` — animate assets along recorded waypoint paths.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                        |
//! |----------------|-----------------------------------------------------------------|
//! | [`path`]       | `Path` — validated waypoints with precomputed segment lengths   |
//! | [`state`]      | `MotionState`, `MotionOptions`, `Speed`, `Frame`                |
//! | [`observer`]   | `MotionObserver` trait, `MotionEvent`, `EventLog`, `NoopObserver` |
//! | [`controller`] | `MotionController<M, O>` — playback state machine + interpolation |
//! | [`builder`]    | `MotionBuilder` — fluent construction                           |
//! | [`fleet`]      | `Fleet<M, O>` — one controller per `AssetId`                    |
//! | [`error`]      | `MotionError`, `MotionResult<T>`                                |
//!
//! # Timing model
//!
//! The host calls [`MotionController::tick`] once per rendered frame with its
//! own clock reading.  The controller stores the timestamp at which the
//! current segment was (virtually) entered and recomputes
//! `distance = (now − anchor) × speed` on every tick, so irregular frame
//! pacing never accumulates error.  Pausing and speed changes shift that
//! anchor instead of touching accumulated distance:
//!
//! ```text
//!   resume:     anchor += paused_duration
//!   set_speed:  anchor  = ref − (ref − anchor) × old_speed / new_speed
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fm_core::{GeoPoint, Timestamp};
//! use fm_motion::{EventLog, MotionBuilder, Speed};
//!
//! let mut ctl = MotionBuilder::new(waypoints, Speed::knots(12.0))
//!     .observer(EventLog::default())
//!     .track_heading(true)
//!     .autoplay(true)
//!     .build(Timestamp::from_millis(now_ms))?;
//!
//! // every animation frame:
//! let frame = ctl.tick(Timestamp::from_millis(now_ms));
//! marker.set_position(frame.position);
//! ```

pub mod builder;
pub mod controller;
pub mod error;
pub mod fleet;
pub mod observer;
pub mod path;
pub mod state;

#[cfg(test)]
mod tests;

pub use builder::MotionBuilder;
pub use controller::MotionController;
pub use error::{MotionError, MotionResult};
pub use fleet::Fleet;
pub use observer::{EventLog, MotionEvent, MotionObserver, NoopObserver};
pub use path::Path;
pub use state::{Frame, MotionOptions, MotionState, Speed};
