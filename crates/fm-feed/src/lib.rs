//! `fm-feed` — turn decoded position feeds into motion paths.
//!
//! The binary feed decoder lives upstream; this crate starts from records it
//! has already decoded.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`record`] | `PositionRecord`, `HeadingRecord`                          |
//! | [`track`]  | `TrackBook` — per-asset, time-ordered waypoints and headings |
//! | [`loader`] | `load_positions_csv`, `load_headings_csv`, reader variants |
//! | [`error`]  | `FeedError`, `FeedResult<T>`                               |
//!
//! # Typical use
//!
//! ```rust,ignore
//! let positions = load_positions_csv(Path::new("positions.csv"))?;
//! let headings  = load_headings_csv(Path::new("headings.csv"))?;
//! let book = TrackBook::from_records(positions).with_headings(headings);
//!
//! for asset in book.assets() {
//!     let path = book.path(asset, &Haversine)?;
//!     // hand `path` to a MotionBuilder
//! }
//! ```

pub mod error;
pub mod loader;
pub mod record;
pub mod track;


pub use error::{FeedError, FeedResult};
pub use loader::{load_headings_csv, load_headings_reader, load_positions_csv, load_positions_reader};
pub use record::{HeadingRecord, PositionRecord};
pub use track::{TrackBook, TrackPoint};
