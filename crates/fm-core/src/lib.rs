//! `fm-core` — foundational types for the `fleetmap` live-map engines.
//!
//! This crate is a dependency of every other `fm-*` crate.  It has no `fm-*`
//! dependencies and a single required external one (`thiserror`), plus
//! optional `serde`.
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `AssetId`, `LabelId`                                      |
//! | [`geo`]     | `GeoPoint`, `Metric`, `Haversine`, `Planar`               |
//! | [`screen`]  | `Vec2`/`ScreenPoint`, `Size`, `Rect`, `Viewport`          |
//! | [`time`]    | `Timestamp`                                               |
//! | [`error`]   | `FmError`, `FmResult`                                     |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod screen;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{FmError, FmResult};
pub use geo::{GeoPoint, Haversine, Metric, Planar};
pub use ids::{AssetId, LabelId};
pub use screen::{Rect, ScreenPoint, Size, Vec2, Viewport};
pub use time::Timestamp;
