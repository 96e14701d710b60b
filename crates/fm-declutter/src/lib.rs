//! `fm-declutter` — keep clustered marker labels legible.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`label`]     | `AnchoredLabel` input, `PlacedLabel` / `Placement` output    |
//! | [`config`]    | `DeclutterConfig` — iteration counts and tuning constants    |
//! | [`force`]     | Seeding, cooling loop, and settle phase of the spring model  |
//! | [`connector`] | Leader lines from anchor to the nearest label edge midpoint  |
//! | [`layout`]    | `DeclutterLayout` — validation, pipeline, commit             |
//! | [`error`]     | `LayoutError`, `LayoutResult<T>`                             |
//!
//! # Pipeline
//!
//! ```text
//! validate → seed new labels → cooling loop (Fruchterman–Reingold)
//!          → settle (energy descent) → clamp to viewport
//!          → residual overlap pass → connectors
//! ```
//!
//! Both simulation phases keep every label box inside the viewport, and the
//! overlap pass re-clamps each label it moves.
//!
//! Labels repel each other with `k² / d` and are pulled to their own anchor
//! with `d² / k`, where `k = sqrt(W·H / 10 / n)`.  Anchors never move.
//!
//! # Cost
//!
//! Every iteration is O(n²) in the number of open labels.  Run the layout on
//! pan/zoom end or when the label set changes, not every frame.

pub mod config;
pub mod connector;
pub mod error;
pub mod force;
pub mod label;
pub mod layout;


pub use config::DeclutterConfig;
pub use connector::{Connector, ConnectorEdge};
pub use error::{LayoutError, LayoutResult};
pub use label::{AnchoredLabel, PlacedLabel, Placement};
pub use layout::DeclutterLayout;
