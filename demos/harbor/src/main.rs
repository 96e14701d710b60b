//! harbor — live-map demo for the fleetmap engines.
//!
//! Loads a small embedded AIS-style feed, animates every vessel along its
//! track with deliberately irregular frame pacing, and at fixed checkpoints
//! projects the fleet to a 1024 × 768 screen and declutters the vessel
//! labels.  The checkpoints are printed as JSON on stdout.
//!
//! ```text
//! RUST_LOG=debug cargo run -p harbor -- harbor.json
//! ```
//!
//! The optional argument is a JSON file with `motion` and/or `declutter`
//! sections; missing fields keep their defaults.

mod tracks;

use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fm_core::{AssetId, GeoPoint, Haversine, LabelId, Size, Timestamp, Vec2, Viewport};
use fm_declutter::{AnchoredLabel, DeclutterConfig, DeclutterLayout, PlacedLabel};
use fm_feed::{TrackBook, load_headings_reader, load_positions_reader};
use fm_motion::{EventLog, Fleet, MotionBuilder, MotionEvent, MotionOptions, MotionState, Speed};

use tracks::{HEADINGS_CSV, POSITIONS_CSV};

// ── Constants ─────────────────────────────────────────────────────────────────

const SCREEN_W:     f64 = 1024.0;
const SCREEN_H:     f64 = 768.0;
const MARGIN_PX:    f64 = 48.0;
const LABEL_SIZE:   Size = Size::new(96.0, 22.0);
const CRUISE_KNOTS: f64 = 14.0;
const RUN_SECS:     f64 = 300.0;

/// Frame intervals cycled through to mimic a busy browser tab.
const FRAME_DELTAS: [f64; 6] = [1.0 / 60.0, 1.0 / 60.0, 1.0 / 30.0, 0.25, 1.0 / 60.0, 2.5];

/// Times at which the fleet is projected and decluttered.
const CHECKPOINTS: [f64; 4] = [0.0, 60.0, 150.0, 300.0];

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HarborConfig {
    motion:    MotionOptions,
    declutter: DeclutterConfig,
}

fn load_config(path: Option<&Path>) -> Result<HarborConfig> {
    let Some(path) = path else {
        return Ok(HarborConfig {
            motion: MotionOptions { track_heading: true, ..MotionOptions::default() },
            ..HarborConfig::default()
        });
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

// ── Output ────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct Checkpoint {
    time:    f64,
    moving:  usize,
    vessels: Vec<VesselFrame>,
}

#[derive(Serialize)]
struct VesselFrame {
    asset:          AssetId,
    position:       GeoPoint,
    heading:        Option<f64>,
    /// Course last reported by the feed, for comparison with `heading`.
    feed_heading:   Option<f64>,
    state:          MotionState,
    segment:        usize,
    label:          PlacedLabel,
}

// ── Projection ────────────────────────────────────────────────────────────────

/// Equirectangular projection of a lat/lon box onto the screen.
struct Projection {
    origin:  GeoPoint,
    scale_x: f64,
    scale_y: f64,
}

impl Projection {
    fn fit(book: &TrackBook, viewport: &Viewport) -> Option<Self> {
        let points: Vec<GeoPoint> =
            book.assets().filter_map(|a| book.waypoints(a)).flatten().collect();
        let (first, rest) = points.split_first()?;

        let (mut min, mut max) = (*first, *first);
        for p in rest {
            min = GeoPoint::new(min.lat.min(p.lat), min.lon.min(p.lon));
            max = GeoPoint::new(max.lat.max(p.lat), max.lon.max(p.lon));
        }

        // Shrink longitude by cos(lat) so the map is not stretched east-west.
        let cos_lat = ((min.lat + max.lat) * 0.5).to_radians().cos();
        let span_x = ((max.lon - min.lon) * cos_lat).max(f64::EPSILON);
        let span_y = (max.lat - min.lat).max(f64::EPSILON);
        let scale = ((viewport.width() - 2.0 * MARGIN_PX) / span_x)
            .min((viewport.height() - 2.0 * MARGIN_PX) / span_y);

        Some(Self {
            origin:  GeoPoint::new(max.lat, min.lon),
            scale_x: scale * cos_lat,
            scale_y: scale,
        })
    }

    fn project(&self, p: GeoPoint) -> Vec2 {
        Vec2::new(
            MARGIN_PX + (p.lon - self.origin.lon) * self.scale_x,
            MARGIN_PX + (self.origin.lat - p.lat) * self.scale_y,
        )
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config_path = std::env::args().nth(1);
    let config = load_config(config_path.as_deref().map(Path::new))?;

    // 1. Feed → tracks.
    let positions = load_positions_reader(Cursor::new(POSITIONS_CSV))?;
    let headings = load_headings_reader(Cursor::new(HEADINGS_CSV))?;
    let book = TrackBook::from_records(positions).with_headings(headings);
    info!(vessels = book.len(), "feed loaded");

    // 2. One controller per vessel.
    let start = Timestamp::ZERO;
    let mut fleet: Fleet<Haversine, EventLog> = Fleet::new();
    for asset in book.assets() {
        let points = book.waypoints(asset).context("asset listed without a track")?;
        let controller = MotionBuilder::new(points, Speed::knots(CRUISE_KNOTS))
            .observer(EventLog::default())
            .options(config.motion)
            .build(start)?;
        fleet.insert(asset, controller);
    }
    fleet.start_all(start);

    // 3. Screen setup.
    let viewport = Viewport::sized(SCREEN_W, SCREEN_H);
    let projection = Projection::fit(&book, &viewport).context("feed has no positions")?;
    let layout = DeclutterLayout::new(config.declutter);
    let mut labels: BTreeMap<AssetId, AnchoredLabel> = BTreeMap::new();

    // 4. Animate with irregular frames; declutter at each checkpoint.
    let mut checkpoints = Vec::with_capacity(CHECKPOINTS.len());
    let mut next_checkpoint = CHECKPOINTS.iter().copied().peekable();
    let mut now = 0.0;
    let mut frame_no = 0usize;
    let mut slowed = false;

    loop {
        let frames = fleet.tick_all(Timestamp::from_secs(now));

        // Vessels slow down to harbour speed halfway through.
        if !slowed && now >= RUN_SECS * 0.5 {
            fleet.set_speed_all(Speed::knots(CRUISE_KNOTS * 0.5), Timestamp::from_secs(now))?;
            slowed = true;
            info!(t = now, "fleet slowed to harbour speed");
        }

        if next_checkpoint.next_if(|&c| now >= c).is_some() {
            let mut open: Vec<AnchoredLabel> = frames
                .iter()
                .map(|&(asset, frame)| {
                    let anchor = projection.project(frame.position);
                    let label = labels.entry(asset).or_insert_with(|| {
                        AnchoredLabel::new(LabelId(asset.0), anchor, LABEL_SIZE)
                    });
                    label.anchor = anchor;
                    label.clone()
                })
                .collect();

            let placement = layout.run(&mut open, viewport)?;
            for label in open {
                labels.insert(AssetId(label.id.0), label);
            }

            let vessels = frames
                .iter()
                .zip(placement.labels)
                .map(|(&(asset, frame), label)| VesselFrame {
                    asset,
                    position: frame.position,
                    heading: frame.heading,
                    feed_heading: book.latest_heading(asset),
                    state: frame.state,
                    segment: frame.segment,
                    label,
                })
                .collect();

            checkpoints.push(Checkpoint { time: now, moving: fleet.moving_count(), vessels });
        }

        if now >= RUN_SECS {
            break;
        }
        now = (now + FRAME_DELTAS[frame_no % FRAME_DELTAS.len()]).min(RUN_SECS);
        frame_no += 1;
    }

    // 5. Summary on stderr, checkpoints on stdout.
    for (asset, controller) in fleet.iter() {
        let log = controller.observer();
        info!(
            %asset,
            segments = log.count(|e| matches!(e, MotionEvent::Segment { .. })),
            ended = log.count(|e| matches!(e, MotionEvent::End { .. })),
            progress = controller.progress(Timestamp::from_secs(now)),
            "vessel summary"
        );
    }

    println!("{}", serde_json::to_string_pretty(&checkpoints)?);
    Ok(())
}
