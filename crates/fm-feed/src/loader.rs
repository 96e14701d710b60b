//! CSV feed loaders.
//!
//! # CSV format
//!
//! Positions, one row per report, `time` in seconds:
//!
//! ```csv
//! time,asset_id,lat,lon
//! 0.0,7,59.9100,10.7400
//! 30.0,7,59.9105,10.7420
//! 0.0,9,59.9050,10.7300
//! ```
//!
//! Headings, degrees clockwise from north:
//!
//! ```csv
//! time,asset_id,heading
//! 30.0,7,74.5
//! ```
//!
//! Rows need not be sorted; [`TrackBook`](crate::TrackBook) orders them.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use fm_core::{AssetId, GeoPoint, Timestamp};

use crate::{FeedError, FeedResult, HeadingRecord, PositionRecord};

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct PositionRow {
    time:     f64,
    asset_id: u32,
    lat:      f64,
    lon:      f64,
}

#[derive(Deserialize)]
struct HeadingRow {
    time:     f64,
    asset_id: u32,
    heading:  f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load position reports from a CSV file.
pub fn load_positions_csv(path: &Path) -> FeedResult<Vec<PositionRecord>> {
    let file = std::fs::File::open(path).map_err(FeedError::Io)?;
    load_positions_reader(file)
}

/// Like [`load_positions_csv`] but accepts any `Read` source.
///
/// Rows with a non-finite time or coordinate, or a latitude outside
/// `[-90, 90]`, are rejected with [`FeedError::Parse`] naming the line.
pub fn load_positions_reader<R: Read>(reader: R) -> FeedResult<Vec<PositionRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (i, result) in csv_reader.deserialize::<PositionRow>().enumerate() {
        let row = result.map_err(|e| FeedError::Parse(e.to_string()))?;
        let line = i + 2;
        let time = parse_time(row.time, line)?;
        let point = GeoPoint::try_new(row.lat, row.lon)
            .map_err(|e| FeedError::Parse(format!("line {line}: {e}")))?;
        records.push(PositionRecord {
            time,
            asset_id: AssetId(row.asset_id),
            lat:      point.lat,
            lon:      point.lon,
        });
    }

    Ok(records)
}

/// Load heading reports from a CSV file.
pub fn load_headings_csv(path: &Path) -> FeedResult<Vec<HeadingRecord>> {
    let file = std::fs::File::open(path).map_err(FeedError::Io)?;
    load_headings_reader(file)
}

/// Like [`load_headings_csv`] but accepts any `Read` source.
///
/// Headings are normalised into `[0, 360)`.
pub fn load_headings_reader<R: Read>(reader: R) -> FeedResult<Vec<HeadingRecord>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (i, result) in csv_reader.deserialize::<HeadingRow>().enumerate() {
        let row = result.map_err(|e| FeedError::Parse(e.to_string()))?;
        let line = i + 2;
        let time = parse_time(row.time, line)?;
        if !row.heading.is_finite() {
            return Err(FeedError::Parse(format!("line {line}: heading is not finite")));
        }
        records.push(HeadingRecord {
            time,
            asset_id: AssetId(row.asset_id),
            heading:  row.heading.rem_euclid(360.0),
        });
    }

    Ok(records)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_time(secs: f64, line: usize) -> FeedResult<Timestamp> {
    if secs.is_finite() {
        Ok(Timestamp::from_secs(secs))
    } else {
        Err(FeedError::Parse(format!("line {line}: time is not finite")))
    }
}
