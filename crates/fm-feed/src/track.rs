//! Per-asset tracks assembled from decoded feed records.

use std::collections::BTreeMap;

use fm_core::{AssetId, GeoPoint, Metric, Timestamp};
use fm_motion::Path;
use tracing::debug;

use crate::{FeedError, FeedResult, HeadingRecord, PositionRecord};

/// A timestamped waypoint on one asset's track.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TrackPoint {
    pub time:  Timestamp,
    pub point: GeoPoint,
}

/// Time-ordered waypoints and headings for every asset seen in a feed.
///
/// Records may arrive in any order.  Within one asset, records are ordered by
/// time (stable, so equal timestamps keep feed order) and a report that
/// repeats the previous coordinate is dropped; a vessel at anchor otherwise
/// produces long runs of zero-length segments.
#[derive(Clone, Debug, Default)]
pub struct TrackBook {
    tracks:   BTreeMap<AssetId, Vec<TrackPoint>>,
    headings: BTreeMap<AssetId, Vec<(Timestamp, f64)>>,
}

impl TrackBook {
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = PositionRecord>,
    {
        let mut tracks: BTreeMap<AssetId, Vec<TrackPoint>> = BTreeMap::new();
        let mut total = 0usize;
        for r in records {
            tracks
                .entry(r.asset_id)
                .or_default()
                .push(TrackPoint { time: r.time, point: r.point() });
            total += 1;
        }

        for track in tracks.values_mut() {
            track.sort_by(|a, b| a.time.as_secs().total_cmp(&b.time.as_secs()));
            track.dedup_by(|next, prev| next.point == prev.point);
        }

        debug!(assets = tracks.len(), records = total, "track book built");
        Self { tracks, headings: BTreeMap::new() }
    }

    /// Attach course reports.  Headings for assets with no position track are
    /// kept too; the host may still show them on a static marker.
    pub fn with_headings<I>(mut self, records: I) -> Self
    where
        I: IntoIterator<Item = HeadingRecord>,
    {
        for r in records {
            self.headings.entry(r.asset_id).or_default().push((r.time, r.heading));
        }
        for samples in self.headings.values_mut() {
            samples.sort_by(|a, b| a.0.as_secs().total_cmp(&b.0.as_secs()));
        }
        self
    }

    /// Assets with a position track, in ascending id order.
    pub fn assets(&self) -> impl Iterator<Item = AssetId> + '_ {
        self.tracks.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn track(&self, asset: AssetId) -> Option<&[TrackPoint]> {
        self.tracks.get(&asset).map(Vec::as_slice)
    }

    pub fn waypoints(&self, asset: AssetId) -> Option<Vec<GeoPoint>> {
        self.track(asset).map(|t| t.iter().map(|p| p.point).collect())
    }

    /// First and last report time of an asset's track.
    pub fn time_span(&self, asset: AssetId) -> Option<(Timestamp, Timestamp)> {
        let track = self.track(asset)?;
        Some((track.first()?.time, track.last()?.time))
    }

    /// Build a motion path from an asset's waypoints.
    ///
    /// # Errors
    ///
    /// [`FeedError::UnknownAsset`] when the asset has no track, and
    /// [`FeedError::Motion`] when the track is too short for a path (a single
    /// report, or only repeats of one coordinate).
    pub fn path<M: Metric>(&self, asset: AssetId, metric: &M) -> FeedResult<Path> {
        let points = self.waypoints(asset).ok_or(FeedError::UnknownAsset(asset))?;
        Ok(Path::new(points, metric)?)
    }

    /// Most recent reported heading, if any.
    pub fn latest_heading(&self, asset: AssetId) -> Option<f64> {
        self.headings.get(&asset)?.last().map(|&(_, h)| h)
    }
}
