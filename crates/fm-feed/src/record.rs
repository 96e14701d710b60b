//! Records as produced by the upstream feed decoder.

use fm_core::{AssetId, GeoPoint, Timestamp};

/// One reported position of one asset.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PositionRecord {
    pub time:     Timestamp,
    pub asset_id: AssetId,
    pub lat:      f64,
    pub lon:      f64,
}

impl PositionRecord {
    #[inline]
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

/// One reported course of one asset, in degrees clockwise from north.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HeadingRecord {
    pub time:     Timestamp,
    pub asset_id: AssetId,
    pub heading:  f64,
}
