//! Geographic coordinates and the distance/bearing metrics used to walk paths.
//!
//! `GeoPoint` uses `f64` latitude/longitude.  Interpolated marker positions
//! are fed back into the map every frame, and single precision visibly
//! jitters at harbour zoom levels.

use crate::{FmError, FmResult};

/// A WGS-84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Checked constructor for coordinates coming from outside the process.
    pub fn try_new(lat: f64, lon: f64) -> FmResult<Self> {
        if !lat.is_finite() {
            return Err(FmError::NonFinite { what: "latitude" });
        }
        if !lon.is_finite() {
            return Err(FmError::NonFinite { what: "longitude" });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(FmError::LatitudeOutOfRange(lat));
        }
        Ok(Self { lat, lon })
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── Metric ────────────────────────────────────────────────────────────────────

/// Distance and direction between two geographic points.
///
/// Motion controllers are generic over `Metric` so the same path-walking code
/// runs on real great-circle distances in production and on a flat
/// one-unit-per-degree plane in tests.
pub trait Metric {
    /// Distance from `a` to `b` in the metric's length unit.
    fn distance(&self, a: GeoPoint, b: GeoPoint) -> f64;

    /// Compass bearing from `a` to `b` in degrees, clockwise from north,
    /// normalised to `[0, 360)`.
    fn bearing(&self, a: GeoPoint, b: GeoPoint) -> f64;

    /// Point at `fraction` of the way from `a` to `b`.
    ///
    /// Linear in latitude/longitude; segments between recorded positions are
    /// short enough that the difference from the geodesic is sub-pixel.
    fn interpolate(&self, a: GeoPoint, b: GeoPoint, fraction: f64) -> GeoPoint {
        GeoPoint {
            lat: a.lat + (b.lat - a.lat) * fraction,
            lon: a.lon + (b.lon - a.lon) * fraction,
        }
    }
}

/// Great-circle metric on a spherical Earth; distances in metres.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Haversine;

impl Haversine {
    /// Mean Earth radius, metres.
    pub const EARTH_RADIUS_M: f64 = 6_371_000.0;
}

impl Metric for Haversine {
    fn distance(&self, a: GeoPoint, b: GeoPoint) -> f64 {
        let d_lat = (b.lat - a.lat).to_radians();
        let d_lon = (b.lon - a.lon).to_radians();

        let lat1 = a.lat.to_radians();
        let lat2 = b.lat.to_radians();

        let h = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
        Self::EARTH_RADIUS_M * c
    }

    /// Initial great-circle bearing (forward azimuth).
    fn bearing(&self, a: GeoPoint, b: GeoPoint) -> f64 {
        let lat1 = a.lat.to_radians();
        let lat2 = b.lat.to_radians();
        let d_lon = (b.lon - a.lon).to_radians();

        let y = d_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
        normalize_degrees(y.atan2(x).to_degrees())
    }
}

/// Flat metric: one length unit per degree, north = +lat, east = +lon.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Planar;

impl Metric for Planar {
    fn distance(&self, a: GeoPoint, b: GeoPoint) -> f64 {
        (b.lat - a.lat).hypot(b.lon - a.lon)
    }

    fn bearing(&self, a: GeoPoint, b: GeoPoint) -> f64 {
        normalize_degrees((b.lon - a.lon).atan2(b.lat - a.lat).to_degrees())
    }
}

#[inline]
fn normalize_degrees(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if d >= 360.0 { 0.0 } else { d }
}
