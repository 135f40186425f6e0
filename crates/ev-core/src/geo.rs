//! Coordinate types.
//!
//! A [`Point`] is a 2-D coordinate tagged with the [`Crs`] it is expressed
//! in.  Points are `Copy` and never change system in place: reprojection
//! (see [`crate::project`]) always returns a new `Point`.
//!
//! Axis order follows the GIS convention `x = easting / longitude`,
//! `y = northing / latitude`, which is also the order the routing service
//! expects on the wire.

use std::fmt;

use crate::{CoreResult, SegmentId};

/// Mean Earth radius used for great-circle distances, metres.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

// ── Crs ───────────────────────────────────────────────────────────────────────

/// Coordinate reference system a [`Point`] is expressed in.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Crs {
    /// Geographic WGS-84 (EPSG:4326).  `x` is longitude, `y` latitude, degrees.
    #[default]
    Wgs84,
    /// Universal Transverse Mercator on the WGS-84 ellipsoid, metres.
    /// `zone` is 1–60; `north` selects the hemisphere (EPSG:326zz / 327zz).
    Utm { zone: u8, north: bool },
}

impl Crs {
    /// EPSG code for this system.
    pub fn epsg(self) -> u32 {
        match self {
            Crs::Wgs84 => 4326,
            Crs::Utm { zone, north: true } => 32_600 + zone as u32,
            Crs::Utm { zone, north: false } => 32_700 + zone as u32,
        }
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg())
    }
}

// ── Point ─────────────────────────────────────────────────────────────────────

/// A 2-D coordinate tagged with its coordinate reference system.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x:   f64,
    pub y:   f64,
    pub crs: Crs,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64, crs: Crs) -> Self {
        Self { x, y, crs }
    }

    /// Shorthand for a WGS-84 point from `(lon, lat)` degrees.
    #[inline]
    pub fn wgs84(lon: f64, lat: f64) -> Self {
        Self::new(lon, lat, Crs::Wgs84)
    }

    /// Raw `[x, y]` pair, e.g. for spatial-index keys.
    #[inline]
    pub fn coords(self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Distance in metres between two points of the **same** system.
    ///
    /// Euclidean for projected systems, haversine great-circle for WGS-84.
    pub fn planar_distance_m(self, other: Point) -> f64 {
        debug_assert_eq!(self.crs, other.crs, "distance between mixed systems");
        match self.crs {
            Crs::Wgs84 => haversine_m(self, other),
            Crs::Utm { .. } => (self.x - other.x).hypot(self.y - other.y),
        }
    }

    /// Distance in metres, reprojecting `other` into `self`'s system first.
    pub fn distance_m(self, other: Point) -> CoreResult<f64> {
        let other = other.reproject(self.crs)?;
        Ok(self.planar_distance_m(other))
    }

    /// Shortest distance in metres from `self` to the polyline `line`,
    /// all in `self`'s system.  Returns `f64::INFINITY` for an empty line.
    ///
    /// For WGS-84 the projection onto each segment is done in degree space
    /// and only the final distance is great-circle; good enough for the
    /// separation filter it feeds.
    pub fn distance_to_polyline_m(self, line: &[Point]) -> f64 {
        match line {
            [] => f64::INFINITY,
            [only] => self.planar_distance_m(*only),
            _ => line
                .windows(2)
                .map(|w| self.planar_distance_m(closest_on_segment(self, w[0], w[1])))
                .fold(f64::INFINITY, f64::min),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6}) {}", self.x, self.y, self.crs)
    }
}

fn haversine_m(a: Point, b: Point) -> f64 {
    let d_lat = (b.y - a.y).to_radians();
    let d_lon = (b.x - a.x).to_radians();
    let lat1 = a.y.to_radians();
    let lat2 = b.y.to_radians();

    let h = (d_lat * 0.5).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

fn closest_on_segment(p: Point, a: Point, b: Point) -> Point {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_2 = dx * dx + dy * dy;
    if len_2 == 0.0 {
        return a;
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_2).clamp(0.0, 1.0);
    Point::new(a.x + t * dx, a.y + t * dy, a.crs)
}

// ── Location ──────────────────────────────────────────────────────────────────

/// A sampled position on the road network plus the segment it came from.
///
/// Produced by a point provider, consumed by routing and the trip simulator.
/// Each simulation run owns its own `Location`s.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub segment: SegmentId,
    pub point:   Point,
}

impl Location {
    #[inline]
    pub fn new(segment: SegmentId, point: Point) -> Self {
        Self { segment, point }
    }
}
