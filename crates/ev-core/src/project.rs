//! Reprojection between WGS-84 and UTM.
//!
//! The road network is typically supplied in a projected UTM system (so that
//! straight-line separation is a plain Euclidean distance in metres), while
//! the routing service and the charger registry speak WGS-84 longitude /
//! latitude.  [`Point::reproject`] converts between the two.
//!
//! # Accuracy
//!
//! Uses the classic series expansion of the transverse Mercator projection
//! (Snyder, *Map Projections — A Working Manual*, pp. 60–64).  Round trips
//! are accurate to well under a centimetre inside a zone and degrade slowly
//! a few degrees outside it, which is far finer than routing needs.

use crate::{CoreError, CoreResult, Crs, Point};

/// WGS-84 semi-major axis, metres.
const A: f64 = 6_378_137.0;
/// WGS-84 flattening.
const F: f64 = 1.0 / 298.257_223_563;
/// UTM central-meridian scale factor.
const K0: f64 = 0.9996;
const FALSE_EASTING: f64 = 500_000.0;
const FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

impl Point {
    /// Return this point expressed in `target`.
    ///
    /// A no-op copy when the systems already match.  UTM → UTM conversions go
    /// through WGS-84.
    pub fn reproject(self, target: Crs) -> CoreResult<Point> {
        if self.crs == target {
            return Ok(self);
        }
        let geographic = match self.crs {
            Crs::Wgs84 => self,
            Crs::Utm { zone, north } => utm_to_wgs84(self, zone, north)?,
        };
        match target {
            Crs::Wgs84 => Ok(geographic),
            Crs::Utm { zone, north } => wgs84_to_utm(geographic, zone, north),
        }
    }
}

#[inline]
fn eccentricity_2() -> f64 {
    F * (2.0 - F)
}

fn central_meridian_rad(zone: u8, from: Crs, to: Crs) -> CoreResult<f64> {
    if !(1..=60).contains(&zone) {
        return Err(CoreError::Projection { from, to, reason: "UTM zone must be in 1..=60" });
    }
    Ok(((zone as f64 - 1.0) * 6.0 - 180.0 + 3.0).to_radians())
}

fn wgs84_to_utm(p: Point, zone: u8, north: bool) -> CoreResult<Point> {
    let target = Crs::Utm { zone, north };
    let lon0 = central_meridian_rad(zone, p.crs, target)?;
    if !(-90.0..=90.0).contains(&p.y) {
        return Err(CoreError::Projection { from: p.crs, to: target, reason: "latitude out of range" });
    }

    let e2 = eccentricity_2();
    let e4 = e2 * e2;
    let e6 = e4 * e2;
    let ep2 = e2 / (1.0 - e2);

    let lat = p.y.to_radians();
    let lon = p.x.to_radians();
    let (sin_lat, cos_lat) = lat.sin_cos();

    let n = A / (1.0 - e2 * sin_lat * sin_lat).sqrt();
    let t = lat.tan().powi(2);
    let c = ep2 * cos_lat * cos_lat;
    let a = cos_lat * (lon - lon0);

    let m = A
        * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * lat
            - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * lat).sin()
            + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * lat).sin()
            - (35.0 * e6 / 3072.0) * (6.0 * lat).sin());

    let x = K0
        * n
        * (a + (1.0 - t + c) * a.powi(3) / 6.0
            + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a.powi(5) / 120.0)
        + FALSE_EASTING;

    let mut y = K0
        * (m + n
            * lat.tan()
            * (a * a / 2.0
                + (5.0 - t + 9.0 * c + 4.0 * c * c) * a.powi(4) / 24.0
                + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a.powi(6) / 720.0));
    if !north {
        y += FALSE_NORTHING_SOUTH;
    }

    Ok(Point::new(x, y, target))
}

fn utm_to_wgs84(p: Point, zone: u8, north: bool) -> CoreResult<Point> {
    let lon0 = central_meridian_rad(zone, p.crs, Crs::Wgs84)?;

    let e2 = eccentricity_2();
    let e4 = e2 * e2;
    let e6 = e4 * e2;
    let ep2 = e2 / (1.0 - e2);
    let e1 = (1.0 - (1.0 - e2).sqrt()) / (1.0 + (1.0 - e2).sqrt());

    let x = p.x - FALSE_EASTING;
    let y = if north { p.y } else { p.y - FALSE_NORTHING_SOUTH };

    let m = y / K0;
    let mu = m / (A * (1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0));

    // Footpoint latitude.
    let phi1 = mu
        + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
        + (21.0 * e1 * e1 / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
        + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
        + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();

    let (sin_phi1, cos_phi1) = phi1.sin_cos();
    let tan_phi1 = phi1.tan();
    let denom = 1.0 - e2 * sin_phi1 * sin_phi1;
    let n1 = A / denom.sqrt();
    let r1 = A * (1.0 - e2) / denom.powf(1.5);
    let t1 = tan_phi1 * tan_phi1;
    let c1 = ep2 * cos_phi1 * cos_phi1;
    let d = x / (n1 * K0);

    let lat = phi1
        - (n1 * tan_phi1 / r1)
            * (d * d / 2.0
                - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * ep2) * d.powi(4) / 24.0
                + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1 - 252.0 * ep2 - 3.0 * c1 * c1)
                    * d.powi(6)
                    / 720.0);

    let lon = lon0
        + (d - (1.0 + 2.0 * t1 + c1) * d.powi(3) / 6.0
            + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * ep2 + 24.0 * t1 * t1)
                * d.powi(5)
                / 120.0)
            / cos_phi1;

    Ok(Point::wgs84(lon.to_degrees(), lat.to_degrees()))
}
