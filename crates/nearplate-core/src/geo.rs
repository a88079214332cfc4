//! Coordinate type and great-circle distance.
//!
//! All distances are meters on a spherical earth; good to ~0.5% which is
//! plenty for ranking nearby places.

use serde::{Deserialize, Serialize};

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Fallback origin used when no position fix is available.
pub const DEFAULT_ORIGIN: Coordinate = Coordinate {
    lat: -34.397,
    lng: 150.644,
};

/// A WGS84 latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// Great-circle (haversine) distance between two coordinates in meters.
#[must_use]
pub fn distance_m(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}
