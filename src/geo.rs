//! Great-circle math: haversine distance, initial bearing, qibla.

use crate::types::{GeoCoordinate, QiblaBearing};

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two points in meters. Symmetric, and exactly
/// zero for identical points.
pub fn distance_meters(a: GeoCoordinate, b: GeoCoordinate) -> f64 {
    let lat_a = a.latitude().to_radians();
    let lat_b = b.latitude().to_radians();
    let delta_lat = (b.latitude() - a.latitude()).to_radians();
    let delta_lon = (b.longitude() - a.longitude()).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lon / 2.0).sin().powi(2);

    // rounding can push h past 1.0 for near-antipodal pairs
    EARTH_RADIUS_M * 2.0 * h.sqrt().min(1.0).asin()
}

/// Initial great-circle bearing from `from` toward `to`, degrees from true
/// north in [0, 360). Mathematically undefined for identical points; by
/// convention this returns 0.0 so callers get a stable value.
pub fn bearing(from: GeoCoordinate, to: GeoCoordinate) -> f64 {
    if from == to {
        return 0.0;
    }

    let lat_from = from.latitude().to_radians();
    let lat_to = to.latitude().to_radians();
    let delta_lon = (to.longitude() - from.longitude()).to_radians();

    let x = delta_lon.sin() * lat_to.cos();
    let y = lat_from.cos() * lat_to.sin() - lat_from.sin() * lat_to.cos() * delta_lon.cos();

    normalize_degrees(x.atan2(y).to_degrees())
}

/// Bearing from `origin` toward the Kaaba.
pub fn qibla(origin: GeoCoordinate) -> QiblaBearing {
    QiblaBearing::from_degrees(bearing(origin, GeoCoordinate::KAABA))
}

/// Normalize an angle into [0, 360).
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees % 360.0;
    let wrapped = if wrapped < 0.0 { wrapped + 360.0 } else { wrapped };
    // adding 360 to a tiny negative rounds to exactly 360
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
