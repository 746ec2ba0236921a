//! Proximity ranking of points of interest.

use crate::geo;
use crate::types::{GeoCoordinate, PointOfInterest};

/// A point of interest paired with its distance from the ranking origin.
/// The distance is derived data: it belongs to this ranking call, not to the
/// point itself, and is recomputed whenever the origin changes.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPoi {
    pub poi: PointOfInterest,
    pub distance_meters: f64,
}

/// Rank `pois` by haversine distance from `origin`, nearest first.
///
/// The sort is stable, so points at exactly equal distance keep their input
/// order. With `max_radius_meters` set, entries beyond the radius are
/// excluded entirely rather than sorted last.
pub fn rank(
    origin: GeoCoordinate,
    pois: &[PointOfInterest],
    max_radius_meters: Option<f64>,
) -> Vec<RankedPoi> {
    let mut ranked: Vec<RankedPoi> = pois
        .iter()
        .map(|poi| RankedPoi {
            poi: poi.clone(),
            distance_meters: geo::distance_meters(origin, poi.location),
        })
        .filter(|entry| max_radius_meters.is_none_or(|radius| entry.distance_meters <= radius))
        .collect();

    ranked.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
    ranked
}
