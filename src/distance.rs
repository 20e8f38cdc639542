//! Great-circle distance from a point to the ring's vertices.
//!
//! The answer is the distance to the nearest *vertex*, not to the nearest
//! point on an edge. With one vertex per kilometre of ring road the
//! difference stays well under a kilometre.

use crate::models::GeoPoint;
use crate::pip::RingBoundary;

/// Earth radius used for all distances, in km
pub const EARTH_RADIUS_KM: f64 = 6373.0;

/// Haversine distance between two points in km
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lon1 = a.lon.to_radians();
    let lat2 = b.lat.to_radians();
    let lon2 = b.lon.to_radians();

    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Index of the closest vertex and its unrounded distance in km
pub fn nearest_vertex(point: GeoPoint, ring: &RingBoundary) -> Option<(usize, f64)> {
    ring.vertices()
        .iter()
        .map(|&v| haversine_km(point, v))
        .enumerate()
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
}

/// Distance to the closest vertex in km, rounded to 2 decimals.
///
/// Only the minimum is rounded. An empty ring (impossible through
/// [`RingBoundary::new`]) yields infinity.
pub fn nearest_vertex_km(point: GeoPoint, ring: &RingBoundary) -> f64 {
    nearest_vertex(point, ring)
        .map(|(_, km)| round_to_hundredths(km))
        .unwrap_or(f64::INFINITY)
}

/// Round half away from zero at two decimals
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
