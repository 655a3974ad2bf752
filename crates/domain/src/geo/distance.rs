//! Great-circle distance

use crate::value_objects::Coordinate;

/// Mean Earth radius in metres
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two points in metres
#[must_use]
pub fn haversine_m(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    let delta_lat = (b.lat() - a.lat()).to_radians();
    let delta_lng = (b.lng() - a.lng()).to_radians();

    let h = (lat1.cos() * lat2.cos()).mul_add(
        (delta_lng / 2.0).sin().powi(2),
        (delta_lat / 2.0).sin().powi(2),
    );
    // Rounding can push h a hair past 1.0 for antipodal points
    let c = 2.0 * h.min(1.0).sqrt().atan2((1.0 - h).max(0.0).sqrt());

    EARTH_RADIUS_M * c
}
