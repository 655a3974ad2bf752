//! Walking route entity

use serde::{Deserialize, Serialize};

use crate::value_objects::Coordinate;

/// Where a route's duration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteSource {
    /// Foot-routing provider with a real walking duration
    Precise,
    /// Road distance with duration derived from walking speed
    Estimated,
}

/// A walking route between two points
///
/// Values are kept at full precision; rounding belongs to presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkRoute {
    /// Route length in kilometres
    pub distance_km: f64,
    /// Walking time in minutes
    pub duration_min: f64,
    /// Path in travel order (may be empty)
    pub geometry: Vec<Coordinate>,
    /// How the duration was obtained
    pub source: RouteSource,
}

impl WalkRoute {
    /// Route from a foot-routing provider
    #[must_use]
    pub fn precise(distance_m: f64, duration_s: f64, geometry: Vec<Coordinate>) -> Self {
        Self {
            distance_km: distance_m / 1000.0,
            duration_min: duration_s / 60.0,
            geometry,
            source: RouteSource::Precise,
        }
    }

    /// Route from a road distance, timed at `walking_speed_kmh`
    ///
    /// The caller guarantees a positive walking speed.
    #[must_use]
    pub fn estimated(distance_m: f64, walking_speed_kmh: f64, geometry: Vec<Coordinate>) -> Self {
        let distance_km = distance_m / 1000.0;
        Self {
            distance_km,
            duration_min: distance_km / walking_speed_kmh * 60.0,
            geometry,
            source: RouteSource::Estimated,
        }
    }
}
