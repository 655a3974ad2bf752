//! DTOs and helpers shared by the handlers
//!
//! Services work at full precision; values are rounded here, on the way out:
//! kilometres to two decimals, minutes to one, metres to whole numbers.

use domain::entities::WalkLeg;
use domain::value_objects::Coordinate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::ApiError;

/// A point as it appears in request and response bodies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[schema(example = json!({"lat": 42.2808, "lng": -83.7430}))]
pub struct LatLng {
    /// Latitude in degrees
    #[validate(range(min = -90.0, max = 90.0, message = "must be between -90 and 90"))]
    pub lat: f64,
    /// Longitude in degrees
    #[validate(range(min = -180.0, max = 180.0, message = "must be between -180 and 180"))]
    pub lng: f64,
}

impl LatLng {
    /// Convert into a domain coordinate
    ///
    /// Bodies are range-checked before they reach a handler, so this only
    /// fails for values that skipped validation.
    pub fn to_coordinate(self) -> Result<Coordinate, ApiError> {
        Coordinate::new(self.lat, self.lng).map_err(|e| ApiError::BadRequest(e.to_string()))
    }
}

impl From<Coordinate> for LatLng {
    fn from(value: Coordinate) -> Self {
        Self {
            lat: value.lat(),
            lng: value.lng(),
        }
    }
}

/// A walking leg to or from a transit stop
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WalkLegResponse {
    pub stop_name: String,
    /// `bus_stop`, `train_station`, `tram_stop` or `ferry_terminal`
    pub stop_type: String,
    pub distance_km: f64,
    pub duration_min: f64,
    /// `[[lat, lng], ...]` in travel order
    pub geometry: Vec<[f64; 2]>,
}

impl From<&WalkLeg> for WalkLegResponse {
    fn from(leg: &WalkLeg) -> Self {
        Self {
            stop_name: leg.stop_name.clone(),
            stop_type: leg.stop_type.as_str().to_string(),
            distance_km: round_km(leg.distance_km),
            duration_min: round_min(leg.duration_min),
            geometry: geometry(&leg.geometry),
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

/// Kilometres, two decimals
pub fn round_km(value: f64) -> f64 {
    round_to(value, 2)
}

/// Minutes, one decimal
pub fn round_min(value: f64) -> f64 {
    round_to(value, 1)
}

/// Whole metres
pub fn round_m(value: f64) -> f64 {
    value.round()
}

/// Path as `[[lat, lng], ...]`
pub fn geometry(points: &[Coordinate]) -> Vec<[f64; 2]> {
    points.iter().map(|point| point.to_lat_lng()).collect()
}
