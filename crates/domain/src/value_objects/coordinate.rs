//! Geographic coordinate value object

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::geo::haversine_m;

/// Error returned for a latitude/longitude pair outside the valid range
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error(
    "invalid coordinate ({lat}, {lng}): latitude must be -90 to 90, longitude must be -180 to 180"
)]
pub struct InvalidCoordinate {
    /// Rejected latitude
    pub lat: f64,
    /// Rejected longitude
    pub lng: f64,
}

/// A WGS84 point, latitude first
///
/// Serialized as `{"lat": .., "lng": ..}`. Deserialization runs the same
/// range check as [`Coordinate::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = InvalidCoordinate;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Self::new(raw.lat, raw.lng)
    }
}

impl Coordinate {
    /// Create a new coordinate with validation
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinate` if either value is non-finite, latitude is
    /// not in [-90, 90] or longitude is not in [-180, 180].
    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinate> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(InvalidCoordinate { lat, lng });
        }
        Ok(Self { lat, lng })
    }

    /// Build from a `[lng, lat]` pair as emitted by GeoJSON backends
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinate` if the flipped pair is out of range.
    pub fn from_lng_lat(lng: f64, lat: f64) -> Result<Self, InvalidCoordinate> {
        Self::new(lat, lng)
    }

    /// Latitude in degrees
    #[must_use]
    pub const fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees
    #[must_use]
    pub const fn lng(&self) -> f64 {
        self.lng
    }

    /// Great-circle distance to another point in metres
    #[must_use]
    pub fn distance_m(&self, other: &Self) -> f64 {
        haversine_m(self, other)
    }

    /// Great-circle distance to another point in kilometres
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        self.distance_m(other) / 1000.0
    }

    /// Identity key at 5 decimal places (about 1.1 m)
    ///
    /// Two POI records for the same physical stop share this key.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // |value| <= 18_000_000
    pub fn rounded_key(&self) -> (i64, i64) {
        (
            (self.lat * 1e5).round() as i64,
            (self.lng * 1e5).round() as i64,
        )
    }

    /// The pair as `[lat, lng]`, the layout used in API responses
    #[must_use]
    pub const fn to_lat_lng(self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}
