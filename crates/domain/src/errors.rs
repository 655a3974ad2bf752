//! Domain-level errors

use thiserror::Error;

use crate::geo::PolylineError;
use crate::value_objects::InvalidCoordinate;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Coordinate outside the valid latitude/longitude range
    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinate),

    /// Amenity type not in the supported catalogue
    #[error("Unknown amenity type: {0}")]
    UnknownAmenityCategory(String),

    /// Encoded polyline could not be decoded
    #[error(transparent)]
    Polyline(#[from] PolylineError),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
