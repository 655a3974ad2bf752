//! Geocoding port

use async_trait::async_trait;
use domain::value_objects::Coordinate;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Best match for an address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedAddress {
    /// Where the address is
    pub location: Coordinate,
    /// Full name as the geocoder spells it
    pub display_name: String,
}

/// Port for forward and reverse geocoding
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GeocodingPort: Send + Sync {
    /// Resolve an address; `NotFound` if nothing matches
    async fn forward(&self, address: &str) -> Result<GeocodedAddress, ApplicationError>;

    /// Describe a coordinate; `NotFound` if nothing is there
    async fn reverse(&self, location: &Coordinate) -> Result<String, ApplicationError>;
}
