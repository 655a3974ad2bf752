//! Routing backend ports
//!
//! Two independent backends feed the routing gateway: a precise foot router
//! that knows real walking times, and a road router that only contributes
//! distance and geometry.

use async_trait::async_trait;
use domain::value_objects::Coordinate;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Walking route from a foot-routing provider
#[derive(Debug, Clone, PartialEq)]
pub struct FootPath {
    /// Length in metres
    pub distance_m: f64,
    /// Walking time in seconds
    pub duration_s: f64,
    /// Path in `(lat, lng)` order
    pub geometry: Vec<Coordinate>,
}

/// Road route; the backend's (driving) duration is deliberately absent
#[derive(Debug, Clone, PartialEq)]
pub struct RoadPath {
    /// Length in metres
    pub distance_m: f64,
    /// Path in `(lat, lng)` order
    pub geometry: Vec<Coordinate>,
}

/// Port for the precise foot-routing provider
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PreciseRoutingPort: Send + Sync {
    /// Walking route between two points, `None` if the provider has none
    async fn foot_route(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<Option<FootPath>, ApplicationError>;
}

/// Port for the road-distance fallback provider
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoadRoutingPort: Send + Sync {
    /// Road route between two points, `None` if the provider has none
    async fn road_route(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<Option<RoadPath>, ApplicationError>;
}
