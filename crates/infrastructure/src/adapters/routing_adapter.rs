//! Routing adapters - implement the routing ports using integration_routing

use application::error::ApplicationError;
use application::ports::{FootPath, PreciseRoutingPort, RoadPath, RoadRoutingPort};
use async_trait::async_trait;
use domain::value_objects::Coordinate;
use integration_routing::{
    FootRoutingClient, OrsClient, OrsConfig, OsrmClient, OsrmConfig, RoadRoutingClient,
    RoutingError,
};
use tracing::{debug, instrument};

/// Map integration routing error to application error
fn map_error(err: RoutingError) -> ApplicationError {
    match err {
        RoutingError::ParseError(e) => ApplicationError::Decode(e),
        RoutingError::ConfigurationError(e) => ApplicationError::Configuration(e),
        other @ (RoutingError::ConnectionFailed(_)
        | RoutingError::RequestFailed(_)
        | RoutingError::RateLimitExceeded { .. }
        | RoutingError::Timeout { .. }) => ApplicationError::UpstreamUnavailable(other.to_string()),
    }
}

/// Precise foot routing through OpenRouteService
#[derive(Debug)]
pub struct OrsRoutingAdapter {
    client: OrsClient,
}

impl OrsRoutingAdapter {
    /// Create the adapter
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Configuration`] if no API key is set.
    pub fn new(config: &OrsConfig) -> Result<Self, ApplicationError> {
        Ok(Self {
            client: OrsClient::new(config).map_err(map_error)?,
        })
    }
}

#[async_trait]
impl PreciseRoutingPort for OrsRoutingAdapter {
    #[instrument(skip(self), fields(origin = %origin, destination = %destination))]
    async fn foot_route(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<Option<FootPath>, ApplicationError> {
        let route = self
            .client
            .foot_route(origin, destination)
            .await
            .map_err(map_error)?;

        debug!(found = route.is_some(), "ORS foot route");

        Ok(route.map(|route| FootPath {
            distance_m: route.distance_m,
            duration_s: route.duration_s,
            geometry: route.geometry,
        }))
    }
}

/// Road routing through OSRM
#[derive(Debug)]
pub struct OsrmRoutingAdapter {
    client: OsrmClient,
}

impl OsrmRoutingAdapter {
    /// Create the adapter
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &OsrmConfig) -> Result<Self, ApplicationError> {
        Ok(Self {
            client: OsrmClient::new(config).map_err(map_error)?,
        })
    }
}

#[async_trait]
impl RoadRoutingPort for OsrmRoutingAdapter {
    #[instrument(skip(self), fields(origin = %origin, destination = %destination))]
    async fn road_route(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<Option<RoadPath>, ApplicationError> {
        let route = self
            .client
            .road_route(origin, destination)
            .await
            .map_err(map_error)?;

        debug!(found = route.is_some(), "OSRM road route");

        Ok(route.map(|route| RoadPath {
            distance_m: route.distance_m,
            geometry: route.geometry,
        }))
    }
}
