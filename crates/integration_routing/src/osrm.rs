//! OSRM road-routing client

use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::Coordinate;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::OsrmConfig;
use crate::error::RoutingError;
use crate::models::{RoadRoute, flip_positions};

/// OSRM codes meaning "the points are fine, there is just no path"
const NO_ROUTE_CODES: &[&str] = &["NoRoute", "NoSegment"];

/// Trait for providers that return road distance and geometry
#[async_trait]
pub trait RoadRoutingClient: Send + Sync {
    /// Road route between two points, `None` if the provider finds none
    async fn road_route(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<Option<RoadRoute>, RoutingError>;
}

/// Road-routing client for the OSRM `route` service
#[derive(Debug)]
pub struct OsrmClient {
    client: Client,
    config: OsrmConfig,
}

impl OsrmClient {
    /// Create a new OSRM client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &OsrmConfig) -> Result<Self, RoutingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("walkwise/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RoutingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn route_url(&self, origin: &Coordinate, destination: &Coordinate) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}",
            self.config.base_url,
            self.config.profile,
            origin.lng(),
            origin.lat(),
            destination.lng(),
            destination.lat()
        )
    }

    /// Parse an OSRM route response; the driving duration is never read
    fn parse_route(body: &str) -> Result<Option<RoadRoute>, RoutingError> {
        let raw: RawRouteResponse =
            serde_json::from_str(body).map_err(|e| RoutingError::ParseError(e.to_string()))?;

        if raw.code != "Ok" {
            debug!(code = %raw.code, "OSRM returned no route");
            return Ok(None);
        }

        let Some(route) = raw.routes.into_iter().next() else {
            return Ok(None);
        };

        let geometry =
            flip_positions(&route.geometry.coordinates).map_err(RoutingError::ParseError)?;

        Ok(Some(RoadRoute {
            distance_m: route.distance,
            geometry,
        }))
    }
}

#[async_trait]
impl RoadRoutingClient for OsrmClient {
    #[instrument(skip(self), fields(origin = %origin, destination = %destination))]
    async fn road_route(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<Option<RoadRoute>, RoutingError> {
        let url = self.route_url(origin, destination);
        let params = [
            ("overview", "full"),
            ("geometries", "geojson"),
            ("steps", "false"),
        ];

        debug!(?url, "Requesting road route");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| RoutingError::from_send(&e, self.config.timeout_secs))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(RoutingError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| RoutingError::ParseError(e.to_string()))?;

        if status == StatusCode::BAD_REQUEST {
            // OSRM reports unroutable points as 400 with a JSON code
            let code = serde_json::from_str::<RawErrorResponse>(&body)
                .map(|raw| raw.code)
                .unwrap_or_default();
            if NO_ROUTE_CODES.contains(&code.as_str()) {
                debug!(%code, "OSRM found no route");
                return Ok(None);
            }
            warn!(%status, "OSRM rejected route request");
        }
        if !status.is_success() {
            return Err(RoutingError::RequestFailed(format!("HTTP {status}")));
        }

        Self::parse_route(&body)
    }
}

// --- Raw API types ---

#[derive(Debug, Deserialize)]
struct RawRouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<RawRoute>,
}

#[derive(Debug, Deserialize)]
struct RawRoute {
    distance: f64,
    geometry: RawGeometry,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    #[serde(default)]
    coordinates: Vec<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct RawErrorResponse {
    code: String,
}
