//! OpenRouteService foot-walking client

use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::Coordinate;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::OrsConfig;
use crate::error::RoutingError;
use crate::models::{FootRoute, flip_positions};

/// Trait for providers that return real walking routes
#[async_trait]
pub trait FootRoutingClient: Send + Sync {
    /// Walking route between two points, `None` if the provider finds none
    async fn foot_route(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<Option<FootRoute>, RoutingError>;
}

/// Foot-routing client for the ORS directions API
#[derive(Debug)]
pub struct OrsClient {
    client: Client,
    config: OrsConfig,
    api_key: String,
}

impl OrsClient {
    /// Create a new ORS client
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured or the HTTP client cannot
    /// be initialized.
    pub fn new(config: &OrsConfig) -> Result<Self, RoutingError> {
        let api_key = config
            .api_key()
            .ok_or_else(|| RoutingError::ConfigurationError("ORS API key is not set".to_string()))?
            .to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("walkwise/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RoutingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            api_key,
        })
    }

    /// Parse a GeoJSON directions response
    fn parse_route(body: &str) -> Result<Option<FootRoute>, RoutingError> {
        let raw: RawCollection =
            serde_json::from_str(body).map_err(|e| RoutingError::ParseError(e.to_string()))?;

        let Some(feature) = raw.features.into_iter().next() else {
            return Ok(None);
        };

        let geometry =
            flip_positions(&feature.geometry.coordinates).map_err(RoutingError::ParseError)?;

        Ok(Some(FootRoute {
            distance_m: feature.properties.summary.distance,
            duration_s: feature.properties.summary.duration,
            geometry,
        }))
    }
}

#[async_trait]
impl FootRoutingClient for OrsClient {
    #[instrument(skip(self), fields(origin = %origin, destination = %destination))]
    async fn foot_route(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<Option<FootRoute>, RoutingError> {
        let url = format!(
            "{}/v2/directions/{}/geojson",
            self.config.base_url, self.config.profile
        );
        let body = RawRequest {
            coordinates: [
                [origin.lng(), origin.lat()],
                [destination.lng(), destination.lat()],
            ],
        };

        debug!(?url, "Requesting foot route");

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| RoutingError::from_send(&e, self.config.timeout_secs))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!("No foot route between points");
            return Ok(None);
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(RoutingError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }
        if !status.is_success() {
            return Err(RoutingError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RoutingError::ParseError(e.to_string()))?;

        let route = Self::parse_route(&body)?;
        if let Some(route) = &route {
            debug!(
                distance_m = route.distance_m,
                duration_s = route.duration_s,
                points = route.geometry.len(),
                "Foot route found"
            );
        }
        Ok(route)
    }
}

// --- Raw API types ---

#[derive(Debug, Serialize)]
struct RawRequest {
    coordinates: [[f64; 2]; 2],
}

#[derive(Debug, Deserialize)]
struct RawCollection {
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    properties: RawProperties,
    geometry: RawGeometry,
}

#[derive(Debug, Deserialize)]
struct RawProperties {
    summary: RawSummary,
}

/// ORS omits both fields for zero-length routes
#[derive(Debug, Deserialize)]
struct RawSummary {
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct RawGeometry {
    #[serde(default)]
    coordinates: Vec<Vec<f64>>,
}
