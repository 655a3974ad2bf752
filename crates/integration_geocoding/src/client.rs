//! Nominatim geocoding client

use std::time::Duration;

use async_trait::async_trait;
use domain::value_objects::Coordinate;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::NominatimConfig;
use crate::error::GeocodingError;

/// A resolved address
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPlace {
    /// Position of the best match
    pub location: Coordinate,
    /// Nominatim's full display name
    pub display_name: String,
}

/// Trait for geocoding clients
#[async_trait]
pub trait GeocodingClient: Send + Sync {
    /// Resolve a free-form address to its best match
    async fn forward(&self, address: &str) -> Result<GeocodedPlace, GeocodingError>;

    /// Describe the address at a coordinate
    async fn reverse(&self, location: &Coordinate) -> Result<String, GeocodingError>;
}

/// Nominatim-based geocoding client
#[derive(Debug)]
pub struct NominatimGeocodingClient {
    client: Client,
    config: NominatimConfig,
}

impl NominatimGeocodingClient {
    /// Create a new Nominatim geocoding client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &NominatimConfig) -> Result<Self, GeocodingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| GeocodingError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    async fn get(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<reqwest::Response, GeocodingError> {
        let url = format!("{}/{endpoint}", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodingError::Timeout
                } else {
                    GeocodingError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodingError::RateLimitExceeded);
        }
        if !status.is_success() {
            return Err(GeocodingError::RequestFailed(format!("HTTP {status}")));
        }

        Ok(response)
    }

    fn parse_search(body: &str, address: &str) -> Result<GeocodedPlace, GeocodingError> {
        let results: Vec<SearchResult> =
            serde_json::from_str(body).map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let result = results
            .into_iter()
            .next()
            .ok_or_else(|| GeocodingError::AddressNotFound(address.to_string()))?;

        let lat: f64 = result
            .lat
            .parse()
            .map_err(|_| GeocodingError::ParseError("Invalid latitude".to_string()))?;
        let lon: f64 = result
            .lon
            .parse()
            .map_err(|_| GeocodingError::ParseError("Invalid longitude".to_string()))?;
        let location =
            Coordinate::new(lat, lon).map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        Ok(GeocodedPlace {
            location,
            display_name: result.display_name.unwrap_or_else(|| address.to_string()),
        })
    }

    fn parse_reverse(body: &str, location: &Coordinate) -> Result<String, GeocodingError> {
        let result: ReverseResult =
            serde_json::from_str(body).map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        // Nominatim answers 200 with {"error": "Unable to geocode"} for open water etc.
        if let Some(error) = result.error {
            debug!(%error, "Reverse geocoding found nothing");
            return Err(GeocodingError::AddressNotFound(location.to_string()));
        }

        result
            .display_name
            .ok_or_else(|| GeocodingError::AddressNotFound(location.to_string()))
    }
}

#[async_trait]
impl GeocodingClient for NominatimGeocodingClient {
    #[instrument(skip(self))]
    async fn forward(&self, address: &str) -> Result<GeocodedPlace, GeocodingError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodingError::InvalidQuery(
                "Address must not be empty".to_string(),
            ));
        }

        let mut params = vec![
            ("q", address.to_string()),
            ("format", "jsonv2".to_string()),
            ("limit", "1".to_string()),
        ];
        if !self.config.country_filter.is_empty() {
            params.push(("countrycodes", self.config.country_filter.clone()));
        }

        debug!(%address, "Geocoding address");

        let body = self
            .get("search", &params)
            .await?
            .text()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        let place = Self::parse_search(&body, address)?;
        debug!(%address, location = %place.location, "Geocoded address");
        Ok(place)
    }

    #[instrument(skip(self), fields(location = %location))]
    async fn reverse(&self, location: &Coordinate) -> Result<String, GeocodingError> {
        let params = [
            ("lat", location.lat().to_string()),
            ("lon", location.lng().to_string()),
            ("format", "jsonv2".to_string()),
        ];

        debug!("Reverse geocoding");

        let body = self
            .get("reverse", &params)
            .await?
            .text()
            .await
            .map_err(|e| GeocodingError::ParseError(e.to_string()))?;

        Self::parse_reverse(&body, location)
    }
}

/// Raw Nominatim search hit
#[derive(Debug, Deserialize)]
struct SearchResult {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

/// Raw Nominatim reverse response
#[derive(Debug, Deserialize)]
struct ReverseResult {
    display_name: Option<String>,
    error: Option<String>,
}
