//! Google Routes `computeRoutes` client for transit itineraries

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use domain::polyline;
use domain::value_objects::Coordinate;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::GoogleRoutesConfig;
use crate::error::TransitError;
use crate::models::{Itinerary, ItineraryStep, TransitDetails, TravelMode, parse_duration};

/// Response fields requested from the API (also selects the billing tier)
const FIELD_MASK: &str = "routes.duration,routes.distanceMeters,\
routes.legs.duration,routes.legs.distanceMeters,\
routes.legs.steps.travelMode,routes.legs.steps.staticDuration,\
routes.legs.steps.distanceMeters,routes.legs.steps.polyline,\
routes.legs.steps.transitDetails";

/// Trait for multi-leg transit itinerary providers
#[async_trait]
pub trait ItineraryClient: Send + Sync {
    /// Best transit itinerary between two points, `None` if there is none
    async fn transit_itinerary(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
        departure: Option<DateTime<Utc>>,
    ) -> Result<Option<Itinerary>, TransitError>;
}

/// Transit itinerary client for the Google Routes API
#[derive(Debug)]
pub struct GoogleRoutesClient {
    client: Client,
    config: GoogleRoutesConfig,
    api_key: String,
}

impl GoogleRoutesClient {
    /// Create a new Google Routes client
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured or the HTTP client cannot
    /// be initialized.
    pub fn new(config: &GoogleRoutesConfig) -> Result<Self, TransitError> {
        let api_key = config
            .api_key()
            .ok_or_else(|| {
                TransitError::ConfigurationError("Google Routes API key is not set".to_string())
            })?
            .to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("walkwise/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransitError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            api_key,
        })
    }

    /// Parse a `computeRoutes` response into the first route's itinerary
    fn parse_itinerary(body: &str) -> Result<Option<Itinerary>, TransitError> {
        let raw: RawResponse =
            serde_json::from_str(body).map_err(|e| TransitError::ParseError(e.to_string()))?;

        let Some(route) = raw.routes.into_iter().next() else {
            return Ok(None);
        };
        let Some(leg) = route.legs.into_iter().next() else {
            return Ok(None);
        };

        let steps = leg
            .steps
            .into_iter()
            .map(Self::convert_step)
            .collect::<Result<Vec<_>, _>>()?;

        let duration = leg.duration.or(route.duration).unwrap_or_default();
        let duration_s = parse_duration(&duration).map_err(TransitError::ParseError)?;
        let distance_m = leg
            .distance_meters
            .or(route.distance_meters)
            .unwrap_or_default();

        Ok(Some(Itinerary {
            steps,
            duration_s,
            distance_m,
        }))
    }

    fn convert_step(raw: RawStep) -> Result<ItineraryStep, TransitError> {
        let mode = TravelMode::from_api(raw.travel_mode.as_deref().unwrap_or_default());

        let duration_s = parse_duration(raw.static_duration.as_deref().unwrap_or_default())
            .map_err(TransitError::ParseError)?;

        let geometry = match raw.polyline.and_then(|p| p.encoded_polyline) {
            Some(encoded) => {
                polyline::decode(&encoded).map_err(|e| TransitError::ParseError(e.to_string()))?
            },
            None => Vec::new(),
        };

        let transit = match mode {
            TravelMode::Transit => Some(Self::convert_details(
                raw.transit_details.unwrap_or_default(),
            )),
            TravelMode::Walk | TravelMode::Other => None,
        };

        Ok(ItineraryStep {
            mode,
            distance_m: raw.distance_meters.unwrap_or_default(),
            duration_s,
            geometry,
            transit,
        })
    }

    fn convert_details(raw: RawTransitDetails) -> TransitDetails {
        let stops = raw.stop_details.unwrap_or_default();
        let line = raw.transit_line.unwrap_or_default();
        let stop_name = |stop: Option<RawNamed>| {
            stop.and_then(|s| s.name)
                .unwrap_or_else(|| TransitDetails::UNKNOWN_STOP.to_string())
        };

        TransitDetails {
            departure_stop: stop_name(stops.departure_stop),
            arrival_stop: stop_name(stops.arrival_stop),
            line_name: line.name.unwrap_or_default(),
            line_short_name: line.name_short.unwrap_or_default(),
            vehicle_type: line
                .vehicle
                .and_then(|v| v.kind)
                .unwrap_or_else(|| TransitDetails::DEFAULT_VEHICLE.to_string()),
            agency: line
                .agencies
                .into_iter()
                .next()
                .and_then(|a| a.name)
                .unwrap_or_default(),
            headsign: raw.headsign.unwrap_or_default(),
            stop_count: raw.stop_count.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl ItineraryClient for GoogleRoutesClient {
    #[instrument(skip(self), fields(origin = %origin, destination = %destination))]
    async fn transit_itinerary(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
        departure: Option<DateTime<Utc>>,
    ) -> Result<Option<Itinerary>, TransitError> {
        let url = format!("{}/directions/v2:computeRoutes", self.config.base_url);

        let request = RouteRequest {
            origin: Waypoint::at(origin),
            destination: Waypoint::at(destination),
            travel_mode: "TRANSIT",
            compute_alternative_routes: false,
            departure_time: departure.map(|d| d.to_rfc3339_opts(SecondsFormat::Secs, true)),
        };

        debug!(?url, "Requesting transit itinerary");

        let response = self
            .client
            .post(&url)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransitError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    TransitError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(TransitError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if !status.is_success() {
            return Err(TransitError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| TransitError::ParseError(e.to_string()))?;

        let itinerary = Self::parse_itinerary(&body)?;

        match &itinerary {
            Some(it) => debug!(
                steps = it.steps.len(),
                walk_steps = it.steps.iter().filter(|step| step.is_walk()).count(),
                has_transit = it.has_transit(),
                "Transit itinerary received"
            ),
            None => warn!("No transit itinerary found"),
        }
        Ok(itinerary)
    }
}

// --- Request body ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RouteRequest {
    origin: Waypoint,
    destination: Waypoint,
    travel_mode: &'static str,
    compute_alternative_routes: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    departure_time: Option<String>,
}

#[derive(Debug, Serialize)]
struct Waypoint {
    location: Location,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Location {
    lat_lng: LatLng,
}

#[derive(Debug, Serialize)]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

impl Waypoint {
    fn at(point: &Coordinate) -> Self {
        Self {
            location: Location {
                lat_lng: LatLng {
                    latitude: point.lat(),
                    longitude: point.lng(),
                },
            },
        }
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    routes: Vec<RawRoute>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRoute {
    #[serde(default)]
    legs: Vec<RawLeg>,
    duration: Option<String>,
    distance_meters: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLeg {
    #[serde(default)]
    steps: Vec<RawStep>,
    duration: Option<String>,
    distance_meters: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStep {
    travel_mode: Option<String>,
    static_duration: Option<String>,
    distance_meters: Option<f64>,
    polyline: Option<RawPolyline>,
    transit_details: Option<RawTransitDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPolyline {
    encoded_polyline: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTransitDetails {
    stop_details: Option<RawStopDetails>,
    transit_line: Option<RawTransitLine>,
    headsign: Option<String>,
    stop_count: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStopDetails {
    departure_stop: Option<RawNamed>,
    arrival_stop: Option<RawNamed>,
}

#[derive(Debug, Deserialize)]
struct RawNamed {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTransitLine {
    name: Option<String>,
    name_short: Option<String>,
    vehicle: Option<RawVehicle>,
    #[serde(default)]
    agencies: Vec<RawNamed>,
}

#[derive(Debug, Deserialize)]
struct RawVehicle {
    #[serde(rename = "type")]
    kind: Option<String>,
}
