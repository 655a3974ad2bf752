//! Routing handlers: direct walks, commutes and nearby stops

use application::DEFAULT_STOP_LIMIT;
use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use domain::entities::{CommuteMode, CommuteResult, RouteSource, TransitStop, TripSummary, WalkRoute};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::ToSchema;
use validator::Validate;

use super::common::{LatLng, WalkLegResponse, geometry, round_km, round_m, round_min};
use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Walking route request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "origin": {"lat": 42.2808, "lng": -83.7430},
    "destination": {"lat": 42.2780, "lng": -83.7382}
}))]
pub struct WalkRouteRequest {
    #[validate(nested)]
    pub origin: LatLng,
    #[validate(nested)]
    pub destination: LatLng,
}

/// A walking route
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct WalkRouteResponse {
    pub distance_km: f64,
    pub duration_min: f64,
    /// `[[lat, lng], ...]` in travel order
    pub geometry: Vec<[f64; 2]>,
    /// `precise` (foot routing) or `estimated` (road distance at walking speed)
    #[schema(value_type = String)]
    pub source: RouteSource,
}

impl From<WalkRoute> for WalkRouteResponse {
    fn from(route: WalkRoute) -> Self {
        Self {
            distance_km: round_km(route.distance_km),
            duration_min: round_min(route.duration_min),
            geometry: geometry(&route.geometry),
            source: route.source,
        }
    }
}

/// Commute request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "origin": {"lat": 42.2808, "lng": -83.7430},
    "destination": {"lat": 42.2450, "lng": -83.6200},
    "transit_radius_m": 2000
}))]
pub struct CommuteRequest {
    /// Home
    #[validate(nested)]
    pub origin: LatLng,
    /// Work
    #[validate(nested)]
    pub destination: LatLng,
    /// Stop search radius around each end
    #[validate(range(min = 100, max = 10_000, message = "must be between 100 and 10000"))]
    #[serde(default)]
    pub transit_radius_m: Option<u32>,
    /// Departure used by the itinerary provider (RFC 3339)
    #[schema(value_type = Option<String>, format = DateTime)]
    #[serde(default)]
    pub departure_time: Option<DateTime<Utc>>,
}

/// Door-to-door figures of a transit itinerary
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TripSummaryResponse {
    pub duration_min: f64,
    pub distance_km: f64,
}

impl From<TripSummary> for TripSummaryResponse {
    fn from(trip: TripSummary) -> Self {
        Self {
            duration_min: round_min(trip.duration_min),
            distance_km: round_km(trip.distance_km),
        }
    }
}

/// Walking part of a commute
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommuteResponse {
    /// `transit` or `direct_walk`
    #[schema(value_type = String)]
    pub mode: CommuteMode,
    pub home_to_transit: Option<WalkLegResponse>,
    pub transit_to_work: Option<WalkLegResponse>,
    /// Walks between vehicles, itinerary commutes only
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transfer_walks: Vec<WalkLegResponse>,
    pub total_walk_min: f64,
    pub total_walk_km: f64,
    pub direct_walk_min: f64,
    pub direct_walk_km: f64,
    /// Whole trip, riding included, itinerary commutes only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transit_trip: Option<TripSummaryResponse>,
}

impl From<&CommuteResult> for CommuteResponse {
    fn from(result: &CommuteResult) -> Self {
        Self {
            mode: result.mode(),
            home_to_transit: result.home_to_transit().map(WalkLegResponse::from),
            transit_to_work: result.transit_to_work().map(WalkLegResponse::from),
            transfer_walks: result
                .transfer_walks()
                .iter()
                .map(WalkLegResponse::from)
                .collect(),
            total_walk_min: round_min(result.total_walk_min()),
            total_walk_km: round_km(result.total_walk_km()),
            direct_walk_min: round_min(result.direct_walk_min()),
            direct_walk_km: round_km(result.direct_walk_km()),
            transit_trip: result.transit_trip().map(TripSummaryResponse::from),
        }
    }
}

/// Nearby stop search request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({"location": {"lat": 42.2808, "lng": -83.7430}, "radius_m": 1000}))]
pub struct TransitStopsRequest {
    #[validate(nested)]
    pub location: LatLng,
    #[validate(range(min = 100, max = 10_000, message = "must be between 100 and 10000"))]
    #[serde(default)]
    pub radius_m: Option<u32>,
}

/// A stop near the query point
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransitStopResponse {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type")]
    pub stop_type: String,
    pub distance_m: f64,
}

impl From<TransitStop> for TransitStopResponse {
    fn from(stop: TransitStop) -> Self {
        Self {
            name: stop.name,
            lat: stop.location.lat(),
            lng: stop.location.lng(),
            stop_type: stop.stop_type.as_str().to_string(),
            distance_m: round_m(stop.distance_m),
        }
    }
}

/// Stops nearest first
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TransitStopsResponse {
    pub stops: Vec<TransitStopResponse>,
}

/// Walking route between two points
#[utoipa::path(
    post,
    path = "/api/route/walk",
    tag = "route",
    request_body = WalkRouteRequest,
    responses(
        (status = 200, description = "Walking route", body = WalkRouteResponse),
        (status = 400, description = "Invalid coordinates", body = crate::error::ErrorResponse),
        (status = 404, description = "No walking route", body = crate::error::ErrorResponse),
        (status = 502, description = "Routing backend failed", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn walk(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<WalkRouteRequest>,
) -> Result<Json<WalkRouteResponse>, ApiError> {
    let origin = request.origin.to_coordinate()?;
    let destination = request.destination.to_coordinate()?;

    let route = state
        .commute
        .gateway()
        .route(&origin, &destination)
        .await?
        .ok_or_else(|| ApiError::NotFound("No walking route found".to_string()))?;

    Ok(Json(route.into()))
}

/// Walking portions of a transit commute
///
/// Walks directly when that is no slower than walking to and from transit.
#[utoipa::path(
    post,
    path = "/api/route/commute",
    tag = "route",
    request_body = CommuteRequest,
    responses(
        (status = 200, description = "Commute decision", body = CommuteResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "No walking route", body = crate::error::ErrorResponse),
        (status = 502, description = "Backend failed", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn commute(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CommuteRequest>,
) -> Result<Json<CommuteResponse>, ApiError> {
    let home = request.origin.to_coordinate()?;
    let work = request.destination.to_coordinate()?;
    let radius = request.transit_radius_m.unwrap_or(state.transit_radius_m);

    let result = state
        .commute
        .commute(&home, &work, radius, request.departure_time)
        .await?
        .ok_or_else(|| ApiError::NotFound("Could not compute commute".to_string()))?;

    debug!(mode = ?result.mode(), "Commute computed");
    Ok(Json(CommuteResponse::from(&result)))
}

/// Transit stops near a point
#[utoipa::path(
    post,
    path = "/api/route/transit-stops",
    tag = "route",
    request_body = TransitStopsRequest,
    responses(
        (status = 200, description = "Nearest stops", body = TransitStopsResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 502, description = "POI backend failed", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn transit_stops(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TransitStopsRequest>,
) -> Result<Json<TransitStopsResponse>, ApiError> {
    let location = request.location.to_coordinate()?;
    let radius = request.radius_m.unwrap_or(state.transit_radius_m);

    let stops = state
        .stops
        .nearest(&location, radius, DEFAULT_STOP_LIMIT)
        .await?;

    Ok(Json(TransitStopsResponse {
        stops: stops.into_iter().map(TransitStopResponse::from).collect(),
    }))
}
