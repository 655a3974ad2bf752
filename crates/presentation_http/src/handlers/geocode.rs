//! Geocoding handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::ToSchema;
use validator::Validate;

use crate::{error::ApiError, handlers::common::LatLng, middleware::ValidatedJson, state::AppState};

/// Forward geocoding request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({"address": "500 S State St, Ann Arbor, MI"}))]
pub struct ForwardGeocodeRequest {
    /// Free-form address
    #[validate(length(min = 1, max = 500, message = "must be between 1 and 500 characters"))]
    pub address: String,
}

/// Reverse geocoding request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({"lat": 42.2780, "lng": -83.7382}))]
pub struct ReverseGeocodeRequest {
    #[validate(range(min = -90.0, max = 90.0, message = "must be between -90 and 90"))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "must be between -180 and 180"))]
    pub lng: f64,
}

/// A resolved place
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GeocodeResponse {
    /// The address as asked for (forward) or as named by the geocoder (reverse)
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    /// Full name as the geocoder spells it
    pub display_name: String,
}

/// Resolve an address to a point
#[utoipa::path(
    post,
    path = "/api/geocode/forward",
    tag = "geocode",
    request_body = ForwardGeocodeRequest,
    responses(
        (status = 200, description = "Best match", body = GeocodeResponse),
        (status = 400, description = "Missing address", body = crate::error::ErrorResponse),
        (status = 404, description = "Address not found", body = crate::error::ErrorResponse),
        (status = 502, description = "Geocoder unavailable", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn forward(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ForwardGeocodeRequest>,
) -> Result<Json<GeocodeResponse>, ApiError> {
    let address = request.address.trim();
    if address.is_empty() {
        return Err(ApiError::BadRequest("address: must not be blank".to_string()));
    }
    let found = state.geocoding.forward(address).await?;
    debug!(display_name = %found.display_name, "Address resolved");

    Ok(Json(GeocodeResponse {
        address: address.to_string(),
        lat: found.location.lat(),
        lng: found.location.lng(),
        display_name: found.display_name,
    }))
}

/// Describe the place at a point
#[utoipa::path(
    post,
    path = "/api/geocode/reverse",
    tag = "geocode",
    request_body = ReverseGeocodeRequest,
    responses(
        (status = 200, description = "Place name", body = GeocodeResponse),
        (status = 400, description = "Invalid coordinates", body = crate::error::ErrorResponse),
        (status = 404, description = "Nothing at this point", body = crate::error::ErrorResponse),
        (status = 502, description = "Geocoder unavailable", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn reverse(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ReverseGeocodeRequest>,
) -> Result<Json<GeocodeResponse>, ApiError> {
    let location = LatLng {
        lat: request.lat,
        lng: request.lng,
    }
    .to_coordinate()?;
    let display_name = state.geocoding.reverse(&location).await?;

    Ok(Json(GeocodeResponse {
        address: display_name.clone(),
        lat: location.lat(),
        lng: location.lng(),
        display_name,
    }))
}
