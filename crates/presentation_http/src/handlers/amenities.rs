//! Amenity search handlers

use application::clamp_amenity_radius;
use axum::{Json, extract::State};
use domain::entities::Amenity;
use domain::value_objects::AmenityCategory;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;
use validator::Validate;

use super::common::{LatLng, round_m};
use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Amenity search request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "location": {"lat": 42.2808, "lng": -83.7430},
    "amenity_type": "gym",
    "radius_m": 2000
}))]
pub struct AmenitySearchRequest {
    #[validate(nested)]
    pub location: LatLng,
    /// One of `/api/amenities/types`, or an alias such as "coffee shop"
    #[validate(length(min = 1, max = 64, message = "must be between 1 and 64 characters"))]
    pub amenity_type: String,
    /// Search radius, clamped to 100..=10000 (default 2000)
    #[serde(default)]
    pub radius_m: Option<u32>,
}

/// One amenity
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AmenityResponse {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    /// Canonical category name
    pub amenity_type: String,
    pub distance_m: f64,
}

impl From<Amenity> for AmenityResponse {
    fn from(amenity: Amenity) -> Self {
        Self {
            name: amenity.name,
            lat: amenity.location.lat(),
            lng: amenity.location.lng(),
            amenity_type: amenity.category.as_str().to_string(),
            distance_m: round_m(amenity.distance_m),
        }
    }
}

/// Amenities nearest first
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AmenitySearchResponse {
    pub results: Vec<AmenityResponse>,
}

/// Supported amenity types
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AmenityTypesResponse {
    /// Canonical names, alphabetical
    pub types: Vec<String>,
}

/// Parse a category name from a request
pub fn parse_category(name: &str) -> Result<AmenityCategory, ApiError> {
    name.parse::<AmenityCategory>()
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Amenities of one type around a point
#[utoipa::path(
    post,
    path = "/api/amenities/search",
    tag = "amenities",
    request_body = AmenitySearchRequest,
    responses(
        (status = 200, description = "Matching amenities", body = AmenitySearchResponse),
        (status = 400, description = "Invalid request or unknown type", body = crate::error::ErrorResponse),
        (status = 502, description = "POI backend failed", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AmenitySearchRequest>,
) -> Result<Json<AmenitySearchResponse>, ApiError> {
    let location = request.location.to_coordinate()?;
    let category = parse_category(&request.amenity_type)?;
    let radius = clamp_amenity_radius(request.radius_m);

    let amenities = state.amenities.search(&location, category, radius).await?;

    Ok(Json(AmenitySearchResponse {
        results: amenities.into_iter().map(AmenityResponse::from).collect(),
    }))
}

/// List the supported amenity types
#[utoipa::path(
    get,
    path = "/api/amenities/types",
    tag = "amenities",
    responses(
        (status = 200, description = "Supported types", body = AmenityTypesResponse)
    )
)]
pub async fn types() -> Json<AmenityTypesResponse> {
    let mut types: Vec<String> = AmenityCategory::ALL
        .iter()
        .map(|category| category.as_str().to_string())
        .collect();
    types.sort_unstable();
    Json(AmenityTypesResponse { types })
}

#[cfg(test)]
mod tests {
    use domain::value_objects::Coordinate;

    use super::*;

    #[test]
    fn aliases_parse() {
        assert_eq!(parse_category("Coffee Shop").unwrap(), AmenityCategory::Coffee);
        assert_eq!(parse_category("fitness").unwrap(), AmenityCategory::Gym);
    }

    #[test]
    fn unknown_type_is_bad_request() {
        let err = parse_category("zoo").unwrap_err();
        let ApiError::BadRequest(msg) = err else {
            unreachable!("Expected BadRequest");
        };
        assert!(msg.contains("zoo"));
    }

    #[tokio::test]
    async fn types_are_sorted_and_complete() {
        let Json(response) = types().await;
        assert_eq!(response.types.len(), AmenityCategory::ALL.len());
        assert!(response.types.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(response.types[0], "bakery");
    }

    #[test]
    fn amenity_response_uses_canonical_name() {
        let amenity = Amenity {
            name: "Comet Coffee".to_string(),
            category: AmenityCategory::Coffee,
            location: Coordinate::new(42.2797, -83.7468).unwrap(),
            distance_m: 388.51,
        };
        let response = AmenityResponse::from(amenity);
        assert_eq!(response.amenity_type, "coffee");
        assert!((response.distance_m - 389.0).abs() < f64::EPSILON);
    }
}
