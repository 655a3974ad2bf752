//! OpenAPI documentation module
//!
//! Serves the OpenAPI 3 document at `/api-docs/openapi.json` and Swagger UI
//! at `/swagger-ui`.

// Allow clippy warnings from macro-generated code in utoipa derive
#![allow(clippy::needless_for_each)]

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{handlers, state::AppState};

/// OpenAPI documentation for walkwise
#[derive(OpenApi)]
#[openapi(
    info(
        title = "walkwise API",
        description = "Walking commutes, nearby amenities and a weekly walking score",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "health", description = "Liveness"),
        (name = "geocode", description = "Address lookup"),
        (name = "route", description = "Walking routes, commutes and nearby transit stops"),
        (name = "amenities", description = "Points of interest by type"),
        (name = "score", description = "Weekly walking score")
    ),
    paths(
        handlers::health::health_check,
        handlers::geocode::forward,
        handlers::geocode::reverse,
        handlers::route::walk,
        handlers::route::commute,
        handlers::route::transit_stops,
        handlers::amenities::search,
        handlers::amenities::types,
        handlers::score::calculate,
    ),
    components(
        schemas(
            handlers::health::HealthResponse,
            handlers::common::LatLng,
            handlers::common::WalkLegResponse,
            handlers::geocode::ForwardGeocodeRequest,
            handlers::geocode::ReverseGeocodeRequest,
            handlers::geocode::GeocodeResponse,
            handlers::route::WalkRouteRequest,
            handlers::route::WalkRouteResponse,
            handlers::route::CommuteRequest,
            handlers::route::CommuteResponse,
            handlers::route::TripSummaryResponse,
            handlers::route::TransitStopsRequest,
            handlers::route::TransitStopResponse,
            handlers::route::TransitStopsResponse,
            handlers::amenities::AmenitySearchRequest,
            handlers::amenities::AmenityResponse,
            handlers::amenities::AmenitySearchResponse,
            handlers::amenities::AmenityTypesResponse,
            handlers::score::AmenityVisitRequest,
            handlers::score::ScoreCalculateRequest,
            handlers::score::BreakdownItemResponse,
            handlers::score::ScoreResponse,
            crate::error::ErrorResponse,
        )
    )
)]
#[derive(Debug)]
pub struct ApiDoc;

/// Create OpenAPI documentation routes
///
/// - `/api-docs/openapi.json` - OpenAPI specification
/// - `/swagger-ui/*` - Swagger UI
pub fn create_openapi_routes() -> Router<AppState> {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
