//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, openapi, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health::health_check))
        // Geocoding
        .route("/api/geocode/forward", post(handlers::geocode::forward))
        .route("/api/geocode/reverse", post(handlers::geocode::reverse))
        // Routing
        .route("/api/route/walk", post(handlers::route::walk))
        .route("/api/route/commute", post(handlers::route::commute))
        .route("/api/route/transit-stops", post(handlers::route::transit_stops))
        // Amenities
        .route("/api/amenities/search", post(handlers::amenities::search))
        .route("/api/amenities/types", get(handlers::amenities::types))
        // Score
        .route("/api/score/calculate", post(handlers::score::calculate))
        .merge(openapi::create_openapi_routes())
        .with_state(state)
}
