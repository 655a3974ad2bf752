//! Health check handler

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Walking times come from the foot-routing provider
    pub precise_routing: bool,
    /// Commutes are planned from transit itineraries
    pub itinerary: bool,
}

/// Liveness check - is the server running?
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Server is running", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        precise_routing: state.commute.gateway().is_precise(),
        itinerary: state.commute.has_itinerary(),
    })
}
