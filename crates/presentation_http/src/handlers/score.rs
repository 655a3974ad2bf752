//! Weekly walking score handler

use application::{AmenityVisit, CommutePreference, ScoreRequest};
use axum::{Json, extract::State};
use domain::entities::{
    Grade, ScoreBreakdownItem, ScoreResult, ScoredCommute, round_percentage,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use utoipa::ToSchema;
use validator::Validate;

use super::amenities::parse_category;
use super::common::{LatLng, round_km, round_min};
use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

const fn default_work_days() -> u32 {
    5
}

const fn default_visits() -> u32 {
    3
}

/// A regularly visited amenity type
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AmenityVisitRequest {
    #[validate(length(min = 1, max = 64, message = "must be between 1 and 64 characters"))]
    pub amenity_type: String,
    /// Round trips per week (default 3)
    #[validate(range(max = 21, message = "must be between 0 and 21"))]
    #[serde(default = "default_visits")]
    pub visits_per_week: u32,
}

/// Score request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[schema(example = json!({
    "home": {"lat": 42.2808, "lng": -83.7430},
    "work": {"lat": 42.2450, "lng": -83.6200},
    "work_days_per_week": 5,
    "commute_mode": "transit",
    "amenities": [{"amenity_type": "gym", "visits_per_week": 3}]
}))]
pub struct ScoreCalculateRequest {
    #[validate(nested)]
    pub home: LatLng,
    /// Omit when there is no commute
    #[validate(nested)]
    #[serde(default)]
    pub work: Option<LatLng>,
    #[validate(range(max = 7, message = "must be between 0 and 7"))]
    #[serde(default = "default_work_days")]
    pub work_days_per_week: u32,
    /// `transit` (default) or `walk`
    #[schema(value_type = String)]
    #[serde(default)]
    pub commute_mode: CommutePreference,
    #[validate(nested)]
    #[serde(default)]
    pub amenities: Vec<AmenityVisitRequest>,
}

impl ScoreCalculateRequest {
    fn into_score_request(self) -> Result<ScoreRequest, ApiError> {
        let amenities = self
            .amenities
            .iter()
            .map(|visit| {
                Ok(AmenityVisit {
                    category: parse_category(&visit.amenity_type)?,
                    visits_per_week: visit.visits_per_week,
                })
            })
            .collect::<Result<Vec<_>, ApiError>>()?;

        Ok(ScoreRequest {
            home: self.home.to_coordinate()?,
            work: self.work.map(LatLng::to_coordinate).transpose()?,
            work_days_per_week: self.work_days_per_week,
            commute_mode: self.commute_mode,
            amenities,
        })
    }
}

/// One recurring walk
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BreakdownItemResponse {
    pub label: String,
    pub distance_km: f64,
    pub one_way_min: f64,
    pub round_trips_per_week: u32,
    pub weekly_minutes: f64,
    /// Set for the work commute: `direct_walk`, `transit` or `walk`
    #[schema(value_type = Option<String>)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commute_mode: Option<ScoredCommute>,
}

impl From<ScoreBreakdownItem> for BreakdownItemResponse {
    fn from(item: ScoreBreakdownItem) -> Self {
        Self {
            label: item.label,
            distance_km: round_km(item.distance_km),
            one_way_min: round_min(item.one_way_min),
            round_trips_per_week: item.round_trips_per_week,
            weekly_minutes: round_min(item.weekly_minutes),
            commute_mode: item.commute_mode,
        }
    }
}

/// Weekly score
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ScoreResponse {
    pub total_weekly_walk_min: f64,
    pub total_weekly_calories: f64,
    /// Share of the 150 min/week guideline, in percent
    pub who_guideline_pct: f64,
    /// `A+`, `A`, `B`, `C`, `D` or `F`
    #[schema(value_type = String)]
    pub grade: Grade,
    pub breakdown: Vec<BreakdownItemResponse>,
}

impl From<ScoreResult> for ScoreResponse {
    fn from(result: ScoreResult) -> Self {
        Self {
            total_weekly_walk_min: round_min(result.total_weekly_walk_min),
            total_weekly_calories: result.total_weekly_calories.round(),
            who_guideline_pct: round_percentage(result.who_guideline_pct),
            grade: result.grade,
            breakdown: result
                .breakdown
                .into_iter()
                .map(BreakdownItemResponse::from)
                .collect(),
        }
    }
}

/// Weekly walking minutes, calories and grade
#[utoipa::path(
    post,
    path = "/api/score/calculate",
    tag = "score",
    request_body = ScoreCalculateRequest,
    responses(
        (status = 200, description = "Weekly score", body = ScoreResponse),
        (status = 400, description = "Invalid request or unknown amenity type", body = crate::error::ErrorResponse),
        (status = 502, description = "Backend failed", body = crate::error::ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn calculate(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ScoreCalculateRequest>,
) -> Result<Json<ScoreResponse>, ApiError> {
    let request = request.into_score_request()?;
    let result = state.scores.calculate(&request).await?;

    debug!(breakdown = result.breakdown.len(), "Score ready");
    Ok(Json(result.into()))
}
