//! API error handling
//!
//! Every failure leaves the server as `{error, code, details?}` with a status
//! derived from the application error taxonomy.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A backend timed out, failed or stayed rate limited
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// A backend answered with something unreadable
    #[error("Upstream decode error: {0}")]
    UpstreamDecode(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// HTTP status for this error
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::UpstreamUnavailable(_) | Self::UpstreamDecode(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::NotFound(_) => "not_found",
            Self::UpstreamUnavailable(_) => "upstream_unavailable",
            Self::UpstreamDecode(_) => "upstream_decode_error",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let (message, details) = match self {
            Self::BadRequest(msg) | Self::NotFound(msg) => (msg, None),
            Self::UpstreamUnavailable(msg) => {
                warn!(error = %msg, "Upstream service unavailable");
                ("Upstream service unavailable".to_string(), Some(msg))
            },
            Self::UpstreamDecode(msg) => {
                warn!(error = %msg, "Unreadable upstream response");
                ("Upstream service returned an unreadable response".to_string(), Some(msg))
            },
            Self::Internal(msg) => {
                error!(error = %msg, "Internal error");
                ("An internal error occurred".to_string(), None)
            },
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::InvalidInput(msg) => Self::BadRequest(msg),
            ApplicationError::NotFound(msg) => Self::NotFound(msg),
            ApplicationError::UpstreamUnavailable(msg) => Self::UpstreamUnavailable(msg),
            ApplicationError::Decode(msg) => Self::UpstreamDecode(msg),
            ApplicationError::Configuration(msg) => Self::Internal(msg),
        }
    }
}
