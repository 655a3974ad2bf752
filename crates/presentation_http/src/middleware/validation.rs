//! Request validation
//!
//! Provides a `ValidatedJson` extractor that validates request bodies using the validator crate.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// Validation error type
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] JsonRejection),
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let message = match &self {
            Self::JsonError(e) => e.body_text(),
            Self::ValidationFailed(msg) => msg.clone(),
        };

        let body = serde_json::json!({
            "error": message,
            "code": "validation_error"
        });

        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// A JSON extractor that also validates the request body
///
/// Nested structs and lists report their failures with a dotted path, e.g.
/// `origin.lat` or `amenities[1].visits_per_week`.
///
/// ```ignore
/// async fn handler(ValidatedJson(req): ValidatedJson<WalkRouteRequest>) {
///     // req is validated
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;

        value
            .validate()
            .map_err(|e| ValidationError::ValidationFailed(describe(&e)))?;

        Ok(Self(value))
    }
}

/// One `path: message` entry per failing field, sorted by path
fn describe(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();
    collect(errors, "", &mut messages);
    messages.sort();
    messages.join("; ")
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                out.extend(field_errors.iter().map(|error| {
                    let message = error
                        .message
                        .as_ref()
                        .map_or_else(|| error.code.to_string(), ToString::to_string);
                    format!("{path}: {message}")
                }));
            },
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, &format!("{path}[{index}]"), out);
                }
            },
        }
    }
}
