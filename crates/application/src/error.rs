//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Caller supplied something unusable
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No route, address or stop exists for the request
    #[error("Not found: {0}")]
    NotFound(String),

    /// An external service failed, timed out or stayed rate limited
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// An external service answered with a payload we cannot read
    #[error("Decode error: {0}")]
    Decode(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Whether the request itself was at fault
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Domain(_) | Self::InvalidInput(_) | Self::NotFound(_)
        )
    }
}
