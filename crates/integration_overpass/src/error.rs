//! Overpass error types

use thiserror::Error;

/// Errors that can occur while querying Overpass
#[derive(Debug, Error)]
pub enum OverpassError {
    /// Connection to the Overpass endpoint failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Overpass answered with an unexpected status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse the Overpass response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Request budget exhausted (HTTP 429)
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by the server)
        retry_after_secs: Option<u64>,
    },

    /// Query could not be built
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl OverpassError {
    /// True for the backend's "too many requests" signal
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimitExceeded { .. })
    }

    /// Whether the payload, not the transport, was at fault
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::ParseError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_429_counts_as_rate_limited() {
        assert!(
            OverpassError::RateLimitExceeded {
                retry_after_secs: None
            }
            .is_rate_limited()
        );
        assert!(!OverpassError::RequestFailed("HTTP 504".to_string()).is_rate_limited());
        assert!(!OverpassError::Timeout { timeout_secs: 15 }.is_rate_limited());
    }

    #[test]
    fn error_display() {
        let err = OverpassError::InvalidQuery("no tag groups".to_string());
        assert_eq!(err.to_string(), "Invalid query: no tag groups");
    }
}
