//! Transit error types

use thiserror::Error;

/// Errors that can occur while fetching a transit itinerary
#[derive(Debug, Error)]
pub enum TransitError {
    /// Connection to the transit service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request to transit service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from transit service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by API)
        retry_after_secs: Option<u64>,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl TransitError {
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
    fn test_decode_classification() {
        assert!(TransitError::ParseError("bad polyline".to_string()).is_decode());
        assert!(!TransitError::ConnectionFailed("refused".to_string()).is_decode());
        assert!(
            !TransitError::RateLimitExceeded {
                retry_after_secs: None
            }
            .is_decode()
        );
    }

    #[test]
    fn test_error_display() {
        let err = TransitError::RateLimitExceeded {
            retry_after_secs: Some(60),
        };
        assert!(err.to_string().contains("60"));

        let err = TransitError::Timeout { timeout_secs: 15 };
        assert!(err.to_string().contains("15"));
    }
}
