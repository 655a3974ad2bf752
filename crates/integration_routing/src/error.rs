//! Routing error types

use thiserror::Error;

/// Errors that can occur while talking to a routing backend
#[derive(Debug, Error)]
pub enum RoutingError {
    /// Connection to the routing service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Routing service answered with an unexpected status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from routing service
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

impl RoutingError {
    /// Map a transport-level reqwest failure
    pub(crate) fn from_send(err: &reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::Timeout { timeout_secs }
        } else {
            Self::ConnectionFailed(err.to_string())
        }
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
    fn decode_classification() {
        assert!(RoutingError::ParseError("bad".to_string()).is_decode());
        assert!(!RoutingError::RequestFailed("HTTP 500".to_string()).is_decode());
        assert!(!RoutingError::Timeout { timeout_secs: 15 }.is_decode());
    }

    #[test]
    fn error_display() {
        let err = RoutingError::Timeout { timeout_secs: 15 };
        assert!(err.to_string().contains("15"));

        let err = RoutingError::RateLimitExceeded {
            retry_after_secs: Some(30),
        };
        assert!(err.to_string().contains("30"));
    }
}
