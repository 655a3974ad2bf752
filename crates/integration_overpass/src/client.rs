//! Overpass HTTP client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument, warn};

use crate::config::OverpassConfig;
use crate::error::OverpassError;
use crate::models::{Element, RawElement, RawResponse};
use crate::query::OverpassQuery;

/// Trait for Overpass query clients
#[async_trait]
pub trait OverpassClient: Send + Sync {
    /// Run an "around" query and return the matching elements
    async fn query(&self, query: &OverpassQuery) -> Result<Vec<Element>, OverpassError>;
}

/// Overpass client posting QL to an interpreter endpoint
#[derive(Debug)]
pub struct HttpOverpassClient {
    client: Client,
    config: OverpassConfig,
}

impl HttpOverpassClient {
    /// Create a new Overpass client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &OverpassConfig) -> Result<Self, OverpassError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("walkwise/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| OverpassError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn parse_elements(body: &str) -> Result<Vec<Element>, OverpassError> {
        let raw: RawResponse =
            serde_json::from_str(body).map_err(|e| OverpassError::ParseError(e.to_string()))?;

        raw.elements
            .into_iter()
            .map(RawElement::into_element)
            .collect::<Result<_, _>>()
            .map_err(OverpassError::ParseError)
    }
}

#[async_trait]
impl OverpassClient for HttpOverpassClient {
    #[instrument(skip(self, query), fields(center = %query.center(), radius_m = query.radius_m()))]
    async fn query(&self, query: &OverpassQuery) -> Result<Vec<Element>, OverpassError> {
        let ql = query.to_ql(self.config.query_timeout_secs)?;

        debug!(endpoint = %self.config.endpoint, "Running Overpass query");

        let response = self
            .client
            .post(&self.config.endpoint)
            .form(&[("data", ql.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OverpassError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    OverpassError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!("Overpass request budget exhausted");
            return Err(OverpassError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if !status.is_success() {
            return Err(OverpassError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| OverpassError::ParseError(e.to_string()))?;

        let elements = Self::parse_elements(&body)?;
        debug!(count = elements.len(), "Overpass elements received");
        Ok(elements)
    }
}
