//! POI adapter - implements PoiQueryPort using integration_overpass
//!
//! Every request goes through one [`RateLimitedClient`], so transit stop and
//! amenity lookups share the same Overpass budget.

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{PoiElement, PoiQuery, PoiQueryPort};
use async_trait::async_trait;
use integration_overpass::{
    Element, HttpOverpassClient, OverpassClient, OverpassConfig, OverpassError, OverpassQuery,
};
use tracing::{debug, instrument};

use crate::throttle::{RateLimitedClient, ThrottleConfig};

/// Throttled Overpass POI lookups
pub struct OverpassPoiAdapter {
    client: Arc<dyn OverpassClient>,
    throttle: RateLimitedClient,
}

impl std::fmt::Debug for OverpassPoiAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverpassPoiAdapter")
            .field("client", &"OverpassClient")
            .field("throttle", &self.throttle)
            .finish()
    }
}

impl OverpassPoiAdapter {
    /// Create the adapter with its own throttle
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &OverpassConfig, throttle: &ThrottleConfig) -> Result<Self, ApplicationError> {
        let client = HttpOverpassClient::new(config).map_err(map_error)?;
        Ok(Self::with_client(Arc::new(client), throttle))
    }

    /// Wrap an existing client
    #[must_use]
    pub fn with_client(client: Arc<dyn OverpassClient>, throttle: &ThrottleConfig) -> Self {
        Self {
            client,
            throttle: RateLimitedClient::new("overpass", throttle),
        }
    }
}

/// Map integration Overpass error to application error
fn map_error(err: OverpassError) -> ApplicationError {
    match err {
        OverpassError::ParseError(e) => ApplicationError::Decode(e),
        OverpassError::InvalidQuery(e) => ApplicationError::InvalidInput(e),
        other @ (OverpassError::ConnectionFailed(_)
        | OverpassError::RequestFailed(_)
        | OverpassError::RateLimitExceeded { .. }
        | OverpassError::Timeout { .. }) => {
            ApplicationError::UpstreamUnavailable(other.to_string())
        },
    }
}

fn to_poi(element: Element) -> PoiElement {
    PoiElement {
        location: element.location,
        tags: element.tags,
    }
}

#[async_trait]
impl PoiQueryPort for OverpassPoiAdapter {
    #[instrument(skip(self, query), fields(center = %query.center, radius_m = query.radius_m, ways = query.include_ways))]
    async fn query(&self, query: &PoiQuery) -> Result<Vec<PoiElement>, ApplicationError> {
        let overpass_query = OverpassQuery::around(query.center, query.radius_m)
            .with_groups(query.groups)
            .with_ways(query.include_ways);

        let elements = self
            .throttle
            .call(|| self.client.query(&overpass_query))
            .await
            .map_err(map_error)?;

        debug!(count = elements.len(), "Overpass elements received");
        Ok(elements.into_iter().map(to_poi).collect())
    }
}
