//! Geocoding adapter - implements GeocodingPort using integration_geocoding

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{GeocodedAddress, GeocodingPort};
use async_trait::async_trait;
use domain::value_objects::Coordinate;
use integration_geocoding::{
    GeocodingClient, GeocodingError, NominatimConfig, NominatimGeocodingClient,
};
use tracing::{debug, instrument};

use crate::throttle::{RateLimitedClient, ThrottleConfig};

/// Throttled Nominatim geocoding
pub struct NominatimGeocodingAdapter {
    client: Arc<dyn GeocodingClient>,
    throttle: RateLimitedClient,
}

impl std::fmt::Debug for NominatimGeocodingAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NominatimGeocodingAdapter")
            .field("client", &"GeocodingClient")
            .field("throttle", &self.throttle)
            .finish()
    }
}

impl NominatimGeocodingAdapter {
    /// Create the adapter with its own throttle
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &NominatimConfig, throttle: &ThrottleConfig) -> Result<Self, ApplicationError> {
        let client = NominatimGeocodingClient::new(config).map_err(map_error)?;
        Ok(Self::with_client(Arc::new(client), throttle))
    }

    /// Wrap an existing client
    #[must_use]
    pub fn with_client(client: Arc<dyn GeocodingClient>, throttle: &ThrottleConfig) -> Self {
        Self {
            client,
            throttle: RateLimitedClient::new("nominatim", throttle),
        }
    }
}

/// Map integration geocoding error to application error
fn map_error(err: GeocodingError) -> ApplicationError {
    match err {
        GeocodingError::AddressNotFound(address) => {
            ApplicationError::NotFound(format!("Address not found: {address}"))
        },
        GeocodingError::InvalidQuery(e) => ApplicationError::InvalidInput(e),
        GeocodingError::ParseError(e) => ApplicationError::Decode(e),
        other @ (GeocodingError::ConnectionFailed(_)
        | GeocodingError::RequestFailed(_)
        | GeocodingError::RateLimitExceeded
        | GeocodingError::Timeout) => ApplicationError::UpstreamUnavailable(other.to_string()),
    }
}

#[async_trait]
impl GeocodingPort for NominatimGeocodingAdapter {
    #[instrument(skip(self))]
    async fn forward(&self, address: &str) -> Result<GeocodedAddress, ApplicationError> {
        if address.trim().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "address must not be empty".to_string(),
            ));
        }

        let place = self
            .throttle
            .call(|| self.client.forward(address))
            .await
            .map_err(map_error)?;

        debug!(location = %place.location, "Address geocoded");
        Ok(GeocodedAddress {
            location: place.location,
            display_name: place.display_name,
        })
    }

    #[instrument(skip(self), fields(location = %location))]
    async fn reverse(&self, location: &Coordinate) -> Result<String, ApplicationError> {
        self.throttle
            .call(|| self.client.reverse(location))
            .await
            .map_err(map_error)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use integration_geocoding::GeocodedPlace;

    use super::*;

    struct CountingGeocoder {
        calls: AtomicU32,
    }

    #[async_trait]
    impl GeocodingClient for CountingGeocoder {
        async fn forward(&self, address: &str) -> Result<GeocodedPlace, GeocodingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if address == "nowhere" {
                return Err(GeocodingError::AddressNotFound(address.to_string()));
            }
            Ok(GeocodedPlace {
                location: Coordinate::new(42.2808, -83.743).unwrap(),
                display_name: "Ann Arbor, Michigan".to_string(),
            })
        }

        async fn reverse(&self, _location: &Coordinate) -> Result<String, GeocodingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("Main Street, Ann Arbor".to_string())
        }
    }

    fn adapter() -> (Arc<CountingGeocoder>, NominatimGeocodingAdapter) {
        let client = Arc::new(CountingGeocoder {
            calls: AtomicU32::new(0),
        });
        let adapter =
            NominatimGeocodingAdapter::with_client(client.clone(), &ThrottleConfig::nominatim());
        (client, adapter)
    }

    #[tokio::test(start_paused = true)]
    async fn forward_maps_place() {
        let (_, adapter) = adapter();
        let address = adapter.forward("Ann Arbor").await.unwrap();
        assert_eq!(address.display_name, "Ann Arbor, Michigan");
        assert!((address.location.lat() - 42.2808).abs() < f64::EPSILON);
    }

    #[tokio::test(start_paused = true)]
    async fn forward_not_found() {
        let (_, adapter) = adapter();
        let err = adapter.forward("nowhere").await.unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound(msg) if msg.contains("nowhere")));
    }

    #[tokio::test(start_paused = true)]
    async fn blank_address_never_reaches_client() {
        let (client, adapter) = adapter();
        let err = adapter.forward("   ").await.unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidInput(_)));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn calls_are_spaced_by_policy_interval() {
        let (client, adapter) = adapter();
        let start = tokio::time::Instant::now();

        adapter.forward("Ann Arbor").await.unwrap();
        adapter
            .reverse(&Coordinate::new(42.28, -83.74).unwrap())
            .await
            .unwrap();

        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
        assert!(start.elapsed() >= std::time::Duration::from_millis(1100));
    }

    #[test]
    fn error_mapping() {
        assert!(matches!(
            map_error(GeocodingError::RateLimitExceeded),
            ApplicationError::UpstreamUnavailable(_)
        ));
        assert!(matches!(
            map_error(GeocodingError::ParseError("bad lat".into())),
            ApplicationError::Decode(_)
        ));
        assert!(matches!(
            map_error(GeocodingError::Timeout),
            ApplicationError::UpstreamUnavailable(_)
        ));
    }
}
