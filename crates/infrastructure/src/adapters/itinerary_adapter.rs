//! Itinerary adapter - implements ItineraryPort using integration_transit

use application::error::ApplicationError;
use application::ports::{Itinerary, ItineraryPort, ItineraryStep, Ride, StepKind};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::value_objects::{Coordinate, StopType};
use integration_transit::{
    GoogleRoutesClient, GoogleRoutesConfig, Itinerary as TransitItinerary, ItineraryClient,
    ItineraryStep as TransitStep, TransitDetails, TransitError, TravelMode,
};
use tracing::{debug, instrument};

/// Multi-leg transit itineraries from the Google Routes API
#[derive(Debug)]
pub struct GoogleRoutesItineraryAdapter {
    client: GoogleRoutesClient,
}

impl GoogleRoutesItineraryAdapter {
    /// Create the adapter
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Configuration`] if no API key is set.
    pub fn new(config: &GoogleRoutesConfig) -> Result<Self, ApplicationError> {
        Ok(Self {
            client: GoogleRoutesClient::new(config).map_err(Self::map_error)?,
        })
    }

    /// Map integration transit error to application error
    fn map_error(err: TransitError) -> ApplicationError {
        match err {
            TransitError::ParseError(e) => ApplicationError::Decode(e),
            TransitError::ConfigurationError(e) => ApplicationError::Configuration(e),
            other @ (TransitError::ConnectionFailed(_)
            | TransitError::RequestFailed(_)
            | TransitError::RateLimitExceeded { .. }
            | TransitError::Timeout { .. }) => {
                ApplicationError::UpstreamUnavailable(other.to_string())
            },
        }
    }

    const fn map_mode(mode: TravelMode) -> StepKind {
        match mode {
            TravelMode::Walk => StepKind::Walk,
            TravelMode::Transit => StepKind::Transit,
            TravelMode::Other => StepKind::Other,
        }
    }

    /// Route number if the API has one, otherwise the long line name
    fn map_ride(details: TransitDetails) -> Ride {
        let line = if details.line_short_name.trim().is_empty() {
            details.line_name
        } else {
            details.line_short_name
        };
        Ride {
            stop_type: StopType::from_vehicle_type(&details.vehicle_type),
            departure_stop: details.departure_stop,
            arrival_stop: details.arrival_stop,
            line,
        }
    }

    fn map_step(step: TransitStep) -> ItineraryStep {
        ItineraryStep {
            kind: Self::map_mode(step.mode),
            distance_m: step.distance_m,
            duration_s: step.duration_s,
            geometry: step.geometry,
            ride: step.transit.map(Self::map_ride),
        }
    }

    fn map_itinerary(itinerary: TransitItinerary) -> Itinerary {
        Itinerary {
            steps: itinerary.steps.into_iter().map(Self::map_step).collect(),
            duration_s: itinerary.duration_s,
            distance_m: itinerary.distance_m,
        }
    }
}

#[async_trait]
impl ItineraryPort for GoogleRoutesItineraryAdapter {
    #[instrument(skip(self), fields(origin = %origin, destination = %destination))]
    async fn transit_itinerary(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
        departure: Option<DateTime<Utc>>,
    ) -> Result<Option<Itinerary>, ApplicationError> {
        let itinerary = self
            .client
            .transit_itinerary(origin, destination, departure)
            .await
            .map_err(Self::map_error)?;

        match &itinerary {
            Some(found) => debug!(
                steps = found.steps.len(),
                duration_s = found.duration_s,
                has_transit = found.has_transit(),
                "Transit itinerary received"
            ),
            None => debug!("No transit itinerary"),
        }

        Ok(itinerary.map(Self::map_itinerary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(short: &str, long: &str, vehicle: &str) -> TransitDetails {
        TransitDetails {
            departure_stop: "Blake Transit Center".to_string(),
            arrival_stop: "Ypsilanti Transit Center".to_string(),
            line_name: long.to_string(),
            line_short_name: short.to_string(),
            vehicle_type: vehicle.to_string(),
            agency: "TheRide".to_string(),
            headsign: "Ypsilanti".to_string(),
            stop_count: 22,
        }
    }

    #[test]
    fn new_requires_api_key() {
        let err = GoogleRoutesItineraryAdapter::new(&GoogleRoutesConfig::default()).unwrap_err();
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }

    #[test]
    fn ride_prefers_route_number() {
        let ride = GoogleRoutesItineraryAdapter::map_ride(details("4", "Washtenaw", "BUS"));
        assert_eq!(ride.line, "4");
        assert_eq!(ride.stop_type, StopType::BusStop);
        assert_eq!(ride.departure_stop, "Blake Transit Center");
    }

    #[test]
    fn ride_falls_back_to_long_name() {
        let ride = GoogleRoutesItineraryAdapter::map_ride(details("", "Red Line", "SUBWAY"));
        assert_eq!(ride.line, "Red Line");
        assert_eq!(ride.stop_type, StopType::TrainStation);
    }

    #[test]
    fn step_mapping_keeps_measures() {
        let step = TransitStep {
            mode: TravelMode::Walk,
            distance_m: 220.0,
            duration_s: 180.0,
            geometry: vec![Coordinate::new(42.28, -83.74).unwrap()],
            transit: None,
        };
        let mapped = GoogleRoutesItineraryAdapter::map_step(step);
        assert_eq!(mapped.kind, StepKind::Walk);
        assert!((mapped.duration_s - 180.0).abs() < f64::EPSILON);
        assert_eq!(mapped.geometry.len(), 1);
        assert!(mapped.ride.is_none());
    }

    #[test]
    fn error_mapping() {
        assert!(matches!(
            GoogleRoutesItineraryAdapter::map_error(TransitError::ParseError("polyline".into())),
            ApplicationError::Decode(_)
        ));
        assert!(matches!(
            GoogleRoutesItineraryAdapter::map_error(TransitError::RequestFailed("HTTP 403".into())),
            ApplicationError::UpstreamUnavailable(_)
        ));
    }
}
