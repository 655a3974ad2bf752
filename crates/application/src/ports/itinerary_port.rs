//! Transit itinerary port
//!
//! An optional provider that plans the whole door-to-door trip, rides
//! included. Its walking steps replace the nearest-stop heuristic when it
//! is configured.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::entities::WalkRoute;
use domain::value_objects::{Coordinate, StopType};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// How a step is travelled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// On foot
    Walk,
    /// Riding a vehicle
    Transit,
    /// Anything else; ignored by the commute split
    Other,
}

/// Boarding and alighting details of a ride
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ride {
    /// Stop where the ride starts
    pub departure_stop: String,
    /// Stop where the ride ends
    pub arrival_stop: String,
    /// Line shown to riders (short name preferred)
    pub line: String,
    /// Kind of stop served by the vehicle
    pub stop_type: StopType,
}

/// One step of an itinerary
#[derive(Debug, Clone, PartialEq)]
pub struct ItineraryStep {
    /// Walking or riding
    pub kind: StepKind,
    /// Length in metres
    pub distance_m: f64,
    /// Duration in seconds
    pub duration_s: f64,
    /// Path in `(lat, lng)` order
    pub geometry: Vec<Coordinate>,
    /// Present on transit steps
    pub ride: Option<Ride>,
}

impl ItineraryStep {
    /// The step as a walking route segment
    #[must_use]
    pub fn to_walk_route(&self) -> WalkRoute {
        WalkRoute::precise(self.distance_m, self.duration_s, self.geometry.clone())
    }
}

/// A planned trip
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    /// Steps in travel order
    pub steps: Vec<ItineraryStep>,
    /// Door-to-door duration in seconds
    pub duration_s: f64,
    /// Door-to-door length in metres
    pub distance_m: f64,
}

/// Port for the multi-leg transit itinerary provider
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ItineraryPort: Send + Sync {
    /// Best transit itinerary; `None` if the provider has no route
    async fn transit_itinerary(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
        departure: Option<DateTime<Utc>>,
    ) -> Result<Option<Itinerary>, ApplicationError>;
}
