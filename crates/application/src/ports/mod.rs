//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod geocoding_port;
mod itinerary_port;
mod poi_query_port;
mod routing_port;

#[cfg(test)]
pub use geocoding_port::MockGeocodingPort;
pub use geocoding_port::{GeocodedAddress, GeocodingPort};
#[cfg(test)]
pub use itinerary_port::MockItineraryPort;
pub use itinerary_port::{Itinerary, ItineraryPort, ItineraryStep, Ride, StepKind};
#[cfg(test)]
pub use poi_query_port::MockPoiQueryPort;
pub use poi_query_port::{PoiElement, PoiQuery, PoiQueryPort};
#[cfg(test)]
pub use routing_port::{MockPreciseRoutingPort, MockRoadRoutingPort};
pub use routing_port::{FootPath, PreciseRoutingPort, RoadPath, RoadRoutingPort};
