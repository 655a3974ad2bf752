//! Application services - Use case implementations

mod amenity_search;
mod commute_composer;
mod commute_service;
mod itinerary_commute;
mod leg_merge;
mod routing_gateway;
mod score_aggregator;
mod score_service;
mod transit_stop_locator;

pub use amenity_search::{
    AmenitySearch, DEFAULT_AMENITY_RADIUS_M, MAX_AMENITY_RADIUS_M, MIN_AMENITY_RADIUS_M,
    clamp_amenity_radius,
};
pub use commute_composer::CommuteComposer;
pub use commute_service::CommuteService;
pub use itinerary_commute::commute_from_itinerary;
pub use leg_merge::merge_walk_legs;
pub use routing_gateway::{DEFAULT_WALKING_SPEED_KMH, RoutingGateway};
pub use score_aggregator::{AmenityTrip, CommuteTrip, ScoreAggregator, ScoreConfig};
pub use score_service::{
    AmenityVisit, CommutePreference, DEFAULT_SCORE_AMENITY_RADIUS_M, MAX_WORK_DAYS_PER_WEEK,
    ScoreRadii, ScoreRequest, ScoreService,
};
pub use transit_stop_locator::{DEFAULT_STOP_LIMIT, DEFAULT_TRANSIT_RADIUS_M, TransitStopLocator};
