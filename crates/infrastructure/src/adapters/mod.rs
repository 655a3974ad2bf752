//! Adapters implementing application ports on top of the integration crates

mod geocoding_adapter;
mod itinerary_adapter;
mod poi_adapter;
mod routing_adapter;

pub use geocoding_adapter::NominatimGeocodingAdapter;
pub use itinerary_adapter::GoogleRoutesItineraryAdapter;
pub use poi_adapter::OverpassPoiAdapter;
pub use routing_adapter::{OrsRoutingAdapter, OsrmRoutingAdapter};
