//! Address geocoding for walkwise
//!
//! Converts free-form addresses to coordinates and back using the
//! [Nominatim](https://nominatim.openstreetmap.org) API.
//!
//! Nominatim's usage policy allows at most one request per second and
//! requires an identifying User-Agent. The client sets the header; request
//! spacing is applied by the caller so that a single limiter instance can be
//! shared by every code path that geocodes.

mod client;
mod config;
mod error;

pub use client::{GeocodedPlace, GeocodingClient, NominatimGeocodingClient};
pub use config::NominatimConfig;
pub use error::GeocodingError;
