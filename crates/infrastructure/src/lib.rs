//! Infrastructure layer for walkwise
//!
//! Wires the integration clients into the application ports, spaces requests
//! to shared public backends, loads configuration and sets up telemetry.

pub mod adapters;
pub mod config;
pub mod telemetry;
pub mod throttle;

pub use adapters::{
    GoogleRoutesItineraryAdapter, NominatimGeocodingAdapter, OrsRoutingAdapter,
    OsrmRoutingAdapter, OverpassPoiAdapter,
};
pub use config::AppConfig;
pub use telemetry::{TelemetryConfig, TelemetryGuard, init_telemetry};
pub use throttle::{RateLimitSignal, RateLimitedClient, ThrottleConfig};
