//! Public transit itineraries for walkwise
//!
//! Wraps the [Google Routes API](https://developers.google.com/maps/documentation/routes)
//! `computeRoutes` endpoint with `travelMode=TRANSIT`. The client returns the
//! ordered steps of the best itinerary, each tagged as walking or riding, with
//! decoded step geometry and the vehicle/stop details of transit steps.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_transit::{GoogleRoutesClient, GoogleRoutesConfig, ItineraryClient};
//!
//! let client = GoogleRoutesClient::new(&GoogleRoutesConfig::default())?;
//! let itinerary = client.transit_itinerary(&home, &work, None).await?;
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{GoogleRoutesClient, ItineraryClient};
pub use config::GoogleRoutesConfig;
pub use error::TransitError;
pub use models::{Itinerary, ItineraryStep, TransitDetails, TravelMode};
