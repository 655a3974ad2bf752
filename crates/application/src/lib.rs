//! Application layer - Use cases and orchestration
//!
//! Defines the ports for every external collaborator (routing backends, POI
//! queries, geocoding, transit itineraries) and the services that turn their
//! answers into walking routes, commute decisions and weekly scores.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
