//! Walking route providers for walkwise
//!
//! Two independent backends are wrapped here:
//!
//! - [`OrsClient`] talks to [OpenRouteService](https://openrouteservice.org)
//!   `foot-walking` directions. It needs an API key and returns real walking
//!   distance and duration.
//! - [`OsrmClient`] talks to an [OSRM](https://project-osrm.org) server. The
//!   public demo server only routes cars, so the client deliberately exposes
//!   distance and geometry only; walking time is estimated upstream.
//!
//! Both clients flip GeoJSON `[lng, lat]` pairs into [`Coordinate`]s and
//! report "no route" as `Ok(None)` rather than an error.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_routing::{OsrmClient, OsrmConfig, RoadRoutingClient};
//!
//! let client = OsrmClient::new(&OsrmConfig::default())?;
//! let route = client.road_route(&home, &work).await?;
//! ```
//!
//! [`Coordinate`]: domain::value_objects::Coordinate

mod config;
mod error;
mod models;
mod ors;
mod osrm;

pub use config::{OrsConfig, OsrmConfig};
pub use error::RoutingError;
pub use models::{FootRoute, RoadRoute};
pub use ors::{FootRoutingClient, OrsClient};
pub use osrm::{OsrmClient, RoadRoutingClient};
