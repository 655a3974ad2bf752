//! Domain layer for walkwise
//!
//! Contains the walking-commute vocabulary: coordinates, routes, transit
//! stops, legs, commute results and weekly scores, plus the pure geometry
//! helpers (great-circle distance and the encoded polyline format).
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod geo;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use geo::{PolylineError, haversine_m, polyline};
pub use value_objects::*;
