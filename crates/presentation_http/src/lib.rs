//! walkwise HTTP presentation layer
//!
//! JSON API over the commute and score services, plus the server's
//! composition root.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use middleware::{ValidatedJson, ValidationError};
pub use routes::create_router;
pub use state::{AppState, ServicePorts, ServiceSettings};
