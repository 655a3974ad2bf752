//! Overpass API integration for walkwise
//!
//! Builds Overpass QL "around" queries from static tag filter tables and
//! runs them against an Overpass interpreter endpoint.
//!
//! The public Overpass instances enforce a per-client request budget and
//! answer `429 Too Many Requests` when it is exhausted. This crate only
//! reports that condition ([`OverpassError::is_rate_limited`]); spacing and
//! retrying requests is the caller's job.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::TRANSIT_STOP_FILTERS;
//! use integration_overpass::{HttpOverpassClient, OverpassClient, OverpassConfig, OverpassQuery};
//!
//! let client = HttpOverpassClient::new(&OverpassConfig::default())?;
//! let query = OverpassQuery::around(center, 2000).with_groups(TRANSIT_STOP_FILTERS);
//! let elements = client.query(&query).await?;
//! ```

mod client;
mod config;
mod error;
mod models;
mod query;

pub use client::{HttpOverpassClient, OverpassClient};
pub use config::OverpassConfig;
pub use error::OverpassError;
pub use models::{Element, ElementKind};
pub use query::OverpassQuery;
