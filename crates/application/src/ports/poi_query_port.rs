//! Points-of-interest query port

use std::collections::HashMap;

use async_trait::async_trait;
use domain::value_objects::{Coordinate, TagGroup};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// A radius search for elements matching any of the tag groups
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoiQuery {
    /// Search centre
    pub center: Coordinate,
    /// Search radius in metres
    pub radius_m: u32,
    /// OR-ed groups of AND-ed tag clauses
    pub groups: &'static [TagGroup],
    /// Also match ways (reported at their centre)
    pub include_ways: bool,
}

impl PoiQuery {
    /// Node-only query
    #[must_use]
    pub const fn nodes(center: Coordinate, radius_m: u32, groups: &'static [TagGroup]) -> Self {
        Self {
            center,
            radius_m,
            groups,
            include_ways: false,
        }
    }

    /// Extend the query to ways
    #[must_use]
    pub const fn with_ways(mut self) -> Self {
        self.include_ways = true;
        self
    }
}

/// One matching element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PoiElement {
    /// Position, if the backend reported one
    pub location: Option<Coordinate>,
    /// Raw OSM tags
    pub tags: HashMap<String, String>,
}

impl PoiElement {
    /// The element's non-blank `name` tag
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.tags
            .get("name")
            .map(String::as_str)
            .filter(|name| !name.trim().is_empty())
    }
}

/// Port for the shared POI query backend
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PoiQueryPort: Send + Sync {
    /// Run a radius query
    async fn query(&self, query: &PoiQuery) -> Result<Vec<PoiElement>, ApplicationError>;
}
