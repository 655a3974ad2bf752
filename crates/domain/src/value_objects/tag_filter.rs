//! OpenStreetMap tag filter clauses
//!
//! A query is a union of [`TagGroup`]s; every clause inside one group must
//! match. The tables here are static so that a typo in a category shows up
//! in review, not at request time.

use std::fmt;

/// A single `key=value` tag clause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagFilter {
    /// OSM tag key
    pub key: &'static str,
    /// Required tag value
    pub value: &'static str,
}

impl TagFilter {
    /// Create a tag clause
    #[must_use]
    pub const fn new(key: &'static str, value: &'static str) -> Self {
        Self { key, value }
    }
}

impl fmt::Display for TagFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Conjunction of tag clauses
pub type TagGroup = &'static [TagFilter];

/// Tag groups identifying transit stops (nodes only)
pub const TRANSIT_STOP_FILTERS: &[TagGroup] = &[
    &[TagFilter::new("public_transport", "stop_position")],
    &[TagFilter::new("public_transport", "platform")],
    &[TagFilter::new("railway", "station")],
    &[TagFilter::new("railway", "halt")],
    &[TagFilter::new("railway", "tram_stop")],
    &[TagFilter::new("highway", "bus_stop")],
    &[TagFilter::new("amenity", "bus_station")],
    &[TagFilter::new("amenity", "ferry_terminal")],
];
