//! Amenity search result

use serde::{Deserialize, Serialize};

use crate::value_objects::{AmenityCategory, Coordinate};

/// A point of interest matching an [`AmenityCategory`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    /// POI name ("Unnamed" when untagged)
    pub name: String,
    /// Category the POI was searched under
    pub category: AmenityCategory,
    /// POI position (way centre for areas)
    pub location: Coordinate,
    /// Great-circle distance from the query point in metres
    pub distance_m: f64,
}

impl Amenity {
    /// Name used when the POI carries no `name` tag
    pub const UNNAMED: &'static str = "Unnamed";
}
