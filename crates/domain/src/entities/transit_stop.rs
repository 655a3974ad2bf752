//! Transit stop entity

use serde::{Deserialize, Serialize};

use crate::value_objects::{Coordinate, StopType};

/// A transit stop near a query point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitStop {
    /// Stop name ("Unnamed stop" when untagged)
    pub name: String,
    /// Stop classification
    pub stop_type: StopType,
    /// Stop position
    pub location: Coordinate,
    /// Great-circle distance from the query point in metres
    pub distance_m: f64,
}

impl TransitStop {
    /// Name used when the POI carries no `name` tag
    pub const UNNAMED: &'static str = "Unnamed stop";
}
