//! Walking leg entity

use serde::{Deserialize, Serialize};

use super::walk_route::WalkRoute;
use crate::value_objects::{Coordinate, StopType};

/// A walking leg to or from a transit stop
///
/// May stand for one routed segment or several merged ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkLeg {
    /// Stop the leg starts or ends at
    pub stop_name: String,
    /// Kind of that stop
    pub stop_type: StopType,
    /// Length in kilometres
    pub distance_km: f64,
    /// Walking time in minutes
    pub duration_min: f64,
    /// Path in travel order
    pub geometry: Vec<Coordinate>,
}

impl WalkLeg {
    /// Leg covering a single routed segment
    #[must_use]
    pub fn from_route(route: WalkRoute, stop_name: impl Into<String>, stop_type: StopType) -> Self {
        Self {
            stop_name: stop_name.into(),
            stop_type,
            distance_km: route.distance_km,
            duration_min: route.duration_min,
            geometry: route.geometry,
        }
    }
}
