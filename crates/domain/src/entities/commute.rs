//! Commute decision result

use serde::{Deserialize, Serialize};

use super::walk_leg::WalkLeg;
use super::walk_route::WalkRoute;

/// How the commute is walked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommuteMode {
    /// Walk the whole way
    DirectWalk,
    /// Walk to a stop, ride, walk from a stop
    Transit,
}

/// Door-to-door figures of a transit itinerary, riding included
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TripSummary {
    /// Total trip time in minutes
    pub duration_min: f64,
    /// Total trip length in kilometres
    pub distance_km: f64,
}

/// Outcome of comparing a direct walk with walking via transit
///
/// Only the constructors build values, which keeps the mode and the leg
/// fields consistent: `DirectWalk` has no legs and totals equal the direct
/// route; `Transit` has both end legs and totals equal the sum of all legs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommuteResult {
    mode: CommuteMode,
    home_to_transit: Option<WalkLeg>,
    transit_to_work: Option<WalkLeg>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    transfer_walks: Vec<WalkLeg>,
    total_walk_min: f64,
    total_walk_km: f64,
    direct_walk_min: f64,
    direct_walk_km: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    transit_trip: Option<TripSummary>,
}

impl CommuteResult {
    /// Walk the whole way
    #[must_use]
    pub fn direct_walk(direct: &WalkRoute) -> Self {
        Self {
            mode: CommuteMode::DirectWalk,
            home_to_transit: None,
            transit_to_work: None,
            transfer_walks: Vec::new(),
            total_walk_min: direct.duration_min,
            total_walk_km: direct.distance_km,
            direct_walk_min: direct.duration_min,
            direct_walk_km: direct.distance_km,
            transit_trip: None,
        }
    }

    /// Walk to the home-side stop and from the work-side stop
    #[must_use]
    pub fn via_transit(home_to_transit: WalkLeg, transit_to_work: WalkLeg, direct: &WalkRoute) -> Self {
        Self::via_itinerary(home_to_transit, Vec::new(), transit_to_work, direct, None)
    }

    /// Transit commute that may include walks between vehicles
    #[must_use]
    pub fn via_itinerary(
        home_to_transit: WalkLeg,
        transfer_walks: Vec<WalkLeg>,
        transit_to_work: WalkLeg,
        direct: &WalkRoute,
        transit_trip: Option<TripSummary>,
    ) -> Self {
        let legs = std::iter::once(&home_to_transit)
            .chain(&transfer_walks)
            .chain(std::iter::once(&transit_to_work));
        let (total_walk_min, total_walk_km) = legs.fold((0.0, 0.0), |(min, km), leg| {
            (min + leg.duration_min, km + leg.distance_km)
        });

        Self {
            mode: CommuteMode::Transit,
            home_to_transit: Some(home_to_transit),
            transit_to_work: Some(transit_to_work),
            transfer_walks,
            total_walk_min,
            total_walk_km,
            direct_walk_min: direct.duration_min,
            direct_walk_km: direct.distance_km,
            transit_trip,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> CommuteMode {
        self.mode
    }

    #[must_use]
    pub const fn home_to_transit(&self) -> Option<&WalkLeg> {
        self.home_to_transit.as_ref()
    }

    #[must_use]
    pub const fn transit_to_work(&self) -> Option<&WalkLeg> {
        self.transit_to_work.as_ref()
    }

    #[must_use]
    pub fn transfer_walks(&self) -> &[WalkLeg] {
        &self.transfer_walks
    }

    /// Walking minutes one way
    #[must_use]
    pub const fn total_walk_min(&self) -> f64 {
        self.total_walk_min
    }

    /// Walking kilometres one way
    #[must_use]
    pub const fn total_walk_km(&self) -> f64 {
        self.total_walk_km
    }

    #[must_use]
    pub const fn direct_walk_min(&self) -> f64 {
        self.direct_walk_min
    }

    #[must_use]
    pub const fn direct_walk_km(&self) -> f64 {
        self.direct_walk_km
    }

    #[must_use]
    pub const fn transit_trip(&self) -> Option<TripSummary> {
        self.transit_trip
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::RouteSource;
    use crate::value_objects::StopType;

    fn route(distance_km: f64, duration_min: f64) -> WalkRoute {
        WalkRoute {
            distance_km,
            duration_min,
            geometry: vec![],
            source: RouteSource::Precise,
        }
    }

    fn leg(name: &str, distance_km: f64, duration_min: f64) -> WalkLeg {
        WalkLeg::from_route(route(distance_km, duration_min), name, StopType::BusStop)
    }

    #[test]
    fn direct_walk_mirrors_route() {
        let result = CommuteResult::direct_walk(&route(1.6, 20.0));
        assert_eq!(result.mode(), CommuteMode::DirectWalk);
        assert!(result.home_to_transit().is_none());
        assert!(result.transit_to_work().is_none());
        assert!((result.total_walk_min() - 20.0).abs() < f64::EPSILON);
        assert!((result.direct_walk_km() - 1.6).abs() < f64::EPSILON);
    }

    #[test]
    fn transit_totals_are_leg_sums() {
        let result = CommuteResult::via_transit(
            leg("State & Liberty", 0.5, 6.0),
            leg("Central Campus", 0.75, 9.0),
            &route(1.6, 20.0),
        );
        assert_eq!(result.mode(), CommuteMode::Transit);
        assert!((result.total_walk_min() - 15.0).abs() < f64::EPSILON);
        assert!((result.total_walk_km() - 1.25).abs() < f64::EPSILON);
        assert!((result.direct_walk_min() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn transfers_count_towards_totals() {
        let result = CommuteResult::via_itinerary(
            leg("A", 0.2, 3.0),
            vec![leg("B → C", 0.1, 2.0)],
            leg("D", 0.3, 4.0),
            &route(5.0, 60.0),
            Some(TripSummary {
                duration_min: 35.0,
                distance_km: 6.0,
            }),
        );
        assert!((result.total_walk_min() - 9.0).abs() < f64::EPSILON);
        assert_eq!(result.transfer_walks().len(), 1);
    }

    #[test]
    fn serialization_shape() {
        let json = serde_json::to_value(CommuteResult::direct_walk(&route(1.0, 12.0))).unwrap();
        assert_eq!(json["mode"], "direct_walk");
        assert!(json["home_to_transit"].is_null());
        assert!(json.get("transfer_walks").is_none());
        assert!(json.get("transit_trip").is_none());
    }
}
