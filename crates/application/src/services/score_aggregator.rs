//! Weekly walking score

use domain::entities::{
    Amenity, CommuteMode, CommuteResult, Grade, ScoreBreakdownItem, ScoreResult, ScoredCommute,
    WalkRoute, round_percentage,
};
use serde::{Deserialize, Serialize};

/// Scoring constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreConfig {
    /// Calories burned per walking minute
    pub calories_per_minute: f64,
    /// Weekly activity target in minutes (WHO: 150)
    pub who_weekly_minutes: f64,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            calories_per_minute: 4.0,
            who_weekly_minutes: 150.0,
        }
    }
}

/// The work commute as it enters the score
#[derive(Debug, Clone, PartialEq)]
pub struct CommuteTrip {
    /// Planned commute
    pub result: CommuteResult,
    /// Walked end to end by choice, transit never considered
    pub full_walk: bool,
}

/// A regular walk to an amenity
#[derive(Debug, Clone, PartialEq)]
pub struct AmenityTrip {
    /// Destination
    pub amenity: Amenity,
    /// Walking route from home
    pub route: WalkRoute,
    /// Round trips per week
    pub visits_per_week: u32,
}

/// Turns commutes and amenity trips into a weekly score
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreAggregator {
    config: ScoreConfig,
}

impl ScoreAggregator {
    pub const fn new(config: ScoreConfig) -> Self {
        Self { config }
    }

    /// Aggregate a week of walking
    pub fn aggregate(
        &self,
        commute: Option<&CommuteTrip>,
        commute_days_per_week: u32,
        amenity_trips: &[AmenityTrip],
    ) -> ScoreResult {
        let commute_item = commute.map(|trip| ScoreBreakdownItem {
            label: commute_label(trip),
            distance_km: trip.result.total_walk_km(),
            one_way_min: trip.result.total_walk_min(),
            round_trips_per_week: commute_days_per_week,
            weekly_minutes: weekly_minutes(trip.result.total_walk_min(), commute_days_per_week),
            commute_mode: Some(if trip.full_walk {
                ScoredCommute::Walk
            } else {
                trip.result.mode().into()
            }),
        });

        let amenity_items = amenity_trips.iter().map(|trip| ScoreBreakdownItem {
            label: format!("{} ({})", trip.amenity.category.label(), trip.amenity.name),
            distance_km: trip.route.distance_km,
            one_way_min: trip.route.duration_min,
            round_trips_per_week: trip.visits_per_week,
            weekly_minutes: weekly_minutes(trip.route.duration_min, trip.visits_per_week),
            commute_mode: None,
        });

        let breakdown: Vec<ScoreBreakdownItem> = commute_item.into_iter().chain(amenity_items).collect();

        let total: f64 = breakdown.iter().map(|item| item.weekly_minutes).sum();
        let who_pct = if self.config.who_weekly_minutes > 0.0 {
            total / self.config.who_weekly_minutes * 100.0
        } else {
            0.0
        };

        ScoreResult {
            total_weekly_walk_min: total,
            total_weekly_calories: total * self.config.calories_per_minute,
            who_guideline_pct: who_pct,
            // Graded on the percentage as reported, so 149.96 % reads 150.0 and A+
            grade: Grade::from_percentage(round_percentage(who_pct)),
            breakdown,
        }
    }
}

fn weekly_minutes(one_way_min: f64, round_trips: u32) -> f64 {
    one_way_min * 2.0 * f64::from(round_trips)
}

fn commute_label(trip: &CommuteTrip) -> String {
    if trip.full_walk {
        return "Work commute (full walk)".to_string();
    }
    match (
        trip.result.mode(),
        trip.result.home_to_transit(),
        trip.result.transit_to_work(),
    ) {
        (CommuteMode::Transit, Some(to_stop), Some(from_stop)) => format!(
            "Walk to {} + walk from {} to work",
            to_stop.stop_name, from_stop.stop_name
        ),
        _ => "Work commute".to_string(),
    }
}
