//! Commute split of a provider-planned transit itinerary

use domain::entities::{CommuteResult, TripSummary, WalkRoute};
use domain::value_objects::StopType;
use tracing::debug;

use super::leg_merge::merge_walk_legs;
use crate::ports::{Itinerary, ItineraryStep, Ride, StepKind};

/// Stop name used when a transit step carries no ride details
const FALLBACK_STOP_NAME: &str = "Transit stop";

/// Split an itinerary into walking legs around its rides
///
/// Walks before the first ride form the home leg, walks after the last ride
/// form the work leg, and walks between rides become transfer legs. The
/// direct walk wins when it takes no longer than all of the itinerary's
/// walking together; riding time does not count. An itinerary without rides
/// is a direct walk.
pub fn commute_from_itinerary(itinerary: &Itinerary, direct: &WalkRoute) -> CommuteResult {
    let steps = &itinerary.steps;
    let rides: Vec<usize> = steps
        .iter()
        .enumerate()
        .filter(|(_, step)| step.kind == StepKind::Transit)
        .map(|(index, _)| index)
        .collect();

    let (Some(&first), Some(&last)) = (rides.first(), rides.last()) else {
        debug!("Itinerary has no transit step");
        return CommuteResult::direct_walk(direct);
    };

    let trip = TripSummary {
        duration_min: itinerary.duration_s / 60.0,
        distance_km: itinerary.distance_m / 1000.0,
    };
    let walking_min: f64 = steps
        .iter()
        .filter(|step| step.kind == StepKind::Walk)
        .map(|step| step.duration_s / 60.0)
        .sum();
    if direct.duration_min <= walking_min {
        debug!(
            direct_min = direct.duration_min,
            walking_min,
            "Direct walk is no longer than the walking around transit"
        );
        return CommuteResult::direct_walk(direct);
    }

    let first_ride = ride_of(&steps[first]);
    let last_ride = ride_of(&steps[last]);

    let home_to_transit = merge_walk_legs(
        &walks(&steps[..first]),
        first_ride.map_or(FALLBACK_STOP_NAME, |r| r.departure_stop.as_str()),
        first_ride.map_or(StopType::BusStop, |r| r.stop_type),
    );
    let transit_to_work = merge_walk_legs(
        &walks(&steps[last + 1..]),
        last_ride.map_or(FALLBACK_STOP_NAME, |r| r.arrival_stop.as_str()),
        last_ride.map_or(StopType::BusStop, |r| r.stop_type),
    );

    let transfer_walks = rides
        .windows(2)
        .filter_map(|pair| {
            let segments = walks(&steps[pair[0] + 1..pair[1]]);
            if segments.is_empty() {
                return None;
            }
            let from = ride_of(&steps[pair[0]]);
            let to = ride_of(&steps[pair[1]]);
            let name = format!(
                "{} → {}",
                from.map_or(FALLBACK_STOP_NAME, |r| r.arrival_stop.as_str()),
                to.map_or(FALLBACK_STOP_NAME, |r| r.departure_stop.as_str()),
            );
            Some(merge_walk_legs(
                &segments,
                name,
                to.map_or(StopType::BusStop, |r| r.stop_type),
            ))
        })
        .collect();

    CommuteResult::via_itinerary(
        home_to_transit,
        transfer_walks,
        transit_to_work,
        direct,
        Some(trip),
    )
}

fn ride_of(step: &ItineraryStep) -> Option<&Ride> {
    step.ride.as_ref()
}

fn walks(steps: &[ItineraryStep]) -> Vec<WalkRoute> {
    steps
        .iter()
        .filter(|step| step.kind == StepKind::Walk)
        .map(ItineraryStep::to_walk_route)
        .collect()
}
