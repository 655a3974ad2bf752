//! Merging consecutive walking segments into one leg

use domain::entities::{WalkLeg, WalkRoute};
use domain::value_objects::StopType;

/// Merge walking segments into a single leg
///
/// Distances and durations add up. Geometries are concatenated in order; a
/// segment whose first point repeats the previous segment's last point
/// contributes that point only once.
pub fn merge_walk_legs<'a>(
    segments: impl IntoIterator<Item = &'a WalkRoute>,
    stop_name: impl Into<String>,
    stop_type: StopType,
) -> WalkLeg {
    let mut distance_km = 0.0;
    let mut duration_min = 0.0;
    let mut geometry = Vec::new();

    for segment in segments {
        distance_km += segment.distance_km;
        duration_min += segment.duration_min;

        let joins = geometry.last().is_some_and(|last| segment.geometry.first() == Some(last));
        geometry.extend(segment.geometry.iter().skip(usize::from(joins)).copied());
    }

    WalkLeg {
        stop_name: stop_name.into(),
        stop_type,
        distance_km,
        duration_min,
        geometry,
    }
}

#[cfg(test)]
mod tests {
    use domain::value_objects::Coordinate;
    use proptest::prelude::*;

    use super::*;

    fn point(lat: f64, lng: f64) -> Coordinate {
        Coordinate::new(lat, lng).unwrap()
    }

    fn segment(distance_m: f64, duration_s: f64, geometry: Vec<Coordinate>) -> WalkRoute {
        WalkRoute::precise(distance_m, duration_s, geometry)
    }

    #[test]
    fn sums_and_elides_join_point() {
        let a = point(42.28, -83.74);
        let b = point(42.281, -83.741);
        let c = point(42.282, -83.742);
        let segments = [
            segment(150.0, 120.0, vec![a, b]),
            segment(250.0, 180.0, vec![b, c]),
        ];

        let leg = merge_walk_legs(&segments, "Blake Transit Center", StopType::BusStop);

        assert!((leg.distance_km - 0.4).abs() < 1e-9);
        assert!((leg.duration_min - 5.0).abs() < 1e-9);
        assert_eq!(leg.geometry, vec![a, b, c]);
        assert_eq!(leg.stop_name, "Blake Transit Center");
    }

    #[test]
    fn distinct_join_points_are_kept() {
        let a = point(1.0, 1.0);
        let b = point(2.0, 2.0);
        let segments = [segment(1.0, 1.0, vec![a]), segment(1.0, 1.0, vec![b])];
        let leg = merge_walk_legs(&segments, "x", StopType::TramStop);
        assert_eq!(leg.geometry, vec![a, b]);
    }

    #[test]
    fn empty_geometries_do_not_break_joins() {
        let a = point(1.0, 1.0);
        let segments = [
            segment(1.0, 1.0, vec![a]),
            segment(1.0, 1.0, vec![]),
            segment(1.0, 1.0, vec![a]),
        ];
        let leg = merge_walk_legs(&segments, "x", StopType::BusStop);
        assert_eq!(leg.geometry, vec![a]);
    }

    #[test]
    fn no_segments_is_an_empty_leg() {
        let none: [WalkRoute; 0] = [];
        let leg = merge_walk_legs(&none, "Destination", StopType::BusStop);
        assert!(leg.distance_km.abs() < f64::EPSILON);
        assert!(leg.geometry.is_empty());
    }

    proptest! {
        #[test]
        fn totals_are_segment_sums(lengths in prop::collection::vec((0.0f64..5000.0, 0.0f64..3600.0), 0..8)) {
            let segments: Vec<WalkRoute> = lengths
                .iter()
                .map(|(d, t)| segment(*d, *t, vec![]))
                .collect();
            let leg = merge_walk_legs(&segments, "x", StopType::BusStop);

            let km: f64 = lengths.iter().map(|(d, _)| d / 1000.0).sum();
            let min: f64 = lengths.iter().map(|(_, t)| t / 60.0).sum();
            prop_assert!((leg.distance_km - km).abs() < 1e-6);
            prop_assert!((leg.duration_min - min).abs() < 1e-6);
        }
    }
}
