//! Score calculation use case

use domain::entities::ScoreResult;
use domain::value_objects::{AmenityCategory, Coordinate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::amenity_search::AmenitySearch;
use super::commute_service::CommuteService;
use super::score_aggregator::{AmenityTrip, CommuteTrip, ScoreAggregator};
use super::transit_stop_locator::DEFAULT_TRANSIT_RADIUS_M;
use crate::error::ApplicationError;

/// Radius searched for each amenity, in metres
pub const DEFAULT_SCORE_AMENITY_RADIUS_M: u32 = 3000;

/// Most commute days a week can hold
pub const MAX_WORK_DAYS_PER_WEEK: u32 = 7;

/// How the user gets to work
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommutePreference {
    /// Walk to and from transit when that is faster
    #[default]
    Transit,
    /// Walk the whole way
    Walk,
}

/// A regularly visited amenity category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmenityVisit {
    /// What kind of place
    pub category: AmenityCategory,
    /// Round trips per week
    pub visits_per_week: u32,
}

/// Input for a score calculation
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRequest {
    /// Where the user lives
    pub home: Coordinate,
    /// Where the user works, if they commute
    pub work: Option<Coordinate>,
    /// Commute days per week (0-7)
    pub work_days_per_week: u32,
    /// Commute style
    pub commute_mode: CommutePreference,
    /// Regular amenity trips
    pub amenities: Vec<AmenityVisit>,
}

/// Search radii used while scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRadii {
    /// Stop search radius for the commute
    pub transit_m: u32,
    /// Amenity search radius
    pub amenity_m: u32,
}

impl Default for ScoreRadii {
    fn default() -> Self {
        Self {
            transit_m: DEFAULT_TRANSIT_RADIUS_M,
            amenity_m: DEFAULT_SCORE_AMENITY_RADIUS_M,
        }
    }
}

/// Computes a user's weekly walking score
#[derive(Debug, Clone)]
pub struct ScoreService {
    commute: CommuteService,
    amenities: AmenitySearch,
    aggregator: ScoreAggregator,
    radii: ScoreRadii,
}

impl ScoreService {
    pub const fn new(
        commute: CommuteService,
        amenities: AmenitySearch,
        aggregator: ScoreAggregator,
        radii: ScoreRadii,
    ) -> Self {
        Self {
            commute,
            amenities,
            aggregator,
            radii,
        }
    }

    /// Score a week of commuting and amenity trips
    ///
    /// A commute or amenity without a walking route is left out of the
    /// breakdown; upstream failures abort the calculation.
    #[instrument(skip(self, request), fields(home = %request.home, amenities = request.amenities.len()))]
    pub async fn calculate(&self, request: &ScoreRequest) -> Result<ScoreResult, ApplicationError> {
        if request.work_days_per_week > MAX_WORK_DAYS_PER_WEEK {
            return Err(ApplicationError::InvalidInput(format!(
                "work_days_per_week must be between 0 and {MAX_WORK_DAYS_PER_WEEK}"
            )));
        }

        let commute = match &request.work {
            Some(work) => self.commute_trip(&request.home, work, request.commute_mode).await?,
            None => None,
        };

        let mut trips = Vec::with_capacity(request.amenities.len());
        for visit in &request.amenities {
            if let Some(trip) = self.amenity_trip(&request.home, visit).await? {
                trips.push(trip);
            }
        }

        let score = self
            .aggregator
            .aggregate(commute.as_ref(), request.work_days_per_week, &trips);

        info!(
            weekly_min = score.total_weekly_walk_min,
            grade = %score.grade,
            "Score calculated"
        );
        Ok(score)
    }

    async fn commute_trip(
        &self,
        home: &Coordinate,
        work: &Coordinate,
        preference: CommutePreference,
    ) -> Result<Option<CommuteTrip>, ApplicationError> {
        let (result, full_walk) = match preference {
            CommutePreference::Transit => (
                self.commute
                    .commute(home, work, self.radii.transit_m, None)
                    .await?,
                false,
            ),
            CommutePreference::Walk => (self.commute.full_walk(home, work).await?, true),
        };

        if result.is_none() {
            debug!("No commute route, leaving commute out");
        }
        Ok(result.map(|result| CommuteTrip { result, full_walk }))
    }

    async fn amenity_trip(
        &self,
        home: &Coordinate,
        visit: &AmenityVisit,
    ) -> Result<Option<AmenityTrip>, ApplicationError> {
        let Some(amenity) = self
            .amenities
            .nearest(home, visit.category, self.radii.amenity_m)
            .await?
        else {
            debug!(category = %visit.category, "No amenity nearby");
            return Ok(None);
        };

        let Some(route) = self.commute.gateway().route(home, &amenity.location).await? else {
            debug!(amenity = %amenity.name, "No walking route to amenity");
            return Ok(None);
        };

        Ok(Some(AmenityTrip {
            amenity,
            route,
            visits_per_week: visit.visits_per_week,
        }))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use domain::entities::{Grade, ScoredCommute};

    use super::*;
    use crate::ports::{
        MockPoiQueryPort, MockPreciseRoutingPort, MockRoadRoutingPort, PoiElement, RoadPath,
    };
    use crate::services::{CommuteComposer, RoutingGateway, TransitStopLocator};

    fn home() -> Coordinate {
        Coordinate::new(42.2808, -83.743).unwrap()
    }

    fn work() -> Coordinate {
        Coordinate::new(42.2950, -83.7100).unwrap()
    }

    fn gym() -> Coordinate {
        Coordinate::new(42.2750, -83.7400).unwrap()
    }

    /// Road router: 1250 m (15 min) to work, 500 m (6 min) anywhere else
    fn road() -> Arc<MockRoadRoutingPort> {
        let mut road = MockRoadRoutingPort::new();
        road.expect_road_route().returning(|_, b| {
            let distance_m = if *b == work() { 1250.0 } else { 500.0 };
            Ok(Some(RoadPath {
                distance_m,
                geometry: vec![],
            }))
        });
        Arc::new(road)
    }

    /// POI backend: no stops, one gym
    fn poi() -> Arc<MockPoiQueryPort> {
        let mut poi = MockPoiQueryPort::new();
        poi.expect_query().returning(|q| {
            if q.include_ways {
                let mut element = PoiElement {
                    location: Some(gym()),
                    ..PoiElement::default()
                };
                element.tags.insert("name".into(), "Planet Fitness".into());
                Ok(vec![element])
            } else {
                Ok(vec![])
            }
        });
        Arc::new(poi)
    }

    fn service_with(gateway: RoutingGateway, poi: Arc<MockPoiQueryPort>) -> ScoreService {
        let locator = TransitStopLocator::new(poi.clone());
        ScoreService::new(
            CommuteService::new(CommuteComposer::new(gateway, locator)),
            AmenitySearch::new(poi),
            ScoreAggregator::default(),
            ScoreRadii::default(),
        )
    }

    fn request(commute_mode: CommutePreference) -> ScoreRequest {
        ScoreRequest {
            home: home(),
            work: Some(work()),
            work_days_per_week: 5,
            commute_mode,
            amenities: vec![AmenityVisit {
                category: AmenityCategory::Gym,
                visits_per_week: 3,
            }],
        }
    }

    #[tokio::test]
    async fn transit_preference_scores_commute_and_gym() {
        let service = service_with(RoutingGateway::new(road(), 5.0), poi());
        let score = service
            .calculate(&request(CommutePreference::Transit))
            .await
            .unwrap();

        // commute 15*2*5 = 150, gym 6*2*3 = 36
        assert!((score.total_weekly_walk_min - 186.0).abs() < 1e-9);
        assert_eq!(score.grade, Grade::A);
        assert_eq!(score.breakdown[0].label, "Work commute");
        assert_eq!(score.breakdown[1].label, "Gym (Planet Fitness)");
    }

    #[tokio::test]
    async fn walk_preference_never_looks_for_stops() {
        let mut poi = MockPoiQueryPort::new();
        poi.expect_query()
            .withf(|q| q.include_ways)
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = service_with(RoutingGateway::new(road(), 5.0), Arc::new(poi));
        let score = service
            .calculate(&request(CommutePreference::Walk))
            .await
            .unwrap();

        assert_eq!(score.breakdown.len(), 1);
        assert_eq!(score.breakdown[0].label, "Work commute (full walk)");
        assert_eq!(score.breakdown[0].commute_mode, Some(ScoredCommute::Walk));
    }

    #[tokio::test]
    async fn unroutable_items_are_skipped() {
        let mut precise = MockPreciseRoutingPort::new();
        precise.expect_foot_route().returning(|_, _| Ok(None));
        let gateway = RoutingGateway::new(road(), 5.0).with_precise(Arc::new(precise));

        let mut poi_port = MockPoiQueryPort::new();
        poi_port.expect_query().returning(|_| {
            Ok(vec![PoiElement {
                location: Some(gym()),
                ..PoiElement::default()
            }])
        });

        let service = service_with(gateway, Arc::new(poi_port));
        let score = service
            .calculate(&request(CommutePreference::Transit))
            .await
            .unwrap();
        assert!(score.breakdown.is_empty());
        assert_eq!(score.grade, Grade::F);
    }

    #[tokio::test]
    async fn too_many_work_days_rejected() {
        let service = service_with(RoutingGateway::new(road(), 5.0), poi());
        let mut req = request(CommutePreference::Transit);
        req.work_days_per_week = 8;
        let err = service.calculate(&req).await.unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn upstream_failure_aborts() {
        let mut poi_port = MockPoiQueryPort::new();
        poi_port
            .expect_query()
            .returning(|_| Err(ApplicationError::UpstreamUnavailable("Overpass 429".into())));

        let service = service_with(RoutingGateway::new(road(), 5.0), Arc::new(poi_port));
        let mut req = request(CommutePreference::Walk);
        req.work = None;
        let err = service.calculate(&req).await.unwrap_err();
        assert!(matches!(err, ApplicationError::UpstreamUnavailable(_)));
    }

    #[test]
    fn preference_wire_names() {
        assert_eq!(
            serde_json::from_str::<CommutePreference>("\"walk\"").unwrap(),
            CommutePreference::Walk
        );
        assert_eq!(CommutePreference::default(), CommutePreference::Transit);
    }
}
