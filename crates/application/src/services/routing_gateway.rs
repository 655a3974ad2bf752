//! Walking route selection between the precise and the estimated backend

use std::fmt;
use std::sync::Arc;

use domain::entities::WalkRoute;
use domain::value_objects::Coordinate;
use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::{PreciseRoutingPort, RoadRoutingPort};

/// Walking speed used to time road distances
pub const DEFAULT_WALKING_SPEED_KMH: f64 = 5.0;

/// Chooses the routing source for every walking route
///
/// With a precise provider configured, its answer is final: a missing route
/// stays missing. Without one, the road provider's distance is timed at the
/// configured walking speed.
#[derive(Clone)]
pub struct RoutingGateway {
    precise: Option<Arc<dyn PreciseRoutingPort>>,
    road: Arc<dyn RoadRoutingPort>,
    walking_speed_kmh: f64,
}

impl fmt::Debug for RoutingGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingGateway")
            .field("precise", &self.precise.is_some())
            .field("walking_speed_kmh", &self.walking_speed_kmh)
            .finish_non_exhaustive()
    }
}

impl RoutingGateway {
    /// Gateway that estimates every route from road distance
    ///
    /// Non-positive or non-finite speeds fall back to the default.
    pub fn new(road: Arc<dyn RoadRoutingPort>, walking_speed_kmh: f64) -> Self {
        let walking_speed_kmh = if walking_speed_kmh.is_finite() && walking_speed_kmh > 0.0 {
            walking_speed_kmh
        } else {
            DEFAULT_WALKING_SPEED_KMH
        };

        Self {
            precise: None,
            road,
            walking_speed_kmh,
        }
    }

    /// Route through the precise provider instead
    #[must_use]
    pub fn with_precise(mut self, precise: Arc<dyn PreciseRoutingPort>) -> Self {
        self.precise = Some(precise);
        self
    }

    /// Whether routes come from the precise provider
    pub const fn is_precise(&self) -> bool {
        self.precise.is_some()
    }

    /// Walking route from `origin` to `destination`
    #[instrument(skip(self), fields(origin = %origin, destination = %destination))]
    pub async fn route(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<Option<WalkRoute>, ApplicationError> {
        if let Some(precise) = &self.precise {
            let route = precise
                .foot_route(origin, destination)
                .await?
                .map(|path| WalkRoute::precise(path.distance_m, path.duration_s, path.geometry));
            debug!(found = route.is_some(), "Precise route");
            return Ok(route);
        }

        let route = self
            .road
            .road_route(origin, destination)
            .await?
            .map(|path| WalkRoute::estimated(path.distance_m, self.walking_speed_kmh, path.geometry));
        debug!(found = route.is_some(), "Estimated route");
        Ok(route)
    }
}
