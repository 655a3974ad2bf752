//! Nearest-stop commute heuristic

use std::fmt;

use domain::entities::{CommuteResult, WalkLeg, WalkRoute};
use domain::value_objects::Coordinate;
use tracing::{debug, instrument};

use super::routing_gateway::RoutingGateway;
use super::transit_stop_locator::{DEFAULT_STOP_LIMIT, TransitStopLocator};
use crate::error::ApplicationError;

/// Decides between walking all the way and walking to and from transit
///
/// Uses the stop nearest to each end; the ride itself is not modelled.
#[derive(Clone)]
pub struct CommuteComposer {
    gateway: RoutingGateway,
    locator: TransitStopLocator,
}

impl fmt::Debug for CommuteComposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommuteComposer")
            .field("gateway", &self.gateway)
            .finish_non_exhaustive()
    }
}

impl CommuteComposer {
    pub const fn new(gateway: RoutingGateway, locator: TransitStopLocator) -> Self {
        Self { gateway, locator }
    }

    /// Compose the commute from `home` to `work`; `None` if no direct route exists
    #[instrument(skip(self), fields(home = %home, work = %work))]
    pub async fn compose(
        &self,
        home: &Coordinate,
        work: &Coordinate,
        transit_radius_m: u32,
    ) -> Result<Option<CommuteResult>, ApplicationError> {
        let Some(direct) = self.gateway.route(home, work).await? else {
            debug!("No direct route");
            return Ok(None);
        };

        self.compose_from_direct(home, work, &direct, transit_radius_m)
            .await
            .map(Some)
    }

    /// Compose the commute given an already routed direct walk
    pub async fn compose_from_direct(
        &self,
        home: &Coordinate,
        work: &Coordinate,
        direct: &WalkRoute,
        transit_radius_m: u32,
    ) -> Result<CommuteResult, ApplicationError> {
        let (home_stops, work_stops) = tokio::try_join!(
            self.locator.nearest(home, transit_radius_m, DEFAULT_STOP_LIMIT),
            self.locator.nearest(work, transit_radius_m, DEFAULT_STOP_LIMIT),
        )?;

        let (Some(home_stop), Some(work_stop)) = (home_stops.first(), work_stops.first()) else {
            debug!("No transit stop near one end, walking");
            return Ok(CommuteResult::direct_walk(direct));
        };

        let (to_stop, from_stop) = tokio::try_join!(
            self.gateway.route(home, &home_stop.location),
            self.gateway.route(&work_stop.location, work),
        )?;

        let (Some(to_stop), Some(from_stop)) = (to_stop, from_stop) else {
            debug!("No walking route to or from a stop, walking");
            return Ok(CommuteResult::direct_walk(direct));
        };

        let via_transit_min = to_stop.duration_min + from_stop.duration_min;
        if direct.duration_min <= via_transit_min {
            debug!(
                direct_min = direct.duration_min,
                via_transit_min, "Direct walk is no slower"
            );
            return Ok(CommuteResult::direct_walk(direct));
        }

        debug!(
            home_stop = %home_stop.name,
            work_stop = %work_stop.name,
            "Transit commute"
        );
        Ok(CommuteResult::via_transit(
            WalkLeg::from_route(to_stop, home_stop.name.clone(), home_stop.stop_type),
            WalkLeg::from_route(from_stop, work_stop.name.clone(), work_stop.stop_type),
            direct,
        ))
    }

    /// The routing gateway used for every walking route
    pub const fn gateway(&self) -> &RoutingGateway {
        &self.gateway
    }
}
