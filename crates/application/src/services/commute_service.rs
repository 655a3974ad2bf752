//! Commute planning entry point

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::entities::CommuteResult;
use domain::value_objects::Coordinate;
use tracing::{debug, info, instrument};

use super::commute_composer::CommuteComposer;
use super::itinerary_commute::commute_from_itinerary;
use super::routing_gateway::RoutingGateway;
use crate::error::ApplicationError;
use crate::ports::ItineraryPort;

/// Plans commutes with the itinerary provider when one is configured,
/// otherwise (or when it has no route) with the nearest-stop heuristic
#[derive(Clone)]
pub struct CommuteService {
    composer: CommuteComposer,
    itinerary: Option<Arc<dyn ItineraryPort>>,
}

impl fmt::Debug for CommuteService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommuteService")
            .field("composer", &self.composer)
            .field("itinerary", &self.itinerary.is_some())
            .finish()
    }
}

impl CommuteService {
    pub const fn new(composer: CommuteComposer) -> Self {
        Self {
            composer,
            itinerary: None,
        }
    }

    /// Consult a transit itinerary provider first
    #[must_use]
    pub fn with_itinerary(mut self, itinerary: Arc<dyn ItineraryPort>) -> Self {
        self.itinerary = Some(itinerary);
        self
    }

    /// Whether an itinerary provider is consulted
    pub const fn has_itinerary(&self) -> bool {
        self.itinerary.is_some()
    }

    /// The routing gateway shared by all commute strategies
    pub const fn gateway(&self) -> &RoutingGateway {
        self.composer.gateway()
    }

    /// Walking commute from `home` to `work`, transit allowed
    ///
    /// `None` when not even a direct walking route exists.
    #[instrument(skip(self), fields(home = %home, work = %work))]
    pub async fn commute(
        &self,
        home: &Coordinate,
        work: &Coordinate,
        transit_radius_m: u32,
        departure: Option<DateTime<Utc>>,
    ) -> Result<Option<CommuteResult>, ApplicationError> {
        let Some(direct) = self.gateway().route(home, work).await? else {
            debug!("No direct route");
            return Ok(None);
        };

        if let Some(provider) = &self.itinerary {
            if let Some(itinerary) = provider.transit_itinerary(home, work, departure).await? {
                let result = commute_from_itinerary(&itinerary, &direct);
                info!(mode = ?result.mode(), "Commute planned from itinerary");
                return Ok(Some(result));
            }
            debug!("Itinerary provider has no route, using nearest stops");
        }

        let result = self
            .composer
            .compose_from_direct(home, work, &direct, transit_radius_m)
            .await?;
        info!(mode = ?result.mode(), "Commute planned from nearest stops");
        Ok(Some(result))
    }

    /// Walking commute from `home` to `work` without transit
    #[instrument(skip(self), fields(home = %home, work = %work))]
    pub async fn full_walk(
        &self,
        home: &Coordinate,
        work: &Coordinate,
    ) -> Result<Option<CommuteResult>, ApplicationError> {
        Ok(self
            .gateway()
            .route(home, work)
            .await?
            .map(|direct| CommuteResult::direct_walk(&direct)))
    }
}
