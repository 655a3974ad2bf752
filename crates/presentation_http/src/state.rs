//! Application state shared across handlers
//!
//! [`AppState::from_config`] is the composition root: it builds one adapter
//! per backend and wires the services on top. All POI lookups go through one
//! Overpass adapter, so stop searches and amenity searches share a request
//! budget.

use std::fmt;
use std::sync::Arc;

use application::{
    AmenitySearch, ApplicationError, CommuteComposer, CommuteService, DEFAULT_WALKING_SPEED_KMH,
    RoutingGateway, ScoreAggregator, ScoreConfig, ScoreRadii, ScoreService, TransitStopLocator,
    ports::{GeocodingPort, ItineraryPort, PoiQueryPort, PreciseRoutingPort, RoadRoutingPort},
};
use infrastructure::{
    AppConfig, GoogleRoutesItineraryAdapter, NominatimGeocodingAdapter, OrsRoutingAdapter,
    OsrmRoutingAdapter, OverpassPoiAdapter,
};
use tracing::info;

/// Backends the services are built on
pub struct ServicePorts {
    pub geocoding: Arc<dyn GeocodingPort>,
    pub road: Arc<dyn RoadRoutingPort>,
    pub precise: Option<Arc<dyn PreciseRoutingPort>>,
    pub poi: Arc<dyn PoiQueryPort>,
    pub itinerary: Option<Arc<dyn ItineraryPort>>,
}

impl fmt::Debug for ServicePorts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServicePorts")
            .field("precise", &self.precise.is_some())
            .field("itinerary", &self.itinerary.is_some())
            .finish_non_exhaustive()
    }
}

/// Tunables for the services
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceSettings {
    pub walking_speed_kmh: f64,
    pub score: ScoreConfig,
    pub radii: ScoreRadii,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            walking_speed_kmh: DEFAULT_WALKING_SPEED_KMH,
            score: ScoreConfig::default(),
            radii: ScoreRadii::default(),
        }
    }
}

impl ServiceSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            walking_speed_kmh: config.routing.walking_speed_kmh,
            score: config.scoring.score_config(),
            radii: config.scoring.radii(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub geocoding: Arc<dyn GeocodingPort>,
    pub commute: Arc<CommuteService>,
    pub stops: Arc<TransitStopLocator>,
    pub amenities: Arc<AmenitySearch>,
    pub scores: Arc<ScoreService>,
    /// Stop search radius when a request names none
    pub transit_radius_m: u32,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("commute", &self.commute)
            .field("transit_radius_m", &self.transit_radius_m)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire the services on top of the given backends
    pub fn from_ports(ports: ServicePorts, settings: ServiceSettings) -> Self {
        let mut gateway = RoutingGateway::new(ports.road, settings.walking_speed_kmh);
        if let Some(precise) = ports.precise {
            gateway = gateway.with_precise(precise);
        }

        let stops = TransitStopLocator::new(Arc::clone(&ports.poi));
        let amenities = AmenitySearch::new(ports.poi);

        let mut commute = CommuteService::new(CommuteComposer::new(gateway, stops.clone()));
        if let Some(itinerary) = ports.itinerary {
            commute = commute.with_itinerary(itinerary);
        }

        let scores = ScoreService::new(
            commute.clone(),
            amenities.clone(),
            ScoreAggregator::new(settings.score),
            settings.radii,
        );

        Self {
            geocoding: ports.geocoding,
            commute: Arc::new(commute),
            stops: Arc::new(stops),
            amenities: Arc::new(amenities),
            scores: Arc::new(scores),
            transit_radius_m: settings.radii.transit_m,
        }
    }

    /// Build every adapter from configuration
    ///
    /// ORS and Google Routes are only used when they have an API key.
    pub fn from_config(config: &AppConfig) -> Result<Self, ApplicationError> {
        let precise: Option<Arc<dyn PreciseRoutingPort>> = if config.routing.ors.is_configured() {
            Some(Arc::new(OrsRoutingAdapter::new(&config.routing.ors)?))
        } else {
            None
        };

        let itinerary: Option<Arc<dyn ItineraryPort>> = if config.itinerary.is_configured() {
            Some(Arc::new(GoogleRoutesItineraryAdapter::new(&config.itinerary)?))
        } else {
            None
        };

        let ports = ServicePorts {
            geocoding: Arc::new(NominatimGeocodingAdapter::new(
                &config.geocoding.client,
                &config.geocoding.throttle(),
            )?),
            road: Arc::new(OsrmRoutingAdapter::new(&config.routing.osrm)?),
            precise,
            poi: Arc::new(OverpassPoiAdapter::new(
                &config.overpass.client,
                &config.overpass.throttle(),
            )?),
            itinerary,
        };

        info!(
            precise_routing = ports.precise.is_some(),
            itinerary = ports.itinerary.is_some(),
            "Services wired"
        );
        Ok(Self::from_ports(ports, ServiceSettings::from_config(config)))
    }
}
