//! Nearest transit stops around a point

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use domain::entities::TransitStop;
use domain::value_objects::{Coordinate, StopType, TRANSIT_STOP_FILTERS};
use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::{PoiQuery, PoiQueryPort};

/// Default number of stops returned
pub const DEFAULT_STOP_LIMIT: usize = 5;

/// Default search radius in metres
pub const DEFAULT_TRANSIT_RADIUS_M: u32 = 2000;

/// Finds the transit stops closest to a point
#[derive(Clone)]
pub struct TransitStopLocator {
    poi: Arc<dyn PoiQueryPort>,
}

impl fmt::Debug for TransitStopLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitStopLocator").finish_non_exhaustive()
    }
}

impl TransitStopLocator {
    pub fn new(poi: Arc<dyn PoiQueryPort>) -> Self {
        Self { poi }
    }

    /// Up to `limit` stops within `radius_m` of `point`, nearest first
    ///
    /// Stations mapped several times (platform plus stop position) collapse
    /// to the first element seen at the same 5-decimal coordinates.
    #[instrument(skip(self), fields(point = %point))]
    pub async fn nearest(
        &self,
        point: &Coordinate,
        radius_m: u32,
        limit: usize,
    ) -> Result<Vec<TransitStop>, ApplicationError> {
        let query = PoiQuery::nodes(*point, radius_m, TRANSIT_STOP_FILTERS);
        let elements = self.poi.query(&query).await?;

        let mut seen = HashSet::new();
        let mut stops: Vec<TransitStop> = elements
            .into_iter()
            .filter_map(|element| {
                let location = element.location?;
                if !seen.insert(location.rounded_key()) {
                    return None;
                }
                Some(TransitStop {
                    name: element
                        .name()
                        .unwrap_or(TransitStop::UNNAMED)
                        .to_string(),
                    stop_type: StopType::from_osm_tags(&element.tags),
                    location,
                    distance_m: point.distance_m(&location),
                })
            })
            .collect();

        stops.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
        stops.truncate(limit);

        debug!(count = stops.len(), "Transit stops located");
        Ok(stops)
    }
}
