//! Amenity search by category

use std::fmt;
use std::sync::Arc;

use domain::entities::Amenity;
use domain::value_objects::{AmenityCategory, Coordinate};
use tracing::{debug, instrument};

use crate::error::ApplicationError;
use crate::ports::{PoiQuery, PoiQueryPort};

/// Default amenity search radius in metres
pub const DEFAULT_AMENITY_RADIUS_M: u32 = 2000;

/// Smallest accepted search radius in metres
pub const MIN_AMENITY_RADIUS_M: u32 = 100;

/// Largest accepted search radius in metres
pub const MAX_AMENITY_RADIUS_M: u32 = 10_000;

/// Clamp a requested radius into the accepted range
pub fn clamp_amenity_radius(radius_m: Option<u32>) -> u32 {
    radius_m
        .unwrap_or(DEFAULT_AMENITY_RADIUS_M)
        .clamp(MIN_AMENITY_RADIUS_M, MAX_AMENITY_RADIUS_M)
}

/// Finds amenities of one category around a point
#[derive(Clone)]
pub struct AmenitySearch {
    poi: Arc<dyn PoiQueryPort>,
}

impl fmt::Debug for AmenitySearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AmenitySearch").finish_non_exhaustive()
    }
}

impl AmenitySearch {
    pub fn new(poi: Arc<dyn PoiQueryPort>) -> Self {
        Self { poi }
    }

    /// Amenities within `radius_m` of `point`, nearest first
    #[instrument(skip(self), fields(point = %point, category = %category))]
    pub async fn search(
        &self,
        point: &Coordinate,
        category: AmenityCategory,
        radius_m: u32,
    ) -> Result<Vec<Amenity>, ApplicationError> {
        let query = PoiQuery::nodes(*point, radius_m, category.tag_groups()).with_ways();
        let elements = self.poi.query(&query).await?;

        let mut amenities: Vec<Amenity> = elements
            .into_iter()
            .filter_map(|element| {
                let location = element.location?;
                let name = element.name().unwrap_or(Amenity::UNNAMED);
                if category.excludes_name(name) {
                    return None;
                }
                Some(Amenity {
                    name: name.to_string(),
                    category,
                    location,
                    distance_m: point.distance_m(&location),
                })
            })
            .collect();

        amenities.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));

        debug!(count = amenities.len(), "Amenities found");
        Ok(amenities)
    }

    /// The closest amenity of a category, if any
    pub async fn nearest(
        &self,
        point: &Coordinate,
        category: AmenityCategory,
        radius_m: u32,
    ) -> Result<Option<Amenity>, ApplicationError> {
        Ok(self
            .search(point, category, radius_m)
            .await?
            .into_iter()
            .next())
    }
}
