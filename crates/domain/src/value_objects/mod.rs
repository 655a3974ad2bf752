//! Value Objects - Immutable, identity-less domain primitives

mod amenity_category;
mod coordinate;
mod stop_type;
mod tag_filter;

pub use amenity_category::AmenityCategory;
pub use coordinate::{Coordinate, InvalidCoordinate};
pub use stop_type::StopType;
pub use tag_filter::{TRANSIT_STOP_FILTERS, TagFilter, TagGroup};
