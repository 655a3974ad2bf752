//! Pure geometry: great-circle distance and the encoded polyline format

mod distance;
pub mod polyline;

pub use distance::{EARTH_RADIUS_M, haversine_m};
pub use polyline::PolylineError;
