//! Domain entities - per-request results of routing and scoring

mod amenity;
mod commute;
mod score;
mod transit_stop;
mod walk_leg;
mod walk_route;

pub use amenity::Amenity;
pub use commute::{CommuteMode, CommuteResult, TripSummary};
pub use score::{Grade, ScoreBreakdownItem, ScoreResult, ScoredCommute, round_percentage};
pub use transit_stop::TransitStop;
pub use walk_leg::WalkLeg;
pub use walk_route::{RouteSource, WalkRoute};
