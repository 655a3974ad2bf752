//! Transit itinerary models

use domain::value_objects::Coordinate;
use serde::{Deserialize, Serialize};

/// How a step is travelled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    /// On foot
    Walk,
    /// Riding a scheduled vehicle
    Transit,
    /// Any other mode the API reports
    Other,
}

impl TravelMode {
    /// Map the API's `travelMode` string
    #[must_use]
    pub fn from_api(mode: &str) -> Self {
        match mode {
            "WALK" => Self::Walk,
            "TRANSIT" => Self::Transit,
            _ => Self::Other,
        }
    }
}

/// Stop, line and vehicle details of a transit step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitDetails {
    /// Stop where the rider boards
    pub departure_stop: String,
    /// Stop where the rider alights
    pub arrival_stop: String,
    /// Long line name
    pub line_name: String,
    /// Short line name (route number)
    pub line_short_name: String,
    /// Vehicle type as reported, e.g. `BUS` or `SUBWAY`
    pub vehicle_type: String,
    /// First operating agency, empty if unknown
    pub agency: String,
    /// Direction shown on the vehicle
    pub headsign: String,
    /// Number of stops ridden
    pub stop_count: u32,
}

impl TransitDetails {
    /// Placeholder for stop names the API leaves out
    pub const UNKNOWN_STOP: &'static str = "Unknown";

    /// Vehicle type assumed when the API leaves it out
    pub const DEFAULT_VEHICLE: &'static str = "BUS";
}

/// One step of an itinerary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItineraryStep {
    /// Walking or riding
    pub mode: TravelMode,
    /// Step length in metres
    pub distance_m: f64,
    /// Scheduled step duration in seconds
    pub duration_s: f64,
    /// Decoded step path, empty if the API sent none
    pub geometry: Vec<Coordinate>,
    /// Present on transit steps
    pub transit: Option<TransitDetails>,
}

impl ItineraryStep {
    /// Whether this step is on foot
    #[must_use]
    pub fn is_walk(&self) -> bool {
        self.mode == TravelMode::Walk
    }

    /// Whether this step rides a vehicle
    #[must_use]
    pub fn is_transit(&self) -> bool {
        self.mode == TravelMode::Transit
    }
}

/// The best transit itinerary between two points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    /// Steps in travel order
    pub steps: Vec<ItineraryStep>,
    /// Whole trip duration in seconds, riding included
    pub duration_s: f64,
    /// Whole trip length in metres
    pub distance_m: f64,
}

impl Itinerary {
    /// Whether any step rides a vehicle
    #[must_use]
    pub fn has_transit(&self) -> bool {
        self.steps.iter().any(ItineraryStep::is_transit)
    }
}

/// Parse a protobuf-style duration string such as `"754s"` or `"1.5s"`
pub(crate) fn parse_duration(value: &str) -> Result<f64, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    let seconds: f64 = trimmed
        .strip_suffix('s')
        .unwrap_or(trimmed)
        .parse()
        .map_err(|_| format!("Invalid duration: {value:?}"))?;

    if !seconds.is_finite() || seconds < 0.0 {
        return Err(format!("Invalid duration: {value:?}"));
    }
    Ok(seconds)
}
