//! Transit stop classification

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of transit stop a walking leg starts or ends at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopType {
    /// Bus stop, bus station or generic platform
    BusStop,
    /// Tram stop
    TramStop,
    /// Railway station or halt
    TrainStation,
    /// Ferry terminal
    FerryTerminal,
}

impl StopType {
    /// Classify from OSM tags
    ///
    /// Anything that is not explicitly rail, tram or ferry counts as a bus
    /// stop, which is what generic `public_transport` nodes usually are.
    #[must_use]
    pub fn from_osm_tags(tags: &HashMap<String, String>) -> Self {
        match tags.get("railway").map(String::as_str) {
            Some("station" | "halt") => return Self::TrainStation,
            Some("tram_stop") => return Self::TramStop,
            _ => {},
        }
        if tags.get("amenity").map(String::as_str) == Some("ferry_terminal") {
            return Self::FerryTerminal;
        }
        Self::BusStop
    }

    /// Classify from an itinerary provider's vehicle type (e.g. `SUBWAY`)
    #[must_use]
    pub fn from_vehicle_type(vehicle: &str) -> Self {
        match vehicle.to_ascii_uppercase().as_str() {
            "TRAM" | "LIGHT_RAIL" | "CABLE_CAR" => Self::TramStop,
            "RAIL" | "HEAVY_RAIL" | "COMMUTER_TRAIN" | "HIGH_SPEED_TRAIN"
            | "LONG_DISTANCE_TRAIN" | "METRO_RAIL" | "SUBWAY" | "MONORAIL" | "FUNICULAR" => {
                Self::TrainStation
            },
            "FERRY" => Self::FerryTerminal,
            _ => Self::BusStop,
        }
    }

    /// Wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BusStop => "bus_stop",
            Self::TramStop => "tram_stop",
            Self::TrainStation => "train_station",
            Self::FerryTerminal => "ferry_terminal",
        }
    }
}

impl fmt::Display for StopType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn railway_station_and_halt_are_train() {
        assert_eq!(
            StopType::from_osm_tags(&tags(&[("railway", "station")])),
            StopType::TrainStation
        );
        assert_eq!(
            StopType::from_osm_tags(&tags(&[("railway", "halt")])),
            StopType::TrainStation
        );
    }

    #[test]
    fn tram_and_ferry() {
        assert_eq!(
            StopType::from_osm_tags(&tags(&[("railway", "tram_stop")])),
            StopType::TramStop
        );
        assert_eq!(
            StopType::from_osm_tags(&tags(&[("amenity", "ferry_terminal")])),
            StopType::FerryTerminal
        );
    }

    #[test]
    fn everything_else_is_bus_stop() {
        assert_eq!(
            StopType::from_osm_tags(&tags(&[("public_transport", "platform")])),
            StopType::BusStop
        );
        assert_eq!(StopType::from_osm_tags(&HashMap::new()), StopType::BusStop);
    }

    #[test]
    fn vehicle_types() {
        assert_eq!(StopType::from_vehicle_type("SUBWAY"), StopType::TrainStation);
        assert_eq!(StopType::from_vehicle_type("tram"), StopType::TramStop);
        assert_eq!(StopType::from_vehicle_type("FERRY"), StopType::FerryTerminal);
        assert_eq!(StopType::from_vehicle_type("BUS"), StopType::BusStop);
        assert_eq!(StopType::from_vehicle_type("SHARE_TAXI"), StopType::BusStop);
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&StopType::TrainStation).unwrap();
        assert_eq!(json, "\"train_station\"");
        assert_eq!(StopType::FerryTerminal.to_string(), "ferry_terminal");
    }

    #[test]
    fn only_four_wire_names() {
        let names: Vec<&str> = [
            StopType::BusStop,
            StopType::TrainStation,
            StopType::TramStop,
            StopType::FerryTerminal,
        ]
        .iter()
        .map(StopType::as_str)
        .collect();
        assert_eq!(names, ["bus_stop", "train_station", "tram_stop", "ferry_terminal"]);
        assert!(serde_json::from_str::<StopType>("\"transit_stop\"").is_err());
    }
}
