//! Overpass element models

use std::collections::HashMap;

use domain::value_objects::Coordinate;
use serde::Deserialize;

/// OSM element type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Node,
    Way,
    Relation,
}

/// One element from an Overpass JSON response
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// OSM id
    pub id: i64,
    /// Element type
    pub kind: ElementKind,
    /// Node position, or the centre of a way; `None` if neither was sent
    pub location: Option<Coordinate>,
    /// OSM tags
    pub tags: HashMap<String, String>,
}

impl Element {
    /// The `name` tag, if present and non-blank
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.tags
            .get("name")
            .map(String::as_str)
            .filter(|name| !name.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawResponse {
    #[serde(default)]
    pub elements: Vec<RawElement>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawElement {
    #[serde(rename = "type")]
    kind: ElementKind,
    id: i64,
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<RawCenter>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct RawCenter {
    lat: f64,
    lon: f64,
}

impl RawElement {
    /// Convert, rejecting coordinates outside the valid range
    pub(crate) fn into_element(self) -> Result<Element, String> {
        let pair = match (self.lat, self.lon, self.center) {
            (Some(lat), Some(lon), _) => Some((lat, lon)),
            (_, _, Some(center)) => Some((center.lat, center.lon)),
            _ => None,
        };
        let location = pair
            .map(|(lat, lon)| Coordinate::new(lat, lon))
            .transpose()
            .map_err(|e| format!("element {}: {e}", self.id))?;

        Ok(Element {
            id: self.id,
            kind: self.kind,
            location,
            tags: self.tags,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Vec<Element> {
        let raw: RawResponse = serde_json::from_str(json).unwrap();
        raw.elements
            .into_iter()
            .map(RawElement::into_element)
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn node_uses_lat_lon() {
        let elements = parse(
            r#"{"elements": [{"type": "node", "id": 1, "lat": 42.28, "lon": -83.74,
                "tags": {"name": "Blake Transit Center", "amenity": "bus_station"}}]}"#,
        );
        assert_eq!(elements[0].kind, ElementKind::Node);
        assert!((elements[0].location.unwrap().lat() - 42.28).abs() < f64::EPSILON);
        assert_eq!(elements[0].name(), Some("Blake Transit Center"));
    }

    #[test]
    fn way_uses_center() {
        let elements = parse(
            r#"{"elements": [{"type": "way", "id": 2,
                "center": {"lat": 42.27, "lon": -83.73}, "tags": {"leisure": "park"}}]}"#,
        );
        assert_eq!(elements[0].kind, ElementKind::Way);
        assert!((elements[0].location.unwrap().lng() + 83.73).abs() < f64::EPSILON);
        assert_eq!(elements[0].name(), None);
    }

    #[test]
    fn missing_position_is_none() {
        let elements = parse(r#"{"elements": [{"type": "relation", "id": 3}]}"#);
        assert!(elements[0].location.is_none());
        assert!(elements[0].tags.is_empty());
    }

    #[test]
    fn blank_name_is_none() {
        let elements = parse(
            r#"{"elements": [{"type": "node", "id": 4, "lat": 1.0, "lon": 1.0,
                "tags": {"name": "  "}}]}"#,
        );
        assert_eq!(elements[0].name(), None);
    }

    #[test]
    fn out_of_range_position_is_error() {
        let raw: RawResponse = serde_json::from_str(
            r#"{"elements": [{"type": "node", "id": 5, "lat": 123.0, "lon": 1.0}]}"#,
        )
        .unwrap();
        let result: Result<Vec<_>, _> =
            raw.elements.into_iter().map(RawElement::into_element).collect();
        assert!(result.unwrap_err().contains("element 5"));
    }
}
