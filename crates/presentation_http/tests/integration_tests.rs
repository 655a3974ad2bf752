//! Integration tests for HTTP handlers
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::Arc;

use application::{
    error::ApplicationError,
    ports::{GeocodedAddress, GeocodingPort, PoiElement, PoiQuery, PoiQueryPort, RoadPath, RoadRoutingPort},
};
use async_trait::async_trait;
use axum_test::TestServer;
use domain::value_objects::Coordinate;
use presentation_http::{AppState, ServicePorts, ServiceSettings, create_router};
use serde_json::{Value, json};

/// How the fake road backend answers
#[derive(Debug, Clone, Copy)]
enum RoadAnswer {
    /// Great-circle distance with a 20% detour
    Detour,
    NoRoute,
    Unavailable,
    Garbled,
}

struct FakeRoad(RoadAnswer);

#[async_trait]
impl RoadRoutingPort for FakeRoad {
    async fn road_route(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<Option<RoadPath>, ApplicationError> {
        match self.0 {
            RoadAnswer::Detour => Ok(Some(RoadPath {
                distance_m: origin.distance_m(destination) * 1.2,
                geometry: vec![*origin, *destination],
            })),
            RoadAnswer::NoRoute => Ok(None),
            RoadAnswer::Unavailable => Err(ApplicationError::UpstreamUnavailable(
                "OSRM: HTTP 503".to_string(),
            )),
            RoadAnswer::Garbled => Err(ApplicationError::Decode("missing routes".to_string())),
        }
    }
}

/// POI backend with one bus stop and one gym a short way north of every query
struct FakePoi {
    fail: bool,
}

fn element(center: Coordinate, north_deg: f64, tags: &[(&str, &str)]) -> PoiElement {
    PoiElement {
        location: Some(Coordinate::new(center.lat() + north_deg, center.lng()).unwrap()),
        tags: tags
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect::<HashMap<_, _>>(),
    }
}

#[async_trait]
impl PoiQueryPort for FakePoi {
    async fn query(&self, query: &PoiQuery) -> Result<Vec<PoiElement>, ApplicationError> {
        if self.fail {
            return Err(ApplicationError::UpstreamUnavailable(
                "Overpass: rate limited after 3 attempts".to_string(),
            ));
        }
        if query.include_ways {
            Ok(vec![element(
                query.center,
                0.003,
                &[("leisure", "fitness_centre"), ("name", "Planet Fitness")],
            )])
        } else {
            Ok(vec![element(
                query.center,
                0.002,
                &[("highway", "bus_stop"), ("name", "State St & Liberty")],
            )])
        }
    }
}

struct FakeGeocoder;

#[async_trait]
impl GeocodingPort for FakeGeocoder {
    async fn forward(&self, address: &str) -> Result<GeocodedAddress, ApplicationError> {
        if address == "nowhere" {
            return Err(ApplicationError::NotFound(format!(
                "Address not found: {address}"
            )));
        }
        Ok(GeocodedAddress {
            location: Coordinate::new(42.2780, -83.7382).unwrap(),
            display_name: "500 South State Street, Ann Arbor, Michigan".to_string(),
        })
    }

    async fn reverse(&self, _location: &Coordinate) -> Result<String, ApplicationError> {
        Ok("Nickels Arcade, Ann Arbor, Michigan".to_string())
    }
}

fn create_test_server(road: RoadAnswer, poi_fails: bool) -> TestServer {
    let ports = ServicePorts {
        geocoding: Arc::new(FakeGeocoder),
        road: Arc::new(FakeRoad(road)),
        precise: None,
        poi: Arc::new(FakePoi { fail: poi_fails }),
        itinerary: None,
    };
    let state = AppState::from_ports(ports, ServiceSettings::default());
    TestServer::new(create_router(state)).expect("Failed to create test server")
}

fn server() -> TestServer {
    create_test_server(RoadAnswer::Detour, false)
}

fn downtown() -> Value {
    json!({"lat": 42.2808, "lng": -83.7430})
}

fn ypsilanti() -> Value {
    json!({"lat": 42.2411, "lng": -83.6130})
}

// ============ Health ============

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let response = server().get("/api/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
    assert_eq!(body["precise_routing"], false);
    assert_eq!(body["itinerary"], false);
}

// ============ Walking routes ============

#[tokio::test]
async fn walk_route_is_estimated_and_rounded() {
    let response = server()
        .post("/api/route/walk")
        .json(&json!({
            "origin": downtown(),
            "destination": {"lat": 42.2780, "lng": -83.7382}
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["source"], "estimated");
    assert_eq!(body["geometry"][0], json!([42.2808, -83.743]));
    let km = body["distance_km"].as_f64().unwrap();
    assert!((km * 100.0 - (km * 100.0).round()).abs() < 1e-9);
    assert!(km > 0.5 && km < 0.8);
}

#[tokio::test]
async fn walk_route_rejects_invalid_coordinates() {
    let response = server()
        .post("/api/route/walk")
        .json(&json!({
            "origin": {"lat": 123.0, "lng": -83.7430},
            "destination": downtown()
        }))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["code"], "validation_error");
    assert!(body["error"].as_str().unwrap().contains("origin.lat"));
}

#[tokio::test]
async fn walk_route_rejects_missing_destination() {
    let response = server()
        .post("/api/route/walk")
        .json(&json!({"origin": downtown()}))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn walk_route_not_found() {
    let response = create_test_server(RoadAnswer::NoRoute, false)
        .post("/api/route/walk")
        .json(&json!({"origin": downtown(), "destination": ypsilanti()}))
        .await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn walk_route_upstream_failure_is_bad_gateway() {
    let response = create_test_server(RoadAnswer::Unavailable, false)
        .post("/api/route/walk")
        .json(&json!({"origin": downtown(), "destination": ypsilanti()}))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["code"], "upstream_unavailable");
    assert_eq!(body["details"], "OSRM: HTTP 503");
}

#[tokio::test]
async fn walk_route_garbled_answer_has_decode_code() {
    let response = create_test_server(RoadAnswer::Garbled, false)
        .post("/api/route/walk")
        .json(&json!({"origin": downtown(), "destination": ypsilanti()}))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["code"], "upstream_decode_error");
}

// ============ Commute ============

#[tokio::test]
async fn long_commute_walks_to_transit() {
    let response = server()
        .post("/api/route/commute")
        .json(&json!({"origin": downtown(), "destination": ypsilanti()}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["mode"], "transit");
    assert_eq!(body["home_to_transit"]["stop_name"], "State St & Liberty");
    assert_eq!(body["home_to_transit"]["stop_type"], "bus_stop");
    assert!(
        body["total_walk_min"].as_f64().unwrap() < body["direct_walk_min"].as_f64().unwrap()
    );
    assert!(body.get("transit_trip").is_none());
}

#[tokio::test]
async fn short_commute_walks_directly() {
    let response = server()
        .post("/api/route/commute")
        .json(&json!({
            "origin": downtown(),
            "destination": {"lat": 42.2820, "lng": -83.7430},
            "transit_radius_m": 500
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["mode"], "direct_walk");
    assert!(body["home_to_transit"].is_null());
    assert_eq!(body["total_walk_min"], body["direct_walk_min"]);
}

#[tokio::test]
async fn commute_without_route_is_not_found() {
    let response = create_test_server(RoadAnswer::NoRoute, false)
        .post("/api/route/commute")
        .json(&json!({"origin": downtown(), "destination": ypsilanti()}))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn commute_rejects_tiny_radius() {
    let response = server()
        .post("/api/route/commute")
        .json(&json!({
            "origin": downtown(),
            "destination": ypsilanti(),
            "transit_radius_m": 10
        }))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("transit_radius_m"));
}

#[tokio::test]
async fn commute_stop_lookup_failure_is_bad_gateway() {
    let response = create_test_server(RoadAnswer::Detour, true)
        .post("/api/route/commute")
        .json(&json!({"origin": downtown(), "destination": ypsilanti()}))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_GATEWAY);
}

// ============ Transit stops ============

#[tokio::test]
async fn transit_stops_are_listed() {
    let response = server()
        .post("/api/route/transit-stops")
        .json(&json!({"location": downtown(), "radius_m": 1000}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let stops = body["stops"].as_array().unwrap();
    assert_eq!(stops.len(), 1);
    assert_eq!(stops[0]["type"], "bus_stop");
    let distance = stops[0]["distance_m"].as_f64().unwrap();
    assert!((distance - distance.round()).abs() < f64::EPSILON);
    assert!((200.0..250.0).contains(&distance));
}

#[tokio::test]
async fn transit_stops_upstream_failure() {
    let response = create_test_server(RoadAnswer::Detour, true)
        .post("/api/route/transit-stops")
        .json(&json!({"location": downtown()}))
        .await;

    response.assert_status(axum::http::StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["code"], "upstream_unavailable");
}

// ============ Amenities ============

#[tokio::test]
async fn amenity_search_returns_results() {
    let response = server()
        .post("/api/amenities/search")
        .json(&json!({"location": downtown(), "amenity_type": "fitness"}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["results"][0]["name"], "Planet Fitness");
    assert_eq!(body["results"][0]["amenity_type"], "gym");
}

#[tokio::test]
async fn amenity_search_rejects_unknown_type() {
    let response = server()
        .post("/api/amenities/search")
        .json(&json!({"location": downtown(), "amenity_type": "zoo"}))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["code"], "bad_request");
    assert!(body["error"].as_str().unwrap().contains("zoo"));
}

#[tokio::test]
async fn amenity_types_are_listed() {
    let response = server().get("/api/amenities/types").await;

    response.assert_status_ok();
    let body: Value = response.json();
    let types: Vec<&str> = body["types"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(types.contains(&"gym"));
    assert!(types.contains(&"coffee"));
    assert!(types.windows(2).all(|pair| pair[0] <= pair[1]));
}

// ============ Geocoding ============

#[tokio::test]
async fn forward_geocode() {
    let response = server()
        .post("/api/geocode/forward")
        .json(&json!({"address": "  500 S State St  "}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["address"], "500 S State St");
    assert_eq!(body["lat"], 42.278);
    assert!(body["display_name"].as_str().unwrap().contains("Ann Arbor"));
}

#[tokio::test]
async fn forward_geocode_not_found() {
    let response = server()
        .post("/api/geocode/forward")
        .json(&json!({"address": "nowhere"}))
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn forward_geocode_rejects_blank_address() {
    let response = server()
        .post("/api/geocode/forward")
        .json(&json!({"address": "   "}))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn reverse_geocode() {
    let response = server()
        .post("/api/geocode/reverse")
        .json(&json!({"lat": 42.2790, "lng": -83.7410}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["address"], body["display_name"]);
    assert_eq!(body["lng"], -83.741);
}

// ============ Score ============

#[tokio::test]
async fn score_includes_commute_and_amenities() {
    let response = server()
        .post("/api/score/calculate")
        .json(&json!({
            "home": downtown(),
            "work": ypsilanti(),
            "amenities": [{"amenity_type": "gym", "visits_per_week": 2}]
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let breakdown = body["breakdown"].as_array().unwrap();
    assert_eq!(breakdown.len(), 2);
    assert_eq!(breakdown[0]["commute_mode"], "transit");
    assert_eq!(breakdown[0]["round_trips_per_week"], 5);
    assert_eq!(breakdown[1]["round_trips_per_week"], 2);
    assert!(body["total_weekly_walk_min"].as_f64().unwrap() > 0.0);
    assert!(body["grade"].is_string());
}

#[tokio::test]
async fn score_full_walk_commute_is_reported_as_walk() {
    let response = server()
        .post("/api/score/calculate")
        .json(&json!({
            "home": downtown(),
            "work": ypsilanti(),
            "commute_mode": "walk"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["breakdown"][0]["commute_mode"], "walk");
    assert_eq!(body["breakdown"][0]["label"], "Work commute (full walk)");
}

#[tokio::test]
async fn score_without_work_or_amenities_is_f() {
    let response = server()
        .post("/api/score/calculate")
        .json(&json!({"home": downtown()}))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["grade"], "F");
    assert_eq!(body["total_weekly_walk_min"], 0.0);
    assert!(body["breakdown"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn score_rejects_unknown_amenity() {
    let response = server()
        .post("/api/score/calculate")
        .json(&json!({
            "home": downtown(),
            "amenities": [{"amenity_type": "casino"}]
        }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn score_rejects_eight_work_days() {
    let response = server()
        .post("/api/score/calculate")
        .json(&json!({
            "home": downtown(),
            "work": ypsilanti(),
            "work_days_per_week": 8
        }))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("work_days_per_week"));
}

#[tokio::test]
async fn openapi_document_is_served() {
    let response = server().get("/api-docs/openapi.json").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["paths"]["/api/score/calculate"].is_object());
}
