//! Integration tests for the routing clients (wiremock-based)

use std::time::Duration;

use domain::value_objects::Coordinate;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_routing::{
    FootRoutingClient, OrsClient, OrsConfig, OsrmClient, OsrmConfig, RoadRoutingClient,
    RoutingError,
};

fn home() -> Coordinate {
    Coordinate::new(42.2808, -83.7430).unwrap()
}

fn work() -> Coordinate {
    Coordinate::new(42.2780, -83.7382).unwrap()
}

const fn sample_ors_json() -> &'static str {
    r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {
                "summary": { "distance": 612.3, "duration": 441.0 }
            },
            "geometry": {
                "type": "LineString",
                "coordinates": [
                    [-83.7430, 42.2808],
                    [-83.7410, 42.2795],
                    [-83.7382, 42.2780]
                ]
            }
        }]
    }"#
}

const fn sample_osrm_json() -> &'static str {
    r#"{
        "code": "Ok",
        "routes": [{
            "distance": 700.0,
            "duration": 65.2,
            "geometry": {
                "type": "LineString",
                "coordinates": [[-83.7430, 42.2808], [-83.7382, 42.2780]]
            }
        }],
        "waypoints": []
    }"#
}

// --- OpenRouteService ---

#[tokio::test]
async fn test_ors_route_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/directions/foot-walking/geojson"))
        .and(header("authorization", "test-key"))
        .and(body_json(serde_json::json!({
            "coordinates": [[-83.7430, 42.2808], [-83.7382, 42.2780]]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_ors_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = OrsClient::new(&OrsConfig::for_testing(&server.uri())).unwrap();
    let route = client.foot_route(&home(), &work()).await.unwrap().unwrap();

    assert!((route.distance_m - 612.3).abs() < f64::EPSILON);
    assert!((route.duration_s - 441.0).abs() < f64::EPSILON);
    assert_eq!(route.geometry.len(), 3);
    assert!((route.geometry[2].lat() - 42.2780).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_ors_not_found_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/directions/foot-walking/geojson"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"error":{"code":2009}}"#))
        .mount(&server)
        .await;

    let client = OrsClient::new(&OrsConfig::for_testing(&server.uri())).unwrap();
    let route = client.foot_route(&home(), &work()).await.unwrap();
    assert!(route.is_none());
}

#[tokio::test]
async fn test_ors_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = OrsClient::new(&OrsConfig::for_testing(&server.uri())).unwrap();
    let err = client.foot_route(&home(), &work()).await.unwrap_err();
    assert!(matches!(err, RoutingError::RequestFailed(msg) if msg.contains("500")));
}

#[tokio::test]
async fn test_ors_malformed_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = OrsClient::new(&OrsConfig::for_testing(&server.uri())).unwrap();
    let err = client.foot_route(&home(), &work()).await.unwrap_err();
    assert!(err.is_decode());
}

#[tokio::test]
async fn test_ors_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "12"))
        .mount(&server)
        .await;

    let client = OrsClient::new(&OrsConfig::for_testing(&server.uri())).unwrap();
    let err = client.foot_route(&home(), &work()).await.unwrap_err();
    assert!(matches!(
        err,
        RoutingError::RateLimitExceeded {
            retry_after_secs: Some(12)
        }
    ));
}

// --- OSRM ---

#[tokio::test]
async fn test_osrm_route_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/route/v1/driving/-83.743,42.2808;-83.7382,42.278"))
        .and(query_param("overview", "full"))
        .and(query_param("geometries", "geojson"))
        .and(query_param("steps", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_osrm_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = OsrmClient::new(&OsrmConfig::for_testing(&server.uri())).unwrap();
    let route = client.road_route(&home(), &work()).await.unwrap().unwrap();

    assert!((route.distance_m - 700.0).abs() < f64::EPSILON);
    assert_eq!(route.geometry.len(), 2);
    assert!((route.geometry[0].lat() - 42.2808).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_osrm_no_route_400_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(r#"{"code":"NoRoute","message":"Impossible route"}"#),
        )
        .mount(&server)
        .await;

    let client = OsrmClient::new(&OsrmConfig::for_testing(&server.uri())).unwrap();
    assert!(client.road_route(&home(), &work()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_osrm_invalid_query_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string(r#"{"code":"InvalidQuery"}"#),
        )
        .mount(&server)
        .await;

    let client = OsrmClient::new(&OsrmConfig::for_testing(&server.uri())).unwrap();
    let err = client.road_route(&home(), &work()).await.unwrap_err();
    assert!(matches!(err, RoutingError::RequestFailed(_)));
}

#[tokio::test]
async fn test_osrm_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(sample_osrm_json())
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = OsrmConfig {
        timeout_secs: 1,
        ..OsrmConfig::for_testing(&server.uri())
    };
    let client = OsrmClient::new(&config).unwrap();
    let err = client.road_route(&home(), &work()).await.unwrap_err();
    assert!(matches!(err, RoutingError::Timeout { timeout_secs: 1 }));
}
