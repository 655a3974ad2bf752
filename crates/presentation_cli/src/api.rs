//! Thin client for the walkwise HTTP API

use std::time::Duration;

use anyhow::{Context, bail};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

/// A point given on the command line as `lat,lng`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// Parse `lat,lng`
pub fn parse_lat_lng(value: &str) -> Result<LatLng, String> {
    let (lat, lng) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `lat,lng`, got `{value}`"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude `{}`", lat.trim()))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude `{}`", lng.trim()))?;
    if !(-90.0..=90.0).contains(&lat) {
        return Err(format!("latitude {lat} out of range"));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(format!("longitude {lng} out of range"));
    }
    Ok(LatLng { lat, lng })
}

/// A regular amenity trip given as `type` or `type:visits`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmenityVisit {
    pub amenity_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visits_per_week: Option<u32>,
}

/// Parse `gym` or `gym:2`
pub fn parse_amenity_visit(value: &str) -> Result<AmenityVisit, String> {
    let (name, visits) = match value.rsplit_once(':') {
        Some((name, visits)) => {
            let visits = visits
                .trim()
                .parse()
                .map_err(|_| format!("invalid visit count `{}`", visits.trim()))?;
            (name, Some(visits))
        },
        None => (value, None),
    };
    let name = name.trim();
    if name.is_empty() {
        return Err("amenity type must not be empty".to_string());
    }
    Ok(AmenityVisit {
        amenity_type: name.to_string(),
        visits_per_week: visits,
    })
}

/// Body for `POST /api/score/calculate`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBody {
    pub home: LatLng,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work: Option<LatLng>,
    pub work_days_per_week: u32,
    pub commute_mode: String,
    pub amenities: Vec<AmenityVisit>,
}

/// Client bound to one server
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("walkwise-cli/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn health(&self) -> anyhow::Result<Value> {
        let response = self
            .client
            .get(self.url("/api/health"))
            .send()
            .await
            .with_context(|| format!("Cannot reach {}", self.base_url))?;
        read_json(response).await
    }

    pub async fn commute(
        &self,
        origin: LatLng,
        destination: LatLng,
        radius_m: Option<u32>,
    ) -> anyhow::Result<Value> {
        let mut body = json!({ "origin": origin, "destination": destination });
        if let Some(radius) = radius_m {
            body["transit_radius_m"] = json!(radius);
        }
        self.post("/api/route/commute", &body).await
    }

    pub async fn stops(&self, location: LatLng, radius_m: Option<u32>) -> anyhow::Result<Value> {
        let mut body = json!({ "location": location });
        if let Some(radius) = radius_m {
            body["radius_m"] = json!(radius);
        }
        self.post("/api/route/transit-stops", &body).await
    }

    pub async fn score(&self, body: &ScoreBody) -> anyhow::Result<Value> {
        self.post("/api/score/calculate", body).await
    }

    async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> anyhow::Result<Value> {
        debug!(path, "POST");
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .with_context(|| format!("Cannot reach {}", self.base_url))?;
        read_json(response).await
    }
}

/// Decode a JSON body, turning API errors into their message
async fn read_json(response: reqwest::Response) -> anyhow::Result<Value> {
    let status = response.status();
    let body: Value = response
        .json()
        .await
        .with_context(|| format!("Server answered HTTP {status} without JSON"))?;

    if !status.is_success() {
        let message = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        match body.get("details").and_then(Value::as_str) {
            Some(details) => bail!("HTTP {status}: {message} ({details})"),
            None => bail!("HTTP {status}: {message}"),
        }
    }
    Ok(body)
}
