//! Upstream provider configuration: routing, POI queries, geocoding

use integration_geocoding::NominatimConfig;
use integration_overpass::OverpassConfig;
use integration_routing::{OrsConfig, OsrmConfig};
use serde::{Deserialize, Serialize};

use crate::throttle::ThrottleConfig;

/// Walking route providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingAppConfig {
    /// OpenRouteService; used for every route when it has an API key
    #[serde(default)]
    pub ors: OrsConfig,

    /// OSRM road routing, the keyless fallback
    #[serde(default)]
    pub osrm: OsrmConfig,

    /// Speed used to turn road distance into walking time
    #[serde(default = "default_walking_speed_kmh")]
    pub walking_speed_kmh: f64,
}

const fn default_walking_speed_kmh() -> f64 {
    application::DEFAULT_WALKING_SPEED_KMH
}

impl Default for RoutingAppConfig {
    fn default() -> Self {
        Self {
            ors: OrsConfig::default(),
            osrm: OsrmConfig::default(),
            walking_speed_kmh: default_walking_speed_kmh(),
        }
    }
}

impl RoutingAppConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if !self.walking_speed_kmh.is_finite() || self.walking_speed_kmh <= 0.0 {
            return Err("routing.walking_speed_kmh must be a positive number".to_string());
        }
        self.ors.validate()?;
        self.osrm.validate()
    }
}

/// Overpass endpoint plus the request budget shared by all POI lookups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverpassAppConfig {
    /// Endpoint and timeouts
    #[serde(flatten)]
    pub client: OverpassConfig,

    /// Minimum gap between two Overpass requests
    #[serde(default = "default_overpass_interval_ms")]
    pub min_interval_ms: u64,

    /// Retries after an HTTP 429
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

const fn default_overpass_interval_ms() -> u64 {
    ThrottleConfig::overpass().min_interval_ms
}

const fn default_max_retries() -> u32 {
    ThrottleConfig::overpass().max_retries
}

impl Default for OverpassAppConfig {
    fn default() -> Self {
        Self {
            client: OverpassConfig::default(),
            min_interval_ms: default_overpass_interval_ms(),
            max_retries: default_max_retries(),
        }
    }
}

impl OverpassAppConfig {
    /// Throttle settings for the Overpass adapter
    #[must_use]
    pub const fn throttle(&self) -> ThrottleConfig {
        ThrottleConfig {
            min_interval_ms: self.min_interval_ms,
            max_retries: self.max_retries,
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        self.client.validate()?;
        self.throttle()
            .validate()
            .map_err(|e| format!("overpass.{e}"))
    }
}

/// Nominatim endpoint plus its request budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingAppConfig {
    /// Endpoint, User-Agent and timeouts
    #[serde(flatten)]
    pub client: NominatimConfig,

    /// Minimum gap between two Nominatim requests
    #[serde(default = "default_nominatim_interval_ms")]
    pub min_interval_ms: u64,

    /// Retries after an HTTP 429
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

const fn default_nominatim_interval_ms() -> u64 {
    ThrottleConfig::nominatim().min_interval_ms
}

impl Default for GeocodingAppConfig {
    fn default() -> Self {
        Self {
            client: NominatimConfig::default(),
            min_interval_ms: default_nominatim_interval_ms(),
            max_retries: default_max_retries(),
        }
    }
}

impl GeocodingAppConfig {
    /// Throttle settings for the geocoding adapter
    #[must_use]
    pub const fn throttle(&self) -> ThrottleConfig {
        ThrottleConfig {
            min_interval_ms: self.min_interval_ms,
            max_retries: self.max_retries,
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        self.client.validate()?;
        self.throttle()
            .validate()
            .map_err(|e| format!("geocoding.{e}"))
    }
}
