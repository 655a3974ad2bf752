//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `integrations`: routing providers, Overpass, Nominatim
//! - `scoring`: score weights and radii
//!
//! The itinerary provider (`[itinerary]`) and telemetry (`[telemetry]`)
//! sections reuse the config types of their own crates.
//!
//! Sources, later ones winning: built-in defaults, an optional `config.toml`
//! (or the file named by `WALKWISE_CONFIG`), then `WALKWISE_`-prefixed
//! environment variables with `__` between nested keys, e.g.
//! `WALKWISE_ROUTING__ORS__API_KEY`.

mod integrations;
mod scoring;
mod server;

use std::path::Path;

use application::ApplicationError;
use integration_transit::GoogleRoutesConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub use integrations::{GeocodingAppConfig, OverpassAppConfig, RoutingAppConfig};
pub use scoring::ScoringAppConfig;
pub use server::ServerConfig;

use crate::telemetry::TelemetryConfig;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "WALKWISE_CONFIG";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Walking route providers
    #[serde(default)]
    pub routing: RoutingAppConfig,

    /// POI backend
    #[serde(default)]
    pub overpass: OverpassAppConfig,

    /// Geocoder
    #[serde(default)]
    pub geocoding: GeocodingAppConfig,

    /// Optional multi-leg transit itineraries; inactive without an API key
    #[serde(default)]
    pub itinerary: GoogleRoutesConfig,

    /// Score weights and radii
    #[serde(default)]
    pub scoring: ScoringAppConfig,

    /// Logging and trace export
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or a value has the wrong
    /// type.
    pub fn load() -> Result<Self, config::ConfigError> {
        match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::load_from(Some(Path::new(&path))),
            _ => Self::load_from(None),
        }
    }

    /// Load configuration from an explicit file (required) or the default
    /// `config.toml` (optional), then apply environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or a value has the wrong
    /// type.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let config = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix("WALKWISE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Check every section
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Configuration`] naming the first invalid
    /// setting.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        self.server
            .validate()
            .and_then(|()| self.routing.validate())
            .and_then(|()| self.overpass.validate())
            .and_then(|()| self.geocoding.validate())
            .and_then(|()| self.itinerary.validate())
            .and_then(|()| self.scoring.validate())
            .and_then(|()| self.telemetry.validate())
            .map_err(ApplicationError::Configuration)
    }

    /// Log which optional providers are active
    pub fn log_summary(&self) {
        info!(
            bind = %self.server.bind_address(),
            precise_routing = self.routing.ors.is_configured(),
            itinerary = self.itinerary.is_configured(),
            overpass = %self.overpass.client.endpoint,
            "Configuration loaded"
        );
        if !self.routing.ors.is_configured() {
            warn!(
                walking_speed_kmh = self.routing.walking_speed_kmh,
                "No ORS API key, walking times are estimated from road distance"
            );
        }
    }
}
