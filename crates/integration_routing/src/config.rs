//! Routing provider configuration

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// OpenRouteService foot-routing configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct OrsConfig {
    /// Base URL of the ORS API
    #[serde(default = "default_ors_base_url")]
    pub base_url: String,

    /// API key (sensitive). Without it the precise provider is disabled.
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Routing profile
    #[serde(default = "default_ors_profile")]
    pub profile: String,

    /// Request timeout in seconds
    #[serde(default = "default_ors_timeout_secs")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for OrsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrsConfig")
            .field("base_url", &self.base_url)
            .field(
                "api_key",
                &if self.api_key().is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("profile", &self.profile)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_ors_base_url() -> String {
    "https://api.openrouteservice.org".to_string()
}

fn default_ors_profile() -> String {
    "foot-walking".to_string()
}

const fn default_ors_timeout_secs() -> u64 {
    15
}

impl Default for OrsConfig {
    fn default() -> Self {
        Self {
            base_url: default_ors_base_url(),
            api_key: None,
            profile: default_ors_profile(),
            timeout_secs: default_ors_timeout_secs(),
        }
    }
}

impl OrsConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: Some(SecretString::from("test-key")),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// The API key, if one is set and non-empty
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_ref()
            .map(|key| key.expose_secret())
            .filter(|key| !key.trim().is_empty())
    }

    /// Whether the precise provider can be used
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("ors.base_url must not be empty".to_string());
        }
        if self.profile.is_empty() {
            return Err("ors.profile must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("ors.timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// OSRM road-routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OsrmConfig {
    /// Base URL of the OSRM server
    #[serde(default = "default_osrm_base_url")]
    pub base_url: String,

    /// Routing profile (the public demo server only offers `driving`)
    #[serde(default = "default_osrm_profile")]
    pub profile: String,

    /// Request timeout in seconds
    #[serde(default = "default_osrm_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_osrm_base_url() -> String {
    "https://router.project-osrm.org".to_string()
}

fn default_osrm_profile() -> String {
    "driving".to_string()
}

const fn default_osrm_timeout_secs() -> u64 {
    10
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: default_osrm_base_url(),
            profile: default_osrm_profile(),
            timeout_secs: default_osrm_timeout_secs(),
        }
    }
}

impl OsrmConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("osrm.base_url must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("osrm.timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}
