//! Google Routes configuration

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Configuration for the Google Routes transit provider
///
/// The provider is optional; without an API key the commute falls back to
/// the nearest-stop heuristic.
#[derive(Clone, Serialize, Deserialize)]
pub struct GoogleRoutesConfig {
    /// Base URL of the Routes API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key (sensitive)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl std::fmt::Debug for GoogleRoutesConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleRoutesConfig")
            .field("base_url", &self.base_url)
            .field(
                "api_key",
                &if self.api_key().is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn default_base_url() -> String {
    "https://routes.googleapis.com".to_string()
}

const fn default_timeout_secs() -> u64 {
    15
}

impl Default for GoogleRoutesConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl GoogleRoutesConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: Some(SecretString::from("test-key")),
            timeout_secs: 5,
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

    /// Whether itineraries can be requested at all
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
            return Err("itinerary.base_url must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("itinerary.timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}
