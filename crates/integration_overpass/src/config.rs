//! Overpass configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Overpass interpreter endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverpassConfig {
    /// Interpreter URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Server-side query timeout (`[timeout:N]`) in seconds
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u32,
}

fn default_endpoint() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}

const fn default_timeout_secs() -> u64 {
    15
}

const fn default_query_timeout_secs() -> u32 {
    10
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            query_timeout_secs: default_query_timeout_secs(),
        }
    }
}

impl OverpassConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
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
        if self.endpoint.is_empty() {
            return Err("overpass.endpoint must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("overpass.timeout_secs must be greater than 0".to_string());
        }
        if self.query_timeout_secs == 0 {
            return Err("overpass.query_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}
