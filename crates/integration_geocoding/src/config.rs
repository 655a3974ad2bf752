//! Nominatim configuration

use serde::{Deserialize, Serialize};

/// Configuration for the Nominatim geocoding service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NominatimConfig {
    /// Base URL for the Nominatim API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Identifying User-Agent, required by the usage policy
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Optional country code filter (e.g. "us"); empty means worldwide
    #[serde(default)]
    pub country_filter: String,
}

fn default_base_url() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!(
        "walkwise/",
        env!("CARGO_PKG_VERSION"),
        " (https://github.com/walkwise/walkwise)"
    )
    .to_string()
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            country_filter: String::new(),
        }
    }
}

impl NominatimConfig {
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
            return Err("geocoding.base_url must not be empty".to_string());
        }
        if self.user_agent.trim().is_empty() {
            return Err("geocoding.user_agent must not be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("geocoding.timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominatim_config_default() {
        let config = NominatimConfig::default();
        assert_eq!(config.base_url, "https://nominatim.openstreetmap.org");
        assert_eq!(config.timeout_secs, 10);
        assert!(config.user_agent.starts_with("walkwise/"));
        assert!(config.country_filter.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_blank_user_agent_rejected() {
        let config = NominatimConfig {
            user_agent: " ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nominatim_config_serialization() {
        let config = NominatimConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: NominatimConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.base_url, config.base_url);
        assert_eq!(deserialized.user_agent, config.user_agent);
    }
}
