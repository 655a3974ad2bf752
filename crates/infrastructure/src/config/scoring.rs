//! Walking score parameters

use application::{
    DEFAULT_SCORE_AMENITY_RADIUS_M, DEFAULT_TRANSIT_RADIUS_M, ScoreConfig, ScoreRadii,
};
use serde::{Deserialize, Serialize};

/// Score weights and search radii
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringAppConfig {
    /// Calories burned per walking minute
    #[serde(default = "default_calories_per_minute")]
    pub calories_per_minute: f64,

    /// Weekly activity target in minutes
    #[serde(default = "default_who_weekly_minutes")]
    pub who_weekly_minutes: f64,

    /// Stop search radius for scored commutes
    #[serde(default = "default_transit_radius_m")]
    pub transit_radius_m: u32,

    /// Search radius for scored amenities
    #[serde(default = "default_amenity_radius_m")]
    pub amenity_radius_m: u32,
}

const fn default_calories_per_minute() -> f64 {
    4.0
}

const fn default_who_weekly_minutes() -> f64 {
    150.0
}

const fn default_transit_radius_m() -> u32 {
    DEFAULT_TRANSIT_RADIUS_M
}

const fn default_amenity_radius_m() -> u32 {
    DEFAULT_SCORE_AMENITY_RADIUS_M
}

impl Default for ScoringAppConfig {
    fn default() -> Self {
        Self {
            calories_per_minute: default_calories_per_minute(),
            who_weekly_minutes: default_who_weekly_minutes(),
            transit_radius_m: default_transit_radius_m(),
            amenity_radius_m: default_amenity_radius_m(),
        }
    }
}

impl ScoringAppConfig {
    /// Aggregator weights
    #[must_use]
    pub const fn score_config(&self) -> ScoreConfig {
        ScoreConfig {
            calories_per_minute: self.calories_per_minute,
            who_weekly_minutes: self.who_weekly_minutes,
        }
    }

    /// Radii used by the score service
    #[must_use]
    pub const fn radii(&self) -> ScoreRadii {
        ScoreRadii {
            transit_m: self.transit_radius_m,
            amenity_m: self.amenity_radius_m,
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if !self.who_weekly_minutes.is_finite() || self.who_weekly_minutes <= 0.0 {
            return Err("scoring.who_weekly_minutes must be a positive number".to_string());
        }
        if !self.calories_per_minute.is_finite() || self.calories_per_minute < 0.0 {
            return Err("scoring.calories_per_minute must not be negative".to_string());
        }
        if self.transit_radius_m == 0 || self.amenity_radius_m == 0 {
            return Err("scoring radii must be greater than 0".to_string());
        }
        Ok(())
    }
}
