//! Weekly walking score

use std::fmt;

use serde::{Deserialize, Serialize};

use super::commute::CommuteMode;

/// Letter grade against the weekly activity target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Map a guideline percentage to a grade, highest threshold first
    #[must_use]
    pub fn from_percentage(pct: f64) -> Self {
        match pct {
            p if p >= 150.0 => Self::APlus,
            p if p >= 100.0 => Self::A,
            p if p >= 75.0 => Self::B,
            p if p >= 50.0 => Self::C,
            p if p >= 25.0 => Self::D,
            _ => Self::F,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the work commute was made, as reported in a score breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoredCommute {
    /// Direct walk chosen over transit
    DirectWalk,
    /// Walk to and from transit
    Transit,
    /// Walked end to end, transit never considered
    Walk,
}

impl From<CommuteMode> for ScoredCommute {
    fn from(mode: CommuteMode) -> Self {
        match mode {
            CommuteMode::DirectWalk => Self::DirectWalk,
            CommuteMode::Transit => Self::Transit,
        }
    }
}

/// Round a guideline percentage to the one decimal it is reported with
#[must_use]
pub fn round_percentage(pct: f64) -> f64 {
    (pct * 10.0).round() / 10.0
}

/// One recurring walk in the weekly total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdownItem {
    /// Human-readable description
    pub label: String,
    /// One-way distance in kilometres
    pub distance_km: f64,
    /// One-way walking minutes
    pub one_way_min: f64,
    /// Round trips per week
    pub round_trips_per_week: u32,
    /// Walking minutes per week
    pub weekly_minutes: f64,
    /// Set for the work commute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commute_mode: Option<ScoredCommute>,
}

/// Aggregated weekly score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub total_weekly_walk_min: f64,
    pub total_weekly_calories: f64,
    /// Percentage of the weekly activity guideline
    pub who_guideline_pct: f64,
    pub grade: Grade,
    pub breakdown: Vec<ScoreBreakdownItem>,
}
