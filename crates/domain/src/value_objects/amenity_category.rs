//! Amenity categories and their OSM tag filters
//!
//! The category set is closed. Free-form names from requests are parsed
//! through [`AmenityCategory::from_str`], which also accepts a handful of
//! aliases ("fitness", "coffee shop", "grocery store").

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::tag_filter::{TagFilter, TagGroup};
use crate::errors::DomainError;

/// A searchable amenity category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum AmenityCategory {
    Gym,
    Cafe,
    /// Cafés tagged as dedicated coffee shops
    Coffee,
    Restaurant,
    Supermarket,
    /// Supermarkets and convenience stores
    Grocery,
    Pharmacy,
    Park,
    Library,
    Bar,
    Bank,
    Hospital,
    School,
    Bakery,
}

const CAFE_EXCLUSIONS: &[&str] = &["dining hall", "canteen", "cafeteria"];
const COFFEE_EXCLUSIONS: &[&str] = &[
    "dining hall",
    "canteen",
    "cafeteria",
    "food court",
    "food hall",
];

impl AmenityCategory {
    /// Every category, in display order
    pub const ALL: [Self; 14] = [
        Self::Gym,
        Self::Cafe,
        Self::Coffee,
        Self::Restaurant,
        Self::Supermarket,
        Self::Grocery,
        Self::Pharmacy,
        Self::Park,
        Self::Library,
        Self::Bar,
        Self::Bank,
        Self::Hospital,
        Self::School,
        Self::Bakery,
    ];

    /// Canonical wire name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Gym => "gym",
            Self::Cafe => "cafe",
            Self::Coffee => "coffee",
            Self::Restaurant => "restaurant",
            Self::Supermarket => "supermarket",
            Self::Grocery => "grocery",
            Self::Pharmacy => "pharmacy",
            Self::Park => "park",
            Self::Library => "library",
            Self::Bar => "bar",
            Self::Bank => "bank",
            Self::Hospital => "hospital",
            Self::School => "school",
            Self::Bakery => "bakery",
        }
    }

    /// Human-readable label used in score breakdowns
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Gym => "Gym",
            Self::Cafe => "Cafe",
            Self::Coffee => "Coffee",
            Self::Restaurant => "Restaurant",
            Self::Supermarket => "Supermarket",
            Self::Grocery => "Grocery",
            Self::Pharmacy => "Pharmacy",
            Self::Park => "Park",
            Self::Library => "Library",
            Self::Bar => "Bar",
            Self::Bank => "Bank",
            Self::Hospital => "Hospital",
            Self::School => "School",
            Self::Bakery => "Bakery",
        }
    }

    /// OR-ed tag groups matching this category
    #[must_use]
    pub const fn tag_groups(&self) -> &'static [TagGroup] {
        match self {
            Self::Gym => &[&[TagFilter { key: "leisure", value: "fitness_centre" }]],
            Self::Cafe => &[&[TagFilter { key: "amenity", value: "cafe" }]],
            Self::Coffee => &[&[
                TagFilter { key: "amenity", value: "cafe" },
                TagFilter { key: "cuisine", value: "coffee_shop" },
            ]],
            Self::Restaurant => &[&[TagFilter { key: "amenity", value: "restaurant" }]],
            Self::Supermarket => &[&[TagFilter { key: "shop", value: "supermarket" }]],
            Self::Grocery => &[
                &[TagFilter { key: "shop", value: "supermarket" }],
                &[TagFilter { key: "shop", value: "convenience" }],
            ],
            Self::Pharmacy => &[&[TagFilter { key: "amenity", value: "pharmacy" }]],
            Self::Park => &[&[TagFilter { key: "leisure", value: "park" }]],
            Self::Library => &[&[TagFilter { key: "amenity", value: "library" }]],
            Self::Bar => &[&[TagFilter { key: "amenity", value: "bar" }]],
            Self::Bank => &[&[TagFilter { key: "amenity", value: "bank" }]],
            Self::Hospital => &[&[TagFilter { key: "amenity", value: "hospital" }]],
            Self::School => &[&[TagFilter { key: "amenity", value: "school" }]],
            Self::Bakery => &[&[TagFilter { key: "shop", value: "bakery" }]],
        }
    }

    /// Lower-case name fragments that disqualify a result
    #[must_use]
    pub const fn excluded_keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Cafe => CAFE_EXCLUSIONS,
            Self::Coffee => COFFEE_EXCLUSIONS,
            _ => &[],
        }
    }

    /// Whether a POI name trips one of the exclusion keywords
    #[must_use]
    pub fn excludes_name(&self, name: &str) -> bool {
        let keywords = self.excluded_keywords();
        if keywords.is_empty() {
            return false;
        }
        let lowered = name.to_lowercase();
        keywords.iter().any(|kw| lowered.contains(kw))
    }
}

impl FromStr for AmenityCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let category = match normalized.as_str() {
            "gym" | "fitness" => Self::Gym,
            "cafe" => Self::Cafe,
            "coffee" | "coffee shop" => Self::Coffee,
            "restaurant" => Self::Restaurant,
            "supermarket" => Self::Supermarket,
            "grocery" | "grocery store" => Self::Grocery,
            "pharmacy" => Self::Pharmacy,
            "park" => Self::Park,
            "library" => Self::Library,
            "bar" => Self::Bar,
            "bank" => Self::Bank,
            "hospital" => Self::Hospital,
            "school" => Self::School,
            "bakery" => Self::Bakery,
            _ => return Err(DomainError::UnknownAmenityCategory(s.to_string())),
        };
        Ok(category)
    }
}

impl TryFrom<String> for AmenityCategory {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for AmenityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
