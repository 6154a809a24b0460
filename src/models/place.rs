//! Points of interest that can be scheduled

use serde::{Deserialize, Serialize};

use super::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceCategory {
    Restaurant,
    Cafe,
    Attraction,
    Hotel,
}

impl PlaceCategory {
    /// Attractions and cafes are the places visited between meals
    #[must_use]
    pub fn is_sightseeing(self) -> bool {
        matches!(self, PlaceCategory::Attraction | PlaceCategory::Cafe)
    }
}

/// A place with free-text tags used for preference matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub location: Location,
    /// Ordered tags; duplicates are allowed and each occurrence counts when scoring
    pub tags: Vec<String>,
    pub category: PlaceCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Place {
    /// Tags joined for display in schedule memos
    #[must_use]
    pub fn tag_line(&self) -> String {
        self.tags.join(", ")
    }
}
