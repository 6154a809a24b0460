//! Location model for geographic coordinates and display names

use serde::{Deserialize, Serialize};

/// Location coordinates
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Display name (station, airport, place)
    pub name: String,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, name: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            name: name.into(),
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Great-circle distance to another location in kilometers
    #[must_use]
    pub fn distance_km(&self, other: &Location) -> f64 {
        haversine::distance(
            haversine::Location {
                latitude: self.latitude,
                longitude: self.longitude,
            },
            haversine::Location {
                latitude: other.latitude,
                longitude: other.longitude,
            },
            haversine::Units::Kilometers,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_coordinates() {
        let location = Location::new(35.179_612, 129.075_642, "부산역");
        assert_eq!(location.format_coordinates(), "35.1796, 129.0756");
    }

    #[test]
    fn test_distance_km() {
        let busan = Location::new(35.1796, 129.0756, "부산역");
        let haeundae = Location::new(35.1586, 129.1604, "해운대");
        let seoul = Location::new(37.5665, 126.9780, "서울역");

        assert_eq!(busan.distance_km(&busan), 0.0);
        let near = busan.distance_km(&haeundae);
        assert!(near > 5.0 && near < 12.0, "unexpected distance {near}");
        let far = busan.distance_km(&seoul);
        assert!(far > 300.0 && far < 350.0, "unexpected distance {far}");
    }
}
