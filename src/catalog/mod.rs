//! Static travel data
//!
//! Places, transport legs and well-known cities. The default data set is
//! embedded in the binary; any table can be replaced by a JSON file named in
//! the `data` configuration section. A loaded [`Catalog`] is read-only.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::config::DataConfig;
use crate::models::{Location, Place, Transport, TransportMode, TravelInput};
use crate::{Result, TripPlanError};

const EMBEDDED_PLACES: &str = include_str!("places.json");
const EMBEDDED_TRANSPORTS: &str = include_str!("transports.json");
const EMBEDDED_CITIES: &str = include_str!("cities.json");

/// Immutable collection of places, transport legs and cities
#[derive(Debug, Clone)]
pub struct Catalog {
    places: Vec<Place>,
    transports: Vec<Transport>,
    cities: IndexMap<String, Location>,
}

/// Filters for [`Catalog::search_transports`]. Empty fields match everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransportQuery {
    /// Departure location name, e.g. "서울역"
    pub departure: Option<String>,
    /// Arrival location name
    pub arrival: Option<String>,
    #[serde(default)]
    pub modes: Vec<TransportMode>,
    /// Day of departure
    pub date: Option<NaiveDate>,
    /// Maximum price in KRW
    pub max_price: Option<u32>,
    #[serde(default)]
    pub cancellable_only: bool,
}

impl TransportQuery {
    /// Query matching what a traveller entered on the input form
    #[must_use]
    pub fn from_input(input: &TravelInput) -> Self {
        Self {
            departure: Some(input.departure.name.clone()),
            arrival: Some(input.arrival.name.clone()),
            modes: input.transport_types.clone(),
            date: Some(input.start_date),
            max_price: input.budget,
            cancellable_only: false,
        }
    }

    fn matches(&self, transport: &Transport) -> bool {
        if let Some(departure) = &self.departure {
            if transport.departure.name != *departure {
                return false;
            }
        }
        if let Some(arrival) = &self.arrival {
            if transport.arrival.name != *arrival {
                return false;
            }
        }
        if !self.modes.is_empty() && !self.modes.contains(&transport.mode) {
            return false;
        }
        if let Some(date) = self.date {
            if transport.departure_time.date() != date {
                return false;
            }
        }
        if let Some(max_price) = self.max_price {
            if transport.price > max_price {
                return false;
            }
        }
        !self.cancellable_only || transport.is_cancellable
    }
}

impl Catalog {
    /// Catalog built from the embedded data set
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_PLACES, EMBEDDED_TRANSPORTS, EMBEDDED_CITIES)
    }

    /// Load the catalog, reading any table that has a configured file
    #[instrument(skip_all)]
    pub fn load(config: &DataConfig) -> Result<Self> {
        let places = read_table(config.places_path.as_deref(), EMBEDDED_PLACES)?;
        let transports = read_table(config.transports_path.as_deref(), EMBEDDED_TRANSPORTS)?;
        let cities = read_table(config.cities_path.as_deref(), EMBEDDED_CITIES)?;
        Self::from_json(&places, &transports, &cities)
    }

    /// Parse the three JSON tables
    pub fn from_json(places: &str, transports: &str, cities: &str) -> Result<Self> {
        let places: Vec<Place> = serde_json::from_str(places)
            .map_err(|e| TripPlanError::data(format!("Failed to parse places: {e}")))?;
        let transports: Vec<Transport> = serde_json::from_str(transports)
            .map_err(|e| TripPlanError::data(format!("Failed to parse transports: {e}")))?;
        let cities: IndexMap<String, Location> = serde_json::from_str(cities)
            .map_err(|e| TripPlanError::data(format!("Failed to parse cities: {e}")))?;

        Self::new(places, transports, cities)
    }

    /// Assemble a catalog from already built tables
    pub fn new(
        places: Vec<Place>,
        transports: Vec<Transport>,
        cities: IndexMap<String, Location>,
    ) -> Result<Self> {
        check_unique_ids("place", places.iter().map(|p| p.id.as_str()))?;
        check_unique_ids("transport", transports.iter().map(|t| t.id.as_str()))?;

        for transport in &transports {
            if transport.arrival_time <= transport.departure_time {
                warn!("Transport {} arrives before it departs", transport.id);
            } else if !transport.is_duration_consistent() {
                warn!(
                    "Transport {} duration {} does not match its timetable",
                    transport.id, transport.duration
                );
            }
        }

        info!(
            "Loaded catalog with {} places, {} transports, {} cities",
            places.len(),
            transports.len(),
            cities.len()
        );

        Ok(Self {
            places,
            transports,
            cities,
        })
    }

    #[must_use]
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    #[must_use]
    pub fn transports(&self) -> &[Transport] {
        &self.transports
    }

    #[must_use]
    pub fn cities(&self) -> &IndexMap<String, Location> {
        &self.cities
    }

    /// Look up a city by key ("busan") or by its display name ("부산역")
    pub fn resolve_city(&self, query: &str) -> Result<&Location> {
        let key = query.trim().to_lowercase();
        self.cities
            .get(&key)
            .or_else(|| self.cities.values().find(|city| city.name == query.trim()))
            .ok_or_else(|| TripPlanError::not_found(format!("city '{query}'")))
    }

    #[must_use]
    pub fn find_transport(&self, id: &str) -> Option<&Transport> {
        self.transports.iter().find(|t| t.id == id)
    }

    /// Transports matching the query, earliest departure first
    #[must_use]
    pub fn search_transports(&self, query: &TransportQuery) -> Vec<&Transport> {
        let mut results: Vec<&Transport> = self
            .transports
            .iter()
            .filter(|transport| query.matches(transport))
            .collect();
        results.sort_by_key(|transport| transport.departure_time);
        results
    }

    /// Places within `radius_km` of `center`, in catalog order
    #[must_use]
    pub fn places_near(&self, center: &Location, radius_km: f64) -> Vec<&Place> {
        self.places
            .iter()
            .filter(|place| place.location.distance_km(center) <= radius_km)
            .collect()
    }
}

fn read_table(path: Option<&str>, embedded: &str) -> Result<String> {
    let Some(path) = path else {
        return Ok(embedded.to_string());
    };

    let path = Path::new(path);
    info!("Loading catalog table from: {:?}", path);
    if !path.exists() {
        return Err(TripPlanError::data(format!(
            "Data file not found: {}",
            path.display()
        )));
    }
    Ok(fs::read_to_string(path)?)
}

fn check_unique_ids<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(TripPlanError::data(format!("Duplicate {kind} id '{id}'")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlaceCategory;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn catalog() -> Catalog {
        Catalog::embedded().unwrap()
    }

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = catalog();
        assert_eq!(catalog.places().len(), 17);
        assert_eq!(catalog.transports().len(), 12);
        assert_eq!(catalog.cities().len(), 8);
    }

    #[test]
    fn test_international_durations_disagree_with_timetable() {
        // advertised 150 minutes, timestamps are 90 apart; kept as supplied
        let catalog = catalog();
        let inconsistent: Vec<&str> = catalog
            .transports()
            .iter()
            .filter(|t| !t.is_duration_consistent())
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(inconsistent, vec!["flight-int-001", "flight-int-002"]);
    }

    #[test]
    fn test_only_one_hotel() {
        let catalog = catalog();
        let hotels = catalog
            .places()
            .iter()
            .filter(|p| p.category == PlaceCategory::Hotel)
            .count();
        assert_eq!(hotels, 1);
    }

    #[test]
    fn test_resolve_city() {
        let catalog = catalog();
        assert_eq!(catalog.resolve_city("busan").unwrap().name, "부산역");
        assert_eq!(catalog.resolve_city("Seoul").unwrap().name, "서울역");
        assert_eq!(catalog.resolve_city("제주공항").unwrap().name, "제주공항");
        assert!(matches!(
            catalog.resolve_city("atlantis").unwrap_err(),
            TripPlanError::NotFound { .. }
        ));
    }

    #[test]
    fn test_find_transport() {
        let catalog = catalog();
        let ktx = catalog.find_transport("ktx-001").unwrap();
        assert_eq!(ktx.mode, TransportMode::Train);
        assert_eq!(ktx.company.as_deref(), Some("KTX"));
        assert!(catalog.find_transport("ktx-999").is_none());
    }

    #[test]
    fn test_search_by_route_is_sorted() {
        let catalog = catalog();
        let query = TransportQuery {
            departure: Some("서울역".to_string()),
            arrival: Some("부산역".to_string()),
            ..Default::default()
        };
        let ids: Vec<&str> = catalog
            .search_transports(&query)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["ktx-001", "bus-001", "ktx-002", "bus-002"]);
    }

    #[test]
    fn test_search_by_mode_price_and_cancellable() {
        let catalog = catalog();
        let query = TransportQuery {
            modes: vec![TransportMode::Flight],
            max_price: Some(100_000),
            cancellable_only: true,
            ..Default::default()
        };
        let ids: Vec<&str> = catalog
            .search_transports(&query)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["flight-001", "flight-002"]);
    }

    #[test]
    fn test_search_other_date_is_empty() {
        let query = TransportQuery {
            date: NaiveDate::from_ymd_opt(2025, 8, 11),
            ..Default::default()
        };
        assert!(catalog().search_transports(&query).is_empty());
    }

    #[test]
    fn test_query_from_input() {
        let catalog = catalog();
        let ktx = catalog.find_transport("ktx-001").unwrap();
        let mut input = TravelInput::for_transport(ktx, "");
        input.transport_types = vec![TransportMode::Bus];
        input.budget = Some(30_000);

        let results = catalog.search_transports(&TransportQuery::from_input(&input));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "bus-002");
    }

    #[test]
    fn test_places_near_busan() {
        let catalog = catalog();
        let busan = catalog.resolve_city("busan").unwrap().clone();
        let near = catalog.places_near(&busan, 30.0);

        assert_eq!(near.len(), 11);
        for other_city in ["jeju", "osaka", "gangneung"] {
            assert!(near.iter().all(|p| !p.id.contains(other_city)));
        }
        assert_eq!(near[0].id, "cafe-001");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let places = r#"[
            {"id": "x", "name": "a", "location": {"latitude": 0, "longitude": 0, "name": "a"}, "tags": [], "category": "cafe"},
            {"id": "x", "name": "b", "location": {"latitude": 0, "longitude": 0, "name": "b"}, "tags": [], "category": "hotel"}
        ]"#;
        let err = Catalog::from_json(places, "[]", "{}").unwrap_err();
        assert!(err.to_string().contains("Duplicate place id 'x'"));
    }

    #[test]
    fn test_load_places_from_file() {
        let places = r#"[
            {"id": "only", "name": "단 하나", "location": {"latitude": 35.1, "longitude": 129.0, "name": "단 하나"}, "tags": ["카페"], "category": "cafe"}
        ]"#;
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(places.as_bytes()).unwrap();

        let config = DataConfig {
            places_path: Some(temp_file.path().to_string_lossy().to_string()),
            transports_path: None,
            cities_path: None,
        };
        let catalog = Catalog::load(&config).unwrap();
        assert_eq!(catalog.places().len(), 1);
        assert_eq!(catalog.places()[0].name, "단 하나");
        assert_eq!(catalog.transports().len(), 12);
    }

    #[test]
    fn test_missing_file() {
        let config = DataConfig {
            places_path: Some("nonexistent_places.json".to_string()),
            transports_path: None,
            cities_path: None,
        };
        let err = Catalog::load(&config).unwrap_err();
        assert!(matches!(err, TripPlanError::Data { .. }));
    }
}
