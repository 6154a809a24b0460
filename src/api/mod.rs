use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    TripPlanError,
    catalog::{Catalog, TransportQuery},
    config::DefaultsConfig,
    models::{Place, ScheduleItem, Transport, TransportMode, TravelInput},
    planner,
    preferences::{KeywordPreferenceAnalyzer, PreferenceAnalyzer},
};

/// Shared state of the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub analyzer: Arc<dyn PreferenceAnalyzer>,
    pub defaults: DefaultsConfig,
}

impl AppState {
    #[must_use]
    pub fn new(catalog: Catalog, defaults: DefaultsConfig) -> Self {
        Self {
            catalog: Arc::new(catalog),
            analyzer: Arc::new(KeywordPreferenceAnalyzer),
            defaults,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PlacesParams {
    /// City key or display name
    pub near: Option<String>,
    pub radius_km: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TransportParams {
    pub from: Option<String>,
    pub to: Option<String>,
    /// Comma separated, e.g. `train,bus`
    pub modes: Option<String>,
    pub date: Option<NaiveDate>,
    pub budget: Option<u32>,
    #[serde(default)]
    pub cancellable: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PreferenceRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PreferenceResponse {
    pub keywords: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub input: TravelInput,
    pub transport_id: String,
    /// Only consider places this close to the arrival location
    #[serde(default)]
    pub radius_km: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DaySchedule {
    pub date: String,
    pub items: Vec<ScheduleItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub keywords: Vec<String>,
    pub schedule: Vec<ScheduleItem>,
    pub days: Vec<DaySchedule>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/places", get(get_places))
        .route("/transports", get(search_transports))
        .route("/transports/{id}", get(get_transport))
        .route("/preferences", post(analyze_preferences))
        .route("/schedule", post(create_schedule))
        .with_state(state)
}

fn status_for(err: &TripPlanError) -> StatusCode {
    match err {
        TripPlanError::Validation { .. } => StatusCode::BAD_REQUEST,
        TripPlanError::NotFound { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn reject(err: TripPlanError) -> StatusCode {
    tracing::warn!("Request failed: {}", err);
    status_for(&err)
}

async fn get_places(
    State(state): State<AppState>,
    Query(params): Query<PlacesParams>,
) -> Result<Json<Vec<Place>>, StatusCode> {
    let places = match params.near {
        Some(near) => {
            let center = state.catalog.resolve_city(&near).map_err(reject)?;
            let radius = params
                .radius_km
                .unwrap_or(state.defaults.search_radius_km);
            state
                .catalog
                .places_near(center, radius)
                .into_iter()
                .cloned()
                .collect()
        }
        None => state.catalog.places().to_vec(),
    };
    Ok(Json(places))
}

async fn search_transports(
    State(state): State<AppState>,
    Query(params): Query<TransportParams>,
) -> Result<Json<Vec<Transport>>, StatusCode> {
    let query = transport_query(&state.catalog, params).map_err(reject)?;
    let transports = state
        .catalog
        .search_transports(&query)
        .into_iter()
        .take(state.defaults.max_transport_results)
        .cloned()
        .collect();
    Ok(Json(transports))
}

fn transport_query(catalog: &Catalog, params: TransportParams) -> crate::Result<TransportQuery> {
    let departure = params
        .from
        .map(|city| catalog.resolve_city(&city).map(|l| l.name.clone()))
        .transpose()?;
    let arrival = params
        .to
        .map(|city| catalog.resolve_city(&city).map(|l| l.name.clone()))
        .transpose()?;
    let modes = params
        .modes
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .filter(|mode| !mode.trim().is_empty())
        .map(str::parse::<TransportMode>)
        .collect::<crate::Result<Vec<_>>>()?;

    Ok(TransportQuery {
        departure,
        arrival,
        modes,
        date: params.date,
        max_price: params.budget,
        cancellable_only: params.cancellable,
    })
}

async fn get_transport(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Transport>, StatusCode> {
    state
        .catalog
        .find_transport(&id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn analyze_preferences(
    State(state): State<AppState>,
    Json(payload): Json<PreferenceRequest>,
) -> Result<Json<PreferenceResponse>, StatusCode> {
    let keywords = state.analyzer.analyze(&payload.text).await.map_err(reject)?;
    Ok(Json(PreferenceResponse { keywords }))
}

async fn create_schedule(
    State(state): State<AppState>,
    Json(payload): Json<ScheduleRequest>,
) -> Result<Json<ScheduleResponse>, StatusCode> {
    payload.input.validate().map_err(reject)?;

    let transport = state
        .catalog
        .find_transport(&payload.transport_id)
        .ok_or_else(|| {
            reject(TripPlanError::not_found(format!(
                "transport '{}'",
                payload.transport_id
            )))
        })?;

    let candidates: Vec<Place> = match payload.radius_km {
        Some(radius) => state
            .catalog
            .places_near(&transport.arrival, radius)
            .into_iter()
            .cloned()
            .collect(),
        None => state.catalog.places().to_vec(),
    };

    let keywords = state
        .analyzer
        .analyze(&payload.input.preferences)
        .await
        .map_err(reject)?;
    let schedule =
        planner::generate_schedule_with_keywords(&payload.input, transport, &candidates, &keywords);
    let days = planner::group_schedule_by_date(&schedule)
        .into_iter()
        .map(|(date, items)| DaySchedule { date, items })
        .collect();

    Ok(Json(ScheduleResponse {
        keywords,
        schedule,
        days,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::embedded().unwrap()
    }

    #[test]
    fn test_transport_query_resolves_cities_and_modes() {
        let params = TransportParams {
            from: Some("seoul".to_string()),
            to: Some("부산역".to_string()),
            modes: Some("train, bus".to_string()),
            ..Default::default()
        };
        let query = transport_query(&catalog(), params).unwrap();
        assert_eq!(query.departure.as_deref(), Some("서울역"));
        assert_eq!(query.arrival.as_deref(), Some("부산역"));
        assert_eq!(query.modes, vec![TransportMode::Train, TransportMode::Bus]);
    }

    #[test]
    fn test_transport_query_rejects_unknown_mode() {
        let params = TransportParams {
            modes: Some("ferry".to_string()),
            ..Default::default()
        };
        let err = transport_query(&catalog(), params).unwrap_err();
        assert_eq!(status_for(&err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_transport_query_unknown_city() {
        let params = TransportParams {
            from: Some("atlantis".to_string()),
            ..Default::default()
        };
        let err = transport_query(&catalog(), params).unwrap_err();
        assert_eq!(status_for(&err), StatusCode::NOT_FOUND);
    }
}
