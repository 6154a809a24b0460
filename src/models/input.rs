//! User input for one planning request

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{Location, Transport, TransportMode};
use crate::{Result, TripPlanError};

/// What the traveller asked for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelInput {
    pub departure: Location,
    pub arrival: Location,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Preferred departure time, `HH:mm`
    pub departure_time: String,
    pub transport_types: Vec<TransportMode>,
    /// Upper bound in KRW
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<u32>,
    /// Free text, e.g. "카페 많이 가고 싶고, 사람 많은 곳은 싫어"
    #[serde(default)]
    pub preferences: String,
}

impl TravelInput {
    /// Build a single-day input around an already chosen transport leg
    #[must_use]
    pub fn for_transport(transport: &Transport, preferences: impl Into<String>) -> Self {
        let date = transport.departure_time.date();
        Self {
            departure: transport.departure.clone(),
            arrival: transport.arrival.clone(),
            start_date: date,
            end_date: date,
            departure_time: transport.departure_time.format("%H:%M").to_string(),
            transport_types: vec![transport.mode],
            budget: None,
            preferences: preferences.into(),
        }
    }

    /// Check the fields the planner itself never looks at
    pub fn validate(&self) -> Result<()> {
        if self.end_date < self.start_date {
            return Err(TripPlanError::validation(format!(
                "End date {} is before start date {}",
                self.end_date, self.start_date
            )));
        }

        NaiveTime::parse_from_str(&self.departure_time, "%H:%M").map_err(|_| {
            TripPlanError::validation(format!(
                "Departure time '{}' must be in HH:mm format",
                self.departure_time
            ))
        })?;

        if self.budget == Some(0) {
            return Err(TripPlanError::validation("Budget must be positive"));
        }

        Ok(())
    }
}
