//! Transport legs between two locations

use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Location;
use crate::TripPlanError;

/// Kind of vehicle used for a transport leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Flight,
    Train,
    Bus,
}

impl TransportMode {
    /// Localized display name
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            TransportMode::Flight => "항공",
            TransportMode::Train => "기차",
            TransportMode::Bus => "버스",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TransportMode::Flight => "flight",
            TransportMode::Train => "train",
            TransportMode::Bus => "bus",
        }
    }
}

impl Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = TripPlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flight" => Ok(TransportMode::Flight),
            "train" => Ok(TransportMode::Train),
            "bus" => Ok(TransportMode::Bus),
            other => Err(TripPlanError::validation(format!(
                "Unknown transport mode '{other}'. Must be one of: flight, train, bus"
            ))),
        }
    }
}

/// A single bookable transport leg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transport {
    pub id: String,
    pub mode: TransportMode,
    /// Local departure time, no offset
    pub departure_time: NaiveDateTime,
    /// Local arrival time, no offset
    pub arrival_time: NaiveDateTime,
    /// Travel time in minutes as advertised by the operator
    pub duration: u32,
    /// Price in KRW
    pub price: u32,
    pub departure: Location,
    pub arrival: Location,
    /// Whether this is a released cancellation seat
    pub is_cancellable: bool,
    /// Operator name (airline, rail or bus company)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl Transport {
    /// Minutes between departure and arrival timestamps
    #[must_use]
    pub fn scheduled_minutes(&self) -> i64 {
        (self.arrival_time - self.departure_time).num_minutes()
    }

    /// Whether the advertised duration matches the timestamps.
    ///
    /// Both are supplied independently by the data source; nothing enforces
    /// that they agree.
    #[must_use]
    pub fn is_duration_consistent(&self) -> bool {
        self.scheduled_minutes() == i64::from(self.duration)
    }
}

impl Display for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} {} → {} {}  {} ({}분, {}원)",
            self.id,
            self.departure.name,
            self.departure_time.format("%m-%d %H:%M"),
            self.arrival.name,
            self.arrival_time.format("%H:%M"),
            self.company.as_deref().unwrap_or(self.mode.display_name()),
            self.duration,
            self.price
        )?;
        if self.is_cancellable {
            write!(f, " 취소표")?;
        }
        Ok(())
    }
}
