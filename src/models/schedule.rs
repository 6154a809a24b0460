//! Schedule entries produced by the planner

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::Location;

/// One entry of a generated itinerary.
///
/// Position in the surrounding sequence is the only relationship between
/// entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleItem {
    /// `yyyy-MM-dd`
    pub date: String,
    /// `HH:mm`
    pub time: String,
    pub place: String,
    pub activity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport: Option<String>,
    /// Estimated time the activity ends, `HH:mm`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eta: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl Display for ScheduleItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.time)?;
        if let Some(eta) = &self.eta {
            write!(f, "-{eta}")?;
        } else {
            write!(f, "      ")?;
        }
        write!(f, "  {} · {}", self.activity, self.place)?;
        if let Some(transport) = &self.transport {
            write!(f, " ({transport})")?;
        }
        if let Some(memo) = &self.memo {
            write!(f, "\n             {}", memo.trim())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_eta_and_memo() {
        let item = ScheduleItem {
            date: "2025-08-10".to_string(),
            time: "08:00".to_string(),
            place: "서울역".to_string(),
            activity: "출발".to_string(),
            transport: Some("기차 탑승".to_string()),
            eta: Some("10:30".to_string()),
            memo: Some("KTX 150분 소요".to_string()),
            location: None,
        };

        let rendered = item.to_string();
        assert!(rendered.starts_with("08:00-10:30  출발 · 서울역 (기차 탑승)"));
        assert!(rendered.contains("KTX 150분 소요"));
    }

    #[test]
    fn test_optional_fields_are_omitted_in_json() {
        let item = ScheduleItem {
            date: "2025-08-10".to_string(),
            time: "16:00".to_string(),
            place: "해운대 씨사이드 호텔".to_string(),
            activity: "숙소 체크인".to_string(),
            transport: None,
            eta: None,
            memo: None,
            location: None,
        };

        let value = serde_json::to_value(&item).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 4);
        assert!(!object.contains_key("eta"));
    }
}
