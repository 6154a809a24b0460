//! `tripplan` - Preference-driven day itinerary planning
//!
//! This library turns a chosen transport leg and a free-text description of
//! what the traveller likes into a timed first-day schedule, using a static
//! catalog of places and transport options.

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod planner;
pub mod preferences;
pub mod web;

// Re-export core types for public API
pub use catalog::{Catalog, TransportQuery};
pub use config::TripPlanConfig;
pub use error::TripPlanError;
pub use models::{
    Location, Place, PlaceCategory, ScheduleItem, Transport, TransportMode, TravelInput,
};
pub use planner::{generate_schedule, generate_schedule_with_keywords, group_schedule_by_date};
pub use preferences::{
    KeywordPreferenceAnalyzer, PreferenceAnalyzer, calculate_match_score, call_ai_preference,
    parse_preferences,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripPlanError>;
