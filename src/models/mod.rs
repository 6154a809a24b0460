//! Data models for the tripplan application
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates and display names
//! - Transport: Bookable legs between two locations
//! - Place: Points of interest with preference tags
//! - Schedule: Entries of a generated itinerary
//! - Input: What the traveller asked for

pub mod input;
pub mod location;
pub mod place;
pub mod schedule;
pub mod transport;

// Re-export all public types for convenient access
pub use input::TravelInput;
pub use location::Location;
pub use place::{Place, PlaceCategory};
pub use schedule::ScheduleItem;
pub use transport::{Transport, TransportMode};
