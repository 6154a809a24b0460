//! Itinerary generation
//!
//! Builds a first-day schedule from the chosen transport leg and the places
//! that best match the traveller's preferences: departure, arrival, an
//! optional lunch, up to three sights or cafes, an optional dinner and the
//! hotel check-in. All times are fixed offsets from the arrival time.

use std::ops::Range;

use chrono::{Duration, NaiveDateTime, Timelike};
use indexmap::IndexMap;
use tracing::{debug, instrument, warn};

use crate::models::{Place, PlaceCategory, ScheduleItem, Transport, TravelInput};
use crate::preferences::{calculate_match_score, parse_preferences};

/// Places must score strictly above this to be recommended
pub const MIN_MATCH_SCORE: f64 = 0.2;
pub const MAX_RECOMMENDATIONS: usize = 5;
pub const MAX_SIGHTSEEING_STOPS: usize = 3;

const LUNCH_ARRIVAL_HOURS: Range<u32> = 11..14;
const DINNER_EARLIEST_HOUR: u32 = 17;

const LUNCH_DELAY_MINUTES: i64 = 30;
const LUNCH_MINUTES: i64 = 60;
const AFTER_LUNCH_MINUTES: i64 = 90;
const TRAVEL_MINUTES: i64 = 20;
const VISIT_MINUTES: i64 = 60;
const DINNER_MINUTES: i64 = 90;
const AFTER_DINNER_MINUTES: i64 = 120;
const CHECK_IN_DELAY_MINUTES: i64 = 30;

/// A candidate place with its preference score
#[derive(Debug, Clone, Copy)]
pub struct RankedPlace<'a> {
    pub place: &'a Place,
    pub score: f64,
}

/// Score, filter and order candidate places.
///
/// Keeps places scoring above [`MIN_MATCH_SCORE`], best first, at most
/// [`MAX_RECOMMENDATIONS`]. Equal scores keep their catalog order.
#[must_use]
pub fn rank_places<'a>(places: &'a [Place], keywords: &[String]) -> Vec<RankedPlace<'a>> {
    let mut ranked: Vec<RankedPlace<'a>> = places
        .iter()
        .map(|place| RankedPlace {
            place,
            score: calculate_match_score(&place.tags, keywords),
        })
        .filter(|ranked| ranked.score > MIN_MATCH_SCORE)
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked.truncate(MAX_RECOMMENDATIONS);
    ranked
}

/// Generate the itinerary, extracting keywords from `input.preferences`.
#[instrument(skip_all, fields(transport = %transport.id, candidates = places.len()))]
#[must_use]
pub fn generate_schedule(
    input: &TravelInput,
    transport: &Transport,
    places: &[Place],
) -> Vec<ScheduleItem> {
    let keywords = parse_preferences(&input.preferences);
    generate_schedule_with_keywords(input, transport, places, &keywords)
}

/// Generate the itinerary from keywords the caller already extracted.
#[must_use]
pub fn generate_schedule_with_keywords(
    input: &TravelInput,
    transport: &Transport,
    places: &[Place],
    keywords: &[String],
) -> Vec<ScheduleItem> {
    debug!(
        "Planning {} → {} with keywords {:?}",
        input.departure.name, input.arrival.name, keywords
    );
    if !transport.is_duration_consistent() {
        warn!(
            "Transport {} advertises {} minutes but is scheduled for {}",
            transport.id,
            transport.duration,
            transport.scheduled_minutes()
        );
    }

    let mut schedule = Vec::new();

    schedule.push(ScheduleItem {
        date: format_date(transport.departure_time),
        time: format_time(transport.departure_time),
        place: transport.departure.name.clone(),
        activity: "출발".to_string(),
        transport: Some(format!("{} 탑승", transport.mode.display_name())),
        eta: Some(format_time(transport.arrival_time)),
        memo: Some(format!(
            "{} {}분 소요",
            transport.company.as_deref().unwrap_or(""),
            transport.duration
        )),
        location: Some(transport.departure.clone()),
    });

    let arrival = transport.arrival_time;
    schedule.push(ScheduleItem {
        date: format_date(arrival),
        time: format_time(arrival),
        place: transport.arrival.name.clone(),
        activity: "도착".to_string(),
        transport: None,
        eta: None,
        memo: Some("여행 시작!".to_string()),
        location: Some(transport.arrival.clone()),
    });

    let recommended = rank_places(places, keywords);
    debug!("{} places recommended", recommended.len());

    let first_restaurant = recommended
        .iter()
        .find(|ranked| ranked.place.category == PlaceCategory::Restaurant);

    let mut clock = arrival;

    if LUNCH_ARRIVAL_HOURS.contains(&arrival.hour()) {
        if let Some(restaurant) = first_restaurant {
            clock += Duration::minutes(LUNCH_DELAY_MINUTES);
            schedule.push(visit(
                clock,
                restaurant.place,
                "점심 식사",
                LUNCH_MINUTES,
                restaurant.place.tag_line(),
            ));
            clock += Duration::minutes(AFTER_LUNCH_MINUTES);
        } else {
            debug!("Arrived at lunch time but no restaurant was recommended");
        }
    }

    for ranked in recommended
        .iter()
        .filter(|ranked| ranked.place.category.is_sightseeing())
        .take(MAX_SIGHTSEEING_STOPS)
    {
        clock += Duration::minutes(TRAVEL_MINUTES);

        let activity = if ranked.place.category == PlaceCategory::Cafe {
            "카페 방문"
        } else {
            "관광"
        };
        let memo = format!(
            "추천도: {}% - {}",
            (ranked.score * 100.0).round(),
            ranked.place.tag_line()
        );
        schedule.push(visit(clock, ranked.place, activity, VISIT_MINUTES, memo));

        clock += Duration::minutes(VISIT_MINUTES + TRAVEL_MINUTES);
    }

    // the lunch restaurant may be suggested again
    if let Some(restaurant) = first_restaurant {
        if clock.hour() >= DINNER_EARLIEST_HOUR {
            schedule.push(visit(
                clock,
                restaurant.place,
                "저녁 식사",
                DINNER_MINUTES,
                restaurant.place.tag_line(),
            ));
            clock += Duration::minutes(AFTER_DINNER_MINUTES);
        }
    }

    // hotels are picked from all candidates, not only recommended ones
    if let Some(hotel) = places
        .iter()
        .find(|place| place.category == PlaceCategory::Hotel)
    {
        clock += Duration::minutes(CHECK_IN_DELAY_MINUTES);
        schedule.push(ScheduleItem {
            date: format_date(clock),
            time: format_time(clock),
            place: hotel.name.clone(),
            activity: "숙소 체크인".to_string(),
            transport: None,
            eta: None,
            memo: Some("휴식 시간".to_string()),
            location: Some(hotel.location.clone()),
        });
    }

    schedule
}

/// Group a schedule by date, keeping first-seen date order and the order
/// of entries within each date.
#[must_use]
pub fn group_schedule_by_date(schedule: &[ScheduleItem]) -> IndexMap<String, Vec<ScheduleItem>> {
    let mut grouped: IndexMap<String, Vec<ScheduleItem>> = IndexMap::new();
    for item in schedule {
        grouped
            .entry(item.date.clone())
            .or_default()
            .push(item.clone());
    }
    grouped
}

fn visit(
    at: NaiveDateTime,
    place: &Place,
    activity: &str,
    minutes: i64,
    memo: String,
) -> ScheduleItem {
    ScheduleItem {
        date: format_date(at),
        time: format_time(at),
        place: place.name.clone(),
        activity: activity.to_string(),
        transport: None,
        eta: Some(format_time(at + Duration::minutes(minutes))),
        memo: Some(memo),
        location: Some(place.location.clone()),
    }
}

fn format_date(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%d").to_string()
}

fn format_time(at: NaiveDateTime) -> String {
    at.format("%H:%M").to_string()
}
