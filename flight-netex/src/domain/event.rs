//! Typed flight events, one per reported departure or arrival.

use chrono::{DateTime, NaiveDate, Utc};

use super::{AirlineCode, AirportCode, FlightNumber, LegId};

/// Whether an event reports a departure or an arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Departure,
    Arrival,
}

impl EventType {
    /// Parse the feed's single-letter direction code ("D" or "A").
    pub fn from_feed_code(code: &str) -> Option<Self> {
        match code.trim() {
            "D" => Some(EventType::Departure),
            "A" => Some(EventType::Arrival),
            _ => None,
        }
    }
}

/// One scheduled departure or arrival of a leg at an airport.
///
/// Two events are expected per physical leg, sharing `leg_id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightEvent {
    pub leg_id: LegId,
    pub flight_number: FlightNumber,
    pub airline: AirlineCode,
    /// Airport where the event happens.
    pub airport: AirportCode,
    pub event_type: EventType,
    pub scheduled_time: DateTime<Utc>,
    /// Local calendar date of the scheduled time.
    pub date_of_operation: NaiveDate,
}
