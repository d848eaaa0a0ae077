//! Conversion from raw feed records to typed flight events.
//!
//! Records are filtered against the closed airport and airline tables.
//! Anything that fails to parse or falls outside the tables is dropped on
//! its own; one bad row never fails the batch.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::domain::{AirlineCode, AirportCode, EventType, FlightEvent, FlightNumber, LegId};

use super::types::RawFlightRecord;

/// IATA service type for a scheduled passenger flight.
pub const SCHEDULED_PASSENGER: &str = "J";

/// Normalize raw records into flight events.
///
/// `tz` determines each event's local date of operation.
pub fn normalize(records: &[RawFlightRecord], tz: Tz) -> Vec<FlightEvent> {
    records
        .iter()
        .filter_map(|record| normalize_record(record, tz))
        .collect()
}

/// Normalize one record, or `None` if it should be excluded.
pub fn normalize_record(record: &RawFlightRecord, tz: Tz) -> Option<FlightEvent> {
    if record.service_type.as_deref().map(str::trim) != Some(SCHEDULED_PASSENGER) {
        return None;
    }

    let airport = AirportCode::known(record.queried_airport.trim()).ok()?;
    let remote = AirportCode::known(record.airport.trim()).ok()?;
    if airport == remote {
        return None;
    }

    let airline = AirlineCode::parse(record.airline.trim())
        .ok()
        .filter(AirlineCode::is_known)?;
    let flight_number = FlightNumber::parse(&record.flight_id).ok()?;
    let event_type = EventType::from_feed_code(&record.arr_dep)?;
    let leg_id = LegId::parse(&record.unique_id)?;
    let scheduled_time = parse_schedule_time(&record.schedule_time)?;

    Some(FlightEvent {
        leg_id,
        flight_number,
        airline,
        airport,
        event_type,
        scheduled_time,
        date_of_operation: scheduled_time.with_timezone(&tz).date_naive(),
    })
}

/// Parse an RFC 3339 timestamp into UTC.
pub(crate) fn parse_schedule_time(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc))
}
