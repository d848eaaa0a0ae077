//! Leg assembly from departure/arrival event pairs.
//!
//! Each physical leg should be reported exactly twice. Groups that don't
//! look like one departure followed by one arrival are rejected one by one;
//! the usual cause is a leg straddling the edge of the feed window.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::domain::{AirportCode, EventType, FlightEvent, FlightLeg, LegId};

/// Why an event group could not be turned into a leg.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedEventGroup {
    /// Only one of the two events is inside the feed window
    #[error("only one event reported (truncated at window boundary)")]
    SingleEvent,

    #[error("{0} events reported for one leg")]
    TooManyEvents(usize),

    #[error("both events are of type {0:?}")]
    DuplicateEventType(EventType),

    #[error("earliest event is not a departure")]
    NotStartingWithDeparture,

    #[error("departure and arrival airport are both {0}")]
    SameAirport(AirportCode),

    #[error("airline or flight number differs between departure and arrival")]
    MismatchedFlight,
}

/// Legs assembled from a batch plus the groups that were dropped.
#[derive(Debug, Clone, Default)]
pub struct AssembleOutcome {
    /// Assembled legs, ordered by leg id.
    pub legs: Vec<FlightLeg>,
    pub rejected: Vec<(LegId, MalformedEventGroup)>,
}

/// Assemble events into legs, logging and dropping malformed groups.
pub fn assemble(events: &[FlightEvent]) -> Vec<FlightLeg> {
    let outcome = assemble_with_rejections(events);

    for (leg_id, reason) in &outcome.rejected {
        match reason {
            MalformedEventGroup::SingleEvent => {
                debug!(leg_id = %leg_id, %reason, "dropping event group")
            }
            _ => warn!(leg_id = %leg_id, %reason, "dropping event group"),
        }
    }

    outcome.legs
}

/// Assemble events into legs, returning the rejected groups alongside.
pub fn assemble_with_rejections(events: &[FlightEvent]) -> AssembleOutcome {
    let mut groups: BTreeMap<LegId, Vec<&FlightEvent>> = BTreeMap::new();
    for event in events {
        groups.entry(event.leg_id).or_default().push(event);
    }

    let mut outcome = AssembleOutcome::default();
    for (leg_id, mut group) in groups {
        match assemble_group(&mut group) {
            Ok(leg) => outcome.legs.push(leg),
            Err(reason) => outcome.rejected.push((leg_id, reason)),
        }
    }
    outcome
}

/// Validate one leg-id group and build its leg.
///
/// Sorts the group by scheduled time (stable) before validating.
pub fn assemble_group(group: &mut [&FlightEvent]) -> Result<FlightLeg, MalformedEventGroup> {
    match group.len() {
        1 => return Err(MalformedEventGroup::SingleEvent),
        2 => {}
        n => return Err(MalformedEventGroup::TooManyEvents(n)),
    }

    group.sort_by_key(|e| e.scheduled_time);
    let (departure, arrival) = (group[0], group[1]);

    if departure.event_type == arrival.event_type {
        return Err(MalformedEventGroup::DuplicateEventType(departure.event_type));
    }
    if departure.event_type != EventType::Departure {
        return Err(MalformedEventGroup::NotStartingWithDeparture);
    }
    if departure.airport == arrival.airport {
        return Err(MalformedEventGroup::SameAirport(departure.airport));
    }
    if departure.airline != arrival.airline || departure.flight_number != arrival.flight_number {
        return Err(MalformedEventGroup::MismatchedFlight);
    }

    Ok(FlightLeg {
        id: departure.leg_id,
        departure_airport: departure.airport,
        arrival_airport: arrival.airport,
        airline: departure.airline,
        flight_number: departure.flight_number.clone(),
        std: departure.scheduled_time,
        sta: arrival.scheduled_time,
        date_of_operation: departure.date_of_operation,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{AirlineCode, FlightNumber};
    use chrono::{Duration, NaiveDate, TimeZone, Utc};
    use proptest::prelude::*;

    const AIRPORTS: &[&str] = &["OSL", "BGO", "TRD", "SVG", "TOS"];

    fn arb_event() -> impl Strategy<Value = FlightEvent> {
        (
            0u64..20,
            any::<bool>(),
            0usize..AIRPORTS.len(),
            0i64..600,
            prop_oneof![Just("DY123"), Just("DY124")],
        )
            .prop_map(|(id, dep, airport, mins, flight)| FlightEvent {
                leg_id: LegId(id),
                flight_number: FlightNumber::parse(flight).unwrap(),
                airline: AirlineCode::parse("DY").unwrap(),
                airport: AirportCode::parse(AIRPORTS[airport]).unwrap(),
                event_type: if dep { EventType::Departure } else { EventType::Arrival },
                scheduled_time: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
                    + Duration::minutes(mins),
                date_of_operation: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            })
    }

    proptest! {
        /// Running the assembler twice gives identical legs
        #[test]
        fn idempotent(events in proptest::collection::vec(arb_event(), 0..40)) {
            let first = assemble(&events);
            let second = assemble(&events);
            prop_assert_eq!(first, second);
        }

        /// A valid pair always yields exactly one leg with unchanged airports and times
        #[test]
        fn valid_pair_yields_leg(
            from in 0usize..AIRPORTS.len(),
            offset in 1usize..AIRPORTS.len(),
            dep_mins in 0i64..1000,
            block in 1i64..300,
        ) {
            let to = (from + offset) % AIRPORTS.len();
            let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            let make = |kind, airport: &str, t| FlightEvent {
                leg_id: LegId(7),
                flight_number: FlightNumber::parse("DY123").unwrap(),
                airline: AirlineCode::parse("DY").unwrap(),
                airport: AirportCode::parse(airport).unwrap(),
                event_type: kind,
                scheduled_time: t,
                date_of_operation: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            };
            let std = base + Duration::minutes(dep_mins);
            let sta = std + Duration::minutes(block);
            let events = vec![
                make(EventType::Arrival, AIRPORTS[to], sta),
                make(EventType::Departure, AIRPORTS[from], std),
            ];

            let legs = assemble(&events);
            prop_assert_eq!(legs.len(), 1);
            prop_assert_eq!(legs[0].departure_airport.as_str(), AIRPORTS[from]);
            prop_assert_eq!(legs[0].arrival_airport.as_str(), AIRPORTS[to]);
            prop_assert_eq!(legs[0].std, std);
            prop_assert_eq!(legs[0].sta, sta);
        }
    }
}
