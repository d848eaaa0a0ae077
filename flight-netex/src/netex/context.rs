//! Per-line conversion state.
//!
//! A [`ConversionContext`] is created for one line, fills its caches while
//! routes and service journeys are built, and is consumed by
//! [`ConversionContext::finish`]. Nothing is shared between lines, so lines
//! can be converted in parallel.
//!
//! Objects are inserted into the caches with their final ids, and
//! referenced objects are always created before their referrers: a journey
//! pattern exists before any service journey points at it, and a day type
//! exists before its assignment.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use tracing::warn;

use crate::domain::{AirportCode, Itinerary, Stopover};
use crate::schedule::{FlightRoute, LineDataSet};
use crate::stops::StopReferenceData;

use super::builder::{multilingual, require_stop};
use super::error::ConversionError;
use super::ids::{Codespace, DEFAULT_HASH_WIDTH, ElementType, sequential_suffixes, short_hash};
use super::model::{
    DayType, DayTypeAssignment, DestinationDisplay, JourneyPattern, PointOnRoute, Route,
    ServiceJourney, StopPointInJourneyPattern, TimetabledPassingTime, Via,
};

/// Objects collected while converting one line.
#[derive(Debug, Clone, Default)]
pub struct LineObjects {
    pub journey_patterns: Vec<JourneyPattern>,
    pub destination_displays: Vec<DestinationDisplay>,
    pub day_types: Vec<DayType>,
    pub day_type_assignments: Vec<DayTypeAssignment>,
}

/// Caches for one line conversion.
pub struct ConversionContext<'a> {
    codespace: &'a Codespace,
    stops: &'a StopReferenceData,
    time_zone: Tz,
    line: &'a LineDataSet,
    line_local_id: String,
    /// Route designation → pattern
    journey_patterns: BTreeMap<String, JourneyPattern>,
    day_types: BTreeMap<String, DayType>,
    day_type_assignments: BTreeMap<String, DayTypeAssignment>,
    destination_displays: BTreeMap<String, DestinationDisplay>,
    /// Hashed id → key it was hashed from
    hashed_ids: HashMap<String, String>,
}

impl<'a> ConversionContext<'a> {
    pub fn new(
        codespace: &'a Codespace,
        stops: &'a StopReferenceData,
        time_zone: Tz,
        line: &'a LineDataSet,
    ) -> Self {
        Self {
            codespace,
            stops,
            time_zone,
            line,
            line_local_id: line.local_id(),
            journey_patterns: BTreeMap::new(),
            day_types: BTreeMap::new(),
            day_type_assignments: BTreeMap::new(),
            destination_displays: BTreeMap::new(),
            hashed_ids: HashMap::new(),
        }
    }

    /// Record that `id` was derived from a hash of `key`, warning when a
    /// different key already produced the same id.
    fn note_hashed_id(&mut self, id: &str, key: &str) {
        match self.hashed_ids.get(id) {
            Some(previous) if previous != key => {
                warn!(
                    id,
                    key,
                    previous = previous.as_str(),
                    line = self.line_local_id.as_str(),
                    "identifier collision between distinct keys"
                );
            }
            Some(_) => {}
            None => {
                self.hashed_ids.insert(id.to_string(), key.to_string());
            }
        }
    }

    fn route_local_id(&mut self, route: &FlightRoute) -> String {
        let airline = self.line.airline;
        let local_id = route.local_id(airline);
        let id = self.codespace.id(ElementType::Route, &local_id);
        self.note_hashed_id(&id, &route.hash_key(airline));
        local_id
    }

    /// Build the route element. Fails if a stop has no route point.
    pub fn route(&mut self, route: &FlightRoute) -> Result<Route, ConversionError> {
        let local_id = self.route_local_id(route);
        let cs = self.codespace;
        let suffixes = sequential_suffixes(route.airports.len());

        let points_in_sequence = route
            .airports
            .iter()
            .zip(&suffixes)
            .enumerate()
            .map(|(k, (&airport, suffix))| {
                let stop = require_stop(self.stops, airport)?;
                Ok(PointOnRoute {
                    id: cs.id(ElementType::PointOnRoute, &format!("{}_{}", local_id, suffix)),
                    order: order(k),
                    route_point_ref: stop.route_point_id.clone(),
                })
            })
            .collect::<Result<Vec<_>, ConversionError>>()?;

        Ok(Route {
            id: cs.id(ElementType::Route, &local_id),
            name: multilingual(&route.route_name),
            short_name: multilingual(&route.route_designation),
            line_ref: cs.id(ElementType::Line, &self.line_local_id),
            points_in_sequence,
        })
    }

    /// Journey pattern id for a route, creating the pattern and its
    /// destination displays on first use.
    pub fn journey_pattern(&mut self, route: &FlightRoute) -> Result<String, ConversionError> {
        if let Some(pattern) = self.journey_patterns.get(&route.route_designation) {
            return Ok(pattern.id.clone());
        }

        let local_id = self.route_local_id(route);
        let cs = self.codespace;
        let stops = self.stops;
        let last = route.airports.len().saturating_sub(1);
        let suffixes = sequential_suffixes(route.airports.len());

        // Stops are resolved first; a failure leaves the caches untouched
        let stop_point_refs = route
            .airports
            .iter()
            .map(|&a| require_stop(stops, a).map(|s| s.scheduled_stop_point_id.clone()))
            .collect::<Result<Vec<_>, _>>()?;

        let display_id = self.pattern_display(route, &local_id);

        let points_in_sequence = stop_point_refs
            .into_iter()
            .zip(&suffixes)
            .enumerate()
            .map(|(k, (stop_point_ref, suffix))| StopPointInJourneyPattern {
                id: cs.id(
                    ElementType::StopPointInJourneyPattern,
                    &format!("{}_{}", local_id, suffix),
                ),
                order: order(k),
                scheduled_stop_point_ref: stop_point_ref,
                for_alighting: k > 0,
                for_boarding: k < last,
                destination_display_ref: (k == 0).then(|| display_id.clone()),
            })
            .collect();

        let pattern = JourneyPattern {
            id: cs.id(ElementType::JourneyPattern, &local_id),
            name: multilingual(&route.route_name),
            route_ref: cs.id(ElementType::Route, &local_id),
            points_in_sequence,
        };
        let id = pattern.id.clone();
        self.journey_patterns
            .insert(route.route_designation.clone(), pattern);
        Ok(id)
    }

    /// Display naming the destination, with a via for every intermediate stop.
    fn pattern_display(&mut self, route: &FlightRoute, route_local_id: &str) -> String {
        let id = self
            .codespace
            .id(ElementType::DestinationDisplay, route_local_id);
        if self.destination_displays.contains_key(&id) {
            return id;
        }

        let intermediate = match route.airports.as_slice() {
            [_, middle @ .., _] => middle,
            _ => &[],
        };
        let vias = intermediate
            .iter()
            .map(|&airport| Via {
                destination_display_ref: self.stop_display(airport),
            })
            .collect();

        let destination = route.airports.last().map_or("", |a| a.short_name());
        self.destination_displays.insert(
            id.clone(),
            DestinationDisplay {
                id: id.clone(),
                front_text: multilingual(destination),
                vias,
            },
        );
        id
    }

    /// Display for a single stop; at most one per stop on the line.
    fn stop_display(&mut self, airport: AirportCode) -> String {
        let local_id = format!("{}_{}", self.line_local_id, airport);
        let id = self.codespace.id(ElementType::DestinationDisplay, &local_id);
        self.destination_displays
            .entry(id.clone())
            .or_insert_with(|| DestinationDisplay {
                id: id.clone(),
                front_text: multilingual(airport.short_name()),
                vias: Vec::new(),
            });
        id
    }

    /// Day type local id for a stop-time pattern on a date, creating the day
    /// type on first use. The year is hashed since the suffix omits it.
    fn day_type(&mut self, stop_time_pattern: &str, date: NaiveDate) -> String {
        let key = format!("{}{}{}", self.line_local_id, stop_time_pattern, date.year());
        let local_id = format!(
            "{}-{}",
            short_hash(&key, DEFAULT_HASH_WIDTH),
            date.format("%b_%d")
        );
        let id = self.codespace.id(ElementType::DayType, &local_id);
        self.note_hashed_id(&id, &format!("{}@{}", key, date));

        self.day_types.entry(id.clone()).or_insert_with(|| DayType {
            id,
            name: multilingual(date.format("%Y-%m-%d").to_string()),
        });
        local_id
    }

    /// Assign a day type to its date. The first assignment for a day type
    /// keeps its order.
    fn assign_day_type(&mut self, day_type_local_id: &str, date: NaiveDate, order: u32) {
        let cs = self.codespace;
        let id = cs.id(ElementType::DayTypeAssignment, day_type_local_id);
        self.day_type_assignments
            .entry(id.clone())
            .or_insert_with(|| DayTypeAssignment {
                id,
                order,
                date,
                day_type_ref: cs.id(ElementType::DayType, day_type_local_id),
            });
    }

    /// Build the service journey for one itinerary on `route`.
    ///
    /// `order` is the itinerary's position within its flight's list of
    /// operating days, starting at 1.
    pub fn service_journey(
        &mut self,
        route: &FlightRoute,
        itinerary: &Itinerary,
        order: u32,
    ) -> Result<ServiceJourney, ConversionError> {
        if itinerary.route_designation() != route.route_designation {
            return Err(ConversionError::RouteMismatch {
                route: route.route_designation.clone(),
                itinerary: itinerary.route_designation(),
            });
        }

        let pattern_id = self.journey_pattern(route)?;
        let stop_point_ids: Vec<String> = self
            .journey_patterns
            .get(&route.route_designation)
            .map(|p| p.points_in_sequence.iter().map(|s| s.id.clone()).collect())
            .unwrap_or_default();

        let operating_date = itinerary.date_of_operation();
        let stopovers = itinerary.stopovers();
        let pattern = stop_time_pattern(&stopovers, self.time_zone);

        let day_type_local_id = self.day_type(&pattern, operating_date);
        self.assign_day_type(&day_type_local_id, operating_date, order);

        let cs = self.codespace;
        let key = format!(
            "{}{}{}",
            self.line_local_id,
            itinerary.flight_number(),
            pattern
        );
        let local_id = format!(
            "{}-{}",
            short_hash(&key, DEFAULT_HASH_WIDTH),
            operating_date.format("%Y%m%d")
        );
        let id = cs.id(ElementType::ServiceJourney, &local_id);
        self.note_hashed_id(&id, &format!("{}@{}", key, operating_date));

        let suffixes = sequential_suffixes(stopovers.len());
        let passing_times = stopovers
            .iter()
            .zip(stop_point_ids)
            .zip(&suffixes)
            .map(|((stopover, stop_point_ref), suffix)| {
                let arrival = stopover
                    .arrival
                    .map(|t| local_time(t, self.time_zone, operating_date));
                let departure = stopover
                    .departure
                    .map(|t| local_time(t, self.time_zone, operating_date));
                TimetabledPassingTime {
                    id: cs.id(
                        ElementType::TimetabledPassingTime,
                        &format!("{}_{}", local_id, suffix),
                    ),
                    stop_point_in_journey_pattern_ref: stop_point_ref,
                    arrival_time: arrival.map(|(t, _)| t),
                    arrival_day_offset: arrival.map_or(0, |(_, d)| d),
                    departure_time: departure.map(|(t, _)| t),
                    departure_day_offset: departure.map_or(0, |(_, d)| d),
                }
            })
            .collect();

        let (departure_time, _) =
            local_time(itinerary.first_departure(), self.time_zone, operating_date);
        let airline = self.line.airline;

        Ok(ServiceJourney {
            id,
            public_code: itinerary.flight_number().to_string(),
            departure_time,
            day_type_refs: vec![cs.id(ElementType::DayType, &day_type_local_id)],
            journey_pattern_ref: pattern_id,
            operator_ref: cs.id(ElementType::Operator, airline.as_str()),
            line_ref: cs.id(ElementType::Line, &self.line_local_id),
            passing_times,
        })
    }

    /// Consume the context, yielding every cached object.
    pub fn finish(self) -> LineObjects {
        let mut day_type_assignments: Vec<_> = self.day_type_assignments.into_values().collect();
        day_type_assignments.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

        LineObjects {
            journey_patterns: self.journey_patterns.into_values().collect(),
            destination_displays: self.destination_displays.into_values().collect(),
            day_types: self.day_types.into_values().collect(),
            day_type_assignments,
        }
    }
}

fn order(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}

/// Wall-clock time in `tz` and whole days after the operating date.
fn local_time(t: DateTime<Utc>, tz: Tz, operating_date: NaiveDate) -> (NaiveTime, i64) {
    let local = t.with_timezone(&tz);
    let offset = (local.date_naive() - operating_date).num_days();
    (local.time(), offset)
}

/// Airports with local arrival and departure times, e.g.
/// "OSL-0900|HOV0930-1000|SOG1030-".
fn stop_time_pattern(stopovers: &[Stopover], tz: Tz) -> String {
    let hhmm = |t: Option<DateTime<Utc>>| {
        t.map(|t| t.with_timezone(&tz).format("%H%M").to_string())
            .unwrap_or_default()
    };
    stopovers
        .iter()
        .map(|s| format!("{}{}-{}", s.airport, hhmm(s.arrival), hhmm(s.departure)))
        .collect::<Vec<_>>()
        .join("|")
}
