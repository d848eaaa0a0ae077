//! Itinerary chaining.
//!
//! Multi-stop flights are reported as independent legs. A leg continues
//! the previous one when it keeps the airline and flight number, departs
//! from the airport the previous leg landed at, has the next leg id, and
//! leaves within the layover ceiling. Chains are grown forwards and
//! backwards from a starting leg with an explicit worklist.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use super::config::ChainConfig;
use crate::domain::{AirportCode, FlightLeg, Itinerary, LegId};

/// Legs indexed by departure and arrival airport.
///
/// Each bucket is ordered by (scheduled departure, leg id) so the first
/// matching candidate is always the earliest.
#[derive(Debug, Default)]
pub struct LegIndex {
    by_departure: HashMap<AirportCode, Vec<FlightLeg>>,
    by_arrival: HashMap<AirportCode, Vec<FlightLeg>>,
}

impl LegIndex {
    pub fn new(legs: &[FlightLeg]) -> Self {
        let mut index = LegIndex::default();
        for leg in legs {
            index
                .by_departure
                .entry(leg.departure_airport)
                .or_default()
                .push(leg.clone());
            index
                .by_arrival
                .entry(leg.arrival_airport)
                .or_default()
                .push(leg.clone());
        }
        for bucket in index
            .by_departure
            .values_mut()
            .chain(index.by_arrival.values_mut())
        {
            bucket.sort_by_key(|l| (l.std, l.id));
        }
        index
    }

    /// Legs departing from an airport.
    pub fn departing_from(&self, airport: AirportCode) -> &[FlightLeg] {
        self.by_departure
            .get(&airport)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Legs arriving at an airport.
    pub fn arriving_at(&self, airport: AirportCode) -> &[FlightLeg] {
        self.by_arrival
            .get(&airport)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Ground time at the connecting airport is strictly positive and below the ceiling.
pub fn layover_within_limit(prev: &FlightLeg, next: &FlightLeg, config: &ChainConfig) -> bool {
    let layover = next.std.signed_duration_since(prev.sta);
    layover > chrono::Duration::zero() && layover < config.max_layover()
}

/// Does `next` continue the flight flown by `prev`?
pub fn connects(prev: &FlightLeg, next: &FlightLeg, config: &ChainConfig) -> bool {
    prev.arrival_airport == next.departure_airport
        && prev.same_flight_as(next)
        && prev.id.is_adjacent_to(next.id)
        && layover_within_limit(prev, next, config)
}

/// Grow the chain containing `leg` in both directions.
///
/// Every leg added (including `leg`) is recorded in `visited`, and legs
/// already visited are never picked up again. Returns the legs in flying
/// order; a leg without connections comes back alone.
pub fn chain(
    leg: &FlightLeg,
    index: &LegIndex,
    visited: &mut HashSet<LegId>,
    config: &ChainConfig,
) -> Vec<FlightLeg> {
    visited.insert(leg.id);

    let mut backward = Vec::new();
    let mut current = leg;
    while let Some(prev) = index
        .arriving_at(current.departure_airport)
        .iter()
        .find(|c| !visited.contains(&c.id) && connects(c, current, config))
    {
        visited.insert(prev.id);
        backward.push(prev.clone());
        current = prev;
    }

    let mut forward = Vec::new();
    let mut current = leg;
    while let Some(next) = index
        .departing_from(current.arrival_airport)
        .iter()
        .find(|c| !visited.contains(&c.id) && connects(current, c, config))
    {
        visited.insert(next.id);
        forward.push(next.clone());
        current = next;
    }

    backward.reverse();
    backward.push(leg.clone());
    backward.extend(forward);
    backward
}

/// Chain every leg into itineraries.
///
/// Starting legs are taken in (scheduled departure, id) order; a leg that
/// already belongs to an earlier chain is skipped. Output is ordered by
/// first departure, then flight number.
pub fn chain_all(legs: &[FlightLeg], config: &ChainConfig) -> Vec<Itinerary> {
    let index = LegIndex::new(legs);
    let mut visited = HashSet::new();

    let mut ordered: Vec<&FlightLeg> = legs.iter().collect();
    ordered.sort_by_key(|l| (l.std, l.id));

    let mut itineraries = Vec::new();
    for leg in ordered {
        if visited.contains(&leg.id) {
            continue;
        }

        let legs = chain(leg, &index, &mut visited, config);
        if legs.len() > 1 {
            debug!(
                flight = %leg.flight_number,
                legs = legs.len(),
                "chained multi-stop itinerary"
            );
        }

        match Itinerary::new(legs.clone()) {
            Ok(itinerary) => itineraries.push(itinerary),
            Err(e) => {
                warn!(flight = %leg.flight_number, error = %e, "splitting invalid chain");
                itineraries.extend(legs.into_iter().map(Itinerary::direct));
            }
        }
    }

    itineraries.sort_by(|a, b| {
        (a.first_departure(), a.flight_number()).cmp(&(b.first_departure(), b.flight_number()))
    });
    itineraries
}
