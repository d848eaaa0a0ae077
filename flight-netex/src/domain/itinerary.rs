//! Itinerary types.
//!
//! An `Itinerary` is the full multi-leg journey of one published flight
//! number on one date. A single-leg itinerary is a direct flight.

use chrono::{DateTime, NaiveDate, Utc};

use super::{AirlineCode, AirportCode, DomainError, FlightLeg, FlightNumber};

/// A call at an airport within an itinerary.
///
/// The origin has no arrival time, the final destination has no departure
/// time, and intermediate stopovers have both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stopover {
    pub airport: AirportCode,
    pub arrival: Option<DateTime<Utc>>,
    pub departure: Option<DateTime<Utc>>,
}

/// Ordered chain of connected legs flown under one flight number.
///
/// # Invariants
///
/// - At least one leg
/// - All legs share airline and flight number
/// - Each leg departs from the airport the previous leg arrived at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Itinerary {
    legs: Vec<FlightLeg>,
}

impl Itinerary {
    /// Build an itinerary from ordered legs, validating the chain.
    pub fn new(legs: Vec<FlightLeg>) -> Result<Self, DomainError> {
        let first = legs.first().ok_or(DomainError::EmptyItinerary)?;

        for pair in legs.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if !first.same_flight_as(next) {
                return Err(DomainError::InvalidItinerary(
                    "legs must share airline and flight number",
                ));
            }
            if prev.arrival_airport != next.departure_airport {
                return Err(DomainError::DisconnectedLegs(
                    prev.arrival_airport,
                    next.departure_airport,
                ));
            }
        }

        Ok(Self { legs })
    }

    /// Direct flight consisting of one leg.
    pub fn direct(leg: FlightLeg) -> Self {
        Self { legs: vec![leg] }
    }

    pub fn legs(&self) -> &[FlightLeg] {
        &self.legs
    }

    fn first_leg(&self) -> &FlightLeg {
        // Non-empty by construction
        &self.legs[0]
    }

    fn last_leg(&self) -> &FlightLeg {
        &self.legs[self.legs.len() - 1]
    }

    pub fn airline(&self) -> AirlineCode {
        self.first_leg().airline
    }

    pub fn flight_number(&self) -> &FlightNumber {
        &self.first_leg().flight_number
    }

    /// Operating date: local date of the first departure.
    pub fn date_of_operation(&self) -> NaiveDate {
        self.first_leg().date_of_operation
    }

    pub fn first_departure(&self) -> DateTime<Utc> {
        self.first_leg().std
    }

    pub fn origin(&self) -> AirportCode {
        self.first_leg().departure_airport
    }

    pub fn destination(&self) -> AirportCode {
        self.last_leg().arrival_airport
    }

    /// Returns true for a single-leg itinerary.
    pub fn is_direct(&self) -> bool {
        self.legs.len() == 1
    }

    /// Airports in calling order.
    pub fn airports(&self) -> Vec<AirportCode> {
        let mut airports = Vec::with_capacity(self.legs.len() + 1);
        airports.push(self.origin());
        airports.extend(self.legs.iter().map(|l| l.arrival_airport));
        airports
    }

    /// Dash-joined airport codes in calling order, e.g. "OSL-HOV-SOG".
    pub fn route_designation(&self) -> String {
        self.airports()
            .iter()
            .map(AirportCode::as_str)
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Convert the leg chain to an ordered stopover list.
    pub fn stopovers(&self) -> Vec<Stopover> {
        let mut stopovers = Vec::with_capacity(self.legs.len() + 1);
        let mut arrival = None;

        for leg in &self.legs {
            stopovers.push(Stopover {
                airport: leg.departure_airport,
                arrival,
                departure: Some(leg.std),
            });
            arrival = Some(leg.sta);
        }

        stopovers.push(Stopover {
            airport: self.destination(),
            arrival,
            departure: None,
        });

        stopovers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LegId;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, m, 0).unwrap()
    }

    fn leg(id: u64, from: &str, to: &str, dep: (u32, u32), arr: (u32, u32)) -> FlightLeg {
        FlightLeg {
            id: LegId(id),
            departure_airport: AirportCode::parse(from).unwrap(),
            arrival_airport: AirportCode::parse(to).unwrap(),
            airline: AirlineCode::parse("WF").unwrap(),
            flight_number: FlightNumber::parse("WF149").unwrap(),
            std: at(dep.0, dep.1),
            sta: at(arr.0, arr.1),
            date_of_operation: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[test]
    fn empty_rejected() {
        assert!(matches!(
            Itinerary::new(vec![]),
            Err(DomainError::EmptyItinerary)
        ));
    }

    #[test]
    fn disconnected_rejected() {
        let legs = vec![
            leg(1, "OSL", "HOV", (9, 0), (9, 30)),
            leg(2, "BGO", "SOG", (10, 0), (10, 30)),
        ];
        assert!(matches!(
            Itinerary::new(legs),
            Err(DomainError::DisconnectedLegs(_, _))
        ));
    }

    #[test]
    fn mixed_flight_numbers_rejected() {
        let mut second = leg(2, "HOV", "SOG", (10, 0), (10, 30));
        second.flight_number = FlightNumber::parse("WF150").unwrap();
        let legs = vec![leg(1, "OSL", "HOV", (9, 0), (9, 30)), second];
        assert!(matches!(
            Itinerary::new(legs),
            Err(DomainError::InvalidItinerary(_))
        ));
    }

    #[test]
    fn direct_flight_stopovers() {
        let it = Itinerary::direct(leg(1, "OSL", "BGO", (7, 0), (7, 50)));
        assert!(it.is_direct());
        assert_eq!(it.route_designation(), "OSL-BGO");

        let stops = it.stopovers();
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].arrival, None);
        assert_eq!(stops[0].departure, Some(at(7, 0)));
        assert_eq!(stops[1].arrival, Some(at(7, 50)));
        assert_eq!(stops[1].departure, None);
    }

    #[test]
    fn multi_stop_stopovers() {
        let it = Itinerary::new(vec![
            leg(1, "OSL", "HOV", (9, 0), (9, 30)),
            leg(2, "HOV", "SOG", (10, 0), (10, 30)),
        ])
        .unwrap();

        assert_eq!(it.route_designation(), "OSL-HOV-SOG");
        assert_eq!(it.origin().as_str(), "OSL");
        assert_eq!(it.destination().as_str(), "SOG");

        let stops = it.stopovers();
        assert_eq!(stops.len(), 3);
        assert_eq!(stops[0].airport.as_str(), "OSL");
        assert_eq!(stops[0].arrival, None);
        assert_eq!(stops[0].departure, Some(at(9, 0)));
        assert_eq!(stops[1].airport.as_str(), "HOV");
        assert_eq!(stops[1].arrival, Some(at(9, 30)));
        assert_eq!(stops[1].departure, Some(at(10, 0)));
        assert_eq!(stops[2].airport.as_str(), "SOG");
        assert_eq!(stops[2].arrival, Some(at(10, 30)));
        assert_eq!(stops[2].departure, None);
    }
}
