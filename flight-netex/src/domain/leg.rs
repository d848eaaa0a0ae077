//! Flight leg type.
//!
//! A `FlightLeg` is one physical takeoff-to-landing segment, assembled from
//! a matching departure/arrival event pair.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::{AirlineCode, AirportCode, FlightNumber, LegId};

/// One physical flight segment.
///
/// Produced only by the leg assembler, which guarantees the departure and
/// arrival airports differ and `std <= sta`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightLeg {
    pub id: LegId,
    pub departure_airport: AirportCode,
    pub arrival_airport: AirportCode,
    pub airline: AirlineCode,
    pub flight_number: FlightNumber,
    /// Scheduled time of departure.
    pub std: DateTime<Utc>,
    /// Scheduled time of arrival.
    pub sta: DateTime<Utc>,
    /// Local date of the departure.
    pub date_of_operation: NaiveDate,
}

impl FlightLeg {
    /// Scheduled block time.
    pub fn duration(&self) -> Duration {
        self.sta.signed_duration_since(self.std)
    }

    /// Returns true if `next` is flown under the same flight identity.
    pub fn same_flight_as(&self, next: &FlightLeg) -> bool {
        self.airline == next.airline && self.flight_number == next.flight_number
    }
}
