//! Domain types for the flight timetable converter.
//!
//! This module contains the core domain model types that represent
//! validated flight data. Code types enforce their format at construction
//! time; membership in the closed airport and airline tables is checked
//! explicitly with `is_known`.

mod airline;
mod airport;
mod error;
mod event;
mod flight;
mod itinerary;
mod leg;

pub use airline::{AirlineCode, AirlineInfo, InvalidAirlineCode, known_airlines};
pub use airport::{AirportCode, AirportInfo, InvalidAirportCode, known_airports};
pub use error::DomainError;
pub use event::{EventType, FlightEvent};
pub use flight::{FlightNumber, InvalidFlightNumber, LegId};
pub use itinerary::{Itinerary, Stopover};
pub use leg::FlightLeg;
