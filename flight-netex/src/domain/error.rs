//! Domain error types.
//!
//! These errors represent validation failures and data inconsistencies
//! in the domain layer. They are distinct from feed and I/O errors.

use super::AirportCode;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// Itinerary has no legs
    #[error("itinerary must have at least one leg")]
    EmptyItinerary,

    /// Consecutive legs don't meet at the same airport
    #[error("legs do not connect: arrival at {0}, next departure from {1}")]
    DisconnectedLegs(AirportCode, AirportCode),

    /// Invalid itinerary construction
    #[error("invalid itinerary: {0}")]
    InvalidItinerary(&'static str),
}
