//! Document conversion error types.

use crate::domain::AirportCode;

/// Errors that fail one line or one common-data conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// A stop on the line has no scheduled stop point or route point
    #[error("missing stop reference data for airport {airport}")]
    MissingReferenceData { airport: AirportCode },

    /// An itinerary was filed under a route with a different stop sequence
    #[error("itinerary {itinerary} does not follow route {route}")]
    RouteMismatch { route: String, itinerary: String },

    /// The line produced no service journeys
    #[error("line {0} has no service journeys")]
    EmptyLine(String),

    /// Common data needs at least one stop
    #[error("no stop reference data available")]
    NoStopReferenceData,

    /// The worker converting the line stopped before producing a result
    #[error("conversion aborted: {0}")]
    Aborted(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_reference_names_airport() {
        let err = ConversionError::MissingReferenceData {
            airport: AirportCode::parse("HOV").unwrap(),
        };
        assert_eq!(err.to_string(), "missing stop reference data for airport HOV");
    }
}
