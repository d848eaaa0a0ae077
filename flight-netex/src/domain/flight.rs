//! Flight identity types: published flight number and feed leg id.

use std::fmt;

/// Error returned when parsing an invalid flight number.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid flight number: {reason}")]
pub struct InvalidFlightNumber {
    reason: &'static str,
}

/// A published flight number, including the airline prefix (e.g. "WF149").
///
/// # Examples
///
/// ```
/// use flight_netex::domain::FlightNumber;
///
/// let f = FlightNumber::parse("DY123").unwrap();
/// assert_eq!(f.as_str(), "DY123");
///
/// assert!(FlightNumber::parse("").is_err());
/// assert!(FlightNumber::parse("dy123").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlightNumber(String);

impl FlightNumber {
    /// Longest flight number accepted from the feed.
    const MAX_LEN: usize = 8;

    /// Parse a flight number.
    ///
    /// Must be 3 to 8 uppercase ASCII letters or digits.
    pub fn parse(s: &str) -> Result<Self, InvalidFlightNumber> {
        let s = s.trim();

        if s.len() < 3 || s.len() > Self::MAX_LEN {
            return Err(InvalidFlightNumber {
                reason: "must be 3 to 8 characters",
            });
        }

        if !s
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return Err(InvalidFlightNumber {
                reason: "must be uppercase ASCII letters or digits",
            });
        }

        Ok(FlightNumber(s.to_string()))
    }

    /// Returns the flight number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for FlightNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FlightNumber({})", self.0)
    }
}

impl fmt::Display for FlightNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Feed-assigned identifier of one physical leg.
///
/// The feed numbers consecutive legs of a multi-stop flight with
/// consecutive ids, which the itinerary chainer relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LegId(pub u64);

impl LegId {
    /// Parse a leg id from its decimal feed representation.
    pub fn parse(s: &str) -> Option<Self> {
        s.trim().parse().ok().map(LegId)
    }

    /// Returns true if the ids differ by exactly one.
    pub fn is_adjacent_to(&self, other: LegId) -> bool {
        self.0.abs_diff(other.0) == 1
    }
}

impl fmt::Display for LegId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_flight_numbers() {
        assert!(FlightNumber::parse("DY123").is_ok());
        assert!(FlightNumber::parse("WF149").is_ok());
        assert!(FlightNumber::parse("D81234").is_ok());
        assert!(FlightNumber::parse("SK4035A").is_ok());
    }

    #[test]
    fn flight_number_trims_whitespace() {
        assert_eq!(FlightNumber::parse(" DY123 ").unwrap().as_str(), "DY123");
    }

    #[test]
    fn reject_invalid_flight_numbers() {
        assert!(FlightNumber::parse("").is_err());
        assert!(FlightNumber::parse("DY").is_err());
        assert!(FlightNumber::parse("DY1234567").is_err());
        assert!(FlightNumber::parse("dy123").is_err());
        assert!(FlightNumber::parse("DY-123").is_err());
    }

    #[test]
    fn leg_id_parse() {
        assert_eq!(LegId::parse("100"), Some(LegId(100)));
        assert_eq!(LegId::parse(" 7 "), Some(LegId(7)));
        assert_eq!(LegId::parse("abc"), None);
        assert_eq!(LegId::parse("-1"), None);
    }

    #[test]
    fn leg_id_adjacency() {
        assert!(LegId(1).is_adjacent_to(LegId(2)));
        assert!(LegId(2).is_adjacent_to(LegId(1)));
        assert!(!LegId(1).is_adjacent_to(LegId(1)));
        assert!(!LegId(1).is_adjacent_to(LegId(3)));
        assert!(!LegId(0).is_adjacent_to(LegId(u64::MAX)));
    }
}
