//! Airline (IATA designator) code type and the closed airline table.

use std::fmt;

/// Error returned when parsing an invalid IATA airline designator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid airline code: {reason}")]
pub struct InvalidAirlineCode {
    reason: &'static str,
}

/// A valid 2-character IATA airline designator.
///
/// Designators are two uppercase letters or digits (e.g. "DY", "WF", "D8").
///
/// # Examples
///
/// ```
/// use flight_netex::domain::AirlineCode;
///
/// let wf = AirlineCode::parse("WF").unwrap();
/// assert_eq!(wf.as_str(), "WF");
/// assert_eq!(wf.name(), "Widerøe");
///
/// assert!(AirlineCode::parse("wf").is_err());
/// assert!(AirlineCode::parse("WFX").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AirlineCode([u8; 2]);

impl AirlineCode {
    /// Parse a designator from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidAirlineCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 2 {
            return Err(InvalidAirlineCode {
                reason: "must be exactly 2 characters",
            });
        }

        for &b in bytes {
            if !(b.is_ascii_uppercase() || b.is_ascii_digit()) {
                return Err(InvalidAirlineCode {
                    reason: "must be uppercase ASCII letters or digits",
                });
            }
        }

        Ok(AirlineCode([bytes[0], bytes[1]]))
    }

    /// Returns the designator as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store ASCII letters and digits
        std::str::from_utf8(&self.0).unwrap()
    }

    /// Reference table entry for this airline, if it is known.
    pub fn info(&self) -> Option<&'static AirlineInfo> {
        AIRLINES
            .binary_search_by(|a| a.code.cmp(self.as_str()))
            .ok()
            .map(|i| &AIRLINES[i])
    }

    /// Returns true if the airline is in the known-airline table.
    pub fn is_known(&self) -> bool {
        self.info().is_some()
    }

    /// Marketing name, falling back to the designator.
    pub fn name(&self) -> &str {
        self.info().map(|a| a.name).unwrap_or(self.as_str())
    }
}

impl fmt::Debug for AirlineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AirlineCode({})", self.as_str())
    }
}

impl fmt::Display for AirlineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the known-airline table.
#[derive(Debug, PartialEq, Eq)]
pub struct AirlineInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub legal_name: &'static str,
    pub url: &'static str,
    pub phone: Option<&'static str>,
}

/// Known airlines, sorted by designator.
static AIRLINES: &[AirlineInfo] = &[
    AirlineInfo {
        code: "D8",
        name: "Norwegian Air International",
        legal_name: "Norwegian Air International Ltd.",
        url: "https://www.norwegian.no",
        phone: None,
    },
    AirlineInfo {
        code: "DX",
        name: "Danish Air Transport",
        legal_name: "Danish Air Transport A/S",
        url: "https://www.dat.dk",
        phone: None,
    },
    AirlineInfo {
        code: "DY",
        name: "Norwegian",
        legal_name: "Norwegian Air Shuttle ASA",
        url: "https://www.norwegian.no",
        phone: Some("+47 21 49 00 15"),
    },
    AirlineInfo {
        code: "SK",
        name: "SAS",
        legal_name: "SAS Norge AS",
        url: "https://www.flysas.com",
        phone: Some("+47 21 89 64 00"),
    },
    AirlineInfo {
        code: "WF",
        name: "Widerøe",
        legal_name: "Widerøe's Flyveselskap AS",
        url: "https://www.wideroe.no",
        phone: Some("+47 75 11 11 11"),
    },
];

/// All known airlines in designator order.
pub fn known_airlines() -> impl Iterator<Item = AirlineCode> {
    AIRLINES.iter().filter_map(|a| AirlineCode::parse(a.code).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_designators() {
        assert!(AirlineCode::parse("DY").is_ok());
        assert!(AirlineCode::parse("WF").is_ok());
        assert!(AirlineCode::parse("D8").is_ok());
        assert!(AirlineCode::parse("3U").is_ok());
    }

    #[test]
    fn reject_invalid() {
        assert!(AirlineCode::parse("").is_err());
        assert!(AirlineCode::parse("D").is_err());
        assert!(AirlineCode::parse("DYX").is_err());
        assert!(AirlineCode::parse("dy").is_err());
        assert!(AirlineCode::parse("D-").is_err());
    }

    #[test]
    fn table_is_sorted_and_valid() {
        for pair in AIRLINES.windows(2) {
            assert!(pair[0].code < pair[1].code);
        }
        assert_eq!(known_airlines().count(), AIRLINES.len());
    }

    #[test]
    fn membership_and_names() {
        let dy = AirlineCode::parse("DY").unwrap();
        assert!(dy.is_known());
        assert_eq!(dy.name(), "Norwegian");

        let ba = AirlineCode::parse("BA").unwrap();
        assert!(!ba.is_known());
        assert_eq!(ba.name(), "BA");
    }

    #[test]
    fn display_and_debug() {
        let sk = AirlineCode::parse("SK").unwrap();
        assert_eq!(format!("{}", sk), "SK");
        assert_eq!(format!("{:?}", sk), "AirlineCode(SK)");
    }
}
