//! Airport code type and the closed airport reference table.

use std::fmt;

/// Error returned when parsing an invalid IATA airport code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid airport code: {reason}")]
pub struct InvalidAirportCode {
    reason: &'static str,
}

/// A valid 3-letter IATA airport code.
///
/// Format-validated only; membership in the served-airport table is
/// checked separately with [`AirportCode::is_known`].
///
/// # Examples
///
/// ```
/// use flight_netex::domain::AirportCode;
///
/// let osl = AirportCode::parse("OSL").unwrap();
/// assert_eq!(osl.as_str(), "OSL");
/// assert_eq!(osl.short_name(), "Oslo");
///
/// assert!(AirportCode::parse("osl").is_err());
/// assert!(AirportCode::parse("OS").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AirportCode([u8; 3]);

impl AirportCode {
    /// Parse an airport code from a string.
    ///
    /// The input must be exactly 3 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidAirportCode> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidAirportCode {
                reason: "must be exactly 3 characters",
            });
        }

        if !bytes.iter().all(u8::is_ascii_uppercase) {
            return Err(InvalidAirportCode {
                reason: "must be uppercase ASCII letters A-Z",
            });
        }

        Ok(AirportCode([bytes[0], bytes[1], bytes[2]]))
    }

    /// Parse a code and require it to be in the served-airport table.
    pub fn known(s: &str) -> Result<Self, InvalidAirportCode> {
        let code = Self::parse(s)?;
        if code.is_known() {
            Ok(code)
        } else {
            Err(InvalidAirportCode {
                reason: "not a served airport",
            })
        }
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // SAFETY: We only store valid ASCII uppercase letters
        std::str::from_utf8(&self.0).unwrap()
    }

    /// Reference table entry for this airport, if it is served.
    pub fn info(&self) -> Option<&'static AirportInfo> {
        AIRPORTS
            .binary_search_by(|a| a.code.cmp(self.as_str()))
            .ok()
            .map(|i| &AIRPORTS[i])
    }

    /// Returns true if the airport is in the served-airport table.
    pub fn is_known(&self) -> bool {
        self.info().is_some()
    }

    /// Full airport name, falling back to the code.
    pub fn name(&self) -> &str {
        self.info().map(|a| a.name).unwrap_or(self.as_str())
    }

    /// Short passenger-facing name (usually the city), falling back to the code.
    pub fn short_name(&self) -> &str {
        self.info().map(|a| a.short_name).unwrap_or(self.as_str())
    }
}

impl fmt::Debug for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AirportCode({})", self.as_str())
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the served-airport table.
#[derive(Debug, PartialEq, Eq)]
pub struct AirportInfo {
    pub code: &'static str,
    pub name: &'static str,
    pub short_name: &'static str,
}

const fn airport(code: &'static str, name: &'static str, short_name: &'static str) -> AirportInfo {
    AirportInfo {
        code,
        name,
        short_name,
    }
}

/// Served airports, sorted by code.
static AIRPORTS: &[AirportInfo] = &[
    airport("AES", "Ålesund lufthavn, Vigra", "Ålesund"),
    airport("ALF", "Alta lufthavn", "Alta"),
    airport("ANX", "Andøya lufthavn, Andenes", "Andenes"),
    airport("BDU", "Bardufoss lufthavn", "Bardufoss"),
    airport("BGO", "Bergen lufthavn, Flesland", "Bergen"),
    airport("BJF", "Båtsfjord lufthavn", "Båtsfjord"),
    airport("BNN", "Brønnøysund lufthavn, Brønnøy", "Brønnøysund"),
    airport("BOO", "Bodø lufthavn", "Bodø"),
    airport("BVG", "Berlevåg lufthavn", "Berlevåg"),
    airport("EVE", "Harstad/Narvik lufthavn, Evenes", "Harstad/Narvik"),
    airport("FDE", "Førde lufthavn, Bringeland", "Førde"),
    airport("FRO", "Florø lufthavn", "Florø"),
    airport("HAA", "Hasvik lufthavn", "Hasvik"),
    airport("HAU", "Haugesund lufthavn, Karmøy", "Haugesund"),
    airport("HFT", "Hammerfest lufthavn", "Hammerfest"),
    airport("HOV", "Ørsta-Volda lufthavn, Hovden", "Ørsta-Volda"),
    airport("HVG", "Honningsvåg lufthavn, Valan", "Honningsvåg"),
    airport("KKN", "Kirkenes lufthavn, Høybuktmoen", "Kirkenes"),
    airport("KRS", "Kristiansand lufthavn, Kjevik", "Kristiansand"),
    airport("KSU", "Kristiansund lufthavn, Kvernberget", "Kristiansund"),
    airport("LKL", "Lakselv lufthavn, Banak", "Lakselv"),
    airport("LKN", "Leknes lufthavn", "Leknes"),
    airport("LYR", "Svalbard lufthavn, Longyear", "Longyearbyen"),
    airport("MEH", "Mehamn lufthavn", "Mehamn"),
    airport("MJF", "Mosjøen lufthavn, Kjærstad", "Mosjøen"),
    airport("MOL", "Molde lufthavn, Årø", "Molde"),
    airport("MQN", "Mo i Rana lufthavn, Røssvoll", "Mo i Rana"),
    airport("OSL", "Oslo lufthavn, Gardermoen", "Oslo"),
    airport("OSY", "Namsos lufthavn", "Namsos"),
    airport("RET", "Røst lufthavn", "Røst"),
    airport("RRS", "Røros lufthavn", "Røros"),
    airport("RVK", "Rørvik lufthavn, Ryum", "Rørvik"),
    airport("SDN", "Sandane lufthavn, Anda", "Sandane"),
    airport("SKN", "Stokmarknes lufthavn, Skagen", "Stokmarknes"),
    airport("SOG", "Sogndal lufthavn, Haukåsen", "Sogndal"),
    airport("SOJ", "Sørkjosen lufthavn", "Sørkjosen"),
    airport("SSJ", "Sandnessjøen lufthavn, Stokka", "Sandnessjøen"),
    airport("SVG", "Stavanger lufthavn, Sola", "Stavanger"),
    airport("SVJ", "Svolvær lufthavn, Helle", "Svolvær"),
    airport("TOS", "Tromsø lufthavn, Langnes", "Tromsø"),
    airport("TRD", "Trondheim lufthavn, Værnes", "Trondheim"),
    airport("TRF", "Sandefjord lufthavn, Torp", "Sandefjord"),
    airport("VAW", "Vardø lufthavn, Svartnes", "Vardø"),
    airport("VDB", "Fagernes lufthavn, Leirin", "Fagernes"),
    airport("VDS", "Vadsø lufthavn", "Vadsø"),
    airport("VRY", "Værøy helikopterhavn", "Værøy"),
];

/// All served airports in alphabetical code order.
pub fn known_airports() -> impl Iterator<Item = AirportCode> {
    AIRPORTS.iter().filter_map(|a| AirportCode::parse(a.code).ok())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn roundtrip(s in "[A-Z]{3}") {
            let code = AirportCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
        }

        #[test]
        fn lowercase_rejected(s in "[a-z]{3}") {
            prop_assert!(AirportCode::parse(&s).is_err());
        }

        #[test]
        fn wrong_length_rejected(s in "[A-Z]{0,2}|[A-Z]{4,10}") {
            prop_assert!(AirportCode::parse(&s).is_err());
        }
    }
}
