//! Document-level settings.

use std::collections::BTreeSet;

use chrono_tz::Tz;

use crate::domain::{AirlineCode, known_airlines};

use super::ids::Codespace;

/// Operators whose resources live only in the common document.
const FREQUENT_OPERATORS: [&str; 3] = ["DY", "SK", "WF"];

/// The organisation responsible for the published timetable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorityInfo {
    pub local_id: String,
    pub name: String,
    pub legal_name: String,
    pub company_number: String,
    pub url: String,
    pub phone: Option<String>,
}

impl Default for AuthorityInfo {
    fn default() -> Self {
        Self {
            local_id: "Avinor".to_string(),
            name: "Avinor".to_string(),
            legal_name: "Avinor AS".to_string(),
            company_number: "985198292".to_string(),
            url: "http://avinor.no/".to_string(),
            phone: Some("+47 815 30 550".to_string()),
        }
    }
}

/// Settings shared by every document of a run.
#[derive(Debug, Clone)]
pub struct DocumentConfig {
    pub codespace: Codespace,
    /// Zone for passing times and frame defaults
    pub time_zone: Tz,
    pub default_language: String,
    pub participant_ref: String,
    pub netex_version: String,
    pub frequent_operators: BTreeSet<AirlineCode>,
    pub authority: AuthorityInfo,
}

impl DocumentConfig {
    pub fn with_codespace(mut self, codespace: Codespace) -> Self {
        self.codespace = codespace;
        self
    }

    pub fn with_time_zone(mut self, time_zone: Tz) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// True if the airline's operator and branding are only published in
    /// the common document.
    pub fn is_frequent_operator(&self, airline: AirlineCode) -> bool {
        self.frequent_operators.contains(&airline)
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            codespace: Codespace::default(),
            time_zone: chrono_tz::Europe::Oslo,
            default_language: "no".to_string(),
            participant_ref: "Avinor".to_string(),
            netex_version: "1.13:NO-NeTEx-networktimetable:1.3".to_string(),
            frequent_operators: known_airlines()
                .filter(|a| FREQUENT_OPERATORS.contains(&a.as_str()))
                .collect(),
            authority: AuthorityInfo::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_frequent_operators() {
        let config = DocumentConfig::default();
        let frequent: Vec<_> = config.frequent_operators.iter().map(|a| a.as_str()).collect();
        assert_eq!(frequent, vec!["DY", "SK", "WF"]);
        assert!(!config.is_frequent_operator(AirlineCode::parse("DX").unwrap()));
    }

    #[test]
    fn defaults() {
        let config = DocumentConfig::default();
        assert_eq!(config.codespace.xmlns, "AVI");
        assert_eq!(config.time_zone, chrono_tz::Europe::Oslo);
        assert_eq!(config.authority.company_number, "985198292");
    }
}
