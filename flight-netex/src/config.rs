//! Run configuration read from the environment.

use std::path::PathBuf;

use chrono::NaiveDate;
use chrono_tz::Tz;

use crate::netex::{Codespace, DocumentConfig};
use crate::schedule::{AvailabilityPeriod, ChainConfig};

const DEFAULT_OUTPUT_DIR: &str = "output";

/// Longest accepted layover ceiling (one day)
const MAX_LAYOVER_LIMIT_MINS: i64 = 24 * 60;

/// Errors from reading run configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Settings for one conversion, independent of where input comes from.
#[derive(Debug, Clone, Default)]
pub struct ConverterConfig {
    pub document: DocumentConfig,
    pub chain: ChainConfig,
    /// Overrides per-line availability periods when set
    pub period: Option<AvailabilityPeriod>,
}

/// Everything the binary needs to run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub feed_path: PathBuf,
    pub stop_registry_path: Option<PathBuf>,
    pub quay_map_path: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub converter: ConverterConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let feed_path = var("FEED_PATH")
            .map(PathBuf::from)
            .ok_or(ConfigError::Missing("FEED_PATH"))?;

        let mut document = DocumentConfig::default();
        if let Some(xmlns) = var("CODESPACE") {
            let xmlns = xmlns.trim().to_uppercase();
            let url = format!("http://www.rutebanken.org/ns/{}", xmlns.to_lowercase());
            document = document.with_codespace(Codespace::new(xmlns, url));
        }
        if let Some(zone) = var("TIME_ZONE") {
            let tz: Tz = zone.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "TIME_ZONE",
                value: zone.clone(),
            })?;
            document = document.with_time_zone(tz);
        }

        let chain = match var("MAX_LAYOVER_MINS") {
            Some(v) => ChainConfig::new(parse_minutes(
                "MAX_LAYOVER_MINS",
                &v,
                MAX_LAYOVER_LIMIT_MINS,
            )?),
            None => ChainConfig::default(),
        };

        let from = var("PERIOD_FROM")
            .map(|v| parse_date("PERIOD_FROM", &v))
            .transpose()?;
        let to = var("PERIOD_TO")
            .map(|v| parse_date("PERIOD_TO", &v))
            .transpose()?;
        let period = match (from, to) {
            (Some(from), Some(to)) if from <= to => Some(AvailabilityPeriod::new(from, to)),
            (Some(_), Some(_)) => {
                return Err(ConfigError::Invalid {
                    name: "PERIOD_TO",
                    value: "before PERIOD_FROM".to_string(),
                });
            }
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing("PERIOD_TO")),
            (None, Some(_)) => return Err(ConfigError::Missing("PERIOD_FROM")),
        };

        Ok(Self {
            feed_path,
            stop_registry_path: var("STOP_REGISTRY_PATH").map(PathBuf::from),
            quay_map_path: var("QUAY_MAP_PATH").map(PathBuf::from),
            output_dir: var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            converter: ConverterConfig {
                document,
                chain,
                period,
            },
        })
    }
}

fn parse_date(name: &'static str, value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}

/// Minutes in `1..=max`.
fn parse_minutes(name: &'static str, value: &str, max: i64) -> Result<i64, ConfigError> {
    match value.trim().parse::<i64>() {
        Ok(n) if (1..=max).contains(&n) => Ok(n),
        _ => Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[("FEED_PATH", "feed.json")]).unwrap();
        assert_eq!(config.feed_path, PathBuf::from("feed.json"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.stop_registry_path, None);
        assert_eq!(config.converter.document.codespace.xmlns, "AVI");
        assert_eq!(config.converter.document.time_zone, chrono_tz::Europe::Oslo);
        assert_eq!(config.converter.chain.max_layover_mins, 180);
        assert_eq!(config.converter.period, None);
    }

    #[test]
    fn feed_path_required() {
        assert_eq!(config(&[]).unwrap_err(), ConfigError::Missing("FEED_PATH"));
        assert_eq!(
            config(&[("FEED_PATH", "  ")]).unwrap_err(),
            ConfigError::Missing("FEED_PATH")
        );
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("FEED_PATH", "feed.json"),
            ("CODESPACE", "tst"),
            ("TIME_ZONE", "Europe/Stockholm"),
            ("MAX_LAYOVER_MINS", "90"),
            ("PERIOD_FROM", "2024-01-01"),
            ("PERIOD_TO", "2024-03-31"),
            ("OUTPUT_DIR", "/tmp/out"),
        ])
        .unwrap();
        let document = &config.converter.document;
        assert_eq!(document.codespace.xmlns, "TST");
        assert_eq!(document.codespace.xmlns_url, "http://www.rutebanken.org/ns/tst");
        assert_eq!(document.time_zone, chrono_tz::Europe::Stockholm);
        assert_eq!(config.converter.chain.max_layover_mins, 90);
        let period = config.converter.period.unwrap();
        assert_eq!(period.from, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(period.to, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn invalid_values() {
        assert!(matches!(
            config(&[("FEED_PATH", "f"), ("TIME_ZONE", "Mars/Olympus")]),
            Err(ConfigError::Invalid { name: "TIME_ZONE", .. })
        ));
        assert!(matches!(
            config(&[("FEED_PATH", "f"), ("MAX_LAYOVER_MINS", "0")]),
            Err(ConfigError::Invalid { name: "MAX_LAYOVER_MINS", .. })
        ));
        assert!(matches!(
            config(&[("FEED_PATH", "f"), ("PERIOD_FROM", "01.01.2024"), ("PERIOD_TO", "2024-01-02")]),
            Err(ConfigError::Invalid { name: "PERIOD_FROM", .. })
        ));
    }

    #[test]
    fn layover_ceiling_is_capped_at_one_day() {
        let day = config(&[("FEED_PATH", "f"), ("MAX_LAYOVER_MINS", "1440")]).unwrap();
        assert_eq!(day.converter.chain.max_layover_mins, 1440);

        for value in ["1441", "9223372036854775807"] {
            assert_eq!(
                config(&[("FEED_PATH", "f"), ("MAX_LAYOVER_MINS", value)]).unwrap_err(),
                ConfigError::Invalid {
                    name: "MAX_LAYOVER_MINS",
                    value: value.to_string(),
                }
            );
        }
    }

    #[test]
    fn period_needs_both_ends() {
        assert_eq!(
            config(&[("FEED_PATH", "f"), ("PERIOD_FROM", "2024-01-01")]).unwrap_err(),
            ConfigError::Missing("PERIOD_TO")
        );
        assert!(matches!(
            config(&[("FEED_PATH", "f"), ("PERIOD_FROM", "2024-02-01"), ("PERIOD_TO", "2024-01-01")]),
            Err(ConfigError::Invalid { name: "PERIOD_TO", .. })
        ));
    }
}
