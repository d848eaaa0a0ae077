//! Read-only stop reference data shared across line conversions.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use tracing::{debug, warn};

use crate::domain::AirportCode;

use super::error::StopError;
use super::registry::StopRegistry;

/// Stop ids for one airport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopReference {
    pub airport: AirportCode,
    pub stop_place_id: String,
    pub scheduled_stop_point_id: String,
    pub route_point_id: String,
    pub quay_ref: Option<String>,
}

/// Stop references for every airport the registry knows, keyed by code.
///
/// Built once per run and shared behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct StopReferenceData {
    stops: BTreeMap<AirportCode, StopReference>,
}

impl StopReferenceData {
    /// Look up every airport in `airports`. Airports the registry does not
    /// know are skipped with a warning; lines that need them fail later.
    pub fn build<R: StopRegistry + ?Sized>(
        registry: &R,
        airports: impl IntoIterator<Item = AirportCode>,
    ) -> Self {
        let mut stops = BTreeMap::new();
        for airport in airports {
            match registry.lookup(airport) {
                Some(record) => {
                    stops.insert(
                        airport,
                        StopReference {
                            airport,
                            stop_place_id: record.stop_place_id,
                            scheduled_stop_point_id: record.stop_point_id,
                            route_point_id: record.route_point_id,
                            quay_ref: record.quay_ref,
                        },
                    );
                }
                None => warn!(airport = %airport, "no stop registry entry for airport"),
            }
        }
        debug!(stops = stops.len(), "built stop reference data");
        Self { stops }
    }

    pub fn get(&self, airport: AirportCode) -> Option<&StopReference> {
        self.stops.get(&airport)
    }

    /// References in airport-code order.
    pub fn iter(&self) -> impl Iterator<Item = &StopReference> {
        self.stops.values()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Re-point quay refs to an external stop register.
    ///
    /// `quays` maps imported ids (our stop place ids, as recorded by the
    /// external register) to that register's quay ids. Stops without an
    /// entry keep their current quay ref.
    pub fn with_quays(mut self, quays: &HashMap<String, String>) -> Self {
        let mut repointed = 0usize;
        for stop in self.stops.values_mut() {
            if let Some(quay) = quays.get(&stop.stop_place_id) {
                stop.quay_ref = Some(quay.clone());
                repointed += 1;
            }
        }
        debug!(repointed, "re-pointed quay refs");
        self
    }
}

/// Load an imported-id → quay-id map from a JSON object.
pub fn load_quay_map(path: impl AsRef<Path>) -> Result<HashMap<String, String>, StopError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| StopError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::known_airports;
    use crate::stops::{DerivedStopRegistry, JsonStopRegistry};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn code(s: &str) -> AirportCode {
        AirportCode::parse(s).unwrap()
    }

    #[test]
    fn derived_registry_covers_all_known_airports() {
        let data = StopReferenceData::build(&DerivedStopRegistry::default(), known_airports());
        assert_eq!(data.len(), known_airports().count());
        let osl = data.get(code("OSL")).unwrap();
        assert_eq!(osl.scheduled_stop_point_id, "AVI:ScheduledStopPoint:OSL");
    }

    #[test]
    fn missing_airports_are_skipped() {
        let registry = JsonStopRegistry::from_json(
            r#"[{"airport": "OSL", "stopPlaceId": "a", "stopPointId": "b", "routePointId": "c"}]"#,
        )
        .unwrap();
        let data = StopReferenceData::build(&registry, [code("OSL"), code("BGO")]);
        assert_eq!(data.len(), 1);
        assert!(data.get(code("BGO")).is_none());
    }

    #[test]
    fn iteration_is_alphabetical() {
        let data = StopReferenceData::build(
            &DerivedStopRegistry::default(),
            [code("TOS"), code("BGO"), code("OSL")],
        );
        let codes: Vec<_> = data.iter().map(|s| s.airport.to_string()).collect();
        assert_eq!(codes, vec!["BGO", "OSL", "TOS"]);
    }

    #[test]
    fn quays_repointed_by_imported_id() {
        let data = StopReferenceData::build(
            &DerivedStopRegistry::default(),
            [code("OSL"), code("BGO")],
        );
        let quays = HashMap::from([("AVI:StopPlace:OSL".to_string(), "NSR:Quay:1".to_string())]);
        let data = data.with_quays(&quays);

        assert_eq!(
            data.get(code("OSL")).unwrap().quay_ref.as_deref(),
            Some("NSR:Quay:1")
        );
        assert_eq!(data.get(code("BGO")).unwrap().quay_ref, None);
    }

    #[test]
    fn quay_map_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"AVI:StopPlace:BGO": "NSR:Quay:2"}}"#).unwrap();
        let map = load_quay_map(file.path()).unwrap();
        assert_eq!(map["AVI:StopPlace:BGO"], "NSR:Quay:2");
    }
}
