//! Stop registries.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::domain::AirportCode;
use crate::netex::ids::{Codespace, ElementType};

use super::error::StopError;

/// Stop ids registered for one airport.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopRecord {
    pub stop_place_id: String,
    pub stop_point_id: String,
    pub route_point_id: String,
    #[serde(default)]
    pub quay_ref: Option<String>,
}

/// Lookup of stop ids by airport.
pub trait StopRegistry {
    fn lookup(&self, airport: AirportCode) -> Option<StopRecord>;
}

/// Registry that composes every id from the airport code.
///
/// Knows every airport; never carries quay refs.
#[derive(Debug, Clone, Default)]
pub struct DerivedStopRegistry {
    codespace: Codespace,
}

impl DerivedStopRegistry {
    pub fn new(codespace: Codespace) -> Self {
        Self { codespace }
    }
}

impl StopRegistry for DerivedStopRegistry {
    fn lookup(&self, airport: AirportCode) -> Option<StopRecord> {
        let code = airport.as_str();
        Some(StopRecord {
            stop_place_id: self.codespace.id(ElementType::StopPlace, code),
            stop_point_id: self.codespace.id(ElementType::ScheduledStopPoint, code),
            route_point_id: self.codespace.id(ElementType::RoutePoint, code),
            quay_ref: None,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RegistryEntry {
    airport: String,
    #[serde(flatten)]
    record: StopRecord,
}

/// Registry loaded from a JSON array of entries.
///
/// ```json
/// [{ "airport": "OSL", "stopPlaceId": "...", "stopPointId": "...",
///    "routePointId": "...", "quayRef": "NSR:Quay:1" }]
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonStopRegistry {
    records: HashMap<AirportCode, StopRecord>,
}

impl JsonStopRegistry {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StopError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| StopError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_json(&json)?;
        debug!(path = %path.display(), stops = registry.records.len(), "loaded stop registry");
        Ok(registry)
    }

    pub fn from_json(json: &str) -> Result<Self, StopError> {
        let entries: Vec<RegistryEntry> = serde_json::from_str(json)?;
        let mut records = HashMap::with_capacity(entries.len());
        for entry in entries {
            let airport = AirportCode::parse(entry.airport.trim())
                .map_err(|_| StopError::InvalidAirport(entry.airport.clone()))?;
            records.insert(airport, entry.record);
        }
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl StopRegistry for JsonStopRegistry {
    fn lookup(&self, airport: AirportCode) -> Option<StopRecord> {
        self.records.get(&airport).cloned()
    }
}
