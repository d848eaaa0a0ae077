//! Feed sources.
//!
//! The converter only needs a typed, de-duplicated event sequence. Polling,
//! HTTP and retry policy belong to whoever implements [`FeedSource`]; the
//! crate ships a JSON-file source for batch runs and tests.

use std::collections::HashSet;
use std::path::Path;

use chrono_tz::Tz;
use tracing::{debug, info};

use crate::domain::{AirportCode, FlightEvent};

use super::error::FeedError;
use super::normalize::{normalize, parse_schedule_time};
use super::types::{RawFlightRecord, TimeWindow};

/// Supplier of raw flight board records for one airport and window.
pub trait FeedSource {
    fn fetch(
        &self,
        airport: AirportCode,
        window: &TimeWindow,
    ) -> Result<Vec<RawFlightRecord>, FeedError>;
}

/// Feed source backed by a JSON array of records.
#[derive(Debug, Clone, Default)]
pub struct JsonFeedSource {
    records: Vec<RawFlightRecord>,
}

impl JsonFeedSource {
    /// Load records from a JSON file containing an array of records.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FeedError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| FeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let records: Vec<RawFlightRecord> = serde_json::from_str(&json)?;
        debug!(path = %path.display(), records = records.len(), "loaded feed file");
        Ok(Self::from_records(records))
    }

    pub fn from_records(records: Vec<RawFlightRecord>) -> Self {
        Self { records }
    }

    /// Airports that have at least one record, as reported by the feed.
    pub fn queried_airports(&self) -> Vec<AirportCode> {
        let mut airports: Vec<AirportCode> = self
            .records
            .iter()
            .filter_map(|r| AirportCode::parse(r.queried_airport.trim()).ok())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        airports.sort();
        airports
    }
}

impl FeedSource for JsonFeedSource {
    fn fetch(
        &self,
        airport: AirportCode,
        window: &TimeWindow,
    ) -> Result<Vec<RawFlightRecord>, FeedError> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.queried_airport.trim() == airport.as_str())
            // Unparseable times are passed through for the normalizer to drop
            .filter(|r| parse_schedule_time(&r.schedule_time).is_none_or(|t| window.contains(t)))
            .cloned()
            .collect())
    }
}

/// Fetch every airport, de-duplicate and normalize into flight events.
///
/// Records are de-duplicated on (leg id, direction); the first occurrence
/// wins. Airports are queried in the given order.
pub fn collect_events<S: FeedSource>(
    source: &S,
    airports: &[AirportCode],
    window: &TimeWindow,
    tz: Tz,
) -> Result<Vec<FlightEvent>, FeedError> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut records = Vec::new();

    for &airport in airports {
        let fetched = source.fetch(airport, window)?;
        debug!(airport = %airport, records = fetched.len(), "fetched flight board");

        for record in fetched {
            let key = (
                record.unique_id.trim().to_string(),
                record.arr_dep.trim().to_string(),
            );
            if seen.insert(key) {
                records.push(record);
            }
        }
    }

    let events = normalize(&records, tz);
    info!(
        records = records.len(),
        events = events.len(),
        "normalized flight feed"
    );
    Ok(events)
}
