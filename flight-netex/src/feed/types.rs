//! Flight feed record types.
//!
//! These mirror the per-airport flight board records as delivered by the
//! feed, before any validation. Every field is kept as the raw string so a
//! single malformed value excludes one record instead of failing a batch.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One departure or arrival row from an airport's flight board.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFlightRecord {
    /// Feed leg identifier, shared by the departure and arrival rows.
    pub unique_id: String,
    /// IATA airline designator
    pub airline: String,
    /// Published flight number, e.g. "DY123"
    pub flight_id: String,
    /// Scheduled time, RFC 3339 in UTC
    pub schedule_time: String,
    /// "D" for departure, "A" for arrival
    pub arr_dep: String,
    /// The other end of the leg (destination for departures, origin for arrivals)
    pub airport: String,
    /// Airport whose board reported this row
    pub queried_airport: String,
    /// IATA service type ("J" = scheduled passenger)
    #[serde(default)]
    pub service_type: Option<String>,
    /// Domestic/international marker
    #[serde(default)]
    pub dom_int: Option<String>,
}

/// Inclusive time window used when querying the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.from <= t && t <= self.to
    }
}
