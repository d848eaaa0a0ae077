//! Flight feed input.
//!
//! The national flight-data feed reports each leg twice: once on the
//! departure airport's board and once on the arrival airport's board.
//! This module turns those board rows into typed [`FlightEvent`]s.
//!
//! [`FlightEvent`]: crate::domain::FlightEvent

mod error;
mod normalize;
mod source;
mod types;

pub use error::FeedError;
pub use normalize::{SCHEDULED_PASSENGER, normalize, normalize_record};
pub use source::{FeedSource, JsonFeedSource, collect_events};
pub use types::{RawFlightRecord, TimeWindow};
