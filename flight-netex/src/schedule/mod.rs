//! Itinerary reconstruction.
//!
//! Flight events are paired into legs, legs are chained into multi-stop
//! itineraries, and itineraries are grouped into lines and routes ready
//! for document assembly.

mod assemble;
mod chain;
mod config;
mod group;

pub use assemble::{
    AssembleOutcome, MalformedEventGroup, assemble, assemble_group, assemble_with_rejections,
};
pub use chain::{LegIndex, chain, chain_all, connects, layover_within_limit};
pub use config::ChainConfig;
pub use group::{AvailabilityPeriod, FlightRoute, FlightsByNumber, LineDataSet, group_lines};
